use clinlex::AnnotateResultVerbose;
use clinlex::engine::RecognizerMetrics;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(res: &AnnotateResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let metrics = &res.details.metrics;

    println!("\n{}", palette.bold(palette.paint(format!("⚙  Annotating: \"{}\"", res.text.trim_end()), ansi::CYAN)));
    println!("  {}", palette.dim(format!("{} tokens", metrics.tokens)));

    println!("\n{}", palette.paint("━━━ Annotations ━━━", ansi::GRAY));
    if res.annotations.is_empty() {
        println!("{}", palette.dim("  No annotations"));
    } else {
        print_annotations(res, &palette);
    }

    println!("\n{}", palette.paint("━━━ Recognizers ━━━", ansi::GRAY));
    if metrics.recognizers.is_empty() {
        println!("{}", palette.dim("  No recognizer enabled"));
    }
    for rec in &metrics.recognizers {
        print_recognizer(rec, &palette);
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    let scanning: std::time::Duration = metrics.recognizers.iter().map(|r| r.duration).sum();
    println!(
        "  Total: {}  │  Tokenize: {}  │  Scan: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.dim(format!("{:?}", metrics.tokenize)),
        palette.paint(format!("{:?}", scanning), ansi::CYAN),
    );
    println!();
}

fn print_annotations(res: &AnnotateResultVerbose, palette: &ansi::Palette) {
    for (idx, ann) in res.annotations.iter().enumerate() {
        let label = match ann.status {
            Some(status) => format!("{} ({})", ann.name(), status.as_str()),
            None => ann.name().to_string(),
        };
        println!(
            "  {} {} {} {}  {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(&ann.body, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("span {}..{}", ann.begin, ann.end), ansi::YELLOW),
            palette.paint(label, ansi::BLUE),
        );
    }
}

fn print_recognizer(rec: &RecognizerMetrics, palette: &ansi::Palette) {
    let stats = &rec.stats;
    println!(
        "  {} {}  {} {}  {}",
        palette.paint(format!("{:<17}", rec.kind.name()), ansi::BLUE),
        if rec.spans > 0 {
            palette.paint(format!("✓ {} spans", rec.spans), ansi::GREEN)
        } else {
            palette.dim(format!("✗ {} spans", rec.spans))
        },
        palette.dim("fed:"),
        palette.paint(stats.tokens_fed.to_string(), ansi::YELLOW),
        palette.dim(format!("{:?}", rec.duration)),
    );

    if stats.overrides_spliced > 0 {
        println!(
            "      {} {}  {} {}",
            palette.dim("overrides:"),
            palette.paint(stats.overrides_spliced.to_string(), ansi::MAGENTA),
            palette.dim("tokens skipped:"),
            palette.paint(stats.tokens_skipped.to_string(), ansi::MAGENTA),
        );
    }
    for (machine, hits) in &stats.hits_by_machine {
        println!("      {} {}", palette.paint(*machine, ansi::CYAN), palette.dim(format!("× {}", hits)));
    }
}
