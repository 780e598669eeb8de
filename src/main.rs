mod debug_report;

use clap::Parser;
use clinlex::{Options, RecognizerSet, annotate_verbose_with};
use std::io::{self, IsTerminal, Read};
use std::process;
use tracing_subscriber::EnvFilter;

const EXIT_CODES: &str = "Exit codes:
  0  Success.
  2  Invalid arguments or missing input.

Set RUST_LOG=clinlex=trace to log every match.";

/// Annotate clinical text with dates, times, measurements, negation cues and more.
#[derive(Debug, Parser)]
#[command(name = "clinlex", version, after_help = EXIT_CODES)]
struct Cli {
    /// Text to annotate. Reads stdin when neither this nor --input is given.
    #[arg(value_name = "INPUT", trailing_var_arg = true, conflicts_with = "input")]
    words: Vec<String>,

    /// Text to annotate.
    #[arg(short, long, value_name = "TEXT")]
    input: Option<String>,

    /// Comma-separated recognizers to run, e.g. `date,negation` (default: all).
    #[arg(long, value_name = "LIST")]
    only: Option<RecognizerSet>,

    /// Force ANSI color output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long, overrides_with = "color")]
    no_color: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let input = match read_input(&cli) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let color = if cli.no_color {
        false
    } else {
        cli.color || io::stdout().is_terminal()
    };
    let options = Options { recognizers: cli.only.unwrap_or_default() };

    let res = annotate_verbose_with(&input, &options);
    debug_report::print_run(&res, color);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn read_input(cli: &Cli) -> Result<String, String> {
    let input = match (&cli.input, cli.words.is_empty()) {
        (Some(text), _) => text.clone(),
        (None, false) => cli.words.join(" "),
        (None, true) => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err("error: no input provided (pass text, --input <TEXT>, or pipe it on stdin)".to_string());
    }
    Ok(input)
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}
