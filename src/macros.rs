#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a lazily initialized `HashSet<&'static str>` vocabulary.
///
/// Entries must be lowercase: case-insensitive conditions lowercase the token
/// text before the lookup.
#[macro_export]
macro_rules! word_set {
    ($($word:literal),* $(,)?) => {
        once_cell::sync::Lazy::new(|| std::collections::HashSet::from([$($word),*]))
    };
}

/// Append transitions leaving one state, in priority order.
///
/// ```text
/// transitions!(b, start => [
///     Condition::int_range(1, 12) => month,
///     Condition::Any => start,
/// ]);
/// ```
#[macro_export]
macro_rules! transitions {
    ($builder:ident, $from:expr => [ $($cond:expr => $to:expr),* $(,)? ]) => {{
        $( $builder.on($from, $cond, $to); )*
    }};
}
