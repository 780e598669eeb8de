//! Vocabularies shared by several recognizers.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Spelled-out numbers accepted where a numeral may appear.
pub(crate) static WORD_NUMBERS: Lazy<HashSet<&'static str>> =
    word_set!["one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten"];
