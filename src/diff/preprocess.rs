use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalize raw text before tokenizing.
///
/// Lower-cases first when `case_sensitive` is false, then collapses every
/// whitespace run to one space and trims when `ignore_whitespace` is set.
pub fn preprocess(text: &str, case_sensitive: bool, ignore_whitespace: bool) -> String {
    let folded: Cow<'_, str> = if case_sensitive {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.to_lowercase())
    };

    if ignore_whitespace {
        WHITESPACE_RUN.replace_all(&folded, " ").trim().to_string()
    } else {
        folded.into_owned()
    }
}
