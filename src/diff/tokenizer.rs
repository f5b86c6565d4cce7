use super::types::ComparisonMode;

/// Split normalized text into comparison units.
///
/// Character mode yields one token per Unicode scalar value. Word mode drops
/// empty tokens. Line mode keeps blank lines, but an empty text has no lines
/// at all.
pub fn tokenize(text: &str, mode: ComparisonMode) -> Vec<String> {
    match mode {
        ComparisonMode::Character => text.chars().map(String::from).collect(),
        ComparisonMode::Word => text.split_whitespace().map(str::to_string).collect(),
        ComparisonMode::Line if text.is_empty() => Vec::new(),
        ComparisonMode::Line => text.split('\n').map(str::to_string).collect(),
    }
}
