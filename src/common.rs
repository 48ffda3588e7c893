//! Small helpers shared between encoder and decoder

/// Returns the multivalue delimiter if it is usable, treating `Some("")` as unset
pub(crate) fn active_delimiter(delimiter: Option<&str>) -> Option<&str> {
    delimiter.filter(|d| !d.is_empty())
}

/// Blank means empty or whitespace only
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
