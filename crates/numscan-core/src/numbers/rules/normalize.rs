//! Conversion of matched number text to values.

/// Parse a matched number (e.g. "-1,234.5") into a float.
///
/// Grouping commas are dropped before parsing. Returns `None` when what is
/// left is not a valid float literal.
pub fn parse_number(token: &str) -> Option<f64> {
    token.replace(',', "").parse::<f64>().ok()
}
