//! Minimal CSV formatting helpers shared by the manifest mirror and the
//! scheduler export.

/// Quote a field when it contains a delimiter, quote, or newline.
pub fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format one CSV row (no trailing newline).
///
/// # Examples
///
/// ```
/// use reelsmith_core::format_row;
///
/// let row = format_row(&["a".to_string(), "b,c".to_string()]);
/// assert_eq!(row, "a,\"b,c\"");
/// ```
pub fn format_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn plain_fields_pass_through() {
        assert_eq!(escape_field("plain"), "plain");
    }
}
