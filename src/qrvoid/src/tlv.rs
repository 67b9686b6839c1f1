//! Tag/length/value field formatting for EMV-style payloads.

use log::warn;

/// Largest value length the two-digit length prefix can express.
pub const MAX_FIELD_LEN: usize = 99;

/// Formats a single `tag + length + value` field.
///
/// An empty value omits the field entirely and returns an empty string. The
/// length counts Unicode scalar values, matching how names and cities are
/// truncated by the payment builder. Tags are not validated.
pub fn format_field(tag: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let len = value.chars().count();
    if len > MAX_FIELD_LEN {
        warn!("Field {tag} has length {len}, which overflows its two-digit prefix");
    }

    format!("{tag}{len:02}{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_basic() {
        assert_eq!(format_field("00", "01"), "000201");
        assert_eq!(format_field("58", "BR"), "5802BR");
        assert_eq!(format_field("00", "br.gov.bcb.pix"), "0014br.gov.bcb.pix");
    }

    #[test]
    fn test_format_field_empty_value_is_omitted() {
        for tag in ["00", "26", "54", "62", "99"] {
            assert_eq!(format_field(tag, ""), "");
        }
    }

    #[test]
    fn test_format_field_structure() {
        for len in [1_usize, 9, 10, 42, 99] {
            let value = "v".repeat(len);
            let field = format_field("59", &value);
            assert!(field.starts_with("59"));
            assert_eq!(&field[2..4], format!("{len:02}"));
            assert_eq!(&field[4..], value);
        }
    }

    #[test]
    fn test_format_field_counts_characters() {
        assert_eq!(format_field("60", "SÃO PAULO"), "6009SÃO PAULO");
    }
}
