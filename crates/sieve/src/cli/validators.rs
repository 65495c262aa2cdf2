//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Parse a byte size such as `512`, `64K`, `100M` or `2G`.
///
/// Suffixes are binary (K = 1024) and case-insensitive; an optional trailing
/// `B` or `iB` is accepted (`2GiB`, `64kb`). Zero is rejected.
pub fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let upper = s.to_ascii_uppercase();
    let unit_stripped = upper
        .strip_suffix("IB")
        .or_else(|| upper.strip_suffix('B'))
        .unwrap_or(&upper);

    let (digits, multiplier) = match unit_stripped.chars().last() {
        Some('K') => (&unit_stripped[..unit_stripped.len() - 1], 1u64 << 10),
        Some('M') => (&unit_stripped[..unit_stripped.len() - 1], 1u64 << 20),
        Some('G') => (&unit_stripped[..unit_stripped.len() - 1], 1u64 << 30),
        Some('T') => (&unit_stripped[..unit_stripped.len() - 1], 1u64 << 40),
        _ => (unit_stripped, 1),
    };

    let value: u64 = digits
        .trim()
        .parse()
        .map_err(|_| format!("Invalid size: '{s}'. Expected e.g. 512, 64K, 100M, 2G"))?;
    let bytes = value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("Size '{s}' is too large"))?;

    if bytes == 0 {
        return Err("Size must be greater than zero".to_string());
    }
    Ok(bytes)
}

/// Validate a key field name: non-empty after trimming.
pub fn validate_key_field(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Key field cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("100", 100)]
    #[case("64K", 64 * 1024)]
    #[case("64kb", 64 * 1024)]
    #[case("100M", 100 * 1024 * 1024)]
    #[case("2G", 2 * 1024 * 1024 * 1024)]
    #[case("2GiB", 2 * 1024 * 1024 * 1024)]
    #[case(" 1t ", 1 << 40)]
    fn parses_sizes(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(parse_byte_size(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case("0")]
    #[case("G")]
    #[case("12X")]
    #[case("-5")]
    #[case("99999999999999999999T")]
    fn rejects_bad_sizes(#[case] input: &str) {
        assert!(parse_byte_size(input).is_err());
    }

    #[test]
    fn key_field_is_trimmed() {
        assert_eq!(validate_key_field("  username "), Ok("username".to_string()));
        assert!(validate_key_field("   ").is_err());
    }
}
