//! Fallible cell parsers.
//!
//! Each parser returns a [`RowError`] instead of a sentinel; the pipeline
//! decides to drop the row.

use crate::preprocessing::error::RowError;

/// Parses a float, accepting surrounding whitespace.
fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts a total-area cell to square feet.
///
/// A cell containing `-` is read as a two-sided range `a - b` and mapped to
/// its midpoint; anything else must be a single number.
///
/// ```
/// use bangalore_homeprice::preprocessing::convert_sqft_to_num;
///
/// assert_eq!(convert_sqft_to_num("2100 - 2850").unwrap(), 2475.0);
/// assert_eq!(convert_sqft_to_num("1056").unwrap(), 1056.0);
/// assert!(convert_sqft_to_num("34.46Sq. Meter").is_err());
/// ```
pub fn convert_sqft_to_num(s: &str) -> Result<f64, RowError> {
    let invalid = || RowError::InvalidArea(s.to_string());

    if s.contains('-') {
        let mut parts = s.split('-');
        let (a, b) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => (a, b),
            _ => return Err(invalid()),
        };
        let a = parse_finite(a).ok_or_else(invalid)?;
        let b = parse_finite(b).ok_or_else(invalid)?;
        return Ok((a + b) / 2.0);
    }
    parse_finite(s).ok_or_else(invalid)
}

/// Bedroom count from a size cell such as `"3 BHK"` or `"4 Bedroom"`.
///
/// Only the first space-delimited token is read.
pub fn parse_bhk(size: &str) -> Result<u32, RowError> {
    let token = size.split(' ').next().unwrap_or_default();
    token
        .trim()
        .parse::<u32>()
        .map_err(|_| RowError::InvalidSize(size.to_string()))
}

/// Parses a non-negative whole count stored as a float cell (`"2.0"`).
pub fn parse_count(column: &'static str, s: &str) -> Result<u32, RowError> {
    let invalid = || RowError::InvalidNumber {
        column,
        value: s.to_string(),
    };
    let v = parse_finite(s).ok_or_else(invalid)?;
    if v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
        return Err(invalid());
    }
    Ok(v as u32)
}

/// Parses a finite float cell.
pub fn parse_amount(column: &'static str, s: &str) -> Result<f64, RowError> {
    parse_finite(s).ok_or_else(|| RowError::InvalidNumber {
        column,
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_sqft_range_midpoint() {
        assert_eq!(convert_sqft_to_num("1000 - 1200").unwrap(), 1100.0);
        assert_eq!(convert_sqft_to_num("1000-1500").unwrap(), 1250.0);
        assert_eq!(convert_sqft_to_num("1133 - 1384").unwrap(), 1258.5);
    }

    #[test]
    fn test_convert_sqft_plain_number() {
        assert_eq!(convert_sqft_to_num("1200").unwrap(), 1200.0);
        assert_eq!(convert_sqft_to_num(" 1200.5 ").unwrap(), 1200.5);
    }

    #[test]
    fn test_convert_sqft_garbage() {
        assert!(convert_sqft_to_num("34.46Sq. Meter").is_err());
        assert!(convert_sqft_to_num("4125Perch").is_err());
        assert!(convert_sqft_to_num("").is_err());
        assert!(convert_sqft_to_num("nan").is_err());
        assert!(convert_sqft_to_num("inf").is_err());
    }

    #[test]
    fn test_convert_sqft_malformed_range() {
        assert!(convert_sqft_to_num("1-2-3").is_err());
        assert!(convert_sqft_to_num("-500").is_err());
        assert!(convert_sqft_to_num("1000 - abc").is_err());
    }

    #[test]
    fn test_parse_bhk_leading_token() {
        assert_eq!(parse_bhk("2 BHK").unwrap(), 2);
        assert_eq!(parse_bhk("4 Bedroom").unwrap(), 4);
        assert_eq!(parse_bhk("1 RK").unwrap(), 1);
        assert_eq!(parse_bhk("11").unwrap(), 11);
    }

    #[test]
    fn test_parse_bhk_rejects_non_numeric() {
        assert_eq!(
            parse_bhk("BHK 2"),
            Err(RowError::InvalidSize("BHK 2".to_string()))
        );
        assert!(parse_bhk(" 2 BHK").is_err());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("bath", "2.0").unwrap(), 2);
        assert_eq!(parse_count("bath", "3").unwrap(), 3);
        assert!(parse_count("bath", "2.5").is_err());
        assert!(parse_count("bath", "-1").is_err());
        assert!(parse_count("bath", "many").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("price", "39.07").unwrap(), 39.07);
        assert!(matches!(
            parse_amount("price", "n/a"),
            Err(RowError::InvalidNumber { column: "price", .. })
        ));
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite(" 1056 "), Some(1056.0));
        assert_eq!(parse_finite("1e3"), Some(1000.0));
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_finite("2100 - 2850"), None);
    }
}
