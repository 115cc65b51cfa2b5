//! Scalar parsers for the size and duration values found in benchmark logs.
//!
//! Both parsers are total: any input they cannot make sense of yields `None`
//! rather than an error, and the caller decides what a missing value means.
//!
//! ```rust
//! use benchlog::units::{parse_duration_to_seconds, parse_size_to_kib};
//!
//! assert_eq!(parse_size_to_kib("128 KiB"), Some(128));
//! assert_eq!(parse_size_to_kib("1 MiB"), Some(1024));
//! assert_eq!(parse_duration_to_seconds("1500ms"), Some(1.5));
//! ```

const KIB: u64 = 1024;

/// Split `text` into its leading decimal number and the remaining suffix.
///
/// Accepts `123`, `1.5`, `.5` and `7.` forms. Signs and exponents are rejected.
fn split_number(text: &str) -> Option<(f64, &str)> {
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    let value: f64 = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

/// Byte multiplier for a size unit (case-insensitive).
///
/// Single-letter and `xB` forms are decimal, `xiB` forms are binary.
fn size_multiplier(unit: &str) -> Option<u64> {
    let multiplier = match unit.to_ascii_lowercase().as_str() {
        "" | "b" | "byte" | "bytes" => 1,
        "k" | "kb" => 1_000,
        "m" | "mb" => 1_000_000,
        "g" | "gb" => 1_000_000_000,
        "t" | "tb" => 1_000_000_000_000,
        "kib" => KIB,
        "mib" => KIB.pow(2),
        "gib" => KIB.pow(3),
        "tib" => KIB.pow(4),
        _ => return None,
    };
    Some(multiplier)
}

/// Parse a human-readable size (e.g. `"128 KiB"`, `"1.5 MB"`, `"4096"`) into bytes.
pub fn parse_size_to_bytes(text: &str) -> Option<u64> {
    let (value, rest) = split_number(text.trim())?;
    let multiplier = size_multiplier(rest.trim())?;
    let bytes = (value * multiplier as f64).floor();
    if !bytes.is_finite() || bytes > u64::MAX as f64 {
        return None;
    }
    Some(bytes as u64)
}

/// Parse a human-readable size into whole kibibytes (`floor(bytes / 1024)`).
pub fn parse_size_to_kib(text: &str) -> Option<u64> {
    parse_size_to_bytes(text).map(|bytes| bytes / KIB)
}

/// Seconds per duration unit. The forms match what `Debug` prints for
/// `std::time::Duration`, plus minutes and hours.
fn duration_scale(unit: &str) -> Option<f64> {
    let scale = match unit {
        "ns" => 1e-9,
        "us" | "µs" | "μs" => 1e-6,
        "ms" => 1e-3,
        "s" => 1.0,
        "m" | "min" => 60.0,
        "h" => 3600.0,
        _ => return None,
    };
    Some(scale)
}

/// Parse a human-readable duration (e.g. `"7.21s"`, `"11.865ms"`) into seconds.
///
/// A unit is required; a bare number is rejected.
pub fn parse_duration_to_seconds(text: &str) -> Option<f64> {
    let (value, rest) = split_number(text.trim())?;
    let scale = duration_scale(rest.trim())?;
    Some(value * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_size_binary_units() {
        assert_eq!(parse_size_to_kib("128 KiB"), Some(128));
        assert_eq!(parse_size_to_kib("1 MiB"), Some(1024));
        assert_eq!(parse_size_to_kib("2GiB"), Some(2 * 1024 * 1024));
        assert_eq!(parse_size_to_kib("512 kib"), Some(512));
    }

    #[test]
    fn test_size_decimal_units_floor() {
        // 1 KB = 1000 bytes -> 0 KiB
        assert_eq!(parse_size_to_kib("1 KB"), Some(0));
        assert_eq!(parse_size_to_kib("2 KB"), Some(1));
        assert_eq!(parse_size_to_bytes("1.5 MB"), Some(1_500_000));
        assert_eq!(parse_size_to_kib("1 M"), Some(976));
    }

    #[test]
    fn test_size_plain_bytes() {
        assert_eq!(parse_size_to_kib("4096"), Some(4));
        assert_eq!(parse_size_to_kib("4096 bytes"), Some(4));
        assert_eq!(parse_size_to_kib("1023 B"), Some(0));
    }

    #[test]
    fn test_size_fractional() {
        assert_eq!(parse_size_to_kib("0.5 MiB"), Some(512));
        assert_eq!(parse_size_to_bytes("1.5 KiB"), Some(1536));
    }

    #[test]
    fn test_size_rejects_garbage() {
        assert_eq!(parse_size_to_kib(""), None);
        assert_eq!(parse_size_to_kib("KiB"), None);
        assert_eq!(parse_size_to_kib("12 parsecs"), None);
        assert_eq!(parse_size_to_kib("-5 KiB"), None);
        assert_eq!(parse_size_to_kib("1.2.3 KiB"), None);
        assert_eq!(parse_size_to_kib("128 KiB extra"), None);
    }

    #[test]
    fn test_duration_units() {
        assert_eq!(parse_duration_to_seconds("7.21s"), Some(7.21));
        assert_eq!(parse_duration_to_seconds("1500ms"), Some(1.5));
        assert_eq!(parse_duration_to_seconds("2m"), Some(120.0));
        assert_eq!(parse_duration_to_seconds("1h"), Some(3600.0));
        let ms = parse_duration_to_seconds("11.865ms").unwrap();
        assert!((ms - 0.011865).abs() < 1e-12);
        let us = parse_duration_to_seconds("850µs").unwrap();
        assert!((us - 0.00085).abs() < 1e-12);
        let ns = parse_duration_to_seconds("120ns").unwrap();
        assert!((ns - 1.2e-7).abs() < 1e-18);
    }

    #[test]
    fn test_duration_tolerates_whitespace() {
        assert_eq!(parse_duration_to_seconds("  3.5 s \n"), Some(3.5));
    }

    #[test]
    fn test_duration_rejects_garbage() {
        assert_eq!(parse_duration_to_seconds(""), None);
        assert_eq!(parse_duration_to_seconds("42"), None);
        assert_eq!(parse_duration_to_seconds("fast"), None);
        assert_eq!(parse_duration_to_seconds("3 fortnights"), None);
    }

    #[test]
    fn test_duration_matches_debug_format() {
        let d = std::time::Duration::from_millis(7212);
        let parsed = parse_duration_to_seconds(&format!("{:?}", d)).unwrap();
        assert!((parsed - 7.212).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_kib_is_floor_of_bytes(bytes in 0u64..=(1u64 << 40)) {
            prop_assert_eq!(parse_size_to_kib(&bytes.to_string()), Some(bytes / 1024));
            prop_assert_eq!(parse_size_to_kib(&format!("{} B", bytes)), Some(bytes / 1024));
        }

        #[test]
        fn prop_binary_units_scale(n in 0u64..1_000_000) {
            prop_assert_eq!(parse_size_to_kib(&format!("{} KiB", n)), Some(n));
            prop_assert_eq!(parse_size_to_kib(&format!("{} MiB", n)), Some(n * 1024));
        }

        #[test]
        fn prop_millis_convert_to_seconds(ms in 0u32..10_000_000) {
            let parsed = parse_duration_to_seconds(&format!("{}ms", ms)).unwrap();
            prop_assert!((parsed - ms as f64 / 1000.0).abs() < 1e-9);
        }
    }
}
