//! Freshness period: mean mining time projected onto a human time scale.

/// Scale applied to the mean mining time to obtain the freshness period
pub const DEFAULT_FRESHNESS_FACTOR: f64 = 2e5;

const UNITS: [(&str, u64); 4] = [("d", 86_400), ("h", 3_600), ("m", 60), ("s", 1)];

/// Maximum number of units emitted by [`format_compact`]
const MAX_PARTS: usize = 2;

/// Freshness period in seconds for a mean mining time
pub fn freshness_secs(mean_mining_secs: f64, factor: f64) -> f64 {
    mean_mining_secs * factor
}

/// Render whole seconds as at most two units, largest first.
///
/// ```rust
/// use benchlog::freshness::format_compact;
///
/// assert_eq!(format_compact(90_000.0), "1d 1h");
/// assert_eq!(format_compact(3_725.0), "1h 2m");
/// assert_eq!(format_compact(45.0), "45s");
/// assert_eq!(format_compact(0.4), "0s");
/// ```
pub fn format_compact(secs: f64) -> String {
    if !secs.is_finite() {
        return "n/a".to_string();
    }

    let mut remaining = secs.abs().trunc() as u64;
    let mut parts = Vec::with_capacity(MAX_PARTS);

    for (name, size) in UNITS {
        if parts.len() == MAX_PARTS {
            break;
        }
        let value = remaining / size;
        remaining %= size;
        if value > 0 {
            parts.push(format!("{}{}", value, name));
        }
    }

    if parts.is_empty() {
        return "0s".to_string();
    }

    let rendered = parts.join(" ");
    if secs < 0.0 {
        format!("-{}", rendered)
    } else {
        rendered
    }
}
