//! SI prefix auto-scaling and magnitude formatting.

use super::header::OHM;

/// Literal shown instead of a number for overload / invalid samples.
pub const OVERLOAD_TEXT: &str = "OL";

/// Ordered `(threshold, prefix)` ladder, smallest first.
pub const SI_LADDER: [(f64, &str); 9] = [
    (1e-12, "p"),
    (1e-9, "n"),
    (1e-6, "µ"),
    (1e-3, "m"),
    (1.0, ""),
    (1e3, "k"),
    (1e6, "M"),
    (1e9, "G"),
    (1e12, "T"),
];

/// Index of the unprefixed entry in [`SI_LADDER`].
const UNITY: usize = 4;

/// Base units that get auto-scaled. Everything else is shown as reported.
pub const SCALED_UNITS: [&str; 4] = ["V", "A", OHM, "F"];

/// Whether `unit` is on the auto-scaling allow-list.
pub fn is_scaled_unit(unit: &str) -> bool {
    SCALED_UNITS.contains(&unit)
}

/// Scale `value` for display and return `(scaled, prefix)`.
///
/// Picks the largest ladder entry whose threshold does not exceed `|value|`.
/// Values below the smallest threshold stay unscaled. A scaled magnitude of
/// 1000 or more moves up one entry while the ladder allows it.
pub fn choose_si_prefix(value: f64, unit: &str) -> (f64, &'static str) {
    if !is_scaled_unit(unit) {
        return (value, "");
    }
    if value == 0.0 {
        return (0.0, "");
    }

    let abs_v = value.abs();
    let mut idx = SI_LADDER
        .iter()
        .rposition(|(factor, _)| abs_v >= *factor)
        .unwrap_or(UNITY);
    let mut scaled = value / SI_LADDER[idx].0;

    if scaled.abs() >= 1000.0 && idx + 1 < SI_LADDER.len() {
        idx += 1;
        scaled = value / SI_LADDER[idx].0;
    }

    (scaled, SI_LADDER[idx].1)
}

/// Scale `value` and return `(scaled, unit_with_prefix)`.
///
/// A textual `OHM` unit is displayed as `Ω`. An empty unit yields an empty label.
pub fn choose_si_unit(value: f64, unit: &str) -> (f64, String) {
    let unit_disp = if unit.eq_ignore_ascii_case("ohm") { OHM } else { unit };
    let (scaled, prefix) = choose_si_prefix(value, unit_disp);
    if unit_disp.is_empty() {
        (scaled, String::new())
    } else {
        (scaled, format!("{prefix}{unit_disp}"))
    }
}

/// Resistance only ever uses `kΩ` / `MΩ`.
pub fn scale_resistance(value: f64) -> (f64, String) {
    let av = value.abs();
    if av >= 1e6 {
        (value / 1e6, format!("M{OHM}"))
    } else if av >= 1e3 {
        (value / 1e3, format!("k{OHM}"))
    } else {
        (value, OHM.to_string())
    }
}

/// Scale according to the unit: the resistance ladder for `Ω`, the SI ladder otherwise.
pub fn scale_for_unit(value: f64, unit: &str) -> (f64, String) {
    if unit == OHM {
        scale_resistance(value)
    } else {
        choose_si_unit(value, unit)
    }
}

/// Four-decimal magnitude, or [`OVERLOAD_TEXT`] when there is no valid number.
pub fn format_value(value: Option<f64>, overload: bool) -> String {
    match value {
        Some(v) if !overload => format!("{v:.4}"),
        _ => OVERLOAD_TEXT.to_string(),
    }
}
