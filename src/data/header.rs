//! Header line parsing: `"V DC"` -> unit `V`, mode `DC`.

/// Greek capital omega, the canonical resistance symbol used for display.
pub const OHM: &str = "Ω";

/// Micro sign used for `µA` / `µF`.
pub const MICRO: &str = "µ";

/// Display aliases for textual unit spellings.
const UNIT_ALIASES: [(&str, &str); 3] = [("Ohm", OHM), ("degC", "°C"), ("degF", "°F")];

/// Normalize a raw unit token as emitted by libsigrok.
///
/// * U+2126 OHM SIGN becomes U+03A9 GREEK CAPITAL OMEGA
/// * `uA` / `uF` get the micro sign
/// * a spelled-out `Ohm` becomes `Ω`
pub fn normalize_unit(u: &str) -> String {
    if u.is_empty() {
        return String::new();
    }
    let u = u
        .replace('\u{2126}', OHM)
        .replace("uA", "µA")
        .replace("uF", "µF");
    if u == "Ohm" {
        OHM.to_string()
    } else {
        u
    }
}

/// Map a unit symbol to its display form (`degC` -> `°C`). Unknown symbols pass through.
pub fn display_unit(unit: &str) -> &str {
    UNIT_ALIASES
        .iter()
        .find(|(from, _)| *from == unit)
        .map(|(_, to)| *to)
        .unwrap_or(unit)
}

/// Parse a header line such as `V DC`, `Ω`, `A AC RMS`.
///
/// Returns `(unit, mode)`. The mode is empty when the header carries none or
/// when it only repeats the unit (some meters report `Ω Ω`).
pub fn parse_header(header_line: &str) -> (String, String) {
    let collapsed = header_line.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return (String::new(), String::new());
    }

    let (unit_tok, mode) = match collapsed.split_once(' ') {
        Some((u, m)) => (u, m.to_string()),
        None => (collapsed.as_str(), String::new()),
    };

    let mut unit = normalize_unit(unit_tok);
    if unit.eq_ignore_ascii_case("ohm") {
        unit = OHM.to_string();
    }

    let mode = if !unit.is_empty() && !mode.is_empty() && mode_repeats_unit(&unit, &mode) {
        String::new()
    } else {
        mode
    };

    (unit, mode)
}

fn mode_repeats_unit(unit: &str, mode: &str) -> bool {
    let m_norm = mode.split_whitespace().collect::<Vec<_>>().join(" ");
    let squashed = m_norm.replace(' ', "");
    if m_norm == format!("{unit} {unit}") || squashed == unit.repeat(2) || m_norm == unit {
        return true;
    }
    unit == OHM && matches!(squashed.to_lowercase().as_str(), "ohmohm" | "omegaomega")
}

/// Compose the label shown under the value: `"V DC"`, or just `"V"` when the
/// mode is empty or equal to the unit.
pub fn compose_label(unit: &str, mode: &str) -> String {
    if !mode.is_empty() && mode != unit {
        format!("{unit} {mode}").trim().to_string()
    } else {
        unit.to_string()
    }
}

/// The short mode line shown below the label; empty when it would repeat the unit.
pub fn short_mode(unit: &str, mode: &str) -> String {
    if !mode.is_empty() && mode != unit {
        mode.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_unit_and_mode() {
        assert_eq!(parse_header("V DC"), ("V".into(), "DC".into()));
        assert_eq!(parse_header("  A   AC  RMS "), ("A".into(), "AC RMS".into()));
        assert_eq!(parse_header("F"), ("F".into(), String::new()));
        assert_eq!(parse_header(""), (String::new(), String::new()));
        assert_eq!(parse_header("   "), (String::new(), String::new()));
    }

    #[test]
    fn duplicated_ohm_mode_is_dropped() {
        assert_eq!(parse_header("Ω Ω"), (OHM.into(), String::new()));
        assert_eq!(parse_header("Ω"), (OHM.into(), String::new()));
        assert_eq!(parse_header("Ω Ω Ω"), (OHM.into(), String::new()));
        assert_eq!(parse_header("Ohm ohm ohm"), (OHM.into(), String::new()));
        assert_eq!(parse_header("ohm Omega Omega"), (OHM.into(), String::new()));
    }

    #[test]
    fn ohm_sign_and_micro_are_normalized() {
        assert_eq!(normalize_unit("\u{2126}"), OHM);
        assert_eq!(normalize_unit("uA"), "µA");
        assert_eq!(normalize_unit("uF"), "µF");
        assert_eq!(normalize_unit("Ohm"), OHM);
        assert_eq!(normalize_unit("OHM"), "OHM");
        assert_eq!(parse_header("OHM"), (OHM.into(), String::new()));
    }

    #[test]
    fn aliases_map_to_symbols() {
        assert_eq!(display_unit("degC"), "°C");
        assert_eq!(display_unit("degF"), "°F");
        assert_eq!(display_unit("Ohm"), OHM);
        assert_eq!(display_unit("Hz"), "Hz");
    }

    #[test]
    fn label_hides_mode_equal_to_unit() {
        assert_eq!(compose_label("V", "DC"), "V DC");
        assert_eq!(compose_label("V", "V"), "V");
        assert_eq!(compose_label("Hz", ""), "Hz");
        assert_eq!(short_mode("V", "DC"), "DC");
        assert_eq!(short_mode("V", "V"), "");
    }
}
