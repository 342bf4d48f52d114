//! Line classification for sigrok-cli CSV output.
//!
//! Every line coming out of the acquisition tool falls into exactly one
//! [`LineKind`]. Only [`LineKind::Numeric`] and [`LineKind::Overload`] lines
//! produce a display update; header lines are remembered until the next value.

use once_cell::sync::Lazy;
use regex::Regex;

/// Strict numeric literal: optional sign, digits, optional fraction, optional exponent.
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?$").expect("valid float regex")
});

/// Prefixes of libsigrok / driver log lines that are never measurement data.
pub const DRIVER_NOISE_PREFIXES: [&str; 4] = ["sr:", "srd:", "WARNING:", "ERROR:"];

/// Marker that starts a CSV comment line.
pub const COMMENT_MARKER: char = ';';

/// Tokens that mean "out of range" or "no valid number".
///
/// Includes the MSVCRT spellings (`1.#INF`, `1.#QNAN`, ...) that `sigrok-cli`
/// prints on Windows. `inf` and `nan` are listed here on purpose: they are
/// rejected by the numeric grammar and must surface as overload, not as headers.
pub const OVERLOAD_TOKENS: [&str; 15] = [
    "1.#inf", "-1.#inf", "1.#ind", "-1.#ind", "1.#nan", "-1.#nan", "1.#qnan", "-1.#qnan", "inf",
    "-inf", "nan", "-nan", "ol", "over", "overload",
];

/// What a single output line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only.
    Blank,
    /// libsigrok diagnostic output.
    DriverNoise,
    /// CSV comment (`; ...`).
    Comment,
    /// Unit / mode line such as `V DC`.
    Header,
    /// Overload or invalid-number sentinel.
    Overload,
    /// Plain numeric sample.
    Numeric,
}

impl LineKind {
    /// `true` for the two kinds that carry a sample.
    pub fn is_value(&self) -> bool {
        matches!(self, LineKind::Numeric | LineKind::Overload)
    }
}

/// Whether `s` (trimmed) matches the numeric literal grammar.
pub fn is_float_token(s: &str) -> bool {
    FLOAT_RE.is_match(s.trim())
}

/// Whether `s` (trimmed, case-insensitive) is one of [`OVERLOAD_TOKENS`].
pub fn is_overload_token(s: &str) -> bool {
    let t = s.trim().to_lowercase();
    OVERLOAD_TOKENS.contains(&t.as_str())
}

/// Whether `line` starts with one of the [`DRIVER_NOISE_PREFIXES`].
pub fn is_driver_noise(line: &str) -> bool {
    DRIVER_NOISE_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Classify one raw line. Rules are applied in order: noise, comment,
/// numeric, overload, header.
pub fn classify_line(line: &str) -> LineKind {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if is_driver_noise(line) {
        return LineKind::DriverNoise;
    }
    if line.trim_start().starts_with(COMMENT_MARKER) {
        return LineKind::Comment;
    }
    let token = line.trim();
    if is_float_token(token) {
        LineKind::Numeric
    } else if is_overload_token(token) {
        LineKind::Overload
    } else {
        LineKind::Header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_grammar_accepts_common_forms() {
        for s in ["0", "-1", "+2.5", "3.", ".5", "1e3", "-4.2E-07", " 12.0 "] {
            assert!(is_float_token(s), "{s:?} should be numeric");
        }
    }

    #[test]
    fn numeric_grammar_rejects_non_literals() {
        for s in ["", ".", "e5", "1.2.3", "inf", "nan", "1.#INF", "V DC", "0x10", "1e"] {
            assert!(!is_float_token(s), "{s:?} should not be numeric");
        }
    }

    #[test]
    fn overload_tokens_are_case_insensitive() {
        assert!(is_overload_token("1.#INF"));
        assert!(is_overload_token("-1.#QNaN"));
        assert!(is_overload_token(" OL "));
        assert!(is_overload_token("Overload"));
        assert!(!is_overload_token("OLD"));
    }

    #[test]
    fn numeric_and_overload_sets_are_disjoint() {
        for t in OVERLOAD_TOKENS {
            assert!(!is_float_token(t), "{t} matched the numeric grammar");
            assert_eq!(classify_line(t), LineKind::Overload);
            assert_eq!(classify_line(&t.to_uppercase()), LineKind::Overload);
        }
    }

    #[test]
    fn classification_order() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   \r\n"), LineKind::Blank);
        assert_eq!(classify_line("sr: fluke-dmm: opened"), LineKind::DriverNoise);
        assert_eq!(classify_line("srd: something"), LineKind::DriverNoise);
        assert_eq!(classify_line("WARNING: 1.5"), LineKind::DriverNoise);
        assert_eq!(classify_line("ERROR: nope"), LineKind::DriverNoise);
        assert_eq!(classify_line("  ; CSV generated by sigrok-cli"), LineKind::Comment);
        assert_eq!(classify_line("0.1234\r"), LineKind::Numeric);
        assert_eq!(classify_line("nan"), LineKind::Overload);
        assert_eq!(classify_line("V DC"), LineKind::Header);
        assert!(LineKind::Overload.is_value());
        assert!(!LineKind::Header.is_value());
    }
}
