use dmm_readout::data::classify::{is_float_token, is_overload_token, OVERLOAD_TOKENS};
use dmm_readout::data::scaling::{choose_si_prefix, format_value};
use dmm_readout::{classify_line, parse_header, LineKind, ReadoutSession};

fn run(lines: &[&str]) -> (ReadoutSession, Vec<dmm_readout::Reading>) {
    let mut session = ReadoutSession::new();
    let readings = lines.iter().filter_map(|l| session.feed_line(l)).collect();
    (session, readings)
}

#[test]
fn header_examples() {
    assert_eq!(parse_header("Ω Ω"), ("Ω".to_string(), String::new()));
    assert_eq!(parse_header("V DC"), ("V".to_string(), "DC".to_string()));
}

#[test]
fn voltage_scenario() {
    let (_, readings) = run(&["V DC", "1.234"]);
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].display_text(), "1.2340 V DC");
}

#[test]
fn resistance_scenario() {
    let (_, readings) = run(&["Ω", "1500000"]);
    assert_eq!(readings[0].display_text(), "1.5000 MΩ");
    let (_, readings) = run(&["Ω", "1500"]);
    assert_eq!(readings[0].display_text(), "1.5000 kΩ");
}

#[test]
fn overload_scenario() {
    let (_, readings) = run(&["A AC", "1.#INF"]);
    assert_eq!(readings[0].value_text, "OL");
    assert_eq!(readings[0].label, "A AC");
}

#[test]
fn repeated_header_is_idempotent() {
    let (once, _) = run(&["V DC", "2.0"]);
    let (twice, _) = run(&["V DC", "V DC", "2.0"]);
    assert_eq!(
        once.last_reading().map(|r| r.display_text()),
        twice.last_reading().map(|r| r.display_text())
    );

    let (session, readings) = run(&["V DC", "2.0", "A DC", "A DC"]);
    assert_eq!(readings.len(), 1);
    assert_eq!(session.last_reading().unwrap().label, "V DC");
}

#[test]
fn dial_change_between_polls() {
    // Each poll re-sends the header, so a function change is picked up at once.
    let (_, readings) = run(&[
        "; CSV generated by sigrok-cli",
        "V DC",
        "12.5",
        "sr: fluke-dmm: closing",
        "; CSV generated by sigrok-cli",
        "Ω",
        "4700",
        "F",
        "0.00000047",
    ]);
    let shown: Vec<String> = readings.iter().map(|r| r.display_text()).collect();
    assert_eq!(shown, vec!["12.5000 V DC", "4.7000 kΩ", "470.0000 nF"]);
}

#[test]
fn classes_are_disjoint() {
    let numerics = ["0", "-0.5", "+3.", ".25", "6.02e23", "1E-9"];
    for n in numerics {
        assert!(is_float_token(n));
        assert!(!is_overload_token(n));
        assert_eq!(classify_line(n), LineKind::Numeric);
    }
    for t in OVERLOAD_TOKENS {
        assert!(!is_float_token(t));
        assert_eq!(classify_line(&format!("  {} ", t.to_uppercase())), LineKind::Overload);
    }
}

#[test]
fn formatted_magnitude_reparses() {
    for v in [0.0, 1.0, 0.0000033, 123.456789, -98765.4321, 3.3e-10] {
        let (scaled, _) = choose_si_prefix(v, "V");
        let text = format_value(Some(scaled), false);
        assert_eq!(text.split('.').nth(1).map(str::len), Some(4), "{text}");
        let back: f64 = text.parse().unwrap();
        assert!((back - scaled).abs() < 1e-4, "{v}: {text} vs {scaled}");
    }
}
