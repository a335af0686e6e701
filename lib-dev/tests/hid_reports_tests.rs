// SPDX-License-Identifier: MIT
// Copyright (c) 2025 The beacon authors

use beacon_hid::hid_reports::*;

#[test]
fn test_parse_known_colors() {
    assert_eq!(Color::parse("red"), Color::Red);
    assert_eq!(Color::parse("green"), Color::Green);
    assert_eq!(Color::parse("blue"), Color::Blue);
    assert_eq!(Color::parse("off"), Color::Off);
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(Color::parse("RED"), Color::Red);
    assert_eq!(Color::parse("Green"), Color::Green);
    assert_eq!(Color::parse(" Blue "), Color::Blue);
    assert_eq!(Color::parse("OFF"), Color::Off);
}

#[test]
fn test_parse_unknown_keeps_name() {
    let color = Color::parse("chartreuse");
    assert_eq!(color, Color::Unknown("chartreuse".to_string()));
    assert_eq!(color.to_rgb(), Color::Off.to_rgb());
}

#[test]
fn test_rgb_values() {
    assert_eq!(Color::Red.to_rgb(), [0xFF, 0x00, 0x00]);
    assert_eq!(Color::Green.to_rgb(), [0x00, 0xFF, 0x00]);
    assert_eq!(Color::Blue.to_rgb(), [0x00, 0x00, 0xFF]);
    assert_eq!(Color::Off.to_rgb(), [0x00, 0x00, 0x00]);
}

#[test]
fn test_set_color_buffer() {
    let report = SetColor::new(Color::Red);

    assert_eq!(report.report_id(), 0x00);
    assert_eq!(report.to_buffer(), vec![0x01, 0xFF, 0xFF, 0x00, 0x00, 0, 0, 0]);
}

#[test]
fn test_set_color_buffer_off() {
    let report = SetColor::new(Color::Off);

    assert_eq!(report.to_buffer(), vec![0x01, 0xFF, 0x00, 0x00, 0x00, 0, 0, 0]);
}

#[test]
fn test_set_color_unknown_matches_off() {
    let unknown = SetColor::new(Color::parse("no-such-color"));
    let off = SetColor::new(Color::Off);

    assert_eq!(unknown.to_buffer(), off.to_buffer());
}

#[test]
fn test_color_deserialize() {
    let color: Color = serde_json::from_str("\"Blue\"").unwrap();
    assert_eq!(color, Color::Blue);

    let color: Color = serde_json::from_str("\"teal\"").unwrap();
    assert_eq!(color, Color::Unknown("teal".to_string()));
}

#[test]
fn test_color_display() {
    assert_eq!(format!("{}", Color::Red), "red");
    assert_eq!(format!("{}", Color::parse("teal")), "unknown(teal)");
}
