//! 窗口配置单元测试

use std::io::Write;

use crate::config::{WindowConfig, MIN_HEIGHT, MIN_WIDTH};
use crate::error::{ConfigError, ConstructError};
use crate::Color;

#[test]
fn test_defaults() {
    let config = WindowConfig::default();
    assert_eq!((config.width, config.height), (1000, 750));
    assert_eq!(config.caption, "Hello EggAche");
    assert_eq!(config.background().unwrap(), Color::WHITE);
    assert!(!config.resizable);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_camel_case_json() {
    let json = r##"{
        "width": 640,
        "height": 480,
        "caption": "Egg",
        "backgroundColor": "#00FF00",
        "resizable": true
    }"##;
    let config = WindowConfig::from_json_str(json).unwrap();
    assert_eq!((config.width, config.height), (640, 480));
    assert_eq!(config.caption, "Egg");
    assert_eq!(config.background().unwrap(), Color::GREEN);
    assert!(config.resizable);
}

#[test]
fn test_missing_fields_use_defaults() {
    let config = WindowConfig::from_json_str(r#"{ "caption": "only caption" }"#).unwrap();
    assert_eq!((config.width, config.height), (1000, 750));
    assert_eq!(config.background_color, "#FFFFFF");
}

#[test]
fn test_bad_json_and_bad_color() {
    assert!(matches!(
        WindowConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        WindowConfig::from_json_str(r#"{ "backgroundColor": "pink" }"#),
        Err(ConfigError::InvalidColor(c)) if c == "pink"
    ));
}

#[test]
fn test_validate_minimum_size() {
    assert!(WindowConfig::new(MIN_WIDTH, MIN_HEIGHT, "min").validate().is_ok());
    assert!(matches!(
        WindowConfig::new(MIN_WIDTH - 1, MIN_HEIGHT, "narrow").validate(),
        Err(ConstructError::WindowTooSmall { .. })
    ));
    assert!(WindowConfig::new(MIN_WIDTH, MIN_HEIGHT - 1, "short").validate().is_err());
}

#[test]
fn test_validate_rejects_bad_background() {
    let mut config = WindowConfig::new(MIN_WIDTH, MIN_HEIGHT, "pink");
    config.background_color = "pink".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConstructError::InvalidBackground(c)) if c == "pink"
    ));

    config.background_color = "#00ff00".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "width": 300, "height": 200 }}"#).unwrap();
    let config = WindowConfig::from_file(file.path()).unwrap();
    assert_eq!((config.width, config.height), (300, 200));

    let missing = file.path().with_extension("missing");
    assert!(matches!(WindowConfig::from_file(missing), Err(ConfigError::Io(_))));
}
