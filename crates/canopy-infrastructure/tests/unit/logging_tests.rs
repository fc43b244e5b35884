//! Logging Tests

use canopy_domain::error::Error;
use canopy_infrastructure::constants::DEFAULT_LOG_LEVEL;
use canopy_infrastructure::logging::{LoggingConfig, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warn").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);

    assert!(parse_log_level("invalid").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

// The only test in this binary that installs a global subscriber.
#[test]
fn test_init_logging_installs_once() {
    let invalid = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(matches!(
        init_logging(&invalid),
        Err(Error::Configuration { .. })
    ));

    let config = LoggingConfig {
        level: "debug".to_string(),
        ..LoggingConfig::default()
    };
    init_logging(&config).unwrap();

    let second = init_logging(&config);
    assert!(matches!(second, Err(Error::Config { .. })));
}

#[test]
fn test_unknown_level_names_the_rejected_value() {
    let err = parse_log_level("verbose").unwrap_err();
    assert!(err.to_string().contains("verbose"));
}
