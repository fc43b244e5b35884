//! Unit tests for domain error types

use canopy_domain::Error;

#[test]
fn test_provider_not_found_error() {
    let error = Error::provider_not_found("app::Config", "Player");
    match &error {
        Error::ProviderNotFound {
            dependency,
            consumer,
        } => {
            assert_eq!(*dependency, "app::Config");
            assert_eq!(consumer, "Player");
        }
        _ => panic!("Expected ProviderNotFound error"),
    }
    assert!(error.is_resolution_error());
    assert!(!error.is_declaration_error());
    assert!(error.to_string().contains("app::Config"));
}

#[test]
fn test_no_dependencies_declared_error() {
    let error = Error::no_dependencies_declared("app::Hud");
    assert!(matches!(
        error,
        Error::NoDependenciesDeclared { consumer: "app::Hud" }
    ));
    assert!(error.is_declaration_error());
}

#[test]
fn test_invalid_transition_error_uses_debug_form() {
    #[derive(Debug)]
    enum Door {
        Open,
        Locked,
    }

    let error = Error::invalid_transition(&Door::Locked, &Door::Open);
    match error {
        Error::InvalidTransition { from, to } => {
            assert_eq!(from, "Locked");
            assert_eq!(to, "Open");
        }
        _ => panic!("Expected InvalidTransition error"),
    }
}

#[test]
fn test_config_error() {
    let error = Error::config("Missing required config");
    match error {
        Error::Config { message } => assert_eq!(message, "Missing required config"),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_config_with_source_keeps_source() {
    use std::error::Error as _;

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error = Error::config_with_source("Failed to read", io);
    assert!(error.source().is_some());
    assert!(error.to_string().contains("Failed to read"));
}

#[test]
fn test_provision_errors_display() {
    let missing = Error::provision_missing("app::Config", "Root");
    assert_eq!(missing.to_string(), "Root has no value for app::Config");

    let twice = Error::already_provided("app::Config", "Root");
    assert_eq!(twice.to_string(), "Root already provided app::Config");
}
