// API error path tests
// These test configuration failures, error classification and diagnostics

use edifact_envelope::ast::{EdiNode, Element};
use edifact_envelope::context::{Dialect, SeparatorContext, SeparatorOverride};
use edifact_envelope::encode;
use edifact_envelope::error::{ConfigurationError, EdiError, SegmentError};
use miette::Diagnostic;

fn minimal() -> EdiNode {
    EdiNode::container(
        "INTERCHANGE",
        vec![
            EdiNode::segment("UNB", vec![Element::simple("UNOC")]),
            EdiNode::segment("UNZ", vec![Element::simple("0")]),
        ],
    )
}

#[test]
fn test_api_duplicate_separator_is_configuration_error() {
    let overrides = SeparatorOverride {
        component: Some('\''),
        ..Default::default()
    };
    let result = encode(&minimal(), Some(&overrides));
    if let Err(EdiError::Configuration(ConfigurationError::DuplicateSeparator { value, .. })) = result {
        assert_eq!(value, '\'');
    } else {
        panic!("Expected configuration error");
    }
}

#[test]
fn test_api_configuration_error_precedes_missing_nodes() {
    let overrides = SeparatorOverride {
        data: Some(':'),
        ..Default::default()
    };
    let empty = EdiNode::container("INTERCHANGE", vec![]);
    let result = encode(&empty, Some(&overrides));
    assert!(matches!(result, Err(EdiError::Configuration(_))));
}

#[test]
fn test_api_all_equal_separators() {
    let overrides = SeparatorOverride {
        component: Some('|'),
        data: Some('|'),
        release: Some('|'),
        terminator: Some('|'),
        ..Default::default()
    };
    let err = SeparatorContext::new(Dialect::Edifact, Some(&overrides)).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::DuplicateSeparator {
            first: "component separator",
            second: "data element separator",
            value: '|',
        }
    );
}

#[test]
fn test_api_unknown_dialect() {
    let overrides = SeparatorOverride::from_json(r#"{ "dialect": "x12" }"#).unwrap();
    let result = encode(&minimal(), Some(&overrides));
    assert!(matches!(
        result,
        Err(EdiError::Configuration(ConfigurationError::UnknownDialect { .. }))
    ));
}

#[test]
fn test_api_not_found_is_classified() {
    let err = encode(&EdiNode::container("INTERCHANGE", vec![]), None).unwrap_err();
    assert!(err.is_not_found());

    let err = encode(&EdiNode::segment("UNB", vec![]), None).unwrap_err();
    assert!(!err.is_not_found());
}

#[test]
fn test_api_diagnostic_codes() {
    let err: EdiError = ConfigurationError::DuplicateSeparator {
        first: "data element separator",
        second: "release indicator",
        value: '+',
    }
    .into();
    assert_eq!(err.code().unwrap().to_string(), "config::duplicate_separator");
    assert_eq!(err.to_string(), "The data element separator and the release indicator both use '+'");

    let err: EdiError = SegmentError::NotFound {
        tag: "UNZ".to_string(),
    }
    .into();
    assert_eq!(err.code().unwrap().to_string(), "segment::not_found");
    assert!(err.help().is_some());
}

#[test]
fn test_api_report_renders() {
    let err = encode(&EdiNode::container("INTERCHANGE", vec![]), None).unwrap_err();
    let report = miette::Report::new(err);
    assert!(format!("{report:?}").contains("UNB"));
}
