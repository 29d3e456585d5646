#![allow(clippy::unwrap_used, clippy::expect_used)]

use driftwatch_core::{DriftError, DwError, DwErrorKind};

#[test]
fn test_every_variant_maps_to_a_kind() {
    let cases = vec![
        (
            DriftError::InvalidPath {
                reason: "empty".to_string(),
            },
            DwErrorKind::InvalidPath,
        ),
        (
            DriftError::UnknownAttribute {
                attribute: "bogus".to_string(),
            },
            DwErrorKind::UnknownAttribute,
        ),
        (
            DriftError::NotFoundInDesiredState {
                instance_id: "i-1".to_string(),
            },
            DwErrorKind::NotFoundInDesiredState,
        ),
        (
            DriftError::Canceled {
                instance_id: "i-1".to_string(),
            },
            DwErrorKind::Canceled,
        ),
        (
            DriftError::TaskFailed {
                instance_id: "i-1".to_string(),
                reason: "panicked".to_string(),
            },
            DwErrorKind::TaskFailed,
        ),
        (
            DriftError::InstanceNotFound {
                instance_id: "i-1".to_string(),
                source_name: "snapshot".to_string(),
            },
            DwErrorKind::NotFound,
        ),
        (
            DriftError::StateFileRead {
                path: "a.tfstate".to_string(),
                reason: "denied".to_string(),
            },
            DwErrorKind::Io,
        ),
        (
            DriftError::StateFileParse {
                path: "a.tfstate".to_string(),
                reason: "eof".to_string(),
            },
            DwErrorKind::StateParse,
        ),
        (
            DriftError::UnsupportedStateFormat {
                path: "main.tf".to_string(),
            },
            DwErrorKind::UnsupportedFormat,
        ),
        (
            DriftError::InvalidConfig {
                reason: "bad".to_string(),
            },
            DwErrorKind::InvalidConfig,
        ),
    ];

    for (err, kind) in cases {
        let message = err.to_string();
        let dw: DwError = err.into();
        assert_eq!(dw.kind(), kind);
        assert_eq!(dw.message(), message);
        assert!(dw.code().starts_with("ERR_"));
    }
}

#[test]
fn test_context_survives_conversion() {
    let dw: DwError = DriftError::InstanceNotFound {
        instance_id: "i-42".to_string(),
        source_name: "terraform state".to_string(),
    }
    .into();
    assert_eq!(dw.instance_id(), Some("i-42"));
    assert_eq!(dw.message(), "instance i-42 not found in terraform state");

    let dw: DwError = DriftError::UnsupportedStateFormat {
        path: "main.tf".to_string(),
    }
    .into();
    assert_eq!(dw.path(), Some("main.tf"));
}

#[test]
fn test_builder_sets_op() {
    let err = DwError::new(DwErrorKind::InvalidInput)
        .with_op("scan")
        .with_message("desired state is empty");
    assert_eq!(err.op(), Some("scan"));
    assert_eq!(
        err.to_string(),
        "[ERR_INVALID_INPUT] in operation 'scan': desired state is empty"
    );
}
