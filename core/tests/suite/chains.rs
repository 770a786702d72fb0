//! End-to-end chains through the public API.

use avow_core::{
    Action, AvowError, Classification, Each, FieldSet, MessageCatalog, SequencingViolation,
    Subject, SubjectTracker, SubjectType, Transition, Verify, subject,
};

use crate::common::violation;

#[test]
fn single_field_wrapper_must() {
    let x = 5i32;
    let tracker = subject!(x).must().unwrap();
    assert_eq!(tracker.subject_name(), Some("x"));
    assert_eq!(tracker.subject_type(), Some(SubjectType::of::<i32>()));
    assert!(tracker.has(Action::Musted));
    assert!(tracker.has(Action::Named));
    assert_eq!(tracker.classification(), Classification::Unknown);
}

#[test]
fn two_field_wrapper_is_ambiguous_everywhere() {
    let (a, b) = (1, 2);
    let calls: [fn(FieldSet) -> Result<SubjectTracker<FieldSet>, AvowError>; 5] = [
        |set| set.as_argument(None),
        |set| set.as_operation_result(None),
        |set| set.as_test_value(Some("explicit")),
        |set| set.for_recording(None),
        FieldSet::must,
    ];
    for call in calls {
        let err = call(subject!(a, b)).unwrap_err();
        assert_eq!(
            err,
            AvowError::AmbiguousSubject {
                field_names: vec!["a", "b"]
            }
        );
        assert!(err.to_string().contains("a, b"));
        assert!(err.is_misuse());
    }
}

#[test]
fn argument_chain_reports_argument_failure() {
    let timeout_ms = 0u64;
    let err = subject!(timeout_ms)
        .as_argument(None)
        .and_then(SubjectTracker::must)
        .and_then(|tracker| tracker.be_greater_than(0))
        .unwrap_err();
    let err = match err {
        AvowError::Verification(err) => err,
        other => panic!("expected verification error, got {other:?}"),
    };
    assert_eq!(err.classification(), Classification::Argument);
    assert_eq!(err.subject_name(), Some("timeout_ms"));
    assert_eq!(err.subject_type(), "u64");
    assert_eq!(err.verification(), "be_greater_than");
}

#[test]
fn operation_result_and_test_value_keep_classification() {
    let err = 3i32
        .as_operation_result(Some("len"))
        .and_then(SubjectTracker::must)
        .and_then(|tracker| tracker.be_equal_to(4))
        .unwrap_err();
    assert!(matches!(
        &err,
        AvowError::Verification(inner) if inner.classification() == Classification::OperationResult
    ));

    let err = "abc"
        .as_test_value(None)
        .and_then(SubjectTracker::must)
        .and_then(|tracker| tracker.be_empty())
        .unwrap_err();
    assert!(matches!(
        &err,
        AvowError::Verification(inner) if inner.classification() == Classification::TestValue
    ));
}

#[test]
fn double_classification_is_sequencing_error() {
    let tracker = 1i32.as_argument(None).unwrap();
    assert_eq!(
        violation(tracker.clone().as_argument(None)),
        SequencingViolation::AlreadyTracked
    );
    assert_eq!(
        violation(tracker.clone().as_operation_result(Some("x"))),
        SequencingViolation::AlreadyTracked
    );
    assert_eq!(
        violation(tracker.as_test_value(None)),
        SequencingViolation::AlreadyTracked
    );
}

#[test]
fn each_requires_must() {
    let tracker = vec![1, 2].as_argument(None).unwrap();
    assert_eq!(violation(tracker.each()), SequencingViolation::EachWithoutMust);

    let each = vec![1, 2].must().unwrap().each().unwrap();
    assert_eq!(violation(each.each()), SequencingViolation::EachAfterEach);
}

#[test]
fn each_wrapper_cannot_restart_chain() {
    let each: Each<Vec<i32>> = vec![1].must().unwrap().each().unwrap();
    assert_eq!(
        violation(each.clone().as_argument(None)),
        SequencingViolation::AlreadyTracked
    );
    assert_eq!(
        violation(each.clone().must()),
        SequencingViolation::MustAfterCommitment
    );
    assert_eq!(
        violation(each.for_recording(None)),
        SequencingViolation::RecordingAfterCommitment
    );
}

#[test]
fn and_requires_prior_success() {
    assert_eq!(
        violation(1i32.must().and_then(SubjectTracker::and)),
        SequencingViolation::AndWithoutVerification
    );
    let verified = 1i32.must().unwrap().be_equal_to(1).unwrap();
    let before = verified.actions();
    let after = verified.and().unwrap();
    assert_eq!(after.actions(), before);
}

#[test]
fn must_after_verification_is_rejected() {
    let verified = 1i32.must().unwrap().be_equal_to(1).unwrap();
    assert_eq!(violation(verified.must()), SequencingViolation::MustAfterCommitment);
}

#[test]
fn uninitialized_tracker_rejects_chain_calls() {
    assert_eq!(
        violation(SubjectTracker::<String>::default().must()),
        SequencingViolation::UninitializedTracker {
            transition: Transition::Must
        }
    );
    assert_eq!(
        violation(SubjectTracker::<String>::default().for_recording(None)),
        SequencingViolation::UninitializedTracker {
            transition: Transition::ForRecording
        }
    );
    assert_eq!(
        violation(SubjectTracker::<String>::default().be_equal_to(String::new())),
        SequencingViolation::UninitializedTracker {
            transition: Transition::Verify
        }
    );
}

#[test]
fn element_predicates_cover_nested_collections() {
    let matrix = vec![vec![1, 2], vec![], vec![3]];
    let err = matrix
        .as_argument(Some("matrix"))
        .and_then(SubjectTracker::must)
        .and_then(SubjectTracker::each)
        .and_then(|each| each.not_be_empty())
        .unwrap_err();
    assert!(err.to_string().contains("contains an element at index 1 that is empty"));
}

#[test]
fn catalog_overrides_rendering_only() {
    let catalog = MessageCatalog::from_toml_str(
        "improper_use_suffix = \"Check the call order.\"\nseparator = \" -- \"",
    )
    .unwrap();
    let err = 1i32.must().and_then(SubjectTracker::and).unwrap_err();
    let rendered = err.render(&catalog);
    assert!(rendered.ends_with(" -- Check the call order."));
    assert_ne!(rendered, err.to_string());
    assert!(err
        .to_string()
        .ends_with(MessageCatalog::default().improper_use_suffix()));
}

#[test]
fn borrowed_or_wrapped_tracker_is_already_tracked() {
    let tracker = 1i32.as_argument(Some("n")).unwrap();
    let attempts = [
        (&tracker).as_operation_result(None).map(|_| ()),
        (&tracker).must().map(|_| ()),
        subject!(tracker).must().map(|_| ()),
    ];
    for attempt in attempts {
        assert_eq!(
            attempt.unwrap_err().sequencing_violation(),
            Some(SequencingViolation::AlreadyTracked)
        );
    }
}
