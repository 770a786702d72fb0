//! Shared fixtures for integration tests.

#![allow(dead_code)]

use avow_core::{Action, Actions, AvowError, SequencingViolation, Subject, SubjectTracker, Verify};
use proptest::collection::vec;
use proptest::prelude::{Just, Strategy, any, prop_oneof};

/// A recording-mode tracker named `name` that captured a failure.
pub fn failed_recording(name: &str) -> SubjectTracker<i32> {
    (-1i32)
        .for_recording(Some(name))
        .and_then(|tracker| tracker.be_greater_than(0))
        .expect("recording-mode fixture must not error")
}

/// A recording-mode tracker named `name` whose verification passed.
pub fn passed_recording(name: &str) -> SubjectTracker<i32> {
    1i32.for_recording(Some(name))
        .and_then(|tracker| tracker.be_greater_than(0))
        .expect("recording-mode fixture must not error")
}

pub fn violation(result: Result<impl Sized, AvowError>) -> SequencingViolation {
    match result {
        Ok(_) => panic!("expected a sequencing error, got success"),
        Err(err) => err
            .sequencing_violation()
            .unwrap_or_else(|| panic!("expected a sequencing error, got {err:?}")),
    }
}

/// Arbitrary action sets, including ones no legal chain can reach.
pub fn any_actions() -> impl Strategy<Value = Actions> {
    any::<u8>().prop_map(Actions::from_bits_truncate)
}

/// Arbitrary subject values of a few shapes, as dummy inputs.
#[derive(Debug, Clone)]
pub enum DummyValue {
    Int(i64),
    Text(String),
    Flag(bool),
    List(Vec<u16>),
}

pub fn any_dummy_value() -> impl Strategy<Value = DummyValue> {
    prop_oneof![
        any::<i64>().prop_map(DummyValue::Int),
        ".*".prop_map(DummyValue::Text),
        any::<bool>().prop_map(DummyValue::Flag),
        vec(any::<u16>(), 0..8).prop_map(DummyValue::List),
        Just(DummyValue::Text(String::new())),
    ]
}

/// Every action a legal transition may add.
pub const TRANSITION_ACTIONS: [Action; 5] = [
    Action::PutIntoRecordingMode,
    Action::Musted,
    Action::Eached,
    Action::VerifiedAtLeastOnce,
    Action::EachedValueVerifiedForIteration,
];
