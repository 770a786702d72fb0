//! Property tests over the sequencing rules and arbitrary subjects.

use avow_core::sequencing::check;
use avow_core::{
    Action, Actions, AvowError, SequencingViolation, Subject, SubjectTracker, SubjectType,
    Transition, Verify, subject,
};
use proptest::collection::vec;
use proptest::prelude::{ProptestConfig, any, prop_assert, prop_assert_eq, proptest};

use crate::common::{DummyValue, TRANSITION_ACTIONS, any_actions, any_dummy_value};

fn known() -> Option<SubjectType> {
    Some(SubjectType::of::<i32>())
}

/// Flags a successful transition adds, mirroring the tracker.
fn added_by(transition: Transition) -> Option<Action> {
    match transition {
        Transition::ForRecording => Some(Action::PutIntoRecordingMode),
        Transition::Must => Some(Action::Musted),
        Transition::Each => Some(Action::Eached),
        Transition::Classify | Transition::And | Transition::Verify | Transition::VerifyEach => {
            None
        }
    }
}

/// Walk a random sequence of transitions from a fresh tracker, applying only
/// the legal ones, and return the states visited.
fn walk(steps: &[usize]) -> Vec<Actions> {
    let mut actions = Actions::from(Action::Classified);
    let mut visited = vec![actions];
    for step in steps {
        let transition = Transition::ALL[step % Transition::ALL.len()];
        if check(actions, known(), transition).is_err() {
            continue;
        }
        let next = match transition {
            Transition::Verify if !actions.contains(Action::PutIntoRecordingMode) => {
                Some(Action::VerifiedAtLeastOnce)
            }
            Transition::VerifyEach => Some(Action::EachedValueVerifiedForIteration),
            other => added_by(other),
        };
        if let Some(action) = next {
            actions = actions.with(action);
            if action == Action::EachedValueVerifiedForIteration {
                actions = actions.with(Action::VerifiedAtLeastOnce);
            }
        }
        visited.push(actions);
    }
    visited
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn flags_are_monotonic(steps in vec(any::<usize>(), 0..32)) {
        let visited = walk(&steps);
        for pair in visited.windows(2) {
            prop_assert!(pair[1].is_superset_of(pair[0]));
        }
    }

    #[test]
    fn reachable_states_respect_invariants(steps in vec(any::<usize>(), 0..32)) {
        for actions in walk(&steps) {
            if actions.contains(Action::PutIntoRecordingMode) {
                prop_assert!(!actions.intersects(Actions::COMMITTED));
            }
            if actions.contains(Action::Eached) {
                prop_assert!(actions.contains(Action::Musted));
            }
        }
    }

    #[test]
    fn must_and_recording_exclude_each_other(actions in any_actions()) {
        if actions.contains(Action::PutIntoRecordingMode) {
            prop_assert_eq!(
                check(actions, known(), Transition::Must).unwrap_err().violation(),
                SequencingViolation::MustAfterCommitment
            );
        }
        if actions.contains(Action::Musted) {
            prop_assert_eq!(
                check(actions, known(), Transition::ForRecording).unwrap_err().violation(),
                SequencingViolation::RecordingAfterCommitment
            );
        }
    }

    #[test]
    fn each_iff_musted_not_eached(actions in any_actions(), typed in any::<bool>()) {
        let subject_type = if typed { known() } else { None };
        let expected = typed && actions.contains(Action::Musted) && !actions.contains(Action::Eached);
        prop_assert_eq!(check(actions, subject_type, Transition::Each).is_ok(), expected);
    }

    #[test]
    fn and_iff_musted_and_verified(actions in any_actions()) {
        let expected = actions.contains(Action::Musted) && actions.contains(Action::VerifiedAtLeastOnce);
        prop_assert_eq!(check(actions, known(), Transition::And).is_ok(), expected);
    }

    #[test]
    fn classify_always_rejected(actions in any_actions(), typed in any::<bool>()) {
        let subject_type = if typed { known() } else { None };
        prop_assert_eq!(
            check(actions, subject_type, Transition::Classify).unwrap_err().violation(),
            SequencingViolation::AlreadyTracked
        );
    }

    #[test]
    fn transition_actions_only_added(actions in any_actions(), index in 0usize..5) {
        let action = TRANSITION_ACTIONS[index];
        let next = actions.with(action);
        prop_assert!(next.is_superset_of(actions));
        prop_assert!(next.contains(action));
    }

    #[test]
    fn any_value_can_enter_a_chain(value in any_dummy_value()) {
        match value {
            DummyValue::Int(value) => {
                let tracker = subject!(value).must().unwrap();
                prop_assert_eq!(tracker.subject_type(), Some(SubjectType::of::<i64>()));
                prop_assert_eq!(tracker.subject_name(), Some("value"));
                prop_assert!(tracker.be_equal_to(value).is_ok());
            }
            DummyValue::Text(value) => {
                let blank = value.trim().is_empty();
                let result = value.as_argument(Some("text")).and_then(SubjectTracker::must)
                    .and_then(|tracker| tracker.not_be_blank());
                prop_assert_eq!(result.is_err(), blank);
            }
            DummyValue::Flag(value) => {
                let result = value.as_test_value(None).and_then(SubjectTracker::must)
                    .and_then(|tracker| tracker.be_true());
                prop_assert_eq!(result.is_ok(), value);
            }
            DummyValue::List(values) => {
                let all_positive = values.iter().all(|value| *value > 0);
                let result = values.as_operation_result(Some("values"))
                    .and_then(SubjectTracker::must)
                    .and_then(SubjectTracker::each)
                    .and_then(|each| each.be_greater_than(0));
                prop_assert_eq!(result.is_ok(), all_positive);
            }
        }
    }

    #[test]
    fn recorded_failure_never_escapes(value in any::<i32>()) {
        let tracker = value.for_recording(Some("n")).unwrap().be_greater_than(0).unwrap();
        prop_assert_eq!(tracker.verification_failure().is_some(), value <= 0);
        let projected = avow_core::to_self_validation_failure(&tracker);
        prop_assert!(!matches!(projected, Err(AvowError::Verification(_))));
    }
}
