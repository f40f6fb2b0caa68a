//! Property-based tests for the edit lifecycle.
//!
//! Random event sequences are fed to a controller driven by the manual
//! clock, checking the lifecycle invariants after every step.

use chrono::Utc;
use editstate::builder::ControllerBuilder;
use editstate::config::{CommitMode, ConfigUpdate};
use editstate::controller::{Controller, Event};
use editstate::core::{EditState, State, StateHistory, StateTransition};
use editstate::timer::TimerKind;
use proptest::prelude::*;
use std::time::Duration;

#[derive(Clone, Debug)]
enum Op {
    Send(Event<String>),
    Advance(Duration),
}

fn arbitrary_value() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["", "Alice", "Bob", "Carol"]).prop_map(str::to_string)
}

fn arbitrary_mode() -> impl Strategy<Value = CommitMode> {
    prop_oneof![Just(CommitMode::Optimistic), Just(CommitMode::Pessimistic)]
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Send(Event::Activate)),
        4 => arbitrary_value().prop_map(|v| Op::Send(Event::Change(v))),
        3 => Just(Op::Send(Event::Confirm)),
        1 => Just(Op::Send(Event::Cancel)),
        2 => prop::option::of(arbitrary_value()).prop_map(|v| Op::Send(Event::Ack(v))),
        1 => arbitrary_value().prop_map(|v| Op::Send(Event::ExternalValue(v))),
        1 => any::<bool>().prop_map(|b| Op::Send(Event::Configure(ConfigUpdate::Disabled(b)))),
        1 => any::<bool>()
            .prop_map(|b| Op::Send(Event::Configure(ConfigUpdate::AllowEditWhilePending(b)))),
        1 => arbitrary_mode().prop_map(|m| Op::Send(Event::Configure(ConfigUpdate::Mode(m)))),
        3 => (0u64..1500).prop_map(|ms| Op::Advance(Duration::from_millis(ms))),
    ]
}

fn arbitrary_state() -> impl Strategy<Value = EditState> {
    prop::sample::select(EditState::ALL.to_vec())
}

fn controller(mode: CommitMode) -> Controller<String> {
    ControllerBuilder::new()
        .value("Alice".to_string())
        .mode(mode)
        .save_timeout(Duration::from_millis(1000))
        .saved_duration(Duration::from_millis(300))
        .error_duration(Duration::from_millis(200))
        .validate_with(|v: &String| !v.is_empty())
        .build()
        .unwrap()
}

fn expected_timer(state: EditState, committing: bool) -> Option<TimerKind> {
    match state {
        EditState::Pending => Some(TimerKind::SaveTimeout),
        EditState::Edit if committing => Some(TimerKind::SaveTimeout),
        EditState::Saved => Some(TimerKind::SavedDisplay),
        EditState::Error => Some(TimerKind::ErrorDisplay),
        _ => None,
    }
}

fn apply(editor: &mut Controller<String>, op: &Op) {
    match op {
        Op::Send(event) => {
            editor.handle(event.clone());
        }
        Op::Advance(by) => {
            editor.advance(*by);
        }
    }
}

proptest! {
    #[test]
    fn armed_timer_matches_state(
        mode in arbitrary_mode(),
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut editor = controller(mode);
        for op in &ops {
            apply(&mut editor, op);
            prop_assert_eq!(
                editor.armed_timer().map(|t| t.kind),
                expected_timer(editor.state(), editor.is_committing())
            );
        }
    }

    #[test]
    fn disabled_state_tracks_disabled_flag(
        mode in arbitrary_mode(),
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut editor = controller(mode);
        for op in &ops {
            apply(&mut editor, op);
            prop_assert_eq!(editor.state() == EditState::Disabled, editor.config().disabled);
        }
    }

    #[test]
    fn validity_follows_draft_outside_error(
        mode in arbitrary_mode(),
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut editor = controller(mode);
        for op in &ops {
            apply(&mut editor, op);
            if editor.state() != EditState::Error {
                let context = editor.context();
                prop_assert_eq!(context.is_valid, !context.draft.is_empty());
                prop_assert_eq!(context.is_valid, context.violations.is_empty());
            }
        }
    }

    #[test]
    fn settled_states_show_confirmed_value(
        mode in arbitrary_mode(),
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut editor = controller(mode);
        for op in &ops {
            apply(&mut editor, op);
            if matches!(editor.state(), EditState::View | EditState::Saved | EditState::Error) {
                prop_assert_eq!(&editor.context().draft, &editor.context().confirmed);
            }
        }
    }

    #[test]
    fn confirmed_value_changes_only_through_commit_paths(
        mode in arbitrary_mode(),
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut editor = controller(mode);
        for op in &ops {
            let before = editor.context().confirmed.clone();
            let mode_before = editor.config().mode;
            apply(&mut editor, op);
            if editor.context().confirmed == before {
                continue;
            }
            match op {
                Op::Send(Event::Ack(_)) | Op::Send(Event::ExternalValue(_)) => {}
                Op::Send(Event::Confirm) => {
                    prop_assert_eq!(mode_before, CommitMode::Optimistic);
                    prop_assert_eq!(editor.state(), EditState::Saved);
                }
                other => prop_assert!(false, "confirmed value changed by {:?}", other),
            }
        }
    }

    #[test]
    fn pending_always_has_commit_in_flight(
        mode in arbitrary_mode(),
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut editor = controller(mode);
        for op in &ops {
            apply(&mut editor, op);
            if editor.state() == EditState::Pending {
                prop_assert!(editor.is_committing());
            }
        }
    }

    #[test]
    fn outstanding_commit_always_resolves(
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut editor = controller(CommitMode::Pessimistic);
        for op in &ops {
            apply(&mut editor, op);
            if editor.is_committing() {
                prop_assert!(matches!(
                    editor.state(),
                    EditState::Pending | EditState::Edit | EditState::Error | EditState::Disabled
                ));
            }
        }
        editor.handle(Event::Configure(ConfigUpdate::Disabled(false)));
        editor.advance(Duration::from_secs(10));
        prop_assert!(!editor.is_committing());
    }

    #[test]
    fn every_recorded_transition_changes_state(
        mode in arbitrary_mode(),
        ops in prop::collection::vec(arbitrary_op(), 0..40)
    ) {
        let mut editor = controller(mode);
        for op in &ops {
            apply(&mut editor, op);
        }
        for transition in editor.history().transitions() {
            prop_assert_ne!(transition.from, transition.to);
        }
        if let Some(last) = editor.history().last() {
            prop_assert_eq!(last.to, editor.state());
        }
    }

    #[test]
    fn state_flags_are_consistent(state in arbitrary_state()) {
        prop_assert_eq!(state.is_error(), state == EditState::Error);
        prop_assert_eq!(
            state.is_transient(),
            matches!(expected_timer(state, false), Some(TimerKind::SavedDisplay | TimerKind::ErrorDisplay))
        );
    }

    #[test]
    fn history_never_exceeds_capacity(
        capacity in 1usize..8,
        states in prop::collection::vec(arbitrary_state(), 0..20)
    ) {
        let mut history = StateHistory::with_capacity(capacity);
        let mut from = EditState::View;
        for to in &states {
            history.record(StateTransition {
                from,
                to: *to,
                event: "test".to_string(),
                timestamp: Utc::now(),
            });
            from = *to;
        }

        prop_assert_eq!(history.len(), states.len().min(capacity));
        if let Some(last) = states.last() {
            prop_assert_eq!(history.get_path().last().copied(), Some(last));
        }
    }

    #[test]
    fn history_roundtrip_serialization(
        states in prop::collection::vec(arbitrary_state(), 0..5)
    ) {
        let mut history = StateHistory::new();
        let mut from = EditState::View;
        for to in &states {
            history.record(StateTransition {
                from,
                to: *to,
                event: "test".to_string(),
                timestamp: Utc::now(),
            });
            from = *to;
        }

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<EditState> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(history, deserialized);
    }
}
