//! Property checks for the slot invariants over generated prompts and histories.

use promptslot::{
    MemoryStore, NavigationReset, Prompt, PromptSession, PromptText, ShowOutcome, SlotValue,
};
use proptest::prelude::*;

fn prompt_text() -> impl Strategy<Value = PromptText> {
    prop_oneof![
        "[A-Za-z .]{0,16}".prop_map(PromptText::Literal),
        ("[A-Z_.]{1,24}", proptest::option::of(0u32..1000)).prop_map(|(key, code)| {
            let text = PromptText::key(key);
            match code {
                Some(code) => text.with_variable("CODE", code),
                None => text,
            }
        }),
    ]
}

fn prompt() -> impl Strategy<Value = Prompt> {
    (
        prompt_text(),
        prompt_text(),
        proptest::collection::vec("[a-z]{1,10}", 0..4),
    )
        .prop_map(|(title, text, actions)| {
            actions
                .into_iter()
                .fold(Prompt::new(title, text), Prompt::with_named_action)
        })
}

fn slot_value() -> impl Strategy<Value = SlotValue> {
    prop_oneof![Just(SlotValue::Empty), prompt().prop_map(SlotValue::Prompt)]
}

#[derive(Debug, Clone)]
enum Op {
    Show(SlotValue),
    Navigate,
    Reload,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => slot_value().prop_map(Op::Show),
        1 => Just(Op::Navigate),
        1 => Just(Op::Reload),
    ]
}

fn seeded(initial: &SlotValue) -> (MemoryStore, PromptSession, NavigationReset) {
    let store = MemoryStore::new();
    let (session, router) = PromptSession::start(store.clone()).expect("start");
    session
        .arbiter()
        .show_status(initial.clone())
        .expect("seed slot");
    (store, session, router)
}

proptest! {
    #[test]
    fn hiding_always_empties_the_slot(initial in slot_value()) {
        let (_store, session, _router) = seeded(&initial);
        let outcome = session.arbiter().show_status(SlotValue::Empty).expect("hide");
        prop_assert_eq!(outcome, ShowOutcome::Applied);
        prop_assert_eq!(session.arbiter().get_status(), SlotValue::Empty);
    }

    #[test]
    fn empty_slot_accepts_any_prompt(candidate in prompt()) {
        let (_store, session, _router) = seeded(&SlotValue::Empty);
        session.arbiter().show(candidate.clone()).expect("show");
        prop_assert_eq!(session.arbiter().get_status(), SlotValue::Prompt(candidate));
    }

    #[test]
    fn occupied_slot_keeps_the_first_prompt(first in prompt(), second in prompt()) {
        let (_store, session, _router) = seeded(&SlotValue::Prompt(first.clone()));
        let outcome = session.arbiter().show(second).expect("show");
        prop_assert_eq!(outcome, ShowOutcome::Suppressed);
        prop_assert_eq!(session.arbiter().get_status(), SlotValue::Prompt(first));
    }

    #[test]
    fn navigation_always_empties_the_slot(initial in slot_value()) {
        let (_store, session, router) = seeded(&initial);
        prop_assert!(router.navigation_completed().expect("navigate"));
        prop_assert_eq!(session.arbiter().get_status(), SlotValue::Empty);
    }

    #[test]
    fn reload_restores_the_persisted_value(initial in slot_value()) {
        let (store, session, _router) = seeded(&initial);
        drop(session);
        let (reloaded, _router) = PromptSession::start(store).expect("reload");
        prop_assert_eq!(reloaded.arbiter().get_status(), initial);
    }

    #[test]
    fn histories_match_the_two_state_model(ops in proptest::collection::vec(op(), 0..24)) {
        let store = MemoryStore::new();
        let (mut session, mut router) = PromptSession::start(store.clone()).expect("start");
        let mut model = SlotValue::Empty;

        for op in ops {
            match op {
                Op::Show(request) => {
                    let expected = if model.is_empty() || request.is_empty() {
                        model = request.clone();
                        ShowOutcome::Applied
                    } else {
                        ShowOutcome::Suppressed
                    };
                    let outcome = session.arbiter().show_status(request).expect("show_status");
                    prop_assert_eq!(outcome, expected);
                }
                Op::Navigate => {
                    router.navigation_completed().expect("navigate");
                    model = SlotValue::Empty;
                }
                Op::Reload => {
                    drop(session);
                    let (next, next_router) = PromptSession::start(store.clone()).expect("reload");
                    session = next;
                    router = next_router;
                }
            }
            prop_assert_eq!(session.arbiter().get_status(), model.clone());
        }
    }
}
