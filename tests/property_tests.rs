//! Property-based tests for state machine transitions.
//!
//! Random sequences of transition requests and ticks are run against a
//! small machine whose states log their enter and exit hooks.

use gambit::builder::StateMachineBuilder;
use gambit::core::{BaseState, DataState, HasKind, Kind, SimpleState};
use gambit::kind_enum;
use gambit::machine::{Context, StateMachine};
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

kind_enum! {
    enum Mode {
        Red,
        Green,
        Blue,
        Amber,
        Unregistered,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Hook {
    Enter(Mode),
    Exit(Mode),
}

/// Hook log plus the transitions hooks should request next.
#[derive(Default)]
struct Shared {
    hooks: RefCell<Vec<Hook>>,
    plan: RefCell<VecDeque<Mode>>,
}

type Handle = Rc<Shared>;

/// Request the next planned transition from inside a hook, if any.
fn follow_plan(shared: &Shared, ctx: &mut Context<'_, Mode, ()>) {
    let next = shared.plan.borrow_mut().pop_front();
    match next {
        Some(Mode::Amber) => ctx.change_state_with::<Amber, u8>(0, false),
        Some(mode) => ctx.change_kind(mode, false),
        None => {}
    }
}

macro_rules! logging_state {
    ($name:ident, $kind:expr) => {
        struct $name {
            shared: Handle,
        }

        impl HasKind<Mode> for $name {
            const KIND: Mode = $kind;
        }

        impl BaseState<Mode, ()> for $name {
            fn on_update_state(&mut self, ctx: &mut Context<'_, Mode, ()>) {
                follow_plan(&self.shared, ctx);
            }

            fn on_exit_state(&mut self, _ctx: &mut Context<'_, Mode, ()>) {
                self.shared.hooks.borrow_mut().push(Hook::Exit($kind));
            }
        }

        impl SimpleState<Mode, ()> for $name {
            fn on_enter_state(&mut self, ctx: &mut Context<'_, Mode, ()>) {
                self.shared.hooks.borrow_mut().push(Hook::Enter($kind));
                follow_plan(&self.shared, ctx);
            }
        }
    };
}

logging_state!(Red, Mode::Red);
logging_state!(Green, Mode::Green);
logging_state!(Blue, Mode::Blue);

/// Entered with a payload only.
struct Amber {
    shared: Handle,
    payload: u8,
}

impl HasKind<Mode> for Amber {
    const KIND: Mode = Mode::Amber;
}

impl BaseState<Mode, ()> for Amber {
    fn on_update_state(&mut self, ctx: &mut Context<'_, Mode, ()>) {
        follow_plan(&self.shared, ctx);
    }

    fn on_exit_state(&mut self, _ctx: &mut Context<'_, Mode, ()>) {
        self.shared.hooks.borrow_mut().push(Hook::Exit(Mode::Amber));
    }
}

impl DataState<Mode, (), u8> for Amber {
    fn on_enter_state(&mut self, payload: u8, ctx: &mut Context<'_, Mode, ()>) {
        self.payload = payload;
        self.shared.hooks.borrow_mut().push(Hook::Enter(Mode::Amber));
        follow_plan(&self.shared, ctx);
    }
}

#[derive(Clone, Debug)]
enum Op {
    Change(Mode, bool),
    Typed(u8, bool),
    /// Queue requests for hooks to make, then tick so they start firing
    Chain(Vec<Mode>),
    Update,
    Deactivate,
}

prop_compose! {
    fn arbitrary_mode()(variant in 0..5u8) -> Mode {
        match variant {
            0 => Mode::Red,
            1 => Mode::Green,
            2 => Mode::Blue,
            3 => Mode::Amber,
            _ => Mode::Unregistered,
        }
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (arbitrary_mode(), any::<bool>()).prop_map(|(mode, force)| Op::Change(mode, force)),
        2 => (any::<u8>(), any::<bool>()).prop_map(|(payload, force)| Op::Typed(payload, force)),
        2 => prop::collection::vec(arbitrary_mode(), 1..6).prop_map(Op::Chain),
        2 => Just(Op::Update),
        1 => Just(Op::Deactivate),
    ]
}

fn machine(shared: &Handle, history_capacity: usize) -> StateMachine<Mode, ()> {
    StateMachineBuilder::new()
        .simple(Red { shared: shared.clone() })
        .simple(Green { shared: shared.clone() })
        .simple(Blue { shared: shared.clone() })
        .data(Amber {
            shared: shared.clone(),
            payload: 0,
        })
        .initial(Mode::Red)
        .max_chained_transitions(3)
        .history_capacity(history_capacity)
        .build()
        .unwrap()
}

fn apply(machine: &mut StateMachine<Mode, ()>, shared: &Shared, op: &Op) {
    let dt = Duration::from_millis(16);
    match op {
        Op::Change(mode, force) => machine.change_kind(&mut (), *mode, *force),
        Op::Typed(payload, force) => {
            machine.change_state_with::<Amber, u8>(&mut (), *payload, *force)
        }
        Op::Chain(modes) => {
            shared.plan.borrow_mut().extend(modes.iter().copied());
            machine.update(&mut (), dt);
        }
        Op::Update => machine.update(&mut (), dt),
        Op::Deactivate => machine.deactivate(&mut ()),
    }
}

/// Replay the hook log, returning the active kind it implies, or an error if
/// an enter ever ran while another state was still active.
fn replay(log: &[Hook]) -> Result<Option<Mode>, String> {
    let mut active = None;
    for hook in log {
        match (*hook, active) {
            (Hook::Enter(mode), None) => active = Some(mode),
            (Hook::Enter(mode), Some(other)) => {
                return Err(format!("{} entered while {} active", mode.name(), other.name()));
            }
            (Hook::Exit(mode), Some(other)) if mode == other => active = None,
            (Hook::Exit(mode), _) => {
                return Err(format!("{} exited while not active", mode.name()));
            }
        }
    }
    Ok(active)
}

proptest! {
    #[test]
    fn at_most_one_state_is_active(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let shared = Handle::default();
        let mut machine = machine(&shared, 256);

        for op in &ops {
            apply(&mut machine, &shared, op);
            let active = replay(&shared.hooks.borrow());
            prop_assert_eq!(active, Ok(machine.current_kind()));
        }
    }

    #[test]
    fn history_never_exceeds_capacity(
        capacity in 0usize..8,
        ops in prop::collection::vec(arbitrary_op(), 0..40),
    ) {
        let shared = Handle::default();
        let mut machine = machine(&shared, capacity);

        for op in &ops {
            apply(&mut machine, &shared, op);
            prop_assert!(machine.history().len() <= capacity);
        }
    }

    #[test]
    fn history_ends_at_current_kind(ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let shared = Handle::default();
        let mut machine = machine(&shared, 256);

        for op in &ops {
            apply(&mut machine, &shared, op);
        }

        if let Some(last) = machine.history().last() {
            prop_assert_eq!(last.to, machine.current_kind());
        }
    }

    #[test]
    fn unforced_change_to_unregistered_kind_is_noop(
        ops in prop::collection::vec(arbitrary_op(), 0..20),
    ) {
        let shared = Handle::default();
        let mut machine = machine(&shared, 256);
        for op in &ops {
            apply(&mut machine, &shared, op);
        }
        let before = machine.current_kind();
        let recorded = machine.history().len();
        let hooks = shared.hooks.borrow().len();

        machine.change_kind(&mut (), Mode::Unregistered, false);

        prop_assert_eq!(machine.current_kind(), before);
        prop_assert_eq!(machine.history().len(), recorded);
        prop_assert_eq!(shared.hooks.borrow().len(), hooks);
    }

    #[test]
    fn forced_change_to_unregistered_kind_deactivates(
        ops in prop::collection::vec(arbitrary_op(), 0..20),
    ) {
        let shared = Handle::default();
        let mut machine = machine(&shared, 256);
        for op in &ops {
            apply(&mut machine, &shared, op);
        }

        machine.change_kind(&mut (), Mode::Unregistered, true);

        prop_assert_eq!(machine.current_kind(), None);
        prop_assert_eq!(replay(&shared.hooks.borrow()), Ok(None));
    }

    #[test]
    fn typed_transition_delivers_payload(payload in any::<u8>(), force in any::<bool>()) {
        let shared = Handle::default();
        let mut machine = machine(&shared, 256);

        machine.change_state_with::<Amber, u8>(&mut (), payload, force);

        prop_assert_eq!(machine.current::<Amber>().map(|amber| amber.payload), Some(payload));
        prop_assert_eq!(shared.hooks.borrow().clone(), vec![Hook::Enter(Mode::Amber)]);
    }

    #[test]
    fn kind_names_round_trip(mode in arbitrary_mode()) {
        prop_assert_eq!(Mode::from_name(mode.name()), Some(mode));
    }
}
