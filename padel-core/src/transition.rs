//! Step transition sequencing.
//!
//! A step change runs `Idle -> Exiting -> Entering -> Idle`. The controller
//! never sleeps itself: it hands back [`TransitionCommand`]s and the host
//! (a browser timer, a test, the CLI driver) reports elapsed delays through
//! [`TransitionController::exit_elapsed`] and
//! [`TransitionController::settle_elapsed`].
use crate::config::TransitionTimings;
use crate::step::{StepPosition, WizardStep};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Exiting,
    Entering,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionDirection {
    #[default]
    Forward,
    Backward,
}

impl TransitionDirection {
    /// CSS modifier used by the step container animation.
    #[must_use]
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionSnapshot<S> {
    pub phase: TransitionPhase,
    pub direction: TransitionDirection,
    pub position: StepPosition<S>,
}

impl<S> TransitionSnapshot<S> {
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        !matches!(self.phase, TransitionPhase::Idle)
    }
}

/// Work the host must schedule on behalf of the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionCommand<S> {
    /// Call `exit_elapsed` after `after`.
    ScheduleExit { after: Duration },
    /// Switch the visible view to `target`, then call `settle_elapsed`
    /// after `settle_after`.
    Navigate {
        target: StepPosition<S>,
        settle_after: Duration,
    },
}

type Completion = Box<dyn FnOnce()>;

/// Sole owner of the wizard's step position and transition state.
pub struct TransitionController<S: WizardStep> {
    position: StepPosition<S>,
    phase: TransitionPhase,
    direction: TransitionDirection,
    pending: Option<StepPosition<S>>,
    timings: TransitionTimings,
    on_complete: Option<Completion>,
}

impl<S: WizardStep> std::fmt::Debug for TransitionController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("position", &self.position)
            .field("phase", &self.phase)
            .field("direction", &self.direction)
            .field("pending", &self.pending)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}

impl<S: WizardStep> TransitionController<S> {
    #[must_use]
    pub fn new(position: StepPosition<S>, timings: TransitionTimings) -> Self {
        Self {
            position,
            phase: TransitionPhase::Idle,
            direction: TransitionDirection::Forward,
            pending: None,
            timings,
            on_complete: None,
        }
    }

    #[must_use]
    pub fn current_state(&self) -> TransitionSnapshot<S> {
        TransitionSnapshot {
            phase: self.phase,
            direction: self.direction,
            position: self.position,
        }
    }

    #[must_use]
    pub const fn position(&self) -> StepPosition<S> {
        self.position
    }

    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        !matches!(self.phase, TransitionPhase::Idle)
    }

    #[must_use]
    pub const fn timings(&self) -> TransitionTimings {
        self.timings
    }

    /// Whether a back control should be enabled at `position`.
    #[must_use]
    pub fn can_go_back(position: StepPosition<S>) -> bool {
        position.previous().is_some()
    }

    /// Re-seat the controller, dropping any in-flight transition and its
    /// completion callback.
    pub fn reset(&mut self, position: StepPosition<S>) {
        self.position = position;
        self.phase = TransitionPhase::Idle;
        self.direction = TransitionDirection::Forward;
        self.pending = None;
        self.on_complete = None;
    }

    /// Advance from `current`; the last ordinal step leads to `Terminal`.
    pub fn go_to_next_step(&mut self, current: StepPosition<S>) -> Option<TransitionCommand<S>> {
        let target = current.next()?;
        self.navigate_to_step(target, TransitionDirection::Forward)
    }

    /// Step back from `current`. A no-op on the first step.
    pub fn go_to_previous_step(
        &mut self,
        current: StepPosition<S>,
    ) -> Option<TransitionCommand<S>> {
        let Some(target) = current.previous() else {
            log::debug!("ignoring back navigation from {}", current.slug());
            return None;
        };
        self.navigate_to_step(target, TransitionDirection::Backward)
    }

    /// Begin a transition to `target`. Returns `None` without side effects
    /// if a transition is already running: the first request wins.
    pub fn navigate_to_step(
        &mut self,
        target: StepPosition<S>,
        direction: TransitionDirection,
    ) -> Option<TransitionCommand<S>> {
        if self.is_transitioning() {
            log::debug!(
                "dropping transition to {} while {:?}",
                target.slug(),
                self.phase
            );
            return None;
        }
        self.phase = TransitionPhase::Exiting;
        self.direction = direction;
        self.pending = Some(target);
        Some(TransitionCommand::ScheduleExit {
            after: self.timings.exit(),
        })
    }

    /// Like [`Self::navigate_to_step`], running `on_complete` once the
    /// transition settles. The callback is dropped if the request is rejected.
    pub fn navigate_to_step_then(
        &mut self,
        target: StepPosition<S>,
        direction: TransitionDirection,
        on_complete: impl FnOnce() + 'static,
    ) -> Option<TransitionCommand<S>> {
        let command = self.navigate_to_step(target, direction)?;
        self.on_complete = Some(Box::new(on_complete));
        Some(command)
    }

    /// Exit animation finished: apply the step change.
    pub fn exit_elapsed(&mut self) -> Option<TransitionCommand<S>> {
        if self.phase != TransitionPhase::Exiting {
            return None;
        }
        let target = self.pending.take()?;
        self.position = target;
        self.phase = TransitionPhase::Entering;
        Some(TransitionCommand::Navigate {
            target,
            settle_after: self.timings.settle(),
        })
    }

    /// Entry settled: back to idle. Returns `true` when this call completed
    /// a transition.
    pub fn settle_elapsed(&mut self) -> bool {
        if self.phase != TransitionPhase::Entering {
            return false;
        }
        self.phase = TransitionPhase::Idle;
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
        true
    }

    /// Drive a command to completion synchronously, ignoring delays.
    /// Returns the position reached.
    pub fn run_to_idle(&mut self, command: Option<TransitionCommand<S>>) -> StepPosition<S> {
        let mut next = command;
        while let Some(cmd) = next {
            next = match cmd {
                TransitionCommand::ScheduleExit { .. } => self.exit_elapsed(),
                TransitionCommand::Navigate { .. } => {
                    self.settle_elapsed();
                    None
                }
            };
        }
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{OnboardingStep, TournamentStep};
    use std::cell::Cell;
    use std::rc::Rc;

    fn controller<S: WizardStep>() -> TransitionController<S> {
        TransitionController::new(StepPosition::first(), TransitionTimings::default())
    }

    #[test]
    fn next_reaches_terminal_after_each_ordinal_step() {
        let mut ctl = controller::<TournamentStep>();
        for call in 1..=TournamentStep::ALL.len() {
            let current = ctl.position();
            assert!(!current.is_terminal(), "terminal too early at call {call}");
            let cmd = ctl.go_to_next_step(current);
            ctl.run_to_idle(cmd);
        }
        assert_eq!(ctl.position(), StepPosition::Terminal);
        assert_eq!(ctl.go_to_next_step(StepPosition::Terminal), None);
    }

    #[test]
    fn sequence_passes_through_each_phase() {
        let mut ctl = controller::<OnboardingStep>();
        let cmd = ctl.go_to_next_step(ctl.position());
        assert_eq!(
            cmd,
            Some(TransitionCommand::ScheduleExit {
                after: Duration::from_millis(300)
            })
        );
        assert_eq!(ctl.current_state().phase, TransitionPhase::Exiting);
        assert_eq!(ctl.position(), StepPosition::Step(OnboardingStep::Name));

        let nav = ctl.exit_elapsed();
        assert_eq!(
            nav,
            Some(TransitionCommand::Navigate {
                target: StepPosition::Step(OnboardingStep::Gender),
                settle_after: Duration::from_millis(50),
            })
        );
        assert_eq!(ctl.current_state().phase, TransitionPhase::Entering);
        assert!(ctl.is_transitioning());

        assert!(ctl.settle_elapsed());
        assert!(!ctl.is_transitioning());
        assert!(!ctl.settle_elapsed());
    }

    #[test]
    fn requests_while_transitioning_are_dropped() {
        let mut ctl = controller::<OnboardingStep>();
        let start = ctl.position();
        assert!(ctl.go_to_next_step(start).is_some());
        assert_eq!(ctl.go_to_next_step(start), None);
        assert_eq!(
            ctl.navigate_to_step(StepPosition::Terminal, TransitionDirection::Forward),
            None
        );
        assert_eq!(ctl.position(), start);

        ctl.exit_elapsed();
        assert_eq!(ctl.go_to_previous_step(ctl.position()), None);
        assert_eq!(ctl.position(), StepPosition::Step(OnboardingStep::Gender));
        assert_eq!(ctl.current_state().direction, TransitionDirection::Forward);
    }

    #[test]
    fn back_is_a_no_op_on_first_step() {
        let mut ctl = controller::<OnboardingStep>();
        assert!(!TransitionController::can_go_back(ctl.position()));
        assert_eq!(ctl.go_to_previous_step(ctl.position()), None);
        assert!(!ctl.is_transitioning());
    }

    #[test]
    fn back_from_terminal_returns_to_last_step() {
        let mut ctl = TransitionController::<OnboardingStep>::new(
            StepPosition::Terminal,
            TransitionTimings::immediate(),
        );
        let cmd = ctl.go_to_previous_step(StepPosition::Terminal);
        assert_eq!(ctl.current_state().direction, TransitionDirection::Backward);
        assert_eq!(
            ctl.run_to_idle(cmd),
            StepPosition::Step(OnboardingStep::Photo)
        );
    }

    #[test]
    fn completion_runs_once_after_settle() {
        let fired = Rc::new(Cell::new(0));
        let mut ctl = controller::<OnboardingStep>();
        let counter = fired.clone();
        let cmd = ctl.navigate_to_step_then(
            StepPosition::Terminal,
            TransitionDirection::Forward,
            move || counter.set(counter.get() + 1),
        );
        ctl.exit_elapsed();
        assert_eq!(fired.get(), 0);
        assert!(cmd.is_some());
        ctl.settle_elapsed();
        ctl.settle_elapsed();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn rejected_request_drops_its_callback() {
        let fired = Rc::new(Cell::new(false));
        let mut ctl = controller::<OnboardingStep>();
        let first = ctl.go_to_next_step(ctl.position());
        let flag = fired.clone();
        let second = ctl.navigate_to_step_then(
            StepPosition::Terminal,
            TransitionDirection::Forward,
            move || flag.set(true),
        );
        assert!(second.is_none());
        ctl.run_to_idle(first);
        assert!(!fired.get());
    }

    #[test]
    fn out_of_phase_events_are_ignored() {
        let mut ctl = controller::<OnboardingStep>();
        assert_eq!(ctl.exit_elapsed(), None);
        assert!(!ctl.settle_elapsed());
        ctl.go_to_next_step(ctl.position());
        ctl.reset(StepPosition::Step(OnboardingStep::Nationality));
        assert_eq!(ctl.exit_elapsed(), None);
        assert_eq!(
            ctl.position(),
            StepPosition::Step(OnboardingStep::Nationality)
        );
    }
}
