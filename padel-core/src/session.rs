use crate::config::WizardConfig;
use crate::draft::{Draft, DraftStore};
use crate::step::{StepPosition, WizardStep};
use crate::storage::{DraftStorage, StorageError};
use crate::transition::{TransitionCommand, TransitionController, TransitionDirection};
use std::rc::Rc;

/// One active wizard: the staged draft plus the controller that walks it.
///
/// Field edits go through [`WizardSession::update_field`], which refuses
/// writes outside the current step's declared slice.
#[derive(Debug)]
pub struct WizardSession<D: Draft> {
    draft: D,
    store: DraftStore,
    controller: TransitionController<D::Step>,
}

impl<D: Draft> WizardSession<D> {
    /// Open the flow's store and resume whatever was staged, including the
    /// last step reached. A fresh flow starts on the first step.
    ///
    /// # Errors
    ///
    /// Propagates backend read failures.
    pub fn resume(
        storage: Rc<dyn DraftStorage>,
        config: &WizardConfig,
    ) -> Result<Self, StorageError> {
        let store = DraftStore::new(storage, &config.storage_namespace, D::FLOW);
        let draft = D::load(&store)?;
        let position = store
            .saved_position::<D::Step>()?
            .filter(|pos| *pos != StepPosition::Start)
            .unwrap_or_else(StepPosition::first);
        log::debug!("resuming {} wizard at {}", D::FLOW, position.slug());
        Ok(Self {
            draft,
            store,
            controller: TransitionController::new(position, config.timings),
        })
    }

    /// Start an empty flow without reading anything back from storage.
    #[must_use]
    pub fn fresh(storage: Rc<dyn DraftStorage>, config: &WizardConfig) -> Self {
        Self {
            draft: D::default(),
            store: DraftStore::new(storage, &config.storage_namespace, D::FLOW),
            controller: TransitionController::new(StepPosition::first(), config.timings),
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &D {
        &self.draft
    }

    #[must_use]
    pub const fn store(&self) -> &DraftStore {
        &self.store
    }

    #[must_use]
    pub fn position(&self) -> StepPosition<D::Step> {
        self.controller.position()
    }

    #[must_use]
    pub const fn controller(&self) -> &TransitionController<D::Step> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TransitionController<D::Step> {
        &mut self.controller
    }

    /// Stage one field. Returns `Ok(false)` without writing when the field
    /// is not owned by the current step.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures; the in-memory draft is left as it was.
    pub fn update_field(&mut self, field: &str, value: &str) -> Result<bool, StorageError> {
        let owned = self
            .position()
            .step()
            .is_some_and(|step| step.owns_field(field));
        if !owned {
            log::warn!(
                "{} step {} does not own field {field}",
                D::FLOW,
                self.position().slug()
            );
            return Ok(false);
        }
        self.store.set(field, value)?;
        Ok(self.draft.set_field(field, Some(value.to_string())))
    }

    /// Whether the current step may move forward.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        match self.position() {
            StepPosition::Start => true,
            StepPosition::Step(step) => self.draft.step_ready(step),
            StepPosition::Terminal => false,
        }
    }

    /// Request the next step when the current one is complete.
    pub fn next(&mut self) -> Option<TransitionCommand<D::Step>> {
        if !self.can_advance() {
            return None;
        }
        let current = self.position();
        self.controller.go_to_next_step(current)
    }

    pub fn back(&mut self) -> Option<TransitionCommand<D::Step>> {
        let current = self.position();
        self.controller.go_to_previous_step(current)
    }

    pub fn jump_to(&mut self, target: StepPosition<D::Step>) -> Option<TransitionCommand<D::Step>> {
        let direction = if target.progress() < self.position().progress() {
            TransitionDirection::Backward
        } else {
            TransitionDirection::Forward
        };
        self.controller.navigate_to_step(target, direction)
    }

    /// Forward the exit-delay event and stage the new position. Failing to
    /// stage the position only costs resume-at-step, so it is logged and the
    /// transition carries on.
    pub fn exit_elapsed(&mut self) -> Option<TransitionCommand<D::Step>> {
        let command = self.controller.exit_elapsed();
        if let Some(TransitionCommand::Navigate { target, .. }) = command {
            if let Err(err) = self.store.save_position(target) {
                log::warn!("could not stage {} position: {err}", D::FLOW);
            }
        }
        command
    }

    pub fn settle_elapsed(&mut self) -> bool {
        self.controller.settle_elapsed()
    }

    /// Drop the in-memory draft after the gateway cleared storage.
    pub fn reset(&mut self) {
        self.draft = D::default();
        self.controller.reset(StepPosition::first());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{OnboardingDraft, TournamentDraft};
    use crate::step::{OnboardingStep, TournamentStep};
    use crate::storage::MemoryStorage;

    fn drive<D: Draft>(session: &mut WizardSession<D>, cmd: Option<TransitionCommand<D::Step>>) {
        if cmd.is_some() {
            session.exit_elapsed();
            session.settle_elapsed();
        }
    }

    #[test]
    fn fresh_session_starts_on_first_step() {
        let storage = MemoryStorage::new();
        let session = WizardSession::<TournamentDraft>::resume(
            Rc::new(storage),
            &WizardConfig::default_config(),
        )
        .unwrap();
        assert_eq!(session.position(), StepPosition::Step(TournamentStep::Details));
        assert_eq!(session.draft(), &TournamentDraft::default());
    }

    #[test]
    fn writes_outside_step_slice_are_refused() {
        let storage = MemoryStorage::new();
        let mut session = WizardSession::<OnboardingDraft>::resume(
            Rc::new(storage.clone()),
            &WizardConfig::default_config(),
        )
        .unwrap();
        assert!(!session.update_field("nationality", "MU").unwrap());
        assert!(storage.is_empty());
        assert!(session.update_field("first_name", "Ana").unwrap());
        assert_eq!(session.draft().first_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn incomplete_step_blocks_next() {
        let storage = MemoryStorage::new();
        let mut session = WizardSession::<OnboardingDraft>::resume(
            Rc::new(storage),
            &WizardConfig::default_config(),
        )
        .unwrap();
        session.update_field("first_name", "Ana").unwrap();
        assert!(session.next().is_none());
        session.update_field("last_name", "Lopez").unwrap();
        let cmd = session.next();
        drive(&mut session, cmd);
        assert_eq!(session.position(), StepPosition::Step(OnboardingStep::Gender));
    }

    #[test]
    fn reload_resumes_draft_and_step() {
        let storage = MemoryStorage::new();
        let config = WizardConfig::default_config();
        {
            let mut session =
                WizardSession::<OnboardingDraft>::resume(Rc::new(storage.clone()), &config)
                    .unwrap();
            session.update_field("first_name", "Ana").unwrap();
            session.update_field("last_name", "Lopez").unwrap();
            let cmd = session.next();
            drive(&mut session, cmd);
            session.update_field("gender", "female").unwrap();
        }
        let resumed =
            WizardSession::<OnboardingDraft>::resume(Rc::new(storage), &config).unwrap();
        assert_eq!(resumed.position(), StepPosition::Step(OnboardingStep::Gender));
        assert_eq!(resumed.draft().gender.as_deref(), Some("female"));
        assert_eq!(resumed.draft().last_name.as_deref(), Some("Lopez"));
    }

    struct ReadOnlyStorage(MemoryStorage);

    impl DraftStorage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend(String::from("quota exceeded")))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>, StorageError> {
            self.0.keys()
        }
    }

    #[test]
    fn storage_failures_do_not_strand_a_transition() {
        let mut session = WizardSession::<OnboardingDraft>::resume(
            Rc::new(ReadOnlyStorage(MemoryStorage::new())),
            &WizardConfig::default_config(),
        )
        .unwrap();
        assert!(session.update_field("first_name", "Ana").is_err());
        assert_eq!(session.draft().first_name, None);

        session.controller_mut().reset(StepPosition::Step(OnboardingStep::Photo));
        let cmd = session.next();
        drive(&mut session, cmd);
        assert_eq!(session.position(), StepPosition::Terminal);
        assert!(!session.controller().is_transitioning());
    }

    #[test]
    fn fresh_ignores_staged_draft() {
        let storage = MemoryStorage::new();
        let config = WizardConfig::default_config();
        let store = DraftStore::new(
            Rc::new(storage.clone()),
            &config.storage_namespace,
            "onboarding",
        );
        store.set("first_name", "Ana").unwrap();
        let session = WizardSession::<OnboardingDraft>::fresh(Rc::new(storage), &config);
        assert_eq!(session.draft(), &OnboardingDraft::default());
        assert_eq!(session.position(), StepPosition::Step(OnboardingStep::Name));
    }

    #[test]
    fn jump_back_uses_backward_direction() {
        let storage = MemoryStorage::new();
        let mut session = WizardSession::<OnboardingDraft>::resume(
            Rc::new(storage),
            &WizardConfig::default_config(),
        )
        .unwrap();
        session.controller_mut().reset(StepPosition::Terminal);
        let cmd = session.jump_to(StepPosition::Step(OnboardingStep::Name));
        assert_eq!(
            session.controller().current_state().direction,
            TransitionDirection::Backward
        );
        drive(&mut session, cmd);
        assert_eq!(session.position(), StepPosition::Step(OnboardingStep::Name));
    }
}
