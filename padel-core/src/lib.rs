//! Padel wizard core
//!
//! Platform-agnostic logic behind the multi-step onboarding and tournament
//! creation flows: field validation, draft staging, step transitions and
//! the final remote submission. Browser and CLI hosts plug in their own
//! [`DraftStorage`] and [`RemoteProcedure`] implementations.

pub mod config;
pub mod draft;
pub mod remote;
pub mod session;
pub mod step;
pub mod storage;
pub mod submission;
pub mod transition;
pub mod validators;

pub use config::{BackendConfig, ConfigError, FlowConfig, TransitionTimings, WizardConfig};
pub use draft::{
    BRACKET_TYPES, Draft, DraftStore, FORMATS, GENDERS, OnboardingDraft, TournamentDraft,
};
pub use remote::{RemoteError, RemoteProcedure};
pub use session::WizardSession;
pub use step::{OnboardingStep, StepPosition, TournamentStep, WizardStep};
pub use storage::{DraftStorage, MemoryStorage, StorageError};
pub use submission::{Confirmation, SubmissionGateway, SubmissionStatus, SubmitError};
pub use transition::{
    TransitionCommand, TransitionController, TransitionDirection, TransitionPhase,
    TransitionSnapshot,
};
pub use validators::{
    validate_max_teams, validate_name, validate_nationality, validate_password,
    validate_phone_number, validate_start_date, validate_verification_code,
};
