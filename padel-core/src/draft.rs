//! Staged drafts: partially completed records persisted between steps.
use crate::config::{FlowConfig, WizardConfig};
use crate::step::{OnboardingStep, StepPosition, TournamentStep, WizardStep};
use crate::storage::{DraftStorage, StorageError};
use crate::validators;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::rc::Rc;

/// Storage key suffix holding the last reached step slug.
const STEP_KEY: &str = "__step";

/// Prefixed view over a [`DraftStorage`] scoped to one wizard flow.
#[derive(Clone)]
pub struct DraftStore {
    storage: Rc<dyn DraftStorage>,
    prefix: String,
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl DraftStore {
    /// Keys are laid out as `<namespace>.<flow>.<field>`.
    #[must_use]
    pub fn new(storage: Rc<dyn DraftStorage>, namespace: &str, flow: &str) -> Self {
        Self {
            storage,
            prefix: format!("{namespace}.{flow}."),
        }
    }

    fn key(&self, field: &str) -> String {
        format!("{}{field}", self.prefix)
    }

    /// # Errors
    ///
    /// Propagates backend read failures.
    pub fn get(&self, field: &str) -> Result<Option<String>, StorageError> {
        self.storage.get(&self.key(field))
    }

    /// Last write wins. Blank values remove the field so unset and empty
    /// read back the same.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn set(&self, field: &str, value: &str) -> Result<(), StorageError> {
        if value.trim().is_empty() {
            return self.remove(field);
        }
        self.storage.set(&self.key(field), value)
    }

    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn remove(&self, field: &str) -> Result<(), StorageError> {
        self.storage.remove(&self.key(field))
    }

    /// Remove every key under this flow's prefix, returning how many were
    /// dropped. Keys belonging to other flows are untouched.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; keys removed before the failure stay removed.
    pub fn clear(&self) -> Result<usize, StorageError> {
        let owned: Vec<String> = self
            .storage
            .keys()?
            .into_iter()
            .filter(|key| key.starts_with(&self.prefix))
            .collect();
        for key in &owned {
            self.storage.remove(key)?;
        }
        Ok(owned.len())
    }

    /// # Errors
    ///
    /// Propagates backend failures.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(!self
            .storage
            .keys()?
            .iter()
            .any(|key| key.starts_with(&self.prefix)))
    }

    /// # Errors
    ///
    /// Propagates backend write failures.
    pub fn save_position<S: WizardStep>(&self, pos: StepPosition<S>) -> Result<(), StorageError> {
        self.storage.set(&self.key(STEP_KEY), pos.slug())
    }

    /// Last position staged for this flow; unknown slugs are ignored.
    ///
    /// # Errors
    ///
    /// Propagates backend read failures.
    pub fn saved_position<S: WizardStep>(&self) -> Result<Option<StepPosition<S>>, StorageError> {
        Ok(self
            .storage
            .get(&self.key(STEP_KEY))?
            .and_then(|slug| StepPosition::from_slug(&slug)))
    }
}

/// A multi-step record staged field by field.
pub trait Draft: Default + Clone + PartialEq + std::fmt::Debug {
    type Step: WizardStep;

    /// Flow name used in storage keys and logs.
    const FLOW: &'static str;

    /// Fields that must be non-blank at submission.
    const REQUIRED: &'static [&'static str];

    /// Procedure and redirect for this flow.
    fn flow_config(config: &WizardConfig) -> &FlowConfig;

    fn field(&self, name: &str) -> Option<&str>;

    /// Assign a field. Returns `false` for names this draft does not have.
    fn set_field(&mut self, name: &str, value: Option<String>) -> bool;

    /// Whether `step` has enough valid input to move forward.
    fn step_ready(&self, step: Self::Step) -> bool;

    /// Every field across all steps, in step order.
    #[must_use]
    fn fields() -> Vec<&'static str> {
        Self::Step::ALL
            .iter()
            .flat_map(|step| step.fields().iter().copied())
            .collect()
    }

    /// Required fields that are absent or blank.
    #[must_use]
    fn missing_required(&self) -> Vec<&'static str> {
        Self::REQUIRED
            .iter()
            .copied()
            .filter(|name| self.field(name).is_none_or(|v| v.trim().is_empty()))
            .collect()
    }

    /// JSON object sent to the remote procedure, one `p_<field>` per field.
    #[must_use]
    fn to_payload(&self) -> Value {
        let mut params = Map::new();
        for name in Self::fields() {
            let value = self
                .field(name)
                .map_or(Value::Null, |v| Value::String(v.trim().to_string()));
            params.insert(format!("p_{name}"), value);
        }
        Value::Object(params)
    }

    /// Rebuild a draft from whatever has been staged.
    ///
    /// # Errors
    ///
    /// Propagates backend read failures.
    fn load(store: &DraftStore) -> Result<Self, StorageError> {
        let mut draft = Self::default();
        for name in Self::fields() {
            if let Some(value) = store.get(name)? {
                draft.set_field(name, Some(value));
            }
        }
        Ok(draft)
    }

    /// Write every field to the store; blank fields are removed.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures.
    fn stage(&self, store: &DraftStore) -> Result<(), StorageError> {
        for name in Self::fields() {
            store.set(name, self.field(name).unwrap_or_default())?;
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub profile_photo: Option<String>,
}

/// Gender options offered by the onboarding step.
pub const GENDERS: &[&str] = &["male", "female", "other"];

impl Draft for OnboardingDraft {
    type Step = OnboardingStep;

    const FLOW: &'static str = "onboarding";
    const REQUIRED: &'static [&'static str] = &["first_name", "last_name", "nationality"];

    fn flow_config(config: &WizardConfig) -> &FlowConfig {
        &config.onboarding
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "first_name" => self.first_name.as_deref(),
            "last_name" => self.last_name.as_deref(),
            "gender" => self.gender.as_deref(),
            "nationality" => self.nationality.as_deref(),
            "profile_photo" => self.profile_photo.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<String>) -> bool {
        let value = non_blank(value);
        match name {
            "first_name" => self.first_name = value,
            "last_name" => self.last_name = value,
            "gender" => self.gender = value,
            "nationality" => self.nationality = value,
            "profile_photo" => self.profile_photo = value,
            _ => return false,
        }
        true
    }

    fn step_ready(&self, step: OnboardingStep) -> bool {
        match step {
            OnboardingStep::Name => {
                self.first_name.as_deref().is_some_and(validators::validate_name)
                    && self.last_name.as_deref().is_some_and(validators::validate_name)
            }
            OnboardingStep::Gender => self
                .gender
                .as_deref()
                .is_none_or(|g| GENDERS.contains(&g)),
            OnboardingStep::Nationality => self
                .nationality
                .as_deref()
                .is_some_and(validators::validate_nationality),
            OnboardingStep::Photo => true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub format: Option<String>,
    pub bracket_type: Option<String>,
    pub max_teams: Option<String>,
    pub start_date: Option<String>,
}

/// Match formats a tournament can be played in.
pub const FORMATS: &[&str] = &["best_of_3", "golden_point", "pro_set"];

/// Bracket types the backend knows how to seed.
pub const BRACKET_TYPES: &[&str] = &["single_elimination", "double_elimination", "round_robin"];

impl Draft for TournamentDraft {
    type Step = TournamentStep;

    const FLOW: &'static str = "tournament";
    const REQUIRED: &'static [&'static str] = &["name", "venue", "format", "bracket_type"];

    fn flow_config(config: &WizardConfig) -> &FlowConfig {
        &config.tournament
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "description" => self.description.as_deref(),
            "venue" => self.venue.as_deref(),
            "format" => self.format.as_deref(),
            "bracket_type" => self.bracket_type.as_deref(),
            "max_teams" => self.max_teams.as_deref(),
            "start_date" => self.start_date.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Option<String>) -> bool {
        let value = non_blank(value);
        match name {
            "name" => self.name = value,
            "description" => self.description = value,
            "venue" => self.venue = value,
            "format" => self.format = value,
            "bracket_type" => self.bracket_type = value,
            "max_teams" => self.max_teams = value,
            "start_date" => self.start_date = value,
            _ => return false,
        }
        true
    }

    fn step_ready(&self, step: TournamentStep) -> bool {
        match step {
            TournamentStep::Details => self.name.as_deref().is_some_and(validators::validate_name),
            TournamentStep::Venue => self.venue.as_deref().is_some_and(validators::validate_name),
            TournamentStep::Format => self.format.as_deref().is_some_and(|f| FORMATS.contains(&f)),
            TournamentStep::Bracket => self
                .bracket_type
                .as_deref()
                .is_some_and(|b| BRACKET_TYPES.contains(&b)),
            TournamentStep::Capacity => self
                .max_teams
                .as_deref()
                .is_none_or(validators::validate_max_teams),
            TournamentStep::Schedule => self
                .start_date
                .as_deref()
                .is_none_or(validators::validate_start_date),
        }
    }

    /// Same as the default, but capacity travels as a number.
    fn to_payload(&self) -> Value {
        let mut params = Map::new();
        for name in Self::fields() {
            let value = match (name, self.field(name)) {
                (_, None) => Value::Null,
                ("max_teams", Some(raw)) => raw
                    .trim()
                    .parse::<u32>()
                    .map_or(Value::Null, Value::from),
                (_, Some(raw)) => Value::String(raw.trim().to_string()),
            };
            params.insert(format!("p_{name}"), value);
        }
        Value::Object(params)
    }
}
