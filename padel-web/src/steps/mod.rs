//! Field views for each wizard step. They only render inputs; the step
//! chrome comes from [`crate::components::StepFrame`].
pub mod onboarding;
pub mod review;
pub mod tournament;

use padel_core::{Draft, WizardStep};
use std::collections::BTreeMap;
use yew::prelude::*;

pub use onboarding::{GenderStep, NameStep, NationalityStep, PhotoStep};
pub use review::ReviewStep;
pub use tournament::{BracketStep, CapacityStep, DetailsStep, FormatStep, ScheduleStep, VenueStep};

/// Field change as `(field, raw value)`.
pub type FieldChange = (&'static str, String);

/// Staged values of the fields one step owns. A step view gets this
/// instead of the draft, so it cannot read what other steps collected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftSlice(BTreeMap<&'static str, String>);

impl DraftSlice {
    #[must_use]
    pub fn of<D: Draft>(draft: &D, step: D::Step) -> Self {
        Self(
            step.fields()
                .iter()
                .filter_map(|&name| draft.field(name).map(|v| (name, v.to_string())))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct StepViewProps {
    pub slice: DraftSlice,
    #[prop_or_default]
    pub on_change: Callback<FieldChange>,
}

pub(crate) fn value_of(slice: &DraftSlice, field: &str) -> AttrValue {
    slice
        .get(field)
        .map(|v| AttrValue::from(v.to_string()))
        .unwrap_or_default()
}

pub(crate) fn selected(slice: &DraftSlice, field: &str) -> Option<AttrValue> {
    slice.get(field).map(|v| AttrValue::from(v.to_string()))
}

pub(crate) fn setter(on_change: &Callback<FieldChange>, field: &'static str) -> Callback<String> {
    on_change.reform(move |value: String| (field, value))
}

/// Only flag a field once something has been typed into it.
pub(crate) fn flagged(slice: &DraftSlice, field: &str, valid: fn(&str) -> bool) -> bool {
    slice.get(field).is_some_and(|v| !valid(v))
}

/// `(value, label)` pairs for a choice field, labels derived from the
/// snake_case values.
pub(crate) fn options(values: &[&'static str]) -> Vec<(AttrValue, AttrValue)> {
    values
        .iter()
        .map(|v| (AttrValue::Static(*v), AttrValue::from(humanize(v))))
        .collect()
}

pub(crate) fn humanize(value: &str) -> String {
    let spaced = value.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use padel_core::{OnboardingDraft, OnboardingStep};

    #[test]
    fn humanize_capitalises_and_spaces() {
        assert_eq!(humanize("single_elimination"), "Single elimination");
        assert_eq!(humanize("best_of_3"), "Best of 3");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn blank_fields_are_not_flagged() {
        let mut draft = OnboardingDraft::default();
        let slice = DraftSlice::of(&draft, OnboardingStep::Nationality);
        assert!(!flagged(&slice, "nationality", padel_core::validate_nationality));
        draft.nationality = Some("Spain".into());
        let slice = DraftSlice::of(&draft, OnboardingStep::Nationality);
        assert!(flagged(&slice, "nationality", padel_core::validate_nationality));
    }

    #[test]
    fn slice_holds_only_the_steps_own_fields() {
        let draft = OnboardingDraft {
            first_name: Some("Ana".into()),
            last_name: Some("Lopez".into()),
            nationality: Some("ES".into()),
            ..OnboardingDraft::default()
        };
        let slice = DraftSlice::of(&draft, OnboardingStep::Nationality);
        assert_eq!(slice.get("nationality"), Some("ES"));
        assert_eq!(slice.get("first_name"), None);
        assert_eq!(slice, DraftSlice::of(&draft, OnboardingStep::Nationality));
        assert_eq!(DraftSlice::of(&draft, OnboardingStep::Photo), DraftSlice::default());
    }
}
