pub mod home;
pub mod new_tournament;
pub mod not_found;
pub mod onboarding;
pub mod tournaments;

pub use home::{HomePage, LandingPage};
pub use new_tournament::NewTournamentPage;
pub use not_found::NotFound;
pub use onboarding::OnboardingPage;
pub use tournaments::TournamentsPage;

use padel_core::{StepPosition, WizardStep};
use yew::AttrValue;

/// Progress labels and zero-based active index for a wizard position.
pub(crate) fn progress_of<S: WizardStep>(position: StepPosition<S>) -> (Vec<AttrValue>, usize) {
    let labels = S::ALL
        .iter()
        .map(|step| AttrValue::from(crate::steps::humanize(step.slug())))
        .collect();
    (labels, position.progress().saturating_sub(1))
}
