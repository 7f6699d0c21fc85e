use padel_core::{OnboardingStep, StepPosition, TournamentStep};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Landing,
    #[at("/home")]
    Home,
    #[at("/onboarding")]
    OnboardingStart,
    #[at("/onboarding/:step")]
    Onboarding { step: String },
    #[at("/tournaments")]
    Tournaments,
    #[at("/tournaments/new")]
    NewTournamentStart,
    #[at("/tournaments/new/:step")]
    NewTournament { step: String },
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub fn onboarding(position: StepPosition<OnboardingStep>) -> Self {
        Self::Onboarding {
            step: position.slug().to_string(),
        }
    }

    #[must_use]
    pub fn new_tournament(position: StepPosition<TournamentStep>) -> Self {
        Self::NewTournament {
            step: position.slug().to_string(),
        }
    }

    /// Post-submission route named by a flow's `redirect` setting.
    #[must_use]
    pub fn from_redirect(path: &str) -> Self {
        Self::recognize(path)
            .filter(|route| *route != Self::NotFound)
            .unwrap_or(Self::Home)
    }

    #[must_use]
    pub fn onboarding_position(&self) -> Option<StepPosition<OnboardingStep>> {
        match self {
            Self::OnboardingStart => Some(StepPosition::Start),
            Self::Onboarding { step } => StepPosition::from_slug(step),
            _ => None,
        }
    }

    #[must_use]
    pub fn tournament_position(&self) -> Option<StepPosition<TournamentStep>> {
        match self {
            Self::NewTournamentStart => Some(StepPosition::Start),
            Self::NewTournament { step } => StepPosition::from_slug(step),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use padel_core::WizardStep;

    #[test]
    fn every_onboarding_position_round_trips() {
        let positions = OnboardingStep::ALL
            .iter()
            .map(|s| StepPosition::Step(*s))
            .chain([StepPosition::Start, StepPosition::Terminal]);
        for pos in positions {
            assert_eq!(Route::onboarding(pos).onboarding_position(), Some(pos));
        }
    }

    #[test]
    fn terminal_step_has_its_own_path() {
        assert_eq!(
            Route::new_tournament(StepPosition::Terminal).to_path(),
            "/tournaments/new/final"
        );
        assert_eq!(
            Route::onboarding(StepPosition::Step(OnboardingStep::Photo)).to_path(),
            "/onboarding/photo"
        );
    }

    #[test]
    fn redirects_resolve_to_known_routes() {
        assert_eq!(Route::from_redirect("/home"), Route::Home);
        assert_eq!(Route::from_redirect("/tournaments"), Route::Tournaments);
        assert_eq!(Route::from_redirect("/nowhere/at/all"), Route::Home);
    }

    #[test]
    fn unknown_step_slug_has_no_position() {
        let route = Route::Onboarding {
            step: String::from("-1"),
        };
        assert_eq!(route.onboarding_position(), None);
        assert_eq!(Route::Home.tournament_position(), None);
    }
}
