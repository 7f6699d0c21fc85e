pub mod services;

use crate::pages::{
    HomePage, LandingPage, NewTournamentPage, NotFound, OnboardingPage, TournamentsPage,
};
use crate::router::Route;
use yew::prelude::*;

pub use services::Services;

/// Route table. Unknown step slugs fall through to the not-found view.
#[must_use]
pub fn switch(route: Route) -> Html {
    match route {
        Route::Landing => html! { <LandingPage /> },
        Route::Home => html! { <HomePage /> },
        Route::Tournaments => html! { <TournamentsPage /> },
        Route::NotFound => html! { <NotFound /> },
        onboarding @ (Route::OnboardingStart | Route::Onboarding { .. }) => {
            if onboarding.onboarding_position().is_some() {
                html! { <OnboardingPage /> }
            } else {
                html! { <NotFound /> }
            }
        }
        tournament @ (Route::NewTournamentStart | Route::NewTournament { .. }) => {
            if tournament.tournament_position().is_some() {
                html! { <NewTournamentPage /> }
            } else {
                html! { <NotFound /> }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    use yew_router::prelude::*;

    let router_base = crate::settings::router_base().map(AttrValue::from);
    let services = use_memo((), |_| Services::browser());
    html! {
        <BrowserRouter basename={router_base}>
            <ContextProvider<Services> context={(*services).clone()}>
                <Switch<Route> render={switch} />
            </ContextProvider<Services>>
        </BrowserRouter>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_step_slug_is_not_found() {
        let bad = Route::Onboarding {
            step: "-1".to_string(),
        };
        assert!(bad.onboarding_position().is_none());
        let good = Route::NewTournament {
            step: "final".to_string(),
        };
        assert!(good.tournament_position().is_some());
    }
}
