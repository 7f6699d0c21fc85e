use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    html! {
        <section class="panel landing">
            <h1>{ "Padel" }</h1>
            <p>{ "Find partners, join tournaments and track your matches." }</p>
            <Link<Route> to={Route::OnboardingStart} classes="btn btn-primary">
                { "Get started" }
            </Link<Route>>
        </section>
    }
}

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <section class="panel home">
            <h1>{ "Welcome" }</h1>
            <nav class="actions">
                <Link<Route> to={Route::Tournaments} classes="btn">{ "Tournaments" }</Link<Route>>
                <Link<Route> to={Route::NewTournamentStart} classes="btn btn-primary">
                    { "Create a tournament" }
                </Link<Route>>
            </nav>
        </section>
    }
}
