use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

/// Landing view after a tournament has been created.
#[function_component(TournamentsPage)]
pub fn tournaments_page() -> Html {
    html! {
        <section class="panel tournaments">
            <h1>{ "Tournaments" }</h1>
            <p>{ "Your tournaments will show up here once players start registering." }</p>
            <Link<Route> to={Route::NewTournamentStart} classes="btn btn-primary">
                { "New tournament" }
            </Link<Route>>
        </section>
    }
}
