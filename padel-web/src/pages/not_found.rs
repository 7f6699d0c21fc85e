use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

/// Shown when a path matches no known view, including unknown step slugs.
#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section class="panel not-found" aria-live="assertive">
            <h1>{ "Page not found" }</h1>
            <p>{ "That page does not exist." }</p>
            <Link<Route> to={Route::Home} classes="btn">{ "Back home" }</Link<Route>>
        </section>
    }
}
