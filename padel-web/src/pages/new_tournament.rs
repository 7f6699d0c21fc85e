use super::progress_of;
use crate::components::Progress;
use crate::router::Route;
use crate::wizard::{renderer::render_tournament, use_wizard};
use padel_core::TournamentDraft;
use yew::prelude::*;

#[function_component(NewTournamentPage)]
pub fn new_tournament_page() -> Html {
    let wizard = use_wizard::<TournamentDraft>(Route::new_tournament);
    let (steps, current) = progress_of(wizard.snapshot.position);
    html! {
        <main class="wizard new-tournament">
            <Progress {steps} {current} />
            { render_tournament(&wizard) }
        </main>
    }
}
