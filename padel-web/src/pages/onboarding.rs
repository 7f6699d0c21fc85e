use super::progress_of;
use crate::components::Progress;
use crate::router::Route;
use crate::wizard::{renderer::render_onboarding, use_wizard};
use padel_core::OnboardingDraft;
use yew::prelude::*;

#[function_component(OnboardingPage)]
pub fn onboarding_page() -> Html {
    let wizard = use_wizard::<OnboardingDraft>(Route::onboarding);
    let (steps, current) = progress_of(wizard.snapshot.position);
    html! {
        <main class="wizard onboarding">
            <Progress {steps} {current} />
            { render_onboarding(&wizard) }
        </main>
    }
}
