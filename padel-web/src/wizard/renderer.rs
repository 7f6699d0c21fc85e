use super::WizardHandle;
use crate::components::StepFrame;
use crate::steps::{
    BracketStep, CapacityStep, DetailsStep, DraftSlice, FieldChange, FormatStep, GenderStep,
    NameStep, NationalityStep, PhotoStep, ReviewStep, ScheduleStep, VenueStep,
};
use padel_core::{
    Draft, OnboardingDraft, OnboardingStep, StepPosition, TournamentDraft, TournamentStep,
    TransitionController, WizardStep,
};
use yew::prelude::*;

/// Drop edits to fields the visible step does not own.
fn scoped<S: WizardStep>(on_change: &Callback<FieldChange>, step: S) -> Callback<FieldChange> {
    let cb = on_change.clone();
    Callback::from(move |(field, value): FieldChange| {
        if step.owns_field(field) {
            cb.emit((field, value));
        }
    })
}

/// Field steps never show the submit outcome; it belongs to the review.
fn frame<D: Draft + 'static>(handle: &WizardHandle<D>, title: &'static str, body: Html) -> Html {
    let snapshot = handle.snapshot;
    html! {
        <StepFrame
            title={title}
            transitioning={snapshot.is_transitioning()}
            direction={snapshot.direction}
            loading={handle.submitting}
            can_go_back={TransitionController::can_go_back(snapshot.position)}
            can_advance={handle.can_advance}
            on_next={handle.on_next.clone()}
            on_back={handle.on_back.clone()}
        >
            { body }
        </StepFrame>
    }
}

fn review<D: Draft + 'static>(handle: &WizardHandle<D>, title: &'static str) -> Html {
    let snapshot = handle.snapshot;
    html! {
        <StepFrame
            title={title}
            transitioning={snapshot.is_transitioning()}
            direction={snapshot.direction}
            error={handle.submit_error.clone()}
            loading={handle.submitting}
            can_go_back={!handle.submitting}
            can_advance={handle.draft.missing_required().is_empty()}
            next_label="Submit"
            on_next={handle.on_submit.clone()}
            on_back={handle.on_back.clone()}
        >
            <ReviewStep<D> draft={handle.draft.clone()} />
        </StepFrame>
    }
}

#[must_use]
pub fn render_onboarding(handle: &WizardHandle<OnboardingDraft>) -> Html {
    let step = match handle.snapshot.position {
        StepPosition::Start => OnboardingStep::Name,
        StepPosition::Step(step) => step,
        StepPosition::Terminal => return review(handle, "Review your profile"),
    };
    let slice = DraftSlice::of(&handle.draft, step);
    let on_change = scoped(&handle.on_change, step);
    let body = match step {
        OnboardingStep::Name => html! { <NameStep {slice} {on_change} /> },
        OnboardingStep::Gender => html! { <GenderStep {slice} {on_change} /> },
        OnboardingStep::Nationality => html! { <NationalityStep {slice} {on_change} /> },
        OnboardingStep::Photo => html! { <PhotoStep {slice} {on_change} /> },
    };
    frame(handle, step.label(), body)
}

#[must_use]
pub fn render_tournament(handle: &WizardHandle<TournamentDraft>) -> Html {
    let step = match handle.snapshot.position {
        StepPosition::Start => TournamentStep::Details,
        StepPosition::Step(step) => step,
        StepPosition::Terminal => return review(handle, "Review your tournament"),
    };
    let slice = DraftSlice::of(&handle.draft, step);
    let on_change = scoped(&handle.on_change, step);
    let body = match step {
        TournamentStep::Details => html! { <DetailsStep {slice} {on_change} /> },
        TournamentStep::Venue => html! { <VenueStep {slice} {on_change} /> },
        TournamentStep::Format => html! { <FormatStep {slice} {on_change} /> },
        TournamentStep::Bracket => html! { <BracketStep {slice} {on_change} /> },
        TournamentStep::Capacity => html! { <CapacityStep {slice} {on_change} /> },
        TournamentStep::Schedule => html! { <ScheduleStep {slice} {on_change} /> },
    };
    frame(handle, step.label(), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use padel_core::{TransitionDirection, TransitionPhase, TransitionSnapshot};
    use yew::LocalServerRenderer;

    #[derive(Properties, PartialEq)]
    struct AtProps {
        position: StepPosition<OnboardingStep>,
        submit_error: Option<AttrValue>,
    }

    #[function_component(OnboardingAt)]
    fn onboarding_at(props: &AtProps) -> Html {
        render_onboarding(&WizardHandle {
            snapshot: TransitionSnapshot {
                phase: TransitionPhase::Idle,
                direction: TransitionDirection::Backward,
                position: props.position,
            },
            draft: OnboardingDraft {
                first_name: Some("Ana".into()),
                last_name: Some("Lopez".into()),
                nationality: Some("ES".into()),
                ..OnboardingDraft::default()
            },
            can_advance: true,
            submitting: false,
            submit_error: props.submit_error.clone(),
            on_change: Callback::noop(),
            on_next: Callback::noop(),
            on_back: Callback::noop(),
            on_submit: Callback::noop(),
        })
    }

    fn render_at(position: StepPosition<OnboardingStep>) -> String {
        block_on(
            LocalServerRenderer::<OnboardingAt>::with_props(AtProps {
                position,
                submit_error: Some("profile already exists".into()),
            })
            .render(),
        )
    }

    #[test]
    fn failed_submit_message_stays_on_review() {
        assert!(render_at(StepPosition::Terminal).contains("profile already exists"));
        let earlier = render_at(StepPosition::Step(OnboardingStep::Photo));
        assert!(!earlier.contains("profile already exists"));
        assert!(!earlier.contains("alert-error"));
    }

    #[test]
    fn field_step_renders_only_its_slice() {
        let html = render_at(StepPosition::Step(OnboardingStep::Nationality));
        assert!(html.contains("value=\"ES\""));
        assert!(!html.contains("Ana"));
        let review = render_at(StepPosition::Terminal);
        assert!(review.contains("Ana") && review.contains("Lopez"));
    }
}
