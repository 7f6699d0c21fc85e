use padel_core::TransitionDirection;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StepFrameProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub transitioning: bool,
    #[prop_or_default]
    pub direction: TransitionDirection,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or_default]
    pub can_go_back: bool,
    #[prop_or_default]
    pub can_advance: bool,
    #[prop_or("Continue".into())]
    pub next_label: AttrValue,
    #[prop_or_default]
    pub on_next: Callback<()>,
    #[prop_or_default]
    pub on_back: Callback<()>,
}

/// Shared chrome around every step view: heading, animated body, inline
/// error and the back/next controls.
#[function_component(StepFrame)]
pub fn step_frame(props: &StepFrameProps) -> Html {
    let class = classes!(
        "wizard-step",
        props.direction.as_class(),
        props.transitioning.then_some("is-exiting"),
    );
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let next = {
        let cb = props.on_next.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let busy = props.loading || props.transitioning;

    html! {
        <section {class} aria-busy={busy.to_string()}>
            <h2 class="step-title">{ props.title.clone() }</h2>
            <div class="step-body">{ props.children.clone() }</div>
            if let Some(error) = props.error.clone() {
                <p class="alert alert-error" role="alert">{ error }</p>
            }
            <div class="controls">
                <button
                    type="button"
                    class="btn"
                    onclick={back}
                    disabled={!props.can_go_back || busy}
                >
                    { "Back" }
                </button>
                <button
                    type="button"
                    class="btn btn-primary"
                    onclick={next}
                    disabled={!props.can_advance || busy}
                >
                    if props.loading {
                        <span class="loading loading-spinner" aria-hidden="true"></span>
                    }
                    { props.next_label.clone() }
                </button>
            </div>
        </section>
    }
}
