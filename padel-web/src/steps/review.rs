use super::humanize;
use padel_core::Draft;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ReviewProps<D: Draft + 'static> {
    pub draft: D,
}

/// Read-only summary of a staged draft shown on the terminal step.
#[function_component(ReviewStep)]
pub fn review_step<D: Draft + 'static>(props: &ReviewProps<D>) -> Html {
    let missing = props.draft.missing_required();
    let still_needed = missing.iter().map(|f| humanize(f)).collect::<Vec<_>>().join(", ");
    html! {
        <>
            <dl class="review">
                { for D::fields().into_iter().map(|field| {
                    let value = props.draft.field(field).map_or_else(
                        || html! { <span class="muted">{ "Not provided" }</span> },
                        |v| html! { { v.to_string() } },
                    );
                    html! {
                        <>
                            <dt>{ humanize(field) }</dt>
                            <dd>{ value }</dd>
                        </>
                    }
                })}
            </dl>
            if !missing.is_empty() {
                <p class="hint" role="status">
                    { format!("Still needed: {still_needed}") }
                </p>
            }
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use padel_core::{OnboardingDraft, TournamentDraft};
    use yew::LocalServerRenderer;

    #[test]
    fn lists_every_field_with_placeholders() {
        let draft = OnboardingDraft {
            first_name: Some("Ana".into()),
            last_name: Some("Ruiz".into()),
            nationality: Some("ES".into()),
            ..OnboardingDraft::default()
        };
        let html = block_on(
            LocalServerRenderer::<ReviewStep<OnboardingDraft>>::with_props(ReviewProps { draft })
                .render(),
        );
        assert!(html.contains("First name"));
        assert!(html.contains("Ruiz"));
        assert_eq!(html.matches("Not provided").count(), 2);
        assert!(!html.contains("Still needed"));
    }

    #[test]
    fn names_missing_required_fields() {
        let draft = TournamentDraft {
            name: Some("Autumn Open".into()),
            ..TournamentDraft::default()
        };
        let html = block_on(
            LocalServerRenderer::<ReviewStep<TournamentDraft>>::with_props(ReviewProps { draft })
                .render(),
        );
        assert!(html.contains("Still needed: Venue, Format, Bracket type"));
    }
}
