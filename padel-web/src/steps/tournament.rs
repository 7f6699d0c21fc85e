use super::{StepViewProps, flagged, options, selected, setter, value_of};
use crate::components::{ChoiceField, TextAreaField, TextField};
use padel_core::{
    BRACKET_TYPES, FORMATS, validate_max_teams, validate_name, validate_start_date,
};
use yew::prelude::*;

type Props = StepViewProps;

#[function_component(DetailsStep)]
pub fn details_step(props: &Props) -> Html {
    html! {
        <>
            <TextField
                id="name"
                label="Tournament name"
                value={value_of(&props.slice, "name")}
                invalid={flagged(&props.slice, "name", validate_name)}
                on_input={setter(&props.on_change, "name")}
            />
            <TextAreaField
                id="description"
                label="Description (optional)"
                value={value_of(&props.slice, "description")}
                on_input={setter(&props.on_change, "description")}
            />
        </>
    }
}

#[function_component(VenueStep)]
pub fn venue_step(props: &Props) -> Html {
    html! {
        <TextField
            id="venue"
            label="Club or venue"
            value={value_of(&props.slice, "venue")}
            invalid={flagged(&props.slice, "venue", validate_name)}
            on_input={setter(&props.on_change, "venue")}
        />
    }
}

#[function_component(FormatStep)]
pub fn format_step(props: &Props) -> Html {
    html! {
        <ChoiceField
            name="format"
            legend="Match format"
            options={options(FORMATS)}
            selected={selected(&props.slice, "format")}
            on_select={setter(&props.on_change, "format")}
        />
    }
}

#[function_component(BracketStep)]
pub fn bracket_step(props: &Props) -> Html {
    html! {
        <ChoiceField
            name="bracket_type"
            legend="Bracket"
            options={options(BRACKET_TYPES)}
            selected={selected(&props.slice, "bracket_type")}
            on_select={setter(&props.on_change, "bracket_type")}
        />
    }
}

/// Even team counts from 4 to 64.
#[function_component(CapacityStep)]
pub fn capacity_step(props: &Props) -> Html {
    html! {
        <TextField
            id="max_teams"
            label="Maximum teams (optional)"
            input_type={Some(AttrValue::from("number"))}
            value={value_of(&props.slice, "max_teams")}
            invalid={flagged(&props.slice, "max_teams", validate_max_teams)}
            on_input={setter(&props.on_change, "max_teams")}
        />
    }
}

#[function_component(ScheduleStep)]
pub fn schedule_step(props: &Props) -> Html {
    html! {
        <TextField
            id="start_date"
            label="Start date (optional)"
            input_type={Some(AttrValue::from("date"))}
            value={value_of(&props.slice, "start_date")}
            invalid={flagged(&props.slice, "start_date", validate_start_date)}
            on_input={setter(&props.on_change, "start_date")}
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::DraftSlice;
    use futures::executor::block_on;
    use padel_core::{TournamentDraft, TournamentStep};
    use yew::LocalServerRenderer;

    fn render<C>(draft: TournamentDraft, step: TournamentStep) -> String
    where
        C: BaseComponent<Properties = Props>,
    {
        block_on(
            LocalServerRenderer::<C>::with_props(Props {
                slice: DraftSlice::of(&draft, step),
                on_change: Callback::noop(),
            })
            .render(),
        )
    }

    #[test]
    fn format_step_offers_every_format() {
        let html = render::<FormatStep>(TournamentDraft::default(), TournamentStep::Format);
        for format in FORMATS {
            assert!(html.contains(format), "missing {format}");
        }
        assert!(html.contains("Golden point"));
    }

    #[test]
    fn odd_capacity_is_flagged() {
        let draft = |max_teams: &str| TournamentDraft {
            max_teams: Some(max_teams.into()),
            ..TournamentDraft::default()
        };
        let html = render::<CapacityStep>(draft("7"), TournamentStep::Capacity);
        assert!(html.contains("input-error"));
        let html = render::<CapacityStep>(draft("16"), TournamentStep::Capacity);
        assert!(!html.contains("input-error"));
    }
}
