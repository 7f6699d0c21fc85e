use super::{StepViewProps, flagged, options, selected, setter, value_of};
use crate::components::{ChoiceField, TextField};
use padel_core::{GENDERS, validate_name, validate_nationality};
use yew::prelude::*;

type Props = StepViewProps;

#[function_component(NameStep)]
pub fn name_step(props: &Props) -> Html {
    html! {
        <>
            <TextField
                id="first_name"
                label="First name"
                value={value_of(&props.slice, "first_name")}
                invalid={flagged(&props.slice, "first_name", validate_name)}
                on_input={setter(&props.on_change, "first_name")}
            />
            <TextField
                id="last_name"
                label="Last name"
                value={value_of(&props.slice, "last_name")}
                invalid={flagged(&props.slice, "last_name", validate_name)}
                on_input={setter(&props.on_change, "last_name")}
            />
        </>
    }
}

#[function_component(GenderStep)]
pub fn gender_step(props: &Props) -> Html {
    html! {
        <ChoiceField
            name="gender"
            legend="Gender (optional)"
            options={options(GENDERS)}
            selected={selected(&props.slice, "gender")}
            on_select={setter(&props.on_change, "gender")}
        />
    }
}

/// Two-letter ISO country code; input is upper-cased as typed.
#[function_component(NationalityStep)]
pub fn nationality_step(props: &Props) -> Html {
    let on_input = setter(&props.on_change, "nationality")
        .reform(|raw: String| raw.trim().to_ascii_uppercase());
    html! {
        <TextField
            id="nationality"
            label="Country code"
            placeholder={Some(AttrValue::from("ES"))}
            value={value_of(&props.slice, "nationality")}
            invalid={flagged(&props.slice, "nationality", validate_nationality)}
            {on_input}
        />
    }
}

#[function_component(PhotoStep)]
pub fn photo_step(props: &Props) -> Html {
    html! {
        <>
            <TextField
                id="profile_photo"
                label="Photo URL (optional)"
                input_type={Some(AttrValue::from("url"))}
                value={value_of(&props.slice, "profile_photo")}
                on_input={setter(&props.on_change, "profile_photo")}
            />
            if let Some(src) = selected(&props.slice, "profile_photo") {
                <img class="avatar" {src} alt="Profile photo preview" />
            }
        </>
    }
}
