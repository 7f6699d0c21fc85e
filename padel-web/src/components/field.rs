use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TextFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub input_type: Option<AttrValue>,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub invalid: bool,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub on_input: Callback<String>,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = {
        let cb = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let input_type = props.input_type.clone().unwrap_or_else(|| "text".into());
    html! {
        <div class="field">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <input
                id={props.id.clone()}
                class={classes!("input", props.invalid.then_some("input-error"))}
                type={input_type}
                value={props.value.clone()}
                placeholder={props.placeholder.clone()}
                aria-invalid={props.invalid.to_string()}
                disabled={props.disabled}
                {oninput}
            />
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TextAreaFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    #[prop_or_default]
    pub value: AttrValue,
    #[prop_or_default]
    pub on_input: Callback<String>,
}

#[function_component(TextAreaField)]
pub fn text_area_field(props: &TextAreaFieldProps) -> Html {
    let oninput = {
        let cb = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                cb.emit(area.value());
            }
        })
    };
    html! {
        <div class="field">
            <label for={props.id.clone()}>{ props.label.clone() }</label>
            <textarea
                id={props.id.clone()}
                class="textarea"
                value={props.value.clone()}
                {oninput}
            />
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ChoiceFieldProps {
    pub name: AttrValue,
    pub legend: AttrValue,
    /// `(value, label)` pairs.
    pub options: Vec<(AttrValue, AttrValue)>,
    #[prop_or_default]
    pub selected: Option<AttrValue>,
    #[prop_or_default]
    pub on_select: Callback<String>,
}

/// Radio group; exactly one option can be selected.
#[function_component(ChoiceField)]
pub fn choice_field(props: &ChoiceFieldProps) -> Html {
    html! {
        <fieldset class="field choices">
            <legend>{ props.legend.clone() }</legend>
            { for props.options.iter().map(|(value, label)| {
                let checked = props.selected.as_ref() == Some(value);
                let onchange = {
                    let cb = props.on_select.clone();
                    let value = value.to_string();
                    Callback::from(move |_: Event| cb.emit(value.clone()))
                };
                html! {
                    <label class="choice">
                        <input
                            type="radio"
                            name={props.name.clone()}
                            value={value.clone()}
                            {checked}
                            {onchange}
                        />
                        <span>{ label.clone() }</span>
                    </label>
                }
            })}
        </fieldset>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn text_field_marks_invalid_input() {
        let props = TextFieldProps {
            id: "phone".into(),
            label: "Phone".into(),
            value: "12".into(),
            input_type: Some("tel".into()),
            placeholder: None,
            invalid: true,
            disabled: false,
            on_input: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<TextField>::with_props(props).render());
        assert!(html.contains("input-error"));
        assert!(html.contains("type=\"tel\""));
        assert!(html.contains("aria-invalid=\"true\""));
    }

    #[test]
    fn choice_field_checks_selected_option() {
        let props = ChoiceFieldProps {
            name: "gender".into(),
            legend: "Gender".into(),
            options: vec![
                ("male".into(), "Male".into()),
                ("female".into(), "Female".into()),
            ],
            selected: Some("female".into()),
            on_select: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ChoiceField>::with_props(props).render());
        assert!(html.contains("Female"));
        assert_eq!(html.matches("checked").count(), 1);
    }
}
