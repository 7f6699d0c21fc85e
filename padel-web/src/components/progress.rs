use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct ProgressProps {
    pub steps: Vec<AttrValue>,
    /// Zero-based index of the active step; `steps.len()` marks completion.
    #[prop_or_default]
    pub current: usize,
}

#[function_component(Progress)]
pub fn progress(props: &ProgressProps) -> Html {
    html! {
        <ol class="steps steps-horizontal" aria-label="Wizard progress">
            { for props.steps.iter().enumerate().map(|(idx, step)| {
                let li_class = classes!("step", (idx <= props.current).then_some("step-primary"));
                let current = (idx == props.current).then_some("step");
                html! {
                    <li class={li_class} aria-current={current}>
                        <span class="sr-only">{ format!("Step {}", idx + 1) }</span>
                        <span class="step-label">{ step.clone() }</span>
                    </li>
                }
            })}
        </ol>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn marks_completed_and_current_steps() {
        let props = ProgressProps {
            steps: vec!["Name".into(), "Gender".into(), "Photo".into()],
            current: 1,
        };
        let html = block_on(LocalServerRenderer::<Progress>::with_props(props).render());
        assert_eq!(html.matches("step-primary").count(), 2);
        assert_eq!(html.matches("aria-current").count(), 1);
    }
}
