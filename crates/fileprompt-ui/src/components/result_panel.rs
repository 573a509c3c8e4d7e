use crate::components::feedback_button::FeedbackButton;
use crate::core::result::ConversionResult;
use crate::core::view::ButtonView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ResultPanelProps {
    pub(crate) result: ConversionResult,
    pub(crate) copy: ButtonView,
    pub(crate) on_copy: Callback<MouseEvent>,
}

/// Converted text with a copy action; hidden until a result exists.
#[function_component(ResultPanel)]
pub(crate) fn result_panel(props: &ResultPanelProps) -> Html {
    if !props.result.visible {
        return html! {};
    }
    html! {
        <section class="result-panel">
            <header>
                <h2>{"Result"}</h2>
                <FeedbackButton view={props.copy.clone()} base_class={classes!("secondary")} onclick={props.on_copy.clone()} />
            </header>
            <pre class="result-content">{props.result.content.clone()}</pre>
        </section>
    }
}
