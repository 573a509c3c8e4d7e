use crate::core::view::ButtonView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct FeedbackButtonProps {
    pub(crate) view: ButtonView,
    #[prop_or_default]
    pub(crate) base_class: Classes,
    pub(crate) onclick: Callback<MouseEvent>,
}

/// Button whose label and style follow its feedback cycle.
#[function_component(FeedbackButton)]
pub(crate) fn feedback_button(props: &FeedbackButtonProps) -> Html {
    let view = &props.view;
    html! {
        <button
            class={classes!(props.base_class.clone(), view.class)}
            disabled={view.disabled}
            onclick={props.onclick.clone()}
        >
            {view.label.clone()}
        </button>
    }
}
