use crate::core::feedback::FeedbackPhase;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub(crate) phase: FeedbackPhase,
    #[prop_or_default]
    pub(crate) class: Classes,
}

/// Transient notification; expiry is driven by the feedback timer.
#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    html! {
        <div class={classes!("toast-host", props.class.clone())} aria-live="polite" aria-atomic="true">
            {props.phase.display().map_or_else(Html::default, |display| html! {
                <div class={classes!("toast", display.kind.class())} role="status">
                    <span>{display.message.clone()}</span>
                </div>
            })}
        </div>
    }
}
