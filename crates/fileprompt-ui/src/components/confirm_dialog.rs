use crate::components::feedback_button::FeedbackButton;
use crate::core::view::ButtonView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ConfirmDialogProps {
    pub(crate) open: bool,
    pub(crate) confirm: ButtonView,
    pub(crate) on_confirm: Callback<()>,
    pub(crate) on_cancel: Callback<()>,
}

/// Modal confirmation before wiping the history.
#[function_component(ConfirmDialog)]
pub(crate) fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    if !props.open {
        return html! {};
    }
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());
    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <h3>{"Delete all history?"}</h3>
                <p class="muted">{"Every saved conversion will be removed. This cannot be undone."}</p>
                <div class="modal-actions">
                    <button class="ghost" onclick={on_cancel}>{"Cancel"}</button>
                    <FeedbackButton view={props.confirm.clone()} base_class={classes!("danger")} onclick={on_confirm} />
                </div>
            </div>
        </div>
    }
}
