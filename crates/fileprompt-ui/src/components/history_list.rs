//! Saved conversions, newest first as served.

use crate::components::feedback_button::FeedbackButton;
use crate::core::actions::{HistoryAction, resting_label};
use crate::core::feedback::{Control, FeedbackDisplay};
use crate::core::logic::file_count_label;
use crate::core::view::ButtonView;
use fileprompt_api_models::HistoryEntry;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct HistoryListProps {
    pub(crate) entries: Vec<HistoryEntry>,
    /// Active per-item feedback.
    pub(crate) buttons: BTreeMap<Control, FeedbackDisplay>,
    pub(crate) delete_all: ButtonView,
    pub(crate) on_action: Callback<HistoryAction>,
    pub(crate) on_delete_all: Callback<MouseEvent>,
}

#[function_component(HistoryList)]
pub(crate) fn history_list(props: &HistoryListProps) -> Html {
    let items = if props.entries.is_empty() {
        html! { <p class="muted empty">{"No saved conversions yet."}</p> }
    } else {
        html! {
            <ul class="history-items">
                {for props.entries.iter().map(|entry| render_entry(entry, &props.buttons, &props.on_action))}
            </ul>
        }
    };
    html! {
        <section class="history-panel">
            <header>
                <h2>{"History"}</h2>
                <FeedbackButton
                    view={props.delete_all.clone()}
                    base_class={classes!("danger")}
                    onclick={props.on_delete_all.clone()}
                />
            </header>
            {items}
        </section>
    }
}

fn item_button(
    control: &Control,
    buttons: &BTreeMap<Control, FeedbackDisplay>,
) -> ButtonView {
    ButtonView::resolve(resting_label(control), true, buttons.get(control))
}

fn render_entry(
    entry: &HistoryEntry,
    buttons: &BTreeMap<Control, FeedbackDisplay>,
    on_action: &Callback<HistoryAction>,
) -> Html {
    let id = entry.id.clone();
    let load = Control::LoadItem(id.clone());
    let delete = Control::DeleteItem(id.clone());
    let on_load = {
        let id = id.clone();
        on_action.reform(move |_: MouseEvent| HistoryAction::Load(id.clone()))
    };
    let on_delete = {
        let id = id.clone();
        on_action.reform(move |_: MouseEvent| HistoryAction::Delete(id.clone()))
    };
    html! {
        <li class="history-item" key={id.clone()}>
            <div class="history-meta">
                <span class="history-time">{entry.timestamp.display()}</span>
                <span class="muted">{file_count_label(entry)}</span>
            </div>
            <ul class="history-files">
                {for entry.original_files.iter().map(|name| render_download(&id, name, on_action))}
            </ul>
            <div class="history-actions">
                <FeedbackButton view={item_button(&load, buttons)} base_class={classes!("secondary")} onclick={on_load} />
                <FeedbackButton view={item_button(&delete, buttons)} base_class={classes!("danger")} onclick={on_delete} />
            </div>
        </li>
    }
}

fn render_download(id: &str, filename: &str, on_action: &Callback<HistoryAction>) -> Html {
    let onclick = {
        let id = id.to_string();
        let filename = filename.to_string();
        on_action.reform(move |event: MouseEvent| {
            event.prevent_default();
            HistoryAction::Download {
                id: id.clone(),
                filename: filename.clone(),
            }
        })
    };
    html! {
        <li>
            <a href="#" class="download-link" {onclick}>{filename.to_string()}</a>
        </li>
    }
}
