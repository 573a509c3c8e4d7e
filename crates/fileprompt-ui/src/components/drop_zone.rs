//! Drag-and-drop target with a hidden file picker.

use crate::app::browser::{pending_files, rect_of};
use crate::core::selection::PendingFile;
use crate::core::store::FileChip;
use crate::core::view::{DropZoneMode, DropZoneRect};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, File, HtmlInputElement};
use yew::prelude::*;

/// Interactions raised by the drop zone.
#[derive(Debug)]
pub(crate) enum DropZoneEvent {
    DragOver,
    DragLeave { zone: DropZoneRect, x: f64, y: f64 },
    Dropped(Vec<PendingFile<File>>),
    Picked(Vec<PendingFile<File>>),
    Remove(String),
}

#[derive(Properties, PartialEq)]
pub(crate) struct DropZoneProps {
    pub(crate) files: Vec<FileChip>,
    pub(crate) summary: String,
    pub(crate) mode: DropZoneMode,
    pub(crate) drag_active: bool,
    /// Changes whenever the picker value must be cleared.
    pub(crate) input_generation: u64,
    pub(crate) on_event: Callback<DropZoneEvent>,
}

#[function_component(DropZone)]
pub(crate) fn drop_zone(props: &DropZoneProps) -> Html {
    let zone_ref = use_node_ref();
    let input_ref = use_node_ref();

    {
        let input_ref = input_ref.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    input.set_value("");
                }
                || ()
            },
            props.input_generation,
        );
    }

    let on_drag_over = {
        let on_event = props.on_event.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            on_event.emit(DropZoneEvent::DragOver);
        })
    };

    let on_drag_leave = {
        let on_event = props.on_event.clone();
        let zone_ref = zone_ref.clone();
        Callback::from(move |event: DragEvent| {
            let Some(zone) = zone_ref.cast::<Element>() else {
                return;
            };
            on_event.emit(DropZoneEvent::DragLeave {
                zone: rect_of(&zone),
                x: f64::from(event.client_x()),
                y: f64::from(event.client_y()),
            });
        })
    };

    let on_drop = {
        let on_event = props.on_event.clone();
        Callback::from(move |event: DragEvent| {
            event.prevent_default();
            let files = pending_files(event.data_transfer().and_then(|dt| dt.files()));
            on_event.emit(DropZoneEvent::Dropped(files));
        })
    };

    let on_pick = {
        let on_event = props.on_event.clone();
        Callback::from(move |event: Event| {
            let Some(input) = event
                .target()
                .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            on_event.emit(DropZoneEvent::Picked(pending_files(input.files())));
        })
    };

    let on_browse = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let body = match props.mode {
        DropZoneMode::Prompt => html! {
            <div class="drop-prompt">
                <p><strong>{"Drop files here"}</strong></p>
                <p class="muted">{"or"}</p>
            </div>
        },
        DropZoneMode::FileList => html! {
            <div class="file-list">
                <p class="muted">{props.summary.clone()}</p>
                <ul>
                    {for props.files.iter().map(|chip| render_chip(chip, &props.on_event))}
                </ul>
            </div>
        },
    };

    html! {
        <div
            ref={zone_ref}
            class={classes!("drop-zone", props.drag_active.then_some("drag-over"))}
            ondragover={on_drag_over}
            ondragleave={on_drag_leave}
            ondrop={on_drop}
        >
            {body}
            <button type="button" class="select-files-btn" onclick={on_browse}>
                {props.mode.select_label()}
            </button>
            <input ref={input_ref} type="file" multiple=true hidden=true onchange={on_pick} />
        </div>
    }
}

fn render_chip(chip: &FileChip, on_event: &Callback<DropZoneEvent>) -> Html {
    let on_remove = {
        let on_event = on_event.clone();
        let name = chip.name.clone();
        Callback::from(move |_: MouseEvent| on_event.emit(DropZoneEvent::Remove(name.clone())))
    };
    html! {
        <li class="file-chip" key={chip.name.clone()}>
            <span class="file-name">{chip.name.clone()}</span>
            <span class="file-size muted">{chip.size_label.clone()}</span>
            <button class="ghost remove" aria-label="Remove file" onclick={on_remove}>{"×"}</button>
        </li>
    }
}
