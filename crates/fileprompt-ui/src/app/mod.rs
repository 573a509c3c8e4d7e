use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::drop_zone::{DropZone, DropZoneEvent};
use crate::components::feedback_button::FeedbackButton;
use crate::components::history_list::HistoryList;
use crate::components::result_panel::ResultPanel;
use crate::components::toast::ToastHost;
use crate::core::actions::HistoryAction;
use crate::core::feedback::Control;
use crate::core::scheduler::Scheduler;
use crate::core::session::Session;
use crate::core::store::AppStore;
use crate::services::api::ApiClient;
use scheduler::BrowserScheduler;
use std::rc::Rc;
use tracing::debug;
use yew::platform::spawn_local;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

pub(crate) mod browser;
mod preferences;
mod scheduler;
mod telemetry;

pub(crate) type AppSession = Session<ApiClient>;

fn build_session() -> AppSession {
    let config = preferences::load_config();
    let api = ApiClient::new(config.clone());
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);
    Session::new(config, api, scheduler)
}

/// Run `task` against the session on the page's event loop.
fn spawn_with<F, Fut>(session: &Rc<AppSession>, task: F)
where
    F: FnOnce(Rc<AppSession>) -> Fut + 'static,
    Fut: std::future::Future<Output = ()> + 'static,
{
    let session = Rc::clone(session);
    spawn_local(task(session));
}

#[function_component(FilepromptApp)]
pub(crate) fn fileprompt_app() -> Html {
    let session = use_memo(|_| build_session(), ());

    let files = use_selector(|store: &AppStore| store.files.clone());
    let summary = use_selector(|store: &AppStore| store.selection_summary.clone());
    let input_generation = use_selector(|store: &AppStore| store.input_generation);
    let result = use_selector(|store: &AppStore| store.result.clone());
    let history = use_selector(|store: &AppStore| store.history.clone());
    let view = use_selector(|store: &AppStore| store.view.clone());
    let buttons = use_selector(|store: &AppStore| store.buttons.clone());
    let upload_button =
        use_selector(|store: &AppStore| store.button(&Control::Upload, store.view.upload_enabled));
    let save_button =
        use_selector(|store: &AppStore| store.button(&Control::Save, store.view.save_enabled));
    let copy_button =
        use_selector(|store: &AppStore| store.button(&Control::Copy, store.view.result_visible));
    let delete_all_button =
        use_selector(|store: &AppStore| store.button(&Control::DeleteAll, !store.history.is_empty()));
    let confirm_button = use_selector(|store: &AppStore| store.(*confirm_button).clone());
    let toast = use_selector(|store: &AppStore| store.toast.clone());

    {
        let session = Rc::clone(&session);
        use_effect_with_deps(
            move |_| {
                let dispatch = Dispatch::<AppStore>::new();
                dispatch.set(AppStore::capture(&session));
                let weak = Rc::downgrade(&session);
                let subscription = session.subscribe(move |topic| {
                    if let Some(session) = weak.upgrade() {
                        debug!(?topic, "store changed");
                        Dispatch::<AppStore>::new().set(AppStore::capture(&session));
                    }
                });
                spawn_with(&session, |session| async move {
                    let _ = session.refresh_history().await;
                });
                move || session.unsubscribe(subscription)
            },
            (),
        );
    }

    let on_drop_zone = {
        let session = Rc::clone(&session);
        Callback::from(move |event: DropZoneEvent| match event {
            DropZoneEvent::DragOver => session.drag_over(),
            DropZoneEvent::DragLeave { zone, x, y } => session.drag_leave(zone, x, y),
            DropZoneEvent::Dropped(files) => session.drop_files(files),
            DropZoneEvent::Picked(files) => session.add_files(files),
            DropZoneEvent::Remove(name) => session.remove_file(&name),
        })
    };

    let on_upload = {
        let session = Rc::clone(&session);
        Callback::from(move |_: MouseEvent| {
            spawn_with(&session, |session| async move {
                let _ = session.convert().await;
            });
        })
    };

    let on_save = {
        let session = Rc::clone(&session);
        Callback::from(move |_: MouseEvent| {
            spawn_with(&session, |session| async move {
                let _ = session.save().await;
            });
        })
    };

    let on_reset = {
        let session = Rc::clone(&session);
        Callback::from(move |_: MouseEvent| session.reset())
    };

    let on_copy = {
        let session = Rc::clone(&session);
        Callback::from(move |_: MouseEvent| {
            spawn_with(&session, |session| async move {
                let _ = session.copy_result(browser::copy_text).await;
            });
        })
    };

    let on_history = {
        let session = Rc::clone(&session);
        Callback::from(move |action: HistoryAction| {
            spawn_with(&session, |session| async move {
                match action {
                    HistoryAction::Load(id) => {
                        let _ = session.load_item(&id).await;
                    }
                    HistoryAction::Delete(id) => {
                        let _ = session.delete_item(&id).await;
                    }
                    HistoryAction::Download { id, filename } => {
                        let _ = session
                            .download(&id, &filename, browser::save_bytes)
                            .await;
                    }
                }
            });
        })
    };

    let on_request_delete_all = {
        let session = Rc::clone(&session);
        Callback::from(move |_: MouseEvent| session.request_delete_all())
    };

    let on_cancel_delete_all = {
        let session = Rc::clone(&session);
        Callback::from(move |()| session.cancel_delete_all())
    };

    let on_confirm_delete_all = {
        let session = Rc::clone(&session);
        Callback::from(move |()| {
            spawn_with(&session, |session| async move {
                let _ = session.delete_all().await;
            });
        })
    };

    html! {
        <main class="fileprompt">
            <section class="upload-panel">
                <DropZone
                    files={(*files).clone()}
                    summary={(*summary).clone()}
                    mode={view.drop_zone}
                    drag_active={view.drag_active}
                    input_generation={*input_generation}
                    on_event={on_drop_zone}
                />
                <div class="upload-actions">
                    <FeedbackButton
                        view={(*upload_button).clone()}
                        base_class={classes!("primary")}
                        onclick={on_upload}
                    />
                    <FeedbackButton
                        view={(*save_button).clone()}
                        base_class={classes!("secondary")}
                        onclick={on_save}
                    />
                    <button class="ghost" disabled={!view.reset_enabled} onclick={on_reset}>
                        {"Reset"}
                    </button>
                </div>
            </section>
            <ResultPanel
                result={(*result).clone()}
                copy={(*copy_button).clone()}
                on_copy={on_copy}
            />
            <HistoryList
                entries={(*history).clone()}
                buttons={(*buttons).clone()}
                delete_all={(*delete_all_button).clone()}
                on_action={on_history}
                on_delete_all={on_request_delete_all}
            />
            <ConfirmDialog
                open={view.confirm_open}
                confirm={(*confirm_button).clone()}
                on_confirm={on_confirm_delete_all}
                on_cancel={on_cancel_delete_all}
            />
            <ToastHost phase={(*toast).clone()} />
        </main>
    }
}

/// Entrypoint for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let config = preferences::load_config();
    if let Err(err) = telemetry::init_logging(config.log_level) {
        gloo::console::warn!(err);
    }
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<FilepromptApp>::with_root(root).render();
    } else {
        yew::Renderer::<FilepromptApp>::new().render();
    }
}
