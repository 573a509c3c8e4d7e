//! Browser-backed feedback scheduler.

use crate::core::scheduler::{Scheduler, TimerHandle};
use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;

/// Defers callbacks with `setTimeout` on the page's event loop.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let (handle, token) = TimerHandle::pair();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if !token.is_cancelled() {
                callback();
            }
        });
        handle
    }
}
