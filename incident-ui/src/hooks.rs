use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::{on_cleanup, set_timeout_with_handle, store_value, StoredValue};
use std::time::Duration;

/// Milliseconds since the epoch as reported by the browser.
pub fn now() -> Duration {
    Duration::from_secs_f64(js_sys::Date::now() / 1000.0)
}

/// A single pending timeout owned by the current view.
///
/// Arming replaces whatever was pending. The pending timeout is cleared when
/// the owning view is torn down.
#[derive(Clone, Copy)]
pub struct TimerSlot(StoredValue<Option<TimeoutHandle>>);

impl TimerSlot {
    pub fn new() -> Self {
        let slot = TimerSlot(store_value(None));
        on_cleanup(move || slot.clear());
        slot
    }

    pub fn arm(&self, delay: Duration, f: impl FnOnce() + 'static) {
        self.clear();
        match set_timeout_with_handle(f, delay) {
            Ok(handle) => self.0.set_value(Some(handle)),
            Err(err) => tracing::warn!(?err, "failed to schedule timeout"),
        }
    }

    pub fn clear(&self) {
        if let Some(handle) = self.0.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    }
}
