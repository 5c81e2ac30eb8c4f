use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use shared::{ScrollMetrics, Throttle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen_futures::spawn_local;

use crate::services::logging::Logger;

/// Sample the window's scroll geometry
pub fn current_metrics() -> Option<ScrollMetrics> {
    let window = web_sys::window()?;
    let body = window.document()?.body()?;

    Some(ScrollMetrics {
        content_height: f64::from(body.offset_height()),
        viewport_height: window.inner_height().ok()?.as_f64()?,
        scroll_y: window.scroll_y().ok()?,
    })
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

type ScrollHandler = Rc<dyn Fn(ScrollMetrics)>;

struct Inner {
    throttle: Throttle,
    handler: ScrollHandler,
}

/// Window scroll listener rate limited by a leading + trailing `Throttle`.
///
/// Dropping the value removes the listener; a trailing call that is still
/// waiting on its timer is dropped with it.
pub struct ThrottledScroll {
    _listener: EventListener,
    inner: Rc<RefCell<Inner>>,
}

impl ThrottledScroll {
    pub fn attach(interval_ms: u64, handler: impl Fn(ScrollMetrics) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let inner = Rc::new(RefCell::new(Inner {
            throttle: Throttle::new(interval_ms),
            handler: Rc::new(handler),
        }));

        let weak = Rc::downgrade(&inner);
        let listener = EventListener::new(&window, "scroll", move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let action = inner.borrow_mut().throttle.on_event(now_ms());
            if let Some(delay) = action.arm_timer_ms() {
                arm_timer(Rc::downgrade(&inner), delay);
            }
            if action.should_invoke() {
                fire(&inner);
            }
        });

        Logger::debug_with_component("scroll", &format!("Listening, throttled to {}ms", interval_ms));
        Some(Self {
            _listener: listener,
            inner,
        })
    }
}

impl Drop for ThrottledScroll {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.throttle.cancel();
        }
    }
}

fn arm_timer(inner: Weak<RefCell<Inner>>, delay_ms: u64) {
    spawn_local(async move {
        TimeoutFuture::new(delay_ms.min(u64::from(u32::MAX)) as u32).await;

        let Some(inner) = inner.upgrade() else {
            return;
        };
        let action = inner.borrow_mut().throttle.on_timer(now_ms());
        if let Some(delay) = action.arm_timer_ms {
            arm_timer(Rc::downgrade(&inner), delay);
        }
        if action.invoke {
            fire(&inner);
        }
    });
}

fn fire(inner: &Rc<RefCell<Inner>>) {
    let handler = Rc::clone(&inner.borrow().handler);
    if let Some(metrics) = current_metrics() {
        handler(metrics);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_metrics_available_in_browser() {
        let metrics = current_metrics().unwrap();
        assert!(metrics.viewport_height > 0.0);
        assert!(metrics.scroll_y >= 0.0);
    }

    #[wasm_bindgen_test]
    async fn test_burst_of_scroll_events_is_throttled() {
        let calls = Rc::new(Cell::new(0u32));
        let scroll = {
            let calls = calls.clone();
            ThrottledScroll::attach(50, move |_| calls.set(calls.get() + 1)).unwrap()
        };

        let window = web_sys::window().unwrap();
        for _ in 0..5 {
            let event = web_sys::Event::new("scroll").unwrap();
            window.dispatch_event(&event).unwrap();
        }
        assert_eq!(calls.get(), 1);

        TimeoutFuture::new(120).await;
        assert_eq!(calls.get(), 2);
        drop(scroll);
    }
}
