//! Timer and calendar adapter.

#[cfg(any(test, target_arch = "wasm32"))]
use std::cell::Cell;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::collections::HashSet;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

pub trait Clock: 'static {
    /// Runs `callback` once after `delay_ms`, unless cleared first.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId;
    /// Clearing a timer that already fired is a no-op.
    fn clear_timeout(&self, id: TimerId);
    fn current_year(&self) -> i32;
}

#[cfg(any(test, target_arch = "wasm32"))]
#[derive(Default)]
struct IdSource {
    next: Cell<u32>,
}

#[cfg(any(test, target_arch = "wasm32"))]
impl IdSource {
    fn next(&self) -> TimerId {
        let id = self.next.get().wrapping_add(1);
        self.next.set(id);
        TimerId(id)
    }
}

/// Browser clock backed by `gloo_timers` futures on the page's event loop.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct BrowserClock {
    ids: IdSource,
    live: Rc<std::cell::RefCell<HashSet<TimerId>>>,
}

#[cfg(target_arch = "wasm32")]
impl Clock for BrowserClock {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        use gloo_timers::future::TimeoutFuture;

        let id = self.ids.next();
        self.live.borrow_mut().insert(id);
        let live = Rc::clone(&self.live);
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            let still_pending = live.borrow_mut().remove(&id);
            if still_pending {
                callback();
            }
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.live.borrow_mut().remove(&id);
    }

    fn current_year(&self) -> i32 {
        js_sys::Date::new_0().get_full_year() as i32
    }
}

/// Hand-cranked clock for tests. Nothing fires until [`ManualClock::advance`].
#[cfg(test)]
pub struct ManualClock {
    ids: IdSource,
    now: Cell<u64>,
    year: i32,
    queue: RefCell<Vec<Scheduled>>,
}

#[cfg(test)]
struct Scheduled {
    id: TimerId,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(year: i32) -> Self {
        Self {
            ids: IdSource::default(),
            now: Cell::new(0),
            year,
            queue: RefCell::new(Vec::new()),
        }
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves time forward, firing due callbacks in deadline order. Callbacks
    /// may schedule further timers; those fire too if they fall in range.
    pub fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let earliest = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, scheduled)| scheduled.due <= target)
                    .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.id.0))
                    .map(|(index, _)| index);
                earliest.map(|index| queue.remove(index))
            };
            let Some(scheduled) = next else {
                break;
            };
            self.now.set(scheduled.due);
            (scheduled.callback)();
        }
        self.now.set(target);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.ids.next();
        self.queue.borrow_mut().push(Scheduled {
            id,
            due: self.now.get() + u64::from(delay_ms),
            callback,
        });
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        self.queue.borrow_mut().retain(|scheduled| scheduled.id != id);
    }

    fn current_year(&self) -> i32 {
        self.year
    }
}
