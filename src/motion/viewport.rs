use std::cell::RefCell;
use std::rc::Rc;

/// One reading of the page's scroll position and dimensions, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    pub position_y: u32,
    pub viewport_height: u32,
    pub document_height: u32,
}

impl ScrollSample {
    pub fn new(position_y: u32, viewport_height: u32, document_height: u32) -> Self {
        Self {
            position_y,
            viewport_height: viewport_height.max(1),
            document_height: document_height.max(1),
        }
    }

    /// Builds a sample from the raw floating point values the browser reports.
    /// Overscroll can make the position negative; that is treated as the top.
    pub fn from_raw(position_y: f64, viewport_height: f64, document_height: f64) -> Self {
        Self::new(
            to_px(position_y),
            to_px(viewport_height),
            to_px(document_height),
        )
    }

    /// Distance the page can actually scroll.
    pub fn max_scroll(&self) -> u32 {
        self.document_height.saturating_sub(self.viewport_height)
    }

    pub fn viewport_bottom(&self) -> u32 {
        self.position_y.saturating_add(self.viewport_height)
    }
}

fn to_px(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

/// Releases a low-level listener registration when dropped.
#[must_use = "dropping a ListenerGuard detaches its listeners immediately"]
pub struct ListenerGuard {
    detach: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    pub fn new(detach: impl FnOnce() + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// A guard with nothing to release.
    pub fn empty() -> Self {
        Self { detach: None }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

/// Where scroll samples come from.
pub trait ScrollSource {
    /// Reads the current position and dimensions.
    fn sample(&self) -> ScrollSample;

    /// Registers one scroll listener and one resize listener that call `notify`.
    /// Both are removed when the returned guard is dropped.
    fn attach(&self, notify: Rc<dyn Fn()>) -> ListenerGuard;
}

type Callback = Rc<dyn Fn(ScrollSample)>;

struct Inner {
    source: Rc<dyn ScrollSource>,
    subscribers: Vec<(u64, Callback)>,
    listeners: Option<ListenerGuard>,
    latest: Option<ScrollSample>,
    next_id: u64,
}

/// Broadcasts [`ScrollSample`]s to any number of subscribers while holding a
/// single listener pair on the underlying source.
///
/// The listener pair is attached when the first subscriber arrives and
/// detached when the last one leaves. A signal built with
/// [`ViewportSignal::detached`] has no source; subscribing to it is a no-op.
#[derive(Clone)]
pub struct ViewportSignal {
    inner: Option<Rc<RefCell<Inner>>>,
}

impl ViewportSignal {
    pub fn new(source: Rc<dyn ScrollSource>) -> Self {
        Self {
            inner: Some(Rc::new(RefCell::new(Inner {
                source,
                subscribers: Vec::new(),
                listeners: None,
                latest: None,
                next_id: 0,
            }))),
        }
    }

    pub fn detached() -> Self {
        Self { inner: None }
    }

    /// Whether the listener pair is currently registered on the source.
    pub fn is_listening(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|inner| inner.borrow().listeners.is_some())
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |inner| inner.borrow().subscribers.len())
    }

    pub fn latest(&self) -> Option<ScrollSample> {
        self.inner.as_ref().and_then(|inner| inner.borrow().latest)
    }

    /// Registers `callback`, calls it right away with the current sample and
    /// again on every scroll or resize until the subscription is dropped.
    pub fn subscribe(&self, callback: impl Fn(ScrollSample) + 'static) -> Subscription {
        let Some(inner) = &self.inner else {
            return Subscription::inert();
        };
        let callback: Callback = Rc::new(callback);

        let (id, source, needs_listeners) = {
            let mut state = inner.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.subscribers.push((id, callback.clone()));
            (id, state.source.clone(), state.listeners.is_none())
        };

        if needs_listeners {
            let weak = Rc::downgrade(inner);
            let guard = source.attach(Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    broadcast(&inner);
                }
            }));
            inner.borrow_mut().listeners = Some(guard);
        }

        let sample = source.sample();
        inner.borrow_mut().latest = Some(sample);
        callback(sample);

        Subscription {
            inner: Some(inner.clone()),
            id,
        }
    }

    /// Re-samples the source and notifies every subscriber.
    pub fn refresh(&self) {
        if let Some(inner) = &self.inner {
            broadcast(inner);
        }
    }
}

fn broadcast(inner: &Rc<RefCell<Inner>>) {
    let (sample, subscribers) = {
        let mut state = inner.borrow_mut();
        if state.subscribers.is_empty() {
            return;
        }
        let sample = state.source.sample();
        state.latest = Some(sample);
        (sample, state.subscribers.clone())
    };

    for (id, callback) in subscribers {
        // a subscriber earlier in this pass may have unsubscribed this one
        let still_subscribed = inner
            .borrow()
            .subscribers
            .iter()
            .any(|(other, _)| *other == id);
        if still_subscribed {
            callback(sample);
        }
    }
}

/// Handle returned by [`ViewportSignal::subscribe`]. Dropping it unsubscribes.
///
/// A live subscription keeps the signal's shared state alive even if every
/// `ViewportSignal` clone has been dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    inner: Option<Rc<RefCell<Inner>>>,
    id: u64,
}

impl Subscription {
    fn inert() -> Self {
        Self { inner: None, id: 0 }
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };
        let released = {
            let mut state = inner.borrow_mut();
            state.subscribers.retain(|(other, _)| *other != self.id);
            if state.subscribers.is_empty() {
                state.listeners.take()
            } else {
                None
            }
        };
        // detach outside the borrow; the source may call back into us
        drop(released);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
