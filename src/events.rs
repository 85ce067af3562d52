//! Notification delivery.
//!
//! Interaction state machines never call listeners directly; they emit into an
//! [`OverlayEventSink`] handed to them per call. [`EventBus`] is the stock sink
//! with typed per-kind subscriptions.

use std::collections::HashMap;

use crate::types::{EventKind, MoveEvent, OverlayEvent, RegionSelected, ResizeEvent};

/// Receiver of overlay notifications
pub trait OverlayEventSink {
    fn emit(&mut self, event: OverlayEvent);
}

/// Collecting sink, mostly for tests and headless replay
impl OverlayEventSink for Vec<OverlayEvent> {
    fn emit(&mut self, event: OverlayEvent) {
        self.push(event);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OverlayEventSink for NullSink {
    fn emit(&mut self, _event: OverlayEvent) {}
}

type Listener = Box<dyn FnMut(&OverlayEvent)>;

/// Token returned by [`EventBus`] subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Synchronous publish/subscribe for overlay notifications.
///
/// Listeners run in subscription order: kind-specific listeners first, then
/// catch-all listeners.
#[derive(Default)]
pub struct EventBus {
    by_kind: HashMap<EventKind, Vec<(ListenerId, Listener)>>,
    all: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    /// Subscribe to a single notification kind
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&OverlayEvent) + 'static,
    {
        let id = self.next_id();
        self.by_kind
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Subscribe to every notification
    pub fn subscribe_all<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&OverlayEvent) + 'static,
    {
        let id = self.next_id();
        self.all.push((id, Box::new(listener)));
        id
    }

    pub fn on_region_selected<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut(&RegionSelected) + 'static,
    {
        self.subscribe(EventKind::RegionSelected, move |event| {
            if let OverlayEvent::RegionSelected(e) = event {
                listener(e);
            }
        })
    }

    pub fn on_move_preview<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&MoveEvent) + 'static,
    {
        self.subscribe(EventKind::MovePreview, move_listener(listener))
    }

    pub fn on_move_complete<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&MoveEvent) + 'static,
    {
        self.subscribe(EventKind::MoveComplete, move_listener(listener))
    }

    pub fn on_resize_preview<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ResizeEvent) + 'static,
    {
        self.subscribe(EventKind::ResizePreview, resize_listener(listener))
    }

    pub fn on_resize_complete<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ResizeEvent) + 'static,
    {
        self.subscribe(EventKind::ResizeComplete, resize_listener(listener))
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listener_count();
        for listeners in self.by_kind.values_mut() {
            listeners.retain(|(lid, _)| *lid != id);
        }
        self.all.retain(|(lid, _)| *lid != id);
        self.listener_count() != before
    }

    pub fn listener_count(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum::<usize>() + self.all.len()
    }

    /// Deliver an event to its listeners
    pub fn publish(&mut self, event: &OverlayEvent) {
        tracing::trace!(kind = ?event.kind(), region_id = event.region_id(), "publish");
        if let Some(listeners) = self.by_kind.get_mut(&event.kind()) {
            for (_, listener) in listeners.iter_mut() {
                listener(event);
            }
        }
        for (_, listener) in self.all.iter_mut() {
            listener(event);
        }
    }
}

impl OverlayEventSink for EventBus {
    fn emit(&mut self, event: OverlayEvent) {
        self.publish(&event);
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

fn move_listener<F>(mut listener: F) -> impl FnMut(&OverlayEvent)
where
    F: FnMut(&MoveEvent),
{
    move |event| {
        if let OverlayEvent::MovePreview(e) | OverlayEvent::MoveComplete(e) = event {
            listener(e);
        }
    }
}

fn resize_listener<F>(mut listener: F) -> impl FnMut(&OverlayEvent)
where
    F: FnMut(&ResizeEvent),
{
    move |event| {
        if let OverlayEvent::ResizePreview(e) | OverlayEvent::ResizeComplete(e) = event {
            listener(e);
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::{FloatingRect, GridRegion};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn chart() -> GridRegion {
        GridRegion::floating("c1", "chart", FloatingRect::new(0.0, 0.0, 100.0, 100.0))
    }

    #[test]
    fn test_typed_listener_only_sees_its_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = Rc::clone(&seen);
        bus.on_move_complete(move |e| sink.borrow_mut().push(e.x));

        let region = chart();
        let rect = FloatingRect::new(12.0, 0.0, 100.0, 100.0);
        bus.emit(OverlayEvent::MovePreview(MoveEvent::for_region(&region, rect)));
        bus.emit(OverlayEvent::MoveComplete(MoveEvent::for_region(&region, rect)));

        assert_eq!(*seen.borrow(), vec![12.0]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();
        let c = Rc::clone(&count);
        let id = bus.subscribe_all(move |_| *c.borrow_mut() += 1);

        let event = OverlayEvent::RegionSelected(RegionSelected::for_region(&chart()));
        bus.emit(event.clone());
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(event);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.listener_count(), 0);
    }
}
