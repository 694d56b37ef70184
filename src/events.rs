// ABOUTME: Event system for the deck-slides library
// ABOUTME: Publish/subscribe notifications with per-handler fault isolation

use crate::transitions::Direction;
use log::error;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Notifications emitted by a presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Ready,
    BeforeSlideChange {
        from: usize,
        to: usize,
    },
    AfterSlideChange {
        from: usize,
        to: usize,
    },
    TransitionStart {
        outgoing: usize,
        incoming: usize,
        direction: Direction,
    },
    TransitionEnd {
        outgoing: usize,
        incoming: usize,
        direction: Direction,
    },
    Error {
        cause: String,
    },
}

/// Discriminant used to subscribe to one notification family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    BeforeSlideChange,
    AfterSlideChange,
    TransitionStart,
    TransitionEnd,
    Error,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Ready => EventKind::Ready,
            Event::BeforeSlideChange { .. } => EventKind::BeforeSlideChange,
            Event::AfterSlideChange { .. } => EventKind::AfterSlideChange,
            Event::TransitionStart { .. } => EventKind::TransitionStart,
            Event::TransitionEnd { .. } => EventKind::TransitionEnd,
            Event::Error { .. } => EventKind::Error,
        }
    }
}

/// Token returned by [`EventEmitter::on`]; pass it to `off` to unsubscribe.
pub type HandlerId = usize;

struct Handler {
    id: HandlerId,
    once: bool,
    callback: Box<dyn FnMut(&Event)>,
}

/// Event emitter with independently fault-isolated handlers: a panicking
/// handler is caught and logged, and its siblings still run.
#[derive(Default)]
pub struct EventEmitter {
    handlers: HashMap<EventKind, Vec<Handler>>,
    next_id: HandlerId,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one notification family.
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> HandlerId
    where
        F: FnMut(&Event) + 'static,
    {
        self.register(kind, false, Box::new(callback))
    }

    /// Register a handler that is removed after its first invocation.
    pub fn once<F>(&mut self, kind: EventKind, callback: F) -> HandlerId
    where
        F: FnMut(&Event) + 'static,
    {
        self.register(kind, true, Box::new(callback))
    }

    fn register(&mut self, kind: EventKind, once: bool, callback: Box<dyn FnMut(&Event)>) -> HandlerId {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers
            .entry(kind)
            .or_default()
            .push(Handler { id, once, callback });
        id
    }

    /// Remove a handler by id. Returns true if it was registered.
    pub fn off(&mut self, id: HandlerId) -> bool {
        for handlers in self.handlers.values_mut() {
            if let Some(position) = handlers.iter().position(|handler| handler.id == id) {
                handlers.remove(position);
                return true;
            }
        }
        false
    }

    /// Remove every handler.
    pub fn off_all(&mut self) {
        self.handlers.clear();
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Invoke every handler registered for the event's kind. Each handler is
    /// fault-isolated: a panic is caught and logged and does not prevent
    /// sibling handlers from running.
    pub fn emit(&mut self, event: &Event) {
        let kind = event.kind();
        let Some(mut handlers) = self.handlers.remove(&kind) else {
            return;
        };

        for handler in &mut handlers {
            let result = catch_unwind(AssertUnwindSafe(|| (handler.callback)(event)));
            if let Err(payload) = result {
                error!(
                    "Error in event handler for {:?}: {}",
                    kind,
                    panic_message(&payload)
                );
            }
        }

        handlers.retain(|handler| !handler.once);
        if !handlers.is_empty() {
            self.handlers.insert(kind, handlers);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn handlers_receive_events_for_their_kind() {
        let mut emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        emitter.on(EventKind::BeforeSlideChange, move |event| {
            sink.borrow_mut().push(event.clone());
        });

        emitter.emit(&Event::BeforeSlideChange { from: 0, to: 1 });
        emitter.emit(&Event::Ready);

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(
            seen.borrow()[0],
            Event::BeforeSlideChange { from: 0, to: 1 }
        );
    }

    #[test]
    fn a_panicking_handler_does_not_stop_its_siblings() {
        let mut emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(0));

        emitter.on(EventKind::Ready, |_| panic!("boom"));
        let sink = Rc::clone(&seen);
        emitter.on(EventKind::Ready, move |_| {
            *sink.borrow_mut() += 1;
        });

        emitter.emit(&Event::Ready);
        assert_eq!(*seen.borrow(), 1);

        // The panicking handler stays registered and keeps failing in
        // isolation on later emits.
        emitter.emit(&Event::Ready);
        assert_eq!(*seen.borrow(), 2);
    }

    #[test]
    fn once_handlers_fire_a_single_time() {
        let mut emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&seen);
        emitter.once(EventKind::Ready, move |_| {
            *sink.borrow_mut() += 1;
        });

        emitter.emit(&Event::Ready);
        emitter.emit(&Event::Ready);
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(emitter.listener_count(EventKind::Ready), 0);
    }

    #[test]
    fn off_removes_a_handler_by_id() {
        let mut emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&seen);
        let id = emitter.on(EventKind::Error, move |_| {
            *sink.borrow_mut() += 1;
        });

        assert!(emitter.off(id));
        assert!(!emitter.off(id));

        emitter.emit(&Event::Error { cause: "x".to_string() });
        assert_eq!(*seen.borrow(), 0);
    }
}
