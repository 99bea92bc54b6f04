//! DOM Events
//!
//! Listener registration and the event object passed to listeners.
//! The tree only stores listeners and computes propagation paths; invoking
//! them is left to the owner of the tree so that no borrow of the tree is
//! held while user callbacks run.

use std::fmt;
use std::rc::Rc;

use crate::NodeId;

/// Event listener callback
pub type Listener = Rc<dyn Fn(&mut Event)>;

/// Handle returned by listener registration, used to remove it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// `addEventListener` options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Fire during the capture phase instead of target/bubble
    pub capture: bool,
    /// Remove after the first invocation
    pub once: bool,
    /// Listener promises not to call `prevent_default`
    pub passive: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self { capture: true, ..Self::default() }
    }

    pub fn once() -> Self {
        Self { once: true, ..Self::default() }
    }
}

impl From<bool> for ListenerOptions {
    /// Legacy `useCapture` boolean
    fn from(capture: bool) -> Self {
        Self { capture, ..Self::default() }
    }
}

pub(crate) struct RegisteredListener {
    pub id: ListenerId,
    pub event_type: String,
    pub callback: Listener,
    pub options: ListenerOptions,
}

impl fmt::Debug for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredListener")
            .field("id", &self.id)
            .field("event_type", &self.event_type)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Propagation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// Event passed to listeners
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    pub target: NodeId,
    pub current_target: NodeId,
    pub phase: EventPhase,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Free-form payload carried by synthetic events
    pub detail: Option<String>,
    in_passive_listener: bool,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    /// Create a bubbling, cancelable event
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: NodeId::NONE,
            current_target: NodeId::NONE,
            phase: EventPhase::None,
            bubbles: true,
            cancelable: true,
            detail: None,
            in_passive_listener: false,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// Create an event that only reaches the target
    pub fn non_bubbling(event_type: &str) -> Self {
        Self { bubbles: false, ..Self::new(event_type) }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Prevent default action. Ignored for non-cancelable events and
    /// inside passive listeners.
    pub fn prevent_default(&mut self) {
        if self.cancelable && !self.in_passive_listener {
            self.default_prevented = true;
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }

    /// Run `callback` as the listener registered with `options`
    pub fn invoke(&mut self, callback: &Listener, options: ListenerOptions) {
        self.in_passive_listener = options.passive;
        callback(self);
        self.in_passive_listener = false;
    }
}

/// Phases an event visits at `node`, in order, given the dispatch path.
/// `path` runs from the target up to the root.
pub fn phases_for(path: &[NodeId], bubbles: bool) -> Vec<(NodeId, EventPhase)> {
    let Some((&target, ancestors)) = path.split_first() else {
        return Vec::new();
    };

    let mut steps = Vec::with_capacity(path.len() * 2);
    for &node in ancestors.iter().rev() {
        steps.push((node, EventPhase::Capturing));
    }
    steps.push((target, EventPhase::AtTarget));
    if bubbles {
        for &node in ancestors {
            steps.push((node, EventPhase::Bubbling));
        }
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_phases_for_bubbling() {
        let path = [NodeId(3), NodeId(2), NodeId(0)];
        let phases = phases_for(&path, true);
        assert_eq!(
            phases,
            vec![
                (NodeId(0), EventPhase::Capturing),
                (NodeId(2), EventPhase::Capturing),
                (NodeId(3), EventPhase::AtTarget),
                (NodeId(2), EventPhase::Bubbling),
                (NodeId(0), EventPhase::Bubbling),
            ]
        );
    }

    #[test]
    fn test_phases_for_non_bubbling() {
        let path = [NodeId(3), NodeId(0)];
        let phases = phases_for(&path, false);
        assert_eq!(phases.last(), Some(&(NodeId(3), EventPhase::AtTarget)));
        assert_eq!(phases.len(), 2);
        assert!(phases_for(&[], true).is_empty());
    }

    #[test]
    fn test_passive_listener_cannot_prevent_default() {
        let mut event = Event::new("click");
        let listener: Listener = Rc::new(|e: &mut Event| e.prevent_default());
        event.invoke(&listener, ListenerOptions { passive: true, ..Default::default() });
        assert!(!event.is_default_prevented());
        event.invoke(&listener, ListenerOptions::default());
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_invoke_calls_listener() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let listener: Listener = Rc::new(move |_e: &mut Event| h.set(h.get() + 1));
        let mut event = Event::non_bubbling("focus");
        event.invoke(&listener, ListenerOptions::default());
        event.invoke(&listener, ListenerOptions::default());
        assert_eq!(hits.get(), 2);
        assert!(!event.bubbles);
    }

    #[test]
    fn test_use_capture_bool() {
        assert!(ListenerOptions::from(true).capture);
        assert!(!ListenerOptions::from(false).capture);
    }
}
