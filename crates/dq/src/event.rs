//! Event dispatch through the capture/target/bubble path
//!
//! Listeners are snapshotted per node and phase with the tree borrow
//! released before any callback runs, so listeners may freely mutate the
//! document or register further listeners (those apply to later steps).
//! Each snapshotted listener is re-checked right before it runs: one removed
//! by an earlier callback is skipped, and a `once` listener is unregistered
//! only when it is actually invoked.

use dq_dom::events::phases_for;
use dq_dom::{Event, EventPhase, NodeId};

use crate::Document;

pub(crate) fn dispatch(document: &Document, target: NodeId, mut event: Event) -> Event {
    let path = document.with_tree(|tree| tree.ancestor_path(target));
    event.target = target;
    tracing::trace!(event = event.event_type(), target = target.index(), "dispatch");

    for (node, phase) in phases_for(&path, event.bubbles) {
        let capture = match phase {
            EventPhase::Capturing => Some(true),
            EventPhase::Bubbling => Some(false),
            EventPhase::AtTarget | EventPhase::None => None,
        };
        let event_type = event.event_type().to_string();
        let listeners =
            document.with_tree(|tree| tree.listeners_for(node, &event_type, capture));

        event.current_target = node;
        event.phase = phase;
        for (listener, callback, options) in listeners {
            if !document.with_tree_mut(|tree| tree.claim_listener(node, listener)) {
                continue;
            }
            event.invoke(&callback, options);
            if event.is_immediate_propagation_stopped() {
                break;
            }
        }
        if event.is_propagation_stopped() {
            break;
        }
    }

    event.current_target = NodeId::NONE;
    event.phase = EventPhase::None;
    event
}
