//! Cross-cutting handles shared by every tag in a form.
//!
//! The orchestration layer hands the same event target and flow handle to
//! every tag; groups forward both to their members.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

/// Events tags publish to the shared event target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TagEvent {
    /// A control's checked state was synchronised from an answer.
    CheckedChanged { id: String, checked: bool },
    /// A group finished aggregating an answer.
    GroupAnswered {
        name: String,
        valid: bool,
        values: Vec<String>,
    },
}

/// Receives tag events.
pub trait EventDispatcher {
    /// Publish one event.
    fn dispatch(&self, event: &TagEvent);
}

/// Read access to the answers the flow has collected so far.
///
/// Controls use it to evaluate their conditional rules.
pub trait FlowControl {
    /// Values answered for the tag with the given name, if it was answered.
    fn answered_value(&self, tag_name: &str) -> Option<Vec<String>>;
}

/// Shared event target handle.
#[derive(Clone)]
pub struct EventTarget(Rc<dyn EventDispatcher>);

impl EventTarget {
    /// Wrap a dispatcher.
    pub fn new(dispatcher: Rc<dyn EventDispatcher>) -> Self {
        Self(dispatcher)
    }

    /// Publish one event.
    pub fn dispatch(&self, event: &TagEvent) {
        self.0.dispatch(event);
    }

    /// Whether two handles point at the same dispatcher.
    pub fn same_as(&self, other: &EventTarget) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventTarget")
    }
}

/// Shared flow handle.
#[derive(Clone)]
pub struct FlowHandle(Rc<dyn FlowControl>);

impl FlowHandle {
    /// Wrap a flow.
    pub fn new(flow: Rc<dyn FlowControl>) -> Self {
        Self(flow)
    }

    /// Values answered for the tag with the given name.
    pub fn answered_value(&self, tag_name: &str) -> Option<Vec<String>> {
        self.0.answered_value(tag_name)
    }
}

impl fmt::Debug for FlowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FlowHandle")
    }
}
