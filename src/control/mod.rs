//! Control capability interfaces and their supporting types.
//!
//! Controls are external collaborators. This module defines what a group
//! needs from them, the answer envelopes the UI delivers, the shared
//! handles, and one in-memory control implementation.

pub mod choice;
pub mod envelope;
pub mod handles;
pub mod kind;
pub mod traits;

pub use choice::ChoiceControl;
pub use envelope::{AnswerEnvelope, ControlRef};
pub use handles::{EventDispatcher, EventTarget, FlowControl, FlowHandle, TagEvent};
pub use kind::{ControlKind, GroupKind};
pub use traits::{Control, Tag};
