//! Capability interfaces for tags and controls.
//!
//! `Tag` is what the orchestration layer talks to. A single control and a
//! group of controls both implement it, so callers never need to know which
//! one they hold. `Control` is the extra surface a group needs from its
//! members.

use std::fmt;

use crate::control::envelope::AnswerEnvelope;
use crate::control::handles::{EventTarget, FlowHandle};
use crate::control::kind::ControlKind;
use crate::error::Result;

/// Shared capability interface for one form field.
///
/// Every method is fallible: a disposed tag answers `GroupError::Disposed`,
/// and member failures travel through unchanged.
pub trait Tag {
    /// Field name.
    fn name(&self) -> Result<String>;

    /// Field id.
    fn id(&self) -> Result<String>;

    /// Field type (`radio`, `checkbox`, `group`, ...).
    fn type_name(&self) -> Result<String>;

    /// Human readable label.
    fn label(&self) -> Result<String>;

    /// Prompt to ask for this field.
    fn question(&self) -> Result<String>;

    /// Current value. Never empty: an unanswered field yields `[""]`.
    fn value(&self) -> Result<Vec<String>>;

    /// Whether an answer is required.
    fn required(&self) -> Result<bool>;

    /// Whether the field is inert.
    fn disabled(&self) -> Result<bool>;

    /// Message shown when an answer is rejected.
    fn error_message(&self) -> Result<String>;

    /// Ids of the controls selected by the last answer.
    fn active_elements(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Whether the field carries any conditional rules.
    fn has_conditions(&self) -> Result<bool>;

    /// Whether the field has a conditional rule on `tag_name`.
    fn has_conditions_for(&self, tag_name: &str) -> Result<bool>;

    /// Re-evaluate conditional rules.
    fn check_conditional_and_is_valid(&mut self) -> Result<bool>;

    /// Re-read any externally held state.
    fn refresh(&mut self) -> Result<()>;

    /// Clear the current answer.
    fn reset(&mut self) -> Result<()>;

    /// Release the field. Terminal.
    fn dealloc(&mut self) -> Result<()>;

    /// Apply one user answer and report whether it is valid.
    fn apply_answer(&mut self, envelope: &AnswerEnvelope) -> Result<bool>;

    /// Attach the shared event target.
    fn set_event_target(&mut self, target: EventTarget) -> Result<()>;

    /// Attach the shared flow handle.
    fn set_flow(&mut self, flow: FlowHandle) -> Result<()>;
}

/// A single addressable control that can be a group member.
pub trait Control: Tag {
    /// Semantic type.
    fn kind(&self) -> ControlKind;

    /// The control's own prompt, if it defines one.
    fn own_question(&self) -> Option<String>;

    /// The control's raw value, used as its contribution to a group.
    fn raw_value(&self) -> String;

    /// Whether the underlying input is checked.
    fn is_checked(&self) -> bool;

    /// Push a checked state into the underlying input.
    fn set_checked(&mut self, checked: bool) -> Result<()>;
}

impl fmt::Debug for dyn Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("kind", &self.kind())
            .field("value", &self.raw_value())
            .field("checked", &self.is_checked())
            .finish()
    }
}

impl<T: Tag + ?Sized> Tag for Box<T> {
    fn name(&self) -> Result<String> {
        (**self).name()
    }

    fn id(&self) -> Result<String> {
        (**self).id()
    }

    fn type_name(&self) -> Result<String> {
        (**self).type_name()
    }

    fn label(&self) -> Result<String> {
        (**self).label()
    }

    fn question(&self) -> Result<String> {
        (**self).question()
    }

    fn value(&self) -> Result<Vec<String>> {
        (**self).value()
    }

    fn required(&self) -> Result<bool> {
        (**self).required()
    }

    fn disabled(&self) -> Result<bool> {
        (**self).disabled()
    }

    fn error_message(&self) -> Result<String> {
        (**self).error_message()
    }

    fn active_elements(&self) -> Result<Vec<String>> {
        (**self).active_elements()
    }

    fn has_conditions(&self) -> Result<bool> {
        (**self).has_conditions()
    }

    fn has_conditions_for(&self, tag_name: &str) -> Result<bool> {
        (**self).has_conditions_for(tag_name)
    }

    fn check_conditional_and_is_valid(&mut self) -> Result<bool> {
        (**self).check_conditional_and_is_valid()
    }

    fn refresh(&mut self) -> Result<()> {
        (**self).refresh()
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }

    fn dealloc(&mut self) -> Result<()> {
        (**self).dealloc()
    }

    fn apply_answer(&mut self, envelope: &AnswerEnvelope) -> Result<bool> {
        (**self).apply_answer(envelope)
    }

    fn set_event_target(&mut self, target: EventTarget) -> Result<()> {
        (**self).set_event_target(target)
    }

    fn set_flow(&mut self, flow: FlowHandle) -> Result<()> {
        (**self).set_flow(flow)
    }
}
