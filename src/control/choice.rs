//! In-memory radio/checkbox control.
//!
//! `ChoiceControl` is a plain data implementation of [`Control`]. Callers
//! without a real input layer build groups from it, and the group tests use
//! it as their member type.

use std::collections::HashMap;

use crate::control::envelope::AnswerEnvelope;
use crate::control::handles::{EventTarget, FlowHandle, TagEvent};
use crate::control::kind::ControlKind;
use crate::control::traits::{Control, Tag};
use crate::error::{GroupError, Result};

/// A single choice input.
#[derive(Debug, Clone)]
pub struct ChoiceControl {
    id: String,
    name: String,
    kind: ControlKind,
    label: String,
    value: String,
    question: Option<String>,
    required: bool,
    disabled: bool,
    checked: bool,
    error_message: String,
    /// Tag name → accepted answers. An empty list accepts any answer.
    conditions: HashMap<String, Vec<String>>,
    conditionally_disabled: bool,
    event_target: Option<EventTarget>,
    flow: Option<FlowHandle>,
    disposed: bool,
}

impl ChoiceControl {
    /// Create a control of the given kind.
    pub fn new(
        kind: ControlKind,
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            label: String::new(),
            value: value.into(),
            question: None,
            required: false,
            disabled: false,
            checked: false,
            error_message: String::new(),
            conditions: HashMap::new(),
            conditionally_disabled: false,
            event_target: None,
            flow: None,
            disposed: false,
        }
    }

    /// Create a radio button.
    pub fn radio(id: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(ControlKind::Radio, id, name, value)
    }

    /// Create a checkbox.
    pub fn checkbox(
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(ControlKind::Checkbox, id, name, value)
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the control's own prompt.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Set the required flag.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the initial checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set the error message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Only enable this control when `tag_name` was answered with one of
    /// `accepted` (any answer when `accepted` is empty).
    pub fn with_condition<I, S>(mut self, tag_name: impl Into<String>, accepted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions.insert(
            tag_name.into(),
            accepted.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Whether `dealloc` has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            return Err(GroupError::Disposed);
        }
        Ok(())
    }

    fn conditions_hold(&self, flow: &FlowHandle) -> bool {
        self.conditions.iter().all(|(tag_name, accepted)| {
            match flow.answered_value(tag_name) {
                Some(values) if accepted.is_empty() => values.iter().any(|v| !v.is_empty()),
                Some(values) => values.iter().any(|v| accepted.contains(v)),
                None => false,
            }
        })
    }
}

impl Tag for ChoiceControl {
    fn name(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.name.clone())
    }

    fn id(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.id.clone())
    }

    fn type_name(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.kind.to_string())
    }

    fn label(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.label.clone())
    }

    fn question(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.question.clone().unwrap_or_else(|| self.label.clone()))
    }

    fn value(&self) -> Result<Vec<String>> {
        self.ensure_live()?;
        if self.checked {
            Ok(vec![self.value.clone()])
        } else {
            Ok(vec![String::new()])
        }
    }

    fn required(&self) -> Result<bool> {
        self.ensure_live()?;
        Ok(self.required)
    }

    fn disabled(&self) -> Result<bool> {
        self.ensure_live()?;
        Ok(self.disabled || self.conditionally_disabled)
    }

    fn error_message(&self) -> Result<String> {
        self.ensure_live()?;
        Ok(self.error_message.clone())
    }

    fn active_elements(&self) -> Result<Vec<String>> {
        self.ensure_live()?;
        if self.checked {
            Ok(vec![self.id.clone()])
        } else {
            Ok(Vec::new())
        }
    }

    fn has_conditions(&self) -> Result<bool> {
        self.ensure_live()?;
        Ok(!self.conditions.is_empty())
    }

    fn has_conditions_for(&self, tag_name: &str) -> Result<bool> {
        self.ensure_live()?;
        Ok(self.conditions.contains_key(tag_name))
    }

    fn check_conditional_and_is_valid(&mut self) -> Result<bool> {
        self.ensure_live()?;
        let holds = match &self.flow {
            Some(flow) => self.conditions_hold(flow),
            None => self.conditions.is_empty(),
        };
        self.conditionally_disabled = !holds;
        Ok(holds)
    }

    fn refresh(&mut self) -> Result<()> {
        self.ensure_live()
    }

    fn reset(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.checked = false;
        Ok(())
    }

    fn dealloc(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.event_target = None;
        self.flow = None;
        self.disposed = true;
        Ok(())
    }

    fn apply_answer(&mut self, envelope: &AnswerEnvelope) -> Result<bool> {
        self.ensure_live()?;
        if let Some(reference) = envelope.find(&self.id) {
            let checked = reference.checked;
            self.set_checked(checked)?;
        }
        Ok(!self.required || self.checked)
    }

    fn set_event_target(&mut self, target: EventTarget) -> Result<()> {
        self.ensure_live()?;
        self.event_target = Some(target);
        Ok(())
    }

    fn set_flow(&mut self, flow: FlowHandle) -> Result<()> {
        self.ensure_live()?;
        self.flow = Some(flow);
        Ok(())
    }
}

impl Control for ChoiceControl {
    fn kind(&self) -> ControlKind {
        self.kind.clone()
    }

    fn own_question(&self) -> Option<String> {
        self.question.clone()
    }

    fn raw_value(&self) -> String {
        self.value.clone()
    }

    fn is_checked(&self) -> bool {
        self.checked
    }

    fn set_checked(&mut self, checked: bool) -> Result<()> {
        self.ensure_live()?;
        if self.checked != checked {
            self.checked = checked;
            if let Some(target) = &self.event_target {
                target.dispatch(&TagEvent::CheckedChanged {
                    id: self.id.clone(),
                    checked,
                });
            }
        }
        Ok(())
    }
}
