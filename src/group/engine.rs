//! The group engine.
//!
//! A `ChoiceGroup` collapses radio buttons or checkboxes that share one name
//! into a single field. It answers the same [`Tag`] interface a lone control
//! does, so the orchestration layer treats both alike.
//!
//! Aggregation is a full recompute on every answer: the envelope is resolved
//! against the member id map first, and only when every reference resolves
//! (and the exclusive tie-break accepts the selection) is the previous
//! aggregate replaced.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::config;
use crate::control::envelope::AnswerEnvelope;
use crate::control::handles::{EventTarget, FlowHandle, TagEvent};
use crate::control::kind::GroupKind;
use crate::control::traits::{Control, Tag};
use crate::error::{GroupError, Result};
use crate::group::fieldset::Fieldset;
use crate::group::picker::{QuestionPicker, RandomPicker};
use crate::group::policy::{ErrorMessagePolicy, TieBreak};
use crate::lookup::{Dictionary, ResponseLookup};

/// Type reported by every group.
pub const GROUP_TYPE: &str = "group";

/// A set of choice controls acting as one field.
pub struct ChoiceGroup {
    /// `None` once disposed.
    members: Option<Vec<Box<dyn Control>>>,
    /// Member ids, index-aligned with `members`.
    ids: Vec<String>,
    /// Member id → position in `members`.
    index: HashMap<String, usize>,
    kind: GroupKind,
    /// Positions of the selected members.
    active: Vec<usize>,
    /// Values of the selected members, index-aligned with `active`.
    values: Vec<String>,
    questions: Vec<String>,
    fieldset: Option<Fieldset>,
    lookup: Rc<dyn ResponseLookup>,
    picker: Box<dyn QuestionPicker>,
    tie_break: TieBreak,
    error_policy: ErrorMessagePolicy,
    event_target: Option<EventTarget>,
}

impl ChoiceGroup {
    /// Create a group over `members`.
    ///
    /// Members must be non-empty, all of one groupable kind, and carry
    /// distinct ids. Policies and the dictionary come from the global
    /// configuration.
    pub fn new(members: Vec<Box<dyn Control>>, fieldset: Option<Fieldset>) -> Result<Self> {
        let first = members.first().ok_or(GroupError::EmptyGroup)?;
        let first_kind = first.kind();
        let kind = GroupKind::try_from(&first_kind)?;

        let mut ids = Vec::with_capacity(members.len());
        let mut index = HashMap::with_capacity(members.len());
        for (position, member) in members.iter().enumerate() {
            let id = member.id()?;
            let member_kind = member.kind();
            if member_kind != first_kind {
                return Err(GroupError::mixed_kinds(
                    first_kind.as_str(),
                    member_kind.as_str(),
                    id,
                ));
            }
            if index.insert(id.clone(), position).is_some() {
                return Err(GroupError::duplicate_member(id));
            }
            ids.push(id);
        }

        let questions = fieldset.as_ref().map(Fieldset::questions).unwrap_or_default();

        let settings = config::global();
        let group = Self {
            members: Some(members),
            ids,
            index,
            kind,
            active: Vec::new(),
            values: Vec::new(),
            questions,
            fieldset,
            lookup: Rc::new(Dictionary::from_config(&settings.dictionary)),
            picker: Box::new(RandomPicker),
            tie_break: settings.group.exclusive_tie_break,
            error_policy: settings.group.error_message,
            event_target: None,
        };

        if settings.flow.illustrate {
            tracing::info!(
                kind = %group.kind,
                name = %group.name().unwrap_or_default(),
                members = group.ids.len(),
                "group registered"
            );
        }

        Ok(group)
    }

    /// Replace the random source used for question selection.
    pub fn with_picker(mut self, picker: impl QuestionPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    /// Replace the response lookup service.
    pub fn with_lookup(mut self, lookup: Rc<dyn ResponseLookup>) -> Self {
        self.lookup = lookup;
        self
    }

    /// Override the exclusive tie-break.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Override the error message policy.
    pub fn with_error_policy(mut self, policy: ErrorMessagePolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Aggregation semantics, taken from the first member.
    pub fn group_kind(&self) -> Result<GroupKind> {
        self.live()?;
        Ok(self.kind)
    }

    /// Members in discovery order.
    pub fn members(&self) -> Result<&[Box<dyn Control>]> {
        Ok(self.live()?.as_slice())
    }

    /// Members selected by the last answer, in envelope order.
    pub fn active_members(&self) -> Result<Vec<&dyn Control>> {
        let members = self.live()?;
        Ok(self.active.iter().map(|&i| members[i].as_ref()).collect())
    }

    /// Whether `dealloc` has run.
    pub fn is_disposed(&self) -> bool {
        self.members.is_none()
    }

    fn live(&self) -> Result<&Vec<Box<dyn Control>>> {
        self.members.as_ref().ok_or(GroupError::Disposed)
    }

    fn live_mut(&mut self) -> Result<&mut Vec<Box<dyn Control>>> {
        self.members.as_mut().ok_or(GroupError::Disposed)
    }

    /// Resolve every reference to a member position before touching state.
    ///
    /// A member referenced more than once keeps the place of its first
    /// reference and the checked state of its last.
    fn resolve(&self, envelope: &AnswerEnvelope) -> Result<Vec<(usize, bool)>> {
        let mut resolved: Vec<(usize, bool)> = Vec::with_capacity(envelope.controls.len());
        let mut slots: HashMap<usize, usize> = HashMap::new();

        for reference in &envelope.controls {
            let position = *self
                .index
                .get(&reference.id)
                .ok_or_else(|| GroupError::unknown_member(&reference.id))?;
            match slots.get(&position) {
                Some(&slot) => {
                    tracing::debug!(id = %reference.id, "member referenced twice in one answer");
                    resolved[slot].1 = reference.checked;
                }
                None => {
                    slots.insert(position, resolved.len());
                    resolved.push((position, reference.checked));
                }
            }
        }

        Ok(resolved)
    }

    /// Reduce the checked positions of an exclusive answer to at most one.
    fn settle_exclusive(&self, checked: Vec<usize>) -> Result<Vec<usize>> {
        if checked.len() <= 1 {
            return Ok(checked);
        }

        let ids: Vec<&str> = checked.iter().map(|&i| self.ids[i].as_str()).collect();
        let kept = match self.tie_break {
            TieBreak::Reject => return Err(GroupError::ambiguous_selection(ids)),
            TieBreak::First => checked[0],
            TieBreak::Last => checked[checked.len() - 1],
        };
        tracing::warn!(
            checked = ?ids,
            kept = %self.ids[kept],
            tie_break = %self.tie_break,
            "exclusive group answered with several choices"
        );
        Ok(vec![kept])
    }
}

impl fmt::Debug for ChoiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChoiceGroup")
            .field("kind", &self.kind)
            .field("ids", &self.ids)
            .field("active", &self.active)
            .field("values", &self.values)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

impl Tag for ChoiceGroup {
    fn name(&self) -> Result<String> {
        let members = self.live()?;
        match self.fieldset.as_ref().and_then(Fieldset::non_empty_name) {
            Some(name) => Ok(name.to_string()),
            None => members[0].name(),
        }
    }

    fn id(&self) -> Result<String> {
        let members = self.live()?;
        match self.fieldset.as_ref().and_then(Fieldset::non_empty_id) {
            Some(id) => Ok(id.to_string()),
            None => members[0].id(),
        }
    }

    fn type_name(&self) -> Result<String> {
        self.live()?;
        Ok(GROUP_TYPE.to_string())
    }

    fn label(&self) -> Result<String> {
        self.live()?;
        Ok(String::new())
    }

    fn question(&self) -> Result<String> {
        let members = self.live()?;
        if !self.questions.is_empty() {
            let choice = self.picker.pick(self.questions.len()) % self.questions.len();
            return Ok(self.questions[choice].clone());
        }
        if let Some(question) = members[0].own_question() {
            return Ok(question);
        }
        Ok(self.lookup.fallback_question(self.kind))
    }

    fn value(&self) -> Result<Vec<String>> {
        self.live()?;
        if self.values.is_empty() {
            Ok(vec![String::new()])
        } else {
            Ok(self.values.clone())
        }
    }

    fn required(&self) -> Result<bool> {
        for member in self.live()? {
            if member.required()? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn disabled(&self) -> Result<bool> {
        for member in self.live()? {
            if !member.disabled()? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn error_message(&self) -> Result<String> {
        let mut messages = Vec::new();
        for member in self.live()? {
            messages.push(member.error_message()?);
        }
        Ok(self
            .error_policy
            .combine(messages)
            .unwrap_or_else(|| self.lookup.input_error()))
    }

    fn active_elements(&self) -> Result<Vec<String>> {
        self.live()?;
        Ok(self.active.iter().map(|&i| self.ids[i].clone()).collect())
    }

    fn has_conditions(&self) -> Result<bool> {
        for member in self.live()? {
            if member.has_conditions()? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn has_conditions_for(&self, tag_name: &str) -> Result<bool> {
        for member in self.live()? {
            if member.has_conditions_for(tag_name)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn check_conditional_and_is_valid(&mut self) -> Result<bool> {
        for member in self.live_mut()? {
            member.check_conditional_and_is_valid()?;
        }
        Ok(true)
    }

    fn refresh(&mut self) -> Result<()> {
        for member in self.live_mut()? {
            member.refresh()?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        let members = self.members.as_mut().ok_or(GroupError::Disposed)?;
        self.active.clear();
        self.values.clear();
        for member in members {
            member.reset()?;
        }
        Ok(())
    }

    fn dealloc(&mut self) -> Result<()> {
        let members = self.members.take().ok_or(GroupError::Disposed)?;
        self.active.clear();
        self.values.clear();
        self.index.clear();
        self.event_target = None;

        // Every member is disposed even if an earlier one fails.
        let mut first_error = None;
        for mut member in members {
            if let Err(err) = member.dealloc() {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn apply_answer(&mut self, envelope: &AnswerEnvelope) -> Result<bool> {
        self.live()?;
        let resolved = self.resolve(envelope)?;

        let (selected, valid) = match self.kind {
            GroupKind::Exclusive => {
                let checked: Vec<usize> = resolved
                    .iter()
                    .filter(|(_, checked)| *checked)
                    .map(|&(position, _)| position)
                    .collect();
                let valid = !checked.is_empty();
                (self.settle_exclusive(checked)?, valid)
            }
            GroupKind::Multi => {
                let members = self.members.as_mut().ok_or(GroupError::Disposed)?;
                let mut selected = Vec::new();
                for &(position, checked) in &resolved {
                    // Members before the failing one are already synchronised,
                    // so the previous aggregate no longer describes them.
                    if let Err(err) = members[position].set_checked(checked) {
                        tracing::warn!(
                            id = %self.ids[position],
                            error = %err,
                            "member rejected checked state, answer cleared"
                        );
                        self.active.clear();
                        self.values.clear();
                        return Err(err);
                    }
                    if checked {
                        selected.push(position);
                    }
                }
                (selected, true)
            }
        };

        let members = self.live()?;
        let values: Vec<String> = selected.iter().map(|&i| members[i].raw_value()).collect();
        self.active = selected;
        self.values = values;

        tracing::debug!(
            kind = %self.kind,
            valid,
            active = self.active.len(),
            "group answer applied"
        );

        if let Some(target) = &self.event_target {
            target.dispatch(&TagEvent::GroupAnswered {
                name: self.name()?,
                valid,
                values: self.values.clone(),
            });
        }

        Ok(valid)
    }

    fn set_event_target(&mut self, target: EventTarget) -> Result<()> {
        for member in self.live_mut()? {
            member.set_event_target(target.clone())?;
        }
        self.event_target = Some(target);
        Ok(())
    }

    fn set_flow(&mut self, flow: FlowHandle) -> Result<()> {
        for member in self.live_mut()? {
            member.set_flow(flow.clone())?;
        }
        Ok(())
    }
}
