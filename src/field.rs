//! Form fields: one control or a group of controls behind one interface.

use std::collections::HashMap;

use crate::control::envelope::AnswerEnvelope;
use crate::control::handles::{EventTarget, FlowHandle};
use crate::control::traits::{Control, Tag};
use crate::error::Result;
use crate::group::{ChoiceGroup, Fieldset};

/// A field the orchestration layer asks about.
#[derive(Debug)]
pub enum FormField {
    /// A control that stands alone.
    Single(Box<dyn Control>),
    /// Radio buttons or checkboxes sharing one name.
    Group(ChoiceGroup),
}

impl FormField {
    /// Whether this field is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// The group, if this field is one.
    pub fn as_group(&self) -> Option<&ChoiceGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Single(_) => None,
        }
    }

    fn tag(&self) -> &dyn Tag {
        match self {
            Self::Single(control) => control,
            Self::Group(group) => group,
        }
    }

    fn tag_mut(&mut self) -> &mut dyn Tag {
        match self {
            Self::Single(control) => control,
            Self::Group(group) => group,
        }
    }
}

impl Tag for FormField {
    fn name(&self) -> Result<String> {
        self.tag().name()
    }

    fn id(&self) -> Result<String> {
        self.tag().id()
    }

    fn type_name(&self) -> Result<String> {
        self.tag().type_name()
    }

    fn label(&self) -> Result<String> {
        self.tag().label()
    }

    fn question(&self) -> Result<String> {
        self.tag().question()
    }

    fn value(&self) -> Result<Vec<String>> {
        self.tag().value()
    }

    fn required(&self) -> Result<bool> {
        self.tag().required()
    }

    fn disabled(&self) -> Result<bool> {
        self.tag().disabled()
    }

    fn error_message(&self) -> Result<String> {
        self.tag().error_message()
    }

    fn active_elements(&self) -> Result<Vec<String>> {
        self.tag().active_elements()
    }

    fn has_conditions(&self) -> Result<bool> {
        self.tag().has_conditions()
    }

    fn has_conditions_for(&self, tag_name: &str) -> Result<bool> {
        self.tag().has_conditions_for(tag_name)
    }

    fn check_conditional_and_is_valid(&mut self) -> Result<bool> {
        self.tag_mut().check_conditional_and_is_valid()
    }

    fn refresh(&mut self) -> Result<()> {
        self.tag_mut().refresh()
    }

    fn reset(&mut self) -> Result<()> {
        self.tag_mut().reset()
    }

    fn dealloc(&mut self) -> Result<()> {
        self.tag_mut().dealloc()
    }

    fn apply_answer(&mut self, envelope: &AnswerEnvelope) -> Result<bool> {
        self.tag_mut().apply_answer(envelope)
    }

    fn set_event_target(&mut self, target: EventTarget) -> Result<()> {
        self.tag_mut().set_event_target(target)
    }

    fn set_flow(&mut self, flow: FlowHandle) -> Result<()> {
        self.tag_mut().set_flow(flow)
    }
}

enum Slot {
    Single(Box<dyn Control>),
    Pending {
        name: String,
        members: Vec<Box<dyn Control>>,
    },
}

/// Turn discovered controls into fields.
///
/// Radio buttons and checkboxes sharing a name collapse into one group,
/// placed where the first of them appeared. `fieldset_for` supplies the
/// enclosing fieldset of a group by name. Everything else stays single.
pub fn collect_fields<F>(controls: Vec<Box<dyn Control>>, fieldset_for: F) -> Result<Vec<FormField>>
where
    F: Fn(&str) -> Option<Fieldset>,
{
    let mut slots: Vec<Slot> = Vec::new();
    let mut groups: HashMap<(String, String), usize> = HashMap::new();

    for control in controls {
        let kind = control.kind();
        if !kind.is_groupable() {
            slots.push(Slot::Single(control));
            continue;
        }

        let name = control.name()?;
        let key = (kind.as_str().to_string(), name.clone());
        match groups.get(&key) {
            Some(&position) => {
                if let Slot::Pending { members, .. } = &mut slots[position] {
                    members.push(control);
                }
            }
            None => {
                groups.insert(key, slots.len());
                slots.push(Slot::Pending {
                    name,
                    members: vec![control],
                });
            }
        }
    }

    slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Single(control) => Ok(FormField::Single(control)),
            Slot::Pending { name, members } => {
                ChoiceGroup::new(members, fieldset_for(&name)).map(FormField::Group)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::choice::ChoiceControl;
    use crate::control::kind::ControlKind;
    use crate::error::GroupError;

    fn boxed(control: ChoiceControl) -> Box<dyn Control> {
        Box::new(control)
    }

    fn discovered() -> Vec<Box<dyn Control>> {
        vec![
            boxed(ChoiceControl::new(ControlKind::from("text"), "n", "name", "")),
            boxed(ChoiceControl::radio("s", "size", "s")),
            boxed(ChoiceControl::checkbox("x", "extras", "cheese")),
            boxed(ChoiceControl::radio("m", "size", "m")),
            boxed(ChoiceControl::checkbox("y", "extras", "ham")),
        ]
    }

    #[test]
    fn test_collect_groups_by_name_in_discovery_order() {
        let fields = collect_fields(discovered(), |_| None).unwrap();

        let types: Vec<String> = fields.iter().map(|f| f.type_name().unwrap()).collect();
        assert_eq!(types, vec!["text", "group", "group"]);

        let names: Vec<String> = fields.iter().map(|f| f.name().unwrap()).collect();
        assert_eq!(names, vec!["name", "size", "extras"]);

        let size = fields[1].as_group().unwrap();
        assert_eq!(size.members().unwrap().len(), 2);
    }

    #[test]
    fn test_collect_attaches_fieldset() {
        let fields = collect_fields(discovered(), |name| {
            (name == "size").then(|| Fieldset::new().with_questions("Which size?"))
        })
        .unwrap();

        assert_eq!(fields[1].question().unwrap(), "Which size?");
    }

    #[test]
    fn test_collect_rejects_duplicate_ids() {
        let controls = vec![
            boxed(ChoiceControl::radio("s", "size", "s")),
            boxed(ChoiceControl::radio("s", "size", "m")),
        ];
        let err = collect_fields(controls, |_| None).unwrap_err();
        assert!(matches!(err, GroupError::DuplicateMember { .. }));
    }

    #[test]
    fn test_single_and_group_share_interface() {
        let mut fields = collect_fields(discovered(), |_| None).unwrap();

        let single_valid = fields[0].apply_answer(&AnswerEnvelope::new()).unwrap();
        let group_valid = fields[1]
            .apply_answer(&AnswerEnvelope::new().with_control("m", true))
            .unwrap();

        assert!(single_valid);
        assert!(group_valid);
        assert_eq!(fields[0].value().unwrap(), vec![String::new()]);
        assert_eq!(fields[1].value().unwrap(), vec!["m"]);
        assert!(!fields[0].is_group());
        assert!(fields[1].is_group());
    }

    #[test]
    fn test_dealloc_through_field() {
        let mut fields = collect_fields(discovered(), |_| None).unwrap();
        for field in &mut fields {
            field.dealloc().unwrap();
        }
        assert!(matches!(fields[1].value(), Err(GroupError::Disposed)));
        assert!(matches!(fields[0].value(), Err(GroupError::Disposed)));
    }
}
