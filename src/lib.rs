//! Formgroup - choice grouping for conversational forms
//!
//! Radio buttons and checkboxes that share a name are collapsed into one
//! virtual field. The group computes one value, one validity verdict and
//! aggregate required/disabled flags, and exposes them through the same
//! [`Tag`] interface a lone control answers, so the surrounding form flow
//! never needs to tell the two apart.

pub mod config;
pub mod control;
pub mod error;
pub mod field;
pub mod group;
pub mod lookup;

pub use config::Config;
pub use control::{
    AnswerEnvelope, ChoiceControl, Control, ControlKind, ControlRef, EventDispatcher,
    EventTarget, FlowControl, FlowHandle, GroupKind, Tag, TagEvent,
};
pub use error::{GroupError, Result};
pub use field::{collect_fields, FormField};
pub use group::{
    ChoiceGroup, ErrorMessagePolicy, Fieldset, QuestionPicker, RandomPicker, SeededPicker,
    TieBreak, GROUP_TYPE, QUESTIONS_ATTRIBUTE,
};
pub use lookup::{Dictionary, ResponseLookup, INPUT_ERROR_KEY};
