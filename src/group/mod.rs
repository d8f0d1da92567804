//! Choice groups.
//!
//! A group aggregates radio buttons (exclusive choice) or checkboxes (multi
//! choice) that share one name into a single field with one value and one
//! validity verdict.

pub mod engine;
pub mod fieldset;
pub mod picker;
pub mod policy;

pub use engine::{ChoiceGroup, GROUP_TYPE};
pub use fieldset::{Fieldset, QUESTIONS_ATTRIBUTE};
pub use picker::{QuestionPicker, RandomPicker, SeededPicker};
pub use policy::{ErrorMessagePolicy, TieBreak};
