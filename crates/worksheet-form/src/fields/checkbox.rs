use super::{CheckboxField, ChoiceSlots, ChoiceStrategy, FieldDescriptor, FieldName};
use crate::config::LayoutConfig;
use crate::types::ChoiceStyle;

/// Two independent checkboxes per row. Ticking both, or neither, is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxPair;

impl ChoiceStrategy for CheckboxPair {
    fn style(&self) -> ChoiceStyle {
        ChoiceStyle::Checkbox
    }

    fn choice_fields(&self, slots: &ChoiceSlots, config: &LayoutConfig) -> Vec<FieldDescriptor> {
        let columns = &config.settings().columns;
        vec![
            FieldDescriptor::Checkbox(CheckboxField {
                name: FieldName::Uploaded(slots.item_index),
                page: slots.page,
                rect: slots.uploaded,
                caption: columns.uploaded_label.clone(),
                checked: false,
            }),
            FieldDescriptor::Checkbox(CheckboxField {
                name: FieldName::NotNeeded(slots.item_index),
                page: slots.page,
                rect: slots.not_needed,
                caption: columns.not_needed_label.clone(),
                checked: false,
            }),
        ]
    }
}
