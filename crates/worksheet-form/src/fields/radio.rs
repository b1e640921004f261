use super::{ChoiceSlots, ChoiceStrategy, FieldDescriptor, FieldName, RadioOption};
use crate::config::{LayoutConfig, RadioValues};
use crate::types::ChoiceStyle;

/// One radio group per row with an option per column.
///
/// Both options start unselected; an empty group is the pending state.
#[derive(Debug, Clone)]
pub struct RadioGroup {
    values: RadioValues,
}

impl RadioGroup {
    pub fn new(values: RadioValues) -> Self {
        Self { values }
    }
}

impl ChoiceStrategy for RadioGroup {
    fn style(&self) -> ChoiceStyle {
        ChoiceStyle::Radio
    }

    fn choice_fields(&self, slots: &ChoiceSlots, config: &LayoutConfig) -> Vec<FieldDescriptor> {
        let columns = &config.settings().columns;
        let group = FieldName::Status(slots.item_index);
        vec![
            FieldDescriptor::Radio(RadioOption {
                group,
                page: slots.page,
                rect: slots.uploaded,
                caption: columns.uploaded_label.clone(),
                export_value: self.values.uploaded.clone(),
                selected: false,
            }),
            FieldDescriptor::Radio(RadioOption {
                group,
                page: slots.page,
                rect: slots.not_needed,
                caption: columns.not_needed_label.clone(),
                export_value: self.values.not_needed.clone(),
                selected: false,
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use crate::fields::FieldSynthesizer;
    use crate::planner::plan;
    use crate::types::Item;

    #[test]
    fn options_share_group_with_distinct_values() {
        let mut settings = LayoutSettings::default();
        settings.choice_style = ChoiceStyle::Radio;
        let config = LayoutConfig::new(settings).unwrap();
        let placement = plan(6, &config).unwrap()[5];
        let item = Item {
            index: 5,
            display_text: "Please upload your W-2".to_string(),
        };

        let fields = FieldSynthesizer::new(&config)
            .unwrap()
            .synthesize(&item, &placement, &config)
            .unwrap();
        assert_eq!(fields.len(), 3);

        let options: Vec<&RadioOption> = fields
            .iter()
            .filter_map(|f| match f {
                FieldDescriptor::Radio(option) => Some(option),
                _ => None,
            })
            .collect();
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|o| o.group == FieldName::Status(5)));
        assert_eq!(options[0].export_value, "uploaded");
        assert_eq!(options[1].export_value, "not_needed");
        assert!(options.iter().all(|o| !o.selected));
        assert_ne!(fields[1].qualified_name(), fields[2].qualified_name());
    }
}
