//! Form field synthesis
//!
//! Every item row gets one note text field and one choice construct. The
//! choice construct is produced by a [`ChoiceStrategy`] picked once per
//! document from the configured [`ChoiceStyle`]:
//! - [`CheckboxPair`]: two independent checkboxes
//! - [`RadioGroup`]: two options of one radio group
//!
//! Field names come from the item's global index, so they stay unique across
//! page breaks.

mod checkbox;
mod radio;

pub use checkbox::CheckboxPair;
pub use radio::RadioGroup;

use crate::config::LayoutConfig;
use crate::planner::RowPlacement;
use crate::types::*;
use std::fmt;

/// Typed field name, one variant per role in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Note(usize),
    Uploaded(usize),
    NotNeeded(usize),
    /// Radio group shared by both options of an item
    Status(usize),
}

impl FieldName {
    pub fn item_index(self) -> usize {
        match self {
            FieldName::Note(i)
            | FieldName::Uploaded(i)
            | FieldName::NotNeeded(i)
            | FieldName::Status(i) => i,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Note(i) => write!(f, "note_{}", i),
            FieldName::Uploaded(i) => write!(f, "uploaded_{}", i),
            FieldName::NotNeeded(i) => write!(f, "notneeded_{}", i),
            FieldName::Status(i) => write!(f, "status_{}", i),
        }
    }
}

/// Widget rectangle in points, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FieldRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Square of side `size` with its left edge at `x`, centred on `center_y`
    pub fn centered_square(x: f32, center_y: f32, size: f32) -> Self {
        Self {
            x,
            y: center_y - size / 2.0,
            width: size,
            height: size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub name: FieldName,
    pub page: usize,
    pub rect: FieldRect,
    /// Full prompt, shown by viewers as the field tooltip
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxField {
    pub name: FieldName,
    pub page: usize,
    pub rect: FieldRect,
    pub caption: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadioOption {
    pub group: FieldName,
    pub page: usize,
    pub rect: FieldRect,
    pub caption: String,
    pub export_value: String,
    pub selected: bool,
}

/// One interactive widget to embed in a page
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDescriptor {
    Text(TextField),
    Checkbox(CheckboxField),
    Radio(RadioOption),
}

impl FieldDescriptor {
    pub fn page(&self) -> usize {
        match self {
            FieldDescriptor::Text(f) => f.page,
            FieldDescriptor::Checkbox(f) => f.page,
            FieldDescriptor::Radio(f) => f.page,
        }
    }

    pub fn rect(&self) -> &FieldRect {
        match self {
            FieldDescriptor::Text(f) => &f.rect,
            FieldDescriptor::Checkbox(f) => &f.rect,
            FieldDescriptor::Radio(f) => &f.rect,
        }
    }

    /// Name of the form field this widget belongs to
    pub fn field_name(&self) -> FieldName {
        match self {
            FieldDescriptor::Text(f) => f.name,
            FieldDescriptor::Checkbox(f) => f.name,
            FieldDescriptor::Radio(f) => f.group,
        }
    }

    /// Document-wide unique identifier of this widget.
    ///
    /// Radio options share their group name and are told apart by export value.
    pub fn qualified_name(&self) -> String {
        match self {
            FieldDescriptor::Radio(f) => format!("{}.{}", f.group, f.export_value),
            other => other.field_name().to_string(),
        }
    }

    /// Whether a choice widget starts out ticked. Text fields never are.
    pub fn is_selected(&self) -> bool {
        match self {
            FieldDescriptor::Text(_) => false,
            FieldDescriptor::Checkbox(f) => f.checked,
            FieldDescriptor::Radio(f) => f.selected,
        }
    }
}

/// Placement of the two choice widgets of one row
#[derive(Debug, Clone, Copy)]
pub struct ChoiceSlots {
    pub item_index: usize,
    pub page: usize,
    pub uploaded: FieldRect,
    pub not_needed: FieldRect,
}

/// Encodes the Uploaded / Not Needed / pending choice of a row
pub trait ChoiceStrategy: fmt::Debug + Send + Sync {
    fn style(&self) -> ChoiceStyle;

    /// Emit the unselected choice widgets for one row
    fn choice_fields(&self, slots: &ChoiceSlots, config: &LayoutConfig) -> Vec<FieldDescriptor>;
}

/// Produces the field descriptors of each row
#[derive(Debug)]
pub struct FieldSynthesizer {
    strategy: Box<dyn ChoiceStrategy>,
}

impl FieldSynthesizer {
    /// Select the choice strategy for the configured style
    pub fn new(config: &LayoutConfig) -> Result<Self> {
        let strategy: Box<dyn ChoiceStrategy> = match config.choice_style() {
            ChoiceStyle::Checkbox => Box::new(CheckboxPair),
            ChoiceStyle::Radio => {
                let values = config.radio_values().ok_or_else(|| {
                    WorksheetError::Config("Radio choice style requires radio_values".to_string())
                })?;
                Box::new(RadioGroup::new(values.clone()))
            }
        };
        log::debug!("Using {} choice widgets", strategy.style().name());
        Ok(Self { strategy })
    }

    pub fn style(&self) -> ChoiceStyle {
        self.strategy.style()
    }

    /// Fields for one item at its planned placement
    pub fn synthesize(
        &self,
        item: &Item,
        placement: &RowPlacement,
        config: &LayoutConfig,
    ) -> Result<Vec<FieldDescriptor>> {
        if item.index != placement.item_index {
            return Err(WorksheetError::Render(format!(
                "Item {} was given the placement of item {}",
                item.index, placement.item_index
            )));
        }

        let row = &config.settings().row;
        let center_y = placement.center_y(row.row_height);

        let note = FieldDescriptor::Text(TextField {
            name: FieldName::Note(item.index),
            page: placement.page,
            rect: FieldRect {
                x: config.text_field_x(),
                y: center_y - row.text_field_height / 2.0,
                width: row.text_field_width,
                height: row.text_field_height,
            },
            tooltip: item.display_text.clone(),
        });

        let slots = ChoiceSlots {
            item_index: item.index,
            page: placement.page,
            uploaded: FieldRect::centered_square(config.uploaded_x(), center_y, row.choice_size),
            not_needed: FieldRect::centered_square(config.not_needed_x(), center_y, row.choice_size),
        };

        let mut fields = vec![note];
        fields.extend(self.strategy.choice_fields(&slots, config));
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;
    use crate::planner::plan;

    fn config(style: ChoiceStyle) -> LayoutConfig {
        let mut settings = LayoutSettings::default();
        settings.choice_style = style;
        LayoutConfig::new(settings).unwrap()
    }

    fn item(index: usize) -> Item {
        Item {
            index,
            display_text: format!("Please upload your form {}", index),
        }
    }

    #[test]
    fn names_follow_global_index() {
        assert_eq!(FieldName::Note(7).to_string(), "note_7");
        assert_eq!(FieldName::Uploaded(7).to_string(), "uploaded_7");
        assert_eq!(FieldName::NotNeeded(7).to_string(), "notneeded_7");
        assert_eq!(FieldName::Status(7).to_string(), "status_7");
        assert_eq!(FieldName::Status(7).item_index(), 7);
    }

    #[test]
    fn checkbox_row_has_three_unchecked_fields() {
        let config = config(ChoiceStyle::Checkbox);
        let placement = plan(1, &config).unwrap()[0];
        let fields = FieldSynthesizer::new(&config)
            .unwrap()
            .synthesize(&item(0), &placement, &config)
            .unwrap();

        assert_eq!(fields.len(), 3);
        assert!(matches!(fields[0], FieldDescriptor::Text(_)));
        assert!(fields[1..].iter().all(|f| matches!(f, FieldDescriptor::Checkbox(_))));
        assert!(fields.iter().all(|f| !f.is_selected()));
    }

    #[test]
    fn widgets_are_centred_on_the_row() {
        let config = config(ChoiceStyle::Checkbox);
        let placement = plan(1, &config).unwrap()[0];
        let center = placement.center_y(config.row_height());
        let fields = FieldSynthesizer::new(&config)
            .unwrap()
            .synthesize(&item(0), &placement, &config)
            .unwrap();

        for field in &fields {
            let rect = field.rect();
            assert!((rect.y + rect.height / 2.0 - center).abs() < 0.01);
        }
        assert_eq!(fields[0].rect().x, 36.0 + 250.0);
        assert_eq!(fields[1].rect().x, 490.0);
        assert_eq!(fields[2].rect().x, 562.0);
    }

    #[test]
    fn mismatched_placement_is_a_render_error() {
        let config = config(ChoiceStyle::Checkbox);
        let placement = plan(2, &config).unwrap()[1];
        let result = FieldSynthesizer::new(&config)
            .unwrap()
            .synthesize(&item(0), &placement, &config);
        assert!(matches!(result, Err(WorksheetError::Render(_))));
    }
}
