//! AcroForm widget objects
//!
//! Builds the field and widget annotation dictionaries for a page, together
//! with their appearance streams. Appearances depend only on widget size, so
//! each distinct size is written once and shared.

use crate::constants::{
    ANNOT_FLAG_PRINT, BEZIER_CIRCLE_FACTOR, CHECK_GLYPH, FF_NO_TOGGLE_TO_OFF, FF_RADIO,
    RADIO_GLYPH, WIDGET_BORDER_WIDTH,
};
use crate::fields::{CheckboxField, FieldDescriptor, FieldName, FieldRect, RadioOption, TextField};
use crate::types::*;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::collections::HashMap;

use super::ops::{Rgb, WHITE, text_string};

/// Resource name of the font used for field text
pub const FIELD_FONT: &str = "Helv";

/// Resource name of the ZapfDingbats font used for check marks
pub const SYMBOL_FONT: &str = "ZaDb";

/// Objects a page contributes to the form
#[derive(Debug, Default)]
pub struct PageWidgets {
    /// Widget annotations for the page's `/Annots`
    pub annots: Vec<Object>,
    /// Terminal and parent fields for the catalog's `/AcroForm /Fields`
    pub fields: Vec<Object>,
}

/// Radio group field collecting its option widgets
struct RadioParent {
    group: FieldName,
    id: ObjectId,
    kids: Vec<Object>,
    /// Export value of the selected option, if any
    value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AppearanceKey {
    TextBox { width: u32, height: u32 },
    CheckOn(u32),
    CheckOff(u32),
    RadioOn(u32),
    RadioOff(u32),
}

pub struct WidgetWriter<'a> {
    doc: &'a mut Document,
    symbol_font_id: ObjectId,
    border: Rgb,
    text_size: f32,
    appearance_cache: HashMap<AppearanceKey, ObjectId>,
}

impl<'a> WidgetWriter<'a> {
    pub fn new(doc: &'a mut Document, symbol_font_id: ObjectId, border: Rgb, text_size: f32) -> Self {
        Self {
            doc,
            symbol_font_id,
            border,
            text_size,
            appearance_cache: HashMap::new(),
        }
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.doc.new_object_id()
    }

    /// Write every widget of one page
    pub fn add_page_fields(
        &mut self,
        page_id: ObjectId,
        fields: &[FieldDescriptor],
    ) -> Result<PageWidgets> {
        let mut widgets = PageWidgets::default();
        let mut radio_groups: Vec<RadioParent> = Vec::new();

        for field in fields {
            match field {
                FieldDescriptor::Text(text) => {
                    let id = self.add_text_field(page_id, text)?;
                    widgets.annots.push(id.into());
                    widgets.fields.push(id.into());
                }
                FieldDescriptor::Checkbox(checkbox) => {
                    let id = self.add_checkbox(page_id, checkbox)?;
                    widgets.annots.push(id.into());
                    widgets.fields.push(id.into());
                }
                FieldDescriptor::Radio(option) => {
                    let pos = match radio_groups.iter().position(|p| p.group == option.group) {
                        Some(pos) => pos,
                        None => {
                            radio_groups.push(RadioParent {
                                group: option.group,
                                id: self.doc.new_object_id(),
                                kids: Vec::new(),
                                value: None,
                            });
                            radio_groups.len() - 1
                        }
                    };
                    let parent = &mut radio_groups[pos];
                    let kid_id = self.add_radio_option(page_id, parent.id, option)?;
                    widgets.annots.push(kid_id.into());
                    parent.kids.push(kid_id.into());
                    if option.selected {
                        parent.value = Some(option.export_value.clone());
                    }
                }
            }
        }

        for parent in radio_groups {
            let value = parent.value.unwrap_or_else(|| "Off".to_string());
            let dict = dictionary! {
                "FT" => "Btn",
                "Ff" => FF_RADIO | FF_NO_TOGGLE_TO_OFF,
                "T" => Object::string_literal(parent.group.to_string()),
                "V" => Object::Name(value.into_bytes()),
                "Kids" => parent.kids,
            };
            self.doc.objects.insert(parent.id, Object::Dictionary(dict));
            widgets.fields.push(parent.id.into());
        }

        Ok(widgets)
    }

    fn add_text_field(&mut self, page_id: ObjectId, field: &TextField) -> Result<ObjectId> {
        let appearance = self.text_box_appearance(&field.rect)?;
        let mut dict = self.widget_base(page_id, &field.rect);
        dict.set("FT", "Tx");
        dict.set("T", Object::string_literal(field.name.to_string()));
        dict.set("TU", text_string(&field.tooltip));
        dict.set("V", Object::string_literal(""));
        dict.set(
            "DA",
            Object::string_literal(format!("/{} {} Tf 0 g", FIELD_FONT, self.text_size)),
        );
        dict.set("BS", dictionary! { "W" => WIDGET_BORDER_WIDTH, "S" => "I" });
        dict.set("MK", self.appearance_characteristics(None));
        dict.set("AP", dictionary! { "N" => appearance });
        Ok(self.doc.add_object(dict))
    }

    fn add_checkbox(&mut self, page_id: ObjectId, field: &CheckboxField) -> Result<ObjectId> {
        let size = field.rect.width;
        let on = self.cached(AppearanceKey::CheckOn(size.to_bits()), |w| w.check_appearance(size, true))?;
        let off = self.cached(AppearanceKey::CheckOff(size.to_bits()), |w| w.check_appearance(size, false))?;

        let state = if field.checked { "Yes" } else { "Off" };
        let mut dict = self.widget_base(page_id, &field.rect);
        dict.set("FT", "Btn");
        dict.set("T", Object::string_literal(field.name.to_string()));
        dict.set("TU", text_string(&field.caption));
        dict.set("V", state);
        dict.set("AS", state);
        dict.set("DA", Object::string_literal(format!("/{} 0 Tf 0 g", SYMBOL_FONT)));
        dict.set("BS", dictionary! { "W" => WIDGET_BORDER_WIDTH, "S" => "S" });
        dict.set("MK", self.appearance_characteristics(Some(CHECK_GLYPH)));
        dict.set("AP", dictionary! { "N" => dictionary! { "Yes" => on, "Off" => off } });
        Ok(self.doc.add_object(dict))
    }

    fn add_radio_option(
        &mut self,
        page_id: ObjectId,
        parent_id: ObjectId,
        option: &RadioOption,
    ) -> Result<ObjectId> {
        let size = option.rect.width;
        let on = self.cached(AppearanceKey::RadioOn(size.to_bits()), |w| w.radio_appearance(size, true))?;
        let off = self.cached(AppearanceKey::RadioOff(size.to_bits()), |w| w.radio_appearance(size, false))?;

        let mut states = Dictionary::new();
        states.set(option.export_value.as_bytes(), on);
        states.set("Off", off);

        let state = if option.selected {
            option.export_value.as_str()
        } else {
            "Off"
        };
        let mut dict = self.widget_base(page_id, &option.rect);
        dict.set("Parent", parent_id);
        dict.set("TU", text_string(&option.caption));
        dict.set("AS", Object::Name(state.as_bytes().to_vec()));
        dict.set("DA", Object::string_literal(format!("/{} 0 Tf 0 g", SYMBOL_FONT)));
        dict.set("BS", dictionary! { "W" => WIDGET_BORDER_WIDTH, "S" => "S" });
        dict.set("MK", self.appearance_characteristics(Some(RADIO_GLYPH)));
        dict.set("AP", dictionary! { "N" => states });
        Ok(self.doc.add_object(dict))
    }

    /// Entries shared by every widget annotation
    fn widget_base(&self, page_id: ObjectId, rect: &FieldRect) -> Dictionary {
        dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "Rect" => reals(&[rect.x, rect.y, rect.right(), rect.top()]),
            "P" => page_id,
            "F" => ANNOT_FLAG_PRINT,
        }
    }

    fn appearance_characteristics(&self, caption: Option<&str>) -> Dictionary {
        let mut mk = dictionary! {
            "BC" => reals(&self.border),
            "BG" => reals(&WHITE),
        };
        if let Some(caption) = caption {
            mk.set("CA", Object::string_literal(caption));
        }
        mk
    }

    fn cached(
        &mut self,
        key: AppearanceKey,
        build: impl FnOnce(&mut Self) -> Result<ObjectId>,
    ) -> Result<ObjectId> {
        if let Some(id) = self.appearance_cache.get(&key) {
            return Ok(*id);
        }
        let id = build(self)?;
        self.appearance_cache.insert(key, id);
        Ok(id)
    }

    fn text_box_appearance(&mut self, rect: &FieldRect) -> Result<ObjectId> {
        let (width, height) = (rect.width, rect.height);
        let key = AppearanceKey::TextBox {
            width: width.to_bits(),
            height: height.to_bits(),
        };
        self.cached(key, |w| {
            let mut ops = w.box_ops(width, height);
            ops.push(Operation::new("BMC", vec![Object::Name(b"Tx".to_vec())]));
            ops.push(Operation::new("EMC", vec![]));
            w.form_xobject(width, height, ops, None)
        })
    }

    fn check_appearance(&mut self, size: f32, on: bool) -> Result<ObjectId> {
        let mut ops = self.box_ops(size, size);
        let mut resources = None;
        if on {
            let glyph_size = size * 0.8;
            ops.extend([
                Operation::new("BT", vec![]),
                Operation::new("rg", reals(&[0.0, 0.0, 0.0])),
                Operation::new(
                    "Tf",
                    vec![Object::Name(SYMBOL_FONT.as_bytes().to_vec()), glyph_size.into()],
                ),
                Operation::new("Td", reals(&[size * 0.15, size * 0.22])),
                Operation::new("Tj", vec![Object::string_literal(CHECK_GLYPH)]),
                Operation::new("ET", vec![]),
            ]);
            let mut fonts = Dictionary::new();
            fonts.set(SYMBOL_FONT, self.symbol_font_id);
            resources = Some(dictionary! { "Font" => fonts });
        }
        self.form_xobject(size, size, ops, resources)
    }

    fn radio_appearance(&mut self, size: f32, on: bool) -> Result<ObjectId> {
        let center = size / 2.0;
        let radius = center - WIDGET_BORDER_WIDTH / 2.0;

        let mut ops = vec![
            Operation::new("q", vec![]),
            Operation::new("rg", reals(&WHITE)),
            Operation::new("RG", reals(&self.border)),
            Operation::new("w", vec![WIDGET_BORDER_WIDTH.into()]),
        ];
        ops.extend(circle_ops(center, center, radius));
        ops.push(Operation::new("B", vec![]));
        if on {
            ops.push(Operation::new("rg", reals(&[0.0, 0.0, 0.0])));
            ops.extend(circle_ops(center, center, radius * 0.45));
            ops.push(Operation::new("f", vec![]));
        }
        ops.push(Operation::new("Q", vec![]));
        self.form_xobject(size, size, ops, None)
    }

    /// White background with an inset border
    fn box_ops(&self, width: f32, height: f32) -> Vec<Operation> {
        let inset = WIDGET_BORDER_WIDTH / 2.0;
        vec![
            Operation::new("q", vec![]),
            Operation::new("rg", reals(&WHITE)),
            Operation::new("re", reals(&[0.0, 0.0, width, height])),
            Operation::new("f", vec![]),
            Operation::new("RG", reals(&self.border)),
            Operation::new("w", vec![WIDGET_BORDER_WIDTH.into()]),
            Operation::new(
                "re",
                reals(&[inset, inset, width - WIDGET_BORDER_WIDTH, height - WIDGET_BORDER_WIDTH]),
            ),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]
    }

    fn form_xobject(
        &mut self,
        width: f32,
        height: f32,
        operations: Vec<Operation>,
        resources: Option<Dictionary>,
    ) -> Result<ObjectId> {
        let mut dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "BBox" => reals(&[0.0, 0.0, width, height]),
        };
        if let Some(resources) = resources {
            dict.set("Resources", resources);
        }
        let content = Content { operations }.encode()?;
        Ok(self.doc.add_object(Stream::new(dict, content)))
    }
}

/// Circle as four Bezier curves
fn circle_ops(cx: f32, cy: f32, r: f32) -> Vec<Operation> {
    let k = r * BEZIER_CIRCLE_FACTOR;
    vec![
        Operation::new("m", reals(&[cx + r, cy])),
        Operation::new("c", reals(&[cx + r, cy + k, cx + k, cy + r, cx, cy + r])),
        Operation::new("c", reals(&[cx - k, cy + r, cx - r, cy + k, cx - r, cy])),
        Operation::new("c", reals(&[cx - r, cy - k, cx - k, cy - r, cx, cy - r])),
        Operation::new("c", reals(&[cx + k, cy - r, cx + r, cy - k, cx + r, cy])),
    ]
}

pub(crate) fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|v| Object::Real(*v)).collect()
}
