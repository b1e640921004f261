//! PDF serialisation
//!
//! Writes a laid-out [`WorksheetDocument`] as a PDF 1.7 file with an
//! interactive form: one content stream per page, the page's widgets in
//! `/Annots`, and every field listed in the catalog's `/AcroForm`. The logo,
//! when present, is one image XObject shared by all pages.

use crate::config::LayoutConfig;
use crate::constants::HEADER_COLOR;
use crate::document::WorksheetDocument;
use crate::types::*;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use super::logo::Logo;
use super::ops::{DrawOp, FontRole, encode_win_ansi, text_string};
use super::widgets::{FIELD_FONT, SYMBOL_FONT, WidgetWriter, reals};

/// Serialise the document to PDF bytes
pub fn write_pdf(document: &WorksheetDocument, config: &LayoutConfig) -> Result<Vec<u8>> {
    let fonts = &config.settings().fonts;
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let base_font_id = doc.add_object(type1_font(&fonts.base));
    let bold_font_id = doc.add_object(type1_font(&fonts.bold));
    let italic_font_id = doc.add_object(type1_font(&fonts.italic));
    let symbol_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "ZapfDingbats",
    });

    let mut page_fonts = Dictionary::new();
    page_fonts.set(FontRole::Base.resource_name(), base_font_id);
    page_fonts.set(FontRole::Bold.resource_name(), bold_font_id);
    page_fonts.set(FontRole::Italic.resource_name(), italic_font_id);
    let mut resources = dictionary! { "Font" => page_fonts };
    if let Some(logo) = &document.logo {
        let image_id = add_logo(&mut doc, logo);
        resources.set("XObject", dictionary! { LOGO_RESOURCE => image_id });
    }
    let resources_id = doc.add_object(resources);

    let mut kids = Vec::new();
    let mut form_fields = Vec::new();
    let mut page_objects = Vec::new();
    {
        let mut widgets =
            WidgetWriter::new(&mut doc, symbol_font_id, HEADER_COLOR, fonts.item_text_size);
        for page in &document.pages {
            let page_id = widgets.new_object_id();
            let page_widgets = widgets.add_page_fields(page_id, &page.fields)?;
            form_fields.extend(page_widgets.fields);
            page_objects.push((page_id, page_widgets.annots));
        }
    }

    for (page, (page_id, annots)) in document.pages.iter().zip(page_objects) {
        let content: Content = Content {
            operations: page.ops.iter().flat_map(draw_operations).collect(),
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => reals(&[0.0, 0.0, config.page_width(), config.page_height()]),
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annots.is_empty() {
            page_dict.set("Annots", annots);
        }
        doc.objects.insert(page_id, Object::Dictionary(page_dict));
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let mut form_fonts = Dictionary::new();
    form_fonts.set(FIELD_FONT, base_font_id);
    form_fonts.set(SYMBOL_FONT, symbol_font_id);
    let acro_form = dictionary! {
        "Fields" => form_fields,
        "NeedAppearances" => true,
        "DA" => Object::string_literal(format!("/{} 0 Tf 0 g", FIELD_FONT)),
        "DR" => dictionary! { "Font" => form_fonts },
    };

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acro_form,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(&document.title),
        "Producer" => Object::string_literal(concat!("worksheet-form ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

/// Resource name of the logo image XObject
const LOGO_RESOURCE: &str = "Logo";

/// Embed the logo as an RGB image XObject, with its alpha as a soft mask
fn add_logo(doc: &mut Document, logo: &Logo) -> lopdf::ObjectId {
    let mut image = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => logo.width_px as i64,
        "Height" => logo.height_px as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };
    if let Some(alpha) = &logo.alpha {
        let mask_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => logo.width_px as i64,
                "Height" => logo.height_px as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha.clone(),
        ));
        image.set("SMask", mask_id);
    }
    doc.add_object(Stream::new(image, logo.rgb.clone()))
}

fn type1_font(base_font: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Content stream operations for one draw-op
fn draw_operations(op: &DrawOp) -> Vec<Operation> {
    match op {
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => vec![
            Operation::new("q", vec![]),
            Operation::new("rg", reals(color)),
            Operation::new("re", reals(&[*x, *y, *width, *height])),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ],
        DrawOp::Text {
            x,
            y,
            font,
            size,
            color,
            text,
        } => vec![
            Operation::new("BT", vec![]),
            Operation::new("rg", reals(color)),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(font.resource_name().as_bytes().to_vec()),
                    Object::Real(*size),
                ],
            ),
            Operation::new("Td", reals(&[*x, *y])),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ],
        DrawOp::Image {
            x,
            y,
            width,
            height,
        } => vec![
            Operation::new("q", vec![]),
            Operation::new("cm", reals(&[*width, 0.0, 0.0, *height, *x, *y])),
            Operation::new("Do", vec![Object::Name(LOGO_RESOURCE.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    }
}
