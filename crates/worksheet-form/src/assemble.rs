//! Document assembly
//!
//! Drives the whole build:
//! 1. Plan row placements once for all items
//! 2. Synthesize each item's fields and prompt
//! 3. Render static content for every page
//! 4. Check document-wide invariants and serialise

use crate::config::LayoutConfig;
use crate::document::{WorksheetDocument, WorksheetPage};
use crate::fields::FieldSynthesizer;
use crate::planner::{page_count, plan};
use crate::render::{Logo, render_page, render_prompt, write_pdf};
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;

/// A finished worksheet PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetOutput {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Build the worksheet PDF for `client_name` with one row per item.
///
/// Either returns a complete document or an error; nothing partial is
/// ever produced.
pub fn build<S: AsRef<str>>(
    client_name: &str,
    items: &[S],
    config: &LayoutConfig,
) -> Result<WorksheetOutput> {
    let items = config.items(items)?;
    let document = layout(client_name, &items, config)?;
    let bytes = write_pdf(&document, config)?;

    log::info!(
        "Built worksheet for '{}': {} items on {} page(s), {} bytes",
        client_name,
        items.len(),
        document.page_count(),
        bytes.len()
    );

    Ok(WorksheetOutput {
        bytes,
        page_count: document.page_count(),
    })
}

/// Lay out prefixed items into pages without serialising them
pub fn layout(client_name: &str, items: &[Item], config: &LayoutConfig) -> Result<WorksheetDocument> {
    let placements = plan(items.len(), config)?;
    let synthesizer = FieldSynthesizer::new(config)?;
    let total_pages = page_count(items.len(), config)?;
    let logo = config
        .settings()
        .header
        .logo_path
        .as_deref()
        .and_then(Logo::load);

    let mut pages: Vec<WorksheetPage> = (0..total_pages)
        .map(|number| {
            let mut page = WorksheetPage::new(number);
            page.ops = render_page(number, number == 0, client_name, config);
            if let Some(logo) = &logo {
                page.ops.push(logo.draw_op(config));
            }
            page
        })
        .collect();

    for (item, placement) in items.iter().zip(&placements) {
        let fields = synthesizer.synthesize(item, placement, config)?;
        let page = pages.get_mut(placement.page).ok_or_else(|| {
            WorksheetError::Render(format!(
                "Item {} was placed on page {} of {}",
                item.index,
                placement.page + 1,
                total_pages
            ))
        })?;
        if placement.starts_new_page() {
            log::debug!("Page break before item {}", item.index);
        }
        page.ops.extend(render_prompt(item, placement, config));
        page.fields.extend(fields);
    }

    let document = WorksheetDocument {
        title: format!("Client Worksheet - {}", client_name),
        pages,
        logo,
    };
    check_invariants(&document, items.len())?;
    Ok(document)
}

/// Field names must be unique across the document and every field must
/// sit on the page that holds it.
fn check_invariants(document: &WorksheetDocument, item_count: usize) -> Result<()> {
    let mut seen = HashSet::new();
    for page in &document.pages {
        for field in &page.fields {
            if field.page() != page.number {
                return Err(WorksheetError::Render(format!(
                    "Field {} targets page {} but is stored on page {}",
                    field.qualified_name(),
                    field.page() + 1,
                    page.number + 1
                )));
            }
            if !seen.insert(field.qualified_name()) {
                return Err(WorksheetError::Render(format!(
                    "Duplicate field name {}",
                    field.qualified_name()
                )));
            }
        }
    }

    let rows: usize = document.pages.iter().map(WorksheetPage::row_count).sum();
    if rows != item_count {
        return Err(WorksheetError::Render(format!(
            "Laid out {} rows for {} items",
            rows, item_count
        )));
    }
    Ok(())
}

/// Build the worksheet on the blocking pool and write it to `output_path`.
///
/// Returns the number of pages written.
pub async fn generate_pdf(
    client_name: &str,
    items: &[String],
    config: &LayoutConfig,
    output_path: impl AsRef<Path>,
) -> Result<usize> {
    let client_name = client_name.to_string();
    let items = items.to_vec();
    let config = config.clone();
    let output_path = output_path.as_ref().to_owned();

    let output = tokio::task::spawn_blocking(move || build(&client_name, items.as_slice(), &config)).await??;

    tokio::fs::write(&output_path, &output.bytes).await?;
    log::info!("Wrote {}", output_path.display());

    Ok(output.page_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldDescriptor, FieldName, FieldRect, TextField};

    fn text_field(index: usize, page: usize) -> FieldDescriptor {
        FieldDescriptor::Text(TextField {
            name: FieldName::Note(index),
            page,
            rect: FieldRect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
            tooltip: String::new(),
        })
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut page = WorksheetPage::new(0);
        page.fields = vec![text_field(1, 0), text_field(1, 0)];
        let document = WorksheetDocument {
            title: String::new(),
            pages: vec![page],
            logo: None,
        };

        match check_invariants(&document, 2) {
            Err(WorksheetError::Render(msg)) => assert!(msg.contains("note_1")),
            other => panic!("Expected Render error, got {:?}", other),
        }
    }

    #[test]
    fn field_on_wrong_page_is_rejected() {
        let mut page = WorksheetPage::new(0);
        page.fields = vec![text_field(0, 3)];
        let document = WorksheetDocument {
            title: String::new(),
            pages: vec![page],
            logo: None,
        };
        assert!(matches!(
            check_invariants(&document, 1),
            Err(WorksheetError::Render(_))
        ));
    }
}
