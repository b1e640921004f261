//! Static page content
//!
//! Every page repeats the header band, the title and the column captions, so
//! a reader who lands on page 3 still knows which column is which. The client
//! name and the instruction line belong to the first page.

use crate::config::LayoutConfig;
use crate::constants::{
    BASELINE_CENTER_RATIO, CAPTION_TO_ROW_GAP, CLIENT_NAME_OFFSET, HEADER_BAND_HEIGHT,
    HEADER_BAND_RIGHT_INSET, HEADER_COLOR, INSTRUCTION_OFFSET, TEXT_LINE_SPACING,
    TITLE_BASELINE_OFFSET,
};
use crate::planner::RowPlacement;
use crate::types::Item;

use super::ops::{BLACK, DrawOp, FontRole, WHITE, estimate_text_width, fit_lines};

/// Draw-ops for the static content of one page.
///
/// The client name is drawn on the first page, or on every page when
/// `header.repeat_client_name` is set.
pub fn render_page(
    page_number: usize,
    is_first_page: bool,
    client_name: &str,
    config: &LayoutConfig,
) -> Vec<DrawOp> {
    let settings = config.settings();
    let margins = config.margins();
    let fonts = &settings.fonts;
    let header_bottom = config.page_height() - margins.top - HEADER_BAND_HEIGHT;

    let mut ops = vec![
        DrawOp::FillRect {
            x: 0.0,
            y: header_bottom,
            width: (config.page_width() - HEADER_BAND_RIGHT_INSET).max(0.0),
            height: HEADER_BAND_HEIGHT,
            color: HEADER_COLOR,
        },
        DrawOp::Text {
            x: margins.left,
            y: header_bottom + TITLE_BASELINE_OFFSET,
            font: FontRole::Base,
            size: fonts.title_size,
            color: WHITE,
            text: config.title(),
        },
    ];

    if is_first_page || settings.header.repeat_client_name {
        ops.push(DrawOp::Text {
            x: margins.left,
            y: header_bottom - CLIENT_NAME_OFFSET,
            font: FontRole::Base,
            size: fonts.client_name_size,
            color: BLACK,
            text: client_name.to_string(),
        });
    }

    if is_first_page {
        if let Some(instructions) = &settings.header.instructions {
            ops.push(DrawOp::Text {
                x: margins.left,
                y: header_bottom - INSTRUCTION_OFFSET,
                font: FontRole::Italic,
                size: fonts.item_text_size,
                color: BLACK,
                text: instructions.clone(),
            });
        }
    }

    ops.extend(column_captions(config));

    log::debug!("Rendered static content for page {}", page_number + 1);
    ops
}

/// Column captions, just above the first row. The choice captions are
/// centred over their widget columns.
fn column_captions(config: &LayoutConfig) -> Vec<DrawOp> {
    let settings = config.settings();
    let columns = &settings.columns;
    let size = settings.fonts.column_header_size;
    let half_widget = settings.row.choice_size / 2.0;
    let y = config.first_row_top() + CAPTION_TO_ROW_GAP;

    let centred = |label: &str, column_x: f32| DrawOp::Text {
        x: column_x + half_widget - estimate_text_width(label, size) / 2.0,
        y,
        font: FontRole::Bold,
        size,
        color: BLACK,
        text: label.to_string(),
    };

    vec![
        DrawOp::Text {
            x: config.margins().left,
            y,
            font: FontRole::Bold,
            size,
            color: BLACK,
            text: columns.document_label.clone(),
        },
        centred(&columns.uploaded_label, config.uploaded_x()),
        centred(&columns.not_needed_label, config.not_needed_x()),
    ]
}

/// Prompt text for one row, left of the note field.
///
/// The prompt wraps onto as many lines as the row height holds and the block
/// is centred on the row. Text that still does not fit ends in an ellipsis.
pub fn render_prompt(item: &Item, placement: &RowPlacement, config: &LayoutConfig) -> Vec<DrawOp> {
    let settings = config.settings();
    let size = settings.fonts.item_text_size;
    let available = settings.row.prompt_width - settings.row.gap_x;
    let line_height = size + TEXT_LINE_SPACING;
    let max_lines = (config.row_height() / line_height).floor() as usize;

    let (lines, cut) = fit_lines(&item.display_text, size, available, max_lines);
    if cut {
        log::warn!(
            "Prompt for item {} does not fit in its row and was shortened",
            item.index
        );
    }

    let first_baseline = placement.center_y(config.row_height())
        + (lines.len() - 1) as f32 * line_height / 2.0
        - size * BASELINE_CENTER_RATIO;

    lines
        .into_iter()
        .enumerate()
        .map(|(n, text)| DrawOp::Text {
            x: config.margins().left,
            y: first_baseline - n as f32 * line_height,
            font: FontRole::Base,
            size,
            color: BLACK,
            text,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;

    fn texts(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter().filter_map(DrawOp::text).collect()
    }

    #[test]
    fn first_page_has_client_name() {
        let config = LayoutConfig::new(LayoutSettings::default()).unwrap();
        let ops = render_page(0, true, "Michael H McKay", &config);
        let texts = texts(&ops);
        assert!(texts.contains(&"Michael H McKay"));
        assert!(texts.contains(&"Uploaded"));
        assert!(texts.contains(&"Not Needed"));
        assert!(texts.contains(&"Client Worksheet"));
    }

    #[test]
    fn later_pages_repeat_captions_only() {
        let config = LayoutConfig::new(LayoutSettings::default()).unwrap();
        let ops = render_page(1, false, "Michael H McKay", &config);
        let texts = texts(&ops);
        assert!(!texts.contains(&"Michael H McKay"));
        assert!(texts.contains(&"Uploaded"));
        assert!(texts.contains(&"Not Needed"));
        assert!(texts.iter().all(|t| !t.starts_with("Please upload your documents")));
    }

    #[test]
    fn client_name_can_repeat() {
        let mut settings = LayoutSettings::default();
        settings.header.repeat_client_name = true;
        let config = LayoutConfig::new(settings).unwrap();
        let ops = render_page(2, false, "Michael H McKay", &config);
        assert!(texts(&ops).contains(&"Michael H McKay"));
    }

    fn prompt_for(text: &str, settings: LayoutSettings) -> Vec<DrawOp> {
        let config = LayoutConfig::new(settings).unwrap();
        let item = Item {
            index: 0,
            display_text: text.to_string(),
        };
        let placement = crate::planner::plan(1, &config).unwrap()[0];
        render_prompt(&item, &placement, &config)
    }

    #[test]
    fn two_line_prompt_is_drawn_in_full() {
        let text = "Please upload your 1099-MISC from American Hearing Benefit.";
        let ops = prompt_for(text, LayoutSettings::default());
        let lines = texts(&ops);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines.join(" "), text);

        let baselines: Vec<f32> = ops
            .iter()
            .map(|op| match op {
                DrawOp::Text { y, .. } => *y,
                other => panic!("Expected text, got {:?}", other),
            })
            .collect();
        assert!((baselines[0] - baselines[1] - 12.0).abs() < 1e-3);
    }

    #[test]
    fn prompt_lines_stay_inside_the_row() {
        let config = LayoutConfig::new(LayoutSettings::default()).unwrap();
        let text = "Please upload your bank statements for every account you held during the year, including savings, checking, brokerage, retirement and health savings accounts";
        let item = Item {
            index: 0,
            display_text: text.to_string(),
        };
        let placement = crate::planner::plan(1, &config).unwrap()[0];
        let ops = render_prompt(&item, &placement, &config);

        // 40pt row, 12pt per line
        assert_eq!(ops.len(), 3);
        assert!(texts(&ops)[2].ends_with("..."));
        for op in &ops {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y < placement.top_y);
                assert!(*y > placement.bottom_y(config.row_height()));
            }
        }
    }

    #[test]
    fn short_row_falls_back_to_one_line() {
        let mut settings = LayoutSettings::default();
        settings.row.row_height = 20.0;
        let ops = prompt_for("Please upload your 1099-MISC from American Hearing Benefit.", settings);
        let lines = texts(&ops);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("..."));
    }

    #[test]
    fn captions_sit_above_first_row() {
        let config = LayoutConfig::new(LayoutSettings::default()).unwrap();
        for op in column_captions(&config) {
            if let DrawOp::Text { y, .. } = op {
                assert!(y > config.first_row_top());
            }
        }
    }
}
