//! Row planning
//!
//! Decides where every item row lands: which page, which slot on that page,
//! and the y-coordinate of the row's top edge. All rows share one height, so
//! a greedy fill is optimal and the plan is a closed-form function of the
//! item index.

use crate::config::{LayoutConfig, rows_that_fit};
use crate::types::*;

/// Where one item row is drawn. Derived from the config, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowPlacement {
    pub item_index: usize,
    /// 0-based page number
    pub page: usize,
    /// 0-based slot on the page
    pub row_on_page: usize,
    /// Top edge of the row in PDF user space (origin bottom-left)
    pub top_y: f32,
}

impl RowPlacement {
    pub fn bottom_y(&self, row_height: f32) -> f32 {
        self.top_y - row_height
    }

    /// Vertical centre of the row
    pub fn center_y(&self, row_height: f32) -> f32 {
        self.top_y - row_height / 2.0
    }

    /// This row begins a page after a page break
    pub fn starts_new_page(&self) -> bool {
        self.row_on_page == 0 && self.page > 0
    }
}

/// Plan the placement of `item_count` rows.
///
/// The cursor starts at the first row top; a row that would cross the bottom
/// margin moves to a fresh page where the cursor resets.
pub fn plan(item_count: usize, config: &LayoutConfig) -> Result<Vec<RowPlacement>> {
    let rows_per_page = checked_rows_per_page(config)?;
    let start = config.first_row_top();
    let row_height = config.row_height();

    Ok((0..item_count)
        .map(|item_index| {
            let page = item_index / rows_per_page;
            let row_on_page = item_index % rows_per_page;
            RowPlacement {
                item_index,
                page,
                row_on_page,
                top_y: start - row_on_page as f32 * row_height,
            }
        })
        .collect())
}

/// Pages needed for `item_count` rows. An empty worksheet still has one page.
pub fn page_count(item_count: usize, config: &LayoutConfig) -> Result<usize> {
    let rows_per_page = checked_rows_per_page(config)?;
    Ok(item_count.div_ceil(rows_per_page).max(1))
}

fn checked_rows_per_page(config: &LayoutConfig) -> Result<usize> {
    match rows_that_fit(config.usable_height(), config.row_height()) {
        0 => Err(WorksheetError::Config(format!(
            "Row height {}pt never fits between the header and the bottom margin",
            config.row_height()
        ))),
        rows => Ok(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutSettings;

    fn ten_rows_config() -> LayoutConfig {
        let mut settings = LayoutSettings::default();
        settings.margins.bottom = 50.0;
        settings.row.row_height = 56.0;
        LayoutConfig::new(settings).unwrap()
    }

    /// Reference implementation: walk a cursor down the page.
    fn plan_with_cursor(item_count: usize, config: &LayoutConfig) -> Vec<(usize, f32)> {
        let start = config.first_row_top();
        let bottom = config.margins().bottom;
        let mut page = 0;
        let mut cursor = start;
        let mut out = Vec::new();
        for _ in 0..item_count {
            if cursor - config.row_height() < bottom - 1e-3 {
                page += 1;
                cursor = start;
            }
            out.push((page, cursor));
            cursor -= config.row_height();
        }
        out
    }

    #[test]
    fn matches_cursor_walk() {
        let config = ten_rows_config();
        let placements = plan(37, &config).unwrap();
        let reference = plan_with_cursor(37, &config);

        for (placement, (page, top)) in placements.iter().zip(reference) {
            assert_eq!(placement.page, page);
            assert!((placement.top_y - top).abs() < 0.01);
        }
    }

    #[test]
    fn twenty_three_items_span_three_pages() {
        let config = ten_rows_config();
        assert_eq!(config.rows_per_page(), 10);

        let placements = plan(23, &config).unwrap();
        let per_page: Vec<usize> = (0..3)
            .map(|p| placements.iter().filter(|r| r.page == p).count())
            .collect();
        assert_eq!(per_page, vec![10, 10, 3]);
        assert_eq!(page_count(23, &config).unwrap(), 3);

        assert!(placements[10].starts_new_page());
        assert!(placements[20].starts_new_page());
        assert!(!placements[0].starts_new_page());
        assert_eq!(placements[10].top_y, config.first_row_top());
    }

    #[test]
    fn rows_stay_above_bottom_margin() {
        let config = ten_rows_config();
        for placement in plan(25, &config).unwrap() {
            assert!(placement.bottom_y(config.row_height()) >= config.margins().bottom - 0.01);
        }
    }

    #[test]
    fn fractional_row_height_never_crosses_bottom_margin() {
        let mut settings = LayoutSettings::default();
        settings.row.row_height = 57.405;
        let config = LayoutConfig::new(settings).unwrap();
        assert_eq!(config.rows_per_page(), 9);

        for placement in plan(30, &config).unwrap() {
            assert!(placement.bottom_y(config.row_height()) >= config.margins().bottom);
        }
    }

    #[test]
    fn empty_plan_has_one_page() {
        let config = ten_rows_config();
        assert!(plan(0, &config).unwrap().is_empty());
        assert_eq!(page_count(0, &config).unwrap(), 1);
    }
}
