use crate::config::LayoutConfig;
use crate::planner::page_count;
use crate::types::*;

/// Summary of a worksheet build, computed without rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorksheetStatistics {
    pub items: usize,
    pub rows_per_page: usize,
    pub pages: usize,
    pub rows_on_last_page: usize,
    /// Widgets in the document (text fields plus choice widgets)
    pub fields: usize,
}

/// Calculate statistics for a worksheet of `item_count` items
pub fn calculate_statistics(item_count: usize, config: &LayoutConfig) -> Result<WorksheetStatistics> {
    let pages = page_count(item_count, config)?;
    let rows_per_page = config.rows_per_page();
    let rows_on_last_page = item_count - (pages - 1) * rows_per_page;

    // One note field and two choice widgets per item, in either style
    let fields = item_count * 3;

    Ok(WorksheetStatistics {
        items: item_count,
        rows_per_page,
        pages,
        rows_on_last_page,
        fields,
    })
}
