//! Shared constants for worksheet generation
//!
//! This module centralizes magic numbers used by the layout engine and the
//! PDF writer.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

// =============================================================================
// Header
// =============================================================================

/// Header band fill colour (RGB, 0..1), a deep purple
pub const HEADER_COLOR: [f32; 3] = [0x71 as f32 / 255.0, 0x26 as f32 / 255.0, 0x74 as f32 / 255.0];

/// Height of the filled header band below the top margin (points)
pub const HEADER_BAND_HEIGHT: f32 = 60.0;

/// Width left uncovered at the right of the header band (points)
pub const HEADER_BAND_RIGHT_INSET: f32 = 100.0;

/// Title baseline, measured up from the bottom of the header band
pub const TITLE_BASELINE_OFFSET: f32 = 18.0;

/// Client name baseline, measured down from the bottom of the header band
pub const CLIENT_NAME_OFFSET: f32 = 26.0;

/// Instruction line baseline, measured down from the bottom of the header band
pub const INSTRUCTION_OFFSET: f32 = 46.0;

/// Column caption baseline, measured down from the bottom of the header band
pub const COLUMN_CAPTION_OFFSET: f32 = 70.0;

/// Gap between the column captions and the first row top
pub const CAPTION_TO_ROW_GAP: f32 = 16.0;

/// Vertical space between the top margin and the first row top
pub const DEFAULT_HEADER_RESERVED_HEIGHT: f32 =
    HEADER_BAND_HEIGHT + COLUMN_CAPTION_OFFSET + CAPTION_TO_ROW_GAP;

// =============================================================================
// Text
// =============================================================================

/// Width ratio used for characters outside [`HELVETICA_WIDTHS`]
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.6;

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em (AFM metrics)
pub const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Extra leading between wrapped prompt lines (points)
pub const TEXT_LINE_SPACING: f32 = 2.0;

/// Ratio of font size used to drop a baseline to the visual centre of a line
pub const BASELINE_CENTER_RATIO: f32 = 0.35;

/// Appended to prompts that overflow their column
pub const ELLIPSIS: &str = "...";

// =============================================================================
// Logo
// =============================================================================

/// Bounding box the header logo is scaled down into (points)
pub const LOGO_MAX_WIDTH: f32 = 60.0;
pub const LOGO_MAX_HEIGHT: f32 = 60.0;

/// Distance from the right page edge to the logo's left edge
pub const LOGO_RIGHT_OFFSET: f32 = 80.0;

// =============================================================================
// Columns
// =============================================================================

/// Horizontal distance between the Uploaded and Not Needed columns
pub const CHOICE_COLUMN_SPACING: f32 = 72.0;

// =============================================================================
// Widgets
// =============================================================================

/// Border width of every widget (points)
pub const WIDGET_BORDER_WIDTH: f32 = 1.0;

/// ZapfDingbats glyph drawn in a checked checkbox (a check mark)
pub const CHECK_GLYPH: &str = "4";

/// ZapfDingbats glyph drawn in a selected radio option (a filled circle)
pub const RADIO_GLYPH: &str = "l";

/// Field flag: button is a radio group (PDF 1.7, table 226, bit 16)
pub const FF_RADIO: i64 = 1 << 15;

/// Field flag: a selected radio option cannot be switched off (bit 15)
pub const FF_NO_TOGGLE_TO_OFF: i64 = 1 << 14;

/// Annotation flag: print the widget (PDF 1.7, table 165, bit 3)
pub const ANNOT_FLAG_PRINT: i64 = 1 << 2;

/// Control point factor for approximating circles with Bezier curves.
/// 4 * (sqrt(2) - 1) / 3 ≈ 0.552284749831
pub const BEZIER_CIRCLE_FACTOR: f32 = 0.552284749831;

// =============================================================================
// Pagination
// =============================================================================

/// Absolute tolerance (points) when counting how many rows fit between the
/// margins, so float rounding never drops a row that fits exactly.
pub const ROW_FIT_EPSILON: f32 = 1e-3;
