use crate::constants::{CHOICE_COLUMN_SPACING, DEFAULT_HEADER_RESERVED_HEIGHT, ROW_FIT_EPSILON};
use std::path::PathBuf;
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Font names and sizes. Names must be standard Type1 fonts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FontSettings {
    pub base: String,
    pub bold: String,
    pub italic: String,
    pub title_size: f32,
    pub client_name_size: f32,
    pub item_text_size: f32,
    pub column_header_size: f32,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            base: "Helvetica".to_string(),
            bold: "Helvetica-Bold".to_string(),
            italic: "Helvetica-Oblique".to_string(),
            title_size: 22.0,
            client_name_size: 14.0,
            item_text_size: 10.0,
            column_header_size: 10.0,
        }
    }
}

/// Static content above the first row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeaderSettings {
    /// Title drawn in the header band; `{year}` is replaced by the tax year
    pub title_template: String,
    pub tax_year: Option<String>,
    /// Drawn under the client name on the first page only
    pub instructions: Option<String>,
    /// Space between the top margin and the top of the first row
    pub reserved_height: f32,
    /// Draw the client name on every page instead of the first page only
    pub repeat_client_name: bool,
    /// Image drawn at the right of the header band; skipped if it cannot be read
    pub logo_path: Option<PathBuf>,
}

impl Default for HeaderSettings {
    fn default() -> Self {
        Self {
            title_template: "{year} Client Worksheet".to_string(),
            tax_year: None,
            instructions: Some(
                "Please upload your documents and then mark the below checkbox as uploaded or not needed."
                    .to_string(),
            ),
            reserved_height: DEFAULT_HEADER_RESERVED_HEIGHT,
            repeat_client_name: false,
            logo_path: None,
        }
    }
}

/// Row metrics, all in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RowSettings {
    pub row_height: f32,
    /// Width reserved at the left margin for the prompt text
    pub prompt_width: f32,
    pub text_field_width: f32,
    pub text_field_height: f32,
    /// Minimum gap between the text field and the first choice column
    pub gap_x: f32,
    /// Side length of each checkbox / radio widget
    pub choice_size: f32,
}

impl Default for RowSettings {
    fn default() -> Self {
        Self {
            row_height: 40.0,
            prompt_width: 250.0,
            text_field_width: 150.0,
            text_field_height: 20.0,
            gap_x: 12.0,
            choice_size: 14.0,
        }
    }
}

/// Column captions and optional x-offsets of the choice columns.
///
/// Unset offsets follow the page width: "Not Needed" ends at the right
/// margin and "Uploaded" sits 72pt to its left.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ColumnSettings {
    pub document_label: String,
    pub uploaded_label: String,
    pub not_needed_label: String,
    /// Left edge of the "Uploaded" widgets
    pub uploaded_x: Option<f32>,
    /// Left edge of the "Not Needed" widgets
    pub not_needed_x: Option<f32>,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            document_label: "Document".to_string(),
            uploaded_label: "Uploaded".to_string(),
            not_needed_label: "Not Needed".to_string(),
            uploaded_x: None,
            not_needed_x: None,
        }
    }
}

/// Export values of the two radio options
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadioValues {
    pub uploaded: String,
    pub not_needed: String,
}

impl Default for RadioValues {
    fn default() -> Self {
        Self {
            uploaded: "uploaded".to_string(),
            not_needed: "not_needed".to_string(),
        }
    }
}

/// Raw worksheet layout parameters, as loaded from a config file.
///
/// Turn into a [`LayoutConfig`] with [`LayoutConfig::new`] before use.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutSettings {
    pub page_size: PageSize,
    pub margins: Margins,
    pub fonts: FontSettings,
    pub header: HeaderSettings,
    pub row: RowSettings,
    pub columns: ColumnSettings,
    pub choice_style: ChoiceStyle,
    pub radio_values: Option<RadioValues>,
    pub prefix_mode: PrefixMode,
    pub auto_prefix: String,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margins: Margins::default(),
            fonts: FontSettings::default(),
            header: HeaderSettings::default(),
            row: RowSettings::default(),
            columns: ColumnSettings::default(),
            choice_style: ChoiceStyle::Checkbox,
            radio_values: Some(RadioValues::default()),
            prefix_mode: PrefixMode::Auto,
            auto_prefix: "Please upload your ".to_string(),
        }
    }
}

impl LayoutSettings {
    /// Parse settings from JSON
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| WorksheetError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save settings to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| WorksheetError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Validated, read-only worksheet layout.
///
/// Construction checks every parameter once, so a `LayoutConfig` can always
/// place at least one row per page and never yields overlapping columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    settings: LayoutSettings,
    page_width: f32,
    page_height: f32,
    rows_per_page: usize,
    uploaded_x: f32,
    not_needed_x: f32,
}

impl LayoutConfig {
    pub fn new(settings: LayoutSettings) -> Result<Self> {
        let (page_width, page_height) = settings.page_size.dimensions_pt();
        let (uploaded_x, not_needed_x) = resolve_columns(&settings, page_width);
        validate(&settings, page_width, page_height, uploaded_x, not_needed_x)?;

        let usable = usable_height(&settings, page_height);
        let rows_per_page = rows_that_fit(usable, settings.row.row_height);
        if rows_per_page == 0 {
            return Err(WorksheetError::Config(format!(
                "Row height {}pt exceeds the usable page height {}pt",
                settings.row.row_height, usable
            )));
        }

        Ok(Self {
            settings,
            page_width,
            page_height,
            rows_per_page,
            uploaded_x,
            not_needed_x,
        })
    }

    /// Load and validate settings from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::new(LayoutSettings::from_json(&json)?)
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn row_height(&self) -> f32 {
        self.settings.row.row_height
    }

    pub fn margins(&self) -> &Margins {
        &self.settings.margins
    }

    pub fn choice_style(&self) -> ChoiceStyle {
        self.settings.choice_style
    }

    /// Present whenever the choice style is radio
    pub fn radio_values(&self) -> Option<&RadioValues> {
        self.settings.radio_values.as_ref()
    }

    /// Top edge of the first row on every page
    pub fn first_row_top(&self) -> f32 {
        self.page_height - self.settings.margins.top - self.settings.header.reserved_height
    }

    /// Vertical space available to rows between the header and the bottom margin
    pub fn usable_height(&self) -> f32 {
        usable_height(&self.settings, self.page_height)
    }

    /// Left edge of the "Uploaded" widgets
    pub fn uploaded_x(&self) -> f32 {
        self.uploaded_x
    }

    /// Left edge of the "Not Needed" widgets
    pub fn not_needed_x(&self) -> f32 {
        self.not_needed_x
    }

    /// Left edge of every note field
    pub fn text_field_x(&self) -> f32 {
        self.settings.margins.left + self.settings.row.prompt_width
    }

    /// Header title with the tax year filled in
    pub fn title(&self) -> String {
        let header = &self.settings.header;
        let year = header.tax_year.as_deref().unwrap_or("");
        let title = header.title_template.replace("{year}", year).trim().to_string();
        if title.is_empty() {
            "Client Worksheet".to_string()
        } else {
            title
        }
    }

    /// Turn raw item texts into prefixed items
    pub fn items<S: AsRef<str>>(&self, sources: &[S]) -> Result<Vec<Item>> {
        sources
            .iter()
            .enumerate()
            .map(|(index, source)| {
                Item::new(
                    index,
                    source.as_ref(),
                    self.settings.prefix_mode,
                    &self.settings.auto_prefix,
                )
            })
            .collect()
    }
}

impl TryFrom<LayoutSettings> for LayoutConfig {
    type Error = WorksheetError;

    fn try_from(settings: LayoutSettings) -> Result<Self> {
        Self::new(settings)
    }
}

fn usable_height(settings: &LayoutSettings, page_height: f32) -> f32 {
    page_height
        - settings.margins.top
        - settings.header.reserved_height
        - settings.margins.bottom
}

fn resolve_columns(settings: &LayoutSettings, page_width: f32) -> (f32, f32) {
    let columns = &settings.columns;
    let not_needed_x = columns
        .not_needed_x
        .unwrap_or(page_width - settings.margins.right - settings.row.choice_size);
    let uploaded_x = columns
        .uploaded_x
        .unwrap_or(not_needed_x - CHOICE_COLUMN_SPACING);
    (uploaded_x, not_needed_x)
}

/// Number of whole rows of `row_height` that fit in `usable`.
///
/// The tolerance is in points, so a row never ends more than
/// `ROW_FIT_EPSILON` below the bottom margin.
pub(crate) fn rows_that_fit(usable: f32, row_height: f32) -> usize {
    if usable <= 0.0 || row_height <= 0.0 {
        return 0;
    }
    ((usable + ROW_FIT_EPSILON) / row_height).floor() as usize
}

fn config_error(message: impl Into<String>) -> WorksheetError {
    WorksheetError::Config(message.into())
}

fn require_positive(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(config_error(format!("{} must be positive, got {}", name, value)));
    }
    Ok(())
}

fn require_non_negative(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(config_error(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(())
}

/// PDF names cannot carry whitespace or delimiter characters
fn is_valid_export_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_graphic() && !b"/()<>[]{}%#".contains(&b))
}

fn validate(
    settings: &LayoutSettings,
    page_width: f32,
    page_height: f32,
    uploaded_x: f32,
    not_needed_x: f32,
) -> Result<()> {
    require_positive("Page width", page_width)?;
    require_positive("Page height", page_height)?;

    let margins = &settings.margins;
    require_non_negative("Left margin", margins.left)?;
    require_non_negative("Right margin", margins.right)?;
    require_non_negative("Top margin", margins.top)?;
    require_non_negative("Bottom margin", margins.bottom)?;
    require_non_negative("Header reserved height", settings.header.reserved_height)?;

    let row = &settings.row;
    require_positive("Row height", row.row_height)?;
    require_non_negative("Prompt width", row.prompt_width)?;
    require_positive("Text field width", row.text_field_width)?;
    require_positive("Text field height", row.text_field_height)?;
    require_non_negative("Column gap", row.gap_x)?;
    require_positive("Choice size", row.choice_size)?;

    let fonts = &settings.fonts;
    for (name, font) in [
        ("Base font", &fonts.base),
        ("Bold font", &fonts.bold),
        ("Italic font", &fonts.italic),
    ] {
        if font.trim().is_empty() {
            return Err(config_error(format!("{} name is empty", name)));
        }
    }
    require_positive("Title font size", fonts.title_size)?;
    require_positive("Client name font size", fonts.client_name_size)?;
    require_positive("Item text font size", fonts.item_text_size)?;
    require_positive("Column header font size", fonts.column_header_size)?;

    if row.text_field_height > row.row_height || row.choice_size > row.row_height {
        return Err(config_error(
            "Text field and choice widgets must fit inside the row height",
        ));
    }

    let text_field_right = margins.left + row.prompt_width + row.text_field_width;
    if text_field_right + row.gap_x > uploaded_x {
        return Err(config_error(format!(
            "Text field ends at {}pt and overlaps the uploaded column at {}pt",
            text_field_right + row.gap_x,
            uploaded_x
        )));
    }
    if uploaded_x + row.choice_size > not_needed_x {
        return Err(config_error(
            "Not needed column must start after the uploaded column",
        ));
    }
    if not_needed_x + row.choice_size > page_width - margins.right + ROW_FIT_EPSILON {
        return Err(config_error(format!(
            "Not needed column at {}pt runs past the right margin",
            not_needed_x
        )));
    }

    if settings.choice_style == ChoiceStyle::Radio {
        let values = settings
            .radio_values
            .as_ref()
            .ok_or_else(|| config_error("Radio choice style requires radio_values"))?;
        for value in [&values.uploaded, &values.not_needed] {
            if !is_valid_export_value(value) {
                return Err(config_error(format!(
                    "Radio export value '{}' is empty or not a valid PDF name",
                    value
                )));
            }
        }
        if values.uploaded == values.not_needed {
            return Err(config_error("Radio export values must be distinct"));
        }
        if values.uploaded == "Off" || values.not_needed == "Off" {
            return Err(config_error(
                "'Off' is reserved for the unselected radio state",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let config = LayoutConfig::new(LayoutSettings::default()).unwrap();
        assert_eq!(config.page_width(), 612.0);
        assert_eq!(config.page_height(), 792.0);
        // 792 - 36 - 146 - 36 = 574, 574 / 40 = 14.35
        assert_eq!(config.rows_per_page(), 14);
    }

    #[test]
    fn exact_fit_is_not_lost_to_rounding() {
        assert_eq!(rows_that_fit(574.0, 57.4), 10);
        assert_eq!(rows_that_fit(560.0, 56.0), 10);
        assert_eq!(rows_that_fit(10.0, 20.0), 0);
    }

    #[test]
    fn fit_tolerance_does_not_grow_with_row_height() {
        assert_eq!(rows_that_fit(574.0, 574.4), 0);
        assert_eq!(rows_that_fit(574.0, 57.405), 9);
        assert_eq!(rows_that_fit(574.0, 574.0), 1);
    }

    #[test]
    fn columns_follow_page_width() {
        let config = LayoutConfig::new(LayoutSettings::default()).unwrap();
        // 612 - 36 - 14 = 562, 562 - 72 = 490
        assert_eq!(config.not_needed_x(), 562.0);
        assert_eq!(config.uploaded_x(), 490.0);

        let mut settings = LayoutSettings::default();
        settings.page_size = PageSize::A4;
        let config = LayoutConfig::new(settings).unwrap();
        assert!((config.not_needed_x() + 14.0 + 36.0 - config.page_width()).abs() < 1e-3);
        assert!((config.not_needed_x() - config.uploaded_x() - 72.0).abs() < 1e-3);

        let mut settings = LayoutSettings::default();
        settings.columns.uploaded_x = Some(480.0);
        let config = LayoutConfig::new(settings).unwrap();
        assert_eq!(config.uploaded_x(), 480.0);
        assert_eq!(config.not_needed_x(), 562.0);
    }

    #[test]
    fn title_uses_tax_year() {
        let mut settings = LayoutSettings::default();
        let config = LayoutConfig::new(settings.clone()).unwrap();
        assert_eq!(config.title(), "Client Worksheet");

        settings.header.tax_year = Some("2024".to_string());
        let config = LayoutConfig::new(settings).unwrap();
        assert_eq!(config.title(), "2024 Client Worksheet");
    }

    #[test]
    fn export_value_names() {
        assert!(is_valid_export_value("not_needed"));
        assert!(!is_valid_export_value("not needed"));
        assert!(!is_valid_export_value("a/b"));
        assert!(!is_valid_export_value(""));
    }
}
