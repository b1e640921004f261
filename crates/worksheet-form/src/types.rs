use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{DEFAULT_PAGE_HEIGHT_PT, DEFAULT_PAGE_WIDTH_PT, mm_to_pt};

#[derive(Error, Debug)]
pub enum WorksheetError {
    /// Invalid or self-contradictory layout parameters
    #[error("Invalid configuration: {0}")]
    Config(String),
    /// Internal invariant violation while assembling the document
    #[error("Render error: {0}")]
    Render(String),
    #[error("Item {index} has no text")]
    InvalidItem { index: usize },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, WorksheetError>;

/// How each item's pair of choice widgets is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChoiceStyle {
    /// Two independent checkboxes
    #[default]
    Checkbox,
    /// One radio group with two mutually exclusive options
    Radio,
}

impl ChoiceStyle {
    pub fn name(self) -> &'static str {
        match self {
            ChoiceStyle::Checkbox => "checkbox",
            ChoiceStyle::Radio => "radio",
        }
    }
}

impl FromStr for ChoiceStyle {
    type Err = WorksheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checkbox" => Ok(ChoiceStyle::Checkbox),
            "radio" => Ok(ChoiceStyle::Radio),
            other => Err(WorksheetError::Config(format!(
                "Unknown choice style '{}', expected 'checkbox' or 'radio'",
                other
            ))),
        }
    }
}

/// Whether item text gets the prompt prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrefixMode {
    /// Prepend the prefix unless the text already starts with it
    #[default]
    Auto,
    /// Use the item text as given
    Verbatim,
}

impl FromStr for PrefixMode {
    type Err = WorksheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(PrefixMode::Auto),
            "verbatim" => Ok(PrefixMode::Verbatim),
            other => Err(WorksheetError::Config(format!(
                "Unknown prefix mode '{}', expected 'auto' or 'verbatim'",
                other
            ))),
        }
    }
}

/// Standard page sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSize {
    #[default]
    Letter,
    Legal,
    A4,
    Custom { width_pt: f32, height_pt: f32 },
}

impl PageSize {
    /// Page dimensions in points (width, height)
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::A4 => (mm_to_pt(210.0), mm_to_pt(297.0)),
            PageSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(36.0)
    }
}

impl Margins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_pt: f32) -> Self {
        Self {
            left: margin_pt,
            right: margin_pt,
            top: margin_pt,
            bottom: margin_pt,
        }
    }
}

/// One worksheet line: a global 0-based index and the prompt shown for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub index: usize,
    pub display_text: String,
}

impl Item {
    /// Build an item from its source text, applying the prefix rule.
    ///
    /// Surrounding whitespace is trimmed first. The prefix check is
    /// case-sensitive, so text already starting with the prefix is kept
    /// verbatim and never double-prefixed.
    pub fn new(index: usize, source: &str, mode: PrefixMode, prefix: &str) -> Result<Self> {
        let text = source.trim();
        if text.is_empty() {
            return Err(WorksheetError::InvalidItem { index });
        }

        let display_text = match mode {
            PrefixMode::Verbatim => text.to_string(),
            PrefixMode::Auto if prefix.is_empty() || text.starts_with(prefix) => text.to_string(),
            PrefixMode::Auto => format!("{}{}", prefix, text),
        };

        Ok(Self {
            index,
            display_text,
        })
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.display_text)
    }
}
