use crate::fields::FieldDescriptor;
use crate::render::{DrawOp, Logo};

/// One laid-out page: static content plus the widgets embedded in it
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetPage {
    /// 0-based page number
    pub number: usize,
    pub ops: Vec<DrawOp>,
    pub fields: Vec<FieldDescriptor>,
}

impl WorksheetPage {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Number of item rows on this page
    pub fn row_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| matches!(f, FieldDescriptor::Text(_)))
            .count()
    }
}

/// A fully laid-out worksheet, ready to serialise
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetDocument {
    /// Document metadata title
    pub title: String,
    pub pages: Vec<WorksheetPage>,
    /// Header logo shared by every page
    pub logo: Option<Logo>,
}

impl WorksheetDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.pages.iter().flat_map(|page| page.fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.pages.iter().map(|page| page.fields.len()).sum()
    }
}
