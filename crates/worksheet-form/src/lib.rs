pub mod assemble;
mod config;
pub mod constants;
mod document;
pub mod fields;
pub mod planner;
pub mod render;
mod stats;
mod types;

pub use assemble::{WorksheetOutput, build, generate_pdf, layout};
pub use config::*;
pub use document::{WorksheetDocument, WorksheetPage};
pub use fields::{FieldDescriptor, FieldName, FieldRect, FieldSynthesizer};
pub use planner::{RowPlacement, page_count, plan};
pub use stats::{WorksheetStatistics, calculate_statistics};
pub use types::*;
