//! Worksheet rendering
//!
//! This module turns the layout into PDF content:
//! - Static page content (header band, logo, title, captions, prompts)
//! - AcroForm widgets with appearance streams
//! - Serialisation of the whole document

mod logo;
mod ops;
mod page;
mod pdf;
mod widgets;

pub use logo::Logo;
pub use ops::{
    DrawOp, FontRole, Rgb, encode_win_ansi, estimate_text_width, fit_lines, truncate_to_width,
    wrap_text,
};
pub use page::{render_page, render_prompt};
pub use pdf::write_pdf;
