//! Derived views of a report.
//!
//! Everything here is a pure function of the block list: the preview model
//! (plus its HTML rendering), IEEE references and the plain-text export.

pub mod html;
pub mod preview;
pub mod reference;
pub mod table;
pub mod text;

pub use html::render_html;
pub use preview::{
    AiDeclaration, Fragment, HeaderView, RenderBlock, RenderModel, STUDENT_PLACEHOLDER,
    declarant_name, preview,
};
pub use reference::{format_reference, format_reference_html, format_reference_text};
pub use table::{column_widths, render_table};
pub use text::{EXPORT_FILE_NAME, export_text};
