/*!
 * # Editing Core Module
 *
 * The report is a single ordered list of blocks owned by [`Report`]. Every
 * edit either goes through a typed mutator on `Report` or is expressed as a
 * [`Cmd`] and applied with [`Report::apply`], which returns a [`Patch`].
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth
 * - `Report` exclusively owns all blocks; no block is shared or copied
 * - Blocks are addressed by their [`BlockId`](crate::models::BlockId) only
 * - Mutating an unknown id is a silent no-op
 *
 * ### 2. Command-Based Editing
 * - `Cmd` covers creation, deletion, reordering and every field write
 * - A `Patch` tells the host whether only the preview needs redrawing
 *   ([`RenderScope::Preview`]) or the editor structure changed too
 *   ([`RenderScope::Full`])
 *
 * ### 3. Derived Views
 * - Preview and plain-text export are pure functions of the block list
 *   (see [`crate::render`]); neither mutates the report
 *
 * ## Usage Pattern
 *
 * ```rust
 * use report_builder_engine::editing::{Cmd, Report};
 * use report_builder_engine::models::{BlockType, FieldPath};
 *
 * let mut report = Report::new();
 * let id = report.create(BlockType::Title);
 *
 * let patch = report
 *     .apply(Cmd::SetField {
 *         id,
 *         field: FieldPath::Content,
 *         value: "Reporte de Práctica 1".to_string(),
 *     })
 *     .unwrap();
 * assert!(patch.changed);
 *
 * let text = report_builder_engine::render::export_text(&report);
 * assert!(text.contains("REPORTE DE PRÁCTICA 1"));
 * ```
 */

pub mod commands;
pub mod patch;
pub mod report;

pub use commands::Cmd;
pub use patch::{Patch, RenderScope};
pub use report::Report;

/// Validation failures surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("A table must keep at least its header row")]
    LastTableRow,
    #[error("Block index {index} is out of range for {len} blocks")]
    IndexOutOfRange { index: usize, len: usize },
}
