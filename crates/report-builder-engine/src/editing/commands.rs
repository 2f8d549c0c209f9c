use crate::editing::{EditError, Patch, RenderScope, Report};
use crate::models::{AiUsed, BlockId, BlockType, FieldPath, RefType};

/// Commands that can be applied to the report
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    AddBlock {
        block_type: BlockType,
    },
    DeleteBlock {
        id: BlockId,
    },
    MoveBlock {
        from: usize,
        to: usize,
    },
    SetField {
        id: BlockId,
        field: FieldPath,
        value: String,
    },
    SetRefType {
        id: BlockId,
        ref_type: RefType,
    },
    SetAiUsed {
        id: BlockId,
        used: AiUsed,
    },
    SetTableColumns {
        id: BlockId,
        columns: usize,
    },
    AddTableRow {
        id: BlockId,
    },
    RemoveTableRow {
        id: BlockId,
    },
}

impl Report {
    /// Apply a command, reporting what the host has to redraw.
    ///
    /// Field writes only affect rendered content and yield
    /// [`RenderScope::Preview`]; everything that changes the shape of the
    /// editor yields [`RenderScope::Full`].
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let (block, scope) = match cmd {
            Cmd::AddBlock { block_type } => (Some(self.create(block_type)), RenderScope::Full),
            Cmd::DeleteBlock { id } => match self.remove(id) {
                Some(_) => (Some(id), RenderScope::Full),
                None => return Ok(Patch::unchanged(self.version())),
            },
            Cmd::MoveBlock { from, to } => {
                let moved = self.blocks().get(from).map(|b| b.id());
                self.move_to(from, to)?;
                (moved, RenderScope::Full)
            }
            Cmd::SetField { id, field, value } => {
                if !self.set_field(id, &field, value) {
                    return Ok(Patch::unchanged(self.version()));
                }
                (Some(id), RenderScope::Preview)
            }
            Cmd::SetRefType { id, ref_type } => {
                if !self.set_ref_type(id, ref_type) {
                    return Ok(Patch::unchanged(self.version()));
                }
                (Some(id), RenderScope::Full)
            }
            Cmd::SetAiUsed { id, used } => {
                if !self.set_ai_used(id, used) {
                    return Ok(Patch::unchanged(self.version()));
                }
                (Some(id), RenderScope::Full)
            }
            Cmd::SetTableColumns { id, columns } => {
                if self.set_table_columns(id, columns).is_none() {
                    return Ok(Patch::unchanged(self.version()));
                }
                (Some(id), RenderScope::Full)
            }
            Cmd::AddTableRow { id } => {
                if !self.add_table_row(id) {
                    return Ok(Patch::unchanged(self.version()));
                }
                (Some(id), RenderScope::Full)
            }
            Cmd::RemoveTableRow { id } => {
                if !self.remove_table_row(id)? {
                    return Ok(Patch::unchanged(self.version()));
                }
                (Some(id), RenderScope::Full)
            }
        };

        Ok(Patch {
            changed: true,
            block,
            scope,
            version: self.version(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeaderField;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_writes_only_need_preview() {
        let mut report = Report::new();
        let id = report.create(BlockType::Header);

        let patch = report
            .apply(Cmd::SetField {
                id,
                field: FieldPath::Header(HeaderField::Inst),
                value: "UPY".to_string(),
            })
            .unwrap();

        assert!(patch.changed);
        assert_eq!(patch.scope, RenderScope::Preview);
        assert_eq!(patch.block, Some(id));
        assert_eq!(patch.version, report.version());
    }

    #[test]
    fn test_structural_commands_need_full_render() {
        let mut report = Report::new();

        let added = report
            .apply(Cmd::AddBlock {
                block_type: BlockType::Table,
            })
            .unwrap();
        let id = added.block.unwrap();
        assert_eq!(added.scope, RenderScope::Full);

        let resized = report
            .apply(Cmd::SetTableColumns { id, columns: 4 })
            .unwrap();
        assert_eq!(resized.scope, RenderScope::Full);
        assert!(resized.version > added.version);
    }

    #[test]
    fn test_unknown_id_yields_unchanged_patch() {
        let mut report = Report::new();
        report.create(BlockType::Text);
        let version = report.version();

        let patch = report
            .apply(Cmd::DeleteBlock { id: BlockId(404) })
            .unwrap();

        assert!(!patch.changed);
        assert_eq!(patch.scope, RenderScope::None);
        assert_eq!(patch.version, version);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_validation_errors_propagate() {
        let mut report = Report::new();
        let id = report.create(BlockType::Table);
        report.apply(Cmd::RemoveTableRow { id }).unwrap();

        let result = report.apply(Cmd::RemoveTableRow { id });
        assert_eq!(result, Err(EditError::LastTableRow));

        let result = report.apply(Cmd::MoveBlock { from: 5, to: 0 });
        assert_eq!(result, Err(EditError::IndexOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn test_move_reports_moved_block() {
        let mut report = Report::new();
        let first = report.create(BlockType::Title);
        report.create(BlockType::Text);

        let patch = report.apply(Cmd::MoveBlock { from: 0, to: 1 }).unwrap();

        assert_eq!(patch.block, Some(first));
        assert_eq!(report.position(first), Some(1));
    }
}
