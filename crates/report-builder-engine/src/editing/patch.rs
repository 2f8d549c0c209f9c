use crate::models::BlockId;

/// How much of the host surface must be redrawn after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderScope {
    /// Nothing changed
    None,
    /// Only rendered content changed; editor controls can stay as they are
    Preview,
    /// The block list or a block's editor layout changed
    Full,
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub changed: bool,
    pub block: Option<BlockId>,
    pub scope: RenderScope,
    pub version: u64,
}

impl Patch {
    pub(crate) fn unchanged(version: u64) -> Self {
        Self {
            changed: false,
            block: None,
            scope: RenderScope::None,
            version,
        }
    }
}
