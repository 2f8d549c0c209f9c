use crate::editing::EditError;
use crate::models::{
    AiField, AiUsed, Block, BlockId, BlockKind, BlockType, FieldPath, HeaderData, HeaderField,
    RefField, RefType,
};

/// Hands out block ids from a strictly increasing counter
#[derive(Debug, Clone)]
struct IdAllocator {
    /// `None` once an id of `u64::MAX` has been seen
    next: Option<u64>,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next: Some(1) }
    }

    fn allocate(&mut self) -> Option<BlockId> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(BlockId(id))
    }

    /// Make sure future ids stay above one already in use
    fn observe(&mut self, id: BlockId) {
        if let Some(next) = self.next
            && id.0 >= next
        {
            self.next = id.0.checked_add(1);
        }
    }
}

/// Ordered block store for one report session
#[derive(Debug, Clone)]
pub struct Report {
    blocks: Vec<Block>,
    ids: IdAllocator,
    /// Incremented on every effective change
    version: u64,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            ids: IdAllocator::new(),
            version: 0,
        }
    }

    /// Build a store from loaded blocks; new ids continue above the highest one
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut report = Self::new();
        report.replace_all(blocks);
        report
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Swap in a whole new block list (project load)
    pub fn replace_all(&mut self, blocks: Vec<Block>) {
        for block in &blocks {
            self.ids.observe(block.id);
        }
        self.blocks = blocks;
        self.bump();
    }

    /// Create a block with default payload and append it
    pub fn create(&mut self, block_type: BlockType) -> BlockId {
        let id = self
            .ids
            .allocate()
            .unwrap_or_else(|| self.lowest_unused_id());
        log::debug!("Creating {block_type} block {id}");
        self.append(Block::new(id, block_type));
        id
    }

    /// Smallest positive id not held by any block
    fn lowest_unused_id(&self) -> BlockId {
        let mut used: Vec<u64> = self.blocks.iter().map(|b| b.id.0).collect();
        used.sort_unstable();
        used.dedup();
        let mut candidate = 1;
        for id in used {
            if id > candidate {
                break;
            }
            if id == candidate {
                candidate += 1;
            }
        }
        BlockId(candidate)
    }

    pub fn append(&mut self, block: Block) {
        self.ids.observe(block.id);
        self.blocks.push(block);
        self.bump();
    }

    /// Remove the block with `id`, keeping the order of the rest
    pub fn remove(&mut self, id: BlockId) -> Option<Block> {
        let index = self.position(id)?;
        let removed = self.blocks.remove(index);
        self.bump();
        Some(removed)
    }

    pub fn find(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Splice the block at `from` out and reinsert it before `to` in the
    /// shortened list. `to` past the end appends.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), EditError> {
        let len = self.blocks.len();
        if from >= len {
            return Err(EditError::IndexOutOfRange { index: from, len });
        }
        let block = self.blocks.remove(from);
        let to = to.min(self.blocks.len());
        self.blocks.insert(to, block);
        log::debug!("Moved block from position {from} to {to}");
        self.bump();
        Ok(())
    }

    /// Header data of the first header block, used for the declarant fallback
    pub fn header(&self) -> Option<&HeaderData> {
        self.blocks.iter().find_map(|b| match &b.kind {
            BlockKind::Header { data } => Some(data),
            _ => None,
        })
    }

    /// Write any string field; returns whether the block had that field
    pub fn set_field(&mut self, id: BlockId, field: &FieldPath, value: impl Into<String>) -> bool {
        let Some(slot) = self.find_mut(id).and_then(|b| b.field_mut(field)) else {
            return false;
        };
        *slot = value.into();
        self.bump();
        true
    }

    pub fn set_content(&mut self, id: BlockId, value: impl Into<String>) -> bool {
        self.set_field(id, &FieldPath::Content, value)
    }

    /// Caption of an image or table block
    pub fn set_caption(&mut self, id: BlockId, value: impl Into<String>) -> bool {
        self.set_field(id, &FieldPath::Caption, value)
    }

    pub fn set_header_field(
        &mut self,
        id: BlockId,
        field: HeaderField,
        value: impl Into<String>,
    ) -> bool {
        self.set_field(id, &FieldPath::Header(field), value)
    }

    pub fn set_ref_field(&mut self, id: BlockId, field: RefField, value: impl Into<String>) -> bool {
        self.set_field(id, &FieldPath::Ref(field), value)
    }

    pub fn set_ai_field(&mut self, id: BlockId, field: AiField, value: impl Into<String>) -> bool {
        self.set_field(id, &FieldPath::Ai(field), value)
    }

    pub fn set_table_cell(
        &mut self,
        id: BlockId,
        row: usize,
        col: usize,
        value: impl Into<String>,
    ) -> bool {
        self.set_field(id, &FieldPath::Cell { row, col }, value)
    }

    pub fn set_ref_type(&mut self, id: BlockId, ref_type: RefType) -> bool {
        let Some(Block {
            kind: BlockKind::Ref { ref_type: current, .. },
            ..
        }) = self.find_mut(id)
        else {
            return false;
        };
        *current = ref_type;
        self.bump();
        true
    }

    pub fn set_ai_used(&mut self, id: BlockId, used: AiUsed) -> bool {
        let Some(Block {
            kind: BlockKind::Ai { used: current, .. },
            ..
        }) = self.find_mut(id)
        else {
            return false;
        };
        *current = used;
        self.bump();
        true
    }

    /// Resize a table; `None` when `id` is not a table
    pub fn set_table_columns(&mut self, id: BlockId, columns: usize) -> Option<usize> {
        let applied = self.table_mut(id)?.set_columns(columns);
        self.bump();
        Some(applied)
    }

    pub fn add_table_row(&mut self, id: BlockId) -> bool {
        let Some(table) = self.table_mut(id) else {
            return false;
        };
        table.add_row();
        self.bump();
        true
    }

    /// Remove the last table row. `Ok(false)` when `id` is not a table.
    pub fn remove_table_row(&mut self, id: BlockId) -> Result<bool, EditError> {
        let Some(table) = self.table_mut(id) else {
            return Ok(false);
        };
        if table.remove_last_row().is_none() {
            log::debug!("Refusing to remove the header row of table {id}");
            return Err(EditError::LastTableRow);
        }
        self.bump();
        Ok(true)
    }

    fn table_mut(&mut self, id: BlockId) -> Option<&mut crate::models::TableBlock> {
        match self.find_mut(id) {
            Some(Block {
                kind: BlockKind::Table(table),
                ..
            }) => Some(table),
            _ => None,
        }
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}
