pub mod block;
pub mod field;
pub mod table;

pub use block::{AiData, AiUsed, Block, BlockId, BlockKind, BlockType, HeaderData, RefData, RefType};
pub use field::{AiField, FieldPath, FieldPathError, HeaderField, RefField};
pub use table::{MAX_COLUMNS, MIN_COLUMNS, TableBlock};
