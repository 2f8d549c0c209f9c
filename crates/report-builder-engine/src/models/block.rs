use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, EnumString};

use crate::models::field::{AiField, FieldPath, HeaderField, RefField};
use crate::models::table::TableBlock;

/// Stable identifier of a block within a report.
///
/// Serialized as a bare number so project files written by older tools
/// (which used millisecond timestamps) load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of block tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BlockType {
    Header,
    Title,
    Subtitle,
    Text,
    Code,
    Image,
    Table,
    Ref,
    Ai,
}

impl BlockType {
    /// Human readable label used by editor surfaces
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Header => "Encabezado",
            BlockType::Title => "Título",
            BlockType::Subtitle => "Subtítulo",
            BlockType::Text => "Texto",
            BlockType::Code => "Código",
            BlockType::Image => "Imagen",
            BlockType::Table => "Tabla",
            BlockType::Ref => "Referencia",
            BlockType::Ai => "Declaración IA",
        }
    }
}

/// Student / course data shown at the top of the report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderData {
    pub name: String,
    pub group: String,
    pub subject: String,
    pub prof: String,
    pub inst: String,
    pub term: String,
    pub date: String,
}

impl HeaderData {
    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::Name => &self.name,
            HeaderField::Group => &self.group,
            HeaderField::Subject => &self.subject,
            HeaderField::Prof => &self.prof,
            HeaderField::Inst => &self.inst,
            HeaderField::Term => &self.term,
            HeaderField::Date => &self.date,
        }
    }

    pub fn get_mut(&mut self, field: HeaderField) -> &mut String {
        match field {
            HeaderField::Name => &mut self.name,
            HeaderField::Group => &mut self.group,
            HeaderField::Subject => &mut self.subject,
            HeaderField::Prof => &mut self.prof,
            HeaderField::Inst => &mut self.inst,
            HeaderField::Term => &mut self.term,
            HeaderField::Date => &mut self.date,
        }
    }
}

/// Citation style selector for reference blocks.
///
/// Values outside the known set are kept verbatim so a project file survives
/// a load/save cycle untouched; formatters render them as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    #[default]
    Web,
    Book,
    Article,
    #[serde(untagged)]
    Other(String),
}

impl RefType {
    /// Next type in editor cycling order (web → book → article → web)
    pub fn next(&self) -> RefType {
        match self {
            RefType::Web => RefType::Book,
            RefType::Book => RefType::Article,
            RefType::Article | RefType::Other(_) => RefType::Web,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            RefType::Web => "Página Web",
            RefType::Book => "Libro",
            RefType::Article => "Artículo",
            RefType::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefData {
    pub author: String,
    pub title: String,
    pub source: String,
    pub year: String,
    pub url: String,
}

impl RefData {
    pub fn get(&self, field: RefField) -> &str {
        match field {
            RefField::Author => &self.author,
            RefField::Title => &self.title,
            RefField::Source => &self.source,
            RefField::Year => &self.year,
            RefField::Url => &self.url,
        }
    }

    pub fn get_mut(&mut self, field: RefField) -> &mut String {
        match field {
            RefField::Author => &mut self.author,
            RefField::Title => &mut self.title,
            RefField::Source => &mut self.source,
            RefField::Year => &mut self.year,
            RefField::Url => &mut self.url,
        }
    }
}

/// Whether AI tools were used for the work
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiUsed {
    Yes,
    #[default]
    No,
}

impl AiUsed {
    pub fn toggled(self) -> AiUsed {
        match self {
            AiUsed::Yes => AiUsed::No,
            AiUsed::No => AiUsed::Yes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiData {
    pub name: String,
    pub ai_tool: String,
    pub date: String,
    pub purpose: String,
    pub prompt: String,
    pub attachments: String,
    pub raw_response: String,
}

impl AiData {
    pub fn get(&self, field: AiField) -> &str {
        match field {
            AiField::Name => &self.name,
            AiField::AiTool => &self.ai_tool,
            AiField::Date => &self.date,
            AiField::Purpose => &self.purpose,
            AiField::Prompt => &self.prompt,
            AiField::Attachments => &self.attachments,
            AiField::RawResponse => &self.raw_response,
        }
    }

    pub fn get_mut(&mut self, field: AiField) -> &mut String {
        match field {
            AiField::Name => &mut self.name,
            AiField::AiTool => &mut self.ai_tool,
            AiField::Date => &mut self.date,
            AiField::Purpose => &mut self.purpose,
            AiField::Prompt => &mut self.prompt,
            AiField::Attachments => &mut self.attachments,
            AiField::RawResponse => &mut self.raw_response,
        }
    }
}

/// Variant payload of a block, tagged by `type` in the project file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Header {
        #[serde(rename = "hData", default)]
        data: HeaderData,
    },
    Title,
    Subtitle,
    Text,
    Code,
    Image {
        #[serde(default)]
        caption: String,
    },
    Table(TableBlock),
    Ref {
        #[serde(rename = "refType", default)]
        ref_type: RefType,
        #[serde(rename = "refData", default)]
        data: RefData,
    },
    Ai {
        #[serde(rename = "aiUsed", default)]
        used: AiUsed,
        #[serde(rename = "aiData", default)]
        data: AiData,
    },
}

impl BlockKind {
    /// Default payload for a freshly created block of the given type
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Header => BlockKind::Header {
                data: HeaderData::default(),
            },
            BlockType::Title => BlockKind::Title,
            BlockType::Subtitle => BlockKind::Subtitle,
            BlockType::Text => BlockKind::Text,
            BlockType::Code => BlockKind::Code,
            BlockType::Image => BlockKind::Image {
                caption: String::new(),
            },
            BlockType::Table => BlockKind::Table(TableBlock::default()),
            BlockType::Ref => BlockKind::Ref {
                ref_type: RefType::default(),
                data: RefData::default(),
            },
            BlockType::Ai => BlockKind::Ai {
                used: AiUsed::default(),
                data: AiData::default(),
            },
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Header { .. } => BlockType::Header,
            BlockKind::Title => BlockType::Title,
            BlockKind::Subtitle => BlockType::Subtitle,
            BlockKind::Text => BlockType::Text,
            BlockKind::Code => BlockType::Code,
            BlockKind::Image { .. } => BlockType::Image,
            BlockKind::Table(_) => BlockType::Table,
            BlockKind::Ref { .. } => BlockType::Ref,
            BlockKind::Ai { .. } => BlockType::Ai,
        }
    }
}

/// One content unit of the report.
///
/// The `type` tag is fixed at creation; only the payload behind it is
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub(crate) id: BlockId,
    #[serde(default)]
    pub(crate) content: String,
    #[serde(flatten)]
    pub(crate) kind: BlockKind,
}

impl Block {
    pub fn new(id: BlockId, block_type: BlockType) -> Self {
        Self {
            id,
            content: String::new(),
            kind: BlockKind::default_for(block_type),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn table(&self) -> Option<&TableBlock> {
        match &self.kind {
            BlockKind::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Read the current value behind a field path, if this block has it
    pub fn field_value(&self, field: &FieldPath) -> Option<&str> {
        match (field, &self.kind) {
            (FieldPath::Content, _) => Some(&self.content),
            (FieldPath::Caption, BlockKind::Image { caption }) => Some(caption),
            (FieldPath::Caption, BlockKind::Table(table)) => Some(table.caption()),
            (FieldPath::Header(f), BlockKind::Header { data }) => Some(data.get(*f)),
            (FieldPath::Ref(f), BlockKind::Ref { data, .. }) => Some(data.get(*f)),
            (FieldPath::Ai(f), BlockKind::Ai { data, .. }) => Some(data.get(*f)),
            (FieldPath::Cell { row, col }, BlockKind::Table(table)) => {
                table.rows().get(*row).and_then(|r| r.get(*col)).map(String::as_str)
            }
            _ => None,
        }
    }

    /// Mutable access to the string behind a field path.
    ///
    /// Returns `None` when the block's variant has no such field or a table
    /// cell address is out of range.
    pub(crate) fn field_mut(&mut self, field: &FieldPath) -> Option<&mut String> {
        match (field, &mut self.kind) {
            (FieldPath::Content, _) => Some(&mut self.content),
            (FieldPath::Caption, BlockKind::Image { caption }) => Some(caption),
            (FieldPath::Caption, BlockKind::Table(table)) => Some(table.caption_mut()),
            (FieldPath::Header(f), BlockKind::Header { data }) => Some(data.get_mut(*f)),
            (FieldPath::Ref(f), BlockKind::Ref { data, .. }) => Some(data.get_mut(*f)),
            (FieldPath::Ai(f), BlockKind::Ai { data, .. }) => Some(data.get_mut(*f)),
            (FieldPath::Cell { row, col }, BlockKind::Table(table)) => table.cell_mut(*row, *col),
            _ => None,
        }
    }

    /// Writable fields in editor order.
    ///
    /// Reference URLs are only listed for web references, and the AI detail
    /// fields only when AI use is declared.
    pub fn editable_fields(&self) -> Vec<FieldPath> {
        match &self.kind {
            BlockKind::Header { .. } => HeaderField::ALL.iter().copied().map(FieldPath::Header).collect(),
            BlockKind::Title | BlockKind::Subtitle | BlockKind::Text | BlockKind::Code => {
                vec![FieldPath::Content]
            }
            BlockKind::Image { .. } => vec![FieldPath::Content, FieldPath::Caption],
            BlockKind::Table(table) => {
                let mut fields: Vec<FieldPath> = (0..table.rows().len())
                    .flat_map(|row| (0..table.columns()).map(move |col| FieldPath::Cell { row, col }))
                    .collect();
                fields.push(FieldPath::Caption);
                fields
            }
            BlockKind::Ref { ref_type, .. } => RefField::ALL
                .iter()
                .copied()
                .filter(|f| *f != RefField::Url || *ref_type == RefType::Web)
                .map(FieldPath::Ref)
                .collect(),
            BlockKind::Ai { used, .. } => match used {
                AiUsed::No => vec![FieldPath::Ai(AiField::Name)],
                AiUsed::Yes => AiField::ALL.iter().copied().map(FieldPath::Ai).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_block_type_parses_lowercase_tags() {
        assert_eq!(BlockType::from_str("ref").unwrap(), BlockType::Ref);
        assert_eq!(BlockType::from_str("AI").unwrap(), BlockType::Ai);
        assert_eq!(BlockType::Subtitle.to_string(), "subtitle");
        assert!(BlockType::from_str("paragraph").is_err());
    }

    #[test]
    fn test_default_payloads() {
        let table = Block::new(BlockId(1), BlockType::Table);
        let table = table.table().unwrap();
        assert_eq!(table.columns(), 3);
        assert_eq!(table.rows().len(), 2);
        assert!(table.rows().iter().flatten().all(String::is_empty));

        let reference = Block::new(BlockId(2), BlockType::Ref);
        assert!(matches!(
            reference.kind(),
            BlockKind::Ref { ref_type: RefType::Web, .. }
        ));

        let ai = Block::new(BlockId(3), BlockType::Ai);
        assert!(matches!(ai.kind(), BlockKind::Ai { used: AiUsed::No, .. }));
    }

    #[test]
    fn test_serializes_flat_record_with_type_tag() {
        let mut block = Block::new(BlockId(42), BlockType::Ai);
        block.content = "ignored".to_string();

        let value = serde_json::to_value(&block).unwrap();

        assert_eq!(value["id"], 42);
        assert_eq!(value["type"], "ai");
        assert_eq!(value["aiUsed"], "no");
        assert_eq!(value["aiData"]["rawResponse"], "");
        assert_eq!(value["aiData"]["aiTool"], "");
    }

    #[test]
    fn test_unknown_ref_type_is_preserved() {
        let json = r#"{"id":7,"type":"ref","content":"","refType":"thesis","refData":{"author":"A"}}"#;

        let block: Block = serde_json::from_str(json).unwrap();

        match block.kind() {
            BlockKind::Ref { ref_type, data } => {
                assert_eq!(*ref_type, RefType::Other("thesis".to_string()));
                assert_eq!(data.author, "A");
                assert_eq!(data.url, "");
            }
            other => panic!("expected ref block, got {other:?}"),
        }
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["refType"], "thesis");
    }

    #[test]
    fn test_missing_payload_uses_defaults() {
        let block: Block = serde_json::from_str(r#"{"id":1,"type":"image"}"#).unwrap();
        assert_eq!(block.content(), "");
        assert_eq!(block.field_value(&FieldPath::Caption), Some(""));
    }

    #[test]
    fn test_editable_fields_follow_variant_state() {
        let mut reference = Block::new(BlockId(1), BlockType::Ref);
        assert_eq!(reference.editable_fields().len(), 5);

        if let BlockKind::Ref { ref_type, .. } = &mut reference.kind {
            *ref_type = RefType::Book;
        }
        assert!(!reference.editable_fields().contains(&FieldPath::Ref(RefField::Url)));

        let mut ai = Block::new(BlockId(2), BlockType::Ai);
        assert_eq!(ai.editable_fields(), vec![FieldPath::Ai(AiField::Name)]);
        if let BlockKind::Ai { used, .. } = &mut ai.kind {
            *used = AiUsed::Yes;
        }
        assert_eq!(ai.editable_fields().len(), 7);

        let table = Block::new(BlockId(3), BlockType::Table);
        let fields = table.editable_fields();
        assert_eq!(fields.len(), 7);
        assert_eq!(fields.last(), Some(&FieldPath::Caption));
    }

    #[test]
    fn test_field_mut_rejects_foreign_fields() {
        let mut text = Block::new(BlockId(1), BlockType::Text);
        assert!(text.field_mut(&FieldPath::Caption).is_none());
        assert!(text.field_mut(&FieldPath::Header(HeaderField::Name)).is_none());
        assert!(text.field_mut(&FieldPath::Content).is_some());
    }
}
