use crate::editing::Report;
use crate::models::{AiData, AiUsed, BlockId, BlockKind, HeaderData, RefData, RefType};

/// Placeholder used when no declarant name is available anywhere
pub const STUDENT_PLACEHOLDER: &str = "[Nombre del estudiante]";

/// Immutable preview of the whole report, one entry per rendered block
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub blocks: Vec<RenderBlock>,
}

/// Preview fragment tagged with the block it came from
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBlock {
    pub id: BlockId,
    pub fragment: Fragment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    pub institution: String,
    pub subject: String,
    /// Only present when the term field is non-empty
    pub term: Option<String>,
    pub professor: String,
    pub student: String,
    /// Only present when the group field is non-empty
    pub group: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AiDeclaration {
    NotUsed {
        declarant: String,
    },
    Used {
        student: String,
        tool: String,
        date: String,
        purpose: String,
        prompt: String,
        attachments: Option<String>,
        raw_response: String,
    },
}

/// Display-independent content of one preview block.
///
/// Text is carried raw; display surfaces escape it for their own medium.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Title(String),
    Subtitle(String),
    Paragraph(String),
    Code(String),
    Figure {
        number: usize,
        /// Image data URL, `None` when no image has been chosen yet
        source: Option<String>,
        caption: String,
    },
    Table {
        number: usize,
        header: Vec<String>,
        body: Vec<Vec<String>>,
        caption: String,
    },
    Header(HeaderView),
    Reference {
        number: usize,
        ref_type: RefType,
        data: RefData,
    },
    AiDeclaration(AiDeclaration),
}

/// Figure / table / reference numbering, reset per render
#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub figure: usize,
    pub table: usize,
    pub reference: usize,
}

impl Counters {
    pub fn next_figure(&mut self) -> usize {
        self.figure += 1;
        self.figure
    }

    pub fn next_table(&mut self) -> usize {
        self.table += 1;
        self.table
    }

    pub fn next_reference(&mut self) -> usize {
        self.reference += 1;
        self.reference
    }
}

/// Name to print on an AI declaration: the block's own name, then the
/// report header's student name, then a placeholder
pub fn declarant_name(ai: &AiData, header: Option<&HeaderData>) -> String {
    if !ai.name.is_empty() {
        return ai.name.clone();
    }
    match header {
        Some(header) if !header.name.is_empty() => header.name.clone(),
        _ => STUDENT_PLACEHOLDER.to_string(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Build the preview model for a report
pub fn preview(report: &Report) -> RenderModel {
    let mut counters = Counters::default();
    let header = report.header();

    let blocks = report
        .blocks()
        .iter()
        .filter_map(|block| {
            let fragment = match &block.kind {
                BlockKind::Title => Fragment::Title(block.content.clone()),
                BlockKind::Subtitle => Fragment::Subtitle(block.content.clone()),
                BlockKind::Text => Fragment::Paragraph(block.content.clone()),
                BlockKind::Code => Fragment::Code(block.content.clone()),
                BlockKind::Image { caption } => Fragment::Figure {
                    number: counters.next_figure(),
                    source: non_empty(&block.content),
                    caption: caption.clone(),
                },
                BlockKind::Table(table) => {
                    // Numbered even when empty so later tables keep their numbers
                    let number = counters.next_table();
                    let header_row = table.header()?;
                    Fragment::Table {
                        number,
                        header: header_row.to_vec(),
                        body: table.body().to_vec(),
                        caption: table.caption().to_string(),
                    }
                }
                BlockKind::Header { data } => Fragment::Header(HeaderView {
                    institution: data.inst.clone(),
                    subject: data.subject.clone(),
                    term: non_empty(&data.term),
                    professor: data.prof.clone(),
                    student: data.name.clone(),
                    group: non_empty(&data.group),
                    date: data.date.clone(),
                }),
                BlockKind::Ref { ref_type, data } => Fragment::Reference {
                    number: counters.next_reference(),
                    ref_type: ref_type.clone(),
                    data: data.clone(),
                },
                BlockKind::Ai { used, data } => Fragment::AiDeclaration(match used {
                    AiUsed::No => AiDeclaration::NotUsed {
                        declarant: declarant_name(data, header),
                    },
                    AiUsed::Yes => AiDeclaration::Used {
                        student: declarant_name(data, header),
                        tool: data.ai_tool.clone(),
                        date: data.date.clone(),
                        purpose: data.purpose.clone(),
                        prompt: data.prompt.clone(),
                        attachments: non_empty(&data.attachments),
                        raw_response: data.raw_response.clone(),
                    },
                }),
            };
            Some(RenderBlock {
                id: block.id,
                fragment,
            })
        })
        .collect();

    RenderModel { blocks }
}
