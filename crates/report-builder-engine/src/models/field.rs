use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum HeaderField {
    Name,
    Group,
    Subject,
    Prof,
    Inst,
    Term,
    Date,
}

impl HeaderField {
    pub const ALL: [HeaderField; 7] = [
        HeaderField::Name,
        HeaderField::Group,
        HeaderField::Subject,
        HeaderField::Prof,
        HeaderField::Inst,
        HeaderField::Term,
        HeaderField::Date,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            HeaderField::Name => "Nombre del Alumno",
            HeaderField::Group => "Grupo",
            HeaderField::Subject => "Materia",
            HeaderField::Prof => "Profesor",
            HeaderField::Inst => "Institución",
            HeaderField::Term => "Cuatrimestre",
            HeaderField::Date => "Fecha",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum RefField {
    Author,
    Title,
    Source,
    Year,
    Url,
}

impl RefField {
    pub const ALL: [RefField; 5] = [
        RefField::Author,
        RefField::Title,
        RefField::Source,
        RefField::Year,
        RefField::Url,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RefField::Author => "Autor(es)",
            RefField::Title => "Título",
            RefField::Source => "Fuente/Editorial",
            RefField::Year => "Año",
            RefField::Url => "URL completa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum AiField {
    Name,
    AiTool,
    Date,
    Purpose,
    Prompt,
    Attachments,
    RawResponse,
}

impl AiField {
    pub const ALL: [AiField; 7] = [
        AiField::Name,
        AiField::AiTool,
        AiField::Date,
        AiField::Purpose,
        AiField::Prompt,
        AiField::Attachments,
        AiField::RawResponse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AiField::Name => "Nombre del estudiante",
            AiField::AiTool => "IA utilizada",
            AiField::Date => "Fecha de uso",
            AiField::Purpose => "Propósito",
            AiField::Prompt => "Prompt utilizado",
            AiField::Attachments => "Archivos adjuntos",
            AiField::RawResponse => "Respuesta en crudo",
        }
    }
}

/// Address of a writable string inside a block.
///
/// Displays and parses as the project-file path of the field:
/// `content`, `caption`, `hData.name`, `refData.url`, `aiData.prompt`,
/// `tableData[1][2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Content,
    Caption,
    Header(HeaderField),
    Ref(RefField),
    Ai(AiField),
    Cell { row: usize, col: usize },
}

impl FieldPath {
    /// Short label for editor surfaces
    pub fn label(&self) -> String {
        match self {
            FieldPath::Content => "Contenido".to_string(),
            FieldPath::Caption => "Descripción".to_string(),
            FieldPath::Header(f) => f.label().to_string(),
            FieldPath::Ref(f) => f.label().to_string(),
            FieldPath::Ai(f) => f.label().to_string(),
            FieldPath::Cell { row: 0, col } => format!("Encabezado {}", col + 1),
            FieldPath::Cell { row, col } => format!("Fila {row}, Col {}", col + 1),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Content => write!(f, "content"),
            FieldPath::Caption => write!(f, "caption"),
            FieldPath::Header(field) => write!(f, "hData.{field}"),
            FieldPath::Ref(field) => write!(f, "refData.{field}"),
            FieldPath::Ai(field) => write!(f, "aiData.{field}"),
            FieldPath::Cell { row, col } => write!(f, "tableData[{row}][{col}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field path: {0}")]
pub struct FieldPathError(pub String);

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FieldPathError(s.to_string());

        match s {
            "content" => return Ok(FieldPath::Content),
            "caption" => return Ok(FieldPath::Caption),
            _ => {}
        }

        if let Some(name) = s.strip_prefix("hData.") {
            return HeaderField::from_str(name)
                .map(FieldPath::Header)
                .map_err(|_| invalid());
        }
        if let Some(name) = s.strip_prefix("refData.") {
            return RefField::from_str(name)
                .map(FieldPath::Ref)
                .map_err(|_| invalid());
        }
        if let Some(name) = s.strip_prefix("aiData.") {
            return AiField::from_str(name)
                .map(FieldPath::Ai)
                .map_err(|_| invalid());
        }

        // tableData[row][col]
        let indices = s
            .strip_prefix("tableData[")
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(invalid)?;
        let (row, col) = indices.split_once("][").ok_or_else(invalid)?;
        let row = row.parse().map_err(|_| invalid())?;
        let col = col.parse().map_err(|_| invalid())?;
        Ok(FieldPath::Cell { row, col })
    }
}
