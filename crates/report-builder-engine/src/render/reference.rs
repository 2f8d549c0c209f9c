//! IEEE-style bibliographic references.

use html_escape::encode_text;

use crate::models::{RefData, RefType};

/// Plain-text IEEE reference.
///
/// ```rust
/// use report_builder_engine::models::{RefData, RefType};
/// use report_builder_engine::render::format_reference;
///
/// let data = RefData {
///     author: "A".into(),
///     title: "T".into(),
///     source: "S".into(),
///     year: "2024".into(),
///     url: "http://ignored".into(),
/// };
/// assert_eq!(format_reference(&RefType::Book, &data), r#"A, "T". S, 2024."#);
/// ```
pub fn format_reference(ref_type: &RefType, data: &RefData) -> String {
    let RefData {
        author,
        title,
        source,
        year,
        url,
    } = data;
    match ref_type {
        RefType::Book => format!("{author}, \"{title}\". {source}, {year}."),
        RefType::Web => {
            format!("{author}, \"{title},\" {source}, {year}. [En línea]. Disponible: {url}")
        }
        RefType::Article => format!("{author}, \"{title},\" {source}, {year}."),
        RefType::Other(_) => String::new(),
    }
}

/// Reference line for the plain-text export.
///
/// Differs from [`format_reference`]: the title comma sits outside the quotes,
/// and types without a template of their own use the article layout.
pub fn format_reference_text(ref_type: &RefType, data: &RefData) -> String {
    let RefData {
        author,
        title,
        source,
        year,
        url,
    } = data;
    match ref_type {
        RefType::Book => format!("{author}, \"{title}\". {source}, {year}."),
        RefType::Web => {
            format!("{author}, \"{title}\", {source}, {year}. [En línea]. Disponible: {url}")
        }
        RefType::Article | RefType::Other(_) => {
            format!("{author}, \"{title}\", {source}, {year}.")
        }
    }
}

/// Markup variant of [`format_reference`].
///
/// Every user value is escaped; the only literal markup emitted is the `<em>`
/// around the book title or the web/article source.
pub fn format_reference_html(ref_type: &RefType, data: &RefData) -> String {
    let author = encode_text(&data.author);
    let title = encode_text(&data.title);
    let source = encode_text(&data.source);
    let year = encode_text(&data.year);
    match ref_type {
        RefType::Book => format!("{author}, <em>{title}</em>. {source}, {year}."),
        RefType::Web => {
            let url = encode_text(&data.url);
            format!(
                "{author}, \"{title},\" <em>{source}</em>, {year}. [En línea]. Disponible: {url}"
            )
        }
        RefType::Article => format!("{author}, \"{title},\" <em>{source}</em>, {year}."),
        RefType::Other(_) => String::new(),
    }
}
