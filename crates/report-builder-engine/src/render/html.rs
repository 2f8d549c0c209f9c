use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::render::preview::{AiDeclaration, Fragment, HeaderView, RenderModel};
use crate::render::reference::format_reference_html;

/// Render the preview model as an HTML fragment for a browser host.
///
/// All user text goes through `html-escape`; reference markup comes from
/// [`format_reference_html`].
pub fn render_html(model: &RenderModel) -> String {
    model
        .blocks
        .iter()
        .map(|block| render_fragment(&block.fragment))
        .collect()
}

fn render_fragment(fragment: &Fragment) -> String {
    match fragment {
        Fragment::Title(text) => format!("<h1 class=\"p-title\">{}</h1>", encode_text(text)),
        Fragment::Subtitle(text) => {
            format!("<h2 class=\"p-subtitle\">{}</h2>", encode_text(text))
        }
        Fragment::Paragraph(text) => format!("<p class=\"p-text\">{}</p>", encode_text(text)),
        Fragment::Code(text) => format!(
            "<pre class=\"code-preview\"><code>{}</code></pre>",
            encode_text(text)
        ),
        Fragment::Figure {
            number,
            source,
            caption,
        } => {
            let image = match source {
                Some(src) => format!(
                    "<img src=\"{}\" alt=\"Figura {number}\">",
                    encode_double_quoted_attribute(src)
                ),
                None => "<div class=\"placeholder\">Imagen no seleccionada</div>".to_string(),
            };
            format!(
                "<div class=\"preview-image-container\">{image}<p class=\"figure-caption\"><strong>Figura {number}:</strong> <em>{}</em></p></div>",
                encode_text(caption)
            )
        }
        Fragment::Table {
            number,
            header,
            body,
            caption,
        } => {
            let head: String = header
                .iter()
                .map(|cell| format!("<th>{}</th>", encode_text(cell)))
                .collect();
            let rows: String = body
                .iter()
                .map(|row| {
                    let cells: String = row
                        .iter()
                        .map(|cell| format!("<td>{}</td>", encode_text(cell)))
                        .collect();
                    format!("<tr>{cells}</tr>")
                })
                .collect();
            format!(
                "<div class=\"preview-table-container\"><table><thead><tr>{head}</tr></thead><tbody>{rows}</tbody></table><p class=\"table-caption\"><strong>Tabla {number}:</strong> <em>{}</em></p></div>",
                encode_text(caption)
            )
        }
        Fragment::Header(view) => render_header(view),
        Fragment::Reference {
            number,
            ref_type,
            data,
        } => format!(
            "<div class=\"p-ref-ieee\"><div class=\"ref-num\">[{number}]</div><div class=\"ref-content\">{}</div></div>",
            format_reference_html(ref_type, data)
        ),
        Fragment::AiDeclaration(declaration) => render_ai(declaration),
    }
}

fn render_header(view: &HeaderView) -> String {
    let term = view
        .term
        .as_deref()
        .map(|term| format!(" ({}° Cuatrimestre)", encode_text(term)))
        .unwrap_or_default();
    let group = view
        .group
        .as_deref()
        .map(|group| format!(" | <strong>Grupo:</strong> {}", encode_text(group)))
        .unwrap_or_default();

    format!(
        "<div class=\"p-header\">\
         <p><strong>Institución:</strong> {}</p>\
         <p><strong>Materia:</strong> {}{term}</p>\
         <p><strong>Profesor:</strong> {}</p>\
         <p><strong>Alumno:</strong> {}{group}</p>\
         <p><strong>Fecha:</strong> {}</p>\
         <hr></div>",
        encode_text(&view.institution),
        encode_text(&view.subject),
        encode_text(&view.professor),
        encode_text(&view.student),
        encode_text(&view.date),
    )
}

fn render_ai(declaration: &AiDeclaration) -> String {
    match declaration {
        AiDeclaration::NotUsed { declarant } => format!(
            "<div class=\"p-ai-declaration\"><p class=\"p-text\">\
             Yo, <strong>{}</strong>, declaro que <strong>NO</strong> he utilizado herramientas de \
             Inteligencia Artificial para la elaboración de este trabajo académico. \
             Afirmo que cuento con evidencias físicas y/o digitales que demuestran mi autoría, \
             incluyendo pero no limitándose a: documentos manuscritos, materiales impresos con \
             anotaciones o subrayado, historial de versiones de documentos electrónicos, o commits \
             en repositorios de código.<br><br>\
             Reconozco y acepto que el profesor se reserva el derecho de solicitar dichas evidencias \
             en cualquier momento, especialmente cuando existan sospechas o se detecten conductas \
             que atenten contra la integridad académica, tales como plagio o uso no reportado de \
             herramientas de IA.</p></div>",
            encode_text(declarant)
        ),
        AiDeclaration::Used {
            student,
            tool,
            date,
            purpose,
            prompt,
            attachments,
            raw_response,
        } => {
            let attachments = attachments
                .as_deref()
                .map(|a| {
                    format!(
                        "<p><strong>Archivos suministrados:</strong> {}</p>",
                        encode_text(a)
                    )
                })
                .unwrap_or_default();
            format!(
                "<div class=\"p-ai-declaration\">\
                 <p><strong>Nombre del estudiante:</strong> {}</p>\
                 <p><strong>IA utilizada:</strong> {}</p>\
                 <p><strong>Fecha de uso:</strong> {}</p>\
                 <p><strong>Propósito:</strong> {}</p>\
                 <p><strong>Prompt utilizado:</strong></p><pre>{}</pre>\
                 {attachments}\
                 <p><strong>Respuesta en crudo (raw):</strong></p><pre>{}</pre></div>",
                encode_text(student),
                encode_text(tool),
                encode_text(date),
                encode_text(purpose),
                encode_text(prompt),
                encode_text(raw_response),
            )
        }
    }
}
