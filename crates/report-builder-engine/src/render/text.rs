use crate::editing::Report;
use crate::models::{AiData, AiUsed, BlockKind, HeaderData};
use crate::render::preview::{Counters, declarant_name};
use crate::render::reference::format_reference_text;
use crate::render::table::render_table;

/// File name offered for plain-text exports
pub const EXPORT_FILE_NAME: &str = "reporte_academico.txt";

const WIDE_RULE: usize = 60;
const NARROW_RULE: usize = 40;

fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}

/// Export the report as a monospaced plain-text document.
///
/// Uses its own figure/table/reference counters, independent of any preview.
pub fn export_text(report: &Report) -> String {
    let mut counters = Counters::default();
    let header = report.header();
    let mut lines = vec![
        rule('=', WIDE_RULE),
        "REPORTE ACADÉMICO - EXPORTACIÓN TXT".to_string(),
        rule('=', WIDE_RULE),
        String::new(),
    ];

    for block in report.blocks() {
        let content = &block.content;
        match &block.kind {
            BlockKind::Header { data } => export_header(&mut lines, data),
            BlockKind::Title => lines.extend([
                String::new(),
                rule('=', WIDE_RULE),
                content.to_uppercase(),
                rule('=', WIDE_RULE),
                String::new(),
            ]),
            BlockKind::Subtitle => lines.extend([
                String::new(),
                rule('-', NARROW_RULE),
                content.clone(),
                rule('-', NARROW_RULE),
                String::new(),
            ]),
            BlockKind::Text => lines.extend([content.clone(), String::new()]),
            BlockKind::Code => lines.extend([
                String::new(),
                "[INICIO DE CÓDIGO]".to_string(),
                rule('-', NARROW_RULE),
                content.clone(),
                rule('-', NARROW_RULE),
                "[FIN DE CÓDIGO]".to_string(),
                String::new(),
            ]),
            BlockKind::Image { caption } => lines.extend([
                String::new(),
                format!("[FIGURA {}]", counters.next_figure()),
                format!("Descripción: {}", or_no_description(caption)),
                "(La imagen no puede ser exportada a formato TXT)".to_string(),
                String::new(),
            ]),
            BlockKind::Table(table) => {
                lines.push(String::new());
                lines.push(format!("[TABLA {}]", counters.next_table()));
                lines.push(rule('-', WIDE_RULE));
                lines.extend(render_table(table));
                lines.push(rule('-', WIDE_RULE));
                lines.push(format!("Descripción: {}", or_no_description(table.caption())));
                lines.push(String::new());
            }
            BlockKind::Ref { ref_type, data } => {
                lines.push(String::new());
                lines.push(format!(
                    "[{}] {}",
                    counters.next_reference(),
                    format_reference_text(ref_type, data)
                ));
            }
            BlockKind::Ai { used, data } => export_ai(&mut lines, *used, data, header),
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn or_no_description(caption: &str) -> &str {
    if caption.is_empty() {
        "Sin descripción"
    } else {
        caption
    }
}

fn export_header(lines: &mut Vec<String>, data: &HeaderData) {
    lines.extend([
        "DATOS DEL ESTUDIANTE".to_string(),
        rule('-', NARROW_RULE),
        format!("Institución: {}", data.inst),
        format!("Materia: {} ({}° Cuatrimestre)", data.subject, data.term),
        format!("Profesor: {}", data.prof),
        format!("Alumno: {} | Grupo: {}", data.name, data.group),
        format!("Fecha: {}", data.date),
        String::new(),
    ]);
}

fn export_ai(lines: &mut Vec<String>, used: AiUsed, ai: &AiData, header: Option<&HeaderData>) {
    let declarant = declarant_name(ai, header);
    lines.extend([
        String::new(),
        rule('=', WIDE_RULE),
        "DECLARACIÓN DE USO DE INTELIGENCIA ARTIFICIAL".to_string(),
        rule('=', WIDE_RULE),
        String::new(),
    ]);

    match used {
        AiUsed::No => lines.extend([
            format!("Yo, {declarant}, declaro que NO he utilizado herramientas de"),
            "Inteligencia Artificial para la elaboración de este trabajo académico.".to_string(),
            String::new(),
            "Afirmo que cuento con evidencias físicas y/o digitales que demuestran".to_string(),
            "mi autoría, incluyendo: documentos manuscritos, materiales impresos con".to_string(),
            "anotaciones o subrayado, historial de versiones de documentos electrónicos,"
                .to_string(),
            "o commits en repositorios de código.".to_string(),
            String::new(),
            "Reconozco que el profesor se reserva el derecho de solicitar dichas".to_string(),
            "evidencias cuando existan sospechas o se detecten conductas que atenten".to_string(),
            "contra la integridad académica.".to_string(),
            String::new(),
        ]),
        AiUsed::Yes => {
            lines.extend([
                format!("Estudiante: {declarant}"),
                format!("IA utilizada: {}", ai.ai_tool),
                format!("Fecha: {}", ai.date),
                format!("Propósito: {}", ai.purpose),
                String::new(),
                "Prompt utilizado:".to_string(),
                rule('-', NARROW_RULE),
                ai.prompt.clone(),
                rule('-', NARROW_RULE),
                String::new(),
            ]);
            if !ai.attachments.is_empty() {
                lines.push(format!("Archivos suministrados: {}", ai.attachments));
                lines.push(String::new());
            }
            lines.extend([
                "Respuesta en crudo:".to_string(),
                rule('-', NARROW_RULE),
                ai.raw_response.clone(),
                rule('-', NARROW_RULE),
                String::new(),
            ]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AiField, BlockType, HeaderField, RefField, RefType};
    use pretty_assertions::assert_eq;

    const BANNER: &str = "============================================================\n\
                          REPORTE ACADÉMICO - EXPORTACIÓN TXT\n\
                          ============================================================\n\n";

    #[test]
    fn test_empty_report_is_just_the_banner() {
        assert_eq!(export_text(&Report::new()), BANNER);
    }

    #[test]
    fn test_title_subtitle_and_text_templates() {
        let mut report = Report::new();
        let title = report.create(BlockType::Title);
        let subtitle = report.create(BlockType::Subtitle);
        let text = report.create(BlockType::Text);
        report.set_content(title, "Práctica uno");
        report.set_content(subtitle, "Introducción");
        report.set_content(text, "Hola mundo");

        let exported = export_text(&report);

        let expected = format!(
            "{BANNER}\n{eq}\nPRÁCTICA UNO\n{eq}\n\n\n{dash}\nIntroducción\n{dash}\n\nHola mundo\n\n",
            eq = "=".repeat(60),
            dash = "-".repeat(40),
        );
        assert_eq!(exported, expected);
    }

    #[test]
    fn test_code_block_is_framed() {
        let mut report = Report::new();
        let code = report.create(BlockType::Code);
        report.set_content(code, "fn main() {}");

        let exported = export_text(&report);

        let dash = "-".repeat(40);
        assert!(exported.ends_with(&format!(
            "\n[INICIO DE CÓDIGO]\n{dash}\nfn main() {{}}\n{dash}\n[FIN DE CÓDIGO]\n\n"
        )));
    }

    #[test]
    fn test_header_section() {
        let mut report = Report::new();
        let id = report.create(BlockType::Header);
        report.set_header_field(id, HeaderField::Inst, "UPY");
        report.set_header_field(id, HeaderField::Subject, "Redes");
        report.set_header_field(id, HeaderField::Term, "5");
        report.set_header_field(id, HeaderField::Name, "Ana");
        report.set_header_field(id, HeaderField::Group, "B");

        let exported = export_text(&report);

        assert!(exported.contains("DATOS DEL ESTUDIANTE\n"));
        assert!(exported.contains("Institución: UPY\n"));
        assert!(exported.contains("Materia: Redes (5° Cuatrimestre)\n"));
        assert!(exported.contains("Alumno: Ana | Grupo: B\n"));
    }

    #[test]
    fn test_figures_tables_and_references_are_numbered() {
        let mut report = Report::new();
        let image = report.create(BlockType::Image);
        report.create(BlockType::Image);
        let table = report.create(BlockType::Table);
        let reference = report.create(BlockType::Ref);
        report.set_caption(image, "Diagrama");
        report.set_caption(table, "Resultados");
        report.set_ref_type(reference, RefType::Article);
        report.set_ref_field(reference, RefField::Author, "A");
        report.set_ref_field(reference, RefField::Title, "T");
        report.set_ref_field(reference, RefField::Source, "S");
        report.set_ref_field(reference, RefField::Year, "2024");

        let exported = export_text(&report);

        assert!(exported.contains("[FIGURA 1]\nDescripción: Diagrama\n"));
        assert!(exported.contains("[FIGURA 2]\nDescripción: Sin descripción\n"));
        assert!(exported.contains("[TABLA 1]\n"));
        assert!(exported.contains("Descripción: Resultados\n"));
        assert!(exported.ends_with("\n[1] A, \"T\", S, 2024.\n"));
    }

    #[test]
    fn test_reference_lines_use_export_layout() {
        // Given a web reference and one with a type the editor does not know
        let mut report = Report::new();
        let web = report.create(BlockType::Ref);
        let unknown = report.create(BlockType::Ref);
        for (field, value) in [
            (RefField::Author, "A"),
            (RefField::Title, "T"),
            (RefField::Source, "S"),
            (RefField::Year, "2024"),
            (RefField::Url, "http://x"),
        ] {
            report.set_ref_field(web, field, value);
        }
        report.set_ref_type(unknown, RefType::Other("video".to_string()));
        report.set_ref_field(unknown, RefField::Author, "B");

        // When exporting
        let exported = export_text(&report);

        // Then both lines follow the text-export templates
        assert!(exported.contains("\n[1] A, \"T\", S, 2024. [En línea]. Disponible: http://x\n"));
        assert!(exported.ends_with("\n[2] B, \"\", , .\n"));
    }

    #[test]
    fn test_table_section_layout() {
        let mut report = Report::new();
        let table = report.create(BlockType::Table);
        report.set_table_columns(table, 1);
        report.remove_table_row(table).unwrap();
        report.set_table_cell(table, 0, 0, "Dato");

        let exported = export_text(&report);

        let expected_tail = format!(
            "\n[TABLA 1]\n{rule}\n| Dato       | \n+------------+-\n{rule}\nDescripción: Sin descripción\n\n",
            rule = "-".repeat(60)
        );
        assert!(exported.ends_with(&expected_tail), "got:\n{exported}");
    }

    #[test]
    fn test_ai_not_used_names_header_student() {
        let mut report = Report::new();
        let header = report.create(BlockType::Header);
        report.create(BlockType::Ai);
        report.set_header_field(header, HeaderField::Name, "Luis");

        let exported = export_text(&report);

        assert!(exported.contains("DECLARACIÓN DE USO DE INTELIGENCIA ARTIFICIAL\n"));
        assert!(exported.contains("Yo, Luis, declaro que NO he utilizado herramientas de\n"));
    }

    #[test]
    fn test_ai_used_disclosure() {
        let mut report = Report::new();
        let ai = report.create(BlockType::Ai);
        report.set_ai_used(ai, AiUsed::Yes);
        report.set_ai_field(ai, AiField::Name, "Ana");
        report.set_ai_field(ai, AiField::AiTool, "Claude");
        report.set_ai_field(ai, AiField::Prompt, "explica TCP");
        report.set_ai_field(ai, AiField::RawResponse, "TCP es...");

        let exported = export_text(&report);
        let dash = "-".repeat(40);

        assert!(exported.contains("Estudiante: Ana\nIA utilizada: Claude\n"));
        assert!(exported.contains(&format!("Prompt utilizado:\n{dash}\nexplica TCP\n{dash}\n\n")));
        assert!(!exported.contains("Archivos suministrados"));
        assert!(exported.ends_with(&format!("Respuesta en crudo:\n{dash}\nTCP es...\n{dash}\n\n")));
    }
}
