use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use report_builder_engine::render::{AiDeclaration, Fragment, RenderModel, format_reference};
use report_builder_engine::{AiUsed, BlockKind, FieldPath};

use crate::app::{App, Prompt};

const MAX_VALUE_WIDTH: usize = 40;

pub fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)].as_ref())
        .split(columns[0]);

    render_blocks(f, app, left[0]);
    render_fields(f, app, left[1]);

    let preview = Paragraph::new(preview_lines(&app.session.preview()))
        .block(Block::default().borders(Borders::ALL).title("Vista previa"))
        .wrap(Wrap { trim: false });
    f.render_widget(preview, columns[1]);

    render_status(f, app, rows[1]);
}

fn render_blocks(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    let items: Vec<ListItem> = app
        .session
        .report()
        .blocks()
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let summary = match block.kind() {
                BlockKind::Table(table) => {
                    format!("{}x{}", table.rows().len(), table.columns())
                }
                BlockKind::Ref { ref_type, .. } => ref_type.label().to_string(),
                BlockKind::Ai { used: AiUsed::Yes, .. } => "IA: sí".to_string(),
                BlockKind::Ai { used: AiUsed::No, .. } => "IA: no".to_string(),
                BlockKind::Image { .. } if !block.content().is_empty() => "[imagen]".to_string(),
                _ => block.content().lines().next().unwrap_or_default().to_string(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>2}. {} ", i + 1, block.block_type().label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(truncate(&summary)),
            ]))
        })
        .collect();

    let title = if app.session.is_dirty() {
        "Bloques *"
    } else {
        "Bloques"
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.block_list_state);
}

fn render_fields(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let Some(block) = app.selected_block() else {
        let empty = Paragraph::new("Sin bloque seleccionado")
            .block(Block::default().borders(Borders::ALL).title("Campos"));
        f.render_widget(empty, area);
        return;
    };

    let lines: Vec<Line> = block
        .editable_fields()
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let value = match &app.input {
                Some(input) if i == app.field_index => format!("{}█", input.buffer),
                _ => display_value(block.kind(), field, block.field_value(&field)),
            };
            let style = if i == app.field_index {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{}: ", field.label()), style),
                Span::raw(value),
            ])
        })
        .collect();

    let fields = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Campos"))
        .wrap(Wrap { trim: false });
    f.render_widget(fields, area);
}

fn display_value(kind: &BlockKind, field: FieldPath, value: Option<&str>) -> String {
    let value = value.unwrap_or_default();
    match (kind, field) {
        (BlockKind::Image { .. }, FieldPath::Content) if value.is_empty() => {
            "(sin imagen)".to_string()
        }
        (BlockKind::Image { .. }, FieldPath::Content) => "[imagen cargada]".to_string(),
        _ => truncate(value),
    }
}

fn render_status(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let help = Line::from(vec![
        Span::raw("q: Quit | j/k: Select | J/K: Move | 1-9: Add | d: Delete | "),
        Span::raw("Tab/Enter: Field | +/-: Row | </>: Cols | t: Ref | y: IA | s: Save | e: Export | o: Open"),
    ]);
    let status = match &app.prompt {
        Some(Prompt::OpenPath(buffer)) => Line::from(vec![
            Span::styled("Open project: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{buffer}█")),
        ]),
        _ => Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Cyan),
        )),
    };
    f.render_widget(Paragraph::new(vec![status, help]), area);
}

fn truncate(value: &str) -> String {
    let first_line = value.lines().next().unwrap_or_default();
    if first_line.chars().count() > MAX_VALUE_WIDTH {
        let cut: String = first_line.chars().take(MAX_VALUE_WIDTH).collect();
        format!("{cut}…")
    } else {
        first_line.to_string()
    }
}

/// Terminal rendition of the preview model
pub fn preview_lines(model: &RenderModel) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);
    let mut lines = Vec::new();

    for block in &model.blocks {
        match &block.fragment {
            Fragment::Title(text) => {
                lines.push(Line::styled(text.clone(), bold.fg(Color::Yellow)));
            }
            Fragment::Subtitle(text) => lines.push(Line::styled(text.clone(), bold)),
            Fragment::Paragraph(text) => {
                lines.extend(text.lines().map(|l| Line::raw(l.to_string())));
            }
            Fragment::Code(text) => lines.extend(
                text.lines()
                    .map(|l| Line::styled(l.to_string(), Style::default().fg(Color::Green))),
            ),
            Fragment::Figure {
                number,
                source,
                caption,
            } => {
                let image = if source.is_some() {
                    "[imagen]"
                } else {
                    "Imagen no seleccionada"
                };
                lines.push(Line::raw(image));
                lines.push(Line::from(vec![
                    Span::styled(format!("Figura {number}: "), bold),
                    Span::styled(caption.clone(), italic),
                ]));
            }
            Fragment::Table {
                number,
                header,
                body,
                caption,
            } => {
                lines.push(Line::styled(header.join(" | "), bold));
                lines.extend(body.iter().map(|row| Line::raw(row.join(" | "))));
                lines.push(Line::from(vec![
                    Span::styled(format!("Tabla {number}: "), bold),
                    Span::styled(caption.clone(), italic),
                ]));
            }
            Fragment::Header(view) => {
                let term = view
                    .term
                    .as_ref()
                    .map(|t| format!(" ({t}° Cuatrimestre)"))
                    .unwrap_or_default();
                let group = view
                    .group
                    .as_ref()
                    .map(|g| format!(" | Grupo: {g}"))
                    .unwrap_or_default();
                lines.push(Line::raw(format!("Institución: {}", view.institution)));
                lines.push(Line::raw(format!("Materia: {}{term}", view.subject)));
                lines.push(Line::raw(format!("Profesor: {}", view.professor)));
                lines.push(Line::raw(format!("Alumno: {}{group}", view.student)));
                lines.push(Line::raw(format!("Fecha: {}", view.date)));
            }
            Fragment::Reference {
                number,
                ref_type,
                data,
            } => lines.push(Line::raw(format!(
                "[{number}] {}",
                format_reference(ref_type, data)
            ))),
            Fragment::AiDeclaration(AiDeclaration::NotUsed { declarant }) => {
                lines.push(Line::styled("Declaración de uso de IA", bold));
                lines.push(Line::raw(format!(
                    "Yo, {declarant}, declaro que NO he utilizado herramientas de Inteligencia Artificial."
                )));
            }
            Fragment::AiDeclaration(AiDeclaration::Used {
                student,
                tool,
                date,
                purpose,
                prompt,
                attachments,
                raw_response,
            }) => {
                lines.push(Line::styled("Declaración de uso de IA", bold));
                lines.push(Line::raw(format!("Nombre del estudiante: {student}")));
                lines.push(Line::raw(format!("IA utilizada: {tool}")));
                lines.push(Line::raw(format!("Fecha de uso: {date}")));
                lines.push(Line::raw(format!("Propósito: {purpose}")));
                lines.push(Line::raw(format!("Prompt utilizado: {prompt}")));
                if let Some(attachments) = attachments {
                    lines.push(Line::raw(format!("Archivos suministrados: {attachments}")));
                }
                lines.push(Line::raw(format!("Respuesta en crudo: {raw_response}")));
            }
        }
        lines.push(Line::raw(""));
    }

    lines
}
