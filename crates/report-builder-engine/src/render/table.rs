//! Fixed-width plain-text table layout.

use crate::models::TableBlock;

pub const MIN_COLUMN_WIDTH: usize = 10;
pub const MAX_COLUMN_WIDTH: usize = 30;

/// Number of columns to lay out; tables saved without a column count fall
/// back to the width of their header row
fn layout_columns(table: &TableBlock) -> usize {
    if table.columns() > 0 {
        table.columns()
    } else {
        table.header().map_or(0, <[String]>::len)
    }
}

/// Display width of every column, measured in characters.
///
/// `width[c] = max(10, min(longest cell in c, 30))`
pub fn column_widths(table: &TableBlock) -> Vec<usize> {
    (0..layout_columns(table))
        .map(|col| {
            (0..table.rows().len())
                .map(|row| table.cell(row, col).chars().count().min(MAX_COLUMN_WIDTH))
                .fold(MIN_COLUMN_WIDTH, usize::max)
        })
        .collect()
}

/// Hard wrap at `width` characters; empty text still yields one line
fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || width == 0 {
        return vec![text.to_string()];
    }
    chars.chunks(width).map(|chunk| chunk.iter().collect()).collect()
}

fn separator(widths: &[usize]) -> String {
    let mut line = String::from("+-");
    for width in widths {
        line.push_str(&"-".repeat(*width));
        line.push_str("-+-");
    }
    line
}

/// Render a table as physical text lines.
///
/// Each row grows vertically to fit its longest wrapped cell and is followed
/// by a separator line, the header row included.
pub fn render_table(table: &TableBlock) -> Vec<String> {
    let widths = column_widths(table);
    let separator = separator(&widths);
    let mut lines = Vec::new();

    for row in 0..table.rows().len() {
        let cells: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(col, width)| wrap_cell(table.cell(row, col), *width))
            .collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(1);

        for sub_line in 0..height {
            let mut line = String::from("| ");
            for (cell, &width) in cells.iter().zip(&widths) {
                let content = cell.get(sub_line).map_or("", String::as_str);
                line.push_str(&format!("{content:<width$} | "));
            }
            lines.push(line);
        }
        lines.push(separator.clone());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table_from(rows: &[&[&str]]) -> TableBlock {
        let mut table = TableBlock::default();
        table.set_columns(rows[0].len());
        while table.rows().len() < rows.len() {
            table.add_row();
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                table.set_cell(r, c, *cell);
            }
        }
        table
    }

    #[test]
    fn test_widths_are_clamped() {
        let long = "x".repeat(45);
        let table = table_from(&[&["id", "nombre completo", long.as_str()], &["1", "", ""]]);

        assert_eq!(column_widths(&table), vec![10, 15, 30]);
    }

    #[test]
    fn test_short_table_layout() {
        let table = table_from(&[&["A", "B"], &["1", "2"]]);

        let lines = render_table(&table);

        assert_eq!(
            lines,
            vec![
                "| A          | B          | ",
                "+------------+------------+-",
                "| 1          | 2          | ",
                "+------------+------------+-",
            ]
        );
    }

    #[test]
    fn test_long_cell_wraps_and_row_grows() {
        let long = "abcdefghij".repeat(7); // 70 chars -> 3 lines of 30
        let table = table_from(&[&["Col", "Texto"], &["1", long.as_str()]]);

        let lines = render_table(&table);

        // header line + separator + 3 wrapped lines + separator
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[2], format!("| 1          | {} | ", &long[..30]));
        assert_eq!(lines[3], format!("| {:<10} | {} | ", "", &long[30..60]));
        assert_eq!(lines[4], format!("| {:<10} | {:<30} | ", "", &long[60..]));
    }

    #[test]
    fn test_wrap_counts_characters_not_bytes() {
        let accented = "á".repeat(31);
        let wrapped = wrap_cell(&accented, 30);

        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[0].chars().count(), 30);
        assert_eq!(wrapped[1], "á");
    }

    #[test]
    fn test_no_segment_exceeds_column_width() {
        let long = "z".repeat(100);
        let table = table_from(&[&[long.as_str(), "b", "ccc"], &["dd", long.as_str(), ""]]);
        let widths = column_widths(&table);
        let expected_len = 2 + widths.iter().map(|w| w + 3).sum::<usize>();

        for line in render_table(&table) {
            assert_eq!(line.chars().count(), expected_len);
            if line.starts_with('|') {
                let segments: Vec<&str> = line[2..].split(" | ").collect();
                for (segment, width) in segments.iter().zip(&widths) {
                    assert_eq!(segment.chars().count(), *width);
                }
            }
        }
    }

    #[test]
    fn test_ragged_rows_render_missing_cells_empty() {
        let table: TableBlock =
            serde_json::from_str(r#"{"columns":2,"tableData":[["h1","h2"],["only"]]}"#).unwrap();

        let lines = render_table(&table);

        assert_eq!(lines[2], "| only       |            | ");
    }
}
