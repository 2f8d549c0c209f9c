use pretty_assertions::assert_eq;
use report_builder_engine::render::{export_text, preview, render_html};
use report_builder_engine::{BlockType, Cmd, EditError, FieldPath, RenderScope, Report};
use rstest::rstest;
use strum::IntoEnumIterator;

fn report_with_every_type() -> Report {
    let mut report = Report::new();
    for block_type in BlockType::iter() {
        report.create(block_type);
    }
    report
}

#[rstest]
#[case(0, 8)]
#[case(8, 0)]
#[case(3, 5)]
#[case(4, 4)]
#[case(2, 100)]
fn moving_keeps_the_same_blocks(#[case] from: usize, #[case] to: usize) {
    let mut report = report_with_every_type();
    let mut before: Vec<_> = report.blocks().iter().map(|b| b.id()).collect();

    report.move_to(from, to).unwrap();

    let mut after: Vec<_> = report.blocks().iter().map(|b| b.id()).collect();
    let moved = before[from];
    assert_eq!(after[to.min(after.len() - 1)], moved);
    before.sort();
    after.sort();
    assert_eq!(after, before);
}

#[test]
fn moving_from_past_the_end_is_rejected() {
    let mut report = report_with_every_type();
    let before = report.blocks().to_vec();

    let result = report.move_to(9, 0);

    assert_eq!(result, Err(EditError::IndexOutOfRange { index: 9, len: 9 }));
    assert_eq!(report.blocks(), before.as_slice());
}

#[test]
fn deleted_text_disappears_from_every_view() {
    let mut report = Report::new();
    let keep = report.create(BlockType::Text);
    let drop = report.create(BlockType::Text);
    report.set_content(keep, "se queda");
    report.set_content(drop, "se va");

    let patch = report.apply(Cmd::DeleteBlock { id: drop }).unwrap();

    assert_eq!(patch.scope, RenderScope::Full);
    assert!(export_text(&report).contains("se queda"));
    assert!(!export_text(&report).contains("se va"));
    assert!(!render_html(&preview(&report)).contains("se va"));
}

#[test]
fn field_edits_only_need_a_preview_refresh() {
    let mut report = report_with_every_type();
    let ids: Vec<_> = report.blocks().iter().map(|b| b.id()).collect();

    for id in ids {
        let fields = report.find(id).unwrap().editable_fields();
        for field in fields {
            let patch = report
                .apply(Cmd::SetField {
                    id,
                    field,
                    value: format!("valor {field}"),
                })
                .unwrap();
            assert!(patch.changed, "{field} on {id}");
            assert_eq!(patch.scope, RenderScope::Preview);
            assert_eq!(
                report.find(id).unwrap().field_value(&field),
                Some(format!("valor {field}").as_str())
            );
        }
    }
}

#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(4, 4)]
#[case(6, 6)]
#[case(42, 6)]
fn column_changes_keep_tables_rectangular(#[case] requested: usize, #[case] expected: usize) {
    let mut report = Report::new();
    let id = report.create(BlockType::Table);
    report.add_table_row(id);

    let patch = report
        .apply(Cmd::SetTableColumns {
            id,
            columns: requested,
        })
        .unwrap();

    assert_eq!(patch.scope, RenderScope::Full);
    let table = report.find(id).unwrap().table().unwrap();
    assert_eq!(table.columns(), expected);
    assert!(table.rows().iter().all(|row| row.len() == expected));
}

#[test]
fn header_row_can_never_be_removed() {
    let mut report = Report::new();
    let id = report.create(BlockType::Table);

    assert!(report.apply(Cmd::RemoveTableRow { id }).is_ok());
    assert_eq!(
        report.apply(Cmd::RemoveTableRow { id }),
        Err(EditError::LastTableRow)
    );
    assert_eq!(report.find(id).unwrap().table().unwrap().rows().len(), 1);
}

#[test]
fn views_do_not_change_the_report() {
    let mut report = report_with_every_type();
    let title = report.blocks()[1].id();
    report.set_field(title, &FieldPath::Content, "Informe");
    let version = report.version();

    let first = export_text(&report);
    let second = export_text(&report);
    let model = preview(&report);

    assert_eq!(first, second);
    assert_eq!(model, preview(&report));
    assert_eq!(report.version(), version);
}
