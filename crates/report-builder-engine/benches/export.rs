use criterion::{Criterion, criterion_group, criterion_main};
use report_builder_engine::editing::Report;
use report_builder_engine::models::{BlockType, RefField};
use report_builder_engine::render::{export_text, preview, render_html};
use std::hint::black_box;

fn generate_report(sections: usize) -> Report {
    let mut report = Report::new();
    report.create(BlockType::Header);
    for section in 0..sections {
        let title = report.create(BlockType::Subtitle);
        report.set_content(title, format!("Sección {section}"));
        let text = report.create(BlockType::Text);
        report.set_content(
            text,
            "Párrafo con varias oraciones para simular un reporte real. ".repeat(4),
        );
        let table = report.create(BlockType::Table);
        for row in 0..5 {
            report.add_table_row(table);
            for col in 0..3 {
                report.set_table_cell(table, row, col, format!("celda {row}-{col} con texto largo"));
            }
        }
        let reference = report.create(BlockType::Ref);
        report.set_ref_field(reference, RefField::Title, "Título de referencia");
    }
    report.create(BlockType::Ai);
    report
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(20);

    let report = generate_report(50);
    group.bench_function("text", |b| {
        b.iter(|| black_box(export_text(black_box(&report))));
    });

    group.finish();
}

fn bench_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview");
    group.sample_size(20);

    let report = generate_report(50);
    group.bench_function("model", |b| {
        b.iter(|| black_box(preview(black_box(&report))));
    });
    group.bench_function("html", |b| {
        b.iter(|| black_box(render_html(&preview(black_box(&report)))));
    });

    group.finish();
}

criterion_group!(benches, bench_export, bench_preview);
criterion_main!(benches);
