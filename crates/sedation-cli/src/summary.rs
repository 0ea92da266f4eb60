use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sedation_cli::pipeline::BuildOutcome;
use sedation_model::{SkipReason, WindowDataset};

use crate::commands::Inspection;

pub fn print_build_summary(outcome: &BuildOutcome) {
    println!("Bundle: {}", outcome.bundle_path.display());
    if outcome.from_cache {
        println!("Source: cache");
    } else {
        println!("Source: VitalDB ({:.1}s)", outcome.elapsed.as_secs_f64());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    if !outcome.from_cache {
        let summary = &outcome.summary;
        table.add_row(vec![Cell::new("Candidates"), Cell::new(summary.candidates)]);
        table.add_row(vec![Cell::new("Examined"), Cell::new(summary.examined)]);
        for reason in SkipReason::ALL {
            table.add_row(vec![
                dim_cell(format!("  skipped: {reason}")),
                count_cell(summary.skip_count(reason), Color::Yellow),
            ]);
        }
    }
    // Cached bundles only know the cases that contributed windows.
    let accepted = if outcome.from_cache {
        outcome.dataset.case_count()
    } else {
        outcome.summary.accepted
    };
    table.add_row(vec![
        bold_cell("Accepted cases"),
        Cell::new(format!("{accepted} / {}", outcome.max_cases))
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        bold_cell("Windows"),
        Cell::new(outcome.dataset.len()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_inspection(inspection: &Inspection) {
    let dataset = &inspection.dataset;
    println!("Bundle: {}", inspection.path.display());

    let mut shapes = Table::new();
    shapes.set_header(vec![
        header_cell("Array"),
        header_cell("Shape"),
        header_cell("Dtype"),
        header_cell("Content"),
    ]);
    apply_table_style(&mut shapes);
    let rows = dataset.len();
    for (name, shape, dtype, content) in [
        ("x", format!("({rows}, {})", dataset.segment_len()), "f64", "EEG segments"),
        ("y", format!("({rows},)"), "f64", "age-adjusted MAC"),
        ("b", format!("({rows},)"), "f64", "BIS"),
        ("c", format!("({rows},)"), "i64", "case id"),
    ] {
        shapes.add_row(vec![
            Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(shape),
            dim_cell(dtype),
            Cell::new(content),
        ]);
    }
    println!("{shapes}");

    if dataset.is_empty() {
        return;
    }
    println!();
    println!("Cases:");
    println!("{}", case_table(dataset));
}

fn case_table(dataset: &WindowDataset) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Windows"),
        header_cell("MAC range"),
        header_cell("BIS range"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);

    for (case_id, windows) in dataset.windows_per_case() {
        let rows = || {
            dataset
                .case_ids()
                .iter()
                .enumerate()
                .filter(move |(_, id)| **id == case_id)
                .map(|(row, _)| row)
        };
        let mac = range(rows().map(|row| dataset.mac()[row]));
        let bis = range(rows().map(|row| dataset.bis()[row]));
        table.add_row(vec![
            Cell::new(case_id),
            Cell::new(windows),
            Cell::new(format_range(mac, 2)),
            Cell::new(format_range(bis, 0)),
        ]);
    }
    table.add_row(vec![
        bold_cell("TOTAL"),
        Cell::new(dataset.len()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    table
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((low, high)) => Some((low.min(value), high.max(value))),
    })
}

fn format_range(range: Option<(f64, f64)>, precision: usize) -> String {
    match range {
        Some((low, high)) => format!("{low:.precision$} - {high:.precision$}"),
        None => "-".to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn bold_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
