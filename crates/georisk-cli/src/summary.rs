use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use georisk_core::SourceStats;
use georisk_model::{RiskLevel, ZoneTier};
use georisk_output::ValidationReport;

use crate::types::{FileDetection, RunResult};

pub fn print_run_summary(result: &RunResult) {
    for (kind, path) in &result.inputs {
        println!("{kind}: {}", path.display());
    }
    print_source_table(result);
    print_level_table(result);

    let report = &result.report;
    match (&report.reference, &report.thresholds) {
        (Some(reference), Some(thresholds)) => println!(
            "Reference: {} (p20 {:.4}, p40 {:.4}, p60 {:.4}, p80 {:.4})",
            reference.column(),
            thresholds.p20,
            thresholds.p40,
            thresholds.p60,
            thresholds.p80
        ),
        (Some(reference), None) => println!("Reference: {} (no indexed zones)", reference.column()),
        (None, _) => println!("Reference: none (no crime averages, every index is 0)"),
    }

    if !report.trends.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Attribute"), header_cell("Most frequent")]);
        apply_table_style(&mut table);
        for (role, trend) in &report.trends {
            table.add_row(vec![Cell::new(role.as_str()), Cell::new(trend.to_string())]);
        }
        println!();
        println!("Robbery trends:");
        println!("{table}");
    }

    if result.dry_run {
        println!("Dry run: no files written");
    }
    for path in &result.outputs {
        println!("Output: {}", path.display());
    }
}

fn print_source_table(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("Roles"),
        header_cell("Zones"),
        header_cell("Filtered"),
        header_cell("Undated"),
        header_cell("Invalid"),
        header_cell("Dropped"),
        header_cell("Tiers"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=7 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_rows = 0usize;
    let mut total_dropped = 0usize;
    for source in &result.report.sources {
        let stats = &source.stats;
        total_rows += stats.rows;
        total_dropped += stats.dropped_rows;
        table.add_row(vec![
            Cell::new(stats.source.as_str()).fg(Color::Green),
            Cell::new(stats.rows),
            Cell::new(source.columns.len()),
            Cell::new(stats.zones),
            count_cell(stats.filtered_rows, Color::Yellow),
            count_cell(stats.undated_rows, Color::Yellow),
            count_cell(stats.invalid_measure_rows, Color::Red),
            count_cell(stats.dropped_rows, Color::Red),
            Cell::new(tier_breakdown(stats)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.report.records.len()).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(total_dropped, Color::Red).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn tier_breakdown(stats: &SourceStats) -> String {
    ZoneTier::PRIORITY
        .into_iter()
        .filter_map(|tier| {
            stats
                .tiers
                .get(&tier)
                .filter(|count| **count > 0)
                .map(|count| format!("{}={count}", tier.as_str()))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_level_table(result: &RunResult) {
    let counts = result.report.level_counts();
    if counts.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Risk level"),
        header_cell("Alert"),
        header_cell("Zones"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for level in RiskLevel::TIERS
        .into_iter()
        .chain(std::iter::once(RiskLevel::NoData))
    {
        let count = counts.get(&level).copied().unwrap_or(0);
        table.add_row(vec![
            level_cell(level),
            Cell::new(level.alert().as_str()),
            count_cell(count, Color::White),
        ]);
    }
    println!();
    println!("{table}");
}

pub fn print_validation_summary(report: &ValidationReport) {
    println!("File: {}", report.path.display());
    println!("Rows: {}  Columns: {}", report.rows, report.columns);

    if let Some(distribution) = &report.level_distribution {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Risk level"), header_cell("Zones")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for (label, count) in distribution {
            let cell = RiskLevel::parse(label).map_or_else(|| Cell::new(label), level_cell);
            table.add_row(vec![cell, Cell::new(count)]);
        }
        println!("{table}");
    }

    if !report.null_counts.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Column"), header_cell("Empty cells")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        for (column, count) in &report.null_counts {
            table.add_row(vec![Cell::new(column), count_cell(*count, Color::Yellow)]);
        }
        println!();
        println!("Null counts:");
        println!("{table}");
    }

    if !report.rent_means.is_empty() {
        println!();
        for (column, mean) in &report.rent_means {
            match mean {
                Some(value) => println!("{column}: {value:.2}"),
                None => println!("{column}: -"),
            }
        }
    }

    if let Some(record) = &report.first_record {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Field"), header_cell("Value")]);
        apply_table_style(&mut table);
        for (field, value) in record {
            table.add_row(vec![Cell::new(field), Cell::new(value)]);
        }
        println!();
        println!("First record:");
        println!("{table}");
    }

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
}

pub fn print_detection(detection: &FileDetection) {
    println!("File: {}", detection.path.display());
    println!("Profile: {}", detection.profile.dataset);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Mandatory"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for requirement in &detection.profile.requirements {
        let columns = detection.detected.get_all(requirement.role);
        let columns_cell = if columns.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(columns.join(", "))
        };
        table.add_row(vec![
            Cell::new(requirement.role.as_str()),
            if requirement.mandatory {
                Cell::new("yes").add_attribute(Attribute::Bold)
            } else {
                dim_cell("no")
            },
            columns_cell,
        ]);
    }
    println!("{table}");
    println!("{} columns read", detection.columns.len());
}

fn level_cell(level: RiskLevel) -> Cell {
    let color = match level {
        RiskLevel::Diamond => Color::Cyan,
        RiskLevel::Gold => Color::Yellow,
        RiskLevel::Silver => Color::White,
        RiskLevel::Bronze => Color::DarkYellow,
        RiskLevel::Copper => Color::Red,
        RiskLevel::NoData => Color::DarkGrey,
    };
    Cell::new(level.as_str()).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
