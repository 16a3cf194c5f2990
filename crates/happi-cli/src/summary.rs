use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use happi_model::{IssueKind, SourceKind};
use happi_report::{OUTLIER_HIGH, OUTLIER_LOW, ValidationSummary};
use tracing::{info, warn};

use happi_cli::types::RunResult;

pub fn print_summary(result: &RunResult) {
    match &result.manifest {
        Some(manifest) => println!(
            "Output: {} ({} files)",
            result.output_dir.display(),
            manifest.files.len() + 1
        ),
        None => println!("Output: not written"),
    }
    println!("Records: {}", result.run.records.len());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Description"),
        header_cell("Tables"),
        header_cell("Rows"),
        header_cell("Records"),
        header_cell("Issues"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in &result.run.sources {
        table.add_row(vec![
            source_cell(summary.source),
            Cell::new(summary.description),
            Cell::new(summary.tables),
            Cell::new(summary.rows_read),
            Cell::new(summary.records),
            count_cell(summary.issues, Color::Yellow),
        ]);
    }
    let stats = &result.run.stats;
    table.add_row(vec![
        Cell::new("MERGED")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "hdi matched {}, population matched {}, values filled {}",
            stats.hdi_matched, stats.population_matched, stats.values_filled
        ))
        .fg(Color::Cyan),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(result.run.records.len()).add_attribute(Attribute::Bold),
        count_cell(result.run.issues.len(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_issue_table(result);
    print_validation(&result.validation);
}

fn print_issue_table(result: &RunResult) {
    let counts = result.run.issues.counts_by_source();
    if counts.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Source"), header_cell("Issue"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for ((source, kind), count) in counts {
        table.add_row(vec![
            source_cell(source),
            issue_cell(kind),
            Cell::new(count).fg(issue_color(kind)),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

/// Structured record of the validation summary, for log files and json output.
fn log_validation(summary: &ValidationSummary) {
    info!(
        unique_countries = summary.unique_countries,
        first_year = ?summary.first_year,
        last_year = ?summary.last_year,
        missing_happiness = summary.missing_happiness.len(),
        missing_hdi = summary.missing_hdi.len(),
        low_outliers = summary.low_outliers.len(),
        high_outliers = summary.high_outliers.len(),
        "validation summary"
    );
    for year in &summary.coverage {
        info!(
            year = year.year,
            rows = year.rows,
            happiness_pct = year.happiness_pct,
            hdi_pct = year.hdi_pct,
            population_pct = year.population_pct,
            "year coverage"
        );
    }
    if !summary.low_outliers.is_empty() || !summary.high_outliers.is_empty() {
        warn!(
            low = %summary.low_outliers.join(", "),
            high = %summary.high_outliers.join(", "),
            "score outliers"
        );
    }
}

fn print_validation(summary: &ValidationSummary) {
    log_validation(summary);
    println!();
    println!("Unique countries: {}", summary.unique_countries);
    if let (Some(first), Some(last)) = (summary.first_year, summary.last_year) {
        println!("Years covered: {first} to {last}");
    }
    if !summary.coverage.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Year"),
            header_cell("Countries"),
            header_cell("Happiness %"),
            header_cell("HDI %"),
            header_cell("Population %"),
        ]);
        apply_table_style(&mut table);
        for index in 1..=4 {
            align_column(&mut table, index, CellAlignment::Right);
        }
        for year in &summary.coverage {
            table.add_row(vec![
                Cell::new(year.year),
                Cell::new(year.rows),
                percent_cell(year.happiness_pct),
                percent_cell(year.hdi_pct),
                percent_cell(year.population_pct),
            ]);
        }
        println!("{table}");
    }
    if !summary.missing_happiness.is_empty() {
        println!(
            "Countries missing happiness data: {}",
            ValidationSummary::abbreviate(&summary.missing_happiness)
        );
    }
    if !summary.missing_hdi.is_empty() {
        println!(
            "Countries missing HDI data: {}",
            ValidationSummary::abbreviate(&summary.missing_hdi)
        );
    }
    if let Some((min, max)) = summary.score_range {
        println!("Happiness score range: {min:.2} to {max:.2}");
    }
    if !summary.low_outliers.is_empty() {
        println!(
            "Unusually low scores (<{OUTLIER_LOW}): {}",
            summary.low_outliers.join(", ")
        );
    }
    if !summary.high_outliers.is_empty() {
        println!(
            "Unusually high scores (>{OUTLIER_HIGH}): {}",
            summary.high_outliers.join(", ")
        );
    }
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn source_cell(source: SourceKind) -> Cell {
    Cell::new(source.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn issue_cell(kind: IssueKind) -> Cell {
    Cell::new(kind.as_str()).fg(issue_color(kind))
}

fn issue_color(kind: IssueKind) -> Color {
    match kind {
        IssueKind::StructuralFailure => Color::Red,
        IssueKind::MissingSource | IssueKind::MalformedRow => Color::Yellow,
        IssueKind::UnresolvedName | IssueKind::DuplicateKey => Color::Magenta,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn percent_cell(value: f64) -> Cell {
    let cell = Cell::new(format!("{value:.1}"));
    if value < 50.0 {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use happi_report::YearCoverage;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn validation_is_logged_with_coverage_and_outliers() {
        let summary = ValidationSummary {
            unique_countries: 2,
            first_year: Some(2019),
            last_year: Some(2019),
            coverage: vec![YearCoverage {
                year: 2019,
                rows: 2,
                happiness_pct: 100.0,
                hdi_pct: 50.0,
                population_pct: 0.0,
            }],
            missing_happiness: Vec::new(),
            missing_hdi: vec!["Chad".to_string()],
            score_range: Some((2.4, 7.8)),
            low_outliers: vec!["Chad".to_string()],
            high_outliers: Vec::new(),
        };
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || log_validation(&summary));

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("validation summary"), "{output}");
        assert!(output.contains("unique_countries=2"), "{output}");
        assert!(output.contains("hdi_pct=50"), "{output}");
        assert!(output.contains("population_pct=0"), "{output}");
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("low=Chad"), "{output}");
    }
}
