//! Quote Sheets CLI - supplier quotation templates and comparison reports

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use quote_sheets::prelude::*;
use quote_sheets::{ColumnKind, Highlight, ProcessOptions, TEMPLATE_SHEET_NAME};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "quote")]
#[command(
    author,
    version,
    about = "Build supplier quotation templates and highlight the cheapest offers"
)]
struct Cli {
    /// Log mapping and layout decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a blank quotation template
    Template {
        /// Number of suppliers
        #[arg(short, long, default_value = "1")]
        suppliers: u32,

        /// Number of item rows
        #[arg(short, long, default_value = "100")]
        rows: u32,

        /// Output file
        #[arg(short, long, default_value = "supplier_comparison_template.xlsx")]
        output: PathBuf,
    },

    /// Compute totals and highlight a filled-in template
    Process {
        /// Filled-in template
        input: PathBuf,

        /// Supplier names, comma or newline separated (repeatable)
        #[arg(short, long = "names")]
        names: Vec<String>,

        /// Output file
        #[arg(short, long, default_value = "highlighted_quotation.xlsx")]
        output: PathBuf,

        /// Sheet to read from the input
        #[arg(long, default_value = TEMPLATE_SHEET_NAME)]
        sheet: String,

        /// Print the processed table to stdout
        #[arg(long)]
        preview: bool,

        /// Also export the processed table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show how the columns of a filled-in template are mapped
    Headers {
        /// Filled-in template
        input: PathBuf,

        /// Supplier names, comma or newline separated (repeatable)
        #[arg(short, long = "names")]
        names: Vec<String>,

        /// Sheet to read from the input
        #[arg(long, default_value = TEMPLATE_SHEET_NAME)]
        sheet: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env = if cli.verbose {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Template {
            suppliers,
            rows,
            output,
        } => write_template(suppliers, rows, &output),
        Commands::Process {
            input,
            names,
            output,
            sheet,
            preview,
            csv,
        } => process(&input, &names, &output, &sheet, preview, csv.as_deref()),
        Commands::Headers {
            input,
            names,
            sheet,
        } => show_headers(&input, &names, &sheet),
    }
}

fn write_template(suppliers: u32, rows: u32, output: &Path) -> Result<()> {
    let options = TemplateOptions::new(suppliers, rows);
    quote_sheets::write_template(&options, output)
        .with_context(|| format!("Failed to write template '{}'", output.display()))?;

    eprintln!(
        "Wrote template for {} suppliers with {} rows to '{}'",
        suppliers,
        rows,
        output.display()
    );
    Ok(())
}

fn supplier_list(names: &[String]) -> SupplierList {
    let mut list = SupplierList::new();
    for input in names {
        list.extend_from_input(input);
    }
    list
}

fn processor(sheet: &str) -> QuotationProcessor {
    QuotationProcessor::with_options(ProcessOptions {
        sheet_name: sheet.to_string(),
        ..Default::default()
    })
}

fn open(input: &Path) -> Result<BufReader<File>> {
    let file = File::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;
    Ok(BufReader::new(file))
}

fn process(
    input: &Path,
    names: &[String],
    output: &Path,
    sheet: &str,
    preview: bool,
    csv_path: Option<&Path>,
) -> Result<()> {
    let suppliers = supplier_list(names);
    if suppliers.is_empty() {
        eprintln!("Warning: no supplier names given; no totals will be computed");
    }
    info!("suppliers: {}", suppliers.names().join(", "));

    let result = processor(sheet)
        .process_reader(open(input)?, &suppliers)
        .with_context(|| format!("Failed to process '{}'", input.display()))?;

    for warning in result.report.warnings() {
        eprintln!("Warning: {}", warning);
    }

    result
        .write_file(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    eprintln!(
        "Wrote {} items for {} suppliers to '{}'",
        result.table.data_row_count(),
        suppliers.len() - result.report.skipped_suppliers.len(),
        output.display()
    );

    if preview {
        print_preview(&result.table).context("Failed to write to stdout")?;
    }

    if let Some(path) = csv_path {
        let file = File::create(path)
            .with_context(|| format!("Failed to create '{}'", path.display()))?;
        write_csv(&result.table, file)
            .with_context(|| format!("Failed to write '{}'", path.display()))?;
        eprintln!("Wrote CSV to '{}'", path.display());
    }

    Ok(())
}

/// Marker appended to highlighted cells in the text preview
fn marker(highlight: Highlight) -> &'static str {
    match highlight {
        Highlight::LowestPrice | Highlight::LowestTotal => " *",
        Highlight::Unavailable => " !",
        Highlight::Uncertain => " ?",
    }
}

fn print_preview(table: &DerivedTable) -> io::Result<()> {
    let highlights: BTreeSet<(usize, usize, Highlight)> = table
        .highlights()
        .into_iter()
        .map(|c| (c.row, c.col, c.highlight))
        .collect();
    let marked = |row: usize, col: usize| {
        highlights
            .iter()
            .find(|(r, c, _)| *r == row && *c == col)
            .map_or("", |(_, _, h)| marker(*h))
    };

    let mut lines: Vec<Vec<String>> = vec![table.columns().to_vec()];
    for (row, values) in table.table().rows().iter().enumerate() {
        lines.push(
            values
                .iter()
                .enumerate()
                .map(|(col, value)| format!("{}{}", value, marked(row, col)))
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..table.columns().len())
        .map(|col| lines.iter().map(|l| l[col].chars().count()).max().unwrap_or(0))
        .collect();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in &lines {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(text, width)| format!("{:<width$}", text, width = width))
            .collect();
        writeln!(out, "{}", cells.join("  ").trim_end())?;
    }
    writeln!(out)?;
    writeln!(out, "* lowest price   ! not available   ? availability not sure")?;
    Ok(())
}

fn write_csv<W: Write>(table: &DerivedTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(table.columns())?;
    for row in table.table().rows() {
        csv_writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn show_headers(input: &Path, names: &[String], sheet: &str) -> Result<()> {
    let suppliers = supplier_list(names);
    let raw = processor(sheet)
        .read_upload(open(input)?)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let mapping = ColumnMapping::build(raw.headers(), &suppliers);

    println!("File: {}", input.display());
    println!("Data rows: {}", raw.rows().len());
    println!();

    for column in mapping.columns() {
        let kind = match column.kind() {
            ColumnKind::Base => "base",
            ColumnKind::UnitPrice => "unit price",
            ColumnKind::Availability => "availability",
            ColumnKind::Total => "total",
            ColumnKind::Other if column.source.is_base() => "extra",
            ColumnKind::Other => "unmatched",
        };
        println!("  {:<32} -> {:<32} ({})", column.source.to_string(), column.name, kind);
    }

    let unmatched = mapping.unmatched_groups();
    if !unmatched.is_empty() {
        println!();
        println!("Unmatched supplier labels: {}", unmatched.join(", "));
    }

    for required in [quote_sheets::table::ITEM_CODE, quote_sheets::table::QTY] {
        if !mapping.names().iter().any(|n| n.eq_ignore_ascii_case(required)) {
            bail!("required column '{}' not found in '{}'", required, input.display());
        }
    }
    Ok(())
}
