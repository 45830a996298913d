//! csv-forge CLI - typed CSV inspection

use clap::Parser;
use csv_forge::{LenientPolicy, ParseOptions, StrictPolicy, Table};
use std::path::PathBuf;
use std::process::ExitCode;

/// Typed CSV loader.
///
/// Parses CSV files with boundary repair and per-column type
/// inference, then prints the resolved schema or re-emits the
/// normalized table.
#[derive(Parser, Debug)]
#[command(name = "csv-forge")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV file(s) to load
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Cell delimiter (single character)
    #[arg(short = 'd', long, default_value = ",")]
    delimiter: char,

    /// Treat the first row as data, not titles
    #[arg(long)]
    no_title_row: bool,

    /// Recognize single-quoted cells
    #[arg(long)]
    single_quote: bool,

    /// Pad short rows to the widest row
    #[arg(long)]
    fill: bool,

    /// Use the fast per-line tokenizer (assumes well-formed input)
    #[arg(long)]
    fast: bool,

    /// Maximum number of lines to parse (-1 = unbounded)
    #[arg(short = 'n', long, default_value = "-1")]
    max_lines: i64,

    /// Text encoding label (e.g. utf-8, windows-1251); detected if omitted
    #[arg(short = 'e', long)]
    encoding: Option<String>,

    /// Recover from conversion and row-width errors instead of failing
    #[arg(long)]
    lenient: bool,

    /// Output format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Re-emit the normalized table as CSV instead of the schema
    #[arg(long)]
    emit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut exit_code = ExitCode::SUCCESS;

    for file in &args.files {
        if let Err(e) = load_file(file, &args) {
            eprintln!("Error processing {}: {}", file.display(), e);
            exit_code = ExitCode::FAILURE;
        }
    }

    exit_code
}

fn load_file(path: &PathBuf, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ParseOptions::new();
    options
        .delimiter(args.delimiter)
        .has_title_row(!args.no_title_row)
        .single_quote(args.single_quote)
        .fill_missing_columns(args.fill)
        .fast_mode(args.fast)
        .max_lines(args.max_lines);

    if let Some(ref label) = args.encoding {
        let encoding = encoding_rs::Encoding::for_label(label.as_bytes())
            .ok_or_else(|| format!("unknown encoding label: {label}"))?;
        options.encoding(Some(encoding));
    }

    let data = std::fs::read(path)?;
    let table = if args.lenient {
        Table::load_bytes_with_policy(&data, &options, &LenientPolicy)?
    } else {
        Table::load_bytes_with_policy(&data, &options, &StrictPolicy)?
    };

    if args.emit {
        let mut stdout = std::io::stdout().lock();
        table.save(&mut stdout)?;
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => print_text_output(path, &table),
        OutputFormat::Json => print_json_output(path, &table),
    }

    Ok(())
}

fn print_text_output(path: &PathBuf, table: &Table) {
    println!("File: {}", path.display());
    println!("  Rows: {}", table.num_rows());
    println!("  Columns: {}", table.num_columns());
    for (i, spec) in table.columns().iter().enumerate() {
        println!(
            "    {}: {} ({}{})",
            i + 1,
            spec.title,
            spec.declared_type,
            if spec.nullable { ", nullable" } else { "" }
        );
    }
    println!();
}

fn print_json_output(path: &PathBuf, table: &Table) {
    print!(
        r#"{{"file":"{}","rows":{},"columns":["#,
        path.display(),
        table.num_rows()
    );
    for (i, spec) in table.columns().iter().enumerate() {
        if i > 0 {
            print!(",");
        }
        print!(
            r#"{{"title":"{}","type":"{}","nullable":{}}}"#,
            spec.title, spec.declared_type, spec.nullable
        );
    }
    println!("]}}");
}
