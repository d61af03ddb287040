use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use tss_cli::summary::{
    field_list_table, fields_table, meta_table, record_summary, rows_json, rows_table,
    value_labels_table,
};
use tss_sav::{ByteCursor, SavReader, SavReaderOptions};

use crate::cli::{FileArgs, RowsArgs, RowsFormatArg};

pub fn run_meta(args: &FileArgs) -> Result<()> {
    let bytes = load(&args.path)?;
    let meta = SavReader::new(None)
        .read_metadata(&mut ByteCursor::new(&bytes))
        .context("decode file header")?;
    println!("{}", meta_table(&meta));
    Ok(())
}

/// List the dictionary fields; use `schema` for long names and label counts.
pub fn run_fields(args: &FileArgs) -> Result<()> {
    let bytes = load(&args.path)?;
    let fields = SavReader::new(None)
        .read_fields(&mut ByteCursor::new(&bytes))
        .context("decode dictionary")?;
    println!("{}", field_list_table(&fields));
    Ok(())
}

pub fn run_schema(args: &FileArgs) -> Result<()> {
    let bytes = load(&args.path)?;
    let schema = SavReader::new(None)
        .read_schema(&mut ByteCursor::new(&bytes))
        .context("decode dictionary")?;
    println!("{}", meta_table(&schema.meta));
    println!("{}", fields_table(&schema));
    if let Some(table) = value_labels_table(&schema) {
        println!("{table}");
    }
    for line in record_summary(&schema) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_rows(args: &RowsArgs) -> Result<()> {
    let span = info_span!("rows", path = %args.path.display());
    let _guard = span.enter();

    let bytes = load(&args.path)?;
    let mut options = SavReaderOptions::new().with_system_missing_as_null(args.sysmis_null);
    if args.no_trim {
        options = options.untrimmed();
    }
    if let Some(limit) = args.limit {
        options = options.with_row_limit(limit);
    }
    let file = SavReader::with_options(options, None)
        .read_all(&mut ByteCursor::new(&bytes))
        .context("decode case data")?;
    info!(rows = file.num_rows(), fields = file.num_fields(), "decoded case data");

    match args.format {
        RowsFormatArg::Table => println!("{}", rows_table(&file)),
        RowsFormatArg::Json => println!("{}", rows_json(&file.rows).context("serialize rows")?),
    }
    Ok(())
}

/// Print every trace line, including those collected before a failure.
pub fn run_trace(args: &FileArgs) -> Result<()> {
    let bytes = load(&args.path)?;
    let mut lines: Vec<String> = Vec::new();
    let result = SavReader::new(Some(&mut lines)).read_all(&mut ByteCursor::new(&bytes));
    for line in &lines {
        println!("{line}");
    }
    result.context("decode system file")?;
    Ok(())
}

fn load(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "loaded system file");
    Ok(bytes)
}
