//! Table and JSON rendering for inspector output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tss_sav::{Field, FileMeta, MissingValues, Row, SavFile, SavValue, Schema};

pub fn meta_table(meta: &FileMeta) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    let created = meta.created_at().map_or_else(
        || format!("{} {}", meta.creation_date, meta.creation_time),
        |at| at.format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    let cases = meta
        .case_count()
        .map_or_else(|| "unknown".to_string(), |cases| cases.to_string());
    let weight = if meta.is_weighted() {
        meta.weight_index.to_string()
    } else {
        "-".to_string()
    };
    let rows = [
        ("Product", meta.product.clone()),
        ("Label", meta.file_label.clone()),
        ("Created", created),
        ("Layout code", meta.layout_code.to_string()),
        ("Variable slots", meta.variable_count.to_string()),
        ("Compression", meta.compression.to_string()),
        ("Bias", meta.bias.to_string()),
        ("Weight index", weight),
        ("Cases", cases),
    ];
    for (property, value) in rows {
        table.add_row(vec![
            Cell::new(property).add_attribute(Attribute::Bold),
            Cell::new(value),
        ]);
    }
    table
}

/// Dictionary fields alone, without anything the auxiliary records add.
///
/// Renders from the dictionary records only, so a damaged extension record
/// does not prevent listing the fields.
pub fn field_list_table(fields: &[Field]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Type"),
        header_cell("Format"),
        header_cell("Label"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for field in fields {
        table.add_row(vec![
            Cell::new(field.slot),
            Cell::new(&field.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(field.field_type),
            Cell::new(field.print_format),
            optional_cell(field.label.as_deref()),
            optional_cell(field.missing.as_ref().map(format_missing).as_deref()),
        ]);
    }
    table
}

pub fn fields_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Long name"),
        header_cell("Type"),
        header_cell("Format"),
        header_cell("Label"),
        header_cell("Missing"),
        header_cell("Labels"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 7, CellAlignment::Right);
    for field in &schema.fields {
        let long_name = schema.long_name(field);
        let long_name_cell = if long_name == field.name {
            dim_cell("-")
        } else {
            Cell::new(long_name)
        };
        let field_type = match schema.string_width(field) {
            Some(width) => format!("A{width}"),
            None => field.field_type.to_string(),
        };
        let levels: usize = schema
            .value_labels_for(field)
            .map(|table| table.labels.len())
            .sum();
        table.add_row(vec![
            Cell::new(field.slot),
            Cell::new(&field.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            long_name_cell,
            Cell::new(field_type),
            Cell::new(field.print_format),
            optional_cell(field.label.as_deref()),
            optional_cell(field.missing.as_ref().map(format_missing).as_deref()),
            count_cell(levels),
        ]);
    }
    table
}

/// Value-label levels, one row per level; `None` when the file has none.
pub fn value_labels_table(schema: &Schema) -> Option<Table> {
    if schema.records.value_labels.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Variables"),
        header_cell("Value"),
        header_cell("Label"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for labels in &schema.records.value_labels {
        let names: Vec<&str> = schema
            .fields
            .iter()
            .filter(|field| labels.applies_to(field.slot))
            .map(|field| field.name.as_str())
            .collect();
        let names = names.join(", ");
        for level in &labels.labels {
            table.add_row(vec![
                Cell::new(&names),
                Cell::new(level.value),
                Cell::new(&level.label),
            ]);
        }
    }
    Some(table)
}

/// One line per auxiliary record kind present in the schema.
pub fn record_summary(schema: &Schema) -> Vec<String> {
    let records = &schema.records;
    let mut lines = Vec::new();
    for (index, line) in records.documents.iter().enumerate() {
        lines.push(format!("document {}: {}", index + 1, line));
    }
    if let Some(info) = records.integer_info {
        lines.push(format!(
            "integer info: version {}.{}.{}, machine {}, character code {}",
            info.version_major,
            info.version_minor,
            info.version_revision,
            info.machine_code,
            info.character_code
        ));
    }
    if let Some(info) = records.float_info {
        lines.push(format!(
            "float info: sysmis {:e}, highest {:e}, lowest {:e}",
            info.sysmis, info.highest, info.lowest
        ));
    }
    if !records.display_formats.is_empty() {
        lines.push(format!(
            "display formats: {} entries",
            records.display_formats.len()
        ));
    }
    for blob in &records.auxiliary_blobs {
        lines.push(format!("auxiliary blob: {} bytes", blob.len()));
    }
    for block in &records.extensions {
        lines.push(format!(
            "extension subtype {}: {} x {} bytes",
            block.subtype,
            block.records.len(),
            block.element_size
        ));
    }
    lines.push(format!("case data at offset {}", records.data_offset));
    lines
}

pub fn rows_table(file: &SavFile) -> Table {
    let mut table = Table::new();
    table.set_header(
        file.schema
            .fields
            .iter()
            .map(|field| header_cell(file.schema.long_name(field)))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for (index, field) in file.schema.fields.iter().enumerate() {
        if !field.is_string() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for row in &file.rows {
        table.add_row(row.values().map(value_cell).collect::<Vec<_>>());
    }
    table
}

/// Rows as a pretty JSON array of objects keyed by field name.
pub fn rows_json(rows: &[Row]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

pub fn format_missing(missing: &MissingValues) -> String {
    match missing {
        MissingValues::Discrete(values) => values
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        MissingValues::Range { low, high } => format!("{low} thru {high}"),
        MissingValues::RangeAndValue { low, high, value } => {
            format!("{low} thru {high}, {value}")
        }
        MissingValues::Strings(values) => values
            .iter()
            .map(|value| format!("\"{}\"", value.trim_end()))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn value_cell(value: &SavValue) -> Cell {
    match value {
        SavValue::Null => dim_cell(value),
        _ => Cell::new(value),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell("-")
    } else {
        Cell::new(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_missing() {
        assert_eq!(format_missing(&MissingValues::Discrete(vec![8.0, 9.0])), "8, 9");
        assert_eq!(
            format_missing(&MissingValues::RangeAndValue {
                low: 1.0,
                high: 3.5,
                value: 99.0
            }),
            "1 thru 3.5, 99"
        );
        assert_eq!(
            format_missing(&MissingValues::Strings(vec!["NA      ".to_string()])),
            "\"NA\""
        );
    }
}
