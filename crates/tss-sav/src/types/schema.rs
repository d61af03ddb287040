//! Assembled dictionary.

use super::{Endianness, Field, FileMeta, InternalRecords, Row, ValueLabelTable};

/// Immutable result of reading a file's header and dictionary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Schema {
    pub meta: FileMeta,
    pub fields: Vec<Field>,
    pub records: InternalRecords,
}

impl Schema {
    /// Find a field by its short name.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Long name of a field, falling back to its short name.
    #[must_use]
    pub fn long_name<'a>(&'a self, field: &'a Field) -> &'a str {
        self.records
            .long_names
            .get(&field.name)
            .map_or(field.name.as_str(), String::as_str)
    }

    /// True character width of a string field, `None` for numerics.
    #[must_use]
    pub fn string_width(&self, field: &Field) -> Option<usize> {
        if !field.is_string() {
            return None;
        }
        self.records
            .long_string_widths
            .get(&field.name)
            .copied()
            .or(Some(field.field_type.code() as usize))
    }

    /// Value-label tables that apply to `field`.
    pub fn value_labels_for<'a>(
        &'a self,
        field: &'a Field,
    ) -> impl Iterator<Item = &'a ValueLabelTable> + 'a {
        self.records
            .value_labels
            .iter()
            .filter(move |table| table.applies_to(field.slot))
    }

    /// Whether case data is compressed.
    #[must_use]
    pub fn is_compressed(&self) -> bool {
        self.meta.compression.is_compressed()
    }

    /// Byte order of uncompressed numeric cells.
    #[must_use]
    pub fn endianness(&self) -> Endianness {
        self.records
            .integer_info
            .and_then(|info| info.byte_order())
            .unwrap_or_default()
    }

    /// System-missing value declared by the file.
    #[must_use]
    pub fn sysmis(&self) -> f64 {
        self.records
            .float_info
            .map_or(f64::MIN, |info| info.sysmis)
    }
}

/// A fully decoded file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SavFile {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

impl SavFile {
    /// Number of decoded rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of fields.
    #[must_use]
    pub fn num_fields(&self) -> usize {
        self.schema.fields.len()
    }
}
