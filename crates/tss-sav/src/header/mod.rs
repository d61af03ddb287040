//! Header and dictionary record parsing.
//!
//! This module handles everything that precedes the case data:
//! - The fixed file header (file-level metadata)
//! - Variable records (the field dictionary)
//! - Auxiliary records (value labels, documents, extension records)
//! - The terminator record that marks the start of case data

pub mod extension;
pub mod file_meta;
pub mod records;
pub mod variable;

pub use extension::{
    AUXILIARY_SUBTYPE, DISPLAY_SUBTYPE, FLOAT_INFO_SUBTYPE, INTEGER_INFO_SUBTYPE,
    LONG_NAMES_SUBTYPE, LONG_STRING_WIDTHS_SUBTYPE, read_extension,
};
pub use file_meta::{HEADER_LEN, SIGNATURE, parse_file_meta, read_file_meta, validate_signature};
pub use records::{
    ALLOWED_RECORD_TAGS, DOCUMENT_LINE_LEN, DOCUMENT_TAG, EXTENSION_TAG, TERMINATOR_TAG,
    VALUE_LABEL_MAGIC, VALUE_LABEL_TAG,
};
pub use variable::FIELD_RECORD_TAG;

pub(crate) use records::read_internal_records;
pub(crate) use variable::read_fields;

/// Read a little-endian i32 at a fixed offset of a bounded block.
pub(crate) fn read_i32_at(data: &[u8], offset: usize) -> i32 {
    let bytes = [
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ];
    i32::from_le_bytes(bytes)
}

/// Read a little-endian f64 at a fixed offset of a bounded block.
pub(crate) fn read_f64_at(data: &[u8], offset: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    f64::from_le_bytes(bytes)
}

/// Decode fixed-width text, dropping trailing spaces and NUL padding.
pub(crate) fn read_text(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .trim_end_matches([' ', '\0'])
        .to_string()
}

/// Round `len` up to the next multiple of `align`.
pub(crate) fn align_to(len: usize, align: usize) -> usize {
    len.div_ceil(align) * align
}
