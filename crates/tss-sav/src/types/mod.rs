//! Core types for system file handling.
//!
//! This module provides the data structures produced by the readers: file
//! metadata, the field dictionary, auxiliary records, the assembled schema
//! and decoded rows.

mod field;
mod meta;
mod options;
mod records;
mod schema;
mod value;

pub use field::{Field, FieldType, MissingValues, VariableFormat};
pub use meta::{Compression, FileMeta};
pub use options::SavReaderOptions;
pub use records::{
    DisplayFormat, Endianness, ExtensionBlock, FloatInfo, IntegerInfo, InternalRecord,
    InternalRecords, InternalRecordsBuilder, ValueLabel, ValueLabelTable,
};
pub use schema::{SavFile, Schema};
pub use value::{Row, SavValue};
