//! SPSS system file (`.sav`) reader.
//!
//! This crate decodes the binary system file container: the fixed file
//! header, the variable dictionary, the auxiliary records that follow it and
//! the case data, uncompressed or byte-code compressed.
//!
//! # Features
//!
//! - File metadata, fields, full schema or schema plus rows from one buffer
//! - Continuation records folded into their string variable
//! - Value labels, documents, display formats, long names and widths
//! - Unknown extension records preserved verbatim
//! - Optional trace collection through [`TraceSink`]
//! - Optional Polars DataFrame integration (with `polars` feature)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tss_sav::{ByteCursor, SavReader, read_sav};
//!
//! // Read everything from a file
//! let file = read_sav(Path::new("survey.sav")).unwrap();
//! println!("{} fields, {} rows", file.num_fields(), file.num_rows());
//!
//! // Or query one buffer piece by piece, collecting trace lines
//! let bytes = std::fs::read("survey.sav").unwrap();
//! let mut cursor = ByteCursor::new(&bytes);
//! let mut lines: Vec<String> = Vec::new();
//! let mut reader = SavReader::new(Some(&mut lines));
//! let meta = reader.read_metadata(&mut cursor).unwrap();
//! let fields = reader.read_fields(&mut cursor).unwrap();
//! println!("{} declares {} fields", meta.product, fields.len());
//! ```

mod cursor;
mod error;
pub mod header;
mod reader;
pub mod rows;
mod trace;
mod types;

#[cfg(feature = "polars")]
mod polars_ext;

// Re-export error types
pub use error::{Result, SavError};

// Re-export the cursor and trace sink
pub use cursor::ByteCursor;
pub use trace::TraceSink;

// Re-export core types
pub use types::{
    Compression, DisplayFormat, Endianness, ExtensionBlock, Field, FieldType, FileMeta, FloatInfo,
    IntegerInfo, InternalRecord, InternalRecords, InternalRecordsBuilder, MissingValues, Row,
    SavFile, SavReaderOptions, SavValue, Schema, ValueLabel, ValueLabelTable, VariableFormat,
};

// Re-export reader functionality
pub use reader::{SavReader, read_sav, read_sav_bytes, read_sav_with_options};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
