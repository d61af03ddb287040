//! System file reader.
//!
//! Provides the four read entry points (metadata, fields, schema, schema
//! plus rows) over a [`ByteCursor`], and path/byte convenience functions.

use std::fs;
use std::path::Path;

use crate::cursor::ByteCursor;
use crate::error::{Result, SavError};
use crate::header::{HEADER_LEN, read_fields, read_file_meta, read_internal_records};
use crate::rows::RowDecoder;
use crate::trace::{Trace, TraceSink};
use crate::types::{Field, FileMeta, SavFile, SavReaderOptions, Schema};

/// System file reader.
///
/// Every entry point records the cursor position on entry and restores it on
/// exit, also on failure, so consecutive calls over one cursor do not affect
/// each other.
pub struct SavReader<'s> {
    options: SavReaderOptions,
    trace: Trace<'s>,
}

impl<'s> SavReader<'s> {
    /// Create a reader, optionally collecting trace lines into `sink`.
    pub fn new(sink: Option<&'s mut dyn TraceSink>) -> Self {
        Self::with_options(SavReaderOptions::default(), sink)
    }

    /// Create a reader with options.
    pub fn with_options(options: SavReaderOptions, sink: Option<&'s mut dyn TraceSink>) -> Self {
        Self {
            options,
            trace: Trace::new(sink),
        }
    }

    /// Reader options in effect.
    #[must_use]
    pub fn options(&self) -> &SavReaderOptions {
        &self.options
    }

    /// Read the file header only.
    pub fn read_metadata(&mut self, cursor: &mut ByteCursor<'_>) -> Result<FileMeta> {
        let meta = read_file_meta(cursor)?;
        self.trace.emit(format_args!(
            "header: {} cases, compression {}, bias {}",
            meta.cases, meta.compression, meta.bias
        ));
        Ok(meta)
    }

    /// Read the header and the field dictionary.
    pub fn read_fields(&mut self, cursor: &mut ByteCursor<'_>) -> Result<Vec<Field>> {
        self.read_metadata(cursor)?;
        let trace = &mut self.trace;
        restoring(cursor, |cursor| {
            cursor.seek(HEADER_LEN)?;
            read_fields(cursor, trace)
        })
    }

    /// Read the header, field dictionary and auxiliary records.
    pub fn read_schema(&mut self, cursor: &mut ByteCursor<'_>) -> Result<Schema> {
        let meta = self.read_metadata(cursor)?;
        let trace = &mut self.trace;
        restoring(cursor, |cursor| {
            cursor.seek(HEADER_LEN)?;
            let fields = read_fields(cursor, trace)?;
            let records = read_internal_records(cursor, trace)?;
            Ok(Schema {
                meta,
                fields,
                records,
            })
        })
    }

    /// Read the schema and decode every case.
    pub fn read_all(&mut self, cursor: &mut ByteCursor<'_>) -> Result<SavFile> {
        let schema = self.read_schema(cursor)?;
        let rows = RowDecoder::new(&schema, &self.options).decode(cursor, &mut self.trace)?;
        Ok(SavFile { schema, rows })
    }
}

/// Run `read` and put the cursor back where it was, whatever the outcome.
fn restoring<'a, T>(
    cursor: &mut ByteCursor<'a>,
    read: impl FnOnce(&mut ByteCursor<'a>) -> Result<T>,
) -> Result<T> {
    let entry = cursor.position();
    let result = read(cursor);
    cursor.seek(entry)?;
    result
}

/// Read a system file from a path.
///
/// The whole file is loaded into memory before decoding.
pub fn read_sav(path: &Path) -> Result<SavFile> {
    read_sav_with_options(path, SavReaderOptions::default())
}

/// Read a system file from a path with options.
pub fn read_sav_with_options(path: &Path, options: SavReaderOptions) -> Result<SavFile> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SavError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SavError::Io(e)
        }
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read system file");
    SavReader::with_options(options, None).read_all(&mut ByteCursor::new(&bytes))
}

/// Decode a system file held in memory.
pub fn read_sav_bytes(bytes: &[u8]) -> Result<SavFile> {
    SavReader::new(None).read_all(&mut ByteCursor::new(bytes))
}
