//! File-level metadata.

use chrono::NaiveDateTime;

use crate::error::{Result, SavError};

/// Case-data compression declared in the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Compression {
    /// Raw 8-byte cells.
    None,
    /// Byte-code compression.
    Bytecode,
    /// Secondary variant of the byte-code scheme (flag 2). Decoded exactly
    /// like [`Compression::Bytecode`].
    Secondary,
}

impl Compression {
    /// Map the header flag to a compression mode.
    pub fn from_flag(flag: i32) -> Result<Self> {
        match flag {
            0 => Ok(Self::None),
            1 => Ok(Self::Bytecode),
            2 => Ok(Self::Secondary),
            other => Err(SavError::invalid_format(format!(
                "compression flag: expected 0, 1 or 2, found {other}"
            ))),
        }
    }

    /// Header flag value.
    #[must_use]
    pub const fn flag(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Bytecode => 1,
            Self::Secondary => 2,
        }
    }

    /// Whether cells go through the instruction stream.
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Bytecode => write!(f, "bytecode"),
            Self::Secondary => write!(f, "bytecode (variant 2)"),
        }
    }
}

/// Metadata from the 176-byte file header.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileMeta {
    /// Product string of the writing application.
    pub product: String,
    /// Layout code (2 or 3 in practice).
    pub layout_code: i32,
    /// Number of 8-byte slots per case as declared by the writer.
    pub variable_count: i32,
    /// Case-data compression.
    pub compression: Compression,
    /// 1-based dictionary index of the weight variable, 0 when unweighted.
    pub weight_index: i32,
    /// Declared number of cases; negative when the writer did not know it.
    pub cases: i32,
    /// Bias subtracted from compressed integer codes.
    pub bias: f64,
    /// Creation date, `dd MMM yy`.
    pub creation_date: String,
    /// Creation time, `HH:MM:SS`.
    pub creation_time: String,
    /// File label.
    pub file_label: String,
}

impl FileMeta {
    /// Declared case count, or `None` when unknown.
    #[must_use]
    pub fn case_count(&self) -> Option<usize> {
        usize::try_from(self.cases).ok()
    }

    /// Whether a weight variable is declared.
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.weight_index > 0
    }

    /// Creation timestamp, when both header strings are well-formed.
    #[must_use]
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        let stamp = format!("{} {}", self.creation_date.trim(), self.creation_time.trim());
        NaiveDateTime::parse_from_str(&stamp, "%d %b %y %H:%M:%S").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn meta() -> FileMeta {
        FileMeta {
            product: "@(#) SPSS DATA FILE".to_string(),
            layout_code: 2,
            variable_count: 1,
            compression: Compression::None,
            weight_index: 0,
            cases: 3,
            bias: 100.0,
            creation_date: "15 Mar 24".to_string(),
            creation_time: "14:30:45".to_string(),
            file_label: String::new(),
        }
    }

    #[test]
    fn test_compression_flags() {
        assert_eq!(Compression::from_flag(0).unwrap(), Compression::None);
        assert_eq!(Compression::from_flag(1).unwrap(), Compression::Bytecode);
        assert_eq!(Compression::from_flag(2).unwrap(), Compression::Secondary);
        assert!(Compression::from_flag(3).is_err());
        assert!(Compression::Secondary.is_compressed());
        assert!(!Compression::None.is_compressed());
        assert_eq!(Compression::Bytecode.flag(), 1);
    }

    #[test]
    fn test_created_at() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 45)
            .unwrap();
        assert_eq!(meta().created_at(), Some(expected));

        let mut broken = meta();
        broken.creation_time = "garbage".to_string();
        assert_eq!(broken.created_at(), None);
    }

    #[test]
    fn test_case_count() {
        let mut m = meta();
        assert_eq!(m.case_count(), Some(3));
        m.cases = -1;
        assert_eq!(m.case_count(), None);
        assert!(!m.is_weighted());
    }
}
