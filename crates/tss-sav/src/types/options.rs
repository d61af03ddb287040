//! Reader options.

/// Options for reading system files.
#[derive(Debug, Clone)]
pub struct SavReaderOptions {
    /// Trim trailing spaces and NUL padding from string values (default: true).
    pub trim_strings: bool,
    /// Decode the file's system-missing value as `Null` (default: false).
    pub system_missing_as_null: bool,
    /// Stop after this many rows (default: no limit).
    pub row_limit: Option<usize>,
}

impl Default for SavReaderOptions {
    fn default() -> Self {
        Self {
            trim_strings: true,
            system_missing_as_null: false,
            row_limit: None,
        }
    }
}

impl SavReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep string values exactly as stored.
    #[must_use]
    pub fn untrimmed(mut self) -> Self {
        self.trim_strings = false;
        self
    }

    /// Map the system-missing value to `Null`.
    #[must_use]
    pub fn with_system_missing_as_null(mut self, enable: bool) -> Self {
        self.system_missing_as_null = enable;
        self
    }

    /// Decode at most `limit` rows.
    #[must_use]
    pub fn with_row_limit(mut self, limit: usize) -> Self {
        self.row_limit = Some(limit);
        self
    }
}
