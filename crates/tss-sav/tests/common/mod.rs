//! Byte-level builder for system file fixtures.

#![allow(dead_code)]

/// Assembles a system file from header settings, dictionary records and
/// raw case-data bytes.
pub struct SavBuilder {
    signature: [u8; 4],
    compression: i32,
    cases: i32,
    bias: f64,
    label: String,
    slots: i32,
    dictionary: Vec<u8>,
    records: Vec<u8>,
    data: Vec<u8>,
}

impl Default for SavBuilder {
    fn default() -> Self {
        Self {
            signature: *b"$FL2",
            compression: 0,
            cases: 0,
            bias: 100.0,
            label: String::new(),
            slots: 0,
            dictionary: Vec::new(),
            records: Vec::new(),
            data: Vec::new(),
        }
    }
}

impl SavBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signature(mut self, signature: &[u8; 4]) -> Self {
        self.signature = *signature;
        self
    }

    pub fn compression(mut self, flag: i32) -> Self {
        self.compression = flag;
        self
    }

    pub fn cases(mut self, cases: i32) -> Self {
        self.cases = cases;
        self
    }

    pub fn bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Declare a numeric variable.
    pub fn numeric(self, name: &str) -> Self {
        self.variable(0, name, None)
    }

    /// Declare a labelled numeric variable.
    pub fn numeric_labelled(self, name: &str, label: &str) -> Self {
        self.variable(0, name, Some(label))
    }

    /// Declare a string variable plus its continuation records.
    pub fn string(mut self, name: &str, width: i32) -> Self {
        self = self.variable(width, name, None);
        let extra = (width as usize).div_ceil(8) - 1;
        for _ in 0..extra {
            self = self.variable(-1, "", None);
        }
        self
    }

    fn variable(mut self, type_code: i32, name: &str, label: Option<&str>) -> Self {
        self.slots += 1;
        let buf = &mut self.dictionary;
        buf.extend_from_slice(&2i32.to_le_bytes());
        buf.extend_from_slice(&type_code.to_le_bytes());
        buf.extend_from_slice(&i32::from(label.is_some()).to_le_bytes());
        buf.extend_from_slice(&0i32.to_le_bytes());
        buf.extend_from_slice(&0i32.to_le_bytes());
        buf.extend_from_slice(&0i32.to_le_bytes());
        buf.extend_from_slice(&padded(name.as_bytes(), 8, b' '));
        if let Some(label) = label {
            buf.extend_from_slice(&(label.len() as i32).to_le_bytes());
            buf.extend_from_slice(&padded(label.as_bytes(), label.len().div_ceil(4) * 4, b' '));
        }
        self
    }

    /// Append a value-label table (tag 3) with the given magic.
    pub fn value_labels(mut self, levels: &[(f64, &str)], magic: i32, variables: &[i32]) -> Self {
        let buf = &mut self.records;
        buf.extend_from_slice(&3i32.to_le_bytes());
        buf.extend_from_slice(&(levels.len() as i32).to_le_bytes());
        for (value, label) in levels {
            buf.extend_from_slice(&value.to_le_bytes());
            buf.push(label.len() as u8);
            let padded_len = (label.len() + 1).div_ceil(8) * 8 - 1;
            buf.extend_from_slice(&padded(label.as_bytes(), padded_len, b' '));
        }
        buf.extend_from_slice(&magic.to_le_bytes());
        buf.extend_from_slice(&(variables.len() as i32).to_le_bytes());
        for index in variables {
            buf.extend_from_slice(&index.to_le_bytes());
        }
        self
    }

    /// Append a document record (tag 6).
    pub fn documents(mut self, lines: &[&str]) -> Self {
        let buf = &mut self.records;
        buf.extend_from_slice(&6i32.to_le_bytes());
        buf.extend_from_slice(&(lines.len() as i32).to_le_bytes());
        for line in lines {
            buf.extend_from_slice(&padded(line.as_bytes(), 80, b' '));
        }
        self
    }

    /// Append an extension record (tag 7).
    pub fn extension(mut self, subtype: i32, size: i32, count: i32, payload: &[u8]) -> Self {
        let buf = &mut self.records;
        buf.extend_from_slice(&7i32.to_le_bytes());
        buf.extend_from_slice(&subtype.to_le_bytes());
        buf.extend_from_slice(&size.to_le_bytes());
        buf.extend_from_slice(&count.to_le_bytes());
        buf.extend_from_slice(payload);
        self
    }

    /// Append integer info declaring the byte order of raw cells.
    pub fn integer_info(self, endianness: i32) -> Self {
        let payload = ints(&[21, 0, 2, 720, 1, 1, endianness, 65001]);
        self.extension(3, 4, 8, &payload)
    }

    /// Append float info.
    pub fn float_info(self, sysmis: f64) -> Self {
        let mut payload = sysmis.to_le_bytes().to_vec();
        payload.extend_from_slice(&f64::MAX.to_le_bytes());
        payload.extend_from_slice(&(-f64::MAX).to_le_bytes());
        self.extension(4, 8, 3, &payload)
    }

    /// Append a text extension (long names, long string widths).
    pub fn text_extension(self, subtype: i32, text: &str) -> Self {
        self.extension(subtype, 1, text.len() as i32, text.as_bytes())
    }

    /// Append raw bytes to the auxiliary record stream.
    pub fn raw_record(mut self, bytes: &[u8]) -> Self {
        self.records.extend_from_slice(bytes);
        self
    }

    /// Append raw case-data bytes.
    pub fn data(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Append uncompressed numeric cells.
    pub fn numbers(mut self, values: &[f64]) -> Self {
        for value in values {
            self.data.extend_from_slice(&value.to_le_bytes());
        }
        self
    }

    /// Append one instruction block, padding with filler codes.
    pub fn instructions(mut self, codes: &[u8]) -> Self {
        self.data.extend_from_slice(&block(codes));
        self
    }

    /// Offset where case data will start.
    pub fn data_offset(&self) -> usize {
        176 + self.dictionary.len() + self.records.len() + 8
    }

    /// Produce the file bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&padded(b"@(#) SPSS DATA FILE test fixture", 60, b' '));
        out.extend_from_slice(&2i32.to_le_bytes());
        out.extend_from_slice(&self.slots.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&0i32.to_le_bytes());
        out.extend_from_slice(&self.cases.to_le_bytes());
        out.extend_from_slice(&self.bias.to_le_bytes());
        out.extend_from_slice(b"19 Oct 26");
        out.extend_from_slice(b"12:00:00");
        out.extend_from_slice(&padded(self.label.as_bytes(), 64, b' '));
        out.extend_from_slice(&[0u8; 3]);
        assert_eq!(out.len(), 176);

        out.extend_from_slice(&self.dictionary);
        out.extend_from_slice(&self.records);
        out.extend_from_slice(&999i32.to_le_bytes());
        out.extend_from_slice(&0i32.to_le_bytes());
        out.extend_from_slice(&self.data);
        out
    }
}

/// Pad `bytes` to `len` with `fill`.
pub fn padded(bytes: &[u8], len: usize, fill: u8) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out.resize(len, fill);
    out
}

/// One 8-byte instruction block.
pub fn block(codes: &[u8]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[..codes.len()].copy_from_slice(codes);
    out
}

/// Little-endian i32 payload.
pub fn ints(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
