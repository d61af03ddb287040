//! Parse trace collection.
//!
//! Readers report what they decode as short human-readable lines. The lines
//! always go to `tracing` at debug level; callers that want them as data can
//! additionally supply a [`TraceSink`].

use std::fmt::Display;

/// Receiver for human-readable parse trace lines.
pub trait TraceSink {
    /// Record one trace line.
    fn record(&mut self, line: &str);
}

impl TraceSink for Vec<String> {
    fn record(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Optional sink plus the `tracing` side channel.
pub(crate) struct Trace<'s> {
    sink: Option<&'s mut dyn TraceSink>,
}

impl<'s> Trace<'s> {
    pub(crate) fn new(sink: Option<&'s mut dyn TraceSink>) -> Self {
        Self { sink }
    }

    pub(crate) fn emit(&mut self, line: impl Display) {
        let line = line.to_string();
        tracing::debug!(target: "tss_sav", "{line}");
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.record(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_keeps_order() {
        let mut lines: Vec<String> = Vec::new();
        {
            let mut trace = Trace::new(Some(&mut lines));
            trace.emit("first");
            trace.emit(format_args!("second {}", 2));
        }
        assert_eq!(lines, vec!["first".to_string(), "second 2".to_string()]);
    }

    #[test]
    fn test_no_sink() {
        let mut trace = Trace::new(None);
        trace.emit("ignored");
    }
}
