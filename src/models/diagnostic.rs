//! Diagnostics returned alongside results.
//!
//! Ingestion and reconciliation record what they skipped, replaced or flagged
//! here instead of writing to the logger directly; the caller decides where
//! the messages go.

use std::fmt;

/// How loud a diagnostic should be when it is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
}

/// A single message tied to the source it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// File name, PAC path or pass label the message refers to.
    pub source: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.source, self.message)
    }
}

/// Ordered list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics { items: Vec::new() }
    }

    pub fn push(&mut self, severity: Severity, source: &str, message: impl Into<String>) {
        self.items.push(Diagnostic {
            severity,
            source: source.to_string(),
            message: message.into(),
        });
    }

    pub fn debug(&mut self, source: &str, message: impl Into<String>) {
        self.push(Severity::Debug, source, message);
    }

    pub fn info(&mut self, source: &str, message: impl Into<String>) {
        self.push(Severity::Info, source, message);
    }

    pub fn warn(&mut self, source: &str, message: impl Into<String>) {
        self.push(Severity::Warning, source, message);
    }

    /// Append all of `other`, keeping order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics at exactly `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity == severity).count()
    }

    /// Send every diagnostic to the `log` macro matching its severity.
    pub fn log_all(&self) {
        for d in &self.items {
            match d.severity {
                Severity::Debug => log::debug!("{d}"),
                Severity::Info => log::info!("{d}"),
                Severity::Warning => log::warn!("{d}"),
            }
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_count() {
        let mut diags = Diagnostics::new();
        diags.debug("intranet.txt", "ignore text line 1: # header");
        diags.warn("pass 1", "10.0.0.128/25 is subnet of 10.0.0.0/24, skipped");
        diags.warn("pass 1", "10.0.1.0/24 is subnet of 10.0.0.0/23, skipped");
        assert_eq!(diags.len(), 3);
        assert_eq!(diags.count(Severity::Warning), 2);
        assert_eq!(diags.count(Severity::Info), 0);
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut a = Diagnostics::new();
        a.info("a", "first");
        let mut b = Diagnostics::new();
        b.warn("b", "second");
        a.extend(b);
        let messages: Vec<String> = a.iter().map(|d| d.to_string()).collect();
        assert_eq!(messages, vec!["[a] first", "[b] second"]);
    }
}
