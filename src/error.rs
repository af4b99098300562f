//! Error types for network parsing and PAC extraction.

use thiserror::Error;

/// Errors raised while turning text into networks.
///
/// File ingestion recovers from `Parse` and `UnsupportedAddressFamily` by
/// skipping the line. `UnrecognizedDirective` halts PAC ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetError {
    /// Malformed address, mask or prefix literal.
    #[error("invalid network '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// An IPv6 literal where only IPv4 is handled.
    #[error("IPv6 is not supported: '{0}'")]
    UnsupportedAddressFamily(String),

    /// Comparison between an IPv4 network and an address of another family.
    #[error("{a} and {b} are not of the same version")]
    VersionMismatch { a: String, b: String },

    /// PAC line outside the known `DIRECT` / `PROXY` grammar.
    #[error("line {line} {reason}: '{text}'")]
    UnrecognizedDirective {
        line: usize,
        reason: String,
        text: String,
    },
}

impl NetError {
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> NetError {
        NetError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
