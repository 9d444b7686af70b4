//! Errors for callers that choose to reject untrusted input.
//!
//! Construction of [`VirtualPath`](crate::VirtualPath) and
//! [`JailedPath`](crate::JailedPath) never fails. These errors only appear
//! when a caller opts into a rejection policy through
//! [`VirtualPath::into_trusted`](crate::VirtualPath::into_trusted) or
//! [`JailedPath::into_contained`](crate::JailedPath::into_contained).

/// Maximum number of characters of untrusted input echoed in messages and logs.
const MAX_ERROR_PATH_LEN: usize = 256;

/// Truncates untrusted text for display, keeping both its start and its end.
pub(crate) fn truncate_path_display(path: &str, max_len: usize) -> String {
    // Character-aware so we never slice through a UTF-8 sequence.
    let char_count = path.chars().count();
    if char_count <= max_len {
        return path.to_owned();
    }

    // Reserve 5 chars for "..."
    let keep = max_len.saturating_sub(5) / 2;
    let start: String = path.chars().take(keep).collect();
    let mut tail_chars: Vec<char> = path.chars().rev().take(keep).collect();
    tail_chars.reverse();
    let end: String = tail_chars.into_iter().collect();

    format!("{start}...{end}")
}

/// Truncates with the crate-wide limit.
#[inline]
pub(crate) fn truncate_untrusted(path: &str) -> String {
    truncate_path_display(path, MAX_ERROR_PATH_LEN)
}

/// Why a normalized path is not trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustViolation {
    /// The input had no textual form and was replaced by an empty path.
    Uncoercible,
    /// A `..` segment tried to climb above the virtual root and was clamped.
    Traversal,
}

/// Errors produced when a caller turns a trust flag into a hard failure.
#[derive(Debug, thiserror::Error)]
pub enum VirtualPathError {
    /// The input tried to traverse above the virtual root.
    #[error("jailbreak attempt detected in path '{}'", truncate_untrusted(.untrusted))]
    JailbreakAttempt {
        /// The coerced untrusted input, stored in full.
        untrusted: String,
    },

    /// The input could not be converted to text.
    #[error("path input has no textual representation")]
    UncoercibleInput,
}

impl VirtualPathError {
    #[inline]
    pub(crate) fn jailbreak_attempt(untrusted: impl Into<String>) -> Self {
        Self::JailbreakAttempt {
            untrusted: untrusted.into(),
        }
    }

    #[inline]
    pub(crate) fn from_violation(violation: TrustViolation, untrusted: &str) -> Self {
        match violation {
            TrustViolation::Uncoercible => Self::UncoercibleInput,
            TrustViolation::Traversal => Self::jailbreak_attempt(untrusted),
        }
    }

    /// The violation this error reports.
    pub fn violation(&self) -> TrustViolation {
        match self {
            Self::JailbreakAttempt { .. } => TrustViolation::Traversal,
            Self::UncoercibleInput => TrustViolation::Uncoercible,
        }
    }
}
