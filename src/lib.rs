//! # virtual-path
//!
//! Normalize untrusted path strings into safe, jail-relative paths and flag
//! directory traversal attempts, without ever touching the filesystem.
//!
//! Hostile input is data, not an error. Every input, however malicious,
//! produces a well-defined contained path plus a trust flag; deciding what to
//! do with a flagged path (reject it, log it, sandbox it further) is left to
//! the caller.
//!
//! ## The problem
//!
//! ```rust
//! // Looks innocent, but "../../../etc/passwd" walks straight out of ./public.
//! fn serve_file_unsafe(path: &str) -> std::io::Result<Vec<u8>> {
//!     std::fs::read(format!("./public/{path}"))
//! }
//! # let _ = serve_file_unsafe;
//! ```
//!
//! ## Virtual paths
//!
//! [`VirtualPath`] resolves a path against a virtual root `/`. Both `/` and
//! `\` are separators regardless of the host platform, empty and `.` segments
//! vanish, and `..` pops the previous segment. A `..` at the root is clamped
//! and clears the trust flag.
//!
//! ```rust
//! use virtual_path::VirtualPath;
//!
//! let path = VirtualPath::new(r"C:\\hello\world");
//! assert_eq!(path.as_str(), "/C:/hello/world");
//! assert_eq!(path.segments(), ["C:", "hello", "world"]);
//! assert!(path.is_trusted());
//!
//! let escape = VirtualPath::new("hello/../world/../../test");
//! assert_eq!(escape.to_string(), "/test");
//! assert!(!escape.is_trusted());
//!
//! assert_eq!(escape.parent().as_str(), "/");
//! ```
//!
//! ## Jailed paths
//!
//! [`JailedPath`] composes a trusted jail base with a normalized untrusted
//! path. [`Jail`] keeps the base around to compose many paths.
//!
//! ```rust
//! use virtual_path::{jail, Jail};
//!
//! let path = jail("/tmp", "./hello/../world//.//");
//! assert_eq!(path.relative_path(), "world");
//! assert_eq!(path.absolute_path(), "/tmp/world");
//! assert!(!path.has_jailbreak_attempt());
//!
//! let public = Jail::new("/var/www");
//! let attack = public.join("../../etc/passwd");
//! assert_eq!(attack.absolute_path(), "/var/www/etc/passwd");
//! assert!(attack.has_jailbreak_attempt());
//! ```
//!
//! ## Inputs
//!
//! Anything implementing [`PathInput`] can be normalized: string types,
//! numbers, booleans, UTF-8 `Path`/`OsStr`/byte values, and any `Display`
//! type through [`Displayed`]. Values without a textual form (non-UTF-8
//! bytes, `None`, [`Uncoercible`]) become the root path and are flagged.
//!
//! ## Rejecting instead of flagging
//!
//! [`VirtualPath::into_trusted`] and [`JailedPath::into_contained`] turn the
//! trust flag into a [`VirtualPathError`] for callers that prefer `?`.
//!
//! ## Logging
//!
//! Detections are reported through [`tracing`] under the `virtual_path`
//! target: clamping at `DEBUG`, jailbreak attempts at `WARN`. Untrusted
//! input is truncated before it is logged.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`VirtualPath`] and [`Jail`],
//!   `Serialize` for [`JailedPath`], and [`PathInput`] for
//!   `serde_json::Value`.

#![forbid(unsafe_code)]

pub mod error;
pub mod input;
pub mod path;
pub mod validator;

#[cfg(test)]
mod tests;

pub use error::{TrustViolation, VirtualPathError};
pub use input::{Displayed, PathInput, Uncoercible};
pub use path::jailed_path::JailedPath;
pub use path::virtual_path::VirtualPath;
pub use validator::Jail;

/// Normalizes `path` and composes it under `jail` in one call.
///
/// Equivalent to [`JailedPath::new`]; use [`Jail`] to reuse a base.
#[inline]
pub fn jail<I: PathInput + ?Sized>(jail: impl Into<String>, path: &I) -> JailedPath {
    JailedPath::new(jail, path)
}

/// Result type alias for this crate's operations.
pub type Result<T> = std::result::Result<T, VirtualPathError>;
