//! Conversion of arbitrary caller values into untrusted path text.
//!
//! Anything that can be a path candidate implements [`PathInput`]. A value
//! either has a textual form, or it does not; values without one are
//! normalized as the empty path and flagged as untrusted, they never fail.
//!
//! ```rust
//! use virtual_path::{Displayed, PathInput, Uncoercible, VirtualPath};
//! use std::net::Ipv4Addr;
//!
//! assert_eq!(VirtualPath::new("a/b").as_str(), "/a/b");
//! assert_eq!(VirtualPath::new(&42u32).as_str(), "/42");
//! assert_eq!(VirtualPath::new(&Displayed(Ipv4Addr::LOCALHOST)).as_str(), "/127.0.0.1");
//!
//! let opaque = VirtualPath::new(&Uncoercible);
//! assert!(!opaque.is_trusted());
//! assert_eq!(opaque.untrusted_path(), "");
//! assert!(Uncoercible.to_path_text().is_none());
//! ```

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

/// A value that may be offered as an untrusted path.
///
/// Returning `None` means the value has no textual representation. The
/// normalizer then uses the empty string and marks the result untrusted.
///
/// Scalars render through `Display`: `false` becomes the segment `"false"`,
/// not an empty string, so it is a one-segment path rather than the root.
pub trait PathInput {
    /// Returns the textual form of this value, if it has one.
    fn to_path_text(&self) -> Option<Cow<'_, str>>;
}

/// Exposes any [`fmt::Display`] type as path text.
///
/// Use it for domain types that render to a path-like string but do not
/// implement [`PathInput`] themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display> PathInput for Displayed<T> {
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Owned(self.0.to_string()))
    }
}

/// A value with no textual form.
///
/// Normalizing it yields the root path with the trust flag cleared. Handy
/// when an upstream decoder produced something that is not a path at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Uncoercible;

impl PathInput for Uncoercible {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        None
    }
}

impl PathInput for str {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl PathInput for String {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl PathInput for Cow<'_, str> {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_ref()))
    }
}

// Scalars render through their `Display` form.
macro_rules! impl_path_input_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PathInput for $ty {
                #[inline]
                fn to_path_text(&self) -> Option<Cow<'_, str>> {
                    Some(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

impl_path_input_via_display!(
    char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

// Non-UTF-8 platform strings have no faithful textual form.
impl PathInput for OsStr {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        self.to_str().map(Cow::Borrowed)
    }
}

impl PathInput for OsString {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        self.as_os_str().to_path_text()
    }
}

impl PathInput for Path {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        self.as_os_str().to_path_text()
    }
}

impl PathInput for PathBuf {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        self.as_os_str().to_path_text()
    }
}

impl PathInput for [u8] {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        std::str::from_utf8(self).ok().map(Cow::Borrowed)
    }
}

impl PathInput for Vec<u8> {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        self.as_slice().to_path_text()
    }
}

impl<T: PathInput> PathInput for Option<T> {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(PathInput::to_path_text)
    }
}

impl<T: PathInput + ?Sized> PathInput for &T {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        (**self).to_path_text()
    }
}

impl<T: PathInput + ?Sized> PathInput for Box<T> {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        (**self).to_path_text()
    }
}

impl<T: PathInput + ?Sized> PathInput for Rc<T> {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        (**self).to_path_text()
    }
}

impl<T: PathInput + ?Sized> PathInput for Arc<T> {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        (**self).to_path_text()
    }
}

/// Only JSON scalars have a textual form; `null`, arrays and objects do not.
#[cfg(feature = "serde")]
impl PathInput for serde_json::Value {
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        use serde_json::Value;

        match self {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => b.to_path_text(),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
