use crate::error::{truncate_untrusted, TrustViolation, VirtualPathError};
use crate::input::PathInput;
use crate::validator;
use crate::Result;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A normalized, absolute path inside a virtual root.
///
/// Built from untrusted input in a single pass: backslashes become slashes,
/// empty and `.` segments disappear, and `..` removes the previous segment.
/// A `..` that would climb above the root is absorbed and the path is
/// flagged as untrusted instead of failing.
///
/// ```rust
/// use virtual_path::VirtualPath;
///
/// let path = VirtualPath::new("hello/../world/../../test");
/// assert_eq!(path.as_str(), "/test");
/// assert_eq!(path.segments(), ["test"]);
/// assert_eq!(path.untrusted_path(), "hello/../world/../../test");
/// assert!(!path.is_trusted());
/// ```
///
/// Equality, ordering and hashing consider the canonical form only.
#[derive(Clone, Debug)]
pub struct VirtualPath {
    untrusted: String,
    segments: Vec<String>,
    canonical: String,
    violation: Option<TrustViolation>,
}

impl VirtualPath {
    /// Normalizes `input` into a virtual path.
    ///
    /// Never fails. Inputs without a textual form are treated as the empty
    /// path and flagged with [`TrustViolation::Uncoercible`].
    pub fn new<I: PathInput + ?Sized>(input: &I) -> Self {
        match input.to_path_text() {
            Some(text) => Self::from_text(text.into_owned(), None),
            None => {
                tracing::debug!(
                    target: "virtual_path",
                    "path input has no textual form; using the virtual root"
                );
                Self::from_text(String::new(), Some(TrustViolation::Uncoercible))
            }
        }
    }

    fn from_text(untrusted: String, mut violation: Option<TrustViolation>) -> Self {
        let clamped = validator::clamp(&untrusted);

        if clamped.escaped {
            tracing::debug!(
                target: "virtual_path",
                untrusted = %truncate_untrusted(&untrusted),
                "clamped traversal above the virtual root"
            );
            violation.get_or_insert(TrustViolation::Traversal);
        }

        let segments: Vec<String> = clamped.segments.into_iter().map(str::to_owned).collect();
        let canonical = format!("/{}", segments.join("/"));

        Self {
            untrusted,
            segments,
            canonical,
            violation,
        }
    }

    /// The canonical form: `/` followed by the segments joined with `/`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The resolved segments, in path order.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[inline]
    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }

    /// The input as text, before normalization. Empty when the input had
    /// no textual form.
    #[inline]
    pub fn untrusted_path(&self) -> &str {
        &self.untrusted
    }

    /// `false` if the input could not be coerced to text or tried to escape
    /// the virtual root. Later segments never restore trust.
    #[inline]
    pub fn is_trusted(&self) -> bool {
        self.violation.is_none()
    }

    /// Why this path is untrusted, if it is.
    #[inline]
    pub fn violation(&self) -> Option<TrustViolation> {
        self.violation
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, or `None` for the root.
    #[inline]
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The parent directory. The parent of the root is the root.
    ///
    /// The result is normalized again from the parent's canonical form, so
    /// it is always trusted and its `untrusted_path` equals its canonical
    /// form.
    pub fn parent(&self) -> Self {
        let dir = match self.canonical.rfind('/') {
            Some(0) | None => "/",
            Some(idx) => &self.canonical[..idx],
        };
        Self::new(dir)
    }

    /// Rejects the path unless it is trusted.
    ///
    /// ```rust
    /// use virtual_path::{TrustViolation, VirtualPath};
    ///
    /// assert!(VirtualPath::new("docs/readme.md").into_trusted().is_ok());
    ///
    /// let err = VirtualPath::new("../secret").into_trusted().unwrap_err();
    /// assert_eq!(err.violation(), TrustViolation::Traversal);
    /// ```
    pub fn into_trusted(self) -> Result<Self> {
        match self.violation {
            None => Ok(self),
            Some(v) => Err(VirtualPathError::from_violation(v, &self.untrusted)),
        }
    }
}

impl PathInput for VirtualPath {
    #[inline]
    fn to_path_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl fmt::Display for VirtualPath {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl AsRef<str> for VirtualPath {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl From<&str> for VirtualPath {
    #[inline]
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for VirtualPath {
    #[inline]
    fn from(path: String) -> Self {
        Self::from_text(path, None)
    }
}

impl FromStr for VirtualPath {
    type Err = Infallible;

    #[inline]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl PartialEq for VirtualPath {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for VirtualPath {}

impl Hash for VirtualPath {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for VirtualPath {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VirtualPath {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for VirtualPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical)
    }
}

/// Deserializes any scalar and normalizes it.
///
/// Hostile strings are accepted and flagged, never rejected. `null` and
/// unit become an untrusted root; sequences and maps are a type error.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for VirtualPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct VirtualPathVisitor;

        impl<'de> serde::de::Visitor<'de> for VirtualPathVisitor {
            type Value = VirtualPath;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a path string or scalar")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> std::result::Result<VirtualPath, E> {
                Ok(VirtualPath::new(v))
            }

            fn visit_string<E: serde::de::Error>(
                self,
                v: String,
            ) -> std::result::Result<VirtualPath, E> {
                Ok(VirtualPath::from(v))
            }

            fn visit_bool<E: serde::de::Error>(
                self,
                v: bool,
            ) -> std::result::Result<VirtualPath, E> {
                Ok(VirtualPath::new(&v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> std::result::Result<VirtualPath, E> {
                Ok(VirtualPath::new(&v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> std::result::Result<VirtualPath, E> {
                Ok(VirtualPath::new(&v))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> std::result::Result<VirtualPath, E> {
                Ok(VirtualPath::new(&v))
            }

            fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<VirtualPath, E> {
                Ok(VirtualPath::new(&crate::Uncoercible))
            }

            fn visit_none<E: serde::de::Error>(self) -> std::result::Result<VirtualPath, E> {
                self.visit_unit()
            }
        }

        deserializer.deserialize_any(VirtualPathVisitor)
    }
}
