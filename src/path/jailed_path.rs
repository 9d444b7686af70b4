use crate::error::{truncate_untrusted, TrustViolation, VirtualPathError};
use crate::input::PathInput;
use crate::path::virtual_path::VirtualPath;
use crate::Result;
use std::hash::{Hash, Hasher};

/// An untrusted path composed under a trusted jail base.
///
/// The untrusted part is normalized with [`VirtualPath`], so the result can
/// never climb above the jail. Escape attempts are reported through
/// [`has_jailbreak_attempt`](Self::has_jailbreak_attempt), never as an
/// error, and the contained path is always produced.
///
/// There is intentionally no `Display` implementation: whether the absolute
/// or the relative form is wanted depends on the caller. Pick one with
/// [`absolute_path`](Self::absolute_path) or
/// [`relative_path`](Self::relative_path).
///
/// ```rust
/// use virtual_path::JailedPath;
///
/// let path = JailedPath::new("/tmp", "../etc/passwd");
/// assert_eq!(path.absolute_path(), "/tmp/etc/passwd");
/// assert_eq!(path.relative_path(), "etc/passwd");
/// assert_eq!(path.jail_path(), "/tmp");
/// assert!(path.has_jailbreak_attempt());
/// ```
///
/// Like [`VirtualPath`], equality and hashing consider the resolved location
/// only (jail and relative path), not the raw input or its trust flag.
#[derive(Debug, Clone)]
pub struct JailedPath {
    jail: String,
    relative: String,
    absolute: String,
    untrusted: String,
    violation: Option<TrustViolation>,
}

impl JailedPath {
    /// Normalizes `path` and composes it under `jail`.
    ///
    /// `jail` is trusted as-is and is not validated.
    pub fn new<I: PathInput + ?Sized>(jail: impl Into<String>, path: &I) -> Self {
        let jail = jail.into();
        let virtual_path = VirtualPath::new(path);

        let canonical = virtual_path.as_str();
        let relative = canonical.strip_prefix('/').unwrap_or(canonical).to_owned();

        // An empty relative path keeps the jail untouched, trailing slashes included.
        let absolute = if relative.is_empty() {
            jail.clone()
        } else {
            format!("{}/{relative}", jail.trim_end_matches('/'))
        };

        let violation = virtual_path.violation();
        if violation.is_some() {
            tracing::warn!(
                target: "virtual_path",
                jail = %jail,
                untrusted = %truncate_untrusted(virtual_path.untrusted_path()),
                resolved = %absolute,
                "jailbreak attempt detected"
            );
        }

        Self {
            jail,
            relative,
            absolute,
            untrusted: virtual_path.untrusted_path().to_owned(),
            violation,
        }
    }

    /// The jail base followed by the relative path, or the jail base alone
    /// when the relative path is empty.
    #[inline]
    pub fn absolute_path(&self) -> &str {
        &self.absolute
    }

    /// The jail base, exactly as given.
    #[inline]
    pub fn jail_path(&self) -> &str {
        &self.jail
    }

    /// The normalized path below the jail, without a leading `/`. Empty
    /// when the untrusted path resolved to the jail itself.
    #[inline]
    pub fn relative_path(&self) -> &str {
        &self.relative
    }

    #[inline]
    pub fn has_jailbreak_attempt(&self) -> bool {
        self.violation.is_some()
    }

    /// Why the input was flagged, if it was.
    #[inline]
    pub fn violation(&self) -> Option<TrustViolation> {
        self.violation
    }

    /// The relative part as a rooted virtual path, suitable for showing to
    /// end users without leaking the jail base. Always trusted.
    #[inline]
    pub fn virtual_path(&self) -> VirtualPath {
        VirtualPath::new(self.relative.as_str())
    }

    /// Rejects the path if a jailbreak attempt was detected.
    ///
    /// ```rust
    /// use virtual_path::{Jail, VirtualPathError};
    ///
    /// let jail = Jail::new("/srv/www");
    /// assert!(jail.join("index.html").into_contained().is_ok());
    ///
    /// let err = jail.join("../../etc/passwd").into_contained().unwrap_err();
    /// assert!(matches!(err, VirtualPathError::JailbreakAttempt { .. }));
    /// ```
    pub fn into_contained(self) -> Result<Self> {
        match self.violation {
            None => Ok(self),
            Some(v) => Err(VirtualPathError::from_violation(v, &self.untrusted)),
        }
    }
}

impl PartialEq for JailedPath {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.jail == other.jail && self.relative == other.relative
    }
}

impl Eq for JailedPath {}

impl Hash for JailedPath {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.jail.hash(state);
        self.relative.hash(state);
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for JailedPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("JailedPath", 4)?;
        state.serialize_field("jail_path", &self.jail)?;
        state.serialize_field("relative_path", &self.relative)?;
        state.serialize_field("absolute_path", &self.absolute)?;
        state.serialize_field("has_jailbreak_attempt", &self.has_jailbreak_attempt())?;
        state.end()
    }
}
