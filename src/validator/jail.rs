use crate::input::PathInput;
use crate::path::jailed_path::JailedPath;

/// A trusted base path that untrusted paths are composed under.
///
/// `Jail` stores the base once (for example a directory taken from an
/// application's configuration) and mints a [`JailedPath`] per untrusted
/// input. The base is kept verbatim and never validated; no filesystem
/// access takes place.
///
/// ```rust
/// use virtual_path::Jail;
///
/// let uploads = Jail::new("/srv/uploads/");
///
/// let avatar = uploads.join("alice/avatar.png");
/// assert_eq!(avatar.absolute_path(), "/srv/uploads/alice/avatar.png");
/// assert!(!avatar.has_jailbreak_attempt());
///
/// let sneaky = uploads.join("../../etc/shadow");
/// assert_eq!(sneaky.absolute_path(), "/srv/uploads/etc/shadow");
/// assert!(sneaky.has_jailbreak_attempt());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Jail {
    base: String,
}

impl Jail {
    /// Creates a jail rooted at `base`.
    #[inline]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// The trusted base, exactly as given.
    #[inline]
    pub fn path(&self) -> &str {
        &self.base
    }

    /// Normalizes `path` and composes it under this jail.
    #[inline]
    pub fn join<I: PathInput + ?Sized>(&self, path: &I) -> JailedPath {
        JailedPath::new(self.base.as_str(), path)
    }
}

impl From<String> for Jail {
    #[inline]
    fn from(base: String) -> Self {
        Self::new(base)
    }
}

impl From<&str> for Jail {
    #[inline]
    fn from(base: &str) -> Self {
        Self::new(base)
    }
}
