//! Segment resolution and the reusable [`Jail`] boundary.

pub(crate) mod clamp;
pub mod jail;

pub(crate) use clamp::clamp;
pub use jail::Jail;
