//! Common result aliases.

/// The crate-wide error type.
pub type Err = anyhow::Error;
/// A result with the crate-wide error type.
pub type Res<T> = Result<T, Err>;
/// A result carrying no value.
pub type Void = Res<()>;
