use thiserror::Error;

/// Errors returned when an operation is invoked in the wrong phase of the
/// [`IntervalTree`](crate::IntervalTree) lifecycle.
///
/// A tree starts out mutable. Calling
/// [`construct()`](crate::IntervalTree::construct) moves it into the read-only
/// query phase, and [`deconstruct()`](crate::IntervalTree::deconstruct) moves
/// it back.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The interval store cannot be modified once the tree is constructed.
    #[error("interval store is read-only while the tree is constructed")]
    Constructed,

    /// Queries require the tree to have been constructed.
    #[error("interval tree must be constructed before it can be queried")]
    NotConstructed,

    /// The tree has already been constructed, and must be deconstructed
    /// before it can be built again.
    #[error("interval tree is already constructed")]
    AlreadyConstructed,
}

/// A [`Result`](std::result::Result) defaulting to the crate [`Error`] type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
