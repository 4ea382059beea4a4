//! An augmented interval tree for efficient point stabbing queries.
//!
//! An [`IntervalTree`] is built in two phases. Closed intervals (any type
//! implementing [`Interval`]) are first accumulated into the tree's store, then
//! [`IntervalTree::construct()`] builds a static, balanced search structure
//! over them. Once constructed, [`IntervalTree::query()`] returns a
//! [`QueryIter`] lazily yielding every stored interval containing a point in
//! `O(log n + k)` time.
//!
//! The tree is built over the sorted set of distinct interval endpoints,
//! choosing the median endpoint as the discriminant at each level. Each
//! interval is held by the first discriminant it spans, in two orders (by
//! ascending lower bound and by descending upper bound) so that a query can
//! stop scanning a node as soon as no further interval in it can match.
//!
//! ```
//! use itree::IntervalTree;
//!
//! let mut t = IntervalTree::new();
//! t.extend([(0, 1), (10, 11), (20, 21)])?;
//! t.construct()?;
//!
//! assert_eq!(t.stab(10)?, [&(10, 11)]);
//! assert!(t.stab(15)?.is_empty());
//!
//! // The store is read-only while the tree is constructed.
//! assert_eq!(t.push((4, 5)), Err(itree::Error::Constructed));
//!
//! t.deconstruct();
//! t.push((4, 5))?;
//! # Ok::<(), itree::Error>(())
//! ```

mod error;
mod interval;
mod iter;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::*;
pub use interval::Interval;
pub use iter::QueryIter;
pub use tree::IntervalTree;
