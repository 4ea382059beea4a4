use tracing::{debug, debug_span, warn};

use crate::{
    error::{Error, Result},
    interval::Interval,
    iter::QueryIter,
    node::TreeIndex,
};

/// An augmented interval tree answering "which intervals contain point `x`?"
/// queries.
///
/// An [`IntervalTree`] has two phases:
///
///   1. Mutable: intervals are added to (and removed from) the backing store.
///   2. Constructed: [`IntervalTree::construct()`] builds the tree structure
///      and the store becomes read-only until
///      [`IntervalTree::deconstruct()`] is called.
///
/// Stabbing queries are only available in the constructed phase, and run in
/// `O(log n + k)` time for `k` matching intervals.
///
/// ```
/// use itree::IntervalTree;
///
/// let mut t = IntervalTree::new();
/// t.push(1..=3)?;
/// t.push(3..=6)?;
/// t.push(8..=9)?;
///
/// t.construct()?;
///
/// let mut got = t.query(3)?.collect::<Vec<_>>();
/// got.sort_by_key(|v| *v.start());
/// assert_eq!(got, [&(1..=3), &(3..=6)]);
///
/// assert_eq!(t.query(7)?.count(), 0);
/// # Ok::<(), itree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IntervalTree<I> {
    store: Vec<I>,

    /// The query structure, present only while constructed.
    index: Option<TreeIndex>,
}

impl<I> Default for IntervalTree<I> {
    fn default() -> Self {
        Self {
            store: Vec::new(),
            index: None,
        }
    }
}

impl<I> IntervalTree<I> {
    /// Initialise an empty, unconstructed tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialise an empty, unconstructed tree with space for at least
    /// `capacity` intervals.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            index: None,
        }
    }

    /// Returns true if the tree has been constructed and is in query mode.
    pub fn is_constructed(&self) -> bool {
        self.index.is_some()
    }

    /// The number of intervals in the store.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns the interval at offset `idx` in insertion order, if any.
    pub fn get(&self, idx: usize) -> Option<&I> {
        self.store.get(idx)
    }

    /// Iterate over all intervals in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.store.iter()
    }

    pub fn as_slice(&self) -> &[I] {
        &self.store
    }

    /// Consume the tree, returning the intervals in insertion order.
    pub fn into_inner(self) -> Vec<I> {
        self.store
    }

    /// Reserve space for at least `additional` more intervals.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.check_mutable("reserve")?;
        self.store.reserve(additional);
        Ok(())
    }

    /// Remove and return the most recently added interval.
    pub fn pop(&mut self) -> Result<Option<I>> {
        self.check_mutable("pop")?;
        Ok(self.store.pop())
    }

    /// Remove all intervals from the store.
    pub fn clear(&mut self) -> Result<()> {
        self.check_mutable("clear")?;
        self.store.clear();
        Ok(())
    }

    /// Returns a mutable reference to the interval at offset `idx`, if any.
    ///
    /// The caller must preserve `low() <= high()` for the modified interval,
    /// which is checked by [`IntervalTree::construct()`].
    pub fn get_mut(&mut self, idx: usize) -> Result<Option<&mut I>> {
        self.check_mutable("get_mut")?;
        Ok(self.store.get_mut(idx))
    }

    /// Iterate mutably over all intervals in insertion order.
    ///
    /// As with [`IntervalTree::get_mut()`], modified intervals must preserve
    /// `low() <= high()`.
    pub fn iter_mut(&mut self) -> Result<std::slice::IterMut<'_, I>> {
        self.check_mutable("iter_mut")?;
        Ok(self.store.iter_mut())
    }

    /// Remove and return the interval at offset `idx`, shifting all
    /// subsequent intervals down by one.
    ///
    /// Returns `Ok(None)` if `idx` is out of bounds.
    pub fn remove(&mut self, idx: usize) -> Result<Option<I>> {
        self.check_mutable("remove")?;
        if idx >= self.store.len() {
            return Ok(None);
        }
        Ok(Some(self.store.remove(idx)))
    }

    /// Shorten the store to the first `len` intervals.
    ///
    /// Has no effect if `len` is not less than the current length.
    pub fn truncate(&mut self, len: usize) -> Result<()> {
        self.check_mutable("truncate")?;
        self.store.truncate(len);
        Ok(())
    }

    /// Retain only the intervals for which `f` returns true, preserving their
    /// relative order.
    pub fn retain<F>(&mut self, f: F) -> Result<()>
    where
        F: FnMut(&I) -> bool,
    {
        self.check_mutable("retain")?;
        self.store.retain(f);
        Ok(())
    }

    /// The first interval in insertion order, if any.
    pub fn first(&self) -> Option<&I> {
        self.store.first()
    }

    /// The most recently added interval, if any.
    pub fn last(&self) -> Option<&I> {
        self.store.last()
    }

    /// Discard the tree structure, returning to the mutable phase.
    ///
    /// The stored intervals are retained. This is a no-op for an unconstructed
    /// tree.
    pub fn deconstruct(&mut self) {
        if let Some(index) = self.index.take() {
            debug!(n_nodes = index.node_count(), "deconstructed interval tree");
        }
    }

    /// The number of nodes in the constructed tree, or [`None`] if the tree is
    /// not constructed.
    pub fn node_count(&self) -> Option<usize> {
        self.index.as_ref().map(|v| v.node_count())
    }

    /// The number of distinct endpoint values across all stored intervals, or
    /// [`None`] if the tree is not constructed.
    pub fn discriminant_count(&self) -> Option<usize> {
        self.index.as_ref().map(|v| v.discriminant_count())
    }

    /// The height of the constructed tree, where a lone root node has height
    /// 0.
    ///
    /// Returns [`None`] if the tree is not constructed, or contains no nodes.
    pub fn height(&self) -> Option<usize> {
        self.index.as_ref().and_then(|v| v.height())
    }

    fn check_mutable(&self, op: &'static str) -> Result<()> {
        if self.is_constructed() {
            warn!(op, "rejected modification of constructed interval tree");
            return Err(Error::Constructed);
        }
        Ok(())
    }
}

impl<I> IntervalTree<I>
where
    I: Interval,
{
    /// Append `interval` to the store.
    ///
    /// # Panics
    ///
    /// Panics if `interval.low() > interval.high()`.
    pub fn push(&mut self, interval: I) -> Result<()> {
        self.check_mutable("push")?;
        assert_valid(&interval);
        self.store.push(interval);
        Ok(())
    }

    /// Insert `interval` at offset `idx`, shifting all subsequent intervals up
    /// by one.
    ///
    /// # Panics
    ///
    /// Panics if `idx > len()`, or if `interval.low() > interval.high()`.
    pub fn insert(&mut self, idx: usize, interval: I) -> Result<()> {
        self.check_mutable("insert")?;
        assert_valid(&interval);
        self.store.insert(idx, interval);
        Ok(())
    }

    /// Append all intervals yielded by `iter` to the store.
    ///
    /// # Panics
    ///
    /// Panics if any interval has `low() > high()`.
    pub fn extend<T>(&mut self, iter: T) -> Result<()>
    where
        T: IntoIterator<Item = I>,
    {
        self.check_mutable("extend")?;
        for v in iter {
            assert_valid(&v);
            self.store.push(v);
        }
        Ok(())
    }

    /// Build the tree structure over the stored intervals and switch to the
    /// query phase.
    ///
    /// Returns [`Error::AlreadyConstructed`] if the tree is already
    /// constructed.
    ///
    /// # Panics
    ///
    /// Panics if any stored interval has `low() > high()`, which may happen
    /// if an interval was modified through [`IntervalTree::get_mut()`] or
    /// [`IntervalTree::iter_mut()`].
    pub fn construct(&mut self) -> Result<&Self> {
        if self.is_constructed() {
            warn!("rejected construction of already constructed interval tree");
            return Err(Error::AlreadyConstructed);
        }

        self.store.iter().for_each(assert_valid);

        let span = debug_span!("construct", n_intervals = self.store.len());
        let _guard = span.enter();

        let index = TreeIndex::build(&self.store);

        debug!(
            n_discriminants = index.discriminant_count(),
            n_nodes = index.node_count(),
            height = index.height(),
            "constructed interval tree"
        );

        self.index = Some(index);
        Ok(self)
    }

    /// Return a cursor yielding every stored interval containing `x`.
    ///
    /// Returns [`Error::NotConstructed`] if the tree is not constructed.
    pub fn query(&self, x: I::Bound) -> Result<QueryIter<'_, I>> {
        match &self.index {
            Some(index) => Ok(QueryIter::new(&self.store, index, x)),
            None => {
                warn!("rejected query of unconstructed interval tree");
                Err(Error::NotConstructed)
            }
        }
    }

    /// Collect every stored interval containing `x`.
    ///
    /// Returns [`Error::NotConstructed`] if the tree is not constructed.
    pub fn stab(&self, x: I::Bound) -> Result<Vec<&I>> {
        Ok(self.query(x)?.collect())
    }
}

fn assert_valid<I>(interval: &I)
where
    I: Interval,
{
    assert!(
        interval.low() <= interval.high(),
        "interval lower bound must not exceed the upper bound"
    );
}

impl<I> From<Vec<I>> for IntervalTree<I>
where
    I: Interval,
{
    /// # Panics
    ///
    /// Panics if any interval has `low() > high()`.
    fn from(store: Vec<I>) -> Self {
        store.iter().for_each(assert_valid);
        Self { store, index: None }
    }
}

impl<I> FromIterator<I> for IntervalTree<I>
where
    I: Interval,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a, I> IntoIterator for &'a IntervalTree<I> {
    type Item = &'a I;
    type IntoIter = std::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
