use std::{cmp::Ordering, fmt::Debug, iter::FusedIterator};

use crate::{
    interval::Interval,
    node::{Node, NodeId, TreeIndex},
};

/// The relation of a node's discriminant to the query value, fixed when the
/// cursor enters the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    /// The discriminant is greater than the query value: intervals are
    /// scanned by ascending lower bound and the walk continues left.
    Left,

    /// The discriminant is less than the query value: intervals are scanned
    /// by descending upper bound and the walk continues right.
    Right,

    /// The discriminant is the query value, so every interval in the node
    /// matches and no descendant can.
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AtNode {
        node: NodeId,
        side: Side,
        index: usize,
    },
    Exhausted,
}

/// A cursor over all intervals in an [`IntervalTree`](crate::IntervalTree)
/// that contain a query point.
///
/// Created by [`IntervalTree::query()`](crate::IntervalTree::query). Each
/// matching interval is yielded exactly once, in no particular (but
/// deterministic) order.
///
/// The cursor walks a single root-to-leaf path, scanning each node's sorted
/// interval list only as far as it can contain matches.
pub struct QueryIter<'a, I>
where
    I: Interval,
{
    store: &'a [I],
    index: &'a TreeIndex,
    query: I::Bound,
    state: State,
}

impl<'a, I> QueryIter<'a, I>
where
    I: Interval,
{
    pub(crate) fn new(store: &'a [I], index: &'a TreeIndex, query: I::Bound) -> Self {
        let mut this = Self {
            store,
            index,
            query,
            state: State::Exhausted,
        };

        this.state = this.enter(index.root());
        this
    }

    /// Returns the interval the cursor is positioned at, or [`None`] if the
    /// cursor is exhausted.
    pub fn current(&self) -> Option<&'a I> {
        match self.state {
            State::AtNode { node, side, index } => {
                let n = self.index.node(node);
                let idx = match side {
                    Side::Left | Side::Equal => self.index.asc_low(n, index),
                    Side::Right => self.index.desc_high(n, index),
                };
                Some(&self.store[idx])
            }
            State::Exhausted => None,
        }
    }

    /// Returns true if the cursor is positioned at a matching interval.
    pub fn has_next(&self) -> bool {
        !matches!(self.state, State::Exhausted)
    }

    /// The point this cursor is searching for.
    pub fn query(&self) -> &I::Bound {
        &self.query
    }

    /// Move the cursor to the next matching interval, if any.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already exhausted.
    pub fn advance(&mut self) {
        let (node, side, index) = match self.state {
            State::AtNode { node, side, index } => (node, side, index + 1),
            State::Exhausted => panic!("advance() called on an exhausted query cursor"),
        };

        let n = self.index.node(node);

        // Continue scanning this node while the sorted list can still match.
        if index < n.len() && self.in_bounds(n, side, index) {
            self.state = State::AtNode { node, side, index };
            return;
        }

        // Otherwise nothing further in this node can match, so the walk
        // continues in the subtree on the side of the query value.
        self.state = match side {
            Side::Equal => State::Exhausted,
            Side::Left => self.enter(n.left()),
            Side::Right => self.enter(n.right()),
        };
    }

    /// Returns true if the `index`-th interval of `n` in the list scanned for
    /// `side` contains the query value.
    ///
    /// All intervals in `n` span its discriminant, so only the bound facing
    /// the query value needs checking.
    fn in_bounds(&self, n: &Node, side: Side, index: usize) -> bool {
        match side {
            Side::Equal => true,
            Side::Left => *self.store[self.index.asc_low(n, index)].low() <= self.query,
            Side::Right => *self.store[self.index.desc_high(n, index)].high() >= self.query,
        }
    }

    /// Walk down from `ptr` to the first node containing a match for the
    /// query value.
    fn enter(&self, mut ptr: Option<NodeId>) -> State {
        while let Some(id) = ptr {
            let n = self.index.node(id);

            let side = match self.query.cmp(n.discriminant(self.store)) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal if n.is_empty() => {
                    // Every interval spanning this discriminant was claimed
                    // by an ancestor, and no descendant contains it.
                    return State::Exhausted;
                }
                Ordering::Equal => Side::Equal,
            };

            if !n.is_empty() && self.in_bounds(n, side, 0) {
                return State::AtNode {
                    node: id,
                    side,
                    index: 0,
                };
            }

            ptr = match side {
                Side::Left => n.left(),
                Side::Right => n.right(),
                Side::Equal => unreachable!(),
            };
        }

        State::Exhausted
    }
}

impl<'a, I> Iterator for QueryIter<'a, I>
where
    I: Interval,
{
    type Item = &'a I;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.current()?;
        self.advance();
        Some(v)
    }
}

impl<I> FusedIterator for QueryIter<'_, I> where I: Interval {}

impl<I> Clone for QueryIter<'_, I>
where
    I: Interval,
    I::Bound: Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            index: self.index,
            query: self.query.clone(),
            state: self.state,
        }
    }
}

impl<I> Debug for QueryIter<'_, I>
where
    I: Interval,
    I::Bound: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryIter")
            .field("query", &self.query)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
