use crate::interval::{End, Endpoint, Interval};

/// An opaque handle to a [`Node`] in a [`TreeIndex`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

/// A single discriminant in the interval tree.
///
/// A [`Node`] holds the set of intervals that span its discriminant and were
/// not claimed by an ancestor. That set is stored as a window into the
/// tree-wide `asc_low` and `desc_high` index lists, rather than as a pair of
/// per-node allocations.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Child nodes.
    ///
    /// All discriminants in the left subtree are strictly less than this
    /// node's discriminant, and all those in the right subtree strictly
    /// greater.
    left: Option<NodeId>,
    right: Option<NodeId>,

    discriminant: Endpoint,

    /// The offset of this node's window in the index lists.
    start: usize,

    /// The number of intervals claimed by this node.
    ///
    /// May be 0 for a routing node that exists only because a descendant
    /// claims an interval.
    len: usize,
}

impl Node {
    /// Resolve the discriminant value of this node.
    pub(crate) fn discriminant<'a, I>(&self, store: &'a [I]) -> &'a I::Bound
    where
        I: Interval,
    {
        self.discriminant.resolve(store)
    }

    pub(crate) fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub(crate) fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The query structure of a constructed interval tree.
///
/// All [`Node`] instances are owned by a single arena and freed together. The
/// intervals themselves remain in the caller's store - a [`TreeIndex`] only
/// ever refers to them by their store offset.
#[derive(Debug, Clone, Default)]
pub(crate) struct TreeIndex {
    nodes: Vec<Node>,
    root: Option<NodeId>,

    /// Store offsets of claimed intervals, grouped into per-node windows and
    /// sorted by ascending lower bound within each window.
    asc_low: Vec<usize>,

    /// The same windows as `asc_low`, sorted by descending upper bound.
    desc_high: Vec<usize>,

    /// The sorted, de-duplicated set of interval endpoints.
    discriminants: Vec<Endpoint>,
}

/// A pending subtree build, covering `discriminants[start..=end]` and the
/// unclaimed intervals in `candidates`.
#[derive(Debug)]
struct Frame {
    start: usize,
    end: usize,
    candidates: Vec<usize>,
    link: Link,
}

/// Where a newly built node is attached.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(NodeId),
    Right(NodeId),
}

impl TreeIndex {
    /// Build the tree over all intervals in `store`.
    ///
    /// Each discriminant is the median of the remaining discriminant range.
    /// An interval is claimed by the first node (in median-first order) whose
    /// discriminant it spans. Intervals entirely below a discriminant are
    /// pushed into the left subtree, those entirely above into the right.
    ///
    /// A subtree is only built when it has at least one unclaimed candidate,
    /// which elides nodes that would partition nothing.
    pub(crate) fn build<I>(store: &[I]) -> Self
    where
        I: Interval,
    {
        let mut this = Self {
            nodes: Vec::new(),
            root: None,
            asc_low: Vec::with_capacity(store.len()),
            desc_high: Vec::with_capacity(store.len()),
            discriminants: discriminants(store),
        };

        if store.is_empty() {
            return this;
        }

        let mut stack = vec![Frame {
            start: 0,
            end: this.discriminants.len() - 1,
            candidates: (0..store.len()).collect(),
            link: Link::Root,
        }];

        while let Some(frame) = stack.pop() {
            let Frame {
                start,
                end,
                candidates,
                link,
            } = frame;

            debug_assert!(!candidates.is_empty());
            debug_assert!(start <= end);

            let mid = start + (end - start) / 2;
            let discriminant = this.discriminants[mid];
            let d = discriminant.resolve(store);

            let mut claimed = Vec::new();
            let mut left = Vec::new();
            let mut right = Vec::new();
            for idx in candidates {
                let v = &store[idx];
                if v.high() < d {
                    left.push(idx);
                } else if v.low() > d {
                    right.push(idx);
                } else {
                    claimed.push(idx);
                }
            }

            let id = this.push_node(store, discriminant, claimed);
            match link {
                Link::Root => this.root = Some(id),
                Link::Left(parent) => this.nodes[parent.0].left = Some(id),
                Link::Right(parent) => this.nodes[parent.0].right = Some(id),
            }

            // Every endpoint of an interval in "left" is a discriminant below
            // "mid" within this frame's range (and likewise for "right"), so a
            // non-empty candidate set always has a discriminant range to split.
            if !right.is_empty() {
                debug_assert!(mid < end);
                stack.push(Frame {
                    start: mid + 1,
                    end,
                    candidates: right,
                    link: Link::Right(id),
                });
            }
            if !left.is_empty() {
                debug_assert!(mid > start);
                stack.push(Frame {
                    start,
                    end: mid - 1,
                    candidates: left,
                    link: Link::Left(id),
                });
            }
        }

        debug_assert_eq!(this.asc_low.len(), store.len());
        debug_assert_eq!(this.desc_high.len(), store.len());

        this
    }

    /// Append a node claiming the intervals in `claimed`, writing its sorted
    /// windows into the index lists.
    fn push_node<I>(
        &mut self,
        store: &[I],
        discriminant: Endpoint,
        mut claimed: Vec<usize>,
    ) -> NodeId
    where
        I: Interval,
    {
        let start = self.asc_low.len();
        let len = claimed.len();

        // Ties are broken by store offset so query output is deterministic.
        claimed.sort_unstable_by(|&a, &b| store[a].low().cmp(store[b].low()).then(a.cmp(&b)));
        self.asc_low.extend_from_slice(&claimed);

        claimed.sort_unstable_by(|&a, &b| store[b].high().cmp(store[a].high()).then(a.cmp(&b)));
        self.desc_high.extend_from_slice(&claimed);

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            left: None,
            right: None,
            discriminant,
            start,
            len,
        });
        id
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The store offset of the `idx`-th interval of `n`, ordered by ascending
    /// lower bound.
    pub(crate) fn asc_low(&self, n: &Node, idx: usize) -> usize {
        debug_assert!(idx < n.len);
        self.asc_low[n.start + idx]
    }

    /// The store offset of the `idx`-th interval of `n`, ordered by
    /// descending upper bound.
    pub(crate) fn desc_high(&self, n: &Node, idx: usize) -> usize {
        debug_assert!(idx < n.len);
        self.desc_high[n.start + idx]
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn discriminant_count(&self) -> usize {
        self.discriminants.len()
    }

    /// The height of the tree, where a lone root has a height of 0.
    ///
    /// Returns [`None`] for a tree with no nodes.
    pub(crate) fn height(&self) -> Option<usize> {
        let mut max = None;
        let mut stack = self.root.iter().map(|&v| (v, 0)).collect::<Vec<_>>();

        while let Some((id, depth)) = stack.pop() {
            max = max.max(Some(depth));

            let n = self.node(id);
            stack.extend(n.left.iter().chain(n.right.iter()).map(|&v| (v, depth + 1)));
        }

        max
    }
}

/// Compute the sorted, de-duplicated set of all endpoint values in `store`.
fn discriminants<I>(store: &[I]) -> Vec<Endpoint>
where
    I: Interval,
{
    let mut values = (0..store.len())
        .flat_map(|i| [Endpoint::new(i, End::Low), Endpoint::new(i, End::High)])
        .collect::<Vec<_>>();

    values.sort_unstable_by(|a, b| a.resolve(store).cmp(b.resolve(store)));
    values.dedup_by(|a, b| a.resolve(store) == b.resolve(store));

    values
}
