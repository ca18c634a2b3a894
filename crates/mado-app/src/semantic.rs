#![forbid(unsafe_code)]

//! Accessibility tree cache with frame-to-frame diffing.

use std::collections::{HashMap, HashSet};

use mado_core::geometry::Point;
use mado_core::semantic::{SemanticId, SemanticNode};

/// The window's semantic tree, rebuilt lazily.
///
/// The tree is marked stale after every dispatch cycle and rebuilt from the
/// window on the next query. Diffs compare the current tree against the one
/// current at the previous diff, so a client that diffs after every frame
/// sees each change exactly once.
#[derive(Debug, Default)]
pub struct SemanticTree {
    uptodate: bool,
    /// A rebuild happened since the last diff.
    undiffed: bool,
    root: SemanticId,
    tree: Vec<SemanticNode>,
    ids: HashMap<SemanticId, usize>,
    prev_tree: Vec<SemanticNode>,
    prev_ids: HashMap<SemanticId, usize>,
}

impl SemanticTree {
    /// An empty, stale tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the tree stale.
    pub fn invalidate(&mut self) {
        self.uptodate = false;
    }

    /// Whether the cached tree is current.
    pub fn is_current(&self) -> bool {
        self.uptodate
    }

    /// Rebuild from `build` if stale. Returns whether a rebuild happened.
    ///
    /// `build` appends nodes in pre-order with the root first.
    pub fn refresh(&mut self, build: impl FnOnce(&mut Vec<SemanticNode>)) -> bool {
        if self.uptodate {
            return false;
        }
        self.uptodate = true;
        self.undiffed = true;
        self.tree.clear();
        self.ids.clear();
        build(&mut self.tree);
        self.root = self.tree.first().map_or(SemanticId::ROOT, |n| n.id);
        self.ids
            .extend(self.tree.iter().enumerate().map(|(i, n)| (n.id, i)));
        crate::debug_trace!("semantic rebuild: {} nodes", self.tree.len());
        true
    }

    /// Id of the root node, or [`SemanticId::ROOT`] when empty.
    pub fn root(&self) -> SemanticId {
        self.root
    }

    /// Node by id. [`SemanticId::ROOT`] resolves to the actual root.
    pub fn lookup(&self, id: SemanticId) -> Option<&SemanticNode> {
        let id = if id.is_root() { self.root } else { id };
        self.ids.get(&id).map(|&i| &self.tree[i])
    }

    /// Append ids of nodes changed since the previous diff.
    ///
    /// Walks the previous tree in pre-order, visiting each id once even if
    /// child lists repeat it or form a cycle. Nodes deleted since then are
    /// skipped along with their subtrees. Leaves `diffs` untouched when no
    /// rebuild happened since the last call or when there is no earlier tree.
    pub fn append_diffs(&mut self, diffs: &mut Vec<SemanticId>) {
        if !self.undiffed {
            return;
        }
        self.undiffed = false;
        if let Some(prev_root) = self.prev_tree.first().map(|n| n.id) {
            self.collect_diffs(prev_root, diffs);
        }
        self.prev_tree.clone_from(&self.tree);
        self.prev_ids.clone_from(&self.ids);
    }

    fn collect_diffs(&self, root: SemanticId, diffs: &mut Vec<SemanticId>) {
        let mut stack = vec![root];
        let mut visited = HashSet::new();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(prev) = self.prev_ids.get(&id).map(|&i| &self.prev_tree[i]) else {
                continue;
            };
            let Some(cur) = self.ids.get(&id).map(|&i| &self.tree[i]) else {
                continue;
            };
            if prev.differs_from(cur) {
                diffs.push(id);
            }
            stack.extend(prev.children.iter().rev().copied());
        }
    }

    /// Topmost node whose bounds contain `point`.
    ///
    /// Later nodes in pre-order paint over earlier ones.
    pub fn hit_test(&self, point: Point) -> Option<SemanticId> {
        self.tree
            .iter()
            .rev()
            .find(|n| n.desc.bounds.contains(point))
            .map(|n| n.id)
    }
}
