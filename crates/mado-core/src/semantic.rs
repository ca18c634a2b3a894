#![forbid(unsafe_code)]

//! Accessibility semantic nodes.
//!
//! A window describes its UI to assistive technology as a tree of
//! [`SemanticNode`]s, listed root-first in pre-order. Nodes reference each
//! other by [`SemanticId`], which stays stable across frames for the same
//! widget so clients can track it.

use bitflags::bitflags;

use crate::geometry::Rect;

/// Stable identifier of a semantic node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SemanticId(pub u64);

impl SemanticId {
    /// The zero id. Lookups with it resolve to the current root.
    pub const ROOT: Self = Self(0);

    /// Whether this is the root alias.
    #[inline]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

/// Widget class reported to assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SemanticClass {
    #[default]
    Unknown,
    Button,
    CheckBox,
    Editor,
    RadioButton,
    Switch,
}

bitflags! {
    /// Gestures a semantic node responds to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SemanticGestures: u8 {
        const CLICK  = 0b01;
        const SCROLL = 0b10;
    }
}

/// Everything about a node except its place in the tree.
///
/// Two frames' nodes with the same id are considered unchanged when their
/// descriptions are equal and their child id lists match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SemanticDesc {
    pub class: SemanticClass,
    pub label: String,
    pub description: String,
    pub selected: bool,
    pub disabled: bool,
    pub gestures: SemanticGestures,
    /// Hit region in window pixels.
    pub bounds: Rect,
}

/// One node of the semantic tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SemanticNode {
    pub id: SemanticId,
    /// Parent id; `None` for the root.
    pub parent: Option<SemanticId>,
    /// Child ids in paint order (later children are on top).
    pub children: Vec<SemanticId>,
    pub desc: SemanticDesc,
}

impl SemanticNode {
    /// Create a childless node.
    #[must_use]
    pub fn new(id: SemanticId, parent: Option<SemanticId>, desc: SemanticDesc) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            desc,
        }
    }

    /// Set the child ids.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SemanticId>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Whether `other` differs in content or child structure.
    pub fn differs_from(&self, other: &Self) -> bool {
        self.desc != other.desc || self.children != other.children
    }
}
