use std::fmt::{Display, Formatter};

use crate::types::NodeId;

/// A handle to a ZDD rooted at some node.
///
/// ZDDs carry no complement edges, so a `ZddId` is a plain node index.
/// Node identity implies family identity: the manager hash-conses nodes,
/// so two equal `ZddId`s always denote the same family.
///
/// # Terminals
///
/// - `ZddId::ZERO` (⊥) — the empty family (reject terminal)
/// - `ZddId::ONE` (⊤) — the family containing only the empty set (accept terminal)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ZddId(u32);

impl ZddId {
    /// Empty family (⊥).
    pub const ZERO: ZddId = ZddId(0);

    /// Family containing only the empty set (⊤).
    pub const ONE: ZddId = ZddId(1);

    /// Sentinel for invalid references.
    pub const INVALID: ZddId = ZddId(0xFFFF_FFFF);

    pub const fn from_node(id: NodeId) -> Self {
        ZddId(id.raw())
    }

    pub const fn new(index: u32) -> Self {
        ZddId(index)
    }

    pub const fn node_id(self) -> NodeId {
        NodeId::new(self.0)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_one(self) -> bool {
        self.0 == 1
    }
}

impl Default for ZddId {
    fn default() -> Self {
        ZddId::INVALID
    }
}

impl Display for ZddId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "⊥"),
            1 => write!(f, "⊤"),
            _ => write!(f, "#{}", self.0),
        }
    }
}

impl From<NodeId> for ZddId {
    fn from(id: NodeId) -> Self {
        ZddId::from_node(id)
    }
}

impl From<ZddId> for NodeId {
    fn from(id: ZddId) -> Self {
        id.node_id()
    }
}

impl From<u32> for ZddId {
    fn from(index: u32) -> Self {
        ZddId::new(index)
    }
}
