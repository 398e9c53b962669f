use std::fmt;

/// An index into the manager's node storage array.
///
/// # Invariants
///
/// - `NodeId(0)` is the reject terminal (⊥, empty family)
/// - `NodeId(1)` is the accept terminal (⊤, family containing only ∅)
/// - Decision nodes start at index 2
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for invalid/uninitialized node references.
    pub const INVALID: NodeId = NodeId(0xFFFF_FFFF);

    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the node index as a `usize` for array indexing.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_terminal(self) -> bool {
        self.0 <= 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "⊥"),
            1 => write!(f, "⊤"),
            _ => write!(f, "@{}", self.0),
        }
    }
}

impl From<u32> for NodeId {
    fn from(index: u32) -> Self {
        NodeId::new(index)
    }
}

/// An element of the universe (1-indexed).
///
/// Element `i` is introduced at the diagram level that branches on `Var(i)`.
/// Id 0 is reserved, matching the weight table whose slot 0 is never read.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Var(u32);

impl Var {
    /// Reserved zero value, not a valid element.
    pub const ZERO: Var = Var(0);

    /// Creates a new element with the given 1-based id.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id == 0`.
    pub const fn new(id: u32) -> Self {
        debug_assert!(id > 0, "element ids are 1-indexed");
        Var(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl From<u32> for Var {
    fn from(id: u32) -> Self {
        Var::new(id)
    }
}

impl From<Var> for u32 {
    fn from(v: Var) -> Self {
        v.0
    }
}

/// A position in the variable ordering (0 = top of the diagram).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Level(u32);

impl Level {
    pub const fn new(level: u32) -> Self {
        Level(level)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl From<u32> for Level {
    fn from(level: u32) -> Self {
        Level::new(level)
    }
}
