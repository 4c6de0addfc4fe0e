//! The [`CellKind`] type: what occupies a single maze cell.

/// Kind of a maze cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Impassable wall.
    #[default]
    Barrier,
    /// Walkable floor.
    Open,
    /// The unique origin.
    Start,
    /// The unique goal.
    Exit,
    /// Open cell on the most recently computed solution.
    Path,
}

impl CellKind {
    /// Whether a walker may step onto a cell of this kind.
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Barrier)
    }

    /// Whether this kind is one of the two unique endpoints.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::Exit)
    }
}
