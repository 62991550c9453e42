use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Walls bordering a single cell.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Walls: u8 {
        const NORTH = 1;
        const SOUTH = 1 << 1;
        const EAST  = 1 << 2;
        const WEST  = 1 << 3;
    }
}

/// Per-cell generation state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub visited: bool,
    pub walls: Walls,
}

impl Cell {
    pub fn is_closed(self) -> bool {
        self.walls.is_all()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            visited: false,
            walls: Walls::all(),
        }
    }
}
