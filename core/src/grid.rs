use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Rectangular cell grid indexed `[x, y]`, `(0, 0)` being the bottom-left cell.
///
/// Walls between neighbors are only ever cleared in pairs through [`Grid::carve`], so a cell's
/// North wall is open exactly when its northern neighbor's South wall is open.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::from_elem(size.to_nd_index(), Cell::default()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        // dimensions always come from a Coord2
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(MazeError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn has_wall(&self, coords: Coord2, direction: Direction) -> bool {
        self[coords].walls.contains(direction.wall())
    }

    /// Clears a single wall bit, returning whether it was still standing.
    ///
    /// Only clears this cell's side, see [`Grid::carve`] for removing the wall on both sides.
    pub fn remove_wall(&mut self, coords: Coord2, direction: Direction) -> bool {
        let walls = &mut self.cells[coords.to_nd_index()].walls;
        let was_standing = walls.contains(direction.wall());
        walls.remove(direction.wall());
        was_standing
    }

    pub fn neighbor(&self, coords: Coord2, direction: Direction) -> Option<Coord2> {
        apply_delta(coords, direction.delta(), self.size())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Neighbors not visited yet, in North, South, East, West order.
    pub fn unvisited_neighbors(&self, coords: Coord2) -> SmallVec<[(Direction, Coord2); 4]> {
        self.iter_neighbors(coords)
            .filter(|&(_, pos)| !self.is_visited(pos))
            .collect()
    }

    pub fn is_visited(&self, coords: Coord2) -> bool {
        self[coords].visited
    }

    /// Marks a cell visited, returning `true` only the first time.
    pub fn mark_visited(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        !core::mem::replace(&mut cell.visited, true)
    }

    /// Removes the wall between `coords` and its neighbor in `direction` on both sides.
    ///
    /// A `WallRemoved` event is pushed for every bit actually cleared, this cell's side first.
    /// Returns the neighbor, or `None` when there is no neighbor in that direction.
    pub fn carve(
        &mut self,
        coords: Coord2,
        direction: Direction,
        events: &mut EventBuffer,
    ) -> Option<Coord2> {
        let next = self.neighbor(coords, direction)?;

        if self.remove_wall(coords, direction) {
            events.push(CarveEvent::WallRemoved(coords, direction));
        }
        if self.remove_wall(next, direction.opposite()) {
            events.push(CarveEvent::WallRemoved(next, direction.opposite()));
        }
        log::trace!("carved {:?} from {:?} to {:?}", direction, coords, next);

        Some(next)
    }

    /// Restores every cell to unvisited with all walls standing.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn reset_visited(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.visited = false);
    }

    /// Whether every cell has been visited, which is how a finished run is recognized.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|cell| cell.visited)
    }

    pub fn visited_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.visited).count() as CellCount
    }

    /// Number of open passages between neighbors, each counted once.
    pub fn passage_count(&self) -> CellCount {
        self.iter_coords()
            .map(|coords| {
                [Direction::North, Direction::East]
                    .into_iter()
                    .filter(|&direction| {
                        self.neighbor(coords, direction).is_some()
                            && !self.has_wall(coords, direction)
                    })
                    .count() as CellCount
            })
            .sum()
    }

    /// All coordinates, row by row starting at `y = 0`.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
