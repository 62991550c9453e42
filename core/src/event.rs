use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Single item of a carving run, in emission order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarveEvent {
    /// A cell was marked visited for the first time.
    CellVisited(Coord2),
    /// One side of a wall was cleared.
    WallRemoved(Coord2, Direction),
    /// End of a step; pacing consumers wait this long before pulling more.
    Pause(Duration),
}

impl CarveEvent {
    pub const fn is_pause(self) -> bool {
        matches!(self, Self::Pause(_))
    }
}

/// Events produced by a single step. A step never emits more than one visit
/// and one wall pair.
pub type EventBuffer = SmallVec<[CarveEvent; 4]>;

/// Receiver of carving progress, the rendering side of a run.
pub trait CarveObserver {
    fn on_cell_visited(&mut self, _coords: Coord2) {}

    fn on_wall_removed(&mut self, _coords: Coord2, _direction: Direction) {}

    /// Dispatches a single event, pauses are ignored.
    fn observe(&mut self, event: CarveEvent) {
        match event {
            CarveEvent::CellVisited(coords) => self.on_cell_visited(coords),
            CarveEvent::WallRemoved(coords, direction) => self.on_wall_removed(coords, direction),
            CarveEvent::Pause(_) => {}
        }
    }
}

/// Discards everything.
impl CarveObserver for () {}

/// Records the run, pauses included.
impl CarveObserver for Vec<CarveEvent> {
    fn observe(&mut self, event: CarveEvent) {
        self.push(event);
    }
}

impl<T: CarveObserver + ?Sized> CarveObserver for &mut T {
    fn on_cell_visited(&mut self, coords: Coord2) {
        (**self).on_cell_visited(coords)
    }

    fn on_wall_removed(&mut self, coords: Coord2, direction: Direction) {
        (**self).on_wall_removed(coords, direction)
    }

    fn observe(&mut self, event: CarveEvent) {
        (**self).observe(event)
    }
}

/// Pair of plain callbacks, `(on_cell_visited, on_wall_removed)`.
impl<V, W> CarveObserver for (V, W)
where
    V: FnMut(Coord, Coord),
    W: FnMut(Coord, Coord, Direction),
{
    fn on_cell_visited(&mut self, (x, y): Coord2) {
        (self.0)(x, y)
    }

    fn on_wall_removed(&mut self, (x, y): Coord2, direction: Direction) {
        (self.1)(x, y, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_pair_receives_coordinates() {
        let mut visited = Vec::new();
        let mut removed = Vec::new();
        {
            let mut observer = (
                |x: Coord, y: Coord| visited.push((x, y)),
                |x: Coord, y: Coord, direction: Direction| removed.push((x, y, direction)),
            );
            observer.observe(CarveEvent::CellVisited((1, 2)));
            observer.observe(CarveEvent::WallRemoved((1, 2), Direction::East));
            observer.observe(CarveEvent::Pause(Duration::from_millis(5)));
        }

        assert_eq!(visited, [(1, 2)]);
        assert_eq!(removed, [(1, 2, Direction::East)]);
    }

    #[test]
    fn recorder_keeps_pauses() {
        let mut recorded: Vec<CarveEvent> = Vec::new();
        recorded.observe(CarveEvent::Pause(Duration::from_millis(1)));
        recorded.observe(CarveEvent::CellVisited((0, 0)));

        assert!(recorded[0].is_pause());
        assert_eq!(recorded.len(), 2);
    }
}
