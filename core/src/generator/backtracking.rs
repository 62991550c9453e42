use alloc::vec::Vec;
use rand::Rng;

use super::*;

/// Depth-first carving with an explicit stack, starting from the bottom-left cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BacktrackingCarver {
    stack: Vec<Coord2>,
    started: bool,
}

impl BacktrackingCarver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl MazeCarver for BacktrackingCarver {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        events: &mut EventBuffer,
    ) -> Step {
        if !self.started {
            self.started = true;
            let start = (0, 0);
            if grid.mark_visited(start) {
                events.push(CarveEvent::CellVisited(start));
            }
            self.stack.push(start);
            return Step::Quiet;
        }

        let Some(&current) = self.stack.last() else {
            return Step::Finished;
        };

        let neighbors = grid.unvisited_neighbors(current);
        if neighbors.is_empty() {
            // dead end
            self.stack.pop();
            return Step::Quiet;
        }

        let (direction, next) = neighbors[rng.random_range(0..neighbors.len())];
        self.stack.push(next);
        grid.carve(current, direction, events);
        if grid.mark_visited(next) {
            events.push(CarveEvent::CellVisited(next));
        }

        Step::Advanced
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use core::time::Duration;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn carve(size: Coord2, seed: u64) -> (Grid, Vec<CarveEvent>) {
        let mut grid = Grid::new(size);
        let events = Algorithm::RecursiveBacktracking
            .generate(&mut grid, SmallRng::seed_from_u64(seed), Duration::ZERO)
            .collect();
        (grid, events)
    }

    #[test]
    fn starts_at_origin() {
        let (_, events) = carve((4, 4), 8);

        assert_eq!(events[0], CarveEvent::CellVisited((0, 0)));
    }

    #[test]
    fn carves_a_spanning_tree() {
        for seed in 0..16 {
            let size = (8, 5);
            let (grid, events) = carve(size, seed);

            let edges = replay_edges(size, &events);
            assert_eq!(edges.len(), 39);
            assert_eq!(components(size, &edges), (1, false));
            assert_grid_matches(&grid, &edges);
            assert_each_cell_visited_once(&grid, &events);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let (first_grid, first) = carve((5, 5), 2024);
        let (second_grid, second) = carve((5, 5), 2024);

        assert_eq!(first, second);
        assert_eq!(first_grid, second_grid);
        assert_eq!(first.len(), 25 + 2 * 24);
    }

    // SmallRng is only value-stable per pointer width.
    #[test]
    #[cfg(target_pointer_width = "64")]
    fn fixed_seed_event_sequence() {
        use CarveEvent::*;
        use Direction::*;

        let (_, events) = carve((5, 5), 2024);

        let expected = [
            CellVisited((0, 0)),
            WallRemoved((0, 0), East),
            WallRemoved((1, 0), West),
            CellVisited((1, 0)),
            WallRemoved((1, 0), North),
            WallRemoved((1, 1), South),
            CellVisited((1, 1)),
            WallRemoved((1, 1), North),
            WallRemoved((1, 2), South),
            CellVisited((1, 2)),
            WallRemoved((1, 2), East),
            WallRemoved((2, 2), West),
            CellVisited((2, 2)),
            WallRemoved((2, 2), East),
            WallRemoved((3, 2), West),
            CellVisited((3, 2)),
            WallRemoved((3, 2), East),
            WallRemoved((4, 2), West),
            CellVisited((4, 2)),
            WallRemoved((4, 2), South),
            WallRemoved((4, 1), North),
            CellVisited((4, 1)),
            WallRemoved((4, 1), West),
            WallRemoved((3, 1), East),
            CellVisited((3, 1)),
            WallRemoved((3, 1), South),
            WallRemoved((3, 0), North),
            CellVisited((3, 0)),
            WallRemoved((3, 0), East),
            WallRemoved((4, 0), West),
            CellVisited((4, 0)),
            WallRemoved((3, 0), West),
            WallRemoved((2, 0), East),
            CellVisited((2, 0)),
            WallRemoved((2, 0), North),
            WallRemoved((2, 1), South),
            CellVisited((2, 1)),
            WallRemoved((4, 2), North),
            WallRemoved((4, 3), South),
            CellVisited((4, 3)),
            WallRemoved((4, 3), North),
            WallRemoved((4, 4), South),
            CellVisited((4, 4)),
            WallRemoved((4, 4), West),
            WallRemoved((3, 4), East),
            CellVisited((3, 4)),
            WallRemoved((3, 4), West),
            WallRemoved((2, 4), East),
            CellVisited((2, 4)),
            WallRemoved((2, 4), South),
            WallRemoved((2, 3), North),
            CellVisited((2, 3)),
            WallRemoved((2, 3), East),
            WallRemoved((3, 3), West),
            CellVisited((3, 3)),
            WallRemoved((2, 3), West),
            WallRemoved((1, 3), East),
            CellVisited((1, 3)),
            WallRemoved((1, 3), West),
            WallRemoved((0, 3), East),
            CellVisited((0, 3)),
            WallRemoved((0, 3), South),
            WallRemoved((0, 2), North),
            CellVisited((0, 2)),
            WallRemoved((0, 2), South),
            WallRemoved((0, 1), North),
            CellVisited((0, 1)),
            WallRemoved((0, 3), North),
            WallRemoved((0, 4), South),
            CellVisited((0, 4)),
            WallRemoved((0, 4), East),
            WallRemoved((1, 4), West),
            CellVisited((1, 4)),
        ];
        assert_eq!(events, expected);
    }

    #[test]
    fn each_carve_visits_the_new_cell_after_its_walls() {
        let (_, events) = carve((6, 6), 77);

        for window in events.windows(3) {
            if let [
                CarveEvent::WallRemoved(from, direction),
                CarveEvent::WallRemoved(to, opposite),
                third,
            ] = *window
            {
                assert_eq!(opposite, direction.opposite());
                assert_ne!(from, to);
                assert_eq!(third, CarveEvent::CellVisited(to));
            }
        }
    }

    #[test]
    fn stack_drains_when_finished() {
        let mut grid = Grid::new((3, 3));
        let mut carver = BacktrackingCarver::new();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut events = EventBuffer::new();

        while carver.step(&mut grid, &mut rng, &mut events) != Step::Finished {
            events.clear();
        }

        assert_eq!(carver.depth(), 0);
        assert!(grid.is_complete());
    }
}
