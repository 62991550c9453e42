use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use burrow_core::*;
use quickcheck::{TestResult, quickcheck};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const ALGORITHMS: [Algorithm; 4] = [
    Algorithm::BinaryTree,
    Algorithm::RecursiveBacktracking,
    Algorithm::GrowingTree(SelectionMode::Newest),
    Algorithm::GrowingTree(SelectionMode::Random),
];

/// Algorithms that always connect every cell.
const SPANNING: [Algorithm; 3] = [
    Algorithm::RecursiveBacktracking,
    Algorithm::GrowingTree(SelectionMode::Newest),
    Algorithm::GrowingTree(SelectionMode::Random),
];

fn dims(width: u8, height: u8) -> Option<Coord2> {
    // keep the grids small enough for many iterations
    let width = Coord::from(width % 24);
    let height = Coord::from(height % 24);
    (width > 0 && height > 0).then_some((width, height))
}

fn run(algorithm: Algorithm, size: Coord2, seed: u64) -> (Grid, Vec<CarveEvent>) {
    let mut grid = Grid::new(size);
    let events = algorithm
        .generate(&mut grid, SmallRng::seed_from_u64(seed), Duration::ZERO)
        .collect();
    (grid, events)
}

/// Walls as reported by the events, keyed by cell.
fn removed_walls(events: &[CarveEvent]) -> BTreeMap<Coord2, Vec<Direction>> {
    let mut removed: BTreeMap<Coord2, Vec<Direction>> = BTreeMap::new();
    for event in events {
        if let CarveEvent::WallRemoved(coords, direction) = *event {
            removed.entry(coords).or_default().push(direction);
        }
    }
    removed
}

/// Connected components reachable through open walls.
fn count_regions(grid: &Grid) -> usize {
    let mut seen = BTreeSet::new();
    let mut regions = 0;
    for start in grid.iter_coords() {
        if !seen.insert(start) {
            continue;
        }
        regions += 1;
        let mut stack = vec![start];
        while let Some(coords) = stack.pop() {
            for (direction, next) in grid.iter_neighbors(coords) {
                if !grid.has_wall(coords, direction) && seen.insert(next) {
                    stack.push(next);
                }
            }
        }
    }
    regions
}

#[test]
fn every_cell_is_visited_exactly_once() {
    fn prop(width: u8, height: u8, seed: u64) -> TestResult {
        let Some(size) = dims(width, height) else {
            return TestResult::discard();
        };
        for algorithm in ALGORITHMS {
            let (grid, events) = run(algorithm, size, seed);
            let visits: Vec<_> = events
                .iter()
                .filter_map(|event| match event {
                    CarveEvent::CellVisited(coords) => Some(*coords),
                    _ => None,
                })
                .collect();
            let unique: BTreeSet<_> = visits.iter().collect();
            if !grid.is_complete() || unique.len() != visits.len() {
                return TestResult::failed();
            }
            if visits.len() != grid.total_cells() as usize {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }
    quickcheck(prop as fn(u8, u8, u64) -> TestResult);
}

#[test]
fn removed_walls_are_always_mirrored() {
    fn prop(width: u8, height: u8, seed: u64) -> TestResult {
        let Some(size) = dims(width, height) else {
            return TestResult::discard();
        };
        for algorithm in ALGORITHMS {
            let (grid, events) = run(algorithm, size, seed);
            let removed = removed_walls(&events);
            for (&coords, directions) in &removed {
                for &direction in directions {
                    let Some(next) = grid.neighbor(coords, direction) else {
                        return TestResult::failed();
                    };
                    let mirrored = removed
                        .get(&next)
                        .is_some_and(|walls| walls.contains(&direction.opposite()));
                    if !mirrored || grid.has_wall(coords, direction) {
                        return TestResult::failed();
                    }
                }
            }
        }
        TestResult::passed()
    }
    quickcheck(prop as fn(u8, u8, u64) -> TestResult);
}

#[test]
fn walls_are_removed_at_most_once() {
    fn prop(width: u8, height: u8, seed: u64) -> TestResult {
        let Some(size) = dims(width, height) else {
            return TestResult::discard();
        };
        for algorithm in ALGORITHMS {
            let (_, events) = run(algorithm, size, seed);
            for directions in removed_walls(&events).values() {
                let unique: BTreeSet<_> = directions.iter().collect();
                if unique.len() != directions.len() {
                    return TestResult::failed();
                }
            }
        }
        TestResult::passed()
    }
    quickcheck(prop as fn(u8, u8, u64) -> TestResult);
}

#[test]
fn stack_based_algorithms_carve_spanning_trees() {
    fn prop(width: u8, height: u8, seed: u64) -> TestResult {
        let Some(size) = dims(width, height) else {
            return TestResult::discard();
        };
        for algorithm in SPANNING {
            let (grid, _) = run(algorithm, size, seed);
            if grid.passage_count() != grid.total_cells() - 1 || count_regions(&grid) != 1 {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }
    quickcheck(prop as fn(u8, u8, u64) -> TestResult);
}

#[test]
fn binary_tree_never_closes_a_loop() {
    fn prop(width: u8, height: u8, seed: u64) -> TestResult {
        let Some(size) = dims(width, height) else {
            return TestResult::discard();
        };
        let (grid, _) = run(Algorithm::BinaryTree, size, seed);
        // a forest has exactly one passage fewer than cells per region
        let regions = count_regions(&grid) as CellCount;
        TestResult::from_bool(grid.passage_count() + regions == grid.total_cells())
    }
    quickcheck(prop as fn(u8, u8, u64) -> TestResult);
}

#[test]
fn same_seed_same_events() {
    fn prop(width: u8, height: u8, seed: u64) -> TestResult {
        let Some(size) = dims(width, height) else {
            return TestResult::discard();
        };
        TestResult::from_bool(
            ALGORITHMS
                .into_iter()
                .all(|algorithm| run(algorithm, size, seed) == run(algorithm, size, seed)),
        )
    }
    quickcheck(prop as fn(u8, u8, u64) -> TestResult);
}

#[test]
fn driver_matches_direct_generation() {
    fn prop(width: u8, height: u8, seed: u64, index: u8) -> TestResult {
        let Some(size) = dims(width, height) else {
            return TestResult::discard();
        };
        let catalog = Catalog::standard();
        let index = usize::from(index) % catalog.len();
        let algorithm = catalog.get(index).unwrap().algorithm;

        let mut driver = MazeDriver::new(catalog, 0);
        let mut events: Vec<CarveEvent> = Vec::new();
        driver
            .request(GenerationRequest::new(size, index).with_seed(seed))
            .unwrap();
        driver.run_to_completion(&mut events);

        let (grid, expected) = run(algorithm, size, seed);
        TestResult::from_bool(events == expected && driver.grid() == Some(&grid))
    }
    quickcheck(prop as fn(u8, u8, u64, u8) -> TestResult);
}
