use core::iter::FusedIterator;
use core::time::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use backtracking::*;
pub use binary_tree::*;
pub use growing_tree::*;

mod backtracking;
mod binary_tree;
mod growing_tree;

/// Outcome of a single carver step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// A step was taken, pacing consumers may pause here.
    Advanced,
    /// Bookkeeping without a pacing point, such as backtracking.
    Quiet,
    /// Nothing left to do, no further events will be emitted.
    Finished,
}

/// Per-run state machine of a carving algorithm.
pub trait MazeCarver {
    /// Advances the run by one step, pushing the events it caused to `events`.
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        events: &mut EventBuffer,
    ) -> Step;
}

/// How Growing Tree picks the next cell out of its active list.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Most recently added cell, behaves like recursive backtracking.
    #[default]
    Newest,
    /// Uniformly random cell, gives a more branching maze.
    Random,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    BinaryTree,
    RecursiveBacktracking,
    GrowingTree(SelectionMode),
}

impl Algorithm {
    pub const fn name(self) -> &'static str {
        use Algorithm::*;
        match self {
            BinaryTree => "binary tree",
            RecursiveBacktracking => "recursive backtracking",
            GrowingTree(SelectionMode::Newest) => "growing tree (newest)",
            GrowingTree(SelectionMode::Random) => "growing tree (random)",
        }
    }

    /// Replaces the selection mode of Growing Tree, other algorithms are returned as is.
    pub const fn with_mode(self, mode: SelectionMode) -> Self {
        match self {
            Self::GrowingTree(_) => Self::GrowingTree(mode),
            other => other,
        }
    }

    /// Starts a lazy run over `grid`.
    ///
    /// A [`CarveEvent::Pause`] follows every step when `step_delay` is non-zero.
    pub fn generate<R: Rng>(self, grid: &mut Grid, rng: R, step_delay: Duration) -> Generation<'_, R> {
        Generation {
            grid,
            rng,
            run: CarveRun::new(self, step_delay),
        }
    }
}

/// Closed set of carver states, one per [`Algorithm`].
#[derive(Clone, Debug, PartialEq)]
pub enum Carver {
    BinaryTree(BinaryTreeCarver),
    RecursiveBacktracking(BacktrackingCarver),
    GrowingTree(GrowingTreeCarver),
}

impl From<Algorithm> for Carver {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::BinaryTree => Self::BinaryTree(BinaryTreeCarver::new()),
            Algorithm::RecursiveBacktracking => {
                Self::RecursiveBacktracking(BacktrackingCarver::new())
            }
            Algorithm::GrowingTree(mode) => Self::GrowingTree(GrowingTreeCarver::new(mode)),
        }
    }
}

impl MazeCarver for Carver {
    fn step<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        events: &mut EventBuffer,
    ) -> Step {
        match self {
            Self::BinaryTree(carver) => carver.step(grid, rng, events),
            Self::RecursiveBacktracking(carver) => carver.step(grid, rng, events),
            Self::GrowingTree(carver) => carver.step(grid, rng, events),
        }
    }
}

/// A run detached from its grid and random source, so an owner can keep all three side by side.
#[derive(Clone, Debug)]
pub struct CarveRun {
    carver: Carver,
    pause: Option<Duration>,
    pending: EventBuffer,
    cursor: usize,
    finished: bool,
}

impl CarveRun {
    pub fn new(algorithm: Algorithm, step_delay: Duration) -> Self {
        log::debug!("starting {} run, step delay {:?}", algorithm.name(), step_delay);
        Self {
            carver: algorithm.into(),
            pause: (!step_delay.is_zero()).then_some(step_delay),
            pending: EventBuffer::new(),
            cursor: 0,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished && self.cursor >= self.pending.len()
    }

    /// Pulls the next event, stepping the carver as needed.
    ///
    /// Must always be called with the same grid the run started on.
    pub fn next_event<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
    ) -> Option<CarveEvent> {
        loop {
            if let Some(&event) = self.pending.get(self.cursor) {
                self.cursor += 1;
                return Some(event);
            }
            if self.finished {
                return None;
            }

            self.pending.clear();
            self.cursor = 0;
            match self.carver.step(grid, rng, &mut self.pending) {
                Step::Advanced => {
                    if let Some(pause) = self.pause {
                        self.pending.push(CarveEvent::Pause(pause));
                    }
                }
                Step::Quiet => {}
                Step::Finished => {
                    log::debug!("run finished");
                    self.finished = true;
                }
            }
        }
    }
}

/// Lazy, finite sequence of events of a single run over a borrowed grid.
#[derive(Debug)]
pub struct Generation<'g, R> {
    grid: &'g mut Grid,
    rng: R,
    run: CarveRun,
}

impl<R: Rng> Generation<'_, R> {
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Whether every event has been pulled.
    pub fn is_finished(&self) -> bool {
        self.run.is_finished()
    }

    /// Consumes the remaining events eagerly, ignoring pauses.
    pub fn run_to_end<O: CarveObserver>(self, mut observer: O) {
        for event in self {
            observer.observe(event);
        }
    }
}

impl<R: Rng> Iterator for Generation<'_, R> {
    type Item = CarveEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.run.next_event(self.grid, &mut self.rng)
    }
}

impl<R: Rng> FusedIterator for Generation<'_, R> {}
