use core::time::Duration;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::*;

/// Result of driving the active run forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No run in progress.
    Idle,
    /// The run reached a pacing point, call again after waiting this long.
    Paused(Duration),
    /// The run completed during this call.
    Finished,
}

impl Tick {
    pub const fn is_paused(self) -> bool {
        matches!(self, Self::Paused(_))
    }
}

#[derive(Clone, Debug)]
struct ActiveRun {
    run: CarveRun,
    rng: SmallRng,
}

/// Owns the grid and at most one run over it, relaying the run's events to an observer.
///
/// A new request abandons whatever run was still in progress.
#[derive(Clone, Debug)]
pub struct MazeDriver {
    catalog: Catalog,
    seeds: SmallRng,
    grid: Option<Grid>,
    request: Option<GenerationRequest>,
    active: Option<ActiveRun>,
}

impl MazeDriver {
    /// Requests without their own seed draw one from `seed`.
    pub fn new(catalog: Catalog, seed: u64) -> Self {
        Self {
            catalog,
            seeds: SmallRng::seed_from_u64(seed),
            grid: None,
            request: None,
            active: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Grid of the latest request, read-only.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Latest accepted request, with the seed actually used filled in.
    pub fn active_request(&self) -> Option<&GenerationRequest> {
        self.request.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Whether every cell of the current grid has been visited.
    pub fn is_complete(&self) -> bool {
        self.grid.as_ref().is_some_and(Grid::is_complete)
    }

    /// Starts a new run, discarding the previous grid state and any unfinished run.
    pub fn request(&mut self, mut request: GenerationRequest) -> Result<Algorithm> {
        if request.size.0 == 0 || request.size.1 == 0 {
            return Err(MazeError::InvalidDimensions);
        }
        let entry = self.catalog.get(request.algorithm)?;
        let algorithm = match request.mode {
            Some(mode) => entry.algorithm.with_mode(mode),
            None => entry.algorithm,
        };

        if self.cancel() {
            log::debug!("abandoned unfinished run");
        }

        match self.grid.as_mut() {
            Some(grid) if grid.size() == request.size => grid.reset(),
            _ => self.grid = Some(Grid::new(request.size)),
        }

        let seed = match request.seed {
            Some(seed) => seed,
            None => self.seeds.random(),
        };
        request.seed = Some(seed);
        log::debug!(
            "generating {}x{} maze with {}, seed {}",
            request.size.0,
            request.size.1,
            algorithm.name(),
            seed
        );

        self.active = Some(ActiveRun {
            run: CarveRun::new(algorithm, request.step_delay),
            rng: SmallRng::seed_from_u64(seed),
        });
        self.request = Some(request);
        Ok(algorithm)
    }

    /// Abandons the active run, returning whether there was one.
    ///
    /// No further events are emitted for it and the grid is left as it was.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Relays events to `observer` until the next pause or the end of the run.
    pub fn tick<O: CarveObserver>(&mut self, mut observer: O) -> Tick {
        let (Some(active), Some(grid)) = (self.active.as_mut(), self.grid.as_mut()) else {
            return Tick::Idle;
        };

        while let Some(event) = active.run.next_event(grid, &mut active.rng) {
            observer.observe(event);
            if let CarveEvent::Pause(pause) = event {
                return Tick::Paused(pause);
            }
        }

        self.active = None;
        Tick::Finished
    }

    /// Relays every remaining event without stopping at pauses.
    pub fn run_to_completion<O: CarveObserver>(&mut self, mut observer: O) {
        while self.tick(&mut observer).is_paused() {}
    }
}
