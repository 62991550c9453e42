use std::fs;
use std::path::Path;

use anyhow::{Context, ensure};
use burrow_core::{Coord, GenerationRequest, SelectionMode};
use serde::{Deserialize, Serialize};

/// Largest width or height accepted from users.
pub const MAX_DIMENSION: Coord = 1000;

/// Generation settings as stored in a TOML file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: Coord,
    pub height: Coord,
    /// Seconds between steps, what counts as a step depends on the algorithm.
    pub generation_delay: f32,
    pub maze_index: usize,
    pub mode: Option<SelectionMode>,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            generation_delay: 0.015,
            maze_index: 0,
            mode: None,
            seed: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        let settings: Self = toml::from_str(&text)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        log::debug!("loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (1..=MAX_DIMENSION).contains(&self.width),
            "width must be between 1 and {MAX_DIMENSION}, got {}",
            self.width
        );
        ensure!(
            (1..=MAX_DIMENSION).contains(&self.height),
            "height must be between 1 and {MAX_DIMENSION}, got {}",
            self.height
        );
        ensure!(
            self.generation_delay.is_finite() && self.generation_delay >= 0.0,
            "generation delay must be a non-negative number of seconds, got {}",
            self.generation_delay
        );
        Ok(())
    }

    pub fn to_request(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new((self.width, self.height), self.maze_index)
            .with_delay_secs(self.generation_delay);
        request.mode = self.mode;
        request.seed = self.seed;
        request
    }
}
