use alloc::borrow::Cow;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Selectable algorithm with the text shown to users picking one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmEntry {
    pub name: Cow<'static, str>,
    /// How the maze is generated.
    pub description: Cow<'static, str>,
    /// What kind of maze comes out and where it fits.
    pub use_case: Cow<'static, str>,
    pub algorithm: Algorithm,
}

impl AlgorithmEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        use_case: &'static str,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            description: Cow::Borrowed(description),
            use_case: Cow::Borrowed(use_case),
            algorithm,
        }
    }
}

const STANDARD: [AlgorithmEntry; 4] = [
    AlgorithmEntry::new(
        "Binary Tree",
        "Visits every cell row by row and opens a wall towards the south, east or north, east \
         being twice as likely.",
        "Fast and memory free, the strong diagonal texture suits backdrops and quick prototypes.",
        Algorithm::BinaryTree,
    ),
    AlgorithmEntry::new(
        "Recursive Backtracking",
        "Walks randomly from the bottom-left cell, backing up along its own trail whenever it \
         gets stuck.",
        "Long winding corridors with few dead ends, good for exploration games.",
        Algorithm::RecursiveBacktracking,
    ),
    AlgorithmEntry::new(
        "Growing Tree",
        "Grows the maze from a random cell, always extending the newest cell of its working list.",
        "Behaves like backtracking but starts anywhere, good for levels with a central hub.",
        Algorithm::GrowingTree(SelectionMode::Newest),
    ),
    AlgorithmEntry::new(
        "Growing Tree (random)",
        "Grows the maze from a random cell, extending a random cell of its working list.",
        "Short branching passages with many dead ends, good for puzzles and pinball layouts.",
        Algorithm::GrowingTree(SelectionMode::Random),
    ),
];

/// Ordered list of algorithms a request selects from by index.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<AlgorithmEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<AlgorithmEntry>) -> Self {
        Self { entries }
    }

    /// Every built-in algorithm.
    pub fn standard() -> Self {
        Self::new(STANDARD.to_vec())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&AlgorithmEntry> {
        self.entries.get(index).ok_or(MazeError::UnknownAlgorithm {
            index,
            available: self.entries.len(),
        })
    }

    /// Case-insensitive lookup by entry name, returning the index.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlgorithmEntry> {
        self.entries.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
