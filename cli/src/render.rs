use std::fmt;
use std::io::{self, Write};

use burrow_core::{CarveEvent, CarveObserver, Coord, Coord2, Direction};

/// Wall segments of the whole maze as the renderer sees them.
///
/// Horizontal segments sit below each row (`width * (height + 1)` of them, the last row of
/// segments closing the top), vertical segments left of each column (`(width + 1) * height`).
#[derive(Clone, Debug, PartialEq)]
pub struct WallModel {
    width: usize,
    height: usize,
    horizontal: Vec<bool>,
    vertical: Vec<bool>,
    highlight: Option<Coord2>,
}

impl WallModel {
    pub fn new((width, height): Coord2) -> Self {
        let (width, height) = (usize::from(width), usize::from(height));
        Self {
            width,
            height,
            horizontal: vec![true; width * (height + 1)],
            vertical: vec![true; (width + 1) * height],
            highlight: None,
        }
    }

    pub fn highlight(&self) -> Option<Coord2> {
        self.highlight
    }

    /// Opens the bottom wall of the bottom-left cell and the top wall of the top-right cell.
    pub fn open_entrance_and_exit(&mut self) {
        self.horizontal[0] = false;
        self.horizontal[(self.width - 1) + self.height * self.width] = false;
        self.highlight = None;
    }

    fn segment(&mut self, (x, y): Coord2, direction: Direction) -> &mut bool {
        let (x, y) = (usize::from(x), usize::from(y));
        match direction {
            Direction::North => &mut self.horizontal[x + (y + 1) * self.width],
            Direction::South => &mut self.horizontal[x + y * self.width],
            Direction::East => &mut self.vertical[(x + 1) + y * (self.width + 1)],
            Direction::West => &mut self.vertical[x + y * (self.width + 1)],
        }
    }
}

impl CarveObserver for WallModel {
    fn on_cell_visited(&mut self, coords: Coord2) {
        self.highlight = Some(coords);
    }

    fn on_wall_removed(&mut self, coords: Coord2, direction: Direction) {
        *self.segment(coords, direction) = false;
    }
}

/// Draws the maze with north at the top.
impl fmt::Display for WallModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..=self.height).rev() {
            write!(f, "+")?;
            for x in 0..self.width {
                let segment = if self.horizontal[x + y * self.width] {
                    "---"
                } else {
                    "   "
                };
                write!(f, "{segment}+")?;
            }
            writeln!(f)?;

            let Some(row) = y.checked_sub(1) else {
                break;
            };
            for x in 0..=self.width {
                let wall = if self.vertical[x + row * (self.width + 1)] {
                    '|'
                } else {
                    ' '
                };
                write!(f, "{wall}")?;
                if x < self.width {
                    let current = self.highlight == Some((x as Coord, row as Coord));
                    write!(f, "{}", if current { " @ " } else { "   " })?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Streams every event, pauses included, as one JSON object per line.
pub struct EventWriter<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> EventWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flushes the output, surfacing the first write error.
    pub fn finish(mut self) -> io::Result<()> {
        match self.error.take() {
            Some(err) => Err(err),
            None => self.out.flush(),
        }
    }
}

impl<W: Write> CarveObserver for EventWriter<W> {
    fn observe(&mut self, event: CarveEvent) {
        if self.error.is_some() {
            return;
        }
        let result = serde_json::to_writer(&mut self.out, &event)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(err) = result {
            log::error!("Could not write event: {:?}", err);
            self.error = Some(err);
        }
    }
}
