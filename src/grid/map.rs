//! Grid - the rectangular map of cells

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::{CellKind, Coords, RaceId};
use crate::grid::cell::Cell;

/// Row-major map of cells, created all-shadow
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(Coords::new(x, y)));
            }
        }

        Self { width, height, cells }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coords: Coords) -> bool {
        coords.x < self.width && coords.y < self.height
    }

    fn index_of(&self, coords: Coords) -> Option<usize> {
        self.contains(coords)
            .then(|| coords.y as usize * self.width as usize + coords.x as usize)
    }

    pub fn get(&self, coords: Coords) -> Option<&Cell> {
        let index = self.index_of(coords)?;
        self.cells.get(index)
    }

    pub fn get_mut(&mut self, coords: Coords) -> Option<&mut Cell> {
        let index = self.index_of(coords)?;
        self.cells.get_mut(index)
    }

    /// Like [`Grid::get_mut`], but a miss is an error
    pub fn cell_mut(&mut self, coords: Coords) -> Result<&mut Cell> {
        self.get_mut(coords).ok_or(GameError::CellNotFound(coords))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Turn a random share of the shadow cells into resources.
    ///
    /// Returns the number of cells seeded.
    pub fn seed_resources<R: Rng + ?Sized>(&mut self, fraction: f64, rng: &mut R) -> usize {
        let mut seeded = 0;
        for cell in self.cells.iter_mut().filter(|c| c.kind() == CellKind::Shadow) {
            if rng.gen::<f64>() < fraction {
                cell.convert_to_random_resource(rng);
                seeded += 1;
            }
        }
        seeded
    }

    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }

    /// Cells owned by `race`, home cell included
    pub fn owned_by(&self, race: RaceId) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(move |c| c.owner() == Some(race))
    }
}
