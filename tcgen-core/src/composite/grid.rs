use crate::{
    error::*,
    lazy::Lazy,
    primitive::{Integer, Primitive},
    random::Random,
    render::Descriptor,
};
use log::debug;

/// `rows x cols` matrix of independent draws, 0-indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<P: Primitive = Integer> {
    rows: usize,
    cols: usize,
    recipe: P,
    space_separated: bool,
    cache: Lazy<Vec<Vec<P::Value>>>,
}

impl Grid<Integer> {
    /// A `0`/`1` grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid::of(rows, cols, Integer::bool())
    }
}

impl<P: Primitive> Grid<P> {
    pub fn of(rows: usize, cols: usize, recipe: P) -> Self {
        Grid {
            rows,
            cols,
            recipe,
            space_separated: true,
            cache: Lazy::new(),
        }
    }

    /// Render cells of a row without separators.
    pub fn compact(mut self) -> Self {
        self.space_separated = false;
        self
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell recipe.
    pub fn recipe(&self) -> &P {
        &self.recipe
    }

    /// Fill every cell with `value` and mark the grid generated.
    pub fn set(&mut self, value: P::Value) -> &mut Self {
        self.cache.set(vec![vec![value; self.cols]; self.rows]);
        self
    }

    /// Replace every cell. `cells` must match the grid's shape.
    pub fn set_cells(&mut self, cells: Vec<Vec<P::Value>>) -> Result<&mut Self> {
        if cells.len() != self.rows || cells.iter().any(|row| row.len() != self.cols) {
            return Err(TcgenError::invalid_argument(format!(
                "cells do not form a {}x{} grid",
                self.rows, self.cols
            )));
        }
        self.cache.set(cells);
        Ok(self)
    }

    /// The cells row by row, generating first if needed.
    pub fn val(&mut self, rng: &mut Random) -> Result<&[Vec<P::Value>]> {
        Ok(self.cells(rng)?.as_slice())
    }

    /// Cell at `(row, col)`, generating first if needed.
    pub fn get(&mut self, rng: &mut Random, row: usize, col: usize) -> Result<Option<&P::Value>> {
        Ok(self.val(rng)?.get(row).and_then(|cells| cells.get(col)))
    }

    fn cells(&mut self, rng: &mut Random) -> Result<&mut Vec<Vec<P::Value>>> {
        let Grid {
            rows,
            cols,
            recipe,
            cache,
            ..
        } = self;
        cache.get_or_try_init(|| {
            debug!("Generating {rows}x{cols} grid");
            (0..*rows)
                .map(|_| (0..*cols).map(|_| recipe.draw(rng)).collect::<Result<Vec<_>>>())
                .collect()
        })
    }
}

impl<P: Primitive> Descriptor for Grid<P> {
    fn render(&mut self, rng: &mut Random) -> Result<String> {
        let separator = if self.space_separated { " " } else { "" };
        self.cells(rng)?;
        let Grid { recipe, cache, .. } = self;
        let lines: Vec<String> = cache
            .get()
            .into_iter()
            .flatten()
            .map(|row| {
                let cells: Vec<String> = row.iter().map(|cell| recipe.format(cell)).collect();
                cells.join(separator)
            })
            .collect();
        Ok(lines.join("\n"))
    }

    fn is_generated(&self) -> bool {
        self.cache.is_generated()
    }

    fn reset(&mut self) {
        self.cache.reset();
    }
}
