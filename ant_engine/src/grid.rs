// grid.rs - Toroidal grid of color indices

/// Index into a configuration's colors; 0 is the background.
pub type Color = u32;

pub const BACKGROUND: Color = 0;

// Pixels per cell when a viewport size is turned into grid dimensions
pub const CELL_SIZE: u32 = 4;

/// `rows × cols` color indices, stored row-major. Movement wraps on both axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// A grid filled with the background color.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![BACKGROUND; rows * cols],
        }
    }

    /// Grid dimensions `(rows, cols)` that fit a `width × height` pixel area.
    pub fn dimensions_for(width: u32, height: u32) -> (usize, usize) {
        ((height / CELL_SIZE) as usize, (width / CELL_SIZE) as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..self.cols as i64).contains(&x) && (0..self.rows as i64).contains(&y)
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        self.contains(x, y).then(|| y as usize * self.cols + x as usize)
    }

    /// Color at column `x`, row `y`, or `None` off the grid.
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Paint a cell. Writes off the grid are ignored.
    pub fn set(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = color;
        }
    }

    /// Color at `(row, col)` for renderers walking the grid.
    pub fn color_at(&self, row: usize, col: usize) -> Color {
        self.cells[row * self.cols + col]
    }

    /// Move `(x, y)` by `(dx, dy)`, wrapping around both edges.
    /// The grid must not be empty.
    pub fn wrap(&self, x: i64, y: i64, (dx, dy): (i64, i64)) -> (i64, i64) {
        ((x + dx).rem_euclid(self.cols as i64), (y + dy).rem_euclid(self.rows as i64))
    }

    /// A new `rows × cols` grid holding this grid's overlapping top-left
    /// region; everything else is background.
    pub fn resized(&self, rows: usize, cols: usize) -> Grid {
        let mut next = Grid::new(rows, cols);
        let keep_cols = self.cols.min(cols);
        for row in 0..self.rows.min(rows) {
            let src = row * self.cols;
            let dst = row * cols;
            next.cells[dst..dst + keep_cols].copy_from_slice(&self.cells[src..src + keep_cols]);
        }
        next
    }

    /// Non-background cells as `(row, col, color)`.
    pub fn painted(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &color)| color != BACKGROUND)
            .map(|(i, &color)| (i / self.cols, i % self.cols, color))
    }

    /// How many cells hold each color, indexed by color.
    pub fn census(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        for &color in &self.cells {
            let color = color as usize;
            if counts.len() <= color {
                counts.resize(color + 1, 0);
            }
            counts[color] += 1;
        }
        counts
    }
}
