// engine.rs - Simulation engine: owns the grid and the ants, advances logical steps

use std::sync::Arc;

use crate::automaton::Automaton;
use crate::config::Configuration;
use crate::grid::Grid;

/// The only owner of the grid and the ant list. All mutation goes through
/// [`set_config`](Engine::set_config), [`add_ant`](Engine::add_ant),
/// [`step`](Engine::step) and [`resize`](Engine::resize).
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    ants: Vec<Automaton>,
    config: Arc<Configuration>,
    steps: u64,
}

impl Engine {
    /// An empty engine sized for a `width × height` pixel viewport.
    pub fn new(config: Arc<Configuration>, width: u32, height: u32) -> Self {
        let (rows, cols) = Grid::dimensions_for(width, height);
        Self {
            grid: Grid::new(rows, cols),
            ants: Vec::new(),
            config,
            steps: 0,
        }
    }

    /// Swap the default configuration. This is a hard reset: the grid goes
    /// back to background and every ant is discarded.
    pub fn set_config(&mut self, config: Arc<Configuration>) {
        tracing::info!(config = %config, "configuration applied");
        self.config = config;
        self.reset();
    }

    /// Same reset as [`set_config`](Engine::set_config), keeping the current default.
    pub fn clear(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.grid = Grid::new(self.grid.rows(), self.grid.cols());
        self.ants.clear();
        self.steps = 0;
    }

    /// Place an ant at column `x`, row `y`, bound to `config` or else to the
    /// current default. Positions are not checked here; out-of-range ants
    /// stall until the next [`resize`](Engine::resize) prunes them.
    pub fn add_ant(&mut self, x: i64, y: i64, config: Option<Arc<Configuration>>) -> usize {
        let config = config.unwrap_or_else(|| Arc::clone(&self.config));
        tracing::debug!(x, y, config = config.name(), "ant added");
        self.ants.push(Automaton::new(x, y, config));
        self.ants.len() - 1
    }

    /// One logical step: every ant moves once, in the order it was added.
    /// Later ants see the cells earlier ants repainted during this step.
    pub fn step(&mut self) {
        for ant in &mut self.ants {
            ant.advance(&mut self.grid);
        }
        self.steps += 1;
    }

    pub fn step_n(&mut self, count: u64) {
        for _ in 0..count {
            self.step();
        }
    }

    /// Resize to fit a `width × height` pixel viewport, keeping the
    /// overlapping top-left region and dropping ants that fall outside.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (rows, cols) = Grid::dimensions_for(width, height);
        self.grid = self.grid.resized(rows, cols);

        let before = self.ants.len();
        let grid = &self.grid;
        self.ants.retain(|ant| {
            let (x, y) = ant.position();
            grid.contains(x, y)
        });
        tracing::debug!(rows, cols, pruned = before - self.ants.len(), "grid resized");
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn ants(&self) -> &[Automaton] {
        &self.ants
    }

    /// The default configuration new ants are bound to.
    pub fn config(&self) -> &Arc<Configuration> {
        &self.config
    }

    /// Logical steps taken since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
