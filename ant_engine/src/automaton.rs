// automaton.rs - A single ant and its movement rule

use std::sync::Arc;

use crate::config::Configuration;
use crate::grid::Grid;
use crate::table::Turn;

/// Heading of an ant. Discriminants are the wire/display encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Facing {
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Facing::Up,
            1 => Facing::Right,
            2 => Facing::Down,
            _ => Facing::Left,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn turned(self, turn: Turn) -> Self {
        match turn {
            Turn::Left => Facing::from_index(self.index() + 3),
            Turn::Right => Facing::from_index(self.index() + 1),
        }
    }

    /// Offset `(dx, dy)` of one cell in this direction; rows grow downward.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Facing::Up => (0, -1),
            Facing::Right => (1, 0),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
        }
    }
}

/// One mobile automaton bound to the configuration it was created with.
#[derive(Debug, Clone)]
pub struct Automaton {
    x: i64,
    y: i64,
    facing: Facing,
    state: u32,
    config: Arc<Configuration>,
}

impl Automaton {
    pub fn new(x: i64, y: i64, config: Arc<Configuration>) -> Self {
        Self {
            x,
            y,
            facing: Facing::Up,
            state: 0,
            config,
        }
    }

    pub(crate) fn facing_to(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn config(&self) -> &Arc<Configuration> {
        &self.config
    }

    /// Apply one transition: repaint, turn, change state, step forward.
    ///
    /// Returns `false` when the ant stalls, either because it stands off the
    /// grid or because its table has no rule for the observed color.
    pub fn advance(&mut self, grid: &mut Grid) -> bool {
        let Some(color) = grid.get(self.x, self.y) else {
            tracing::trace!(x = self.x, y = self.y, "ant off grid, stalled");
            return false;
        };
        let Some(&rule) = self.config.table().lookup(self.state, color) else {
            tracing::trace!(state = self.state, color, "no transition, stalled");
            return false;
        };

        grid.set(self.x, self.y, rule.new_color);
        self.facing = self.facing.turned(rule.turn);
        self.state = rule.next_state;
        (self.x, self.y) = grid.wrap(self.x, self.y, self.facing.delta());
        true
    }
}
