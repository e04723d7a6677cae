// lib.rs - Multi-ant turmite engine
// Ants with their own transition tables walk a shared toroidal grid; the rate
// controller drains logical steps on a fixed tick, independent of rendering.

pub mod automaton;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod presets;
pub mod rate;
pub mod session;
pub mod table;

pub use automaton::{Automaton, Facing};
pub use config::{Configuration, parse, validate};
pub use engine::Engine;
pub use error::{ConfigError, Result};
pub use grid::{BACKGROUND, CELL_SIZE, Color, Grid};
pub use presets::{PRESETS, Preset};
pub use rate::{RateController, slider_to_speed, speed_to_slider};
pub use session::{ActiveConfig, Session};
pub use table::{Transition, TransitionTable, Turn};
