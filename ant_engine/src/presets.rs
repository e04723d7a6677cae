// presets.rs - Built-in rule sets offered by the preset dropdown

use crate::config::Configuration;
use crate::error::Result;
use crate::table::{Transition, Turn};

const L: Turn = Turn::Left;
const R: Turn = Turn::Right;

pub enum Rules {
    /// Single-state ant named by its turn string: color `i` turns by letter
    /// `i` and becomes color `i + 1`, wrapping to 0.
    Turns(&'static str),
    /// A full multi-state table.
    Table {
        states: u32,
        colors: u32,
        transitions: &'static [Transition],
    },
}

pub struct Preset {
    pub name: &'static str,
    pub rules: Rules,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Langton's Ant",
        rules: Rules::Turns("RL"),
    },
    Preset {
        name: "RLR",
        rules: Rules::Turns("RLR"),
    },
    Preset {
        name: "LLRR",
        rules: Rules::Turns("LLRR"),
    },
    Preset {
        name: "LRRRRRLLR",
        rules: Rules::Turns("LRRRRRLLR"),
    },
    Preset {
        name: "RRLLLRLLLRRR",
        rules: Rules::Turns("RRLLLRLLLRRR"),
    },
    Preset {
        name: "Two-state turmite",
        rules: Rules::Table {
            states: 2,
            colors: 2,
            transitions: &[
                // state 0
                Transition::new(1, R, 0),
                Transition::new(1, L, 1),
                // state 1
                Transition::new(1, R, 1),
                Transition::new(0, R, 0),
                // fallback region
                Transition::new(0, R, 0),
                Transition::new(0, R, 0),
            ],
        },
    },
];

impl Preset {
    pub fn build(&self) -> Result<Configuration> {
        match self.rules {
            Rules::Turns(turns) => {
                let colors = turns.len() as u32;
                let regular = turns.chars().enumerate().filter_map(|(i, letter)| {
                    let turn = match letter {
                        'L' => L,
                        'R' => R,
                        _ => return None,
                    };
                    Some(Transition::new((i as u32 + 1) % colors, turn, 0))
                });
                let fallback = Transition::new(0, R, 0);
                Configuration::new(self.name, 1, colors, regular.chain([fallback]))
            }
            Rules::Table { states, colors, transitions } => {
                Configuration::new(self.name, states, colors, transitions.iter().copied())
            }
        }
    }
}

pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name.eq_ignore_ascii_case(name))
}
