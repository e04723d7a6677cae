// config.rs - Configuration model, validator and JSON interchange
// Checked once, rule by rule; serialization goes back through the same validator.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::table::{Transition, TransitionTable, Turn};

/// A validated transition table plus its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    name: String,
    states: u32,
    colors: u32,
    table: TransitionTable,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTransition {
    new_color: u32,
    turn: u8,
    next_state: u32,
}

#[derive(Serialize)]
struct WireConfiguration<'a> {
    name: &'a str,
    states: u32,
    colors: u32,
    transitions: Vec<WireTransition>,
}

impl Configuration {
    /// Build a configuration from typed parts, applying the same checks as
    /// [`validate`].
    pub fn new(
        name: impl Into<String>,
        states: u32,
        colors: u32,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> Result<Self> {
        let name = name.into();
        let wire = WireConfiguration {
            name: &name,
            states,
            colors,
            transitions: transitions.into_iter().map(wire_transition).collect(),
        };
        validate(&serde_json::to_value(&wire)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn states(&self) -> u32 {
        self.states
    }

    pub fn colors(&self) -> u32 {
        self.colors
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Canonical text form: pretty-printed JSON with 2-space indentation.
    pub fn to_json(&self) -> Result<String> {
        let wire = WireConfiguration {
            name: &self.name,
            states: self.states,
            colors: self.colors,
            transitions: self.table.iter().copied().map(wire_transition).collect(),
        };
        // Never export something we would refuse to load.
        validate(&serde_json::to_value(&wire)?)?;
        Ok(serde_json::to_string_pretty(&wire)?)
    }
}

impl FromStr for Configuration {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self> {
        parse(text)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} states, {} colors)", self.name, self.states, self.colors)
    }
}

fn wire_transition(rule: Transition) -> WireTransition {
    WireTransition {
        new_color: rule.new_color,
        turn: rule.turn.code(),
        next_state: rule.next_state,
    }
}

/// Parse configuration text and validate it.
pub fn parse(text: &str) -> Result<Configuration> {
    let candidate: Value = serde_json::from_str(text)?;
    validate(&candidate)
}

/// Check a candidate against every rule, in order, and type it.
pub fn validate(candidate: &Value) -> Result<Configuration> {
    check(candidate).inspect_err(|err| tracing::debug!(%err, "configuration rejected"))
}

fn check(candidate: &Value) -> Result<Configuration> {
    let record = candidate.as_object().ok_or(ConfigError::NotAnObject)?;

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or(ConfigError::MissingName)?;

    let colors = positive_count(record, "colors").ok_or(ConfigError::InvalidColorCount)?;
    let states = positive_count(record, "states").ok_or(ConfigError::InvalidStateCount)?;

    let entries = record
        .get("transitions")
        .and_then(Value::as_array)
        .ok_or(ConfigError::MissingTransitions)?;

    let expected = table_len(states, colors);
    if entries.len() != expected {
        return Err(ConfigError::TransitionCountMismatch { expected, found: entries.len() });
    }

    let transitions = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| check_transition(index, entry, states, colors))
        .collect::<Result<Vec<_>>>()?;

    Ok(Configuration {
        name: name.to_owned(),
        states,
        colors,
        table: TransitionTable::new(colors, transitions),
    })
}

/// Number of entries a table of this shape must hold.
pub fn table_len(states: u32, colors: u32) -> usize {
    (states as usize).saturating_mul(colors as usize + 1)
}

/// A non-negative whole number; integral floats such as `2.0` count.
fn whole_number(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    })
}

fn positive_count(record: &Map<String, Value>, key: &str) -> Option<u32> {
    record
        .get(key)
        .and_then(whole_number)
        .filter(|&n| n >= 1)
        .and_then(|n| u32::try_from(n).ok())
}

fn bounded(entry: &Value, key: &str, limit: u32) -> Option<u32> {
    entry
        .get(key)
        .and_then(whole_number)
        .filter(|&n| n < u64::from(limit))
        .map(|n| n as u32)
}

fn check_transition(index: usize, entry: &Value, states: u32, colors: u32) -> Result<Transition> {
    let new_color = bounded(entry, "newColor", colors).ok_or(ConfigError::NewColorOutOfRange(index))?;
    let turn = entry
        .get("turn")
        .and_then(whole_number)
        .and_then(Turn::from_code)
        .ok_or(ConfigError::InvalidTurn(index))?;
    let next_state = bounded(entry, "nextState", states).ok_or(ConfigError::NextStateOutOfRange(index))?;
    Ok(Transition { new_color, turn, next_state })
}
