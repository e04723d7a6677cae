// table.rs - Flat transition table indexed by (state, observed color)

/// Which way an ant rotates after repainting its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// Wire encoding: 0 = left, 1 = right.
    pub fn code(self) -> u8 {
        match self {
            Turn::Left => 0,
            Turn::Right => 1,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Turn::Left),
            1 => Some(Turn::Right),
            _ => None,
        }
    }
}

/// One rule: repaint to `new_color`, rotate by `turn`, become `next_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub new_color: u32,
    pub turn: Turn,
    pub next_state: u32,
}

impl Transition {
    pub const fn new(new_color: u32, turn: Turn, next_state: u32) -> Self {
        Self { new_color, turn, next_state }
    }
}

/// The rules of a configuration, stored flat.
///
/// A table for `states` states and `colors` colors holds
/// `states * (colors + 1)` entries: the first `states * colors` are the
/// regular rules laid out state-major, the trailing `states` entries are the
/// fallback region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    colors: u32,
    entries: Vec<Transition>,
}

impl TransitionTable {
    /// Only built by the validator, which has already checked the shape.
    pub(crate) fn new(colors: u32, entries: Vec<Transition>) -> Self {
        Self { colors, entries }
    }

    /// Resolve the rule for an ant in `state` standing on `color`.
    ///
    /// The primary slot is `state * colors + color`. When it is empty the
    /// lookup falls back to `state * colors + colors`, which lands on the
    /// first regular rule of the *next* state rather than on this state's
    /// entry in the trailing fallback region. Validated tables never reach
    /// the fallback with a color painted by the same table; it only fires for
    /// colors painted by an ant carrying a wider table, and keeps this
    /// indexing as-is.
    pub fn lookup(&self, state: u32, color: u32) -> Option<&Transition> {
        let colors = self.colors as usize;
        let base = state as usize * colors;
        match self.entries.get(base + color as usize) {
            Some(rule) => Some(rule),
            None => {
                let fallback = self.entries.get(base + colors);
                tracing::trace!(state, color, found = fallback.is_some(), "fallback transition lookup");
                fallback
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> TransitionTable {
        TransitionTable::new(
            2,
            vec![
                Transition::new(1, Turn::Right, 0),
                Transition::new(0, Turn::Left, 0),
                Transition::new(0, Turn::Right, 0),
            ],
        )
    }

    #[test]
    fn turn_codes() {
        assert_eq!(Turn::from_code(0), Some(Turn::Left));
        assert_eq!(Turn::from_code(1), Some(Turn::Right));
        assert_eq!(Turn::from_code(2), None);
        assert_eq!(Turn::Right.code(), 1);
    }

    #[test]
    fn primary_lookup_is_state_major() {
        let table = classic();
        assert_eq!(table.lookup(0, 0), Some(&Transition::new(1, Turn::Right, 0)));
        assert_eq!(table.lookup(0, 1), Some(&Transition::new(0, Turn::Left, 0)));
    }

    #[test]
    fn foreign_color_uses_fallback_slot() {
        let table = classic();
        // 0 * 2 + 5 is past the end, so the slot at 0 * 2 + 2 answers.
        assert_eq!(table.lookup(0, 5), Some(&Transition::new(0, Turn::Right, 0)));
    }

    #[test]
    fn fallback_overlaps_next_state_block() {
        // Two states, one color: regular slots 0 and 1, fallback region 2..4.
        let table = TransitionTable::new(
            1,
            vec![
                Transition::new(0, Turn::Right, 1),
                Transition::new(0, Turn::Left, 0),
                Transition::new(0, Turn::Right, 0),
                Transition::new(0, Turn::Left, 1),
            ],
        );
        // State 0 on foreign color 3: primary 3 exists, no fallback at all.
        assert_eq!(table.lookup(0, 3), Some(&Transition::new(0, Turn::Left, 1)));
        // State 1 on foreign color 7: primary 8 is missing, fallback is slot 2.
        assert_eq!(table.lookup(1, 7), Some(&Transition::new(0, Turn::Right, 0)));
    }

    #[test]
    fn unresolved_lookup_is_none() {
        let table = TransitionTable::new(2, vec![Transition::new(1, Turn::Right, 0)]);
        assert_eq!(table.lookup(3, 0), None);
    }
}
