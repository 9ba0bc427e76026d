//! Endpoint marks and the per-link payload.

use serde::{Deserialize, Serialize};

/// The symbol at one end of a PAG link.
///
/// Every adjacent pair carries two independently settable marks, one per
/// endpoint. A circle is the non-commitment default; inference upgrades
/// circles to tails (lines) or arrowheads, never the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mark {
    /// Non-commitment (the PAG joker).
    #[default]
    Circle,
    /// Tail.
    Line,
    /// Arrowhead.
    Arrow,
}

impl Mark {
    /// Character used when this mark sits at the left (first) variable of a
    /// rendered link token.
    pub fn left_char(self) -> char {
        match self {
            Mark::Circle => 'o',
            Mark::Line => '-',
            Mark::Arrow => '<',
        }
    }

    /// Character used when this mark sits at the right (second) variable.
    pub fn right_char(self) -> char {
        match self {
            Mark::Circle => 'o',
            Mark::Line => '-',
            Mark::Arrow => '>',
        }
    }

    /// Parse the left-hand character of a link token.
    pub fn from_left_char(c: char) -> Option<Mark> {
        match c {
            'o' => Some(Mark::Circle),
            '-' => Some(Mark::Line),
            '<' => Some(Mark::Arrow),
            _ => None,
        }
    }

    /// Parse the right-hand character of a link token.
    pub fn from_right_char(c: char) -> Option<Mark> {
        match c {
            'o' => Some(Mark::Circle),
            '-' => Some(Mark::Line),
            '>' => Some(Mark::Arrow),
            _ => None,
        }
    }
}

/// Payload stored on one undirected link.
///
/// Mark and preset slots are indexed by canonical endpoint order: slot 0
/// belongs to the endpoint with the lower variable index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkWeight {
    pub(crate) marks: [Mark; 2],
    pub(crate) preset_end: [bool; 2],
    pub(crate) preset_link: bool,
    pub(crate) undeletable: bool,
    /// Minimum association statistic observed so far for this pair.
    pub(crate) strength: f64,
}

impl Default for LinkWeight {
    fn default() -> Self {
        Self {
            marks: [Mark::Circle; 2],
            preset_end: [false; 2],
            preset_link: false,
            undeletable: false,
            strength: 1.0,
        }
    }
}

/// Slot (0 or 1) of the mark *at* `of` on the link between `of` and `other`.
pub(crate) fn end_slot(other: usize, of: usize) -> usize {
    usize::from(of > other)
}
