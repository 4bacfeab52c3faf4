//! Compass directions for the instruction pointer.
//!
//! Directions are cyclic in the order up, right, down, left (indices 0-3),
//! so a clockwise turn is +1 mod 4 and a counter-clockwise turn is -1 mod 4.

/// One of the four directions the IP can face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

use Direction::{Down, Left, Right, Up};

/// All directions in cyclic order. Index = the direction's numeric value.
pub const ALL_DIRECTIONS: [Direction; 4] = [Up, Right, Down, Left];

/// `/` sends right↔up and down↔left.
const SLASH: [Direction; 4] = [Right, Up, Left, Down];
/// `\` sends left↔up and down↔right.
const BACKSLASH: [Direction; 4] = [Left, Down, Right, Up];
/// `|` sends right↔left; up and down pass through.
const VERTICAL: [Direction; 4] = [Up, Left, Down, Right];
/// `_` sends up↔down; left and right pass through.
const HORIZONTAL: [Direction; 4] = [Down, Right, Up, Left];

impl Direction {
    /// Numeric value in the cyclic order (up = 0 .. left = 3).
    pub fn index(self) -> usize {
        match self {
            Up => 0,
            Right => 1,
            Down => 2,
            Left => 3,
        }
    }

    /// Unit step vector `(dx, dy)`. The y axis grows downward.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
        }
    }

    /// The direction after a 90° turn.
    pub fn turned(self, clockwise: bool) -> Direction {
        let step = if clockwise { 1 } else { 3 };
        ALL_DIRECTIONS[(self.index() + step) % 4]
    }

    /// The direction after bouncing off the given mirror.
    pub fn bounced(self, mirror: Mirror) -> Direction {
        let table = match mirror {
            Mirror::Slash => &SLASH,
            Mirror::Backslash => &BACKSLASH,
            Mirror::Vertical => &VERTICAL,
            Mirror::Horizontal => &HORIZONTAL,
        };
        table[self.index()]
    }
}

/// The four reflector instructions, each a fixed permutation of directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mirror {
    /// `/`
    Slash,
    /// `\`
    Backslash,
    /// `|`
    Vertical,
    /// `_`
    Horizontal,
}
