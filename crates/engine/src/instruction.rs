//! The Foldy instruction set.
//!
//! Program text is decoded into `Instruction` tokens once at load time, so
//! an unknown character is a load error rather than something discovered
//! mid-run, and the tick loop dispatches on an enum instead of re-examining
//! characters.

use crate::direction::{Direction, Mirror};

/// A single Foldy instruction, one cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Space (and any cell cleared by folding). Does nothing.
    Nop,
    /// `0`-`9`: push the digit.
    Push(u8),
    /// `+`: pop b, pop a, push a + b.
    Add,
    /// `-`: pop b, pop a, push a - b.
    Sub,
    /// `*`: pop b, pop a, push a * b.
    Mul,
    /// `:`: pop b, pop a, push a floor-divided by b.
    Div,
    /// `^ > v <`: face the given direction.
    Face(Direction),
    /// `/ \ | _`: bounce the IP off a mirror.
    Bounce(Mirror),
    /// `$`: if the top of the stack is positive, move 2 cells this tick.
    Skip,
    /// `?`: pop n; for n > 0, push a uniform random integer in [0, n).
    Random,
    /// `{` (counter-clockwise) and `}` (clockwise): fold the grid, or just
    /// turn the IP when fold mode is off.
    Fold { clockwise: bool },
    /// `!`: pop and print as a code point (mod 0x110000).
    PrintChar,
    /// `.`: pop and print as a decimal integer.
    PrintInt,
    /// `;`: read one character, push its code point.
    ReadChar,
    /// `,`: read one line, push it parsed as an integer (0 if unparseable).
    ReadInt,
    /// `@`: terminate the program.
    Halt,
    /// `&`: duplicate the top of the stack.
    Dup,
    /// `~`: pop and discard.
    Discard,
    /// `[`: move the top of the stack to the bottom.
    Bury,
    /// `]`: pop n, move the nth-from-top element (1-indexed, wrapping) to
    /// the top.
    Rotate,
    /// `#`: toggle fold mode.
    ToggleFold,
}

impl Instruction {
    /// Decode one character of program text. Returns `None` for anything
    /// outside the Foldy alphabet.
    pub fn decode(c: char) -> Option<Instruction> {
        use Instruction::*;
        let instr = match c {
            ' ' => Nop,
            '0'..='9' => Push(c as u8 - b'0'),
            '+' => Add,
            '-' => Sub,
            '*' => Mul,
            ':' => Div,
            '^' => Face(Direction::Up),
            '>' => Face(Direction::Right),
            'v' => Face(Direction::Down),
            '<' => Face(Direction::Left),
            '/' => Bounce(Mirror::Slash),
            '\\' => Bounce(Mirror::Backslash),
            '|' => Bounce(Mirror::Vertical),
            '_' => Bounce(Mirror::Horizontal),
            '$' => Skip,
            '?' => Random,
            '{' => Fold { clockwise: false },
            '}' => Fold { clockwise: true },
            '!' => PrintChar,
            '.' => PrintInt,
            ';' => ReadChar,
            ',' => ReadInt,
            '@' => Halt,
            '&' => Dup,
            '~' => Discard,
            '[' => Bury,
            ']' => Rotate,
            '#' => ToggleFold,
            _ => return None,
        };
        Some(instr)
    }

    /// The character this instruction renders as. Exact inverse of
    /// [`Instruction::decode`].
    pub fn glyph(self) -> char {
        use Instruction::*;
        match self {
            Nop => ' ',
            Push(d) => (b'0' + d) as char,
            Add => '+',
            Sub => '-',
            Mul => '*',
            Div => ':',
            Face(Direction::Up) => '^',
            Face(Direction::Right) => '>',
            Face(Direction::Down) => 'v',
            Face(Direction::Left) => '<',
            Bounce(Mirror::Slash) => '/',
            Bounce(Mirror::Backslash) => '\\',
            Bounce(Mirror::Vertical) => '|',
            Bounce(Mirror::Horizontal) => '_',
            Skip => '$',
            Random => '?',
            Fold { clockwise: false } => '{',
            Fold { clockwise: true } => '}',
            PrintChar => '!',
            PrintInt => '.',
            ReadChar => ';',
            ReadInt => ',',
            Halt => '@',
            Dup => '&',
            Discard => '~',
            Bury => '[',
            Rotate => ']',
            ToggleFold => '#',
        }
    }
}

/// Every character in the Foldy alphabet.
pub const ALPHABET: &str = r" 0123456789+-*:<>^v/\|_$?{}!.;,@&~[]#";
