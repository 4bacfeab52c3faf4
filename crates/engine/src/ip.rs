//! The instruction pointer: position, facing, fold mode, and the
//! evaluation stack.
//!
//! The stack holds arbitrary-precision integers because Foldy programs can
//! grow values without bound (`&` then `*` doubles the digit count every
//! two ticks). Underflow for the arithmetic instructions is floor-padding:
//! zeros are inserted at the *bottom* until two operands exist.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::direction::Direction;

/// The single cursor that executes one grid cell per tick.
#[derive(Debug, Clone)]
pub struct Ip {
    /// Column, always in `[0, grid width)`.
    pub x: usize,
    /// Row, always in `[0, grid height)`.
    pub y: usize,
    /// Current facing.
    pub direction: Direction,
    /// Whether `{` and `}` fold the grid (true) or merely turn (false).
    pub fold_mode: bool,
    /// The evaluation stack; the last element is the top.
    pub stack: Vec<BigInt>,
}

impl Ip {
    /// A fresh IP at the origin, facing right, with fold mode on.
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            direction: Direction::Right,
            fold_mode: true,
            stack: Vec::new(),
        }
    }

    /// Turn 90° in place.
    pub fn turn(&mut self, clockwise: bool) {
        self.direction = self.direction.turned(clockwise);
    }

    /// Step `amount` cells along the current facing, wrapping both axes
    /// against the given grid dimensions.
    pub fn advance(&mut self, amount: i64, width: usize, height: usize) {
        let (dx, dy) = self.direction.delta();
        self.x = (self.x as i64 + dx * amount).rem_euclid(width as i64) as usize;
        self.y = (self.y as i64 + dy * amount).rem_euclid(height as i64) as usize;
    }

    /// Push a value onto the stack.
    pub fn push(&mut self, value: BigInt) {
        self.stack.push(value);
    }

    /// Pop the top of the stack, if any.
    pub fn pop(&mut self) -> Option<BigInt> {
        self.stack.pop()
    }

    /// Pop the top of the stack, or zero if the stack is empty. The
    /// fallback used by `!` and `.`.
    pub fn pop_or_zero(&mut self) -> BigInt {
        self.stack.pop().unwrap_or_else(BigInt::zero)
    }

    /// Pop two operands for an arithmetic instruction, floor-padding first:
    /// zeros go under the existing entries until there are at least two.
    /// Returns `(a, b)` where `b` was on top.
    pub fn pop_operands(&mut self) -> (BigInt, BigInt) {
        while self.stack.len() < 2 {
            self.stack.insert(0, BigInt::zero());
        }
        let b = self.stack.pop().expect("padded to two entries");
        let a = self.stack.pop().expect("padded to two entries");
        (a, b)
    }
}

impl Default for Ip {
    fn default() -> Self {
        Self::new()
    }
}
