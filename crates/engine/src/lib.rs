//! Foldy execution engine — a 1D language that doesn't stay 1D.
//!
//! Foldy code loads as a single row of cells. The instruction pointer
//! walks the grid one cell per tick, and the brace instructions fold the
//! rest of the row (or column) the IP is facing 90° around it, growing the
//! grid as cells land past an edge. The engine is the whole interpreter:
//!
//! - [`Grid`] — the self-modifying 2D cell buffer and its `fold`
//! - [`Ip`] — position, facing, fold mode, and the evaluation stack
//! - [`Engine`] — the tick loop, wired to injected input/output/randomness
//! - [`LoadError`] / [`RuntimeError`] — the two failure phases
//!
//! # Usage
//!
//! ```
//! use foldy_engine::Engine;
//!
//! let mut engine = Engine::with_io("23+.@", std::io::empty(), Vec::new()).unwrap();
//! engine.run(100).unwrap();
//! assert_eq!(engine.output(), b"5");
//! ```

pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod instruction;
pub mod ip;

pub use direction::{Direction, Mirror};
pub use engine::{Engine, Flow};
pub use error::{LoadError, RuntimeError};
pub use grid::Grid;
pub use instruction::{Instruction, ALPHABET};
pub use ip::Ip;
