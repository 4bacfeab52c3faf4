//! The tick loop: reads the cell under the IP, performs its effect, and
//! moves the IP.
//!
//! The engine owns exactly one grid and one IP. Input, output, and the
//! random source are injected so programs can run against captured buffers
//! and a fixed seed in tests.

use std::fmt;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use num_bigint::{BigInt, RandBigInt};
use num_traits::{Signed, ToPrimitive, Zero};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::{LoadError, RuntimeError};
use crate::grid::Grid;
use crate::instruction::Instruction;
use crate::ip::Ip;

/// What a single tick decided about the program's future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep ticking.
    Running,
    /// The program executed `@`.
    Halted,
}

/// A Foldy program ready to run: one grid, one IP, and the I/O it is
/// wired to.
pub struct Engine<R, W> {
    grid: Grid,
    ip: Ip,
    input: R,
    output: W,
    rng: SmallRng,
    cancel: Option<Arc<AtomicBool>>,
}

impl Engine<BufReader<Stdin>, Stdout> {
    /// Load a program wired to stdin and stdout.
    pub fn new(code: &str) -> Result<Self, LoadError> {
        Self::with_io(code, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Engine<R, W> {
    /// Load a program wired to the given input source and output sink.
    /// The random source starts from entropy; see [`Engine::with_seed`].
    pub fn with_io(code: &str, input: R, output: W) -> Result<Self, LoadError> {
        Ok(Self {
            grid: Grid::parse(code)?,
            ip: Ip::new(),
            input,
            output,
            rng: SmallRng::from_entropy(),
            cancel: None,
        })
    }

    /// Replace the random source with one seeded from `seed`, making `?`
    /// deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// A flag that stops `run` before its next tick once set. The same
    /// handle is returned on every call.
    pub fn cancel_handle(&mut self) -> Arc<AtomicBool> {
        self.cancel
            .get_or_insert_with(|| Arc::new(AtomicBool::new(false)))
            .clone()
    }

    /// The grid in its current state.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The IP in its current state.
    pub fn ip(&self) -> &Ip {
        &self.ip
    }

    /// The evaluation stack, bottom first.
    pub fn stack(&self) -> &[BigInt] {
        &self.ip.stack
    }

    /// The output sink, for inspection after a run.
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run until the program halts or the budget runs out.
    ///
    /// `ticks == 0` means no budget: run until `@` or cancellation. With a
    /// budget, exhausting it before `@` is
    /// [`RuntimeError::TickLimitExceeded`].
    pub fn run(&mut self, ticks: u64) -> Result<(), RuntimeError> {
        let result = self.run_loop(ticks);
        let flushed = self.output.flush();
        result?;
        flushed?;
        Ok(())
    }

    fn run_loop(&mut self, ticks: u64) -> Result<(), RuntimeError> {
        if ticks == 0 {
            loop {
                self.check_cancelled()?;
                if self.tick()? == Flow::Halted {
                    return Ok(());
                }
            }
        }
        for _ in 0..ticks {
            self.check_cancelled()?;
            if self.tick()? == Flow::Halted {
                return Ok(());
            }
        }
        Err(RuntimeError::TickLimitExceeded { ticks })
    }

    fn check_cancelled(&self) -> Result<(), RuntimeError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(RuntimeError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Execute one tick: read the cell under the IP, dispatch, move.
    ///
    /// Every effect lands before this returns; no partial-tick state is
    /// ever observable.
    pub fn tick(&mut self) -> Result<Flow, RuntimeError> {
        // IP coordinates wrap after every move, so this read is in bounds.
        let instr = self
            .grid
            .get(self.ip.x as i64, self.ip.y as i64)
            .unwrap_or(Instruction::Nop);

        // Only `$` changes this, and only for the current tick.
        let mut move_amount = 1;

        match instr {
            Instruction::Nop => {}
            Instruction::Push(digit) => self.ip.push(BigInt::from(digit)),
            Instruction::Add => {
                let (a, b) = self.ip.pop_operands();
                self.ip.push(a + b);
            }
            Instruction::Sub => {
                let (a, b) = self.ip.pop_operands();
                self.ip.push(a - b);
            }
            Instruction::Mul => {
                let (a, b) = self.ip.pop_operands();
                self.ip.push(a * b);
            }
            Instruction::Div => {
                let (a, b) = self.ip.pop_operands();
                if b.is_zero() {
                    return Err(RuntimeError::DivisionByZero);
                }
                self.ip.push(floor_div(a, &b));
            }
            Instruction::Face(direction) => self.ip.direction = direction,
            Instruction::Bounce(mirror) => {
                self.ip.direction = self.ip.direction.bounced(mirror);
            }
            Instruction::Skip => {
                if let Some(top) = self.ip.stack.last() {
                    if top.is_positive() {
                        move_amount = 2;
                    }
                }
            }
            Instruction::Random => {
                if let Some(n) = self.ip.pop() {
                    if n.is_positive() {
                        let value = self.rng.gen_bigint_range(&BigInt::zero(), &n);
                        self.ip.push(value);
                    }
                }
            }
            Instruction::Fold { clockwise } => {
                if self.ip.fold_mode {
                    self.grid.fold(&mut self.ip, clockwise);
                } else {
                    self.ip.turn(clockwise);
                }
            }
            Instruction::PrintChar => {
                let n = self.ip.pop_or_zero();
                let code = mod_floor(&n, &BigInt::from(0x110000))
                    .to_u32()
                    .expect("reduced mod 0x110000");
                // The surrogate gap survives the mod-0x110000 wraparound
                // but cannot be a char; it degrades to the replacement
                // character.
                let c = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                write!(self.output, "{c}")?;
            }
            Instruction::PrintInt => {
                let n = self.ip.pop_or_zero();
                write!(self.output, "{n}")?;
            }
            Instruction::ReadChar => {
                let c = self.read_char()?;
                self.ip.push(BigInt::from(c as u32));
            }
            Instruction::ReadInt => {
                let mut line = String::new();
                self.input.read_line(&mut line)?;
                let value: BigInt = line.trim().parse().unwrap_or_else(|_| BigInt::zero());
                self.ip.push(value);
            }
            Instruction::Halt => return Ok(Flow::Halted),
            Instruction::Dup => {
                if let Some(top) = self.ip.stack.last() {
                    let top = top.clone();
                    self.ip.push(top);
                }
            }
            Instruction::Discard => {
                self.ip.pop();
            }
            Instruction::Bury => {
                if let Some(top) = self.ip.pop() {
                    self.ip.stack.insert(0, top);
                }
            }
            Instruction::Rotate => self.rotate()?,
            Instruction::ToggleFold => self.ip.fold_mode = !self.ip.fold_mode,
        }

        self.ip
            .advance(move_amount, self.grid.width(), self.grid.height());
        Ok(Flow::Running)
    }

    /// `]`: pop n, then move the nth-from-top element of what remains to
    /// the top. n is 1-indexed and wraps modulo the remaining length, so
    /// any integer is a valid index — but there must be something left to
    /// index.
    fn rotate(&mut self) -> Result<(), RuntimeError> {
        let n = self
            .ip
            .pop()
            .ok_or(RuntimeError::StackEmpty { op: ']' })?;
        let len = self.ip.stack.len();
        if len == 0 {
            return Err(RuntimeError::StackEmpty { op: ']' });
        }
        let from_top = mod_floor(&(n - 1), &BigInt::from(len))
            .to_usize()
            .expect("reduced mod the stack length")
            + 1;
        let element = self.ip.stack.remove(len - from_top);
        self.ip.stack.push(element);
        Ok(())
    }

    /// Read one UTF-8 character from the input source.
    fn read_char(&mut self) -> Result<char, RuntimeError> {
        let mut buf = [0u8; 4];
        if self.input.read(&mut buf[..1])? == 0 {
            return Err(RuntimeError::InputExhausted);
        }
        let len = match buf[0] {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            _ => 4,
        };
        self.input.read_exact(&mut buf[1..len])?;
        let text = std::str::from_utf8(&buf[..len])
            .map_err(|_| RuntimeError::Io("invalid UTF-8 in input".to_string()))?;
        Ok(text.chars().next().expect("decoded a non-empty slice"))
    }
}

impl<R, W> fmt::Display for Engine<R, W> {
    /// The grid with the IP's cell marked `·`, as shown by `--check`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid.render(Some((self.ip.x, self.ip.y))))
    }
}

/// Floor division: the quotient rounds toward negative infinity.
pub(crate) fn floor_div(a: BigInt, b: &BigInt) -> BigInt {
    let q = &a / b;
    let r = a % b;
    if !r.is_zero() && r.is_negative() != b.is_negative() {
        q - 1
    } else {
        q
    }
}

/// `a mod m` with the result in `[0, m)`; `m` must be positive.
pub(crate) fn mod_floor(a: &BigInt, m: &BigInt) -> BigInt {
    let r = a % m;
    if r.is_negative() {
        r + m
    } else {
        r
    }
}
