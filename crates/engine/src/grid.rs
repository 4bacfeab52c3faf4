//! The grid Foldy operates on.
//!
//! A program loads as a single row of instruction tokens and only ever
//! grows, one row or column at a time, as `fold` pushes cells past an
//! edge. Rows are always exactly `width` long and there is always at least
//! one row and one column.

use std::collections::BTreeSet;

use crate::error::LoadError;
use crate::instruction::Instruction;
use crate::ip::Ip;

/// A mutable 2D buffer of instruction cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Instruction>>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Decode program text into a one-row grid.
    ///
    /// Empty text is normalized to a single space. Characters outside the
    /// Foldy alphabet are all collected, deduplicated, sorted, and reported
    /// in one error.
    pub fn parse(code: &str) -> Result<Self, LoadError> {
        let code = if code.is_empty() { " " } else { code };

        let unknown: BTreeSet<char> = code
            .chars()
            .filter(|&c| Instruction::decode(c).is_none())
            .collect();
        if !unknown.is_empty() {
            return Err(LoadError::UnknownCharacters {
                chars: unknown.into_iter().collect(),
            });
        }

        let row: Vec<Instruction> = code
            .chars()
            .map(|c| Instruction::decode(c).expect("unknown characters rejected above"))
            .collect();
        let width = row.len();
        Ok(Self {
            rows: vec![row],
            width,
            height: 1,
        })
    }

    /// Current width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Current height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell at `(x, y)`, or `None` when either coordinate is out of
    /// bounds. Out-of-bounds reads are routine: `fold` probes past the
    /// edge to decide when to stop.
    pub fn get(&self, x: i64, y: i64) -> Option<Instruction> {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            Some(self.rows[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Fold the code at the IP's position, 90° clockwise or
    /// counter-clockwise.
    ///
    /// Two cursors march in lockstep from the IP: `old` along the pre-turn
    /// facing, `new` along the post-turn facing. Each step lifts the cell
    /// at `old`, clears it, and lays it down at `new`, growing the grid by
    /// one row or column whenever `new` crosses an edge. Growing at the
    /// top or left shifts every coordinate on that axis, including the
    /// IP's own. The walk ends when `old` leaves the grid. The turn itself
    /// is a permanent side effect on the IP.
    pub fn fold(&mut self, ip: &mut Ip, clockwise: bool) {
        let old_dir = ip.direction.delta();
        ip.turn(clockwise);
        let new_dir = ip.direction.delta();

        let (mut old_x, mut old_y) = (ip.x as i64, ip.y as i64);
        let (mut new_x, mut new_y) = (ip.x as i64, ip.y as i64);
        loop {
            old_x += old_dir.0;
            old_y += old_dir.1;
            new_x += new_dir.0;
            new_y += new_dir.1;
            let Some(cell) = self.get(old_x, old_y) else {
                break;
            };
            self.rows[old_y as usize][old_x as usize] = Instruction::Nop;

            if new_y < 0 {
                self.grow_top();
                ip.y += 1;
                old_y += 1;
                new_y += 1;
            } else if new_y >= self.height as i64 {
                self.grow_bottom();
            }
            if new_x < 0 {
                self.grow_left();
                ip.x += 1;
                old_x += 1;
                new_x += 1;
            } else if new_x >= self.width as i64 {
                self.grow_right();
            }

            self.rows[new_y as usize][new_x as usize] = cell;
        }
    }

    /// Render the grid as text, one line per row, cells separated by
    /// spaces. When `mark` is given, that cell renders as `·` instead of
    /// its glyph.
    pub fn render(&self, mark: Option<(usize, usize)>) -> String {
        let mut lines = Vec::with_capacity(self.height);
        for (y, row) in self.rows.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    if mark == Some((x, y)) {
                        '\u{00B7}'.to_string()
                    } else {
                        cell.glyph().to_string()
                    }
                })
                .collect();
            lines.push(line.join(" "));
        }
        lines.join("\n")
    }

    fn grow_top(&mut self) {
        self.rows.insert(0, vec![Instruction::Nop; self.width]);
        self.height += 1;
    }

    fn grow_bottom(&mut self) {
        self.rows.push(vec![Instruction::Nop; self.width]);
        self.height += 1;
    }

    fn grow_left(&mut self) {
        for row in &mut self.rows {
            row.insert(0, Instruction::Nop);
        }
        self.width += 1;
    }

    fn grow_right(&mut self) {
        for row in &mut self.rows {
            row.push(Instruction::Nop);
        }
        self.width += 1;
    }
}
