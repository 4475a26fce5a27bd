//! Chart parser.
//!
//! Cell `(i, j)` of the chart holds the non-terminals deriving `w[i..=j]`.
//! Unary and empty rules are not applied directly: every time a non-terminal
//! `A` lands in a cell, all of `chains(A)` land there too. The diagonal is
//! `chains(w[i])`.

use crate::common::*;
use crate::grammar::{closure::Closure, Cfg};

/// Upper-triangular chart, row-major.
pub struct Chart<'a> {
    /// Length of the word.
    len: usize,
    /// Cells, `(i, j)` is at `i * len + j`.
    cells: Vec<HashSet<&'a str>>,
}

impl<'a> Chart<'a> {
    /// Empty chart for a word of length `len`.
    pub fn new(len: usize) -> Self {
        Chart {
            len,
            cells: vec![HashSet::new(); len * len],
        }
    }

    /// Cell `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> &HashSet<&'a str> {
        &self.cells[i * self.len + j]
    }

    /// Fills the chart for a word.
    pub fn fill(w: &[Sym], cfg: &'a Cfg) -> Self {
        let closure = cfg.closure();
        let len = w.len();
        let mut chart = Chart::new(len);

        for (i, sym) in w.iter().enumerate() {
            let mut cell = HashSet::new();
            add_chains(&mut cell, sym, closure);
            chart.cells[i * len + i] = cell
        }

        for span in 1..len {
            for i in 0..(len - span) {
                let j = i + span;
                let mut cell = HashSet::new();
                for split in i..j {
                    let (left, right) = (chart.get(i, split), chart.get(split + 1, j));
                    if left.is_empty() || right.is_empty() {
                        continue;
                    }
                    for p2 in cfg.p2() {
                        if left.contains(p2.rhs_1.as_str()) && right.contains(p2.rhs_2.as_str()) {
                            add_chains(&mut cell, &p2.lhs, closure)
                        }
                    }
                }
                chart.cells[i * len + j] = cell
            }
        }

        chart
    }

    /// True if the top cell contains a start symbol.
    pub fn accepts(&self, starts: &BTreeSet<Sym>) -> bool {
        if self.len == 0 {
            return false;
        }
        let top = self.get(0, self.len - 1);
        starts.iter().any(|start| top.contains(start.as_str()))
    }
}

/// Adds everything `sym` chains to a cell.
fn add_chains<'a>(cell: &mut HashSet<&'a str>, sym: &str, closure: &'a Closure) {
    if let Some(chains) = closure.chains_of(sym) {
        cell.extend(chains.iter().map(|s| s.as_str()))
    }
}

/// Tests `w ∈ L(cfg)`, no memoization.
///
/// The empty word is never accepted.
pub fn recognize(w: &[Sym], cfg: &Cfg) -> bool {
    if w.is_empty() {
        return false;
    }
    Chart::fill(w, cfg).accepts(cfg.starts())
}
