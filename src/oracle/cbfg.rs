//! Chart parser over contextual grammars.
//!
//! Cell `(i, j)` holds the contexts derived for `w[i..=j]`: the union of the
//! left-hand sides of the rules applied on that span. Lexical rules seed the
//! diagonal. A binary rule applies on a split when each of its right-hand
//! sides is included in the contexts of the corresponding sub-span. A word
//! is accepted when the empty context reaches the top cell.
//!
//! Only lexical and binary rules take part in the parse.

use crate::cfgc::Cfgc;
use crate::common::*;
use crate::context::{Context, RCtxSet};
use crate::oracle::{History, Oracle};

/// Upper-triangular chart of contexts, row-major.
pub struct CtxChart<'a> {
    /// Length of the word.
    len: usize,
    /// Cells, `(i, j)` is at `i * len + j`.
    cells: Vec<HashSet<&'a Context>>,
}

impl<'a> CtxChart<'a> {
    /// Cell `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> &HashSet<&'a Context> {
        &self.cells[i * self.len + j]
    }

    /// Fills the chart for a word.
    pub fn fill(w: &[Sym], cfgc: &'a Cfgc) -> Self {
        let len = w.len();
        let mut chart = CtxChart {
            len,
            cells: vec![HashSet::new(); len * len],
        };

        for (i, sym) in w.iter().enumerate() {
            let cell = &mut chart.cells[i * len + i];
            for rule in cfgc.plc.iter().filter(|rule| &rule.rhs == sym) {
                cell.extend(rule.lhs.iter())
            }
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
                    for rule in &cfgc.p2c {
                        if covers(left, &rule.rhs_1) && covers(right, &rule.rhs_2) {
                            cell.extend(rule.lhs.iter())
                        }
                    }
                }
                chart.cells[i * len + j] = cell
            }
        }

        chart
    }

    /// True if the top cell contains the empty context.
    pub fn accepts(&self) -> bool {
        if self.len == 0 {
            return false;
        }
        self.get(0, self.len - 1).contains(&Context::empty())
    }
}

/// True if every context of `set` is in `cell`.
fn covers(cell: &HashSet<&Context>, set: &RCtxSet) -> bool {
    set.iter().all(|ctx| cell.contains(ctx))
}

/// Tests `w ∈ L(cfgc)`, no memoization.
///
/// The empty word is never accepted.
pub fn recognize(w: &[Sym], cfgc: &Cfgc) -> bool {
    if w.is_empty() {
        return false;
    }
    CtxChart::fill(w, cfgc).accepts()
}

/// Membership oracle over a contextual grammar, with its own history.
pub struct Contextual<'a> {
    /// Contextual grammar.
    cfgc: &'a Cfgc,
    /// Answers so far.
    history: History,
}

impl<'a> Contextual<'a> {
    /// Constructor.
    pub fn new(cfgc: &'a Cfgc) -> Self {
        Contextual {
            cfgc,
            history: History::new(),
        }
    }
}

impl<'a> Oracle for Contextual<'a> {
    fn accepts(&mut self, w: &[Sym]) -> bool {
        if let Some(accepted) = self.history.get(w) {
            return accepted;
        }
        let accepted = recognize(w, self.cfgc);
        self.history.add(w.to_vec(), accepted);
        accepted
    }
    fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cfgc::{collapse, P2c, Plc};
    use crate::context::*;
    use crate::oracle::Membership;

    /// `{(e, e)} -> {(e, b)} {(a, e)}`, `{(e, b)} -> a`, `{(a, e)} -> b`.
    fn ab() -> Cfgc {
        let before_b = ctx_set_of(Some(Context::new(vec![], word("b"))));
        let after_a = ctx_set_of(Some(Context::new(word("a"), vec![])));
        let mut cfgc = Cfgc::new();
        cfgc.plc.insert(Plc {
            lhs: before_b.clone(),
            rhs: "a".into(),
        });
        cfgc.plc.insert(Plc {
            lhs: after_a.clone(),
            rhs: "b".into(),
        });
        cfgc.p2c.insert(P2c {
            lhs: top(),
            rhs_1: before_b,
            rhs_2: after_a,
        });
        cfgc
    }

    /// `ab` plus `{(e, e)} -> {(e, e)} {(e, e)}`: non-empty sequences of
    /// `a b`.
    fn ab_plus() -> Cfgc {
        let mut cfgc = ab();
        cfgc.p2c.insert(P2c {
            lhs: top(),
            rhs_1: top(),
            rhs_2: top(),
        });
        cfgc
    }

    fn verdicts<O: Oracle>(oracle: &mut O, words: &[&str]) -> Vec<bool> {
        words.iter().map(|w| oracle.accepts(&word(w))).collect()
    }

    static WORDS: &[&str] = &[
        "a", "b", "a b", "b a", "a a", "a b a b", "a b a", "a a b b", "a b a b a b",
    ];

    #[test]
    fn small_language() {
        let cfgc = ab();
        let mut oracle = Contextual::new(&cfgc);
        assert!(oracle.accepts(&word("a b")));
        assert!(!oracle.accepts(&word("a")));
        assert!(!oracle.accepts(&word("b a")));
        assert!(!oracle.accepts(&word("a b a b")));
        assert!(!oracle.accepts(&[]));
        assert!(oracle.accepts(&word("a b")));
        assert_eq!(oracle.history().hits(), 1);
        assert_eq!(oracle.history().len(), 4);
    }

    #[test]
    fn cells_are_unions() {
        // Both lexical rules on `a` contribute to the same cell.
        let mut cfgc = ab();
        let other = ctx_set_of(Some(Context::new(vec![], word("c"))));
        cfgc.plc.insert(Plc {
            lhs: other,
            rhs: "a".into(),
        });
        let w = word("a b");
        let chart = CtxChart::fill(&w, &cfgc);
        assert_eq!(chart.get(0, 0).len(), 2);
        assert_eq!(chart.get(1, 1).len(), 1);
        assert!(chart.get(0, 1).contains(&Context::empty()));
        assert!(chart.accepts())
    }

    #[test]
    fn collapse_preserves_membership() {
        for cfgc in vec![ab(), ab_plus()] {
            let cfg = collapse(&cfgc);
            let mut contextual = Contextual::new(&cfgc);
            let mut plain = Membership::new(&cfg);
            assert_eq!(
                verdicts(&mut contextual, WORDS),
                verdicts(&mut plain, WORDS),
                "{}",
                cfgc
            )
        }
        let cfgc = ab_plus();
        let mut oracle = Contextual::new(&cfgc);
        assert!(oracle.accepts(&word("a b a b a b")));
        assert!(!oracle.accepts(&word("a b a")));
    }
}
