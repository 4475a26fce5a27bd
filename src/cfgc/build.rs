//! Contextual grammar construction from a context set and a substring pool.
//!
//! Given a finite set of contexts `F`, a finite set of words `K` and a
//! membership oracle for the target language `L`, the candidate non-terminals
//! are the non-empty subsets of `F` of size at most `f`. A rule is kept iff
//! the oracle confirms it is compatible with `L` over `K`:
//!
//! - `C -> e` iff every context of `C` with the empty word plugged in is in
//!   `L`;
//! - `C -> a` iff every context of `C` with `a` plugged in is in `L`;
//! - `C -> C1 C2` iff `l u v r ∈ L` for every `(l, r)` in `C` and every `u`,
//!   `v` in the words of `K` accepted by every context of `C1`, respectively
//!   `C2`.
//!
//! Finally, every rule whose left-hand side contains the empty context gets
//! a unary rule from `{ (e, e) }` to it.

use crate::cfgc::{Cfgc, P0c, P1c, P2c, Plc};
use crate::common::*;
use crate::context::{self, Context, CtxSet, RCtxSet};
use crate::oracle::Oracle;

/// Builds the contextual grammar of `base` over `pool`.
///
/// - `sigma` is the terminal alphabet;
/// - `f` bounds the size of the candidate context sets;
/// - `cap` bounds the number of candidate context sets.
pub fn hf<O: Oracle>(
    base: &RCtxSet,
    pool: &[Word],
    sigma: &BTreeSet<Sym>,
    f: usize,
    cap: usize,
    oracle: &mut O,
) -> Res<Cfgc> {
    let candidates = context::powerset(base, f, cap)?;
    log! { @verb
        "building contextual grammar over {} context set(s), {} word(s)",
        candidates.len(), pool.len()
    }
    let mut builder = Builder::new(candidates, pool, sigma, oracle);
    builder.build();
    Ok(builder.into_cfgc())
}

/// Contextual grammar construction state.
pub struct Builder<'a, O: Oracle> {
    /// Candidate context sets.
    candidates: Vec<CtxSet>,
    /// Words of the pool accepted by each candidate, same indices.
    accepted: Vec<Vec<&'a [Sym]>>,
    /// Terminals.
    sigma: &'a BTreeSet<Sym>,
    /// Membership oracle of the target language.
    oracle: &'a mut O,
    /// Rules so far.
    cfgc: Cfgc,
}

impl<'a, O: Oracle> Builder<'a, O> {
    /// Constructor.
    ///
    /// Computes the words of the pool accepted by each candidate.
    pub fn new(
        candidates: Vec<CtxSet>,
        pool: &'a [Word],
        sigma: &'a BTreeSet<Sym>,
        oracle: &'a mut O,
    ) -> Self {
        let accepted = candidates
            .iter()
            .map(|set| accepted_words(set, pool, oracle))
            .collect();
        Builder {
            candidates,
            accepted,
            sigma,
            oracle,
            cfgc: Cfgc::new(),
        }
    }

    /// Builds all the rules.
    pub fn build(&mut self) {
        for idx in 0..self.candidates.len() {
            self.new_p0c(idx);
            self.new_p2c(idx);
            self.new_plc(idx)
        }
        self.new_p1c()
    }

    /// Contextual grammar built so far.
    pub fn into_cfgc(self) -> Cfgc {
        self.cfgc
    }

    /// Empty rule for a candidate, if compatible with the target.
    fn new_p0c(&mut self, idx: usize) {
        let set = &self.candidates[idx];
        let oracle = &mut self.oracle;
        if set.iter().all(|ctx| oracle.accepts(&ctx.plug(&[]))) {
            self.cfgc.p0c.insert(P0c { lhs: set.clone() });
        }
    }

    /// Binary rules with a given left-hand side.
    fn new_p2c(&mut self, idx: usize) {
        let lhs = &self.candidates[idx];
        for (idx_1, rhs_1) in self.candidates.iter().enumerate() {
            for (idx_2, rhs_2) in self.candidates.iter().enumerate() {
                let (words_1, words_2) = (&self.accepted[idx_1], &self.accepted[idx_2]);
                let oracle: &mut O = &mut *self.oracle;
                if lhs
                    .iter()
                    .all(|ctx| binary_ok(ctx, words_1, words_2, oracle))
                {
                    self.cfgc.p2c.insert(P2c {
                        lhs: lhs.clone(),
                        rhs_1: rhs_1.clone(),
                        rhs_2: rhs_2.clone(),
                    });
                }
            }
        }
    }

    /// Lexical rules with a given left-hand side.
    fn new_plc(&mut self, idx: usize) {
        let set = &self.candidates[idx];
        for terminal in self.sigma.iter() {
            let oracle = &mut self.oracle;
            let sym = std::slice::from_ref(terminal);
            if set.iter().all(|ctx| oracle.accepts(&ctx.plug(sym))) {
                self.cfgc.plc.insert(Plc {
                    lhs: set.clone(),
                    rhs: terminal.clone(),
                });
            }
        }
    }

    /// Unary rules from `{ (e, e) }` to the left-hand sides containing the
    /// empty context.
    fn new_p1c(&mut self) {
        let top = context::top();
        let mut lhss: Vec<CtxSet> = vec![];
        for rule in &self.cfgc.p0c {
            lhss.push(rule.lhs.clone())
        }
        for rule in &self.cfgc.p2c {
            lhss.push(rule.lhs.clone())
        }
        for rule in &self.cfgc.plc {
            lhss.push(rule.lhs.clone())
        }
        for lhs in lhss {
            if lhs.has_empty() {
                self.cfgc.p1c.insert(P1c {
                    lhs: top.clone(),
                    rhs: lhs,
                });
            }
        }
    }
}

/// Words of the pool accepted by every context of a set.
fn accepted_words<'a, O: Oracle>(
    set: &CtxSet,
    pool: &'a [Word],
    oracle: &mut O,
) -> Vec<&'a [Sym]> {
    pool.iter()
        .filter(|w| set.iter().all(|ctx| oracle.accepts(&ctx.plug(w))))
        .map(|w| w.as_slice())
        .collect()
}

/// True if `lhs -> rhs_1 rhs_2` is compatible with the target for a single
/// context.
pub fn binary_ok<O: Oracle>(
    ctx: &Context,
    words_1: &[&[Sym]],
    words_2: &[&[Sym]],
    oracle: &mut O,
) -> bool {
    words_1
        .iter()
        .all(|u| words_2.iter().all(|v| oracle.accepts(&ctx.plug_2(u, v))))
}
