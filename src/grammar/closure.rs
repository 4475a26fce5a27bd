//! Nullability and unary-chain tables.
//!
//! The oracle's chart parser never sees empty or unary rules directly. It
//! relies on two tables instead:
//!
//! - `nullable`, the non-terminals deriving the empty word;
//! - `chains`, mapping each symbol `x` to the set of non-terminals `A` such
//!   that `A =>* x` using lexical rules, unary rules and binary rules with a
//!   nullable sibling. The relation is reflexive on non-terminals.

use crate::common::*;
use crate::grammar::Cfg;

/// Nullability and chain tables of a grammar.
#[derive(Debug, Clone)]
pub struct Closure {
    /// Maps non-terminals to their nullability.
    nullable: HashMap<Sym, bool>,
    /// Maps `x` to the `A`s such that `A =>* x`.
    chains: HashMap<Sym, HashSet<Sym>>,
}

impl Closure {
    /// Computes the tables of a grammar.
    pub fn new(cfg: &Cfg) -> Self {
        let nullable = nullable(cfg);
        let chains = chains(cfg, &nullable);
        Closure { nullable, chains }
    }

    /// True if a symbol derives the empty word.
    ///
    /// False for unknown symbols.
    pub fn is_nullable(&self, sym: &str) -> bool {
        self.nullable.get(sym).cloned().unwrap_or(false)
    }

    /// Non-terminals deriving `sym` in zero or more unary steps.
    ///
    /// For a terminal, the non-terminals deriving it through a lexical rule
    /// and unary steps.
    pub fn chains_of(&self, sym: &str) -> Option<&HashSet<Sym>> {
        self.chains.get(sym)
    }
}

/// Computes the nullability table of a grammar.
///
/// Every non-terminal appearing in the grammar has an entry. The left-hand
/// sides of empty rules are nullable. A unary rule's left-hand side is
/// nullable if its right-hand side is, a binary rule's left-hand side is
/// nullable if both right-hand sides are. Worklist-based, each symbol is
/// marked at most once.
pub fn nullable(cfg: &Cfg) -> HashMap<Sym, bool> {
    let mut nullable: HashMap<Sym, bool> = HashMap::new();
    // Maps right-hand sides of unary rules to their left-hand sides.
    let mut in_p1: HashMap<&str, Vec<&str>> = HashMap::new();
    // Maps right-hand sides of binary rules to their left-hand side and
    // sibling.
    let mut in_p2: HashMap<&str, Vec<(&str, &str)>> = HashMap::new();

    for p1 in cfg.p1() {
        nullable.entry(p1.lhs.clone()).or_insert(false);
        nullable.entry(p1.rhs.clone()).or_insert(false);
        in_p1.entry(&p1.rhs).or_default().push(&p1.lhs)
    }
    for p2 in cfg.p2() {
        nullable.entry(p2.lhs.clone()).or_insert(false);
        nullable.entry(p2.rhs_1.clone()).or_insert(false);
        nullable.entry(p2.rhs_2.clone()).or_insert(false);
        in_p2
            .entry(&p2.rhs_1)
            .or_default()
            .push((&p2.lhs, &p2.rhs_2));
        in_p2
            .entry(&p2.rhs_2)
            .or_default()
            .push((&p2.lhs, &p2.rhs_1))
    }
    for pl in cfg.pl() {
        nullable.entry(pl.lhs.clone()).or_insert(false);
    }

    let mut todo: Vec<&str> = Vec::with_capacity(cfg.p0().len());
    for p0 in cfg.p0() {
        let prev = nullable.insert(p0.lhs.clone(), true);
        if prev != Some(true) {
            todo.push(&p0.lhs)
        }
    }

    while let Some(sym) = todo.pop() {
        if let Some(lhss) = in_p1.get(sym) {
            for lhs in lhss {
                if mark(&mut nullable, lhs) {
                    todo.push(lhs)
                }
            }
        }
        if let Some(pairs) = in_p2.get(sym) {
            for (lhs, sibling) in pairs {
                if nullable.get(*sibling).cloned().unwrap_or(false) && mark(&mut nullable, lhs) {
                    todo.push(lhs)
                }
            }
        }
    }

    nullable
}

/// Marks a symbol nullable, returns `true` if it was not already.
fn mark(nullable: &mut HashMap<Sym, bool>, sym: &str) -> bool {
    match nullable.get_mut(sym) {
        Some(is_nullable) if !*is_nullable => {
            *is_nullable = true;
            true
        }
        Some(_) => false,
        None => {
            nullable.insert(sym.to_string(), true);
            true
        }
    }
}

/// Computes the chain table of a grammar given its nullability table.
///
/// Seeds `chains[B] = { B }` for every non-terminal `B`, adds `A` to
/// `chains[a]` for each lexical rule `A -> a`, to `chains[B]` for each unary
/// rule `A -> B` and for each binary rule `A -> B C` or `A -> C B` with `C`
/// nullable. Then closes the relation transitively.
pub fn chains(cfg: &Cfg, nullable: &HashMap<Sym, bool>) -> HashMap<Sym, HashSet<Sym>> {
    let mut chains: HashMap<Sym, HashSet<Sym>> = HashMap::new();
    for sym in cfg.non_terminals() {
        let mut set = HashSet::new();
        set.insert(sym.to_string());
        chains.insert(sym.to_string(), set);
    }
    let is_nullable = |sym: &str| nullable.get(sym).cloned().unwrap_or(false);

    for pl in cfg.pl() {
        chains
            .entry(pl.rhs.clone())
            .or_default()
            .insert(pl.lhs.clone());
    }
    for p1 in cfg.p1() {
        chains
            .entry(p1.rhs.clone())
            .or_default()
            .insert(p1.lhs.clone());
    }
    for p2 in cfg.p2() {
        if is_nullable(&p2.rhs_2) {
            chains
                .entry(p2.rhs_1.clone())
                .or_default()
                .insert(p2.lhs.clone());
        }
        if is_nullable(&p2.rhs_1) {
            chains
                .entry(p2.rhs_2.clone())
                .or_default()
                .insert(p2.lhs.clone());
        }
    }

    // Transitive closure, pivot in the outer loop.
    let syms: Vec<Sym> = chains.keys().cloned().collect();
    for pivot in &syms {
        let via_pivot = match chains.get(pivot) {
            Some(set) => set.clone(),
            None => continue,
        };
        for sym in &syms {
            if sym == pivot {
                continue;
            }
            if let Some(set) = chains.get_mut(sym) {
                if set.contains(pivot) {
                    set.extend(via_pivot.iter().cloned())
                }
            }
        }
    }

    chains
}
