//! Collapses a contextual grammar to a plain grammar.
//!
//! Each distinct context set becomes a fresh non-terminal, numbered in order
//! of first appearance. Number `0` is reserved for the start symbol: every
//! rule whose left-hand side contains the empty context is duplicated with
//! the start symbol as left-hand side. The empty context set is named after
//! the start symbol.

use crate::cfgc::Cfgc;
use crate::common::*;
use crate::context::{ctx_set, CtxSet, RCtxSet};
use crate::grammar::Cfg;

/// Name of the `n`-th non-terminal of a collapsed grammar.
///
/// Contains a space so that it can never clash with a terminal.
pub fn nt_name(n: usize) -> Sym {
    format!("<ctx {}>", n)
}

/// Name of the start symbol of collapsed grammars.
pub fn start_name() -> Sym {
    nt_name(0)
}

/// Maps context sets to non-terminal names.
pub struct Namer {
    /// Names so far.
    names: HConMap<CtxSet, Sym>,
    /// Next fresh index.
    next: usize,
}

impl Namer {
    /// Constructor, index `0` is reserved for the empty context set.
    pub fn new() -> Self {
        let mut names: HConMap<CtxSet, Sym> = HConMap::new();
        let _ = names.insert(ctx_set(RCtxSet::new()), start_name());
        Namer { names, next: 1 }
    }

    /// Name of a context set, fresh if the set was never seen.
    pub fn name(&mut self, set: &CtxSet) -> Sym {
        if let Some(name) = self.names.get(set) {
            return name.clone();
        }
        let name = nt_name(self.next);
        self.next += 1;
        let _ = self.names.insert(set.clone(), name.clone());
        name
    }

    /// Number of context sets named, the empty one excluded.
    pub fn len(&self) -> usize {
        self.next - 1
    }
    /// True if no set was named besides the empty one.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name map.
    pub fn into_names(self) -> HConMap<CtxSet, Sym> {
        self.names
    }
}

impl Default for Namer {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapses a contextual grammar.
pub fn collapse(cfgc: &Cfgc) -> Cfg {
    collapse_with_names(cfgc).0
}

/// Collapses a contextual grammar, also returns the name of each context
/// set.
///
/// The result has a single start symbol and no samples.
pub fn collapse_with_names(cfgc: &Cfgc) -> (Cfg, HConMap<CtxSet, Sym>) {
    let mut namer = Namer::new();
    let mut cfg = Cfg::new();
    let start = start_name();
    cfg.add_start(start.clone());

    for rule in &cfgc.p0c {
        let lhs = namer.name(&rule.lhs);
        cfg.add_p0(lhs);
        if rule.lhs.has_empty() {
            cfg.add_p0(start.clone())
        }
    }
    for rule in &cfgc.p1c {
        let (lhs, rhs) = (namer.name(&rule.lhs), namer.name(&rule.rhs));
        cfg.add_p1(lhs, rhs.clone());
        if rule.lhs.has_empty() {
            cfg.add_p1(start.clone(), rhs)
        }
    }
    for rule in &cfgc.p2c {
        let (lhs, rhs_1, rhs_2) = (
            namer.name(&rule.lhs),
            namer.name(&rule.rhs_1),
            namer.name(&rule.rhs_2),
        );
        cfg.add_p2(lhs, rhs_1.clone(), rhs_2.clone());
        if rule.lhs.has_empty() {
            cfg.add_p2(start.clone(), rhs_1, rhs_2)
        }
    }
    for rule in &cfgc.plc {
        let lhs = namer.name(&rule.lhs);
        cfg.add_pl(lhs, rule.rhs.clone());
        if rule.lhs.has_empty() {
            cfg.add_pl(start.clone(), rule.rhs.clone())
        }
    }

    log! { @debug
        "collapsed {} rule(s) over {} context set(s) to {} rule(s)",
        cfgc.rule_count(), namer.len(), cfg.rule_count()
    }

    (cfg, namer.into_names())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cfgc::*;
    use crate::context::*;
    use crate::oracle::cyk::recognize;

    #[test]
    fn two_sets_two_names() {
        let set_1 = ctx_set_of(Some(Context::new(word("a"), vec![])));
        let set_2 = ctx_set_of(Some(Context::new(vec![], word("b"))));
        let mut cfgc = Cfgc::new();
        cfgc.plc.insert(Plc {
            lhs: set_1.clone(),
            rhs: "b".into(),
        });
        cfgc.p2c.insert(P2c {
            lhs: set_2.clone(),
            rhs_1: set_2.clone(),
            rhs_2: set_1.clone(),
        });
        cfgc.p0c.insert(P0c { lhs: set_2.clone() });

        let (cfg, names) = collapse_with_names(&cfgc);
        // Two sets plus the empty one.
        assert_eq!(names.len(), 3);
        let (name_1, name_2) = (names.get(&set_1).unwrap(), names.get(&set_2).unwrap());
        assert_ne!(name_1, name_2);
        assert_ne!(name_1, &start_name());
        assert_ne!(name_2, &start_name());

        // One rule per contextual rule, nothing contains the empty context.
        assert_eq!(cfg.rule_count(), 3);
        assert_eq!(cfg.p0()[0].lhs, *name_2);
        assert_eq!(cfg.p2()[0].lhs, *name_2);
        assert_eq!(cfg.p2()[0].rhs_1, *name_2);
        assert_eq!(cfg.p2()[0].rhs_2, *name_1);
        assert_eq!(cfg.pl()[0].lhs, *name_1);
        assert_eq!(cfg.pl()[0].rhs, "b");
        assert_eq!(cfg.starts().len(), 1);
        assert!(cfg.starts().contains(&start_name()));
    }

    #[test]
    fn empty_context_duplicates_to_start() {
        let top = top();
        let after_a = ctx_set_of(Some(Context::new(word("a"), vec![])));
        let before_b = ctx_set_of(Some(Context::new(vec![], word("b"))));
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
            lhs: top.clone(),
            rhs_1: before_b,
            rhs_2: after_a,
        });

        let cfg = collapse(&cfgc);
        // Three contextual rules, the binary one is duplicated.
        assert_eq!(cfg.rule_count(), 4);
        assert_eq!(cfg.p2().len(), 2);
        assert!(cfg.p2().iter().any(|rule| rule.lhs == start_name()));
        assert!(recognize(&word("a b"), &cfg));
        assert!(!recognize(&word("a"), &cfg));
        assert!(!recognize(&word("b a"), &cfg));
    }

    #[test]
    fn empty_set_is_the_start() {
        let mut namer = Namer::new();
        assert!(namer.is_empty());
        assert_eq!(namer.name(&ctx_set(RCtxSet::new())), start_name());
        assert!(namer.is_empty());
        let set = ctx_set_of(Some(Context::new(word("a"), vec![])));
        assert_eq!(namer.name(&set), nt_name(1));
        assert_eq!(namer.len(), 1);
        let names = namer.into_names();
        assert_eq!(
            names.get(&ctx_set(RCtxSet::new())),
            Some(&start_name())
        );
    }

    #[test]
    fn empty_grammar() {
        let cfg = collapse(&Cfgc::new());
        assert!(cfg.is_empty());
        assert_eq!(cfg.starts().len(), 1);
        assert!(!recognize(&word("a"), &cfg));
    }
}
