//! Contextual grammars: rules over context sets.
//!
//! A contextual grammar has the same four rule kinds as a [`Cfg`], but its
//! non-terminals are hash-consed context sets. It is built by
//! [`build::hf`][hf] and turned into a plain grammar by
//! [`collapse::collapse`][collapse].
//!
//! [`Cfg`]: ../grammar/struct.Cfg.html (Cfg struct)
//! [hf]: build/fn.hf.html (hf function)
//! [collapse]: collapse/fn.collapse.html (collapse function)

use std::hash::Hash;

use crate::common::*;
use crate::context::CtxSet;

pub mod build;
pub mod collapse;

pub use self::build::hf;
pub use self::collapse::collapse;

/// Empty rule `lhs -> e`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct P0c {
    /// Left-hand side.
    pub lhs: CtxSet,
}

/// Unary rule `lhs -> rhs`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct P1c {
    /// Left-hand side.
    pub lhs: CtxSet,
    /// Right-hand side.
    pub rhs: CtxSet,
}

/// Binary rule `lhs -> rhs_1 rhs_2`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct P2c {
    /// Left-hand side.
    pub lhs: CtxSet,
    /// First right-hand side.
    pub rhs_1: CtxSet,
    /// Second right-hand side.
    pub rhs_2: CtxSet,
}

/// Lexical rule `lhs -> rhs`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Plc {
    /// Left-hand side.
    pub lhs: CtxSet,
    /// Terminal.
    pub rhs: Sym,
}

impl fmt::Display for P0c {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} -> e", *self.lhs)
    }
}
impl fmt::Display for P1c {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} -> {}", *self.lhs, *self.rhs)
    }
}
impl fmt::Display for P2c {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} -> {} {}", *self.lhs, *self.rhs_1, *self.rhs_2)
    }
}
impl fmt::Display for Plc {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} -> {}", *self.lhs, self.rhs)
    }
}

/// Set of rules remembering insertion order.
#[derive(Clone)]
pub struct RuleSet<R> {
    /// Rules in insertion order.
    rules: Vec<R>,
    /// Rules, for membership.
    known: HashSet<R>,
}

impl<R: Clone + Hash + Eq> RuleSet<R> {
    /// Empty set.
    pub fn new() -> Self {
        RuleSet {
            rules: vec![],
            known: HashSet::new(),
        }
    }

    /// Inserts a rule, returns `false` if it was already there.
    pub fn insert(&mut self, rule: R) -> bool {
        if self.known.insert(rule.clone()) {
            self.rules.push(rule);
            true
        } else {
            false
        }
    }

    /// True if the rule is in the set.
    pub fn contains(&self, rule: &R) -> bool {
        self.known.contains(rule)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }
    /// True if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterator over the rules, in insertion order.
    pub fn iter(&self) -> std::slice::Iter<R> {
        self.rules.iter()
    }
}

impl<R: Clone + Hash + Eq> Default for RuleSet<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R> IntoIterator for &'a RuleSet<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;
    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// A contextual grammar.
#[derive(Clone, Default)]
pub struct Cfgc {
    /// Empty rules.
    pub p0c: RuleSet<P0c>,
    /// Unary rules.
    pub p1c: RuleSet<P1c>,
    /// Binary rules.
    pub p2c: RuleSet<P2c>,
    /// Lexical rules.
    pub plc: RuleSet<Plc>,
}

impl Cfgc {
    /// Empty contextual grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rules.
    pub fn rule_count(&self) -> usize {
        self.p0c.len() + self.p1c.len() + self.p2c.len() + self.plc.len()
    }

    /// True if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }

    /// Context sets appearing in the rules, in order of first appearance.
    ///
    /// Rules are scanned kind by kind: empty, unary, binary, lexical.
    pub fn context_sets(&self) -> Vec<CtxSet> {
        let mut known: HConSet<CtxSet> = HConSet::new();
        let mut res = vec![];
        let mut add = |set: &CtxSet| {
            if known.insert(set.clone()) {
                res.push(set.clone())
            }
        };
        for rule in &self.p0c {
            add(&rule.lhs)
        }
        for rule in &self.p1c {
            add(&rule.lhs);
            add(&rule.rhs)
        }
        for rule in &self.p2c {
            add(&rule.lhs);
            add(&rule.rhs_1);
            add(&rule.rhs_2)
        }
        for rule in &self.plc {
            add(&rule.lhs)
        }
        res
    }

    /// Writes the number of rules of each kind.
    pub fn write_counts<W: Write>(&self, w: &mut W) -> ::std::io::Result<()> {
        writeln!(w, "P0C rules: {}", self.p0c.len())?;
        writeln!(w, "P1C rules: {}", self.p1c.len())?;
        writeln!(w, "P2C rules: {}", self.p2c.len())?;
        writeln!(w, "PLC rules: {}", self.plc.len())?;
        Ok(())
    }
}

impl fmt::Display for Cfgc {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        writeln!(fmt, "contextual grammar:")?;
        writeln!(fmt, "  P0C rules:")?;
        for rule in &self.p0c {
            writeln!(fmt, "    {}", rule)?
        }
        writeln!(fmt, "  P1C rules:")?;
        for rule in &self.p1c {
            writeln!(fmt, "    {}", rule)?
        }
        writeln!(fmt, "  P2C rules:")?;
        for rule in &self.p2c {
            writeln!(fmt, "    {}", rule)?
        }
        writeln!(fmt, "  PLC rules:")?;
        for rule in &self.plc {
            writeln!(fmt, "    {}", rule)?
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::*;

    #[test]
    fn rule_sets_keep_order_and_dedup() {
        let set_1 = ctx_set_of(Some(Context::new(word("a"), vec![])));
        let set_2 = ctx_set_of(Some(Context::new(vec![], word("b"))));
        let mut cfgc = Cfgc::new();
        assert!(cfgc.plc.insert(Plc {
            lhs: set_2.clone(),
            rhs: "b".into(),
        }));
        assert!(cfgc.plc.insert(Plc {
            lhs: set_1.clone(),
            rhs: "a".into(),
        }));
        assert!(!cfgc.plc.insert(Plc {
            lhs: set_2.clone(),
            rhs: "b".into(),
        }));
        assert_eq!(cfgc.plc.len(), 2);
        assert_eq!(cfgc.rule_count(), 2);
        let terminals: Vec<_> = cfgc.plc.iter().map(|rule| rule.rhs.as_str()).collect();
        assert_eq!(terminals, vec!["b", "a"]);

        let sets = cfgc.context_sets();
        assert_eq!(sets.len(), 2);
        assert!(sets[0] == set_2);
        assert!(sets[1] == set_1);

        let mut counts = vec![];
        cfgc.write_counts(&mut counts).unwrap();
        let counts = String::from_utf8(counts).unwrap();
        assert!(counts.contains("PLC rules: 2"));
        assert!(counts.contains("P2C rules: 0"));
    }
}
