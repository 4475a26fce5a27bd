//! Context-free grammars: rules, start symbols, samples.
//!
//! A [`Cfg`] is a passive container. No validation is performed: a rule
//! mentioning a symbol nothing derives simply never contributes to a
//! derivation. The [closure tables](closure/struct.Closure.html) the oracle
//! relies on are computed lazily, at most once, and attached to the grammar.
//!
//! [`Cfg`]: struct.Cfg.html (Cfg struct)

use std::cell::OnceCell;

use crate::common::*;

pub mod closure;
pub mod gen;
pub mod parse;

use self::closure::Closure;

/// Empty rule `lhs -> e`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct P0 {
    /// Left-hand side.
    pub lhs: Sym,
}

/// Unary rule `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct P1 {
    /// Left-hand side.
    pub lhs: Sym,
    /// Right-hand side, a non-terminal.
    pub rhs: Sym,
}

/// Binary rule `lhs -> rhs_1 rhs_2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct P2 {
    /// Left-hand side.
    pub lhs: Sym,
    /// First right-hand side non-terminal.
    pub rhs_1: Sym,
    /// Second right-hand side non-terminal.
    pub rhs_2: Sym,
}

/// Lexical rule `lhs -> rhs`, `rhs` is a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pl {
    /// Left-hand side.
    pub lhs: Sym,
    /// Terminal.
    pub rhs: Sym,
}

impl fmt::Display for P0 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} -> e", self.lhs)
    }
}
impl fmt::Display for P1 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} -> {}", self.lhs, self.rhs)
    }
}
impl fmt::Display for P2 {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} -> {},{}", self.lhs, self.rhs_1, self.rhs_2)
    }
}
impl fmt::Display for Pl {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} -> {}", self.lhs, self.rhs)
    }
}

/// A context-free grammar.
///
/// Rules are stored by kind, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Cfg {
    /// Empty rules.
    p0: Vec<P0>,
    /// Unary rules.
    p1: Vec<P1>,
    /// Binary rules.
    p2: Vec<P2>,
    /// Lexical rules.
    pl: Vec<Pl>,
    /// Start symbols.
    starts: BTreeSet<Sym>,
    /// Sample words.
    samples: Words,
    /// Nullability and chain tables, computed on demand.
    closure: OnceCell<Closure>,
}

impl Cfg {
    /// Empty grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty rules.
    pub fn p0(&self) -> &[P0] {
        &self.p0
    }
    /// Unary rules.
    pub fn p1(&self) -> &[P1] {
        &self.p1
    }
    /// Binary rules.
    pub fn p2(&self) -> &[P2] {
        &self.p2
    }
    /// Lexical rules.
    pub fn pl(&self) -> &[Pl] {
        &self.pl
    }
    /// Start symbols.
    pub fn starts(&self) -> &BTreeSet<Sym> {
        &self.starts
    }
    /// Samples.
    pub fn samples(&self) -> &[Word] {
        &self.samples
    }

    /// Adds an empty rule.
    pub fn add_p0<S: Into<Sym>>(&mut self, lhs: S) {
        self.closure.take();
        self.p0.push(P0 { lhs: lhs.into() })
    }
    /// Adds a unary rule.
    pub fn add_p1<S1: Into<Sym>, S2: Into<Sym>>(&mut self, lhs: S1, rhs: S2) {
        self.closure.take();
        self.p1.push(P1 {
            lhs: lhs.into(),
            rhs: rhs.into(),
        })
    }
    /// Adds a binary rule.
    pub fn add_p2<S1, S2, S3>(&mut self, lhs: S1, rhs_1: S2, rhs_2: S3)
    where
        S1: Into<Sym>,
        S2: Into<Sym>,
        S3: Into<Sym>,
    {
        self.closure.take();
        self.p2.push(P2 {
            lhs: lhs.into(),
            rhs_1: rhs_1.into(),
            rhs_2: rhs_2.into(),
        })
    }
    /// Adds a lexical rule.
    pub fn add_pl<S1: Into<Sym>, S2: Into<Sym>>(&mut self, lhs: S1, rhs: S2) {
        self.closure.take();
        self.pl.push(Pl {
            lhs: lhs.into(),
            rhs: rhs.into(),
        })
    }
    /// Adds a start symbol.
    pub fn add_start<S: Into<Sym>>(&mut self, start: S) -> bool {
        self.starts.insert(start.into())
    }
    /// Adds a sample.
    pub fn add_sample(&mut self, sample: Word) {
        self.samples.push(sample)
    }

    /// Nullability and chain tables of the grammar.
    ///
    /// Computed the first time it is called.
    pub fn closure(&self) -> &Closure {
        self.closure.get_or_init(|| Closure::new(self))
    }

    /// Terminal alphabet: right-hand sides of the lexical rules.
    pub fn sigma(&self) -> BTreeSet<Sym> {
        self.pl.iter().map(|pl| pl.rhs.clone()).collect()
    }

    /// Non-terminals: left-hand sides of all rules, right-hand sides of the
    /// unary and binary rules.
    pub fn non_terminals(&self) -> BTreeSet<&str> {
        let mut set = BTreeSet::new();
        for p0 in &self.p0 {
            set.insert(p0.lhs.as_str());
        }
        for p1 in &self.p1 {
            set.insert(p1.lhs.as_str());
            set.insert(p1.rhs.as_str());
        }
        for p2 in &self.p2 {
            set.insert(p2.lhs.as_str());
            set.insert(p2.rhs_1.as_str());
            set.insert(p2.rhs_2.as_str());
        }
        for pl in &self.pl {
            set.insert(pl.lhs.as_str());
        }
        set
    }

    /// Total number of rules.
    pub fn rule_count(&self) -> usize {
        self.p0.len() + self.p1.len() + self.p2.len() + self.pl.len()
    }

    /// True if the grammar has no rules.
    pub fn is_empty(&self) -> bool {
        self.rule_count() == 0
    }
}

impl fmt::Display for Cfg {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        writeln!(fmt, "grammar:")?;
        writeln!(fmt, "  start symbols:")?;
        for start in &self.starts {
            writeln!(fmt, "    {}", start)?
        }
        writeln!(fmt, "  P0 rules:")?;
        for rule in &self.p0 {
            writeln!(fmt, "    {}", rule)?
        }
        writeln!(fmt, "  P1 rules:")?;
        for rule in &self.p1 {
            writeln!(fmt, "    {}", rule)?
        }
        writeln!(fmt, "  P2 rules:")?;
        for rule in &self.p2 {
            writeln!(fmt, "    {}", rule)?
        }
        writeln!(fmt, "  PL rules:")?;
        for rule in &self.pl {
            writeln!(fmt, "    {}", rule)?
        }
        writeln!(fmt, "  samples:")?;
        for sample in &self.samples {
            writeln!(fmt, "    {}", word_str(sample))?
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ab() -> Cfg {
        let mut cfg = Cfg::new();
        cfg.add_p2("S", "A", "B");
        cfg.add_pl("S", "a");
        cfg.add_pl("A", "a");
        cfg.add_pl("B", "b");
        cfg.add_start("S");
        cfg.add_sample(word("a b"));
        cfg
    }

    #[test]
    fn sigma_and_non_terminals() {
        let cfg = ab();
        let sigma: Vec<_> = cfg.sigma().into_iter().collect();
        assert_eq!(sigma, vec!["a", "b"]);
        let nts: Vec<_> = cfg.non_terminals().into_iter().collect();
        assert_eq!(nts, vec!["A", "B", "S"]);
        assert_eq!(cfg.rule_count(), 4);
        assert!(!cfg.is_empty());
    }

    #[test]
    fn adding_rules_resets_closure() {
        let mut cfg = ab();
        assert!(!cfg.closure().is_nullable("B"));
        cfg.add_p0("B");
        assert!(cfg.closure().is_nullable("B"));
    }

    #[test]
    fn display() {
        let cfg = ab();
        let s = format!("{}", cfg);
        assert!(s.contains("S -> A,B"));
        assert!(s.contains("A -> a"));
        assert!(s.contains("a b"));
    }
}
