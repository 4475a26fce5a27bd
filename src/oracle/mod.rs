//! Membership oracles.
//!
//! An oracle answers `w ∈ L(G)` for a fixed grammar `G`. Answers are
//! memoized in a [`History`] keyed by the symbol sequence, so asking the same
//! question twice costs one lookup.
//!
//! [`Membership`] parses plain grammars with [`cyk`], [`cbfg::Contextual`]
//! parses contextual grammars directly.
//!
//! [`History`]: struct.History.html (History struct)
//! [`Membership`]: struct.Membership.html (Membership struct)
//! [`cyk`]: cyk/index.html (cyk module)
//! [`cbfg::Contextual`]: cbfg/struct.Contextual.html (Contextual struct)

use crate::common::*;
use crate::grammar::Cfg;

pub mod cbfg;
pub mod cyk;

/// Memoization table for membership queries.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Answers so far.
    answers: HashMap<Word, bool>,
    /// Number of queries answered from the table.
    hits: usize,
    /// Number of queries that ran the parser.
    misses: usize,
}

impl History {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded answer for a word, if any.
    ///
    /// Counts as a hit when there is one.
    pub fn get(&mut self, w: &[Sym]) -> Option<bool> {
        let res = self.answers.get(w).cloned();
        if res.is_some() {
            self.hits += 1
        }
        res
    }

    /// Records an answer.
    pub fn add(&mut self, w: Word, accepted: bool) {
        self.misses += 1;
        let _ = self.answers.insert(w, accepted);
    }

    /// Number of distinct words queried.
    pub fn len(&self) -> usize {
        self.answers.len()
    }
    /// True if no word was queried.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
    /// Number of cached answers served.
    pub fn hits(&self) -> usize {
        self.hits
    }
    /// Number of answers computed.
    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Answers membership queries.
pub trait Oracle {
    /// True if the word is in the language.
    fn accepts(&mut self, w: &[Sym]) -> bool;
    /// Query history.
    fn history(&self) -> &History;
}

/// Tests `w ∈ L(cfg)`, memoized in `history`.
///
/// The empty word is never accepted.
pub fn accepts(w: &[Sym], cfg: &Cfg, history: &mut History) -> bool {
    if let Some(accepted) = history.get(w) {
        return accepted;
    }
    let accepted = cyk::recognize(w, cfg);
    history.add(w.to_vec(), accepted);
    accepted
}

/// Membership oracle over some grammar, with its own history.
pub struct Membership<'a> {
    /// Grammar.
    cfg: &'a Cfg,
    /// Answers so far.
    history: History,
}

impl<'a> Membership<'a> {
    /// Constructor.
    pub fn new(cfg: &'a Cfg) -> Self {
        Membership {
            cfg,
            history: History::new(),
        }
    }

    /// Grammar of the oracle.
    pub fn cfg(&self) -> &'a Cfg {
        self.cfg
    }
}

impl<'a> Oracle for Membership<'a> {
    fn accepts(&mut self, w: &[Sym]) -> bool {
        accepts(w, self.cfg, &mut self.history)
    }
    fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// `S -> A B | a`, `A -> a`, `B -> b`.
    fn ab() -> Cfg {
        let mut cfg = Cfg::new();
        cfg.add_p2("S", "A", "B");
        cfg.add_pl("S", "a");
        cfg.add_pl("A", "a");
        cfg.add_pl("B", "b");
        cfg.add_start("S");
        cfg
    }

    #[test]
    fn small_language() {
        let cfg = ab();
        let mut oracle = Membership::new(&cfg);
        assert!(oracle.accepts(&word("a")));
        assert!(oracle.accepts(&word("a b")));
        assert!(!oracle.accepts(&word("b")));
        assert!(!oracle.accepts(&word("a a")));
        assert!(!oracle.accepts(&word("b a")));
        assert!(!oracle.accepts(&word("a b b")));
        assert!(!oracle.accepts(&[]));
    }

    #[test]
    fn memoized_answers_are_stable() {
        let cfg = ab();
        let mut oracle = Membership::new(&cfg);
        let w = word("a b");
        let first = oracle.accepts(&w);
        assert_eq!(oracle.history().misses(), 1);
        assert_eq!(oracle.history().hits(), 0);
        let second = oracle.accepts(&w);
        assert_eq!(first, second);
        assert_eq!(oracle.history().misses(), 1);
        assert_eq!(oracle.history().hits(), 1);
        assert_eq!(oracle.history().len(), 1);
    }

    #[test]
    fn symbol_boundaries_matter() {
        // `ab` and `a b` concatenate to the same string but are different
        // words.
        let mut cfg = Cfg::new();
        cfg.add_pl("S", "ab");
        cfg.add_start("S");
        let mut history = History::new();
        assert!(accepts(&word("ab"), &cfg, &mut history));
        assert!(!accepts(&word("a b"), &cfg, &mut history));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn independent_histories() {
        let cfg = ab();
        let mut oracle_1 = Membership::new(&cfg);
        let mut oracle_2 = Membership::new(&cfg);
        oracle_1.accepts(&word("a"));
        oracle_1.accepts(&word("b"));
        oracle_2.accepts(&word("a"));
        assert_eq!(oracle_1.history().len(), 2);
        assert_eq!(oracle_2.history().len(), 1);
    }
}
