//! Random sample generation.
//!
//! Derives random words from the start symbols of a grammar. Rules are
//! chosen uniformly among the ones of the symbol being expanded. Derivations
//! deeper than a bound are abandoned and retried.

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::common::*;
use crate::grammar::Cfg;

/// Number of derivations attempted per sample.
const MAX_TRIES: usize = 100;

/// Right-hand side of a rule.
#[derive(Debug, Clone, Copy)]
enum Expansion<'a> {
    /// Empty rule.
    Empty,
    /// Unary rule.
    Unary(&'a str),
    /// Binary rule.
    Binary(&'a str, &'a str),
    /// Lexical rule.
    Lexical(&'a str),
}

/// Random word generator.
pub struct Generator<'a> {
    /// Start symbols, ordered.
    starts: Vec<&'a str>,
    /// Maps non-terminals to their expansions.
    expansions: HashMap<&'a str, Vec<Expansion<'a>>>,
    /// Maximal derivation depth.
    depth: usize,
    /// Random generator.
    rng: XorShiftRng,
}

impl<'a> Generator<'a> {
    /// Constructor.
    pub fn new(cfg: &'a Cfg, seed: u64, depth: usize) -> Self {
        let mut expansions: HashMap<&'a str, Vec<Expansion<'a>>> = HashMap::new();
        for p0 in cfg.p0() {
            expansions
                .entry(&p0.lhs)
                .or_default()
                .push(Expansion::Empty)
        }
        for p1 in cfg.p1() {
            expansions
                .entry(&p1.lhs)
                .or_default()
                .push(Expansion::Unary(&p1.rhs))
        }
        for p2 in cfg.p2() {
            expansions
                .entry(&p2.lhs)
                .or_default()
                .push(Expansion::Binary(&p2.rhs_1, &p2.rhs_2))
        }
        for pl in cfg.pl() {
            expansions
                .entry(&pl.lhs)
                .or_default()
                .push(Expansion::Lexical(&pl.rhs))
        }
        Generator {
            starts: cfg.starts().iter().map(|s| s.as_str()).collect(),
            expansions,
            depth,
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }

    /// Derives a word from `sym`, appends it to `w`.
    ///
    /// Returns `false` if the derivation got too deep or reached a symbol
    /// with no expansion.
    fn derive(&mut self, sym: &'a str, depth: usize, w: &mut Word) -> bool {
        if depth == 0 {
            return false;
        }
        let expansion = match self.expansions.get(sym) {
            Some(expansions) if !expansions.is_empty() => {
                expansions[self.rng.gen_range(0..expansions.len())]
            }
            _ => return false,
        };
        match expansion {
            Expansion::Empty => true,
            Expansion::Unary(rhs) => self.derive(rhs, depth - 1, w),
            Expansion::Binary(rhs_1, rhs_2) => {
                self.derive(rhs_1, depth - 1, w) && self.derive(rhs_2, depth - 1, w)
            }
            Expansion::Lexical(terminal) => {
                w.push(terminal.to_string());
                true
            }
        }
    }

    /// Generates a non-empty word, if any derivation succeeds.
    pub fn sample(&mut self) -> Option<Word> {
        if self.starts.is_empty() {
            return None;
        }
        for _ in 0..MAX_TRIES {
            let start = self.starts[self.rng.gen_range(0..self.starts.len())];
            let mut w = vec![];
            if self.derive(start, self.depth, &mut w) && !w.is_empty() {
                return Some(w);
            }
        }
        None
    }

    /// Generates at most `count` words.
    ///
    /// Stops early if no derivation succeeds for some sample.
    pub fn samples(&mut self, count: usize) -> Words {
        let mut res = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(w) = self.sample() {
                res.push(w)
            } else {
                log! { @info "could not generate a sample, stopping" }
                break;
            }
        }
        res
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::oracle::cyk::recognize;

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
    fn generated_words_are_in_the_language() {
        // S -> S S | L R | L N R, N -> e, L -> l, R -> r.
        let mut cfg = Cfg::new();
        cfg.add_p2("S", "S", "S");
        cfg.add_p2("S", "L", "R");
        cfg.add_p2("S", "L", "M");
        cfg.add_p2("M", "N", "R");
        cfg.add_p0("N");
        cfg.add_pl("L", "l");
        cfg.add_pl("R", "r");
        cfg.add_start("S");
        let mut gen = Generator::new(&cfg, 7, 10);
        let samples = gen.samples(20);
        assert!(!samples.is_empty());
        for sample in &samples {
            assert!(recognize(sample, &cfg), "`{}`", word_str(sample))
        }
    }

    #[test]
    fn same_seed_same_samples() {
        let cfg = ab();
        let (mut gen_1, mut gen_2) = (Generator::new(&cfg, 3, 5), Generator::new(&cfg, 3, 5));
        assert_eq!(gen_1.samples(10), gen_2.samples(10));
    }

    #[test]
    fn finite_language() {
        let cfg = ab();
        let mut gen = Generator::new(&cfg, 0, 5);
        for sample in gen.samples(20) {
            assert!(sample == word("a") || sample == word("a b"))
        }
    }

    #[test]
    fn nothing_to_derive() {
        let mut cfg = Cfg::new();
        cfg.add_p1("S", "T");
        cfg.add_start("S");
        let mut gen = Generator::new(&cfg, 0, 5);
        assert_eq!(gen.sample(), None);
        assert!(gen.samples(3).is_empty());

        let cfg = Cfg::new();
        let mut gen = Generator::new(&cfg, 0, 5);
        assert_eq!(gen.sample(), None);
    }
}
