//! Learning loop.
//!
//! The learner maintains
//!
//! - `D`, the samples seen so far,
//! - `K`, all substrings of `D`,
//! - `ConD`, all contexts of `D`,
//! - `F`, the contexts the hypothesis is built on.
//!
//! Each new sample grows `D`, `K` and `ConD`, and the hypothesis is rebuilt
//! over `F` and `K`. If the hypothesis rejects a sample of `D`, `F` catches
//! up with `ConD` and the hypothesis is rebuilt again. `F` and `K` only grow.

use std::time::Instant;

use crate::cfgc::{self, Cfgc};
use crate::common::*;
use crate::context::{self, RCtxSet};
use crate::grammar::Cfg;
use crate::oracle::{self, History};
use crate::teacher::Teacher;

/// State of the learner after processing a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of samples seen, `|D|`.
    pub samples: usize,
    /// Number of contexts the hypothesis is built on, `|F|`.
    pub contexts: usize,
    /// Number of substrings of the samples, `|K|`.
    pub substrings: usize,
    /// True if `F` grew while processing the sample.
    pub grew: bool,
    /// Number of rules of the contextual hypothesis.
    pub rules: usize,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "|D| = {}, |F| = {}, |K| = {}, {} rule(s){}",
            self.samples,
            self.contexts,
            self.substrings,
            self.rules,
            if self.grew { ", F grew" } else { "" }
        )
    }
}

/// Result of a learning run.
pub struct Learned {
    /// Contextual hypothesis.
    pub cfgc: Cfgc,
    /// Collapsed hypothesis.
    pub cfg: Cfg,
    /// One snapshot per sample.
    pub snapshots: Vec<Snapshot>,
}

/// Learner.
pub struct Learner<'a> {
    /// Membership oracle of the target.
    teacher: Teacher<'a>,
    /// Terminals of the target.
    sigma: BTreeSet<Sym>,
    /// Learning configuration.
    learn_conf: &'a LearnConf,
    /// Samples seen, `D`.
    samples: Words,
    /// Substrings of `D`, `K`, in order of discovery.
    substrings: Words,
    /// Substrings of `D`, for membership.
    known_substrings: HashSet<Word>,
    /// Contexts of `D`, `ConD`.
    all_contexts: RCtxSet,
    /// Contexts the hypothesis is built on, `F`.
    contexts: RCtxSet,
    /// Contextual hypothesis.
    hhat: Cfgc,
    /// Collapsed hypothesis.
    hprime: Cfg,
    /// History of the collapsed hypothesis.
    hyp_history: History,
    /// One snapshot per sample processed.
    snapshots: Vec<Snapshot>,
    /// Learning aborts past this instant.
    deadline: Option<Instant>,
    /// Profiler.
    _profiler: &'a Profiler,
}

impl<'a> Learner<'a> {
    /// Constructor, builds the initial (empty) hypothesis.
    pub fn new(target: &'a Cfg, learn_conf: &'a LearnConf, profiler: &'a Profiler) -> Res<Self> {
        let deadline = learn_conf.timeout.map(|timeout| Instant::now() + timeout);
        let mut learner = Learner {
            teacher: Teacher::new(target, profiler),
            sigma: target.sigma(),
            learn_conf,
            samples: vec![],
            substrings: vec![],
            known_substrings: HashSet::new(),
            all_contexts: RCtxSet::new(),
            contexts: RCtxSet::new(),
            hhat: Cfgc::new(),
            hprime: Cfg::new(),
            hyp_history: History::new(),
            snapshots: vec![],
            deadline,
            _profiler: profiler,
        };
        learner.rebuild()?;
        Ok(learner)
    }

    /// Teacher of the learner.
    pub fn teacher(&mut self) -> &mut Teacher<'a> {
        &mut self.teacher
    }

    /// Contextual hypothesis.
    pub fn hhat(&self) -> &Cfgc {
        &self.hhat
    }
    /// Collapsed hypothesis.
    pub fn hprime(&self) -> &Cfg {
        &self.hprime
    }
    /// Snapshots so far.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Fails if the deadline is passed.
    fn check_deadline(&self) -> Res<()> {
        if let Some(deadline) = self.deadline {
            if Instant::now() > deadline {
                bail!(ErrorKind::Timeout)
            }
        }
        Ok(())
    }

    /// Rebuilds the hypothesis over `F` and `K`.
    fn rebuild(&mut self) -> Res<()> {
        profile! { self tick "learning", "hf" }
        let hhat = cfgc::hf(
            &self.contexts,
            &self.substrings,
            &self.sigma,
            self.learn_conf.f,
            self.learn_conf.pow_cap,
            &mut self.teacher,
        );
        profile! { self mark "learning", "hf" }
        self.hhat = hhat?;
        self.hprime = profile! {
            self wrap { cfgc::collapse(&self.hhat) } "learning", "collapse"
        };
        self.hyp_history = History::new();
        profile! { self "hypothesis rebuilds" => add 1 }
        log! { @debug
            "hypothesis: {} contextual rule(s), {} rule(s)",
            self.hhat.rule_count(), self.hprime.rule_count()
        }
        Ok(())
    }

    /// True if the hypothesis accepts all the samples seen so far.
    fn consistent(&mut self) -> bool {
        let (hprime, history) = (&self.hprime, &mut self.hyp_history);
        self.samples
            .iter()
            .all(|sample| oracle::accepts(sample, hprime, history))
    }

    /// Processes a sample.
    pub fn step(&mut self, sample: &[Sym]) -> Res<()> {
        self.check_deadline()?;
        log! { @info "processing `{}`", word_str(sample) }

        self.samples.push(sample.to_vec());
        self.all_contexts.extend(context::contexts_of(sample));
        for sub in context::substrings_of(sample) {
            if self.known_substrings.insert(sub.clone()) {
                self.substrings.push(sub)
            }
        }
        self.rebuild()?;

        let grew = if self.consistent() {
            false
        } else {
            log! { @verb "hypothesis is inconsistent, growing F" }
            let before = self.contexts.len();
            self.contexts.extend(self.all_contexts.iter().cloned());
            self.rebuild()?;
            self.contexts.len() > before
        };

        let snapshot = Snapshot {
            samples: self.samples.len(),
            contexts: self.contexts.len(),
            substrings: self.substrings.len(),
            grew,
            rules: self.hhat.rule_count(),
        };
        log! { @verb "{}", snapshot }
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Processes all the samples of the target, returns the final hypothesis.
    pub fn run(mut self) -> Res<Learned> {
        let target = self.teacher.target;
        for sample in target.samples() {
            self.step(sample)?
        }
        self.teacher.stats();
        profile! { self "contexts" => add self.contexts.len() }
        profile! { self "substrings" => add self.substrings.len() }
        Ok(Learned {
            cfgc: self.hhat,
            cfg: self.hprime,
            snapshots: self.snapshots,
        })
    }
}

/// Learns the target grammar from its samples.
///
/// Checks the target accepts its samples first.
pub fn learn(target: &Cfg, learn_conf: &LearnConf, profiler: &Profiler) -> Res<Learned> {
    let mut learner = Learner::new(target, learn_conf, profiler)?;
    learner.teacher().check_samples()?;
    learner.run()
}

/// Runs some samples through a grammar.
///
/// Returns the verdict for each sample, in order.
pub fn check_learner(learned: &Cfg, samples: &[Word]) -> Vec<(Word, bool)> {
    let mut history = History::new();
    samples
        .iter()
        .map(|sample| {
            let accepted = oracle::accepts(sample, learned, &mut history);
            if accepted {
                log! { @info "learned grammar accepts `{}`", word_str(sample) }
            } else {
                warn! { "learned grammar rejects `{}`", word_str(sample) }
            }
            (sample.clone(), accepted)
        })
        .collect()
}
