//! Teacher: answers membership queries on the target grammar.
//!
//! The teacher owns the history of the target grammar, which persists for
//! the whole run: the learner asks the same questions over and over as its
//! hypothesis is rebuilt.

use crate::common::*;
use crate::grammar::Cfg;
use crate::oracle::{self, History, Oracle};

/// Membership oracle of the target grammar.
pub struct Teacher<'a> {
    /// Target grammar.
    pub target: &'a Cfg,
    /// Answers so far.
    history: History,
    /// Profiler.
    _profiler: &'a Profiler,
}

impl<'a> Teacher<'a> {
    /// Constructor.
    pub fn new(target: &'a Cfg, profiler: &'a Profiler) -> Self {
        Teacher {
            target,
            history: History::new(),
            _profiler: profiler,
        }
    }

    /// Checks that the target accepts all its samples.
    ///
    /// Fails on the first sample rejected.
    pub fn check_samples(&mut self) -> Res<()> {
        profile! { self tick "self check" }
        let target = self.target;
        let mut res = Ok(());
        for sample in target.samples() {
            if self.accepts(sample) {
                log! { @info "target accepts `{}`", word_str(sample) }
            } else {
                res = Err(ErrorKind::InconsistentSample(word_str(sample)).into());
                break;
            }
        }
        profile! { self mark "self check" }
        res
    }

    /// Pushes the query counters to the profiler.
    pub fn stats(&self) {
        profile! { self "target queries" => add self.history.hits() + self.history.misses() }
        profile! { self "target cache hits" => add self.history.hits() }
        profile! { self "target cyk runs" => add self.history.misses() }
    }
}

impl<'a> Oracle for Teacher<'a> {
    fn accepts(&mut self, w: &[Sym]) -> bool {
        oracle::accepts(w, self.target, &mut self.history)
    }
    fn history(&self) -> &History {
        &self.history
    }
}
