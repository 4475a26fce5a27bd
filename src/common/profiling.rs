#![doc = r#"Profiling stuff.

In `bench` mode, `Profiler` is a unit structure. Also, all macros are
deactivated, so all profiling is completely removed.
"#]

use std::time::{Duration, Instant};

use crate::common::*;

/// Extends duration with a pretty printing.
pub trait DurationExt {
    /// Nice string representation.
    fn to_str(&self) -> String;
}
impl DurationExt for Duration {
    fn to_str(&self) -> String {
        format!("{}.{:0>9}", self.as_secs(), self.subsec_nanos())
    }
}

/// Maps strings to counters.
pub type Stats = BTreeMap<String, usize>;

/// Provides a debug print function.
pub trait CanPrint {
    /// Debug print (multi-line).
    fn print(&self, name: &str);
}
impl CanPrint for Stats {
    fn print(&self, _: &str) {
        for (stat, count) in self {
            let stat_len = ::std::cmp::min(30, stat.len());
            println!(
                ";   {0: >1$}{2}: {3: >5}",
                "",
                30 - stat_len,
                conf.emph(stat),
                count
            )
        }
    }
}

/// Profiling structure, only in `not(bench)`.
///
/// Maintains statistics using a hashmap indexed by strings.
///
/// Internally, the structures are wrapped in `RefCell`s so that mutation
/// does not require `& mut self`.
#[cfg(not(feature = "bench"))]
pub struct Profiler {
    /// String-indexed durations.
    map: ::std::cell::RefCell<BTreeMap<Vec<&'static str>, (Option<Instant>, Duration)>>,
    /// Starting tick, for total time.
    start: Instant,
    /// Other statistics.
    stats: ::std::cell::RefCell<Stats>,
}
#[cfg(feature = "bench")]
pub struct Profiler;

impl Default for Profiler {
    fn default() -> Self {
        Profiler::new()
    }
}

impl Profiler {
    /// Constructor.
    #[cfg(not(feature = "bench"))]
    pub fn new() -> Self {
        use std::cell::RefCell;
        Profiler {
            map: RefCell::new(BTreeMap::new()),
            start: Instant::now(),
            stats: RefCell::new(BTreeMap::new()),
        }
    }
    #[cfg(feature = "bench")]
    pub fn new() -> Self {
        Profiler
    }

    /// Acts on a statistic.
    #[cfg(not(feature = "bench"))]
    pub fn stat_do<F, S>(&self, stat: S, f: F)
    where
        F: Fn(usize) -> usize,
        S: Into<String>,
    {
        let stat = stat.into();
        let mut map = self.stats.borrow_mut();
        let val = map.get(&stat).cloned().unwrap_or(0);
        let _ = map.insert(stat, f(val));
    }

    /// Value of a statistic, `0` if unknown.
    #[cfg(not(feature = "bench"))]
    pub fn get_stat<S: AsRef<str>>(&self, stat: S) -> usize {
        self.stats.borrow().get(stat.as_ref()).cloned().unwrap_or(0)
    }
    #[cfg(feature = "bench")]
    pub fn get_stat<S: AsRef<str>>(&self, _: S) -> usize {
        0
    }

    /// Ticks.
    #[cfg(not(feature = "bench"))]
    pub fn tick(&self, scope: Vec<&'static str>) {
        if scope.is_empty() {
            panic!("Profile: can't use scope `total`")
        }
        let mut map = self.map.borrow_mut();
        let time = map
            .entry(scope)
            .or_insert_with(|| (None, Duration::from_secs(0)));
        time.0 = Some(Instant::now())
    }

    /// Registers the time since the last tick.
    ///
    /// Panics if there was no tick since the last time registration.
    #[cfg(not(feature = "bench"))]
    pub fn mark(&self, scope: Vec<&'static str>) {
        if scope.is_empty() {
            panic!("Profile: can't use scope `total`")
        }
        let mut map = self.map.borrow_mut();
        if let Some(&mut (ref mut tick, ref mut sum)) = map.get_mut(&scope) {
            if let Some(instant) = tick.take() {
                *sum += Instant::now().duration_since(instant)
            }
        } else {
            panic!("profiling: trying to mark the time without ticking first")
        }
    }

    /// Prints the timings and the statistics.
    #[cfg(not(feature = "bench"))]
    pub fn print(&self, name: &str) {
        println!(
            "; {} {}s",
            conf.emph(format!("|===| {} profile, total", name)),
            Instant::now().duration_since(self.start).to_str()
        );
        for (scope, (tick, time)) in self.map.borrow().iter() {
            if tick.is_some() {
                warn! { "scope `{}` is still live", scope.join("::") }
            }
            println!(
                "; {0: >1$}|- {2}s {3}",
                "",
                2 * scope.len(),
                time.to_str(),
                scope.last().cloned().unwrap_or("?")
            )
        }
        let stats = self.stats.borrow();
        if !stats.is_empty() {
            println!("; {}", conf.emph("|===| statistics"));
            stats.print(name)
        }
        println!("; {}", conf.emph("|===|"))
    }
    #[cfg(feature = "bench")]
    pub fn print(&self, _: &str) {}
}
