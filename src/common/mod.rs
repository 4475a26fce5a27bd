//! Base types and functions.

pub use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
pub use std::fmt;
pub use std::io::{Read, Write};
pub use std::sync::RwLock;

pub use hashconsing::hash_coll::default::*;
pub use hashconsing::{HConsed, HConsign, HashConsign};

pub use crate::errors::*;

#[macro_use]
pub mod macros;
pub mod config;
pub mod profiling;

pub use self::config::*;
pub use self::profiling::{CanPrint, Profiler};

include!(concat!(env!("OUT_DIR"), "/revision.rs"));

lazy_static! {
    /// Configuration from clap.
    pub static ref conf: Config = Config::clap();
    static ref version_string: String = if let Some(rev) = REVISION {
        format!("{}#{}", crate_version!(), rev)
    } else {
        crate_version!().to_string()
    };
    /// Version with revision info.
    pub static ref version: &'static str = &version_string;
}

// |===| Helpers.

/// Stdout.
pub use std::io::stdout;

/// Prints the stats if asked. Does nothing in bench mode.
#[cfg(feature = "bench")]
pub fn print_stats(_: &'static str, _: Profiler) {}
/// Prints the stats if asked. Does nothing in bench mode.
#[cfg(not(feature = "bench"))]
pub fn print_stats(name: &str, profiler: Profiler) {
    if conf.stats {
        println!();
        profiler.print(name);
        println!();
    }
}

// |===| Type and traits aliases.

/// A grammar symbol, terminal or not.
pub type Sym = String;

/// A word: a sequence of symbols.
pub type Word = Vec<Sym>;

/// A sequence of words.
pub type Words = Vec<Word>;

/// Builds a word from a whitespace-separated string.
///
/// ```
/// use gramind::common::word;
/// assert_eq!(word("a b  c"), vec!["a", "b", "c"]);
/// assert!(word("").is_empty());
/// ```
pub fn word(s: &str) -> Word {
    s.split_whitespace().map(|s| s.to_string()).collect()
}

/// String representation of a word, symbols separated by a space.
///
/// ```
/// use gramind::common::{word, word_str};
/// assert_eq!(word_str(&word("a  b")), "a b");
/// ```
pub fn word_str(w: &[Sym]) -> String {
    w.join(" ")
}

/// Concatenates some slices of symbols.
pub fn concat(parts: &[&[Sym]]) -> Word {
    let len = parts.iter().fold(0, |acc, part| acc + part.len());
    let mut res = Vec::with_capacity(len);
    for part in parts {
        res.extend(part.iter().cloned())
    }
    res
}
