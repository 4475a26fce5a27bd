//! Gramind learns context-free grammars from positive samples and membership
//! queries, using Yoshinaka's dual distributional approach.
//!
//! The learner sees the samples of a target grammar one by one. It builds a
//! hypothesis whose non-terminals are sets of contexts, keeping only the
//! rules the target confirms through membership queries, and refines it
//! until the hypothesis accepts every sample seen so far.
//!
//! Entry points are [`work`](fn.work.html), which reads the command line, and
//! [`read_and_work`](fn.read_and_work.html) for library use.

#![doc(test(attr(deny(warnings))))]
#![allow(non_upper_case_globals)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate clap;

pub mod errors;
#[macro_use]
pub mod common;
pub mod cfgc;
pub mod context;
pub mod grammar;
pub mod learning;
pub mod oracle;
pub mod teacher;

#[cfg(test)]
mod tests;

use crate::common::*;
use crate::grammar::{gen::Generator, Cfg};
use crate::learning::Learned;
use crate::oracle::{Membership, Oracle};

/// Parses command-line arguments and works.
pub fn work() -> Res<()> {
    if let Some(file_path) = conf.in_file() {
        use std::fs::OpenOptions;

        let file = OpenOptions::new()
            .read(true)
            .open(file_path)
            .chain_err(|| format!("while opening input file `{}`", conf.emph(file_path)))?;
        read_and_work(file, &conf.learn, &conf.gen)?;
    } else {
        let stdin = ::std::io::stdin();
        read_and_work(stdin, &conf.learn, &conf.gen)?;
    }
    Ok(())
}

/// Reads a target grammar from a `Read`er and learns it.
///
/// Prints the result of the learner check and the rules of the learned
/// grammar.
pub fn read_and_work<R: Read>(
    reader: R,
    learn_conf: &LearnConf,
    gen_conf: &GenConf,
) -> Res<Learned> {
    let profiler = Profiler::new();

    let mut target = profile! {
        |profiler| wrap {
            grammar::parse::read(reader, learn_conf.strict)
        } "parsing"
    }
    .chain_err(|| "while reading target grammar")?;

    if gen_conf.count > 0 {
        profile! {
            |profiler| wrap {
                add_generated_samples(&mut target, gen_conf)
            } "generating"
        }
    }

    log! { @verb "target {}", target }

    conf.check_timeout()?;

    let learned = profile! {
        |profiler| wrap {
            learning::learn(&target, learn_conf, &profiler)
        } "learning"
    }?;

    if learn_conf.check_learner {
        let results = profile! {
            |profiler| wrap {
                learning::check_learner(&learned.cfg, target.samples())
            } "learner check"
        };
        println!("learner check:");
        for (sample, accepted) in results {
            println!(
                "  {} {}",
                if accepted {
                    conf.happy("accepted")
                } else {
                    conf.bad("rejected")
                },
                word_str(&sample)
            )
        }
    }

    log! { @verb "{}", learned.cfgc }
    println!("learned grammar:");
    {
        let stdout = stdout();
        let mut stdout = stdout.lock();
        learned.cfgc.write_counts(&mut stdout)?;
        stdout.flush()?
    }

    print_stats("top", profiler);
    Ok(learned)
}

/// Appends randomly generated samples to a grammar.
///
/// Generated samples the grammar rejects are dropped.
pub fn add_generated_samples(target: &mut Cfg, gen_conf: &GenConf) {
    let samples = Generator::new(target, gen_conf.seed, gen_conf.depth).samples(gen_conf.count);
    let mut kept = Vec::with_capacity(samples.len());
    {
        let mut oracle = Membership::new(target);
        for sample in samples {
            if oracle.accepts(&sample) {
                kept.push(sample)
            } else {
                warn! { "dropping generated sample `{}`", word_str(&sample) }
            }
        }
    }
    log! { @info "generated {} sample(s)", kept.len() }
    for sample in kept {
        target.add_sample(sample)
    }
}
