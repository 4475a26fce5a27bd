//! Top-level tests on the grammar files in `rsc`.
#![allow(non_upper_case_globals)]

use std::fs::read_dir;
use std::fs::OpenOptions;

use gramind::common::*;
use gramind::learning::check_learner;
use gramind::read_and_work;

static learn_files_dir: &str = "rsc/learn";
static err_files_dir: &str = "rsc/error";

macro_rules! run {
    ($f:expr) => {
        if let Err(e) = $f {
            println!("Error:");
            for e in e.iter() {
                let mut pref = "> ";
                for line in format!("{}", e).lines() {
                    println!("{}{}", pref, line);
                    pref = "  "
                }
            }
            panic!("failure")
        }
    };
}

macro_rules! map_err {
    ($e:expr, $msg:expr) => {
        $e.map_err(|e| format!("{}:\n{}", $msg, e))?
    };
    ($e:expr, $($tt:tt)*) => {
        $e.map_err(|e| format!("{}:\n{}", format!($($tt)*), e))?
    };
}

/// Strict learning configuration, no learner check output.
fn learn_conf() -> LearnConf {
    LearnConf {
        strict: true,
        check_learner: false,
        ..LearnConf::default()
    }
}

#[test]
fn learn() {
    run!(run_learn())
}

#[test]
fn learn_ab() {
    run!(run_learn_consistent("rsc/learn/ab.cfg"))
}

#[test]
fn learn_files_load_strictly() {
    run!(run_load())
}

#[test]
fn err() {
    run!(run_err())
}

/// Paths of the files in a directory.
fn files_of(dir: &str) -> Res<Vec<::std::path::PathBuf>> {
    let entries = map_err!(read_dir(dir), format!("while reading `{}`", dir));
    let mut files = vec![];
    for entry in entries {
        let entry = map_err!(entry, "while reading entry");
        let file_name = format!("{}", entry.file_name().to_string_lossy());
        if map_err!(
            entry.file_type(),
            "while reading entry (file type of `{}`)",
            file_name
        )
        .is_file()
        {
            files.push(entry.path())
        }
    }
    files.sort();
    Ok(files)
}

fn run_err() -> Res<()> {
    for path in files_of(err_files_dir)? {
        println!("looking at `{}`", path.display());
        let file = OpenOptions::new()
            .read(true)
            .open(&path)
            .chain_err(|| format!("while opening file {}", path.display()))?;
        match read_and_work(file, &learn_conf(), &GenConf::default()) {
            Err(e) => println!("got {}", e),
            Ok(learned) => {
                return Err(format!(
                    "expected error on `{}`, learned {} rule(s)",
                    path.display(),
                    learned.cfgc.rule_count()
                )
                .into())
            }
        }
    }
    Ok(())
}

fn run_load() -> Res<()> {
    for path in files_of(learn_files_dir)? {
        let target = gramind::grammar::parse::read_file(&path, true)
            .chain_err(|| format!("while loading `{}`", path.display()))?;
        if target.samples().is_empty() {
            return Err(format!("`{}` has no samples", path.display()).into());
        }
    }
    Ok(())
}

fn run_learn() -> Res<()> {
    for path in files_of(learn_files_dir)? {
        run_learn_on(&path)?
    }
    Ok(())
}

/// Learns a file, checks the learner processed all samples.
fn run_learn_on<P: AsRef<::std::path::Path> + ?Sized>(path: &P) -> Res<()> {
    let file_name = path.as_ref();
    println!("looking at `{}`", file_name.display());
    let file = OpenOptions::new()
        .read(true)
        .open(file_name)
        .chain_err(|| format!("while opening file {}", file_name.display()))?;
    let learned = read_and_work(file, &learn_conf(), &GenConf::default())
        .chain_err(|| format!("while learning `{}`", file_name.display()))?;
    let target = gramind::grammar::parse::read_file(file_name, true)?;
    if learned.snapshots.len() != target.samples().len() {
        return Err(format!(
            "processed {} sample(s), expected {}",
            learned.snapshots.len(),
            target.samples().len()
        )
        .into());
    }
    for pair in learned.snapshots.windows(2) {
        if pair[0].contexts > pair[1].contexts || pair[0].substrings > pair[1].substrings {
            return Err(format!(
                "learner state shrank: `{}` then `{}`",
                pair[0], pair[1]
            )
            .into());
        }
    }
    let rejected: Vec<_> = check_learner(&learned.cfg, target.samples())
        .into_iter()
        .filter(|(_, accepted)| !accepted)
        .collect();
    if rejected.is_empty() {
        println!("- learned grammar accepts all samples")
    } else {
        println!(
            "- learned grammar rejects {} of {} sample(s):",
            rejected.len(),
            target.samples().len()
        );
        for (sample, _) in rejected {
            println!("  `{}`", word_str(&sample))
        }
    }
    println!("- is okay");
    Ok(())
}

/// Learns a file, checks the learned grammar accepts all samples.
fn run_learn_consistent(path: &str) -> Res<()> {
    run_learn_on(path)?;
    let target = gramind::grammar::parse::read_file(path, true)?;
    let file = OpenOptions::new()
        .read(true)
        .open(path)
        .chain_err(|| format!("while opening file {}", path))?;
    let learned = read_and_work(file, &learn_conf(), &GenConf::default())?;
    for (sample, accepted) in check_learner(&learned.cfg, target.samples()) {
        if !accepted {
            return Err(format!(
                "learned grammar rejects sample `{}` of `{}`",
                word_str(&sample),
                path
            )
            .into());
        }
    }
    Ok(())
}
