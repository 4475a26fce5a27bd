//! Crate-level tests: loading, learning and checking small grammars.

use crate::common::*;
use crate::context::contexts_of;
use crate::grammar::{parse::parse_str, Cfg};
use crate::learning::{check_learner, learn};
use crate::oracle::{cyk::recognize, Membership, Oracle};
use crate::{add_generated_samples, read_and_work};

static ab: &str = "\
#P2
S->A,B
#PL
S->a
A->a
B->b
#Starts
S
#Samples
a
a b
";

static unary: &str = "\
#P1
S->T
T->U
#P2
U->V,W
#PL
V->v
W->w
#Starts
S
#Samples
v w
";

fn quiet_conf() -> LearnConf {
    LearnConf {
        strict: true,
        check_learner: false,
        ..LearnConf::default()
    }
}

#[test]
fn learn_from_reader() {
    let learned = read_and_work(ab.as_bytes(), &quiet_conf(), &GenConf::default()).unwrap();
    assert_eq!(learned.snapshots.len(), 2);
    assert!(recognize(&word("a"), &learned.cfg));
    assert!(recognize(&word("a b"), &learned.cfg));
}

#[test]
fn learned_rules_are_confirmed_by_the_target() {
    // Every lexical rule of the hypothesis rooted at the start symbol
    // produces a word of the target.
    let target = parse_str(ab, true).unwrap();
    let learned = learn(&target, &quiet_conf(), &Profiler::new()).unwrap();
    let mut oracle = Membership::new(&target);
    for rule in &learned.cfgc.plc {
        if rule.lhs.has_empty() {
            assert!(oracle.accepts(&[rule.rhs.clone()]))
        }
    }
}

#[test]
fn learning_through_unary_chains() {
    let target = parse_str(unary, true).unwrap();
    let learned = learn(&target, &quiet_conf(), &Profiler::new()).unwrap();
    for (sample, accepted) in check_learner(&learned.cfg, target.samples()) {
        assert!(accepted, "`{}` is rejected", word_str(&sample))
    }
}

#[test]
fn contexts_grow_with_samples() {
    let target = parse_str(ab, true).unwrap();
    let learned = learn(&target, &quiet_conf(), &Profiler::new()).unwrap();
    let all_contexts: BTreeSet<_> = target
        .samples()
        .iter()
        .flat_map(|sample| contexts_of(sample))
        .collect();
    let last = learned.snapshots.last().unwrap();
    assert!(last.contexts <= all_contexts.len());
    assert_eq!(last.samples, target.samples().len());
}

#[test]
fn generated_samples() {
    let mut target: Cfg = parse_str(unary, true).unwrap();
    let before = target.samples().len();
    let gen_conf = GenConf {
        count: 3,
        seed: 0,
        depth: 8,
    };
    add_generated_samples(&mut target, &gen_conf);
    assert_eq!(target.samples().len(), before + 3);
    for sample in target.samples() {
        assert!(recognize(sample, &target))
    }
    learn(&target, &quiet_conf(), &Profiler::new()).unwrap();
}

#[test]
fn parse_error_is_fatal_when_strict() {
    let s = "#P2\nS->A\n";
    match read_and_work(s.as_bytes(), &quiet_conf(), &GenConf::default()) {
        Err(e) => assert!(e.iter().any(|e| format!("{}", e).contains("illegal binary rule"))),
        Ok(_) => panic!("expected a parse error"),
    }
}
