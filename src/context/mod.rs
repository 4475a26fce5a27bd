//! Contexts, hash-consed context sets.
//!
//! A context `(l, r)` is a word with a hole. Plugging `u` into it yields
//! `l u r`. Context sets play the role of non-terminals in contextual
//! grammars: they are hash-consed so that comparing and hashing them is
//! constant time, and rules over them can live in hash sets.

use std::ops::Deref;

use crate::common::*;

/// A context: a word with a hole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Context {
    /// Left of the hole.
    pub lhs: Word,
    /// Right of the hole.
    pub rhs: Word,
}

impl Context {
    /// Constructor.
    pub fn new(lhs: Word, rhs: Word) -> Self {
        Context { lhs, rhs }
    }

    /// The empty context `(e, e)`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.lhs.is_empty() && self.rhs.is_empty()
    }

    /// Plugs a word in the hole.
    pub fn plug(&self, w: &[Sym]) -> Word {
        concat(&[&self.lhs, w, &self.rhs])
    }

    /// Plugs the concatenation of two words in the hole.
    pub fn plug_2(&self, u: &[Sym], v: &[Sym]) -> Word {
        concat(&[&self.lhs, u, v, &self.rhs])
    }
}

impl fmt::Display for Context {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "({}, {})", word_str(&self.lhs), word_str(&self.rhs))
    }
}

/// Raw context set, hash-consed as a [`CtxSet`].
///
/// [`CtxSet`]: type.CtxSet.html (CtxSet type)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RCtxSet {
    /// Contexts, ordered.
    set: BTreeSet<Context>,
}

impl RCtxSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a context.
    pub fn insert(&mut self, ctx: Context) -> bool {
        self.set.insert(ctx)
    }

    /// True if `self ⊆ other`.
    pub fn is_subset(&self, other: &RCtxSet) -> bool {
        is_subset(self, other)
    }

    /// True if the set contains the empty context.
    pub fn has_empty(&self) -> bool {
        self.set.contains(&Context::empty())
    }
}

impl Deref for RCtxSet {
    type Target = BTreeSet<Context>;
    fn deref(&self) -> &BTreeSet<Context> {
        &self.set
    }
}

impl FromIterator<Context> for RCtxSet {
    fn from_iter<I: IntoIterator<Item = Context>>(iter: I) -> Self {
        RCtxSet {
            set: iter.into_iter().collect(),
        }
    }
}

impl Extend<Context> for RCtxSet {
    fn extend<I: IntoIterator<Item = Context>>(&mut self, iter: I) {
        self.set.extend(iter)
    }
}

impl fmt::Display for RCtxSet {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{{")?;
        for (idx, ctx) in self.set.iter().enumerate() {
            if idx > 0 {
                write!(fmt, ", ")?
            }
            write!(fmt, "{}", ctx)?
        }
        write!(fmt, "}}")
    }
}

/// Hash-consed context set.
pub type CtxSet = HConsed<RCtxSet>;

lazy_static! {
    /// Context set factory.
    static ref factory: RwLock<HConsign<RCtxSet>> = RwLock::new(
        HConsign::with_capacity(1_007)
    );
}

/// Hash-conses a context set.
pub fn ctx_set(set: RCtxSet) -> CtxSet {
    factory.mk(set)
}

/// Hash-conses the set of some contexts.
pub fn ctx_set_of<I: IntoIterator<Item = Context>>(ctxs: I) -> CtxSet {
    ctx_set(ctxs.into_iter().collect())
}

/// The set containing only the empty context.
pub fn top() -> CtxSet {
    ctx_set_of(Some(Context::empty()))
}

/// True if `c_1 ⊆ c_2`.
///
/// ```
/// use gramind::common::word;
/// use gramind::context::*;
/// let (c_1, c_2) = (
///     Context::new(word("a"), vec![]),
///     Context::new(vec![], word("b")),
/// );
/// let small: RCtxSet = Some(c_1.clone()).into_iter().collect();
/// let big: RCtxSet = vec![c_1, c_2].into_iter().collect();
/// assert!(is_subset(&small, &big));
/// assert!(!is_subset(&big, &small));
/// assert!(is_subset(&RCtxSet::new(), &small));
/// ```
pub fn is_subset(c_1: &RCtxSet, c_2: &RCtxSet) -> bool {
    c_1.len() <= c_2.len() && c_1.iter().all(|ctx| c_2.contains(ctx))
}

/// All non-empty subsets of `base` of cardinality at most `f`.
///
/// Sets are hash-consed and returned in increasing structural order. Fails
/// when more than `cap` sets would be produced.
pub fn powerset(base: &RCtxSet, f: usize, cap: usize) -> Res<Vec<CtxSet>> {
    let sets = raw_powerset(base, f, cap)?;
    Ok(sets.into_iter().map(ctx_set).collect())
}

/// Powerset, not hash-consed.
fn raw_powerset(base: &RCtxSet, f: usize, cap: usize) -> Res<BTreeSet<RCtxSet>> {
    let mut res = BTreeSet::new();
    if f == 0 {
        return Ok(res);
    }
    let smaller = raw_powerset(base, f - 1, cap)?;
    for ctx in base.iter() {
        let mut singleton = RCtxSet::new();
        singleton.insert(ctx.clone());
        insert_capped(&mut res, singleton, cap)?;
        for set in &smaller {
            if set.contains(ctx) {
                continue;
            }
            let mut set = set.clone();
            set.insert(ctx.clone());
            insert_capped(&mut res, set, cap)?
        }
    }
    Ok(res)
}

/// Inserts a set, fails if the result has more than `cap` elements.
fn insert_capped(sets: &mut BTreeSet<RCtxSet>, set: RCtxSet, cap: usize) -> Res<()> {
    if sets.insert(set) && sets.len() > cap {
        bail!(ErrorKind::PowersetCap(cap, sets.len()))
    }
    Ok(())
}

/// Contexts of a word: `(w[..i], w[j..])` for all `0 <= i <= j <= |w|`.
pub fn contexts_of(w: &[Sym]) -> Vec<Context> {
    let len = w.len();
    let mut res = Vec::with_capacity((len + 1) * (len + 2) / 2);
    for i in 0..=len {
        for j in i..=len {
            res.push(Context::new(w[..i].to_vec(), w[j..].to_vec()))
        }
    }
    res
}

/// Substrings of a word: `w[i..j]` for all `0 <= i < |w|` and `i <= j <= |w|`.
///
/// The empty substring is produced iff `w` is not empty.
pub fn substrings_of(w: &[Sym]) -> Vec<Word> {
    let len = w.len();
    let mut res = Vec::with_capacity(len * (len + 1));
    for i in 0..len {
        for j in i..=len {
            res.push(w[i..j].to_vec())
        }
    }
    res
}
