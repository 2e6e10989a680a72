//! Proved sequents.
//!
//! A `Sequent` can only be produced by the inference rules in this module, so holding one means
//! its conclusion follows from its hypotheses.

use super::*;
use crate::core::render::{self, NameEnv, Precedence};

mod rules;

pub use self::rules::{refl, trans, app, abs, step, assume, emp, deduct, eq_def, inst};

/// `hyps ⊢ concl`
#[derive(Clone)]
pub struct Sequent {
    inner: Arc<SequentInner>,
}

struct SequentInner {
    hyps: Vec<Term>,
    concl: Term,
}

impl Sequent {
    fn new(hyps: Vec<Term>, concl: Term) -> Sequent {
        Sequent {
            inner: Arc::new(SequentInner { hyps, concl }),
        }
    }

    /// Hypotheses, in order, with no two alpha-equal.
    pub fn hyps(&self) -> &[Term] {
        &self.inner.hyps
    }

    pub fn concl(&self) -> &Term {
        &self.inner.concl
    }
}

impl PartialEq for Sequent {
    fn eq(&self, other: &Sequent) -> bool {
        self.concl() == other.concl() &&
        self.hyps() == other.hyps()
    }
}

impl Display for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut env = NameEnv::new();
        for (i, hyp) in self.hyps().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            render::render_term(hyp, f, &mut env, Precedence::Binder)?;
        }
        if !self.hyps().is_empty() {
            write!(f, " ")?;
        }
        write!(f, "⊢ ")?;
        render::render_term(self.concl(), f, &mut env, Precedence::Binder)
    }
}

impl fmt::Debug for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Sequent({:?}, {:?})", self.hyps(), self.concl())
    }
}

// Alpha-equality, skipping the structural comparison when both sides are closed and their
// indices differ.
fn same_hyp(t0: &Term, t1: &Term) -> bool {
    if t0.is_closed() && t1.is_closed() {
        if let (Ok(i0), Ok(i1)) = (t0.index(), t1.index()) {
            if i0 != i1 {
                return false;
            }
        }
    }
    t0 == t1
}

/// The hypotheses of `hyps0`, followed by those of `hyps1` that aren't already present.
fn merge(hyps0: &[Term], hyps1: &[Term]) -> Vec<Term> {
    let mut ret = hyps0.to_vec();
    for hyp in hyps1 {
        if !ret.iter().any(|seen| same_hyp(seen, hyp)) {
            ret.push(hyp.clone());
        }
    }
    ret
}

/// `hyps` without anything alpha-equal to `term`.
fn remove(hyps: &[Term], term: &Term) -> Vec<Term> {
    hyps.iter().filter(|hyp| !same_hyp(hyp, term)).cloned().collect()
}
