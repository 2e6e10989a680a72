use super::*;

fn logged<F>(rule: &'static str, f: F) -> Result<Sequent, KernelError>
where
    F: FnOnce() -> Result<Sequent, KernelError>,
{
    match f() {
        Ok(seq) => {
            trace!("{}: {}", rule, seq);
            Ok(seq)
        },
        Err(e) => {
            debug!("{} rejected: {}", rule, e);
            Err(e)
        },
    }
}

fn concl_eq<'s>(rule: &'static str, seq: &'s Sequent) -> Result<(&'s Term, &'s Term), KernelError> {
    match seq.concl().as_eq() {
        Some(sides) => Ok(sides),
        None => Err(KernelError::NotAnEquality { rule, term: seq.concl().clone() }),
    }
}

fn should_eq(rule: &'static str, t0: &Term, t1: &Term) -> Result<(), KernelError> {
    if t0 != t1 {
        return Err(KernelError::SharedTermMismatch {
            rule,
            lhs: Typed::of(t0),
            rhs: Typed::of(t1),
        });
    }
    Ok(())
}

/// `⊢ a = a`
pub fn refl(a: &Term) -> Result<Sequent, KernelError> {
    logged("refl", || {
        Ok(Sequent::new(Vec::new(), Term::equal(a, a)?))
    })
}

/// From `Γ1 ⊢ a = b` and `Γ2 ⊢ b = c`, `Γ1 ∪ Γ2 ⊢ a = c`.
pub fn trans(ab: &Sequent, bc: &Sequent) -> Result<Sequent, KernelError> {
    logged("trans", || {
        let (a, b0) = concl_eq("trans", ab)?;
        let (b1, c) = concl_eq("trans", bc)?;
        should_eq("trans", b0, b1)?;
        Ok(Sequent::new(merge(ab.hyps(), bc.hyps()), Term::equal(a, c)?))
    })
}

/// From `Γ1 ⊢ f = g` and `Γ2 ⊢ a = b`, `Γ1 ∪ Γ2 ⊢ f a = g b`.
pub fn app(fg: &Sequent, ab: &Sequent) -> Result<Sequent, KernelError> {
    logged("app", || {
        let (f, g) = concl_eq("app", fg)?;
        let (a, b) = concl_eq("app", ab)?;
        let concl = Term::equal(&Term::app(f, a)?, &Term::app(g, b)?)?;
        Ok(Sequent::new(merge(fg.hyps(), ab.hyps()), concl))
    })
}

/// From `Γ ⊢ l = r`, `Γ ⊢ (λx. l) = (λx. r)`, provided `x` isn't free in `Γ`.
pub fn abs(x: &Term, lr: &Sequent) -> Result<Sequent, KernelError> {
    logged("abs", || {
        let id = match x.var_id() {
            Some(id) => id,
            None => return Err(KernelError::NotAVariable { rule: "abs", term: x.clone() }),
        };
        let (l, r) = concl_eq("abs", lr)?;
        if let Some(hyp) = lr.hyps().iter().find(|hyp| hyp.has_free(id)) {
            return Err(KernelError::EigenvariableLeak {
                var: x.clone(),
                hyp: hyp.clone(),
            });
        }
        let concl = Term::equal(&Term::func(x, l)?, &Term::func(x, r)?)?;
        Ok(Sequent::new(lr.hyps().to_vec(), concl))
    })
}

/// `⊢ f a = f[a]`, one beta-reduction of the function `f`.
pub fn step(f: &Term, a: &Term) -> Result<Sequent, KernelError> {
    logged("step", || {
        if !f.is_fn() {
            return Err(KernelError::NotAFn { rule: "step", term: f.clone() });
        }
        let concl = Term::equal(&Term::app(f, a)?, &f.apply(a)?)?;
        Ok(Sequent::new(Vec::new(), concl))
    })
}

/// `p ⊢ p`, for a proposition `p`.
pub fn assume(p: &Term) -> Result<Sequent, KernelError> {
    logged("assume", || {
        if p.type_ref() != Some(&Term::bool()) {
            return Err(KernelError::NotAProposition { rule: "assume", term: Typed::of(p) });
        }
        Ok(Sequent::new(vec![p.clone()], p.clone()))
    })
}

/// From `Γ1 ⊢ p = q` and `Γ2 ⊢ p`, `Γ1 ∪ Γ2 ⊢ q`.
pub fn emp(pq: &Sequent, p: &Sequent) -> Result<Sequent, KernelError> {
    logged("emp", || {
        let (p0, q) = concl_eq("emp", pq)?;
        should_eq("emp", p0, p.concl())?;
        Ok(Sequent::new(merge(pq.hyps(), p.hyps()), q.clone()))
    })
}

/// From `Γ1 ⊢ a` and `Γ2 ⊢ b`, `(Γ1 - b) ∪ (Γ2 - a) ⊢ a = b`.
///
/// The surviving hypotheses of `a` come first, then the new ones of `b`. Listing `b`'s first
/// would give the same set in a different order.
pub fn deduct(a: &Sequent, b: &Sequent) -> Result<Sequent, KernelError> {
    logged("deduct", || {
        let hyps = merge(&remove(a.hyps(), b.concl()), &remove(b.hyps(), a.concl()));
        Ok(Sequent::new(hyps, Term::equal(a.concl(), b.concl())?))
    })
}

/// `⊢ (l = r) = ((λx. λy. x = y) l r)`
pub fn eq_def(l: &Term, r: &Term) -> Result<Sequent, KernelError> {
    logged("eq_def", || {
        let eq = Term::equal(l, r)?;
        let (l_type, r_type) = match (l.type_ref(), r.type_ref()) {
            (Some(l_type), Some(r_type)) => (l_type, r_type),
            _ => return Err(KernelError::Untyped { term: l.clone() }),
        };
        let x = Term::var("x", l_type);
        let y = Term::var("y", r_type);
        let leibniz = Term::func(&x, &Term::func(&y, &Term::equal(&x, &y)?)?)?;
        let unfolded = Term::app(&Term::app(&leibniz, l)?, r)?;
        Ok(Sequent::new(Vec::new(), Term::equal(&eq, &unfolded)?))
    })
}

/// From `Γ ⊢ t`, `Γ[x := e] ⊢ t[x := e]`, for `e` of the same type as `x`.
pub fn inst(seq: &Sequent, x: &Term, e: &Term) -> Result<Sequent, KernelError> {
    logged("inst", || {
        let var = match x.as_var() {
            Some(var) => var,
            None => return Err(KernelError::NotAVariable { rule: "inst", term: x.clone() }),
        };
        if x.type_ref() != e.type_ref() {
            return Err(KernelError::type_mismatch("inst", x, e));
        }
        let (terms, concl) = crate::core::subst_sequent(seq.hyps(), seq.concl(), var, e)?;
        let mut hyps = Vec::with_capacity(terms.len());
        for hyp in terms {
            hyps = merge(&hyps, &[hyp]);
        }
        Ok(Sequent::new(hyps, concl))
    })
}
