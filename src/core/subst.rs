use super::*;

/// A simultaneous substitution, extended as the traversal passes under binders.
///
/// Besides the variable being replaced, the map picks up two kinds of entries along the way:
/// binders that had to be renamed (scoped to the binder's body) and variables whose declared type
/// mentions a replaced variable, which get re-declared once and reused at every occurrence.
struct Subst {
    map: HashMap<VarId, Term>,
}

impl Term {
    /// Capture-avoiding substitution of `expr` for the variable `var`.
    ///
    /// Returns `self` if `var` isn't free in it. Fails only if a rebuilt node no longer
    /// typechecks, eg. when `expr` doesn't have `var`'s type and `var` is used as an argument.
    pub fn subst(&self, var: &Term, expr: &Term) -> Result<Term, KernelError> {
        match var.as_var() {
            Some(var) => self.subst_var(var, expr),
            None => Err(KernelError::NotAVariable { rule: "subst", term: var.clone() }),
        }
    }

    pub(crate) fn subst_var(&self, var: &Var, expr: &Term) -> Result<Term, KernelError> {
        if !self.has_free(var.id()) {
            return Ok(self.clone());
        }
        let mut subst = Subst {
            map: HashMap::new(),
        };
        subst.map.insert(var.id(), expr.clone());
        subst.apply(self)
    }
}

/// Substitutes `expr` for `var` in `hyps` and `concl` with one shared map, so a variable
/// re-declared in one of them is the same variable in all of them.
pub(crate) fn subst_sequent(
    hyps: &[Term],
    concl: &Term,
    var: &Var,
    expr: &Term,
) -> Result<(Vec<Term>, Term), KernelError> {
    let mut subst = Subst {
        map: HashMap::new(),
    };
    subst.map.insert(var.id(), expr.clone());
    let hyps = hyps.iter().map(|hyp| subst.apply(hyp)).collect::<Result<Vec<_>, _>>()?;
    let concl = subst.apply(concl)?;
    Ok((hyps, concl))
}

impl Subst {
    fn touches(&self, term: &Term) -> bool {
        self.map.keys().any(|id| term.has_free(*id))
    }

    fn apply(&mut self, term: &Term) -> Result<Term, KernelError> {
        if !self.touches(term) {
            return Ok(term.clone());
        }
        match term.kind() {
            TermKind::Wat |
            TermKind::Type |
            TermKind::Bool => Ok(term.clone()),
            TermKind::Var(var) => {
                if let Some(replacement) = self.map.get(&var.id()) {
                    return Ok(replacement.clone());
                }
                // a free variable whose type changes becomes a new variable
                let ty = self.apply(var.get_type())?;
                let replacement = Term::var(var.name(), &ty);
                self.map.insert(var.id(), replacement.clone());
                Ok(replacement)
            },
            TermKind::App { op, arg } => {
                let op = self.apply(op)?;
                let arg = self.apply(arg)?;
                Term::app(&op, &arg)
            },
            TermKind::Pi { x, body } => {
                let (x, body) = self.apply_binder(x, body)?;
                Term::pi(&x, &body)
            },
            TermKind::Fn { x, body } => {
                let (x, body) = self.apply_binder(x, body)?;
                Term::func(&x, &body)
            },
            TermKind::Eq { lhs, rhs } => {
                let lhs = self.apply(lhs)?;
                let rhs = self.apply(rhs)?;
                Term::equal(&lhs, &rhs)
            },
        }
    }

    fn apply_binder(&mut self, x: &Var, body: &Term) -> Result<(Term, Term), KernelError> {
        let domain = self.apply(x.get_type())?;

        // x is kept unless a replacement mentions it or its type changes, in which case it's
        // renamed to a fresh variable with the same name.
        let captures = self.map.iter().any(|(id, replacement)| {
            *id != x.id() && body.has_free(*id) && replacement.has_free(x.id())
        });
        let renamed = captures || !domain.ptr_eq(x.get_type());
        let new_x = if renamed {
            Term::var(x.name(), &domain)
        } else {
            x.to_term()
        };

        // occurrences of x in the body refer to this binder, not to any outer entry for x
        let shadowed = if renamed || self.map.contains_key(&x.id()) {
            Some(self.map.insert(x.id(), new_x.clone()))
        } else {
            None
        };
        let body = self.apply(body);
        match shadowed {
            Some(Some(outer)) => {
                self.map.insert(x.id(), outer);
            },
            Some(None) => {
                self.map.remove(&x.id());
            },
            None => (),
        }
        Ok((new_x, body?))
    }
}
