use super::*;

/// Binders enclosing the subterm currently being indexed, innermost last.
struct VarStack {
    stored: Vec<VarId>,
}

impl VarStack {
    fn new() -> VarStack {
        VarStack { stored: Vec::new() }
    }

    fn push(&mut self, id: VarId) {
        self.stored.push(id);
    }

    fn pop(&mut self) {
        self.stored.pop();
    }

    // distance from the innermost binder
    fn depth(&self, id: VarId) -> Option<usize> {
        self.stored.iter().rev().position(|bound| *bound == id)
    }
}

impl Term {
    /// A hash of the term that's invariant under renaming of bound variables.
    ///
    /// Alpha-equal terms get equal indices, but not the other way around: this is only a
    /// pre-filter for `==`. Fails if the term has a free variable.
    pub fn index(&self) -> Result<u128, KernelError> {
        self.index_in(&mut VarStack::new())
    }

    fn index_in(&self, stack: &mut VarStack) -> Result<u128, KernelError> {
        if !self.is_closed() {
            return self.compute_index(stack);
        }
        // closed terms index the same under any binder stack
        if let Some(index) = self.cached_index().get() {
            return Ok(*index);
        }
        let index = self.compute_index(&mut VarStack::new())?;
        let _ = self.cached_index().set(index);
        Ok(index)
    }

    fn compute_index(&self, stack: &mut VarStack) -> Result<u128, KernelError> {
        match self.kind() {
            TermKind::Wat => Ok(hash::tag("Wat")),
            TermKind::Type => Ok(hash::tag("Type")),
            TermKind::Bool => Ok(hash::tag("Bool")),
            TermKind::Var(var) => {
                match stack.depth(var.id()) {
                    Some(depth) => Ok(depth as u128),
                    None => Err(KernelError::FreeVariable { var: self.clone() }),
                }
            },
            TermKind::App { op, arg } => {
                let op = op.index_in(stack)?;
                let arg = arg.index_in(stack)?;
                Ok(hash::combine(&[hash::tag("App"), op, arg]))
            },
            TermKind::Pi { x, body } => {
                let (domain, body) = index_binder(x, body, stack)?;
                Ok(hash::combine(&[hash::tag("Pi"), domain, body]))
            },
            TermKind::Fn { x, body } => {
                let (domain, body) = index_binder(x, body, stack)?;
                Ok(hash::combine(&[hash::tag("Fn"), domain, body]))
            },
            TermKind::Eq { lhs, rhs } => {
                let lhs = lhs.index_in(stack)?;
                let rhs = rhs.index_in(stack)?;
                Ok(hash::combine(&[hash::tag("Eq"), lhs, rhs]))
            },
        }
    }
}

fn index_binder(x: &Var, body: &Term, stack: &mut VarStack) -> Result<(u128, u128), KernelError> {
    let domain = x.get_type().index_in(stack)?;
    stack.push(x.id());
    let body = body.index_in(stack);
    stack.pop();
    Ok((domain, body?))
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};
    use unwrap::unwrap;

    #[test]
    fn sorts_index_to_their_tags() {
        assert_eq!(unwrap!(Term::wat().index()), hash::sdbm_hash("Wat"));
        assert_eq!(unwrap!(Term::bool().index()), hash::sdbm_hash("Bool"));
        assert_ne!(unwrap!(Term::ty().index()), unwrap!(Term::bool().index()));
    }

    #[test]
    fn alpha_equal_terms_index_equal() {
        let x = Term::var("x", &Term::bool());
        let y = Term::var("y", &Term::bool());
        let fx = unwrap!(Term::func(&x, &x));
        let fy = unwrap!(Term::func(&y, &y));
        assert_eq!(fx, fy);
        assert_eq!(unwrap!(fx.index()), unwrap!(fy.index()));

        let pa = Term::var("A", &Term::ty());
        let pb = Term::var("B", &Term::ty());
        let xa = Term::var("a", &pa);
        let xb = Term::var("b", &pb);
        let poly_a = unwrap!(Term::func(&pa, &unwrap!(Term::func(&xa, &xa))));
        let poly_b = unwrap!(Term::func(&pb, &unwrap!(Term::func(&xb, &xb))));
        assert_eq!(unwrap!(poly_a.index()), unwrap!(poly_b.index()));
    }

    #[test]
    fn binder_position_matters() {
        // λx. λy. x  vs  λx. λy. y
        let x = Term::var("x", &Term::bool());
        let y = Term::var("y", &Term::bool());
        let k = unwrap!(Term::func(&x, &unwrap!(Term::func(&y, &x))));
        let ki = unwrap!(Term::func(&x, &unwrap!(Term::func(&y, &y))));
        assert_ne!(unwrap!(k.index()), unwrap!(ki.index()));
    }

    #[test]
    fn closed_subterms_are_cached() {
        let x = Term::var("x", &Term::bool());
        let id = unwrap!(Term::func(&x, &x));
        assert!(id.cached_index().get().is_none());
        let index = unwrap!(id.index());
        assert_eq!(id.cached_index().get(), Some(&index));
        assert_eq!(unwrap!(id.index()), index);
    }

    #[test]
    fn free_variables_cannot_be_indexed() {
        let x = Term::var("x", &Term::bool());
        let y = Term::var("y", &Term::bool());
        let open = unwrap!(Term::func(&y, &x));
        match open.index() {
            Err(KernelError::FreeVariable { var }) => assert_eq!(var, x),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(index) => panic!("unexpectedly indexed: {}", index),
        }
    }
}
