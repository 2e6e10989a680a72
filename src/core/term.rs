use super::*;

lazy_static! {
    static ref WAT: Term = Term::sort(TermKind::Wat, None);
    static ref TYPE: Term = Term::sort(TermKind::Type, Some(WAT.clone()));
    static ref BOOL: Term = Term::sort(TermKind::Bool, Some(TYPE.clone()));
}

#[derive(Clone)]
pub struct Term {
    inner: Arc<TermInner>,
}

struct TermInner {
    kind: TermKind,
    ty: Option<Term>,
    free: HashSet<VarId>,
    // only populated for closed terms, whose index doesn't depend on the binder stack
    index: OnceLock<u128>,
}

pub enum TermKind {
    /// The kind of kinds. The only term without a type.
    Wat,
    Type,
    Bool,
    Var(Var),
    App {
        op: Term,
        arg: Term,
    },
    Pi {
        x: Var,
        body: Term,
    },
    Fn {
        x: Var,
        body: Term,
    },
    Eq {
        lhs: Term,
        rhs: Term,
    },
}

impl Term {
    fn new(kind: TermKind, ty: Option<Term>, free: HashSet<VarId>) -> Term {
        Term {
            inner: Arc::new(TermInner {
                kind,
                ty,
                free,
                index: OnceLock::new(),
            }),
        }
    }

    fn sort(kind: TermKind, ty: Option<Term>) -> Term {
        Term::new(kind, ty, HashSet::new())
    }

    pub fn kind(&self) -> &TermKind {
        &self.inner.kind
    }

    pub fn get_type(&self) -> Option<Term> {
        self.inner.ty.clone()
    }

    pub(crate) fn type_ref(&self) -> Option<&Term> {
        self.inner.ty.as_ref()
    }

    pub fn free_vars(&self) -> &HashSet<VarId> {
        &self.inner.free
    }

    pub fn has_free(&self, id: VarId) -> bool {
        self.inner.free.contains(&id)
    }

    pub fn is_closed(&self) -> bool {
        self.inner.free.is_empty()
    }

    pub(crate) fn cached_index(&self) -> &OnceLock<u128> {
        &self.inner.index
    }

    pub(crate) fn ptr_eq(&self, other: &Term) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn as_var(&self) -> Option<&Var> {
        match self.kind() {
            TermKind::Var(var) => Some(var),
            _ => None,
        }
    }

    pub fn var_id(&self) -> Option<VarId> {
        self.as_var().map(Var::id)
    }

    pub fn as_eq(&self) -> Option<(&Term, &Term)> {
        match self.kind() {
            TermKind::Eq { lhs, rhs } => Some((lhs, rhs)),
            _ => None,
        }
    }

    pub fn as_app(&self) -> Option<(&Term, &Term)> {
        match self.kind() {
            TermKind::App { op, arg } => Some((op, arg)),
            _ => None,
        }
    }

    /// The bound variable and body of a `Pi` or `Fn`.
    pub fn as_binder(&self) -> Option<(&Var, &Term)> {
        match self.kind() {
            TermKind::Pi { x, body } |
            TermKind::Fn { x, body } => Some((x, body)),
            _ => None,
        }
    }

    pub fn is_fn(&self) -> bool {
        match self.kind() {
            TermKind::Fn { .. } => true,
            _ => false,
        }
    }

    pub fn wat() -> Term {
        WAT.clone()
    }

    pub fn ty() -> Term {
        TYPE.clone()
    }

    pub fn bool() -> Term {
        BOOL.clone()
    }

    /// A fresh variable. Never equal to any other variable, whatever its name.
    pub fn var(name: &str, ty: &Term) -> Term {
        Term::from_var(Var::fresh(name, ty))
    }

    pub(crate) fn from_var(var: Var) -> Term {
        let mut free = var.get_type().free_vars().clone();
        free.insert(var.id());
        let ty = var.get_type().clone();
        Term::new(TermKind::Var(var), Some(ty), free)
    }

    pub fn app(op: &Term, arg: &Term) -> Result<Term, KernelError> {
        let ty = match op.type_ref() {
            Some(op_type) if op_type.as_binder().is_some() => op_type.apply_in("app", arg)?,
            _ => return Err(KernelError::NotAFunction { op: Typed::of(op) }),
        };
        let free = union(op.free_vars(), arg.free_vars());
        let kind = TermKind::App {
            op: op.clone(),
            arg: arg.clone(),
        };
        Ok(Term::new(kind, Some(ty), free))
    }

    pub fn pi(x: &Term, body: &Term) -> Result<Term, KernelError> {
        let x = bound_var("pi", x)?;
        let free = binder_free(&x, body);
        let kind = TermKind::Pi {
            x,
            body: body.clone(),
        };
        Ok(Term::new(kind, Some(Term::ty()), free))
    }

    pub fn func(x: &Term, body: &Term) -> Result<Term, KernelError> {
        let body_type = match body.type_ref() {
            Some(body_type) => body_type,
            None => return Err(KernelError::Untyped { term: body.clone() }),
        };
        let ty = Term::pi(x, body_type)?;
        let x = bound_var("fn", x)?;
        let free = binder_free(&x, body);
        let kind = TermKind::Fn {
            x,
            body: body.clone(),
        };
        Ok(Term::new(kind, Some(ty), free))
    }

    pub fn equal(lhs: &Term, rhs: &Term) -> Result<Term, KernelError> {
        if lhs.type_ref() != rhs.type_ref() {
            return Err(KernelError::type_mismatch("eq", lhs, rhs));
        }
        let free = union(lhs.free_vars(), rhs.free_vars());
        let kind = TermKind::Eq {
            lhs: lhs.clone(),
            rhs: rhs.clone(),
        };
        Ok(Term::new(kind, Some(Term::bool()), free))
    }

    /// Applies a `Pi` or `Fn` to `arg`, substituting it for the bound variable.
    pub fn apply(&self, arg: &Term) -> Result<Term, KernelError> {
        self.apply_in("apply", arg)
    }

    fn apply_in(&self, context: &'static str, arg: &Term) -> Result<Term, KernelError> {
        let (x, body) = match self.as_binder() {
            Some(binder) => binder,
            None => return Err(KernelError::NotAFunction { op: Typed::of(self) }),
        };
        if arg.type_ref() != Some(x.get_type()) {
            let x = x.to_term();
            return Err(KernelError::type_mismatch(context, &x, arg));
        }
        body.subst_var(x, arg)
    }
}

fn bound_var(context: &'static str, x: &Term) -> Result<Var, KernelError> {
    match x.as_var() {
        Some(var) => Ok(var.clone()),
        None => Err(KernelError::NotAVariable { rule: context, term: x.clone() }),
    }
}

fn union(a: &HashSet<VarId>, b: &HashSet<VarId>) -> HashSet<VarId> {
    let mut ret = a.clone();
    ret.extend(b.iter().cloned());
    ret
}

fn binder_free(x: &Var, body: &Term) -> HashSet<VarId> {
    let mut ret = x.get_type().free_vars().clone();
    ret.extend(body.free_vars().iter().filter(|id| **id != x.id()).cloned());
    ret
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};
    use unwrap::unwrap;

    #[test]
    fn sorts() {
        assert!(Term::wat().get_type().is_none());
        assert_eq!(Term::ty().get_type(), Some(Term::wat()));
        assert_eq!(Term::bool().get_type(), Some(Term::ty()));
        assert!(Term::bool().is_closed());
        assert_ne!(Term::ty(), Term::bool());
    }

    #[test]
    fn sorts_are_equal_to_themselves() {
        unwrap!(Term::equal(&Term::wat(), &Term::wat()));
        unwrap!(Term::equal(&Term::ty(), &Term::ty()));
        unwrap!(Term::equal(&Term::bool(), &Term::bool()));
    }

    #[test]
    fn wat_eq_type_is_a_type_error() {
        match Term::equal(&Term::wat(), &Term::ty()) {
            Err(KernelError::TypeMismatch { .. }) => (),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(t) => panic!("unexpectedly built {}", t),
        }
    }

    #[test]
    fn var_free_set_includes_its_type() {
        let a = Term::var("A", &Term::ty());
        let x = Term::var("x", &a);
        let a_id = unwrap!(a.var_id());
        let x_id = unwrap!(x.var_id());
        assert!(x.has_free(a_id));
        assert!(x.has_free(x_id));
        assert_eq!(x.get_type(), Some(a.clone()));
    }

    #[test]
    fn fn_type_is_pi_of_body_type() {
        let a = Term::var("A", &Term::ty());
        let x = Term::var("x", &a);
        let id = unwrap!(Term::func(&x, &x));
        assert_eq!(id.get_type(), Some(unwrap!(Term::pi(&x, &a))));
        assert_eq!(unwrap!(Term::pi(&x, &a)).get_type(), Some(Term::ty()));
        let a_id = unwrap!(a.var_id());
        let x_id = unwrap!(x.var_id());
        assert!(id.has_free(a_id));
        assert!(!id.has_free(x_id));
    }

    #[test]
    fn application_checks_the_domain() {
        let a = Term::var("A", &Term::ty());
        let b = Term::var("B", &Term::ty());
        let x = Term::var("x", &a);
        let y = Term::var("y", &b);
        let id = unwrap!(Term::func(&x, &x));
        let applied = unwrap!(Term::app(&id, &x));
        assert_eq!(applied.get_type(), Some(a.clone()));
        match Term::app(&id, &y) {
            Err(KernelError::TypeMismatch { .. }) => (),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(t) => panic!("unexpectedly built {}", t),
        }
        match Term::app(&x, &x) {
            Err(KernelError::NotAFunction { .. }) => (),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(t) => panic!("unexpectedly built {}", t),
        }
    }

    #[test]
    fn dependent_application_substitutes_into_the_result_type() {
        // polymorphic identity: λA. λa:A. a  ::  ΠA. Πa:A. A
        let a = Term::var("A", &Term::ty());
        let x = Term::var("a", &a);
        let poly_id = unwrap!(Term::func(&a, &unwrap!(Term::func(&x, &x))));
        let applied = unwrap!(Term::app(&poly_id, &Term::bool()));
        let p = Term::var("p", &Term::bool());
        let expected = unwrap!(Term::pi(&p, &Term::bool()));
        assert_eq!(applied.get_type(), Some(expected));
    }

    #[test]
    fn binders_need_variables() {
        match Term::func(&Term::bool(), &Term::bool()) {
            Err(KernelError::NotAVariable { .. }) => (),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(t) => panic!("unexpectedly built {}", t),
        }
    }
}
