use super::*;

// Pairs of variables bound at the same depth on either side, innermost last.
type Bindings = Vec<(VarId, VarId)>;

impl PartialEq for Term {
    /// Alpha-equivalence. Variables compare by identity, except where both sides bind them at the
    /// same depth, in which case they compare as if one had been renamed to the other.
    fn eq(&self, other: &Term) -> bool {
        alpha_eq(self, other, &mut Vec::new())
    }
}

fn alpha_eq(t0: &Term, t1: &Term, bindings: &mut Bindings) -> bool {
    if bindings.is_empty() && t0.ptr_eq(t1) {
        return true;
    }
    match (t0.kind(), t1.kind()) {
        (TermKind::Wat, TermKind::Wat) |
        (TermKind::Type, TermKind::Type) |
        (TermKind::Bool, TermKind::Bool) => true,
        (TermKind::Var(v0), TermKind::Var(v1)) => var_eq(v0.id(), v1.id(), bindings),
        (TermKind::App { op: op0, arg: arg0 }, TermKind::App { op: op1, arg: arg1 }) => {
            alpha_eq(op0, op1, bindings) &&
            alpha_eq(arg0, arg1, bindings)
        },
        (TermKind::Pi { x: x0, body: body0 }, TermKind::Pi { x: x1, body: body1 }) |
        (TermKind::Fn { x: x0, body: body0 }, TermKind::Fn { x: x1, body: body1 }) => {
            binder_eq(x0, body0, x1, body1, bindings)
        },
        (TermKind::Eq { lhs: lhs0, rhs: rhs0 }, TermKind::Eq { lhs: lhs1, rhs: rhs1 }) => {
            alpha_eq(lhs0, lhs1, bindings) &&
            alpha_eq(rhs0, rhs1, bindings)
        },
        _ => false,
    }
}

fn var_eq(id0: VarId, id1: VarId, bindings: &Bindings) -> bool {
    for (bound0, bound1) in bindings.iter().rev() {
        if *bound0 == id0 || *bound1 == id1 {
            return *bound0 == id0 && *bound1 == id1;
        }
    }
    id0 == id1
}

fn binder_eq(x0: &Var, body0: &Term, x1: &Var, body1: &Term, bindings: &mut Bindings) -> bool {
    if !alpha_eq(x0.get_type(), x1.get_type(), bindings) {
        return false;
    }
    bindings.push((x0.id(), x1.id()));
    let ret = alpha_eq(body0, body1, bindings);
    bindings.pop();
    ret
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};
    use unwrap::unwrap;

    #[test]
    fn variables_compare_by_identity() {
        let x0 = Term::var("x", &Term::ty());
        let x1 = Term::var("x", &Term::ty());
        assert_eq!(x0, x0.clone());
        assert_ne!(x0, x1);
    }

    #[test]
    fn identity_functions_are_alpha_equal() {
        let a = Term::var("A", &Term::ty());
        let x = Term::var("x", &a);
        let y = Term::var("y", &a);
        assert_ne!(x, y);
        assert_eq!(unwrap!(Term::func(&x, &x)), unwrap!(Term::func(&y, &y)));
    }

    #[test]
    fn domains_must_match() {
        let a = Term::var("A", &Term::ty());
        let b = Term::var("B", &Term::ty());
        let x = Term::var("x", &a);
        let y = Term::var("y", &b);
        assert_ne!(unwrap!(Term::func(&x, &x)), unwrap!(Term::func(&y, &y)));
        assert_ne!(unwrap!(Term::pi(&x, &a)), unwrap!(Term::func(&x, &x)));
    }

    #[test]
    fn bound_and_free_occurrences_differ() {
        // λx. x  vs  λy. x
        let a = Term::var("A", &Term::ty());
        let x = Term::var("x", &a);
        let y = Term::var("y", &a);
        assert_ne!(unwrap!(Term::func(&x, &x)), unwrap!(Term::func(&y, &x)));
        assert_eq!(unwrap!(Term::func(&y, &x)), unwrap!(Term::func(&y, &x)));
    }

    #[test]
    fn shadowing_resolves_to_the_innermost_binder() {
        // λx. λx. x  vs  λx. λy. y  vs  λx. λy. x
        let a = Term::var("A", &Term::ty());
        let x = Term::var("x", &a);
        let y = Term::var("y", &a);
        let inner_x = unwrap!(Term::func(&x, &unwrap!(Term::func(&x, &x))));
        let inner_y = unwrap!(Term::func(&x, &unwrap!(Term::func(&y, &y))));
        let outer_x = unwrap!(Term::func(&x, &unwrap!(Term::func(&y, &x))));
        assert_eq!(inner_x, inner_y);
        assert_ne!(inner_x, outer_x);
    }

    #[test]
    fn dependent_domains_are_compared_under_the_binder() {
        // λA. λa:A. a  vs  λB. λb:B. b
        let a = Term::var("A", &Term::ty());
        let b = Term::var("B", &Term::ty());
        let xa = Term::var("a", &a);
        let xb = Term::var("b", &b);
        let poly_a = unwrap!(Term::func(&a, &unwrap!(Term::func(&xa, &xa))));
        let poly_b = unwrap!(Term::func(&b, &unwrap!(Term::func(&xb, &xb))));
        assert_eq!(poly_a, poly_b);
    }
}
