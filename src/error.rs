use super::*;

/// A term paired with its type, for error messages.
#[derive(Debug, Clone)]
pub struct Typed {
    pub term: Term,
    pub ty: Option<Term>,
}

impl Typed {
    pub fn of(term: &Term) -> Typed {
        Typed {
            term: term.clone(),
            ty: term.get_type(),
        }
    }
}

impl Display for Typed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{} :: {}", self.term, ty),
            None => write!(f, "{} :: <untyped>", self.term),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    RuleMisuse,
    FreeVariable,
}

#[derive(Debug, Clone, Fail)]
pub enum KernelError {
    #[fail(display = "{}: {} and {} are not of equal types", context, lhs, rhs)]
    TypeMismatch {
        context: &'static str,
        lhs: Typed,
        rhs: Typed,
    },
    #[fail(display = "cannot apply {}, its type is not a function type", op)]
    NotAFunction {
        op: Typed,
    },
    #[fail(display = "{} has no type", term)]
    Untyped {
        term: Term,
    },
    #[fail(display = "{}: expected an equality, got {}", rule, term)]
    NotAnEquality {
        rule: &'static str,
        term: Term,
    },
    #[fail(display = "{}: expected a function, got {}", rule, term)]
    NotAFn {
        rule: &'static str,
        term: Term,
    },
    #[fail(display = "{}: expected a variable, got {}", rule, term)]
    NotAVariable {
        rule: &'static str,
        term: Term,
    },
    #[fail(display = "{}: expected a proposition, got {}", rule, term)]
    NotAProposition {
        rule: &'static str,
        term: Typed,
    },
    #[fail(display = "{}: {} != {}", rule, lhs, rhs)]
    SharedTermMismatch {
        rule: &'static str,
        lhs: Typed,
        rhs: Typed,
    },
    #[fail(display = "variable {} appears free in hypothesis {}", var, hyp)]
    EigenvariableLeak {
        var: Term,
        hyp: Term,
    },
    #[fail(display = "cannot calculate index of free variable {}", var)]
    FreeVariable {
        var: Term,
    },
}

impl KernelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KernelError::TypeMismatch { .. } |
            KernelError::NotAFunction { .. } |
            KernelError::Untyped { .. } => ErrorKind::Type,

            KernelError::NotAnEquality { .. } |
            KernelError::NotAFn { .. } |
            KernelError::NotAVariable { .. } |
            KernelError::NotAProposition { .. } |
            KernelError::SharedTermMismatch { .. } |
            KernelError::EigenvariableLeak { .. } => ErrorKind::RuleMisuse,

            KernelError::FreeVariable { .. } => ErrorKind::FreeVariable,
        }
    }

    pub(crate) fn type_mismatch(context: &'static str, lhs: &Term, rhs: &Term) -> KernelError {
        KernelError::TypeMismatch {
            context,
            lhs: Typed::of(lhs),
            rhs: Typed::of(rhs),
        }
    }
}
