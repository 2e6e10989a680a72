use super::*;

static NEXT_VAR_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a variable. Allocated once per variable and never reused, so two variables with
/// the same name and type are still different variables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(u64);

impl VarId {
    pub fn fresh() -> VarId {
        VarId(NEXT_VAR_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A variable as it appears inside a term: its identity, display name and declared type.
#[derive(Clone)]
pub struct Var {
    id: VarId,
    name: String,
    ty: Term,
}

impl PartialEq for Var {
    fn eq(&self, other: &Var) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl Var {
    pub(crate) fn fresh(name: &str, ty: &Term) -> Var {
        Var {
            id: VarId::fresh(),
            name: name.to_owned(),
            ty: ty.clone(),
        }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_type(&self) -> &Term {
        &self.ty
    }

    pub fn to_term(&self) -> Term {
        Term::from_var(self.clone())
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{:?}", self.name, self.id)
    }
}
