use super::*;

#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Enclosed = 0,
    App = 1,
    Equality = 2,
    Binder = 3,
}

/// Numbers variables in the order they're first rendered. One per top-level render, so the same
/// variable gets the same number everywhere in it.
pub struct NameEnv {
    stored: HashMap<VarId, u32>,
    counter: u32,
}

impl NameEnv {
    pub fn new() -> NameEnv {
        NameEnv {
            stored: HashMap::new(),
            counter: 0,
        }
    }

    pub fn get(&mut self, id: VarId) -> u32 {
        let counter = &mut self.counter;
        *self.stored.entry(id).or_insert_with(|| {
            *counter += 1;
            *counter - 1
        })
    }
}

fn term_precedence(term: &Term) -> Precedence {
    match term.kind() {
        TermKind::Wat |
        TermKind::Type |
        TermKind::Bool |
        TermKind::Var(..) => Precedence::Enclosed,
        TermKind::App { .. } => Precedence::App,
        TermKind::Eq { .. } => Precedence::Equality,
        TermKind::Pi { .. } |
        TermKind::Fn { .. } => Precedence::Binder,
    }
}

pub fn render_term(
    term: &Term,
    f: &mut fmt::Formatter,
    env: &mut NameEnv,
    precedence: Precedence,
) -> fmt::Result {
    let inner_precedence = term_precedence(term);
    if inner_precedence > precedence {
        write!(f, "(")?;
    }

    match term.kind() {
        TermKind::Wat => write!(f, "Wat")?,
        TermKind::Type => write!(f, "Type")?,
        TermKind::Bool => write!(f, "Bool")?,
        TermKind::Var(var) => render_var(var, f, env)?,
        TermKind::App { op, arg } => {
            render_term(op, f, env, Precedence::App)?;
            write!(f, " ")?;
            render_term(arg, f, env, Precedence::Enclosed)?;
        },
        TermKind::Pi { x, body } => {
            write!(f, "Π")?;
            render_binder(x, body, f, env)?;
        },
        TermKind::Fn { x, body } => {
            write!(f, "λ")?;
            render_binder(x, body, f, env)?;
        },
        TermKind::Eq { lhs, rhs } => {
            render_term(lhs, f, env, Precedence::App)?;
            write!(f, " = ")?;
            render_term(rhs, f, env, Precedence::App)?;
        },
    }

    if inner_precedence > precedence {
        write!(f, ")")?;
    }
    Ok(())
}

fn render_var(var: &Var, f: &mut fmt::Formatter, env: &mut NameEnv) -> fmt::Result {
    write!(f, "{}{}", var.name(), env.get(var.id()))
}

fn render_binder(x: &Var, body: &Term, f: &mut fmt::Formatter, env: &mut NameEnv) -> fmt::Result {
    render_var(x, f, env)?;
    write!(f, "::")?;
    render_term(x.get_type(), f, env, Precedence::App)?;
    write!(f, ". ")?;
    render_term(body, f, env, Precedence::Binder)
}

impl Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render_term(self, f, &mut NameEnv::new(), Precedence::Binder)
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            TermKind::Wat => write!(f, "Wat"),
            TermKind::Type => write!(f, "Type"),
            TermKind::Bool => write!(f, "Bool"),
            TermKind::Var(var) => write!(f, "{:?}", var),
            TermKind::App { op, arg } => write!(f, "App({:?}, {:?})", op, arg),
            TermKind::Pi { x, body } => write!(f, "Pi({:?}::{:?}, {:?})", x, x.get_type(), body),
            TermKind::Fn { x, body } => write!(f, "Fn({:?}::{:?}, {:?})", x, x.get_type(), body),
            TermKind::Eq { lhs, rhs } => write!(f, "Eq({:?}, {:?})", lhs, rhs),
        }
    }
}
