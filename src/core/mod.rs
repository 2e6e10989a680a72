use super::*;

mod var;
mod term;
mod alpha;
mod subst;
mod index;
pub mod render;

pub use self::var::{Var, VarId};
pub use self::term::{Term, TermKind};
pub(crate) use self::subst::subst_sequent;
