#![allow(unused_imports)] // workaround spurious warnings

use failure::Fail;
use lazy_static::lazy_static;
use maplit::hashmap;
use log::{debug, trace};

use std::sync::atomic::{self, AtomicU64};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fmt::Display;
use std::sync::{Arc, OnceLock};

pub mod hash;
pub mod error;
pub mod core;
pub mod kernel;
pub mod logger;

pub use self::error::{KernelError, ErrorKind, Typed};
pub use self::core::{Term, TermKind, VarId};
pub use self::kernel::Sequent;
