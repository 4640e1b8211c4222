//! Wire types for the class management backend.

mod class;
mod lenient;
mod roster;
mod send;

pub use class::*;
pub use roster::*;
pub use send::*;

use std::collections::BTreeMap;

/// A flat key/value table of query parameters or headers.
pub type ParamMap = BTreeMap<String, String>;
