use crate::types::{Symbol, Value};
use derive_more::Display;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub type Frame = HashMap<Symbol, Value>;

#[derive(Debug, Display, Eq, PartialEq)]
#[display(fmt = "'{}' not found", _0)]
pub struct UnknownSymbol(pub String);

/// One frame of bindings in front of the scope it was created in. Frames are
/// never changed after construction, so closures can share them freely.
#[derive(Default)]
pub struct Environment {
    frame: Frame,
    outer: Option<Rc<Environment>>,
}

impl Environment {
    /// The top-level scope: no bindings at all.
    pub fn empty() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn spawn_from(outer: &Rc<Environment>, frame: Frame) -> Rc<Self> {
        Rc::new(Self {
            frame,
            outer: Some(outer.clone()),
        })
    }

    /// Innermost frame first, so inner bindings shadow outer ones.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.frame.get(key) {
            Some(value) => Some(value),
            None => self.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    pub fn fetch(&self, key: &str) -> Result<Value, UnknownSymbol> {
        self.get(key)
            .cloned()
            .ok_or_else(|| UnknownSymbol(String::from(key)))
    }

    pub fn depth(&self) -> usize {
        1 + self.outer.as_ref().map_or(0, |outer| outer.depth())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.frame.keys().map(|k| k.as_str()).sorted().join(" ");
        write!(f, "{{{}}}", names)?;
        match &self.outer {
            Some(outer) => write!(f, " -> {}", outer),
            None => Ok(()),
        }
    }
}
