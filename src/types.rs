use crate::ast::Expression;
use crate::environment::Environment;
use crate::evaluator;
use derive_more::{Deref, Display};
use itertools::Itertools;
use std::borrow::Borrow;
use std::fmt;
use std::ops::RangeInclusive;
use std::rc::Rc;

pub type Int = i64;

#[derive(Deref, Display, Debug, PartialEq, Eq, Hash, Clone)]
pub struct Symbol(pub String);

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol(String::from(name))
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Arity {
    Between(RangeInclusive<usize>),
}

#[derive(Debug, Display, Eq, PartialEq)]
#[display(
    fmt = "when evaluating {} expected {} arguments, but received {} arguments",
    name,
    expected,
    got
)]
pub struct BadArgCount {
    pub name: String,
    pub expected: Arity,
    pub got: usize,
}

impl Arity {
    pub(crate) const fn exactly(n: usize) -> Self {
        Self::Between(n..=n)
    }

    pub(crate) fn contains(&self, n: usize) -> bool {
        match self {
            Self::Between(range) => range.contains(&n),
        }
    }

    pub(crate) fn validate_for(&self, n: usize, name: &str) -> Result<(), BadArgCount> {
        match self.contains(n) {
            true => Ok(()),
            false => Err(BadArgCount {
                name: String::from(name),
                expected: self.clone(),
                got: n,
            }),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Between(r) => {
                if r.start() == r.end() {
                    write!(f, "exactly {}", r.start())
                } else {
                    write!(f, "from {} to {}", r.start(), r.end())
                }
            }
        }
    }
}

pub struct PrimitiveFn {
    pub name: &'static str,
    pub arity: Arity,
    pub fn_ptr: fn(&[Value]) -> evaluator::Result,
}

impl fmt::Debug for PrimitiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "primitive function #<{}>", self.name)
    }
}

pub struct Closure {
    pub parameters: Vec<Symbol>,
    pub body: Rc<Expression>,
    pub parent: Rc<Environment>,
}

impl fmt::Debug for Closure {
    // Not derived: the captured environment can be arbitrarily deep.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Closure{{parameters: {:?}, body: {}}}",
            self.parameters, self.body
        )
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<closure ({})>", self.parameters.iter().join(" "))
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(Int),
    Bool(bool),
    Symbol(Symbol),
    /// The empty list, `()`.
    Empty,
    Pair(Rc<(Value, Value)>),
    Primitive(&'static PrimitiveFn),
    Closure(Rc<Closure>),
}

#[derive(Debug, Display, Eq, PartialEq)]
pub enum TypeMismatch {
    #[display(fmt = "not an integer: {}", _0)]
    NotAnInt(String),
    #[display(fmt = "not a pair: {}", _0)]
    NotAPair(String),
}

impl Value {
    pub fn cons(head: Value, tail: Value) -> Self {
        Value::Pair(Rc::new((head, tail)))
    }

    /// Chain `elements` into pairs ending in the empty list.
    pub fn list(elements: Vec<Value>) -> Self {
        elements
            .into_iter()
            .rev()
            .fold(Value::Empty, |tail, head| Value::cons(head, tail))
    }

    pub fn new_symbol(name: &str) -> Self {
        Value::Symbol(Symbol::from(name))
    }

    pub(crate) fn as_int(&self) -> Result<Int, TypeMismatch> {
        match self {
            Value::Integer(x) => Ok(*x),
            _ => Err(TypeMismatch::NotAnInt(self.to_string())),
        }
    }

    pub(crate) fn as_pair(&self) -> Result<&(Value, Value), TypeMismatch> {
        match self {
            Value::Pair(pair) => Ok(pair),
            _ => Err(TypeMismatch::NotAPair(self.to_string())),
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::printer::pr_str(self))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Integer(x), Integer(y)) => x == y,
            (Bool(x), Bool(y)) => x == y,
            (Symbol(x), Symbol(y)) => x == y,
            (Empty, Empty) => true,
            (Pair(x), Pair(y)) => Rc::ptr_eq(x, y) || (x.0 == y.0 && x.1 == y.1),
            (Primitive(x), Primitive(y)) => x.name == y.name,
            (Closure(x), Closure(y)) => Rc::ptr_eq(x, y),
            (_, _) => false,
        }
    }
}

impl Eq for Value {}
