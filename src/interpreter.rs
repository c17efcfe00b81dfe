use crate::ast::{self, Expression};
use crate::environment::Environment;
use crate::types::Value;
use crate::{evaluator, reader};
use derive_more::Display;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

/// Which stage of the pipeline gave up.
#[derive(Debug, Display, Eq, PartialEq)]
pub enum Error {
    #[display(fmt = "read error: {}", _0)]
    Read(reader::Error),
    #[display(fmt = "syntax error: {}", _0)]
    Build(ast::BuildError),
    #[display(fmt = "eval error: {}", _0)]
    Eval(evaluator::Error),
}

impl std::error::Error for Error {}

/// Source text to expression tree: tokenize, group brackets, build.
pub fn read(input: &str) -> Result<Expression> {
    let node = reader::read_str(input).map_err(Error::Read)?;
    ast::build(&node).map_err(Error::Build)
}

pub fn eval(expr: &Expression, env: &Rc<Environment>) -> Result {
    evaluator::evaluate(expr, env).map_err(Error::Eval)
}

/// Read and evaluate one expression against an empty environment.
pub fn rep(input: &str) -> Result {
    read(input).and_then(|expr| eval(&expr, &Environment::empty()))
}
