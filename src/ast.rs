use crate::reader::Node;
use crate::special_forms::{self, CondError, LambdaError, QuoteError};
use crate::types::Symbol;
use derive_more::Display;
use itertools::Itertools;
use std::fmt;
use std::rc::Rc;

pub const TRUE: &str = "#t";
pub const FALSE: &str = "#f";
pub const ELSE: &str = "else";
pub const EMPTY_LIST: &str = "()";

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expression {
    /// Raw atom text. Resolved when evaluated: a binding in scope wins, then
    /// integers, booleans, the empty list and primitive names.
    Literal(String),
    /// A name resolved only through the environment.
    Identifier(Symbol),
    Quote(Box<Expression>),
    Cond(Vec<Branch>),
    Lambda(Lambda),
    Application(Box<Expression>, Vec<Expression>),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Branch {
    pub question: Expression,
    pub answer: Expression,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Lambda {
    pub parameters: Vec<Symbol>,
    pub body: Rc<Expression>,
}

#[derive(Debug, Display, Eq, PartialEq)]
pub enum BuildError {
    #[display(fmt = "quote: {}", _0)]
    Quote(QuoteError),
    #[display(fmt = "cond: {}", _0)]
    Cond(CondError),
    #[display(fmt = "lambda: {}", _0)]
    Lambda(LambdaError),
}

impl std::error::Error for BuildError {}

pub type Result<T = Expression> = std::result::Result<T, BuildError>;

/// Give a bracket structure its meaning. Lists headed by `quote`, `cond` or
/// `lambda` become special forms; every other list is an application.
pub fn build(node: &Node) -> Result {
    match node {
        Node::Atom(text) => Ok(Expression::Literal(text.clone())),
        Node::List(elements) => match elements.split_first() {
            None => Ok(Expression::Literal(String::from(EMPTY_LIST))),
            Some((head, rest)) => match head.as_atom() {
                Some("quote") => special_forms::build_quote(rest),
                Some("cond") => special_forms::build_cond(rest),
                Some("lambda") => special_forms::build_lambda(rest),
                _ => build_application(head, rest),
            },
        },
    }
}

fn build_application(head: &Node, rest: &[Node]) -> Result {
    let func = build(head)?;
    let args = rest.iter().map(build).collect::<Result<Vec<_>>>()?;
    log::trace!("application of {} to {} arguments", func, args.len());
    Ok(Expression::Application(Box::new(func), args))
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(text) => write!(f, "{}", text),
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::Quote(quoted) => write!(f, "(quote {})", quoted),
            Expression::Cond(branches) => {
                write!(f, "(cond")?;
                for branch in branches {
                    write!(f, " ({} {})", branch.question, branch.answer)?;
                }
                write!(f, ")")
            }
            Expression::Lambda(lambda) => write!(
                f,
                "(lambda ({}) {})",
                lambda.parameters.iter().join(" "),
                lambda.body
            ),
            Expression::Application(func, args) if args.is_empty() => write!(f, "({})", func),
            Expression::Application(func, args) => {
                write!(f, "({} {})", func, args.iter().join(" "))
            }
        }
    }
}
