use crate::ast::{self, build, BuildError, Branch, Expression, Lambda};
use crate::environment::Environment;
use crate::evaluator::{evaluate, Error, Result};
use crate::reader::Node;
use crate::types::{Closure, Int, Symbol, Value};
use derive_more::Display;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Display, Eq, PartialEq)]
pub enum QuoteError {
    #[display(fmt = "expected exactly 1 argument, got {}", _0)]
    WrongArgCount(usize),
}

pub fn build_quote(args: &[Node]) -> ast::Result {
    match args {
        [quoted] => Ok(Expression::Quote(Box::new(build(quoted)?))),
        _ => Err(BuildError::Quote(QuoteError::WrongArgCount(args.len()))),
    }
}

/// Quoting hands back the expression as data: lists become chains of pairs,
/// atoms become integers, booleans, the empty list or symbols.
pub fn apply_quote(quoted: &Expression) -> Value {
    match quoted {
        Expression::Literal(text) => quote_atom(text),
        Expression::Identifier(name) => Value::Symbol(name.clone()),
        Expression::Quote(inner) => {
            Value::list(vec![Value::new_symbol("quote"), apply_quote(inner)])
        }
        Expression::Cond(branches) => {
            let mut elements = vec![Value::new_symbol("cond")];
            elements.extend(branches.iter().map(|branch| {
                Value::list(vec![
                    apply_quote(&branch.question),
                    apply_quote(&branch.answer),
                ])
            }));
            Value::list(elements)
        }
        Expression::Lambda(lambda) => Value::list(vec![
            Value::new_symbol("lambda"),
            Value::list(
                lambda
                    .parameters
                    .iter()
                    .cloned()
                    .map(Value::Symbol)
                    .collect(),
            ),
            apply_quote(&lambda.body),
        ]),
        Expression::Application(func, args) => {
            let mut elements = vec![apply_quote(func)];
            elements.extend(args.iter().map(apply_quote));
            Value::list(elements)
        }
    }
}

fn quote_atom(text: &str) -> Value {
    if let Ok(x) = text.parse::<Int>() {
        return Value::Integer(x);
    }
    match text {
        ast::TRUE => Value::Bool(true),
        ast::FALSE => Value::Bool(false),
        ast::EMPTY_LIST => Value::Empty,
        _ => Value::new_symbol(text),
    }
}

#[derive(Debug, Display, Eq, PartialEq)]
pub enum CondError {
    #[display(fmt = "branch {} is not a list", _0)]
    BranchNotAList(usize),
    #[display(fmt = "branch {} should have a question and an answer, got {} parts", _0, _1)]
    BranchWrongLength(usize, usize),
}

pub fn build_cond(args: &[Node]) -> ast::Result {
    let build_branch = |(index, node): (usize, &Node)| -> ast::Result<Branch> {
        match node {
            Node::List(parts) => match parts.as_slice() {
                [question, answer] => Ok(Branch {
                    question: build(question)?,
                    answer: build(answer)?,
                }),
                _ => Err(BuildError::Cond(CondError::BranchWrongLength(
                    index,
                    parts.len(),
                ))),
            },
            Node::Atom(_) => Err(BuildError::Cond(CondError::BranchNotAList(index))),
        }
    };
    let branches = args
        .iter()
        .enumerate()
        .map(build_branch)
        .collect::<ast::Result<Vec<_>>>()?;
    Ok(Expression::Cond(branches))
}

/// Only an answer whose question is exactly `#t` is evaluated; the remaining
/// branches are never touched.
pub fn apply_cond(branches: &[Branch], env: &Rc<Environment>) -> Result {
    for branch in branches {
        if let Value::Bool(true) = evaluate(&branch.question, env)? {
            log::trace!("cond took branch {}", branch.question);
            return evaluate(&branch.answer, env);
        }
    }
    Err(Error::NoBranchTaken)
}

#[derive(Debug, Display, Eq, PartialEq)]
pub enum LambdaError {
    #[display(fmt = "expected a parameter list and a body, got {} arguments", _0)]
    WrongArgCount(usize),
    #[display(fmt = "parameters must be given as a list")]
    ParametersNotGivenAsList,
    #[display(fmt = "parameter {} is not a symbol", _0)]
    ParameterNotASymbol(usize),
    #[display(fmt = "parameter '{}' appears more than once", _0)]
    DuplicateParameter(String),
}

pub fn build_lambda(args: &[Node]) -> ast::Result {
    let (parameters, body) = match args {
        [parameters, body] => Ok((parameters, body)),
        _ => Err(LambdaError::WrongArgCount(args.len())),
    }
    .map_err(BuildError::Lambda)?;
    let parameters = match parameters {
        Node::List(nodes) => Ok(nodes),
        Node::Atom(_) => Err(BuildError::Lambda(LambdaError::ParametersNotGivenAsList)),
    }?;

    let mut seen = HashSet::new();
    let mut symbols = Vec::with_capacity(parameters.len());
    for (index, node) in parameters.iter().enumerate() {
        let name = node
            .as_atom()
            .ok_or(BuildError::Lambda(LambdaError::ParameterNotASymbol(index)))?;
        if !seen.insert(name) {
            return Err(BuildError::Lambda(LambdaError::DuplicateParameter(
                name.into(),
            )));
        }
        symbols.push(Symbol::from(name));
    }

    Ok(Expression::Lambda(Lambda {
        parameters: symbols,
        body: Rc::new(build(body)?),
    }))
}

pub fn apply_lambda(lambda: &Lambda, env: &Rc<Environment>) -> Value {
    let closure = Closure {
        parameters: lambda.parameters.clone(),
        body: lambda.body.clone(),
        parent: env.clone(),
    };
    Value::Closure(Rc::new(closure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_str;

    fn quoted(text: &str) -> Value {
        apply_quote(&build(&read_str(text).unwrap()).unwrap())
    }

    #[test]
    fn quoted_atoms() {
        assert_eq!(quoted("a"), Value::new_symbol("a"));
        assert_eq!(quoted("-3"), Value::Integer(-3));
        assert_eq!(quoted("#f"), Value::Bool(false));
        assert_eq!(quoted("()"), Value::Empty);
        assert_eq!(quoted("else"), Value::new_symbol("else"));
    }

    #[test]
    fn quoted_lists_are_pairs() {
        assert_eq!(
            quoted("(a (b 1))"),
            Value::list(vec![
                Value::new_symbol("a"),
                Value::list(vec![Value::new_symbol("b"), Value::Integer(1)]),
            ])
        );
    }

    #[test]
    fn quoted_special_forms_keep_their_shape() {
        assert_eq!(quoted("(lambda (x) x)").to_string(), "(lambda (x) x)");
        assert_eq!(quoted("(cond (#t 1))").to_string(), "(cond (#t 1))");
        assert_eq!(quoted("(quote a)").to_string(), "(quote a)");
    }

    fn build_text(text: &str) -> ast::Result {
        build(&read_str(text).unwrap())
    }

    #[test]
    fn lambda_parameters_are_checked() {
        match build_text("(lambda (x y) (cons x y))") {
            Ok(Expression::Lambda(lambda)) => assert_eq!(
                lambda.parameters,
                vec![Symbol::from("x"), Symbol::from("y")]
            ),
            other => panic!("expected a lambda, got {:?}", other),
        }
        assert_eq!(
            build_text("(lambda (x y x) x)"),
            Err(BuildError::Lambda(LambdaError::DuplicateParameter("x".into())))
        );
        assert_eq!(
            build_text("(lambda (x (y)) x)"),
            Err(BuildError::Lambda(LambdaError::ParameterNotASymbol(1)))
        );
        assert_eq!(
            build_text("(lambda x x)"),
            Err(BuildError::Lambda(LambdaError::ParametersNotGivenAsList))
        );
    }

    #[test]
    fn quoted_forms_must_still_be_well_formed() {
        assert_eq!(
            build_text("(quote (cond a))"),
            Err(BuildError::Cond(CondError::BranchNotAList(0)))
        );
        assert_eq!(
            build_text("(quote (lambda (x x) x))"),
            Err(BuildError::Lambda(LambdaError::DuplicateParameter("x".into())))
        );
    }

    #[test]
    fn lambda_captures_environment_by_reference() {
        let env = Environment::empty();
        let lambda = Lambda {
            parameters: vec![Symbol::from("x")],
            body: Rc::new(Expression::Literal("x".into())),
        };
        match apply_lambda(&lambda, &env) {
            Value::Closure(closure) => {
                assert!(Rc::ptr_eq(&closure.parent, &env));
                assert!(Rc::ptr_eq(&closure.body, &lambda.body));
            }
            other => panic!("expected a closure, got {}", other),
        }
    }

    #[test]
    fn cond_without_true_question_fails() {
        let branches = vec![Branch {
            question: Expression::Literal("#f".into()),
            answer: Expression::Literal("1".into()),
        }];
        assert_eq!(
            apply_cond(&branches, &Environment::empty()),
            Err(Error::NoBranchTaken)
        );
    }
}
