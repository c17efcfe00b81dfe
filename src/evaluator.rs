use crate::ast::{self, Expression};
use crate::environment::{Environment, Frame, UnknownSymbol};
use crate::types::{Arity, BadArgCount, Closure, Int, PrimitiveFn, TypeMismatch, Value};
use crate::{primitives, special_forms};
use derive_more::Display;
use itertools::Itertools;
use std::rc::Rc;

pub type Result<T = Value> = std::result::Result<T, Error>;

#[derive(Debug, Display, Eq, PartialEq)]
pub enum Error {
    #[display(fmt = "{}", _0)]
    UnknownSymbol(UnknownSymbol),
    #[display(fmt = "type mismatch: {}", _0)]
    TypeMismatch(TypeMismatch),
    #[display(fmt = "cannot apply {}: not a primitive or closure", _0)]
    NotCallable(String),
    #[display(fmt = "cond: no question evaluated to #t")]
    NoBranchTaken,
    #[display(fmt = "unknown primitive: {}", _0)]
    UnknownPrimitive(String),
    #[display(fmt = "{}", _0)]
    BadArgCount(BadArgCount),
}

impl std::error::Error for Error {}

impl From<TypeMismatch> for Error {
    fn from(t: TypeMismatch) -> Self {
        Self::TypeMismatch(t)
    }
}

impl From<UnknownSymbol> for Error {
    fn from(e: UnknownSymbol) -> Self {
        Self::UnknownSymbol(e)
    }
}

/// Evaluate `expr` in `env`. Errors abort the whole evaluation.
pub fn evaluate(expr: &Expression, env: &Rc<Environment>) -> Result {
    log::trace!("evaluate {}", expr);
    match expr {
        Expression::Literal(text) => resolve_literal(text, env),
        Expression::Identifier(name) => Ok(env.fetch(name)?),
        Expression::Quote(quoted) => Ok(special_forms::apply_quote(quoted)),
        Expression::Cond(branches) => special_forms::apply_cond(branches, env),
        Expression::Lambda(lambda) => Ok(special_forms::apply_lambda(lambda, env)),
        Expression::Application(func, args) => {
            let callable = evaluate(func, env)?;
            let args = evaluate_sequence_elementwise(args, env)?;
            apply(&callable, &args)
        }
    }
}

// Bindings in scope shadow everything, including the builtin literals.
fn resolve_literal(text: &str, env: &Environment) -> Result {
    if let Some(value) = env.get(text) {
        return Ok(value.clone());
    }
    if let Ok(x) = text.parse::<Int>() {
        return Ok(Value::Integer(x));
    }
    match text {
        ast::TRUE | ast::ELSE => Ok(Value::Bool(true)),
        ast::FALSE => Ok(Value::Bool(false)),
        ast::EMPTY_LIST => Ok(Value::Empty),
        _ => primitives::lookup(text)
            .map(Value::Primitive)
            .map_err(|_| Error::UnknownSymbol(UnknownSymbol(String::from(text)))),
    }
}

/// Left to right, in the caller's environment.
pub fn evaluate_sequence_elementwise(
    seq: &[Expression],
    env: &Rc<Environment>,
) -> Result<Vec<Value>> {
    seq.iter().map(|expr| evaluate(expr, env)).collect()
}

pub fn apply(callable: &Value, args: &[Value]) -> Result {
    match callable {
        Value::Primitive(f) => call_primitive(f, args),
        Value::Closure(f) => {
            let env = make_closure_env(f, args)?;
            evaluate(&f.body, &env)
        }
        _ => Err(Error::NotCallable(callable.to_string())),
    }
}

pub(crate) fn pretty_print_args(args: &[Value]) -> String {
    match args.len() {
        0 => "no args".into(),
        1 => args[0].to_string(),
        _ => format!("\n\t{}", args.iter().join("\n\t")),
    }
}

pub fn call_primitive(func: &PrimitiveFn, args: &[Value]) -> Result {
    func.arity
        .validate_for(args.len(), func.name)
        .map_err(Error::BadArgCount)?;
    log::trace!("Call {} with {}", func.name, pretty_print_args(args));
    let result = (func.fn_ptr)(args);
    match &result {
        Ok(val) => log::trace!("Call to {} resulted in {}", func.name, val),
        Err(e) => log::trace!("Call to {} failed: {}", func.name, e),
    }
    result
}

// The new frame goes in front of the environment the closure was created in,
// never the caller's.
fn make_closure_env(func: &Closure, args: &[Value]) -> Result<Rc<Environment>> {
    log::trace!("Call {} with {}", func, pretty_print_args(args));
    Arity::exactly(func.parameters.len())
        .validate_for(args.len(), "closure")
        .map_err(Error::BadArgCount)?;
    let frame: Frame = func
        .parameters
        .iter()
        .cloned()
        .zip(args.iter().cloned())
        .collect();
    let env = Environment::spawn_from(&func.parent, frame);
    log::debug!("closure env (depth {}): {}", env.depth(), env);
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build;
    use crate::reader::read_str;
    use crate::types::Symbol;

    fn eval(text: &str) -> Result {
        let expr = build(&read_str(text).unwrap()).unwrap();
        evaluate(&expr, &Environment::empty())
    }

    #[test]
    fn literals() {
        assert_eq!(eval("7"), Ok(Value::Integer(7)));
        assert_eq!(eval("-12"), Ok(Value::Integer(-12)));
        assert_eq!(eval("#t"), Ok(Value::Bool(true)));
        assert_eq!(eval("else"), Ok(Value::Bool(true)));
        assert_eq!(eval("#f"), Ok(Value::Bool(false)));
        assert_eq!(eval("()"), Ok(Value::Empty));
        assert!(matches!(eval("incr"), Ok(Value::Primitive(f)) if f.name == "incr"));
    }

    #[test]
    fn unbound_literal() {
        assert_eq!(
            eval("(foo 1 2)"),
            Err(Error::UnknownSymbol(UnknownSymbol("foo".into())))
        );
        assert_eq!(eval("(foo 1 2)").unwrap_err().to_string(), "'foo' not found");
    }

    #[test]
    fn bindings_shadow_builtin_literals() {
        assert_eq!(eval("((lambda (incr) (incr 1)) decr)"), Ok(Value::Integer(0)));
        assert_eq!(eval("((lambda (#t) #t) 5)"), Ok(Value::Integer(5)));
        assert_eq!(eval("((lambda (else) else) #f)"), Ok(Value::Bool(false)));
    }

    #[test]
    fn identifier_is_pure_lookup() {
        let name = Expression::Identifier(Symbol::from("x"));
        assert_eq!(
            evaluate(&name, &Environment::empty()),
            Err(Error::UnknownSymbol(UnknownSymbol("x".into())))
        );
        let frame: Frame = vec![(Symbol::from("x"), Value::Integer(3))]
            .into_iter()
            .collect();
        let env = Environment::spawn_from(&Environment::empty(), frame);
        assert_eq!(evaluate(&name, &env), Ok(Value::Integer(3)));
        // Unlike a literal, an identifier never falls back to the builtins.
        let incr = Expression::Identifier(Symbol::from("incr"));
        assert!(evaluate(&incr, &env).is_err());
    }

    #[test]
    fn lambda_does_not_evaluate_body() {
        assert!(matches!(eval("(lambda (x) (undefined x))"), Ok(Value::Closure(_))));
    }

    #[test]
    fn closure_application() {
        assert_eq!(eval("((lambda (x) (incr x)) 7)"), Ok(Value::Integer(8)));
        assert_eq!(eval("((lambda () 3))"), Ok(Value::Integer(3)));
        assert_eq!(
            eval("((lambda (x y) (cons y x)) 1 2)"),
            Ok(Value::cons(Value::Integer(2), Value::Integer(1)))
        );
    }

    #[test]
    fn closure_arity_is_checked() {
        assert!(matches!(
            eval("((lambda (x) x) 1 2)"),
            Err(Error::BadArgCount(BadArgCount { got: 2, .. }))
        ));
        assert!(matches!(
            eval("(incr)"),
            Err(Error::BadArgCount(BadArgCount { got: 0, .. }))
        ));
    }

    #[test]
    fn scoping_is_lexical() {
        assert_eq!(eval("(((lambda (x) (lambda (y) x)) 1) 2)"), Ok(Value::Integer(1)));
        // The caller binds x too, but the inner closure still sees its own x.
        assert_eq!(
            eval("((lambda (x) ((lambda (f) (f 5)) ((lambda (x) (lambda (y) x)) 1))) 99)"),
            Ok(Value::Integer(1))
        );
    }

    #[test]
    fn uncallable_values() {
        assert_eq!(eval("(7 1)"), Err(Error::NotCallable("7".into())));
        assert_eq!(
            eval("((quote a) 1)"),
            Err(Error::NotCallable("a".into()))
        );
    }

    #[test]
    fn arguments_evaluated_before_application() {
        assert_eq!(
            eval("((lambda (x) 1) (foo))"),
            Err(Error::UnknownSymbol(UnknownSymbol("foo".into())))
        );
    }

    #[test]
    fn cond_short_circuits() {
        assert_eq!(eval("(cond (#f 1) (#t 2) (#t (foo)))"), Ok(Value::Integer(2)));
        assert_eq!(eval("(cond (#f (foo)) (else 3))"), Ok(Value::Integer(3)));
        assert_eq!(eval("(cond (#f 1))"), Err(Error::NoBranchTaken));
        assert_eq!(eval("(cond)"), Err(Error::NoBranchTaken));
        // Only #t counts; other values are not true.
        assert_eq!(eval("(cond (1 1))"), Err(Error::NoBranchTaken));
    }

    #[test]
    fn quote_is_not_evaluated() {
        assert_eq!(eval("(quote foo)"), Ok(Value::new_symbol("foo")));
        assert_eq!(eval("(quote (foo 1))").unwrap().to_string(), "(foo 1)");
    }
}
