use crate::evaluator;
use crate::types::{Arity, PrimitiveFn, Value};
use std::collections::HashMap;

static CONS: PrimitiveFn = PrimitiveFn {
    name: "cons",
    fn_ptr: cons_,
    arity: Arity::exactly(2),
};

fn cons_(args: &[Value]) -> evaluator::Result {
    Ok(Value::cons(args[0].clone(), args[1].clone()))
}

static CDR: PrimitiveFn = PrimitiveFn {
    name: "cdr",
    fn_ptr: cdr_,
    arity: Arity::exactly(1),
};

fn cdr_(args: &[Value]) -> evaluator::Result {
    let (_, tail) = args[0].as_pair()?;
    Ok(tail.clone())
}

static NULL_TEST: PrimitiveFn = PrimitiveFn {
    name: "null?",
    fn_ptr: null_test,
    arity: Arity::exactly(1),
};

fn null_test(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0].is_empty()))
}

static EQUAL: PrimitiveFn = PrimitiveFn {
    name: "eq?",
    fn_ptr: equal,
    arity: Arity::exactly(2),
};

fn equal(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0] == args[1]))
}

static ATOM_TEST: PrimitiveFn = PrimitiveFn {
    name: "atom?",
    fn_ptr: atom_test,
    arity: Arity::exactly(1),
};

fn atom_test(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(!args[0].is_pair()))
}

static ZERO_TEST: PrimitiveFn = PrimitiveFn {
    name: "zero?",
    fn_ptr: zero_test,
    arity: Arity::exactly(1),
};

fn zero_test(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0].as_int()? == 0))
}

static INCR: PrimitiveFn = PrimitiveFn {
    name: "incr",
    fn_ptr: incr_,
    arity: Arity::exactly(1),
};

fn incr_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Integer(args[0].as_int()?.wrapping_add(1)))
}

static DECR: PrimitiveFn = PrimitiveFn {
    name: "decr",
    fn_ptr: decr_,
    arity: Arity::exactly(1),
};

fn decr_(args: &[Value]) -> evaluator::Result {
    Ok(Value::Integer(args[0].as_int()?.wrapping_sub(1)))
}

static NUMBER_TEST: PrimitiveFn = PrimitiveFn {
    name: "number?",
    fn_ptr: number_test,
    arity: Arity::exactly(1),
};

fn number_test(args: &[Value]) -> evaluator::Result {
    Ok(Value::Bool(args[0].is_number()))
}

type Namespace = HashMap<&'static str, &'static PrimitiveFn>;
lazy_static! {
    pub static ref CORE: Namespace = {
        let mut map = Namespace::new();
        for &func in [
            // Pairs
            &CONS,
            &CDR,
            // Testing
            &NULL_TEST,
            &EQUAL,
            &ATOM_TEST,
            &ZERO_TEST,
            &NUMBER_TEST,
            // Arithmetic
            &INCR,
            &DECR,
        ].iter() {
            map.insert(func.name, func);
        }
        map
    };
}

/// The set of primitives is closed; any other name is an error.
pub fn lookup(name: &str) -> evaluator::Result<&'static PrimitiveFn> {
    CORE.get(name)
        .copied()
        .ok_or_else(|| evaluator::Error::UnknownPrimitive(String::from(name)))
}
