// ABOUTME: Evaluator module for executing parsed Lisp expressions

use crate::env::Environment;
use crate::value::{Value, ValueKind};
use std::rc::Rc;

/// Either the program-visible result of an evaluation, or an Error
/// sentinel. The `Err` side is always a `Value` of kind `Error` — this
/// lets `?` implement the "propagates up any evaluation stack" rule
/// without rechecking a result's kind at every call site.
pub type EvalResult = Result<Value, Value>;

/// Evaluates `expr` in `env`. Atoms self-evaluate; a Sym resolves through
/// the environment; a non-empty list is an application dispatched on the
/// evaluated head's kind.
pub fn eval(env: &Rc<Environment>, expr: &Value) -> EvalResult {
    match &*expr.kind {
        ValueKind::Int(_)
        | ValueKind::Str(_)
        | ValueKind::Nil
        | ValueKind::True
        | ValueKind::Builtin(..)
        | ValueKind::Lambda(_)
        | ValueKind::Macro(_)
        | ValueKind::Error(_) => Ok(expr.clone()),

        ValueKind::Sym(name) => env
            .lookup(name)
            .ok_or_else(|| Value::error(format!("undeclared identifier: {name}"), expr.loc)),

        ValueKind::Cell(head, args) => apply(env, head, args, expr.loc),
    }
}

/// Applies the (unevaluated) head of a Cell application to its
/// (unevaluated) argument list.
fn apply(env: &Rc<Environment>, head: &Value, args: &Value, loc: crate::value::Loc) -> EvalResult {
    let callee = eval(env, head)?;
    match &*callee.kind {
        ValueKind::Builtin(_, f) => f(args, env, loc),

        ValueKind::Lambda(closure) => {
            let evaluated = eval_list(env, args)?;
            let frame = Environment::extend(closure.env.clone(), &closure.params, evaluated, loc)?;
            progn(&frame, &closure.body)
        }

        ValueKind::Macro(closure) => {
            let raw: Vec<Value> = args.iter_list().collect();
            let frame = Environment::extend(closure.env.clone(), &closure.params, raw, loc)?;
            let expansion = progn(&frame, &closure.body)?;
            eval(env, &expansion)
        }

        _ => Err(Value::error("attempt to call non-function", loc)),
    }
}

/// Evaluates every element of `list` (a proper or improper list of
/// expressions) in order, returning a freshly-built Vec. Short-circuits
/// on the first Error.
pub fn eval_list(env: &Rc<Environment>, list: &Value) -> Result<Vec<Value>, Value> {
    list.iter_list().map(|expr| eval(env, &expr)).collect()
}

/// Evaluates each expression in `list` in sequence, returning the last
/// result; `Nil` if `list` is empty. Short-circuits on Error.
pub fn progn(env: &Rc<Environment>, list: &Value) -> EvalResult {
    let mut result = Value::nil(list.loc);
    for expr in list.iter_list() {
        result = eval(env, &expr)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Loc;

    fn l() -> Loc {
        Loc { line: 1, col: 1 }
    }

    #[test]
    fn test_int_self_evaluates() {
        let env = Environment::new();
        let v = Value::int(42, l());
        assert_eq!(eval(&env, &v).unwrap().as_int(), Some(42));
    }

    #[test]
    fn test_symbol_lookup() {
        let env = Environment::new();
        env.define("x", Value::int(7, l()));
        let v = Value::sym("x", l());
        assert_eq!(eval(&env, &v).unwrap().as_int(), Some(7));
    }

    #[test]
    fn test_undeclared_symbol_is_error() {
        let env = Environment::new();
        let v = Value::sym("missing", l());
        let result = eval(&env, &v);
        assert!(result.is_err());
    }

    #[test]
    fn test_calling_non_function_is_error() {
        let env = Environment::new();
        let loc = l();
        // (5 1 2) -- 5 is not callable
        let expr = Value::list(vec![Value::int(5, loc), Value::int(1, loc), Value::int(2, loc)], loc);
        assert!(eval(&env, &expr).is_err());
    }

    #[test]
    fn test_progn_returns_nil_for_empty_list() {
        let env = Environment::new();
        let empty = Value::nil(l());
        assert!(progn(&env, &empty).unwrap().is_nil());
    }

    #[test]
    fn test_progn_returns_last_value() {
        let env = Environment::new();
        let loc = l();
        let list = Value::list(vec![Value::int(1, loc), Value::int(2, loc), Value::int(3, loc)], loc);
        assert_eq!(progn(&env, &list).unwrap().as_int(), Some(3));
    }

    #[test]
    fn test_eval_list_short_circuits_on_error() {
        let env = Environment::new();
        let loc = l();
        let list = Value::list(vec![Value::sym("undefined", loc), Value::int(1, loc)], loc);
        assert!(eval_list(&env, &list).is_err());
    }
}
