//! Control flow: if, while, progn

use crate::env::Environment;
use crate::eval::{eval, progn as eval_progn, EvalResult};
use crate::value::{Loc, Value};
use std::rc::Rc;

/// Only the literal `True` singleton takes the then-branch; every other
/// value, including Nil, takes the else-branch (do not generalize to
/// "any truthy value").
fn builtin_if(args: &Value, env: &Rc<Environment>, _loc: Loc) -> EvalResult {
    let test = eval(env, &args.car())?;
    if test.is_true() {
        eval(env, &args.cdr().car())
    } else {
        eval_progn(env, &args.cdr().cdr())
    }
}

/// Returns Nil if the body never runs, rather than leaving the result
/// uninitialized.
fn builtin_while(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let test = args.car();
    let body = args.cdr();
    let mut result = Value::nil(loc);
    loop {
        let t = eval(env, &test)?;
        if !t.is_true() {
            return Ok(result);
        }
        result = eval_progn(env, &body)?;
    }
}

fn builtin_progn(args: &Value, env: &Rc<Environment>, _loc: Loc) -> EvalResult {
    eval_progn(env, args)
}

pub fn register(env: &Rc<Environment>) {
    env.define("if", Value::builtin("if", builtin_if));
    env.define("while", Value::builtin("while", builtin_while));
    env.define("progn", Value::builtin("progn", builtin_progn));
}
