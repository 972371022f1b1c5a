//! Mutable bindings: set, setq
//!
//! Both assign-or-define at the nearest binding (§4.2); `setq` is sugar
//! that takes its symbol unevaluated.

use crate::env::Environment;
use crate::eval::{eval, EvalResult};
use crate::value::{Loc, Value};
use std::rc::Rc;

fn builtin_set(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    if args.iter_list().count() != 2 {
        return Err(Value::error("set requires exactly 2 arguments", loc));
    }
    let sym = eval(env, &args.car())?;
    let name = sym
        .as_sym()
        .ok_or_else(|| Value::error("set requires a symbol as its first argument", loc))?;
    let value = eval(env, &args.cdr().car())?;
    Ok(env.assign(name, value))
}

fn builtin_setq(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    if args.iter_list().count() != 2 {
        return Err(Value::error("setq requires exactly 2 arguments", loc));
    }
    let name = args
        .car()
        .as_sym()
        .ok_or_else(|| Value::error("setq requires a symbol as its first argument", loc))?
        .to_string();
    let value = eval(env, &args.cdr().car())?;
    Ok(env.assign(&name, value))
}

pub fn register(env: &Rc<Environment>) {
    env.define("set", Value::builtin("set", builtin_set));
    env.define("setq", Value::builtin("setq", builtin_setq));
}
