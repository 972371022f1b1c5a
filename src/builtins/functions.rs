//! Function and macro definition: fn, macro
//!
//! Neither evaluates its arguments. `fn` defines a named function in the
//! current environment when its first argument is a Sym (self-reference
//! works because the closure captures that very environment, into which
//! the name is then defined); otherwise it builds an anonymous Lambda.
//! `macro` always builds an anonymous Macro.

use crate::env::Environment;
use crate::eval::EvalResult;
use crate::value::{Closure, Loc, Value};
use std::rc::Rc;

fn builtin_fn(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let head = args.car();
    if let Some(name) = head.as_sym() {
        let name = name.to_string();
        let params = args.cdr().car();
        let body = args.cdr().cdr();
        let closure = Rc::new(Closure { params, body, env: env.clone() });
        let value = Value::lambda(closure, loc);
        env.define(&name, value.clone());
        Ok(value)
    } else {
        let params = head;
        let body = args.cdr();
        let closure = Rc::new(Closure { params, body, env: env.clone() });
        Ok(Value::lambda(closure, loc))
    }
}

fn builtin_macro(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let params = args.car();
    let body = args.cdr();
    let closure = Rc::new(Closure { params, body, env: env.clone() });
    Ok(Value::macro_(closure, loc))
}

pub fn register(env: &Rc<Environment>) {
    env.define("fn", Value::builtin("fn", builtin_fn));
    env.define("macro", Value::builtin("macro", builtin_macro));
}
