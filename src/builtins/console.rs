//! Console I/O: print, println
//!
//! Both evaluate every argument, writing printed forms separated by a
//! single space; only `println` adds a trailing newline. Both return Nil.

use crate::env::Environment;
use crate::eval::{eval_list, EvalResult};
use crate::value::{Loc, Value};
use std::rc::Rc;

fn write_args(values: &[Value]) {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            print!(" ");
        }
        print!("{v}");
    }
}

fn builtin_print(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    write_args(&eval_list(env, args)?);
    Ok(Value::nil(loc))
}

fn builtin_println(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    write_args(&eval_list(env, args)?);
    println!();
    Ok(Value::nil(loc))
}

pub fn register(env: &Rc<Environment>) {
    env.define("print", Value::builtin("print", builtin_print));
    env.define("println", Value::builtin("println", builtin_println));
}
