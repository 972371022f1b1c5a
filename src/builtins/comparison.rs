//! Comparison operations: =, <
//!
//! Both evaluate every argument and require them to be integers.

use crate::env::Environment;
use crate::eval::{eval_list, EvalResult};
use crate::value::{Loc, Value};
use std::rc::Rc;

fn int_args(env: &Rc<Environment>, args: &Value, loc: Loc) -> Result<Vec<i64>, Value> {
    eval_list(env, args)?
        .into_iter()
        .map(|v| v.as_int().ok_or_else(|| Value::error("builtin expects only numeric arguments", loc)))
        .collect()
}

fn builtin_eq(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let nums = int_args(env, args, loc)?;
    if nums.is_empty() {
        return Err(Value::error("= requires at least one argument", loc));
    }
    let all_equal = nums.windows(2).all(|w| w[0] == w[1]);
    Ok(if all_equal { Value::t(loc) } else { Value::nil(loc) })
}

/// `True` iff arguments are strictly monotonically decreasing left to
/// right: each pair rejects on `previous >= next` and so only accepts
/// `previous > next`. Preserved exactly as observed even though it
/// contradicts the conventional meaning of `<`.
fn builtin_lt(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let nums = int_args(env, args, loc)?;
    if nums.is_empty() {
        return Err(Value::error("< requires at least one argument", loc));
    }
    let decreasing = nums.windows(2).all(|w| w[0] > w[1]);
    Ok(if decreasing { Value::t(loc) } else { Value::nil(loc) })
}

pub fn register(env: &Rc<Environment>) {
    env.define("=", Value::builtin("=", builtin_eq));
    env.define("<", Value::builtin("<", builtin_lt));
}
