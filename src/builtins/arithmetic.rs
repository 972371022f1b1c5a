//! Arithmetic operations: +, -, *, /
//!
//! All four fold over their evaluated integer arguments, left to right,
//! with the first argument seeding the accumulator.

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

fn builtin_add(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let nums = int_args(env, args, loc)?;
    if nums.is_empty() {
        return Err(Value::error("+ requires at least one argument", loc));
    }
    Ok(Value::int(nums.into_iter().sum(), loc))
}

fn builtin_sub(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let mut nums = int_args(env, args, loc)?.into_iter();
    let first = nums.next().ok_or_else(|| Value::error("- requires at least one argument", loc))?;
    Ok(Value::int(nums.fold(first, |acc, n| acc - n), loc))
}

fn builtin_mul(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let nums = int_args(env, args, loc)?;
    if nums.is_empty() {
        return Err(Value::error("* requires at least one argument", loc));
    }
    Ok(Value::int(nums.into_iter().product(), loc))
}

fn builtin_div(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    let mut nums = int_args(env, args, loc)?.into_iter();
    let first = nums.next().ok_or_else(|| Value::error("/ requires at least one argument", loc))?;
    let mut acc = first;
    for n in nums {
        if n == 0 {
            return Err(Value::error("division by zero", loc));
        }
        acc /= n;
    }
    Ok(Value::int(acc, loc))
}

pub fn register(env: &Rc<Environment>) {
    env.define("+", Value::builtin("+", builtin_add));
    env.define("-", Value::builtin("-", builtin_sub));
    env.define("*", Value::builtin("*", builtin_mul));
    env.define("/", Value::builtin("/", builtin_div));
}
