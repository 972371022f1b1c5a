//! List construction and access: cons, car, cdr

use crate::env::Environment;
use crate::eval::{eval, EvalResult};
use crate::value::{Loc, Value};
use std::rc::Rc;

fn builtin_cons(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    if args.iter_list().count() != 2 {
        return Err(Value::error("cons requires exactly 2 arguments", loc));
    }
    let a = eval(env, &args.car())?;
    let b = eval(env, &args.cdr().car())?;
    Ok(Value::cell(a, b, loc))
}

fn builtin_car(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    if args.iter_list().count() != 1 {
        return Err(Value::error("car requires exactly 1 argument", loc));
    }
    Ok(eval(env, &args.car())?.car())
}

fn builtin_cdr(args: &Value, env: &Rc<Environment>, loc: Loc) -> EvalResult {
    if args.iter_list().count() != 1 {
        return Err(Value::error("cdr requires exactly 1 argument", loc));
    }
    Ok(eval(env, &args.car())?.cdr())
}

pub fn register(env: &Rc<Environment>) {
    env.define("cons", Value::builtin("cons", builtin_cons));
    env.define("car", Value::builtin("car", builtin_car));
    env.define("cdr", Value::builtin("cdr", builtin_cdr));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read;

    fn run(src: &str) -> Value {
        let env = Environment::new();
        register(&env);
        eval(&env, &read(src).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_cons_car_cdr() {
        assert_eq!(run("(car (cons 1 2))").as_int(), Some(1));
        assert_eq!(run("(cdr (cons 1 2))").as_int(), Some(2));
    }

    #[test]
    fn test_car_of_non_cell_is_nil() {
        assert!(run("(car 5)").is_nil());
        assert!(run("(cdr nil)").is_nil());
    }

    fn fails(src: &str) -> bool {
        let env = Environment::new();
        register(&env);
        eval(&env, &read(src).unwrap().unwrap()).is_err()
    }

    #[test]
    fn test_cons_with_wrong_arity_is_error() {
        assert!(fails("(cons 1)"));
        assert!(fails("(cons 1 2 3)"));
    }

    #[test]
    fn test_car_with_wrong_arity_is_error() {
        assert!(fails("(car)"));
        assert!(fails("(car 1 2)"));
    }

    #[test]
    fn test_cdr_with_wrong_arity_is_error() {
        assert!(fails("(cdr)"));
        assert!(fails("(cdr 1 2)"));
    }
}
