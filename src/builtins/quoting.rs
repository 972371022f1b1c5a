//! Quotation: quote

use crate::env::Environment;
use crate::eval::EvalResult;
use crate::value::{Loc, Value};
use std::rc::Rc;

fn builtin_quote(args: &Value, _env: &Rc<Environment>, loc: Loc) -> EvalResult {
    if args.iter_list().count() != 1 {
        return Err(Value::error("quote requires exactly 1 argument", loc));
    }
    Ok(args.car())
}

pub fn register(env: &Rc<Environment>) {
    env.define("quote", Value::builtin("quote", builtin_quote));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::eval;
    use crate::reader::read;

    #[test]
    fn test_quote_returns_argument_unevaluated() {
        let env = Environment::new();
        register(&env);
        let v = eval(&env, &read("(quote undeclared-name)").unwrap().unwrap()).unwrap();
        assert_eq!(v.as_sym(), Some("undeclared-name"));
    }

    #[test]
    fn test_quote_shorthand_matches_long_form() {
        let env = Environment::new();
        register(&env);
        let long = eval(&env, &read("(quote (1 2))").unwrap().unwrap()).unwrap();
        let short = eval(&env, &read("'(1 2)").unwrap().unwrap()).unwrap();
        assert_eq!(format!("{long}"), format!("{short}"));
    }

    #[test]
    fn test_quote_with_no_args_is_error() {
        let env = Environment::new();
        register(&env);
        let expr = read("(quote)").unwrap().unwrap();
        assert!(eval(&env, &expr).is_err());
    }

    #[test]
    fn test_quote_with_too_many_args_is_error() {
        let env = Environment::new();
        register(&env);
        let expr = read("(quote a b)").unwrap().unwrap();
        assert!(eval(&env, &expr).is_err());
    }
}
