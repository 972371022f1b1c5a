// ABOUTME: Environment module for managing variable bindings and scopes

use crate::value::{Loc, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// A single lexical scope: an insertion-ordered list of bindings plus an
/// optional link to the enclosing frame. Frames are never mutated once
/// created except by `define` (extend this frame) and `assign` (update a
/// binding already in some frame of the chain).
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<Vec<(String, Value)>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: None,
        })
    }

    /// Creates a new child frame chained to `parent`.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: Some(parent),
        })
    }

    /// Inserts or overwrites a binding in THIS frame (the innermost frame
    /// reachable from `self`), never walking the parent chain.
    pub fn define(&self, name: &str, value: Value) {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(slot) = bindings.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            bindings.push((name.to_string(), value));
        }
    }

    /// Walks frames from innermost to outermost, returning the first
    /// binding found.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some((_, v)) = self.bindings.borrow().iter().find(|(n, _)| n == name) {
            return Some(v.clone());
        }
        self.parent.as_ref().and_then(|p| p.lookup(name))
    }

    fn try_update(&self, name: &str, value: &Value) -> bool {
        {
            let mut bindings = self.bindings.borrow_mut();
            if let Some(slot) = bindings.iter_mut().find(|(n, _)| n == name) {
                slot.1 = value.clone();
                return true;
            }
        }
        match &self.parent {
            Some(p) => p.try_update(name, value),
            None => false,
        }
    }

    /// Finds the binding nearest to `self` and mutates it in place. If no
    /// binding exists anywhere in the chain, defines one at `self` (the
    /// innermost frame) instead — this matches the observable behavior of
    /// both `set` and `setq`.
    pub fn assign(&self, name: &str, value: Value) -> Value {
        if !self.try_update(name, &value) {
            self.define(name, value.clone());
        }
        value
    }

    /// Produces a new frame chained to `parent`, binding `params` to
    /// `args` per the variadic convention: fixed parameters consume
    /// arguments in order; an improper tail symbol captures the remaining
    /// arguments as a fresh list (`Nil` if none remain). Too few fixed
    /// arguments, a non-symbol parameter, or (absent a rest tail) too many
    /// arguments is a recoverable Error.
    pub fn extend(parent: Rc<Environment>, params: &Value, args: Vec<Value>, loc: Loc) -> Result<Rc<Environment>, Value> {
        let frame = Environment::with_parent(parent);
        let mut args = args.into_iter();
        let mut cur = params.clone();

        loop {
            match cur.as_sym() {
                Some(rest_name) => {
                    let rest = Value::list(args.by_ref().collect(), loc);
                    frame.define(rest_name, rest);
                    return Ok(frame);
                }
                None if cur.is_nil() => break,
                None if cur.is_cell() => {
                    let param = cur.car();
                    let name = param.as_sym().ok_or_else(|| {
                        Value::error("parameter name must be a symbol", param.loc)
                    })?;
                    let arg = args.next().ok_or_else(|| {
                        Value::error("too few arguments", loc)
                    })?;
                    frame.define(name, arg);
                    cur = cur.cdr();
                }
                None => {
                    return Err(Value::error("malformed parameter list", cur.loc));
                }
            }
        }

        if args.next().is_some() {
            return Err(Value::error("too many arguments", loc));
        }

        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l() -> Loc {
        Loc { line: 1, col: 1 }
    }

    #[test]
    fn test_define_and_lookup() {
        let env = Environment::new();
        env.define("x", Value::int(42, l()));
        assert_eq!(env.lookup("x").unwrap().as_int(), Some(42));
    }

    #[test]
    fn test_undefined_symbol() {
        let env = Environment::new();
        assert!(env.lookup("undefined").is_none());
    }

    #[test]
    fn test_shadowing() {
        let parent = Environment::new();
        parent.define("x", Value::int(42, l()));

        let child = Environment::with_parent(parent);
        child.define("x", Value::int(100, l()));

        assert_eq!(child.lookup("x").unwrap().as_int(), Some(100));
    }

    #[test]
    fn test_parent_lookup() {
        let parent = Environment::new();
        parent.define("x", Value::int(42, l()));
        let child = Environment::with_parent(parent);
        assert_eq!(child.lookup("x").unwrap().as_int(), Some(42));
    }

    #[test]
    fn test_assign_updates_nearest_binding() {
        let parent = Environment::new();
        parent.define("x", Value::int(1, l()));
        let child = Environment::with_parent(parent.clone());

        child.assign("x", Value::int(2, l()));

        // No shadow was created in `child`; the parent's binding moved.
        assert_eq!(parent.lookup("x").unwrap().as_int(), Some(2));
    }

    #[test]
    fn test_assign_defines_when_unbound() {
        let env = Environment::new();
        env.assign("y", Value::int(7, l()));
        assert_eq!(env.lookup("y").unwrap().as_int(), Some(7));
    }

    #[test]
    fn test_extend_binds_fixed_params() {
        let loc = l();
        let params = Value::list(vec![Value::sym("a", loc), Value::sym("b", loc)], loc);
        let frame = Environment::extend(Environment::new(), &params, vec![Value::int(1, loc), Value::int(2, loc)], loc).unwrap();
        assert_eq!(frame.lookup("a").unwrap().as_int(), Some(1));
        assert_eq!(frame.lookup("b").unwrap().as_int(), Some(2));
    }

    #[test]
    fn test_extend_variadic_rest() {
        let loc = l();
        // (a b . c)
        let params = Value::cell(
            Value::sym("a", loc),
            Value::cell(Value::sym("b", loc), Value::sym("c", loc), loc),
            loc,
        );
        let frame = Environment::extend(
            Environment::new(),
            &params,
            vec![Value::int(1, loc), Value::int(2, loc), Value::int(3, loc), Value::int(4, loc)],
            loc,
        )
        .unwrap();
        assert_eq!(frame.lookup("a").unwrap().as_int(), Some(1));
        assert_eq!(frame.lookup("b").unwrap().as_int(), Some(2));
        let rest: Vec<i64> = frame.lookup("c").unwrap().iter_list().map(|v| v.as_int().unwrap()).collect();
        assert_eq!(rest, vec![3, 4]);
    }

    #[test]
    fn test_extend_rest_binds_nil_when_exhausted() {
        let loc = l();
        let params = Value::cell(Value::sym("a", loc), Value::sym("rest", loc), loc);
        let frame = Environment::extend(Environment::new(), &params, vec![Value::int(1, loc)], loc).unwrap();
        assert!(frame.lookup("rest").unwrap().is_nil());
    }

    #[test]
    fn test_extend_too_few_args_is_error() {
        let loc = l();
        let params = Value::list(vec![Value::sym("a", loc), Value::sym("b", loc)], loc);
        let result = Environment::extend(Environment::new(), &params, vec![Value::int(1, loc)], loc);
        assert!(result.is_err());
    }

    #[test]
    fn test_extend_too_many_args_without_rest_is_error() {
        let loc = l();
        let params = Value::list(vec![Value::sym("a", loc)], loc);
        let result = Environment::extend(
            Environment::new(),
            &params,
            vec![Value::int(1, loc), Value::int(2, loc)],
            loc,
        );
        assert!(result.is_err());
    }
}
