// ABOUTME: Value types representing Lisp data structures and expressions

use crate::env::Environment;
use std::fmt;
use std::rc::Rc;

/// Position in the original source buffer, stamped onto every value for
/// diagnostics. Synthesized values (arithmetic results, etc.) carry the
/// location of the call site that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc {
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

pub type BuiltinFn = fn(&Value, &Rc<Environment>, Loc) -> crate::eval::EvalResult;

/// A named function or macro: a parameter list, a body (a list of forms,
/// evaluated as an implicit `progn`), and the environment frame captured at
/// the point of definition.
#[derive(Debug)]
pub struct Closure {
    pub params: Value,
    pub body: Value,
    pub env: Rc<Environment>,
}

#[derive(Debug)]
pub enum ValueKind {
    Int(i64),
    Sym(String),
    Str(String),
    Cell(Value, Value),
    Nil,
    True,
    Builtin(&'static str, BuiltinFn),
    Lambda(Rc<Closure>),
    Macro(Rc<Closure>),
    Error(String),
}

/// The single universal datum. Cheap to clone: the payload lives behind an
/// `Rc`, only the (line, col) stamp is copied.
#[derive(Debug, Clone)]
pub struct Value {
    pub kind: Rc<ValueKind>,
    pub loc: Loc,
}

impl Value {
    pub fn new(kind: ValueKind, loc: Loc) -> Self {
        Value {
            kind: Rc::new(kind),
            loc,
        }
    }

    pub fn int(n: i64, loc: Loc) -> Self {
        Value::new(ValueKind::Int(n), loc)
    }

    pub fn sym(name: impl Into<String>, loc: Loc) -> Self {
        Value::new(ValueKind::Sym(name.into()), loc)
    }

    pub fn string(s: impl Into<String>, loc: Loc) -> Self {
        Value::new(ValueKind::Str(s.into()), loc)
    }

    pub fn nil(loc: Loc) -> Self {
        Value::new(ValueKind::Nil, loc)
    }

    pub fn t(loc: Loc) -> Self {
        Value::new(ValueKind::True, loc)
    }

    pub fn cell(car: Value, cdr: Value, loc: Loc) -> Self {
        Value::new(ValueKind::Cell(car, cdr), loc)
    }

    pub fn builtin(name: &'static str, f: BuiltinFn) -> Self {
        Value::new(ValueKind::Builtin(name, f), Loc::default())
    }

    pub fn lambda(closure: Rc<Closure>, loc: Loc) -> Self {
        Value::new(ValueKind::Lambda(closure), loc)
    }

    pub fn macro_(closure: Rc<Closure>, loc: Loc) -> Self {
        Value::new(ValueKind::Macro(closure), loc)
    }

    /// Builds an Error sentinel. This is the only Value kind that is never
    /// surfaced as program-visible data; it is always the `Err` side of an
    /// `EvalResult`.
    pub fn error(message: impl Into<String>, loc: Loc) -> Self {
        Value::new(ValueKind::Error(message.into()), loc)
    }

    pub fn is_nil(&self) -> bool {
        matches!(&*self.kind, ValueKind::Nil)
    }

    pub fn is_true(&self) -> bool {
        matches!(&*self.kind, ValueKind::True)
    }

    pub fn is_cell(&self) -> bool {
        matches!(&*self.kind, ValueKind::Cell(..))
    }

    pub fn as_sym(&self) -> Option<&str> {
        match &*self.kind {
            ValueKind::Sym(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match &*self.kind {
            ValueKind::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The car of a Cell; the car "field" of every other value is Nil.
    pub fn car(&self) -> Value {
        match &*self.kind {
            ValueKind::Cell(car, _) => car.clone(),
            _ => Value::nil(self.loc),
        }
    }

    /// The cdr of a Cell; the cdr "field" of every other value is Nil.
    pub fn cdr(&self) -> Value {
        match &*self.kind {
            ValueKind::Cell(_, cdr) => cdr.clone(),
            _ => Value::nil(self.loc),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match &*self.kind {
            ValueKind::Int(_) => "integer",
            ValueKind::Sym(_) => "symbol",
            ValueKind::Str(_) => "string",
            ValueKind::Cell(..) => "cons",
            ValueKind::Nil => "nil",
            ValueKind::True => "t",
            ValueKind::Builtin(..) => "builtin",
            ValueKind::Lambda(_) => "lambda",
            ValueKind::Macro(_) => "macro",
            ValueKind::Error(_) => "error",
        }
    }

    /// Structural equality over the kind the `=` builtin cares about
    /// (integers); every other pairing is unequal.
    pub fn int_eq(&self, other: &Value) -> bool {
        matches!((self.as_int(), other.as_int()), (Some(a), Some(b)) if a == b)
    }

    /// Builds a proper list `(items...)` ending in `Nil`, all stamped with
    /// `loc`. Used to construct freshly-evaluated argument lists and rest
    /// parameters.
    pub fn list(items: Vec<Value>, loc: Loc) -> Value {
        Value::improper_list(items, Value::nil(loc), loc)
    }

    /// Builds a list of `items` ending in `tail` instead of `Nil`; `tail`
    /// non-Nil makes the result an improper (dotted) list.
    pub fn improper_list(items: Vec<Value>, tail: Value, loc: Loc) -> Value {
        let mut out = tail;
        for item in items.into_iter().rev() {
            out = Value::cell(item, out, loc);
        }
        out
    }

    /// Iterates the elements of a proper (or improper) list; stops at the
    /// first non-Cell cdr without yielding it.
    pub fn iter_list(&self) -> ListIter {
        ListIter { cur: self.clone() }
    }
}

pub struct ListIter {
    cur: Value,
}

impl Iterator for ListIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let (car, cdr) = match &*self.cur.kind {
            ValueKind::Cell(car, cdr) => (car.clone(), cdr.clone()),
            _ => return None,
        };
        self.cur = cdr;
        Some(car)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind {
            ValueKind::Int(n) => write!(f, "{n}"),
            ValueKind::Sym(s) => write!(f, "{s}"),
            ValueKind::Str(s) => write!(f, "{s}"),
            ValueKind::Nil => write!(f, "nil"),
            ValueKind::True => write!(f, "t"),
            ValueKind::Builtin(name, _) => write!(f, "<builtin:{name}>"),
            ValueKind::Lambda(c) => write!(f, "(fn {} {})", c.params, PrintBody(&c.body)),
            ValueKind::Macro(c) => write!(f, "(macro {} {})", c.params, PrintBody(&c.body)),
            ValueKind::Error(_) => write!(f, "#<error>"),
            ValueKind::Cell(..) => fmt_cell(self, f),
        }
    }
}

/// A cons cell prints as `(e1 e2 ... en)` when proper, `(e1 ... . tail)`
/// when improper; nested quotes are never abbreviated back to `'x`.
fn fmt_cell(v: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(")?;
    let mut first = true;
    let mut cur = v.clone();
    loop {
        let (car, cdr) = match &*cur.kind {
            ValueKind::Cell(car, cdr) => (car.clone(), cdr.clone()),
            ValueKind::Nil => break,
            _ => {
                write!(f, " . {cur}")?;
                break;
            }
        };
        if !first {
            write!(f, " ")?;
        }
        first = false;
        write!(f, "{car}")?;
        cur = cdr;
    }
    write!(f, ")")
}

struct PrintBody<'a>(&'a Value);

impl fmt::Display for PrintBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for form in self.0.iter_list() {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{form}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(loc_line: u32) -> Loc {
        Loc { line: loc_line, col: 1 }
    }

    #[test]
    fn test_int_display() {
        assert_eq!(format!("{}", Value::int(42, l(1))), "42");
        assert_eq!(format!("{}", Value::int(-7, l(1))), "-7");
    }

    #[test]
    fn test_nil_and_true_display() {
        assert_eq!(format!("{}", Value::nil(l(1))), "nil");
        assert_eq!(format!("{}", Value::t(l(1))), "t");
    }

    #[test]
    fn test_proper_list_display() {
        let loc = l(1);
        let list = Value::list(
            vec![Value::int(1, loc), Value::int(2, loc), Value::int(3, loc)],
            loc,
        );
        assert_eq!(format!("{list}"), "(1 2 3)");
    }

    #[test]
    fn test_improper_list_display() {
        let loc = l(1);
        // (1 . 2)
        let pair = Value::cell(Value::int(1, loc), Value::int(2, loc), loc);
        assert_eq!(format!("{pair}"), "(1 . 2)");

        // ((1 . 2) . (3 . 4)) prints as ((1 . 2) 3 . 4)
        let inner = Value::cell(Value::int(1, loc), Value::int(2, loc), loc);
        let outer_cdr = Value::cell(Value::int(3, loc), Value::int(4, loc), loc);
        let outer = Value::cell(inner, outer_cdr, loc);
        assert_eq!(format!("{outer}"), "((1 . 2) 3 . 4)");
    }

    #[test]
    fn test_car_cdr_of_non_cell_is_nil() {
        let loc = l(1);
        assert!(Value::int(5, loc).car().is_nil());
        assert!(Value::nil(loc).cdr().is_nil());
    }

    #[test]
    fn test_iter_list_collects_proper_list() {
        let loc = l(1);
        let list = Value::list(vec![Value::int(1, loc), Value::int(2, loc)], loc);
        let collected: Vec<i64> = list.iter_list().map(|v| v.as_int().unwrap()).collect();
        assert_eq!(collected, vec![1, 2]);
    }
}
