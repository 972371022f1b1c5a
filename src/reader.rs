// ABOUTME: Reader module for turning source text into a cons-cell value tree using nom combinators

use nom::{
    bytes::complete::take_while,
    character::complete::{char, digit1, multispace1, one_of},
    combinator::{opt, recognize},
    sequence::pair,
    IResult, Parser,
};

use crate::error::ReaderError;
use crate::value::{Loc, Value};

/// Byte offset of `input` within `source`. Valid as long as `input` is a
/// subslice produced purely by slicing `source` (true for every `&str`
/// combinator below — none of them allocate a new buffer).
fn offset(source: &str, input: &str) -> usize {
    input.as_ptr() as usize - source.as_ptr() as usize
}

fn loc_at(source: &str, input: &str) -> Loc {
    let off = offset(source, input);
    let mut line = 1u32;
    let mut col = 1u32;
    for ch in source[..off].chars() {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    Loc { line, col }
}

/// Skips whitespace and `#`-to-end-of-line comments.
fn skip_ws_and_comments(input: &str) -> &str {
    let mut rest = input;
    loop {
        if let Ok((r, _)) = multispace1::<_, nom::error::Error<&str>>(rest) {
            rest = r;
            continue;
        }
        if let Some(stripped) = rest.strip_prefix('#') {
            let (r, _) = take_while::<_, _, nom::error::Error<&str>>(|c: char| c != '\n')(stripped)
                .unwrap_or((stripped, ""));
            rest = r;
            continue;
        }
        return rest;
    }
}

fn parse_number(input: &str) -> IResult<&str, i64> {
    recognize(pair(opt(char('-')), digit1))
        .map(|s: &str| s.parse::<i64>().expect("digit1 guarantees a parseable integer"))
        .parse(input)
}

const SYMBOL_START: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ+-*/%<>=!?";

fn is_symbol_cont(c: char) -> bool {
    c.is_alphanumeric() || "-_?!<>=+*/%".contains(c)
}

fn parse_symbol(source: &str, input: &str) -> IResult<&str, Value> {
    let start = input;
    let (input, _first) = one_of(SYMBOL_START)(input)?;
    let (input, _rest) =
        take_while::<_, _, nom::error::Error<&str>>(is_symbol_cont)(input).unwrap_or((input, ""));
    let consumed = offset(start, input);
    let name = &start[..consumed];
    let loc = loc_at(source, start);
    let value = match name {
        "nil" => Value::nil(loc),
        "t" => Value::t(loc),
        _ => Value::sym(name, loc),
    };
    Ok((input, value))
}

fn parse_string(source: &str, input: &str) -> IResult<&str, Value> {
    let loc = loc_at(source, input);
    let (input, _) = char('"')(input)?;
    let (input, content) = take_while::<_, _, nom::error::Error<&str>>(|c| c != '"')(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, Value::string(content, loc)))
}

fn parse_int(source: &str, input: &str) -> IResult<&str, Value> {
    let loc = loc_at(source, input);
    let (input, n) = parse_number(input)?;
    Ok((input, Value::int(n, loc)))
}

fn parse_quote(source: &str, input: &str) -> Result<(Value, &str), ReaderError> {
    let loc = loc_at(source, input);
    let input = &input[1..]; // consume '\''
    let (expr, rest) = parse_expr(source, input)?;
    let quote_sym = Value::sym("quote", loc);
    let list = Value::cell(quote_sym, Value::cell(expr, Value::nil(loc), loc), loc);
    Ok((list, rest))
}

fn parse_list(source: &str, input: &str) -> Result<(Value, &str), ReaderError> {
    let start_loc = loc_at(source, input);
    let mut rest = &input[1..]; // consume '('
    let mut items: Vec<Value> = Vec::new();

    loop {
        rest = skip_ws_and_comments(rest);

        if rest.is_empty() {
            return Err(ReaderError::UnterminatedList(start_loc));
        }
        if let Some(after) = rest.strip_prefix(')') {
            return Ok((Value::list(items, start_loc), after));
        }
        if let Some(after_dot) = rest.strip_prefix('.') {
            // A lone '.' is always the dotted-pair separator: '.' never
            // begins a symbol or a number in this grammar.
            let dot_loc = loc_at(source, rest);
            if items.is_empty() {
                return Err(ReaderError::MalformedDot(dot_loc));
            }
            let (tail, after_tail) = parse_expr(source, after_dot)?;
            let after_tail = skip_ws_and_comments(after_tail);
            let Some(after_rparen) = after_tail.strip_prefix(')') else {
                return Err(ReaderError::MalformedDot(dot_loc));
            };
            return Ok((Value::improper_list(items, tail, start_loc), after_rparen));
        }

        let (expr, after_expr) = parse_expr(source, rest)?;
        items.push(expr);
        rest = after_expr;
    }
}

/// Parses exactly one expression starting at `input` (a substring of
/// `source`). `expr := atom | list | "'" expr`; `atom := INT | SYM | STR`.
fn parse_expr<'a>(source: &str, input: &'a str) -> Result<(Value, &'a str), ReaderError> {
    let input = skip_ws_and_comments(input);

    if input.is_empty() {
        return Err(ReaderError::UnexpectedEof(loc_at(source, input)));
    }

    let mut chars = input.chars();
    match chars.next().unwrap() {
        ')' => Err(ReaderError::StrayRParen(loc_at(source, input))),
        '(' => parse_list(source, input),
        '\'' => parse_quote(source, input),
        '"' => parse_string(source, input)
            .map(|(rest, v)| (v, rest))
            .map_err(|_| ReaderError::UnexpectedEof(loc_at(source, input))),
        c if c == '-' || c.is_ascii_digit() => {
            if let Ok((rest, v)) = parse_int(source, input) {
                Ok((v, rest))
            } else {
                parse_symbol(source, input)
                    .map(|(rest, v)| (v, rest))
                    .map_err(|_| ReaderError::UnexpectedEof(loc_at(source, input)))
            }
        }
        _ => parse_symbol(source, input)
            .map(|(rest, v)| (v, rest))
            .map_err(|_| ReaderError::UnexpectedEof(loc_at(source, input))),
    }
}

/// Reads the next top-level form starting at `input` (itself a suffix of
/// `source`, normally the remainder returned by a previous call). Returns
/// `Ok(None)` once only whitespace/comments remain — ordinary end of
/// input, not an error. On a reader error the caller may resynchronize by
/// retrying from any later offset; this function itself never consumes
/// past what is needed to report the error.
pub fn read_next<'a>(source: &str, input: &'a str) -> Result<Option<(Value, &'a str)>, ReaderError> {
    let skipped = skip_ws_and_comments(input);
    if skipped.is_empty() {
        return Ok(None);
    }
    parse_expr(source, skipped).map(Some)
}

/// Reads a single expression and requires the remainder of `source` to be
/// only whitespace/comments; used by callers (notably the REPL) that want
/// exactly one form per call.
pub fn read(source: &str) -> Result<Option<Value>, ReaderError> {
    match read_next(source, source)? {
        None => Ok(None),
        Some((value, rest)) => {
            let rest = skip_ws_and_comments(rest);
            if !rest.is_empty() {
                return Err(ReaderError::TrailingInput(loc_at(source, rest)));
            }
            Ok(Some(value))
        }
    }
}
