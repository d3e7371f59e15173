//! Answer-language parser and evaluator.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary)*
//! unary := ('-' | '+') unary | power
//! power := atom ('^' unary)?
//! atom  := number | identifier | '(' expr ')'
//! ```
//!
//! Implicit multiplication (`2x`) is not part of the grammar; run the text
//! through [`normalize_answer`](super::normalize::normalize_answer) first.
//!
//! Every tree walk here recurses, so the parser caps both input length and
//! nesting depth; see [`MAX_INPUT_LEN`] and [`MAX_NESTING`].

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, multispace0},
    combinator::{map, opt},
    multi::fold_many0,
    sequence::{pair, preceded},
    IResult,
};
use num_rational::Rational64;

use crate::drill_engine::error::{EvalError, ParseError};

/// The only free variable answers may use.
pub const VARIABLE: &str = "x";

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Rational64),
    Variable(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Evaluate with `x` bound to `x`. Any non-finite intermediate or final
    /// value is an error.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Number(n) => *n.numer() as f64 / *n.denom() as f64,
            Expr::Variable(name) if name == VARIABLE => x,
            Expr::Variable(name) => return Err(EvalError::UnknownVariable(name.clone())),
            Expr::Neg(e) => -e.eval(x)?,
            Expr::Add(l, r) => l.eval(x)? + r.eval(x)?,
            Expr::Sub(l, r) => l.eval(x)? - r.eval(x)?,
            Expr::Mul(l, r) => l.eval(x)? * r.eval(x)?,
            Expr::Div(l, r) => l.eval(x)? / r.eval(x)?,
            Expr::Pow(b, e) => b.eval(x)?.powf(e.eval(x)?),
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

/// Deepest run of brackets, prefix signs and `^` the parser follows.
pub const MAX_NESTING: usize = 64;

/// Longest answer text accepted, in bytes. Also bounds the length of
/// `+`/`*` chains, and with it the depth of every tree walk.
pub const MAX_INPUT_LEN: usize = 512;

/// Value of a decimal literal split at the point: `"2"`, `"5"` → 5/2.
///
/// Exact while the significant digits fit in `i64`. Longer literals are read
/// as `f64` and approximated; only magnitudes beyond `i64` are rejected.
fn decimal_to_rational(integer_part: &str, fractional_part: &str) -> Option<Rational64> {
    let fractional_part = fractional_part.trim_end_matches('0');
    exact_decimal(integer_part, fractional_part).or_else(|| {
        let whole = if integer_part.is_empty() { "0" } else { integer_part };
        let approx: f64 = format!("{whole}.{fractional_part}0").parse().ok()?;
        Rational64::approximate_float(approx)
    })
}

fn exact_decimal(integer_part: &str, fractional_part: &str) -> Option<Rational64> {
    let digits = format!("{integer_part}{fractional_part}");
    let numerator: i64 = if digits.is_empty() { 0 } else { digits.parse().ok()? };
    let denominator = 10i64.checked_pow(u32::try_from(fractional_part.len()).ok()?)?;
    Some(Rational64::new(numerator, denominator))
}

// Literals: 12, 2.5, .5, 3.
fn parse_number(input: &str) -> IResult<&str, Expr> {
    fn is_digit(c: char) -> bool {
        c.is_ascii_digit()
    }

    let (remaining, (int_part, maybe_frac)) = pair(
        take_while(is_digit),
        opt(preceded(tag("."), take_while(is_digit))),
    )(input)?;
    let frac_part = maybe_frac.unwrap_or("");

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }

    // Out of i64 range is a hard failure, not a reason to try other atoms.
    let value = decimal_to_rational(int_part, frac_part).ok_or_else(|| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::TooLarge))
    })?;
    Ok((remaining, Expr::Number(value)))
}

fn parse_variable(input: &str) -> IResult<&str, Expr> {
    map(alpha1, |name: &str| Expr::Variable(name.to_string()))(input)
}

// One level deeper, or a hard failure once `MAX_NESTING` is reached.
fn deeper(input: &str, depth: usize) -> Result<usize, nom::Err<nom::error::Error<&str>>> {
    if depth >= MAX_NESTING {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Count,
        )));
    }
    Ok(depth + 1)
}

fn parse_parens(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, _) = tag("(")(input)?;
    let depth = deeper(input, depth)?;
    let (input, inner) = parse_expr(input, depth)?;
    let (input, _) = preceded(multispace0, tag(")"))(input)?;
    Ok((input, inner))
}

fn parse_atom(input: &str, depth: usize) -> IResult<&str, Expr> {
    preceded(
        multispace0,
        alt((parse_number, parse_variable, |i| parse_parens(i, depth))),
    )(input)
}

// Operand of a prefix sign or `^`.
fn parse_nested_unary(input: &str, depth: usize) -> IResult<&str, Expr> {
    let depth = deeper(input, depth)?;
    parse_unary(input, depth)
}

// Right associative: the exponent is a full unary, which recurses back into power.
fn parse_power(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, base) = parse_atom(input, depth)?;
    let (input, exponent) = opt(preceded(preceded(multispace0, tag("^")), |i| {
        parse_nested_unary(i, depth)
    }))(input)?;
    match exponent {
        Some(exp) => Ok((input, Expr::Pow(Box::new(base), Box::new(exp)))),
        None => Ok((input, base)),
    }
}

fn parse_unary(input: &str, depth: usize) -> IResult<&str, Expr> {
    alt((
        map(
            preceded(preceded(multispace0, tag("-")), |i| parse_nested_unary(i, depth)),
            |e| Expr::Neg(Box::new(e)),
        ),
        preceded(preceded(multispace0, tag("+")), |i| parse_nested_unary(i, depth)),
        |i| parse_power(i, depth),
    ))(input)
}

fn parse_term(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, init) = parse_unary(input, depth)?;
    fold_many0(
        pair(
            preceded(multispace0, alt((tag("*"), tag("/")))),
            |i| parse_unary(i, depth),
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            "*" => Expr::Mul(Box::new(acc), Box::new(rhs)),
            _ => Expr::Div(Box::new(acc), Box::new(rhs)),
        },
    )(input)
}

fn parse_expr(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, init) = parse_term(input, depth)?;
    fold_many0(
        pair(
            preceded(multispace0, alt((tag("+"), tag("-")))),
            |i| parse_term(i, depth),
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            "+" => Expr::Add(Box::new(acc), Box::new(rhs)),
            _ => Expr::Sub(Box::new(acc), Box::new(rhs)),
        },
    )(input)
}

/// Parse a complete expression; trailing input is an error.
///
/// Text longer than [`MAX_INPUT_LEN`] or nested deeper than [`MAX_NESTING`]
/// is rejected before any tree is built.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    if input.len() > MAX_INPUT_LEN {
        return Err(ParseError::TooLong(MAX_INPUT_LEN));
    }

    let (remaining, expr) = parse_expr(input, 0).map_err(|err| match err {
        nom::Err::Failure(e) if e.code == nom::error::ErrorKind::TooLarge => {
            ParseError::InvalidNumber(e.input.to_string())
        }
        nom::Err::Failure(e) if e.code == nom::error::ErrorKind::Count => {
            ParseError::TooDeep(MAX_NESTING)
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => ParseError::Syntax(e.input.to_string()),
        nom::Err::Incomplete(_) => ParseError::Syntax(input.to_string()),
    })?;

    let remaining = remaining.trim();
    if !remaining.is_empty() {
        return Err(ParseError::UnconsumedInput(remaining.to_string()));
    }
    Ok(expr)
}
