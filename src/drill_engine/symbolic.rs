//! Exact polynomial normal form, the stricter grading strategy.
//!
//! Both sides are expanded into dense coefficient vectors over `Rational64`
//! and compared for equality, so there is no tolerance to tune. Answers that
//! leave polynomial territory (`1/x`, `x^0.5`) are handed back to the numeric
//! checker instead of being marked wrong.

use std::fmt;

use log::debug;
use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, One, Signed, ToPrimitive, Zero};

use crate::drill_engine::{
    checker::{compare_at_samples, parse_pair, SAMPLE_POINTS},
    error::SymbolicError,
    expression::{parse_expression, Expr, VARIABLE},
    models::Verdict,
};

/// Largest exponent expanded symbolically.
pub const MAX_EXPONENT: u32 = 16;

/// Highest degree kept during expansion. Nested powers past this are handed
/// to the numeric checker, which keeps expansion cheap.
pub const MAX_DEGREE: usize = 64;

/// `coefficients[d]` multiplies `x^d`; no trailing zeros, so the zero
/// polynomial is the empty vector and derived equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    coefficients: Vec<Rational64>,
}

impl Polynomial {
    pub fn constant(value: Rational64) -> Self {
        Polynomial { coefficients: vec![value] }.trimmed()
    }

    pub fn variable() -> Self {
        Polynomial { coefficients: vec![Rational64::zero(), Rational64::one()] }
    }

    fn trimmed(mut self) -> Self {
        while self.coefficients.last().is_some_and(|c| c.is_zero()) {
            self.coefficients.pop();
        }
        self
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn coefficient(&self, degree: usize) -> Rational64 {
        self.coefficients.get(degree).copied().unwrap_or_else(Rational64::zero)
    }

    /// The value if this is a constant polynomial.
    pub fn as_constant(&self) -> Option<Rational64> {
        match self.degree() {
            None => Some(Rational64::zero()),
            Some(0) => Some(self.coefficients[0]),
            Some(_) => None,
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, c| acc * x + to_f64(*c))
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self, SymbolicError> {
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len)
            .map(|d| {
                self.coefficient(d)
                    .checked_add(&other.coefficient(d))
                    .ok_or(SymbolicError::Overflow)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polynomial { coefficients }.trimmed())
    }

    pub fn neg(&self) -> Self {
        Polynomial { coefficients: self.coefficients.iter().map(|c| -c).collect() }
    }

    pub fn checked_mul(&self, other: &Self) -> Result<Self, SymbolicError> {
        if self.coefficients.is_empty() || other.coefficients.is_empty() {
            return Ok(Polynomial::default());
        }
        if self.coefficients.len() + other.coefficients.len() - 2 > MAX_DEGREE {
            return Err(too_high_degree());
        }
        let mut coefficients =
            vec![Rational64::zero(); self.coefficients.len() + other.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                let term = a.checked_mul(b).ok_or(SymbolicError::Overflow)?;
                coefficients[i + j] = coefficients[i + j]
                    .checked_add(&term)
                    .ok_or(SymbolicError::Overflow)?;
            }
        }
        Ok(Polynomial { coefficients }.trimmed())
    }

    /// Divide by a non-zero constant polynomial.
    pub fn checked_div(&self, divisor: &Self) -> Result<Self, SymbolicError> {
        let d = divisor
            .as_constant()
            .ok_or_else(|| SymbolicError::NotPolynomial("division by a non-constant".into()))?;
        if d.is_zero() {
            return Err(SymbolicError::NotPolynomial("division by zero".into()));
        }
        let coefficients = self
            .coefficients
            .iter()
            .map(|c| c.checked_div(&d).ok_or(SymbolicError::Overflow))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polynomial { coefficients }.trimmed())
    }

    pub fn checked_pow(&self, exponent: u32) -> Result<Self, SymbolicError> {
        if let Some(degree) = self.degree() {
            let total = usize::try_from(exponent).map_or(usize::MAX, |e| degree.saturating_mul(e));
            if total > MAX_DEGREE {
                return Err(too_high_degree());
            }
        }
        let mut result = Polynomial::constant(Rational64::one());
        for _ in 0..exponent {
            result = result.checked_mul(self)?;
        }
        Ok(result)
    }

    /// Expand an expression tree into normal form.
    pub fn from_expr(expr: &Expr) -> Result<Self, SymbolicError> {
        match expr {
            Expr::Number(n) => Ok(Polynomial::constant(*n)),
            Expr::Variable(name) if name == VARIABLE => Ok(Polynomial::variable()),
            Expr::Variable(name) => {
                Err(SymbolicError::NotPolynomial(format!("unknown variable `{name}`")))
            }
            Expr::Neg(e) => Ok(Polynomial::from_expr(e)?.neg()),
            Expr::Add(l, r) => Polynomial::from_expr(l)?.checked_add(&Polynomial::from_expr(r)?),
            Expr::Sub(l, r) => {
                Polynomial::from_expr(l)?.checked_add(&Polynomial::from_expr(r)?.neg())
            }
            Expr::Mul(l, r) => Polynomial::from_expr(l)?.checked_mul(&Polynomial::from_expr(r)?),
            Expr::Div(l, r) => Polynomial::from_expr(l)?.checked_div(&Polynomial::from_expr(r)?),
            Expr::Pow(b, e) => {
                let exponent = Polynomial::from_expr(e)?
                    .as_constant()
                    .filter(|n| n.is_integer() && !n.is_negative())
                    .and_then(|n| n.to_integer().to_u32())
                    .filter(|n| *n <= MAX_EXPONENT)
                    .ok_or_else(|| {
                        SymbolicError::NotPolynomial("exponent is not a small natural number".into())
                    })?;
                Polynomial::from_expr(b)?.checked_pow(exponent)
            }
        }
    }

    /// Parse and expand in one step. Expects already-normalized text.
    pub fn parse(text: &str) -> Result<Self, SymbolicError> {
        let expr = parse_expression(text)?;
        Polynomial::from_expr(&expr)
    }
}

fn too_high_degree() -> SymbolicError {
    SymbolicError::NotPolynomial(format!("degree above {MAX_DEGREE}"))
}

fn to_f64(value: Rational64) -> f64 {
    *value.numer() as f64 / *value.denom() as f64
}

/// Highest degree first, e.g. `3x^2 - x + 1/2`.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficients.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for (degree, c) in self.coefficients.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let magnitude = c.abs();
            match (first, c.is_negative()) {
                (true, true) => write!(f, "-")?,
                (true, false) => {}
                (false, true) => write!(f, " - ")?,
                (false, false) => write!(f, " + ")?,
            }
            first = false;
            if degree == 0 || !magnitude.is_one() {
                write!(f, "{magnitude}")?;
            }
            match degree {
                0 => {}
                1 => write!(f, "x")?,
                d => write!(f, "x^{d}")?,
            }
        }
        Ok(())
    }
}

/// Grade by exact normal form, falling back to numeric sampling when either
/// side is not a polynomial in `x`.
pub fn check_symbolic(user_input: &str, canonical: &str) -> Verdict {
    let (user, expected) = match parse_pair(user_input, canonical) {
        Ok(pair) => pair,
        Err(verdict) => return verdict,
    };

    match (Polynomial::from_expr(&user), Polynomial::from_expr(&expected)) {
        (Ok(actual), Ok(wanted)) if actual == wanted => Verdict::Correct,
        (Ok(actual), Ok(wanted)) => {
            debug!("normal forms differ: {actual} vs {wanted}");
            first_difference(&actual, &wanted)
        }
        (Err(err), _) | (_, Err(err)) => {
            debug!("symbolic expansion unavailable ({err}), sampling numerically");
            compare_at_samples(&user, &expected)
        }
    }
}

// Two distinct polynomials of degree <= 4 differ at one of the sample points;
// beyond that the last sample stands in.
fn first_difference(actual: &Polynomial, wanted: &Polynomial) -> Verdict {
    let at = |x: f64| Verdict::Mismatch { x, expected: wanted.eval(x), actual: actual.eval(x) };
    SAMPLE_POINTS
        .iter()
        .copied()
        .find(|&x| actual.eval(x) != wanted.eval(x))
        .map(at)
        .unwrap_or_else(|| at(SAMPLE_POINTS[SAMPLE_POINTS.len() - 1]))
}
