//! Arithmetic expressions over abstract band roles, as written in the
//! formula library (`(N - R)/(N + R)`, `g * (N - R) / (...)`, `N ** 2`).
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr    = term (('+' | '-') term)*
//! term    = unary (('*' | '/') unary)*
//! unary   = '-' unary | power
//! power   = primary ('**' unary)?
//! primary = number | identifier | '(' expr ')'
//! ```
//!
//! `**` is right associative and binds tighter than unary minus on its
//! left (`-N ** 2 == -(N ** 2)`).

use std::{borrow::Cow, collections::HashMap};

use crate::{
    components::{raster::divide, Raster},
    errors::Result,
    indexes::{IndexError, IndexParams},
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("unexpected character {found:?} at {position} in {formula:?}")]
    UnexpectedCharacter {
        formula: String,
        found: char,
        position: usize,
    },
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("unexpected {found} in {formula:?}")]
    UnexpectedToken { formula: String, found: String },
    #[error("{formula:?} ends unexpectedly")]
    UnexpectedEnd { formula: String },
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    Pow,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(number) => write!(f, "number {number}"),
            Token::Ident(name) => write!(f, "identifier {name}"),
            Token::Op(op) => write!(f, "operator {op}"),
            Token::Pow => f.write_str("operator **"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => divide(lhs, rhs),
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(String),
    Neg(Box<Expr>),
    Bin {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

fn tokenize(formula: &str) -> std::result::Result<Vec<Token>, FormulaError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 2;
            }
            c @ ('+' | '-' | '*' | '/') => {
                tokens.push(Token::Op(c));
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // exponent part, `1e-3`
                if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                    let mut end = i + 1;
                    if end < chars.len() && matches!(chars[end], '+' | '-') {
                        end += 1;
                    }
                    if end < chars.len() && chars[end].is_ascii_digit() {
                        i = end;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let number = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber(text.clone()))?;
                tokens.push(Token::Number(number));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            found => {
                return Err(FormulaError::UnexpectedCharacter {
                    formula: formula.to_string(),
                    found,
                    position: i,
                })
            }
        }
    }
    Ok(tokens)
}

struct Parser<'f> {
    formula: &'f str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'f> Parser<'f> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn unexpected(&self, token: Option<Token>) -> FormulaError {
        match token {
            Some(token) => FormulaError::UnexpectedToken {
                formula: self.formula.to_string(),
                found: token.to_string(),
            },
            None => FormulaError::UnexpectedEnd {
                formula: self.formula.to_string(),
            },
        }
    }

    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Bin {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    fn expr(&mut self) -> std::result::Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            let op = if *op == '+' { BinaryOp::Add } else { BinaryOp::Sub };
            self.advance();
            lhs = Self::binary(op, lhs, self.term()?);
        }
        Ok(lhs)
    }

    fn term(&mut self) -> std::result::Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek() {
            let op = if *op == '*' { BinaryOp::Mul } else { BinaryOp::Div };
            self.advance();
            lhs = Self::binary(op, lhs, self.unary()?);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> std::result::Result<Expr, FormulaError> {
        match self.peek() {
            Some(Token::Op('-')) => {
                self.advance();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Op('+')) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> std::result::Result<Expr, FormulaError> {
        let base = self.primary()?;
        if let Some(Token::Pow) = self.peek() {
            self.advance();
            return Ok(Self::binary(BinaryOp::Pow, base, self.unary()?));
        }
        Ok(base)
    }

    fn primary(&mut self) -> std::result::Result<Expr, FormulaError> {
        match self.advance() {
            Some(Token::Number(number)) => Ok(Expr::Num(number)),
            Some(Token::Ident(name)) => Ok(Expr::Var(name)),
            Some(Token::LParen) => {
                let inner = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    other => Err(self.unexpected(other)),
                }
            }
            other => Err(self.unexpected(other)),
        }
    }
}

/// A parsed library formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

/// Intermediate result: constants stay scalar until they meet a raster.
enum Value<'a> {
    Scalar(f64),
    Raster(Cow<'a, Raster>),
}

impl<'a> Value<'a> {
    fn combine(self, op: BinaryOp, rhs: Value<'a>) -> Value<'a> {
        match (self, rhs) {
            (Value::Scalar(lhs), Value::Scalar(rhs)) => Value::Scalar(op.apply(lhs, rhs)),
            (Value::Scalar(lhs), Value::Raster(rhs)) => {
                Value::Raster(Cow::Owned(rhs.map(|value| op.apply(lhs, value))))
            }
            (Value::Raster(lhs), Value::Scalar(rhs)) => {
                Value::Raster(Cow::Owned(lhs.map(|value| op.apply(value, rhs))))
            }
            (Value::Raster(lhs), Value::Raster(rhs)) => {
                Value::Raster(Cow::Owned(lhs.zip_with(&rhs, |l, r| op.apply(l, r))))
            }
        }
    }
}

impl Formula {
    pub fn parse(source: &str) -> std::result::Result<Self, FormulaError> {
        let mut parser = Parser {
            formula: source,
            tokens: tokenize(source)?,
            pos: 0,
        };
        let expr = parser.expr()?;
        if parser.pos < parser.tokens.len() {
            let trailing = parser.advance();
            return Err(parser.unexpected(trailing));
        }
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Identifiers in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        fn walk<'e>(expr: &'e Expr, found: &mut Vec<&'e str>) {
            match expr {
                Expr::Num(_) => {}
                Expr::Var(name) => {
                    if !found.contains(&name.as_str()) {
                        found.push(name)
                    }
                }
                Expr::Neg(inner) => walk(inner, found),
                Expr::Bin { lhs, rhs, .. } => {
                    walk(lhs, found);
                    walk(rhs, found);
                }
            }
        }
        let mut found = Vec::new();
        walk(&self.expr, &mut found);
        found
    }

    /// Evaluates over role arrays and scalar parameters.
    ///
    /// Roles are looked up before parameters. A formula that
    /// references no role evaluates to a constant raster shaped
    /// like `template`.
    pub fn evaluate(
        &self,
        index: &str,
        roles: &HashMap<&str, &Raster>,
        params: &IndexParams,
        template: &Raster,
    ) -> Result<Raster> {
        let value = self.eval(&self.expr, index, roles, params)?;
        Ok(match value {
            Value::Scalar(constant) => template.full_like(constant),
            Value::Raster(raster) => raster.into_owned(),
        })
    }

    fn eval<'a>(
        &self,
        expr: &Expr,
        index: &str,
        roles: &HashMap<&str, &'a Raster>,
        params: &IndexParams,
    ) -> Result<Value<'a>> {
        Ok(match expr {
            Expr::Num(number) => Value::Scalar(*number),
            Expr::Var(name) => match (roles.get(name.as_str()), params.get(name)) {
                (Some(raster), _) => Value::Raster(Cow::Borrowed(*raster)),
                (None, Some(value)) => Value::Scalar(*value),
                (None, None) => {
                    return Err(IndexError::MissingParameter {
                        index: index.to_string(),
                        parameter: name.clone(),
                    }
                    .into())
                }
            },
            Expr::Neg(inner) => match self.eval(inner, index, roles, params)? {
                Value::Scalar(value) => Value::Scalar(-value),
                Value::Raster(raster) => Value::Raster(Cow::Owned(-&*raster)),
            },
            Expr::Bin { op, lhs, rhs } => {
                let lhs = self.eval(lhs, index, roles, params)?;
                let rhs = self.eval(rhs, index, roles, params)?;
                lhs.combine(*op, rhs)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rstest::rstest;

    fn eval_scalar(source: &str) -> f64 {
        let template = Raster::new("T", array![0.]);
        Formula::parse(source)
            .unwrap()
            .evaluate("TEST", &HashMap::new(), &IndexParams::new(), &template)
            .unwrap()
            .get(&[0])
            .unwrap()
    }

    #[rstest]
    #[case("1 + 2 * 3", 7.)]
    #[case("(1 + 2) * 3", 9.)]
    #[case("2 ** 3 ** 2", 512.)]
    #[case("-2 ** 2", -4.)]
    #[case("10 - 4 - 3", 3.)]
    #[case("8 / 4 / 2", 1.)]
    #[case("1.5e1 + .5", 15.5)]
    #[case("2 * -3", -6.)]
    fn precedence_and_associativity(#[case] source: &str, #[case] expected: f64) {
        assert_eq!(eval_scalar(source), expected);
    }

    #[rstest]
    fn variables_in_first_appearance_order() {
        let evi = Formula::parse("g * (N - R) / (N + C1 * R - C2 * B + L)").unwrap();
        assert_eq!(evi.variables(), vec!["g", "N", "R", "C1", "C2", "B", "L"]);
        assert_eq!(evi.source(), "g * (N - R) / (N + C1 * R - C2 * B + L)");
    }

    #[rstest]
    #[case("(N - R", "UnexpectedEnd")]
    #[case("N + * R", "UnexpectedToken")]
    #[case("N $ R", "UnexpectedCharacter")]
    #[case("1.2.3", "InvalidNumber")]
    #[case("(N) R", "UnexpectedToken")]
    fn malformed_formulas(#[case] source: &str, #[case] kind: &str) {
        let err = Formula::parse(source).unwrap_err();
        assert!(format!("{err:?}").starts_with(kind), "{err:?}");
    }

    #[rstest]
    fn roles_and_params_are_substituted() {
        let nir = Raster::new("NIR", array![0.5, 0.0]);
        let red = Raster::new("RED", array![0.1, 0.0]);
        let roles = HashMap::from([("N", &nir), ("R", &red)]);
        let params = IndexParams::from([("alpha".to_string(), 0.1)]);
        let wdrvi = Formula::parse("(alpha * N - R) / (alpha * N + R)").unwrap();
        let result = wdrvi.evaluate("WDRVI", &roles, &params, &nir).unwrap();
        assert!((result.get(&[0]).unwrap() - (-0.05 / 0.15)).abs() < 1e-12);
        assert_eq!(result.get(&[1]), None);
    }

    #[rstest]
    fn unknown_variables_are_reported() {
        let nir = Raster::new("NIR", array![0.5]);
        let roles = HashMap::from([("N", &nir)]);
        let err = Formula::parse("N * k")
            .unwrap()
            .evaluate("K", &roles, &IndexParams::new(), &nir)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "K formula uses \"k\" but no value was given"
        );
    }
}
