//! Calculator tool: evaluates arithmetic expressions.
//!
//! Supports `+`, `-`, `*`, `/`, `%`, `^` (right-associative), parentheses,
//! and unary negation via a recursive-descent parser.

use async_trait::async_trait;
use minagent_core::error::ToolError;
use minagent_core::tool::Tool;
use std::iter::Peekable;
use std::str::Chars;

pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "Calculator"
    }

    fn description(&self) -> &str {
        "Evaluate an arithmetic expression. Input should be a single expression \
         such as (2 + 3) * 4 ^ 2. Supports + - * / % ^ and parentheses."
    }

    async fn run(&self, input: &str) -> Result<String, ToolError> {
        let expr = input.trim().trim_end_matches('=');
        let value = evaluate(expr).map_err(|e| ToolError::InvalidInput(e.to_string()))?;
        Ok(format_number(value))
    }
}

/// Render integers without a trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CalcError {
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected token {0:?}")]
    UnexpectedToken(Token),
    #[error("expected closing parenthesis")]
    UnclosedParen,
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("division by zero")]
    DivisionByZero,
}

// ── Recursive-descent expression evaluator ────────────────────────────────

/// Evaluate an arithmetic expression string.
pub fn evaluate(expr: &str) -> Result<f64, CalcError> {
    let tokens = Lexer::new(expr).collect::<Result<Vec<_>, _>>()?;
    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
    };
    let result = parser.expr()?;
    match parser.tokens.next() {
        Some(tok) => Err(CalcError::UnexpectedToken(tok)),
        None => Ok(result),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Op(char),
    LParen,
    RParen,
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}

        let c = self.chars.next()?;
        let token = match c {
            '+' | '-' | '*' | '/' | '%' | '^' => Ok(Token::Op(c)),
            '(' => Ok(Token::LParen),
            ')' => Ok(Token::RParen),
            d if d.is_ascii_digit() || d == '.' => {
                let mut literal = String::from(d);
                while let Some(next) = self.chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
                    literal.push(next);
                }
                literal
                    .parse()
                    .map(Token::Number)
                    .map_err(|_| CalcError::InvalidNumber(literal))
            }
            other => Err(CalcError::UnexpectedChar(other)),
        };
        Some(token)
    }
}

struct Parser {
    tokens: Peekable<std::vec::IntoIter<Token>>,
}

impl Parser {
    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.tokens.peek() {
            Some(Token::Op(c)) if ops.contains(c) => {
                let c = *c;
                self.tokens.next();
                Some(c)
            }
            _ => None,
        }
    }

    // expr = term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut left = self.term()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            let right = self.term()?;
            left = if op == '+' { left + right } else { left - right };
        }
        Ok(left)
    }

    // term = unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<f64, CalcError> {
        let mut left = self.unary()?;
        while let Some(op) = self.eat_op(&['*', '/', '%']) {
            let right = self.unary()?;
            left = match op {
                '*' => left * right,
                _ if right == 0.0 => return Err(CalcError::DivisionByZero),
                '/' => left / right,
                _ => left % right,
            };
        }
        Ok(left)
    }

    // unary = '-' unary | power
    fn unary(&mut self) -> Result<f64, CalcError> {
        if self.eat_op(&['-']).is_some() {
            return Ok(-self.unary()?);
        }
        self.power()
    }

    // power = primary ('^' unary)?
    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.primary()?;
        if self.eat_op(&['^']).is_some() {
            return Ok(base.powf(self.unary()?));
        }
        Ok(base)
    }

    // primary = NUMBER | '(' expr ')'
    fn primary(&mut self) -> Result<f64, CalcError> {
        match self.tokens.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let val = self.expr()?;
                match self.tokens.next() {
                    Some(Token::RParen) => Ok(val),
                    _ => Err(CalcError::UnclosedParen),
                }
            }
            Some(tok) => Err(CalcError::UnexpectedToken(tok)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
