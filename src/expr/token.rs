use std::fmt;

use super::env::Variable;
use super::error::{ExprError, ExprResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Multiply,
    Divide,
    Mod,
    Add,
    Subtract,
    Max,
    Min,
}

impl Operator {
    /// Binding strength used by the evaluator sweeps; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Multiply | Self::Divide | Self::Mod => 2,
            Self::Add | Self::Subtract => 1,
            Self::Max | Self::Min => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Max => "`max`",
            Self::Min => "`min`",
        }
    }

    /// Operator at the start of `text` and the number of bytes it spans.
    fn from_prefix(text: &str) -> Option<(Self, usize)> {
        const KEYWORDS: [(&str, Operator); 2] = [("`max`", Operator::Max), ("`min`", Operator::Min)];

        let single = match text.as_bytes().first()? {
            b'*' => Some(Self::Multiply),
            b'/' => Some(Self::Divide),
            b'%' => Some(Self::Mod),
            b'+' => Some(Self::Add),
            b'-' => Some(Self::Subtract),
            _ => None,
        };
        if let Some(op) = single {
            return Some((op, 1));
        }

        KEYWORDS
            .iter()
            .find(|(keyword, _)| text.starts_with(keyword))
            .map(|(keyword, op)| (*op, keyword.len()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A variable name plus the built-in variable it resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableRef {
    pub name: String,
    pub builtin: Option<Variable>,
}

impl VariableRef {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            builtin: Variable::from_name(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i64),
    Double(f64),
    Operator(Operator),
    Variable(VariableRef),
    OpenParen,
    CloseParen,
}

impl Token {
    pub fn variable(name: &str) -> Self {
        Self::Variable(VariableRef::new(name))
    }
}

fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Splits a coordinate expression into tokens.
///
/// A leading `-` is always the subtraction operator: the language has no
/// negative literals.
pub fn tokenize(expr: &str) -> ExprResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = expr;

    while let Some(ch) = rest.chars().next() {
        match ch {
            ' ' | '\t' | '\n' => {
                rest = &rest[1..];
            }
            '*' | '/' | '+' | '-' | '%' | '`' => {
                let (op, len) = Operator::from_prefix(rest)
                    .ok_or_else(|| ExprError::UnknownOperator(rest.to_string()))?;
                tokens.push(Token::Operator(op));
                rest = &rest[len..];
            }
            '(' => {
                tokens.push(Token::OpenParen);
                rest = &rest[1..];
            }
            ')' => {
                tokens.push(Token::CloseParen);
                rest = &rest[1..];
            }
            c if is_variable_char(c) => {
                let end = rest
                    .find(|c: char| !is_variable_char(c))
                    .unwrap_or(rest.len());
                tokens.push(Token::variable(&rest[..end]));
                rest = &rest[end..];
            }
            c => {
                let end = rest
                    .find(|c: char| !is_number_char(c))
                    .unwrap_or(rest.len());
                if end == 0 {
                    return Err(ExprError::BadCharacter(c));
                }
                tokens.push(parse_number(&rest[..end])?);
                rest = &rest[end..];
            }
        }
    }

    if tokens.is_empty() {
        return Err(ExprError::EmptyOrNotUnderstood);
    }

    Ok(tokens)
}

fn parse_number(text: &str) -> ExprResult<Token> {
    if !text.contains('.') {
        return text
            .parse::<i64>()
            .map(Token::Int)
            .map_err(|_| ExprError::BadNumber(text.to_string()));
    }

    // "1.2.3" reads as 1.2, like a C strtod prefix scan.
    let prefix = match text.match_indices('.').nth(1) {
        Some((second_dot, _)) => &text[..second_dot],
        None => text,
    };
    prefix
        .parse::<f64>()
        .map(Token::Double)
        .map_err(|_| ExprError::BadNumber(text.to_string()))
}
