use super::env::ExprEnv;
use super::error::{ExprError, ExprResult};
use super::token::{Operator, Token, VariableRef};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericExpr {
    Int(i64),
    Double(f64),
}

impl NumericExpr {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Double(value) => value,
        }
    }

    /// Pixel value of the result; doubles truncate toward zero.
    pub fn to_pixels(self) -> i32 {
        match self {
            Self::Int(value) => value as i32,
            Self::Double(value) => value as i32,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Term {
    Value(NumericExpr),
    Operator(Operator),
}

/// Evaluates a token sequence.
///
/// Parenthesised groups are evaluated recursively and variables are
/// substituted first, leaving a flat operand/operator list that is reduced by
/// three left-to-right sweeps: `* / %`, then `+ -`, then `` `max` `min` ``.
pub fn evaluate(tokens: &[Token], env: Option<&ExprEnv>) -> ExprResult<NumericExpr> {
    let mut terms = Vec::with_capacity(tokens.len());
    let mut depth = 0_usize;
    let mut group_start = 0_usize;

    for (index, token) in tokens.iter().enumerate() {
        if depth == 0 {
            match token {
                Token::Int(value) => terms.push(Term::Value(NumericExpr::Int(*value))),
                Token::Double(value) => terms.push(Term::Value(NumericExpr::Double(*value))),
                Token::Operator(op) => terms.push(Term::Operator(*op)),
                Token::Variable(variable) => {
                    let value = lookup_variable(variable, env)?;
                    terms.push(Term::Value(NumericExpr::Int(i64::from(value))));
                }
                Token::OpenParen => {
                    depth = 1;
                    group_start = index;
                }
                Token::CloseParen => return Err(ExprError::UnmatchedCloseParen),
            }
            continue;
        }

        match token {
            Token::OpenParen => depth += 1,
            Token::CloseParen => {
                if depth == 1 {
                    let inner = evaluate(&tokens[group_start + 1..index], env)?;
                    terms.push(Term::Value(inner));
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(ExprError::UnmatchedOpenParen);
    }
    if terms.is_empty() {
        return Err(ExprError::NoOperands);
    }

    for precedence in [2, 1, 0] {
        reduce(&mut terms, precedence)?;
    }

    match terms.as_slice() {
        [Term::Value(value)] => Ok(*value),
        [Term::Operator(op), ..] => Err(ExprError::OperatorWhereOperandExpected(*op)),
        _ => Err(ExprError::OperandWhereOperatorExpected),
    }
}

fn lookup_variable(variable: &VariableRef, env: Option<&ExprEnv>) -> ExprResult<i32> {
    env.zip(variable.builtin)
        .and_then(|(env, builtin)| env.value(builtin))
        .ok_or_else(|| ExprError::UnknownVariable(variable.name.clone()))
}

/// Collapses every `operand op operand` triple whose operator has `precedence`.
fn reduce(terms: &mut Vec<Term>, precedence: u8) -> ExprResult<()> {
    let mut i = 1;
    while i < terms.len() {
        let lhs = match terms[i - 1] {
            Term::Value(value) => value,
            Term::Operator(op) => return Err(ExprError::OperatorWhereOperandExpected(op)),
        };
        let op = match terms[i] {
            Term::Operator(op) => op,
            Term::Value(_) => return Err(ExprError::OperandWhereOperatorExpected),
        };
        if i == terms.len() - 1 {
            return Err(ExprError::EndsWithOperator);
        }
        let rhs = match terms[i + 1] {
            Term::Value(value) => value,
            Term::Operator(second) => {
                return Err(ExprError::OperatorFollowsOperator { first: op, second })
            }
        };

        if op.precedence() == precedence {
            terms[i - 1] = Term::Value(apply(lhs, op, rhs)?);
            terms.drain(i..i + 2);
        } else {
            i += 2;
        }
    }

    Ok(())
}

fn apply(lhs: NumericExpr, op: Operator, rhs: NumericExpr) -> ExprResult<NumericExpr> {
    match (lhs, rhs) {
        (NumericExpr::Int(a), NumericExpr::Int(b)) => apply_int(a, op, b).map(NumericExpr::Int),
        (a, b) => apply_double(a.as_f64(), op, b.as_f64()).map(NumericExpr::Double),
    }
}

fn apply_int(a: i64, op: Operator, b: i64) -> ExprResult<i64> {
    let value = match op {
        Operator::Multiply => a.wrapping_mul(b),
        Operator::Divide | Operator::Mod if b == 0 => return Err(ExprError::DivideByZero),
        Operator::Divide => a.wrapping_div(b),
        Operator::Mod => a.wrapping_rem(b),
        Operator::Add => a.wrapping_add(b),
        Operator::Subtract => a.wrapping_sub(b),
        Operator::Max => a.max(b),
        Operator::Min => a.min(b),
    };
    Ok(value)
}

fn apply_double(a: f64, op: Operator, b: f64) -> ExprResult<f64> {
    let value = match op {
        Operator::Multiply => a * b,
        Operator::Divide if b == 0.0 => return Err(ExprError::DivideByZero),
        Operator::Divide => a / b,
        Operator::Mod => return Err(ExprError::ModOnFloat),
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Max => {
            if a > b {
                a
            } else {
                b
            }
        }
        Operator::Min => {
            if a < b {
                a
            } else {
                b
            }
        }
    };
    Ok(value)
}
