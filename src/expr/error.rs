use super::token::Operator;
use thiserror::Error;

pub type ExprResult<T> = std::result::Result<T, ExprError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("coordinate expression contains character '{0}' which is not allowed")]
    BadCharacter(char),
    #[error("coordinate expression contained unknown operator at the start of this text: \"{0}\"")]
    UnknownOperator(String),
    #[error("coordinate expression contains number '{0}' which could not be parsed")]
    BadNumber(String),
    #[error("coordinate expression was empty or not understood")]
    EmptyOrNotUnderstood,
    #[error("coordinate expression had a close parenthesis with no open parenthesis")]
    UnmatchedCloseParen,
    #[error("coordinate expression had an open parenthesis with no close parenthesis")]
    UnmatchedOpenParen,
    #[error("coordinate expression had unknown variable or constant \"{0}\"")]
    UnknownVariable(String),
    #[error("coordinate expression doesn't seem to have any operators or operands")]
    NoOperands,
    #[error("coordinate expression results in division by zero")]
    DivideByZero,
    #[error("coordinate expression tries to use mod operator on a floating-point number")]
    ModOnFloat,
    #[error("coordinate expression has an operator \"{0}\" where an operand was expected")]
    OperatorWhereOperandExpected(Operator),
    #[error("coordinate expression had an operand where an operator was expected")]
    OperandWhereOperatorExpected,
    #[error("coordinate expression ended with an operator instead of an operand")]
    EndsWithOperator,
    #[error(
        "coordinate expression has operator \"{second}\" following operator \"{first}\" with no operand in between"
    )]
    OperatorFollowsOperator { first: Operator, second: Operator },
}

impl ExprError {
    /// True for errors caused by operators and operands in the wrong order.
    pub const fn is_malformed_sequence(&self) -> bool {
        matches!(
            self,
            Self::OperatorWhereOperandExpected(_)
                | Self::OperandWhereOperatorExpected
                | Self::EndsWithOperator
                | Self::OperatorFollowsOperator { .. }
        )
    }
}
