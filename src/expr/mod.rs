//! Coordinate expressions: `width - 2 * left_width`, `(height - object_height) / 2`.
mod env;
mod error;
mod eval;
mod token;

pub use env::{ExprEnv, Variable};
pub use error::{ExprError, ExprResult};
pub use eval::{evaluate, NumericExpr};
pub use token::{tokenize, Operator, Token, VariableRef};
