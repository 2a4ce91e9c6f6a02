use crate::color::ColorError;
use crate::expr::ExprError;
use crate::layout::LayoutError;
use crate::theme::ThemeError;
use thiserror::Error;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Expr(#[from] ExprError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Theme(#[from] ThemeError),
}
