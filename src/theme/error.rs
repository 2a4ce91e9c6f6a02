use std::path::PathBuf;

use thiserror::Error;

use crate::color::ColorError;
use crate::expr::ExprError;
use crate::layout::LayoutError;

pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("No <{field}> set for theme \"{theme}\"")]
    MissingMetadata { field: &'static str, theme: String },
    #[error(
        "No frame style set for window type \"{frame_type}\" in theme \"{theme}\", add a <window type=\"{frame_type}\" style_set=\"whatever\"/> element"
    )]
    MissingStyleSet {
        frame_type: &'static str,
        theme: String,
    },
    #[error(
        "Missing <frame state=\"{state}\" resize=\"{resize}\" focus=\"{focus}\" style=\"whatever\"/>"
    )]
    MissingFrameStyle {
        state: &'static str,
        resize: &'static str,
        focus: &'static str,
    },
    #[error(
        "<button function=\"{function}\" state=\"{state}\" draw_ops=\"whatever\"/> must be specified for this frame style"
    )]
    MissingButton {
        function: &'static str,
        state: &'static str,
    },
    #[error("no frame style for window type \"{0}\"")]
    NoFrameStyle(&'static str),
    #[error("no frame style named \"{0}\"")]
    UnknownStyle(String),
    #[error("User-defined constants must begin with a capital letter; \"{0}\" does not")]
    ConstantNotUppercase(String),
    #[error("Constant \"{0}\" has already been defined")]
    ConstantRedefined(String),
    #[error("failed to load image: {path}")]
    LoadImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("icon \"{0}\" was not found in the icon theme")]
    IconNotFound(String),
    #[error(transparent)]
    Expr(#[from] ExprError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
