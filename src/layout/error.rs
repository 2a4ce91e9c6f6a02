use thiserror::Error;

pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("frame geometry does not specify \"{name}\" dimension")]
    MissingDimension { name: &'static str },
    #[error("frame geometry does not specify dimension \"{side}\" for border \"{border}\"")]
    MissingBorderDimension {
        side: &'static str,
        border: &'static str,
    },
    #[error("Button aspect ratio {0} is not reasonable")]
    UnreasonableAspect(f64),
    #[error("Frame geometry does not specify size of buttons")]
    MissingButtonSize,
    #[error("could not find a button to strip (left: {left}, right: {right})")]
    StripFailure { left: usize, right: usize },
}
