use thiserror::Error;

pub type ColorResult<T> = std::result::Result<T, ColorError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error(
        "GTK color specification must have the state in brackets, e.g. gtk:fg[NORMAL] where NORMAL is the state; could not parse \"{0}\""
    )]
    MissingStateBracket(String),
    #[error(
        "GTK color specification must have a close bracket after the state, e.g. gtk:fg[NORMAL] where NORMAL is the state; could not parse \"{0}\""
    )]
    MissingCloseBracket(String),
    #[error("Did not understand state \"{0}\" in color specification")]
    UnknownState(String),
    #[error("Did not understand color component \"{0}\" in color specification")]
    UnknownComponent(String),
    #[error("Blend format is \"blend/bg_color/fg_color/alpha\", \"{0}\" does not fit the format")]
    BlendFormat(String),
    #[error("Could not parse alpha value \"{0}\" in blended color")]
    BlendAlphaParse(String),
    #[error("Alpha value \"{0}\" in blended color is not between 0.0 and 1.0")]
    BlendAlphaRange(String),
    #[error("Shade format is \"shade/base_color/factor\", \"{0}\" does not fit the format")]
    ShadeFormat(String),
    #[error("Could not parse shade factor \"{0}\" in shaded color")]
    ShadeFactorParse(String),
    #[error("Shade factor \"{0}\" in shaded color is negative")]
    ShadeFactorNegative(String),
    #[error("Could not parse color \"{0}\"")]
    UnknownColor(String),
    #[error("Gradients should have at least two colors")]
    TooFewGradientColors,
    #[error("Alpha gradients need at least one alpha value")]
    EmptyAlphaGradient,
}
