use std::rc::Rc;

use super::FrameStyle;
use crate::theme::{ThemeError, ThemeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameState {
    #[default]
    Normal,
    Maximized,
    Shaded,
    MaximizedAndShaded,
}

impl FrameState {
    pub const ALL: [FrameState; 4] = [
        Self::Normal,
        Self::Maximized,
        Self::Shaded,
        Self::MaximizedAndShaded,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Maximized => "maximized",
            Self::Shaded => "shaded",
            Self::MaximizedAndShaded => "maximized_and_shaded",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == value)
    }
}

/// Which resize directions the window allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameResize {
    None,
    Vertical,
    Horizontal,
    #[default]
    Both,
}

impl FrameResize {
    pub const COUNT: usize = 4;
    pub const ALL: [FrameResize; Self::COUNT] =
        [Self::None, Self::Vertical, Self::Horizontal, Self::Both];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Both => "both",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|resize| resize.as_str() == value)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameFocus {
    #[default]
    No,
    Yes,
}

impl FrameFocus {
    pub const COUNT: usize = 2;
    pub const ALL: [FrameFocus; Self::COUNT] = [Self::No, Self::Yes];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Yes => "yes",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|focus| focus.as_str() == value)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

type FocusStyles = [Option<Rc<FrameStyle>>; FrameFocus::COUNT];

/// Styles for one window type, by state, resize capability and focus.
#[derive(Debug, Clone, Default)]
pub struct FrameStyleSet {
    parent: Option<Rc<FrameStyleSet>>,
    normal: [FocusStyles; FrameResize::COUNT],
    shaded: [FocusStyles; FrameResize::COUNT],
    maximized: FocusStyles,
    maximized_and_shaded: FocusStyles,
}

impl FrameStyleSet {
    pub fn new(parent: Option<Rc<FrameStyleSet>>) -> Self {
        Self {
            parent,
            ..Self::default()
        }
    }

    pub fn parent(&self) -> Option<&Rc<FrameStyleSet>> {
        self.parent.as_ref()
    }

    /// Maximized styles ignore `resize`.
    pub fn set_style(
        &mut self,
        state: FrameState,
        resize: FrameResize,
        focus: FrameFocus,
        style: Rc<FrameStyle>,
    ) {
        *self.slot_mut(state, resize, focus) = Some(style);
    }

    fn slot(
        &self,
        state: FrameState,
        resize: FrameResize,
        focus: FrameFocus,
    ) -> Option<&Rc<FrameStyle>> {
        let styles = match state {
            FrameState::Normal => &self.normal[resize.index()],
            FrameState::Shaded => &self.shaded[resize.index()],
            FrameState::Maximized => &self.maximized,
            FrameState::MaximizedAndShaded => &self.maximized_and_shaded,
        };
        styles[focus.index()].as_ref()
    }

    fn slot_mut(
        &mut self,
        state: FrameState,
        resize: FrameResize,
        focus: FrameFocus,
    ) -> &mut Option<Rc<FrameStyle>> {
        let styles = match state {
            FrameState::Normal => &mut self.normal[resize.index()],
            FrameState::Shaded => &mut self.shaded[resize.index()],
            FrameState::Maximized => &mut self.maximized,
            FrameState::MaximizedAndShaded => &mut self.maximized_and_shaded,
        };
        &mut styles[focus.index()]
    }

    /// Looks the style up here, then in the parent set. Normal and shaded
    /// styles finally fall back to the `both` resize mode.
    pub fn get_style(
        &self,
        state: FrameState,
        resize: FrameResize,
        focus: FrameFocus,
    ) -> Option<&Rc<FrameStyle>> {
        let found = self.slot(state, resize, focus).or_else(|| {
            self.parent
                .as_deref()
                .and_then(|parent| parent.get_style(state, resize, focus))
        });

        match state {
            FrameState::Normal | FrameState::Shaded
                if found.is_none() && resize != FrameResize::Both =>
            {
                tracing::debug!(
                    state = state.as_str(),
                    resize = resize.as_str(),
                    "no style for resize mode, trying both"
                );
                self.get_style(state, FrameResize::Both, focus)
            }
            _ => found,
        }
    }

    /// Every normal resize and focus pair must resolve; shaded and maximized
    /// states must resolve for both focus values with no resize.
    pub fn validate(&self) -> ThemeResult<()> {
        for resize in FrameResize::ALL {
            for focus in FrameFocus::ALL {
                self.require(FrameState::Normal, resize, focus)?;
            }
        }

        for state in [
            FrameState::Shaded,
            FrameState::Maximized,
            FrameState::MaximizedAndShaded,
        ] {
            for focus in FrameFocus::ALL {
                self.require(state, FrameResize::None, focus)?;
            }
        }
        Ok(())
    }

    fn require(
        &self,
        state: FrameState,
        resize: FrameResize,
        focus: FrameFocus,
    ) -> ThemeResult<()> {
        match self.get_style(state, resize, focus) {
            Some(_) => Ok(()),
            None => Err(ThemeError::MissingFrameStyle {
                state: state.as_str(),
                resize: resize.as_str(),
                focus: focus.as_str(),
            }),
        }
    }
}
