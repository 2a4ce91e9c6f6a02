use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Window-manager state of the frame being laid out or drawn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FrameFlags: u32 {
        const ALLOWS_DELETE = 1 << 0;
        const ALLOWS_MENU = 1 << 1;
        const ALLOWS_MINIMIZE = 1 << 2;
        const ALLOWS_MAXIMIZE = 1 << 3;
        const ALLOWS_VERTICAL_RESIZE = 1 << 4;
        const ALLOWS_HORIZONTAL_RESIZE = 1 << 5;
        const HAS_FOCUS = 1 << 6;
        const SHADED = 1 << 7;
        const STUCK = 1 << 8;
        const MAXIMIZED = 1 << 9;
        const ALLOWS_SHADE = 1 << 10;
        const ALLOWS_MOVE = 1 << 11;
        const FULLSCREEN = 1 << 12;
        const IS_FLASHING = 1 << 13;
        const ABOVE = 1 << 14;

        /// Everything a plain, resizable, unfocused application window allows.
        const NORMAL_WINDOW = Self::ALLOWS_DELETE.bits()
            | Self::ALLOWS_MENU.bits()
            | Self::ALLOWS_MINIMIZE.bits()
            | Self::ALLOWS_MAXIMIZE.bits()
            | Self::ALLOWS_VERTICAL_RESIZE.bits()
            | Self::ALLOWS_HORIZONTAL_RESIZE.bits()
            | Self::ALLOWS_SHADE.bits()
            | Self::ALLOWS_MOVE.bits();
    }
}

/// Kind of window a frame decorates; each kind has its own style set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    #[default]
    Normal,
    Dialog,
    ModalDialog,
    Utility,
    Menu,
    Border,
}

impl FrameType {
    pub const COUNT: usize = 6;
    pub const ALL: [FrameType; Self::COUNT] = [
        Self::Normal,
        Self::Dialog,
        Self::ModalDialog,
        Self::Utility,
        Self::Menu,
        Self::Border,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Dialog => "dialog",
            Self::ModalDialog => "modal_dialog",
            Self::Utility => "utility",
            Self::Menu => "menu",
            Self::Border => "border",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}
