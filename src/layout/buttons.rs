use std::fmt;

/// Most buttons a single titlebar corner can hold.
pub const MAX_BUTTONS_PER_CORNER: usize = 10;

const SPACER: &str = "spacer";

/// What a titlebar button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonFunction {
    Menu,
    Minimize,
    Maximize,
    Close,
    Shade,
    Above,
    Stick,
    Unshade,
    Unabove,
    Unstick,
}

impl ButtonFunction {
    pub const COUNT: usize = 10;
    pub const ALL: [ButtonFunction; Self::COUNT] = [
        Self::Menu,
        Self::Minimize,
        Self::Maximize,
        Self::Close,
        Self::Shade,
        Self::Above,
        Self::Stick,
        Self::Unshade,
        Self::Unabove,
        Self::Unstick,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Close => "close",
            Self::Shade => "shade",
            Self::Above => "above",
            Self::Stick => "stick",
            Self::Unshade => "unshade",
            Self::Unabove => "unabove",
            Self::Unstick => "unstick",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.as_str() == value)
    }

    /// Shade, above, stick and their toggles only exist from format version 2.
    pub const fn is_extended(self) -> bool {
        matches!(
            self,
            Self::Shade | Self::Above | Self::Stick | Self::Unshade | Self::Unabove | Self::Unstick
        )
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ButtonFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSlot {
    pub function: ButtonFunction,
    /// Leave a gap after this button.
    pub spacer: bool,
}

impl ButtonSlot {
    pub const fn new(function: ButtonFunction) -> Self {
        Self {
            function,
            spacer: false,
        }
    }
}

/// Buttons requested for the left and right titlebar corners.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ButtonLayout {
    pub left: Vec<ButtonSlot>,
    pub right: Vec<ButtonSlot>,
}

impl ButtonLayout {
    /// Parses the `left:right` preference string, e.g.
    /// `menu:minimize,maximize,spacer,close`.
    ///
    /// Unknown names and functions already used elsewhere in the layout are
    /// skipped; `spacer` marks the button before it.
    pub fn parse(value: &str) -> Self {
        let (left, right) = value.split_once(':').unwrap_or((value, ""));
        let mut used = [false; ButtonFunction::COUNT];

        let left = parse_side(left, &mut used);
        let right = parse_side(right, &mut used);
        Self { left, right }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }
}

fn parse_side(value: &str, used: &mut [bool; ButtonFunction::COUNT]) -> Vec<ButtonSlot> {
    let mut slots: Vec<ButtonSlot> = Vec::new();

    for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        if slots.len() >= MAX_BUTTONS_PER_CORNER {
            tracing::debug!(name, "corner is full, ignoring button");
            continue;
        }

        if name == SPACER {
            if let Some(last) = slots.last_mut() {
                last.spacer = true;
            }
            continue;
        }

        match ButtonFunction::parse(name) {
            Some(function) if !used[function.index()] => {
                used[function.index()] = true;
                slots.push(ButtonSlot::new(function));
            }
            _ => tracing::debug!(name, "ignoring unknown or already-used button name"),
        }
    }

    slots
}
