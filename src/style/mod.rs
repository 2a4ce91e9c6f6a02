//! Frame styles: which draw-op lists paint each frame piece and button.

mod set;

use std::rc::Rc;

use image::RgbaImage;

use crate::color::{ColorSpec, Palette};
use crate::draw::{draw_op_list, DrawBackend, DrawInfo, DrawOpList, TitleLayout};
use crate::geometry::Rect;
use crate::layout::{
    BackgroundSlot, ButtonFunction, FrameGeometry, FrameLayout, MAX_MIDDLE_BACKGROUNDS,
};
use crate::theme::{ThemeError, ThemeResult};

pub use set::{FrameFocus, FrameResize, FrameState, FrameStyleSet};

/// Everything a style can paint on a button position: the six background
/// kinds come first, then the button functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonType {
    LeftLeftBackground,
    LeftMiddleBackground,
    LeftRightBackground,
    RightLeftBackground,
    RightMiddleBackground,
    RightRightBackground,
    Close,
    Maximize,
    Minimize,
    Menu,
    Shade,
    Above,
    Stick,
    Unshade,
    Unabove,
    Unstick,
}

impl ButtonType {
    pub const COUNT: usize = 16;
    pub const ALL: [ButtonType; Self::COUNT] = [
        Self::LeftLeftBackground,
        Self::LeftMiddleBackground,
        Self::LeftRightBackground,
        Self::RightLeftBackground,
        Self::RightMiddleBackground,
        Self::RightRightBackground,
        Self::Close,
        Self::Maximize,
        Self::Minimize,
        Self::Menu,
        Self::Shade,
        Self::Above,
        Self::Stick,
        Self::Unshade,
        Self::Unabove,
        Self::Unstick,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftLeftBackground => "left_left_background",
            Self::LeftMiddleBackground => "left_middle_background",
            Self::LeftRightBackground => "left_right_background",
            Self::RightLeftBackground => "right_left_background",
            Self::RightMiddleBackground => "right_middle_background",
            Self::RightRightBackground => "right_right_background",
            Self::Close => "close",
            Self::Maximize => "maximize",
            Self::Minimize => "minimize",
            Self::Menu => "menu",
            Self::Shade => "shade",
            Self::Above => "above",
            Self::Stick => "stick",
            Self::Unshade => "unshade",
            Self::Unabove => "unabove",
            Self::Unstick => "unstick",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|button| button.as_str() == value)
    }

    /// The titlebar function drawn by this type; `None` for backgrounds.
    pub const fn function(self) -> Option<ButtonFunction> {
        match self {
            Self::Close => Some(ButtonFunction::Close),
            Self::Maximize => Some(ButtonFunction::Maximize),
            Self::Minimize => Some(ButtonFunction::Minimize),
            Self::Menu => Some(ButtonFunction::Menu),
            Self::Shade => Some(ButtonFunction::Shade),
            Self::Above => Some(ButtonFunction::Above),
            Self::Stick => Some(ButtonFunction::Stick),
            Self::Unshade => Some(ButtonFunction::Unshade),
            Self::Unabove => Some(ButtonFunction::Unabove),
            Self::Unstick => Some(ButtonFunction::Unstick),
            _ => None,
        }
    }

    pub const fn is_background(self) -> bool {
        self.function().is_none()
    }

    /// First theme format version in which a style must provide this type.
    pub const fn earliest_version(self) -> u32 {
        match self.function() {
            Some(function) if function.is_extended() => 2,
            _ => 1,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Number of geometry slots this type is painted into.
    const fn slot_count(self) -> usize {
        match self {
            Self::LeftMiddleBackground | Self::RightMiddleBackground => MAX_MIDDLE_BACKGROUNDS,
            _ => 1,
        }
    }

    fn rect(self, fgeom: &FrameGeometry, slot: usize) -> Rect {
        let background = match self {
            Self::LeftLeftBackground => BackgroundSlot::LeftLeft,
            Self::LeftMiddleBackground => BackgroundSlot::LeftMiddle(slot),
            Self::LeftRightBackground => BackgroundSlot::LeftRight,
            Self::RightLeftBackground => BackgroundSlot::RightLeft,
            Self::RightMiddleBackground => BackgroundSlot::RightMiddle(slot),
            Self::RightRightBackground => BackgroundSlot::RightRight,
            _ => {
                return self
                    .function()
                    .map_or_else(Rect::default, |function| fgeom.button(function).visible);
            }
        };
        fgeom.background(background)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Pressed,
    Prelight,
}

impl ButtonState {
    pub const COUNT: usize = 3;
    pub const ALL: [ButtonState; Self::COUNT] = [Self::Normal, Self::Pressed, Self::Prelight];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Pressed => "pressed",
            Self::Prelight => "prelight",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.as_str() == value)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Regions of the frame, in the order they are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePiece {
    EntireBackground,
    Titlebar,
    TitlebarMiddle,
    LeftTitlebarEdge,
    RightTitlebarEdge,
    TopTitlebarEdge,
    BottomTitlebarEdge,
    Title,
    LeftEdge,
    RightEdge,
    BottomEdge,
    Overlay,
}

impl FramePiece {
    pub const COUNT: usize = 12;
    pub const ALL: [FramePiece; Self::COUNT] = [
        Self::EntireBackground,
        Self::Titlebar,
        Self::TitlebarMiddle,
        Self::LeftTitlebarEdge,
        Self::RightTitlebarEdge,
        Self::TopTitlebarEdge,
        Self::BottomTitlebarEdge,
        Self::Title,
        Self::LeftEdge,
        Self::RightEdge,
        Self::BottomEdge,
        Self::Overlay,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EntireBackground => "entire_background",
            Self::Titlebar => "titlebar",
            Self::TitlebarMiddle => "titlebar_middle",
            Self::LeftTitlebarEdge => "left_titlebar_edge",
            Self::RightTitlebarEdge => "right_titlebar_edge",
            Self::TopTitlebarEdge => "top_titlebar_edge",
            Self::BottomTitlebarEdge => "bottom_titlebar_edge",
            Self::Title => "title",
            Self::LeftEdge => "left_edge",
            Self::RightEdge => "right_edge",
            Self::BottomEdge => "bottom_edge",
            Self::Overlay => "overlay",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|piece| piece.as_str() == value)
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Frame-relative rectangle covered by this piece.
    pub fn rect(self, fgeom: &FrameGeometry) -> Rect {
        let titlebar_inner_height =
            fgeom.top_height - fgeom.top_titlebar_edge - fgeom.bottom_titlebar_edge;
        let side_height = fgeom.height - fgeom.top_height - fgeom.bottom_height;

        match self {
            Self::EntireBackground | Self::Overlay => Rect::new(0, 0, fgeom.width, fgeom.height),
            Self::Titlebar => Rect::new(0, 0, fgeom.width, fgeom.top_height),
            Self::TitlebarMiddle => Rect::new(
                fgeom.left_titlebar_edge,
                fgeom.top_titlebar_edge,
                fgeom.width - fgeom.left_titlebar_edge - fgeom.right_titlebar_edge,
                titlebar_inner_height,
            ),
            Self::LeftTitlebarEdge => Rect::new(
                0,
                fgeom.top_titlebar_edge,
                fgeom.left_titlebar_edge,
                titlebar_inner_height,
            ),
            Self::RightTitlebarEdge => Rect::new(
                fgeom.width - fgeom.right_titlebar_edge,
                fgeom.top_titlebar_edge,
                fgeom.right_titlebar_edge,
                titlebar_inner_height,
            ),
            Self::TopTitlebarEdge => Rect::new(0, 0, fgeom.width, fgeom.top_titlebar_edge),
            Self::BottomTitlebarEdge => Rect::new(
                0,
                fgeom.top_height - fgeom.bottom_titlebar_edge,
                fgeom.width,
                fgeom.bottom_titlebar_edge,
            ),
            Self::Title => fgeom.title_rect,
            Self::LeftEdge => Rect::new(0, fgeom.top_height, fgeom.left_width, side_height),
            Self::RightEdge => Rect::new(
                fgeom.width - fgeom.right_width,
                fgeom.top_height,
                fgeom.right_width,
                side_height,
            ),
            Self::BottomEdge => Rect::new(
                0,
                fgeom.height - fgeom.bottom_height,
                fgeom.width,
                fgeom.bottom_height,
            ),
        }
    }
}

/// Per-draw inputs of [`FrameStyle::draw`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRender<'a> {
    /// Frame origin on the target surface.
    pub offset: (i32, i32),
    pub clip: Option<Rect>,
    pub title: Option<&'a TitleLayout>,
    pub button_states: [ButtonState; ButtonType::COUNT],
    pub mini_icon: Option<&'a RgbaImage>,
    pub icon: Option<&'a RgbaImage>,
}

type ButtonLists = [[Option<Rc<DrawOpList>>; ButtonState::COUNT]; ButtonType::COUNT];

/// Draw-op lists for one frame appearance, with fallback to a parent style.
#[derive(Debug, Clone)]
pub struct FrameStyle {
    parent: Option<Rc<FrameStyle>>,
    layout: Rc<FrameLayout>,
    buttons: ButtonLists,
    pieces: [Option<Rc<DrawOpList>>; FramePiece::COUNT],
    pub window_background_color: Option<ColorSpec>,
    pub window_background_alpha: u8,
}

impl FrameStyle {
    pub fn new(layout: Rc<FrameLayout>, parent: Option<Rc<FrameStyle>>) -> Self {
        Self {
            parent,
            layout,
            buttons: Default::default(),
            pieces: Default::default(),
            window_background_color: None,
            window_background_alpha: 0xff,
        }
    }

    pub fn parent(&self) -> Option<&Rc<FrameStyle>> {
        self.parent.as_ref()
    }

    pub fn layout(&self) -> &Rc<FrameLayout> {
        &self.layout
    }

    pub fn set_button(&mut self, button: ButtonType, state: ButtonState, list: Rc<DrawOpList>) {
        self.buttons[button.index()][state.index()] = Some(list);
    }

    pub fn set_piece(&mut self, piece: FramePiece, list: Rc<DrawOpList>) {
        self.pieces[piece.index()] = Some(list);
    }

    fn ancestry(&self) -> impl Iterator<Item = &FrameStyle> {
        std::iter::successors(Some(self), |style| style.parent.as_deref())
    }

    /// The list painting `piece`, from this style or the nearest parent.
    pub fn piece(&self, piece: FramePiece) -> Option<&Rc<DrawOpList>> {
        self.ancestry()
            .find_map(|style| style.pieces[piece.index()].as_ref())
    }

    /// The list painting `button` in `state`. Side backgrounds fall back to
    /// the middle background of their side, and prelight falls back to normal.
    pub fn get_button(&self, button: ButtonType, state: ButtonState) -> Option<&Rc<DrawOpList>> {
        let own = self
            .ancestry()
            .find_map(|style| style.buttons[button.index()][state.index()].as_ref());
        if own.is_some() {
            return own;
        }

        match button {
            ButtonType::LeftLeftBackground | ButtonType::LeftRightBackground => {
                self.get_button(ButtonType::LeftMiddleBackground, state)
            }
            ButtonType::RightLeftBackground | ButtonType::RightRightBackground => {
                self.get_button(ButtonType::RightMiddleBackground, state)
            }
            _ if state == ButtonState::Prelight => self.get_button(button, ButtonState::Normal),
            _ => None,
        }
    }

    /// Checks that every button the format version requires is drawable.
    pub fn validate(&self, format_version: u32) -> ThemeResult<()> {
        let required = ButtonType::ALL
            .into_iter()
            .filter(|button| !button.is_background())
            .filter(|button| button.earliest_version() <= format_version);

        for button in required {
            for state in ButtonState::ALL {
                if self.get_button(button, state).is_none() {
                    return Err(ThemeError::MissingButton {
                        function: button.as_str(),
                        state: state.as_str(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Paints every piece in order, and the buttons just before the overlay.
    pub fn draw(
        &self,
        fgeom: &FrameGeometry,
        frame: &FrameRender<'_>,
        palette: &Palette,
        backend: &mut dyn DrawBackend,
    ) {
        let info = DrawInfo {
            mini_icon: frame.mini_icon,
            icon: frame.icon,
            title: frame.title,
            fgeom: Some(fgeom),
        };
        let (dx, dy) = frame.offset;

        for piece in FramePiece::ALL {
            if piece == FramePiece::Overlay {
                for button in ButtonType::ALL {
                    let state = frame.button_states[button.index()];
                    for slot in 0..button.slot_count() {
                        let rect = button.rect(fgeom, slot).translated(dx, dy);
                        let list = self.get_button(button, state);
                        paint(list, rect, frame.clip, &info, palette, backend);
                    }
                }
            }

            let rect = piece.rect(fgeom).translated(dx, dy);
            paint(self.piece(piece), rect, frame.clip, &info, palette, backend);
        }
    }
}

fn paint(
    list: Option<&Rc<DrawOpList>>,
    rect: Rect,
    clip: Option<Rect>,
    info: &DrawInfo<'_>,
    palette: &Palette,
    backend: &mut dyn DrawBackend,
) {
    let combined = clip.map_or(rect, |clip| clip.intersect(rect));
    if combined.is_empty() {
        return;
    }
    if let Some(list) = list {
        draw_op_list(list, palette, backend, Some(combined), info, rect);
    }
}
