//! Frame layouts and the geometry solver that places buttons and the title.
mod buttons;
mod error;
mod geometry;

pub use buttons::{ButtonFunction, ButtonLayout, ButtonSlot, MAX_BUTTONS_PER_CORNER};
pub use error::{LayoutError, LayoutResult};
pub use geometry::{BackgroundSlot, ButtonSpace, FrameGeometry, MAX_MIDDLE_BACKGROUNDS};

use crate::geometry::Border;
use crate::theme::FrameFlags;

const MIN_BUTTON_ASPECT: f64 = 0.1;
const MAX_BUTTON_ASPECT: f64 = 15.0;

/// How button sizes are derived.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonSizing {
    /// Height fills the titlebar, width is height divided by the aspect.
    Aspect(f64),
    Fixed,
    #[default]
    Unset,
}

/// Border widths and button metrics of one kind of frame.
///
/// Integer fields start at `-1`, meaning "not specified by the theme";
/// [`FrameLayout::validate`] rejects layouts that leave any of them unset.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub left_width: i32,
    pub right_width: i32,
    pub bottom_height: i32,
    pub title_border: Border,
    pub title_vertical_pad: i32,
    pub right_titlebar_edge: i32,
    pub left_titlebar_edge: i32,
    pub button_sizing: ButtonSizing,
    pub button_width: i32,
    pub button_height: i32,
    pub button_border: Border,
    pub title_scale: f64,
    pub has_title: bool,
    pub hide_buttons: bool,
    pub top_left_corner_rounded_radius: i32,
    pub top_right_corner_rounded_radius: i32,
    pub bottom_left_corner_rounded_radius: i32,
    pub bottom_right_corner_rounded_radius: i32,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            left_width: -1,
            right_width: -1,
            bottom_height: -1,
            title_border: Border::unset(),
            title_vertical_pad: -1,
            right_titlebar_edge: -1,
            left_titlebar_edge: -1,
            button_sizing: ButtonSizing::Unset,
            button_width: -1,
            button_height: -1,
            button_border: Border::unset(),
            title_scale: 1.0,
            has_title: true,
            hide_buttons: false,
            top_left_corner_rounded_radius: 0,
            top_right_corner_rounded_radius: 0,
            bottom_left_corner_rounded_radius: 0,
            bottom_right_corner_rounded_radius: 0,
        }
    }
}

impl FrameLayout {
    pub fn validate(&self) -> LayoutResult<()> {
        check_value(self.left_width, "left_width")?;
        check_value(self.right_width, "right_width")?;
        check_value(self.bottom_height, "bottom_height")?;
        check_border(&self.title_border, "title_border")?;
        check_value(self.title_vertical_pad, "title_vertical_pad")?;
        check_value(self.right_titlebar_edge, "right_titlebar_edge")?;
        check_value(self.left_titlebar_edge, "left_titlebar_edge")?;

        match self.button_sizing {
            ButtonSizing::Aspect(aspect) => {
                if !(MIN_BUTTON_ASPECT..=MAX_BUTTON_ASPECT).contains(&aspect) {
                    return Err(LayoutError::UnreasonableAspect(aspect));
                }
            }
            ButtonSizing::Fixed => {
                check_value(self.button_width, "button_width")?;
                check_value(self.button_height, "button_height")?;
            }
            ButtonSizing::Unset => return Err(LayoutError::MissingButtonSize),
        }

        check_border(&self.button_border, "button_border")
    }

    /// Frame border sizes around a client for the given title text height.
    pub fn borders(&self, text_height: i32, flags: FrameFlags) -> Border {
        if flags.contains(FrameFlags::FULLSCREEN) {
            return Border::new(0, 0, 0, 0);
        }

        let text_height = if self.has_title { text_height } else { 0 };
        let buttons_height = self.button_height + self.button_border.vertical();
        let title_height = text_height + self.title_vertical_pad + self.title_border.vertical();
        let bottom = if flags.contains(FrameFlags::SHADED) {
            0
        } else {
            self.bottom_height
        };

        Border::new(
            self.left_width,
            self.right_width,
            buttons_height.max(title_height),
            bottom,
        )
    }
}

fn check_value(value: i32, name: &'static str) -> LayoutResult<()> {
    if value < 0 {
        return Err(LayoutError::MissingDimension { name });
    }
    Ok(())
}

fn check_border(border: &Border, name: &'static str) -> LayoutResult<()> {
    let missing = [
        ("top", border.top),
        ("bottom", border.bottom),
        ("left", border.left),
        ("right", border.right),
    ]
    .into_iter()
    .find(|(_, value)| *value < 0);

    match missing {
        Some((side, _)) => Err(LayoutError::MissingBorderDimension { side, border: name }),
        None => Ok(()),
    }
}
