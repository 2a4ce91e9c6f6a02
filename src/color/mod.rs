//! Color specifications and their resolution against a widget palette.
mod blend;
mod error;
pub mod gradient;
mod palette;
mod parse;

use image::Rgba;

pub use blend::{average, blend, shade};
pub use error::{ColorError, ColorResult};
pub use gradient::{AlphaGradientSpec, GradientSpec, GradientType};
pub use palette::Palette;

/// A color with 16-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(0xffff, 0xffff, 0xffff);

    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            red as u16 * 257,
            green as u16 * 257,
            blue as u16 * 257,
        )
    }

    pub const fn to_rgb8(self) -> [u8; 3] {
        [
            (self.red >> 8) as u8,
            (self.green >> 8) as u8,
            (self.blue >> 8) as u8,
        ]
    }

    pub const fn to_rgba8(self, alpha: u8) -> Rgba<u8> {
        let [red, green, blue] = self.to_rgb8();
        Rgba([red, green, blue, alpha])
    }

    /// 24-bit `0xRRGGBB` value of the color.
    pub const fn rgb_pixel(self) -> u32 {
        let [red, green, blue] = self.to_rgb8();
        (red as u32) << 16 | (green as u32) << 8 | blue as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorComponent {
    Fg,
    Bg,
    Light,
    Dark,
    Mid,
    Text,
    Base,
    TextAa,
}

impl ColorComponent {
    pub const COUNT: usize = 8;
    pub const ALL: [ColorComponent; Self::COUNT] = [
        Self::Fg,
        Self::Bg,
        Self::Light,
        Self::Dark,
        Self::Mid,
        Self::Text,
        Self::Base,
        Self::TextAa,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fg => "fg",
            Self::Bg => "bg",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Mid => "mid",
            Self::Text => "text",
            Self::Base => "base",
            Self::TextAa => "text_aa",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|component| component.as_str() == value)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Widget state a palette entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WidgetState {
    #[default]
    Normal,
    Active,
    Prelight,
    Selected,
    Insensitive,
}

impl WidgetState {
    pub const COUNT: usize = 5;
    pub const ALL: [WidgetState; Self::COUNT] = [
        Self::Normal,
        Self::Active,
        Self::Prelight,
        Self::Selected,
        Self::Insensitive,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Active => "active",
            Self::Prelight => "prelight",
            Self::Selected => "selected",
            Self::Insensitive => "insensitive",
        }
    }

    /// Accepts the all-lowercase or all-uppercase spelling.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| {
            state.as_str() == value || state.as_str().to_ascii_uppercase() == value
        })
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// How a draw op describes a color.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Basic(Color),
    Palette {
        component: ColorComponent,
        state: WidgetState,
    },
    Blend {
        background: Box<ColorSpec>,
        foreground: Box<ColorSpec>,
        alpha: f64,
    },
    Shade {
        base: Box<ColorSpec>,
        factor: f64,
    },
}

impl ColorSpec {
    pub const fn palette(component: ColorComponent, state: WidgetState) -> Self {
        Self::Palette { component, state }
    }

    pub fn blend(background: ColorSpec, foreground: ColorSpec, alpha: f64) -> Self {
        Self::Blend {
            background: Box::new(background),
            foreground: Box::new(foreground),
            alpha,
        }
    }

    pub fn shade(base: ColorSpec, factor: f64) -> Self {
        Self::Shade {
            base: Box::new(base),
            factor,
        }
    }

    pub fn resolve(&self, palette: &Palette) -> Color {
        match self {
            Self::Basic(color) => *color,
            Self::Palette { component, state } => palette.get(*component, *state),
            Self::Blend {
                background,
                foreground,
                alpha,
            } => blend(
                background.resolve(palette),
                foreground.resolve(palette),
                *alpha,
            ),
            Self::Shade { base, factor } => shade(base.resolve(palette), *factor),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        Self::Basic(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_widening_fills_the_low_byte() {
        let color = Color::from_rgb8(0xdc, 0xda, 0xd5);
        assert_eq!(color, Color::new(0xdcdc, 0xdada, 0xd5d5));
        assert_eq!(color.to_rgb8(), [0xdc, 0xda, 0xd5]);
        assert_eq!(color.rgb_pixel(), 0x00dc_dad5);
    }

    #[test]
    fn widget_state_accepts_both_cases_only() {
        assert_eq!(WidgetState::parse("prelight"), Some(WidgetState::Prelight));
        assert_eq!(WidgetState::parse("PRELIGHT"), Some(WidgetState::Prelight));
        assert_eq!(WidgetState::parse("Prelight"), None);
    }

    #[test]
    fn palette_spec_reads_the_palette() {
        let mut palette = Palette::default();
        palette.set(ColorComponent::Fg, WidgetState::Selected, Color::new(1, 2, 3));
        let spec = ColorSpec::palette(ColorComponent::Fg, WidgetState::Selected);
        assert_eq!(spec.resolve(&palette), Color::new(1, 2, 3));
    }

    #[test]
    fn nested_specs_resolve_recursively() {
        let palette = Palette::default();
        let spec = ColorSpec::shade(
            ColorSpec::blend(Color::BLACK.into(), Color::WHITE.into(), 0.5),
            0.0,
        );
        assert_eq!(spec.resolve(&palette), Color::BLACK);
    }
}
