use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;

use super::list::DrawOpList;
use super::spec::DrawSpec;
use crate::color::{AlphaGradientSpec, Color, ColorSpec, GradientSpec, WidgetState};
use crate::expr::{ExprEnv, Variable};
use crate::geometry::Rect;

/// How an image is stretched to a size other than its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFillType {
    Tile,
    #[default]
    Scale,
}

impl ImageFillType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tile => "tile",
            Self::Scale => "scale",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::Tile, Self::Scale]
            .into_iter()
            .find(|fill| fill.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowType {
    #[default]
    None,
    In,
    Out,
    EtchedIn,
    EtchedOut,
}

impl ShadowType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::In => "in",
            Self::Out => "out",
            Self::EtchedIn => "etched_in",
            Self::EtchedOut => "etched_out",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [
            Self::None,
            Self::In,
            Self::Out,
            Self::EtchedIn,
            Self::EtchedOut,
        ]
        .into_iter()
        .find(|shadow| shadow.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowType {
    Up,
    #[default]
    Down,
    Left,
    Right,
    None,
}

impl ArrowType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::Up, Self::Down, Self::Left, Self::Right, Self::None]
            .into_iter()
            .find(|arrow| arrow.as_str() == value)
    }
}

/// `x`, `y`, `width` and `height` expressions of an op.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecRect {
    pub x: DrawSpec,
    pub y: DrawSpec,
    pub width: DrawSpec,
    pub height: DrawSpec,
}

impl SpecRect {
    pub fn new(x: DrawSpec, y: DrawSpec, width: DrawSpec, height: DrawSpec) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Covers the whole target rect: `0, 0, width, height`.
    pub fn fill() -> Self {
        Self::new(
            DrawSpec::literal(0),
            DrawSpec::literal(0),
            DrawSpec::variable(Variable::Width),
            DrawSpec::variable(Variable::Height),
        )
    }

    /// Literal coordinates relative to the target rect.
    pub fn from_literal(rect: Rect) -> Self {
        Self::new(
            DrawSpec::literal(rect.x),
            DrawSpec::literal(rect.y),
            DrawSpec::literal(rect.width),
            DrawSpec::literal(rect.height),
        )
    }

    /// Absolute rectangle; broken expressions evaluate to zero.
    pub fn evaluate(&self, env: &ExprEnv) -> Rect {
        Rect::new(
            self.x.position_x_unchecked(env),
            self.y.position_y_unchecked(env),
            self.width.size_unchecked(env),
            self.height.size_unchecked(env),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineOp {
    pub color: ColorSpec,
    pub dash_on_length: i32,
    pub dash_off_length: i32,
    pub width: i32,
    pub x1: DrawSpec,
    pub y1: DrawSpec,
    pub x2: Option<DrawSpec>,
    pub y2: Option<DrawSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleOp {
    pub color: ColorSpec,
    pub filled: bool,
    pub rect: SpecRect,
}

/// Angles are in turns, `0.0` at twelve o'clock, growing clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcOp {
    pub color: ColorSpec,
    pub filled: bool,
    pub rect: SpecRect,
    pub start_angle: f64,
    pub extent_angle: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipOp {
    pub rect: SpecRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TintOp {
    pub color: ColorSpec,
    pub alpha: Option<AlphaGradientSpec>,
    pub rect: SpecRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientOp {
    pub gradient: GradientSpec,
    pub alpha: Option<AlphaGradientSpec>,
    pub rect: SpecRect,
}

#[derive(Debug, Clone)]
pub struct ImageOp {
    pub image: Option<Rc<RgbaImage>>,
    /// Recolors the image by intensity before it is scaled.
    pub colorize: Option<ColorSpec>,
    pub alpha: Option<AlphaGradientSpec>,
    pub rect: SpecRect,
    pub fill: ImageFillType,
    pub vertical_stripes: bool,
    pub horizontal_stripes: bool,
    colorize_cache: RefCell<Option<(u32, Rc<RgbaImage>)>>,
}

impl ImageOp {
    pub fn new(image: Option<Rc<RgbaImage>>, rect: SpecRect) -> Self {
        Self {
            image,
            colorize: None,
            alpha: None,
            rect,
            fill: ImageFillType::default(),
            vertical_stripes: false,
            horizontal_stripes: false,
            colorize_cache: RefCell::new(None),
        }
    }

    /// The colorized image, reusing the last result while the colorize
    /// color stays the same.
    pub(crate) fn colorized(&self, source: &RgbaImage, color: Color) -> Rc<RgbaImage> {
        let pixel = color.rgb_pixel();
        let mut cache = self.colorize_cache.borrow_mut();
        if let Some((cached_pixel, image)) = cache.as_ref() {
            if *cached_pixel == pixel {
                return Rc::clone(image);
            }
        }

        let image = Rc::new(super::pixbuf::colorize(source, color));
        *cache = Some((pixel, Rc::clone(&image)));
        image
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowOp {
    pub state: WidgetState,
    pub shadow: ShadowType,
    pub arrow: ArrowType,
    pub filled: bool,
    pub rect: SpecRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxOp {
    pub state: WidgetState,
    pub shadow: ShadowType,
    pub rect: SpecRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VLineOp {
    pub state: WidgetState,
    pub x: DrawSpec,
    pub y1: DrawSpec,
    pub y2: DrawSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconOp {
    pub alpha: Option<AlphaGradientSpec>,
    pub rect: SpecRect,
    pub fill: ImageFillType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleOp {
    pub color: ColorSpec,
    pub x: DrawSpec,
    pub y: DrawSpec,
    /// Right edge past which the title is ellipsized.
    pub ellipsize_width: Option<DrawSpec>,
}

#[derive(Debug, Clone)]
pub struct OpListOp {
    pub list: Rc<DrawOpList>,
    pub rect: SpecRect,
}

#[derive(Debug, Clone)]
pub struct TileOp {
    pub list: Rc<DrawOpList>,
    pub rect: SpecRect,
    pub tile_xoffset: DrawSpec,
    pub tile_yoffset: DrawSpec,
    pub tile_width: DrawSpec,
    pub tile_height: DrawSpec,
}

/// One primitive drawing instruction.
#[derive(Debug, Clone)]
pub enum DrawOp {
    Line(LineOp),
    Rectangle(RectangleOp),
    Arc(ArcOp),
    Clip(ClipOp),
    Tint(TintOp),
    Gradient(GradientOp),
    Image(ImageOp),
    ThemeArrow(ArrowOp),
    ThemeBox(BoxOp),
    ThemeVLine(VLineOp),
    Icon(IconOp),
    Title(TitleOp),
    OpList(OpListOp),
    Tile(TileOp),
}

impl DrawOp {
    /// Nested list drawn by this op, if any.
    pub fn child_list(&self) -> Option<&Rc<DrawOpList>> {
        match self {
            Self::OpList(op) => Some(&op.list),
            Self::Tile(op) => Some(&op.list),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_names_round_trip() {
        for fill in [ImageFillType::Tile, ImageFillType::Scale] {
            assert_eq!(ImageFillType::parse(fill.as_str()), Some(fill));
        }
        assert_eq!(ShadowType::parse("etched_out"), Some(ShadowType::EtchedOut));
        assert_eq!(ArrowType::parse("none"), Some(ArrowType::None));
        assert_eq!(ArrowType::parse("sideways"), None);
    }

    #[test]
    fn fill_rect_covers_the_target() {
        let env = ExprEnv::new(Rect::new(5, 6, 40, 30));
        assert_eq!(SpecRect::fill().evaluate(&env), Rect::new(5, 6, 40, 30));
    }

    #[test]
    fn colorize_cache_is_keyed_by_pixel() {
        let source = RgbaImage::from_pixel(2, 2, image::Rgba([128, 128, 128, 255]));
        let op = ImageOp::new(None, SpecRect::fill());

        let red = Color::from_rgb8(0xff, 0, 0);
        let first = op.colorized(&source, red);
        let again = op.colorized(&source, red);
        assert!(Rc::ptr_eq(&first, &again));

        let blue = op.colorized(&source, Color::from_rgb8(0, 0, 0xff));
        assert!(!Rc::ptr_eq(&first, &blue));
    }
}
