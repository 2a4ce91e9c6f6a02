use image::RgbaImage;
use serde::Serialize;

use super::op::{ArrowType, ShadowType};
use crate::color::{Color, WidgetState};
use crate::geometry::Rect;
use crate::layout::FrameGeometry;

/// A title that has already been shaped by the text system.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TitleLayout {
    pub text: String,
    /// Layout box, relative to the drawing origin.
    pub logical: Rect,
    /// Box actually covered by glyphs.
    pub ink: Rect,
}

impl TitleLayout {
    /// Approximates a single-line layout with fixed advance glyphs.
    pub fn monospace(text: &str, char_width: i32, line_height: i32) -> Self {
        let width = char_width.saturating_mul(text.chars().count() as i32);
        let logical = Rect::new(0, 0, width, line_height);
        Self {
            text: text.to_string(),
            logical,
            ink: logical,
        }
    }
}

/// Per-frame inputs to the interpreter besides the rect itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawInfo<'a> {
    pub mini_icon: Option<&'a RgbaImage>,
    pub icon: Option<&'a RgbaImage>,
    pub title: Option<&'a TitleLayout>,
    pub fgeom: Option<&'a FrameGeometry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LineStroke {
    pub width: i32,
    /// `(on, off)` lengths when the line is dashed.
    pub dash: Option<(i32, i32)>,
}

/// Toolkit-style widget painting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetPaint {
    pub state: WidgetState,
    pub shadow: ShadowType,
}

/// Rasterizer the interpreter emits primitives to. `clip` bounds every call.
pub trait DrawBackend {
    fn draw_point(&mut self, clip: Rect, color: Color, x: i32, y: i32);

    fn draw_line(
        &mut self,
        clip: Rect,
        color: Color,
        stroke: LineStroke,
        from: (i32, i32),
        to: (i32, i32),
    );

    fn draw_rectangle(&mut self, clip: Rect, color: Color, filled: bool, rect: Rect);

    /// `angles` is `(start, extent)`, in turns.
    fn draw_arc(
        &mut self,
        clip: Rect,
        color: Color,
        filled: bool,
        rect: Rect,
        angles: (f64, f64),
    );

    /// Copies `image` starting at `(src_x, src_y)` into `dest`.
    fn draw_image(&mut self, image: &RgbaImage, src_x: i32, src_y: i32, dest: Rect);

    fn paint_arrow(
        &mut self,
        clip: Rect,
        paint: WidgetPaint,
        arrow: ArrowType,
        filled: bool,
        rect: Rect,
    );

    fn paint_box(&mut self, clip: Rect, paint: WidgetPaint, rect: Rect);

    fn paint_vline(&mut self, clip: Rect, state: WidgetState, x: i32, y1: i32, y2: i32);

    /// `ellipsize_width` is set when the title must be cut to that width.
    fn draw_title(
        &mut self,
        clip: Rect,
        color: Color,
        origin: (i32, i32),
        title: &TitleLayout,
        ellipsize_width: Option<i32>,
    );
}

/// One primitive emitted by the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCall {
    Point {
        clip: Rect,
        color: [u8; 3],
        x: i32,
        y: i32,
    },
    Line {
        clip: Rect,
        color: [u8; 3],
        stroke: LineStroke,
        from: (i32, i32),
        to: (i32, i32),
    },
    Rectangle {
        clip: Rect,
        color: [u8; 3],
        filled: bool,
        rect: Rect,
    },
    Arc {
        clip: Rect,
        color: [u8; 3],
        filled: bool,
        rect: Rect,
        start: f64,
        extent: f64,
    },
    Image {
        size: (u32, u32),
        /// Top-left source pixel of the copied area.
        first_pixel: [u8; 4],
        src: (i32, i32),
        dest: Rect,
    },
    Arrow {
        clip: Rect,
        state: &'static str,
        shadow: &'static str,
        arrow: &'static str,
        filled: bool,
        rect: Rect,
    },
    Box {
        clip: Rect,
        state: &'static str,
        shadow: &'static str,
        rect: Rect,
    },
    VLine {
        clip: Rect,
        state: &'static str,
        x: i32,
        y1: i32,
        y2: i32,
    },
    Title {
        clip: Rect,
        color: [u8; 3],
        origin: (i32, i32),
        text: String,
        ellipsize_width: Option<i32>,
    },
}

/// Backend that records every call, for inspection and dumping.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub calls: Vec<DrawCall>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }
}

impl DrawBackend for RecordingBackend {
    fn draw_point(&mut self, clip: Rect, color: Color, x: i32, y: i32) {
        self.calls.push(DrawCall::Point {
            clip,
            color: color.to_rgb8(),
            x,
            y,
        });
    }

    fn draw_line(
        &mut self,
        clip: Rect,
        color: Color,
        stroke: LineStroke,
        from: (i32, i32),
        to: (i32, i32),
    ) {
        self.calls.push(DrawCall::Line {
            clip,
            color: color.to_rgb8(),
            stroke,
            from,
            to,
        });
    }

    fn draw_rectangle(&mut self, clip: Rect, color: Color, filled: bool, rect: Rect) {
        self.calls.push(DrawCall::Rectangle {
            clip,
            color: color.to_rgb8(),
            filled,
            rect,
        });
    }

    fn draw_arc(
        &mut self,
        clip: Rect,
        color: Color,
        filled: bool,
        rect: Rect,
        (start, extent): (f64, f64),
    ) {
        self.calls.push(DrawCall::Arc {
            clip,
            color: color.to_rgb8(),
            filled,
            rect,
            start,
            extent,
        });
    }

    fn draw_image(&mut self, image: &RgbaImage, src_x: i32, src_y: i32, dest: Rect) {
        let first_pixel = u32::try_from(src_x)
            .ok()
            .zip(u32::try_from(src_y).ok())
            .and_then(|(x, y)| image.get_pixel_checked(x, y))
            .map_or([0; 4], |pixel| pixel.0);
        self.calls.push(DrawCall::Image {
            size: image.dimensions(),
            first_pixel,
            src: (src_x, src_y),
            dest,
        });
    }

    fn paint_arrow(
        &mut self,
        clip: Rect,
        paint: WidgetPaint,
        arrow: ArrowType,
        filled: bool,
        rect: Rect,
    ) {
        self.calls.push(DrawCall::Arrow {
            clip,
            state: paint.state.as_str(),
            shadow: paint.shadow.as_str(),
            arrow: arrow.as_str(),
            filled,
            rect,
        });
    }

    fn paint_box(&mut self, clip: Rect, paint: WidgetPaint, rect: Rect) {
        self.calls.push(DrawCall::Box {
            clip,
            state: paint.state.as_str(),
            shadow: paint.shadow.as_str(),
            rect,
        });
    }

    fn paint_vline(&mut self, clip: Rect, state: WidgetState, x: i32, y1: i32, y2: i32) {
        self.calls.push(DrawCall::VLine {
            clip,
            state: state.as_str(),
            x,
            y1,
            y2,
        });
    }

    fn draw_title(
        &mut self,
        clip: Rect,
        color: Color,
        origin: (i32, i32),
        title: &TitleLayout,
        ellipsize_width: Option<i32>,
    ) {
        self.calls.push(DrawCall::Title {
            clip,
            color: color.to_rgb8(),
            origin,
            text: title.text.clone(),
            ellipsize_width,
        });
    }
}
