//! Draw-op lists and the interpreter that renders them onto a backend.

mod backend;
mod interp;
mod list;
mod op;
mod pixbuf;
mod spec;

pub use backend::{
    DrawBackend, DrawCall, DrawInfo, LineStroke, RecordingBackend, TitleLayout, WidgetPaint,
};
pub use interp::draw_op_list;
pub use list::DrawOpList;
pub use op::{
    ArcOp, ArrowOp, ArrowType, BoxOp, ClipOp, DrawOp, GradientOp, IconOp, ImageFillType, ImageOp,
    LineOp, OpListOp, RectangleOp, ShadowType, SpecRect, TileOp, TintOp, TitleOp, VLineOp,
};
pub use pixbuf::{colorize, scale_and_alpha, ScaleOptions};
pub use spec::DrawSpec;
