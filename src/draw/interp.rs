use std::borrow::Cow;
use std::rc::Rc;

use image::RgbaImage;

use super::backend::{DrawBackend, DrawInfo, LineStroke, WidgetPaint};
use super::list::DrawOpList;
use super::op::{DrawOp, ImageOp, TileOp, TitleOp};
use super::pixbuf::{self, ScaleOptions};
use crate::color::Palette;
use crate::expr::ExprEnv;
use crate::geometry::Rect;

/// Draws every op of `list` into `rect`.
///
/// `clip` defaults to `rect`. A clip op narrows the clip for the ops after it,
/// always starting again from the list's own clip; ops under an empty clip are
/// skipped.
pub fn draw_op_list(
    list: &DrawOpList,
    palette: &Palette,
    backend: &mut dyn DrawBackend,
    clip: Option<Rect>,
    info: &DrawInfo<'_>,
    rect: Rect,
) {
    Interpreter {
        palette,
        backend,
        info,
    }
    .draw_list(list, clip, rect);
}

fn fill_env(info: &DrawInfo<'_>, rect: Rect) -> ExprEnv {
    let mut env = ExprEnv::new(rect);

    if let Some(fgeom) = info.fgeom {
        env.left_width = fgeom.left_width;
        env.right_width = fgeom.right_width;
        env.top_height = fgeom.top_height;
        env.bottom_height = fgeom.bottom_height;
        env.frame_x_center = fgeom.width / 2 - rect.x;
        env.frame_y_center = fgeom.height / 2 - rect.y;
    }
    if let Some(mini_icon) = info.mini_icon {
        env.mini_icon_width = dimension(mini_icon.width());
        env.mini_icon_height = dimension(mini_icon.height());
    }
    if let Some(icon) = info.icon {
        env.icon_width = dimension(icon.width());
        env.icon_height = dimension(icon.height());
    }
    if let Some(title) = info.title {
        env.title_width = title.logical.width;
        env.title_height = title.logical.height;
    }

    env
}

fn dimension(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

struct Interpreter<'a, 'i> {
    palette: &'a Palette,
    backend: &'a mut dyn DrawBackend,
    info: &'a DrawInfo<'i>,
}

impl Interpreter<'_, '_> {
    fn draw_list(&mut self, list: &DrawOpList, clip: Option<Rect>, rect: Rect) {
        if list.is_empty() {
            return;
        }

        let mut env = fill_env(self.info, rect);
        let list_clip = clip.unwrap_or(rect);
        let mut active_clip = list_clip;

        for op in list.ops() {
            if let DrawOp::Clip(clip_op) = op {
                active_clip = list_clip.intersect(clip_op.rect.evaluate(&env));
            } else if !active_clip.is_empty() {
                self.draw(op, &mut env, active_clip);
            }
        }
    }

    fn draw(&mut self, op: &DrawOp, env: &mut ExprEnv, clip: Rect) {
        match op {
            DrawOp::Line(line) => {
                let color = line.color.resolve(self.palette);
                let stroke = LineStroke {
                    width: line.width,
                    dash: (line.dash_on_length > 0 && line.dash_off_length > 0)
                        .then_some((line.dash_on_length, line.dash_off_length)),
                };
                let x1 = line.x1.position_x_unchecked(env);
                let y1 = line.y1.position_y_unchecked(env);

                if line.x2.is_none() && line.y2.is_none() && line.width == 0 {
                    self.backend.draw_point(clip, color, x1, y1);
                } else {
                    let x2 = line
                        .x2
                        .as_ref()
                        .map_or(x1, |spec| spec.position_x_unchecked(env));
                    let y2 = line
                        .y2
                        .as_ref()
                        .map_or(y1, |spec| spec.position_y_unchecked(env));
                    self.backend
                        .draw_line(clip, color, stroke, (x1, y1), (x2, y2));
                }
            }
            DrawOp::Rectangle(rectangle) => {
                let color = rectangle.color.resolve(self.palette);
                let rect = rectangle.rect.evaluate(env);
                self.backend
                    .draw_rectangle(clip, color, rectangle.filled, rect);
            }
            DrawOp::Arc(arc) => {
                let color = arc.color.resolve(self.palette);
                let rect = arc.rect.evaluate(env);
                self.backend.draw_arc(
                    clip,
                    color,
                    arc.filled,
                    rect,
                    (arc.start_angle, arc.extent_angle),
                );
            }
            // Clips only take effect inside a list.
            DrawOp::Clip(_) => {}
            DrawOp::Tint(tint) => {
                let color = tint.color.resolve(self.palette);
                let rect = tint.rect.evaluate(env);
                let needs_alpha = tint.alpha.as_ref().is_some_and(|alpha| alpha.needs_alpha());

                if !needs_alpha {
                    self.backend.draw_rectangle(clip, color, true, rect);
                    return;
                }
                let (Ok(width), Ok(height)) =
                    (u32::try_from(rect.width), u32::try_from(rect.height))
                else {
                    return;
                };
                let solid = RgbaImage::from_pixel(width, height, color.to_rgba8(0xff));
                let tinted = pixbuf::apply_alpha(Cow::Owned(solid), tint.alpha.as_ref());
                self.render_image(clip, &tinted, rect.x, rect.y);
            }
            DrawOp::Gradient(gradient) => {
                let rect = gradient.rect.evaluate(env);
                let Some(rendered) =
                    gradient
                        .gradient
                        .render(self.palette, rect.width, rect.height)
                else {
                    return;
                };
                let rendered = pixbuf::apply_alpha(Cow::Owned(rendered), gradient.alpha.as_ref());
                self.render_image(clip, &rendered, rect.x, rect.y);
            }
            DrawOp::Image(image) => self.draw_image(image, env, clip),
            DrawOp::ThemeArrow(arrow) => {
                let rect = arrow.rect.evaluate(env);
                let paint = WidgetPaint {
                    state: arrow.state,
                    shadow: arrow.shadow,
                };
                self.backend
                    .paint_arrow(clip, paint, arrow.arrow, arrow.filled, rect);
            }
            DrawOp::ThemeBox(widget_box) => {
                let rect = widget_box.rect.evaluate(env);
                let paint = WidgetPaint {
                    state: widget_box.state,
                    shadow: widget_box.shadow,
                };
                self.backend.paint_box(clip, paint, rect);
            }
            DrawOp::ThemeVLine(vline) => {
                let x = vline.x.position_x_unchecked(env);
                let y1 = vline.y1.position_y_unchecked(env);
                let y2 = vline.y2.position_y_unchecked(env);
                self.backend.paint_vline(clip, vline.state, x, y1, y2);
            }
            DrawOp::Icon(icon) => {
                let width = icon.rect.width.size_unchecked(env);
                let height = icon.rect.height.size_unchecked(env);
                let fits_mini = |mini: &&RgbaImage| {
                    width <= dimension(mini.width()) && height <= dimension(mini.height())
                };
                let Some(source) = self.info.mini_icon.filter(fits_mini).or(self.info.icon) else {
                    return;
                };
                let options = ScaleOptions {
                    alpha: icon.alpha.as_ref(),
                    fill: icon.fill,
                    ..ScaleOptions::default()
                };
                let Some(scaled) = pixbuf::scale_and_alpha(source, options, width, height) else {
                    return;
                };
                let x = icon.rect.x.position_x_unchecked(env);
                let y = icon.rect.y.position_y_unchecked(env);
                self.render_image(clip, &scaled, x, y);
            }
            DrawOp::Title(title) => self.draw_title(title, env, clip),
            DrawOp::OpList(nested) => {
                let rect = nested.rect.evaluate(env);
                self.draw_list(&nested.list, Some(clip), rect);
            }
            DrawOp::Tile(tile) => self.draw_tile(tile, env, clip),
        }
    }

    fn draw_image(&mut self, op: &ImageOp, env: &mut ExprEnv, clip: Rect) {
        if let Some(image) = &op.image {
            env.object_width = Some(dimension(image.width()));
            env.object_height = Some(dimension(image.height()));
        }

        let width = op.rect.width.size_unchecked(env);
        let height = op.rect.height.size_unchecked(env);

        let Some(source) = &op.image else {
            return;
        };
        let source = match &op.colorize {
            Some(spec) => op.colorized(source, spec.resolve(self.palette)),
            None => Rc::clone(source),
        };
        let options = ScaleOptions {
            alpha: op.alpha.as_ref(),
            fill: op.fill,
            vertical_stripes: op.vertical_stripes,
            horizontal_stripes: op.horizontal_stripes,
        };
        let Some(scaled) = pixbuf::scale_and_alpha(&source, options, width, height) else {
            return;
        };

        let x = op.rect.x.position_x_unchecked(env);
        let y = op.rect.y.position_y_unchecked(env);
        self.render_image(clip, &scaled, x, y);
    }

    fn draw_title(&mut self, op: &TitleOp, env: &ExprEnv, clip: Rect) {
        let Some(title) = self.info.title else {
            return;
        };
        let color = op.color.resolve(self.palette);
        let x = op.x.position_x_unchecked(env);
        let y = op.y.position_y_unchecked(env);

        let ellipsize_width = op.ellipsize_width.as_ref().and_then(|spec| {
            let (ink, logical) = (title.ink, title.logical);
            let right_bearing = (ink.right() - logical.right()).max(0);
            let available = (spec.position_x_unchecked(env) - env.rect.x - right_bearing).max(0);
            (logical.width > available).then_some(available)
        });

        self.backend
            .draw_title(clip, color, (x, y), title, ellipsize_width);
    }

    fn draw_tile(&mut self, op: &TileOp, env: &ExprEnv, clip: Rect) {
        let area = op.rect.evaluate(env);
        let tile_clip = clip.intersect(area);
        if tile_clip.is_empty() {
            return;
        }

        let x_offset = op.tile_xoffset.position_x_unchecked(env) - env.rect.x;
        let y_offset = op.tile_yoffset.position_y_unchecked(env) - env.rect.y;
        let tile_width = op.tile_width.size_unchecked(env);
        let tile_height = op.tile_height.size_unchecked(env);
        if tile_width <= 0 || tile_height <= 0 {
            return;
        }

        let mut x = area.x - x_offset;
        while x < area.right() {
            let mut y = area.y - y_offset;
            while y < area.bottom() {
                let tile = Rect::new(x, y, tile_width, tile_height);
                self.draw_list(&op.list, Some(tile_clip), tile);
                y += tile_height;
            }
            x += tile_width;
        }
    }

    fn render_image(&mut self, clip: Rect, image: &RgbaImage, x: i32, y: i32) {
        let bounds = Rect::new(x, y, dimension(image.width()), dimension(image.height()));
        let visible = clip.intersect(bounds);
        if visible.is_empty() {
            return;
        }
        self.backend
            .draw_image(image, visible.x - x, visible.y - y, visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{AlphaGradientSpec, Color, ColorSpec, GradientSpec, GradientType};
    use crate::draw::backend::{DrawCall, RecordingBackend, TitleLayout};
    use crate::draw::op::{
        ClipOp, GradientOp, IconOp, ImageFillType, LineOp, OpListOp, RectangleOp, SpecRect,
        TintOp,
    };
    use crate::draw::spec::DrawSpec;
    use crate::expr::Variable;
    use crate::layout::FrameGeometry;

    const RED: Color = Color::from_rgb8(0xff, 0, 0);

    fn literal(x: i32, y: i32, width: i32, height: i32) -> SpecRect {
        SpecRect::from_literal(Rect::new(x, y, width, height))
    }

    fn filled(rect: SpecRect) -> DrawOp {
        DrawOp::Rectangle(RectangleOp {
            color: RED.into(),
            filled: true,
            rect,
        })
    }

    fn run(list: &DrawOpList, info: &DrawInfo<'_>, rect: Rect) -> Vec<DrawCall> {
        let mut backend = RecordingBackend::new();
        draw_op_list(list, &Palette::default(), &mut backend, None, info, rect);
        backend.into_calls()
    }

    fn rectangles(calls: &[DrawCall]) -> Vec<(Rect, Rect)> {
        calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Rectangle { clip, rect, .. } => Some((*clip, *rect)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn clip_ops_narrow_later_ops_from_the_list_clip() {
        let list = DrawOpList::from_iter([
            filled(SpecRect::fill()),
            DrawOp::Clip(ClipOp {
                rect: literal(0, 0, 5, 5),
            }),
            filled(SpecRect::fill()),
            DrawOp::Clip(ClipOp {
                rect: literal(2, 2, 40, 40),
            }),
            filled(SpecRect::fill()),
        ]);
        let rect = Rect::new(10, 10, 20, 20);
        let calls = rectangles(&run(&list, &DrawInfo::default(), rect));

        assert_eq!(
            calls,
            vec![
                (rect, rect),
                (Rect::new(10, 10, 5, 5), rect),
                (Rect::new(12, 12, 18, 18), rect),
            ]
        );
    }

    #[test]
    fn clips_inside_a_nested_list_end_with_it() {
        let child = Rc::new(DrawOpList::from_iter([
            DrawOp::Clip(ClipOp {
                rect: literal(0, 0, 2, 2),
            }),
            filled(SpecRect::fill()),
        ]));
        let list = DrawOpList::from_iter([
            DrawOp::OpList(OpListOp {
                list: child,
                rect: SpecRect::fill(),
            }),
            filled(SpecRect::fill()),
        ]);
        let calls = rectangles(&run(&list, &DrawInfo::default(), Rect::new(0, 0, 10, 10)));

        let clips: Vec<Rect> = calls.into_iter().map(|(clip, _)| clip).collect();
        assert_eq!(clips, vec![Rect::new(0, 0, 2, 2), Rect::new(0, 0, 10, 10)]);
    }

    #[test]
    fn ops_under_an_empty_clip_are_skipped() {
        let list = DrawOpList::from_iter([
            DrawOp::Clip(ClipOp {
                rect: literal(100, 100, 5, 5),
            }),
            filled(SpecRect::fill()),
        ]);
        assert!(run(&list, &DrawInfo::default(), Rect::new(0, 0, 20, 20)).is_empty());
    }

    #[test]
    fn tiles_cover_the_area_in_columns() {
        let child = Rc::new(DrawOpList::from_iter([filled(SpecRect::fill())]));
        let list = DrawOpList::from_iter([DrawOp::Tile(TileOp {
            list: child,
            rect: SpecRect::fill(),
            tile_xoffset: DrawSpec::literal(0),
            tile_yoffset: DrawSpec::literal(0),
            tile_width: DrawSpec::literal(4),
            tile_height: DrawSpec::literal(5),
        })]);
        let area = Rect::new(0, 0, 10, 10);
        let calls = rectangles(&run(&list, &DrawInfo::default(), area));

        let drawn: Vec<Rect> = calls.iter().map(|(_, rect)| *rect).collect();
        assert_eq!(
            drawn,
            vec![
                Rect::new(0, 0, 4, 5),
                Rect::new(0, 5, 4, 5),
                Rect::new(4, 0, 4, 5),
                Rect::new(4, 5, 4, 5),
                Rect::new(8, 0, 4, 5),
                Rect::new(8, 5, 4, 5),
            ]
        );
        assert!(calls.iter().all(|(clip, _)| *clip == area));
    }

    #[test]
    fn tile_offsets_shift_the_first_tile() {
        let child = Rc::new(DrawOpList::from_iter([filled(SpecRect::fill())]));
        let list = DrawOpList::from_iter([DrawOp::Tile(TileOp {
            list: child,
            rect: SpecRect::fill(),
            tile_xoffset: DrawSpec::literal(2),
            tile_yoffset: DrawSpec::literal(0),
            tile_width: DrawSpec::literal(4),
            tile_height: DrawSpec::literal(10),
        })]);
        let calls = rectangles(&run(&list, &DrawInfo::default(), Rect::new(0, 0, 6, 10)));
        let xs: Vec<i32> = calls.iter().map(|(_, rect)| rect.x).collect();
        assert_eq!(xs, vec![-2, 2]);
    }

    #[test]
    fn nested_lists_draw_into_their_own_rect() {
        let child = Rc::new(DrawOpList::from_iter([filled(SpecRect::fill())]));
        let list = DrawOpList::from_iter([DrawOp::OpList(OpListOp {
            list: child,
            rect: literal(2, 3, 4, 5),
        })]);
        let rect = Rect::new(10, 10, 20, 20);
        let calls = rectangles(&run(&list, &DrawInfo::default(), rect));
        assert_eq!(calls, vec![(rect, Rect::new(12, 13, 4, 5))]);
    }

    #[test]
    fn image_ops_publish_the_object_size() {
        let image = Rc::new(RgbaImage::from_pixel(6, 3, image::Rgba([1, 2, 3, 255])));
        let object_rect = SpecRect::new(
            DrawSpec::literal(0),
            DrawSpec::literal(0),
            DrawSpec::variable(Variable::ObjectWidth),
            DrawSpec::variable(Variable::ObjectHeight),
        );
        let list = DrawOpList::from_iter([
            DrawOp::Image(ImageOp::new(Some(image), object_rect.clone())),
            filled(object_rect),
        ]);
        let calls = run(&list, &DrawInfo::default(), Rect::new(0, 0, 20, 20));

        assert!(matches!(
            &calls[0],
            DrawCall::Image { size: (6, 3), dest, .. } if *dest == Rect::new(0, 0, 6, 3)
        ));
        assert_eq!(rectangles(&calls)[0].1, Rect::new(0, 0, 6, 3));
    }

    #[test]
    fn images_partly_outside_the_clip_keep_their_offset() {
        let image = Rc::new(RgbaImage::from_fn(8, 8, |x, y| {
            image::Rgba([x as u8, y as u8, 0, 255])
        }));
        let list = DrawOpList::from_iter([DrawOp::Image(ImageOp::new(
            Some(image),
            literal(-3, -2, 8, 8),
        ))]);
        let calls = run(&list, &DrawInfo::default(), Rect::new(0, 0, 20, 20));

        assert_eq!(
            calls,
            vec![DrawCall::Image {
                size: (8, 8),
                first_pixel: [3, 2, 0, 255],
                src: (3, 2),
                dest: Rect::new(0, 0, 5, 6),
            }]
        );
    }

    #[test]
    fn icon_prefers_the_mini_icon_when_it_is_large_enough() {
        let mini = RgbaImage::from_pixel(16, 16, image::Rgba([1, 1, 1, 255]));
        let icon = RgbaImage::from_pixel(48, 48, image::Rgba([2, 2, 2, 255]));
        let info = DrawInfo {
            mini_icon: Some(&mini),
            icon: Some(&icon),
            ..DrawInfo::default()
        };
        let icon_op = |size: i32| {
            DrawOp::Icon(IconOp {
                alpha: None,
                rect: literal(0, 0, size, size),
                fill: ImageFillType::Scale,
            })
        };
        let list = DrawOpList::from_iter([icon_op(16), icon_op(20)]);
        let calls = run(&list, &info, Rect::new(0, 0, 64, 64));

        assert!(matches!(
            calls[0],
            DrawCall::Image { size: (16, 16), first_pixel: [1, 1, 1, 255], .. }
        ));
        assert!(matches!(
            calls[1],
            DrawCall::Image { size: (20, 20), first_pixel: [2, 2, 2, 255], .. }
        ));
    }

    #[test]
    fn titles_are_ellipsized_only_when_they_overflow() {
        let title = TitleLayout::monospace("Terminal", 7, 14);
        let info = DrawInfo {
            title: Some(&title),
            ..DrawInfo::default()
        };
        let title_op = |edge: i32| {
            DrawOp::Title(TitleOp {
                color: RED.into(),
                x: DrawSpec::literal(0),
                y: DrawSpec::literal(0),
                ellipsize_width: Some(DrawSpec::literal(edge)),
            })
        };
        let list = DrawOpList::from_iter([title_op(30), title_op(80)]);
        let calls = run(&list, &info, Rect::new(10, 0, 100, 20));

        let widths: Vec<Option<i32>> = calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Title {
                    ellipsize_width, ..
                } => Some(*ellipsize_width),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![Some(30), None]);
        assert!(run(&list, &DrawInfo::default(), Rect::new(10, 0, 100, 20)).is_empty());
    }

    #[test]
    fn title_right_bearing_shrinks_the_available_width() {
        let mut title = TitleLayout::monospace("Terminal", 7, 14);
        title.ink.width += 4;
        let info = DrawInfo {
            title: Some(&title),
            ..DrawInfo::default()
        };
        let list = DrawOpList::from_iter([DrawOp::Title(TitleOp {
            color: RED.into(),
            x: DrawSpec::literal(0),
            y: DrawSpec::literal(0),
            ellipsize_width: Some(DrawSpec::literal(58)),
        })]);
        let calls = run(&list, &info, Rect::new(0, 0, 100, 20));
        assert!(matches!(
            calls[0],
            DrawCall::Title { ellipsize_width: Some(54), .. }
        ));
    }

    #[test]
    fn opaque_tints_become_rectangles() {
        let tint = |alpha: u8| {
            DrawOp::Tint(TintOp {
                color: ColorSpec::from(RED),
                alpha: Some(AlphaGradientSpec::constant(alpha)),
                rect: literal(0, 0, 4, 4),
            })
        };
        let list = DrawOpList::from_iter([tint(0xff), tint(0x80)]);
        let calls = run(&list, &DrawInfo::default(), Rect::new(0, 0, 10, 10));

        assert!(matches!(calls[0], DrawCall::Rectangle { filled: true, .. }));
        assert!(matches!(
            calls[1],
            DrawCall::Image { first_pixel: [0xff, 0, 0, 0x80], .. }
        ));
    }

    #[test]
    fn gradients_render_at_their_rect() {
        let list = DrawOpList::from_iter([DrawOp::Gradient(GradientOp {
            gradient: GradientSpec::new(
                GradientType::Horizontal,
                vec![Color::BLACK.into(), Color::WHITE.into()],
            ),
            alpha: None,
            rect: literal(1, 1, 6, 2),
        })]);
        let calls = run(&list, &DrawInfo::default(), Rect::new(0, 0, 10, 10));
        assert!(matches!(
            calls[0],
            DrawCall::Image { size: (6, 2), first_pixel: [0, 0, 0, 0xff], .. }
        ));
    }

    #[test]
    fn zero_width_lines_without_an_end_are_points() {
        let line = |width: i32, x2: Option<DrawSpec>| {
            DrawOp::Line(LineOp {
                color: RED.into(),
                dash_on_length: 2,
                dash_off_length: 0,
                width,
                x1: DrawSpec::literal(1),
                y1: DrawSpec::literal(2),
                x2,
                y2: None,
            })
        };
        let list = DrawOpList::from_iter([
            line(0, None),
            line(1, None),
            line(0, Some(DrawSpec::literal(5))),
        ]);
        let calls = run(&list, &DrawInfo::default(), Rect::new(10, 10, 20, 20));

        assert!(matches!(calls[0], DrawCall::Point { x: 11, y: 12, .. }));
        assert!(matches!(
            calls[1],
            DrawCall::Line { from: (11, 12), to: (11, 12), stroke: LineStroke { width: 1, dash: None }, .. }
        ));
        assert!(matches!(
            calls[2],
            DrawCall::Line { to: (15, 12), .. }
        ));
    }

    #[test]
    fn frame_geometry_feeds_the_environment() {
        let mut fgeom = FrameGeometry::default();
        fgeom.left_width = 3;
        fgeom.top_height = 20;
        fgeom.width = 100;
        fgeom.height = 60;
        let info = DrawInfo {
            fgeom: Some(&fgeom),
            ..DrawInfo::default()
        };
        let env = fill_env(&info, Rect::new(10, 5, 30, 20));
        assert_eq!(env.left_width, 3);
        assert_eq!(env.top_height, 20);
        assert_eq!(env.frame_x_center, 40);
        assert_eq!(env.frame_y_center, 25);
        assert_eq!(env.object_width, None);
    }
}
