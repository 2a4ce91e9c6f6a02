//! Image preparation shared by the image, icon and tint ops.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::op::ImageFillType;
use crate::color::{AlphaGradientSpec, Color};

/// Maps the image's luminance onto a black, `color`, white ramp. Alpha is
/// preserved.
pub fn colorize(source: &RgbaImage, color: Color) -> RgbaImage {
    let mut target = source.clone();
    let channels = [color.red, color.green, color.blue].map(f64::from);

    for pixel in target.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let intensity =
            (f64::from(r) * 0.30 + f64::from(g) * 0.59 + f64::from(b) * 0.11) / 255.0;

        for (channel, value) in pixel.0.iter_mut().take(3).zip(channels) {
            let scaled = if intensity <= 0.5 {
                value * intensity * 2.0
            } else {
                value + (65535.0 - value) * (intensity - 0.5) * 2.0
            };
            *channel = (255.0 * scaled / 65535.0).clamp(0.0, 255.0) as u8;
        }
    }

    target
}

/// Repeats `source` across a `width` x `height` image.
pub fn tile(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut target = RgbaImage::new(width, height);
    let (tile_width, tile_height) = source.dimensions();

    for y in (0..height).step_by(tile_height as usize) {
        for x in (0..width).step_by(tile_width as usize) {
            let w = tile_width.min(width - x);
            let h = tile_height.min(height - y);
            let piece = imageops::crop_imm(source, 0, 0, w, h);
            imageops::replace(&mut target, &piece.to_image(), i64::from(x), i64::from(y));
        }
    }

    target
}

/// Every row becomes the first pixel of that row, stretched to `width`.
pub fn replicate_cols(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, y| {
        source
            .get_pixel_checked(0, y)
            .copied()
            .unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

/// Every row becomes a copy of the first row.
pub fn replicate_rows(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        source
            .get_pixel_checked(x, 0)
            .copied()
            .unwrap_or(Rgba([0, 0, 0, 0]))
    })
}

pub fn apply_alpha<'a>(
    image: Cow<'a, RgbaImage>,
    alpha: Option<&AlphaGradientSpec>,
) -> Cow<'a, RgbaImage> {
    match alpha {
        Some(spec) if spec.needs_alpha() => {
            let mut owned = image.into_owned();
            spec.apply(&mut owned);
            Cow::Owned(owned)
        }
        _ => image,
    }
}

/// Stretch options for [`scale_and_alpha`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleOptions<'a> {
    pub alpha: Option<&'a AlphaGradientSpec>,
    pub fill: ImageFillType,
    pub vertical_stripes: bool,
    pub horizontal_stripes: bool,
}

/// Brings `source` to `width` x `height`, by tiling or scaling, then applies
/// the alpha gradient. Returns `None` for degenerate sizes.
pub fn scale_and_alpha<'a>(
    source: &'a RgbaImage,
    options: ScaleOptions<'_>,
    width: i32,
    height: i32,
) -> Option<Cow<'a, RgbaImage>> {
    let (width, height) = (u32::try_from(width).ok()?, u32::try_from(height).ok()?);
    if width == 0 || height == 0 || source.width() == 0 || source.height() == 0 {
        return None;
    }

    let sized = if source.dimensions() == (width, height) {
        Cow::Borrowed(source)
    } else if options.fill == ImageFillType::Tile {
        Cow::Owned(tile(source, width, height))
    } else {
        Cow::Owned(scale(source, &options, width, height))
    };

    Some(apply_alpha(sized, options.alpha))
}

fn scale(source: &RgbaImage, options: &ScaleOptions<'_>, width: u32, height: u32) -> RgbaImage {
    let (dest_width, dest_height) = if options.horizontal_stripes {
        (source.width(), height)
    } else if options.vertical_stripes {
        (width, source.height())
    } else {
        (width, height)
    };

    let resized = if source.dimensions() == (dest_width, dest_height) {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(imageops::resize(
            source,
            dest_width,
            dest_height,
            FilterType::Triangle,
        ))
    };

    if options.horizontal_stripes {
        replicate_cols(&resized, width, height)
    } else if options.vertical_stripes {
        replicate_rows(&resized, width, height)
    } else {
        resized.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::GradientType;

    fn gradient_strip() -> RgbaImage {
        RgbaImage::from_fn(2, 2, |x, y| Rgba([x as u8 * 100, y as u8 * 100, 7, 255]))
    }

    #[test]
    fn colorize_maps_gray_levels_through_the_color() {
        let source = RgbaImage::from_fn(3, 1, |x, _| match x {
            0 => Rgba([0, 0, 0, 10]),
            1 => Rgba([128, 128, 128, 20]),
            _ => Rgba([255, 255, 255, 30]),
        });
        let colored = colorize(&source, Color::from_rgb8(200, 100, 0));

        assert_eq!(colored.get_pixel(0, 0).0, [0, 0, 0, 10]);
        let mid = colored.get_pixel(1, 0).0;
        assert!((i32::from(mid[0]) - 200).abs() <= 1, "{mid:?}");
        assert!((i32::from(mid[1]) - 100).abs() <= 1, "{mid:?}");
        assert_eq!(mid[3], 20);
        let white = colored.get_pixel(2, 0).0;
        assert!(white[..3].iter().all(|channel| *channel >= 254), "{white:?}");
        assert_eq!(white[3], 30);
    }

    #[test]
    fn tiling_repeats_and_crops_the_source() {
        let tiled = tile(&gradient_strip(), 5, 3);
        assert_eq!(tiled.dimensions(), (5, 3));
        assert_eq!(tiled.get_pixel(2, 0), gradient_strip().get_pixel(0, 0));
        assert_eq!(tiled.get_pixel(3, 2), gradient_strip().get_pixel(1, 0));
        assert_eq!(tiled.get_pixel(4, 1), gradient_strip().get_pixel(0, 1));
    }

    #[test]
    fn same_size_without_alpha_borrows_the_source() {
        let source = gradient_strip();
        let result = scale_and_alpha(&source, ScaleOptions::default(), 2, 2)
            .expect("matching size should produce an image");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn degenerate_sizes_produce_nothing() {
        let source = gradient_strip();
        assert!(scale_and_alpha(&source, ScaleOptions::default(), 0, 4).is_none());
        assert!(scale_and_alpha(&source, ScaleOptions::default(), 4, -1).is_none());
    }

    #[test]
    fn horizontal_stripes_replicate_the_first_column() {
        let source = gradient_strip();
        let options = ScaleOptions {
            horizontal_stripes: true,
            ..ScaleOptions::default()
        };
        let result = scale_and_alpha(&source, options, 6, 2).expect("stripes should scale");

        assert_eq!(result.dimensions(), (6, 2));
        for x in 0..6 {
            assert_eq!(result.get_pixel(x, 0), source.get_pixel(0, 0));
            assert_eq!(result.get_pixel(x, 1), source.get_pixel(0, 1));
        }
    }

    #[test]
    fn vertical_stripes_replicate_the_first_row() {
        let source = gradient_strip();
        let options = ScaleOptions {
            vertical_stripes: true,
            ..ScaleOptions::default()
        };
        let result = scale_and_alpha(&source, options, 2, 5).expect("stripes should scale");

        assert_eq!(result.dimensions(), (2, 5));
        for y in 0..5 {
            assert_eq!(result.get_pixel(1, y), source.get_pixel(1, 0));
        }
    }

    #[test]
    fn alpha_is_applied_after_sizing() {
        let source = gradient_strip();
        let alpha = AlphaGradientSpec::constant(0x80);
        let options = ScaleOptions {
            alpha: Some(&alpha),
            fill: ImageFillType::Tile,
            ..ScaleOptions::default()
        };
        let result = scale_and_alpha(&source, options, 4, 4).expect("tiling should succeed");
        assert_eq!(result.get_pixel(3, 3).0[3], 0x80);

        let opaque = AlphaGradientSpec::new(GradientType::Horizontal, vec![0xff])
            .expect("single alpha should build");
        let untouched = apply_alpha(Cow::Borrowed(&source), Some(&opaque));
        assert!(matches!(untouched, Cow::Borrowed(_)));
    }
}
