//! Channel math behind blended and shaded colors.
use super::Color;

/// Mixes `fg` over `bg` with 16-bit quantised alpha, rounding at the
/// fixed-point multiply.
pub fn blend(bg: Color, fg: Color, alpha: f64) -> Color {
    let alpha = i64::from((alpha * 65535.0) as u16);
    let mix = |bg: u16, fg: u16| -> u16 {
        let bg = i64::from(bg);
        let fg = i64::from(fg);
        (bg + (((fg - bg) * alpha + 0x8000) >> 16)) as u16
    };

    Color::new(
        mix(bg.red, fg.red),
        mix(bg.green, fg.green),
        mix(bg.blue, fg.blue),
    )
}

/// Scales lightness and saturation by `factor`, clamping both to `[0, 1]`.
pub fn shade(color: Color, factor: f64) -> Color {
    let (hue, lightness, saturation) = rgb_to_hls(
        f64::from(color.red) / 65535.0,
        f64::from(color.green) / 65535.0,
        f64::from(color.blue) / 65535.0,
    );
    let lightness = (lightness * factor).clamp(0.0, 1.0);
    let saturation = (saturation * factor).clamp(0.0, 1.0);
    let (red, green, blue) = hls_to_rgb(hue, lightness, saturation);

    Color::new(
        (red * 65535.0) as u16,
        (green * 65535.0) as u16,
        (blue * 65535.0) as u16,
    )
}

/// Channel-wise mean, used for the derived palette entries.
pub fn average(a: Color, b: Color) -> Color {
    let mean = |a: u16, b: u16| ((u32::from(a) + u32::from(b)) / 2) as u16;
    Color::new(
        mean(a.red, b.red),
        mean(a.green, b.green),
        mean(a.blue, b.blue),
    )
}

/// Hue in degrees, lightness and saturation in `[0, 1]`.
fn rgb_to_hls(red: f64, green: f64, blue: f64) -> (f64, f64, f64) {
    let (max, min) = if red > green {
        (red.max(blue), green.min(blue))
    } else {
        (green.max(blue), red.min(blue))
    };

    let lightness = (max + min) / 2.0;
    if max == min {
        return (0.0, lightness, 0.0);
    }

    let delta = max - min;
    let saturation = if lightness <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let mut hue = if red == max {
        (green - blue) / delta
    } else if green == max {
        2.0 + (blue - red) / delta
    } else {
        4.0 + (red - green) / delta
    };
    hue *= 60.0;
    if hue < 0.0 {
        hue += 360.0;
    }

    (hue, lightness, saturation)
}

fn hls_to_rgb(hue: f64, lightness: f64, saturation: f64) -> (f64, f64, f64) {
    if saturation == 0.0 {
        return (lightness, lightness, lightness);
    }

    let m2 = if lightness <= 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let m1 = 2.0 * lightness - m2;

    (
        hue_channel(m1, m2, hue + 120.0),
        hue_channel(m1, m2, hue),
        hue_channel(m1, m2, hue - 120.0),
    )
}

fn hue_channel(m1: f64, m2: f64, mut hue: f64) -> f64 {
    while hue > 360.0 {
        hue -= 360.0;
    }
    while hue < 0.0 {
        hue += 360.0;
    }

    if hue < 60.0 {
        m1 + (m2 - m1) * hue / 60.0
    } else if hue < 180.0 {
        m2
    } else if hue < 240.0 {
        m1 + (m2 - m1) * (240.0 - hue) / 60.0
    } else {
        m1
    }
}
