use image::RgbaImage;

use super::{Color, ColorError, ColorResult, ColorSpec, Palette};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GradientType {
    #[default]
    Vertical,
    Horizontal,
    Diagonal,
}

impl GradientType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Diagonal => "diagonal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Self::Vertical, Self::Horizontal, Self::Diagonal]
            .into_iter()
            .find(|kind| kind.as_str() == value)
    }

    fn line_len(self, width: u32, height: u32) -> usize {
        match self {
            Self::Vertical => height as usize,
            Self::Horizontal => width as usize,
            Self::Diagonal => (2 * width).saturating_sub(1) as usize,
        }
    }

    /// Index into the gradient line for pixel `(x, y)`.
    ///
    /// A diagonal line is twice the image width; each row reads a window of
    /// it shifted right in proportion to the row's height.
    fn line_index(self, x: u32, y: u32, width: u32, height: u32) -> usize {
        match self {
            Self::Vertical => y as usize,
            Self::Horizontal => x as usize,
            Self::Diagonal => {
                let shift = if height > 1 {
                    u64::from(y) * u64::from(width - 1) / u64::from(height - 1)
                } else {
                    0
                };
                x as usize + shift as usize
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub kind: GradientType,
    pub colors: Vec<ColorSpec>,
}

impl GradientSpec {
    pub fn new(kind: GradientType, colors: Vec<ColorSpec>) -> Self {
        Self { kind, colors }
    }

    pub fn validate(&self) -> ColorResult<()> {
        if self.colors.len() < 2 {
            return Err(ColorError::TooFewGradientColors);
        }
        Ok(())
    }

    /// Opaque gradient of `width` x `height` with the stops spread evenly
    /// along the gradient axis.
    pub fn render(&self, palette: &Palette, width: i32, height: i32) -> Option<RgbaImage> {
        if width <= 0 || height <= 0 || self.colors.is_empty() {
            return None;
        }
        let (width, height) = (width as u32, height as u32);

        let stops: Vec<[u8; 3]> = self
            .colors
            .iter()
            .map(|spec| spec.resolve(palette).to_rgb8())
            .collect();
        let line = ramp(&stops, self.kind.line_len(width, height));

        Some(RgbaImage::from_fn(width, height, |x, y| {
            let [red, green, blue] = line[self.kind.line_index(x, y, width, height)];
            image::Rgba([red, green, blue, 0xff])
        }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaGradientSpec {
    pub kind: GradientType,
    alphas: Vec<u8>,
}

impl AlphaGradientSpec {
    pub fn new(kind: GradientType, alphas: Vec<u8>) -> ColorResult<Self> {
        if alphas.is_empty() {
            return Err(ColorError::EmptyAlphaGradient);
        }
        Ok(Self { kind, alphas })
    }

    pub fn constant(alpha: u8) -> Self {
        Self {
            kind: GradientType::Horizontal,
            alphas: vec![alpha],
        }
    }

    pub fn alphas(&self) -> &[u8] {
        &self.alphas
    }

    pub fn needs_alpha(&self) -> bool {
        self.alphas.len() > 1 || self.alphas[0] != 0xff
    }

    /// Multiplies the image's alpha channel by this ramp.
    pub fn apply(&self, image: &mut RgbaImage) {
        let (width, height) = image.dimensions();

        if let [alpha] = self.alphas.as_slice() {
            let alpha = *alpha;
            for pixel in image.pixels_mut() {
                pixel[3] = multiply_alpha(pixel[3], alpha);
            }
            return;
        }

        let stops: Vec<[u8; 1]> = self.alphas.iter().map(|alpha| [*alpha]).collect();
        let line = ramp(&stops, self.kind.line_len(width, height));
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let [alpha] = line[self.kind.line_index(x, y, width, height)];
            pixel[3] = multiply_alpha(pixel[3], alpha);
        }
    }
}

fn multiply_alpha(value: u8, alpha: u8) -> u8 {
    (u32::from(value) * u32::from(alpha) / 255) as u8
}

/// Piecewise-linear ramp of `len` samples through `stops`.
///
/// Each segment spans `len / (stops - 1)` samples and stops short of its end
/// stop; the tail left over by the integer division takes the last stop.
fn ramp<const N: usize>(stops: &[[u8; N]], len: usize) -> Vec<[u8; N]> {
    let mut line = Vec::with_capacity(len);
    let Some(last) = stops.last() else {
        return line;
    };

    if stops.len() > 1 {
        let segment = len / (stops.len() - 1);
        for pair in stops.windows(2) {
            for step in 0..segment {
                let mut sample = [0_u8; N];
                for (channel, value) in sample.iter_mut().enumerate() {
                    let from = i64::from(pair[0][channel]);
                    let to = i64::from(pair[1][channel]);
                    *value = (from + (to - from) * step as i64 / segment as i64) as u8;
                }
                line.push(sample);
            }
        }
    }

    line.resize(len, *last);
    line
}

impl From<Color> for GradientSpec {
    fn from(color: Color) -> Self {
        Self::new(GradientType::Vertical, vec![color.into(), color.into()])
    }
}
