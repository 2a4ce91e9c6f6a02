//! Theme-file color syntax: `gtk:fg[NORMAL]`, `blend/a/b/0.5`, `shade/a/1.2`, `#rrggbb`, names.
use super::{Color, ColorComponent, ColorError, ColorResult, ColorSpec, WidgetState};

const GTK_PREFIX: &str = "gtk:";
const BLEND_PREFIX: &str = "blend/";
const SHADE_PREFIX: &str = "shade/";

/// X11 color names, compared case-insensitively with spaces removed.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("brown", [165, 42, 42]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkred", [139, 0, 0]),
    ("darkslategray", [47, 79, 79]),
    ("dimgray", [105, 105, 105]),
    ("firebrick", [178, 34, 34]),
    ("gold", [255, 215, 0]),
    ("gray", [190, 190, 190]),
    ("green", [0, 255, 0]),
    ("grey", [190, 190, 190]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lightblue", [173, 216, 230]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("lightyellow", [255, 255, 224]),
    ("magenta", [255, 0, 255]),
    ("maroon", [176, 48, 96]),
    ("navy", [0, 0, 128]),
    ("navyblue", [0, 0, 128]),
    ("orange", [255, 165, 0]),
    ("orchid", [218, 112, 214]),
    ("pink", [255, 192, 203]),
    ("purple", [160, 32, 240]),
    ("red", [255, 0, 0]),
    ("royalblue", [65, 105, 225]),
    ("salmon", [250, 128, 114]),
    ("seagreen", [46, 139, 87]),
    ("sienna", [160, 82, 45]),
    ("skyblue", [135, 206, 235]),
    ("slategray", [112, 128, 144]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];

impl ColorSpec {
    pub fn parse(value: &str) -> ColorResult<Self> {
        if value.starts_with(GTK_PREFIX) {
            parse_gtk(value)
        } else if value.starts_with(BLEND_PREFIX) {
            parse_blend(value)
        } else if value.starts_with(SHADE_PREFIX) {
            parse_shade(value)
        } else {
            parse_literal(value).map(ColorSpec::Basic)
        }
    }
}

fn parse_gtk(value: &str) -> ColorResult<ColorSpec> {
    let open = value
        .find('[')
        .ok_or_else(|| ColorError::MissingStateBracket(value.to_string()))?;
    let close = value[open..]
        .find(']')
        .map(|offset| open + offset)
        .ok_or_else(|| ColorError::MissingCloseBracket(value.to_string()))?;

    let state_name = &value[open + 1..close];
    let state = WidgetState::parse(state_name)
        .ok_or_else(|| ColorError::UnknownState(state_name.to_string()))?;

    let component_name = &value[GTK_PREFIX.len()..open];
    let component = ColorComponent::parse(component_name)
        .ok_or_else(|| ColorError::UnknownComponent(component_name.to_string()))?;

    Ok(ColorSpec::palette(component, state))
}

fn parse_blend(value: &str) -> ColorResult<ColorSpec> {
    let parts: Vec<&str> = value.splitn(4, '/').collect();
    let [_, background, foreground, alpha] = parts.as_slice() else {
        return Err(ColorError::BlendFormat(value.to_string()));
    };

    let alpha: f64 = alpha
        .trim()
        .parse()
        .map_err(|_| ColorError::BlendAlphaParse(alpha.to_string()))?;
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ColorError::BlendAlphaRange(alpha.to_string()));
    }

    Ok(ColorSpec::blend(
        ColorSpec::parse(background)?,
        ColorSpec::parse(foreground)?,
        alpha,
    ))
}

fn parse_shade(value: &str) -> ColorResult<ColorSpec> {
    let parts: Vec<&str> = value.splitn(3, '/').collect();
    let [_, base, factor] = parts.as_slice() else {
        return Err(ColorError::ShadeFormat(value.to_string()));
    };

    let factor: f64 = factor
        .trim()
        .parse()
        .map_err(|_| ColorError::ShadeFactorParse(factor.to_string()))?;
    if factor < 0.0 {
        return Err(ColorError::ShadeFactorNegative(factor.to_string()));
    }

    Ok(ColorSpec::shade(ColorSpec::parse(base)?, factor))
}

fn parse_literal(value: &str) -> ColorResult<Color> {
    let parsed = match value.strip_prefix('#') {
        Some(hex) => parse_hex(hex),
        None => lookup_name(value),
    };
    parsed.ok_or_else(|| ColorError::UnknownColor(value.to_string()))
}

/// `#rgb` through `#rrrrggggbbbb`; shorter channels are scaled up by
/// replicating their bits.
fn parse_hex(hex: &str) -> Option<Color> {
    if hex.is_empty() || hex.len() % 3 != 0 || hex.len() > 12 {
        return None;
    }
    if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }

    let digits = hex.len() / 3;
    let channel = |index: usize| -> Option<u16> {
        let text = &hex[index * digits..(index + 1) * digits];
        let mut value = u32::from_str_radix(text, 16).ok()?;
        let mut bits = (digits * 4) as u32;
        value <<= 16 - bits;
        while bits < 16 {
            value |= value >> bits;
            bits *= 2;
        }
        Some(value as u16)
    };

    Some(Color::new(channel(0)?, channel(1)?, channel(2)?))
}

fn lookup_name(name: &str) -> Option<Color> {
    let normalized: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    NAMED_COLORS
        .binary_search_by(|(entry, _)| entry.cmp(&normalized.as_str()))
        .ok()
        .map(|index| {
            let [red, green, blue] = NAMED_COLORS[index].1;
            Color::from_rgb8(red, green, blue)
        })
}
