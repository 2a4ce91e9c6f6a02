use super::{average, shade, Color, ColorComponent, WidgetState};

const LIGHTNESS_MULT: f64 = 1.3;
const DARKNESS_MULT: f64 = 0.7;

/// Widget colors, one per component and state, as a style engine exposes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: [[Color; WidgetState::COUNT]; ColorComponent::COUNT],
}

impl Palette {
    /// Builds a palette from the four primary tables and derives `light`,
    /// `dark`, `mid` and `text_aa` from them.
    pub fn from_primaries(
        fg: [Color; WidgetState::COUNT],
        bg: [Color; WidgetState::COUNT],
        text: [Color; WidgetState::COUNT],
        base: [Color; WidgetState::COUNT],
    ) -> Self {
        let mut palette = Self {
            colors: [[Color::BLACK; WidgetState::COUNT]; ColorComponent::COUNT],
        };

        for state in WidgetState::ALL {
            let i = state.index();
            let light = shade(bg[i], LIGHTNESS_MULT);
            let dark = shade(bg[i], DARKNESS_MULT);
            palette.set(ColorComponent::Fg, state, fg[i]);
            palette.set(ColorComponent::Bg, state, bg[i]);
            palette.set(ColorComponent::Text, state, text[i]);
            palette.set(ColorComponent::Base, state, base[i]);
            palette.set(ColorComponent::Light, state, light);
            palette.set(ColorComponent::Dark, state, dark);
            palette.set(ColorComponent::Mid, state, average(light, dark));
            palette.set(ColorComponent::TextAa, state, average(text[i], base[i]));
        }

        palette
    }

    pub fn get(&self, component: ColorComponent, state: WidgetState) -> Color {
        self.colors[component.index()][state.index()]
    }

    pub fn set(&mut self, component: ColorComponent, state: WidgetState, color: Color) {
        self.colors[component.index()][state.index()] = color;
    }
}

impl Default for Palette {
    /// Classic GTK 2 defaults, in `WidgetState` order.
    fn default() -> Self {
        let black = Color::BLACK;
        let white = Color::WHITE;
        let dimmed = Color::from_rgb8(0x75, 0x75, 0x75);
        let window = Color::from_rgb8(0xdc, 0xda, 0xd5);
        let selected = Color::from_rgb8(0x4b, 0x69, 0x83);

        let fg = [black, black, black, white, dimmed];
        let bg = [
            window,
            Color::from_rgb8(0xc4, 0xc2, 0xbd),
            Color::from_rgb8(0xee, 0xeb, 0xe7),
            selected,
            window,
        ];
        let text = [black, black, black, white, dimmed];
        let base = [
            white,
            Color::from_rgb8(0x94, 0xa1, 0xad),
            white,
            selected,
            window,
        ];

        Self::from_primaries(fg, bg, text, base)
    }
}
