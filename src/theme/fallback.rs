use std::path::PathBuf;
use std::rc::Rc;

use super::{FrameType, Theme, ThemeResult};
use crate::color::{AlphaGradientSpec, GradientSpec, GradientType, WidgetState};
use crate::draw::{
    ArcOp, ArrowOp, ArrowType, BoxOp, DrawOp, DrawOpList, GradientOp, LineOp, OpListOp,
    RectangleOp, ShadowType, SpecRect, TintOp, TitleOp,
};
use crate::geometry::Border;
use crate::layout::{ButtonSizing, FrameLayout};
use crate::style::{
    ButtonState, ButtonType, FrameFocus, FramePiece, FrameResize, FrameState, FrameStyle,
    FrameStyleSet,
};

const FORMAT_VERSION: u32 = 2;

/// Far edges of a button glyph.
const RIGHT: &str = "width - ButtonInset - 1";
const BOTTOM: &str = "height - ButtonInset - 1";

fn titled_layout() -> FrameLayout {
    FrameLayout {
        left_width: 2,
        right_width: 2,
        bottom_height: 2,
        title_border: Border::new(4, 4, 2, 2),
        title_vertical_pad: 2,
        left_titlebar_edge: 2,
        right_titlebar_edge: 2,
        button_sizing: ButtonSizing::Fixed,
        button_width: 18,
        button_height: 18,
        button_border: Border::new(1, 1, 1, 1),
        top_left_corner_rounded_radius: 3,
        top_right_corner_rounded_radius: 3,
        ..FrameLayout::default()
    }
}

fn border_layout() -> FrameLayout {
    FrameLayout {
        left_width: 1,
        right_width: 1,
        bottom_height: 1,
        title_border: Border::new(0, 0, 0, 0),
        title_vertical_pad: 1,
        left_titlebar_edge: 0,
        right_titlebar_edge: 0,
        button_sizing: ButtonSizing::Fixed,
        button_width: 0,
        button_height: 0,
        button_border: Border::new(0, 0, 0, 0),
        has_title: false,
        hide_buttons: true,
        ..FrameLayout::default()
    }
}

impl Theme {
    /// A small, complete theme built in code, used when no theme is loaded.
    pub fn fallback() -> ThemeResult<Theme> {
        let mut theme = Theme::new("fallback", PathBuf::new(), FORMAT_VERSION);
        theme.readable_name = Some("Fallback".to_string());
        theme.author = Some("frametheme".to_string());
        theme.copyright = Some("Public domain".to_string());
        theme.date = Some("2024".to_string());
        theme.description = Some("Plain frames drawn with palette colors".to_string());

        theme.define_int_constant("ButtonInset", 4)?;
        theme.define_color_constant(
            "Highlight",
            "blend/gtk:bg[NORMAL]/gtk:bg[SELECTED]/0.4",
        )?;

        let titled = Rc::new(titled_layout());
        let border = Rc::new(border_layout());
        theme.insert_layout("titled", Rc::clone(&titled));
        theme.insert_layout("border", Rc::clone(&border));

        let lists = Lists::build(&theme)?;
        for (name, list) in lists.named() {
            theme.insert_draw_op_list(name, Rc::clone(list));
        }

        let mut focused = FrameStyle::new(Rc::clone(&titled), None);
        focused.set_piece(FramePiece::EntireBackground, Rc::clone(&lists.background));
        focused.set_piece(FramePiece::Titlebar, Rc::clone(&lists.titlebar_focused));
        focused.set_piece(FramePiece::Title, Rc::clone(&lists.title_focused));
        focused.set_piece(FramePiece::Overlay, Rc::clone(&lists.outline));
        for button in ButtonType::ALL.into_iter().filter(|b| !b.is_background()) {
            let glyph = lists.glyph(button);
            focused.set_button(
                button,
                ButtonState::Normal,
                Rc::new(button_list(&lists.button_up, glyph)),
            );
            focused.set_button(
                button,
                ButtonState::Pressed,
                Rc::new(button_list(&lists.button_down, glyph)),
            );
        }
        let focused = Rc::new(focused);

        let mut unfocused = FrameStyle::new(Rc::clone(&titled), Some(Rc::clone(&focused)));
        unfocused.set_piece(FramePiece::Titlebar, Rc::clone(&lists.titlebar_unfocused));
        unfocused.set_piece(FramePiece::Title, Rc::clone(&lists.title_unfocused));
        let unfocused = Rc::new(unfocused);

        let mut bordered = FrameStyle::new(border, Some(Rc::clone(&focused)));
        bordered.set_piece(FramePiece::Titlebar, Rc::new(DrawOpList::new()));
        bordered.set_piece(FramePiece::Title, Rc::new(DrawOpList::new()));
        let bordered = Rc::new(bordered);

        theme.insert_style("focused", Rc::clone(&focused));
        theme.insert_style("unfocused", Rc::clone(&unfocused));
        theme.insert_style("border", Rc::clone(&bordered));

        let mut titled_set = FrameStyleSet::new(None);
        let mut border_set = FrameStyleSet::new(None);
        for state in FrameState::ALL {
            titled_set.set_style(state, FrameResize::Both, FrameFocus::Yes, Rc::clone(&focused));
            titled_set.set_style(state, FrameResize::Both, FrameFocus::No, Rc::clone(&unfocused));
            for focus in FrameFocus::ALL {
                border_set.set_style(state, FrameResize::Both, focus, Rc::clone(&bordered));
            }
        }
        let titled_set = Rc::new(titled_set);
        let border_set = Rc::new(border_set);
        theme.insert_style_set("titled", Rc::clone(&titled_set));
        theme.insert_style_set("border", Rc::clone(&border_set));

        for frame_type in FrameType::ALL {
            let set = if frame_type == FrameType::Border {
                &border_set
            } else {
                &titled_set
            };
            theme.set_style_set_for_type(frame_type, Rc::clone(set));
        }

        Ok(theme)
    }
}

/// Shared draw-op lists of the fallback theme.
struct Lists {
    background: Rc<DrawOpList>,
    titlebar_focused: Rc<DrawOpList>,
    titlebar_unfocused: Rc<DrawOpList>,
    title_focused: Rc<DrawOpList>,
    title_unfocused: Rc<DrawOpList>,
    outline: Rc<DrawOpList>,
    button_up: Rc<DrawOpList>,
    button_down: Rc<DrawOpList>,
    close: Rc<DrawOpList>,
    maximize: Rc<DrawOpList>,
    minimize: Rc<DrawOpList>,
    menu: Rc<DrawOpList>,
    arrow_up: Rc<DrawOpList>,
    arrow_down: Rc<DrawOpList>,
    pin: Rc<DrawOpList>,
    pin_outline: Rc<DrawOpList>,
}

impl Lists {
    fn build(theme: &Theme) -> ThemeResult<Self> {
        let list = |ops: Vec<DrawOp>| Rc::new(DrawOpList::from_iter(ops));
        let inset = || {
            rect(
                theme,
                [
                    "ButtonInset",
                    "ButtonInset",
                    "width - ButtonInset * 2",
                    "height - ButtonInset * 2",
                ],
            )
        };
        let fg = theme.color_spec("gtk:fg[NORMAL]")?;

        Ok(Self {
            background: list(vec![DrawOp::Rectangle(RectangleOp {
                color: theme.color_spec("gtk:bg[NORMAL]")?,
                filled: true,
                rect: SpecRect::fill(),
            })]),
            titlebar_focused: list(titlebar(theme, "SELECTED")?),
            titlebar_unfocused: list(titlebar(theme, "NORMAL")?),
            title_focused: list(vec![title(theme, "gtk:fg[SELECTED]")?]),
            title_unfocused: list(vec![title(theme, "gtk:fg[NORMAL]")?]),
            outline: list(vec![DrawOp::Rectangle(RectangleOp {
                color: theme.color_spec("gtk:dark[NORMAL]")?,
                filled: false,
                rect: rect(theme, ["0", "0", "width - 1", "height - 1"])?,
            })]),
            button_up: list(vec![DrawOp::ThemeBox(BoxOp {
                state: WidgetState::Normal,
                shadow: ShadowType::Out,
                rect: SpecRect::fill(),
            })]),
            button_down: list(vec![DrawOp::ThemeBox(BoxOp {
                state: WidgetState::Active,
                shadow: ShadowType::In,
                rect: SpecRect::fill(),
            })]),
            close: list(vec![
                line(theme, ["ButtonInset", "ButtonInset", RIGHT, BOTTOM])?,
                line(theme, ["ButtonInset", BOTTOM, RIGHT, "ButtonInset"])?,
            ]),
            maximize: list(vec![DrawOp::Rectangle(RectangleOp {
                color: fg.clone(),
                filled: false,
                rect: inset()?,
            })]),
            minimize: list(vec![line(theme, ["ButtonInset", BOTTOM, RIGHT, BOTTOM])?]),
            menu: list(vec![arrow(ArrowType::Down, inset()?)]),
            arrow_up: list(vec![arrow(ArrowType::Up, inset()?)]),
            arrow_down: list(vec![
                arrow(ArrowType::Down, inset()?),
                line(theme, ["ButtonInset", "ButtonInset", RIGHT, "ButtonInset"])?,
            ]),
            pin: list(vec![DrawOp::Arc(ArcOp {
                color: fg.clone(),
                filled: true,
                rect: inset()?,
                start_angle: 0.0,
                extent_angle: 1.0,
            })]),
            pin_outline: list(vec![DrawOp::Arc(ArcOp {
                color: fg,
                filled: false,
                rect: inset()?,
                start_angle: 0.0,
                extent_angle: 1.0,
            })]),
        })
    }

    fn named(&self) -> [(&'static str, &Rc<DrawOpList>); 16] {
        [
            ("background", &self.background),
            ("titlebar_focused", &self.titlebar_focused),
            ("titlebar_unfocused", &self.titlebar_unfocused),
            ("title_focused", &self.title_focused),
            ("title_unfocused", &self.title_unfocused),
            ("outline", &self.outline),
            ("button_up", &self.button_up),
            ("button_down", &self.button_down),
            ("close", &self.close),
            ("maximize", &self.maximize),
            ("minimize", &self.minimize),
            ("menu", &self.menu),
            ("arrow_up", &self.arrow_up),
            ("arrow_down", &self.arrow_down),
            ("pin", &self.pin),
            ("pin_outline", &self.pin_outline),
        ]
    }

    fn glyph(&self, button: ButtonType) -> &Rc<DrawOpList> {
        match button {
            ButtonType::Close => &self.close,
            ButtonType::Maximize => &self.maximize,
            ButtonType::Minimize => &self.minimize,
            ButtonType::Shade | ButtonType::Above => &self.arrow_up,
            ButtonType::Unshade | ButtonType::Unabove => &self.arrow_down,
            ButtonType::Stick => &self.pin_outline,
            ButtonType::Unstick => &self.pin,
            _ => &self.menu,
        }
    }
}

fn button_list(frame: &Rc<DrawOpList>, glyph: &Rc<DrawOpList>) -> DrawOpList {
    [frame, glyph]
        .into_iter()
        .map(|list| {
            DrawOp::OpList(OpListOp {
                list: Rc::clone(list),
                rect: SpecRect::fill(),
            })
        })
        .collect()
}

fn rect(theme: &Theme, [x, y, width, height]: [&str; 4]) -> ThemeResult<SpecRect> {
    Ok(SpecRect::new(
        theme.draw_spec(x)?,
        theme.draw_spec(y)?,
        theme.draw_spec(width)?,
        theme.draw_spec(height)?,
    ))
}

fn line(theme: &Theme, [x1, y1, x2, y2]: [&str; 4]) -> ThemeResult<DrawOp> {
    Ok(DrawOp::Line(LineOp {
        color: theme.color_spec("gtk:fg[NORMAL]")?,
        dash_on_length: 0,
        dash_off_length: 0,
        width: 2,
        x1: theme.draw_spec(x1)?,
        y1: theme.draw_spec(y1)?,
        x2: Some(theme.draw_spec(x2)?),
        y2: Some(theme.draw_spec(y2)?),
    }))
}

fn arrow(arrow: ArrowType, rect: SpecRect) -> DrawOp {
    DrawOp::ThemeArrow(ArrowOp {
        state: WidgetState::Normal,
        shadow: ShadowType::None,
        arrow,
        filled: true,
        rect,
    })
}

fn titlebar(theme: &Theme, state: &str) -> ThemeResult<Vec<DrawOp>> {
    let top = theme.color_spec(&format!("gtk:bg[{state}]"))?;
    let bottom = theme.color_spec(&format!("shade/gtk:bg[{state}]/0.85"))?;
    Ok(vec![
        DrawOp::Gradient(GradientOp {
            gradient: GradientSpec::new(GradientType::Vertical, vec![top, bottom]),
            alpha: None,
            rect: SpecRect::fill(),
        }),
        DrawOp::Tint(TintOp {
            color: theme.color_spec("Highlight")?,
            alpha: Some(AlphaGradientSpec::constant(48)),
            rect: rect(theme, ["0", "0", "width", "1"])?,
        }),
    ])
}

fn title(theme: &Theme, color: &str) -> ThemeResult<DrawOp> {
    Ok(DrawOp::Title(TitleOp {
        color: theme.color_spec(color)?,
        x: theme.draw_spec("(width - title_width) / 2 `max` 0")?,
        y: theme.draw_spec("(height - title_height) / 2 `max` 0")?,
        ellipsize_width: Some(theme.draw_spec("width")?),
    }))
}
