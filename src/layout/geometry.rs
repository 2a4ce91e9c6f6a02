use serde::Serialize;

use super::buttons::{ButtonFunction, ButtonLayout, ButtonSlot, MAX_BUTTONS_PER_CORNER};
use super::error::{LayoutError, LayoutResult};
use super::{ButtonSizing, FrameLayout};
use crate::geometry::Rect;
use crate::theme::FrameFlags;

/// Background strips between the first and last button of a corner.
pub const MAX_MIDDLE_BACKGROUNDS: usize = MAX_BUTTONS_PER_CORNER - 2;

/// Format version that introduced shade, above and stick buttons.
const EXTENDED_BUTTONS_VERSION: u32 = 2;

const SPACER_FACTOR: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ButtonSpace {
    /// Where the button is painted.
    pub visible: Rect,
    /// Where clicks hit the button; reaches the screen edge when maximized.
    pub clickable: Rect,
}

/// Background rectangle a placed button paints behind itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundSlot {
    LeftLeft,
    LeftMiddle(usize),
    LeftRight,
    RightLeft,
    RightMiddle(usize),
    RightRight,
}

/// Pixel geometry of one frame, recomputed whenever the window changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FrameGeometry {
    pub left_width: i32,
    pub right_width: i32,
    pub top_height: i32,
    pub bottom_height: i32,
    pub width: i32,
    pub height: i32,
    pub title_rect: Rect,
    pub left_titlebar_edge: i32,
    pub right_titlebar_edge: i32,
    pub top_titlebar_edge: i32,
    pub bottom_titlebar_edge: i32,
    buttons: [ButtonSpace; ButtonFunction::COUNT],
    pub left_left_background: Rect,
    pub left_middle_backgrounds: [Rect; MAX_MIDDLE_BACKGROUNDS],
    pub left_right_background: Rect,
    pub right_left_background: Rect,
    pub right_middle_backgrounds: [Rect; MAX_MIDDLE_BACKGROUNDS],
    pub right_right_background: Rect,
    pub top_left_corner_rounded_radius: i32,
    pub top_right_corner_rounded_radius: i32,
    pub bottom_left_corner_rounded_radius: i32,
    pub bottom_right_corner_rounded_radius: i32,
}

impl FrameGeometry {
    pub fn button(&self, function: ButtonFunction) -> &ButtonSpace {
        &self.buttons[function.index()]
    }

    fn button_mut(&mut self, function: ButtonFunction) -> &mut ButtonSpace {
        &mut self.buttons[function.index()]
    }

    pub fn background(&self, slot: BackgroundSlot) -> Rect {
        match slot {
            BackgroundSlot::LeftLeft => self.left_left_background,
            BackgroundSlot::LeftMiddle(i) => self.left_middle_backgrounds[i],
            BackgroundSlot::LeftRight => self.left_right_background,
            BackgroundSlot::RightLeft => self.right_left_background,
            BackgroundSlot::RightMiddle(i) => self.right_middle_backgrounds[i],
            BackgroundSlot::RightRight => self.right_right_background,
        }
    }

    fn background_mut(&mut self, slot: BackgroundSlot) -> &mut Rect {
        match slot {
            BackgroundSlot::LeftLeft => &mut self.left_left_background,
            BackgroundSlot::LeftMiddle(i) => &mut self.left_middle_backgrounds[i],
            BackgroundSlot::LeftRight => &mut self.left_right_background,
            BackgroundSlot::RightLeft => &mut self.right_left_background,
            BackgroundSlot::RightMiddle(i) => &mut self.right_middle_backgrounds[i],
            BackgroundSlot::RightRight => &mut self.right_right_background,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Buttons are stripped in this order until the rest fit; menu goes last.
const STRIP_ORDER: [(ButtonFunction, Side); 14] = [
    (ButtonFunction::Above, Side::Left),
    (ButtonFunction::Above, Side::Right),
    (ButtonFunction::Stick, Side::Left),
    (ButtonFunction::Stick, Side::Right),
    (ButtonFunction::Shade, Side::Left),
    (ButtonFunction::Shade, Side::Right),
    (ButtonFunction::Minimize, Side::Left),
    (ButtonFunction::Minimize, Side::Right),
    (ButtonFunction::Maximize, Side::Left),
    (ButtonFunction::Maximize, Side::Right),
    (ButtonFunction::Close, Side::Left),
    (ButtonFunction::Close, Side::Right),
    (ButtonFunction::Menu, Side::Right),
    (ButtonFunction::Menu, Side::Left),
];

#[derive(Debug, Clone, Copy)]
struct Placement {
    function: ButtonFunction,
    background: BackgroundSlot,
}

/// One titlebar corner while the solver runs.
///
/// Spacer flags stay indexed by the original slot position; stripping a
/// button shifts placements but not flags.
struct Corner {
    placements: Vec<Placement>,
    spacers: [bool; MAX_BUTTONS_PER_CORNER],
    n_spacers: usize,
}

impl Corner {
    fn collect(
        slots: &[ButtonSlot],
        flags: FrameFlags,
        format_version: u32,
        side: Side,
    ) -> Self {
        let mut functions = Vec::new();
        let mut spacers = [false; MAX_BUTTONS_PER_CORNER];
        let mut n_spacers = 0;

        for slot in slots.iter().take(MAX_BUTTONS_PER_CORNER) {
            if !is_applicable(slot.function, flags, format_version) {
                continue;
            }
            spacers[functions.len()] = slot.spacer;
            if slot.spacer {
                n_spacers += 1;
            }
            functions.push(slot.function);
        }

        let count = functions.len();
        let placements = functions
            .into_iter()
            .enumerate()
            .map(|(i, function)| Placement {
                function,
                background: background_slot(side, i, count),
            })
            .collect();

        Self {
            placements,
            spacers,
            n_spacers,
        }
    }

    fn len(&self) -> usize {
        self.placements.len()
    }

    fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Width the corner takes with `button_width`-wide buttons.
    fn space_used(&self, used: i32, button_width: i32, layout: &FrameLayout) -> i32 {
        let n = self.len() as i32;
        let mut used = used + button_width * n;
        used = (f64::from(used) + f64::from(button_width) * SPACER_FACTOR * self.n_spacers as f64)
            as i32;
        used += layout.button_border.left * n;
        used + layout.button_border.right * n
    }

    fn clear_spacer(&mut self) -> bool {
        if self.n_spacers == 0 {
            return false;
        }
        self.n_spacers -= 1;
        self.spacers[self.n_spacers] = false;
        true
    }

    fn strip(&mut self, function: ButtonFunction) -> bool {
        match self
            .placements
            .iter()
            .position(|placement| placement.function == function)
        {
            Some(index) => {
                self.placements.remove(index);
                true
            }
            None => false,
        }
    }
}

fn background_slot(side: Side, i: usize, count: usize) -> BackgroundSlot {
    match side {
        Side::Left if i == 0 => BackgroundSlot::LeftLeft,
        Side::Left if i == count - 1 => BackgroundSlot::LeftRight,
        Side::Left => BackgroundSlot::LeftMiddle(i - 1),
        Side::Right if i == count - 1 => BackgroundSlot::RightRight,
        Side::Right if i == 0 => BackgroundSlot::RightLeft,
        Side::Right => BackgroundSlot::RightMiddle(i - 1),
    }
}

/// Whether a button with `function` is shown for a frame in state `flags`.
fn is_applicable(function: ButtonFunction, flags: FrameFlags, format_version: u32) -> bool {
    if function.is_extended() {
        if format_version < EXTENDED_BUTTONS_VERSION {
            return false;
        }
        let shaded = flags.contains(FrameFlags::SHADED);
        let shadeable = flags.contains(FrameFlags::ALLOWS_SHADE);
        return match function {
            ButtonFunction::Shade => shadeable && !shaded,
            ButtonFunction::Unshade => shadeable && shaded,
            ButtonFunction::Above => !flags.contains(FrameFlags::ABOVE),
            ButtonFunction::Unabove => flags.contains(FrameFlags::ABOVE),
            ButtonFunction::Stick => !flags.contains(FrameFlags::STUCK),
            ButtonFunction::Unstick => flags.contains(FrameFlags::STUCK),
            _ => false,
        };
    }

    let required = match function {
        ButtonFunction::Menu => FrameFlags::ALLOWS_MENU,
        ButtonFunction::Minimize => FrameFlags::ALLOWS_MINIMIZE,
        ButtonFunction::Maximize => FrameFlags::ALLOWS_MAXIMIZE,
        _ => FrameFlags::ALLOWS_DELETE,
    };
    flags.contains(required)
}

impl FrameLayout {
    /// Lays out borders, buttons and the title for a client of the given size.
    ///
    /// Buttons that do not fit between the titlebar edges are removed: spacers
    /// first, then buttons in a fixed order that keeps the window menu longest.
    pub fn calc_geometry(
        &self,
        text_height: i32,
        flags: FrameFlags,
        client_width: i32,
        client_height: i32,
        button_layout: &ButtonLayout,
        format_version: u32,
    ) -> LayoutResult<FrameGeometry> {
        let borders = self.borders(text_height, flags);
        let width = client_width + borders.left + borders.right;
        let client_height = if flags.contains(FrameFlags::SHADED) {
            0
        } else {
            client_height
        };

        let mut fgeom = FrameGeometry {
            left_width: borders.left,
            right_width: borders.right,
            top_height: borders.top,
            bottom_height: borders.bottom,
            width,
            height: client_height + borders.top + borders.bottom,
            top_titlebar_edge: self.title_border.top,
            bottom_titlebar_edge: self.title_border.bottom,
            left_titlebar_edge: self.left_titlebar_edge,
            right_titlebar_edge: self.right_titlebar_edge,
            ..FrameGeometry::default()
        };

        let (button_width, button_height) = match self.button_sizing {
            ButtonSizing::Aspect(aspect) => {
                let height = fgeom.top_height - self.button_border.vertical();
                ((f64::from(height) / aspect) as i32, height)
            }
            ButtonSizing::Fixed => (self.button_width, self.button_height),
            ButtonSizing::Unset => return Err(LayoutError::MissingButtonSize),
        };

        let (mut left, mut right) = if self.hide_buttons {
            (
                Corner::collect(&[], flags, format_version, Side::Left),
                Corner::collect(&[], flags, format_version, Side::Right),
            )
        } else {
            (
                Corner::collect(&button_layout.left, flags, format_version, Side::Left),
                Corner::collect(&button_layout.right, flags, format_version, Side::Right),
            )
        };

        let space_available = fgeom.width - self.left_titlebar_edge - self.right_titlebar_edge;
        while !left.is_empty() || !right.is_empty() {
            let used = left.space_used(0, button_width, self);
            let used = right.space_used(used, button_width, self);
            if used <= space_available {
                break;
            }

            if left.clear_spacer() || right.clear_spacer() {
                tracing::debug!(used, space_available, "dropped a titlebar spacer");
                continue;
            }

            let stripped = STRIP_ORDER.iter().copied().find(|(function, side)| match side {
                Side::Left => left.strip(*function),
                Side::Right => right.strip(*function),
            });
            match stripped {
                Some((function, side)) => {
                    tracing::debug!(%function, ?side, used, space_available, "stripped titlebar button");
                }
                None => {
                    return Err(LayoutError::StripFailure {
                        left: left.len(),
                        right: right.len(),
                    })
                }
            }
        }

        let button_y = (fgeom.top_height - (button_height + self.button_border.vertical())) / 2
            + self.button_border.top;
        let maximized = flags.contains(FrameFlags::MAXIMIZED);
        let spacer_width = f64::from(button_width) * SPACER_FACTOR;

        let mut x = width - self.right_titlebar_edge;
        let n_right = right.len();
        for (i, placement) in right.placements.iter().enumerate().rev() {
            if x < 0 {
                break;
            }

            let mut visible_x = x - self.button_border.right - button_width;
            if right.spacers[i] {
                visible_x = (f64::from(visible_x) - spacer_width) as i32;
            }
            let visible = Rect::new(visible_x, button_y, button_width, button_height);

            let clickable = if maximized {
                let mut clickable = Rect::new(visible.x, 0, visible.width, button_height + button_y);
                if i == n_right - 1 {
                    clickable.width +=
                        self.right_titlebar_edge + self.right_width + self.button_border.right;
                }
                clickable
            } else {
                visible
            };

            *fgeom.button_mut(placement.function) = ButtonSpace { visible, clickable };
            *fgeom.background_mut(placement.background) = visible;
            x = visible.x - self.button_border.left;
        }

        let title_right_edge = x - self.title_border.right;

        x = self.left_titlebar_edge;
        for (i, placement) in left.placements.iter().enumerate() {
            let visible = Rect::new(
                x + self.button_border.left,
                button_y,
                button_width,
                button_height,
            );

            let clickable = match (maximized, i) {
                (false, _) => visible,
                (true, 0) => Rect::new(0, 0, button_width + x, button_height + button_y),
                (true, _) => Rect::new(visible.x, 0, button_width, button_height + button_y),
            };

            *fgeom.button_mut(placement.function) = ButtonSpace { visible, clickable };
            *fgeom.background_mut(placement.background) = visible;

            x = visible.right() + self.button_border.right;
            if left.spacers[i] {
                x = (f64::from(x) + spacer_width) as i32;
            }
        }

        let title_x = x + self.title_border.left;
        fgeom.title_rect = Rect::new(
            title_x,
            self.title_border.top,
            title_right_edge - title_x,
            fgeom.top_height - self.title_border.vertical(),
        );
        if fgeom.title_rect.width < 0 || fgeom.title_rect.height < 0 {
            fgeom.title_rect.width = 0;
            fgeom.title_rect.height = 0;
        }

        let min_size_for_rounding = if flags.contains(FrameFlags::SHADED) {
            0
        } else {
            5
        };
        let rounded = |edge_sum: i32, radius: i32| {
            if edge_sum >= min_size_for_rounding {
                radius
            } else {
                0
            }
        };
        fgeom.top_left_corner_rounded_radius = rounded(
            fgeom.top_height + fgeom.left_width,
            self.top_left_corner_rounded_radius,
        );
        fgeom.top_right_corner_rounded_radius = rounded(
            fgeom.top_height + fgeom.right_width,
            self.top_right_corner_rounded_radius,
        );
        fgeom.bottom_left_corner_rounded_radius = rounded(
            fgeom.bottom_height + fgeom.left_width,
            self.bottom_left_corner_rounded_radius,
        );
        fgeom.bottom_right_corner_rounded_radius = rounded(
            fgeom.bottom_height + fgeom.right_width,
            self.bottom_right_corner_rounded_radius,
        );

        Ok(fgeom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Border;
    use crate::layout::tests::fixed_layout;

    const ALL_ALLOWED: FrameFlags = FrameFlags::NORMAL_WINDOW;

    fn solve(layout: &FrameLayout, buttons: &str, flags: FrameFlags, width: i32) -> FrameGeometry {
        layout
            .calc_geometry(12, flags, width, 100, &ButtonLayout::parse(buttons), 2)
            .expect("geometry should solve")
    }

    fn is_placed(fgeom: &FrameGeometry, function: ButtonFunction) -> bool {
        !fgeom.button(function).visible.is_empty()
    }

    /// Fixed 20px buttons, no button borders, 6px titlebar edges.
    fn plain_layout() -> FrameLayout {
        FrameLayout {
            button_border: Border::new(0, 0, 0, 0),
            ..fixed_layout()
        }
    }

    #[test]
    fn frame_size_adds_borders() {
        let fgeom = solve(&fixed_layout(), ":close", ALL_ALLOWED, 200);
        assert_eq!(fgeom.width, 208);
        assert_eq!(fgeom.height, 100 + 20 + 4);
        assert_eq!(fgeom.left_titlebar_edge, 6);
        assert_eq!(fgeom.top_titlebar_edge, 3);
    }

    #[test]
    fn right_buttons_pack_against_the_titlebar_edge() {
        let layout = plain_layout();
        let fgeom = solve(&layout, ":minimize,maximize,close", ALL_ALLOWED, 200);
        let right_edge = fgeom.width - layout.right_titlebar_edge;

        let close = fgeom.button(ButtonFunction::Close).visible;
        let maximize = fgeom.button(ButtonFunction::Maximize).visible;
        let minimize = fgeom.button(ButtonFunction::Minimize).visible;
        assert_eq!(close.right(), right_edge);
        assert_eq!(maximize.right(), close.x);
        assert_eq!(minimize.right(), maximize.x);
        for rect in [close, maximize, minimize] {
            assert_eq!(rect.width, 20);
            assert_eq!(rect.height, 18);
        }

        let title = fgeom.title_rect;
        assert_eq!(title.x, layout.left_titlebar_edge + layout.title_border.left);
        assert_eq!(title.right(), minimize.x - layout.title_border.right);
        assert_eq!(
            title.width,
            fgeom.width - 3 * 20 - layout.left_titlebar_edge - layout.right_titlebar_edge
                - layout.title_border.horizontal()
        );
    }

    #[test]
    fn buttons_are_centered_vertically() {
        let fgeom = solve(&fixed_layout(), ":close", ALL_ALLOWED, 200);
        // top 20, button 18 + 1 + 1 => offset 0 plus the top button border
        assert_eq!(fgeom.button(ButtonFunction::Close).visible.y, 1);
        let tall = solve(&fixed_layout(), ":close", ALL_ALLOWED, 200);
        let tall = tall.button(ButtonFunction::Close).visible;
        let taller = fixed_layout()
            .calc_geometry(20, ALL_ALLOWED, 200, 100, &ButtonLayout::parse(":close"), 2)
            .expect("geometry should solve");
        // top 28 => (28 - 20) / 2 + 1
        assert_eq!(taller.button(ButtonFunction::Close).visible.y, 5);
        assert_eq!(taller.button(ButtonFunction::Close).visible.height, tall.height);
    }

    #[test]
    fn left_buttons_pack_from_the_left_edge_with_spacers() {
        let layout = plain_layout();
        let fgeom = solve(&layout, "menu,spacer,shade:", ALL_ALLOWED, 200);
        let menu = fgeom.button(ButtonFunction::Menu).visible;
        let shade = fgeom.button(ButtonFunction::Shade).visible;
        assert_eq!(menu.x, 6);
        assert_eq!(shade.x, menu.right() + 15);
        assert_eq!(fgeom.title_rect.x, shade.right() + layout.title_border.left);
    }

    #[test]
    fn backgrounds_follow_button_positions() {
        let fgeom = solve(&plain_layout(), "menu,stick,above:minimize,maximize,close", ALL_ALLOWED, 300);
        assert_eq!(fgeom.left_left_background, fgeom.button(ButtonFunction::Menu).visible);
        assert_eq!(fgeom.left_middle_backgrounds[0], fgeom.button(ButtonFunction::Stick).visible);
        assert_eq!(fgeom.left_right_background, fgeom.button(ButtonFunction::Above).visible);
        assert_eq!(fgeom.right_left_background, fgeom.button(ButtonFunction::Minimize).visible);
        assert_eq!(fgeom.right_middle_backgrounds[0], fgeom.button(ButtonFunction::Maximize).visible);
        assert_eq!(fgeom.right_right_background, fgeom.button(ButtonFunction::Close).visible);
    }

    #[test]
    fn single_buttons_use_the_outer_background() {
        let fgeom = solve(&plain_layout(), "menu:close", ALL_ALLOWED, 200);
        assert_eq!(fgeom.left_left_background, fgeom.button(ButtonFunction::Menu).visible);
        assert_eq!(fgeom.right_right_background, fgeom.button(ButtonFunction::Close).visible);
        assert!(fgeom.left_right_background.is_empty());
        assert!(fgeom.right_left_background.is_empty());
    }

    #[test]
    fn disallowed_functions_are_not_placed() {
        let flags = ALL_ALLOWED.difference(FrameFlags::ALLOWS_MAXIMIZE);
        let fgeom = solve(&plain_layout(), ":minimize,maximize,close", flags, 200);
        assert!(!is_placed(&fgeom, ButtonFunction::Maximize));
        assert_eq!(
            fgeom.button(ButtonFunction::Minimize).visible.right(),
            fgeom.button(ButtonFunction::Close).visible.x
        );
    }

    #[test]
    fn toggle_buttons_follow_frame_state() {
        let shaded = ALL_ALLOWED | FrameFlags::SHADED | FrameFlags::ABOVE | FrameFlags::STUCK;
        let fgeom = solve(&plain_layout(), ":shade,unshade,above,unabove,stick,unstick", shaded, 300);
        assert!(is_placed(&fgeom, ButtonFunction::Unshade));
        assert!(is_placed(&fgeom, ButtonFunction::Unabove));
        assert!(is_placed(&fgeom, ButtonFunction::Unstick));
        assert!(!is_placed(&fgeom, ButtonFunction::Shade));
        assert!(!is_placed(&fgeom, ButtonFunction::Above));
        assert!(!is_placed(&fgeom, ButtonFunction::Stick));
    }

    #[test]
    fn version_one_themes_hide_the_toggle_family() {
        let fgeom = plain_layout()
            .calc_geometry(12, ALL_ALLOWED, 300, 100, &ButtonLayout::parse(":shade,above,close"), 1)
            .expect("geometry should solve");
        assert!(!is_placed(&fgeom, ButtonFunction::Shade));
        assert!(!is_placed(&fgeom, ButtonFunction::Above));
        assert!(is_placed(&fgeom, ButtonFunction::Close));
    }

    #[test]
    fn hidden_buttons_leave_the_whole_titlebar_to_the_title() {
        let layout = FrameLayout {
            hide_buttons: true,
            ..plain_layout()
        };
        let fgeom = solve(&layout, "menu:close", ALL_ALLOWED, 200);
        assert!(!is_placed(&fgeom, ButtonFunction::Menu));
        assert!(!is_placed(&fgeom, ButtonFunction::Close));
        assert_eq!(fgeom.title_rect.x, 6 + 2);
        assert_eq!(fgeom.title_rect.right(), fgeom.width - 6 - 2);
    }

    #[test]
    fn spacers_are_dropped_before_buttons() {
        // available = 74 + 8 - 12 = 70; three buttons use 60, spacers add 15 each
        let fgeom = solve(&plain_layout(), "menu,spacer:minimize,spacer,close", ALL_ALLOWED, 74);
        assert!(is_placed(&fgeom, ButtonFunction::Menu));
        assert!(is_placed(&fgeom, ButtonFunction::Minimize));
        assert!(is_placed(&fgeom, ButtonFunction::Close));
        let minimize = fgeom.button(ButtonFunction::Minimize).visible;
        let close = fgeom.button(ButtonFunction::Close).visible;
        assert_eq!(minimize.right(), close.x);
    }

    #[test]
    fn buttons_are_stripped_in_priority_order() {
        let layout = plain_layout();
        let buttons = "menu:above,stick,shade,minimize,maximize,close";
        // available = width + 8 - 12; each button needs 20
        let fgeom = solve(&layout, buttons, ALL_ALLOWED, 104);
        // room for 5 of 7
        assert!(!is_placed(&fgeom, ButtonFunction::Above));
        assert!(!is_placed(&fgeom, ButtonFunction::Stick));
        assert!(is_placed(&fgeom, ButtonFunction::Shade));

        let fgeom = solve(&layout, buttons, ALL_ALLOWED, 44);
        // room for 2: close and menu survive
        assert!(is_placed(&fgeom, ButtonFunction::Close));
        assert!(is_placed(&fgeom, ButtonFunction::Menu));
        assert!(!is_placed(&fgeom, ButtonFunction::Maximize));

        let fgeom = solve(&layout, buttons, ALL_ALLOWED, 24);
        // room for 1: close goes before menu
        assert!(!is_placed(&fgeom, ButtonFunction::Close));
        assert!(is_placed(&fgeom, ButtonFunction::Menu));
    }

    #[test]
    fn stripping_everything_leaves_no_buttons() {
        let fgeom = solve(&plain_layout(), "menu:close", ALL_ALLOWED, 10);
        assert!(!is_placed(&fgeom, ButtonFunction::Menu));
        assert!(!is_placed(&fgeom, ButtonFunction::Close));
    }

    #[test]
    fn unstrippable_buttons_fail() {
        let flags = ALL_ALLOWED | FrameFlags::ABOVE;
        let result = plain_layout().calc_geometry(
            12,
            flags,
            10,
            100,
            &ButtonLayout::parse(":unabove"),
            2,
        );
        assert_eq!(result, Err(LayoutError::StripFailure { left: 0, right: 1 }));
    }

    #[test]
    fn maximized_buttons_reach_the_screen_edges() {
        let layout = plain_layout();
        let flags = ALL_ALLOWED | FrameFlags::MAXIMIZED;
        let fgeom = solve(&layout, "menu,shade:minimize,close", flags, 200);

        let close = fgeom.button(ButtonFunction::Close);
        assert_eq!(close.clickable.y, 0);
        assert_eq!(close.clickable.x, close.visible.x);
        assert_eq!(close.clickable.height, close.visible.height + close.visible.y);
        assert_eq!(
            close.clickable.width,
            20 + layout.right_titlebar_edge + layout.right_width
        );

        let minimize = fgeom.button(ButtonFunction::Minimize);
        assert_eq!(minimize.clickable.width, 20);

        let menu = fgeom.button(ButtonFunction::Menu);
        assert_eq!(menu.clickable.x, 0);
        assert_eq!(menu.clickable.width, 20 + layout.left_titlebar_edge);

        let shade = fgeom.button(ButtonFunction::Shade);
        assert_eq!(shade.clickable.x, shade.visible.x);
        assert_eq!(shade.clickable.y, 0);
    }

    #[test]
    fn unmaximized_clickable_matches_visible() {
        let fgeom = solve(&plain_layout(), "menu:close", ALL_ALLOWED, 200);
        for function in [ButtonFunction::Menu, ButtonFunction::Close] {
            let space = fgeom.button(function);
            assert_eq!(space.clickable, space.visible);
        }
    }

    #[test]
    fn title_is_zeroed_when_it_cannot_fit() {
        let layout = FrameLayout {
            title_border: Border::new(30, 30, 3, 3),
            ..plain_layout()
        };
        let fgeom = solve(&layout, "", ALL_ALLOWED, 20);
        assert_eq!(fgeom.title_rect.width, 0);
        assert_eq!(fgeom.title_rect.height, 0);
    }

    #[test]
    fn aspect_sizing_derives_width_from_height() {
        let layout = FrameLayout {
            button_sizing: ButtonSizing::Aspect(0.75),
            ..fixed_layout()
        };
        let fgeom = solve(&layout, ":close", ALL_ALLOWED, 200);
        let close = fgeom.button(ButtonFunction::Close).visible;
        // top 20 - 2 border => height 18, width 18 / 0.75
        assert_eq!(close.height, 18);
        assert_eq!(close.width, 24);
    }

    #[test]
    fn thin_frames_lose_rounded_corners() {
        let layout = FrameLayout {
            bottom_height: 0,
            left_width: 2,
            right_width: 2,
            top_left_corner_rounded_radius: 4,
            bottom_left_corner_rounded_radius: 4,
            bottom_right_corner_rounded_radius: 4,
            ..plain_layout()
        };
        let fgeom = solve(&layout, "", ALL_ALLOWED, 200);
        assert_eq!(fgeom.top_left_corner_rounded_radius, 4);
        assert_eq!(fgeom.bottom_left_corner_rounded_radius, 0);

        let shaded = solve(&layout, "", ALL_ALLOWED | FrameFlags::SHADED, 200);
        assert_eq!(shaded.bottom_right_corner_rounded_radius, 4);
    }

    #[test]
    fn shaded_frames_drop_the_client_height() {
        let fgeom = solve(&fixed_layout(), "", ALL_ALLOWED | FrameFlags::SHADED, 200);
        assert_eq!(fgeom.height, fgeom.top_height);
        assert_eq!(fgeom.bottom_height, 0);
    }
}
