//! Theme registry: metadata, constants, named layouts, draw-op lists, styles
//! and style sets, plus style selection and frame drawing.

mod constants;
mod error;
mod fallback;
mod flags;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::rc::Rc;

use image::RgbaImage;
use tracing::debug;

use crate::color::{ColorSpec, Palette};
use crate::draw::{DrawBackend, DrawOpList, DrawSpec};
use crate::geometry::Border;
use crate::layout::{ButtonLayout, FrameGeometry, FrameLayout};
use crate::style::{FrameFocus, FrameRender, FrameResize, FrameState, FrameStyle, FrameStyleSet};

pub use constants::Constants;
pub use error::{ThemeError, ThemeResult};
pub use flags::{FrameFlags, FrameType};

const ICON_THEME_PREFIX: &str = "theme:";

/// Capabilities gated on the theme's format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeFeature {
    ShadeStickAboveButtons,
    UbiquitousConstants,
    VariedRoundCorners,
    ImagesFromIconThemes,
    UnresizableShadedStyles,
    DegreesInArcs,
    HiddenButtons,
    ColorConstants,
    FrameBackgrounds,
}

impl ThemeFeature {
    pub const ALL: [ThemeFeature; 9] = [
        Self::ShadeStickAboveButtons,
        Self::UbiquitousConstants,
        Self::VariedRoundCorners,
        Self::ImagesFromIconThemes,
        Self::UnresizableShadedStyles,
        Self::DegreesInArcs,
        Self::HiddenButtons,
        Self::ColorConstants,
        Self::FrameBackgrounds,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShadeStickAboveButtons => "shade_stick_above_buttons",
            Self::UbiquitousConstants => "ubiquitous_constants",
            Self::VariedRoundCorners => "varied_round_corners",
            Self::ImagesFromIconThemes => "images_from_icon_themes",
            Self::UnresizableShadedStyles => "unresizable_shaded_styles",
            Self::DegreesInArcs => "degrees_in_arcs",
            Self::HiddenButtons => "hidden_buttons",
            Self::ColorConstants => "color_constants",
            Self::FrameBackgrounds => "frame_backgrounds",
        }
    }

    /// First format version supporting the feature.
    pub const fn earliest_version(self) -> u32 {
        2
    }
}

/// Source of named icons for `theme:` image references.
pub trait IconLookup {
    fn load_icon(&self, name: &str, size: u32) -> Option<RgbaImage>;
}

/// Window being framed, as passed to geometry and drawing.
#[derive(Debug, Clone, Copy)]
pub struct FrameRequest<'a> {
    pub flags: FrameFlags,
    pub client_width: i32,
    pub client_height: i32,
    pub text_height: i32,
    pub button_layout: &'a ButtonLayout,
}

#[derive(Debug, Default)]
pub struct Theme {
    /// Directory-derived identifier.
    pub name: String,
    pub dirname: PathBuf,
    pub format_version: u32,
    pub readable_name: Option<String>,
    pub author: Option<String>,
    pub copyright: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    constants: Constants,
    images: RefCell<HashMap<String, Rc<RgbaImage>>>,
    layouts: BTreeMap<String, Rc<FrameLayout>>,
    draw_op_lists: BTreeMap<String, Rc<DrawOpList>>,
    styles: BTreeMap<String, Rc<FrameStyle>>,
    style_sets: BTreeMap<String, Rc<FrameStyleSet>>,
    style_sets_by_type: [Option<Rc<FrameStyleSet>>; FrameType::COUNT],
}

impl Theme {
    pub fn new(name: &str, dirname: impl Into<PathBuf>, format_version: u32) -> Self {
        Self {
            name: name.to_string(),
            dirname: dirname.into(),
            format_version,
            ..Self::default()
        }
    }

    pub fn allows(&self, feature: ThemeFeature) -> bool {
        self.format_version >= feature.earliest_version()
    }

    pub fn constants(&self) -> &Constants {
        &self.constants
    }

    pub fn define_int_constant(&mut self, name: &str, value: i32) -> ThemeResult<()> {
        self.constants.define_int(name, value)
    }

    pub fn define_float_constant(&mut self, name: &str, value: f64) -> ThemeResult<()> {
        self.constants.define_float(name, value)
    }

    /// Defines a named color; `value` must itself be a valid color spec.
    pub fn define_color_constant(&mut self, name: &str, value: &str) -> ThemeResult<()> {
        ColorSpec::parse(value)?;
        self.constants.define_color(name, value)
    }

    /// Parses a draw-op expression against this theme's constants.
    pub fn draw_spec(&self, expr: &str) -> ThemeResult<DrawSpec> {
        Ok(DrawSpec::new(expr, &self.constants)?)
    }

    /// Parses a color spec, resolving the whole string as a color constant
    /// first when the format allows it.
    pub fn color_spec(&self, value: &str) -> ThemeResult<ColorSpec> {
        let text = match self.constants.color(value) {
            Some(referent) if self.allows(ThemeFeature::ColorConstants) => referent,
            _ => value,
        };
        Ok(ColorSpec::parse(text)?)
    }

    /// Converts a compass angle in degrees to turns from twelve o'clock.
    /// Formats without degree support already give turns.
    pub fn arc_angle(&self, value: f64) -> f64 {
        if self.allows(ThemeFeature::DegreesInArcs) {
            (180.0 - value) / 360.0
        } else {
            value
        }
    }

    /// `(start, extent)` of an arc running from `from` to `to`.
    pub fn arc_span(&self, from: f64, to: f64) -> (f64, f64) {
        let start = self.arc_angle(from);
        (start, self.arc_angle(to) - start)
    }

    /// Registers `layout` under `name`, returning the entry it replaces.
    pub fn insert_layout(
        &mut self,
        name: &str,
        layout: Rc<FrameLayout>,
    ) -> Option<Rc<FrameLayout>> {
        self.layouts.insert(name.to_string(), layout)
    }

    pub fn lookup_layout(&self, name: &str) -> Option<&Rc<FrameLayout>> {
        self.layouts.get(name)
    }

    pub fn insert_draw_op_list(
        &mut self,
        name: &str,
        list: Rc<DrawOpList>,
    ) -> Option<Rc<DrawOpList>> {
        self.draw_op_lists.insert(name.to_string(), list)
    }

    pub fn lookup_draw_op_list(&self, name: &str) -> Option<&Rc<DrawOpList>> {
        self.draw_op_lists.get(name)
    }

    pub fn insert_style(
        &mut self,
        name: &str,
        style: Rc<FrameStyle>,
    ) -> Option<Rc<FrameStyle>> {
        self.styles.insert(name.to_string(), style)
    }

    pub fn lookup_style(&self, name: &str) -> Option<&Rc<FrameStyle>> {
        self.styles.get(name)
    }

    pub fn insert_style_set(
        &mut self,
        name: &str,
        set: Rc<FrameStyleSet>,
    ) -> Option<Rc<FrameStyleSet>> {
        self.style_sets.insert(name.to_string(), set)
    }

    pub fn lookup_style_set(&self, name: &str) -> Option<&Rc<FrameStyleSet>> {
        self.style_sets.get(name)
    }

    pub fn set_style_set_for_type(&mut self, frame_type: FrameType, set: Rc<FrameStyleSet>) {
        self.style_sets_by_type[frame_type.index()] = Some(set);
    }

    pub fn style_set_for_type(&self, frame_type: FrameType) -> Option<&Rc<FrameStyleSet>> {
        self.style_sets_by_type[frame_type.index()].as_ref()
    }

    /// Checks metadata, then that every window type has a style set, then
    /// every registered layout, style and style set.
    pub fn validate(&self) -> ThemeResult<()> {
        let metadata = [
            ("name", &self.readable_name),
            ("author", &self.author),
            ("date", &self.date),
            ("description", &self.description),
            ("copyright", &self.copyright),
        ];
        for (field, value) in metadata {
            if value.is_none() {
                return Err(ThemeError::MissingMetadata {
                    field,
                    theme: self.name.clone(),
                });
            }
        }

        for frame_type in FrameType::ALL {
            if self.style_set_for_type(frame_type).is_none() {
                return Err(ThemeError::MissingStyleSet {
                    frame_type: frame_type.as_str(),
                    theme: self.name.clone(),
                });
            }
        }

        for layout in self.layouts.values() {
            layout.validate()?;
        }
        for style in self.styles.values() {
            style.validate(self.format_version)?;
        }
        for set in self.style_sets.values().chain(self.style_sets_by_type.iter().flatten()) {
            set.validate()?;
        }
        Ok(())
    }

    /// Loads `filename` relative to the theme directory, or from the icon
    /// theme for `theme:` names. Results are cached by filename.
    pub fn load_image(
        &self,
        filename: &str,
        icon_size: u32,
        icons: Option<&dyn IconLookup>,
    ) -> ThemeResult<Rc<RgbaImage>> {
        if let Some(image) = self.images.borrow().get(filename) {
            return Ok(Rc::clone(image));
        }

        let image = match filename.strip_prefix(ICON_THEME_PREFIX) {
            Some(icon) if self.allows(ThemeFeature::ImagesFromIconThemes) => icons
                .and_then(|icons| icons.load_icon(icon, icon_size))
                .ok_or_else(|| ThemeError::IconNotFound(icon.to_string()))?,
            _ => {
                let path = self.dirname.join(filename);
                image::open(&path)
                    .map_err(|source| ThemeError::LoadImage { path, source })?
                    .into_rgba8()
            }
        };

        let image = Rc::new(image);
        self.images
            .borrow_mut()
            .insert(filename.to_string(), Rc::clone(&image));
        Ok(image)
    }

    /// The style for a window, using the normal window type's set when the
    /// type has none.
    pub fn get_frame_style(
        &self,
        frame_type: FrameType,
        flags: FrameFlags,
    ) -> Option<&Rc<FrameStyle>> {
        let set = self.style_set_for_type(frame_type).or_else(|| {
            debug!(
                frame_type = frame_type.as_str(),
                "no style set for window type, using normal"
            );
            self.style_set_for_type(FrameType::Normal)
        })?;

        let (state, resize, focus) = style_key(flags);
        set.get_style(state, resize, focus)
    }

    pub fn title_scale(&self, frame_type: FrameType, flags: FrameFlags) -> f64 {
        self.get_frame_style(frame_type, flags)
            .map_or(1.0, |style| style.layout().title_scale)
    }

    pub fn frame_borders(&self, frame_type: FrameType, text_height: i32, flags: FrameFlags) -> Border {
        self.get_frame_style(frame_type, flags)
            .map_or(Border::new(0, 0, 0, 0), |style| {
                style.layout().borders(text_height, flags)
            })
    }

    pub fn calc_geometry(
        &self,
        frame_type: FrameType,
        request: &FrameRequest<'_>,
    ) -> ThemeResult<FrameGeometry> {
        let style = self
            .get_frame_style(frame_type, request.flags)
            .ok_or(ThemeError::NoFrameStyle(frame_type.as_str()))?;
        self.style_geometry(style, request)
    }

    pub fn draw_frame(
        &self,
        frame_type: FrameType,
        request: &FrameRequest<'_>,
        render: &FrameRender<'_>,
        palette: &Palette,
        backend: &mut dyn DrawBackend,
    ) -> ThemeResult<FrameGeometry> {
        let style = self
            .get_frame_style(frame_type, request.flags)
            .ok_or(ThemeError::NoFrameStyle(frame_type.as_str()))?;
        let fgeom = self.style_geometry(style, request)?;
        style.draw(&fgeom, render, palette, backend);
        Ok(fgeom)
    }

    /// Draws a frame with the registered style `name`, for previewing.
    pub fn draw_frame_by_name(
        &self,
        name: &str,
        request: &FrameRequest<'_>,
        render: &FrameRender<'_>,
        palette: &Palette,
        backend: &mut dyn DrawBackend,
    ) -> ThemeResult<FrameGeometry> {
        let style = self
            .lookup_style(name)
            .ok_or_else(|| ThemeError::UnknownStyle(name.to_string()))?;
        let fgeom = self.style_geometry(style, request)?;
        style.draw(&fgeom, render, palette, backend);
        Ok(fgeom)
    }

    fn style_geometry(
        &self,
        style: &FrameStyle,
        request: &FrameRequest<'_>,
    ) -> ThemeResult<FrameGeometry> {
        Ok(style.layout().calc_geometry(
            request.text_height,
            request.flags,
            request.client_width,
            request.client_height,
            request.button_layout,
            self.format_version,
        )?)
    }
}

fn style_key(flags: FrameFlags) -> (FrameState, FrameResize, FrameFocus) {
    let state = match (
        flags.contains(FrameFlags::MAXIMIZED),
        flags.contains(FrameFlags::SHADED),
    ) {
        (false, false) => FrameState::Normal,
        (true, false) => FrameState::Maximized,
        (false, true) => FrameState::Shaded,
        (true, true) => FrameState::MaximizedAndShaded,
    };

    let resize = match (
        flags.contains(FrameFlags::ALLOWS_VERTICAL_RESIZE),
        flags.contains(FrameFlags::ALLOWS_HORIZONTAL_RESIZE),
    ) {
        (false, false) => FrameResize::None,
        (true, false) => FrameResize::Vertical,
        (false, true) => FrameResize::Horizontal,
        (true, true) => FrameResize::Both,
    };

    let focused = flags.contains(FrameFlags::HAS_FOCUS) != flags.contains(FrameFlags::IS_FLASHING);
    let focus = if focused { FrameFocus::Yes } else { FrameFocus::No };

    (state, resize, focus)
}
