use crate::geometry::Rect;

/// Variables every coordinate expression may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    Width,
    Height,
    ObjectWidth,
    ObjectHeight,
    LeftWidth,
    RightWidth,
    TopHeight,
    BottomHeight,
    MiniIconWidth,
    MiniIconHeight,
    IconWidth,
    IconHeight,
    TitleWidth,
    TitleHeight,
    FrameXCenter,
    FrameYCenter,
}

impl Variable {
    pub const ALL: [Variable; 16] = [
        Self::Width,
        Self::Height,
        Self::ObjectWidth,
        Self::ObjectHeight,
        Self::LeftWidth,
        Self::RightWidth,
        Self::TopHeight,
        Self::BottomHeight,
        Self::MiniIconWidth,
        Self::MiniIconHeight,
        Self::IconWidth,
        Self::IconHeight,
        Self::TitleWidth,
        Self::TitleHeight,
        Self::FrameXCenter,
        Self::FrameYCenter,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::ObjectWidth => "object_width",
            Self::ObjectHeight => "object_height",
            Self::LeftWidth => "left_width",
            Self::RightWidth => "right_width",
            Self::TopHeight => "top_height",
            Self::BottomHeight => "bottom_height",
            Self::MiniIconWidth => "mini_icon_width",
            Self::MiniIconHeight => "mini_icon_height",
            Self::IconWidth => "icon_width",
            Self::IconHeight => "icon_height",
            Self::TitleWidth => "title_width",
            Self::TitleHeight => "title_height",
            Self::FrameXCenter => "frame_x_center",
            Self::FrameYCenter => "frame_y_center",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variable| variable.name() == name)
    }
}

/// Values the variables take while one draw-op list is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExprEnv {
    pub rect: Rect,
    /// Natural size of the image being drawn; unknown outside image ops.
    pub object_width: Option<i32>,
    pub object_height: Option<i32>,
    pub left_width: i32,
    pub right_width: i32,
    pub top_height: i32,
    pub bottom_height: i32,
    pub mini_icon_width: i32,
    pub mini_icon_height: i32,
    pub icon_width: i32,
    pub icon_height: i32,
    pub title_width: i32,
    pub title_height: i32,
    pub frame_x_center: i32,
    pub frame_y_center: i32,
}

impl ExprEnv {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    pub fn value(&self, variable: Variable) -> Option<i32> {
        let value = match variable {
            Variable::Width => self.rect.width,
            Variable::Height => self.rect.height,
            Variable::ObjectWidth => return self.object_width,
            Variable::ObjectHeight => return self.object_height,
            Variable::LeftWidth => self.left_width,
            Variable::RightWidth => self.right_width,
            Variable::TopHeight => self.top_height,
            Variable::BottomHeight => self.bottom_height,
            Variable::MiniIconWidth => self.mini_icon_width,
            Variable::MiniIconHeight => self.mini_icon_height,
            Variable::IconWidth => self.icon_width,
            Variable::IconHeight => self.icon_height,
            Variable::TitleWidth => self.title_width,
            Variable::TitleHeight => self.title_height,
            Variable::FrameXCenter => self.frame_x_center,
            Variable::FrameYCenter => self.frame_y_center,
        };
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variable_round_trips_through_its_name() {
        for variable in Variable::ALL {
            assert_eq!(Variable::from_name(variable.name()), Some(variable));
        }
        assert_eq!(Variable::from_name("Width"), None);
    }

    #[test]
    fn object_size_is_unknown_until_set() {
        let mut env = ExprEnv::new(Rect::new(0, 0, 30, 20));
        assert_eq!(env.value(Variable::ObjectWidth), None);
        env.object_width = Some(12);
        assert_eq!(env.value(Variable::ObjectWidth), Some(12));
        assert_eq!(env.value(Variable::Width), Some(30));
        assert_eq!(env.value(Variable::Height), Some(20));
    }
}
