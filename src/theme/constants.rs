use std::collections::HashMap;

use super::error::{ThemeError, ThemeResult};

/// Named constants a theme defines for use in expressions and color specs.
#[derive(Debug, Clone, Default)]
pub struct Constants {
    ints: HashMap<String, i32>,
    floats: HashMap<String, f64>,
    colors: HashMap<String, String>,
}

impl Constants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_int(&mut self, name: &str, value: i32) -> ThemeResult<()> {
        define(&mut self.ints, name, value)
    }

    pub fn define_float(&mut self, name: &str, value: f64) -> ThemeResult<()> {
        define(&mut self.floats, name, value)
    }

    /// Defines a color constant; `value` is kept as color-spec text and parsed
    /// where the constant is used.
    pub fn define_color(&mut self, name: &str, value: &str) -> ThemeResult<()> {
        define(&mut self.colors, name, value.to_string())
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        self.ints.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f64> {
        self.floats.get(name).copied()
    }

    pub fn color(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(String::as_str)
    }
}

fn define<T>(table: &mut HashMap<String, T>, name: &str, value: T) -> ThemeResult<()> {
    if !name.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Err(ThemeError::ConstantNotUppercase(name.to_string()));
    }
    if table.contains_key(name) {
        return Err(ThemeError::ConstantRedefined(name.to_string()));
    }

    table.insert(name.to_string(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_must_start_uppercase() {
        let mut constants = Constants::new();
        assert!(matches!(
            constants.define_int("width", 3),
            Err(ThemeError::ConstantNotUppercase(name)) if name == "width"
        ));
        assert!(matches!(
            constants.define_float("", 1.0),
            Err(ThemeError::ConstantNotUppercase(_))
        ));
    }

    #[test]
    fn constants_cannot_be_redefined() {
        let mut constants = Constants::new();
        constants
            .define_int("ButtonWidth", 18)
            .expect("first definition should succeed");
        assert!(matches!(
            constants.define_int("ButtonWidth", 20),
            Err(ThemeError::ConstantRedefined(name)) if name == "ButtonWidth"
        ));
        assert_eq!(constants.int("ButtonWidth"), Some(18));
    }

    #[test]
    fn tables_are_independent() {
        let mut constants = Constants::new();
        constants.define_int("Pad", 2).expect("int should define");
        constants.define_float("Pad", 0.5).expect("float should define");
        constants
            .define_color("Pad", "#ff0000")
            .expect("color should define");
        assert_eq!(constants.int("Pad"), Some(2));
        assert_eq!(constants.float("Pad"), Some(0.5));
        assert_eq!(constants.color("Pad"), Some("#ff0000"));
        assert_eq!(constants.int("Missing"), None);
    }
}
