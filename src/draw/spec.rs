use crate::expr::{evaluate, tokenize, ExprEnv, ExprResult, Token, Variable};
use crate::theme::Constants;

/// A numeric draw-op parameter: an expression plus its folded value when it
/// does not depend on the render environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSpec {
    tokens: Vec<Token>,
    constant: Option<i32>,
}

impl DrawSpec {
    /// Tokenizes `expr` and substitutes the theme's integer and float
    /// constants. Specs left without variables are evaluated once here.
    pub fn new(expr: &str, constants: &Constants) -> ExprResult<Self> {
        let mut tokens = tokenize(expr)?;
        let mut has_variables = false;

        for token in &mut tokens {
            let Token::Variable(variable) = token else {
                continue;
            };
            if let Some(value) = constants.int(&variable.name) {
                *token = Token::Int(i64::from(value));
            } else if let Some(value) = constants.float(&variable.name) {
                *token = Token::Double(value);
            } else {
                has_variables = true;
            }
        }

        let constant = if has_variables {
            None
        } else {
            Some(evaluate(&tokens, None)?.to_pixels())
        };

        Ok(Self { tokens, constant })
    }

    /// A spec that always evaluates to `value`.
    pub fn literal(value: i32) -> Self {
        Self {
            tokens: vec![Token::Int(i64::from(value))],
            constant: Some(value),
        }
    }

    /// A spec that reads one built-in variable.
    pub fn variable(variable: Variable) -> Self {
        Self {
            tokens: vec![Token::variable(variable.name())],
            constant: None,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.constant.is_some()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn value(&self, env: &ExprEnv) -> ExprResult<i32> {
        match self.constant {
            Some(value) => Ok(value),
            None => evaluate(&self.tokens, Some(env)).map(|value| value.to_pixels()),
        }
    }

    /// Absolute x coordinate: the expression is relative to the env rect.
    pub fn position_x(&self, env: &ExprEnv) -> ExprResult<i32> {
        self.value(env).map(|value| env.rect.x + value)
    }

    pub fn position_y(&self, env: &ExprEnv) -> ExprResult<i32> {
        self.value(env).map(|value| env.rect.y + value)
    }

    /// Sizes are never smaller than one pixel.
    pub fn size(&self, env: &ExprEnv) -> ExprResult<i32> {
        self.value(env).map(|value| value.max(1))
    }

    pub fn position_x_unchecked(&self, env: &ExprEnv) -> i32 {
        or_zero(self.position_x(env))
    }

    pub fn position_y_unchecked(&self, env: &ExprEnv) -> i32 {
        or_zero(self.position_y(env))
    }

    pub fn size_unchecked(&self, env: &ExprEnv) -> i32 {
        or_zero(self.size(env))
    }
}

/// Render-time policy: a broken expression draws as zero.
fn or_zero(result: ExprResult<i32>) -> i32 {
    result.unwrap_or_else(|err| {
        tracing::warn!(%err, "theme contained an expression that resulted in an error");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::ExprError;
    use crate::geometry::Rect;

    fn env() -> ExprEnv {
        ExprEnv::new(Rect::new(10, 20, 100, 50))
    }

    fn theme_constants() -> Constants {
        let mut constants = Constants::new();
        constants.define_int("Pad", 3).expect("int constant should define");
        constants
            .define_float("Half", 0.5)
            .expect("float constant should define");
        constants
    }

    #[test]
    fn expressions_without_variables_fold() {
        let spec = DrawSpec::new("2 * Pad + 1", &theme_constants()).expect("spec should build");
        assert!(spec.is_constant());
        assert_eq!(spec.value(&env()), Ok(7));
    }

    #[test]
    fn float_constants_fold_as_doubles() {
        let spec = DrawSpec::new("9 * Half", &theme_constants()).expect("spec should build");
        assert_eq!(spec.tokens()[2], Token::Double(0.5));
        assert_eq!(spec.value(&env()), Ok(4));
    }

    #[test]
    fn folding_matches_direct_evaluation() {
        for expr in ["2 + 3 * 4", "(7 - 2) `max` 4", "10 / 4", "3.5 * 2", "1 `min` 0 - 1"] {
            let spec = DrawSpec::new(expr, &Constants::new()).expect("spec should build");
            let tokens = tokenize(expr).expect("expression should tokenize");
            let direct = evaluate(&tokens, Some(&env()))
                .expect("expression should evaluate")
                .to_pixels();
            assert!(spec.is_constant());
            assert_eq!(spec.value(&env()), Ok(direct), "{expr}");
        }
    }

    #[test]
    fn builtin_variables_stay_dynamic() {
        let spec = DrawSpec::new("width - Pad", &theme_constants()).expect("spec should build");
        assert!(!spec.is_constant());
        assert_eq!(spec.value(&env()), Ok(97));
    }

    #[test]
    fn construction_errors_are_hard() {
        assert_eq!(
            DrawSpec::new("1 / 0", &Constants::new()),
            Err(ExprError::DivideByZero)
        );
        assert!(DrawSpec::new("$", &Constants::new()).is_err());
    }

    #[test]
    fn positions_are_offset_by_the_rect() {
        let spec = DrawSpec::new("width / 2", &Constants::new()).expect("spec should build");
        assert_eq!(spec.position_x(&env()), Ok(60));
        assert_eq!(spec.position_y(&env()), Ok(70));
        let constant = DrawSpec::literal(4);
        assert_eq!(constant.position_x(&env()), Ok(14));
    }

    #[test]
    fn sizes_are_at_least_one() {
        let spec = DrawSpec::new("width - 200", &Constants::new()).expect("spec should build");
        assert_eq!(spec.size(&env()), Ok(1));
    }

    #[test]
    fn unchecked_evaluation_falls_back_to_zero() {
        let spec = DrawSpec::new("object_width", &Constants::new()).expect("spec should build");
        assert_eq!(spec.position_x_unchecked(&env()), 0);
        assert_eq!(spec.size_unchecked(&env()), 0);

        let mut with_object = env();
        with_object.object_width = Some(8);
        assert_eq!(spec.position_x_unchecked(&with_object), 18);
    }
}
