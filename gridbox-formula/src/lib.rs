//! gridbox-formula - size formulas for the gridbox layout engine.
//!
//! A declared size may be a small expression over named integer variables,
//! e.g. `(screen_width - 100) / 2` or `if(svga, 400, 300)`. This crate
//! contains:
//! - Lexer and precedence-climbing parser producing an `Expr` tree
//! - Evaluator (checked integer arithmetic, 1/0 booleans)
//! - `Variables`, the evaluation context
//!
//! Formulas are parsed once into a `Formula` and evaluated on every layout pass.

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;

mod error;
mod variables;

pub use ast::{BinaryOp, Expr, Function, UnaryOp};
pub use error::FormulaError;
pub use variables::{SCREEN_HEIGHT, SCREEN_WIDTH, Variables};

use std::fmt;
use std::str::FromStr;

/// A parsed formula together with its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let expr = parser::Parser::new(source)?.parse()?;
        tracing::trace!(formula = source, "parsed formula");
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    pub fn eval(&self, vars: &Variables) -> Result<i64, FormulaError> {
        eval::evaluate(&self.expr, vars)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Variables referenced by this formula, deduplicated, in first-use order.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        self.expr.for_each_var(&mut |name| {
            if !names.contains(&name) {
                names.push(name);
            }
        });
        names
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_once_eval_many() {
        let formula: Formula = "(screen_width - 100) / 2".parse().unwrap();
        assert_eq!(formula.eval(&Variables::screen(800, 600)), Ok(350));
        assert_eq!(formula.eval(&Variables::screen(1024, 768)), Ok(462));
        assert_eq!(formula.to_string(), "(screen_width - 100) / 2");
    }

    #[test]
    fn test_referenced_variables() {
        let formula = Formula::parse("if(svga, screen_width / 2, screen_width - ref_width)").unwrap();
        assert_eq!(formula.variables(), vec!["svga", "screen_width", "ref_width"]);
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(Formula::parse("(1 +"), Err(FormulaError::Syntax { .. })));
    }
}
