//! Formula parser.
//!
//! Binary operators are parsed with precedence climbing; unary operators and
//! function calls bind tighter than any binary operator.
//!
//! Both parser recursion and the depth of the resulting tree are capped at
//! [`MAX_DEPTH`], which also bounds the evaluator's recursion.

use crate::ast::{BinaryOp, Expr, Function, UnaryOp};
use crate::error::FormulaError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Deepest nesting of parentheses, calls and operators accepted in one formula.
pub const MAX_DEPTH: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Current parse_unary recursion depth.
    nesting: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, FormulaError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Parser {
            tokens,
            pos: 0,
            nesting: 0,
        })
    }

    /// Parse the whole input as a single expression.
    pub fn parse(mut self) -> Result<Expr, FormulaError> {
        let (expr, _) = self.parse_binary(0)?;
        if !self.check(&TokenKind::Eof) {
            return Err(FormulaError::syntax(
                self.current().offset,
                "unexpected token after expression",
            ));
        }
        Ok(expr)
    }

    // Each parse_* returns the expression with its tree depth.

    fn parse_binary(&mut self, min_prec: u8) -> Result<(Expr, usize), FormulaError> {
        let (mut lhs, mut lhs_depth) = self.parse_unary()?;

        while let Some(op) = self.binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            let offset = self.current().offset;
            self.advance();
            let (rhs, rhs_depth) = self.parse_binary(prec + 1)?;

            if op.is_comparison() && self.binary_op().is_some_and(BinaryOp::is_comparison) {
                return Err(FormulaError::syntax(
                    self.current().offset,
                    "comparison operators cannot be chained",
                ));
            }

            lhs_depth = deeper(lhs_depth.max(rhs_depth), offset)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok((lhs, lhs_depth))
    }

    fn parse_unary(&mut self) -> Result<(Expr, usize), FormulaError> {
        if self.nesting >= MAX_DEPTH {
            return Err(FormulaError::TooDeep {
                offset: self.current().offset,
            });
        }
        self.nesting += 1;
        let result = self.parse_unary_inner();
        self.nesting -= 1;
        result
    }

    fn parse_unary_inner(&mut self) -> Result<(Expr, usize), FormulaError> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Not => UnaryOp::Not,
            _ => return self.parse_primary(),
        };
        let offset = self.current().offset;
        self.advance();
        let (operand, depth) = self.parse_unary()?;
        Ok((
            Expr::Unary {
                op,
                operand: Box::new(operand),
            },
            deeper(depth, offset)?,
        ))
    }

    fn parse_primary(&mut self) -> Result<(Expr, usize), FormulaError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Int(value) => {
                self.advance();
                Ok((Expr::Int(value), 1))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    self.parse_call(name, token.offset)
                } else {
                    Ok((Expr::Var(name), 1))
                }
            }
            TokenKind::LeftParen => {
                self.advance();
                let parsed = self.parse_binary(0)?;
                self.expect(&TokenKind::RightParen, "expected ')'")?;
                Ok(parsed)
            }
            _ => Err(FormulaError::syntax(token.offset, "expected expression")),
        }
    }

    fn parse_call(&mut self, name: String, offset: usize) -> Result<(Expr, usize), FormulaError> {
        let function =
            Function::from_name(&name).ok_or(FormulaError::UnknownFunction { name, offset })?;
        self.expect(&TokenKind::LeftParen, "expected '('")?;

        let mut args = Vec::new();
        let mut depth = 0;
        if !self.check(&TokenKind::RightParen) {
            loop {
                let (arg, arg_depth) = self.parse_binary(0)?;
                args.push(arg);
                depth = depth.max(arg_depth);
                if !self.check(&TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }
        self.expect(&TokenKind::RightParen, "expected ',' or ')'")?;

        if let Some(expected) = function.check_arity(args.len()) {
            return Err(FormulaError::Arity {
                function: function.name(),
                expected,
                got: args.len(),
            });
        }
        Ok((Expr::Call { function, args }, deeper(depth, offset)?))
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        let op = match self.current().kind {
            TokenKind::Or => BinaryOp::Or,
            TokenKind::And => BinaryOp::And,
            TokenKind::Eq => BinaryOp::Eq,
            TokenKind::Ne => BinaryOp::Ne,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Le => BinaryOp::Le,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Ge => BinaryOp::Ge,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Rem,
            _ => return None,
        };
        Some(op)
    }

    fn current(&self) -> &Token {
        // The token stream always ends with Eof and we never advance past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<(), FormulaError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(FormulaError::syntax(self.current().offset, message))
        }
    }
}

/// Depth of a node over children at most `depth` deep.
fn deeper(depth: usize, offset: usize) -> Result<usize, FormulaError> {
    let depth = depth + 1;
    if depth > MAX_DEPTH {
        return Err(FormulaError::TooDeep { offset });
    }
    Ok(depth)
}
