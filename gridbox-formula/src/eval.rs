//! Formula evaluator (AST walker).
//!
//! All arithmetic is checked; booleans are 1/0 and any non-zero value is true.

use crate::ast::{BinaryOp, Expr, Function, UnaryOp};
use crate::error::FormulaError;
use crate::variables::Variables;

pub fn evaluate(expr: &Expr, vars: &Variables) -> Result<i64, FormulaError> {
    match expr {
        Expr::Int(value) => Ok(*value),
        Expr::Var(name) => vars
            .get(name)
            .ok_or_else(|| FormulaError::UnknownVariable(name.clone())),
        Expr::Unary { op, operand } => {
            let value = evaluate(operand, vars)?;
            match op {
                UnaryOp::Neg => value.checked_neg().ok_or(FormulaError::Overflow),
                UnaryOp::Not => Ok((value == 0) as i64),
            }
        }
        Expr::Binary { op, lhs, rhs } => eval_binary(*op, lhs, rhs, vars),
        Expr::Call { function, args } => eval_call(*function, args, vars),
    }
}

fn eval_binary(op: BinaryOp, lhs: &Expr, rhs: &Expr, vars: &Variables) -> Result<i64, FormulaError> {
    let left = evaluate(lhs, vars)?;

    // Short-circuit before touching the right-hand side.
    match op {
        BinaryOp::And if left == 0 => return Ok(0),
        BinaryOp::Or if left != 0 => return Ok(1),
        _ => {}
    }

    let right = evaluate(rhs, vars)?;
    let value = match op {
        BinaryOp::And | BinaryOp::Or => (right != 0) as i64,
        BinaryOp::Eq => (left == right) as i64,
        BinaryOp::Ne => (left != right) as i64,
        BinaryOp::Lt => (left < right) as i64,
        BinaryOp::Le => (left <= right) as i64,
        BinaryOp::Gt => (left > right) as i64,
        BinaryOp::Ge => (left >= right) as i64,
        BinaryOp::Add => left.checked_add(right).ok_or(FormulaError::Overflow)?,
        BinaryOp::Sub => left.checked_sub(right).ok_or(FormulaError::Overflow)?,
        BinaryOp::Mul => left.checked_mul(right).ok_or(FormulaError::Overflow)?,
        BinaryOp::Div | BinaryOp::Rem => {
            if right == 0 {
                return Err(FormulaError::DivisionByZero);
            }
            let result = if op == BinaryOp::Div {
                left.checked_div(right)
            } else {
                left.checked_rem(right)
            };
            result.ok_or(FormulaError::Overflow)?
        }
    };
    Ok(value)
}

fn eval_call(function: Function, args: &[Expr], vars: &Variables) -> Result<i64, FormulaError> {
    match function {
        Function::If => {
            // cond, then, cond, then, ..., else
            let (default, pairs) = args
                .split_last()
                .ok_or(FormulaError::Arity {
                    function: function.name(),
                    expected: "an odd number (at least 3)",
                    got: 0,
                })?;
            for pair in pairs.chunks(2) {
                if let [cond, then] = pair {
                    if evaluate(cond, vars)? != 0 {
                        return evaluate(then, vars);
                    }
                }
            }
            evaluate(default, vars)
        }
        Function::Min | Function::Max => {
            let mut best: Option<i64> = None;
            for arg in args {
                let value = evaluate(arg, vars)?;
                best = Some(match best {
                    None => value,
                    Some(b) if function == Function::Min => b.min(value),
                    Some(b) => b.max(value),
                });
            }
            best.ok_or(FormulaError::Arity {
                function: function.name(),
                expected: "at least 1",
                got: 0,
            })
        }
        Function::Abs => match args {
            [arg] => evaluate(arg, vars)?.checked_abs().ok_or(FormulaError::Overflow),
            _ => Err(FormulaError::Arity {
                function: function.name(),
                expected: "exactly 1",
                got: args.len(),
            }),
        },
    }
}
