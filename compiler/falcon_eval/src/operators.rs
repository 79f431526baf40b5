//! Binary operator and comparison evaluation.
//!
//! Direct enum-based dispatch: the value type set is closed, so pattern
//! matching gives exhaustiveness checking for free. All integer
//! arithmetic is checked; overflow and division by zero are reported as
//! `MathError`, never wrapped or panicked on.

use std::cmp::Ordering;

use falcon_diagnostic::Diagnostic;
use falcon_ir::{BinOp, CmpOp};

use crate::errors::{
    binary_type_mismatch, compare_type_mismatch, division_by_zero, integer_overflow,
};
use crate::value::Value;

/// Evaluate one arithmetic operation.
///
/// `+` doubles as concatenation: when either operand is a string, both
/// sides are rendered and joined. The other three operators require two
/// integers.
pub fn evaluate_binary(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, Diagnostic> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(op, *a, *b),
        (Value::Str(_), _) | (_, Value::Str(_)) if op == BinOp::Add => {
            Ok(Value::Str(format!("{}{}", lhs.render(), rhs.render())))
        }
        _ => Err(binary_type_mismatch(
            op.as_symbol(),
            lhs.type_name(),
            rhs.type_name(),
        )),
    }
}

fn eval_int_binary(op: BinOp, a: i64, b: i64) -> Result<Value, Diagnostic> {
    let result = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.checked_div(b)
        }
    };
    result
        .map(Value::Int)
        .ok_or_else(|| integer_overflow(op.as_symbol()))
}

/// Evaluate one comparison.
///
/// Equality is structural and defined for every type pair; operands of
/// different types are simply unequal. Ordering is defined for integer
/// pairs and string pairs (lexicographic); any other pair is a
/// `TypeError`.
pub fn evaluate_compare(op: CmpOp, lhs: &Value, rhs: &Value) -> Result<bool, Diagnostic> {
    match op {
        CmpOp::Eq => Ok(lhs == rhs),
        CmpOp::NotEq => Ok(lhs != rhs),
        _ => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(ordering_holds(op, a.cmp(b))),
            (Value::Str(a), Value::Str(b)) => Ok(ordering_holds(op, a.cmp(b))),
            _ => Err(compare_type_mismatch(
                op.as_symbol(),
                lhs.type_name(),
                rhs.type_name(),
            )),
        },
    }
}

fn ordering_holds(op: CmpOp, ord: Ordering) -> bool {
    match op {
        CmpOp::Lt => ord == Ordering::Less,
        CmpOp::LtEq => ord != Ordering::Greater,
        CmpOp::Gt => ord == Ordering::Greater,
        CmpOp::GtEq => ord != Ordering::Less,
        CmpOp::Eq | CmpOp::NotEq => unreachable!("equality is handled before ordering"),
    }
}
