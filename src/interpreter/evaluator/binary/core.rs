use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::{arithmetic::eval_arithmetic, comparison::eval_comparison, logic::eval_logic},
            core::EvalResult,
        },
        value::core::Value,
    },
};

/// Evaluates a binary operation between two values.
///
/// This function routes the operation to specialized handlers depending on
/// the operator. Arithmetic operators use `eval_arithmetic`, equality and
/// relational operators use `eval_comparison`, and logical operators use
/// `eval_logic`.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `function`: The executing function, for error reporting.
///
/// # Returns
/// An `EvalResult<Value>` containing the evaluated result.
///
/// # Example
/// ```
/// use quarkdsl::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::eval_binary, value::core::Value},
/// };
///
/// let left = Value::Number(3.0);
/// let right = Value::Number(4.0);
///
/// let result = eval_binary(BinaryOperator::Add, &left, &right, "main");
/// assert_eq!(result.unwrap(), Value::Number(7.0));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   function: &str)
                   -> EvalResult<Value> {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or, Sub,
    };

    match op {
        Add | Sub | Mul | Div | Mod => eval_arithmetic(op, left, right, function),
        Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
            eval_comparison(op, left, right, function)
        },
        And | Or => Ok(eval_logic(op, left, right)),
    }
}
