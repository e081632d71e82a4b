use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Serialize, Serializer, ser::SerializeSeq};

use crate::{
    error::RuntimeError, interpreter::evaluator::core::EvalResult, util::num::f64_to_usize_checked,
};

/// Shared, mutable array storage. Cloning a `Value::Array` aliases it.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Represents a runtime value in the interpreter.
///
/// Every slot of the operand stack and every local holds one of these.
/// `PartialEq` compares arrays by contents; the language's `==` compares them
/// by identity (see [`Value::equals`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A numeric value (double precision floating-point). Integer literals
    /// are numbers too.
    Number(f64),
    /// A boolean value (`true` or `false`), produced by literals,
    /// comparisons and logical operators.
    Bool(bool),
    /// An array of values. Assigning an array to another variable or passing
    /// it to a function shares the storage, so element writes are visible
    /// through every alias.
    Array(ArrayRef),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl Value {
    /// Returns whether the value counts as true in a condition.
    ///
    /// `false`, `0` and `NaN` are false. Every array, even an empty one, is
    /// true.
    ///
    /// # Example
    /// ```
    /// use quarkdsl::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::Number(f64::NAN).is_truthy());
    /// assert!(Value::Number(-2.5).is_truthy());
    /// assert!(Value::from(Vec::new()).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Bool(b) => *b,
            Self::Array(_) => true,
        }
    }

    /// Converts the value to an `f64` for arithmetic.
    ///
    /// Booleans coerce to `1` and `0`.
    ///
    /// # Parameters
    /// - `function`: The executing function, for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: The numeric value.
    /// - `Err(RuntimeError::TypeMismatch)`: If the value is an array.
    pub fn as_number(&self, function: &str) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Array(_) => {
                Err(RuntimeError::TypeMismatch { details:  format!("expected a number, found {}", self.type_name()),
                                                 function: function.to_string(), })
            },
        }
    }

    /// Returns the shared storage of an array value.
    ///
    /// # Errors
    /// Returns `NotAnArray` for numbers and booleans.
    pub fn as_array(&self, function: &str) -> EvalResult<&ArrayRef> {
        match self {
            Self::Array(a) => Ok(a),
            _ => Err(RuntimeError::NotAnArray { function: function.to_string() }),
        }
    }

    /// Converts the value to an element index.
    ///
    /// # Errors
    /// Returns `InvalidIndex` unless the value is a finite, non-negative,
    /// integral number.
    pub fn as_index(&self, function: &str) -> EvalResult<usize> {
        let error = || RuntimeError::InvalidIndex { index:    self.to_string(),
                                                    function: function.to_string(), };
        match self {
            Self::Number(n) => f64_to_usize_checked(*n, ()).map_err(|()| error()),
            _ => Err(error()),
        }
    }

    /// The language's `==`.
    ///
    /// Numbers and booleans compare by value, with a boolean equal to the
    /// number it coerces to. Arrays are equal only to themselves.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Array(_), _) | (_, Self::Array(_)) => false,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Bool(a), Self::Number(n)) | (Self::Number(n), Self::Bool(a)) => {
                f64::from(u8::from(*a)) == *n
            },
        }
    }

    /// A short name of the value's kind, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Array(_) => "array",
        }
    }
}

impl fmt::Display for Value {
    /// Arrays print as `[a, b, c]`. An array that contains itself prints as
    /// `[...]` where it recurs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

/// Identity of an array's storage, for cycle checks.
type ArrayId = *const RefCell<Vec<Value>>;

/// Marker written in place of an array already being written.
const CYCLE_MARKER: &str = "[...]";

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, open: &mut Vec<ArrayId>) -> fmt::Result {
    match value {
        Value::Number(n) => write_number(f, *n),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Array(a) => {
            let id = Rc::as_ptr(a);
            if open.contains(&id) {
                return write!(f, "{CYCLE_MARKER}");
            }

            open.push(id);
            write!(f, "[")?;

            for (index, element) in a.borrow().iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }

                write_value(f, element, open)?;
            }

            open.pop();
            write!(f, "]")
        },
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_infinite() {
        write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
    } else if n == 0.0 {
        write!(f, "0")
    } else {
        write!(f, "{n}")
    }
}

/// Serializes arrays as JSON sequences. A self-containing array becomes the
/// string `"[...]"` where it recurs.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        let open = RefCell::new(Vec::new());
        Guarded { value: self,
                  open:  &open, }.serialize(serializer)
    }
}

/// A value being serialized, with the arrays enclosing it.
struct Guarded<'a> {
    value: &'a Value,
    open:  &'a RefCell<Vec<ArrayId>>,
}

impl Serialize for Guarded<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        match self.value {
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Array(a) => {
                let id = Rc::as_ptr(a);
                if self.open.borrow().contains(&id) {
                    return serializer.serialize_str(CYCLE_MARKER);
                }

                self.open.borrow_mut().push(id);
                let elements = a.borrow();
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements.iter() {
                    seq.serialize_element(&Guarded { value: element,
                                                     open:  self.open, })?;
                }
                self.open.borrow_mut().pop();
                seq.end()
            },
        }
    }
}
