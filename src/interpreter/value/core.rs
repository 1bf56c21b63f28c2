use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Represents a runtime value in the interpreter.
///
/// Logo is dynamically typed, so primitives and operators match on the
/// variants they accept and reject the rest with an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A number. Logo has a single numeric type.
    Number(f64),
    /// A word, the Logo string type.
    Word(String),
    /// A boolean, produced by comparisons and predicates.
    Bool(bool),
    /// A list of values. Instruction lists are lists of words.
    List(Rc<Vec<Self>>),
    /// The result of a command, or of a parameter that was not supplied.
    Absent,
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

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Word(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Word(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl Value {
    /// Converts the value to an `f64`.
    ///
    /// Numbers are returned as-is and words are accepted when their text is a
    /// number, since Logo does not distinguish `"3` from `3`.
    ///
    /// # Parameters
    /// - `name`: The primitive or operator asking, for the error message.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use logoscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Number(2.5).as_number("sum", 1).unwrap(), 2.5);
    /// assert_eq!(Value::from("12").as_number("sum", 1).unwrap(), 12.0);
    /// assert!(Value::from("twelve").as_number("sum", 1).is_err());
    /// ```
    pub fn as_number(&self, name: &str, line: usize) -> EvalResult<f64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Word(w) => numeric_word(w).ok_or_else(|| self.invalid_for(name, line)),
            _ => Err(self.invalid_for(name, line)),
        }
    }

    /// Converts the value to `bool`.
    ///
    /// Accepts booleans and the words `true` and `false` in any case.
    pub fn as_bool(&self, name: &str, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Word(w) if w.eq_ignore_ascii_case("true") => Ok(true),
            Self::Word(w) if w.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(self.invalid_for(name, line)),
        }
    }

    /// Returns the text of a word. Numbers and booleans count as words.
    pub fn as_word(&self, name: &str, line: usize) -> EvalResult<String> {
        match self {
            Self::Word(w) => Ok(w.clone()),
            Self::Number(_) | Self::Bool(_) => Ok(self.to_string()),
            _ => Err(self.invalid_for(name, line)),
        }
    }

    /// Borrows the elements of a list.
    pub fn as_list(&self, name: &str, line: usize) -> EvalResult<&[Self]> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(self.invalid_for(name, line)),
        }
    }

    /// Returns `true` for [`Value::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` for numbers and for words whose text is a number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Number(_) => true,
            Self::Word(w) => numeric_word(w).is_some(),
            _ => false,
        }
    }

    /// Returns `true` for the empty word and the empty list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Word(w) => w.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Compares two values the way `=` and `equalp` do.
    ///
    /// Numbers compare numerically, including words that hold numbers.
    /// Lists compare element by element.
    ///
    /// # Example
    /// ```
    /// use logoscript::interpreter::value::core::Value;
    ///
    /// assert!(Value::Number(3.0).logo_equal(&Value::from("3")));
    /// assert!(Value::from(vec![Value::from("a")]).logo_equal(&Value::from(vec![Value::from("a")])));
    /// assert!(!Value::from("a").logo_equal(&Value::from("b")));
    /// ```
    #[must_use]
    pub fn logo_equal(&self, other: &Self) -> bool {
        use Value::{Absent, Bool, List, Number, Word};

        match (self, other) {
            (List(a), List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.logo_equal(y))
            },
            (Bool(a), Bool(b)) => a == b,
            (Absent, Absent) => true,
            (Number(_) | Word(_), Number(_) | Word(_)) => {
                if self.is_numeric() && other.is_numeric() {
                    self.as_number("=", 0).ok() == other.as_number("=", 0).ok()
                } else {
                    self.to_string() == other.to_string()
                }
            },
            _ => false,
        }
    }

    /// Text written by `print` and `type`: like [`Display`](std::fmt::Display)
    /// but without the brackets around a top-level list.
    ///
    /// This is also the text handed back to the tokenizer when a list is run
    /// as instructions.
    ///
    /// # Example
    /// ```
    /// use logoscript::interpreter::value::core::Value;
    ///
    /// let list = Value::from(vec![Value::from("a"),
    ///                             Value::from(vec![Value::from("b"), Value::Number(1.0)])]);
    ///
    /// assert_eq!(list.to_string(), "[a [b 1]]");
    /// assert_eq!(list.print_form(), "a [b 1]");
    /// ```
    #[must_use]
    pub fn print_form(&self) -> String {
        match self {
            Self::List(items) => join_items(items),
            other => other.to_string(),
        }
    }

    /// Hashable stand-in for the value, treating numeric words as numbers.
    #[must_use]
    pub fn key(&self) -> ValueKey {
        match self {
            Self::Number(n) => ValueKey::Number(OrderedFloat(*n)),
            Self::Word(w) => {
                numeric_word(w).map_or_else(|| ValueKey::Word(w.clone()),
                                            |n| ValueKey::Number(OrderedFloat(n)))
            },
            Self::Bool(b) => ValueKey::Bool(*b),
            Self::List(items) => ValueKey::List(items.iter().map(Self::key).collect()),
            Self::Absent => ValueKey::Absent,
        }
    }

    /// Builds the "X doesn't like Y as input" error for this value.
    #[must_use]
    pub fn invalid_for(&self, name: &str, line: usize) -> RuntimeError {
        RuntimeError::InvalidInput { name: name.to_string(),
                                     input: self.to_string(),
                                     line }
    }
}

/// Hashable form of a [`Value`], used to find duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    /// A number, or a word holding one.
    Number(OrderedFloat<f64>),
    /// A non-numeric word.
    Word(String),
    /// A boolean.
    Bool(bool),
    /// A list.
    List(Vec<Self>),
    /// No value.
    Absent,
}

/// Parses a word as a number. Only digits, signs, points and exponents count,
/// so words like `inf` stay words.
fn numeric_word(word: &str) -> Option<f64> {
    if word.is_empty()
       || !word.chars()
               .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }
    word.parse().ok()
}

fn join_items(items: &[Value]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

impl std::fmt::Display for Value {
    /// Formats the value the way `show` writes it, with brackets around lists.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Word(w) => write!(f, "{w}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => write!(f, "[{}]", join_items(items)),
            Self::Absent => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(Value::Number(6.0).to_string(), "6");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
    }

    #[test]
    fn empty_list_shows_as_brackets_and_prints_as_nothing() {
        let empty = Value::from(Vec::new());
        assert_eq!(empty.to_string(), "[]");
        assert_eq!(empty.print_form(), "");
        assert!(empty.is_empty());
    }

    #[test]
    fn numeric_words_and_numbers_share_a_key() {
        assert_eq!(Value::from("2").key(), Value::Number(2.0).key());
        assert_ne!(Value::from("two").key(), Value::Number(2.0).key());
    }

    #[test]
    fn booleans_accept_words() {
        assert!(Value::from("TRUE").as_bool("if", 1).unwrap());
        assert!(!Value::Bool(false).as_bool("if", 1).unwrap());
        assert!(Value::Number(1.0).as_bool("if", 1).is_err());
    }

    #[test]
    fn invalid_input_shows_the_value() {
        let err = Value::from(vec![Value::from("a")]).as_number("sum", 2).unwrap_err();
        assert_eq!(err.to_string(), "Error on line 2: sum doesn't like [a] as input.");
    }
}
