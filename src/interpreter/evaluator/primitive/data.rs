use std::collections::HashSet;

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_checked, i64_to_u32_checked, usize_to_f64_checked},
};

/// Concatenates words. `(word "a "b "c)` outputs `abc`.
pub fn word(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut joined = String::new();
    for arg in args {
        joined.push_str(&arg.as_word("word", line)?);
    }
    Ok(Value::Word(joined))
}

/// Outputs a list of its inputs, whatever they are.
pub fn list(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::from(args.to_vec()))
}

/// Outputs a list of its inputs, splicing in the members of list inputs.
///
/// # Example
/// ```
/// use logoscript::interpreter::{evaluator::primitive::data::sentence, value::core::Value};
///
/// let args = [Value::from(vec![Value::from("a"), Value::from("b")]), Value::from("c")];
/// let result = sentence(&args, 1).unwrap();
///
/// assert_eq!(result.to_string(), "[a b c]");
/// ```
pub fn sentence(args: &[Value], _line: usize) -> EvalResult<Value> {
    let mut items = Vec::new();
    for arg in args {
        match arg {
            Value::List(members) => items.extend(members.iter().cloned()),
            Value::Absent => {},
            other => items.push(other.clone()),
        }
    }
    Ok(Value::from(items))
}

/// `fput thing list` outputs `list` with `thing` added at the front.
///
/// When the second input is a word, the first must be a single character and
/// the result is a word.
pub fn fput(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[1] {
        Value::List(items) => {
            let mut result = Vec::with_capacity(items.len() + 1);
            result.push(args[0].clone());
            result.extend(items.iter().cloned());
            Ok(Value::from(result))
        },
        tail => {
            let head = single_char(&args[0], "fput", line)?;
            Ok(Value::Word(head + &tail.as_word("fput", line)?))
        },
    }
}

/// `lput thing list` outputs `list` with `thing` added at the end.
pub fn lput(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[1] {
        Value::List(items) => {
            let mut result = items.to_vec();
            result.push(args[0].clone());
            Ok(Value::from(result))
        },
        head => {
            let tail = single_char(&args[0], "lput", line)?;
            Ok(Value::Word(head.as_word("lput", line)? + &tail))
        },
    }
}

/// Like `fput` for a list, and like `word` for two words.
pub fn combine(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[1] {
        Value::List(_) => fput(args, line),
        _ => word(&args[..2], line),
    }
}

pub fn reverse(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::List(items) => Ok(Value::from(items.iter().rev().cloned().collect::<Vec<_>>())),
        other => Ok(Value::Word(other.as_word("reverse", line)?.chars().rev().collect())),
    }
}

/// First member of a list, or first character of a word.
pub fn first(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::List(items) => items.first().cloned().ok_or_else(|| args[0].invalid_for("first", line)),
        other => {
            let chars = other.as_word("first", line)?.chars().collect::<Vec<_>>();
            chars.first()
                 .map(|c| Value::Word(c.to_string()))
                 .ok_or_else(|| other.invalid_for("first", line))
        },
    }
}

/// Last member of a list, or last character of a word.
pub fn last(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::List(items) => items.last().cloned().ok_or_else(|| args[0].invalid_for("last", line)),
        other => {
            other.as_word("last", line)?
                 .chars()
                 .last()
                 .map(|c| Value::Word(c.to_string()))
                 .ok_or_else(|| other.invalid_for("last", line))
        },
    }
}

/// Everything but the first member or character.
pub fn butfirst(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::List(items) if !items.is_empty() => Ok(Value::from(items[1..].to_vec())),
        Value::List(_) => Err(args[0].invalid_for("butfirst", line)),
        other => {
            let word = other.as_word("butfirst", line)?;
            let mut chars = word.chars();
            match chars.next() {
                Some(_) => Ok(Value::Word(chars.collect())),
                None => Err(other.invalid_for("butfirst", line)),
            }
        },
    }
}

/// Everything but the last member or character.
pub fn butlast(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::List(items) if !items.is_empty() => {
            Ok(Value::from(items[..items.len() - 1].to_vec()))
        },
        Value::List(_) => Err(args[0].invalid_for("butlast", line)),
        other => {
            let word = other.as_word("butlast", line)?;
            let mut chars = word.chars();
            match chars.next_back() {
                Some(_) => Ok(Value::Word(chars.collect())),
                None => Err(other.invalid_for("butlast", line)),
            }
        },
    }
}

/// `item index thing` outputs the member (or character) at a 1-based index.
///
/// # Errors
/// - `IndexOutOfBounds` if the index is below 1 or past the end.
/// - `RealIsFractional` if the index is not a whole number.
///
/// # Example
/// ```
/// use logoscript::interpreter::{evaluator::primitive::data::item, value::core::Value};
///
/// let list = Value::from(vec![Value::from("a"), Value::from("b")]);
///
/// assert_eq!(item(&[Value::Number(2.0), list.clone()], 1).unwrap(), Value::from("b"));
/// assert!(item(&[Value::Number(3.0), list], 1).is_err());
/// ```
pub fn item(args: &[Value], line: usize) -> EvalResult<Value> {
    let index = f64_to_i64_checked(args[0].as_number("item", line)?, line)?;

    let members = match &args[1] {
        Value::List(items) => items.to_vec(),
        other => {
            other.as_word("item", line)?
                 .chars()
                 .map(|c| Value::Word(c.to_string()))
                 .collect()
        },
    };

    usize::try_from(index).ok()
                          .and_then(|i| i.checked_sub(1))
                          .and_then(|i| members.get(i).cloned())
                          .ok_or(RuntimeError::IndexOutOfBounds { max: members.len(),
                                                                  found: index,
                                                                  line })
}

/// Removes duplicate members of a list, keeping the last occurrence of each.
pub fn remdup(args: &[Value], line: usize) -> EvalResult<Value> {
    let items = args[0].as_list("remdup", line)?;

    let mut seen = HashSet::new();
    let mut kept = items.iter()
                        .rev()
                        .filter(|item| seen.insert(item.key()))
                        .cloned()
                        .collect::<Vec<_>>();
    kept.reverse();

    Ok(Value::from(kept))
}

pub fn wordp(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::Word(_) | Value::Number(_) | Value::Bool(_))))
}

pub fn listp(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(matches!(args[0], Value::List(_))))
}

pub fn emptyp(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].is_empty()))
}

pub fn equalp(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].logo_equal(&args[1])))
}

pub fn notequalp(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(!args[0].logo_equal(&args[1])))
}

/// `beforep word1 word2` is true when `word1` sorts first.
pub fn beforep(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].as_word("beforep", line)? < args[1].as_word("beforep", line)?))
}

/// `memberp thing container` is true when `thing` is a member of the list,
/// or a character of the word.
pub fn memberp(args: &[Value], _line: usize) -> EvalResult<Value> {
    let found = match (&args[0], &args[1]) {
        (thing, Value::List(items)) => items.iter().any(|item| thing.logo_equal(item)),
        (Value::List(_), _) => false,
        (thing, container) => {
            let thing = thing.to_string();
            thing.chars().count() == 1 && container.to_string().contains(&thing)
        },
    };
    Ok(Value::Bool(found))
}

/// `substringp word1 word2` is true when `word1` appears inside `word2`.
/// Lists are never substrings.
pub fn substringp(args: &[Value], _line: usize) -> EvalResult<Value> {
    let found = match (&args[0], &args[1]) {
        (Value::List(_), _) | (_, Value::List(_)) => false,
        (part, whole) => whole.to_string().contains(&part.to_string()),
    };
    Ok(Value::Bool(found))
}

pub fn numberp(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Bool(args[0].is_numeric()))
}

/// Number of members of a list, or characters of a word.
pub fn count(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = match &args[0] {
        Value::List(items) => items.len(),
        other => other.as_word("count", line)?.chars().count(),
    };
    Ok(Value::Number(usize_to_f64_checked(n, line)?))
}

/// Character code of a one-character word.
pub fn ascii(args: &[Value], line: usize) -> EvalResult<Value> {
    let c = single_char(&args[0], "ascii", line)?
            .chars()
            .next()
            .ok_or_else(|| args[0].invalid_for("ascii", line))?;
    Ok(Value::Number(f64::from(u32::from(c))))
}

/// One-character word for a character code.
pub fn char(args: &[Value], line: usize) -> EvalResult<Value> {
    let code = f64_to_i64_checked(args[0].as_number("char", line)?, line)?;
    let code = i64_to_u32_checked(code, line)?;
    char::from_u32(code).map(|c| Value::Word(c.to_string()))
                        .ok_or_else(|| args[0].invalid_for("char", line))
}

/// `member thing container` outputs the part of `container` starting at the
/// first occurrence of `thing`, or an empty list or word if there is none.
pub fn member(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[1] {
        Value::List(items) => {
            let tail = items.iter()
                            .position(|item| args[0].logo_equal(item))
                            .map_or_else(Vec::new, |i| items[i..].to_vec());
            Ok(Value::from(tail))
        },
        container => {
            let word = container.as_word("member", line)?;
            let part = args[0].as_word("member", line)?;
            Ok(Value::Word(word.find(&part)
                               .map_or_else(String::new, |i| word[i..].to_string())))
        },
    }
}

pub fn lowercase(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Word(args[0].as_word("lowercase", line)?.to_lowercase()))
}

pub fn uppercase(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Word(args[0].as_word("uppercase", line)?.to_uppercase()))
}

/// Text of a word that must be exactly one character long.
fn single_char(value: &Value, name: &str, line: usize) -> EvalResult<String> {
    let text = value.as_word(name, line)?;
    if text.chars().count() == 1 {
        Ok(text)
    } else {
        Err(value.invalid_for(name, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Value {
        Value::from(items.iter().map(|w| Value::from(*w)).collect::<Vec<_>>())
    }

    #[test]
    fn fput_and_lput_on_lists() {
        let list = words(&["b", "c"]);
        assert_eq!(fput(&[Value::from("a"), list.clone()], 1).unwrap(), words(&["a", "b", "c"]));
        assert_eq!(lput(&[Value::from("d"), list], 1).unwrap(), words(&["b", "c", "d"]));
    }

    #[test]
    fn fput_on_a_word_needs_one_character() {
        assert_eq!(fput(&[Value::from("x"), Value::from("yz")], 1).unwrap(), Value::from("xyz"));
        assert!(fput(&[Value::from("xx"), Value::from("yz")], 1).is_err());
    }

    #[test]
    fn combine_joins_words_of_any_length() {
        assert_eq!(combine(&[Value::from("ab"), Value::from("cd")], 1).unwrap(),
                   Value::from("abcd"));
    }

    #[test]
    fn selectors_work_on_words_and_lists() {
        let list = words(&["a", "b", "c"]);
        assert_eq!(first(&[list.clone()], 1).unwrap(), Value::from("a"));
        assert_eq!(last(&[Value::from("xyz")], 1).unwrap(), Value::from("z"));
        assert_eq!(butfirst(&[list.clone()], 1).unwrap(), words(&["b", "c"]));
        assert_eq!(butlast(&[Value::from("xyz")], 1).unwrap(), Value::from("xy"));
        assert_eq!(reverse(&[list], 1).unwrap(), words(&["c", "b", "a"]));
    }

    #[test]
    fn first_of_empty_list_is_invalid() {
        let err = first(&[Value::from(Vec::new())], 4).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidInput { ref input, line: 4, .. } if input == "[]"));
    }

    #[test]
    fn item_reports_the_bounds() {
        let err = item(&[Value::Number(0.0), Value::from("abc")], 2).unwrap_err();
        assert_eq!(err,
                   RuntimeError::IndexOutOfBounds { max:   3,
                                                    found: 0,
                                                    line:  2, });
    }

    #[test]
    fn remdup_keeps_the_last_occurrence() {
        let list = Value::from(vec![Value::from("a"),
                                    Value::Number(1.0),
                                    Value::from("b"),
                                    Value::from("1"),
                                    Value::from("a")]);
        assert_eq!(remdup(&[list], 1).unwrap().to_string(), "[b 1 a]");
    }

    #[test]
    fn membership_and_substrings() {
        let list = words(&["x", "y"]);
        assert_eq!(memberp(&[Value::from("y"), list.clone()], 1).unwrap(), Value::Bool(true));
        assert_eq!(memberp(&[Value::from("e"), Value::from("hello")], 1).unwrap(),
                   Value::Bool(true));
        assert_eq!(substringp(&[Value::from("ell"), Value::from("hello")], 1).unwrap(),
                   Value::Bool(true));
        assert_eq!(member(&[Value::from("y"), list], 1).unwrap(), words(&["y"]));
        assert_eq!(member(&[Value::from("l"), Value::from("hello")], 1).unwrap(),
                   Value::from("llo"));
    }

    #[test]
    fn character_codes_round_trip() {
        assert_eq!(ascii(&[Value::from("A")], 1).unwrap(), Value::Number(65.0));
        assert_eq!(char(&[Value::Number(97.0)], 1).unwrap(), Value::from("a"));
        assert!(char(&[Value::Number(-1.0)], 1).is_err());
    }

    #[test]
    fn count_and_sentence() {
        assert_eq!(count(&[Value::from("four")], 1).unwrap(), Value::Number(4.0));
        let result = sentence(&[Value::from("a"), words(&["b", "c"])], 1).unwrap();
        assert_eq!(count(&[result], 1).unwrap(), Value::Number(3.0));
    }
}
