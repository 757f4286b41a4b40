//! Reader for the textual argument list handed to a program.
//!
//! `1 "two" [3 [4 five]]` reads as three arguments: a number, a string and
//! a nested array. Bare words that do not parse as numbers are strings.

use quill_types::value::parse_number;
use quill_types::{QuillError, Result, Value};

/// Parse an argument string into the program's argument list.
pub fn parse_arguments(text: &str) -> Result<Vec<Value>> {
    let mut frames: Vec<Vec<Value>> = vec![Vec::new()];
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {}
            '[' => frames.push(Vec::new()),
            ']' => {
                if frames.len() == 1 {
                    return Err(QuillError::UnmatchedBracket);
                }
                let items = frames.pop().unwrap_or_default();
                push(&mut frames, Value::array(items));
            }
            '"' | '\'' => {
                let quoted: String = chars.by_ref().take_while(|&c| c != ch).collect();
                push(&mut frames, Value::string(quoted));
            }
            first => {
                let mut word = String::from(first);
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '[' || c == ']' {
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                let value = match parse_number(&word) {
                    Some(n) => Value::number(n),
                    None => Value::string(word),
                };
                push(&mut frames, value);
            }
        }
    }

    if frames.len() > 1 {
        return Err(QuillError::UnmatchedOpenBracket);
    }
    Ok(frames.pop().unwrap_or_default())
}

fn push(frames: &mut [Vec<Value>], value: Value) {
    if let Some(top) = frames.last_mut() {
        top.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_words() {
        assert_eq!(
            parse_arguments("1 -2.5 abc 3e2").unwrap(),
            vec![
                Value::number(1.0),
                Value::number(-2.5),
                Value::string("abc"),
                Value::number(300.0)
            ]
        );
    }

    #[test]
    fn test_quoted_strings_are_verbatim() {
        assert_eq!(
            parse_arguments(r#""a b" '12'"#).unwrap(),
            vec![Value::string("a b"), Value::string("12")]
        );
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(parse_arguments("\"ab c").unwrap(), vec![Value::string("ab c")]);
    }

    #[test]
    fn test_brackets_nest() {
        let parsed = parse_arguments("[1 [2 x]] 3").unwrap();
        assert_eq!(
            parsed,
            vec![
                Value::array([
                    Value::number(1.0),
                    Value::array([Value::number(2.0), Value::string("x")])
                ]),
                Value::number(3.0)
            ]
        );
    }

    #[test]
    fn test_words_end_at_brackets() {
        assert_eq!(
            parse_arguments("[a]").unwrap(),
            vec![Value::array([Value::string("a")])]
        );
    }

    #[test]
    fn test_bracket_errors() {
        assert_eq!(parse_arguments("1 ]"), Err(QuillError::UnmatchedBracket));
        assert_eq!(parse_arguments("[1 [2]"), Err(QuillError::UnmatchedOpenBracket));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_arguments("  ").unwrap(), vec![]);
    }
}
