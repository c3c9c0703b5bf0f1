//! Answer parsing helpers.
//!
//! These functions turn a raw answer into a typed value. They are used by
//! [`Prompter`](crate::Prompter) but have no dependency on it, so they work
//! just as well on answers read some other way.

use std::fmt::Display;
use std::str::FromStr;

/// Parses a yes/no answer.
///
/// Accepts `y`, `yes`, `n`, and `no` in any case, ignoring surrounding
/// whitespace. Anything else returns `None`.
///
/// # Examples
///
/// ```
/// use ti_prompt::parse::parse_yes_no;
///
/// assert_eq!(parse_yes_no("Y"), Some(true));
/// assert_eq!(parse_yes_no(" no "), Some(false));
/// assert_eq!(parse_yes_no("maybe"), None);
/// ```
#[must_use]
pub fn parse_yes_no(input: &str) -> Option<bool> {
    let answer = input.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if answer.eq_ignore_ascii_case("n") || answer.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Resolves a menu answer to a zero-based choice index.
///
/// The answer may be a 1-based position (`"2"`) or a choice label compared
/// case-insensitively (`"banana"`). Out-of-range positions and unknown labels
/// return `None`.
///
/// # Examples
///
/// ```
/// use ti_prompt::parse::parse_choice;
///
/// let fruits = ["Apple", "Banana", "Cherry"];
/// assert_eq!(parse_choice("2", &fruits), Some(1));
/// assert_eq!(parse_choice("cherry", &fruits), Some(2));
/// assert_eq!(parse_choice("4", &fruits), None);
/// assert_eq!(parse_choice("0", &fruits), None);
/// ```
#[must_use]
pub fn parse_choice<C: AsRef<str>>(input: &str, choices: &[C]) -> Option<usize> {
    let answer = input.trim();
    if let Ok(position) = answer.parse::<usize>() {
        return (1..=choices.len()).contains(&position).then(|| position - 1);
    }
    choices
        .iter()
        .position(|choice| choice.as_ref().eq_ignore_ascii_case(answer))
}

/// Parses an answer into any [`FromStr`] type, rendering the failure reason.
///
/// # Errors
///
/// Returns the parser's error message when `input` is not a valid `T`.
///
/// # Examples
///
/// ```
/// use ti_prompt::parse::parse_value;
///
/// assert_eq!(parse_value::<i32>(" 42 "), Ok(42));
/// assert!(parse_value::<f64>("3.5").is_ok());
/// assert!(parse_value::<u8>("300").is_err());
/// ```
pub fn parse_value<T>(input: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    input.trim().parse::<T>().map_err(|err| err.to_string())
}
