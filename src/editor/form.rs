//! Raw form fields and their validation.
//!
//! [`Draft`] holds the text exactly as the user typed it. [`Draft::validate`]
//! turns it into a [`BookInput`] or the first [`ValidationError`] found, checking
//! title, then author, then year.

use crate::domain::{Book, BookInput, Field, ValidationError, YearBound, MAX_YEAR, MIN_YEAR};

/// Untrimmed text of the three editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub author: String,
    pub year: String,
}

impl Draft {
    /// Seeds the fields from an existing book.
    #[must_use]
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.to_string(),
        }
    }

    /// Validates the fields and builds a payload from the trimmed values.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in field order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::editor::Draft;
    ///
    /// let draft = Draft {
    ///     title: " Dune ".to_string(),
    ///     author: "Frank Herbert".to_string(),
    ///     year: "1965".to_string(),
    /// };
    /// let input = draft.validate().unwrap();
    /// assert_eq!(input.title, "Dune");
    /// assert_eq!(input.year, 1965);
    /// ```
    pub fn validate(&self) -> Result<BookInput, ValidationError> {
        let title = required(&self.title, Field::Title)?;
        let author = required(&self.author, Field::Author)?;
        let year = parse_year(&self.year)?;

        Ok(BookInput {
            title: title.to_owned(),
            author: author.to_owned(),
            year,
        })
    }
}

fn required(value: &str, field: Field) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Parses year text into a year within `MIN_YEAR..=MAX_YEAR`.
///
/// Accepts every notation [`parse_integral`] does.
///
/// # Errors
///
/// - [`ValidationError::EmptyField`] for blank text
/// - [`ValidationError::NotAnInteger`] for non-numeric, fractional, or
///   non-finite text
/// - [`ValidationError::OutOfRange`] below 0 or above 3000
pub fn parse_year(text: &str) -> Result<i32, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyField(Field::Year));
    }

    let value = parse_integral(text).ok_or(ValidationError::NotAnInteger)?;

    if value < i64::from(MIN_YEAR) {
        return Err(ValidationError::OutOfRange {
            value,
            bound: YearBound::Lower,
        });
    }
    if value > i64::from(MAX_YEAR) {
        return Err(ValidationError::OutOfRange {
            value,
            bound: YearBound::Upper,
        });
    }

    i32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        value,
        bound: YearBound::Upper,
    })
}

/// Parses numeric text whose value is a finite integer.
///
/// Accepts plain integers, decimal or exponent notation with an integral value
/// (`"1965.0"`, `"2e3"`), and unsigned `0x`/`0o`/`0b` literals (`"0x7D0"`).
/// Values beyond the `i64` range saturate. Returns `None` for anything else,
/// including blank text.
#[must_use]
pub fn parse_integral(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    if let Some(value) = radix_literal(text) {
        return Some(value);
    }
    integral_from_float(text)
}

fn radix_literal(text: &str) -> Option<i64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    Some(u128::from_str_radix(digits, radix).map_or(i64::MAX, |value| {
        i64::try_from(value).unwrap_or(i64::MAX)
    }))
}

#[allow(clippy::cast_possible_truncation)]
fn integral_from_float(text: &str) -> Option<i64> {
    let parsed: f64 = text.parse().ok()?;
    if !parsed.is_finite() || parsed.fract() != 0.0 {
        return None;
    }
    // `as` saturates at the i64 bounds, which is all the range checks need.
    Some(parsed as i64)
}
