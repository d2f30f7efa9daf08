use vodca::{AsRefln, Fromln};

use crate::entity::{Field, FieldError, FieldViolation};

/// ISBN-10 or ISBN-13 without punctuation.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Fromln, AsRefln)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self(isbn.into())
    }

    /// Strips hyphens, spaces and periods, then checks the ISBN-10 or ISBN-13 checksum.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let error = |violation| FieldError::new(Field::Isbn, violation);
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(error(FieldViolation::Empty));
        }
        let isbn = raw
            .chars()
            .filter(|c| !matches!(c, '-' | ' ' | '.'))
            .collect::<String>();
        if isbn.is_empty() || !isbn.chars().all(|c| c.is_ascii_digit() || c == 'X') {
            return Err(error(FieldViolation::IsbnCharacters));
        }
        if !(is_isbn10(&isbn) || is_isbn13(&isbn)) {
            return Err(error(FieldViolation::IsbnChecksum));
        }
        Ok(Self(isbn))
    }
}

fn is_isbn10(isbn: &str) -> bool {
    let bytes = isbn.as_bytes();
    if bytes.len() != 10 || !bytes[..9].iter().all(u8::is_ascii_digit) {
        return false;
    }
    let check = match bytes[9] {
        b'X' => 10,
        digit @ b'0'..=b'9' => u32::from(digit - b'0'),
        _ => return false,
    };
    let sum = bytes[..9]
        .iter()
        .enumerate()
        .map(|(i, digit)| (10 - i as u32) * u32::from(digit - b'0'))
        .sum::<u32>();
    (sum + check) % 11 == 0
}

fn is_isbn13(isbn: &str) -> bool {
    let bytes = isbn.as_bytes();
    if bytes.len() != 13 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    if !(isbn.starts_with("978") || isbn.starts_with("979")) {
        return false;
    }
    let sum = bytes
        .iter()
        .enumerate()
        .map(|(i, digit)| {
            let weight = if i % 2 == 0 { 1 } else { 3 };
            weight * u32::from(digit - b'0')
        })
        .sum::<u32>();
    sum % 10 == 0
}
