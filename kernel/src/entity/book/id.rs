use std::fmt::Display;

use vodca::{AsRefln, Fromln};

use crate::entity::{Field, FieldError, FieldViolation};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Fromln, AsRefln)]
pub struct BookId(i64);

impl BookId {
    pub fn new(id: impl Into<i64>) -> Self {
        Self(id.into())
    }

    /// Trims `raw` and accepts only a positive integer.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let id = parse_positive(raw).map_err(|violation| FieldError::new(Field::Id, violation))?;
        Ok(Self(id))
    }
}

impl Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(in crate::entity) fn parse_positive(raw: &str) -> Result<i64, FieldViolation> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldViolation::Empty);
    }
    let value = raw
        .parse::<i64>()
        .map_err(|_| FieldViolation::NotInteger)?;
    if value <= 0 {
        return Err(FieldViolation::NotPositive);
    }
    Ok(value)
}

#[cfg(test)]
mod test {
    use crate::entity::{BookId, Field, FieldViolation};

    #[test]
    fn accepts_trimmed_positive_integer() {
        let id = BookId::parse("  42 ").unwrap();
        assert_eq!(id, BookId::new(42));
    }

    #[test]
    fn rejects_empty_and_non_integer() {
        let error = BookId::parse("   ").unwrap_err();
        assert_eq!(error.field(), &Field::Id);
        assert_eq!(error.violation(), &FieldViolation::Empty);

        let error = BookId::parse("1.5").unwrap_err();
        assert_eq!(error.violation(), &FieldViolation::NotInteger);

        let error = BookId::parse("abc").unwrap_err();
        assert_eq!(error.violation(), &FieldViolation::NotInteger);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert_eq!(
            BookId::parse("0").unwrap_err().violation(),
            &FieldViolation::NotPositive
        );
        assert_eq!(
            BookId::parse("-7").unwrap_err().violation(),
            &FieldViolation::NotPositive
        );
    }
}
