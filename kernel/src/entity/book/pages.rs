use vodca::{AsRefln, Fromln};

use crate::entity::book::id::parse_positive;
use crate::entity::{Field, FieldError};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookPages(i64);

impl BookPages {
    pub fn new(pages: impl Into<i64>) -> Self {
        Self(pages.into())
    }

    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let pages =
            parse_positive(raw).map_err(|violation| FieldError::new(Field::Pages, violation))?;
        Ok(Self(pages))
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{BookPages, FieldViolation};

    #[test]
    fn parses_page_count() {
        assert_eq!(BookPages::parse(" 412 ").unwrap(), BookPages::new(412));
    }

    #[test]
    fn rejects_invalid_page_count() {
        let error = BookPages::parse("").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Páginas: La cantidad de páginas no puede estar vacía"
        );
        assert_eq!(
            BookPages::parse("many").unwrap_err().violation(),
            &FieldViolation::NotInteger
        );
        assert_eq!(
            BookPages::parse("0").unwrap_err().violation(),
            &FieldViolation::NotPositive
        );
    }
}
