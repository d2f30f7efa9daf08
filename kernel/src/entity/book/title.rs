use vodca::{AsRefln, Fromln};

use crate::entity::{Field, FieldError, FieldViolation};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookTitle(String);

impl BookTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let title = raw.trim();
        if title.is_empty() {
            return Err(FieldError::new(Field::Title, FieldViolation::Empty));
        }
        Ok(Self(title.to_string()))
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{BookTitle, FieldViolation};

    #[test]
    fn trims_title() {
        assert_eq!(BookTitle::parse("  Dune \n").unwrap(), BookTitle::new("Dune"));
    }

    #[test]
    fn rejects_blank_title() {
        let error = BookTitle::parse(" \t ").unwrap_err();
        assert_eq!(error.violation(), &FieldViolation::Empty);
        assert_eq!(error.to_string(), "Título: El título no puede estar vacio");
    }
}
