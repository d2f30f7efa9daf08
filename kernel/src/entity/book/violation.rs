use std::fmt::Display;

use vodca::References;

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    Id,
    Title,
    Pages,
    Publisher,
    Isbn,
    Cost,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Id => "ID",
            Field::Title => "Título",
            Field::Pages => "Páginas",
            Field::Publisher => "Editorial",
            Field::Isbn => "ISBN",
            Field::Cost => "Costo",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FieldViolation {
    Empty,
    NotInteger,
    NotPositive,
    NotNumber,
    Negative,
    IsbnCharacters,
    IsbnChecksum,
}

#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct FieldError {
    field: Field,
    violation: FieldViolation,
}

impl FieldError {
    pub fn new(field: Field, violation: FieldViolation) -> Self {
        Self { field, violation }
    }

    pub fn message(&self) -> &'static str {
        use FieldViolation::{Empty, IsbnCharacters, Negative, NotPositive};
        match (self.field, self.violation) {
            (Field::Id, Empty) => "El ID no puede estar vacío",
            (Field::Id, NotPositive) => "El ID debe ser mayor a 0",
            (Field::Id, _) => "El ID debe ser un número entero",
            (Field::Title, _) => "El título no puede estar vacio",
            (Field::Pages, Empty) => "La cantidad de páginas no puede estar vacía",
            (Field::Pages, NotPositive) => "La cantidad de páginas debe ser mayor a 0",
            (Field::Pages, _) => "La cantidad de páginas debe ser un número entero",
            (Field::Publisher, _) => "La editorial no es válida",
            (Field::Isbn, Empty) => "El ISBN no puede estar vacio",
            (Field::Isbn, IsbnCharacters) => {
                "El ISBN solo puede contener números y la letra X (en ISBN-10)"
            }
            (Field::Isbn, _) => "El ISBN no es válido (debe ser ISBN-10 o ISBN-13)",
            (Field::Cost, Empty) => "El costo no puede estar vacío",
            (Field::Cost, Negative) => "El costo no puede ser negativo",
            (Field::Cost, _) => "El costo debe ser un número válido (ej: 29.99)",
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message())
    }
}

impl std::error::Error for FieldError {}
