use application::transfer::{BookDto, DeleteBookDto, GetBookDto, UpdateBookDto};
use kernel::prelude::entity::{
    BookCost, BookId, BookPages, BookPublisher, BookTitle, FieldError, Isbn,
};
use serde::{Deserialize, Serialize};

use crate::controller::{Intake, TryIntake};

/// Raw add/edit form, kept as typed so it can be shown back to the user.
/// Missing fields arrive as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub cantidad_paginas: String,
    #[serde(default)]
    pub editorial: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub costo_usd: String,
}

impl From<BookDto> for BookForm {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id.to_string(),
            titulo: value.title,
            cantidad_paginas: value.pages.to_string(),
            editorial: value.publisher,
            isbn: value.isbn,
            costo_usd: value.cost.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct GetBookRequest {
    id: i64,
}

impl GetBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct UpdateBookRequest {
    id: i64,
    form: BookForm,
}

impl UpdateBookRequest {
    pub fn new(id: i64, form: BookForm) -> Self {
        Self { id, form }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

pub struct BookTransformer;

impl TryIntake<BookForm> for BookTransformer {
    type To = BookDto;
    type Error = Vec<FieldError>;

    /// Validates every field and reports all failures at once.
    fn emit(&self, input: BookForm) -> Result<Self::To, Self::Error> {
        let mut errors = Vec::new();
        let mut collect = |error: FieldError| errors.push(error);

        let id = BookId::parse(&input.id).map_err(&mut collect).ok();
        let title = BookTitle::parse(&input.titulo).map_err(&mut collect).ok();
        let pages = BookPages::parse(&input.cantidad_paginas)
            .map_err(&mut collect)
            .ok();
        let publisher = BookPublisher::parse(&input.editorial);
        let isbn = Isbn::parse(&input.isbn).map_err(&mut collect).ok();
        let cost = BookCost::parse(&input.costo_usd).map_err(&mut collect).ok();

        match (id, title, pages, isbn, cost) {
            (Some(id), Some(title), Some(pages), Some(isbn), Some(cost)) => Ok(BookDto {
                id: id.into(),
                title: title.into(),
                pages: pages.into(),
                publisher: publisher.into(),
                isbn: isbn.into(),
                cost: cost.into(),
            }),
            _ => Err(errors),
        }
    }
}

impl TryIntake<UpdateBookRequest> for BookTransformer {
    type To = UpdateBookDto;
    type Error = Vec<FieldError>;
    fn emit(&self, input: UpdateBookRequest) -> Result<Self::To, Self::Error> {
        let book = TryIntake::<BookForm>::emit(self, input.form)?;
        Ok(UpdateBookDto { id: input.id, book })
    }
}

impl Intake<GetBookRequest> for BookTransformer {
    type To = GetBookDto;
    fn emit(&self, input: GetBookRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteBookRequest> for BookTransformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteBookRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

#[cfg(test)]
mod test {
    use application::transfer::BookDto;

    use crate::controller::TryIntake;
    use crate::request::{BookForm, BookTransformer};

    fn dune() -> BookForm {
        BookForm {
            id: "1".to_string(),
            titulo: " Dune ".to_string(),
            cantidad_paginas: "412".to_string(),
            editorial: "Ace".to_string(),
            isbn: "978-0-441-01359-3".to_string(),
            costo_usd: "18.5".to_string(),
        }
    }

    #[test]
    fn valid_form_is_cleaned() {
        let dto = TryIntake::<BookForm>::emit(&BookTransformer, dune()).unwrap();
        assert_eq!(
            dto,
            BookDto {
                id: 1,
                title: "Dune".to_string(),
                pages: 412,
                publisher: "Ace".to_string(),
                isbn: "9780441013593".to_string(),
                cost: 18.5,
            }
        );
    }

    #[test]
    fn every_invalid_field_is_reported() {
        let form = BookForm {
            id: "0".to_string(),
            titulo: "".to_string(),
            cantidad_paginas: "doce".to_string(),
            editorial: "".to_string(),
            isbn: "978-0-441-01359-4".to_string(),
            costo_usd: "-1".to_string(),
        };
        let errors = TryIntake::<BookForm>::emit(&BookTransformer, form)
            .unwrap_err()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(
            errors,
            vec![
                "ID: El ID debe ser mayor a 0",
                "Título: El título no puede estar vacio",
                "Páginas: La cantidad de páginas debe ser un número entero",
                "ISBN: El ISBN no es válido (debe ser ISBN-10 o ISBN-13)",
                "Costo: El costo no puede ser negativo",
            ]
        );
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let form: BookForm = serde_urlencoded::from_str("id=3&titulo=Solaris").unwrap();
        let errors = TryIntake::<BookForm>::emit(&BookTransformer, form).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
