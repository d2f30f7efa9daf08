use std::fmt::Display;

use kernel::prelude::entity::{
    Book, BookCost, BookId, BookPages, BookPublisher, BookTitle, DestructBook, Isbn,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub pages: i64,
    pub publisher: String,
    pub isbn: String,
    pub cost: f64,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            pages,
            publisher,
            isbn,
            cost,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            pages: pages.into(),
            publisher: publisher.into(),
            isbn: isbn.into(),
            cost: cost.into(),
        }
    }
}

impl From<BookDto> for Book {
    fn from(value: BookDto) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookPages::new(value.pages),
            BookPublisher::new(value.publisher),
            Isbn::new(value.isbn),
            BookCost::new(value.cost),
        )
    }
}

pub struct GetBookDto {
    pub id: i64,
}

pub struct UpdateBookDto {
    /// Id the record is currently stored under.
    pub id: i64,
    pub book: BookDto,
}

pub struct DeleteBookDto {
    pub id: i64,
}

/// A write that would break id or ISBN uniqueness.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Conflict {
    Id(i64),
    Isbn(String),
}

impl Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conflict::Id(id) => write!(f, "Error: El ID {id} ya existe"),
            Conflict::Isbn(isbn) => write!(f, "Error: El ISBN {isbn} ya esta cargado"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CreateBookOutcome {
    Created(i64),
    Conflict(Conflict),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum UpdateBookOutcome {
    Updated(i64),
    NotFound,
    Conflict(Conflict),
}
