mod cost;
mod id;
mod isbn;
mod pages;
mod publisher;
mod title;
mod violation;

pub use self::{
    cost::*, id::*, isbn::*, pages::*, publisher::*, title::*, violation::*,
};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    pages: BookPages,
    publisher: BookPublisher,
    isbn: Isbn,
    cost: BookCost,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        pages: BookPages,
        publisher: BookPublisher,
        isbn: Isbn,
        cost: BookCost,
    ) -> Self {
        Self {
            id,
            title,
            pages,
            publisher,
            isbn,
            cost,
        }
    }
}
