use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookCost, BookId, BookPages, BookPublisher, BookTitle, DestructBook, Isbn,
};
use kernel::KernelError;

use crate::database::mongo::MongoConnection;
use crate::error::ConvertError;

const BOOK_COLLECTION: &str = "libros";

pub struct MongoBookRepository;

#[async_trait::async_trait]
impl BookQuery for MongoBookRepository {
    type Connection = MongoConnection;

    async fn find_all(
        &self,
        con: &mut MongoConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        MongoBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut MongoConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        MongoBookInternal::find_by_id(con, id).await
    }

    async fn find_by_isbn(
        &self,
        con: &mut MongoConnection,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        MongoBookInternal::find_by_isbn(con, isbn).await
    }
}

#[async_trait::async_trait]
impl BookModifier for MongoBookRepository {
    type Connection = MongoConnection;

    async fn create(
        &self,
        con: &mut MongoConnection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        MongoBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut MongoConnection,
        id: &BookId,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        MongoBookInternal::update(con, id, book).await
    }

    async fn delete(
        &self,
        con: &mut MongoConnection,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        MongoBookInternal::delete(con, id).await
    }
}

/// Stored shape of a book. Field names match the existing `libros` collection;
/// the store's own `_id` is ignored.
#[derive(Debug, Serialize, Deserialize)]
struct BookDocument {
    id: i64,
    titulo: String,
    cantidad_paginas: i64,
    #[serde(default)]
    editorial: String,
    isbn: String,
    costo_usd: f64,
}

impl From<BookDocument> for Book {
    fn from(value: BookDocument) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.titulo),
            BookPages::new(value.cantidad_paginas),
            BookPublisher::new(value.editorial),
            Isbn::new(value.isbn),
            BookCost::new(value.costo_usd),
        )
    }
}

impl From<&Book> for BookDocument {
    fn from(value: &Book) -> Self {
        let DestructBook {
            id,
            title,
            pages,
            publisher,
            isbn,
            cost,
        } = value.clone().into_destruct();
        Self {
            id: id.into(),
            titulo: title.into(),
            cantidad_paginas: pages.into(),
            editorial: publisher.into(),
            isbn: isbn.into(),
            costo_usd: cost.into(),
        }
    }
}

/// Documents written with another shape (e.g. `id` stored as text) are skipped
/// so one stray record does not hide the whole collection.
fn decode(document: Document) -> Option<Book> {
    match mongodb::bson::from_document::<BookDocument>(document.clone()) {
        Ok(document) => Some(Book::from(document)),
        Err(error) => {
            tracing::warn!("Skipping undecodable book document {document}: {error}");
            None
        }
    }
}

pub(in crate::database) struct MongoBookInternal;

impl MongoBookInternal {
    fn books(con: &MongoConnection) -> Collection<BookDocument> {
        con.collection::<BookDocument>(BOOK_COLLECTION)
    }

    async fn find_all(con: &MongoConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let documents = Self::books(con)
            .clone_with_type::<Document>()
            .find(None, None)
            .await
            .convert_error()?
            .try_collect::<Vec<_>>()
            .await
            .convert_error()?;
        Ok(documents.into_iter().filter_map(decode).collect())
    }

    async fn find_by_id(
        con: &MongoConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let found = Self::books(con)
            .find_one(doc! { "id": *id.as_ref() }, None)
            .await
            .convert_error()?;
        Ok(found.map(Book::from))
    }

    async fn find_by_isbn(
        con: &MongoConnection,
        isbn: &Isbn,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let found = Self::books(con)
            .find_one(doc! { "isbn": isbn.as_ref().as_str() }, None)
            .await
            .convert_error()?;
        Ok(found.map(Book::from))
    }

    async fn create(con: &MongoConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let document = BookDocument::from(book);
        Self::books(con)
            .insert_one(&document, None)
            .await
            .convert_error()?;
        tracing::debug!("Inserted book {}", document.id);
        Ok(())
    }

    async fn update(
        con: &MongoConnection,
        id: &BookId,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        let document = BookDocument::from(book);
        let result = Self::books(con)
            .replace_one(doc! { "id": *id.as_ref() }, &document, None)
            .await
            .convert_error()?;
        tracing::debug!(
            "Replaced book {id} with {} (matched {})",
            document.id,
            result.matched_count
        );
        Ok(())
    }

    async fn delete(con: &MongoConnection, id: &BookId) -> error_stack::Result<bool, KernelError> {
        let result = Self::books(con)
            .delete_one(doc! { "id": *id.as_ref() }, None)
            .await
            .convert_error()?;
        tracing::debug!("Deleted {} book(s) with id {id}", result.deleted_count);
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookCost, BookId, BookPages, BookPublisher, BookTitle, Isbn,
    };
    use kernel::KernelError;
    use mongodb::bson::doc;
    use rand::Rng;

    use crate::database::mongo::book::{decode, MongoBookRepository};
    use crate::database::mongo::MongoDatabase;

    #[test]
    fn decode_skips_foreign_shapes() {
        let book = decode(doc! {
            "id": 7_i64,
            "titulo": "Dune",
            "cantidad_paginas": 412_i64,
            "isbn": "9780441013593",
            "costo_usd": 18.5,
        });
        assert_eq!(
            book.map(|book| book.publisher().clone()),
            Some(BookPublisher::new(""))
        );

        let legacy = decode(doc! {
            "id": "7",
            "titulo": "Dune",
            "cantidad_paginas": "412",
            "editorial": "Ace",
            "isbn": "9780441013593",
            "costo_usd": "18.5",
        });
        assert!(legacy.is_none());
    }

    #[test_with::env(MONGO_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = MongoDatabase::new().await?;
        let mut con = db.acquire().await?;
        let id = BookId::new(rand::thread_rng().gen_range(1_000_000..i64::MAX));

        let book = Book::new(
            id,
            BookTitle::new("test"),
            BookPages::new(100),
            BookPublisher::new(""),
            Isbn::new(format!("test-{id}")),
            BookCost::new(1.5),
        );
        MongoBookRepository.create(&mut con, &book).await?;

        let found = MongoBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));
        let found = MongoBookRepository
            .find_by_isbn(&mut con, book.isbn())
            .await?;
        assert_eq!(found, Some(book.clone()));

        let book = book.reconstruct(|b| b.title = BookTitle::new("test2"));
        MongoBookRepository.update(&mut con, &id, &book).await?;

        let found = MongoBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book));

        assert!(MongoBookRepository.delete(&mut con, &id).await?);
        assert!(!MongoBookRepository.delete(&mut con, &id).await?);
        let found = MongoBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        Ok(())
    }
}
