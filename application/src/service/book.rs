use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::transfer::{
    BookDto, Conflict, CreateBookOutcome, DeleteBookDto, GetBookDto, UpdateBookDto,
    UpdateBookOutcome,
};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;
        Ok(book.map(BookDto::from))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Inserts the book unless its id or ISBN is already taken.
    async fn create_book(
        &self,
        dto: BookDto,
    ) -> error_stack::Result<CreateBookOutcome, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let book = Book::from(dto);

        let id_taken = self
            .book_query()
            .find_by_id(&mut connection, book.id())
            .await?
            .is_some();
        if id_taken {
            let conflict = Conflict::Id(i64::from(*book.id()));
            return Ok(CreateBookOutcome::Conflict(conflict));
        }

        let isbn_taken = self
            .book_query()
            .find_by_isbn(&mut connection, book.isbn())
            .await?
            .is_some();
        if isbn_taken {
            let conflict = Conflict::Isbn(book.isbn().as_ref().to_string());
            return Ok(CreateBookOutcome::Conflict(conflict));
        }

        self.book_modifier().create(&mut connection, &book).await?;

        Ok(CreateBookOutcome::Created(i64::from(*book.id())))
    }
}

impl<T> CreateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier
{
    /// Replaces the record stored under `dto.id`. The new id and ISBN must not
    /// belong to any other record.
    async fn update_book(
        &self,
        dto: UpdateBookDto,
    ) -> error_stack::Result<UpdateBookOutcome, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let current = BookId::new(dto.id);

        let exists = self
            .book_query()
            .find_by_id(&mut connection, &current)
            .await?
            .is_some();
        if !exists {
            return Ok(UpdateBookOutcome::NotFound);
        }

        let book = Book::from(dto.book);
        if book.id() != &current {
            let id_taken = self
                .book_query()
                .find_by_id(&mut connection, book.id())
                .await?
                .is_some();
            if id_taken {
                let conflict = Conflict::Id(i64::from(*book.id()));
                return Ok(UpdateBookOutcome::Conflict(conflict));
            }
        }

        let isbn_owner = self
            .book_query()
            .find_by_isbn(&mut connection, book.isbn())
            .await?;
        if isbn_owner.is_some_and(|owner| owner.id() != &current) {
            let conflict = Conflict::Isbn(book.isbn().as_ref().to_string());
            return Ok(UpdateBookOutcome::Conflict(conflict));
        }

        self.book_modifier()
            .update(&mut connection, &current, &book)
            .await?;

        Ok(UpdateBookOutcome::Updated(i64::from(*book.id())))
    }
}

impl<T> UpdateBookService for T where T: DependOnBookQuery + DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookModifier {
    /// Returns whether a record was removed.
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<bool, KernelError> {
        let mut connection = self.database_connection().acquire().await?;
        let id = BookId::new(dto.id);
        self.book_modifier().delete(&mut connection, &id).await
    }
}

impl<T> DeleteBookService for T where T: DependOnBookModifier {}
