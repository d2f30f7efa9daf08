use crate::database::{DatabaseConnection, DependOnDatabaseConnection};
use crate::entity::{Book, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Connection: Send;
    async fn create(
        &self,
        con: &mut Self::Connection,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    /// Replaces the record currently stored under `id`; the book may carry a new id.
    async fn update(
        &self,
        con: &mut Self::Connection,
        id: &BookId,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;
    /// Returns whether a record was removed.
    async fn delete(
        &self,
        con: &mut Self::Connection,
        id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Connection = <Self::DatabaseConnection as DatabaseConnection>::Connection,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
