use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookId, BookPatch, BookTitle};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        book: Book,
    ) -> error_stack::Result<Book, KernelError>;
    /// Returns the record as it is after the update, or `None` when no book has `id`.
    async fn update_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    /// Updates the first stored book carrying `title`.
    async fn update_by_title(
        &self,
        con: &mut Self::Transaction,
        title: &BookTitle,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
