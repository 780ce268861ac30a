use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookAuthor, BookGenre, BookId, BookPublishedYear, BookTitle};
use crate::KernelError;

/// Exact-match lookups over stored books.
///
/// Sequence results keep the store's insertion order. An empty `Vec` or `None`
/// means nothing matched, never that the lookup failed.
#[async_trait::async_trait]
pub trait BookQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    /// First stored book carrying this title.
    async fn find_by_title(
        &self,
        con: &mut Self::Transaction,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError>;
    async fn find_by_author(
        &self,
        con: &mut Self::Transaction,
        author: &BookAuthor,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_genre(
        &self,
        con: &mut Self::Transaction,
        genre: &BookGenre,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
    async fn find_by_published_year(
        &self,
        con: &mut Self::Transaction,
        published_year: &BookPublishedYear,
    ) -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookQuery: BookQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_query(&self) -> &Self::BookQuery;
}
