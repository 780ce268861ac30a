use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookGenre, BookId, BookPatch, BookPublishedYear, BookTitle,
};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryBookRepository;

impl InMemoryBookRepository {
    async fn filter<F>(con: &InMemoryTransaction, predicate: F) -> Vec<Book>
    where
        F: Fn(&Book) -> bool,
    {
        con.books
            .read()
            .await
            .iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }

    async fn update_first<F>(
        con: &InMemoryTransaction,
        predicate: F,
        patch: BookPatch,
    ) -> Option<Book>
    where
        F: Fn(&Book) -> bool,
    {
        let mut books = con.books.write().await;
        let book = books.iter_mut().find(|book| predicate(book))?;
        book.apply(patch);
        Some(book.clone())
    }
}

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.books.read().await.clone())
    }

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(Self::filter(con, |book| book.id() == id).await.into_iter().next())
    }

    async fn find_by_title(
        &self,
        con: &mut InMemoryTransaction,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(Self::filter(con, |book| book.title() == title)
            .await
            .into_iter()
            .next())
    }

    async fn find_by_author(
        &self,
        con: &mut InMemoryTransaction,
        author: &BookAuthor,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(Self::filter(con, |book| book.author() == author).await)
    }

    async fn find_by_genre(
        &self,
        con: &mut InMemoryTransaction,
        genre: &BookGenre,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(Self::filter(con, |book| book.genre().as_ref() == Some(genre)).await)
    }

    async fn find_by_published_year(
        &self,
        con: &mut InMemoryTransaction,
        published_year: &BookPublishedYear,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(Self::filter(con, |book| book.published_year() == published_year).await)
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: Book,
    ) -> error_stack::Result<Book, KernelError> {
        con.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn update_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(Self::update_first(con, |book| book.id() == id, patch).await)
    }

    async fn update_by_title(
        &self,
        con: &mut InMemoryTransaction,
        title: &BookTitle,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(Self::update_first(con, |book| book.title() == title, patch).await)
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookGenre, BookId, BookLanguage, BookPatch, BookPublishedYear,
        BookRating, BookTitle,
    };
    use kernel::KernelError;

    use crate::database::memory::book::InMemoryBookRepository;
    use crate::database::memory::InMemoryDatabase;

    fn book(title: &str, author: &str, published_year: i32, genre: Option<&str>) -> Book {
        Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title),
            BookAuthor::new(author),
            BookPublishedYear::new(published_year),
            BookLanguage::new("English"),
            genre.map(BookGenre::new),
            None,
        )
    }

    fn rating(rating: f64) -> BookPatch {
        BookPatch::new(None, None, None, None, None, Some(BookRating::new(rating)))
    }

    #[tokio::test]
    async fn lookups_match_exactly() -> error_stack::Result<(), KernelError> {
        let hobbit = book("The Hobbit", "J. R. R. Tolkien", 1937, Some("Fantasy"));
        let silmarillion = book("The Silmarillion", "J. R. R. Tolkien", 1977, Some("Fantasy"));
        let walden = book("Walden", "Henry David Thoreau", 1854, None);
        let db = InMemoryDatabase::with_books(vec![
            hobbit.clone(),
            silmarillion.clone(),
            walden.clone(),
        ]);
        let mut con = db.transact().await?;

        let all = InMemoryBookRepository.find_all(&mut con).await?;
        assert_eq!(all.len(), 3);

        let found = InMemoryBookRepository
            .find_by_id(&mut con, walden.id())
            .await?;
        assert_eq!(found, Some(walden.clone()));

        let found = InMemoryBookRepository
            .find_by_title(&mut con, &BookTitle::new("the hobbit"))
            .await?;
        assert!(found.is_none());

        let found = InMemoryBookRepository
            .find_by_author(&mut con, &BookAuthor::new("J. R. R. Tolkien"))
            .await?;
        assert_eq!(found, vec![hobbit.clone(), silmarillion.clone()]);

        let found = InMemoryBookRepository
            .find_by_genre(&mut con, &BookGenre::new("Fantasy"))
            .await?;
        assert_eq!(found, vec![hobbit, silmarillion]);

        let found = InMemoryBookRepository
            .find_by_published_year(&mut con, &BookPublishedYear::new(1854))
            .await?;
        assert_eq!(found, vec![walden]);

        Ok(())
    }

    #[tokio::test]
    async fn updates_are_visible_through_clones() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let shared = db.clone();
        let mut con = db.transact().await?;

        let created = InMemoryBookRepository
            .create(&mut con, book("Beloved", "Toni Morrison", 1987, None))
            .await?;
        let updated = InMemoryBookRepository
            .update_by_id(&mut con, created.id(), rating(5.0))
            .await?;
        assert_eq!(
            updated.as_ref().map(|book| book.rating()),
            Some(&Some(BookRating::new(5.0)))
        );

        let mut other = shared.transact().await?;
        let found = InMemoryBookRepository
            .find_by_title(&mut other, &BookTitle::new("Beloved"))
            .await?;
        assert_eq!(found, updated);

        let missing = InMemoryBookRepository
            .update_by_title(
                &mut other,
                &BookTitle::new("Jazz"),
                rating(1.0),
            )
            .await?;
        assert!(missing.is_none());

        Ok(())
    }
}
