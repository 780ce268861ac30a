use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAuthor, BookGenre, BookId, BookLanguage, BookPatch, BookPublishedYear, BookRating,
    BookTitle,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn find_all(
        &self,
        con: &mut PostgresConnection,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn find_by_title(
        &self,
        con: &mut PostgresConnection,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_title(con, title).await
    }

    async fn find_by_author(
        &self,
        con: &mut PostgresConnection,
        author: &BookAuthor,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_author(con, author).await
    }

    async fn find_by_genre(
        &self,
        con: &mut PostgresConnection,
        genre: &BookGenre,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_genre(con, genre).await
    }

    async fn find_by_published_year(
        &self,
        con: &mut PostgresConnection,
        published_year: &BookPublishedYear,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_by_published_year(con, published_year).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        book: Book,
    ) -> error_stack::Result<Book, KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update_by_id(
        &self,
        con: &mut PostgresConnection,
        id: &BookId,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::update_by_id(con, id, patch).await
    }

    async fn update_by_title(
        &self,
        con: &mut PostgresConnection,
        title: &BookTitle,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::update_by_title(con, title, patch).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    published_year: i32,
    language: String,
    genre: Option<String>,
    rating: Option<f64>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookPublishedYear::new(value.published_year),
            BookLanguage::new(value.language),
            value.genre.map(BookGenre::new),
            value.rating.map(BookRating::new),
        )
    }
}

struct PatchRow {
    title: Option<String>,
    author: Option<String>,
    published_year: Option<i32>,
    language: Option<String>,
    genre: Option<String>,
    rating: Option<f64>,
}

impl From<BookPatch> for PatchRow {
    fn from(value: BookPatch) -> Self {
        Self {
            title: value.title().clone().map(String::from),
            author: value.author().clone().map(String::from),
            published_year: value.published_year().map(i32::from),
            language: value.language().clone().map(String::from),
            genre: value.genre().clone().map(String::from),
            rating: value.rating().map(f64::from),
        }
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    pub(in crate::database) async fn prepare(
        con: &mut PgConnection,
    ) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id             UUID PRIMARY KEY,
                title          TEXT NOT NULL,
                author         TEXT NOT NULL,
                published_year INTEGER NOT NULL,
                language       TEXT NOT NULL,
                genre          TEXT,
                rating         DOUBLE PRECISION,
                seq            BIGSERIAL NOT NULL
            )
            "#,
        )
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    #[tracing::instrument(skip(con))]
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, published_year, language, genre, rating
            FROM books
            ORDER BY seq
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, published_year, language, genre, rating
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_title(
        con: &mut PgConnection,
        title: &BookTitle,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, published_year, language, genre, rating
            FROM books
            WHERE title = $1
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(title.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_author(
        con: &mut PgConnection,
        author: &BookAuthor,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, published_year, language, genre, rating
            FROM books
            WHERE author = $1
            ORDER BY seq
            "#,
        )
        .bind(author.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_genre(
        con: &mut PgConnection,
        genre: &BookGenre,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, published_year, language, genre, rating
            FROM books
            WHERE genre = $1
            ORDER BY seq
            "#,
        )
        .bind(genre.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn find_by_published_year(
        con: &mut PgConnection,
        published_year: &BookPublishedYear,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, published_year, language, genre, rating
            FROM books
            WHERE published_year = $1
            ORDER BY seq
            "#,
        )
        .bind(published_year.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    #[tracing::instrument(skip(con))]
    async fn create(con: &mut PgConnection, book: Book) -> error_stack::Result<Book, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, author, published_year, language, genre, rating)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, author, published_year, language, genre, rating
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.published_year().as_ref())
        .bind(book.language().as_ref())
        .bind(book.genre().clone().map(String::from))
        .bind(book.rating().map(f64::from))
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(Book::from(row))
    }

    #[tracing::instrument(skip(con))]
    async fn update_by_id(
        con: &mut PgConnection,
        id: &BookId,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let patch = PatchRow::from(patch);
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                published_year = COALESCE($4, published_year),
                language = COALESCE($5, language),
                genre = COALESCE($6, genre),
                rating = COALESCE($7, rating)
            WHERE id = $1
            RETURNING id, title, author, published_year, language, genre, rating
            "#,
        )
        .bind(id.as_ref())
        .bind(patch.title)
        .bind(patch.author)
        .bind(patch.published_year)
        .bind(patch.language)
        .bind(patch.genre)
        .bind(patch.rating)
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    #[tracing::instrument(skip(con))]
    async fn update_by_title(
        con: &mut PgConnection,
        title: &BookTitle,
        patch: BookPatch,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let patch = PatchRow::from(patch);
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                published_year = COALESCE($4, published_year),
                language = COALESCE($5, language),
                genre = COALESCE($6, genre),
                rating = COALESCE($7, rating)
            WHERE id = (SELECT id FROM books WHERE title = $1 ORDER BY seq LIMIT 1)
            RETURNING id, title, author, published_year, language, genre, rating
            "#,
        )
        .bind(title.as_ref())
        .bind(patch.title)
        .bind(patch.author)
        .bind(patch.published_year)
        .bind(patch.language)
        .bind(patch.genre)
        .bind(patch.rating)
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
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

    use crate::database::postgres::book::PostgresBookRepository;
    use crate::database::postgres::PostgresDatabase;

    fn book(title: &str, author: &str) -> Book {
        Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title),
            BookAuthor::new(author),
            BookPublishedYear::new(1951),
            BookLanguage::new("English"),
            Some(BookGenre::new("Fiction")),
            None,
        )
    }

    fn rating(rating: f64) -> BookPatch {
        BookPatch::new(None, None, None, None, None, Some(BookRating::new(rating)))
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn create_find_update() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        // Unique values keep reruns against the same database independent.
        let title = format!("The Catcher in the Rye {}", Uuid::new_v4());
        let author = format!("J. D. Salinger {}", Uuid::new_v4());
        let book = book(&title, &author);

        let created = PostgresBookRepository.create(&mut con, book.clone()).await?;
        assert_eq!(created, book);

        let found = PostgresBookRepository
            .find_by_id(&mut con, book.id())
            .await?;
        assert_eq!(found, Some(book.clone()));

        let found = PostgresBookRepository
            .find_by_title(&mut con, book.title())
            .await?;
        assert_eq!(found, Some(book.clone()));

        let found = PostgresBookRepository
            .find_by_author(&mut con, book.author())
            .await?;
        assert_eq!(found, vec![book.clone()]);

        let updated = PostgresBookRepository
            .update_by_id(&mut con, book.id(), rating(4.0))
            .await?
            .expect("book was just created");
        assert_eq!(updated.rating(), &Some(BookRating::new(4.0)));
        assert_eq!(updated.title(), book.title());

        let updated = PostgresBookRepository
            .update_by_title(&mut con, book.title(), rating(2.0))
            .await?
            .expect("book was just created");
        assert_eq!(updated.rating(), &Some(BookRating::new(2.0)));

        let missing = PostgresBookRepository
            .update_by_id(
                &mut con,
                &BookId::new(Uuid::new_v4()),
                rating(1.0),
            )
            .await?;
        assert!(missing.is_none());

        Ok(())
    }
}
