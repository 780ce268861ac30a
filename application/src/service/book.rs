use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{
    Book, BookAuthor, BookGenre, BookId, BookLanguage, BookPublishedYear, BookRating, BookTitle,
};
use kernel::KernelError;

use crate::transfer::{
    BookDto, CreateBookDto, GetBookByTitleDto, GetBooksByAuthorDto, GetBooksByGenreDto,
    GetBooksByPublishedYearDto, UpdateBookByIdDto, UpdateBookByTitleDto,
};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_book_by_title(
        &self,
        dto: GetBookByTitleDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let title = BookTitle::new(dto.title);
        let book = self
            .book_query()
            .find_by_title(&mut connection, &title)
            .await?;
        Ok(book.map(BookDto::from))
    }

    async fn get_books_by_author(
        &self,
        dto: GetBooksByAuthorDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let author = BookAuthor::new(dto.author);
        let books = self
            .book_query()
            .find_by_author(&mut connection, &author)
            .await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_books_by_genre(
        &self,
        dto: GetBooksByGenreDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let genre = BookGenre::new(dto.genre);
        let books = self
            .book_query()
            .find_by_genre(&mut connection, &genre)
            .await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    async fn get_books_by_published_year(
        &self,
        dto: GetBooksByPublishedYearDto,
    ) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let Some(published_year) = as_year(dto.published_year) else {
            tracing::debug!("{} can not be a stored year", dto.published_year);
            return Ok(Vec::new());
        };
        let mut connection = self.database_connection().transact().await?;
        let books = self
            .book_query()
            .find_by_published_year(&mut connection, &published_year)
            .await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

fn as_year(value: f64) -> Option<BookPublishedYear> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    if value.is_finite() && value.fract() == 0.0 && in_range {
        Some(BookPublishedYear::new(value as i32))
    } else {
        None
    }
}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookPublishedYear::new(dto.published_year),
            BookLanguage::new(dto.language),
            dto.genre.map(BookGenre::new),
            dto.rating.map(BookRating::new),
        );
        let created = self
            .book_modifier()
            .create(&mut connection, book)
            .await?;
        connection.commit().await?;

        Ok(BookDto::from(created))
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait UpdateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn update_book_by_id(
        &self,
        dto: UpdateBookByIdDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        // A malformed id names no stored book.
        let Ok(id) = Uuid::parse_str(&dto.id) else {
            tracing::debug!("{} is not a book id", dto.id);
            return Ok(None);
        };
        let mut connection = self.database_connection().transact().await?;
        let updated = self
            .book_modifier()
            .update_by_id(&mut connection, &BookId::new(id), dto.patch.into())
            .await?;
        connection.commit().await?;
        Ok(updated.map(BookDto::from))
    }

    async fn update_book_by_title(
        &self,
        dto: UpdateBookByTitleDto,
    ) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let title = BookTitle::new(dto.title);
        let updated = self
            .book_modifier()
            .update_by_title(&mut connection, &title, dto.patch.into())
            .await?;
        connection.commit().await?;
        Ok(updated.map(BookDto::from))
    }
}

impl<T> UpdateBookService for T where T: DependOnBookModifier {}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::{CreateBookService, GetBookService, UpdateBookService};
    use crate::transfer::{
        BookPatchDto, CreateBookDto, GetBookByTitleDto, GetBooksByAuthorDto,
        GetBooksByPublishedYearDto, UpdateBookByIdDto, UpdateBookByTitleDto,
    };

    fn create_dto(title: &str, author: &str, published_year: i32) -> CreateBookDto {
        CreateBookDto {
            title: title.to_string(),
            author: author.to_string(),
            published_year,
            language: "English".to_string(),
            genre: None,
            rating: None,
        }
    }

    #[tokio::test]
    async fn create_then_read_back() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let created = db.create_book(create_dto("Emma", "Jane Austen", 1815)).await?;
        assert_eq!(created.title, "Emma");
        assert_eq!(created.published_year, 1815);

        let found = db
            .get_book_by_title(GetBookByTitleDto {
                title: "Emma".to_string(),
            })
            .await?;
        assert_eq!(found, Some(created.clone()));

        let all = db.get_all_books().await?;
        assert_eq!(all, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn author_lookup_is_exact() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        db.create_book(create_dto("Emma", "Jane Austen", 1815)).await?;
        db.create_book(create_dto("Persuasion", "Jane Austen", 1817)).await?;
        db.create_book(create_dto("Ulysses", "James Joyce", 1922)).await?;

        let books = db
            .get_books_by_author(GetBooksByAuthorDto {
                author: "Jane Austen".to_string(),
            })
            .await?;
        let titles = books.iter().map(|b| b.title.as_str()).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Emma", "Persuasion"]);

        let books = db
            .get_books_by_author(GetBooksByAuthorDto {
                author: "jane austen".to_string(),
            })
            .await?;
        assert!(books.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn fractional_year_matches_nothing() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        db.create_book(create_dto("Emma", "Jane Austen", 1815)).await?;

        let books = db
            .get_books_by_published_year(GetBooksByPublishedYearDto {
                published_year: 1815.5,
            })
            .await?;
        assert!(books.is_empty());

        let books = db
            .get_books_by_published_year(GetBooksByPublishedYearDto {
                published_year: 1815.0,
            })
            .await?;
        assert_eq!(books.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_by_malformed_id_finds_nothing() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        db.create_book(create_dto("Emma", "Jane Austen", 1815)).await?;

        let updated = db
            .update_book_by_id(UpdateBookByIdDto {
                id: "not-an-id".to_string(),
                patch: BookPatchDto {
                    rating: Some(5.0),
                    ..BookPatchDto::default()
                },
            })
            .await?;
        assert!(updated.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_by_id_overwrites_supplied_fields() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let created = db.create_book(create_dto("Emma", "Jane Austen", 1815)).await?;

        let updated = db
            .update_book_by_id(UpdateBookByIdDto {
                id: created.id.to_string(),
                patch: BookPatchDto {
                    genre: Some("Romance".to_string()),
                    rating: Some(4.0),
                    ..BookPatchDto::default()
                },
            })
            .await?
            .expect("book should exist");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.rating, Some(4.0));
        assert_eq!(updated.genre.as_deref(), Some("Romance"));
        assert_eq!(updated.title, created.title);
        Ok(())
    }

    #[tokio::test]
    async fn update_by_title_touches_first_match_only() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let first = db.create_book(create_dto("Poems", "Emily Dickinson", 1890)).await?;
        let second = db.create_book(create_dto("Poems", "Walt Whitman", 1855)).await?;

        let updated = db
            .update_book_by_title(UpdateBookByTitleDto {
                title: "Poems".to_string(),
                patch: BookPatchDto {
                    rating: Some(2.5),
                    ..BookPatchDto::default()
                },
            })
            .await?
            .expect("book should exist");
        assert_eq!(updated.id, first.id);

        let all = db.get_all_books().await?;
        let untouched = all.iter().find(|b| b.id == second.id).expect("second book");
        assert_eq!(untouched.rating, None);
        Ok(())
    }
}
