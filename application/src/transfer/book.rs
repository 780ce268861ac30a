use uuid::Uuid;

use kernel::prelude::entity::{
    Book, BookAuthor, BookGenre, BookLanguage, BookPatch, BookPublishedYear, BookRating,
    BookTitle, DestructBook,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub language: String,
    pub genre: Option<String>,
    pub rating: Option<f64>,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            published_year,
            language,
            genre,
            rating,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            published_year: published_year.into(),
            language: language.into(),
            genre: genre.map(String::from),
            rating: rating.map(f64::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub language: String,
    pub genre: Option<String>,
    pub rating: Option<f64>,
}

pub struct GetBookByTitleDto {
    pub title: String,
}

pub struct GetBooksByAuthorDto {
    pub author: String,
}

pub struct GetBooksByGenreDto {
    pub genre: String,
}

// Kept as the parsed number so a fractional year can be told apart from a bad one.
pub struct GetBooksByPublishedYearDto {
    pub published_year: f64,
}

#[derive(Debug, Clone, Default)]
pub struct BookPatchDto {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_year: Option<i32>,
    pub language: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<f64>,
}

impl From<BookPatchDto> for BookPatch {
    fn from(value: BookPatchDto) -> Self {
        BookPatch::new(
            value.title.map(BookTitle::new),
            value.author.map(BookAuthor::new),
            value.published_year.map(BookPublishedYear::new),
            value.language.map(BookLanguage::new),
            value.genre.map(BookGenre::new),
            value.rating.map(BookRating::new),
        )
    }
}

pub struct UpdateBookByIdDto {
    pub id: String,
    pub patch: BookPatchDto,
}

pub struct UpdateBookByTitleDto {
    pub title: String,
    pub patch: BookPatchDto,
}
