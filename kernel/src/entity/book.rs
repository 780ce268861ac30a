mod author;
mod genre;
mod id;
mod language;
mod patch;
mod published_year;
mod rating;
mod title;

pub use self::{
    author::*, genre::*, id::*, language::*, patch::*, published_year::*, rating::*, title::*,
};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    published_year: BookPublishedYear,
    language: BookLanguage,
    genre: Option<BookGenre>,
    rating: Option<BookRating>,
}

impl Book {
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        published_year: BookPublishedYear,
        language: BookLanguage,
        genre: Option<BookGenre>,
        rating: Option<BookRating>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            published_year,
            language,
            genre,
            rating,
        }
    }

    /// Overwrites every field the patch supplies. The id never changes.
    pub fn apply(&mut self, patch: BookPatch) {
        self.substitute(|book| {
            let BookPatch {
                title,
                author,
                published_year,
                language,
                genre,
                rating,
            } = patch;
            if let Some(title) = title {
                *book.title = title;
            }
            if let Some(author) = author {
                *book.author = author;
            }
            if let Some(published_year) = published_year {
                *book.published_year = published_year;
            }
            if let Some(language) = language {
                *book.language = language;
            }
            if let Some(genre) = genre {
                *book.genre = Some(genre);
            }
            if let Some(rating) = rating {
                *book.rating = Some(rating);
            }
        })
    }
}
