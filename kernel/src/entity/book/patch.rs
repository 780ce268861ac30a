use vodca::References;

use crate::entity::{BookAuthor, BookGenre, BookLanguage, BookPublishedYear, BookRating, BookTitle};

/// Fields to overwrite on a stored [`Book`](crate::entity::Book).
///
/// `None` leaves the stored value untouched. There is no way to clear an optional
/// field through a patch.
#[derive(Debug, Clone, Default, PartialEq, References)]
pub struct BookPatch {
    pub(super) title: Option<BookTitle>,
    pub(super) author: Option<BookAuthor>,
    pub(super) published_year: Option<BookPublishedYear>,
    pub(super) language: Option<BookLanguage>,
    pub(super) genre: Option<BookGenre>,
    pub(super) rating: Option<BookRating>,
}

impl BookPatch {
    pub fn new(
        title: Option<BookTitle>,
        author: Option<BookAuthor>,
        published_year: Option<BookPublishedYear>,
        language: Option<BookLanguage>,
        genre: Option<BookGenre>,
        rating: Option<BookRating>,
    ) -> Self {
        Self {
            title,
            author,
            published_year,
            language,
            genre,
            rating,
        }
    }
}
