use crate::controller::TryIntake;
use crate::error::ErrorStatus;
use application::transfer::{
    BookPatchDto, CreateBookDto, GetBookByTitleDto, GetBooksByAuthorDto, GetBooksByGenreDto,
    GetBooksByPublishedYearDto, UpdateBookByIdDto, UpdateBookByTitleDto,
};
use serde::Deserialize;

const CREATE_FIELDS_REQUIRED: &str = "title, author, publishedYear and language are required.";
const TITLE_REQUIRED: &str = "title is required.";
const AUTHOR_REQUIRED: &str = "author is required.";
const GENRE_REQUIRED: &str = "genre is required.";
const YEAR_NOT_A_NUMBER: &str = "publishedYear must be Number.";
const YEAR_REQUIRED: &str = "publishedYear is required.";
const ID_AND_RATING_REQUIRED: &str = "bookId and rating is required.";
const TITLE_AND_RATING_REQUIRED: &str = "title & rating are required.";

// Empty strings count as missing.
fn filled(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

// Zero counts as missing, like an empty string.
fn nonzero_year(value: Option<i32>) -> Option<i32> {
    value.filter(|year| *year != 0)
}

fn nonzero_rating(value: Option<f64>) -> Option<f64> {
    value.filter(|rating| *rating != 0.0)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    title: Option<String>,
    author: Option<String>,
    published_year: Option<i32>,
    language: Option<String>,
    genre: Option<String>,
    rating: Option<f64>,
}

/// Body of both update routes. Every supplied field overwrites the stored one.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    title: Option<String>,
    author: Option<String>,
    published_year: Option<i32>,
    language: Option<String>,
    genre: Option<String>,
    rating: Option<f64>,
}

impl UpdateBookRequest {
    fn into_patch(self) -> Option<BookPatchDto> {
        let rating = nonzero_rating(self.rating)?;
        Some(BookPatchDto {
            title: filled(self.title),
            author: filled(self.author),
            published_year: self.published_year,
            language: filled(self.language),
            genre: filled(self.genre),
            rating: Some(rating),
        })
    }
}

#[derive(Debug)]
pub struct GetBookByTitleRequest {
    title: String,
}

impl GetBookByTitleRequest {
    pub fn new(title: String) -> Self {
        Self { title }
    }
}

#[derive(Debug)]
pub struct GetBooksByAuthorRequest {
    author: String,
}

impl GetBooksByAuthorRequest {
    pub fn new(author: String) -> Self {
        Self { author }
    }
}

#[derive(Debug)]
pub struct GetBooksByGenreRequest {
    genre: String,
}

impl GetBooksByGenreRequest {
    pub fn new(genre: String) -> Self {
        Self { genre }
    }
}

#[derive(Debug)]
pub struct GetBooksByPublishedYearRequest {
    year: String,
}

impl GetBooksByPublishedYearRequest {
    pub fn new(year: String) -> Self {
        Self { year }
    }

    fn parse(&self) -> Option<f64> {
        let year = self.year.trim();
        if year.is_empty() {
            return Some(0.0);
        }
        year.parse::<f64>().ok().filter(|year| year.is_finite())
    }

    /// The year as it reads once parsed, e.g. `01999` and `1999.0` both become `1999`.
    pub fn display_year(&self) -> String {
        match self.parse() {
            Some(year) => year.to_string(),
            None => self.year.trim().to_string(),
        }
    }
}

#[derive(Debug)]
pub struct UpdateBookByIdRequest {
    id: String,
    body: UpdateBookRequest,
}

impl UpdateBookByIdRequest {
    pub fn new(id: String, body: UpdateBookRequest) -> Self {
        Self { id, body }
    }
}

#[derive(Debug)]
pub struct UpdateBookByTitleRequest {
    title: String,
    body: UpdateBookRequest,
}

impl UpdateBookByTitleRequest {
    pub fn new(title: String, body: UpdateBookRequest) -> Self {
        Self { title, body }
    }
}

pub struct BookTransformer;

impl TryIntake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    type Error = ErrorStatus;
    fn emit(&self, input: CreateBookRequest) -> Result<Self::To, Self::Error> {
        match (
            filled(input.title),
            filled(input.author),
            nonzero_year(input.published_year),
            filled(input.language),
        ) {
            (Some(title), Some(author), Some(published_year), Some(language)) => {
                Ok(CreateBookDto {
                    title,
                    author,
                    published_year,
                    language,
                    genre: filled(input.genre),
                    rating: input.rating,
                })
            }
            _ => Err(ErrorStatus::bad_request(CREATE_FIELDS_REQUIRED)),
        }
    }
}

impl TryIntake<GetBookByTitleRequest> for BookTransformer {
    type To = GetBookByTitleDto;
    type Error = ErrorStatus;
    fn emit(&self, input: GetBookByTitleRequest) -> Result<Self::To, Self::Error> {
        let title =
            filled(Some(input.title)).ok_or_else(|| ErrorStatus::bad_request(TITLE_REQUIRED))?;
        Ok(GetBookByTitleDto { title })
    }
}

impl TryIntake<GetBooksByAuthorRequest> for BookTransformer {
    type To = GetBooksByAuthorDto;
    type Error = ErrorStatus;
    fn emit(&self, input: GetBooksByAuthorRequest) -> Result<Self::To, Self::Error> {
        let author =
            filled(Some(input.author)).ok_or_else(|| ErrorStatus::bad_request(AUTHOR_REQUIRED))?;
        Ok(GetBooksByAuthorDto { author })
    }
}

impl TryIntake<GetBooksByGenreRequest> for BookTransformer {
    type To = GetBooksByGenreDto;
    type Error = ErrorStatus;
    fn emit(&self, input: GetBooksByGenreRequest) -> Result<Self::To, Self::Error> {
        let genre =
            filled(Some(input.genre)).ok_or_else(|| ErrorStatus::bad_request(GENRE_REQUIRED))?;
        Ok(GetBooksByGenreDto { genre })
    }
}

impl TryIntake<GetBooksByPublishedYearRequest> for BookTransformer {
    type To = GetBooksByPublishedYearDto;
    type Error = ErrorStatus;
    fn emit(&self, input: GetBooksByPublishedYearRequest) -> Result<Self::To, Self::Error> {
        let published_year = input
            .parse()
            .ok_or_else(|| ErrorStatus::bad_request(YEAR_NOT_A_NUMBER))?;
        if published_year == 0.0 {
            return Err(ErrorStatus::bad_request(YEAR_REQUIRED));
        }
        Ok(GetBooksByPublishedYearDto { published_year })
    }
}

impl TryIntake<UpdateBookByIdRequest> for BookTransformer {
    type To = UpdateBookByIdDto;
    type Error = ErrorStatus;
    fn emit(&self, input: UpdateBookByIdRequest) -> Result<Self::To, Self::Error> {
        match (filled(Some(input.id)), input.body.into_patch()) {
            (Some(id), Some(patch)) => Ok(UpdateBookByIdDto { id, patch }),
            _ => Err(ErrorStatus::bad_request(ID_AND_RATING_REQUIRED)),
        }
    }
}

impl TryIntake<UpdateBookByTitleRequest> for BookTransformer {
    type To = UpdateBookByTitleDto;
    type Error = ErrorStatus;
    fn emit(&self, input: UpdateBookByTitleRequest) -> Result<Self::To, Self::Error> {
        match (filled(Some(input.title)), input.body.into_patch()) {
            (Some(title), Some(patch)) => Ok(UpdateBookByTitleDto { title, patch }),
            _ => Err(ErrorStatus::bad_request(TITLE_AND_RATING_REQUIRED)),
        }
    }
}
