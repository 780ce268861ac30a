use crate::controller::Exhaust;
use application::transfer::BookDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

const BOOK_ADDED: &str = "Book added successfully.";
const BOOK_UPDATED: &str = "Book data updated successfully.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    id: Uuid,
    title: String,
    author: String,
    published_year: i32,
    language: String,
    genre: Option<String>,
    rating: Option<f64>,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            published_year: value.published_year,
            language: value.language,
            genre: value.genre,
            rating: value.rating,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBookResponse {
    message: &'static str,
    book: BookResponse,
}

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedBookResponse {
    message: &'static str,
    updated_book: BookResponse,
}

impl IntoResponse for UpdatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

/// 200 answer for a lookup or update that matched nothing.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        CreatedBookResponse {
            message: BOOK_ADDED,
            book: BookResponse::from(input),
        }
    }
}

impl Exhaust<Option<BookDto>> for BookPresenter {
    type To = Option<BookResponse>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        input.map(BookResponse::from)
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Option<axum::Json<Vec<BookResponse>>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        if input.is_empty() {
            return None;
        }
        let result = input
            .into_iter()
            .map(BookResponse::from)
            .collect::<Vec<_>>();

        Some(axum::Json::from(result))
    }
}

pub struct BookUpdatePresenter;

impl Exhaust<Option<BookDto>> for BookUpdatePresenter {
    type To = Option<UpdatedBookResponse>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        input.map(|book| UpdatedBookResponse {
            message: BOOK_UPDATED,
            updated_book: BookResponse::from(book),
        })
    }
}
