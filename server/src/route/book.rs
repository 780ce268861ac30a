use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    BookTransformer, CreateBookRequest, GetBookByTitleRequest, GetBooksByAuthorRequest,
    GetBooksByGenreRequest, GetBooksByPublishedYearRequest, UpdateBookByIdRequest,
    UpdateBookByTitleRequest, UpdateBookRequest,
};
use crate::response::{BookPresenter, BookResponse, BookUpdatePresenter, MessageResponse};
use application::service::{CreateBookService, GetBookService, UpdateBookService};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use error_stack::Report;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::KernelError;

const FAILED_TO_ADD_BOOK: &str = "Failed to add book.";
const FAILED_TO_GET_BOOKS_DATA: &str = "Failed to get books data.";
const FAILED_TO_GET_BOOK: &str = "Failed to get book.";
const FAILED_TO_GET_BOOKS: &str = "Failed to get books.";
const FAILED_TO_UPDATE_BOOK: &str = "Failed to update book.";

// Existing clients read an empty catalogue as a failure.
fn no_books_stored() -> ErrorStatus {
    ErrorStatus::internal(FAILED_TO_GET_BOOKS_DATA)(
        Report::new(KernelError::Internal).attach_printable("No book is stored"),
    )
}

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<Db> BookRouter for Router<AppModule<Db>>
where
    Db: DependOnBookQuery + DependOnBookModifier,
{
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule<Db>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| module.database().get_all_books())
                    .await
                    .map_err(ErrorStatus::internal(FAILED_TO_GET_BOOKS_DATA))?
                    .ok_or_else(no_books_stored)
            })
            .post(
                |State(module): State<AppModule<Db>>,
                 WithRejection(Json(req), _): WithRejection<
                    Json<CreateBookRequest>,
                    ErrorStatus,
                >| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::internal(FAILED_TO_ADD_BOOK))
                },
            ),
        )
        .route(
            "/books/:title",
            get(
                |State(module): State<AppModule<Db>>, Path(title): Path<String>| async move {
                    let not_found = format!("No book for title: {title}");
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(GetBookByTitleRequest::new(title))?
                        .handle(|dto| async move { module.database().get_book_by_title(dto).await })
                        .await
                        .map_err(ErrorStatus::internal(FAILED_TO_GET_BOOK))
                        .map(|res| {
                            res.map(BookResponse::into_response)
                                .unwrap_or_else(|| MessageResponse::new(not_found).into_response())
                        })
                },
            ),
        )
        .route(
            "/books/authors/:authorName",
            get(
                |State(module): State<AppModule<Db>>, Path(author): Path<String>| async move {
                    let not_found = format!("No books found for author: {author}");
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(GetBooksByAuthorRequest::new(author))?
                        .handle(|dto| async move {
                            module.database().get_books_by_author(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::internal(FAILED_TO_GET_BOOKS))
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| MessageResponse::new(not_found).into_response())
                        })
                },
            ),
        )
        .route(
            "/books/genres/:genre",
            get(
                |State(module): State<AppModule<Db>>, Path(genre): Path<String>| async move {
                    let not_found = format!("No books found for genre: {genre}");
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(GetBooksByGenreRequest::new(genre))?
                        .handle(|dto| async move {
                            module.database().get_books_by_genre(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::internal(FAILED_TO_GET_BOOKS))
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| MessageResponse::new(not_found).into_response())
                        })
                },
            ),
        )
        .route(
            "/books/publishedYear/:year",
            get(
                |State(module): State<AppModule<Db>>, Path(year): Path<String>| async move {
                    let request = GetBooksByPublishedYearRequest::new(year);
                    let not_found = format!(
                        "No books found published in year: {}",
                        request.display_year()
                    );
                    Controller::new(BookTransformer, BookPresenter)
                        .try_intake(request)?
                        .handle(|dto| async move {
                            module.database().get_books_by_published_year(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::internal(FAILED_TO_GET_BOOKS))
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| MessageResponse::new(not_found).into_response())
                        })
                },
            ),
        )
        .route(
            "/books/rating/id/:bookId",
            post(
                |State(module): State<AppModule<Db>>,
                 Path(id): Path<String>,
                 WithRejection(Json(req), _): WithRejection<
                    Json<UpdateBookRequest>,
                    ErrorStatus,
                >| async move {
                    let not_found = format!("No book found for the Id: {id}");
                    Controller::new(BookTransformer, BookUpdatePresenter)
                        .try_intake(UpdateBookByIdRequest::new(id, req))?
                        .handle(|dto| async move { module.database().update_book_by_id(dto).await })
                        .await
                        .map_err(ErrorStatus::internal(FAILED_TO_UPDATE_BOOK))
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| MessageResponse::new(not_found).into_response())
                        })
                },
            ),
        )
        .route(
            "/books/rating/title/:bookTitle",
            post(
                |State(module): State<AppModule<Db>>,
                 Path(title): Path<String>,
                 WithRejection(Json(req), _): WithRejection<
                    Json<UpdateBookRequest>,
                    ErrorStatus,
                >| async move {
                    let not_found = format!("No book found with the title: {title}");
                    Controller::new(BookTransformer, BookUpdatePresenter)
                        .try_intake(UpdateBookByTitleRequest::new(title, req))?
                        .handle(|dto| async move {
                            module.database().update_book_by_title(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::internal(FAILED_TO_UPDATE_BOOK))
                        .map(|res| {
                            res.map(IntoResponse::into_response)
                                .unwrap_or_else(|| MessageResponse::new(not_found).into_response())
                        })
                },
            ),
        )
    }
}
