use application::service::{
    CreateBookService, DeleteBookService, GetBookService, UpdateBookService,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use axum_extra::extract::cookie::SignedCookieJar;
use error_stack::Report;
use kernel::KernelError;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Connected, DATABASE_UNAVAILABLE};
use crate::request::{
    BookForm, BookTransformer, DeleteBookRequest, GetBookRequest, UpdateBookRequest,
};
use crate::response::{BookPresenter, Submission, BOOK_NOT_FOUND};
use crate::status::{push_flash, take_flash, StatusMessage, StatusQuery};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route("/", get(index))
            .route("/agregar", get(add_form).post(add))
            .route("/editar/:id", get(edit_form).post(edit))
            .route("/eliminar/:id", get(delete))
    }
}

async fn index(
    State(module): State<AppModule>,
    Query(query): Query<StatusQuery>,
    jar: SignedCookieJar,
) -> Result<Response, ErrorStatus> {
    let (jar, mut messages) = take_flash(jar);
    let Some(handler) = module.handler() else {
        return Ok((StatusCode::SERVICE_UNAVAILABLE, jar, DATABASE_UNAVAILABLE).into_response());
    };
    let books = Controller::new((), BookPresenter)
        .bypass(|| handler.get_all_books())
        .await?;
    messages.extend(query.into_message());
    let html = module.views().index(&books, &messages)?;
    Ok((jar, html).into_response())
}

async fn add_form(
    _: Connected,
    State(module): State<AppModule>,
) -> Result<Html<String>, ErrorStatus> {
    Ok(module.views().add_form(&BookForm::default(), &[])?)
}

async fn add(
    Connected(handler): Connected,
    State(module): State<AppModule>,
    jar: SignedCookieJar,
    Form(form): Form<BookForm>,
) -> Result<Response, ErrorStatus> {
    let submission = match Controller::new(BookTransformer, BookPresenter).try_intake(form.clone())
    {
        Ok(transformed) => transformed
            .handle(|dto| handler.create_book(dto))
            .await
            .unwrap_or_else(|report| store_failure("guardar", report)),
        Err(errors) => Submission::Rejected(
            errors
                .iter()
                .map(|error| StatusMessage::error(error.to_string()))
                .collect(),
        ),
    };
    finish(submission, jar, |messages| {
        module.views().add_form(&form, messages)
    })
}

async fn edit_form(
    Connected(handler): Connected,
    State(module): State<AppModule>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> Result<Response, ErrorStatus> {
    let Ok(id) = id.parse::<i64>() else {
        return Ok(not_found(jar));
    };
    let values = Controller::new(BookTransformer, BookPresenter)
        .intake(GetBookRequest::new(id))
        .handle(|dto| handler.get_book(dto))
        .await?;
    match values {
        Some(values) => Ok(module.views().edit_form(id, &values, &[])?.into_response()),
        None => Ok(not_found(jar)),
    }
}

async fn edit(
    Connected(handler): Connected,
    State(module): State<AppModule>,
    jar: SignedCookieJar,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> Result<Response, ErrorStatus> {
    let Ok(id) = id.parse::<i64>() else {
        return Ok(not_found(jar));
    };
    let current = Controller::new(BookTransformer, BookPresenter)
        .intake(GetBookRequest::new(id))
        .handle(|dto| handler.get_book(dto))
        .await?;
    if current.is_none() {
        return Ok(not_found(jar));
    }

    let request = UpdateBookRequest::new(id, form.clone());
    let submission = match Controller::new(BookTransformer, BookPresenter).try_intake(request) {
        Ok(transformed) => transformed
            .handle(|dto| handler.update_book(dto))
            .await
            .unwrap_or_else(|report| store_failure("actualizar", report)),
        Err(errors) => Submission::Rejected(
            errors
                .iter()
                .map(|error| StatusMessage::error(error.to_string()))
                .collect(),
        ),
    };
    finish(submission, jar, |messages| {
        module.views().edit_form(id, &form, messages)
    })
}

async fn delete(
    Connected(handler): Connected,
    jar: SignedCookieJar,
    Path(id): Path<String>,
) -> Result<Response, ErrorStatus> {
    let Ok(id) = id.parse::<i64>() else {
        return Ok(not_found(jar));
    };
    let submission = Controller::new(BookTransformer, BookPresenter)
        .intake(DeleteBookRequest::new(id))
        .handle(|dto| handler.delete_book(dto))
        .await?;
    match submission {
        Submission::Saved(message) => Ok(Redirect::to(&message.index_location()).into_response()),
        Submission::Rejected(_) | Submission::Missing => Ok(not_found(jar)),
    }
}

/// Redirects after a successful write, so a refresh never resubmits the form.
fn finish<F>(
    submission: Submission,
    jar: SignedCookieJar,
    render: F,
) -> Result<Response, ErrorStatus>
where
    F: FnOnce(&[StatusMessage]) -> error_stack::Result<Html<String>, KernelError>,
{
    match submission {
        Submission::Saved(message) => Ok(Redirect::to(&message.index_location()).into_response()),
        Submission::Rejected(messages) => Ok(render(&messages)?.into_response()),
        Submission::Missing => Ok(not_found(jar)),
    }
}

fn not_found(jar: SignedCookieJar) -> Response {
    let jar = push_flash(jar, StatusMessage::error(BOOK_NOT_FOUND));
    (jar, Redirect::to("/")).into_response()
}

fn store_failure(action: &str, report: Report<KernelError>) -> Submission {
    tracing::error!("Book write failed ({action}): {report:?}");
    let message = format!("Error al {action}: {}", report.current_context());
    Submission::Rejected(vec![StatusMessage::error(message)])
}
