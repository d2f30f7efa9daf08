use application::transfer::{BookDto, CreateBookOutcome, UpdateBookOutcome};
use serde::Serialize;

use crate::controller::Exhaust;
use crate::request::BookForm;
use crate::status::StatusMessage;

pub const BOOK_NOT_FOUND: &str = "Libro no encontrado";

/// One row of the list view.
#[derive(Debug, Serialize)]
pub struct BookRow {
    id: i64,
    title: String,
    pages: i64,
    publisher: String,
    isbn: String,
    cost: String,
}

impl From<BookDto> for BookRow {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            pages: value.pages,
            publisher: value.publisher,
            isbn: value.isbn,
            cost: format!("{:.2}", value.cost),
        }
    }
}

/// What a mutating request ends in.
#[derive(Debug, Eq, PartialEq)]
pub enum Submission {
    /// Redirect to the list view with a success banner.
    Saved(StatusMessage),
    /// Render the form again with these errors.
    Rejected(Vec<StatusMessage>),
    /// The record does not exist; flash and redirect.
    Missing,
}

pub struct BookPresenter;

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Vec<BookRow>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        input.into_iter().map(BookRow::from).collect()
    }
}

impl Exhaust<Option<BookDto>> for BookPresenter {
    type To = Option<BookForm>;
    fn emit(&self, input: Option<BookDto>) -> Self::To {
        input.map(BookForm::from)
    }
}

impl Exhaust<CreateBookOutcome> for BookPresenter {
    type To = Submission;
    fn emit(&self, input: CreateBookOutcome) -> Self::To {
        match input {
            CreateBookOutcome::Created(_) => {
                Submission::Saved(StatusMessage::success("Libro agregado exitosamente"))
            }
            CreateBookOutcome::Conflict(conflict) => {
                Submission::Rejected(vec![StatusMessage::error(conflict.to_string())])
            }
        }
    }
}

impl Exhaust<UpdateBookOutcome> for BookPresenter {
    type To = Submission;
    fn emit(&self, input: UpdateBookOutcome) -> Self::To {
        match input {
            UpdateBookOutcome::Updated(_) => {
                Submission::Saved(StatusMessage::success("Libro actualizado exitosamente"))
            }
            UpdateBookOutcome::NotFound => Submission::Missing,
            UpdateBookOutcome::Conflict(conflict) => {
                Submission::Rejected(vec![StatusMessage::error(conflict.to_string())])
            }
        }
    }
}

impl Exhaust<bool> for BookPresenter {
    type To = Submission;
    fn emit(&self, deleted: bool) -> Self::To {
        if deleted {
            Submission::Saved(StatusMessage::success("Libro eliminado"))
        } else {
            Submission::Missing
        }
    }
}

#[cfg(test)]
mod test {
    use application::transfer::{Conflict, CreateBookOutcome, UpdateBookOutcome};

    use crate::controller::Exhaust;
    use crate::response::{BookPresenter, Submission};
    use crate::status::StatusMessage;

    #[test]
    fn conflicts_become_form_errors() {
        let submission = BookPresenter.emit(CreateBookOutcome::Conflict(Conflict::Id(1)));
        assert_eq!(
            submission,
            Submission::Rejected(vec![StatusMessage::error("Error: El ID 1 ya existe")])
        );

        let submission = BookPresenter.emit(UpdateBookOutcome::Conflict(Conflict::Isbn(
            "9780441013593".to_string(),
        )));
        assert_eq!(
            submission,
            Submission::Rejected(vec![StatusMessage::error(
                "Error: El ISBN 9780441013593 ya esta cargado"
            )])
        );
    }

    #[test]
    fn delete_reports_missing() {
        assert_eq!(BookPresenter.emit(false), Submission::Missing);
        assert_eq!(
            BookPresenter.emit(true),
            Submission::Saved(StatusMessage::success("Libro eliminado"))
        );
    }
}
