use axum::response::Html;
use error_stack::{Report, ResultExt};
use kernel::KernelError;
use minijinja::{context, Environment};

use crate::request::BookForm;
use crate::response::BookRow;
use crate::status::StatusMessage;

const TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("form.html", include_str!("../templates/form.html")),
];

/// Server-rendered pages. Templates are compiled into the binary.
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|error| Report::new(error).change_context(KernelError::Internal))
                .attach_printable_lazy(|| format!("Failed to load template {name}"))?;
        }
        Ok(Self { env })
    }

    pub fn index(
        &self,
        books: &[BookRow],
        messages: &[StatusMessage],
    ) -> error_stack::Result<Html<String>, KernelError> {
        self.render("index.html", context! { books, messages })
    }

    pub fn add_form(
        &self,
        values: &BookForm,
        messages: &[StatusMessage],
    ) -> error_stack::Result<Html<String>, KernelError> {
        self.render(
            "form.html",
            context! {
                heading => "Agregar libro",
                values,
                messages,
            },
        )
    }

    /// Form for the record stored under `id`; `values` may hold a rejected edit.
    pub fn edit_form(
        &self,
        id: i64,
        values: &BookForm,
        messages: &[StatusMessage],
    ) -> error_stack::Result<Html<String>, KernelError> {
        self.render(
            "form.html",
            context! {
                heading => "Editar libro",
                book_id => id,
                values,
                messages,
            },
        )
    }

    fn render(
        &self,
        name: &str,
        ctx: minijinja::Value,
    ) -> error_stack::Result<Html<String>, KernelError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map(Html)
            .map_err(|error| Report::new(error).change_context(KernelError::Internal))
            .attach_printable_lazy(|| format!("Failed to render {name}"))
    }
}

#[cfg(test)]
mod test {
    use application::transfer::BookDto;

    use crate::request::BookForm;
    use crate::response::BookRow;
    use crate::status::StatusMessage;
    use crate::view::Views;

    fn dune() -> BookDto {
        BookDto {
            id: 1,
            title: "Dune".to_string(),
            pages: 412,
            publisher: "Ace".to_string(),
            isbn: "9780441013593".to_string(),
            cost: 18.5,
        }
    }

    #[test]
    fn index_lists_books_and_messages() {
        let views = Views::new().unwrap();
        let html = views
            .index(
                &[BookRow::from(dune())],
                &[StatusMessage::success("Libro agregado exitosamente")],
            )
            .unwrap()
            .0;
        assert!(html.contains("<td>Dune</td>"));
        assert!(html.contains("<td>18.50</td>"));
        assert!(html.contains("href=\"/editar/1\""));
        assert!(html.contains("alert-success"));
        assert!(html.contains("Libro agregado exitosamente"));
    }

    #[test]
    fn empty_index() {
        let html = Views::new().unwrap().index(&[], &[]).unwrap().0;
        assert!(html.contains("No hay libros cargados."));
    }

    #[test]
    fn form_keeps_values_escaped() {
        let values = BookForm {
            titulo: "<b>Dune</b>".to_string(),
            isbn: "978-0".to_string(),
            ..BookForm::default()
        };
        let html = Views::new()
            .unwrap()
            .add_form(&values, &[StatusMessage::error("ISBN: inválido")])
            .unwrap()
            .0;
        assert!(html.contains("value=\"&lt;b&gt;Dune"));
        assert!(!html.contains("<b>Dune"));
        assert!(html.contains("value=\"978-0\""));
        assert!(html.contains("alert-error"));
        assert!(html.contains("action=\"/agregar\""));
    }

    #[test]
    fn edit_form_posts_to_current_id() {
        let html = Views::new()
            .unwrap()
            .edit_form(3, &BookForm::from(dune()), &[])
            .unwrap()
            .0;
        assert!(html.contains("action=\"/editar/3\""));
        assert!(html.contains("value=\"412\""));
    }
}
