use std::str::FromStr;

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Error,
    Success,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Error => "error",
            StatusKind::Success => "success",
        }
    }
}

impl FromStr for StatusKind {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(StatusKind::Error),
            "success" => Ok(StatusKind::Success),
            _ => Err(()),
        }
    }
}

/// One banner line shown above a page.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    kind: StatusKind,
    text: String,
}

impl StatusMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    /// Location of the list view carrying this message as `alerta`/`mensaje`.
    pub fn index_location(&self) -> String {
        let query = StatusQuery {
            alerta: self.kind.as_str().to_string(),
            mensaje: self.text.clone(),
        };
        match serde_urlencoded::to_string(&query) {
            Ok(query) => format!("/?{query}"),
            Err(_) => "/".to_string(),
        }
    }
}

/// Query parameters the list view accepts after a redirect.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    alerta: String,
    #[serde(default)]
    mensaje: String,
}

impl StatusQuery {
    pub fn into_message(self) -> Option<StatusMessage> {
        let kind = self.alerta.parse::<StatusKind>().ok()?;
        if self.mensaje.is_empty() {
            return None;
        }
        Some(StatusMessage {
            kind,
            text: self.mensaje,
        })
    }
}

/// Queues `message` for the next rendered list view.
pub fn push_flash(jar: SignedCookieJar, message: StatusMessage) -> SignedCookieJar {
    let mut pending = read_flash(&jar);
    pending.push(message);
    match serde_json::to_string(&pending) {
        Ok(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        Err(error) => {
            tracing::warn!("Dropping flash message: {error}");
            jar
        }
    }
}

/// Drains pending flash messages.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Vec<StatusMessage>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let messages = read_flash(&jar);
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}

fn read_flash(jar: &SignedCookieJar) -> Vec<StatusMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use axum_extra::extract::cookie::{Key, SignedCookieJar};

    use crate::status::{push_flash, take_flash, StatusKind, StatusMessage, StatusQuery};

    #[test]
    fn index_location_is_url_encoded() {
        let location = StatusMessage::success("Libro agregado exitosamente").index_location();
        assert_eq!(
            location,
            "/?alerta=success&mensaje=Libro+agregado+exitosamente"
        );
    }

    #[test]
    fn query_needs_known_kind_and_text() {
        let query = StatusQuery {
            alerta: "success".to_string(),
            mensaje: "Libro eliminado".to_string(),
        };
        assert_eq!(
            query.into_message(),
            Some(StatusMessage::success("Libro eliminado"))
        );

        let query = StatusQuery {
            alerta: "warning".to_string(),
            mensaje: "?".to_string(),
        };
        assert_eq!(query.into_message(), None);
        assert_eq!(StatusQuery::default().into_message(), None);
        assert_eq!("error".parse::<StatusKind>(), Ok(StatusKind::Error));
    }

    #[test]
    fn flash_is_read_once() {
        let jar = SignedCookieJar::new(Key::generate());
        let jar = push_flash(jar, StatusMessage::error("Libro no encontrado"));
        let jar = push_flash(jar, StatusMessage::error("otra"));

        let (jar, messages) = take_flash(jar);
        assert_eq!(
            messages,
            vec![
                StatusMessage::error("Libro no encontrado"),
                StatusMessage::error("otra")
            ]
        );

        let (_, messages) = take_flash(jar);
        assert!(messages.is_empty());
    }
}
