use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookPublisher(String);

impl BookPublisher {
    pub fn new(publisher: impl Into<String>) -> Self {
        Self(publisher.into())
    }

    /// Publisher is optional, so trimming is the only cleanup.
    pub fn parse(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }
}
