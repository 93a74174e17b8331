//! Text rendering of contexts for text-based strategies

use serde_json::Value;
use std::borrow::Cow;

/// A context that can be rendered as plain text
pub trait ContextText {
    fn as_text(&self) -> Cow<'_, str>;
}

impl ContextText for String {
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl ContextText for &str {
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// JSON strings render raw, anything else renders as compact JSON
impl ContextText for Value {
    fn as_text(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}
