use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize};
use std::borrow::Cow;

/// Collects messages reported against a single field.
pub struct MessageBuilder(Vec<Cow<'static, str>>);

impl MessageBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, message: impl Into<Cow<'static, str>>) {
        self.0.push(message.into());
    }

    #[must_use]
    pub fn build(self) -> ValidateError {
        ValidateError::Messages(self.0)
    }
}

/// Collects errors keyed by field name. Fields that ended up
/// without any error are dropped on insertion.
pub struct FieldBuilder(IndexMap<Cow<'static, str>, ValidateError>);

#[allow(clippy::new_without_default)]
impl FieldBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::default())
    }

    pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: ValidateError) {
        if !value.is_empty() {
            self.0.insert(key.into(), value);
        }
    }

    /// Shorthand for a field with exactly one message.
    pub fn insert_msg(
        &mut self,
        key: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        let mut msg = MessageBuilder::new();
        msg.insert(message);
        self.insert(key, msg.build());
    }

    #[must_use]
    pub fn build(self) -> ValidateError {
        ValidateError::Fields(self.0)
    }
}

// ---------------------------------------------------- //

/// Field-level description of why some untrusted input got rejected.
///
/// Serialized as nested maps, where leaves carry their messages
/// under `_errors`:
///
/// ```json
/// { "name": { "_errors": ["Boat name is required"] } }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum ValidateError {
    Fields(IndexMap<Cow<'static, str>, ValidateError>),
    Messages(Vec<Cow<'static, str>>),
}

impl std::fmt::Display for ValidateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Invalid data occurred")
    }
}

impl std::error::Error for ValidateError {}

impl std::fmt::Debug for ValidateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidateError::Fields(n) => n.fmt(f),
            ValidateError::Messages(n) => f.debug_map().entry(&"_errors", &n).finish(),
        }
    }
}

impl ValidateError {
    #[must_use]
    pub fn field_builder() -> FieldBuilder {
        FieldBuilder::new()
    }

    #[must_use]
    pub fn msg_builder() -> MessageBuilder {
        MessageBuilder::new()
    }

    /// A single field with a single message.
    #[must_use]
    pub fn field(
        key: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut fields = Self::field_builder();
        fields.insert_msg(key, message);
        fields.build()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ValidateError::Fields(n) => n.is_empty(),
            ValidateError::Messages(n) => n.is_empty(),
        }
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Flattens the tree into `path: message` lines, mostly for logs
    /// and error reports.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        fn walk<'a>(err: &'a ValidateError, path: &mut Vec<&'a str>, out: &mut Vec<String>) {
            match err {
                ValidateError::Fields(fields) => {
                    for (field, data) in fields {
                        path.push(field);
                        walk(data, path, out);
                        path.pop();
                    }
                }
                ValidateError::Messages(messages) => {
                    let path = path.join(".");
                    for message in messages {
                        out.push(format!("{path}: {message}"));
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut Vec::new(), &mut out);
        out
    }

    /// Messages recorded for a top-level field, if any.
    #[must_use]
    pub fn messages_of(&self, field: &str) -> Option<&[Cow<'static, str>]> {
        match self {
            ValidateError::Fields(fields) => match fields.get(field)? {
                ValidateError::Messages(messages) => Some(messages),
                ValidateError::Fields(..) => None,
            },
            ValidateError::Messages(..) => None,
        }
    }
}

impl Serialize for ValidateError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ValidateError::Fields(n) => {
                let mut map = serializer.serialize_map(Some(n.len()))?;
                for (key, value) in n {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            ValidateError::Messages(n) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("_errors", &n)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;

    fn sample() -> ValidateError {
        let mut fields = ValidateError::field_builder();
        fields.insert_msg("name", "Boat name is required");
        fields.insert("description", ValidateError::msg_builder().build());
        fields.insert_msg("type", "Boat type is required");
        fields.build()
    }

    #[test]
    fn test_debug_fmt() {
        const EXPECTED: &str =
            r#"{"name": {"_errors": ["Boat name is required"]}, "type": {"_errors": ["Boat type is required"]}}"#;
        assert_eq!(EXPECTED, format!("{:?}", sample()));
    }

    #[test]
    fn test_serde_impl() {
        serde_test::assert_ser_tokens(
            &sample(),
            &[
                Token::Map { len: Some(2) },
                Token::Str("name"),
                Token::Map { len: Some(1) },
                Token::Str("_errors"),
                Token::Seq { len: Some(1) },
                Token::Str("Boat name is required"),
                Token::SeqEnd,
                Token::MapEnd,
                Token::Str("type"),
                Token::Map { len: Some(1) },
                Token::Str("_errors"),
                Token::Seq { len: Some(1) },
                Token::Str("Boat type is required"),
                Token::SeqEnd,
                Token::MapEnd,
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(MessageBuilder::new().build().is_empty());
        assert!(FieldBuilder::new().build().is_empty());
        assert!(FieldBuilder::new().build().into_result().is_ok());
        assert!(!sample().is_empty());
    }

    #[test]
    fn test_flatten_and_lookup() {
        let error = sample();
        assert_eq!(
            error.flatten(),
            vec![
                "name: Boat name is required".to_string(),
                "type: Boat type is required".to_string(),
            ]
        );
        assert_eq!(
            error.messages_of("type").map(<[_]>::len),
            Some(1)
        );
        assert!(error.messages_of("description").is_none());
    }
}
