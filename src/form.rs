//! Collection of submitted form fields into an immutable [`FormAnswers`] snapshot.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Error;

/// Keys with this suffix belong to checkbox groups and keep every submitted value.
pub const MULTI_VALUE_SUFFIX: &str = "_type";

#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    Single(String),
    Multi(Vec<String>),
}

impl Answer {
    /// Display text for the answer; `None` when nothing meaningful was submitted.
    pub fn text(&self) -> Option<String> {
        match self {
            Answer::Single(s) => {
                if s.trim().is_empty() {
                    None
                } else {
                    Some(s.clone())
                }
            }
            Answer::Multi(values) => {
                let joined = values.join(", ");
                if joined.trim().is_empty() {
                    None
                } else {
                    Some(joined)
                }
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FormAnswers {
    fields: HashMap<String, Answer>,
}

/// Shape of an answers file: either submission-ordered pairs or a plain object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswers {
    Pairs(Vec<(String, serde_json::Value)>),
    Object(serde_json::Map<String, serde_json::Value>),
}

fn value_strings(key: &str, value: serde_json::Value) -> Result<Vec<String>, Error> {
    use serde_json::Value;
    let scalar = |v: Value| -> Result<Option<String>, Error> {
        match v {
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            Value::Null => Ok(None),
            other => Err(Error::InvalidAnswer {
                key: key.to_string(),
                reason: format!("expected a string, got {other}"),
            }),
        }
    };
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if let Some(s) = scalar(item)? {
                    out.push(s);
                }
            }
            Ok(out)
        }
        other => Ok(scalar(other)?.into_iter().collect()),
    }
}

impl FormAnswers {
    /// Collect `(key, value)` pairs in submission order. Multi-value keys
    /// accumulate; every other key keeps its last value.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut answers = FormAnswers::default();
        for (key, value) in pairs {
            answers.push(key.into(), value.into());
        }
        answers
    }

    fn push(&mut self, key: String, value: String) {
        if key.ends_with(MULTI_VALUE_SUFFIX) {
            match self.fields.entry(key).or_insert_with(|| Answer::Multi(Vec::new())) {
                Answer::Multi(values) => values.push(value),
                single => *single = Answer::Multi(vec![value]),
            }
        } else {
            self.fields.insert(key, Answer::Single(value));
        }
    }

    /// Parse a JSON answers document, either `[["key", "value"], ...]` or
    /// `{"key": "value" | ["a", "b"]}`.
    ///
    /// Both shapes follow the same rules: an array on a plain key replaces
    /// that key with every listed value, an array on a multi-value key
    /// appends to it, and a scalar behaves like a single submitted field.
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        let raw: RawAnswers = serde_json::from_str(input)?;
        let entries: Vec<(String, serde_json::Value)> = match raw {
            RawAnswers::Pairs(entries) => entries,
            RawAnswers::Object(map) => map.into_iter().collect(),
        };

        let mut answers = FormAnswers::default();
        for (key, value) in entries {
            if value.is_array() && !key.ends_with(MULTI_VALUE_SUFFIX) {
                let values = value_strings(&key, value)?;
                answers.fields.insert(key, Answer::Multi(values));
            } else {
                for v in value_strings(&key, value)? {
                    answers.push(key.clone(), v);
                }
            }
        }
        log::debug!("Collected {} form fields", answers.fields.len());
        Ok(answers)
    }

    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.fields.get(key)
    }

    /// Answer text for `key`, treating empty values as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(Answer::text)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
