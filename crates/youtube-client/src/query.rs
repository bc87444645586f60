//! Query-string construction for generated endpoint methods
//!
//! Generated methods collect their parameters as ordered `(key, value)`
//! pairs, with `None` for parameters the caller left unset, and append the
//! result of [`to_query`] to the endpoint URL. Array-valued parameters are
//! flattened into repeated or comma-joined form by the generated layer
//! before reaching this builder.

use std::fmt;

/// A query parameter value: the string-or-number union accepted by
/// generated parameter structs.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(v) => f.write_str(v),
            QueryValue::Int(v) => write!(f, "{v}"),
            QueryValue::UInt(v) => write!(f, "{v}"),
            QueryValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Str(v.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Str(v)
    }
}

impl From<i32> for QueryValue {
    fn from(v: i32) -> Self {
        QueryValue::Int(i64::from(v))
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::Int(v)
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        QueryValue::UInt(u64::from(v))
    }
}

impl From<u64> for QueryValue {
    fn from(v: u64) -> Self {
        QueryValue::UInt(v)
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        QueryValue::Float(v)
    }
}

/// Build a `?key=value&key=value...` query suffix from ordered parameter
/// pairs.
///
/// `None` values are dropped entirely (key absent from the output, not
/// empty-valued). Kept values are stringified, then percent-encoded as
/// standard `application/x-www-form-urlencoded` pairs in input order.
/// Returns the empty string when nothing survives, otherwise the suffix
/// including the leading `?`. Repeated keys are emitted as given, no
/// de-duplication.
pub fn to_query<'a, I, V>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<V>)>,
    V: Into<QueryValue>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if let Some(value) = value {
            serializer.append_pair(key, &value.into().to_string());
            any = true;
        }
    }

    if !any {
        return String::new();
    }
    format!("?{}", serializer.finish())
}
