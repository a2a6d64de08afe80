use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Error;

/// The key which identifies a row, as supplied by the data provider.
///
/// Scalar keys are sent to the router as a single `id` parameter, while
/// composite keys (e.g. a primary key spanning several columns) are sent as
/// they are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKey {
    Scalar(String),
    Composite(IndexMap<String, String>),
}

impl RowKey {
    pub fn composite<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = (K, V)>,
    {
        RowKey::Composite(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }

    /// The parameters which identify this row in a URL.
    pub fn params(&self) -> Vec<(String, String)> {
        match self {
            RowKey::Scalar(id) => vec![("id".to_string(), id.clone())],
            RowKey::Composite(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKey::Scalar(id) => f.write_str(id),
            RowKey::Composite(map) => {
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{k}={v}")?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! scalar_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RowKey {
                fn from(value: $t) -> Self {
                    RowKey::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from!(i32, i64, u32, u64, usize, &str, String);

/// Whole floats are written without a fraction, so that `1.0` and `1`
/// address the same row.
fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f)
            if !n.is_i64()
                && !n.is_u64()
                && f.fract() == 0.0
                && f.abs() < 1e15 =>
        {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_to_string(n)),
        // `true` is "1" and `false` is empty
        Value::Bool(b) => Some(if *b { "1" } else { "" }.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl TryFrom<Value> for RowKey {
    type Error = Error;

    /// Keys coming from JSON-shaped data providers. Objects become composite
    /// keys, but only if every value is itself a scalar.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if let Some(id) = scalar_to_string(&value) {
            return Ok(RowKey::Scalar(id));
        }

        match &value {
            Value::Object(map) => {
                let mut params = IndexMap::with_capacity(map.len());
                for (name, part) in map {
                    let part = scalar_to_string(part).ok_or_else(|| {
                        Error::InvalidArgument(format!(
                            "component `{name}` of row key {value} is not a \
                             scalar"
                        ))
                    })?;
                    params.insert(name.clone(), part);
                }
                Ok(RowKey::Composite(params))
            }
            _ => Err(Error::InvalidArgument(format!(
                "row key {value} is neither a scalar nor a mapping"
            ))),
        }
    }
}
