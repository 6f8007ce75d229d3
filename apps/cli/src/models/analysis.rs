use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Structured critique returned by the backend in analysis mode.
/// Every key is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Nominal range 0 – 10. Numeric strings are accepted; anything else is dropped.
    #[serde(default, deserialize_with = "lenient_score")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analysis: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Suggestions,
}

/// The backend sends suggestions either as one block of text or as a list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suggestions {
    List(Vec<String>),
    Text(String),
}

impl Default for Suggestions {
    fn default() -> Self {
        Suggestions::Text(String::new())
    }
}

impl Suggestions {
    pub fn is_empty(&self) -> bool {
        match self {
            Suggestions::List(items) => items.is_empty(),
            Suggestions::Text(text) => text.is_empty(),
        }
    }
}

/// Regenerated résumé returned in adjust mode. Opaque to this crate.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustedDocument(Bytes);

impl AdjustedDocument {
    pub fn new(bytes: Bytes) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What a successful call to the analysis endpoint produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Analysis(AnalysisResult),
    Document(AdjustedDocument),
    /// Declared as JSON but not shaped like an analysis. The caller warns instead of failing.
    Unrecognized(Bytes),
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
