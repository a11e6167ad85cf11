use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads an optional field; a value of the wrong shape counts as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Body of `GET /api/status`. Only `documents` is used for display.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub documents: Option<Value>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub uptime: Option<String>,
}

impl StatusReport {
    /// Number of indexed documents; anything absent or unreadable counts as 0.
    pub fn document_count(&self) -> u64 {
        match &self.documents {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Body of `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration_ms: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub results: Option<Vec<SearchHit>>,
}

impl SearchResponse {
    pub fn into_hits(self) -> Vec<SearchHit> {
        self.results.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub path: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub doc_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub indexed: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub relevance_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub snippets: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub download_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub view_url: Option<String>,
}

/// Successful upload answer. The body is kept verbatim and not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub status: u16,
    pub body: String,
}
