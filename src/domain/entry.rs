use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::app::Result;

/// One birthday record from the remote service.
///
/// Only `text` and the favourite flag are interpreted; every other field of
/// the payload is carried along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthEntry {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "isFavourite", default)]
    pub is_favourite: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BirthEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_favourite: false,
            extra: Map::new(),
        }
    }

    pub fn year(&self) -> Option<i64> {
        self.extra.get("year").and_then(Value::as_i64)
    }

    /// Desktop URL of the first linked page, if the payload has one.
    pub fn page_url(&self) -> Option<&str> {
        self.extra
            .get("pages")?
            .as_array()?
            .iter()
            .find_map(|page| page.pointer("/content_urls/desktop/page")?.as_str())
    }

    /// Case-insensitive substring match. `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
    }

    pub fn display_text(&self) -> String {
        match self.year() {
            Some(year) => format!("{:>5}  {}", year, self.text),
            None => self.text.clone(),
        }
    }
}

/// Body of a births-by-date response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BirthPayload {
    #[serde(
        default,
        deserialize_with = "lenient_births",
        skip_serializing_if = "Option::is_none"
    )]
    pub births: Option<Vec<BirthEntry>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BirthPayload {
    pub fn new(births: Vec<BirthEntry>) -> Self {
        Self {
            births: Some(births),
            extra: Map::new(),
        }
    }

    /// Decode a response body. Only a body that is not JSON is an error; a
    /// JSON document of the wrong shape decodes to a payload without births.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            tracing::debug!("Births response is not a JSON object");
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn has_births(&self) -> bool {
        self.births.is_some()
    }

    pub fn births(&self) -> &[BirthEntry] {
        self.births.as_deref().unwrap_or(&[])
    }
}

/// A `births` value that is not an array counts as absent, and entries that
/// do not decode are skipped.
fn lenient_births<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<BirthEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        tracing::debug!("Ignoring births field that is not an array");
        return Ok(None);
    };

    let births = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping malformed birth entry: {}", e);
                None
            }
        })
        .collect();
    Ok(Some(births))
}
