use serde::{Deserialize, Deserializer, Serialize};

/// One tracked product: where to look, how to carve the price out of the
/// page, and the lowest price seen so far.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub name: String,
    pub url: String,
    pub pattern: String,

    // Lowest price ever observed; absent until the first successful check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_price: Option<f64>,

    // Epoch seconds of the last update to last_price. Older files carry it
    // as a string, so accept both; written back as a number.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "epoch_seconds_opt"
    )]
    pub last_price_timestamp: Option<i64>,
}

impl Item {
    pub fn new(name: impl Into<String>, url: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            pattern: pattern.into(),
            last_price: None,
            last_price_timestamp: None,
        }
    }
}

fn epoch_seconds_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum EpochSeconds {
        Number(i64),
        Text(String),
    }

    match Option::<EpochSeconds>::deserialize(deserializer)? {
        None => Ok(None),
        Some(EpochSeconds::Number(secs)) => Ok(Some(secs)),
        Some(EpochSeconds::Text(raw)) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid epoch timestamp '{raw}'"))),
    }
}
