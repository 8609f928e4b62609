//! API response type definitions.
//!
//! The container endpoint is undocumented and its payloads are not
//! consistent between posts, so most fields are parsed leniently: a
//! malformed entry is dropped instead of failing the whole page.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Card type of posts that carry image attachments.
pub const MEDIA_CARD_TYPE: i64 = 9;

/// One page of the user's feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedPage {
    /// Application status, `1` on success.
    #[serde(default)]
    pub ok: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub data: Option<FeedData>,
}

impl FeedPage {
    /// Whether the API accepted the request.
    pub fn is_ok(&self) -> bool {
        self.ok == 1
    }

    /// Cards on this page, empty when the page carried no data.
    pub fn cards(&self) -> &[Card] {
        self.data.as_ref().map(|d| d.cards.as_slice()).unwrap_or(&[])
    }
}

/// Feed payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedData {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub cards: Vec<Card>,
}

/// A feed item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub card_type: i64,
    #[serde(default, deserialize_with = "lenient_option")]
    pub mblog: Option<Mblog>,
}

impl Card {
    /// Whether this card is a media post.
    pub fn is_media(&self) -> bool {
        self.card_type == MEDIA_CARD_TYPE
    }
}

/// Post body. Shares carry the original post in `retweeted_status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Mblog {
    #[serde(default)]
    pub pics: PictureContainer,
    #[serde(default, deserialize_with = "lenient_option")]
    pub retweeted_status: Option<Box<Mblog>>,
}

/// Picture attachments of a post.
///
/// The API sends either a JSON array or an object keyed by index for the
/// same list; both are resolved here so callers only see an ordered
/// sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PictureContainer {
    #[default]
    Absent,
    Sequence(Vec<Picture>),
    Keyed(Vec<(String, Picture)>),
}

impl PictureContainer {
    /// Build a container from an arbitrary JSON value.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => PictureContainer::Sequence(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            Value::Object(map) => {
                let mut entries: Vec<(String, Picture)> = map
                    .into_iter()
                    .filter_map(|(key, item)| {
                        serde_json::from_value(item).ok().map(|pic| (key, pic))
                    })
                    .collect();
                // Index-like keys first, numerically.
                entries.sort_by(|(a, _), (b, _)| {
                    match (a.parse::<u64>(), b.parse::<u64>()) {
                        (Ok(x), Ok(y)) => x.cmp(&y),
                        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                        (Err(_), Err(_)) => a.cmp(b),
                    }
                });
                PictureContainer::Keyed(entries)
            }
            _ => PictureContainer::Absent,
        }
    }

    /// Pictures in order, whatever the wire shape was.
    pub fn pictures(&self) -> Box<dyn Iterator<Item = &Picture> + '_> {
        match self {
            PictureContainer::Absent => Box::new(std::iter::empty()),
            PictureContainer::Sequence(pics) => Box::new(pics.iter()),
            PictureContainer::Keyed(entries) => Box::new(entries.iter().map(|(_, pic)| pic)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PictureContainer::Absent => 0,
            PictureContainer::Sequence(pics) => pics.len(),
            PictureContainer::Keyed(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'de> Deserialize<'de> for PictureContainer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(PictureContainer::from_value(value))
    }
}

/// One picture attachment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Picture {
    #[serde(default, deserialize_with = "lenient_option")]
    pub large: Option<Rendition>,
}

impl Picture {
    /// URL of the large rendition, if present.
    pub fn large_url(&self) -> Option<&str> {
        self.large.as_ref()?.url.as_deref()
    }
}

/// A sized rendition of a picture.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Rendition {
    #[serde(default)]
    pub url: Option<String>,
}

/// Profile lookup response.
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub ok: i64,
    #[serde(default, deserialize_with = "lenient_option")]
    pub data: Option<ProfileData>,
}

/// Profile payload.
#[derive(Debug, Deserialize)]
pub struct ProfileData {
    #[serde(rename = "userInfo")]
    pub user_info: Option<UserInfo>,
}

/// Account metadata shown before collecting.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: u64,
    pub screen_name: String,
    #[serde(default)]
    pub verified_reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub statuses_count: Option<Count>,
    #[serde(default)]
    pub follow_count: Option<Count>,
    #[serde(default)]
    pub followers_count: Option<Count>,
}

/// A counter the API sends either as a number or as a display string ("1.2万").
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Number(u64),
    Text(String),
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Number(n) => write!(f, "{}", n),
            Count::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parse a value, turning any shape mismatch into `None`.
fn lenient_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Parse a list, dropping the elements that don't fit `T`.
fn lenient_seq<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
