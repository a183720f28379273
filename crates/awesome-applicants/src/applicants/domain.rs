use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Database-assigned key of an applicant row (`SERIAL`, so 32-bit).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ApplicantId(pub i32);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApplicantId {
    type Err = InvalidApplicantId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse::<i32>()
            .map(ApplicantId)
            .map_err(|_| InvalidApplicantId(raw.to_string()))
    }
}

/// Path segment that does not name an integer key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid applicant id \"{0}\"")]
pub struct InvalidApplicantId(pub String);

/// A stored applicant exactly as the `applicants` table returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<String>,
}

/// Writable columns accepted by create and update.
///
/// Absent or `null` fields stay `None` and are bound as SQL `NULL`; whatever
/// the table's constraints make of that is reported back unchanged. Other
/// JSON values are coerced to their text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantFields {
    #[serde(deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub bio: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub experience: Option<String>,
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        // Arrays and objects keep their JSON text.
        Some(other) => Some(other.to_string()),
    })
}

impl ApplicantFields {
    pub fn into_applicant(self, id: ApplicantId) -> Applicant {
        Applicant {
            id,
            name: self.name,
            bio: self.bio,
            experience: self.experience,
        }
    }
}
