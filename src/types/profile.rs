//! Profile Types
//!
//! User profile payload returned by the userinfo endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// User profile returned by the provider's userinfo endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    /// Subject identifier.
    pub openid: String,
    /// Display name.
    pub nickname: String,
    /// Declared sex.
    #[serde(deserialize_with = "deserialize_sex", default)]
    pub sex: Sex,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    /// Avatar URL.
    #[serde(rename = "headimgurl", default)]
    pub avatar_url: String,
    /// Granted privileges.
    #[serde(default)]
    pub privilege: Vec<String>,
    /// Cross-application union identifier, present only when the application
    /// is linked to an open platform account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unionid: Option<String>,
}

/// Declared sex of the profile subject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Unknown,
    Male,
    Female,
}

impl Sex {
    fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Male,
            2 => Self::Female,
            _ => Self::Unknown,
        }
    }
}

// The provider serializes `sex` as a number, but older payloads carry it as a
// numeric string. Accept both; anything else maps to Unknown.
fn deserialize_sex<'de, D>(deserializer: D) -> Result<Sex, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(code) => Sex::from_code(code),
        Raw::Text(text) => text.parse::<i64>().map(Sex::from_code).unwrap_or_default(),
    })
}

/// Language hint for profile fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lang {
    /// English.
    #[default]
    En,
    /// Simplified Chinese.
    ZhCn,
    /// Traditional Chinese.
    ZhTw,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::ZhCn => "zh_CN",
            Self::ZhTw => "zh_TW",
        }
    }
}
