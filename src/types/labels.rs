use std::fmt;

use serde::{Deserialize, Serialize};

/// Workflow status of a script.
///
/// Stored and serialized as the label the editorial team uses. Labels outside
/// the known set are kept verbatim in [`ScriptStatus::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScriptStatus {
    #[default]
    Draft,
    Revision,
    Complete,
    Final,
    Abandoned,
    Other(String),
}

impl ScriptStatus {
    pub const DRAFT: &'static str = "一卡初稿";
    pub const REVISION: &'static str = "改稿中";
    pub const COMPLETE: &'static str = "完整剧本";
    pub const FINAL: &'static str = "终稿";
    pub const ABANDONED: &'static str = "已废弃";

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            Self::DRAFT => Self::Draft,
            Self::REVISION => Self::Revision,
            Self::COMPLETE => Self::Complete,
            Self::FINAL => Self::Final,
            Self::ABANDONED => Self::Abandoned,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => Self::DRAFT,
            Self::Revision => Self::REVISION,
            Self::Complete => Self::COMPLETE,
            Self::Final => Self::FINAL,
            Self::Abandoned => Self::ABANDONED,
            Self::Other(label) => label,
        }
    }
}

/// Where a script came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    External,
    #[default]
    Internal,
    Collaborative,
    Licensed,
    Other(String),
}

impl SourceType {
    pub const EXTERNAL: &'static str = "外部投稿";
    pub const INTERNAL: &'static str = "内部团队";
    pub const COLLABORATIVE: &'static str = "合作剧组";
    pub const LICENSED: &'static str = "版权购买";

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            Self::EXTERNAL => Self::External,
            Self::INTERNAL => Self::Internal,
            Self::COLLABORATIVE => Self::Collaborative,
            Self::LICENSED => Self::Licensed,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::External => Self::EXTERNAL,
            Self::Internal => Self::INTERNAL,
            Self::Collaborative => Self::COLLABORATIVE,
            Self::Licensed => Self::LICENSED,
            Self::Other(label) => label,
        }
    }
}

/// Whether a producer has claimed the script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssignStatus {
    #[default]
    Unassigned,
    Assigned,
    Other(String),
}

impl AssignStatus {
    pub const UNASSIGNED: &'static str = "待认领";
    pub const ASSIGNED: &'static str = "已认领";

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            Self::UNASSIGNED => Self::Unassigned,
            Self::ASSIGNED => Self::Assigned,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unassigned => Self::UNASSIGNED,
            Self::Assigned => Self::ASSIGNED,
            Self::Other(label) => label,
        }
    }
}

macro_rules! impl_label_conversions {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl From<String> for $ty {
                fn from(s: String) -> Self {
                    Self::parse(&s)
                }
            }

            impl From<&str> for $ty {
                fn from(s: &str) -> Self {
                    Self::parse(s)
                }
            }

            impl From<$ty> for String {
                fn from(label: $ty) -> Self {
                    label.as_str().to_string()
                }
            }
        )+
    };
}

impl_label_conversions!(ScriptStatus, SourceType, AssignStatus);

pub const DEFAULT_GENRE: &str = "皆可";
pub const DEFAULT_CONTENT_TYPE: &str = "付费";
pub const DEFAULT_RATER_ROLE: &str = "内容评审";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_round_trip() {
        assert_eq!(ScriptStatus::parse("终稿"), ScriptStatus::Final);
        assert_eq!(ScriptStatus::Revision.as_str(), "改稿中");
        assert_eq!(SourceType::parse("版权购买"), SourceType::Licensed);
        assert_eq!(AssignStatus::parse("已认领"), AssignStatus::Assigned);
    }

    #[test]
    fn test_unknown_label_is_preserved() {
        let status = ScriptStatus::parse("待定");
        assert_eq!(status, ScriptStatus::Other("待定".to_string()));
        assert_eq!(status.to_string(), "待定");
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&ScriptStatus::Abandoned).unwrap();
        assert_eq!(json, "\"已废弃\"");

        let parsed: SourceType = serde_json::from_str("\"合作剧组\"").unwrap();
        assert_eq!(parsed, SourceType::Collaborative);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ScriptStatus::default().as_str(), "一卡初稿");
        assert_eq!(SourceType::default().as_str(), "内部团队");
        assert_eq!(AssignStatus::default().as_str(), "待认领");
    }
}
