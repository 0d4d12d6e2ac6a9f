//! 凭证记录类型定义

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 凭证记录
///
/// 本地缓存与远端集合中存储的单条 website/username/password 记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// 记录 ID（UUID v4，集合内唯一）
    pub id: String,
    /// 网站地址
    pub website: String,
    /// 用户名（通常为邮箱）
    pub username: String,
    /// 密码（明文）
    pub password: String,
}

impl CredentialRecord {
    /// 用新生成的 ID 创建记录
    #[must_use]
    pub fn new(input: CredentialInput) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), input)
    }

    /// 使用指定 ID 创建记录（编辑时沿用原 ID）
    #[must_use]
    pub fn with_id(id: String, input: CredentialInput) -> Self {
        Self {
            id,
            website: input.website,
            username: input.username,
            password: input.password,
        }
    }

    /// 取出表单内容（不含 ID）
    #[must_use]
    pub fn to_input(&self) -> CredentialInput {
        CredentialInput {
            website: self.website.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// 凭证表单输入（保存前的草稿）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialInput {
    pub website: String,
    pub username: String,
    pub password: String,
}

impl CredentialInput {
    #[must_use]
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// 校验三个字段均非空
    ///
    /// 返回的错误信息列出所有缺失字段。
    pub fn validate(&self) -> CoreResult<()> {
        let missing: Vec<&str> = [
            ("website", &self.website),
            ("username", &self.username),
            ("password", &self.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::ValidationError(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )))
        }
    }
}

/// 可复制的记录字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialField {
    Website,
    Username,
    Password,
}

impl CredentialField {
    /// 取出记录中对应字段的值
    #[must_use]
    pub fn value_of(self, record: &CredentialRecord) -> &str {
        match self {
            Self::Website => &record.website,
            Self::Username => &record.username,
            Self::Password => &record.password,
        }
    }
}

/// 删除匹配器（部分记录）
///
/// 所有给出的字段都必须与记录完全相等才算匹配。空匹配器匹配所有记录；
/// 带有记录不存在的字段时不匹配任何记录。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialMatcher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// 记录中不存在的字段（如 `_id`）
    #[serde(flatten)]
    pub other_fields: serde_json::Map<String, serde_json::Value>,
}

impl CredentialMatcher {
    /// 仅按 ID 匹配
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// 是否没有任何字段
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.website.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.other_fields.is_empty()
    }

    /// 是否含有记录不存在的字段，此时不可能匹配
    #[must_use]
    pub fn has_unknown_fields(&self) -> bool {
        !self.other_fields.is_empty()
    }

    /// 判断记录是否匹配
    #[must_use]
    pub fn matches(&self, record: &CredentialRecord) -> bool {
        fn field_eq(expected: Option<&String>, actual: &str) -> bool {
            expected.is_none_or(|v| v == actual)
        }

        !self.has_unknown_fields()
            && field_eq(self.id.as_ref(), &record.id)
            && field_eq(self.website.as_ref(), &record.website)
            && field_eq(self.username.as_ref(), &record.username)
            && field_eq(self.password.as_ref(), &record.password)
    }
}

impl From<&CredentialRecord> for CredentialMatcher {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            website: Some(record.website.clone()),
            username: Some(record.username.clone()),
            password: Some(record.password.clone()),
            other_fields: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CredentialRecord {
        CredentialRecord::with_id(
            "1".to_string(),
            CredentialInput::new("a.com", "u@a.com", "p"),
        )
    }

    #[test]
    fn validate_accepts_complete_input() {
        assert!(CredentialInput::new("a.com", "u@a.com", "p").validate().is_ok());
    }

    #[test]
    fn validate_lists_missing_fields() {
        let err = CredentialInput::new("", "u@a.com", "")
            .validate()
            .unwrap_err();
        match err {
            CoreError::ValidationError(msg) => {
                assert!(msg.contains("website"));
                assert!(msg.contains("password"));
                assert!(!msg.contains("username"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn new_records_get_distinct_ids() {
        let a = CredentialRecord::new(CredentialInput::new("a.com", "u", "p"));
        let b = CredentialRecord::new(CredentialInput::new("a.com", "u", "p"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn matcher_partial_fields() {
        let matcher = CredentialMatcher {
            website: Some("a.com".into()),
            ..CredentialMatcher::default()
        };
        assert!(matcher.matches(&record()));

        let matcher = CredentialMatcher {
            website: Some("a.com".into()),
            password: Some("other".into()),
            ..CredentialMatcher::default()
        };
        assert!(!matcher.matches(&record()));
    }

    #[test]
    fn empty_matcher_matches_any_record() {
        assert!(CredentialMatcher::default().matches(&record()));
    }

    #[test]
    fn full_record_matcher() {
        let r = record();
        assert!(CredentialMatcher::from(&r).matches(&r));
        assert!(CredentialMatcher::by_id("1").matches(&r));
        assert!(!CredentialMatcher::by_id("2").matches(&r));
    }

    #[test]
    fn unknown_fields_match_nothing() {
        let matcher: CredentialMatcher =
            serde_json::from_str(r#"{"_id":"abc","website":"a.com"}"#).unwrap();
        assert!(matcher.has_unknown_fields());
        assert!(!matcher.is_empty());
        assert!(!matcher.matches(&record()));

        let json = serde_json::to_value(&matcher).unwrap();
        assert_eq!(json, serde_json::json!({ "_id": "abc", "website": "a.com" }));
    }

    #[test]
    fn record_json_shape() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "website": "a.com",
                "username": "u@a.com",
                "password": "p"
            })
        );
    }
}
