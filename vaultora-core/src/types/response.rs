//! API 响应相关类型定义

use serde::{Deserialize, Serialize};

/// 变更操作的确认响应体 `{ "success": true }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// 是否成功
    pub success: bool,
}

impl Acknowledgement {
    /// 创建成功响应
    #[must_use]
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_serializes_to_success_true() {
        let json = serde_json::to_string(&Acknowledgement::ok()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
