// ==========================================
// Numbers 库存管理 - 用户会话
// ==========================================
// 职责: 显式传递的认证上下文（替代全局会话查询）
// 红线: 仓储层所有操作必须携带 UserSession
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 已认证用户会话
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserSession {
    /// 创建不过期的会话
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            expires_at: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// 会话在 now 时刻是否有效
    ///
    /// # 规则
    /// - user_id 非空（TRIM 后）
    /// - 未设置过期时间，或过期时间晚于 now
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if self.user_id.trim().is_empty() {
            return false;
        }
        match self.expires_at {
            Some(expires_at) => expires_at > now,
            None => true,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}
