// ==========================================
// Numbers 库存管理 - 产品 Repository Trait
// ==========================================
// 职责: 定义产品数据访问接口（不包含业务逻辑）
// 红线: 所有操作限定在 session 所属用户范围内
// ==========================================

use crate::domain::product::{BulkInsertResult, NewProductInput, ProductRow, ProductUpdate};
use crate::domain::session::UserSession;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use std::sync::Arc;

/// 校验会话并返回用户 ID
///
/// # 返回
/// - Ok(&str): 会话有效
/// - Err(NotAuthenticated): 会话为空/过期
pub fn require_user(session: &UserSession) -> RepositoryResult<&str> {
    if session.is_valid() {
        Ok(session.user_id.as_str())
    } else {
        Err(RepositoryError::NotAuthenticated)
    }
}

// ==========================================
// ProductRepository Trait
// ==========================================
// 用途: 产品持久化协作方
// 实现者: SqliteProductRepository（rusqlite）
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 新建单个产品
    ///
    /// # 返回
    /// - Ok(ProductRow): 新建的产品行
    async fn create_product(
        &self,
        session: &UserSession,
        name: &str,
        quantity: i64,
    ) -> RepositoryResult<ProductRow>;

    /// 批量新建产品（事务化）
    ///
    /// # 说明
    /// - TRIM 后名称为空的条目在落库前丢弃
    /// - inserted 为实际写入条数，可能小于 items.len()
    async fn create_products_bulk(
        &self,
        session: &UserSession,
        items: Vec<NewProductInput>,
    ) -> RepositoryResult<BulkInsertResult>;

    /// 列出当前用户的产品（created_at 倒序）
    async fn list_products(&self, session: &UserSession) -> RepositoryResult<Vec<ProductRow>>;

    /// 按 ID 查询当前用户的产品
    async fn find_product(
        &self,
        session: &UserSession,
        id: &str,
    ) -> RepositoryResult<Option<ProductRow>>;

    /// 整行更新
    ///
    /// # 返回
    /// - Err(NotFound): 产品不存在或不属于当前用户
    async fn update_product(
        &self,
        session: &UserSession,
        id: &str,
        next: &ProductUpdate,
    ) -> RepositoryResult<()>;

    /// 删除产品
    ///
    /// # 返回
    /// - Err(NotFound): 产品不存在或不属于当前用户
    async fn delete_product(&self, session: &UserSession, id: &str) -> RepositoryResult<()>;
}

// 共享仓储（API 层以 Arc 持有）
#[async_trait]
impl<T: ProductRepository + ?Sized> ProductRepository for Arc<T> {
    async fn create_product(
        &self,
        session: &UserSession,
        name: &str,
        quantity: i64,
    ) -> RepositoryResult<ProductRow> {
        (**self).create_product(session, name, quantity).await
    }

    async fn create_products_bulk(
        &self,
        session: &UserSession,
        items: Vec<NewProductInput>,
    ) -> RepositoryResult<BulkInsertResult> {
        (**self).create_products_bulk(session, items).await
    }

    async fn list_products(&self, session: &UserSession) -> RepositoryResult<Vec<ProductRow>> {
        (**self).list_products(session).await
    }

    async fn find_product(
        &self,
        session: &UserSession,
        id: &str,
    ) -> RepositoryResult<Option<ProductRow>> {
        (**self).find_product(session, id).await
    }

    async fn update_product(
        &self,
        session: &UserSession,
        id: &str,
        next: &ProductUpdate,
    ) -> RepositoryResult<()> {
        (**self).update_product(session, id, next).await
    }

    async fn delete_product(&self, session: &UserSession, id: &str) -> RepositoryResult<()> {
        (**self).delete_product(session, id).await
    }
}
