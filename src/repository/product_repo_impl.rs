// ==========================================
// Numbers 库存管理 - 产品 Repository 实现
// ==========================================
// 职责: 实现产品数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::domain::product::{BulkInsertResult, NewProductInput, ProductRow, ProductUpdate};
use crate::domain::session::UserSession;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_repo::{require_user, ProductRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, user_id, name, quantity, is_favorite, created_at";

// ==========================================
// SqliteProductRepository
// ==========================================
pub struct SqliteProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProductRepository {
    /// 打开数据库并完成建表
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA 并建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
            init_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<ProductRow> {
        Ok(ProductRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            quantity: row.get(3)?,
            is_favorite: row.get::<_, i64>(4)? != 0,
            created_at: row.get::<_, DateTime<Utc>>(5)?,
        })
    }

    fn insert_tx(
        tx: &Transaction,
        user_id: &str,
        item: &NewProductInput,
        created_at: DateTime<Utc>,
    ) -> RepositoryResult<ProductRow> {
        let row = ProductRow {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            is_favorite: item.is_favorite,
            created_at,
        };

        tx.execute(
            r#"
            INSERT INTO products (id, user_id, name, quantity, is_favorite, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                row.id,
                row.user_id,
                row.name,
                row.quantity,
                row.is_favorite as i32,
                row.created_at,
            ],
        )?;

        Ok(row)
    }

    /// 规范化批量插入载荷（TRIM 名称、数量下限 0、丢弃空名称）
    fn sanitize_bulk_payload(items: Vec<NewProductInput>) -> Vec<NewProductInput> {
        items
            .into_iter()
            .map(|p| NewProductInput {
                name: p.name.trim().to_string(),
                quantity: p.quantity.max(0),
                is_favorite: p.is_favorite,
            })
            .filter(|p| !p.name.is_empty())
            .collect()
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create_product(
        &self,
        session: &UserSession,
        name: &str,
        quantity: i64,
    ) -> RepositoryResult<ProductRow> {
        let user_id = require_user(session)?;
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let row = Self::insert_tx(
            &tx,
            user_id,
            &NewProductInput {
                name: name.to_string(),
                quantity,
                is_favorite: false,
            },
            Utc::now(),
        )?;

        tx.commit()?;
        debug!(product_id = %row.id, user_id = %user_id, "产品已创建");
        Ok(row)
    }

    async fn create_products_bulk(
        &self,
        session: &UserSession,
        items: Vec<NewProductInput>,
    ) -> RepositoryResult<BulkInsertResult> {
        let user_id = require_user(session)?;

        let payload = Self::sanitize_bulk_payload(items);
        if payload.is_empty() {
            return Ok(BulkInsertResult { inserted: 0 });
        }

        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let created_at = Utc::now();
        let mut inserted = 0;
        for item in &payload {
            Self::insert_tx(&tx, user_id, item, created_at)?;
            inserted += 1;
        }

        tx.commit()?;
        debug!(inserted = inserted, user_id = %user_id, "批量插入完成");
        Ok(BulkInsertResult { inserted })
    }

    async fn list_products(&self, session: &UserSession) -> RepositoryResult<Vec<ProductRow>> {
        let user_id = require_user(session)?;
        let conn = self.get_conn()?;

        let sql = format!(
            "SELECT {} FROM products WHERE user_id = ?1 ORDER BY created_at DESC, seq DESC",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![user_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    async fn find_product(
        &self,
        session: &UserSession,
        id: &str,
    ) -> RepositoryResult<Option<ProductRow>> {
        let user_id = require_user(session)?;
        let conn = self.get_conn()?;

        let sql = format!(
            "SELECT {} FROM products WHERE id = ?1 AND user_id = ?2",
            SELECT_COLUMNS
        );
        let row = conn
            .query_row(&sql, params![id, user_id], Self::map_row)
            .optional()?;

        Ok(row)
    }

    async fn update_product(
        &self,
        session: &UserSession,
        id: &str,
        next: &ProductUpdate,
    ) -> RepositoryResult<()> {
        let user_id = require_user(session)?;
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            UPDATE products
            SET name = ?1, quantity = ?2, is_favorite = ?3
            WHERE id = ?4 AND user_id = ?5
            "#,
            params![next.name, next.quantity, next.is_favorite as i32, id, user_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_product(&self, session: &UserSession, id: &str) -> RepositoryResult<()> {
        let user_id = require_user(session)?;
        let conn = self.get_conn()?;

        let affected = conn.execute(
            "DELETE FROM products WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Product".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn repo() -> SqliteProductRepository {
        let conn = open_in_memory().unwrap();
        SqliteProductRepository::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_scoped_to_user() {
        let repo = repo();
        let alice = UserSession::new("alice");
        let bob = UserSession::new("bob");

        repo.create_product(&alice, "Apples", 3).await.unwrap();
        repo.create_product(&bob, "Pears", 1).await.unwrap();

        let rows = repo.list_products(&alice).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Apples");
        assert_eq!(rows[0].user_id, "alice");
        assert!(!rows[0].is_favorite);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = repo();
        let session = UserSession::new("u1");

        repo.create_product(&session, "first", 1).await.unwrap();
        repo.create_product(&session, "second", 2).await.unwrap();

        let names: Vec<String> = repo
            .list_products(&session)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_bulk_insert_drops_blank_names() {
        let repo = repo();
        let session = UserSession::new("u1");

        let result = repo
            .create_products_bulk(
                &session,
                vec![
                    NewProductInput::imported("  Apples ", 10),
                    NewProductInput::imported("   ", 5),
                ],
            )
            .await
            .unwrap();

        assert_eq!(result.inserted, 1);
        let rows = repo.list_products(&session).await.unwrap();
        assert_eq!(rows[0].name, "Apples");
    }

    #[tokio::test]
    async fn test_bulk_insert_empty_payload() {
        let repo = repo();
        let session = UserSession::new("u1");
        let result = repo.create_products_bulk(&session, vec![]).await.unwrap();
        assert_eq!(result.inserted, 0);
    }

    #[tokio::test]
    async fn test_requires_authenticated_session() {
        let repo = repo();
        let anonymous = UserSession::new("");

        let err = repo.list_products(&anonymous).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotAuthenticated));

        let err = repo
            .create_products_bulk(&anonymous, vec![NewProductInput::imported("x", 1)])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not authenticated");
    }

    #[tokio::test]
    async fn test_update_and_delete_other_users_product_is_not_found() {
        let repo = repo();
        let alice = UserSession::new("alice");
        let bob = UserSession::new("bob");

        let row = repo.create_product(&alice, "Apples", 3).await.unwrap();
        let update = ProductUpdate {
            name: "Hacked".to_string(),
            quantity: 0,
            is_favorite: true,
        };

        let err = repo.update_product(&bob, &row.id, &update).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));

        let err = repo.delete_product(&bob, &row.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));

        let found = repo.find_product(&alice, &row.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Apples");
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let repo = repo();
        let session = UserSession::new("u1");
        let row = repo.create_product(&session, "Milk", 2).await.unwrap();

        repo.update_product(
            &session,
            &row.id,
            &ProductUpdate {
                name: "Oat Milk".to_string(),
                quantity: 4,
                is_favorite: true,
            },
        )
        .await
        .unwrap();

        let found = repo.find_product(&session, &row.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Oat Milk");
        assert_eq!(found.quantity, 4);
        assert!(found.is_favorite);

        repo.delete_product(&session, &row.id).await.unwrap();
        assert!(repo.find_product(&session, &row.id).await.unwrap().is_none());
    }
}
