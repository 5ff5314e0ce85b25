// ==========================================
// Numbers 库存管理 - 产品 API
// ==========================================
// 职责: 产品增删改查、收藏、搜索
// 说明: 输入规范化在此层完成，仓储层只做持久化
// ==========================================

use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::product::{ProductRow, ProductUpdate};
use crate::domain::session::UserSession;
use crate::repository::ProductRepository;

/// 数量输入 → 非负整数
///
/// 仅保留数字字符；无数字时为 0
pub fn normalize_quantity_input(raw: &str) -> ApiResult<i64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidInput(format!("数量超出范围: {}", raw.trim())))
}

/// 搜索匹配: 名称包含（忽略大小写）或数量的十进制文本包含
fn matches_query(product: &ProductRow, query: &str) -> bool {
    product.name.to_lowercase().contains(query) || product.quantity.to_string().contains(query)
}

// ==========================================
// ProductApi
// ==========================================
pub struct ProductApi<R>
where
    R: ProductRepository,
{
    product_repo: R,
}

impl<R> ProductApi<R>
where
    R: ProductRepository,
{
    pub fn new(product_repo: R) -> Self {
        Self { product_repo }
    }

    async fn require_product(&self, session: &UserSession, id: &str) -> ApiResult<ProductRow> {
        self.product_repo
            .find_product(session, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Product(id={})不存在", id)))
    }

    // ==========================================
    // 写接口
    // ==========================================

    /// 新建产品
    ///
    /// # 参数
    /// - name: 名称（TRIM 后不能为空）
    /// - quantity_input: 数量原始输入
    pub async fn create_product(
        &self,
        session: &UserSession,
        name: &str,
        quantity_input: &str,
    ) -> ApiResult<ProductRow> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("产品名称不能为空".to_string()));
        }
        let quantity = normalize_quantity_input(quantity_input)?;

        let row = self
            .product_repo
            .create_product(session, name, quantity)
            .await?;
        info!(product_id = %row.id, quantity = row.quantity, "产品已创建");
        Ok(row)
    }

    /// 编辑产品
    ///
    /// # 参数
    /// - name: 新名称；None 或空白时保留原名称
    /// - quantity_input: 新数量原始输入；None 时保留原数量
    pub async fn update_product(
        &self,
        session: &UserSession,
        id: &str,
        name: Option<&str>,
        quantity_input: Option<&str>,
    ) -> ApiResult<ProductRow> {
        let current = self.require_product(session, id).await?;
        let mut next = ProductUpdate::from(&current);

        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            next.name = name.to_string();
        }
        if let Some(raw) = quantity_input {
            next.quantity = normalize_quantity_input(raw)?;
        }

        self.product_repo.update_product(session, id, &next).await?;
        debug!(product_id = id, "产品已更新");

        Ok(ProductRow {
            name: next.name,
            quantity: next.quantity,
            is_favorite: next.is_favorite,
            ..current
        })
    }

    /// 切换收藏状态
    pub async fn toggle_favorite(&self, session: &UserSession, id: &str) -> ApiResult<ProductRow> {
        let mut current = self.require_product(session, id).await?;
        current.is_favorite = !current.is_favorite;

        self.product_repo
            .update_product(session, id, &ProductUpdate::from(&current))
            .await?;
        debug!(product_id = id, is_favorite = current.is_favorite, "收藏状态已切换");
        Ok(current)
    }

    pub async fn delete_product(&self, session: &UserSession, id: &str) -> ApiResult<()> {
        self.product_repo.delete_product(session, id).await?;
        info!(product_id = id, "产品已删除");
        Ok(())
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 产品列表（created_at 倒序）
    pub async fn list_products(&self, session: &UserSession) -> ApiResult<Vec<ProductRow>> {
        Ok(self.product_repo.list_products(session).await?)
    }

    /// 搜索产品（空查询返回全部）
    pub async fn search_products(
        &self,
        session: &UserSession,
        query: &str,
    ) -> ApiResult<Vec<ProductRow>> {
        let products = self.product_repo.list_products(session).await?;
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Ok(products);
        }

        Ok(products
            .into_iter()
            .filter(|p| matches_query(p, &query))
            .collect())
    }

    /// 收藏列表（按名称排序，忽略大小写）
    pub async fn favorite_products(&self, session: &UserSession) -> ApiResult<Vec<ProductRow>> {
        let mut favorites: Vec<ProductRow> = self
            .product_repo
            .list_products(session)
            .await?
            .into_iter()
            .filter(|p| p.is_favorite)
            .collect();
        favorites.sort_by_cached_key(|p| p.name.to_lowercase());
        Ok(favorites)
    }
}
