// ==========================================
// 产品仓储集成测试
// ==========================================
// 覆盖: 文件数据库、用户隔离、排序、批量事务
// ==========================================

use numbers_inventory::domain::{NewProductInput, ProductUpdate};
use numbers_inventory::repository::{
    ProductRepository, RepositoryError, SqliteProductRepository,
};

use test_helpers::{create_test_db, create_test_repo, expired_session, session};

#[tokio::test]
async fn test_data_survives_reopen() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let user = session("alice");

    {
        let repo = SqliteProductRepository::new(&db_path).unwrap();
        repo.create_product(&user, "Milk", 2).await.unwrap();
    }

    let repo = SqliteProductRepository::new(&db_path).unwrap();
    let products = repo.list_products(&user).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Milk");
    assert_eq!(products[0].user_id, "alice");
}

#[tokio::test]
async fn test_list_newest_first_with_bulk_ties() {
    let (_tmp, repo) = create_test_repo();
    let user = session("alice");

    repo.create_products_bulk(
        &user,
        vec![
            NewProductInput::imported("First", 1),
            NewProductInput::imported("Second", 2),
            NewProductInput::imported("Third", 3),
        ],
    )
    .await
    .unwrap();

    let names: Vec<String> = repo
        .list_products(&user)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_bulk_drops_blank_names() {
    let (_tmp, repo) = create_test_repo();
    let user = session("alice");

    let result = repo
        .create_products_bulk(
            &user,
            vec![
                NewProductInput::imported("  Tea ", 1),
                NewProductInput::imported("   ", 2),
            ],
        )
        .await
        .unwrap();

    assert_eq!(result.inserted, 1);
    let products = repo.list_products(&user).await.unwrap();
    assert_eq!(products[0].name, "Tea");
}

#[tokio::test]
async fn test_other_users_rows_are_untouchable() {
    let (_tmp, repo) = create_test_repo();
    let alice = session("alice");
    let bob = session("bob");

    let row = repo.create_product(&alice, "Milk", 2).await.unwrap();

    assert!(repo.find_product(&bob, &row.id).await.unwrap().is_none());

    let update = ProductUpdate {
        name: "Stolen".to_string(),
        quantity: 0,
        is_favorite: true,
    };
    let err = repo.update_product(&bob, &row.id, &update).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let err = repo.delete_product(&bob, &row.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));

    let stored = repo.find_product(&alice, &row.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Milk");
}

#[tokio::test]
async fn test_update_overwrites_row() {
    let (_tmp, repo) = create_test_repo();
    let user = session("alice");
    let row = repo.create_product(&user, "Milk", 2).await.unwrap();

    let update = ProductUpdate {
        name: "Oat Milk".to_string(),
        quantity: 5,
        is_favorite: true,
    };
    repo.update_product(&user, &row.id, &update).await.unwrap();

    let stored = repo.find_product(&user, &row.id).await.unwrap().unwrap();
    assert_eq!(ProductUpdate::from(&stored), update);
    assert_eq!(stored.created_at, row.created_at);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let (_tmp, repo) = create_test_repo();
    let err = repo
        .list_products(&expired_session("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotAuthenticated));
    assert_eq!(err.to_string(), "Not authenticated");
}
