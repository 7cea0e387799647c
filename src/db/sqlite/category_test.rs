//! Tests for SqliteCategoryRepository.

use crate::db::{Category, CategoryRepository, Database, DbError, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn make_category(name: &str, slug: &str) -> Category {
    Category {
        id: String::new(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: Some(format!("All about {}", name)),
        color: "#3B82F6".to_string(),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_generates_id_and_timestamps() {
    let db = setup_db().await;
    let repo = db.categories();

    let created = repo.create(&make_category("Design", "design")).await.unwrap();

    assert_eq!(created.id.len(), 36);
    assert!(!created.created_at.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let fetched = repo.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_keeps_provided_id() {
    let db = setup_db().await;
    let mut category = make_category("Research", "research");
    category.id = "cat00001".to_string();

    let created = db.categories().create(&category).await.unwrap();
    assert_eq!(created.id, "cat00001");
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_slug_is_constraint_error() {
    let db = setup_db().await;
    let repo = db.categories();

    repo.create(&make_category("Design", "design")).await.unwrap();
    let err = repo
        .create(&make_category("Design Again", "design"))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Constraint { .. }), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_color_is_rejected_by_schema() {
    let db = setup_db().await;
    let mut category = make_category("Tools", "tools");
    category.color = "blue".to_string();

    let err = db.categories().create(&category).await.unwrap_err();
    assert!(matches!(err, DbError::Validation { .. }), "got {err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_orders_by_name() {
    let db = setup_db().await;
    let repo = db.categories();

    repo.create(&make_category("Tools", "tools")).await.unwrap();
    repo.create(&make_category("Design", "design")).await.unwrap();
    repo.create(&make_category("Podcasts", "podcasts")).await.unwrap();

    let names: Vec<String> = repo
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Design", "Podcasts", "Tools"]);
    assert_eq!(repo.count().await.unwrap(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn update_changes_fields() {
    let db = setup_db().await;
    let repo = db.categories();

    let mut category = repo.create(&make_category("Design", "design")).await.unwrap();
    category.name = "UX Design".to_string();
    category.slug = "ux-design".to_string();
    category.color = "#EC4899".to_string();
    category.description = None;

    let updated = repo.update(&category).await.unwrap();
    assert_eq!(updated.name, "UX Design");
    assert_eq!(updated.slug, "ux-design");
    assert_eq!(updated.color, "#EC4899");
    assert!(updated.description.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn update_missing_category_is_not_found() {
    let db = setup_db().await;
    let mut category = make_category("Ghost", "ghost");
    category.id = "missing".to_string();

    let err = db.categories().update(&category).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_category() {
    let db = setup_db().await;
    let repo = db.categories();

    let created = repo.create(&make_category("Design", "design")).await.unwrap();
    repo.delete(&created.id).await.unwrap();

    assert!(matches!(
        repo.get(&created.id).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(matches!(
        repo.delete(&created.id).await,
        Err(DbError::NotFound { .. })
    ));
}
