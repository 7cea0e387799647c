use std::io::Write;

use crate::cli::api_client::ApiClient;
use crate::cli::commands::category::{self, CategoryArgs};
use crate::cli::commands::post::*;
use crate::cli::commands::test_server::spawn_test_server;

async fn create_category(api_client: &ApiClient, name: &str) -> String {
    let args = CategoryArgs {
        name: Some(name.to_string()),
        ..Default::default()
    };
    category::create_category(api_client, args).await.unwrap();

    let output = category::list_categories(api_client, "json").await.unwrap();
    let parsed: Vec<category::Category> = serde_json::from_str(&output).unwrap();
    parsed
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .unwrap()
}

fn post_args(title: &str, category_id: &str, published: bool) -> PostArgs {
    PostArgs {
        title: Some(title.to_string()),
        content: Some(format!("# {}\n\nSome **bold** text.", title)),
        author: Some("Olivia Rhye".to_string()),
        published: Some(published),
        categories: vec![category_id.to_string()],
        ..Default::default()
    }
}

async fn all_posts(api_client: &ApiClient) -> Vec<Post> {
    let output = list_posts(api_client, None, true, "json").await.unwrap();
    serde_json::from_str(&output).unwrap()
}

#[tokio::test]
async fn test_delete_post_without_force() {
    let api_client = ApiClient::new(None);
    let result = delete_post(&api_client, "test-id", false).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("--force"));
}

#[tokio::test]
async fn test_create_post_rejects_content_and_content_file() {
    let api_client = ApiClient::new(None);
    let args = PostArgs {
        content: Some("inline".to_string()),
        content_file: Some("post.md".into()),
        ..Default::default()
    };

    let error = create_post(&api_client, args).await.unwrap_err().to_string();
    assert!(error.contains("--content-file"), "got: {}", error);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_posts_empty() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let output = list_posts(&api_client, None, false, "json").await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 0);

    let table = list_posts(&api_client, None, true, "table").await.unwrap();
    assert_eq!(table, "No posts found.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_post_and_list() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let design = create_category(&api_client, "Design").await;

    let output = create_post(&api_client, post_args("What is wireframing?", &design, true))
        .await
        .unwrap();
    assert!(output.contains("Created post: What is wireframing?"));

    let output = list_posts(&api_client, None, false, "json").await.unwrap();
    let posts: Vec<Post> = serde_json::from_str(&output).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "what-is-wireframing");
    assert!(posts[0].published_at.is_some());
    assert_eq!(posts[0].categories[0].name, "Design");

    let table = list_posts(&api_client, None, false, "table").await.unwrap();
    assert!(table.contains("published"));
    assert!(table.contains("Design"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_drafts_only_listed_with_all() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let design = create_category(&api_client, "Design").await;

    create_post(&api_client, post_args("Draft thoughts", &design, false))
        .await
        .unwrap();

    let output = list_posts(&api_client, None, false, "json").await.unwrap();
    let published: Vec<Post> = serde_json::from_str(&output).unwrap();
    assert!(published.is_empty());

    let posts = all_posts(&api_client).await;
    assert_eq!(posts.len(), 1);
    assert!(!posts[0].published);
    assert_eq!(posts[0].published_at, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_posts_by_category() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let design = create_category(&api_client, "Design").await;
    let software = create_category(&api_client, "Software").await;

    create_post(&api_client, post_args("Design systems", &design, true))
        .await
        .unwrap();
    create_post(&api_client, post_args("Type systems", &software, true))
        .await
        .unwrap();

    let output = list_posts(&api_client, Some(&software), false, "json")
        .await
        .unwrap();
    let posts: Vec<Post> = serde_json::from_str(&output).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Type systems");

    let output = list_posts(&api_client, Some(&design), true, "json")
        .await
        .unwrap();
    let posts: Vec<Post> = serde_json::from_str(&output).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Design systems");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_post_without_category_is_rejected() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let args = PostArgs {
        title: Some("No categories".to_string()),
        content: Some("Body".to_string()),
        author: Some("Olivia Rhye".to_string()),
        ..Default::default()
    };
    let error = create_post(&api_client, args).await.unwrap_err().to_string();
    assert!(error.contains("422"), "got: {}", error);
    assert!(error.contains("Select at least one category"), "got: {}", error);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_post_from_content_file() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let design = create_category(&api_client, "Design").await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "## From a file\n\nMarkdown body.").unwrap();

    let args = PostArgs {
        title: Some("File post".to_string()),
        content_file: Some(file.path().to_path_buf()),
        author: Some("Phoenix Baker".to_string()),
        categories: vec![design],
        ..Default::default()
    };
    create_post(&api_client, args).await.unwrap();

    let posts = all_posts(&api_client).await;
    assert!(posts[0].content.starts_with("## From a file"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_post_by_slug_and_id() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let design = create_category(&api_client, "Design").await;

    create_post(&api_client, post_args("Rendered post", &design, true))
        .await
        .unwrap();

    let output = show_post(&api_client, "rendered-post", false, "json")
        .await
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["title"], "Rendered post");
    assert!(
        parsed["content_html"]
            .as_str()
            .unwrap()
            .contains("<strong>bold</strong>")
    );

    let html = show_post(&api_client, "rendered-post", false, "html")
        .await
        .unwrap();
    assert!(html.contains("<h1>Rendered post</h1>"));

    let id = parsed["id"].as_str().unwrap().to_string();
    let table = show_post(&api_client, &id, true, "table").await.unwrap();
    assert!(table.contains("Rendered post"));
    assert!(table.contains("rendered-post"));
    assert!(table.contains("Olivia Rhye"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_draft_by_slug_not_found() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let design = create_category(&api_client, "Design").await;

    create_post(&api_client, post_args("Hidden draft", &design, false))
        .await
        .unwrap();

    let error = show_post(&api_client, "hidden-draft", false, "table")
        .await
        .unwrap_err()
        .to_string();
    assert!(error.contains("404"), "got: {}", error);

    let id = all_posts(&api_client).await[0].id.clone();
    assert!(show_post(&api_client, &id, true, "json").await.is_ok());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_post_merges_fields() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let design = create_category(&api_client, "Design").await;
    let research = create_category(&api_client, "Research").await;

    create_post(&api_client, post_args("Original title", &design, false))
        .await
        .unwrap();
    let id = all_posts(&api_client).await[0].id.clone();

    let args = PostArgs {
        title: Some("New title".to_string()),
        published: Some(true),
        categories: vec![format!("{},{}", design, research)],
        ..Default::default()
    };
    let output = update_post(&api_client, &id, args).await.unwrap();
    assert!(output.contains("Updated post: New title"));

    let post = &all_posts(&api_client).await[0];
    assert_eq!(post.title, "New title");
    assert_eq!(post.slug, "original-title");
    assert_eq!(post.author_name, "Olivia Rhye");
    assert!(post.published);
    assert!(post.published_at.is_some());
    assert_eq!(post.categories.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_post_not_found() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));

    let args = PostArgs {
        title: Some("Anything".to_string()),
        ..Default::default()
    };
    let error = update_post(&api_client, "nonexist", args)
        .await
        .unwrap_err()
        .to_string();
    assert!(error.contains("404"), "got: {}", error);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_post_with_force() {
    let (url, _handle) = spawn_test_server().await;
    let api_client = ApiClient::new(Some(url));
    let design = create_category(&api_client, "Design").await;

    create_post(&api_client, post_args("Short lived", &design, true))
        .await
        .unwrap();
    let id = all_posts(&api_client).await[0].id.clone();

    let output = delete_post(&api_client, &id, true).await.unwrap();
    assert!(output.contains("Deleted post"));
    assert!(all_posts(&api_client).await.is_empty());

    let error = delete_post(&api_client, &id, true)
        .await
        .unwrap_err()
        .to_string();
    assert!(error.contains("404"), "got: {}", error);
}
