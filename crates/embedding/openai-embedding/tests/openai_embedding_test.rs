//! Tests for the OpenAI embedding service.
//!
//! Most tests point the client at a `mockito` server speaking the embeddings API.
//! The one test that calls the real API is `#[ignore]`; run it with
//! `cargo test -p openai-embedding -- --ignored` and `OPENAI_API_KEY` set in the root `.env`.

use std::path::Path;

use embedding::EmbeddingService;
use openai_embedding::OpenAIEmbedding;

fn embeddings_body(vectors: &[(u32, &[f32])]) -> String {
    let data: Vec<String> = vectors
        .iter()
        .map(|(index, v)| {
            let nums: Vec<String> = v.iter().map(|x| x.to_string()).collect();
            format!(
                r#"{{"object":"embedding","index":{},"embedding":[{}]}}"#,
                index,
                nums.join(",")
            )
        })
        .collect();
    format!(
        r#"{{"object":"list","model":"text-embedding-3-small","data":[{}],"usage":{{"prompt_tokens":4,"total_tokens":4}}}}"#,
        data.join(",")
    )
}

fn service_for(server: &mockito::ServerGuard) -> OpenAIEmbedding {
    OpenAIEmbedding::new_with_base_url(
        "sk-test-key-123456".to_string(),
        "text-embedding-3-small".to_string(),
        Some(&server.url()),
    )
}

/// **Test: Single embed returns the vector from the first data item.**
#[tokio::test]
async fn embed_returns_vector_from_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(embeddings_body(&[(0, &[0.5, 0.25, 0.125])]))
        .create_async()
        .await;

    let service = service_for(&server);
    let v = service.embed("home loan rates").await.unwrap();
    assert_eq!(v, vec![0.5, 0.25, 0.125]);
}

/// **Test: Batch embed keeps input order even when the API returns items out of order.**
#[tokio::test]
async fn embed_batch_orders_by_index() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(embeddings_body(&[(1, &[0.0, 1.0]), (0, &[1.0, 0.0])]))
        .create_async()
        .await;

    let service = service_for(&server);
    let texts = vec!["first".to_string(), "second".to_string()];
    let out = service.embed_batch(&texts).await.unwrap();
    assert_eq!(out, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

/// **Test: A response with fewer vectors than inputs is an error.**
#[tokio::test]
async fn embed_batch_count_mismatch_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(embeddings_body(&[(0, &[1.0])]))
        .create_async()
        .await;

    let service = service_for(&server);
    let texts = vec!["a".to_string(), "b".to_string()];
    let err = service.embed_batch(&texts).await.unwrap_err();
    assert!(err.to_string().contains("Expected 2 embeddings, got 1"));
}

/// **Test: Empty batch short-circuits without any HTTP call.**
#[tokio::test]
async fn embed_batch_empty_input_skips_api() {
    let service = OpenAIEmbedding::with_api_key("sk-test".to_string());
    let out = service.embed_batch(&[]).await.unwrap();
    assert!(out.is_empty());
    assert_eq!(service.model_name(), "text-embedding-3-small");
}

/// **Test: Server errors surface as errors, not empty vectors.**
#[tokio::test]
async fn embed_server_error_is_propagated() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#)
        .create_async()
        .await;

    let service = service_for(&server);
    assert!(service.embed("anything").await.is_err());
}

/// **Test: Real API single embed (ignored by default).**
#[tokio::test]
#[ignore] // Requires API key and quota: cargo test -p openai-embedding -- --ignored
async fn real_api_embed() {
    let root_env = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../.env");
    let _ = dotenvy::from_path(root_env);
    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY must be set for this test (or in root .env)");

    let service = OpenAIEmbedding::with_api_key(api_key);
    let embedding = service.embed("What is an EMI?").await.unwrap();
    assert_eq!(embedding.len(), 1536);
}
