//! Basic example demonstrating fluent requests over the default wire.
//!
//! This example shows how to:
//! - Build a request with path segments and query parameters
//! - Fetch it asynchronously through the default transport
//! - Assert the status and deserialize the body
//!
//! Run with: `cargo run --example basic_fetch`

use fluent_wire::{Error, Request};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Post {
    #[serde(rename = "userId")]
    user_id: u32,
    id: u32,
    title: String,
    body: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("fluent_wire=debug,basic_fetch=info")
        .init();

    println!("=== GET Request Example ===");
    let post: Post = Request::get("https://jsonplaceholder.typicode.com")
        .path("posts")
        .path("1")
        .fetch_async()
        .await?
        .assert_status(200)?
        .json()?;

    println!("Post ID: {}", post.id);
    println!("Title: {}", post.title);
    println!();

    println!("=== JSON Navigation Example ===");
    let json = Request::get("https://jsonplaceholder.typicode.com")
        .path("users")
        .query("id", "1")
        .fetch_async()
        .await?
        .into_json()?;

    if let Some(name) = json.pointer("/0/name").and_then(|v| v.as_str()) {
        println!("User name: {name}");
    }

    Ok(())
}
