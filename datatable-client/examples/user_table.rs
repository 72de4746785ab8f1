// datatable-client/examples/user_table.rs
// In-process demo: a small axum API plus a table driven against it.

use std::collections::HashMap;

use anyhow::Result;
use axum::{Json, Router, extract::Query, routing::get};
use datatable_client::{DataTable, SortDirection, TableConfig};
use serde_json::{Value, json};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let app = Router::new().route("/api/users", get(list_users));
        axum::serve(listener, app).await.expect("server failed");
    });

    let config = TableConfig::new(format!("http://{addr}/api/users")).with_per_page(10);
    let table: DataTable = DataTable::new(config).await?;
    print_page("initial load", &table).await;

    table.set_sort("id", Some(SortDirection::Desc)).await;
    print_page("sorted by id desc", &table).await;

    table.set_search("user-1").await;
    print_page("searched for \"user-1\"", &table).await;

    table.set_search("").await;
    table.set_page(3).await;
    print_page("page 3", &table).await;

    Ok(())
}

async fn print_page(label: &str, table: &DataTable) {
    let state = table.state().await;
    println!("== {label}");
    if let Some(error) = &state.error {
        println!("   error: {error}");
        return;
    }
    for row in &state.items {
        println!("   #{} {}", row["id"], row["name"].as_str().unwrap_or("?"));
    }
    if let Some(pagination) = &state.pagination {
        println!(
            "   page {}/{} ({} total), window {:?}",
            pagination.current_page,
            pagination.last_page,
            pagination.total,
            pagination.page_numbers(5)
        );
    }
}

async fn list_users(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let per_page: u32 = params
        .get("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(15);

    let mut users: Vec<Value> = (1..=45u64)
        .map(|id| json!({"id": id, "name": format!("user-{id}")}))
        .collect();
    if let Some(search) = params.get("search") {
        users.retain(|user| user["name"].as_str().unwrap().contains(search.as_str()));
    }
    if params.get("sort_by").map(String::as_str) == Some("id")
        && params.get("sort_direction").map(String::as_str) == Some("desc")
    {
        users.reverse();
    }

    let total = users.len() as u64;
    let last_page = total.div_ceil(per_page as u64).max(1) as u32;
    let start = (page as u64 - 1) * per_page as u64;
    let data: Vec<Value> = users
        .into_iter()
        .skip(start as usize)
        .take(per_page as usize)
        .collect();
    let (from, to) = if data.is_empty() {
        (Value::Null, Value::Null)
    } else {
        (json!(start + 1), json!(start + data.len() as u64))
    };

    Json(json!({
        "current_page": page,
        "data": data,
        "last_page": last_page,
        "per_page": per_page,
        "total": total,
        "from": from,
        "to": to
    }))
}
