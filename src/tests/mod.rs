//! End-to-end tests against an in-process fake of the MCP server.


use crate::{Config, Prober, Reporter, Result, RunSummary, Runner, TestCase};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{collections::HashMap, io, net::SocketAddr, time::Duration};
use tokio::net::TcpListener;
use url::Url;

const TOOLS: &[&str] = &[
    "search_youtube_videos",
    "openai_completion",
    "rewrite_text",
    "summarize_text",
    "expand_text",
    "fix_grammar",
    "translate_text",
    "simplify_text",
    "analyze_video_landscape",
];

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

async fn youtube_search(Query(params): Query<HashMap<String, String>>) -> Response {
    let Some(query) = params.get("query").filter(|q| !q.is_empty()) else {
        return error(StatusCode::BAD_REQUEST, "Query parameter is required");
    };
    let max_results = params
        .get("maxResults")
        .and_then(|m| m.parse().ok())
        .unwrap_or(20usize);

    let videos: Vec<Value> = (0..max_results)
        .map(|i| json!({ "videoId": format!("vid{i}"), "title": format!("{query} #{i}") }))
        .collect();
    Json(videos).into_response()
}

async fn completion(Json(body): Json<Value>) -> Response {
    if body["prompt"].as_str().is_none() {
        return error(StatusCode::BAD_REQUEST, "Prompt is required");
    }
    Json(json!({ "completion": "Four" })).into_response()
}

async fn text(Path(action): Path<String>, Json(body): Json<Value>) -> Response {
    let Some(text) = body["text"].as_str() else {
        return error(StatusCode::BAD_REQUEST, "Text is required");
    };
    Json(json!({ "result": format!("{action}: {text}") })).into_response()
}

async fn mcp(Json(body): Json<Value>) -> Response {
    match body["method"].as_str() {
        Some("tools/list") => {
            let tools: Vec<Value> = TOOLS.iter().map(|name| json!({ "name": name })).collect();
            Json(json!({ "tools": tools })).into_response()
        }
        Some("tools/call") => {
            let name = body["params"]["name"].as_str().unwrap_or_default();
            if TOOLS.contains(&name) {
                Json(json!({ "content": [{ "type": "text", "text": format!("{name} ok") }] }))
                    .into_response()
            } else {
                error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Unknown tool: {name}"),
                )
            }
        }
        _ => error(StatusCode::BAD_REQUEST, "Unknown method"),
    }
}

/// Reports back the content type and raw body it received.
async fn echo(headers: HeaderMap, body: Bytes) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    Json(json!({
        "contentType": content_type,
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn slow(Query(params): Query<HashMap<String, u64>>) -> Json<Value> {
    let ms = params.get("ms").copied().unwrap_or(1000);
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({ "slept": ms }))
}

async fn html() -> Html<&'static str> {
    Html("<html><body>not json</body></html>")
}

async fn huge() -> Json<Value> {
    Json(json!({ "items": vec!["lorem ipsum dolor sit amet"; 200] }))
}

async fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found")
}

fn app() -> Router {
    Router::new()
        .route("/youtube/search", get(youtube_search))
        .route("/openai/completion", post(completion))
        .route("/text/{action}", post(text))
        .route("/mcp", post(mcp))
        .route("/echo", get(echo).post(echo))
        .route("/slow", get(slow))
        .route("/html", get(html))
        .route("/huge", get(huge))
        .fallback(not_found)
}

/// A fake MCP server listening on an ephemeral local port
pub struct FakeServer {
    addr: SocketAddr,
}

impl FakeServer {
    pub async fn start() -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app()).await.unwrap();
        });
        Ok(Self { addr })
    }

    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn config(&self) -> Config {
        Config::new()
            .with_base_url(self.base_url())
            .with_timeout(Duration::from_secs(5))
    }

    pub fn prober(&self) -> Prober {
        Prober::new(&self.config()).unwrap()
    }
}

/// A base URL nothing is listening on
pub async fn closed_base_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// Runs `cases` and returns the summary along with the uncolored output.
pub async fn run(runner: &Runner, cases: &[TestCase]) -> Result<(RunSummary, String)> {
    let mut reporter = Reporter::new(Vec::new(), 500).without_color();
    let summary = runner.run(cases, &mut reporter).await?;
    let output = String::from_utf8(reporter.into_inner()).unwrap();
    Ok((summary, output))
}
