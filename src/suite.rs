//! Built-in case lists and loading of custom case files.

use crate::{Error, Result, TestCase};
use serde_json::{Value, json};
use std::path::Path;

/// Named group of built-in cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Suite {
    /// REST search/completion, MCP tools, and error handling
    #[default]
    Core,
    /// Text enhancement tools and routes
    Text,
    /// `Core` followed by `Text`
    All,
}

impl Suite {
    pub fn cases(self) -> Vec<TestCase> {
        match self {
            Suite::Core => core(),
            Suite::Text => text(),
            Suite::All => core().into_iter().chain(text()).collect(),
        }
    }
}

fn tool_call(name: &str, arguments: Value) -> Value {
    json!({
        "method": "tools/call",
        "params": {
            "name": name,
            "arguments": arguments,
        }
    })
}

pub fn core() -> Vec<TestCase> {
    vec![
        TestCase::get(
            "YouTube Search (REST)",
            "/youtube/search?query=javascript%20tutorial&maxResults=2",
        ),
        TestCase::post(
            "OpenAI Completion (REST)",
            "/openai/completion",
            json!({
                "prompt": "What is 2+2? Answer in one word.",
                "maxTokens": 10,
            }),
        ),
        TestCase::post("MCP Tools List", "/mcp", json!({ "method": "tools/list" })),
        TestCase::post(
            "MCP YouTube Search Tool",
            "/mcp",
            tool_call(
                "search_youtube_videos",
                json!({ "query": "typescript tutorial", "maxResults": 1 }),
            ),
        ),
        TestCase::post(
            "MCP OpenAI Completion Tool",
            "/mcp",
            tool_call(
                "openai_completion",
                json!({
                    "prompt": "Write a haiku about coding",
                    "model": "gpt-4o-mini",
                    "maxTokens": 100,
                }),
            ),
        ),
        TestCase::get("Error Handling - Invalid Endpoint", "/invalid-endpoint").expect_failure(),
        TestCase::get("Error Handling - Missing Query Parameter", "/youtube/search")
            .expect_failure(),
        TestCase::post(
            "Error Handling - Invalid MCP Tool",
            "/mcp",
            tool_call("invalid_tool", json!({})),
        )
        .expect_failure(),
    ]
}

const SAMPLE_TEXT: &str =
    "JavaScript is a programming language. It is used for web development. Many developers use it.";

pub fn text() -> Vec<TestCase> {
    // (tool name, REST route, arguments)
    let tools = [
        (
            "rewrite_text",
            "/text/rewrite",
            json!({ "text": SAMPLE_TEXT, "style": "professional" }),
        ),
        (
            "summarize_text",
            "/text/summarize",
            json!({ "text": SAMPLE_TEXT, "length": "short" }),
        ),
        (
            "expand_text",
            "/text/expand",
            json!({ "text": SAMPLE_TEXT, "targetLength": "double" }),
        ),
        (
            "fix_grammar",
            "/text/fix-grammar",
            json!({ "text": "javascript are a programing langauge" }),
        ),
        (
            "translate_text",
            "/text/translate",
            json!({ "text": SAMPLE_TEXT, "targetLanguage": "French" }),
        ),
        (
            "simplify_text",
            "/text/simplify",
            json!({
                "text": "JavaScript utilizes asynchronous programming paradigms to facilitate non-blocking operations.",
                "readingLevel": "elementary",
            }),
        ),
    ];

    let mut cases = Vec::with_capacity(tools.len() * 2 + 2);
    for (tool, route, arguments) in tools {
        cases.push(TestCase::post(
            format!("MCP Text Tool - {tool}"),
            "/mcp",
            tool_call(tool, arguments.clone()),
        ));
        cases.push(TestCase::post(format!("Text (REST) - {route}"), route, arguments));
    }

    cases.push(TestCase::post(
        "MCP Video Landscape Analysis",
        "/mcp",
        tool_call(
            "analyze_video_landscape",
            json!({ "query": "JavaScript tutorial for beginners", "maxVideos": 5 }),
        ),
    ));
    cases.push(
        TestCase::post(
            "Error Handling - Missing Text",
            "/text/rewrite",
            json!({ "style": "casual" }),
        )
        .expect_failure(),
    );

    cases
}

/// Reads a JSON array of cases from `path`.
pub fn load(path: &Path) -> Result<Vec<TestCase>> {
    let contents = std::fs::read_to_string(path)?;
    let cases: Vec<TestCase> = serde_json::from_str(&contents)?;
    if cases.is_empty() {
        return Err(Error::EmptySuite(path.to_path_buf()));
    }
    Ok(cases)
}
