use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, time::Duration};

/// HTTP verb used by a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
        }
    }
}

/// Outcome a test case is expected to observe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expect {
    /// The server answers with HTTP 200 and a JSON body
    #[default]
    Success,
    /// The request fails: non-200 status, unreadable body or transport fault
    Failure,
}

/// A single request to issue against the server under test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub method: Method,
    /// Path relative to the base URL, including any query string
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default)]
    pub expect: Expect,
}

impl TestCase {
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method: Method::Get,
            path: path.into(),
            body: None,
            expect: Expect::Success,
        }
    }

    pub fn post(name: impl Into<String>, path: impl Into<String>, body: Value) -> Self {
        Self {
            name: name.into(),
            method: Method::Post,
            path: path.into(),
            body: Some(body),
            expect: Expect::Success,
        }
    }

    /// Marks the case as exercising the server's error handling.
    pub fn expect_failure(mut self) -> Self {
        self.expect = Expect::Failure;
        self
    }
}

/// What came back from probing one endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProbeResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

impl ProbeResult {
    pub fn response(status: u16, data: Value, elapsed: Duration) -> Self {
        Self {
            status: Some(status),
            data: Some(data),
            error: None,
            elapsed,
        }
    }

    pub fn fault(err: &crate::Error, elapsed: Duration) -> Self {
        Self {
            status: err.status(),
            data: None,
            error: Some(err.describe()),
            elapsed,
        }
    }

    pub fn success(&self) -> bool {
        self.error.is_none() && self.status == Some(200)
    }
}

fn as_millis<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(elapsed.as_millis() as u64)
}

/// A probe result judged against its case's expectation
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub method: Method,
    pub path: String,
    pub expect: Expect,
    pub passed: bool,
    pub result: ProbeResult,
}

impl CaseOutcome {
    pub fn classify(case: &TestCase, result: ProbeResult) -> Self {
        let passed = match case.expect {
            Expect::Success => result.success(),
            Expect::Failure => !result.success(),
        };
        Self {
            name: case.name.clone(),
            method: case.method,
            path: case.path.clone(),
            expect: case.expect,
            passed,
            result,
        }
    }
}

/// Tally of a completed run, outcomes kept in case order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub outcomes: Vec<CaseOutcome>,
}

impl RunSummary {
    pub fn record(&mut self, outcome: CaseOutcome) {
        if outcome.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Process exit status for the run: 0 when every case matched, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.all_passed() { 0 } else { 1 }
    }
}
