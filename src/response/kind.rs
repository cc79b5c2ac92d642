use std::fmt;

use serde_json::Value;

use super::{TaskResponse, coerce, display_or_na, is_truthy};

/// Server capabilities that have a dedicated display template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Calculator,
    CodeEval,
    Todo,
    Weather,
    WeatherReal,
    Stocks,
    StocksReal,
    LlmFallback,
}

impl Tool {
    pub const ALL: &[Tool] = &[
        Tool::Calculator,
        Tool::CodeEval,
        Tool::Todo,
        Tool::Weather,
        Tool::WeatherReal,
        Tool::Stocks,
        Tool::StocksReal,
        Tool::LlmFallback,
    ];

    /// Exact, case-sensitive match on the wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Calculator => "calculator",
            Tool::CodeEval => "code_eval",
            Tool::Todo => "todo",
            Tool::Weather => "weather",
            Tool::WeatherReal => "weather_real",
            Tool::Stocks => "stocks",
            Tool::StocksReal => "stocks_real",
            Tool::LlmFallback => "llm_fallback",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reply classified into one of the shapes the client knows how to show.
///
/// Values are already coerced to display strings. `Option` fields are rows
/// that only appear when the server sent them; plain `String` fields fall
/// back to the `N/A` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseKind {
    /// The server reported a failure in a truthy `error` field.
    Error { message: String },
    /// `calculator` or `code_eval`.
    Compute {
        tool: Tool,
        input: Option<String>,
        result: String,
    },
    Todo {
        action: Option<String>,
        item: Option<String>,
        list: Vec<String>,
    },
    /// `weather` or `weather_real`.
    Weather {
        tool: Tool,
        city: String,
        temp_c: String,
        conditions: String,
        wind_mps: Option<String>,
    },
    /// `stocks` or `stocks_real`.
    Stocks {
        tool: Tool,
        ticker: String,
        price: String,
        change: Option<String>,
        percent_change: Option<String>,
    },
    /// `llm_fallback`: free text, empty when the server sent none.
    Answer { text: String },
    Note { text: String },
    /// Nothing recognizable; carries the raw reply.
    Unknown(Value),
}

/// Classify a reply. Never fails: unrecognized shapes become [`ResponseKind::Unknown`].
pub fn classify(resp: &TaskResponse) -> ResponseKind {
    if let Some(error) = resp.field("error")
        && is_truthy(error)
    {
        return ResponseKind::Error {
            message: coerce(error),
        };
    }

    if let Some(tool) = resp.tool_tag().and_then(Tool::from_tag) {
        return classify_tool(tool, resp);
    }

    if let Some(note) = resp.field("note") {
        return ResponseKind::Note { text: coerce(note) };
    }

    ResponseKind::Unknown(resp.as_value().clone())
}

fn classify_tool(tool: Tool, resp: &TaskResponse) -> ResponseKind {
    let optional = |key: &str| resp.field(key).map(coerce);
    let nested = |key: &str| display_or_na(resp.nested_field(key));
    let nested_optional = |key: &str| resp.nested_field(key).map(coerce);

    match tool {
        Tool::Calculator | Tool::CodeEval => ResponseKind::Compute {
            tool,
            input: optional("input"),
            result: display_or_na(resp.field("result")),
        },
        Tool::Todo => ResponseKind::Todo {
            action: optional("action"),
            item: optional("item"),
            list: match resp.field("list") {
                Some(Value::Array(items)) => items.iter().map(coerce).collect(),
                _ => Vec::new(),
            },
        },
        Tool::Weather | Tool::WeatherReal => ResponseKind::Weather {
            tool,
            city: nested("city"),
            temp_c: nested("temp_c"),
            conditions: nested("conditions"),
            wind_mps: nested_optional("wind_mps"),
        },
        Tool::Stocks | Tool::StocksReal => ResponseKind::Stocks {
            tool,
            ticker: nested("ticker"),
            price: nested("price"),
            change: nested_optional("change"),
            percent_change: nested_optional("percent_change"),
        },
        Tool::LlmFallback => ResponseKind::Answer {
            text: optional("answer").unwrap_or_default(),
        },
    }
}
