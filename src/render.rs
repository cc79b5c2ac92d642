//! Turns a reply into something printable.
//!
//! [`render`] is pure: same input, same view, no I/O. The REPL prints the
//! view through its [`Display`](std::fmt::Display) impl.

use std::fmt;

use crate::consts::EMPTY_LIST;
use crate::response::{ResponseKind, TaskResponse, pretty};

/// One labelled line of a tool view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: &'static str,
    pub value: String,
}

impl Row {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// What the response panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayView {
    /// Nothing submitted yet.
    Placeholder,
    /// Server-reported error.
    Error(String),
    /// A known tool shape as labelled rows. The first row is always `tool`.
    Fields(Vec<Row>),
    /// Free text (LLM answer or note).
    Text(String),
    /// Pretty-printed JSON of an unrecognized reply.
    Dump(String),
}

impl DisplayView {
    /// Value of the row with the given label, if the view has one.
    pub fn row(&self, label: &str) -> Option<&str> {
        match self {
            DisplayView::Fields(rows) => rows
                .iter()
                .find(|r| r.label == label)
                .map(|r| r.value.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for DisplayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayView::Placeholder => write!(f, "(no result yet)"),
            DisplayView::Error(message) => write!(f, "✗ error: {message}"),
            DisplayView::Fields(rows) => {
                let width = rows
                    .iter()
                    .map(|r| r.label.chars().count())
                    .max()
                    .unwrap_or(0);
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "  {:<width$}  {}", row.label, row.value)?;
                }
                Ok(())
            }
            DisplayView::Text(text) | DisplayView::Dump(text) => f.write_str(text),
        }
    }
}

/// Render a reply, or the placeholder when there is none.
pub fn render(data: Option<&TaskResponse>) -> DisplayView {
    match data {
        Some(resp) => view(resp.kind()),
        None => DisplayView::Placeholder,
    }
}

fn view(kind: ResponseKind) -> DisplayView {
    match kind {
        ResponseKind::Error { message } => DisplayView::Error(message),
        ResponseKind::Compute {
            tool,
            input,
            result,
        } => {
            let mut rows = vec![Row::new("tool", tool.as_str())];
            if let Some(input) = input {
                rows.push(Row::new("input", input));
            }
            rows.push(Row::new("result", result));
            DisplayView::Fields(rows)
        }
        ResponseKind::Todo { action, item, list } => {
            let mut rows = vec![Row::new("tool", "todo")];
            if let Some(action) = action {
                rows.push(Row::new("action", action));
            }
            if let Some(item) = item {
                rows.push(Row::new("item", item));
            }
            let list = if list.is_empty() {
                EMPTY_LIST.to_string()
            } else {
                list.join(", ")
            };
            rows.push(Row::new("list", list));
            DisplayView::Fields(rows)
        }
        ResponseKind::Weather {
            tool,
            city,
            temp_c,
            conditions,
            wind_mps,
        } => {
            let mut rows = vec![
                Row::new("tool", tool.as_str()),
                Row::new("city", city),
                Row::new("temp °C", temp_c),
                Row::new("conditions", conditions),
            ];
            if let Some(wind) = wind_mps {
                rows.push(Row::new("wind m/s", wind));
            }
            DisplayView::Fields(rows)
        }
        ResponseKind::Stocks {
            tool,
            ticker,
            price,
            change,
            percent_change,
        } => {
            let mut rows = vec![
                Row::new("tool", tool.as_str()),
                Row::new("ticker", ticker),
                Row::new("price", price),
            ];
            if let Some(change) = change {
                rows.push(Row::new("change", change));
            }
            if let Some(pct) = percent_change {
                rows.push(Row::new("change %", pct));
            }
            DisplayView::Fields(rows)
        }
        ResponseKind::Answer { text } | ResponseKind::Note { text } => DisplayView::Text(text),
        ResponseKind::Unknown(raw) => DisplayView::Dump(pretty(&raw)),
    }
}
