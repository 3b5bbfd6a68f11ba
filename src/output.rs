//! Terminal rendering for command results.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Outcome marker printed in front of a one-line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
    Fail,
}

impl Status {
    fn marker(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Fail => "fail",
        }
    }
}

/// Renders identity or config rows without printing them.
pub fn render<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table if rows.is_empty() => "(none)".to_string(),
        OutputFormat::Table => Table::new(rows).with(Style::psql()).to_string(),
        OutputFormat::Json => to_json(&rows),
    }
}

pub fn show<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    println!("{}", render(rows, format));
}

pub fn json<T: Serialize + ?Sized>(item: &T) {
    println!("{}", to_json(item));
}

/// Failures go to stderr so piped JSON stays clean.
pub fn status(status: Status, msg: &str) {
    match status {
        Status::Fail => eprintln!("[{}] {}", status.marker(), msg),
        _ => println!("[{}] {}", status.marker(), msg),
    }
}

pub fn field(key: &str, value: &str) {
    println!("{key:>18} = {value}");
}

fn to_json<T: Serialize + ?Sized>(item: &T) -> String {
    serde_json::to_string_pretty(item).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        state: &'static str,
        user: &'static str,
    }

    #[test]
    fn test_render_json_keeps_field_names() {
        let rows = [Row { state: "unauthenticated", user: "-" }];
        let value: serde_json::Value =
            serde_json::from_str(&render(&rows, OutputFormat::Json)).unwrap();
        assert_eq!(value[0]["state"], "unauthenticated");
    }

    #[test]
    fn test_render_table_handles_empty_rows() {
        let rows: [Row; 0] = [];
        assert_eq!(render(&rows, OutputFormat::Table), "(none)");

        let rows = [Row { state: "direct_authenticated", user: "Ana" }];
        let table = render(&rows, OutputFormat::Table);
        assert!(table.contains("state"));
        assert!(table.contains("Ana"));
    }
}
