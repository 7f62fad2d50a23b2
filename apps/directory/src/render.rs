use std::fmt::Write as _;

use client_core::ControllerState;
use serde::Serialize;

/// Output shape of `--json`.
#[derive(Serialize)]
pub struct DirectoryView<'a> {
    pub source: &'static str,
    #[serde(flatten)]
    pub state: &'a ControllerState,
}

pub fn render_json(state: &ControllerState, from_fallback: bool) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DirectoryView {
        source: source_label(state, from_fallback),
        state,
    })
}

pub fn render_table(state: &ControllerState, from_fallback: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<24}  {:<32}  {}",
        "ID", "NAME", "EMAIL", "POSITION"
    );
    for record in &state.records {
        let _ = writeln!(
            out,
            "{:>6}  {:<24}  {:<32}  {}",
            record.id.0,
            record.full_name(),
            record.email,
            record.position
        );
    }
    if state.is_empty() {
        out.push_str("(no employees)\n");
    }
    let _ = write!(
        out,
        "page {}/{} ({} per page, {} total) [{}]",
        state.page.current_page,
        state.page.last_page,
        state.page.per_page,
        state.page.total,
        source_label(state, from_fallback)
    );
    out
}

fn source_label(state: &ControllerState, from_fallback: bool) -> &'static str {
    if state.degraded {
        "unavailable"
    } else if from_fallback {
        "sample"
    } else {
        "live"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{Employee, EmployeeId, PageInfo};

    fn state() -> ControllerState {
        ControllerState {
            records: vec![Employee {
                id: EmployeeId(7),
                first_name: "Lina".to_string(),
                last_name: "Cruz".to_string(),
                email: "lina@corp.test".to_string(),
                position: "Designer".to_string(),
            }],
            page: PageInfo {
                current_page: 1,
                per_page: 10,
                total: 1,
                last_page: 1,
            },
            ..ControllerState::default()
        }
    }

    #[test]
    fn table_lists_each_record_and_page_footer() {
        let table = render_table(&state(), false);
        assert!(table.contains("Lina Cruz"));
        assert!(table.contains("lina@corp.test"));
        assert!(table.ends_with("page 1/1 (10 per page, 1 total) [live]"));
    }

    #[test]
    fn degraded_empty_state_is_labelled_unavailable() {
        let state = ControllerState {
            degraded: true,
            ..ControllerState::default()
        };
        let table = render_table(&state, false);
        assert!(table.contains("(no employees)"));
        assert!(table.ends_with("[unavailable]"));
    }

    #[test]
    fn json_output_flattens_state_fields() {
        let json = render_json(&state(), true).expect("render");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["source"], "sample");
        assert_eq!(value["records"][0]["id"], 7);
        assert_eq!(value["page"]["per_page"], 10);
        assert_eq!(value["degraded"], false);
        assert_eq!(value["error"], serde_json::Value::Null);
    }
}
