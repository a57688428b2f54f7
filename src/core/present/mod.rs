pub mod listing;
pub mod timestamps;

use serde_json::Value;

use crate::core::paginate::SortOrder;
use crate::core::shape::Payload;

pub use listing::{DisplayRow, Listing, ResourceKind};
pub use timestamps::convert_timestamps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Server payload, untouched.
    Raw,
    /// JSON with timestamps converted.
    Structured,
    /// Tables for listings, converted JSON for single items.
    Display,
}

impl OutputMode {
    /// `--raw` wins over `--json`.
    pub fn from_flags(json: bool, raw: bool) -> Self {
        if raw {
            OutputMode::Raw
        } else if json {
            OutputMode::Structured
        } else {
            OutputMode::Display
        }
    }
}

/// What the renderer receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Presented {
    Verbatim(Value),
    Json(Value),
    Table {
        listing: &'static Listing,
        rows: Vec<DisplayRow>,
    },
}

pub struct Presenter {
    mode: OutputMode,
    listing: &'static Listing,
    order: SortOrder,
}

impl Presenter {
    pub fn new(mode: OutputMode, kind: ResourceKind, order: SortOrder) -> Self {
        Self {
            mode,
            listing: kind.listing(),
            order,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Present a collection payload (or an already collected item list).
    ///
    /// A payload that turns out not to be a collection is shown as a single
    /// item instead of failing.
    pub fn present_list(&self, payload: Value) -> Presented {
        if self.mode == OutputMode::Raw {
            return Presented::Verbatim(payload);
        }
        let payload = Payload::classify(payload, Some(self.listing.plural_key));
        if !payload.is_collection() {
            let item = payload.into_items().pop().unwrap_or(Value::Null);
            return self.present_item(item);
        }
        let items: Vec<Value> = payload
            .into_items()
            .into_iter()
            .map(convert_timestamps)
            .collect();

        match self.mode {
            OutputMode::Structured => Presented::Json(Value::Array(items)),
            _ => Presented::Table {
                listing: self.listing,
                rows: self.rows(items),
            },
        }
    }

    /// Present a single record.
    pub fn present_item(&self, payload: Value) -> Presented {
        match self.mode {
            OutputMode::Raw => Presented::Verbatim(payload),
            _ => Presented::Json(convert_timestamps(payload)),
        }
    }

    fn rows(&self, items: Vec<Value>) -> Vec<DisplayRow> {
        let rows: Vec<DisplayRow> = items
            .into_iter()
            .map(|item| DisplayRow::from_record(item, self.listing.derived))
            .collect();
        match self.listing.sort_key {
            Some(key) => listing::sort_rows(rows, key, self.order),
            None => rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn runs_payload() -> Value {
        json!({
            "object": "list",
            "data": [
                {"id": "run_a", "status": "completed", "created_at": 1704067200, "completed_at": 1704153600},
                {"id": "run_b", "status": "failed", "created_at": 1704067300, "completed_at": null},
                {"id": "run_c", "status": "completed", "created_at": 1704067400, "completed_at": 1704067500}
            ],
            "has_more": false
        })
    }

    #[test]
    fn raw_wins_over_json() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Raw);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Structured);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Display);
    }

    #[test]
    fn raw_mode_returns_the_payload_untouched() {
        let payload = runs_payload();
        let p = Presenter::new(OutputMode::Raw, ResourceKind::Run, SortOrder::Asc);
        assert_eq!(p.present_list(payload.clone()), Presented::Verbatim(payload.clone()));
        assert_eq!(p.present_item(payload.clone()), Presented::Verbatim(payload));
    }

    #[test]
    fn structured_mode_converts_but_does_not_derive() {
        let p = Presenter::new(OutputMode::Structured, ResourceKind::Run, SortOrder::Asc);
        let Presented::Json(Value::Array(items)) = p.present_list(runs_payload()) else {
            panic!("expected a JSON array");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["created_at"], json!("2024-01-01T00:00:00Z"));
        assert!(items[0].get("completed_display").is_none());
    }

    #[test]
    fn display_mode_derives_and_sorts_runs() {
        let p = Presenter::new(OutputMode::Display, ResourceKind::Run, SortOrder::Asc);
        let Presented::Table { listing, rows } = p.present_list(runs_payload()) else {
            panic!("expected a table");
        };
        assert_eq!(listing.kind, ResourceKind::Run);
        let ids: Vec<String> = rows.iter().map(|r| r.cell("id")).collect();
        assert_eq!(ids, vec!["run_c", "run_a", "run_b"]);
        assert_eq!(rows[0].cell("completed_display"), "2024-01-01T00:05:00Z");
        assert_eq!(rows[2].cell("completed_display"), "failed");
    }

    #[test]
    fn agents_listing_joins_tool_types() {
        let p = Presenter::new(OutputMode::Display, ResourceKind::Agent, SortOrder::Desc);
        let payload = json!({"assistants": [{"id": "asst_1", "tools": [{"type": "file_search"}]}]});
        let Presented::Table { rows, .. } = p.present_list(payload) else {
            panic!("expected a table");
        };
        assert_eq!(rows[0].cell("tool_types"), "file_search");
    }

    #[test]
    fn unrecognised_list_shape_falls_back_to_single_item() {
        let p = Presenter::new(OutputMode::Display, ResourceKind::VectorStore, SortOrder::Desc);
        let out = p.present_list(json!({"id": "vs_1", "created_at": 1700000000}));
        assert_eq!(
            out,
            Presented::Json(json!({"id": "vs_1", "created_at": "2023-11-14T22:13:20Z"}))
        );

        let out = p.present_list(json!("gateway timeout"));
        assert_eq!(out, Presented::Json(json!("gateway timeout")));
    }

    #[test]
    fn item_list_from_paginator_is_accepted() {
        let p = Presenter::new(OutputMode::Display, ResourceKind::Thread, SortOrder::Desc);
        let Presented::Table { rows, .. } =
            p.present_list(json!([{"id": "thread_1", "created_at": 1700000000}]))
        else {
            panic!("expected a table");
        };
        assert_eq!(rows[0].cell("created_at"), "2023-11-14T22:13:20Z");
    }
}
