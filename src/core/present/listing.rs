use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::core::paginate::SortOrder;

static DATE_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T").expect("static regex"));

pub const TOOL_TYPES: &str = "tool_types";
pub const COMPLETED_DISPLAY: &str = "completed_display";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub key: &'static str,
}

const fn col(header: &'static str, key: &'static str) -> Column {
    Column { header, key }
}

/// Display-only fields computed from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// `tools[].type` joined with `", "`.
    ToolTypes,
    /// Status label unless the run completed, then the completion time.
    CompletedDisplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Agent,
    Thread,
    Run,
    VectorStore,
    VectorStoreFile,
    File,
}

/// How one resource kind is laid out as a table.
#[derive(Debug, PartialEq)]
pub struct Listing {
    pub kind: ResourceKind,
    pub plural_key: &'static str,
    pub noun: &'static str,
    pub columns: &'static [Column],
    pub derived: &'static [Derivation],
    pub sort_key: Option<&'static str>,
}

static AGENTS: Listing = Listing {
    kind: ResourceKind::Agent,
    plural_key: "assistants",
    noun: "agents",
    columns: &[
        col("ID", "id"),
        col("Name", "name"),
        col("Model", "model"),
        col("Tools", TOOL_TYPES),
        col("Created", "created_at"),
    ],
    derived: &[Derivation::ToolTypes],
    sort_key: None,
};

static THREADS: Listing = Listing {
    kind: ResourceKind::Thread,
    plural_key: "threads",
    noun: "threads",
    columns: &[col("ID", "id"), col("Created", "created_at")],
    derived: &[],
    sort_key: None,
};

static RUNS: Listing = Listing {
    kind: ResourceKind::Run,
    plural_key: "runs",
    noun: "runs",
    columns: &[
        col("ID", "id"),
        col("Status", "status"),
        col("Created", "created_at"),
        col("Started", "started_at"),
        col("Completed", COMPLETED_DISPLAY),
    ],
    derived: &[Derivation::CompletedDisplay],
    sort_key: Some(COMPLETED_DISPLAY),
};

static VECTOR_STORES: Listing = Listing {
    kind: ResourceKind::VectorStore,
    plural_key: "vector_stores",
    noun: "vector stores",
    columns: &[
        col("ID", "id"),
        col("Name", "name"),
        col("Status", "status"),
        col("Bytes", "usage_bytes"),
        col("Created", "created_at"),
    ],
    derived: &[],
    sort_key: None,
};

static VECTOR_STORE_FILES: Listing = Listing {
    kind: ResourceKind::VectorStoreFile,
    plural_key: "files",
    noun: "vector store files",
    columns: &[
        col("ID", "id"),
        col("Filename", "filename"),
        col("Bytes", "bytes"),
        col("Status", "status"),
        col("Created", "created_at"),
    ],
    derived: &[],
    sort_key: None,
};

static FILES: Listing = Listing {
    kind: ResourceKind::File,
    plural_key: "files",
    noun: "files",
    columns: &[
        col("ID", "id"),
        col("Filename", "filename"),
        col("Bytes", "bytes"),
        col("Purpose", "purpose"),
        col("Status", "status"),
        col("Created", "created_at"),
    ],
    derived: &[],
    sort_key: None,
};

impl ResourceKind {
    pub fn listing(self) -> &'static Listing {
        match self {
            ResourceKind::Agent => &AGENTS,
            ResourceKind::Thread => &THREADS,
            ResourceKind::Run => &RUNS,
            ResourceKind::VectorStore => &VECTOR_STORES,
            ResourceKind::VectorStoreFile => &VECTOR_STORE_FILES,
            ResourceKind::File => &FILES,
        }
    }
}

/// A record shaped for tabular output.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    fields: Map<String, Value>,
}

impl DisplayRow {
    /// Build a row from a (timestamp-converted) record. Non-object records are
    /// kept under a `value` field so nothing is dropped.
    pub fn from_record(record: Value, derived: &[Derivation]) -> Self {
        let mut fields = match record {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        for derivation in derived {
            let (key, value) = match derivation {
                Derivation::ToolTypes => (TOOL_TYPES, tool_types(&fields)),
                Derivation::CompletedDisplay => (COMPLETED_DISPLAY, completed_display(&fields)),
            };
            fields.insert(key.to_string(), Value::String(value));
        }
        Self { fields }
    }

    /// Text shown in a table cell.
    pub fn cell(&self, key: &str) -> String {
        match self.fields.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

pub fn tool_types(fields: &Map<String, Value>) -> String {
    fields
        .get("tools")
        .and_then(Value::as_array)
        .map(|tools| {
            tools
                .iter()
                .filter_map(|t| t.get("type").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

pub fn completed_display(fields: &Map<String, Value>) -> String {
    let status = fields.get("status").and_then(Value::as_str).unwrap_or_default();
    if status != "completed" {
        return status.to_string();
    }
    match fields.get("completed_at") {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => status.to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn is_date_like(value: &str) -> bool {
    DATE_LIKE.is_match(value)
}

/// Date-like values first, ordered by their ISO text; everything else after,
/// in arrival order. Both partitions are stable.
pub fn sort_rows(rows: Vec<DisplayRow>, key: &str, order: SortOrder) -> Vec<DisplayRow> {
    let (mut dated, undated): (Vec<(String, DisplayRow)>, Vec<(String, DisplayRow)>) = rows
        .into_iter()
        .map(|row| (row.cell(key), row))
        .partition(|(value, _)| is_date_like(value));
    dated.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Asc => a.cmp(b),
        SortOrder::Desc => b.cmp(a),
    });
    dated
        .into_iter()
        .chain(undated)
        .map(|(_, row)| row)
        .collect()
}
