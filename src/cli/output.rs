use anyhow::Result;
use serde_json::Value;

use crate::core::present::{DisplayRow, Listing, Presented};
use crate::core::terminal;

/// Text for a presented result, or `None` for an empty listing.
pub(crate) fn format(presented: &Presented) -> Result<Option<String>> {
    let text = match presented {
        Presented::Verbatim(Value::String(body)) => body.clone(),
        Presented::Verbatim(value) => serde_json::to_string(value)?,
        Presented::Json(value) => serde_json::to_string_pretty(value)?,
        Presented::Table { rows, .. } if rows.is_empty() => return Ok(None),
        Presented::Table { listing, rows } => table(listing, rows),
    };
    Ok(Some(text))
}

fn table(listing: &Listing, rows: &[DisplayRow]) -> String {
    let headers: Vec<&str> = listing.columns.iter().map(|c| c.header).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| listing.columns.iter().map(|c| row.cell(c.key)).collect())
        .collect();
    terminal::render_table(&headers, &cells)
        .trim_end()
        .to_string()
}

pub(crate) fn emit(presented: &Presented) -> Result<()> {
    match (format(presented)?, presented) {
        (Some(text), _) => println!("{}", text),
        (None, Presented::Table { listing, .. }) => terminal::print_empty(listing.noun),
        (None, _) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paginate::SortOrder;
    use crate::core::present::{OutputMode, Presenter, ResourceKind};
    use serde_json::json;

    #[test]
    fn verbatim_keeps_key_order_and_strings() {
        let body = json!({"zeta": 1, "alpha": {"created_at": 1700000000}});
        assert_eq!(
            format(&Presented::Verbatim(body)).unwrap().unwrap(),
            r#"{"zeta":1,"alpha":{"created_at":1700000000}}"#
        );
        assert_eq!(
            format(&Presented::Verbatim(json!("<html>bad gateway</html>")))
                .unwrap()
                .unwrap(),
            "<html>bad gateway</html>"
        );
    }

    #[test]
    fn json_is_pretty_printed() {
        let text = format(&Presented::Json(json!({"id": "thread_1"})))
            .unwrap()
            .unwrap();
        assert_eq!(text, "{\n  \"id\": \"thread_1\"\n}");
    }

    #[test]
    fn tables_use_listing_columns() {
        console::set_colors_enabled(false);
        let presenter = Presenter::new(OutputMode::Display, ResourceKind::Thread, SortOrder::Desc);
        let presented =
            presenter.present_list(json!([{"id": "thread_1", "created_at": 1700000000}]));
        let text = format(&presented).unwrap().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID        Created");
        assert_eq!(lines[1], "thread_1  2023-11-14T22:13:20Z");
    }

    #[test]
    fn empty_tables_have_no_text() {
        let presenter = Presenter::new(OutputMode::Display, ResourceKind::File, SortOrder::Desc);
        assert_eq!(format(&presenter.present_list(json!({"data": []}))).unwrap(), None);
    }
}
