use crate::archive::RawDocument;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use tracing::warn;

/// Rows in document order, each row the trimmed text of its data cells in
/// document order.
pub type ParsedTable = Vec<Vec<String>>;

/// Per-archive mapping from company code to parsed table. Equality is exact
/// and order-sensitive on rows and cells.
pub type SnapshotSet = BTreeMap<String, ParsedTable>;

/// Entry names carry a 3-uppercase-letter company code prefix.
static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{3})").expect("company code regex should be valid"));

static TABLE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("CSS selector for tables should be valid"));
static TR_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("CSS selector for rows should be valid"));
static TD_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("CSS selector for cells should be valid"));

/// Convert one archive's raw entries into a SnapshotSet.
///
/// Per-entry failures (no company code prefix, no table in the document)
/// skip that entry with a diagnostic and never abort the archive. When two
/// entries resolve to the same company code, the later one wins.
pub fn parse_snapshot(docs: &[RawDocument]) -> SnapshotSet {
    let mut snapshot = SnapshotSet::new();
    for doc in docs {
        let code = match CODE_RE.captures(&doc.name) {
            Some(caps) => caps[1].to_string(),
            None => {
                warn!(entry = %doc.name, "entry name has no company code prefix, skipping");
                continue;
            }
        };
        let html = String::from_utf8_lossy(&doc.bytes);
        match parse_first_table(&html) {
            Some(table) => {
                snapshot.insert(code, table);
            }
            None => {
                warn!(entry = %doc.name, "no table found in entry, skipping");
            }
        }
    }
    snapshot
}

/// Extract the first `<table>` in document order. Header cells (`th`) are
/// not data, so header-only rows come out empty.
fn parse_first_table(html: &str) -> Option<ParsedTable> {
    let doc = Html::parse_document(html);
    let table = doc.select(&TABLE_SEL).next()?;
    let mut rows = Vec::new();
    for tr in table.select(&TR_SEL) {
        let cells: Vec<String> = tr
            .select(&TD_SEL)
            .map(|td| td.text().collect::<String>().trim().to_string())
            .collect();
        rows.push(cells);
    }
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,snapdup::parse=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn doc(name: &str, html: &str) -> RawDocument {
        RawDocument {
            name: name.to_string(),
            bytes: html.as_bytes().to_vec(),
        }
    }

    const SIMPLE_TABLE: &str = r#"<html><body>
        <table>
          <tr><th>Date</th><th>Close</th></tr>
          <tr><td> 10 </td><td>20</td></tr>
          <tr><td>30</td><td>40</td></tr>
        </table>
    </body></html>"#;

    #[test]
    fn extracts_trimmed_data_cells_per_row() {
        let snap = parse_snapshot(&[doc("ABC_2021.html", SIMPLE_TABLE)]);
        let table = snap.get("ABC").expect("ABC table");
        // header-only row yields an empty row: th is not data
        assert_eq!(
            *table,
            vec![
                vec![],
                vec!["10".to_string(), "20".to_string()],
                vec!["30".to_string(), "40".to_string()],
            ]
        );
    }

    #[test]
    fn lowercase_prefix_is_skipped_without_aborting() {
        init_test_logging();
        let snap = parse_snapshot(&[
            doc("abc_2021.html", SIMPLE_TABLE),
            doc("XYZ_2021.html", SIMPLE_TABLE),
        ]);
        assert!(!snap.contains_key("abc"));
        assert!(snap.contains_key("XYZ"));
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn entry_without_table_is_skipped() {
        init_test_logging();
        let snap = parse_snapshot(&[
            doc("ABC_2021.html", "<html><p>maintenance page</p></html>"),
            doc("DEF_2021.html", SIMPLE_TABLE),
        ]);
        assert!(!snap.contains_key("ABC"));
        assert!(snap.contains_key("DEF"));
    }

    #[test]
    fn only_first_table_is_parsed() {
        let html = r#"<table><tr><td>first</td></tr></table>
                      <table><tr><td>second</td></tr></table>"#;
        let snap = parse_snapshot(&[doc("ABC_2021.html", html)]);
        assert_eq!(snap["ABC"], vec![vec!["first".to_string()]]);
    }

    #[test]
    fn later_entry_wins_on_duplicate_code() {
        let first = "<table><tr><td>old</td></tr></table>";
        let second = "<table><tr><td>new</td></tr></table>";
        let snap = parse_snapshot(&[doc("ABC_1.html", first), doc("ABC_2.html", second)]);
        assert_eq!(snap["ABC"], vec![vec!["new".to_string()]]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let docs = vec![doc("ABC_2021.html", SIMPLE_TABLE), doc("DEF_2021.html", SIMPLE_TABLE)];
        assert_eq!(parse_snapshot(&docs), parse_snapshot(&docs));
    }
}
