//! Reading and writing table documents.
//!
//! Three on-disk formats are understood, picked by file extension:
//! - `.json` / `.toml`: a [`TableDocument`] with an optional `head` and `rows`
//! - anything else: delimited text, first line is the header
//!
//! In delimited text the separator is a tab if the header contains one, else
//! `|` if present, else `,`. Header cells may carry class tokens in brackets,
//! e.g. `Age [sort-numeric]`. Lines starting with `#` are comments.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Cell, ClassList, Table};

/// Errors that can occur while loading a table document.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The file could not be read.
    #[error("failed to read table: {0}")]
    Read(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("invalid JSON table: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed.
    #[error("invalid TOML table: {0}")]
    Toml(#[from] toml::de::Error),

    /// The header cell syntax could not be parsed.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The document contains neither header nor rows.
    #[error("table is empty")]
    Empty,
}

/// Result type for table loading.
pub type Result<T> = std::result::Result<T, TableError>;

/// A cell as written in a document: bare text or text with classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellRepr {
    /// Just the text.
    Text(String),
    /// Text plus a `class` attribute.
    Full(Cell),
}

impl From<CellRepr> for Cell {
    fn from(repr: CellRepr) -> Self {
        match repr {
            CellRepr::Text(text) => Cell::new(text),
            CellRepr::Full(cell) => cell,
        }
    }
}

impl From<&Cell> for CellRepr {
    fn from(cell: &Cell) -> Self {
        if cell.classes.is_empty() {
            CellRepr::Text(cell.text.clone())
        } else {
            CellRepr::Full(cell.clone())
        }
    }
}

/// Serialized form of a [`Table`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDocument {
    /// Header cells. Omit to let `fix_table_head` promote the first row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Vec<CellRepr>>,
    /// Body rows.
    #[serde(default)]
    pub rows: Vec<Vec<CellRepr>>,
}

impl TableDocument {
    /// Build the in-memory table.
    pub fn into_table(self) -> Result<Table> {
        if self.head.is_none() && self.rows.is_empty() {
            return Err(TableError::Empty);
        }
        let rows = self.rows.into_iter().map(|r| r.into_iter().map(Cell::from).collect::<Vec<_>>());
        let table = match self.head {
            Some(head) => Table::new(head.into_iter().map(Cell::from).collect(), rows),
            None => Table::from_rows(rows),
        };
        warn_ragged(&table);
        Ok(table)
    }

    /// Snapshot a table, rows in their current order.
    pub fn from_table(table: &Table) -> Self {
        Self {
            head: table.head().map(|h| h.iter().map(CellRepr::from).collect()),
            rows: table
                .rows()
                .iter()
                .map(|r| r.cells.iter().map(CellRepr::from).collect())
                .collect(),
        }
    }
}

/// Load a table from a file, choosing the format by extension.
pub fn load(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    debug!(path = %path.display(), format = ?ext, "Loading table");

    match ext.as_deref() {
        Some("json") => serde_json::from_str::<TableDocument>(&content)?.into_table(),
        Some("toml") => toml::from_str::<TableDocument>(&content)?.into_table(),
        _ => parse_delimited(&content),
    }
}

/// Parse delimited text where the first non-comment line is the header.
pub fn parse_delimited(content: &str) -> Result<Table> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .filter(|(_, l)| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .filter(|(_, l)| !is_rule_line(l));

    let (header_line, header) = lines.next().ok_or(TableError::Empty)?;
    let delimiter = detect_delimiter(header);

    let head = split_line(header, delimiter)
        .map(|raw| parse_header_cell(raw, header_line))
        .collect::<Result<Vec<_>>>()?;

    let rows = lines.map(|(_, line)| split_line(line, delimiter).map(Cell::new).collect::<Vec<_>>());
    let table = Table::new(head, rows);
    warn_ragged(&table);
    Ok(table)
}

/// Markdown-style separator lines such as `|---|:--|`.
fn is_rule_line(line: &str) -> bool {
    line.contains("--") && line.chars().all(|c| matches!(c, '-' | '|' | ':' | '+' | ' ' | '\t'))
}

fn detect_delimiter(header: &str) -> char {
    if header.contains('\t') {
        '\t'
    } else if header.contains('|') {
        '|'
    } else {
        ','
    }
}

fn split_line(line: &str, delimiter: char) -> impl Iterator<Item = &str> {
    let line = if delimiter == '|' {
        line.trim().trim_start_matches('|').trim_end_matches('|')
    } else {
        line
    };
    line.split(delimiter).map(str::trim)
}

/// Parse `Text [class tokens]` into a header cell.
fn parse_header_cell(raw: &str, line: usize) -> Result<Cell> {
    let Some(open) = raw.find('[') else {
        return Ok(Cell::new(raw));
    };
    let rest = &raw[open + 1..];
    let close = rest.find(']').ok_or_else(|| TableError::Syntax {
        line,
        message: format!("unclosed '[' in header cell '{}'", raw),
    })?;
    if !rest[close + 1..].trim().is_empty() {
        return Err(TableError::Syntax {
            line,
            message: format!("unexpected text after ']' in header cell '{}'", raw),
        });
    }
    Ok(Cell {
        text: raw[..open].trim().to_string(),
        classes: ClassList::parse(&rest[..close]),
    })
}

fn warn_ragged(table: &Table) {
    let Some(head) = table.head() else {
        return;
    };
    for (i, row) in table.rows().iter().enumerate() {
        if row.cells.len() != head.len() {
            warn!(
                row = i,
                expected = head.len(),
                found = row.cells.len(),
                "Row cell count does not match header"
            );
        }
    }
}

/// Render a table as aligned plain text.
///
/// Header cells show `▲` or `▼` when they carry a direction marker for
/// `prefix`.
pub fn render_plain(table: &Table, prefix: &str) -> String {
    let columns = table.column_count();
    let header: Vec<String> = table
        .head()
        .map(|head| {
            head.iter()
                .map(|cell| format!("{}{}", cell.text, marker_suffix(&cell.classes, prefix)))
                .collect()
        })
        .unwrap_or_default();
    let body: Vec<Vec<&str>> = table
        .rows()
        .iter()
        .map(|r| (0..columns).map(|c| r.text(c).unwrap_or("")).collect())
        .collect();

    let mut widths = vec![0usize; columns];
    for (c, text) in header.iter().enumerate() {
        widths[c] = widths[c].max(text.chars().count());
    }
    for row in &body {
        for (c, text) in row.iter().enumerate() {
            widths[c] = widths[c].max(text.chars().count());
        }
    }

    let mut out = String::new();
    if !header.is_empty() {
        push_line(&mut out, &widths, header.iter().map(String::as_str));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &widths, rule.iter().map(String::as_str));
    }
    for row in &body {
        push_line(&mut out, &widths, row.iter().copied());
    }
    out
}

fn push_line<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    let line = cells
        .zip(widths)
        .map(|(text, w)| format!("{:<width$}", text, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn marker_suffix(classes: &ClassList, prefix: &str) -> &'static str {
    if classes.contains(&format!("{prefix}asc")) {
        " ▲"
    } else if classes.contains(&format!("{prefix}desc")) {
        " ▼"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_delimited_pipe_with_classes() {
        let text = "\
# people
| Name [sort-alphabetical] | Age [sort-numeric] |
| Bob | 30 |
| Al | 5 |
";
        let table = parse_delimited(text).unwrap();
        let head = table.head().unwrap();
        assert_eq!(head[0].text, "Name");
        assert!(head[1].classes.contains("sort-numeric"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].text(1), Some("5"));
    }

    #[test]
    fn test_parse_delimited_skips_markdown_rule() {
        let table = parse_delimited("| A | B |\n|---|:--|\n| 1 | 2 |\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].text(0), Some("1"));
    }

    #[test]
    fn test_parse_delimited_comma() {
        let table = parse_delimited("a,b\n1,2\n").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.rows()[0].text(1), Some("2"));
    }

    #[test]
    fn test_parse_delimited_tab_beats_comma() {
        let table = parse_delimited("a,x\tb\n1,2\t3\n").unwrap();
        assert_eq!(table.head().unwrap()[0].text, "a,x");
        assert_eq!(table.rows()[0].text(0), Some("1,2"));
    }

    #[test]
    fn test_unclosed_bracket_is_syntax_error() {
        let err = parse_delimited("Name [sort-alpha\n").unwrap_err();
        assert!(matches!(err, TableError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_delimited("# nothing\n\n"), Err(TableError::Empty)));
    }

    #[test]
    fn test_json_document_mixed_cells() {
        let json = r#"{
            "head": [{"text": "Name", "class": "sort-alphabetical"}, "Notes"],
            "rows": [["Bob", "x"], ["Al", "y"]]
        }"#;
        let table = serde_json::from_str::<TableDocument>(json)
            .unwrap()
            .into_table()
            .unwrap();
        assert!(table.head().unwrap()[0].classes.contains("sort-alphabetical"));
        assert!(table.head().unwrap()[1].classes.is_empty());
    }

    #[test]
    fn test_toml_document_without_head() {
        let doc = r#"
rows = [
  [{ text = "Age", class = "sort-numeric" }],
  ["30"],
]
"#;
        let table = toml::from_str::<TableDocument>(doc)
            .unwrap()
            .into_table()
            .unwrap();
        assert!(table.head().is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_document_snapshot_keeps_classes() {
        let table = parse_delimited("A [sort-date]\n2020-01-01\n").unwrap();
        let doc = TableDocument::from_table(&table);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("sort-date"));
        assert!(json.contains("2020-01-01"));
    }

    #[test]
    fn test_load_picks_format_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"rows": [["a"]]}}"#).unwrap();
        let table = load(file.path()).unwrap();
        assert_eq!(table.len(), 1);

        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "H\nv\n").unwrap();
        let table = load(file.path()).unwrap();
        assert_eq!(table.head().unwrap()[0].text, "H");
    }

    #[test]
    fn test_render_plain_aligns_and_marks() {
        let mut table = parse_delimited("Name|Age [sort-numeric]\nBob|30\nAl|5\n").unwrap();
        table.header_cell_mut(1).unwrap().classes.add("sort-asc");
        let text = render_plain(&table, "sort-");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name  Age ▲");
        assert_eq!(lines[1], "----  -----");
        assert_eq!(lines[2], "Bob   30");
        assert_eq!(lines[3], "Al    5");
    }
}
