use serde::ser::{Serialize, SerializeMap, Serializer};

// ---------------------------------------------------------------------------
// TableRow
// ---------------------------------------------------------------------------

/// One data row of a pipe table: column label → cell text, in header order.
///
/// Serializes as a JSON object whose keys keep header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<(String, String)>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a cell. A key that is already present keeps its position and
    /// takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TableRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = TableRow::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for TableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Row scanning
// ---------------------------------------------------------------------------

/// Split a table line on `|`, trimming every cell. Only the single empty
/// cell produced by each outer pipe is dropped; blank cells at the edges of
/// the row itself are kept.
pub fn split_cells(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    if line.is_empty() {
        return Vec::new();
    }
    line.split('|').map(str::trim).collect()
}

fn is_rule_cell(cell: &str) -> bool {
    let inner = cell.strip_prefix(':').unwrap_or(cell);
    let inner = inner.strip_suffix(':').unwrap_or(inner);
    !inner.is_empty() && inner.chars().all(|c| c == '-')
}

/// A header/body separator such as `|------|:---:|`.
pub fn is_separator_row(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty() && cells.iter().all(|c| is_rule_cell(c))
}

/// Lines that take part in a table: they contain a pipe and are not a
/// separator row. Each is returned already split into cells.
pub fn candidate_rows(text: &str) -> impl Iterator<Item = Vec<&str>> {
    text.lines()
        .filter(|line| line.contains('|') && !is_separator_row(line))
        .map(split_cells)
}

// ---------------------------------------------------------------------------
// parse_table
// ---------------------------------------------------------------------------

/// Parse the first pipe table found in `text`.
///
/// The first candidate row is the header. Data rows whose cell count differs
/// from the header's are skipped without affecting later rows.
pub fn parse_table(text: &str) -> Vec<TableRow> {
    let mut rows = candidate_rows(text);
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    rows.filter(|cells| cells.len() == header.len())
        .map(|cells| header.iter().copied().zip(cells).collect::<TableRow>())
        .collect()
}

/// Two-column `| key | value |` pairs from every table line in `text`,
/// header line included. Rows with fewer than two cells are ignored.
pub fn key_value_pairs<'a>(text: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
    candidate_rows(text).filter_map(|cells| match cells.as_slice() {
        [key, value, ..] => Some((*key, *value)),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Column normalization
// ---------------------------------------------------------------------------

/// Historical column labels and the canonical key each maps to.
pub const COLUMN_SYNONYMS: &[(&str, &str)] = &[
    ("時刻", "time"),
    ("ID", "time"),
    ("プロジェクト", "project"),
    ("戦場", "project"),
    ("タスク", "task"),
    ("任務", "task"),
    ("状態", "status"),
    ("ステータス", "status"),
    ("担当", "worker"),
    ("足軽", "worker"),
    ("結果", "result"),
];

pub fn canonical_column(label: &str) -> &str {
    COLUMN_SYNONYMS
        .iter()
        .find(|(from, _)| *from == label)
        .map_or(label, |&(_, to)| to)
}

/// Rename every key to its canonical form. Unknown keys pass through.
pub fn normalize_columns(rows: Vec<TableRow>) -> Vec<TableRow> {
    rows.into_iter()
        .map(|row| {
            row.iter()
                .map(|(k, v)| (canonical_column(k).to_string(), v.to_string()))
                .collect::<TableRow>()
        })
        .collect()
}
