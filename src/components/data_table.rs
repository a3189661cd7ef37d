use std::cmp::Ordering;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

impl Align {
    fn css(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn flip(self) -> SortDir {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Option<SortDir> {
        match s {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
    pub align: Align,
}

/// Value a cell sorts by. Missing values order as numeric zero; strings
/// compare case-insensitively.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
    Missing,
}

impl SortValue {
    fn compare(&self, other: &SortValue) -> Ordering {
        use SortValue::*;
        match (self, other) {
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Text(_), _) => Ordering::Greater,
            (_, Text(_)) => Ordering::Less,
            (a, b) => {
                let a = a.numeric();
                let b = b.numeric();
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
        }
    }

    fn numeric(&self) -> f64 {
        match self {
            SortValue::Number(n) if n.is_finite() => *n,
            _ => 0.0,
        }
    }
}

/// One rendered cell: pre-formatted display markup plus its sort value.
/// Cells line up with the table's column list by position.
#[derive(Debug, Clone)]
pub struct Cell {
    pub sort: SortValue,
    pub display: String,
}

impl Cell {
    pub fn number(value: Option<f64>, display: String) -> Self {
        Self {
            sort: match value {
                Some(n) => SortValue::Number(n),
                None => SortValue::Missing,
            },
            display,
        }
    }

    pub fn text(sort_text: impl Into<String>, display: String) -> Self {
        Self {
            sort: SortValue::Text(sort_text.into()),
            display,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

/// Sortable table. Holds the current sort key and direction; the click
/// protocol is: active key flips direction, any other key takes over with
/// direction reset to descending.
pub struct DataTable {
    pub id: &'static str,
    pub columns: &'static [Column],
    pub sort_key: String,
    pub dir: SortDir,
}

impl DataTable {
    pub fn new(id: &'static str, columns: &'static [Column], default_key: &str) -> Self {
        Self {
            id,
            columns,
            sort_key: default_key.to_string(),
            dir: SortDir::Desc,
        }
    }

    /// Apply a header click to the sort state.
    pub fn toggle(&mut self, key: &str) {
        if self.sort_key == key {
            self.dir = self.dir.flip();
        } else {
            self.sort_key = key.to_string();
            self.dir = SortDir::Desc;
        }
    }

    fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// Stable sort by the active column; ties keep their original order.
    pub fn sort_rows(&self, rows: &mut [TableRow]) {
        let Some(index) = self.column_index(&self.sort_key) else {
            return;
        };
        rows.sort_by(|a, b| {
            let ordering = a.cells[index].sort.compare(&b.cells[index].sort);
            match self.dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            }
        });
    }

    pub fn render(&self, rows: &[TableRow]) -> String {
        let mut sorted: Vec<TableRow> = rows.to_vec();
        self.sort_rows(&mut sorted);

        let mut header = String::new();
        for column in self.columns {
            let active = column.key == self.sort_key;
            let arrow = if active {
                match self.dir {
                    SortDir::Asc => "↑",
                    SortDir::Desc => "↓",
                }
            } else {
                "↕"
            };
            let active_class = if active { " sort-icon--active" } else { "" };
            let _ = write!(
                header,
                r#"<th data-sort="{}" style="text-align: {}">{} <span class="sort-icon{active_class}">{arrow}</span></th>"#,
                column.key,
                column.align.css(),
                column.label
            );
        }

        let mut body = String::new();
        for row in &sorted {
            body.push_str("<tr>");
            for (cell, column) in row.cells.iter().zip(self.columns) {
                let _ = write!(
                    body,
                    r#"<td style="text-align: {}">{}</td>"#,
                    column.align.css(),
                    cell.display
                );
            }
            body.push_str("</tr>");
        }

        format!(
            r#"<div class="data-table-wrapper" id="{}"><table class="data-table"><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table></div>"#,
            self.id
        )
    }
}
