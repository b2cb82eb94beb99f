//! Regex-based search, row selection and in-place substitution over tables.
//!
//! Search is tolerant: queries are typed live, so an unparsable pattern simply
//! matches nothing. Substitution is a deliberate action and reports bad
//! patterns to the caller.

use crate::core::models::table::{Cell, Table};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use tracing::debug;

/// Which columns a search looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnScope {
    #[default]
    All,
    Named(String),
}

impl ColumnScope {
    fn resolve(&self, table: &Table) -> Vec<usize> {
        match self {
            ColumnScope::All => (0..table.n_columns()).collect(),
            ColumnScope::Named(name) => table.column_index(name).into_iter().collect(),
        }
    }
}

/// Position of a matching cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellMatch {
    pub row: usize,
    pub column: usize,
}

/// An empty query tells the caller to clear any match presentation.
pub fn is_clear_signal(query: &str) -> bool {
    query.is_empty()
}

fn compile_query(query: &str) -> Option<Regex> {
    if is_clear_signal(query) {
        return None;
    }
    match Regex::new(query) {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!("Ignoring invalid search pattern '{}': {}", query, e);
            None
        }
    }
}

fn cell_matches(regex: &Regex, cell: &Cell) -> bool {
    match cell {
        Cell::Null => false,
        Cell::Text(s) => regex.is_match(s),
        other => regex.is_match(&other.to_string()),
    }
}

/// Lazy, row-major iterator over the cells matching a query.
#[derive(Debug)]
pub struct Matches<'a> {
    table: &'a Table,
    regex: Option<Regex>,
    columns: Vec<usize>,
    row: usize,
    next_column: usize,
}

impl Iterator for Matches<'_> {
    type Item = CellMatch;

    fn next(&mut self) -> Option<CellMatch> {
        let regex = self.regex.as_ref()?;
        while self.row < self.table.n_rows() {
            while self.next_column < self.columns.len() {
                let column = self.columns[self.next_column];
                self.next_column += 1;
                if self
                    .table
                    .cell(self.row, column)
                    .is_some_and(|cell| cell_matches(regex, cell))
                {
                    return Some(CellMatch {
                        row: self.row,
                        column,
                    });
                }
            }
            self.row += 1;
            self.next_column = 0;
        }
        None
    }
}

/// Finds cells whose text matches `query` as a regular expression.
///
/// An empty or invalid query yields no matches. A named scope that does not
/// exist in the table also yields no matches.
pub fn find<'a>(table: &'a Table, query: &str, scope: &ColumnScope) -> Matches<'a> {
    Matches {
        table,
        regex: compile_query(query),
        columns: scope.resolve(table),
        row: 0,
        next_column: 0,
    }
}

/// Rows with at least one matching cell in any column, ascending.
pub fn matching_rows(table: &Table, query: &str) -> Vec<usize> {
    let mut rows: Vec<usize> = find(table, query, &ColumnScope::All)
        .map(|m| m.row)
        .collect();
    rows.dedup();
    rows
}

/// Builds the substitution pattern, escaping the query unless it is a regex.
pub fn replacement_pattern(query: &str, use_regex: bool) -> Result<Regex, regex::Error> {
    if use_regex {
        Regex::new(query)
    } else {
        Regex::new(&regex::escape(query))
    }
}

/// Replaces every occurrence of `pattern` in the table's text cells.
///
/// With `expand` set, `$1`-style group references in `replacement` are
/// expanded; otherwise the replacement is inserted literally. Returns the
/// number of cells that changed.
pub fn replace_in_table(
    table: &mut Table,
    pattern: &Regex,
    replacement: &str,
    expand: bool,
) -> usize {
    let mut changed = 0;
    for cell in table.cells_mut() {
        let Cell::Text(text) = cell else {
            continue;
        };
        let replaced = if expand {
            pattern.replace_all(text, replacement)
        } else {
            pattern.replace_all(text, NoExpand(replacement))
        };
        if let Cow::Owned(new_text) = replaced {
            *text = new_text;
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::table::Column;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::new(
                "Name",
                vec![
                    Cell::from("alpha"),
                    Cell::from("beta"),
                    Cell::Null,
                    Cell::from("gamma"),
                ],
            ),
            Column::new(
                "Sequence",
                vec![
                    Cell::from("PEPTIDEK"),
                    Cell::from("SAMPLER"),
                    Cell::from("PEPTIDER"),
                    Cell::from("GGGG"),
                ],
            ),
            Column::new(
                "Score",
                vec![
                    Cell::Integer(10),
                    Cell::Float(2.5),
                    Cell::Integer(7),
                    Cell::Null,
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn find_yields_row_major_matches() {
        let table = sample_table();
        let matches: Vec<_> = find(&table, "PEP", &ColumnScope::All).collect();
        assert_eq!(
            matches,
            vec![
                CellMatch { row: 0, column: 1 },
                CellMatch { row: 2, column: 1 }
            ]
        );
    }

    #[test]
    fn find_supports_regular_expressions() {
        let table = sample_table();
        let matches: Vec<_> = find(&table, "^[A-Z]+R$", &ColumnScope::All).collect();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.column == 1));
    }

    #[test]
    fn find_matches_numeric_cells_by_their_text() {
        let table = sample_table();
        let matches: Vec<_> = find(&table, r"2\.5", &ColumnScope::All).collect();
        assert_eq!(matches, vec![CellMatch { row: 1, column: 2 }]);
    }

    #[test]
    fn find_respects_named_column_scope() {
        let table = sample_table();
        let scope = ColumnScope::Named("Name".to_string());
        let matches: Vec<_> = find(&table, "a", &scope).collect();
        assert_eq!(matches.len(), 3);
        assert!(matches.iter().all(|m| m.column == 0));
    }

    #[test]
    fn find_with_unknown_column_yields_nothing() {
        let table = sample_table();
        let scope = ColumnScope::Named("Missing".to_string());
        assert_eq!(find(&table, "a", &scope).count(), 0);
    }

    #[test]
    fn find_swallows_invalid_patterns() {
        let table = sample_table();
        assert_eq!(find(&table, "PEP(", &ColumnScope::All).count(), 0);
        assert_eq!(find(&table, "[", &ColumnScope::All).count(), 0);
    }

    #[test]
    fn empty_query_yields_nothing_and_signals_clear() {
        let table = sample_table();
        assert_eq!(find(&table, "", &ColumnScope::All).count(), 0);
        assert!(is_clear_signal(""));
        assert!(!is_clear_signal("K"));
    }

    #[test]
    fn null_cells_never_match() {
        let table = sample_table();
        assert_eq!(find(&table, "^$", &ColumnScope::All).count(), 0);
        assert_eq!(find(&table, ".*", &ColumnScope::All).count(), 10);
    }

    #[test]
    fn matching_rows_lists_each_row_once() {
        let table = sample_table();
        assert_eq!(matching_rows(&table, "a|P"), vec![0, 1, 2, 3]);
        assert_eq!(matching_rows(&table, "E"), vec![0, 1, 2]);
        assert!(matching_rows(&table, "ZZZ").is_empty());
    }

    #[test]
    fn replace_literal_escapes_metacharacters() {
        let mut table = Table::new(vec![Column::new(
            "x",
            vec![Cell::from("a.b"), Cell::from("axb")],
        )])
        .unwrap();
        let pattern = replacement_pattern(".", false).unwrap();
        let changed = replace_in_table(&mut table, &pattern, "$0-", false);
        assert_eq!(changed, 1);
        assert_eq!(table.cell(0, 0), Some(&Cell::from("a$0-b")));
        assert_eq!(table.cell(1, 0), Some(&Cell::from("axb")));
    }

    #[test]
    fn replace_regex_expands_groups() {
        let mut table = sample_table();
        let pattern = replacement_pattern("PEP(TIDE)", true).unwrap();
        let changed = replace_in_table(&mut table, &pattern, "${1}X", true);
        assert_eq!(changed, 2);
        assert_eq!(table.cell(0, 1), Some(&Cell::from("TIDEXK")));
        assert_eq!(table.cell(2, 1), Some(&Cell::from("TIDEXR")));
    }

    #[test]
    fn replace_leaves_non_text_cells_untouched() {
        let mut table = sample_table();
        let pattern = replacement_pattern("1", false).unwrap();
        replace_in_table(&mut table, &pattern, "9", false);
        assert_eq!(table.cell(0, 2), Some(&Cell::Integer(10)));
    }

    #[test]
    fn replacement_pattern_reports_invalid_regex() {
        assert!(replacement_pattern("(", true).is_err());
        assert!(replacement_pattern("(", false).is_ok());
    }
}
