//! Per-pair co-occurrence counting.

use crate::domain::Domain;
use crate::observability::ExclusionReason;
use crate::types::{DataSet, Value};

/// One side of an adjacent column pair.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnRef<'a> {
    pub name: &'a str,
    pub domain: &'a Domain,
    /// Position in the dataset schema; `None` when the dataset lacks the column.
    pub index: Option<usize>,
}

impl<'a> ColumnRef<'a> {
    pub fn resolve(dataset: &DataSet, name: &'a str, domain: &'a Domain) -> Self {
        Self {
            name,
            domain,
            index: dataset.schema.index_of(name),
        }
    }

    /// Domain position of this column's cell in `row`.
    fn code_index(&self, row: &[Value]) -> Result<usize, ExclusionReason> {
        let code = self
            .index
            .and_then(|i| row.get(i))
            .and_then(Value::category_code)
            .ok_or(ExclusionReason::Missing)?;
        self.domain
            .position(&code)
            .ok_or(ExclusionReason::OutOfDomain { code })
    }
}

/// Dense `source × target` count matrix for one adjacent pair, in domain order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CountTable {
    cols: usize,
    cells: Vec<u64>,
    excluded: u64,
}

impl CountTable {
    /// Count every row of `dataset` in one pass.
    ///
    /// `on_excluded(row_index, column, reason)` is called for each row that lands in no cell;
    /// the source column is checked first, so a row missing both values is reported once.
    pub fn tally<F>(
        dataset: &DataSet,
        source: ColumnRef<'_>,
        target: ColumnRef<'_>,
        mut on_excluded: F,
    ) -> Self
    where
        F: FnMut(usize, &str, ExclusionReason),
    {
        let rows = source.domain.len();
        let cols = target.domain.len();
        let mut table = Self {
            cols,
            cells: vec![0; rows * cols],
            excluded: 0,
        };

        for (row_idx, row) in dataset.rows.iter().enumerate() {
            let cell = source
                .code_index(row)
                .map_err(|reason| (source.name, reason))
                .and_then(|s| {
                    target
                        .code_index(row)
                        .map(|t| (s, t))
                        .map_err(|reason| (target.name, reason))
                });
            match cell {
                Ok((s, t)) => table.cells[s * cols + t] += 1,
                Err((column, reason)) => {
                    table.excluded += 1;
                    on_excluded(row_idx, column, reason);
                }
            }
        }

        table
    }

    pub fn get(&self, source: usize, target: usize) -> u64 {
        self.cells[source * self.cols + target]
    }

    /// Rows that landed in some cell.
    pub fn counted(&self) -> u64 {
        self.cells.iter().sum()
    }

    pub fn excluded(&self) -> u64 {
        self.excluded
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnRef, CountTable};
    use crate::domain::Domain;
    use crate::observability::ExclusionReason;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn utf8(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    #[test]
    fn tally_counts_cells_and_reports_exclusions() {
        let schema = Schema::new(vec![
            Field::new("school", DataType::Utf8),
            Field::new("sex", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![utf8("GP"), utf8("F")],
                vec![utf8("GP"), utf8("F")],
                vec![utf8("MS"), utf8("M")],
                vec![utf8("XX"), utf8("M")],
                vec![Value::Null, Value::Null],
                vec![utf8("GP")],
            ],
        );
        let school = Domain::new("school", [("GP", "Gabriel Pereira"), ("MS", "Mousinho Da Silveira")])
            .unwrap();
        let sex = Domain::new("sex", [("M", "Male"), ("F", "Female")]).unwrap();

        let mut seen = Vec::new();
        let table = CountTable::tally(
            &ds,
            ColumnRef::resolve(&ds, "school", &school),
            ColumnRef::resolve(&ds, "sex", &sex),
            |row, column, reason| seen.push((row, column.to_string(), reason)),
        );

        assert_eq!(table.get(0, 1), 2);
        assert_eq!(table.get(1, 0), 1);
        assert_eq!(table.get(0, 0), 0);
        assert_eq!(table.counted(), 3);
        assert_eq!(table.excluded(), 3);
        assert_eq!(
            seen,
            vec![
                (
                    3,
                    "school".to_string(),
                    ExclusionReason::OutOfDomain {
                        code: "XX".to_string()
                    }
                ),
                (4, "school".to_string(), ExclusionReason::Missing),
                (5, "sex".to_string(), ExclusionReason::Missing),
            ]
        );
    }

    #[test]
    fn column_absent_from_schema_excludes_every_row() {
        let schema = Schema::new(vec![Field::new("school", DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![utf8("GP")], vec![utf8("MS")]]);
        let school = Domain::new("school", [("GP", "GP"), ("MS", "MS")]).unwrap();
        let sex = Domain::new("sex", [("M", "Male"), ("F", "Female")]).unwrap();

        let table = CountTable::tally(
            &ds,
            ColumnRef::resolve(&ds, "school", &school),
            ColumnRef::resolve(&ds, "sex", &sex),
            |_, _, _| {},
        );

        assert_eq!(table.counted(), 0);
        assert_eq!(table.excluded(), 2);
    }
}
