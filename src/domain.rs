//! Categorical domains and the registry that maps column names to them.
//!
//! A [`Domain`] is the ordered list of `(code, label)` pairs legal for one column. Order is
//! significant: it drives node order and the order of cross-product links.

use std::collections::{HashMap, HashSet};

use crate::error::{GraphError, GraphResult};

/// One legal value of a categorical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntry {
    /// Raw value as it appears in the data (e.g. `GP`).
    pub code: String,
    /// Display name (e.g. `Gabriel Pereira`).
    pub label: String,
}

impl DomainEntry {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Ordered set of `(code, label)` pairs. Codes are unique within a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    entries: Vec<DomainEntry>,
    by_code: HashMap<String, usize>,
}

impl Domain {
    /// Build a domain from `(code, label)` pairs, preserving their order.
    ///
    /// `column` is only used for error messages.
    pub fn new<I, C, L>(column: &str, pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        let mut entries = Vec::new();
        let mut by_code = HashMap::new();
        for (code, label) in pairs {
            let entry = DomainEntry::new(code, label);
            if by_code.insert(entry.code.clone(), entries.len()).is_some() {
                return Err(GraphError::DuplicateCode {
                    column: column.to_string(),
                    code: entry.code,
                });
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(GraphError::EmptyDomain {
                column: column.to_string(),
            });
        }

        Ok(Self { entries, by_code })
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[DomainEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed domain; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of `code` in declaration order, if it belongs to the domain.
    pub fn position(&self, code: &str) -> Option<usize> {
        self.by_code.get(code).copied()
    }

    /// Label for `code`, if it belongs to the domain.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.position(code).map(|i| self.entries[i].label.as_str())
    }
}

/// Column name → [`Domain`] lookup, in registration order.
///
/// Registries are built once and then only read; the builder never mutates one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRegistry {
    columns: Vec<(String, Domain)>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `domain` for `column`.
    ///
    /// Fails with [`GraphError::DuplicateColumn`] if the column is already registered.
    pub fn register(&mut self, column: impl Into<String>, domain: Domain) -> GraphResult<()> {
        let column = column.into();
        if self.get(&column).is_some() {
            return Err(GraphError::DuplicateColumn { column });
        }
        self.columns.push((column, domain));
        Ok(())
    }

    /// Builder-style helper: construct the domain from pairs and register it.
    pub fn with_domain<I, C, L>(mut self, column: &str, pairs: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        let domain = Domain::new(column, pairs)?;
        self.register(column, domain)?;
        Ok(self)
    }

    pub fn get(&self, column: &str) -> Option<&Domain> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, d)| d)
    }

    /// Like [`Self::get`], but an unregistered column is a [`GraphError::UnknownColumn`].
    pub fn require(&self, column: &str) -> GraphResult<&Domain> {
        self.get(column).ok_or_else(|| GraphError::UnknownColumn {
            column: column.to_string(),
        })
    }

    /// Registered column names in registration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Node id for `code` in `column`: plain concatenation (`school` + `GP` → `schoolGP`).
pub fn node_id(column: &str, code: &str) -> String {
    let mut id = String::with_capacity(column.len() + code.len());
    id.push_str(column);
    id.push_str(code);
    id
}

/// Returns the first pair of distinct `(column, code)` keys in `registry` whose node ids collide.
///
/// Concatenation is only guaranteed unique per column; two columns such as `ab`+`c` and
/// `a`+`bc` can still collide, so the builder checks the selected columns with this.
pub(crate) fn find_id_collision<'a>(
    registry: &'a DomainRegistry,
    columns: &[&'a str],
) -> Option<String> {
    let mut seen = HashSet::new();
    for column in columns {
        let domain = registry.get(column)?;
        for entry in domain.entries() {
            let id = node_id(column, &entry.code);
            if !seen.insert(id.clone()) {
                return Some(id);
            }
        }
    }
    None
}
