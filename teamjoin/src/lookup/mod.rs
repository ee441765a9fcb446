//! Name-keyed lookups built from the team reference table.
//!
//! Reference rows are `id, full name, short name[, category]`. The short name
//! is the primary key; the full name is indexed as a fallback alias.
//!
//! ```text
//! id,name,short,category        short  → id    short  → category
//! 11,鹿島アントラーズ,鹿島,J1   ──▶  鹿島   → 11   鹿島   → J1
//! 12,浦和レッズ,浦和,           ──▶  浦和   → 12   (no category)
//! ```

pub mod competitions;

use std::collections::HashMap;

use serde::Serialize;

pub use competitions::Competitions;

/// First-cell values that mark a reference header row.
const HEADER_KEYS: &[&str] = &["id", "teamid", "team_id"];

/// Minimum cells for a usable reference row.
const MIN_REFERENCE_CELLS: usize = 3;

/// One row of the team reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub id: String,
    pub full_name: String,
    pub short_name: String,
    pub category: Option<String>,
}

impl TeamRecord {
    /// Read a reference row; `None` when it has fewer than three cells
    pub fn from_row(row: &[String]) -> Option<Self> {
        if row.len() < MIN_REFERENCE_CELLS {
            return None;
        }
        let category = row
            .get(3)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(String::from);

        Some(Self {
            id: row[0].trim().to_string(),
            full_name: row[1].trim().to_string(),
            short_name: row[2].trim().to_string(),
            category,
        })
    }
}

/// A name that appeared twice with different ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateName {
    pub name: String,
    pub replaced_id: String,
    pub kept_id: String,
}

#[derive(Debug, Default, Clone)]
struct NameMaps {
    ids: HashMap<String, String>,
    categories: HashMap<String, String>,
}

impl NameMaps {
    /// Later rows overwrite earlier ones. Returns the replaced id when it differs.
    fn insert(&mut self, name: &str, record: &TeamRecord) -> Option<String> {
        if let Some(category) = &record.category {
            self.categories.insert(name.to_string(), category.clone());
        }
        self.ids
            .insert(name.to_string(), record.id.clone())
            .filter(|previous| *previous != record.id)
    }
}

/// Team name → id / category lookups
#[derive(Debug, Default, Clone)]
pub struct TeamIndex {
    short: NameMaps,
    full: NameMaps,
    records: usize,
    skipped: usize,
    duplicates: Vec<DuplicateName>,
}

impl TeamIndex {
    /// Build the index from raw reference rows.
    ///
    /// A leading `id`/`teamid`/`team_id` row is treated as a header. Rows with
    /// fewer than three cells are skipped. Blank lines are ignored. Rows with an
    /// empty short name add no short-name key.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let mut index = Self::default();

        let start = usize::from(rows.first().is_some_and(|r| is_header_row(r)));
        for row in rows[start..].iter().filter(|r| !is_blank_row(r)) {
            let Some(record) = TeamRecord::from_row(row) else {
                index.skipped += 1;
                continue;
            };
            index.insert(&record);
        }

        index
    }

    fn insert(&mut self, record: &TeamRecord) {
        self.records += 1;

        if !record.short_name.is_empty() {
            if let Some(replaced_id) = self.short.insert(&record.short_name, record) {
                self.duplicates.push(DuplicateName {
                    name: record.short_name.clone(),
                    replaced_id,
                    kept_id: record.id.clone(),
                });
            }
        }

        if !record.full_name.is_empty() {
            self.full.insert(&record.full_name, record);
        }
    }

    fn resolve(
        &self,
        name: &str,
        pick: fn(&NameMaps) -> &HashMap<String, String>,
    ) -> Option<&str> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        pick(&self.short)
            .get(name)
            .or_else(|| pick(&self.full).get(name))
            .map(String::as_str)
    }

    /// Id for a team name, if known
    pub fn team_id(&self, name: &str) -> Option<&str> {
        self.resolve(name, |maps| &maps.ids)
    }

    /// Category for a team name, if known and set
    pub fn category(&self, name: &str) -> Option<&str> {
        self.resolve(name, |maps| &maps.categories)
    }

    /// Number of distinct short-name keys
    pub fn len(&self) -> usize {
        self.short.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short.ids.is_empty() && self.full.ids.is_empty()
    }

    /// Number of usable reference rows read
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Number of rows skipped for having too few cells
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Short names that were overwritten with a different id
    pub fn duplicates(&self) -> &[DuplicateName] {
        &self.duplicates
    }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty()) && row.len() <= 1
}

fn is_header_row(row: &[String]) -> bool {
    row.first()
        .map(|cell| cell.trim().to_lowercase())
        .is_some_and(|first| HEADER_KEYS.contains(&first.as_str()))
}
