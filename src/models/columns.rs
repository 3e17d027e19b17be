//! Column layout of the member CSV export.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Maps each member field to its position in a `;`-separated row.
///
/// The default is the canonical export layout:
///
/// ```text
/// 0 email       4 last_name     8 region
/// 1 first_name  5 middle_name   9 section
/// 2 grade       6 name_prefix  10 school
/// 3 status      7 name_suffix  11 allow_avatar
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub email: usize,
    pub first_name: usize,
    pub grade: usize,
    pub status: usize,
    pub last_name: usize,
    pub middle_name: usize,
    pub name_prefix: usize,
    pub name_suffix: usize,
    pub region: usize,
    pub section: usize,
    pub school: usize,
    /// Per-member avatar opt-in ("1" / "0" / empty)
    pub allow_avatar: usize,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            email: 0,
            first_name: 1,
            grade: 2,
            status: 3,
            last_name: 4,
            middle_name: 5,
            name_prefix: 6,
            name_suffix: 7,
            region: 8,
            section: 9,
            school: 10,
            allow_avatar: 11,
        }
    }
}

impl ColumnSchema {
    /// Field names paired with their column index, in declaration order.
    pub fn entries(&self) -> [(&'static str, usize); 12] {
        [
            ("email", self.email),
            ("first_name", self.first_name),
            ("grade", self.grade),
            ("status", self.status),
            ("last_name", self.last_name),
            ("middle_name", self.middle_name),
            ("name_prefix", self.name_prefix),
            ("name_suffix", self.name_suffix),
            ("region", self.region),
            ("section", self.section),
            ("school", self.school),
            ("allow_avatar", self.allow_avatar),
        ]
    }

    /// Number of fields a complete row carries.
    pub fn width(&self) -> usize {
        self.entries()
            .iter()
            .map(|(_, index)| index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Reject layouts where two fields share a column.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashMap<usize, &str> = HashMap::new();
        for (name, index) in self.entries() {
            if let Some(previous) = seen.insert(index, name) {
                return Err(AppError::validation(format!(
                    "columns.{name} and columns.{previous} both use index {index}"
                )));
            }
        }
        Ok(())
    }
}
