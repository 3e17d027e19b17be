// src/services/parser.rs

//! Member CSV parsing.
//!
//! Rows are `\n`-separated, the first row is a header and the last row is
//! the empty line left by the trailing newline. Fields are `;`-separated and
//! read by position through a [`ColumnSchema`].

use crate::models::{ColumnSchema, Config, Grade, MemberName, MemberRecord, TrailingRow};
use crate::services::avatar::AvatarResolver;
use crate::services::normalize::{parse_name, parse_region, to_boolean};

/// Field separator of the export.
pub const FIELD_SEPARATOR: char = ';';

/// Split raw text into data rows.
///
/// Drops the header and the trailing row, strips a trailing `\r` and skips
/// rows left blank. With [`TrailingRow::Always`] a file that does not end in
/// a newline loses its last record.
pub fn split_rows(text: &str, trailing_row: TrailingRow) -> Vec<&str> {
    let mut rows: Vec<&str> = text.split('\n').collect();

    if !rows.is_empty() {
        rows.remove(0);
    }

    match trailing_row {
        TrailingRow::Always => {
            rows.pop();
        }
        TrailingRow::IfBlank => {
            if rows.last().is_some_and(|row| row.trim().is_empty()) {
                rows.pop();
            }
        }
    }

    rows.into_iter()
        .map(|row| row.strip_suffix('\r').unwrap_or(row))
        .filter(|row| !row.trim().is_empty())
        .collect()
}

/// Positional view over one `;`-separated row.
#[derive(Debug, Clone)]
pub struct RawRow<'a> {
    fields: Vec<&'a str>,
}

impl<'a> RawRow<'a> {
    pub fn split(line: &'a str) -> Self {
        Self {
            fields: line.split(FIELD_SEPARATOR).collect(),
        }
    }

    /// Field at `index`, or `None` past the end of the row.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Field at `index`, empty past the end of the row.
    pub fn field(&self, index: usize) -> &'a str {
        self.get(index).unwrap_or("")
    }

    /// Number of fields the row actually carries.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Turns raw CSV text into member records.
#[derive(Debug, Clone)]
pub struct MemberParser {
    schema: ColumnSchema,
    resolver: AvatarResolver,
    trailing_row: TrailingRow,
}

impl MemberParser {
    pub fn new(schema: ColumnSchema, resolver: AvatarResolver, trailing_row: TrailingRow) -> Self {
        Self {
            schema,
            resolver,
            trailing_row,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.columns.clone(),
            AvatarResolver::from_config(&config.avatar),
            config.parser.trailing_row,
        )
    }

    /// Parse every data row, preserving input order.
    pub fn parse_members(&self, text: &str) -> Vec<MemberRecord> {
        let rows = split_rows(text, self.trailing_row);
        log::debug!("Parsing {} member rows", rows.len());

        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                let raw = RawRow::split(row);
                if raw.field_count() < self.schema.width() {
                    log::debug!(
                        "Row {} has {} fields, expected {}",
                        i + 1,
                        raw.field_count(),
                        self.schema.width()
                    );
                }
                self.build_member(&raw)
            })
            .collect()
    }

    /// Parse a single data row.
    pub fn parse_member(&self, row: &str) -> MemberRecord {
        self.build_member(&RawRow::split(row))
    }

    fn build_member(&self, row: &RawRow<'_>) -> MemberRecord {
        let columns = &self.schema;

        let name = MemberName {
            prefix: parse_name(row.field(columns.name_prefix)),
            first: parse_name(row.field(columns.first_name)),
            middle: parse_name(row.field(columns.middle_name)),
            last: parse_name(row.field(columns.last_name)),
            suffix: parse_name(row.field(columns.name_suffix)),
        };

        let email = row.field(columns.email);
        let grade = row.field(columns.grade);
        let avatar = self.resolver.resolve(
            to_boolean(row.get(columns.allow_avatar)),
            email,
            &name,
            Grade::from_raw(grade),
        );

        MemberRecord::new(
            name,
            email.to_string(),
            parse_region(row.field(columns.region)),
            row.field(columns.section).to_string(),
            row.field(columns.school).to_string(),
            grade.to_string(),
            row.field(columns.status).to_string(),
            avatar,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::avatar::FallbackAvatar;

    const ALICE: &str = "alice@x.com;Alice;Student Member;Active;Smith;;Mx;;A12;North;Tech U;1";

    fn parser(allow_global: bool) -> MemberParser {
        let resolver = AvatarResolver::new(
            allow_global,
            "https://www.gravatar.com/avatar/",
            FallbackAvatar::Static("fallback.png".to_string()),
            false,
        );
        MemberParser::new(ColumnSchema::default(), resolver, TrailingRow::Always)
    }

    #[test]
    fn test_split_rows_drops_header_and_trailer() {
        let text = "header\nrow1\nrow2\n";
        assert_eq!(split_rows(text, TrailingRow::Always), vec!["row1", "row2"]);
    }

    #[test]
    fn test_split_rows_drops_last_record_without_newline() {
        let text = "header\nrow1\nrow2";
        assert_eq!(split_rows(text, TrailingRow::Always), vec!["row1"]);
        assert_eq!(split_rows(text, TrailingRow::IfBlank), vec!["row1", "row2"]);
    }

    #[test]
    fn test_split_rows_skips_blank_and_crlf() {
        let text = "header\r\nrow1\r\n\r\nrow2\r\n\n";
        assert_eq!(split_rows(text, TrailingRow::Always), vec!["row1", "row2"]);
    }

    #[test]
    fn test_raw_row_fields() {
        let row = RawRow::split("a@x;Ann;;Active");
        assert_eq!(row.field_count(), 4);
        assert_eq!(row.get(2), Some(""));
        assert_eq!(row.get(11), None);
        assert_eq!(row.field(11), "");
    }

    #[test]
    fn test_split_rows_empty_input() {
        assert!(split_rows("", TrailingRow::Always).is_empty());
        assert!(split_rows("header", TrailingRow::IfBlank).is_empty());
    }

    #[test]
    fn test_end_to_end_row() {
        let text = format!("header\n{ALICE}\n\n");
        let members = parser(false).parse_members(&text);

        assert_eq!(members.len(), 1);
        let alice = &members[0];
        assert_eq!(alice.name.first, "Alice");
        assert_eq!(alice.name.prefix, "Mx");
        assert_eq!(alice.name.last, "Smith");
        assert_eq!(alice.region, "Region 12");
        assert_eq!(alice.section, "North");
        assert_eq!(alice.school, "Tech U");
        assert_eq!(alice.status, "Active");
        assert_eq!(alice.grade, "Student Member");
        assert_eq!(alice.avatar(), "fallback.png");
    }

    #[test]
    fn test_user_flag_enables_gravatar() {
        let alice = parser(true).parse_member(ALICE);
        assert_eq!(alice.avatar(), "https://www.gravatar.com/avatar/alice@x.com");

        let opted_out = parser(true).parse_member(&ALICE.replace(";1", ";0"));
        assert_eq!(opted_out.avatar(), "fallback.png");
    }

    #[test]
    fn test_short_row_yields_empty_fields() {
        let member = parser(true).parse_member("bob@x.com;BOB;Member;Inactive");
        assert_eq!(member.name.first, "Bob");
        assert_eq!(member.name.last, "");
        assert_eq!(member.region, "Region ");
        assert_eq!(member.school, "");
        // Missing allow flag counts as opted out.
        assert_eq!(member.avatar(), "fallback.png");
    }

    #[test]
    fn test_custom_schema() {
        let schema = ColumnSchema {
            region: 10,
            school: 8,
            ..ColumnSchema::default()
        };
        let resolver = AvatarResolver::new(
            false,
            "",
            FallbackAvatar::Static(String::new()),
            false,
        );
        let parser = MemberParser::new(schema, resolver, TrailingRow::Always);
        let member = parser.parse_member("a@x;A;G;Active;B;;;;Tech U;North;R7;");
        assert_eq!(member.school, "Tech U");
        assert_eq!(member.region, "Region 7");
    }

    #[test]
    fn test_order_preserved() {
        let text = "h\na@x;Ann;;Active\nb@x;Ben;;Inactive\nc@x;Cat;;Active\n";
        let names: Vec<_> = parser(false)
            .parse_members(text)
            .into_iter()
            .map(|m| m.name.first)
            .collect();
        assert_eq!(names, vec!["Ann", "Ben", "Cat"]);
    }
}
