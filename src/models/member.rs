//! Member data structures.

use serde::Serialize;

/// Lifecycle state of a membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberStatus {
    Active,
    Applicant,
    Arrears,
    Inactive,
    /// Any value the export may add later
    Other(String),
}

impl MemberStatus {
    /// Parse the raw status column. Matching is exact.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Active" => Self::Active,
            "Applicant" => Self::Applicant,
            "Arrears" => Self::Arrears,
            "Inactive" => Self::Inactive,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Applicant => "Applicant",
            Self::Arrears => "Arrears",
            Self::Inactive => "Inactive",
            Self::Other(raw) => raw,
        }
    }
}

/// Membership grade, used to key placeholder avatar colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    StudentMember,
    GraduateStudentMember,
    Other,
}

impl Grade {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Student Member" => Self::StudentMember,
            "Graduate Student Member" => Self::GraduateStudentMember,
            _ => Self::Other,
        }
    }
}

/// Structured member name. Each part is normalized independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberName {
    pub prefix: String,
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

impl MemberName {
    /// All five parts joined by single spaces.
    ///
    /// Empty parts are kept, so a member without a middle name renders
    /// with a double space.
    pub fn full_name(&self) -> String {
        [
            self.prefix.as_str(),
            self.first.as_str(),
            self.middle.as_str(),
            self.last.as_str(),
            self.suffix.as_str(),
        ]
        .join(" ")
    }
}

/// One parsed directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRecord {
    pub name: MemberName,

    /// Raw email, also the gravatar input
    pub email: String,

    /// "Region " followed by the region code without its first character
    pub region: String,

    pub section: String,
    pub school: String,

    /// Raw grade (e.g. "Student Member")
    pub grade: String,

    /// Raw lifecycle status (e.g. "Active")
    pub status: String,

    /// Resolved once at construction
    avatar: String,
}

impl MemberRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: MemberName,
        email: String,
        region: String,
        section: String,
        school: String,
        grade: String,
        status: String,
        avatar: String,
    ) -> Self {
        Self {
            name,
            email,
            region,
            section,
            school,
            grade,
            status,
            avatar,
        }
    }

    /// Resolved avatar URL.
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn lifecycle(&self) -> MemberStatus {
        MemberStatus::from_raw(&self.status)
    }

    pub fn full_name(&self) -> String {
        self.name.full_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_keeps_empty_parts() {
        let name = MemberName {
            prefix: "Mx".to_string(),
            first: "Alice".to_string(),
            middle: String::new(),
            last: "Smith".to_string(),
            suffix: String::new(),
        };
        assert_eq!(name.full_name(), "Mx Alice  Smith ");
    }

    #[test]
    fn status_round_trips_known_values() {
        for raw in ["Active", "Applicant", "Arrears", "Inactive"] {
            assert_eq!(MemberStatus::from_raw(raw).as_str(), raw);
        }
        assert_eq!(
            MemberStatus::from_raw("active"),
            MemberStatus::Other("active".to_string())
        );
    }

    #[test]
    fn grade_from_raw() {
        assert_eq!(Grade::from_raw("Student Member"), Grade::StudentMember);
        assert_eq!(
            Grade::from_raw("Graduate Student Member"),
            Grade::GraduateStudentMember
        );
        assert_eq!(Grade::from_raw("Member"), Grade::Other);
    }
}
