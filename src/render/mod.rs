// src/render/mod.rs

//! HTML rendering of member cards.
//!
//! Records are first mapped to a [`MemberCard`] holding display-ready
//! strings; escaping and templating happen in a separate step so that
//! member-supplied text never reaches the markup unescaped unless
//! `render.escape_html` is turned off.

pub mod sink;

use crate::error::Result;
use crate::models::{MemberRecord, OrderingPolicy, RenderConfig, RenderMode};
use crate::utils::escape_html;

pub use sink::{PageSink, RenderSink};

/// Opening of the card row.
pub const ROW_START: &str = "<div class='row'>";
/// Closing of the card row.
pub const ROW_END: &str = "</div>";

pub const CURRENT_MEMBER: &str = "Current Member";
pub const FORMER_MEMBER: &str = "Former Member";

/// Status label shown on a card.
///
/// Always derived from the active-first rule, whatever policy orders the
/// list.
pub fn status_label(member: &MemberRecord) -> &'static str {
    if OrderingPolicy::ActiveFirst.qualifies(member) {
        CURRENT_MEMBER
    } else {
        FORMER_MEMBER
    }
}

/// Display fields of one member, before escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCard {
    pub avatar: String,
    pub name: String,
    pub status: Option<&'static str>,
    pub region: String,
    pub section: String,
    pub school: String,
}

impl MemberCard {
    pub fn from_record(member: &MemberRecord, show_status: bool) -> Self {
        Self {
            avatar: member.avatar().to_string(),
            name: member.full_name(),
            status: show_status.then(|| status_label(member)),
            region: member.region.clone(),
            section: member.section.clone(),
            school: member.school.clone(),
        }
    }

    /// Field name to value mapping, in display order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![("avatar", self.avatar.as_str()), ("name", self.name.as_str())];
        if let Some(status) = self.status {
            fields.push(("status", status));
        }
        fields.extend([
            ("region", self.region.as_str()),
            ("section", self.section.as_str()),
            ("school", self.school.as_str()),
        ]);
        fields
    }

    /// Card markup.
    pub fn to_html(&self, escape: bool) -> String {
        let text = |value: &str| {
            if escape {
                escape_html(value)
            } else {
                value.to_string()
            }
        };

        let status = match self.status {
            Some(label) => format!(
                "\n        <div>\n            <span class=\"member-status\">{label}</span>\n        </div>"
            ),
            None => String::new(),
        };

        format!(
            r#"<div class="member text-center col-12 col-sm-6 col-md-3">
    <div class="member-avatar">
        <img src="{avatar}" alt="Member" class="img-responsive rounded-circle"/>
    </div>
    <div class="member-info">
        <div class="member-name">{name}</div>{status}
        <div class="member-position">
            <div class="member-region-section">
                <span>{region}</span>
                <span> | </span>
                <span>{section}</span>
            </div>
        </div>
        <div class="member-university">{school}</div>
    </div>
</div>"#,
            avatar = text(&self.avatar),
            name = text(&self.name),
            status = status,
            region = text(&self.region),
            section = text(&self.section),
            school = text(&self.school),
        )
    }
}

/// Writes member cards into a sink.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    target: String,
    mode: RenderMode,
    show_status: bool,
    escape: bool,
}

impl HtmlRenderer {
    pub fn new(target: impl Into<String>, mode: RenderMode, show_status: bool, escape: bool) -> Self {
        Self {
            target: target.into(),
            mode,
            show_status,
            escape,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(
            config.target.clone(),
            config.mode,
            config.show_status,
            config.escape_html,
        )
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn cards(&self, members: &[MemberRecord]) -> Vec<MemberCard> {
        members
            .iter()
            .map(|m| MemberCard::from_record(m, self.show_status))
            .collect()
    }

    /// Full markup for the container: the row wrapper around every card.
    pub fn markup(&self, members: &[MemberRecord]) -> String {
        let cols: String = self
            .cards(members)
            .iter()
            .map(|card| card.to_html(self.escape))
            .collect();
        format!("{ROW_START}{cols}{ROW_END}")
    }

    /// Render into the sink and return the number of cards written.
    ///
    /// Both modes leave the container with the same content.
    pub fn render(&self, members: &[MemberRecord], sink: &mut dyn RenderSink) -> Result<usize> {
        match self.mode {
            RenderMode::Replace => {
                sink.replace(&self.target, &self.markup(members))?;
            }
            RenderMode::Append => {
                sink.replace(&self.target, "")?;
                sink.append(&self.target, ROW_START)?;
                for card in self.cards(members) {
                    sink.append(&self.target, &card.to_html(self.escape))?;
                }
                sink.append(&self.target, ROW_END)?;
            }
        }

        log::debug!(
            "Rendered {} cards into '{}' ({:?})",
            members.len(),
            self.target,
            self.mode
        );
        Ok(members.len())
    }
}
