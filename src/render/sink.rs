// src/render/sink.rs

//! Display sinks receiving rendered markup.

use std::collections::BTreeMap;

use crate::error::{AppError, Result};
use crate::utils::escape_html;

/// A surface with named containers whose content can be replaced or extended.
pub trait RenderSink: Send {
    /// Replace the whole content of `target`.
    fn replace(&mut self, target: &str, markup: &str) -> Result<()>;

    /// Append to the content of `target`.
    fn append(&mut self, target: &str, markup: &str) -> Result<()>;

    /// Current content of `target`, if it was ever written.
    fn content(&self, target: &str) -> Option<&str>;
}

/// In-memory page with named containers.
///
/// Without a template every container becomes a `<div id="…">` in a minimal
/// document. With a template, each `{{name}}` placeholder is a container and
/// writes to any other name fail.
#[derive(Debug, Clone, Default)]
pub struct PageSink {
    template: Option<String>,
    containers: BTreeMap<String, String>,
}

impl PageSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            containers: BTreeMap::new(),
        }
    }

    fn container(&mut self, target: &str) -> Result<&mut String> {
        if let Some(template) = &self.template {
            if !template.contains(&placeholder(target)) {
                return Err(AppError::render(
                    target,
                    format!("template has no {} placeholder", placeholder(target)),
                ));
            }
        }
        Ok(self.containers.entry(target.to_string()).or_default())
    }

    /// Substitute placeholders in one pass, so inserted content is never
    /// scanned again.
    fn fill(&self, template: &str) -> String {
        let mut page = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            page.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                rest = &rest[start..];
                break;
            };
            match self.containers.get(&after[..end]) {
                Some(content) => page.push_str(content),
                None => page.push_str(&rest[start..start + 2 + end + 2]),
            }
            rest = &after[end + 2..];
        }

        page.push_str(rest);
        page
    }

    /// Render the full page.
    pub fn document(&self) -> String {
        match &self.template {
            Some(template) => self.fill(template),
            None => {
                let body: String = self
                    .containers
                    .iter()
                    .map(|(name, content)| {
                        format!("<div id=\"{}\">{}</div>\n", escape_html(name), content)
                    })
                    .collect();
                format!(
                    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Members</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
                )
            }
        }
    }
}

impl RenderSink for PageSink {
    fn replace(&mut self, target: &str, markup: &str) -> Result<()> {
        let container = self.container(target)?;
        container.clear();
        container.push_str(markup);
        Ok(())
    }

    fn append(&mut self, target: &str, markup: &str) -> Result<()> {
        self.container(target)?.push_str(markup);
        Ok(())
    }

    fn content(&self, target: &str) -> Option<&str> {
        self.containers.get(target).map(String::as_str)
    }
}

fn placeholder(target: &str) -> String {
    format!("{{{{{target}}}}}")
}
