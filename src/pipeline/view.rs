// src/pipeline/view.rs

//! Member viewer pipeline: fetch, parse, order, render.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Config, MemberRecord};
use crate::render::{HtmlRenderer, RenderSink};
use crate::services::{DataSource, MemberParser, load_csv, order_members};
use crate::utils::resolve_location;

/// Summary of one pipeline run.
#[derive(Debug, Clone)]
pub struct ViewSummary {
    /// Location the CSV was fetched from, after resolution
    pub location: String,
    pub member_count: usize,
    pub active_count: usize,
    pub former_count: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Fetch the member CSV and return the records in display order.
pub async fn fetch_members(config: &Config, source: &dyn DataSource) -> Result<Vec<MemberRecord>> {
    let location = resolve_location(&config.source.location, config.source.base_url.as_deref())?;
    let text = load_csv(source, &location).await?;

    let members = MemberParser::from_config(config).parse_members(&text);
    log::info!("Parsed {} members", members.len());

    Ok(order_members(members, config.ordering.policy))
}

/// Run the full pipeline into `sink`.
///
/// A failed fetch stops the run before anything is written to the sink.
pub async fn run_viewer(
    config: &Config,
    source: &dyn DataSource,
    sink: &mut dyn RenderSink,
) -> Result<ViewSummary> {
    let start_time = Utc::now();
    let location = resolve_location(&config.source.location, config.source.base_url.as_deref())?;

    let members = fetch_members(config, source).await?;

    let renderer = HtmlRenderer::from_config(&config.render);
    let rendered = renderer.render(&members, sink)?;

    let active_count = members
        .iter()
        .filter(|m| config.ordering.policy.qualifies(m))
        .count();

    let summary = ViewSummary {
        location,
        member_count: rendered,
        active_count,
        former_count: rendered - active_count,
        start_time,
        end_time: Utc::now(),
    };

    log::info!(
        "Rendered {} members into '{}' ({} active, {} former)",
        summary.member_count,
        renderer.target(),
        summary.active_count,
        summary.former_count
    );

    Ok(summary)
}
