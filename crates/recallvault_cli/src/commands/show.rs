//! Reading entries back.

use super::{Context, OutputFormat, ProjectArgs};
use recallvault_core::{codec, keyword, Entry, EntryBatch, TIMESTAMP_FORMAT};
use serde::Serialize;

/// Which part of the log `show` reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// One named segment, or the active one when `None`.
    Segment(Option<String>),
    /// Every segment in order.
    All,
}

/// One segment file as listed by `segments`.
#[derive(Debug, Serialize)]
pub struct SegmentInfo {
    /// Segment file name.
    pub name: String,
    /// Entries that could be read.
    pub entries: usize,
    /// Entries that were skipped as unreadable.
    pub skipped: usize,
}

/// Prints the most recent entry.
pub fn latest(
    ctx: &Context,
    args: &ProjectArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (project, mut log) = ctx.log(args)?;
    let entry = log.latest_entry()?;
    match (format, entry) {
        (OutputFormat::Json, entry) => println!("{}", serde_json::to_string_pretty(&entry)?),
        (OutputFormat::Text, Some(entry)) => print!("{}", render_entry(project.name(), &entry)),
        (OutputFormat::Text, None) => println!("No entries yet."),
    }
    Ok(())
}

/// Prints entries from one segment or the whole log, optionally filtered by
/// keyword.
pub fn run(
    ctx: &Context,
    args: &ProjectArgs,
    selection: Selection,
    tag: Option<&str>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, mut log) = ctx.log(args)?;
    let batch = match selection {
        Selection::All => log.read_all()?,
        Selection::Segment(Some(name)) => log.read(Some(&name))?,
        Selection::Segment(None) => {
            let latest = log.latest_segment()?;
            log.read(latest.as_deref())?
        }
    };
    let batch = filter_by_tag(batch, tag);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&batch)?),
        OutputFormat::Text => print!("{}", codec::encode(&batch)),
    }
    Ok(())
}

/// Lists segment files with their entry counts.
pub fn segments(
    ctx: &Context,
    args: &ProjectArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, log) = ctx.log(args)?;
    let mut infos = Vec::new();
    for name in log.segments()? {
        let results = log.scan(&name)?;
        let entries = results
            .iter()
            .filter(|r| matches!(r, codec::ParsedEntry::Parsed(_)))
            .count();
        infos.push(SegmentInfo {
            skipped: results.len() - entries,
            entries,
            name,
        });
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&infos)?),
        OutputFormat::Text => {
            for info in &infos {
                print!("{:<16} {:>6} entries", info.name, info.entries);
                if info.skipped > 0 {
                    print!(" ({} unreadable)", info.skipped);
                }
                println!();
            }
            println!("Capacity: {} entries per segment", log.log_limit());
        }
    }
    Ok(())
}

fn filter_by_tag(batch: EntryBatch, tag: Option<&str>) -> EntryBatch {
    match tag {
        Some(tag) => batch
            .into_iter()
            .filter(|entry| keyword::has_keyword(entry.body(), tag))
            .collect(),
        None => batch,
    }
}

fn render_entry(project: &str, entry: &Entry) -> String {
    format!(
        "{project} - [{}]\n\n{}\n",
        entry.timestamp().format(TIMESTAMP_FORMAT),
        entry.body()
    )
}
