//! Todo listing.

use super::{Context, OutputFormat, ProjectArgs};
use chrono::NaiveDateTime;
use recallvault_core::{todo, EntryBatch, Todo, TIMESTAMP_FORMAT};
use serde::Serialize;

/// Todos found in one entry.
#[derive(Debug, Serialize)]
pub struct EntryTodos {
    /// Timestamp of the entry.
    pub timestamp: NaiveDateTime,
    /// Text before the first todo line.
    pub summary: String,
    /// The todo items.
    pub todos: Vec<Todo>,
}

/// Prints todos from every entry of the project.
pub fn run(
    ctx: &Context,
    args: &ProjectArgs,
    open_only: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (project, log) = ctx.log(args)?;
    let found = collect(&log.read_all()?, open_only);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&found)?),
        OutputFormat::Text if found.is_empty() => println!("No todos found."),
        OutputFormat::Text => {
            println!("{}", project.name());
            for group in &found {
                print!("[{}]", group.timestamp.format(TIMESTAMP_FORMAT));
                if !group.summary.is_empty() {
                    print!(" {}", group.summary.lines().next().unwrap_or_default());
                }
                println!();
                for item in &group.todos {
                    println!("  {item}");
                }
            }
        }
    }
    Ok(())
}

fn collect(batch: &EntryBatch, open_only: bool) -> Vec<EntryTodos> {
    batch
        .iter()
        .filter_map(|entry| {
            let todos: Vec<Todo> = todo::extract_todos(entry.body())
                .into_iter()
                .filter(|t| !open_only || !t.completed)
                .collect();
            (!todos.is_empty()).then(|| EntryTodos {
                timestamp: entry.timestamp(),
                summary: todo::content_before_todos(entry.body()).to_string(),
                todos,
            })
        })
        .collect()
}
