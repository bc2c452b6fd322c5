use crate::output::{header_cell, styled_table, Output};
use crate::TrackerCommands;
use color_eyre::Result;
use comfy_table::{Attribute, Cell};
use moviemax_core::{MutationOutcome, TrackerError, TrackerStore};
use serde_json::json;
use std::path::Path;

pub fn run_tracker(cmd: TrackerCommands, path: &Path, output: &Output) -> Result<()> {
    let mut store = TrackerStore::open(path).map_err(|e| tracker_error(path, e))?;

    match cmd {
        TrackerCommands::List => list(&store, output),
        TrackerCommands::Add { title, note } => {
            store.add(&title, &note).map_err(|e| tracker_error(path, e))?;
            report(output, "add", &title, MutationOutcome::Applied, format!("Tracking '{}'", title.trim()));
        }
        TrackerCommands::Delete { title } => {
            let outcome = store.delete(&title).map_err(|e| tracker_error(path, e))?;
            report(output, "delete", &title, outcome, format!("Deleted '{}'", title));
        }
        TrackerCommands::Watched { title } => {
            let outcome = store.mark_watched(&title).map_err(|e| tracker_error(path, e))?;
            report(output, "watched", &title, outcome, format!("Marked '{}' as watched", title));
        }
    }
    Ok(())
}

fn tracker_error(path: &Path, e: TrackerError) -> color_eyre::Report {
    match e {
        TrackerError::Load(_) => color_eyre::eyre::eyre!(
            "{}. Fix or move {} before making changes.",
            e,
            path.display()
        ),
        TrackerError::Write(_) => color_eyre::eyre::eyre!("{}. Nothing was changed.", e),
        TrackerError::EmptyTitle => color_eyre::eyre::eyre!("Please enter a title."),
    }
}

fn report(output: &Output, action: &str, title: &str, outcome: MutationOutcome, applied_msg: String) {
    if !output.is_human() {
        output.json(&json!({
            "action": action,
            "title": title,
            "outcome": outcome,
        }));
        return;
    }

    match outcome {
        MutationOutcome::Applied => output.success(applied_msg),
        MutationOutcome::NotFound => output.warn(format!("No tracked title named '{}'", title)),
    }
}

fn list(store: &TrackerStore, output: &Output) {
    if !output.is_human() {
        output.json(&json!({
            "file": store.path().display().to_string(),
            "watched": store.watched_count(),
            "entries": store
                .entries()
                .iter()
                .map(|e| json!({ "title": e.title, "note": e.note, "watched": e.watched }))
                .collect::<Vec<_>>(),
        }));
        return;
    }

    if store.entries().is_empty() {
        output.info(format!("Nothing tracked yet in {}", store.path().display()));
        return;
    }

    let mut table = styled_table();
    table.set_header(vec![header_cell("Title"), header_cell("Note"), header_cell("Watched")]);
    for entry in store.entries() {
        table.add_row(vec![
            Cell::new(&entry.title).add_attribute(Attribute::Bold),
            Cell::new(&entry.note),
            Cell::new(if entry.watched { "✅" } else { "❌" }),
        ]);
    }
    output.println(table.to_string());
    output.info(format!("{} of {} watched", store.watched_count(), store.entries().len()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    fn quiet_output() -> Output {
        Output::new(OutputFormat::Json, true)
    }

    #[test]
    fn test_tracker_commands_write_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        let output = quiet_output();

        run_tracker(
            TrackerCommands::Add { title: "Dune".to_string(), note: "IMAX".to_string() },
            &path,
            &output,
        )
        .unwrap();
        run_tracker(TrackerCommands::Watched { title: "Dune".to_string() }, &path, &output).unwrap();

        let store = TrackerStore::open(&path).unwrap();
        assert_eq!(store.entries().len(), 1);
        assert!(store.entries()[0].watched);
        assert_eq!(store.entries()[0].note, "IMAX");

        run_tracker(TrackerCommands::Delete { title: "Ghost".to_string() }, &path, &output).unwrap();
        run_tracker(TrackerCommands::Delete { title: "Dune".to_string() }, &path, &output).unwrap();
        assert!(TrackerStore::open(&path).unwrap().entries().is_empty());
    }

    #[test]
    fn test_tracker_rejects_blank_title_and_bad_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        let output = quiet_output();

        let blank = TrackerCommands::Add { title: "  ".to_string(), note: String::new() };
        assert!(run_tracker(blank, &path, &output).is_err());
        assert!(!path.exists());

        std::fs::write(&path, "{broken").unwrap();
        assert!(run_tracker(TrackerCommands::List, &path, &output).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{broken");
    }
}
