//! Command-line host for `notekeep_core`.
//!
//! # Responsibility
//! - Load a notebook from a SQLite file, run one command, save it back.
//! - Keep output line-oriented and deterministic for scripting.

use clap::{Parser, Subcommand};
use log::info;
use notekeep_core::{
    LabelId, LoggingConfig, Note, NoteId, NoteUpdate, Notebook, SqlitePersistence,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const PREVIEW_CHARS: usize = 60;

#[derive(Parser)]
#[command(name = "notekeep", version, about = "Notes and labels in a local SQLite file")]
struct Cli {
    /// Notebook database file; created on first use.
    db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Create a note")]
    Add {
        #[arg(required = true)]
        content: Vec<String>,
    },

    #[command(about = "List active notes, newest first")]
    List { query: Vec<String> },

    #[command(about = "Replace note content")]
    Edit {
        id: String,
        #[arg(required = true)]
        content: Vec<String>,
    },

    #[command(about = "Toggle the bookmark flag")]
    Bookmark { id: String },

    #[command(about = "Replace the labels of a note")]
    Tag { id: String, labels: Vec<String> },

    #[command(about = "Move a note to the trash")]
    Trash { id: String },

    #[command(about = "Restore a note from the trash")]
    Restore { id: String },

    #[command(about = "Delete a note permanently")]
    Purge { id: String },

    #[command(name = "trash-list", about = "List trashed notes")]
    TrashList,

    #[command(name = "restore-all", about = "Restore every trashed note")]
    RestoreAll,

    #[command(name = "empty-trash", about = "Purge every trashed note")]
    EmptyTrash,

    #[command(about = "List labels with usage counts")]
    Labels { query: Vec<String> },

    #[command(name = "label-add", about = "Create a label")]
    LabelAdd {
        #[arg(required = true)]
        text: Vec<String>,
    },

    #[command(name = "label-rename", about = "Rename a label")]
    LabelRename {
        id: String,
        #[arg(required = true)]
        text: Vec<String>,
    },

    #[command(name = "label-delete", about = "Delete a label and strip it from notes")]
    LabelDelete { id: String },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::List { .. } => "list",
            Self::Edit { .. } => "edit",
            Self::Bookmark { .. } => "bookmark",
            Self::Tag { .. } => "tag",
            Self::Trash { .. } => "trash",
            Self::Restore { .. } => "restore",
            Self::Purge { .. } => "purge",
            Self::TrashList => "trash-list",
            Self::RestoreAll => "restore-all",
            Self::EmptyTrash => "empty-trash",
            Self::Labels { .. } => "labels",
            Self::LabelAdd { .. } => "label-add",
            Self::LabelRename { .. } => "label-rename",
            Self::LabelDelete { .. } => "label-delete",
        }
    }
}

fn main() -> ExitCode {
    if let Some(config) = LoggingConfig::from_env() {
        if let Err(err) = config.apply() {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut port = SqlitePersistence::open(&cli.db_path)?;
    let mut notebook = Notebook::load_from(&mut port)?;

    let name = cli.command.name();
    if dispatch(&mut notebook, cli.command)? {
        notebook.save_to(&mut port)?;
        info!("event=cli_command module=cli status=ok command={name} saved=true");
    }
    Ok(())
}

/// Runs one command; returns whether the notebook changed.
fn dispatch(notebook: &mut Notebook, command: Command) -> Result<bool, Box<dyn Error>> {
    match command {
        Command::Add { content } => {
            let note = notebook.create_note(&content.join(" "))?;
            println!("{}", note.id);
            Ok(true)
        }
        Command::List { query } => {
            for note in notebook.notes().list_active(&query.join(" ")) {
                print_note(notebook, &note);
            }
            Ok(false)
        }
        Command::Edit { id, content } => {
            let note =
                notebook.update_note(&NoteId::new(id), NoteUpdate::content(content.join(" ")))?;
            print_note(notebook, &note);
            Ok(true)
        }
        Command::Bookmark { id } => {
            let note = notebook.notes_mut().toggle_bookmark(&NoteId::new(id))?;
            print_note(notebook, &note);
            Ok(true)
        }
        Command::Tag { id, labels } => {
            let label_ids = labels.into_iter().map(LabelId::new).collect();
            let note = notebook.set_note_labels(&NoteId::new(id), label_ids)?;
            print_note(notebook, &note);
            Ok(true)
        }
        Command::Trash { id } => {
            notebook.notes_mut().soft_delete(&NoteId::new(id))?;
            Ok(true)
        }
        Command::Restore { id } => {
            notebook.notes_mut().restore(&NoteId::new(id))?;
            Ok(true)
        }
        Command::Purge { id } => {
            notebook.notes_mut().purge(&NoteId::new(id))?;
            Ok(true)
        }
        Command::TrashList => {
            let trashed = notebook.notes().list_trash();
            println!("{} notes in trash", trashed.len());
            for note in trashed {
                print_note(notebook, &note);
            }
            Ok(false)
        }
        Command::RestoreAll => {
            println!("restored {}", notebook.notes_mut().restore_all());
            Ok(true)
        }
        Command::EmptyTrash => {
            println!("purged {}", notebook.notes_mut().empty_trash());
            Ok(true)
        }
        Command::Labels { query } => {
            for label in notebook.labels().filter_labels(&query.join(" ")) {
                let used = notebook.notes().notes_with_label(&label.id).len();
                println!("{}\t{}\t{used}", label.id, label.text);
            }
            Ok(false)
        }
        Command::LabelAdd { text } => {
            let label = notebook.create_label(&text.join(" "))?;
            println!("{}", label.id);
            Ok(true)
        }
        Command::LabelRename { id, text } => {
            let label = notebook.rename_label(&LabelId::new(id), &text.join(" "))?;
            println!("{}\t{}", label.id, label.text);
            Ok(true)
        }
        Command::LabelDelete { id } => {
            notebook.delete_label(&LabelId::new(id))?;
            Ok(true)
        }
    }
}

fn print_note(notebook: &Notebook, note: &Note) {
    let marker = if note.is_bookmarked { "*" } else { "-" };
    let labels = notebook.label_texts(&note.id).unwrap_or_default().join(",");
    let first_line = note.content.lines().next().unwrap_or_default();
    let preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
    println!(
        "{}\t{marker}\t{}\t[{labels}]\t{preview}",
        note.id, note.updated_at
    );
}
