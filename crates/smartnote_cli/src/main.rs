//! Command-line driver for the SmartNote core.
//!
//! # Responsibility
//! - Map subcommands onto `NotesService` operations over the SQLite blob store.
//! - Keep output plain and line-oriented for scripting.
//!
//! Usage:
//! - `smartnote suggest <text>`
//! - `smartnote add [--title T] [--color C] [--tag T]... <content>`
//! - `smartnote list [--color C|all] [--tag T | --all-tags] [--search S]`
//! - `smartnote delete <id>`
//! - `smartnote tags`
//! - `smartnote version`

use log::warn;
use smartnote_core::db::open_db;
use smartnote_core::{
    core_version, init_from_config, Color, FilterChoice, Note, NoteId, NotesService,
    SmartNotesConfig, SqliteBlobStore,
};
use std::error::Error;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() -> ExitCode {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("smartnote: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: Vec<String>) -> CliResult<()> {
    if args.is_empty() {
        print_usage();
        return Ok(());
    }
    let command = args.remove(0);

    let config = SmartNotesConfig::from_env();
    if let Err(err) = init_from_config(&config) {
        eprintln!("smartnote: logging disabled: {err}");
    }

    match command.as_str() {
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        "version" => {
            println!("smartnote_core version={}", core_version());
            Ok(())
        }
        "suggest" => suggest(&args),
        "add" | "list" | "delete" | "tags" => {
            let conn = open_db(&config.db_path)?;
            let storage = SqliteBlobStore::with_key(&conn, config.blob_key.as_str())?;
            let mut service = NotesService::from_config(storage, &config);
            service.load();
            match command.as_str() {
                "add" => add(&mut service, args),
                "list" => list(&mut service, args),
                "delete" => delete(&mut service, &args),
                _ => {
                    for tag in service.tags_in_use() {
                        println!("{tag}");
                    }
                    Ok(())
                }
            }
        }
        other => Err(format!("unknown command `{other}`; try `smartnote help`").into()),
    }
}

fn suggest(args: &[String]) -> CliResult<()> {
    let text = args.join(" ");
    let color = smartnote_core::suggest_color(&text);
    println!("color={} ({})", color, color.display_name());
    println!("tags={}", smartnote_core::suggest_tags(&text).join(","));
    Ok(())
}

fn add(service: &mut NotesService<'_, SqliteBlobStore<'_>>, args: Vec<String>) -> CliResult<()> {
    let mut title = String::new();
    let mut color = None;
    let mut manual_tags = Vec::new();
    let mut content = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--title" => title = required_value(&mut iter, "--title")?,
            "--color" => color = Some(required_value(&mut iter, "--color")?.parse::<Color>()?),
            "--tag" => manual_tags.push(required_value(&mut iter, "--tag")?),
            _ => content.push(arg),
        }
    }

    service.update_draft_text(title, content.join(" "));
    if let Some(color) = color {
        service.set_manual_color(color);
    }
    for tag in &manual_tags {
        service.add_manual_tag(tag)?;
    }

    let note = service.commit_draft()?;
    print_note(&note);
    Ok(())
}

fn list(service: &mut NotesService<'_, SqliteBlobStore<'_>>, args: Vec<String>) -> CliResult<()> {
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--color" => {
                service.set_color_filter(required_value(&mut iter, "--color")?.parse()?);
            }
            "--tag" => {
                let tag = required_value(&mut iter, "--tag")?;
                service.set_tag_filter(FilterChoice::tag(&tag));
            }
            "--all-tags" => service.set_tag_filter(FilterChoice::All),
            "--search" => service.set_search_filter(required_value(&mut iter, "--search")?),
            other => return Err(format!("unexpected argument `{other}`").into()),
        }
    }

    let visible = service.visible_notes();
    println!("{} note(s)", visible.len());
    for note in visible {
        print_note(note);
    }
    Ok(())
}

fn delete(service: &mut NotesService<'_, SqliteBlobStore<'_>>, args: &[String]) -> CliResult<()> {
    let raw = args.first().ok_or("delete requires a note id")?;
    let id = raw.parse::<NoteId>()?;
    if !service.delete_note(id)? {
        warn!("event=cli_delete module=cli status=noop note_id={id}");
        println!("no note with id {id}");
    }
    Ok(())
}

fn required_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> CliResult<String> {
    iter.next()
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn print_note(note: &Note) {
    println!(
        "{}\t{}\t{}\t[{}]\t{}",
        note.id,
        note.color,
        note.title,
        note.tags.join(", "),
        note.content.replace('\n', " ")
    );
}

fn print_usage() {
    println!("smartnote <command> [args]");
    println!("  suggest <text>");
    println!("  add [--title T] [--color C] [--tag T]... <content>");
    println!("  list [--color C|all] [--tag T | --all-tags] [--search S]");
    println!("  delete <id>");
    println!("  tags");
    println!("  version");
}
