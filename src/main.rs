mod menu;
mod task_store;
mod types;
mod utils;

use crate::menu::{read_line, Flow, Menu};
use crate::task_store::TaskStore;
use crate::types::{CompleteOutcome, StoreError};
use crate::utils::{ensure_dir, normalize_name, parse_args, resolve_state_dir};
use std::cell::RefCell;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

const TASKS_FILE: &str = "tasks.txt";

fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&argv);
    if args.flags.contains("help") || args.flags.contains("h") {
        print_help();
        return;
    }

    let list_name = normalize_name(
        args.values
            .get("name")
            .map(String::as_str)
            .unwrap_or("todo"),
    );
    let ephemeral = args.flags.contains("ephemeral");

    let file_path = if ephemeral {
        None
    } else {
        Some(
            args.values
                .get("file")
                .map(PathBuf::from)
                .unwrap_or_else(|| resolve_state_dir(&list_name).join(TASKS_FILE)),
        )
    };

    let mut store = TaskStore::new();
    if let Some(path) = &file_path {
        if let Some(parent) = path.parent() {
            if let Err(err) = ensure_dir(parent) {
                eprintln!(
                    "[{list_name}] failed to create state directory {}: {err}",
                    parent.display()
                );
                std::process::exit(1);
            }
        }
        if let Err(err) = store.load_path(path) {
            eprintln!("[{list_name}] failed to load {}: {err}", path.display());
            std::process::exit(1);
        }
    }
    let store = Rc::new(RefCell::new(store));

    let mut menu = Menu::new("--- To-Do List Menu ---");

    {
        let store = store.clone();
        menu.register_item(
            "1",
            "Add a task",
            Box::new(move |reader, writer| {
                let text = match read_line(reader, writer, "Enter the new task: ")? {
                    Some(text) => text,
                    None => return Ok(Flow::Exit),
                };
                store.borrow_mut().add(text.clone());
                writeln!(writer, "Task '{text}' added successfully!")?;
                Ok(Flow::Continue)
            }),
        );
    }

    {
        let store = store.clone();
        menu.register_item(
            "2",
            "View tasks",
            Box::new(move |_reader, writer| {
                render_tasks(&store.borrow(), writer)?;
                Ok(Flow::Continue)
            }),
        );
    }

    {
        let store = store.clone();
        menu.register_item(
            "3",
            "Mark a task as complete",
            Box::new(move |reader, writer| {
                {
                    let store = store.borrow();
                    render_tasks(&store, writer)?;
                    if store.is_empty() {
                        return Ok(Flow::Continue);
                    }
                }
                let position = match read_task_number(
                    reader,
                    writer,
                    "Enter the number of the task to mark as complete: ",
                )? {
                    Prompted::Number(position) => position,
                    Prompted::NotANumber => return Ok(Flow::Continue),
                    Prompted::EndOfInput => return Ok(Flow::Exit),
                };
                match store.borrow_mut().complete(position) {
                    Ok(CompleteOutcome::Completed) => {
                        writeln!(writer, "Task {position} marked as complete!")?;
                    }
                    Ok(CompleteOutcome::AlreadyComplete) => {
                        writeln!(writer, "That task is already marked as complete.")?;
                    }
                    Err(StoreError::OutOfRange(_)) => {
                        writeln!(writer, "Invalid task number. Please try again.")?;
                    }
                }
                Ok(Flow::Continue)
            }),
        );
    }

    if !ephemeral {
        let store = store.clone();
        menu.register_item(
            "4",
            "Delete a task",
            Box::new(move |reader, writer| {
                {
                    let store = store.borrow();
                    render_tasks(&store, writer)?;
                    if store.is_empty() {
                        return Ok(Flow::Continue);
                    }
                }
                let position = match read_task_number(
                    reader,
                    writer,
                    "Enter the number of the task to delete: ",
                )? {
                    Prompted::Number(position) => position,
                    Prompted::NotANumber => return Ok(Flow::Continue),
                    Prompted::EndOfInput => return Ok(Flow::Exit),
                };
                match store.borrow_mut().delete(position) {
                    Ok(text) => {
                        writeln!(writer, "Task '{text}' deleted successfully!")?;
                    }
                    Err(StoreError::OutOfRange(_)) => {
                        writeln!(writer, "Invalid task number. Please try again.")?;
                    }
                }
                Ok(Flow::Continue)
            }),
        );
    }

    {
        let store = store.clone();
        let exit_key = if ephemeral { "4" } else { "5" };
        let save_path = file_path.clone();
        let list_name = list_name.clone();
        menu.register_item(
            exit_key,
            "Exit",
            Box::new(move |_reader, writer| {
                if let Some(path) = &save_path {
                    if let Err(err) = store.borrow().save_path(path) {
                        eprintln!("[{list_name}] failed to save {}: {err}", path.display());
                    }
                }
                writeln!(writer, "Exiting the To-Do List application. Goodbye!")?;
                Ok(Flow::Exit)
            }),
        );
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    if let Err(err) = menu.run(&mut reader, &mut writer) {
        eprintln!("[{list_name}] task menu crashed: {err}");
        std::process::exit(1);
    }
}

enum Prompted {
    Number(i64),
    NotANumber,
    EndOfInput,
}

fn read_task_number(
    reader: &mut dyn io::BufRead,
    writer: &mut dyn Write,
    prompt: &str,
) -> io::Result<Prompted> {
    let raw = match read_line(reader, writer, prompt)? {
        Some(raw) => raw,
        None => return Ok(Prompted::EndOfInput),
    };
    match raw.trim().parse::<i64>() {
        Ok(position) => Ok(Prompted::Number(position)),
        Err(_) => {
            writeln!(writer, "Invalid input. Please enter a number.")?;
            Ok(Prompted::NotANumber)
        }
    }
}

fn render_tasks(store: &TaskStore, writer: &mut dyn Write) -> io::Result<()> {
    writeln!(writer, "\n--- Your Tasks ---")?;
    match store.list_all() {
        None => writeln!(writer, "You have no tasks."),
        Some(entries) => {
            for (position, task) in entries {
                writeln!(writer, "{position}. {}", task.to_line())?;
            }
            Ok(())
        }
    }
}

fn print_help() {
    println!(
        "Usage: todo-cli-rs [--name <id>] [--file <path>] [--ephemeral]\n\nOptions:\n  --name <id>    Task list name (default todo)\n  --file <path>  Task file path override\n  --ephemeral    In-memory session: no delete option, no file persistence\n  --help         Show help"
    );
}
