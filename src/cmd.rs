//! Command parsing, dispatch, and the read-eval-print loop.
//!
//! A line is split on single spaces; the first word picks the command and the
//! rest are its arguments. There is no quoting, so arguments cannot contain
//! spaces. Handlers report outcomes on the console and return errors to the
//! loop, which prints them and carries on with the session unchanged.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::console::Console;
use crate::db::SaveReport;
use crate::error::{Error, Result};
use crate::fields::{ConfigAttribute, TaskField};
use crate::help::help_lines;
use crate::session::{Session, RESERVED_TASK_NAME};
use crate::task::TaskList;

pub const BANNER: &str = "You are now running \"Task Manager\".\n\
    There are many operations you can perform. To learn about what you can do execute the help command.";
pub const PROMPT: &str = "\nTask-Manager|-> $ ";

const DONE_WORDS: &[&str] = &["none", "done", "no"];

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help(Option<String>),
    MakeList(Option<String>),
    OpenList(Option<String>),
    ViewList,
    MakeTask { name: String, severity: String },
    RenameList(String),
    EditTasks,
    DeleteList(Option<String>),
    DeleteTask(Option<String>),
    ListLists,
    ChangeDir(Option<String>),
    EditConfig(Option<(String, String)>),
    End,
    Unknown(String),
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    End,
}

fn usage(msg: &str) -> Error {
    Error::Usage(msg.to_string())
}

impl Command {
    /// Parse one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let words: Vec<&str> = line.split(' ').collect();
        let arg = |i: usize| words.get(i).map(|s| s.to_string());

        let cmd = match words[0] {
            "help" => Command::Help(arg(1)),
            "mkls" => match words.len() {
                1 | 2 => Command::MakeList(arg(1).filter(|s| !s.is_empty())),
                _ => return Err(usage("\"mkls\" uses the format \"mkls\" or \"mkls <name>\"")),
            },
            "opls" => match words.len() {
                1 | 2 => Command::OpenList(arg(1)),
                _ => return Err(usage("\"opls\" uses the format \"opls <file-name (no file extension)>\"")),
            },
            "vwls" => Command::ViewList,
            "mktk" => match words.as_slice() {
                [_, name, severity] => Command::MakeTask {
                    name: name.to_string(),
                    severity: severity.to_string(),
                },
                _ => {
                    return Err(usage(
                        "\"mktk\" uses the format \"mktk <new-task-name> <new-task-severity>\", \
                         where the severity is a whole number from 1 to 5",
                    ))
                }
            },
            "edls" => match words.as_slice() {
                [_, "name", new_name] => Command::RenameList(new_name.to_string()),
                [_, "tasks"] => Command::EditTasks,
                _ => {
                    return Err(usage(
                        "\"edls\" uses the format \"edls name <new-name>\" or \"edls tasks\"",
                    ))
                }
            },
            "dells" => match words.len() {
                1 | 2 => Command::DeleteList(arg(1)),
                _ => return Err(usage("use the \"help dells\" command to check the format for \"dells\"")),
            },
            "deltk" => match words.len() {
                1 | 2 => Command::DeleteTask(arg(1)),
                _ => return Err(usage("use the \"help deltk\" command to check the format for \"deltk\"")),
            },
            "lsls" => Command::ListLists,
            "cdls" => match words.len() {
                1 | 2 => Command::ChangeDir(arg(1)),
                _ => {
                    return Err(usage(
                        "\"cdls\" uses the format \"cdls <optional-new-directory-path>\", \
                         where the path is the absolute directory lists are stored in",
                    ))
                }
            },
            "edconf" => match words.as_slice() {
                [_] => Command::EditConfig(None),
                [_, attribute, value] => Command::EditConfig(Some((attribute.to_string(), value.to_string()))),
                _ => return Err(usage("use the command \"help edconf\" to learn more")),
            },
            "end" => Command::End,
            other => Command::Unknown(other.to_string()),
        };
        Ok(Some(cmd))
    }
}

/// Drive the session from the console until `end` or end of input.
///
/// Only terminal failures end the loop with an error; everything else is
/// reported and the next line is read.
pub fn run_repl<R: BufRead, W: Write>(session: &mut Session, console: &mut Console<R, W>) -> Result<()> {
    console.say(BANNER)?;
    loop {
        let Some(line) = console.prompt(PROMPT)? else {
            debug!("end of input");
            return Ok(());
        };
        if execute_line(session, console, &line)? == Flow::End {
            return Ok(());
        }
    }
}

/// Parse and run one line, printing any recoverable error.
pub fn execute_line<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    line: &str,
) -> Result<Flow> {
    let result = Command::parse(line).and_then(|cmd| match cmd {
        Some(cmd) => {
            debug!(?cmd, "dispatching");
            dispatch(session, console, cmd)
        }
        None => Ok(Flow::Continue),
    });
    recover(console, result).map(|flow| flow.unwrap_or(Flow::Continue))
}

/// Print a recoverable error and swallow it. Terminal failures pass through.
fn recover<T, R: BufRead, W: Write>(console: &mut Console<R, W>, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ Error::Console(_)) => Err(e),
        Err(e) => {
            if e.is_storage() {
                warn!(error = %e, "command failed");
            } else {
                debug!(error = %e, "command rejected");
            }
            console.say(&e)?;
            Ok(None)
        }
    }
}

fn dispatch<R: BufRead, W: Write>(session: &mut Session, console: &mut Console<R, W>, cmd: Command) -> Result<Flow> {
    match cmd {
        Command::Help(topic) => {
            for line in help_lines(topic.as_deref()) {
                console.say(line)?;
            }
        }
        Command::MakeList(name) => cmd_make_list(session, console, name.as_deref())?,
        Command::OpenList(stem) => {
            let list = session.open_list(stem.as_deref())?.list.clone();
            print_list(console, &list, session)?;
        }
        Command::ViewList => {
            let list = session.view_list()?.clone();
            print_list(console, &list, session)?;
        }
        Command::MakeTask { name, severity } => {
            let report = session.create_task(&name, &severity)?;
            report_save(console, &report)?;
            console.say(format!("Added task '{name}'."))?;
        }
        Command::RenameList(new_name) => {
            let report = session.rename_list(&new_name)?;
            report_save(console, &report)?;
            console.say(format!("List renamed to '{new_name}'."))?;
        }
        Command::EditTasks => cmd_edit_tasks(session, console)?,
        Command::DeleteList(stem) => cmd_delete_list(session, console, stem)?,
        Command::DeleteTask(name) => cmd_delete_task(session, console, name)?,
        Command::ListLists => cmd_list_lists(session, console)?,
        Command::ChangeDir(None) => console.say(session.list_dir().display())?,
        Command::ChangeDir(Some(path)) => {
            let old = session.change_directory(&path)?;
            console.say(format!("Old List Directory: {}", old.display()))?;
            console.say(format!("New List Directory: {}", session.list_dir().display()))?;
        }
        Command::EditConfig(Some((attribute, value))) => {
            let attr = session.edit_config(&attribute, &value)?;
            console.say(format!("{attr} updated."))?;
        }
        Command::EditConfig(None) => cmd_edit_config(session, console)?,
        Command::End => return Ok(Flow::End),
        Command::Unknown(word) => {
            debug!(%word, "unknown command");
            console.say(
                "That is not a valid command. To see a list of all valid commands and their actions, use the \"help\" command.",
            )?;
        }
    }
    Ok(Flow::Continue)
}

/// Print save-time side effects the user should know about.
fn report_save<R: BufRead, W: Write>(console: &mut Console<R, W>, report: &SaveReport) -> Result<()> {
    if report.purged > 0 {
        console.say(format!("Removed {} completed task(s).", report.purged))?;
    }
    if report.name_mismatch {
        console.say("Warning: list name does not equal file name.")?;
    }
    Ok(())
}

/// Print a list the way `vwls` shows it.
pub fn print_list<R: BufRead, W: Write>(console: &mut Console<R, W>, list: &TaskList, session: &Session) -> Result<()> {
    console.say(format!("{} :", list.name))?;
    let rows = list.display_order(session.config().sort_key());
    let count = rows.len();
    for (n, (position, task)) in rows.into_iter().enumerate() {
        console.say(format!("  Task {position} :"))?;
        console.say(format!("    Name: {}", task.name))?;
        console.say(format!("    Importance (1-5): {}", task.severity))?;
        console.say(format!("    Is completed (true or false): {}", task.completion_status))?;
        if n + 1 < count {
            console.say("")?;
        }
    }
    Ok(())
}

fn cmd_make_list<R: BufRead, W: Write>(session: &mut Session, console: &mut Console<R, W>, name: Option<&str>) -> Result<()> {
    let report = session.create_list(name)?;
    report_save(console, &report)?;
    if let Some(active) = session.active() {
        console.say(format!("Created and opened list '{}' ({}).", active.list.name, active.file_name()))?;
    }
    Ok(())
}

/// Ask for a value when the argument was left off.
fn arg_or_prompt<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    arg: Option<String>,
    label: &str,
) -> Result<Option<String>> {
    match arg {
        Some(a) => Ok(Some(a)),
        None => console.prompt(label),
    }
}

fn cmd_delete_list<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    stem: Option<String>,
) -> Result<()> {
    session.view_list()?;
    let Some(stem) = arg_or_prompt(console, stem, "List to be deleted: ")? else {
        return Ok(());
    };
    let path = session.delete_list(&stem)?;
    console.say(format!("Deleted {}.", path.display()))
}

fn cmd_delete_task<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    name: Option<String>,
) -> Result<()> {
    session.view_list()?;
    let Some(name) = arg_or_prompt(console, name, "Task to be deleted: ")? else {
        return Ok(());
    };
    let (task, report) = session.delete_task(&name)?;
    report_save(console, &report)?;
    console.say(format!("Deleted task '{}'.", task.name))
}

fn cmd_list_lists<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) -> Result<()> {
    let entries = session.list_lists()?;
    console.say(format!("Directory of {}", session.list_dir().display()))?;
    console.say("")?;
    for entry in entries {
        let modified = entry
            .modified
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".repeat(16));
        if entry.is_dir {
            console.say(format!("{modified}  {}\t<DIR>", entry.name))?;
        } else {
            console.say(format!("{modified}  {}", entry.name))?;
        }
    }
    Ok(())
}

/// `edls tasks`: pick tasks by name until `none`, editing attributes of each.
fn cmd_edit_tasks<R: BufRead, W: Write>(session: &mut Session, console: &mut Console<R, W>) -> Result<()> {
    session.view_list()?;
    loop {
        let Some(name) = console.prompt("Name of task you want to edit (\"none\" if you are done editing): ")? else {
            return Ok(());
        };
        if name == RESERVED_TASK_NAME {
            return Ok(());
        }
        if let Some(index) = recover(console, session.task_index(&name))? {
            edit_task_attributes(session, console, index)?;
        }
    }
}

fn edit_task_attributes<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
    mut index: usize,
) -> Result<()> {
    loop {
        let Some(attribute) = console.prompt("Attribute to edit (\"none\" if you are done editing): ")? else {
            return Ok(());
        };
        if attribute == "none" {
            return Ok(());
        }
        let Some(field) = TaskField::parse(&attribute) else {
            console.say(
                "That is not an attribute of a Task. The attributes available to edit are: name, severity, \
                 or completionStatus (spelled and capitalised in that manner). Type none if you are done editing this task.",
            )?;
            continue;
        };

        let label = match field {
            TaskField::Name => "New task name: ",
            TaskField::Severity => "New task severity: ",
            TaskField::CompletionStatus => "New task completion status: ",
        };
        let Some(raw) = console.prompt(label)? else {
            return Ok(());
        };

        let result = field.edit_from(&raw).and_then(|edit| session.edit_task(index, edit));
        if let Some(outcome) = recover(console, result)? {
            report_save(console, &outcome.report)?;
            match outcome.index {
                Some(i) => index = i,
                None => {
                    console.say("The task was completed and has been removed from the list.")?;
                    return Ok(());
                }
            }
        }
    }
}

/// Interactive `edconf`: prompt for attributes until a done word.
fn cmd_edit_config<R: BufRead, W: Write>(session: &mut Session, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.say(
            "Editable attributes of the config file include:\n\
             1. ListDirectory (also through the \"cdls\" command)\n\
             2. FileNameSameAsListName\n\
             3. DeleteCompletedTasks\n\
             4. SortAttribute\n\
             5. none (to quit out of command)",
        )?;
        let Some(input) = console.prompt("Attribute to edit: ")? else {
            return Ok(());
        };
        if DONE_WORDS.contains(&input.as_str()) {
            return Ok(());
        }
        let Some(attr) = ConfigAttribute::parse(&input) else {
            console.say("That is not a valid attribute of the config file.")?;
            continue;
        };
        let Some(value) = console.prompt(&format!("New value for {attr}: "))? else {
            return Ok(());
        };
        if recover(console, session.set_config(attr, &value))?.is_some() {
            console.say(format!("{attr} updated."))?;
        }
    }
}
