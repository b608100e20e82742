//! Help catalog for the interactive commands.

/// One entry per command: name, one-line summary, in-depth description.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    (
        "help",
        "Lists out all commands with descriptions.",
        "help: Lists every command with a one-line description. \"help <command-name>\" prints the \
         in-depth description of that single command instead.",
    ),
    (
        "mkls",
        "Creates a new list file in the list directory and opens it.",
        "mkls: Uses the format \"mkls\" or \"mkls <name>\". Without a name the list is called \
         \"New_List_\" followed by 10 random uppercase letters and digits. The list is stored as \
         \"<name>.json\" in the list directory and becomes the active list. An existing list file \
         with the same name is never overwritten.",
    ),
    (
        "opls",
        "Opens the designated list for adding, deleting, or editing tasks.",
        "opls: Uses the format \"opls <list-name>\" where \"<list-name>\" is the file name of the list \
         without the \".json\" extension. The list becomes the active list and is printed. The \
         previously active list is not saved automatically.",
    ),
    (
        "vwls",
        "Prints the active list in a readable format.",
        "vwls: Prints the name of the active list followed by every task with its name, severity and \
         completion status. Tasks are numbered by insertion order and shown in the order chosen by the \
         SortAttribute config setting. Any arguments are ignored.",
    ),
    (
        "mktk",
        "Creates a task in the active list.",
        "mktk: Uses the format \"mktk <task-name> <severity>\". The severity is a whole number from 1 to \
         5. The task is added to the end of the active list as not completed. Task names must be unique \
         within a list and cannot contain spaces; \"none\" is reserved.",
    ),
    (
        "edls",
        "Edits the name or the tasks of the active list.",
        "edls: \"edls name <new-name>\" changes the display name of the active list; the file name stays \
         the same. \"edls tasks\" prompts for a task name and then for the attribute to change (name, \
         severity or completionStatus) until \"none\" is entered. Every change is saved immediately.",
    ),
    (
        "dells",
        "Deletes a list file from the list directory.",
        "dells: Uses the format \"dells <list-name>\", or \"dells\" to be prompted for the name. A list \
         must be open; it is saved first and stays open. The target must be a valid list file and cannot \
         be the active list.",
    ),
    (
        "deltk",
        "Deletes a task from the active list.",
        "deltk: Uses the format \"deltk <task-name>\", or \"deltk\" to be prompted for the name. The first \
         task with exactly that name is removed. If no task matches, nothing changes.",
    ),
    (
        "lsls",
        "Lists out all files in the list directory.",
        "lsls: Prints every entry of the list directory with its last modification time. Directories are \
         marked with <DIR>.",
    ),
    (
        "cdls",
        "Prints or changes the list directory.",
        "cdls: \"cdls\" prints the current list directory. \"cdls <path>\" sets a new list directory and \
         saves the config file; the path should be absolute and is not checked. An open list keeps saving \
         to its own file.",
    ),
    (
        "edconf",
        "Edits the config file.",
        "edconf: Uses the format \"edconf <attribute> <new-value>\", or \"edconf\" to be prompted for \
         attributes until \"none\" is entered. Attributes: ListDirectory (listdir, lsdir), \
         FileNameSameAsListName (fnsame), DeleteCompletedTasks (delcomptk), SortAttribute (statt). \
         Attribute names ignore case and spaces. Every change is saved immediately.",
    ),
    (
        "end",
        "Ends the program.",
        "end: Ends the program immediately. Every change has already been saved.",
    ),
];

/// Lines to print for `help` or `help <command>`.
pub fn help_lines(topic: Option<&str>) -> Vec<String> {
    let mut lines = vec!["For more help with a specific command, type \"help <command-name>\"".to_string()];
    match topic.and_then(|t| COMMANDS.iter().find(|(name, _, _)| *name == t)) {
        Some((_, _, detail)) => lines.push(detail.to_string()),
        None => {
            if let Some(t) = topic {
                lines.push(format!("There is no command called \"{t}\"."));
            }
            lines.extend(COMMANDS.iter().map(|(name, summary, _)| format!("{name}: {summary}")));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_lists_every_command() {
        let lines = help_lines(None);
        assert_eq!(lines.len(), COMMANDS.len() + 1);
        assert!(lines.iter().any(|l| l.starts_with("mktk: ")));
    }

    #[test]
    fn test_single_topic() {
        let lines = help_lines(Some("deltk"));
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("deltk: Uses the format"));
    }

    #[test]
    fn test_unknown_topic_falls_back() {
        let lines = help_lines(Some("fly"));
        assert!(lines[1].contains("no command called \"fly\""));
        assert_eq!(lines.len(), COMMANDS.len() + 2);
    }
}
