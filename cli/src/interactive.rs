use crate::commands::category::AddCategoryCommand;
use crate::commands::delete::{DeleteBookmarkCommand, DeleteCategoryCommand};
use crate::commands::import_export::{ExportCommand, ImportCommand};
use crate::commands::list::ListCommand;
use crate::commands::misc::OpenCommand;
use crate::commands::{AppContext, PopmarkCommand};
use popmark::error::{PopmarkError, Result};
use popmark::storage::StorageArea;
use popmark::tab::TabQuery;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::time::Instant;

/// Run a popup session until the bookmark is saved, the popup is cancelled
/// or the user quits
pub fn run_with_context<S: StorageArea, T: TabQuery>(ctx: &mut AppContext<'_, S, T>) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(|e| PopmarkError::Other(e.to_string()))?;

    println!("popmark shell - type '?' for help");
    print_pending(ctx);

    loop {
        show_notice(ctx);

        let readline = rl.readline("popmark> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)
                    .map_err(|e| PopmarkError::Other(e.to_string()))?;

                match line {
                    "q" | "quit" | "exit" => break,
                    "?" | "help" => print_help(),
                    _ => {
                        if let Err(e) = handle_command(ctx, line) {
                            eprintln!("Error: {}", e);
                        }
                    }
                }

                if ctx.popup.is_closed() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

fn show_notice<S: StorageArea, T: TabQuery>(ctx: &mut AppContext<'_, S, T>) {
    let now = Instant::now();
    ctx.popup.clear_expired_notice(now);
    if let Some(notice) = ctx.popup.notice(now) {
        eprintln!(
            "! {} (hides in {:.0}s)",
            notice.message,
            notice.remaining(now).as_secs_f32().ceil()
        );
    }
}

fn print_pending<S: StorageArea, T: TabQuery>(ctx: &AppContext<'_, S, T>) {
    let pending = ctx.popup.pending();
    println!("  title:    {}", pending.title);
    println!("  url:      {}", pending.url);
    println!("  icon:     {}", pending.icon);
    println!(
        "  category: {}",
        ctx.popup.selected_category().unwrap_or("(none)")
    );
}

fn print_help() {
    println!(
        "
POPUP SHELL COMMANDS:

BROWSE:
    ls                     List categories (expanded ones show their bookmarks)
    t <category>           Expand/collapse a category and select it
    sel <category>         Select the category to save into
    open <id>              Open a bookmark in the browser

PENDING BOOKMARK:
    p                      Show the pending bookmark
    title <text>           Set its title
    icon <path>            Set its icon (must look like /name.svg)
    save                   Save it into the selected category and close
    cancel                 Close without saving

CATEGORIES & DELETE:
    ac <name>              Add an empty category (kept until the session ends)
    dc <name> [-f]         Delete a category and all its bookmarks
    d <id> [-f]            Delete one bookmark

IMPORT/EXPORT:
    import <file>          Replace all bookmarks from a JSON file
    export [dir]           Write bookmarks-<date>.json

HELP & EXIT:
    ?  or help             Show this help
    q  or quit or exit     Leave without saving
    ^D or ^C               Leave without saving
"
    );
}

/// Split a trailing `-f` off the argument text
fn split_force(args: &str) -> (&str, bool) {
    match args.strip_suffix("-f") {
        Some(rest) if rest.is_empty() || rest.ends_with(char::is_whitespace) => (rest.trim(), true),
        _ => (args, false),
    }
}

fn require<'a>(args: &'a str, usage: &str) -> Result<&'a str> {
    if args.is_empty() {
        Err(PopmarkError::InvalidInput(format!("usage: {}", usage)))
    } else {
        Ok(args)
    }
}

pub fn handle_command<S: StorageArea, T: TabQuery>(
    ctx: &mut AppContext<'_, S, T>,
    line: &str,
) -> Result<()> {
    let (cmd, args) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "ls" | "list" => ListCommand::default().execute(ctx),
        "t" | "toggle" => {
            let name = require(args, "t <category>")?;
            if !ctx.popup.toggle_category(name) {
                return Err(PopmarkError::InvalidInput(format!("no category named '{}'", name)));
            }
            ListCommand::default().execute(ctx)
        }
        "sel" | "select" => {
            let name = require(args, "sel <category>")?;
            if !ctx.popup.select_category(name) {
                return Err(PopmarkError::InvalidInput(format!("no category named '{}'", name)));
            }
            Ok(())
        }
        "p" | "pending" => {
            print_pending(ctx);
            Ok(())
        }
        "title" => {
            ctx.popup.set_pending_title(args);
            Ok(())
        }
        "icon" => {
            ctx.popup.set_pending_icon(args);
            Ok(())
        }
        "save" => {
            let bookmark = ctx.popup.save()?;
            eprintln!("Saved '{}' as {}", bookmark.title, bookmark.id);
            Ok(())
        }
        "cancel" => {
            ctx.popup.cancel();
            Ok(())
        }
        "ac" | "add-category" => AddCategoryCommand {
            name: args.to_string(),
        }
        .execute(ctx),
        "dc" | "delete-category" => {
            let (name, force) = split_force(args);
            DeleteCategoryCommand {
                name: require(name, "dc <category> [-f]")?.to_string(),
                force,
            }
            .execute(ctx)
        }
        "d" | "delete" => {
            let (id, force) = split_force(args);
            DeleteBookmarkCommand {
                id: require(id, "d <id> [-f]")?.to_string(),
                category: None,
                force,
            }
            .execute(ctx)
        }
        "import" => ImportCommand {
            file: PathBuf::from(require(args, "import <file>")?),
        }
        .execute(ctx),
        "export" => ExportCommand {
            dir: (!args.is_empty()).then(|| PathBuf::from(args)),
        }
        .execute(ctx),
        "open" | "o" => OpenCommand {
            id: require(args, "open <id>")?.to_string(),
        }
        .execute(ctx),
        _ => Err(PopmarkError::InvalidInput(format!(
            "unknown command '{}', type '?' for help",
            cmd
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_env::{bm, TestEnv};
    use popmark::tab::FixedTab;
    use rstest::rstest;

    #[rstest]
    #[case("A -f", ("A", true))]
    #[case("-f", ("", true))]
    #[case("Read later -f", ("Read later", true))]
    #[case("A", ("A", false))]
    #[case("stuff-f", ("stuff-f", false))]
    #[case("", ("", false))]
    fn test_split_force(#[case] input: &str, #[case] expected: (&str, bool)) {
        assert_eq!(split_force(input), expected);
    }

    #[test]
    fn test_session_add_category_then_save() {
        let tab = FixedTab::new(Some("https://serde.rs".into()), Some("Serde".into()));
        let mut env = TestEnv::with_tab(&[bm("1", "A")], tab);

        handle_command(&mut env.ctx(), "ac Read later").unwrap();
        handle_command(&mut env.ctx(), "title Serde guide").unwrap();
        handle_command(&mut env.ctx(), "icon /serde.svg").unwrap();
        handle_command(&mut env.ctx(), "save").unwrap();

        assert!(env.popup.is_closed());
        let saved = env.stored().pop().unwrap();
        assert_eq!(saved.category, "Read later");
        assert_eq!(saved.title, "Serde guide");
        assert_eq!(saved.icon, "/serde.svg");
        assert_eq!(saved.url, "https://serde.rs");
    }

    #[test]
    fn test_session_toggle_and_select() {
        let mut env = TestEnv::with(&[bm("1", "A"), bm("2", "B")]);

        handle_command(&mut env.ctx(), "t B").unwrap();
        assert_eq!(env.popup.selected_category(), Some("B"));
        assert!(env.popup.categories()[1].is_expanded);

        handle_command(&mut env.ctx(), "sel A").unwrap();
        assert_eq!(env.popup.selected_category(), Some("A"));

        assert!(handle_command(&mut env.ctx(), "sel Nope").is_err());
        assert!(handle_command(&mut env.ctx(), "t").is_err());
    }

    #[test]
    fn test_session_deletes_with_force() {
        let mut env = TestEnv::with(&[bm("1", "A"), bm("2", "B"), bm("3", "B")]);

        handle_command(&mut env.ctx(), "d 1 -f").unwrap();
        assert!(env.popup.category("A").unwrap().is_empty());

        handle_command(&mut env.ctx(), "dc B -f").unwrap();
        assert!(env.popup.category("B").is_none());
        assert!(env.stored().is_empty());
    }

    #[test]
    fn test_session_cancel_closes() {
        let mut env = TestEnv::with(&[bm("1", "A")]);
        handle_command(&mut env.ctx(), "cancel").unwrap();
        assert!(env.popup.is_closed());
        assert_eq!(env.stored().len(), 1);
    }

    #[test]
    fn test_unknown_command() {
        let mut env = TestEnv::with(&[bm("1", "A")]);
        assert!(handle_command(&mut env.ctx(), "frobnicate").is_err());
    }
}
