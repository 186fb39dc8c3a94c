//! Interactive shell over a single [`PortalSession`].
//!
//! All commands share one gateway, so a fallback to demo data stays in
//! effect for the rest of the shell session.

use std::borrow::Cow::{self, Borrowed, Owned};

use super::{auth, render};
use anyhow::Result;
use colored::Colorize;
use portal_application::PortalSession;
use portal_core::ApiMode;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

const COMMANDS: &[&str] = &[
    "programs", "login", "profile", "logout", "status", "mode", "help", "quit",
];

const HELP: &str = "\
  programs                              list academic programs
  login <program> <username> [password] log in (prompts for the password)
  profile                               show the logged-in profile
  logout                                forget the session token
  status                                show mode and login state
  mode [real|mock]                      show or switch the backend mode
  quit                                  leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Programs,
    Login {
        program: String,
        username: String,
        password: Option<String>,
    },
    Profile,
    Logout,
    Status,
    Mode(Option<ApiMode>),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line; blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (head, args.as_slice()) {
            ("programs", []) => Self::Programs,
            ("login", [program, username]) => Self::Login {
                program: program.to_string(),
                username: username.to_string(),
                password: None,
            },
            ("login", [program, username, password]) => Self::Login {
                program: program.to_string(),
                username: username.to_string(),
                password: Some(password.to_string()),
            },
            ("login", _) => return Err("usage: login <program> <username> [password]".to_string()),
            ("profile", []) => Self::Profile,
            ("logout", []) => Self::Logout,
            ("status", []) => Self::Status,
            ("mode", []) => Self::Mode(None),
            ("mode", [mode]) => Self::Mode(Some(mode.parse().map_err(|e| format!("{e}"))?)),
            ("help", _) => Self::Help,
            ("quit" | "exit", []) => Self::Quit,
            (cmd, _) if COMMANDS.contains(&cmd) => {
                return Err(format!("'{cmd}' takes different arguments, see 'help'"));
            }
            (cmd, _) => return Err(format!("Unknown command '{cmd}', see 'help'")),
        };
        Ok(Some(command))
    }

    /// The line as it may be kept in history; passwords are dropped.
    pub fn history_entry(&self, line: &str) -> String {
        match self {
            Self::Login {
                program,
                username,
                password: Some(_),
            } => format!("login {program} {username}"),
            _ => line.trim().to_string(),
        }
    }
}

#[derive(Clone)]
struct ShellHelper;

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_whitespace().next() {
            Some(head) if COMMANDS.contains(&head) => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ShellHelper {}

pub async fn run(session: &PortalSession) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ShellHelper));

    println!("{}", "=== Campus Portal ===".bright_magenta().bold());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!("{}", render::mode_banner(session.mode().await));

    loop {
        let line = match rl.readline("portal> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message.red());
                continue;
            }
        };
        let _ = rl.add_history_entry(command.history_entry(&line).as_str());

        if command == ShellCommand::Quit {
            break;
        }
        if let Err(err) = execute(session, command).await {
            println!("{} {err:#}", "Error:".red().bold());
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

async fn execute(session: &PortalSession, command: ShellCommand) -> Result<()> {
    let outcome = match command {
        ShellCommand::Programs => super::programs::list(session).await,
        ShellCommand::Login {
            program,
            username,
            password,
        } => auth::login(session, Some(&program), &username, password).await,
        ShellCommand::Profile => auth::profile(session).await,
        ShellCommand::Logout => auth::logout(session),
        ShellCommand::Status => auth::status(session),
        ShellCommand::Mode(Some(mode)) => {
            session.set_mode(mode).await;
            Ok(())
        }
        ShellCommand::Mode(None) | ShellCommand::Quit => Ok(()),
        ShellCommand::Help => {
            println!("{HELP}");
            return Ok(());
        }
    };

    println!("{}", render::mode_banner(session.mode().await));
    outcome
}
