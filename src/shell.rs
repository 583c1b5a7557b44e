//! Interactive shell
//!
//! A line-oriented front end over stdin/stdout that drives the wall model.
//! This is the presentation layer: it parses commands, calls into
//! [`WallPolicy`], and renders the returned values. It holds no policy
//! state of its own.
//!
//! Commands:
//!
//! ```text
//! read <user> <company>     attempt to read a company's data
//! write <user> <company>    attempt to write a company's data
//! history <user>            access history for a user (JSON)
//! report <user>             conflict report for a user (JSON)
//! companies                 list known companies
//! groups                    list conflict groups and members
//! help                      show usage
//! quit                      exit
//! ```
//!
//! Company names may contain spaces: everything after the user argument is
//! the company.

use crate::policy::{Action, WallPolicy};
use std::io::{self, BufRead, Write};

const USAGE: &str = "\
Commands:
  read <user> <company>     attempt to read a company's data
  write <user> <company>    attempt to write a company's data
  history <user>            access history for a user
  report <user>             conflict report for a user
  companies                 list known companies
  groups                    list conflict groups and members
  help                      show this message
  quit                      exit";

/// Result of evaluating one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to print, keep going
    Text(String),
    /// Exit the shell
    Quit,
}

/// Interactive shell over a wall policy
pub struct Shell {
    policy: WallPolicy,
}

impl Shell {
    pub fn new(policy: WallPolicy) -> Self {
        Self { policy }
    }

    /// Run the read-eval-print loop until EOF or `quit`
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        writeln!(
            output,
            "chwall - Chinese Wall conflict-of-interest simulation. Type 'help' for commands."
        )?;

        for line in input.lines() {
            let line = line?;
            match self.eval(&line) {
                Reply::Text(text) => {
                    if !text.is_empty() {
                        writeln!(output, "{text}")?;
                    }
                }
                Reply::Quit => break,
            }
            output.flush()?;
        }

        Ok(())
    }

    /// Evaluate one input line
    pub fn eval(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::Text(String::new());
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "read" | "write" => {
                let action = if command == "read" {
                    Action::Read
                } else {
                    Action::Write
                };
                let Some((user, company)) = split_user_company(rest) else {
                    return Reply::Text(format!("usage: {command} <user> <company>"));
                };
                let outcome = self.policy.access_company(user, company, action);
                Reply::Text(outcome.message)
            }
            "history" => {
                if rest.is_empty() {
                    return Reply::Text("usage: history <user>".to_string());
                }
                let history = self.policy.user_access_history(rest);
                Reply::Text(to_json(&history))
            }
            "report" => {
                if rest.is_empty() {
                    return Reply::Text("usage: report <user>".to_string());
                }
                let report = self.policy.conflict_report(rest);
                Reply::Text(to_json(&report))
            }
            "companies" => {
                let companies: Vec<&str> = self.policy.valid_companies().into_iter().collect();
                Reply::Text(companies.join("\n"))
            }
            "groups" => {
                let mut lines = Vec::new();
                for group in self.policy.registry().groups() {
                    let members: Vec<&str> =
                        group.companies.iter().map(String::as_str).collect();
                    lines.push(format!("{}: {}", group.name, members.join(", ")));
                }
                Reply::Text(lines.join("\n"))
            }
            "help" => Reply::Text(USAGE.to_string()),
            "quit" | "exit" => Reply::Quit,
            other => Reply::Text(format!("unknown command '{other}'; type 'help' for usage")),
        }
    }
}

/// Split "<user> <company with spaces>" into its two parts
fn split_user_company(rest: &str) -> Option<(&str, &str)> {
    let (user, company) = rest.split_once(char::is_whitespace)?;
    let company = company.trim();
    if company.is_empty() {
        return None;
    }
    Some((user, company))
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("failed to render output: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ConflictGroup;

    fn shell() -> Shell {
        Shell::new(WallPolicy::new(
            vec![
                ConflictGroup::new(
                    "Bank",
                    ["Citibank".to_string(), "Bank of America".to_string()],
                ),
                ConflictGroup::new("Gasoline", ["Shell".to_string(), "Mobil".to_string()]),
            ],
            true,
        ))
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_read_then_conflicting_write() {
        let mut shell = shell();
        let first = text(shell.eval("write Alice Citibank"));
        assert!(first.contains("Alice wrote to Citibank"));

        let second = text(shell.eval("write Alice Bank of America"));
        assert!(second.contains("Access denied"));
        assert!(second.contains("Bank"));
    }

    #[test]
    fn test_company_names_with_spaces() {
        let mut shell = shell();
        let reply = text(shell.eval("read Alice Bank of America"));
        assert!(reply.contains("Alice read Bank of America"));
    }

    #[test]
    fn test_unknown_command() {
        let mut shell = shell();
        let reply = text(shell.eval("delete Alice Citibank"));
        assert!(reply.contains("unknown command 'delete'"));
    }

    #[test]
    fn test_missing_arguments() {
        let mut shell = shell();
        assert_eq!(
            text(shell.eval("read Alice")),
            "usage: read <user> <company>"
        );
        assert_eq!(text(shell.eval("report")), "usage: report <user>");
    }

    #[test]
    fn test_companies_listing() {
        let mut shell = shell();
        let reply = text(shell.eval("companies"));
        assert_eq!(reply, "Bank of America\nCitibank\nMobil\nShell");
    }

    #[test]
    fn test_report_is_json() {
        let mut shell = shell();
        shell.eval("write Alice Citibank");
        let reply = text(shell.eval("report Alice"));
        let parsed: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(parsed["conflicts"][0], "Bank of America");
    }

    #[test]
    fn test_quit() {
        let mut shell = shell();
        assert_eq!(shell.eval("quit"), Reply::Quit);
        assert_eq!(shell.eval("exit"), Reply::Quit);
    }

    #[test]
    fn test_run_processes_script() {
        let mut shell = shell();
        let script = "write Bob Shell\nwrite Bob Mobil\nquit\n";
        let mut output = Vec::new();
        shell.run(script.as_bytes(), &mut output).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("Bob wrote to Shell"));
        assert!(rendered.contains("Access denied"));
    }
}
