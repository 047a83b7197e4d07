use std::num::NonZeroUsize;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::entity::TimerMode;

/// One line typed into the shell.
#[derive(Debug, Parser)]
#[command(name = "lofi-focus", no_binary_name = true, disable_version_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: ShellCommand,
}

impl Line {
    /// Parse a raw input line. Returns [`None`] for blank lines.
    ///
    /// # Errors
    ///
    /// This function will return clap's error for unknown commands and bad
    /// arguments, and for `help`, whose rendering is the help text.
    pub fn parse_line(line: &str) -> Option<Result<ShellCommand, clap::Error>> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        Some(Self::try_parse_from(words).map(|line| line.command))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// Start the countdown of the current mode
    Start,
    /// Pause the countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Start, pause or resume depending on the timer's status
    Toggle,
    /// Stop the countdown and restore the full duration
    Reset,
    /// Finish the current session now
    Skip,
    /// Show the timer
    Status,
    /// Set the duration of a mode, in minutes
    Duration {
        mode: ModeArg,
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Show the configured durations
    Settings,
    /// Edit the task list
    #[command(subcommand)]
    Task(TaskCommand),
    /// List tasks
    Tasks,
    /// Show the notes, or replace them with the given text
    Notes {
        /// Erase the notes
        #[arg(long, conflicts_with = "text")]
        clear: bool,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Show today's sessions and focus time
    Stats,
    /// Show the last seven days
    Week,
    /// Show recent sessions
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TaskCommand {
    /// Add a task
    Add {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Mark a task as done, or as open again
    Done { number: NonZeroUsize },
    /// Delete a task
    Rm { number: NonZeroUsize },
    /// Delete every finished task
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum HistoryAction {
    /// Forget every recorded session
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Work,
    ShortBreak,
    LongBreak,
}

impl From<ModeArg> for TimerMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Work => Self::Work,
            ModeArg::ShortBreak => Self::ShortBreak,
            ModeArg::LongBreak => Self::LongBreak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(line: &str) -> ShellCommand {
        Line::parse_line(line)
            .expect("line should not be blank")
            .expect("line should parse")
    }

    fn number(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn line_command() {
        Line::command().debug_assert();
    }

    #[test]
    fn line_parse_blank() {
        assert!(Line::parse_line("").is_none());
        assert!(Line::parse_line("   \t ").is_none());
    }

    #[test]
    fn line_parse_timer_commands() {
        assert_eq!(parse("start"), ShellCommand::Start);
        assert_eq!(parse("  pause "), ShellCommand::Pause);
        assert_eq!(parse("toggle"), ShellCommand::Toggle);
        assert_eq!(parse("exit"), ShellCommand::Quit);
        assert_eq!(
            parse("duration short-break 10"),
            ShellCommand::Duration {
                mode: ModeArg::ShortBreak,
                minutes: 10
            }
        );
        assert_eq!(
            parse("duration work -3"),
            ShellCommand::Duration {
                mode: ModeArg::Work,
                minutes: -3
            }
        );
    }

    #[test]
    fn line_parse_task_commands() {
        assert_eq!(
            parse("task add water the  plants"),
            ShellCommand::Task(TaskCommand::Add {
                text: vec!["water".into(), "the".into(), "plants".into()]
            })
        );
        assert_eq!(
            parse("task done 2"),
            ShellCommand::Task(TaskCommand::Done { number: number(2) })
        );
        assert_eq!(
            parse("task rm 1"),
            ShellCommand::Task(TaskCommand::Rm { number: number(1) })
        );
        assert_eq!(parse("task clear"), ShellCommand::Task(TaskCommand::Clear));
    }

    #[test]
    fn line_parse_notes_and_history() {
        assert_eq!(
            parse("notes"),
            ShellCommand::Notes {
                clear: false,
                text: vec![]
            }
        );
        assert_eq!(
            parse("notes --clear"),
            ShellCommand::Notes {
                clear: true,
                text: vec![]
            }
        );
        assert_eq!(
            parse("notes call back -later"),
            ShellCommand::Notes {
                clear: false,
                text: vec!["call".into(), "back".into(), "-later".into()]
            }
        );
        assert_eq!(parse("history"), ShellCommand::History { action: None });
        assert_eq!(
            parse("history clear"),
            ShellCommand::History {
                action: Some(HistoryAction::Clear)
            }
        );
    }

    #[test]
    fn line_parse_errors() {
        let kind = |line: &str| Line::parse_line(line).unwrap().unwrap_err().kind();

        assert_eq!(kind("help"), ErrorKind::DisplayHelp);
        assert_eq!(kind("dance"), ErrorKind::InvalidSubcommand);
        assert_eq!(kind("task done 0"), ErrorKind::ValueValidation);
        assert_eq!(kind("duration nap 5"), ErrorKind::InvalidValue);
        assert_eq!(kind("task add"), ErrorKind::MissingRequiredArgument);
        assert_eq!(kind("notes --clear hello"), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn mode_arg_into_timer_mode() {
        assert_eq!(TimerMode::from(ModeArg::Work), TimerMode::Work);
        assert_eq!(TimerMode::from(ModeArg::ShortBreak), TimerMode::ShortBreak);
        assert_eq!(TimerMode::from(ModeArg::LongBreak), TimerMode::LongBreak);
    }
}
