//! `/ec` argument parsing
//!
//! ```text
//! /ec help
//! /ec reload
//! /ec debug
//! /ec count [world]
//! /ec list [world] [page]
//! /ec tp [world] id
//! ```

use thiserror::Error;

/// Usage text shown for `/ec`, `/ec help` and unrecognised syntax.
pub const USAGE: &str = "\
/ec help - Show this help.
/ec reload - Reload the configuration.
/ec debug - Toggle debug logging.
/ec count [world] - Count entities in the loaded chunks of a world.
/ec list [world] [page] - List entity groups, most numerous first.
/ec tp [world] id - Teleport to the entity group with the given id.";

/// A parsed `/ec` subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Reload,
    Debug,
    Count { world: Option<String> },
    List { world: Option<String>, page: i64 },
    Tp { world: Option<String>, id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Invalid command syntax.")]
    InvalidSyntax,

    #[error("{0} is not a valid page number.")]
    InvalidPage(String),

    #[error("{0} is not a valid id number.")]
    InvalidId(String),
}

impl Command {
    /// Parse the arguments that follow `/ec`.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command, CommandError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let Some((&name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };

        let is = |expected: &str| name.eq_ignore_ascii_case(expected);
        match rest {
            [] if is("help") => Ok(Command::Help),
            [] if is("reload") => Ok(Command::Reload),
            [] if is("debug") => Ok(Command::Debug),

            [] if is("count") => Ok(Command::Count { world: None }),
            [world] if is("count") => Ok(Command::Count {
                world: Some(world.to_string()),
            }),

            [] if is("list") => Ok(Command::List {
                world: None,
                page: 1,
            }),
            // A lone argument is a page if it parses, otherwise a world name.
            [arg] if is("list") => Ok(match arg.parse::<i64>() {
                Ok(page) => Command::List { world: None, page },
                Err(_) => Command::List {
                    world: Some(arg.to_string()),
                    page: 1,
                },
            }),
            [world, page] if is("list") => Ok(Command::List {
                world: Some(world.to_string()),
                page: page
                    .parse()
                    .map_err(|_| CommandError::InvalidPage(page.to_string()))?,
            }),

            [id] if is("tp") => Ok(Command::Tp {
                world: None,
                id: parse_id(id)?,
            }),
            [world, id] if is("tp") => Ok(Command::Tp {
                world: Some(world.to_string()),
                id: parse_id(id)?,
            }),

            _ => Err(CommandError::InvalidSyntax),
        }
    }

    /// True for subcommands that only make sense for an in-game player.
    pub fn requires_player(&self) -> bool {
        matches!(self, Command::Tp { .. })
    }
}

fn parse_id(arg: &str) -> Result<i64, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, CommandError> {
        Command::parse(args)
    }

    #[test]
    fn no_arguments_is_help() {
        assert_eq!(parse(&[]), Ok(Command::Help));
        assert_eq!(parse(&["HELP"]), Ok(Command::Help));
    }

    #[test]
    fn simple_subcommands() {
        assert_eq!(parse(&["reload"]), Ok(Command::Reload));
        assert_eq!(parse(&["Debug"]), Ok(Command::Debug));
        assert_eq!(parse(&["count"]), Ok(Command::Count { world: None }));
        assert_eq!(
            parse(&["count", "world_nether"]),
            Ok(Command::Count {
                world: Some("world_nether".to_string())
            })
        );
    }

    #[test]
    fn list_second_argument_is_page_or_world() {
        assert_eq!(parse(&["list"]), Ok(Command::List { world: None, page: 1 }));
        assert_eq!(parse(&["list", "3"]), Ok(Command::List { world: None, page: 3 }));
        assert_eq!(
            parse(&["list", "farm"]),
            Ok(Command::List {
                world: Some("farm".to_string()),
                page: 1
            })
        );
        assert_eq!(
            parse(&["list", "farm", "2"]),
            Ok(Command::List {
                world: Some("farm".to_string()),
                page: 2
            })
        );
        assert_eq!(
            parse(&["list", "farm", "two"]),
            Err(CommandError::InvalidPage("two".to_string()))
        );
    }

    #[test]
    fn negative_page_parses_and_is_left_to_range_checks() {
        assert_eq!(parse(&["list", "-1"]), Ok(Command::List { world: None, page: -1 }));
    }

    #[test]
    fn tp_requires_numeric_id() {
        assert_eq!(parse(&["tp", "4"]), Ok(Command::Tp { world: None, id: 4 }));
        assert_eq!(
            parse(&["tp", "world", "12"]),
            Ok(Command::Tp {
                world: Some("world".to_string()),
                id: 12
            })
        );
        assert_eq!(parse(&["tp", "x"]), Err(CommandError::InvalidId("x".to_string())));
        assert_eq!(parse(&["tp"]), Err(CommandError::InvalidSyntax));
        assert!(parse(&["tp", "1"]).unwrap().requires_player());
    }

    #[test]
    fn unknown_or_overlong_is_invalid_syntax() {
        assert_eq!(parse(&["purge"]), Err(CommandError::InvalidSyntax));
        assert_eq!(parse(&["reload", "now"]), Err(CommandError::InvalidSyntax));
        assert_eq!(parse(&["list", "a", "1", "b"]), Err(CommandError::InvalidSyntax));
        assert_eq!(
            CommandError::InvalidPage("x".to_string()).to_string(),
            "x is not a valid page number."
        );
    }
}
