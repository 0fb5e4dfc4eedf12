pub mod bucket;
pub mod executable;
pub mod exists;
pub mod get;
pub mod help;
pub mod len;
pub mod put;
pub mod remove;
pub mod stats;

use std::vec;
use strum_macros::VariantNames;
use thiserror::Error as ThisError;

use crate::commands::executable::Executable;
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

use bucket::Bucket;
use exists::Exists;
use get::Get;
use help::Help;
use len::Len;
use put::Put;
use remove::Remove;
use stats::Stats;

#[derive(Debug, PartialEq, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Bucket(Bucket),
    Exists(Exists),
    Get(Get),
    Help(Help),
    Len(Len),
    Put(Put),
    Remove(Remove),
    Stats(Stats),
}

impl Executable for Command {
    fn exec(self, store: Store) -> Result<Reply, Error> {
        match self {
            Command::Bucket(cmd) => cmd.exec(store),
            Command::Exists(cmd) => cmd.exec(store),
            Command::Get(cmd) => cmd.exec(store),
            Command::Help(cmd) => cmd.exec(store),
            Command::Len(cmd) => cmd.exec(store),
            Command::Put(cmd) => cmd.exec(store),
            Command::Remove(cmd) => cmd.exec(store),
            Command::Stats(cmd) => cmd.exec(store),
        }
    }
}

impl TryFrom<Vec<String>> for Command {
    type Error = Error;

    fn try_from(tokens: Vec<String>) -> Result<Self, Self::Error> {
        let mut parser = CommandParser {
            parts: tokens.into_iter(),
        };

        let command_name = parser.parse_command_name()?;

        let command = match &command_name[..] {
            "bucket" => Bucket::try_from(&mut parser).map(Command::Bucket),
            "exists" => Exists::try_from(&mut parser).map(Command::Exists),
            "get" => Get::try_from(&mut parser).map(Command::Get),
            "help" => Help::try_from(&mut parser).map(Command::Help),
            "len" => Len::try_from(&mut parser).map(Command::Len),
            "put" => Put::try_from(&mut parser).map(Command::Put),
            "remove" => Remove::try_from(&mut parser).map(Command::Remove),
            "stats" => Stats::try_from(&mut parser).map(Command::Stats),
            _ => Err(CommandParserError::UnknownCommand {
                command: command_name,
            }
            .into()),
        }?;

        parser.finish()?;

        Ok(command)
    }
}

pub struct CommandParser {
    parts: vec::IntoIter<String>,
}

impl CommandParser {
    fn parse_command_name(&mut self) -> Result<String, CommandParserError> {
        self.parts
            .next()
            .map(|name| name.to_lowercase())
            .ok_or(CommandParserError::EndOfStream)
    }

    fn next_string(&mut self) -> Result<String, CommandParserError> {
        self.parts.next().ok_or(CommandParserError::EndOfStream)
    }

    fn next_integer(&mut self) -> Result<i64, CommandParserError> {
        let argument = self.next_string()?;

        argument
            .parse::<i64>()
            .map_err(|_| CommandParserError::InvalidInteger { argument })
    }

    /// Every command takes a fixed shape, so leftover tokens are a usage error.
    fn finish(&mut self) -> Result<(), CommandParserError> {
        match self.parts.next() {
            Some(argument) => Err(CommandParserError::UnexpectedArgument { argument }),
            None => Ok(()),
        }
    }
}

#[derive(Clone, Debug, ThisError, PartialEq)]
pub enum CommandParserError {
    #[error("unknown command '{command}'")]
    UnknownCommand { command: String },
    #[error("value is not an integer or out of range: '{argument}'")]
    InvalidInteger { argument: String },
    #[error("unexpected argument '{argument}'")]
    UnexpectedArgument { argument: String },
    #[error("wrong number of arguments; the command line ended early")]
    EndOfStream,
}
