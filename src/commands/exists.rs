use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Replies with how many of the given keys are present. A key named more than once is counted
/// every time.
///
/// Usage: `EXISTS key [key ...]`
#[derive(Debug, PartialEq)]
pub struct Exists {
    pub keys: Vec<i64>,
}

impl Executable for Exists {
    fn exec(self, store: Store) -> Result<Reply, Error> {
        let store = store.lock();
        let count = self
            .keys
            .iter()
            .filter(|&&key| store.contains_key(key))
            .count();

        Ok(Reply::Integer(count as i64))
    }
}

impl TryFrom<&mut CommandParser> for Exists {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let mut keys = vec![];

        loop {
            match parser.next_integer() {
                Ok(key) => keys.push(key),
                Err(CommandParserError::EndOfStream) if !keys.is_empty() => {
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(Self { keys })
    }
}
