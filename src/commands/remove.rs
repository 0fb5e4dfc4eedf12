use crate::commands::executable::Executable;
use crate::commands::{CommandParser, CommandParserError};
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Removes the specified keys. A key is ignored if it does not exist. Replies with the number of
/// keys that were removed.
///
/// Usage: `REMOVE key [key ...]`
#[derive(Debug, PartialEq)]
pub struct Remove {
    pub keys: Vec<i64>,
}

impl Executable for Remove {
    fn exec(self, store: Store) -> Result<Reply, Error> {
        let mut store = store.lock();
        let count = self
            .keys
            .into_iter()
            .filter(|&key| store.remove(key).is_some())
            .count();

        Ok(Reply::Integer(count as i64))
    }
}

impl TryFrom<&mut CommandParser> for Remove {
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
