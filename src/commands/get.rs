use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Get the value of `key`. If the key does not exist the special value `nil` is returned.
///
/// Usage: `GET key`
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: i64,
}

impl Executable for Get {
    fn exec(self, store: Store) -> Result<Reply, Error> {
        let value = store.lock().get(self.key);
        Ok(Reply::from_lookup(value))
    }
}

impl TryFrom<&mut CommandParser> for Get {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_integer()?;
        Ok(Self { key })
    }
}
