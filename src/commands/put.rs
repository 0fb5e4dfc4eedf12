use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Set `key` to hold `value`. An existing value is overwritten in place.
///
/// Usage: `PUT key value`
#[derive(Debug, PartialEq)]
pub struct Put {
    pub key: i64,
    pub value: i64,
}

impl Executable for Put {
    fn exec(self, store: Store) -> Result<Reply, Error> {
        store.lock().put(self.key, self.value);
        Ok(Reply::ok())
    }
}

impl TryFrom<&mut CommandParser> for Put {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_integer()?;
        let value = parser.next_integer()?;

        Ok(Self { key, value })
    }
}
