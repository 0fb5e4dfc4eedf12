use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Number of entries in the table.
#[derive(Debug, PartialEq)]
pub struct Len;

impl Executable for Len {
    fn exec(self, store: Store) -> Result<Reply, Error> {
        let len = store.lock().len();
        Ok(Reply::Integer(len as i64))
    }
}

impl TryFrom<&mut CommandParser> for Len {
    type Error = Error;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
