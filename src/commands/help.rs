use strum::VariantNames;

use crate::commands::executable::Executable;
use crate::commands::{Command, CommandParser};
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Lists the available commands.
#[derive(Debug, PartialEq)]
pub struct Help;

impl Executable for Help {
    fn exec(self, _store: Store) -> Result<Reply, Error> {
        let names = Command::VARIANTS
            .iter()
            .map(|name| Reply::Simple(name.to_uppercase()))
            .collect();

        Ok(Reply::Array(names))
    }
}

impl TryFrom<&mut CommandParser> for Help {
    type Error = Error;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}
