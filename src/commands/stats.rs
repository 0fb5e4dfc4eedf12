use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Reports how entries are spread over the buckets. A `longest_chain` far above `load_factor`
/// means the hash is clustering keys.
///
/// Usage: `STATS`
#[derive(Debug, PartialEq)]
pub struct Stats;

impl Executable for Stats {
    fn exec(self, store: Store) -> Result<Reply, Error> {
        let stats = store.lock().stats();

        Ok(Reply::Array(vec![
            Reply::Simple(format!("entries {}", stats.entries)),
            Reply::Simple(format!("buckets {}", stats.buckets)),
            Reply::Simple(format!("touched {}", stats.touched)),
            Reply::Simple(format!("longest_chain {}", stats.longest_chain)),
            Reply::Simple(format!("load_factor {:.4}", stats.load_factor)),
        ]))
    }
}

impl TryFrom<&mut CommandParser> for Stats {
    type Error = Error;

    fn try_from(_parser: &mut CommandParser) -> Result<Self, Self::Error> {
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::hash::HasherKind;
    use crate::table::KeyValueTable;

    #[test]
    fn reports_distribution() {
        let cmd = Command::try_from(vec!["stats".to_string()]).unwrap();
        assert_eq!(cmd, Command::Stats(Stats));

        let table = KeyValueTable::with_hasher(8, HasherKind::Constant).unwrap();
        let store = Store::from_table(table);
        store.lock().extend([(1, 1), (2, 2), (3, 3)]);

        let result = cmd.exec(store).unwrap();

        assert_eq!(
            result,
            Reply::Array(vec![
                Reply::Simple("entries 3".to_string()),
                Reply::Simple("buckets 8".to_string()),
                Reply::Simple("touched 1".to_string()),
                Reply::Simple("longest_chain 3".to_string()),
                Reply::Simple("load_factor 0.3750".to_string()),
            ])
        );
    }
}
