use crate::commands::executable::Executable;
use crate::commands::CommandParser;
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Shows the bucket `key` hashes to, followed by every entry chained in that bucket in chain
/// order. The key itself does not need to be present.
///
/// Usage: `BUCKET key`
#[derive(Debug, PartialEq)]
pub struct Bucket {
    pub key: i64,
}

impl Executable for Bucket {
    fn exec(self, store: Store) -> Result<Reply, Error> {
        let table = store.lock();
        let index = table.bucket_index(self.key);

        let header = Reply::Simple(format!("index {}", index));
        let entries = table
            .bucket_entries(index)
            .map(|entry| Reply::Simple(format!("{} {}", entry.key, entry.value)));

        Ok(Reply::Array(std::iter::once(header).chain(entries).collect()))
    }
}

impl TryFrom<&mut CommandParser> for Bucket {
    type Error = Error;

    fn try_from(parser: &mut CommandParser) -> Result<Self, Self::Error> {
        let key = parser.next_integer()?;
        Ok(Self { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::hash::HasherKind;
    use crate::table::KeyValueTable;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn store() -> Store {
        let table = KeyValueTable::with_hasher(10, HasherKind::Identity).unwrap();
        Store::from_table(table)
    }

    #[test]
    fn lists_colliding_entries() {
        let cmd = Command::try_from(tokens(&["BUCKET", "23"])).unwrap();
        assert_eq!(cmd, Command::Bucket(Bucket { key: 23 }));

        let store = store();
        store.lock().extend([(3, 30), (13, 130), (4, 40)]);

        let result = cmd.exec(store).unwrap();

        assert_eq!(
            result,
            Reply::Array(vec![
                Reply::Simple("index 3".to_string()),
                Reply::Simple("3 30".to_string()),
                Reply::Simple("13 130".to_string()),
            ])
        );
    }

    #[test]
    fn untouched_bucket() {
        let cmd = Command::try_from(tokens(&["BUCKET", "5"])).unwrap();

        let result = cmd.exec(store()).unwrap();

        assert_eq!(
            result,
            Reply::Array(vec![Reply::Simple("index 5".to_string())])
        );
    }
}
