use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

pub trait Executable {
    fn exec(self, store: Store) -> Result<Reply, Error>;
}
