use std::fmt;

use itertools::Itertools;

/// The result of running a command, rendered the way `redis-cli` prints replies.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Simple(String),
    Error(String),
    Integer(i64),
    Null,
    Array(Vec<Reply>),
}

impl Reply {
    pub fn ok() -> Reply {
        Reply::Simple("OK".to_string())
    }

    /// Reply with a value when the key was found, `(nil)` otherwise.
    pub fn from_lookup(value: Option<i64>) -> Reply {
        value.map_or(Reply::Null, Reply::Integer)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Simple(s) => write!(f, "{}", s),
            Reply::Error(s) => write!(f, "(error) {}", s),
            Reply::Integer(i) => write!(f, "(integer) {}", i),
            Reply::Null => write!(f, "(nil)"),
            Reply::Array(arr) if arr.is_empty() => write!(f, "(empty array)"),
            Reply::Array(arr) => {
                let lines = arr
                    .iter()
                    .enumerate()
                    .map(|(i, reply)| format!("{}) {}", i + 1, reply))
                    .join("\n");
                write!(f, "{}", lines)
            }
        }
    }
}

impl From<Reply> for Vec<u8> {
    fn from(reply: Reply) -> Self {
        let mut bytes = reply.to_string().into_bytes();
        bytes.push(b'\n');
        bytes
    }
}
