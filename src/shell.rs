use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::FramedRead;
use tracing::{debug, info, instrument, warn, Level};
use uuid::Uuid;

use crate::codec::CommandCodec;
use crate::commands::executable::Executable;
use crate::commands::Command;
use crate::reply::Reply;
use crate::store::Store;
use crate::Error;

/// Installs a global `fmt` subscriber that writes to stderr, keeping stdout for replies.
pub fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));
}

/// Reads commands line by line from `reader` and writes one reply per command to `writer` until
/// the input is exhausted.
///
/// A line that does not parse into a command is answered with an error reply and the session
/// keeps going. Errors from the input itself, like an oversized line, end the session.
#[instrument(name = "session", skip_all, fields(session_id))]
pub async fn run<R, W>(reader: R, mut writer: W, store: Store) -> Result<(), Error>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    tracing::Span::current().record("session_id", Uuid::new_v4().to_string());

    let mut lines = FramedRead::new(reader, CommandCodec::new());

    while let Some(tokens) = lines.next().await {
        let tokens = tokens?;

        if is_blank_or_comment(&tokens) {
            continue;
        }

        debug!("Received command: {:?}", tokens);
        let res = match Command::try_from(tokens) {
            Ok(cmd) => cmd.exec(store.clone())?,
            Err(e) => {
                warn!("Rejected command: {}", e);
                Reply::Error(e.to_string())
            }
        };
        debug!("Sending reply: {:?}", res);
        let res: Vec<u8> = res.into();

        writer.write_all(&res).await?;
        writer.flush().await?;
    }

    info!("Input closed");
    Ok(())
}

fn is_blank_or_comment(tokens: &[String]) -> bool {
    tokens.first().map_or(true, |first| first.starts_with('#'))
}
