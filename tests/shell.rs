use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};
use tokio::task::JoinHandle;

use chaintable::shell::run;
use chaintable::{Error, HasherKind, KeyValueTable, Store};

/// Starts a session on one end of an in-memory pipe and hands back the other end: the writer
/// feeds the session's input, the reader yields its reply lines.
fn start_session(
    store: Store,
) -> (
    DuplexStream,
    Lines<BufReader<DuplexStream>>,
    JoinHandle<Result<(), Error>>,
) {
    let (input_client, input_server) = io::duplex(1024);
    let (output_server, output_client) = io::duplex(1024);

    let session = tokio::spawn(run(input_server, output_server, store));

    (input_client, BufReader::new(output_client).lines(), session)
}

async fn run_script(script: &str, store: Store) -> String {
    let mut output = Vec::new();
    run(script.as_bytes(), &mut output, store).await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_scripted_session() {
    let script = "\
        PUT 1 1\n\
        PUT 2 2\n\
        GET 1\n\
        GET 3\n\
        REMOVE 2\n\
        GET 2\n\
        PUT 2 2\n\
        GET 2\n\
        LEN\n";

    let output = run_script(script, Store::new()).await;

    assert_eq!(
        output,
        "OK\nOK\n(integer) 1\n(nil)\n(integer) 1\n(nil)\nOK\n(integer) 2\n(integer) 2\n"
    );
}

#[tokio::test]
async fn test_errors_do_not_end_the_session() {
    let script = "GET\nFROB 1\nPUT 1 x\nPUT 1 2 3\nGET 1\nPUT 1 5\nGET 1\n";

    let output = run_script(script, Store::new()).await;
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines,
        vec![
            "(error) wrong number of arguments; the command line ended early",
            "(error) unknown command 'frob'",
            "(error) value is not an integer or out of range: 'x'",
            "(error) unexpected argument '3'",
            "(nil)",
            "OK",
            "(integer) 5",
        ]
    );
}

#[tokio::test]
async fn test_blank_lines_and_comments_are_skipped() {
    let script = "# seed the table\n\nPUT 3 30\n   \n# done\nGET 3";

    let output = run_script(script, Store::new()).await;

    assert_eq!(output, "OK\n(integer) 30\n");
}

#[tokio::test]
async fn test_bucket_shows_collisions() {
    let table = KeyValueTable::with_hasher(100, HasherKind::Identity).unwrap();
    let script = "PUT 5 1\nPUT 105 2\nPUT 205 3\nREMOVE 105\nBUCKET 5\nEXISTS 5 105 205\n";

    let output = run_script(script, Store::from_table(table)).await;

    assert_eq!(
        output,
        "OK\nOK\nOK\n(integer) 1\n1) index 5\n2) 5 1\n3) 205 3\n(integer) 2\n"
    );
}

#[tokio::test]
async fn test_session_shares_store_with_caller() {
    let store = Store::new();
    store.lock().put(8, 80);

    let output = run_script("GET 8\nPUT 9 90\n", store.clone()).await;

    assert_eq!(output, "(integer) 80\nOK\n");
    assert_eq!(store.lock().get(9), Some(90));
}

#[tokio::test]
async fn test_interactive_session() {
    let (mut input, mut replies, session) = start_session(Store::new());

    input.write_all(b"PUT 1 10\n").await.unwrap();
    assert_eq!(replies.next_line().await.unwrap().as_deref(), Some("OK"));

    // A command split across writes is only answered once its line is complete.
    input.write_all(b"GE").await.unwrap();
    input.write_all(b"T 1\n").await.unwrap();
    assert_eq!(
        replies.next_line().await.unwrap().as_deref(),
        Some("(integer) 10")
    );

    drop(input);
    session.await.unwrap().unwrap();
    assert_eq!(replies.next_line().await.unwrap(), None);
}

#[tokio::test]
async fn test_invalid_utf8_ends_the_session() {
    let mut output = Vec::new();

    let result = run(&b"PUT 1 1\nGET \xff\nGET 1\n"[..], &mut output, Store::new()).await;

    assert!(result.is_err());
    assert_eq!(output, b"OK\n".to_vec());
}
