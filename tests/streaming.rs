#![cfg(unix)]

mod common;

use std::io;

use lazysh::{sh, CommandError};
use lazysh_test_utils::{init_tracing, with_timeout};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use common::drain;

#[tokio::test]
async fn streams_output() {
    init_tracing();
    let mut stream = sh!("echo hello").unwrap().stream().unwrap();

    let drained = with_timeout(drain(&mut stream)).await;
    assert!(drained.error.is_none());
    assert_eq!(drained.text().trim(), "hello");
}

#[tokio::test]
async fn writes_reach_stdin() {
    init_tracing();
    let mut stream = sh!("cat").unwrap().stream().unwrap();

    stream.write_all(b"piped input").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut out = String::new();
    with_timeout(stream.read_to_string(&mut out)).await.unwrap();
    assert_eq!(out, "piped input");
}

#[tokio::test]
async fn halves_can_be_driven_separately() {
    init_tracing();
    let (mut writer, mut reader) = sh!("tr a-z A-Z").unwrap().stream().unwrap().into_parts();

    let feed = tokio::spawn(async move {
        for word in ["abc", "def"] {
            writer.write_all(word.as_bytes()).await.unwrap();
        }
        writer.shutdown().await.unwrap();
    });

    let drained = with_timeout(drain(&mut reader)).await;
    feed.await.unwrap();
    assert_eq!(drained.text(), "ABCDEF");
}

#[tokio::test]
async fn failure_is_one_error_followed_by_close() {
    init_tracing();
    let mut reader = sh!("sh -c {}", "echo partial; echo boom >&2; exit 3")
        .unwrap()
        .reader()
        .unwrap();

    let drained = with_timeout(drain(&mut reader)).await;
    assert_eq!(drained.text(), "partial\n");

    let err = drained.error.expect("failed command should end with an error");
    match CommandError::from(err) {
        CommandError::Exit { code, message, .. } => {
            assert_eq!(code, Some(3));
            assert_eq!(message, "boom");
        }
        other => panic!("expected Exit, got {other:?}"),
    }

    let mut rest = Vec::new();
    let n = with_timeout(reader.read_to_end(&mut rest)).await.unwrap();
    assert_eq!(n, 0, "stream should be closed after the error");
}

#[tokio::test]
async fn each_half_can_only_be_claimed_once() {
    init_tracing();
    let cmd = sh!("echo hello").unwrap();
    let mut stream = cmd.stream().unwrap();

    assert!(matches!(cmd.reader(), Err(CommandError::OutputClaimed)));
    assert!(matches!(cmd.writer(), Err(CommandError::InputClaimed)));
    assert!(matches!(
        with_timeout(cmd.text()).await,
        Err(CommandError::OutputClaimed)
    ));

    let drained = with_timeout(drain(&mut stream)).await;
    assert_eq!(drained.text(), "hello\n");
}

#[tokio::test]
async fn writable_side_ends_when_process_exits() {
    init_tracing();
    let cmd = sh!("true").unwrap();
    let mut writer = cmd.writer().unwrap();

    with_timeout(cmd.wait()).await.unwrap();

    let err = writer.write_all(b"too late").await.unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    // Shutting down an ended writer is still fine.
    writer.shutdown().await.unwrap();
}

#[tokio::test]
async fn text_after_reading_stdin_from_writer() {
    init_tracing();
    let cmd = sh!("wc -c").unwrap();
    let mut writer = cmd.writer().unwrap();
    writer.write_all(b"12345678").await.unwrap();
    writer.shutdown().await.unwrap();

    assert_eq!(with_timeout(&cmd).await.unwrap(), "8\n");
}
