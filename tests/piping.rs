#![cfg(unix)]

use lazysh::{sh, CommandError};
use lazysh_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn pipes_through_several_stages() {
    init_tracing();
    let result = sh!("echo -n hello")
        .unwrap()
        .pipe(sh!("wc -c").unwrap())
        .unwrap()
        .pipe(sh!("cat").unwrap())
        .unwrap();

    assert_eq!(with_timeout(result).await.unwrap(), "5\n");
}

#[tokio::test]
async fn pipes_into_external_sink() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("word-count");

    let file = tokio::fs::File::create(&path).await.unwrap();
    let counted = sh!("echo hello world")
        .unwrap()
        .pipe(sh!("wc -c").unwrap())
        .unwrap();
    with_timeout(counted.pipe_into(file)).await.unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "12\n");
}

#[tokio::test]
async fn pipe_into_returns_the_sink() {
    init_tracing();
    let sink = with_timeout(sh!("printf abc").unwrap().pipe_into(Vec::new()))
        .await
        .unwrap();
    assert_eq!(sink, b"abc");
}

#[tokio::test]
async fn pipe_into_reports_upstream_failure() {
    init_tracing();
    let err = with_timeout(
        sh!("sh -c {}", "echo nope >&2; exit 4")
            .unwrap()
            .pipe_into(Vec::new()),
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), Some(4));
    assert_eq!(err.to_string(), "nope");
}

#[tokio::test]
async fn failed_upstream_still_closes_downstream_input() {
    init_tracing();
    let downstream = sh!("sh -c {}", "exit 1")
        .unwrap()
        .pipe(sh!("wc -c").unwrap())
        .unwrap();

    assert_eq!(with_timeout(downstream).await.unwrap(), "0\n");
}

#[tokio::test]
async fn each_stage_is_a_separate_process() {
    init_tracing();
    let first = sh!("echo -n abc").unwrap();
    let second = sh!("cat").unwrap();
    let last = first.pipe(second.clone()).unwrap();

    assert_eq!(with_timeout(&last).await.unwrap(), "abc");
    assert!(first.pid().is_some());
    assert_ne!(first.pid(), second.pid());
}

#[tokio::test]
async fn cannot_pipe_from_an_already_streamed_command() {
    init_tracing();
    let cmd = sh!("echo hi").unwrap();
    let _stream = cmd.stream().unwrap();

    let err = cmd.pipe(sh!("cat").unwrap()).unwrap_err();
    assert!(matches!(err, CommandError::OutputClaimed));
}

#[tokio::test]
async fn failed_pipe_leaves_downstream_unstarted() {
    init_tracing();
    let cmd = sh!("echo hi").unwrap();
    let _stream = cmd.stream().unwrap();
    let downstream = sh!("cat").unwrap();

    let err = cmd.pipe(downstream.clone()).unwrap_err();
    assert!(matches!(err, CommandError::OutputClaimed));
    assert!(!downstream.is_started());
    assert_eq!(downstream.pid(), None);
}

#[tokio::test]
async fn claimed_downstream_input_keeps_upstream_output() {
    init_tracing();
    let upstream = sh!("echo -n kept").unwrap();
    let downstream = sh!("cat").unwrap();
    let _writer = downstream.writer().unwrap();

    let err = upstream.pipe(downstream).unwrap_err();
    assert!(matches!(err, CommandError::InputClaimed));
    assert_eq!(with_timeout(&upstream).await.unwrap(), "kept");
}
