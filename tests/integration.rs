use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, ReadBuf,
};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use rax_ftp_client::client::{Client, Direction, Operation, OperationKind, Request};
use rax_ftp_client::config::{ClientConfig, DataConnectOrder, StatusPolicy};
use rax_ftp_client::error::{FtpClientError, SessionError};
use rax_ftp_client::session::connector::connect_tcp;
use rax_ftp_client::session::{BoxedStream, Connector};
use rax_ftp_client::transfer::{LocalFs, Outcome};

// Plain TCP in both directions; the mock server speaks cleartext after AUTH TLS
struct PlainConnector;

impl Connector for PlainConnector {
    async fn connect(&self, addr: &str, timeout: Duration) -> Result<BoxedStream, SessionError> {
        Ok(Box::new(connect_tcp(addr, timeout).await?))
    }

    async fn secure(
        &self,
        stream: BoxedStream,
        _server_name: &str,
    ) -> Result<BoxedStream, SessionError> {
        Ok(stream)
    }
}

// Control connection is plain; every data connection fails on first read or write
#[derive(Default)]
struct BrokenDataConnector {
    connects: AtomicUsize,
}

struct BrokenStream(TcpStream);

fn reset() -> io::Error {
    io::Error::new(io::ErrorKind::ConnectionReset, "data connection reset")
}

impl AsyncRead for BrokenStream {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(reset()))
    }
}

impl AsyncWrite for BrokenStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Ready(Err(reset()))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().0).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().0).poll_shutdown(cx)
    }
}

impl Connector for BrokenDataConnector {
    async fn connect(&self, addr: &str, timeout: Duration) -> Result<BoxedStream, SessionError> {
        let stream = connect_tcp(addr, timeout).await?;
        if self.connects.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(Box::new(stream))
        } else {
            Ok(Box::new(BrokenStream(stream)))
        }
    }

    async fn secure(
        &self,
        stream: BoxedStream,
        _server_name: &str,
    ) -> Result<BoxedStream, SessionError> {
        Ok(stream)
    }
}

#[derive(Default)]
struct MockState {
    greeting: Option<&'static str>,
    files: HashMap<String, Vec<u8>>,
    listing: Vec<String>,
    rejected_verbs: HashSet<&'static str>,
    // Verbs whose transfer ends with 451 instead of 226
    failed_completions: HashSet<&'static str>,
    commands: Vec<String>,
    data_connections: usize,
}

type Shared = Arc<Mutex<MockState>>;

// Helper to start a scripted FTP server for exactly one client session
async fn start_mock_server(state: MockState) -> (u16, Shared, JoinHandle<()>) {
    let control = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let data = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = control.local_addr().unwrap().port();
    let shared = Arc::new(Mutex::new(state));

    let handle = tokio::spawn(serve(control, data, shared.clone()));
    (port, shared, handle)
}

async fn serve(control: TcpListener, data: TcpListener, state: Shared) {
    let (socket, _) = control.accept().await.unwrap();
    let (read_half, mut writer) = socket.into_split();
    let mut reader = BufReader::new(read_half);
    let data_port = data.local_addr().unwrap().port();

    let greeting = state.lock().unwrap().greeting.unwrap_or("220 mock ready");
    reply(&mut writer, greeting).await;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await.unwrap() == 0 {
            break;
        }
        let line = line.trim_end().to_string();
        let (verb, arg) = match line.split_once(' ') {
            Some((verb, arg)) => (verb.to_string(), arg.to_string()),
            None => (line.clone(), String::new()),
        };

        let rejected = {
            let mut state = state.lock().unwrap();
            state.commands.push(line.clone());
            state.rejected_verbs.contains(verb.as_str())
        };
        if rejected {
            writer.write_all(b"550 Requested action not taken\r\n").await.unwrap();
            continue;
        }

        match verb.as_str() {
            "AUTH" => reply(&mut writer, "234 Proceed with negotiation").await,
            "USER" => reply(&mut writer, "331 Password required").await,
            "PBSZ" | "PROT" | "TYPE" | "MODE" | "STRU" => reply(&mut writer, "200 OK").await,
            "PASS" => reply(&mut writer, "230 Logged in").await,
            "PASV" => {
                let text = format!(
                    "227 Entering Passive Mode (127,0,0,1,{},{})",
                    data_port / 256,
                    data_port % 256
                );
                reply(&mut writer, &text).await;
            }
            "LIST" => {
                reply(&mut writer, "150 Here comes the listing").await;
                let payload: String = {
                    let state = state.lock().unwrap();
                    state.listing.iter().map(|l| format!("{}\r\n", l)).collect()
                };
                send_data(&data, &state, payload.as_bytes()).await;
                reply(&mut writer, "226 Directory send OK").await;
            }
            "RETR" => {
                let content = state.lock().unwrap().files.get(&arg).cloned();
                match content {
                    Some(content) => {
                        reply(&mut writer, "150 Opening data connection").await;
                        send_data(&data, &state, &content).await;
                        reply(&mut writer, completion(&state, "RETR")).await;
                    }
                    None => reply(&mut writer, "550 No such file").await,
                }
            }
            "STOR" => {
                reply(&mut writer, "150 Ok to send data").await;
                let (mut stream, _) = data.accept().await.unwrap();
                let mut content = Vec::new();
                stream.read_to_end(&mut content).await.unwrap();
                let completed = {
                    let mut state = state.lock().unwrap();
                    state.data_connections += 1;
                    let completed = !state.failed_completions.contains("STOR");
                    if completed {
                        state.files.insert(arg.clone(), content);
                    }
                    completed
                };
                if completed {
                    reply(&mut writer, "226 Transfer complete").await;
                } else {
                    reply(&mut writer, "451 Local error in processing").await;
                }
            }
            "DELE" => {
                let removed = state.lock().unwrap().files.remove(&arg).is_some();
                if removed {
                    reply(&mut writer, "250 Deleted").await;
                } else {
                    reply(&mut writer, "550 No such file").await;
                }
            }
            "MKD" => reply(&mut writer, &format!("257 \"{}\" created", arg)).await,
            "RMD" => reply(&mut writer, "250 Removed").await,
            "QUIT" => {
                reply(&mut writer, "221 Goodbye").await;
                break;
            }
            _ => reply(&mut writer, "502 Not implemented").await,
        }
    }

    // Anything that connects to the data port after the fact still counts
    if let Ok(Ok(_)) = tokio::time::timeout(Duration::from_millis(200), data.accept()).await {
        state.lock().unwrap().data_connections += 1;
    }
}

async fn reply(writer: &mut tokio::net::tcp::OwnedWriteHalf, text: &str) {
    writer
        .write_all(format!("{}\r\n", text).as_bytes())
        .await
        .unwrap();
}

fn completion(state: &Shared, verb: &str) -> &'static str {
    if state.lock().unwrap().failed_completions.contains(verb) {
        "451 Local error in processing"
    } else {
        "226 Transfer complete"
    }
}

async fn send_data(data: &TcpListener, state: &Shared, payload: &[u8]) {
    let (mut stream, _) = data.accept().await.unwrap();
    state.lock().unwrap().data_connections += 1;
    stream.write_all(payload).await.unwrap();
    stream.shutdown().await.unwrap();
}

// Helper to build a config writing downloads into `dir`
fn config_for(dir: &Path) -> ClientConfig {
    ClientConfig {
        download_dir: dir.display().to_string(),
        ..ClientConfig::default()
    }
}

async fn run(
    port: u16,
    config: ClientConfig,
    operation: Operation,
    local: &LocalFs,
) -> (Result<Outcome, FtpClientError>, Vec<u8>) {
    run_with(PlainConnector, port, config, operation, local).await
}

async fn run_with<C: Connector>(
    connector: C,
    port: u16,
    config: ClientConfig,
    operation: Operation,
    local: &LocalFs,
) -> (Result<Outcome, FtpClientError>, Vec<u8>) {
    let request = Request::new("127.0.0.1", port, "alice", "secret", operation);
    let mut sink = Vec::new();
    let result = Client::new(config, connector)
        .run(&request, local, &mut sink)
        .await;
    (result, sink)
}

fn failing(verb: &'static str) -> HashSet<&'static str> {
    let mut verbs = HashSet::new();
    verbs.insert(verb);
    verbs
}

#[tokio::test]
async fn test_list_runs_full_command_sequence() {
    let tmp = TempDir::new().unwrap();
    let (port, state, server) = start_mock_server(MockState {
        listing: vec!["a.txt".into(), "b.txt".into()],
        ..MockState::default()
    })
    .await;

    let (result, sink) = run(
        port,
        config_for(tmp.path()),
        Operation::remote(OperationKind::List, "/docs"),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::Completed(ref r) if r.code() == 226));
    assert_eq!(String::from_utf8(sink).unwrap(), "a.txt\nb.txt\n");

    let state = state.lock().unwrap();
    assert_eq!(
        state.commands,
        vec![
            "AUTH TLS",
            "USER alice",
            "PBSZ 0",
            "PROT P",
            "PASS secret",
            "PASV",
            "LIST /docs",
            "QUIT",
        ]
    );
}

#[tokio::test]
async fn test_remote_only_operations() {
    for (kind, expected, code) in [
        (OperationKind::MakeDirectory, "MKD /new", 257),
        (OperationKind::RemoveDirectory, "RMD /new", 250),
    ] {
        let tmp = TempDir::new().unwrap();
        let (port, state, server) = start_mock_server(MockState::default()).await;

        let (result, _) = run(
            port,
            config_for(tmp.path()),
            Operation::remote(kind, "/new"),
            &LocalFs::new(tmp.path()),
        )
        .await;
        server.await.unwrap();

        assert!(matches!(result.unwrap(), Outcome::Completed(ref r) if r.code() == code));
        let state = state.lock().unwrap();
        assert_eq!(state.commands[5], expected);
        assert_eq!(state.commands.last().unwrap(), "QUIT");
        assert_eq!(state.data_connections, 0);
    }
}

#[tokio::test]
async fn test_rm_of_missing_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let (port, state, server) = start_mock_server(MockState::default()).await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::remote(OperationKind::RemoveFile, "/ghost.txt"),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::Rejected(ref r) if r.code() == 550));
    assert_eq!(state.lock().unwrap().commands.last().unwrap(), "QUIT");
}

#[tokio::test]
async fn test_copy_download() {
    let tmp = TempDir::new().unwrap();
    let mut files = HashMap::new();
    files.insert("/in/report.txt".to_string(), b"quarterly numbers\n".to_vec());
    let (port, state, server) = start_mock_server(MockState {
        files,
        ..MockState::default()
    })
    .await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::transfer(
            OperationKind::Copy,
            "/in/report.txt",
            "report.txt",
            Direction::RemoteToLocal,
        ),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(result.unwrap().is_success());
    let written = std::fs::read(tmp.path().join("report.txt")).unwrap();
    assert_eq!(written, b"quarterly numbers\n");

    let state = state.lock().unwrap();
    assert_eq!(
        &state.commands[5..],
        &["TYPE I", "MODE S", "STRU F", "PASV", "RETR /in/report.txt", "QUIT"]
    );
    assert!(state.files.contains_key("/in/report.txt"));
}

#[tokio::test]
async fn test_copy_upload() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("upload.bin");
    std::fs::write(&source, [7u8; 20_000]).unwrap();
    let (port, state, server) = start_mock_server(MockState::default()).await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::transfer(
            OperationKind::Copy,
            "/up/upload.bin",
            &source,
            Direction::LocalToRemote,
        ),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(result.unwrap().is_success());
    assert!(source.exists());
    let state = state.lock().unwrap();
    assert_eq!(state.files["/up/upload.bin"], vec![7u8; 20_000]);
}

#[tokio::test]
async fn test_move_download_deletes_remote_source() {
    let tmp = TempDir::new().unwrap();
    let mut files = HashMap::new();
    files.insert("/in/a.txt".to_string(), b"hello".to_vec());
    let (port, state, server) = start_mock_server(MockState {
        files,
        ..MockState::default()
    })
    .await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::transfer(OperationKind::Move, "/in/a.txt", "a.txt", Direction::RemoteToLocal),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::Completed(ref r) if r.code() == 250));
    assert_eq!(std::fs::read(tmp.path().join("a.txt")).unwrap(), b"hello");

    let state = state.lock().unwrap();
    assert!(state.files.is_empty());
    let n = state.commands.len();
    assert_eq!(&state.commands[n - 3..], &["RETR /in/a.txt", "DELE /in/a.txt", "QUIT"]);
}

#[tokio::test]
async fn test_move_upload_deletes_local_source() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("notes.txt");
    std::fs::write(&source, b"move me").unwrap();
    let (port, state, server) = start_mock_server(MockState::default()).await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::transfer(OperationKind::Move, "/notes.txt", &source, Direction::LocalToRemote),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(result.unwrap().is_success());
    assert!(!source.exists());
    assert_eq!(state.lock().unwrap().files["/notes.txt"], b"move me");
}

#[tokio::test]
async fn test_rejected_retrieve_opens_no_data_connection() {
    let tmp = TempDir::new().unwrap();
    let (port, state, server) = start_mock_server(MockState::default()).await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::transfer(OperationKind::Move, "/missing.txt", "missing.txt", Direction::RemoteToLocal),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::Rejected(ref r) if r.code() == 550));
    assert!(!tmp.path().join("missing.txt").exists());

    let state = state.lock().unwrap();
    assert_eq!(state.data_connections, 0);
    assert!(!state.commands.iter().any(|c| c.starts_with("DELE")));
    assert_eq!(state.commands.last().unwrap(), "QUIT");
}

#[tokio::test]
async fn test_missing_upload_source_sends_no_transfer_commands() {
    let tmp = TempDir::new().unwrap();
    let (port, state, server) = start_mock_server(MockState::default()).await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::transfer(
            OperationKind::Copy,
            "/x.txt",
            tmp.path().join("absent.txt"),
            Direction::LocalToRemote,
        ),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::LocalFailure(_)));
    let state = state.lock().unwrap();
    assert!(!state.commands.iter().any(|c| c == "PASV" || c.starts_with("STOR")));
    assert_eq!(state.commands.last().unwrap(), "QUIT");
}

#[tokio::test]
async fn test_strict_policy_aborts_login_and_still_quits() {
    let tmp = TempDir::new().unwrap();
    let mut rejected_verbs = HashSet::new();
    rejected_verbs.insert("PASS");
    let (port, state, server) = start_mock_server(MockState {
        rejected_verbs,
        ..MockState::default()
    })
    .await;

    let config = ClientConfig {
        status_policy: StatusPolicy::Strict,
        ..config_for(tmp.path())
    };
    let (result, _) = run(
        port,
        config,
        Operation::remote(OperationKind::List, "/"),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(
        result,
        Err(FtpClientError::Session(SessionError::Rejected(ref r))) if r.code() == 550
    ));
    let state = state.lock().unwrap();
    assert_eq!(state.commands.last().unwrap(), "QUIT");
    assert!(!state.commands.iter().any(|c| c == "PASV"));
}

#[tokio::test]
async fn test_unreachable_server_is_a_session_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let tmp = TempDir::new().unwrap();
    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::remote(OperationKind::List, "/"),
        &LocalFs::new(tmp.path()),
    )
    .await;

    assert!(matches!(result, Err(FtpClientError::Session(_))));
}

#[tokio::test]
async fn test_unconfirmed_download_keeps_remote_source() {
    let tmp = TempDir::new().unwrap();
    let mut files = HashMap::new();
    files.insert("/in/a.txt".to_string(), b"hello".to_vec());
    let (port, state, server) = start_mock_server(MockState {
        files,
        failed_completions: failing("RETR"),
        ..MockState::default()
    })
    .await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::transfer(OperationKind::Move, "/in/a.txt", "a.txt", Direction::RemoteToLocal),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::CopiedNotMoved(ref r) if r.code() == 451));
    let state = state.lock().unwrap();
    assert!(state.files.contains_key("/in/a.txt"));
    assert!(!state.commands.iter().any(|c| c.starts_with("DELE")));
    assert_eq!(state.commands.last().unwrap(), "QUIT");
}

#[tokio::test]
async fn test_unconfirmed_upload_keeps_local_source() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("notes.txt");
    std::fs::write(&source, b"keep me").unwrap();
    let (port, state, server) = start_mock_server(MockState {
        failed_completions: failing("STOR"),
        ..MockState::default()
    })
    .await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::transfer(OperationKind::Move, "/notes.txt", &source, Direction::LocalToRemote),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::CopiedNotMoved(ref r) if r.code() == 451));
    assert_eq!(std::fs::read(&source).unwrap(), b"keep me");
    let state = state.lock().unwrap();
    assert!(!state.commands.iter().any(|c| c.starts_with("DELE")));
    assert_eq!(state.commands.last().unwrap(), "QUIT");
}

#[tokio::test]
async fn test_broken_data_channel_aborts_move_download() {
    let tmp = TempDir::new().unwrap();
    let mut files = HashMap::new();
    files.insert("/in/a.txt".to_string(), b"hello".to_vec());
    let (port, state, server) = start_mock_server(MockState {
        files,
        ..MockState::default()
    })
    .await;

    let (result, _) = run_with(
        BrokenDataConnector::default(),
        port,
        config_for(tmp.path()),
        Operation::transfer(OperationKind::Move, "/in/a.txt", "a.txt", Direction::RemoteToLocal),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::Aborted(_)));
    let state = state.lock().unwrap();
    assert!(state.files.contains_key("/in/a.txt"));
    assert!(!state.commands.iter().any(|c| c.starts_with("DELE")));
    assert_eq!(state.commands.last().unwrap(), "QUIT");
}

#[tokio::test]
async fn test_broken_data_channel_aborts_move_upload() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("notes.txt");
    std::fs::write(&source, b"keep me").unwrap();
    let (port, state, server) = start_mock_server(MockState::default()).await;

    let (result, _) = run_with(
        BrokenDataConnector::default(),
        port,
        config_for(tmp.path()),
        Operation::transfer(OperationKind::Move, "/notes.txt", &source, Direction::LocalToRemote),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::Aborted(_)));
    assert!(source.exists());
    assert_eq!(state.lock().unwrap().commands.last().unwrap(), "QUIT");
}

#[tokio::test]
async fn test_connect_before_reply_download() {
    let tmp = TempDir::new().unwrap();
    let mut files = HashMap::new();
    files.insert("/in/early.txt".to_string(), b"early bird".to_vec());
    let (port, state, server) = start_mock_server(MockState {
        files,
        ..MockState::default()
    })
    .await;

    let config = ClientConfig {
        data_connect_order: DataConnectOrder::BeforeReply,
        ..config_for(tmp.path())
    };
    let (result, _) = run(
        port,
        config,
        Operation::transfer(OperationKind::Copy, "/in/early.txt", "early.txt", Direction::RemoteToLocal),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::Completed(ref r) if r.code() == 226));
    assert_eq!(std::fs::read(tmp.path().join("early.txt")).unwrap(), b"early bird");
    assert_eq!(state.lock().unwrap().data_connections, 1);
}

#[tokio::test]
async fn test_connect_before_reply_rejection_drops_connection() {
    let tmp = TempDir::new().unwrap();
    let (port, state, server) = start_mock_server(MockState::default()).await;

    let config = ClientConfig {
        data_connect_order: DataConnectOrder::BeforeReply,
        ..config_for(tmp.path())
    };
    let (result, _) = run(
        port,
        config,
        Operation::transfer(OperationKind::Copy, "/missing.txt", "missing.txt", Direction::RemoteToLocal),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result.unwrap(), Outcome::Rejected(ref r) if r.code() == 550));
    assert!(!tmp.path().join("missing.txt").exists());
    let state = state.lock().unwrap();
    assert_eq!(state.data_connections, 1);
    assert_eq!(state.commands.last().unwrap(), "QUIT");
}

#[tokio::test]
async fn test_bad_greeting_still_quits() {
    let tmp = TempDir::new().unwrap();
    let (port, state, server) = start_mock_server(MockState {
        greeting: Some("hello there"),
        ..MockState::default()
    })
    .await;

    let (result, _) = run(
        port,
        config_for(tmp.path()),
        Operation::remote(OperationKind::List, "/"),
        &LocalFs::new(tmp.path()),
    )
    .await;
    server.await.unwrap();

    assert!(matches!(result, Err(FtpClientError::Protocol(_))));
    assert_eq!(state.lock().unwrap().commands, vec!["QUIT"]);
}
