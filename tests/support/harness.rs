use std::fs;
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;

use intake::config::Config;
use intake::profile::Profile;
use intake::repository::{SqliteSubmissionRepository, SubmissionRepository};
use intake::server::{self, AppContext};

pub const TEST_SECRET: &str = "integration-test-secret";

/// TestHarness provides an isolated intake directory.
/// Each harness creates a temporary directory with `.intake/config.md`
/// pointing at a database inside the same directory.
pub struct TestHarness {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub db_path: PathBuf,
    pub intake_binary: PathBuf,
}

impl TestHarness {
    /// Creates a harness configured for `profile`.
    pub fn new(profile: Profile) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let intake_dir = dir.path().join(".intake");
        fs::create_dir_all(&intake_dir).expect("Failed to create .intake dir");

        let config_path = intake_dir.join("config.md");
        let db_path = intake_dir.join("intake.db");

        let content = format!(
            "---\ndatabase:\n  path: {}\nsession:\n  secret_key: {}\nform:\n  profile: {}\n---\n\n# Intake Config\n",
            db_path.display(),
            TEST_SECRET,
            profile
        );
        fs::write(&config_path, content).expect("Failed to write config");

        TestHarness {
            dir,
            config_path,
            db_path,
            intake_binary: PathBuf::from(env!("CARGO_BIN_EXE_intake")),
        }
    }

    /// Creates an empty directory with no config.
    pub fn uninitialized() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = dir.path().join(".intake/config.md");
        let db_path = dir.path().join(".intake/intake.db");
        TestHarness {
            dir,
            config_path,
            db_path,
            intake_binary: PathBuf::from(env!("CARGO_BIN_EXE_intake")),
        }
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Parsed config, without environment overrides.
    pub fn config(&self) -> Config {
        let content = fs::read_to_string(&self.config_path).expect("Failed to read config");
        Config::parse(&content).expect("Failed to parse config")
    }

    pub fn repository(&self) -> SqliteSubmissionRepository {
        SqliteSubmissionRepository::open(&self.db_path).expect("Failed to open database")
    }

    pub fn count(&self, profile: Profile) -> usize {
        self.repository().count(profile).expect("Failed to count")
    }

    /// Executes the intake binary with the given arguments in the harness directory.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to run intake")
    }

    /// Executes the intake binary feeding `stdin`.
    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn intake");
        child
            .stdin
            .take()
            .expect("stdin not captured")
            .write_all(stdin.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for intake")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.intake_binary);
        cmd.args(args)
            .current_dir(self.path())
            .env_remove("INTAKE_BIND")
            .env_remove("INTAKE_DATABASE_PATH")
            .env_remove("INTAKE_SECRET_KEY")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// An intake server on an ephemeral port, stopped on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn start(ctx: AppContext) -> Self {
        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind test listener");
                addr_tx
                    .send(listener.local_addr().expect("No local address"))
                    .expect("Failed to report address");
                server::serve_with_shutdown(listener, Arc::new(ctx), async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server failed");
            });
        });

        let addr = addr_rx.recv().expect("Server did not start");
        TestServer {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
