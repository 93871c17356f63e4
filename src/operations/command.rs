//! Git CLI runner for network and config-mutating operations
//!
//! Single source of truth for:
//! - Running git CLI commands (remote add, fetch, pull, push) with a safe environment
//! - Classifying git's stderr into typed [`GitError`]s
//! - Generating helpful error messages for auth failures

use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::sync::LazyLock;
use std::time::Duration;

use regex::RegexSet;
use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;

use crate::{GitError, GitResult};

/// Default timeout for a single git invocation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Options for running a git command
#[derive(Debug, Clone)]
pub struct GitCommandOpts {
    /// Working directory for the command
    pub work_dir: PathBuf,
    /// Timeout in seconds (default: 300)
    pub timeout_secs: u64,
}

impl GitCommandOpts {
    /// Create options with work_dir and default timeout
    pub fn new(work_dir: PathBuf) -> Self {
        Self {
            work_dir,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set timeout in seconds
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Check if git binary is available
pub fn git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run a git command and return its output, successful or not.
///
/// Handles:
/// - Setting GIT_TERMINAL_PROMPT=0 to prevent hanging on credential prompts
/// - Setting LC_ALL=C so stderr classification sees English messages
/// - Disabling the merge message editor
/// - Timeout handling with proper child process cleanup
pub async fn run_git_command(args: &[&str], opts: &GitCommandOpts) -> GitResult<Output> {
    let timeout_duration = Duration::from_secs(opts.timeout_secs);

    let mut cmd = TokioCommand::new("git");
    cmd.current_dir(&opts.work_dir);
    cmd.args(args);

    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("GIT_MERGE_AUTOEDIT", "no");
    cmd.env("LC_ALL", "C");
    cmd.env("LANG", "C");

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true);

    log::debug!("git {} (in {})", args.join(" "), opts.work_dir.display());

    let mut child = cmd.spawn().map_err(GitError::Io)?;

    // Drain pipes while waiting so a chatty git cannot block on a full buffer
    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();
    let read_stdout = async {
        let mut buf = Vec::new();
        if let Some(out) = stdout_pipe.as_mut() {
            let _ = out.read_to_end(&mut buf).await;
        }
        buf
    };
    let read_stderr = async {
        let mut buf = Vec::new();
        if let Some(err) = stderr_pipe.as_mut() {
            let _ = err.read_to_end(&mut buf).await;
        }
        buf
    };

    let run = async {
        let (status, stdout, stderr) = tokio::join!(child.wait(), read_stdout, read_stderr);
        status.map(|status| Output {
            status,
            stdout,
            stderr,
        })
    };

    match tokio::time::timeout(timeout_duration, run).await {
        Ok(output) => output.map_err(GitError::Io),
        Err(_) => Err(GitError::Timeout(opts.timeout_secs)),
    }
}

/// Run a git command, turning a non-zero exit into a classified error.
///
/// `url` is the remote URL the command talks to, used for auth guidance.
/// Merge reports its conflicts on stdout, so both streams are classified.
pub async fn run_git_checked(
    args: &[&str],
    opts: &GitCommandOpts,
    url: Option<&str>,
) -> GitResult<Output> {
    let output = run_git_command(args, opts).await?;
    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report = match (stderr.trim(), stdout.trim()) {
        (err, "") => err.to_string(),
        ("", out) => out.to_string(),
        (err, out) => format!("{err}\n{out}"),
    };
    Err(classify_failure(&report, url))
}

const AUTH: usize = 0;
const NON_FAST_FORWARD: usize = 1;
const NO_UPSTREAM: usize = 2;
const CONFLICT: usize = 3;
const UNKNOWN_REMOTE: usize = 4;
const REMOTE_EXISTS: usize = 5;
const NETWORK: usize = 6;

static FAILURE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)authentication failed|permission denied \(publickey|could not read (username|password)|host key verification failed|terminal prompts disabled|returned error: 40[13]",
        r"(?i)\[rejected\].*(non-fast-forward|fetch first)|updates were rejected because",
        r"(?i)no tracking information|has no upstream branch|no such ref was fetched|did not specify\s+a branch",
        r"(?i)\bconflict\b|automatic merge failed|could not apply|not possible to fast-forward|would be overwritten by merge",
        r"(?i)does not appear to be a git repository|no such remote",
        r"(?i)remote \S+ already exists",
        r"(?i)could not resolve host|unable to access|connection (refused|timed out|reset)|network is unreachable|early eof",
    ])
    .unwrap_or_else(|_| RegexSet::empty())
});

/// Map git's stderr onto a typed error.
///
/// Auth wins over everything else since git tends to follow an auth failure
/// with a generic "could not read from remote repository" line.
pub fn classify_failure(stderr: &str, url: Option<&str>) -> GitError {
    let message = stderr.trim().to_string();
    let matches = FAILURE_PATTERNS.matches(stderr);

    if matches.matched(AUTH) {
        let guidance = auth_error_message(url.unwrap_or("remote"), is_ssh_failure(stderr, url));
        GitError::Auth(format!("{message}\n\n{guidance}"))
    } else if matches.matched(NON_FAST_FORWARD) {
        GitError::NonFastForward(message)
    } else if matches.matched(NO_UPSTREAM) {
        GitError::NoUpstream(message)
    } else if matches.matched(CONFLICT) {
        GitError::MergeConflict(message)
    } else if matches.matched(UNKNOWN_REMOTE) {
        GitError::RemoteNotFound(message)
    } else if matches.matched(REMOTE_EXISTS) {
        GitError::RemoteExists(message)
    } else if matches.matched(NETWORK) {
        GitError::Network(message)
    } else {
        GitError::CommandFailed(message)
    }
}

fn is_ssh_failure(stderr: &str, url: Option<&str>) -> bool {
    let ssh_url = url.is_some_and(|u| {
        u.starts_with("ssh://") || (!u.contains("://") && u.contains('@') && u.contains(':'))
    });
    ssh_url || stderr.contains("(publickey") || stderr.contains("Host key verification")
}

/// Generate helpful error message for authentication failures
pub fn auth_error_message(url: &str, is_ssh: bool) -> String {
    if is_ssh {
        format!(
            r#"SSH authentication failed for '{url}'.

Setup SSH authentication:

1. Ensure SSH key exists:
   ls ~/.ssh/id_ed25519 || ssh-keygen -t ed25519

2. Start ssh-agent and add key:
   eval "$(ssh-agent -s)"
   ssh-add ~/.ssh/id_ed25519

3. Add public key to Git host (GitHub/GitLab/Bitbucket)

CI/CD: export GIT_SSH_COMMAND="ssh -o StrictHostKeyChecking=no"
"#
        )
    } else {
        format!(
            r#"HTTPS authentication failed for '{url}'.

Setup credential helper:

macOS:   git config --global credential.helper osxkeychain
Windows: git config --global credential.helper manager
Linux:   git config --global credential.helper store
"#
        )
    }
}
