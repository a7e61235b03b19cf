//! Python REPL tool: runs Python snippets in a persistent interpreter.
//!
//! The tool's [`ReplSession`] owns one long-lived `python3` child running a
//! small driver loop. Each snippet is sent as one JSON line and executed in
//! a namespace that lives as long as the child, so definitions made by
//! earlier calls stay visible and side effects happen exactly once. The
//! child is started on first use and restarted after [`ReplSession::reset`]
//! or if it dies.

use async_trait::async_trait;
use minagent_core::error::ToolError;
use minagent_core::tool::Tool;
use serde::Deserialize;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// One `{"code": ...}` request per stdin line, one `{"output", "error"}`
/// reply per stdout line. `BaseException` is caught so `exit()` cannot end
/// the loop.
const DRIVER: &str = r#"
import contextlib, io, json, sys
requests, replies = sys.stdin, sys.stdout
namespace = {"__name__": "__main__"}
while True:
    line = requests.readline()
    if not line:
        break
    code = json.loads(line)["code"]
    buffer = io.StringIO()
    error = None
    sys.stdin = io.StringIO()
    try:
        with contextlib.redirect_stdout(buffer), contextlib.redirect_stderr(buffer):
            exec(code, namespace)
    except BaseException as exc:
        message = str(exc)
        error = f"{type(exc).__name__}: {message}" if message else type(exc).__name__
    finally:
        sys.stdin = requests
    replies.write(json.dumps({"output": buffer.getvalue(), "error": error}) + "\n")
    replies.flush()
"#;

const NO_OUTPUT: &str = "Code executed successfully (no output).";

#[derive(Debug, Deserialize)]
struct Reply {
    output: String,
    error: Option<String>,
}

/// A running interpreter and its pipes.
struct Interpreter {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl Interpreter {
    fn spawn(python_bin: &str) -> Result<Self, ToolError> {
        let mut child = Command::new(python_bin)
            .args(["-u", "-c", DRIVER])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ToolError::Failed(format!("failed to start {python_bin}: {e}")))?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            return Err(ToolError::Failed(format!("{python_bin} has no stdio pipes")));
        };
        debug!(python = python_bin, pid = ?child.id(), "Started Python interpreter");
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    async fn exchange(&mut self, code: &str) -> Result<Reply, ToolError> {
        let mut request = serde_json::json!({ "code": code }).to_string();
        request.push('\n');
        self.stdin
            .write_all(request.as_bytes())
            .await
            .map_err(|e| ToolError::Failed(format!("failed to send code: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| ToolError::Failed(format!("failed to send code: {e}")))?;

        let mut line = String::new();
        let read = self
            .stdout
            .read_line(&mut line)
            .await
            .map_err(|e| ToolError::Failed(format!("failed to read reply: {e}")))?;
        if read == 0 {
            return Err(ToolError::Failed(
                "Python interpreter exited; the session was lost".into(),
            ));
        }
        serde_json::from_str(&line)
            .map_err(|e| ToolError::Failed(format!("malformed interpreter reply: {e}")))
    }
}

/// The live interpreter behind one [`PythonReplTool`].
pub struct ReplSession {
    python_bin: String,
    interpreter: Mutex<Option<Interpreter>>,
}

impl ReplSession {
    pub fn new(python_bin: impl Into<String>) -> Self {
        Self {
            python_bin: python_bin.into(),
            interpreter: Mutex::new(None),
        }
    }

    /// Whether an interpreter is currently running.
    pub async fn is_running(&self) -> bool {
        self.interpreter
            .lock()
            .await
            .as_mut()
            .is_some_and(Interpreter::is_alive)
    }

    /// Stop the interpreter, forgetting every definition made so far.
    pub async fn reset(&self) {
        if let Some(mut interpreter) = self.interpreter.lock().await.take() {
            if let Err(e) = interpreter.child.kill().await {
                warn!(error = %e, "Failed to stop Python interpreter");
            }
        }
    }

    /// Run `code` in the session namespace and return what it printed.
    pub async fn execute(&self, code: &str) -> Result<String, ToolError> {
        // Held for the whole call so snippets never interleave.
        let mut guard = self.interpreter.lock().await;

        if !guard.as_mut().is_some_and(Interpreter::is_alive) {
            *guard = Some(Interpreter::spawn(&self.python_bin)?);
        }
        let interpreter = guard
            .as_mut()
            .ok_or_else(|| ToolError::Failed("Python interpreter unavailable".into()))?;

        let reply = match interpreter.exchange(code).await {
            Ok(reply) => reply,
            Err(e) => {
                *guard = None;
                return Err(e);
            }
        };

        match reply.error {
            Some(error) if error.trim().is_empty() => Err(ToolError::Execution(
                "Python raised an exception without a message".into(),
            )),
            Some(error) => Err(ToolError::Execution(error)),
            None if reply.output.trim().is_empty() => Ok(NO_OUTPUT.to_string()),
            None => Ok(reply.output),
        }
    }
}

pub struct PythonReplTool {
    session: ReplSession,
}

impl PythonReplTool {
    pub fn new(python_bin: impl Into<String>) -> Self {
        Self {
            session: ReplSession::new(python_bin),
        }
    }

    pub fn session(&self) -> &ReplSession {
        &self.session
    }
}

impl Default for PythonReplTool {
    fn default() -> Self {
        Self::new("python3")
    }
}

/// Remove a surrounding Markdown code fence, if any.
pub fn strip_code_fence(input: &str) -> &str {
    let code = input.trim();
    let code = code
        .strip_prefix("```python")
        .or_else(|| code.strip_prefix("```"))
        .unwrap_or(code);
    code.strip_suffix("```").unwrap_or(code)
}

#[async_trait]
impl Tool for PythonReplTool {
    fn name(&self) -> &str {
        "Python REPL"
    }

    fn description(&self) -> &str {
        "A Python shell. Use this to execute Python commands. Input should be a valid \
         Python command. If you want to see the output of a value, you should print it \
         out with print()."
    }

    async fn run(&self, input: &str) -> Result<String, ToolError> {
        let code = strip_code_fence(input);
        debug!(python = %self.session.python_bin, code_len = code.len(), "Running Python snippet");
        self.session.execute(code).await
    }
}
