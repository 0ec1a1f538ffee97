//! External editor invocation.
//!
//! Entries are edited outside the process: the content is written to a
//! temporary file, the user's editor is launched on it, and the file is read
//! back afterwards. Terminal editors run in the foreground and signal
//! completion by exiting. GUI editors detach from the terminal, so the
//! temporary file is polled for a modification instead, bounded by a timeout
//! after which the editor process is killed.
//!
//! The `Editor` trait exists so the interaction loop can be tested with a
//! mock instead of a real subprocess.

use crate::errors::{AppResult, EditorError};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant, SystemTime};
use tracing::debug;

/// Commands that open a window and detach instead of holding the terminal.
const GUI_EDITORS: &[&str] = &[
    "code",
    "subl",
    "atom",
    "gedit",
    "kate",
    "notepad",
    "notepad++",
    "textedit",
];

const GUI_POLL_INTERVAL: Duration = Duration::from_millis(100);
const GUI_EDIT_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Trait defining the interface for an editor component.
///
/// Abstracts editing a piece of text under a suggested file name, allowing a
/// real system editor in production and a mock in tests.
pub trait Editor {
    /// Opens `content` for editing and returns the edited text.
    ///
    /// `suggested_name` hints at the file name shown in the editor (e.g.
    /// `2024-01-15.md`). Implementations must not mutate the caller's
    /// original content; on failure the caller keeps what it had.
    fn edit(&self, content: &str, suggested_name: &str) -> AppResult<String>;
}

/// An [`Editor`] that launches the configured system editor command.
pub struct SystemEditor {
    editor_cmd: String,
    gui_timeout: Duration,
}

impl SystemEditor {
    /// Creates an editor wrapper around `editor_cmd`.
    pub fn new(editor_cmd: impl Into<String>) -> Self {
        SystemEditor {
            editor_cmd: editor_cmd.into(),
            gui_timeout: GUI_EDIT_TIMEOUT,
        }
    }

    fn is_gui(&self) -> bool {
        let name = Path::new(&self.editor_cmd)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.editor_cmd);
        GUI_EDITORS.contains(&name)
    }

    /// Maps a spawn failure to the matching editor error.
    fn spawn_error(&self, e: std::io::Error) -> EditorError {
        let command = self.editor_cmd.clone();
        match e.kind() {
            std::io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source: e },
            std::io::ErrorKind::PermissionDenied => {
                EditorError::PermissionDenied { command, source: e }
            }
            _ => EditorError::ExecutionFailed { command, source: e },
        }
    }

    /// Runs a terminal editor in the foreground, inheriting stdio.
    fn edit_foreground(&self, path: &Path) -> AppResult<()> {
        let status = Command::new(&self.editor_cmd)
            .arg(path)
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into())
        }
    }

    /// Spawns a GUI editor detached and waits for the file to change.
    ///
    /// "No change within the timeout" is a failure: the process is killed and
    /// `EditorError::Timeout` returned, never an indefinite hang.
    fn edit_detached(&self, path: &Path) -> AppResult<()> {
        let initial_mtime = fs::metadata(path)?.modified()?;

        let mut child = Command::new(&self.editor_cmd)
            .arg(path)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        debug!(editor = %self.editor_cmd, "waiting for GUI editor to modify the file");
        if !wait_for_modification(path, initial_mtime, self.gui_timeout, GUI_POLL_INTERVAL) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EditorError::Timeout {
                command: self.editor_cmd.clone(),
            }
            .into());
        }

        let status = child.wait().map_err(|e| EditorError::ExecutionFailed {
            command: self.editor_cmd.clone(),
            source: e,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into())
        }
    }
}

impl Editor for SystemEditor {
    fn edit(&self, content: &str, suggested_name: &str) -> AppResult<String> {
        // Keep the suggested name visible in the editor's title bar while
        // still isolating the edit in a throwaway directory.
        let tmp_dir = tempfile::Builder::new().prefix("daybook-").tempdir()?;
        let tmp_path = tmp_dir.path().join(suggested_name);
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(content.as_bytes())?;
            file.flush()?;
        }

        debug!(editor = %self.editor_cmd, gui = self.is_gui(), "launching editor");
        if self.is_gui() {
            self.edit_detached(&tmp_path)?;
        } else {
            self.edit_foreground(&tmp_path)?;
        }

        let edited = fs::read_to_string(&tmp_path)?;
        Ok(edited)
    }
}

/// Polls `path` until its mtime passes `initial_mtime`.
///
/// Returns `true` once a modification is observed and `false` when `timeout`
/// elapses first. Transient stat failures are ignored and polling continues.
fn wait_for_modification(
    path: &Path,
    initial_mtime: SystemTime,
    timeout: Duration,
    poll_interval: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        std::thread::sleep(poll_interval);
        if let Ok(metadata) = fs::metadata(path) {
            if let Ok(mtime) = metadata.modified() {
                if mtime > initial_mtime {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::sync::{Arc, Mutex};

    struct MockEditor {
        pub seen: Arc<Mutex<Vec<(String, String)>>>,
        pub reply: String,
    }

    impl Editor for MockEditor {
        fn edit(&self, content: &str, suggested_name: &str) -> AppResult<String> {
            self.seen
                .lock()
                .unwrap()
                .push((content.to_string(), suggested_name.to_string()));
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_mock_editor_round_trip() {
        let editor = MockEditor {
            seen: Arc::new(Mutex::new(Vec::new())),
            reply: "edited".to_string(),
        };

        let result = editor.edit("original", "2024-01-15.md").unwrap();
        assert_eq!(result, "edited");

        let seen = editor.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "original");
        assert_eq!(seen[0].1, "2024-01-15.md");
    }

    #[test]
    fn test_gui_editor_detection() {
        assert!(SystemEditor::new("code").is_gui());
        assert!(SystemEditor::new("/usr/bin/subl").is_gui());
        assert!(!SystemEditor::new("vim").is_gui());
        assert!(!SystemEditor::new("nano").is_gui());
    }

    #[test]
    fn test_wait_for_modification_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entry.md");
        fs::write(&path, "unchanged").unwrap();
        let initial = fs::metadata(&path).unwrap().modified().unwrap();

        let modified = wait_for_modification(
            &path,
            initial,
            Duration::from_millis(60),
            Duration::from_millis(10),
        );
        assert!(!modified);
    }

    #[test]
    fn test_wait_for_modification_sees_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entry.md");
        fs::write(&path, "before").unwrap();
        // A clearly-older baseline stands in for "the file as the editor
        // received it".
        let initial = SystemTime::now() - Duration::from_secs(60);

        let modified = wait_for_modification(
            &path,
            initial,
            Duration::from_secs(2),
            Duration::from_millis(10),
        );
        assert!(modified);
    }

    #[cfg(unix)]
    #[test]
    fn test_system_editor_returns_content_unchanged_when_editor_writes_nothing() {
        // `true` exits 0 without touching the file, so the round trip must
        // yield the original content.
        let editor = SystemEditor::new("true");
        let result = editor.edit("keep me", "2024-01-15.md").unwrap();
        assert_eq!(result, "keep me");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_editor_nonzero_exit() {
        let editor = SystemEditor::new("false");
        let result = editor.edit("content", "2024-01-15.md");
        match result {
            Err(AppError::Editor(EditorError::NonZeroExit { status_code, .. })) => {
                assert_ne!(status_code, 0);
            }
            other => panic!("Expected NonZeroExit, got {:?}", other),
        }
    }

    #[test]
    fn test_system_editor_command_not_found() {
        let editor = SystemEditor::new("daybook-no-such-editor");
        let result = editor.edit("content", "2024-01-15.md");
        match result {
            Err(AppError::Editor(EditorError::CommandNotFound { command, .. })) => {
                assert_eq!(command, "daybook-no-such-editor");
            }
            other => panic!("Expected CommandNotFound, got {:?}", other),
        }
    }
}
