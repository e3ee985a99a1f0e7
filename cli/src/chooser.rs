use std::io::Write;
use std::path::PathBuf;

use walogs_core::bridge::FolderChooser;

/// Folder picker that asks on the terminal. An empty answer cancels.
#[derive(Debug, Default)]
pub struct StdinFolderChooser;

impl FolderChooser for StdinFolderChooser {
    fn choose_folder(&self, prompt: &str, confirm_label: &str) -> Option<PathBuf> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{prompt}\n({confirm_label} with Enter, empty to cancel) path: ").ok()?;
        stdout.flush().ok()?;

        let mut line = String::new();
        std::io::stdin().read_line(&mut line).ok()?;
        let line = line.trim();
        (!line.is_empty()).then(|| PathBuf::from(line))
    }

    fn notify(&self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}
