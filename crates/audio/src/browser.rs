use std::io;
use std::path::{Path, PathBuf};

/// File extensions offered by the music browser.
pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "flac", "ogg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EntryKind {
    Directory,
    Track,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// Directory listing behind the "Choose Music File" dialog.
///
/// Shows sub-directories first, then audio files, both sorted
/// case-insensitively. Hidden entries are skipped.
#[derive(Debug, Clone)]
pub struct MusicBrowser {
    dir: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: Option<usize>,
}

impl MusicBrowser {
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let mut browser = Self {
            dir: dir.into(),
            entries: Vec::new(),
            selected: None,
        };
        browser.refresh()?;
        Ok(browser)
    }

    /// Re-read the current directory, dropping the selection.
    pub fn refresh(&mut self) -> io::Result<()> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let kind = if entry.file_type()?.is_dir() {
                EntryKind::Directory
            } else if is_audio_file(&path) {
                EntryKind::Track
            } else {
                continue;
            };
            entries.push(BrowserEntry { name, path, kind });
        }
        entries.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        self.entries = entries;
        self.selected = None;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    /// Activate an entry: directories are entered, tracks become selected.
    pub fn activate(&mut self, index: usize) -> io::Result<()> {
        let Some(entry) = self.entries.get(index) else {
            return Ok(());
        };
        match entry.kind {
            EntryKind::Directory => {
                let target = entry.path.clone();
                self.change_dir(target)
            }
            EntryKind::Track => {
                self.selected = Some(index);
                Ok(())
            }
        }
    }

    /// Go to the parent directory. At the filesystem root this is a no-op.
    pub fn up(&mut self) -> io::Result<()> {
        let parent = std::fs::canonicalize(&self.dir)?
            .parent()
            .map(Path::to_path_buf);
        match parent {
            Some(parent) => self.change_dir(parent),
            None => Ok(()),
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Path of the selected track, if any.
    pub fn selected_track(&self) -> Option<&Path> {
        self.selected
            .and_then(|i| self.entries.get(i))
            .map(|e| e.path.as_path())
    }

    fn change_dir(&mut self, dir: PathBuf) -> io::Result<()> {
        let previous = std::mem::replace(&mut self.dir, dir);
        if let Err(e) = self.refresh() {
            tracing::warn!("cannot list {}: {e}", self.dir.display());
            self.dir = previous;
            return Err(e);
        }
        Ok(())
    }
}

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
