//! Turning command line arguments into the list of `.clog` files to decompress.
//!
//! Arguments are classified one by one: `.clog` files are taken as is,
//! directories are searched for `.clog` files [`MAX_SCAN_DEPTH`] levels deep,
//! anything else is skipped without complaint. Without any argument the
//! `.clog` entries directly inside the current directory are used as the
//! arguments.

use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;
use tracing::debug;

/// Extension of the compressed input files.
pub const SOURCE_EXTENSION: &str = "clog";
/// Extension the decompressed output is written with.
pub const TARGET_EXTENSION: &str = "log";
/// How many directory levels a directory argument is searched, counting the directory itself.
///
/// This is also the only protection against symlink cycles.
pub const MAX_SCAN_DEPTH: u32 = 5;

/// Does this name end in `.clog`?
///
/// Matching is done on the raw name, case sensitive.
pub fn is_clog_name(name: &OsStr) -> bool {
    match name
        .as_encoded_bytes()
        .strip_suffix(SOURCE_EXTENSION.as_bytes())
    {
        Some(stem) => stem.ends_with(b"."),
        None => false,
    }
}

/// Where the decompressed content of `input` goes: same directory, `.log` extension.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension(TARGET_EXTENSION)
}

/// Iterator over the `.clog` files named by a set of arguments.
///
/// Paths are produced lazily in filesystem enumeration order. For every
/// directory its own files come first, then each subdirectory is searched
/// depth first. Entries whose name starts with `.` are not considered while
/// searching directories, and symbolic links are followed.
pub struct InputCollector {
    /// Arguments that have not been looked at yet
    pending: VecDeque<PathBuf>,
    /// Directories currently being searched, innermost last
    scans: Vec<DirScan>,
}

struct DirScan {
    files: vec::IntoIter<PathBuf>,
    subdirs: vec::IntoIter<PathBuf>,
    remaining_depth: u32,
}

impl InputCollector {
    /// Collect from command line arguments, falling back to the current
    /// directory if there are none.
    pub fn from_args<I, S>(args: I) -> InputCollector
    where
        I: IntoIterator<Item = S>,
        S: Into<PathBuf>,
    {
        let pending: VecDeque<PathBuf> = args.into_iter().map(Into::into).collect();
        if pending.is_empty() {
            return InputCollector::top_level("");
        }
        InputCollector {
            pending,
            scans: Vec::new(),
        }
    }

    /// The entries directly inside `dir` whose name ends in `.clog`, each then
    /// handled like a command line argument: files are taken, directories are
    /// searched [`MAX_SCAN_DEPTH`] levels deep.
    ///
    /// An empty path stands for the current directory, the entries are then
    /// named relative to it (`report.clog` rather than `./report.clog`).
    pub fn top_level(dir: impl AsRef<Path>) -> InputCollector {
        let pending = list_visible(dir.as_ref())
            .unwrap_or_default()
            .into_iter()
            .filter(|(name, _)| is_clog_name(name))
            .map(|(_, path)| path)
            .collect();
        InputCollector {
            pending,
            scans: Vec::new(),
        }
    }

    /// The `.clog` files in `dir` and its subdirectories, `depth` levels deep
    /// counting `dir` itself. A depth of zero finds nothing.
    pub fn scan_dir(dir: impl AsRef<Path>, depth: u32) -> InputCollector {
        InputCollector {
            pending: VecDeque::new(),
            scans: DirScan::read(dir.as_ref(), depth).into_iter().collect(),
        }
    }

    fn classify(&mut self, arg: PathBuf) -> Option<PathBuf> {
        if is_clog_name(arg.as_os_str()) && arg.is_file() {
            return Some(arg);
        }
        if arg.is_dir() {
            self.scans.extend(DirScan::read(&arg, MAX_SCAN_DEPTH));
        } else {
            debug!(path = %arg.display(), "skipping argument, neither a .clog file nor a directory");
        }
        None
    }
}

impl Iterator for InputCollector {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(scan) = self.scans.last_mut() {
                if let Some(file) = scan.files.next() {
                    return Some(file);
                }
                if let Some(subdir) = scan.subdirs.next() {
                    let depth = scan.remaining_depth - 1;
                    self.scans.extend(DirScan::read(&subdir, depth));
                } else {
                    self.scans.pop();
                }
                continue;
            }

            let arg = self.pending.pop_front()?;
            if let Some(file) = self.classify(arg) {
                return Some(file);
            }
        }
    }
}

impl DirScan {
    /// List `dir` once, splitting its entries into `.clog` files and subdirectories.
    ///
    /// Returns None when there is no depth left. Directories that can not be
    /// listed are treated as empty.
    fn read(dir: &Path, remaining_depth: u32) -> Option<DirScan> {
        if remaining_depth == 0 {
            return None;
        }

        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        for (name, path) in list_visible(dir)? {
            // fs::metadata follows symlinks, DirEntry::file_type would not
            let Ok(meta) = fs::metadata(&path) else {
                continue;
            };
            if meta.is_file() && is_clog_name(&name) {
                files.push(path);
            } else if meta.is_dir() && remaining_depth > 1 {
                subdirs.push(path);
            }
        }

        Some(DirScan {
            files: files.into_iter(),
            subdirs: subdirs.into_iter(),
            remaining_depth,
        })
    }
}

/// Names and paths of the entries of `dir`, leaving out those starting with `.`.
///
/// Returns None if `dir` can not be listed.
fn list_visible(dir: &Path) -> Option<Vec<(OsString, PathBuf)>> {
    let listing = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    let entries = match fs::read_dir(listing) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %listing.display(), %err, "skipping directory that can not be listed");
            return None;
        }
    };

    let mut visible = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(dir = %listing.display(), %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let name = entry.file_name();
        if name.as_encoded_bytes().starts_with(b".") {
            continue;
        }
        let path = dir.join(&name);
        visible.push((name, path));
    }
    Some(visible)
}
