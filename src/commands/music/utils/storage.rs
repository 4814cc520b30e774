//! Disk hygiene for the shared song-storage directory. Every advance step
//! deletes audio files that no live queue references, which bounds local
//! storage to roughly the look-ahead window.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

/// Delete every `.mp3` in `data_dir` whose file name is not in `keep`.
/// Returns how many files were removed. Non-audio files are left alone.
pub fn prune_stale_files(data_dir: &Path, keep: &HashSet<String>) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("mp3") {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if keep.contains(file_name) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Pruned stale audio file {}", path.display());
                removed += 1;
            }
            Err(e) => warn!("Failed to prune {}: {}", path.display(), e),
        }
    }
    Ok(removed)
}

/// Best-effort removal of a (possibly partial) download.
pub fn remove_song_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed audio file {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    #[test]
    fn prunes_everything_outside_the_keep_set() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "keep-me.mp3");
        touch(dir.path(), "stale-one.mp3");
        touch(dir.path(), "stale-two.mp3");
        touch(dir.path(), "not-audio.txt");

        let keep: HashSet<String> = ["keep-me.mp3".to_string()].into();
        let removed = prune_stale_files(dir.path(), &keep).unwrap();

        assert_eq!(removed, 2);
        assert!(dir.path().join("keep-me.mp3").exists());
        assert!(dir.path().join("not-audio.txt").exists());
        assert!(!dir.path().join("stale-one.mp3").exists());
    }

    #[test]
    fn remove_song_file_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        // Should not panic or log an error for a file that never existed
        remove_song_file(&dir.path().join("ghost.mp3"));
    }
}
