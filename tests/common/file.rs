use std::path::Path;

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(path, content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", path, e));
}

pub fn remove_file(path: &Path) {
    std::fs::remove_file(path)
        .unwrap_or_else(|e| panic!("Failed to remove file {:?}: {}", path, e));
}

/// Bump the mtime one second into the future, simulating a touch that left
/// the content untouched.
pub fn touch(path: &Path) {
    let now = filetime::FileTime::now();
    let bumped = filetime::FileTime::from_unix_time(now.unix_seconds() + 1, 0);
    filetime::set_file_mtime(path, bumped)
        .unwrap_or_else(|e| panic!("Failed to touch {:?}: {}", path, e));
}
