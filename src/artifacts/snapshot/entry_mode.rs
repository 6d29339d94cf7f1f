/// Kind and permission class of a tracked path.
///
/// A mode change alone (regular file made executable) counts as a
/// modification, the same as a content change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryMode {
    #[default]
    Regular,
    Executable,
    Symlink,
}

impl EntryMode {
    pub fn is_symlink(&self) -> bool {
        matches!(self, EntryMode::Symlink)
    }
}
