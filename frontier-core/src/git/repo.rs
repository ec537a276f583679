use crate::{constants::SHORT_ID_LEN, sink::Tone};

/// HEAD of a work tree as reported by `git log -1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: String,
    /// Already formatted as `MM-DD-YYYY HH:MM`.
    pub date: String,
}

impl CommitInfo {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Modified,
    Added,
    Deleted,
    /// Renames, copies, type changes and anything else git reports.
    Other(char),
}

impl ChangeKind {
    pub fn from_status(status: &str) -> Self {
        match status.chars().next() {
            Some('M') => Self::Modified,
            Some('A') => Self::Added,
            Some('D') => Self::Deleted,
            Some(other) => Self::Other(other),
            None => Self::Other('?'),
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Modified => 'M',
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Other(c) => c,
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Modified => Tone::Progress,
            Self::Added => Tone::Success,
            Self::Deleted => Tone::Error,
            Self::Other(_) => Tone::Caution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub kind: ChangeKind,
    pub path: String,
}

/// Parse `git diff --name-status` output. For renames the new path is kept.
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let status = fields.next()?.trim();
            let path = fields.last()?;
            if status.is_empty() || path.is_empty() {
                return None;
            }
            Some(FileChange {
                kind: ChangeKind::from_status(status),
                path: path.to_string(),
            })
        })
        .collect()
}

/// Parse `git for-each-ref --format=%(refname) refs/remotes/<remote>/` into
/// bare branch names, skipping the symbolic `HEAD`.
pub fn parse_remote_refs(output: &str, remote: &str) -> Vec<String> {
    let prefix = format!("refs/remotes/{remote}/");
    output
        .lines()
        .filter_map(|line| line.trim().strip_prefix(&prefix))
        .filter(|name| !name.is_empty() && *name != "HEAD")
        .map(String::from)
        .collect()
}
