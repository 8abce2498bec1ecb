//! Flat-file persistence of the roster.
//!
//! The whole roster is read once when the store is opened and rewritten in
//! full by every [`RecordStore::save`]. There is no locking: two processes
//! sharing a file will overwrite each other.

use std::{
    borrow::Cow,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{FIELD_COUNT, FIELD_DELIMITER, ResultEngine, Taxpayer};

/// Owner of the authoritative, ordered roster.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    taxpayers: Vec<Taxpayer>,
}

impl RecordStore {
    /// Opens the roster stored at `path`. A missing file is an empty roster.
    pub fn open(path: impl Into<PathBuf>) -> ResultEngine<Self> {
        let path = path.into();
        let taxpayers = Self::load(&path)?;
        tracing::info!(
            "loaded {} taxpayer(s) from {}",
            taxpayers.len(),
            path.display()
        );
        Ok(Self { path, taxpayers })
    }

    /// Reads every non-empty line of `path` as a [`Taxpayer`].
    ///
    /// Bytes that are not valid UTF-8 are replaced with `U+FFFD`, so one
    /// badly encoded line never rejects the file.
    pub fn load(path: &Path) -> ResultEngine<Vec<Taxpayer>> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found, starting with an empty roster", path.display());
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(content
            .split(|byte| *byte == b'\n')
            .enumerate()
            .filter_map(|(index, raw)| {
                let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
                if raw.is_empty() {
                    return None;
                }
                let line = String::from_utf8_lossy(raw);
                if matches!(line, Cow::Owned(_)) {
                    tracing::debug!(
                        "line {} of {} is not valid UTF-8, invalid bytes replaced",
                        index + 1,
                        path.display()
                    );
                }
                let fields = line.split(FIELD_DELIMITER).count();
                if fields != FIELD_COUNT {
                    tracing::debug!(
                        "line {} of {} has {fields} field(s), expected {FIELD_COUNT}",
                        index + 1,
                        path.display()
                    );
                }
                Some(Taxpayer::from_line(&line))
            })
            .collect())
    }

    /// Overwrites `path` with one line per taxpayer, in order.
    pub fn write_roster(path: &Path, taxpayers: &[Taxpayer]) -> ResultEngine<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut payload = String::new();
        for taxpayer in taxpayers {
            payload.push_str(&taxpayer.to_line());
            payload.push('\n');
        }
        fs::write(path, payload)?;
        Ok(())
    }

    /// Persists the current roster, replacing the file content.
    ///
    /// On failure the in-memory roster is untouched and stays authoritative.
    pub fn save(&self) -> ResultEngine<()> {
        match Self::write_roster(&self.path, &self.taxpayers) {
            Ok(()) => {
                tracing::debug!(
                    "saved {} taxpayer(s) to {}",
                    self.taxpayers.len(),
                    self.path.display()
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!("failed to save roster to {}: {err}", self.path.display());
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn taxpayers(&self) -> &[Taxpayer] {
        &self.taxpayers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.taxpayers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.taxpayers.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Taxpayer> {
        self.taxpayers.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Taxpayer> {
        self.taxpayers.get_mut(index)
    }

    pub(crate) fn push(&mut self, taxpayer: Taxpayer) {
        self.taxpayers.push(taxpayer);
    }

    pub(crate) fn taxpayers_mut(&mut self) -> &mut Vec<Taxpayer> {
        &mut self.taxpayers
    }

    #[must_use]
    pub fn username_available(&self, username: &str) -> bool {
        !self.taxpayers.iter().any(|t| t.username == username)
    }

    #[must_use]
    pub fn national_id_available(&self, national_id: &str) -> bool {
        !self.taxpayers.iter().any(|t| t.national_id == national_id)
    }

    /// Index of the first taxpayer with `national_id`.
    #[must_use]
    pub fn position_by_national_id(&self, national_id: &str) -> Option<usize> {
        self.taxpayers
            .iter()
            .position(|t| t.national_id == national_id)
    }

    /// Index of the first taxpayer with `username`.
    #[must_use]
    pub fn position_by_username(&self, username: &str) -> Option<usize> {
        self.taxpayers.iter().position(|t| t.username == username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Money;

    fn taxpayer(username: &str, national_id: &str) -> Taxpayer {
        Taxpayer {
            username: username.to_string(),
            password: "pw".to_string(),
            national_id: national_id.to_string(),
            full_name: format!("{username} full"),
            monthly_income: Money::from_major(7_000_000),
            ..Taxpayer::default()
        }
    }

    #[test]
    fn missing_file_is_an_empty_roster() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("absent.txt")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.txt");
        fs::write(&path, "a|p|1|A|0|0|0|0|0|0\n\nb|p|2|B|0|0|0|0|0|1\n").unwrap();

        let taxpayers = RecordStore::load(&path).unwrap();
        assert_eq!(taxpayers.len(), 2);
        assert_eq!(taxpayers[1].username, "b");
        assert!(taxpayers[1].paid);
    }

    #[test]
    fn save_rewrites_the_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/user.txt");
        let mut store = RecordStore::open(&path).unwrap();
        store.push(taxpayer("a", "1"));
        store.push(taxpayer("b", "2"));
        store.save().unwrap();

        store.taxpayers_mut().truncate(1);
        store.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "a|pw|1|a full|7000000|0|0|0|0|0\n");
    }

    #[test]
    fn availability_and_lookup_scan_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RecordStore::open(dir.path().join("user.txt")).unwrap();
        store.push(taxpayer("a", "1"));
        store.push(taxpayer("b", "2"));
        store.push(taxpayer("c", "2"));

        assert!(!store.username_available("b"));
        assert!(store.username_available("z"));
        assert!(!store.national_id_available("1"));
        assert!(store.national_id_available("9"));
        assert_eq!(store.position_by_national_id("2"), Some(1));
        assert_eq!(store.position_by_national_id("9"), None);
        assert_eq!(store.position_by_username("c"), Some(2));
    }

    #[test]
    fn invalid_utf8_is_replaced_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.txt");
        let mut content = b"ok|pw|1|Ok|10000000|0|0|0|0|0\r\n".to_vec();
        content.extend_from_slice(b"jose|pw|2|Jos\xe9|5000000|0|0|0|0|1\n");
        fs::write(&path, content).unwrap();

        let taxpayers = RecordStore::load(&path).unwrap();
        assert_eq!(taxpayers.len(), 2);
        assert_eq!(taxpayers[0].full_name, "Ok");
        assert_eq!(taxpayers[0].monthly_income, Money::from_major(10_000_000));
        assert_eq!(taxpayers[1].full_name, "Jos\u{fffd}");
        assert_eq!(taxpayers[1].monthly_income, Money::from_major(5_000_000));
        assert!(taxpayers[1].paid);
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a roster file.
        assert!(RecordStore::open(dir.path()).is_err());
    }
}
