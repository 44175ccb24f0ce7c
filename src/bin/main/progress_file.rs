//! File-backed progress store with a bounded retention horizon.
//!
//! One small state file holds every route's record. Records carry their save
//! time and expire on read, so the file self-prunes on the next write. A
//! missing, truncated, or corrupt file reads as empty: progress is advisory
//! and must never fail a page load.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use unfold_core::progress::{PROGRESS_RETENTION_DAYS, ProgressStore};

const STATE_MAGIC: u32 = 0x3150_4655; // "UFP1"
const STATE_VERSION: u8 = 1;
const HEADER_LEN: usize = 5;
const MS_PER_DAY: u64 = 86_400_000;

#[derive(Clone, Debug, Eq, PartialEq)]
struct Record {
    key: String,
    index: u16,
    saved_at_ms: u64,
}

pub struct FileProgressStore {
    path: PathBuf,
    retention_ms: u64,
}

impl FileProgressStore {
    pub fn new(path: PathBuf) -> Self {
        Self::with_retention_days(path, PROGRESS_RETENTION_DAYS)
    }

    pub fn with_retention_days(path: PathBuf, days: u32) -> Self {
        Self {
            path,
            retention_ms: u64::from(days) * MS_PER_DAY,
        }
    }

    fn read_records(&self, now_ms: u64) -> Vec<Record> {
        let Ok(bytes) = fs::read(&self.path) else {
            return Vec::new();
        };
        parse_records(&bytes, now_ms, self.retention_ms)
    }

    fn write_records(&self, records: &[Record]) -> io::Result<()> {
        let mut out = Vec::with_capacity(HEADER_LEN + records.len() * 16);
        out.extend_from_slice(&STATE_MAGIC.to_le_bytes());
        out.push(STATE_VERSION);
        for record in records {
            let key = record.key.as_bytes();
            if key.len() > u16::MAX as usize {
                continue;
            }
            out.extend_from_slice(&(key.len() as u16).to_le_bytes());
            out.extend_from_slice(key);
            out.extend_from_slice(&record.index.to_le_bytes());
            out.extend_from_slice(&record.saved_at_ms.to_le_bytes());
        }
        fs::write(&self.path, out)
    }

    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl ProgressStore for FileProgressStore {
    type Error = io::Error;

    fn load(&mut self, route_key: &str) -> Result<Option<u16>, Self::Error> {
        let now_ms = Self::now_ms();
        Ok(self
            .read_records(now_ms)
            .into_iter()
            .find(|record| record.key == route_key)
            .map(|record| record.index))
    }

    fn save(&mut self, route_key: &str, section_index: u16) -> Result<(), Self::Error> {
        let now_ms = Self::now_ms();
        let mut records = self.read_records(now_ms);
        if let Some(record) = records.iter_mut().find(|record| record.key == route_key) {
            record.index = section_index;
            record.saved_at_ms = now_ms;
        } else {
            records.push(Record {
                key: route_key.to_string(),
                index: section_index,
                saved_at_ms: now_ms,
            });
        }
        self.write_records(&records)
    }
}

fn parse_records(bytes: &[u8], now_ms: u64, retention_ms: u64) -> Vec<Record> {
    let mut records = Vec::new();
    if bytes.len() < HEADER_LEN
        || bytes[..4] != STATE_MAGIC.to_le_bytes()
        || bytes[4] != STATE_VERSION
    {
        if !bytes.is_empty() {
            debug!("progress-file: unrecognized state header, starting empty");
        }
        return records;
    }

    let mut cursor = HEADER_LEN;
    while cursor < bytes.len() {
        let Some(key_len) = read_u16(bytes, cursor) else {
            break;
        };
        cursor += 2;
        let key_len = key_len as usize;
        if cursor + key_len + 10 > bytes.len() {
            debug!("progress-file: truncated record, dropping tail");
            break;
        }
        let Ok(key) = core::str::from_utf8(&bytes[cursor..cursor + key_len]) else {
            debug!("progress-file: non-utf8 key, dropping tail");
            break;
        };
        cursor += key_len;
        let index = read_u16(bytes, cursor).unwrap_or(0);
        cursor += 2;
        let saved_at_ms = read_u64(bytes, cursor).unwrap_or(0);
        cursor += 8;

        if now_ms.saturating_sub(saved_at_ms) <= retention_ms {
            records.push(Record {
                key: key.to_string(),
                index,
                saved_at_ms,
            });
        }
    }
    records
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    bytes
        .get(at..at + 2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
}

fn read_u64(bytes: &[u8], at: usize) -> Option<u64> {
    bytes.get(at..at + 8).map(|chunk| {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        u64::from_le_bytes(raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileProgressStore {
        FileProgressStore::new(dir.path().join("progress.bin"))
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.save("/guide/intro", 3).unwrap();
        store.save("/guide/setup", 1).unwrap();
        assert_eq!(store.load("/guide/intro").unwrap(), Some(3));
        assert_eq!(store.load("/guide/setup").unwrap(), Some(1));
        assert_eq!(store.load("/elsewhere").unwrap(), None);
    }

    #[test]
    fn resaving_updates_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.save("/guide", 1).unwrap();
        store.save("/guide", 2).unwrap();
        assert_eq!(store.load("/guide").unwrap(), Some(2));

        let now_ms = FileProgressStore::now_ms();
        assert_eq!(store.read_records(now_ms).len(), 1);
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        assert_eq!(store.load("/guide").unwrap(), None);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.bin");
        fs::write(&path, b"not a state file").unwrap();

        let mut store = FileProgressStore::new(path);
        assert_eq!(store.load("/guide").unwrap(), None);
    }

    #[test]
    fn expired_records_are_dropped_on_read() {
        let retention_ms = u64::from(PROGRESS_RETENTION_DAYS) * MS_PER_DAY;
        let now_ms = retention_ms * 3;
        let records = [
            Record {
                key: "/stale".to_string(),
                index: 4,
                saved_at_ms: now_ms - retention_ms - 1,
            },
            Record {
                key: "/fresh".to_string(),
                index: 2,
                saved_at_ms: now_ms - retention_ms / 2,
            },
        ];

        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.write_records(&records).unwrap();

        let kept = parse_records(
            &fs::read(dir.path().join("progress.bin")).unwrap(),
            now_ms,
            retention_ms,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key, "/fresh");
    }

    #[test]
    fn truncated_tail_drops_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save("/guide", 1).unwrap();

        let path = dir.path().join("progress.bin");
        let mut bytes = fs::read(&path).unwrap();
        bytes.truncate(bytes.len() - 3);
        fs::write(&path, bytes).unwrap();

        assert_eq!(store.load("/guide").unwrap(), None);
    }
}
