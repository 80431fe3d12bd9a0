//! Bounded log of past calculations, persisted as a JSON file.

use crate::config::MAX_HISTORY_ITEMS;
use crate::error::VlsmError;
use crate::models::CalculationRecord;
use std::io;
use std::path::{Path, PathBuf};

/// Most recent calculations, newest first, never more than [`MAX_HISTORY_ITEMS`].
#[derive(Debug, Default)]
pub struct HistoryLog {
    path: Option<PathBuf>,
    records: Vec<CalculationRecord>,
}

impl HistoryLog {
    /// A log that is never written to disk.
    pub fn in_memory() -> Self {
        HistoryLog::default()
    }

    /// Load the log stored at `path`.
    ///
    /// A missing file gives an empty log. A file that cannot be parsed is
    /// logged and replaced by an empty log on the next save. A file that
    /// exists but cannot be read is never overwritten by this log.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let records = match std::fs::read_to_string(&path) {
            Ok(json) => match parse_records(&json) {
                Ok(records) => {
                    log::info!("Read {} history records from {}", records.len(), path.display());
                    records
                }
                Err(e) => {
                    log::error!("Failed to parse history file {}: {e}", path.display());
                    Vec::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("History file not found: {}", path.display());
                Vec::new()
            }
            Err(e) => {
                log::error!("Failed to read history file {}: {e}", path.display());
                return HistoryLog {
                    path: None,
                    records: Vec::new(),
                };
            }
        };
        HistoryLog {
            path: Some(path),
            records,
        }
    }

    pub fn records(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CalculationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Add `record` as the newest entry, evicting the oldest beyond the limit.
    pub fn append(&mut self, record: CalculationRecord) {
        log::debug!("history append {}", record.id);
        self.records.insert(0, record);
        if self.records.len() > MAX_HISTORY_ITEMS {
            for old in self.records.drain(MAX_HISTORY_ITEMS..) {
                log::debug!("history evict {}", old.id);
            }
        }
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before != self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Write the log back to its file. In-memory logs are left alone.
    pub fn save(&self) -> Result<(), VlsmError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| VlsmError::History(format!("Error serializing history: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            VlsmError::History(format!("Error writing history file {}: {e}", path.display()))
        })?;
        log::info!("Wrote {} history records to {}", self.records.len(), path.display());
        Ok(())
    }
}

fn parse_records(json: &str) -> Result<Vec<CalculationRecord>, VlsmError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| VlsmError::History(format!("path={} error={}", e.path(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate;
    use crate::models::{CalculationInput, SubnetRequirement};
    use std::net::Ipv4Addr;

    fn record(n: u8) -> CalculationRecord {
        let input = CalculationInput::subnetting(Ipv4Addr::new(10, n, 0, 0), 24, 2);
        let calc = calculate(&input).expect("valid input");
        CalculationRecord::new(input, calc)
    }

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("vlsm_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_append_evicts_oldest() {
        let mut history = HistoryLog::in_memory();
        for n in 0..12 {
            history.append(record(n));
        }
        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        assert_eq!(history.records()[0].input.address, Ipv4Addr::new(10, 11, 0, 0));
        assert_eq!(
            history.records().last().unwrap().input.address,
            Ipv4Addr::new(10, 2, 0, 0)
        );
    }

    #[test]
    fn test_delete_and_clear() {
        let mut history = HistoryLog::in_memory();
        history.append(record(1));
        history.append(record(2));
        let id = history.records()[1].id.clone();
        assert!(history.get(&id).is_some());
        assert!(history.delete(&id));
        assert!(!history.delete(&id));
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
        assert!(history.save().is_ok());
    }

    #[test]
    fn test_save_and_reload_verbatim() {
        let path = temp_file("reload");
        let mut history = HistoryLog::load(&path);
        assert!(history.is_empty());

        let input = CalculationInput::vlsm(
            Ipv4Addr::new(192, 168, 1, 0),
            24,
            vec![
                SubnetRequirement::new("a", "office", 100),
                SubnetRequirement::new("b", "lab", 20),
            ],
        );
        let calc = calculate(&input).unwrap();
        history.append(CalculationRecord::new(input, calc));
        history.append(record(3));
        history.save().unwrap();

        let reloaded = HistoryLog::load(&path);
        assert_eq!(reloaded.records(), history.records());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_fixture() {
        let history = HistoryLog::load("src/tests/test_data/history_test_01.json");
        assert_eq!(history.len(), 2);
        let first = &history.records()[0];
        assert_eq!(first.id, "0b7c6f64-5d1e-4a52-9a4c-3f1d2e8b9a01");
        assert_eq!(first.subnets.len(), 3);
        assert_eq!(first.subnets[1].cidr().to_string(), "192.168.1.128/26");
        assert_eq!(history.records()[1].subnets[2].position, Some(3));
    }

    #[test]
    fn test_load_unreadable_file_is_kept() {
        let path = temp_file("not_utf8");
        let bytes = [0xff, 0xfe, 0x5b, 0x5d];
        std::fs::write(&path, bytes).unwrap();

        let mut history = HistoryLog::load(&path);
        assert!(history.is_empty());
        history.append(record(4));
        history.save().unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), bytes);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_broken_file() {
        let path = temp_file("broken");
        std::fs::write(&path, "[{\"id\": 5}]").unwrap();
        let history = HistoryLog::load(&path);
        assert!(history.is_empty());
        std::fs::remove_file(&path).ok();

        let err = parse_records("[{\"id\": 5}]").unwrap_err();
        assert!(err.to_string().contains("path=[0].id"), "{err}");
    }
}
