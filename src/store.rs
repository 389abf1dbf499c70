//! Persistence of the roster as a single JSON blob.
//!
//! The roster is read once when the store is opened and written back in full
//! for every mutation, before the mutation becomes visible in memory. There is
//! no schema versioning: the blob is the serde representation of [`Roster`].

pub mod file;
pub mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use std::collections::HashSet;

use model::entities::prelude::Roster;
use tracing::{debug, info, instrument};

use crate::error::StoreError;

/// Key-value backend holding serialized blobs.
pub trait RosterStorage: std::fmt::Debug {
    /// Returns the blob stored under `key`, or `None` when nothing was stored yet.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the blob stored under `key`.
    fn write(&self, key: &str, blob: &str) -> Result<(), StoreError>;
}

/// Owns the in-memory roster and keeps it in sync with a [`RosterStorage`].
#[derive(Debug)]
pub struct LedgerStore {
    storage: Box<dyn RosterStorage>,
    key: String,
    roster: Roster,
}

impl LedgerStore {
    /// Loads the roster stored under `key`, falling back to `default_roster`
    /// when the storage holds nothing for it.
    #[instrument(skip(storage, default_roster))]
    pub fn load(
        storage: Box<dyn RosterStorage>,
        key: &str,
        default_roster: Roster,
    ) -> Result<Self, StoreError> {
        let roster = match storage.read(key)? {
            Some(blob) => {
                let roster: Roster = serde_json::from_str(&blob)?;
                validate(&roster)?;
                info!(persons = roster.len(), "Roster loaded");
                roster
            }
            None => {
                info!(persons = default_roster.len(), "No stored roster, using the default one");
                default_roster
            }
        };

        Ok(Self {
            storage,
            key: key.to_string(),
            roster,
        })
    }

    /// Writes the current roster back to the storage.
    pub fn save(&self) -> Result<(), StoreError> {
        self.write(&self.roster)
    }

    /// Persists `roster` and, once the write succeeded, makes it the current
    /// roster. On error the current roster is left untouched.
    pub fn commit(&mut self, roster: Roster) -> Result<(), StoreError> {
        self.write(&roster)?;
        self.roster = roster;
        Ok(())
    }

    fn write(&self, roster: &Roster) -> Result<(), StoreError> {
        let blob = serde_json::to_string(roster)?;
        self.storage.write(&self.key, &blob)?;
        debug!(key = %self.key, bytes = blob.len(), "Roster saved");
        Ok(())
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &dyn RosterStorage {
        self.storage.as_ref()
    }
}

/// Rejects stored rosters the ledger could not work with.
fn validate(roster: &Roster) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for person in roster.iter() {
        if !seen.insert(person.id()) {
            return Err(StoreError::DuplicatePerson(person.id()));
        }
        if let Some((date_key, payment)) = person
            .payments()
            .iter()
            .find(|(date_key, payment)| **date_key != payment.date())
        {
            return Err(StoreError::MisfiledPayment {
                person_id: person.id(),
                date_key: *date_key,
                date: payment.date(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use model::entities::prelude::{DateKey, Payment, PersonId};
    use rust_decimal::Decimal;

    use super::*;

    fn paid_roster() -> Roster {
        let mut roster = Roster::from_names(["Alice", "Bob"]);
        let key = DateKey::from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let recorded_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        roster
            .person_mut(PersonId(1))
            .unwrap()
            .record_payment(Payment::new(key, Decimal::from(1000), recorded_at));
        roster
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let store = LedgerStore::load(
            Box::new(MemoryStorage::new()),
            "roster",
            Roster::from_names(["Alice", "Bob", "Charlie"]),
        )
        .unwrap();

        assert_eq!(store.roster().len(), 3);
        assert_eq!(store.storage().read("roster").unwrap(), None);
    }

    #[test]
    fn test_commit_then_load() {
        let storage = MemoryStorage::new();
        let mut store = LedgerStore::load(Box::new(storage.clone()), "roster", Roster::default()).unwrap();
        store.commit(paid_roster()).unwrap();

        let reloaded = LedgerStore::load(Box::new(storage), "roster", Roster::default()).unwrap();
        assert_eq!(reloaded.roster(), &paid_roster());
    }

    #[test]
    fn test_stored_blob_wins_over_default() {
        let storage = MemoryStorage::new();
        storage
            .write("roster", &serde_json::to_string(&paid_roster()).unwrap())
            .unwrap();

        let store = LedgerStore::load(
            Box::new(storage),
            "roster",
            Roster::from_names(["Someone", "Else", "Entirely"]),
        )
        .unwrap();

        assert_eq!(store.roster().len(), 2);
        assert_eq!(store.roster().persons()[0].name(), "Alice");
    }

    #[test]
    fn test_corrupted_blob() {
        let storage = MemoryStorage::new();
        storage.write("roster", "{not json").unwrap();

        let err = LedgerStore::load(Box::new(storage), "roster", Roster::default()).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_keys_are_independent() {
        let storage = MemoryStorage::new();
        let mut store = LedgerStore::load(Box::new(storage.clone()), "group-a", Roster::default()).unwrap();
        store.commit(paid_roster()).unwrap();

        assert!(storage.read("group-a").unwrap().is_some());
        assert!(storage.read("group-b").unwrap().is_none());
    }

    #[test]
    fn test_save_persists_the_default_roster() {
        let storage = MemoryStorage::new();
        let store = LedgerStore::load(Box::new(storage.clone()), "roster", Roster::from_names(["Alice"])).unwrap();
        store.save().unwrap();

        let blob = storage.read("roster").unwrap().unwrap();
        assert_eq!(blob, r#"[{"id":1,"name":"Alice","payments":{}}]"#);
    }

    #[derive(Debug)]
    struct FailingStorage;

    impl RosterStorage for FailingStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn write(&self, key: &str, _blob: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: format!("{key}.json").into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    #[test]
    fn test_failed_commit_keeps_current_roster() {
        let mut store = LedgerStore::load(Box::new(FailingStorage), "roster", Roster::from_names(["Alice", "Bob"])).unwrap();

        let err = store.commit(paid_roster()).unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.roster(), &Roster::from_names(["Alice", "Bob"]));
    }

    #[test]
    fn test_duplicate_person_ids_rejected() {
        let storage = MemoryStorage::new();
        storage
            .write("roster", r#"[{"id":1,"name":"Alice"},{"id":1,"name":"Bob"}]"#)
            .unwrap();

        let err = LedgerStore::load(Box::new(storage), "roster", Roster::default()).unwrap_err();
        assert!(matches!(err, StoreError::DuplicatePerson(PersonId(1))));
    }

    #[test]
    fn test_misfiled_payment_rejected() {
        let storage = MemoryStorage::new();
        storage
            .write(
                "roster",
                r#"[{"id":1,"name":"Alice","payments":{"2024-03-01":{"date":"2024-03-02","amount":"1000","recorded_at":"2024-03-01T09:00:00Z"}}}]"#,
            )
            .unwrap();

        let err = LedgerStore::load(Box::new(storage), "roster", Roster::default()).unwrap_err();
        match err {
            StoreError::MisfiledPayment {
                person_id,
                date_key,
                date,
            } => {
                assert_eq!(person_id, PersonId(1));
                assert_eq!(date_key.to_string(), "2024-03-01");
                assert_eq!(date.to_string(), "2024-03-02");
            }
            other => panic!("Unexpected error: {other}"),
        }
    }
}
