//! This file serves as the root for all entity modules.
//! We define the data model of the contribution tracker here: a roster of
//! persons, each holding an append-only map of daily payments keyed by day.

pub mod date_key;
pub mod payment;
pub mod person;
pub mod roster;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::date_key::{DateKey, DateKeyError};
    pub use super::payment::Payment;
    pub use super::person::{Person, PersonId};
    pub use super::roster::Roster;
}

#[cfg(test)]
mod test {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::prelude::*;

    #[test]
    fn test_roster_blob_roundtrip() {
        let mut roster = Roster::from_names(["Alice", "Bob"]);
        let key = DateKey::from_ymd(2024, 3, 1).unwrap();
        let recorded_at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();

        let alice = roster.person_mut(PersonId(1)).unwrap();
        assert!(alice.record_payment(Payment::new(key, Decimal::from(1000), recorded_at)));

        let blob = serde_json::to_string(&roster).unwrap();
        let restored: Roster = serde_json::from_str(&blob).unwrap();

        assert_eq!(restored, roster);
        assert_eq!(restored.len(), 2);
        assert!(restored.person(PersonId(1)).unwrap().has_paid(&key));
        assert!(!restored.person(PersonId(2)).unwrap().has_paid(&key));
    }

    #[test]
    fn test_blob_shape() {
        let mut roster = Roster::from_names(["Alice"]);
        let key = DateKey::from_ymd(2024, 3, 1).unwrap();
        let recorded_at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        roster
            .person_mut(PersonId(1))
            .unwrap()
            .record_payment(Payment::new(key, Decimal::from(1000), recorded_at));

        let value = serde_json::to_value(&roster).unwrap();

        // The roster is persisted as a bare list of persons
        let persons = value.as_array().unwrap();
        assert_eq!(persons.len(), 1);
        assert_eq!(persons[0]["id"], 1);
        assert_eq!(persons[0]["name"], "Alice");

        let payment = &persons[0]["payments"]["2024-03-01"];
        assert_eq!(payment["date"], "2024-03-01");
        assert_eq!(payment["amount"], "1000");
        assert!(payment["recorded_at"].as_str().unwrap().starts_with("2024-03-01T08:30:00"));
    }
}
