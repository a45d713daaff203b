//! Service-specific tests
//!
//! Each file-backed service has its own test file; documents are written
//! into a fresh temp directory per test.


// Common test utilities for services
pub mod common {
    use chrono::{DateTime, TimeZone, Utc};
    use shared::{MemberId, PendingApplication, Person};

    /// Invitation cutoff used by the registry fixtures
    pub fn cutoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
    }

    pub fn member_id(id: &str) -> MemberId {
        MemberId::new(id).expect("Valid test member ID")
    }

    pub fn person(first: &str, last: &str) -> Person {
        Person::new(first, last, format!("{}.{}@example.org", first.to_lowercase(), last.to_lowercase()))
    }

    pub fn application(name: &str, date: DateTime<Utc>) -> PendingApplication {
        let email = format!("{}@example.org", name.split_whitespace().next().unwrap_or(name).to_lowercase());
        PendingApplication::new(name, email, date)
    }
}
