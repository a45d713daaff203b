//! Test fixtures and data for ams-sync tests
//!
//! This module provides consistent roster data used across all test suites.

use chrono::{DateTime, Duration, TimeZone, Utc};
use shared::{MemberId, PendingApplication, Person};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Standard member identifiers
    pub const ALICE: &'static str = "1001";
    pub const BOB: &'static str = "1002";
    pub const CAROL: &'static str = "1003";
    pub const DAVE: &'static str = "1004";

    /// Login used by the file-backed fixtures
    pub const ACCOUNT: &'static str = "chapter-admin";
    pub const SUPPORT: &'static str = "amshelp@example.org";

    /// Invitation cutoff shared by all scenarios
    pub fn cutoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    pub fn before_cutoff() -> DateTime<Utc> {
        Self::cutoff() - Duration::days(90)
    }

    pub fn after_cutoff() -> DateTime<Utc> {
        Self::cutoff() + Duration::days(3)
    }

    pub fn id(raw: &str) -> MemberId {
        MemberId::new(raw).unwrap()
    }

    fn first_name(raw: &str) -> &'static str {
        match raw {
            Self::ALICE => "Alice",
            Self::BOB => "Bob",
            Self::CAROL => "Carol",
            Self::DAVE => "Dave",
            _ => "Member",
        }
    }

    /// Person record for a standard identifier
    pub fn person(raw: &str) -> Person {
        let first = Self::first_name(raw);
        Person::new(first, "Example", format!("{}@example.org", first.to_lowercase()))
    }

    /// Pending application for a standard identifier submitted at `date`
    pub fn application(raw: &str, date: DateTime<Utc>) -> PendingApplication {
        let first = Self::first_name(raw);
        PendingApplication::new(format!("{first} Example"), format!("{}@example.org", first.to_lowercase()), date)
    }

    /// A roster of `size` generated pending applications
    pub fn many_applications(size: usize, date: DateTime<Utc>) -> Vec<(MemberId, PendingApplication)> {
        (0..size)
            .map(|n| {
                let id = MemberId::new(format!("9{n:04}")).unwrap();
                let application =
                    PendingApplication::new(format!("Generated {n}"), format!("gen{n}@example.org"), date);
                (id, application)
            })
            .collect()
    }
}
