// Test fixtures - reusable test data
// Provides consistent entities and dates across the integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_planner::models::entity::{Entity, EntityKind, Priority};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Sunday, June 1 2025: the first cell of the June 2025 Sunday-start grid
    pub fn june_1_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    /// Returns a date in June 2025
    pub fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    /// Returns a June 2025 date-time
    pub fn june_at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        june(day).and_hms_opt(hour, minute, 0).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample entities for testing
pub mod entities {
    use super::*;

    pub fn timed(id: &str, start: NaiveDateTime, end: NaiveDateTime, priority: Priority) -> Entity {
        Entity::builder()
            .id(id)
            .title(id)
            .start(start)
            .end(end)
            .priority(priority)
            .build()
            .unwrap()
    }

    pub fn all_day(id: &str, from: NaiveDate, to: NaiveDate) -> Entity {
        Entity::builder()
            .id(id)
            .title(id)
            .start(from.and_hms_opt(0, 0, 0).unwrap())
            .end(to.and_hms_opt(0, 0, 0).unwrap())
            .all_day(true)
            .build()
            .unwrap()
    }

    /// Entity whose end precedes its start, built around the validation.
    pub fn malformed(id: &str) -> Entity {
        let mut entity = timed(
            id,
            dates::june_at(3, 10, 0),
            dates::june_at(3, 11, 0),
            Priority::High,
        );
        entity.end = dates::june_at(2, 9, 0);
        entity
    }

    /// A busy week in June 2025 mixing events, tasks and an all-day trip
    pub fn busy_week() -> Vec<Entity> {
        let mut review = timed(
            "review",
            dates::june_at(3, 9, 0),
            dates::june_at(3, 10, 30),
            Priority::High,
        );
        review.color = Some("#3B82F6".into());

        let mut report = timed(
            "report",
            dates::june_at(3, 9, 0),
            dates::june_at(3, 9, 0),
            Priority::Low,
        );
        report.kind = EntityKind::Task;

        vec![
            review,
            report,
            timed(
                "lunch",
                dates::june_at(3, 12, 0),
                dates::june_at(3, 13, 0),
                Priority::Medium,
            ),
            timed(
                "gym",
                dates::june_at(4, 18, 0),
                dates::june_at(4, 19, 0),
                Priority::Low,
            ),
            all_day("offsite", dates::june(4), dates::june(6)),
            all_day("sprint", dates::june(4), dates::june(13)),
            malformed("broken"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_entities_are_valid() {
        let week = entities::busy_week();
        let malformed = week.iter().filter(|e| !e.is_well_formed()).count();
        assert_eq!(malformed, 1);
        assert_eq!(dates::leap_day_2024().to_string(), "2024-02-29");
    }
}
