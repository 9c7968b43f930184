// Property-based tests for the layout engines and drag reschedule
// Exercises invariants over random entity collections

#[path = "../fixtures/mod.rs"]
mod fixtures;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_planner::models::entity::{Entity, Priority};
use rust_planner::models::layout::GridWindow;
use rust_planner::services::layout::{
    DayLayoutConfig, DayLayoutEngine, MonthSpanEngine, PriorityOrdering,
};
use rust_planner::services::reschedule::DragRescheduler;
use std::cmp::Ordering;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

fn priority_strategy() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
}

fn at(day_offset: i64, minute_of_day: i64) -> NaiveDateTime {
    base_date().and_hms_opt(0, 0, 0).unwrap()
        + Duration::days(day_offset)
        + Duration::minutes(minute_of_day)
}

prop_compose! {
    fn entity_strategy(id: usize)(
        day in 0..90i64,
        minute in 0..1440i64,
        length in 0..(20 * 1440i64),
        priority in priority_strategy(),
        all_day in any::<bool>(),
    ) -> Entity {
        let start = at(day, minute);
        let end = start + Duration::minutes(length);
        fixtures::entities::timed(&format!("e{}", id), start, end, priority).with_all_day(all_day)
    }
}

trait WithAllDay {
    fn with_all_day(self, all_day: bool) -> Self;
}

impl WithAllDay for Entity {
    fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }
}

fn collection_strategy() -> impl Strategy<Value = Vec<Entity>> {
    (1..24usize).prop_flat_map(|len| {
        (0..len)
            .map(entity_strategy)
            .collect::<Vec<_>>()
    })
}

proptest! {
    /// Every placed block is at least the minimum height.
    #[test]
    fn prop_block_height_at_least_minimum(
        entities in collection_strategy(),
        day in 0..90i64,
        min_height in 1.0f32..80.0,
    ) {
        let config = DayLayoutConfig { hour_height: 60.0, min_block_height: min_height };
        let date = base_date() + Duration::days(day);
        let layout = DayLayoutEngine::layout(&entities, date, &config);

        for block in &layout.blocks {
            prop_assert!(block.height >= min_height);
        }
    }

    /// A later start time-of-day gives a strictly larger offset.
    #[test]
    fn prop_top_offset_increases_with_start(a in 0..1439i64, gap in 1..60i64) {
        let b = (a + gap).min(1439);
        prop_assume!(b > a);

        let first = Entity::new("a", "a", at(0, a), at(0, a)).unwrap();
        let second = Entity::new("b", "b", at(0, b), at(0, b)).unwrap();
        let config = DayLayoutConfig::default();

        let top_a = DayLayoutEngine::place(&first, 0, 1, &config).top_offset;
        let top_b = DayLayoutEngine::place(&second, 0, 1, &config).top_offset;
        prop_assert!(top_b > top_a);
    }

    /// compare is antisymmetric and transitive, and sorting is deterministic.
    #[test]
    fn prop_priority_order_is_total(entities in collection_strategy()) {
        for a in &entities {
            for b in &entities {
                prop_assert_eq!(
                    PriorityOrdering::compare(a, b),
                    PriorityOrdering::compare(b, a).reverse()
                );
                for c in &entities {
                    if PriorityOrdering::compare(a, b) != Ordering::Greater
                        && PriorityOrdering::compare(b, c) != Ordering::Greater
                    {
                        prop_assert_ne!(PriorityOrdering::compare(a, c), Ordering::Greater);
                    }
                }
            }
        }

        let mut once: Vec<&Entity> = entities.iter().collect();
        let mut twice: Vec<&Entity> = entities.iter().rev().collect();
        PriorityOrdering::sort(&mut once);
        PriorityOrdering::sort(&mut twice);
        let once_ids: Vec<&str> = once.iter().map(|e| e.id.as_str()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|e| e.id.as_str()).collect();
        prop_assert_eq!(once_ids, twice_ids);
    }

    /// Span entries tile each entity's clipped dates exactly and stay in a row.
    #[test]
    fn prop_spans_cover_clipped_interval(
        entities in collection_strategy(),
        month in 1..=3u32,
        first_day in 0..7u8,
    ) {
        let window = GridWindow::for_month(2025, month, first_day).unwrap();
        let layout = MonthSpanEngine::layout(&entities, &window, 3);

        for span in &layout.spans {
            prop_assert!(span.col <= 6);
            prop_assert!(span.span >= 1);
            prop_assert!(span.col + span.span <= 7);
            prop_assert!(span.row < layout.rows);
        }

        for entity in entities.iter().filter(|e| e.is_multi_day()) {
            let effective_start = entity.start_date().max(window.start);
            let effective_end = entity.end_date().min(window.end);

            let mut covered: Vec<NaiveDate> = Vec::new();
            for span in layout.spans.iter().filter(|s| s.entity.id == entity.id) {
                let (first, last) = span.day_range(window.start);
                covered.extend(first.iter_days().take_while(|d| *d <= last));
            }

            let expected: Vec<NaiveDate> = if effective_start <= effective_end {
                effective_start.iter_days().take_while(|d| *d <= effective_end).collect()
            } else {
                Vec::new()
            };
            prop_assert_eq!(covered, expected);
        }
    }

    /// Dropping anywhere keeps the exact duration.
    #[test]
    fn prop_drop_preserves_duration(
        entities in collection_strategy(),
        target_offset in -400..400i64,
    ) {
        let target = base_date() + Duration::days(target_offset);
        for entity in &entities {
            let result = DragRescheduler::on_drop(entity, Some(target)).unwrap();
            prop_assert_eq!(result.new_end - result.new_start, entity.end - entity.start);
            prop_assert_eq!(result.new_start.date(), target);
            prop_assert_eq!(result.new_start.time(), entity.start.time());
        }
    }
}

#[test]
fn test_malformed_entities_never_panic() {
    let mut entities: Vec<Entity> = (0..10)
        .map(|i| {
            fixtures::entities::timed(
                &format!("m{}", i),
                at(i, 600),
                at(i, 660),
                Priority::Medium,
            )
        })
        .collect();
    for entity in entities.iter_mut().step_by(2) {
        entity.end = entity.start - Duration::hours(3);
    }

    let window = GridWindow::for_month(2025, 1, 0).unwrap();
    let month = MonthSpanEngine::layout(&entities, &window, 3);
    assert_eq!(month.skipped, 5);

    let day = DayLayoutEngine::layout(&entities, base_date(), &DayLayoutConfig::default());
    assert_eq!(day.skipped, 5);
    assert!(day.blocks.is_empty());
}
