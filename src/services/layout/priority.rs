use std::cmp::Ordering;

use crate::models::entity::Entity;

/// Urgency ordering shared by every view.
///
/// Higher priority first, then earlier start, then id. Ids are unique within
/// a collection, so the order is total and sorting is deterministic.
pub struct PriorityOrdering;

impl PriorityOrdering {
    pub fn rank(entity: &Entity) -> u8 {
        entity.priority.rank()
    }

    pub fn compare(a: &Entity, b: &Entity) -> Ordering {
        Self::rank(b)
            .cmp(&Self::rank(a))
            .then_with(|| a.start.cmp(&b.start))
            .then_with(|| a.id.cmp(&b.id))
    }

    pub fn sort(entities: &mut [&Entity]) {
        entities.sort_by(|a, b| Self::compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::entity::Priority;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn entity(id: &str, priority: Priority, hour: u32) -> Entity {
        Entity::builder()
            .id(id)
            .title(id)
            .start(at(hour))
            .end(at(hour + 1))
            .priority(priority)
            .build()
            .unwrap()
    }

    #[test]
    fn test_rank_values() {
        assert_eq!(PriorityOrdering::rank(&entity("h", Priority::High, 9)), 3);
        assert_eq!(PriorityOrdering::rank(&entity("m", Priority::Medium, 9)), 2);
        assert_eq!(PriorityOrdering::rank(&entity("l", Priority::Low, 9)), 1);
    }

    #[test]
    fn test_sort_by_priority_with_same_start() {
        let entities = [
            entity("low", Priority::Low, 9),
            entity("high", Priority::High, 9),
            entity("medium", Priority::Medium, 9),
        ];
        let mut refs: Vec<&Entity> = entities.iter().collect();
        PriorityOrdering::sort(&mut refs);

        let ids: Vec<&str> = refs.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_ties_broken_by_start_then_id() {
        let entities = [
            entity("b", Priority::Medium, 11),
            entity("c", Priority::Medium, 9),
            entity("a", Priority::Medium, 11),
        ];
        let mut refs: Vec<&Entity> = entities.iter().collect();
        PriorityOrdering::sort(&mut refs);

        let ids: Vec<&str> = refs.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let a = entity("a", Priority::High, 10);
        let b = entity("b", Priority::Low, 8);

        assert_eq!(PriorityOrdering::compare(&a, &b), Ordering::Less);
        assert_eq!(PriorityOrdering::compare(&b, &a), Ordering::Greater);
        assert_eq!(PriorityOrdering::compare(&a, &a), Ordering::Equal);
    }
}
