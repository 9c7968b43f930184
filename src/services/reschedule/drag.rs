use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::{DragRescheduler, Reschedule, RescheduleError};
use crate::models::entity::Entity;

/// Which grid the gesture started in. Month cells only carry a date, so
/// drops there keep the original time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragView {
    Day,
    Week,
    Month,
}

/// In-flight drag state, owned by the view layer between pointer events.
#[derive(Clone, Debug)]
pub struct DragContext {
    pub entity: Entity,
    pub original_start: NaiveDateTime,
    pub duration: Duration,
    pub hovered_date: Option<NaiveDate>,
    pub hovered_time: Option<NaiveTime>,
    pub view: DragView,
}

impl DragContext {
    pub fn from_entity(entity: &Entity, view: DragView) -> Self {
        Self {
            entity: entity.clone(),
            original_start: entity.start,
            duration: entity.duration(),
            hovered_date: Some(entity.start.date()),
            hovered_time: Some(entity.start.time()),
            view,
        }
    }

    /// Record the cell under the pointer. `time` is `None` over month cells
    /// and all-day lanes.
    pub fn update_hover(&mut self, date: Option<NaiveDate>, time: Option<NaiveTime>) {
        self.hovered_date = date;
        self.hovered_time = time;
    }

    pub fn hovered_start(&self) -> Option<NaiveDateTime> {
        let date = self.hovered_date?;
        match (self.view, self.hovered_time) {
            (DragView::Day | DragView::Week, Some(time)) if !self.entity.all_day => {
                Some(date.and_time(time))
            }
            _ => Some(date.and_time(self.original_start.time())),
        }
    }

    /// End of the ghost block drawn while hovering, `duration` after the
    /// hovered start.
    pub fn hovered_end(&self) -> Option<NaiveDateTime> {
        self.hovered_start()?.checked_add_signed(self.duration)
    }

    /// True when dropping here would not change anything.
    pub fn is_noop(&self) -> bool {
        self.hovered_start() == Some(self.original_start)
    }

    /// Resolve the drop into a reschedule.
    pub fn finish(self) -> Result<Reschedule, RescheduleError> {
        match (self.view, self.hovered_time) {
            (DragView::Day | DragView::Week, Some(time)) if !self.entity.all_day => {
                DragRescheduler::on_drop_at_slot(&self.entity, self.hovered_date, time)
            }
            _ => DragRescheduler::on_drop(&self.entity, self.hovered_date),
        }
    }
}
