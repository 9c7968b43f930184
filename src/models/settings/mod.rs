// Settings module
// Layout and mutation preferences, stored as TOML

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u8,
    /// Pixels per hour on the day axis
    pub hour_height: f32,
    /// Floor for block height so zero-length items stay visible
    pub min_block_height: f32,
    /// Items shown inline per day before "+N more"
    pub visible_cap: usize,
    pub week_slot_start_hour: u32,
    /// Inclusive
    pub week_slot_end_hour: u32,
    /// IANA zone used to turn stored offsets into wall-clock times
    pub timezone: String,
    pub mutation_endpoint: Option<String>,
    pub mutation_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_day_of_week: 0, // Sunday
            hour_height: 60.0,
            min_block_height: 20.0,
            visible_cap: 3,
            week_slot_start_hour: 6,
            week_slot_end_hour: 21,
            timezone: "UTC".to_string(),
            mutation_endpoint: None,
            mutation_timeout_secs: 10,
        }
    }
}

impl Settings {
    /// Validate settings values
    pub fn validate(&self) -> Result<(), String> {
        if self.first_day_of_week > 6 {
            return Err("First day of week must be 0-6 (Sunday-Saturday)".to_string());
        }

        if !(self.hour_height.is_finite() && self.hour_height > 0.0) {
            return Err("Hour height must be a positive number".to_string());
        }

        if !(self.min_block_height.is_finite() && self.min_block_height >= 0.0) {
            return Err("Minimum block height cannot be negative".to_string());
        }

        if self.visible_cap == 0 {
            return Err("Visible item cap must be at least 1".to_string());
        }

        if self.week_slot_end_hour > 23 || self.week_slot_start_hour > self.week_slot_end_hour {
            return Err("Week slots must be an hour range within 0-23".to_string());
        }

        self.time_zone()?;

        if let Some(endpoint) = &self.mutation_endpoint {
            if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
                return Err("Mutation endpoint must be an http(s) URL".to_string());
            }
        }

        if self.mutation_timeout_secs == 0 {
            return Err("Mutation timeout must be at least one second".to_string());
        }

        Ok(())
    }

    pub fn time_zone(&self) -> Result<Tz, String> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| format!("Unknown time zone: {}", self.timezone))
    }

    /// Hour slots shown in the week grid.
    pub fn week_slots(&self) -> Vec<u32> {
        (self.week_slot_start_hour..=self.week_slot_end_hour).collect()
    }

    pub fn day_config(&self) -> crate::services::layout::DayLayoutConfig {
        crate::services::layout::DayLayoutConfig {
            hour_height: self.hour_height,
            min_block_height: self.min_block_height,
        }
    }
}
