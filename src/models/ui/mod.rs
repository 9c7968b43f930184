// UI models module
// View selection supplied by the surrounding application

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewType {
    Day,
    Week,
    #[default]
    Month,
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ViewType::Day),
            "week" => Ok(ViewType::Week),
            "month" => Ok(ViewType::Month),
            other => Err(format!("Unknown view: {}", other)),
        }
    }
}
