//! Log API query DTOs

use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};
use validator::Validate;

use crate::domain::time_range::TimeRangeRequest;

#[serde_as]
#[derive(Deserialize, Debug, Default, Validate)]
pub struct HistogramQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 128))]
    pub stack: Option<String>,

    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
    #[serde(rename = "timeGrain")]
    pub time_grain: Option<String>,
}

impl HistogramQuery {
    pub fn time_range(&self) -> TimeRangeRequest {
        TimeRangeRequest {
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            time_grain: self.time_grain.clone(),
        }
    }
}

#[serde_as]
#[derive(Deserialize, Debug, Default, Validate)]
pub struct EventLogQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 128))]
    pub stack: Option<String>,

    #[serde(rename = "startTime")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime")]
    pub end_time: Option<String>,
}

impl EventLogQuery {
    pub fn time_range(&self) -> TimeRangeRequest {
        TimeRangeRequest {
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            time_grain: None,
        }
    }
}

fn default_enable() -> bool {
    true
}

#[serde_as]
#[derive(Deserialize, Debug, Validate)]
pub struct EnableLoggingQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 128))]
    pub stack: Option<String>,

    #[serde(default = "default_enable")]
    pub enable: bool,
}

#[serde_as]
#[derive(Deserialize, Debug, Default, Validate)]
pub struct StackQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(max = 128))]
    pub stack: Option<String>,
}
