//! Implements ClockPort. "Today" in the business's fixed civil offset.

use crate::domain::{CivilDate, DomainError};
use crate::ports::ClockPort;
use chrono::{FixedOffset, Utc};

/// Wall clock pinned to a fixed UTC offset (no DST handling).
pub struct LocalClock {
    offset: FixedOffset,
}

impl LocalClock {
    pub fn new(utc_offset_hours: i32) -> Result<Self, DomainError> {
        let offset = utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                DomainError::Config(format!("UTC offset out of range: {}h", utc_offset_hours))
            })?;
        Ok(Self { offset })
    }
}

impl ClockPort for LocalClock {
    fn today(&self) -> CivilDate {
        Utc::now().with_timezone(&self.offset).date_naive().into()
    }
}
