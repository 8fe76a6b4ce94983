// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

use crate::ValidationError;

/// Raw follow-up form contents as typed by the user. Validation happens
/// locally, before anything is sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpFormInput {
    pub message: String,
    pub date: String,
    pub time: String,
}

impl FollowUpFormInput {
    pub fn blank() -> Self {
        Self {
            message: String::new(),
            date: String::new(),
            time: "00:00".to_owned(),
        }
    }

    pub fn validate(&self) -> Result<FollowUpSchedule, ValidationError> {
        if self.date.trim().is_empty() {
            return Err(ValidationError::MissingDate);
        }

        let date = Date::parse(
            self.date.trim(),
            format_description!("[year]-[month]-[day]"),
        )
        .map_err(|_| ValidationError::BadDate {
            value: self.date.clone(),
        })?;

        let raw_time = if self.time.trim().is_empty() {
            "00:00"
        } else {
            self.time.trim()
        };
        let time = Time::parse(raw_time, format_description!("[hour]:[minute]")).map_err(|_| {
            ValidationError::BadTime {
                value: self.time.clone(),
            }
        })?;

        Ok(FollowUpSchedule {
            message: self.message.trim().to_owned(),
            date,
            time,
        })
    }
}

impl Default for FollowUpFormInput {
    fn default() -> Self {
        Self::blank()
    }
}

/// A validated follow-up appointment ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpSchedule {
    pub message: String,
    pub date: Date,
    pub time: Time,
}

impl FollowUpSchedule {
    pub fn at(&self) -> PrimitiveDateTime {
        PrimitiveDateTime::new(self.date, self.time)
    }

    pub fn date_string(&self) -> String {
        self.date.to_string()
    }

    pub fn time_string(&self) -> String {
        format!("{:02}:{:02}", self.time.hour(), self.time.minute())
    }
}

/// The 96 quarter-hour slots offered by the follow-up time picker.
pub fn quarter_hour_slots() -> Vec<String> {
    (0..24)
        .flat_map(|hour| (0..4).map(move |quarter| format!("{hour:02}:{:02}", quarter * 15)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{FollowUpFormInput, quarter_hour_slots};
    use crate::ValidationError;
    use time::macros::{date, time};

    #[test]
    fn missing_date_is_rejected_before_anything_else() {
        let form = FollowUpFormInput {
            message: "call back".to_owned(),
            date: String::new(),
            time: "09:15".to_owned(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingDate));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let form = FollowUpFormInput {
            message: String::new(),
            date: "14/02/2026".to_owned(),
            time: "09:15".to_owned(),
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::BadDate { .. })
        ));
    }

    #[test]
    fn malformed_time_is_rejected() {
        let form = FollowUpFormInput {
            message: String::new(),
            date: "2026-02-14".to_owned(),
            time: "9am".to_owned(),
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::BadTime { .. })
        ));
    }

    #[test]
    fn valid_form_yields_schedule_with_trimmed_message() {
        let form = FollowUpFormInput {
            message: "  left voicemail, try Tuesday  ".to_owned(),
            date: "2026-02-14".to_owned(),
            time: "14:30".to_owned(),
        };
        let schedule = form.validate().expect("form should validate");
        assert_eq!(schedule.message, "left voicemail, try Tuesday");
        assert_eq!(schedule.date, date!(2026-02-14));
        assert_eq!(schedule.time, time!(14:30));
        assert_eq!(schedule.date_string(), "2026-02-14");
        assert_eq!(schedule.time_string(), "14:30");
    }

    #[test]
    fn empty_time_defaults_to_midnight() {
        let form = FollowUpFormInput {
            message: String::new(),
            date: "2026-02-14".to_owned(),
            time: String::new(),
        };
        let schedule = form.validate().expect("form should validate");
        assert_eq!(schedule.time, time!(00:00));
    }

    #[test]
    fn time_picker_offers_quarter_hours() {
        let slots = quarter_hour_slots();
        assert_eq!(slots.len(), 96);
        assert_eq!(slots[0], "00:00");
        assert_eq!(slots[1], "00:15");
        assert_eq!(slots[95], "23:45");
    }
}
