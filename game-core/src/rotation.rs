use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RotationError {
    #[error("no answers to rotate through")]
    NoAnswers,
}

/// Picks the answer of the day: one entry of the answer list per UTC calendar day,
/// counted from `epoch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRotation {
    epoch: NaiveDate,
}

impl DailyRotation {
    pub fn new(epoch: NaiveDate) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    /// Days since the epoch; negative before it.
    pub fn day_index(&self, date: NaiveDate) -> i64 {
        (date - self.epoch).num_days()
    }

    pub fn answer_for<'a>(
        &self,
        date: NaiveDate,
        answers: &'a [String],
    ) -> Result<&'a str, RotationError> {
        if answers.is_empty() {
            return Err(RotationError::NoAnswers);
        }

        let index = self.day_index(date).rem_euclid(answers.len() as i64) as usize;
        Ok(&answers[index])
    }

    pub fn answer_at<'a>(
        &self,
        now: DateTime<Utc>,
        answers: &'a [String],
    ) -> Result<&'a str, RotationError> {
        self.answer_for(now.date_naive(), answers)
    }

    /// Time left until the answer changes at the next UTC midnight.
    pub fn time_until_next(&self, now: DateTime<Utc>) -> TimeDelta {
        now.date_naive()
            .succ_opt()
            .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc() - now)
            .unwrap_or_else(TimeDelta::zero)
    }
}

impl Default for DailyRotation {
    fn default() -> Self {
        Self::new(NaiveDate::from_ymd_opt(2021, 6, 19).expect("valid calendar date"))
    }
}
