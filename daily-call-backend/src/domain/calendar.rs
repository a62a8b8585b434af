// src/domain/calendar.rs

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

/// 月初日
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// その月の日数
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_day_of_month(date);
    first
        .iter_days()
        .take_while(|day| day.month() == first.month())
        .count() as u32
}

/// 月末日
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date) + Duration::days(i64::from(days_in_month(date)) - 1)
}

/// 業務タイムゾーンでのその日の 00:00:00.000。表現できない日付は None
pub fn start_of_day(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    to_utc(date.and_time(NaiveTime::MIN), offset)
}

/// 業務タイムゾーンでのその日の 23:59:59.999。表現できない日付は None
pub fn end_of_day(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let last_moment = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
    to_utc(date.and_time(last_moment), offset)
}

fn to_utc(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    local
        .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
        .map(|utc| Utc.from_utc_datetime(&utc))
}

/// 業務タイムゾーンでの暦日
pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// 両端を含む時刻範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// `from` 日の始まりから `to` 日の終わりまで
    pub fn for_days(from: NaiveDate, to: NaiveDate, offset: FixedOffset) -> Option<Self> {
        Some(Self {
            from: start_of_day(from, offset)?,
            to: end_of_day(to, offset)?,
        })
    }

    /// `now` を含む暦月の最初の瞬間から最後の瞬間まで
    pub fn month_of(now: DateTime<Utc>, offset: FixedOffset) -> Option<Self> {
        let today = local_date(now, offset);
        Self::for_days(
            first_day_of_month(today),
            last_day_of_month(today),
            offset,
        )
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from <= instant && instant <= self.to
    }
}
