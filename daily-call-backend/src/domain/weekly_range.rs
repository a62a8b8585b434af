// src/domain/weekly_range.rs

//! 月ごとの週範囲（週次合計の列）を計算する。
//!
//! 日曜日は区切りとして扱い、どの範囲にも含めない。範囲は土曜日か月末で閉じる。
//! 月末が日曜日の場合、その日はどの範囲にも入らない。

use crate::domain::calendar::first_day_of_month;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRangeBucket {
    /// 例: "JANUARY 6-11"
    pub label: String,
    pub start_day: u32,
    pub end_day: u32,
    /// 1始まり（1 = 1月）
    pub month: u32,
    pub year: i32,
}

impl WeeklyRangeBucket {
    fn new(month_label: &str, start_day: u32, end_day: u32, month: u32, year: i32) -> Self {
        Self {
            // 1日だけの範囲も "D-D" のまま表示する
            label: format!("{} {}-{}", month_label, start_day, end_day),
            start_day,
            end_day,
            month,
            year,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year
            && date.month() == self.month
            && date.day() >= self.start_day
            && date.day() <= self.end_day
    }
}

/// 大文字の英語月名（"JANUARY" など）
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B").to_string().to_uppercase()
}

/// `reference` を含む月の週範囲を日付順に返す
pub fn get_weekly_range_buckets(reference: NaiveDate) -> Vec<WeeklyRangeBucket> {
    let year = reference.year();
    let month = reference.month();
    let label = month_label(reference);

    let days: Vec<NaiveDate> = first_day_of_month(reference)
        .iter_days()
        .take_while(|date| date.month() == month)
        .collect();
    let last_day = days.len() as u32;

    let mut buckets = Vec::new();
    let mut range_start: Option<u32> = None;

    for date in days {
        let day = date.day();

        if date.weekday() == Weekday::Sun {
            if let Some(start) = range_start.take() {
                buckets.push(WeeklyRangeBucket::new(&label, start, day - 1, month, year));
            }
            continue;
        }

        let start = *range_start.get_or_insert(day);

        if date.weekday() == Weekday::Sat || day == last_day {
            buckets.push(WeeklyRangeBucket::new(&label, start, day, month, year));
            range_start = None;
        }
    }

    buckets
}
