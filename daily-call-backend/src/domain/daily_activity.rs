// src/domain/daily_activity.rs

use crate::domain::calendar::local_date;
use crate::domain::call_channel::CallChannel;
use crate::domain::call_log_model;
use chrono::{FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// 顧客×暦日ごとの連絡実績（ログが無い日は作らない）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivityRecord {
    /// "<contact_id>-<YYYY-MM-DD>"
    pub id: String,
    pub contact_id: Uuid,
    pub activity_date: NaiveDate,
    pub activity_type: CallChannel,
    pub activity_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DailyActivityRecord {
    fn first(log: &call_log_model::Model, date: NaiveDate) -> Self {
        Self {
            id: format!("{}-{}", log.contact_id, date.format("%Y-%m-%d")),
            contact_id: log.contact_id,
            activity_date: date,
            activity_type: log.channel(),
            activity_count: 1,
            notes: non_empty_notes(log),
        }
    }

    fn absorb(&mut self, log: &call_log_model::Model) {
        self.activity_count += 1;
        self.activity_type = self.activity_type.dominant(log.channel());
        if self.notes.is_none() {
            self.notes = non_empty_notes(log);
        }
    }
}

fn non_empty_notes(log: &call_log_model::Model) -> Option<String> {
    log.notes.clone().filter(|notes| !notes.is_empty())
}

/// 通話ログを暦日ごとにまとめる。新しい日付が先頭。
pub fn build_activity_by_day(
    logs: &[call_log_model::Model],
    offset: FixedOffset,
) -> Vec<DailyActivityRecord> {
    let mut by_day: BTreeMap<NaiveDate, DailyActivityRecord> = BTreeMap::new();

    for log in logs {
        let date = local_date(log.occurred_at.with_timezone(&Utc), offset);
        by_day
            .entry(date)
            .and_modify(|record| record.absorb(log))
            .or_insert_with(|| DailyActivityRecord::first(log, date));
    }

    by_day.into_values().rev().collect()
}
