// src/service/daily_call_service.rs

//! 日次コールモニタリング表の集計。
//!
//! 顧客を取得して検索語で絞り込み、残った顧客について購入履歴・指標・当月の通話ログを
//! 並行に取得してから、顧客ごとに1行へまとめる。

use crate::api::dto::daily_call_dto::{DailyCallCustomerRow, DailyCallFilterParams, LbcRtoRecord};
use crate::db::DbPool;
use crate::domain::calendar::{local_date, DateRange};
use crate::domain::daily_activity::{build_activity_by_day, DailyActivityRecord};
use crate::domain::weekly_range::{get_weekly_range_buckets, WeeklyRangeBucket};
use crate::domain::{call_log_model, contact_model, customer_metric_model, purchase_history_model};
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::daily_call_repository::DailyCallRepository;
use crate::repository::daily_call_source::DailyCallSource;
use crate::utils::formatting::{
    first_nonzero, first_present, format_code_date, format_date, format_timestamp,
    normalize_text, PLACEHOLDER,
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const DEFAULT_SOURCE: &str = "Manual";
const UNASSIGNED: &str = "Unassigned";
const UNNAMED_SHOP: &str = "Unnamed Shop";
const COURIER_ASSIGNED: &str = "Assigned";

pub struct DailyCallService {
    source: Arc<dyn DailyCallSource>,
    offset: FixedOffset,
}

impl DailyCallService {
    pub fn new(source: Arc<dyn DailyCallSource>, offset: FixedOffset) -> Self {
        Self { source, offset }
    }

    pub fn from_pool(db_pool: DbPool, offset: FixedOffset) -> Self {
        Self::new(Arc::new(DailyCallRepository::new(db_pool)), offset)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// 業務タイムゾーンでの今日
    pub fn today(&self) -> NaiveDate {
        local_date(Utc::now(), self.offset)
    }

    /// `reference` を含む月の週範囲。省略時は今月
    pub fn weekly_range_buckets(&self, reference: Option<NaiveDate>) -> Vec<WeeklyRangeBucket> {
        get_weekly_range_buckets(reference.unwrap_or_else(|| self.today()))
    }

    // --- 顧客一覧 ---

    /// 失敗時は空リストを返す（画面側は「該当なし」と区別しない）
    pub async fn fetch_customers_for_daily_call(
        &self,
        filter: &DailyCallFilterParams,
    ) -> Vec<DailyCallCustomerRow> {
        self.fetch_customers_for_daily_call_at(filter, Utc::now())
            .await
    }

    pub async fn fetch_customers_for_daily_call_at(
        &self,
        filter: &DailyCallFilterParams,
        now: DateTime<Utc>,
    ) -> Vec<DailyCallCustomerRow> {
        match self.try_fetch_customers_for_daily_call_at(filter, now).await {
            Ok(rows) => rows,
            Err(e) => {
                log_with_context!(
                    tracing::Level::ERROR,
                    "Error fetching daily call customers",
                    "status" => filter.status.as_str(),
                    "error" => e.to_string(),
                );
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_customers_for_daily_call(
        &self,
        filter: &DailyCallFilterParams,
    ) -> AppResult<Vec<DailyCallCustomerRow>> {
        self.try_fetch_customers_for_daily_call_at(filter, Utc::now())
            .await
    }

    /// `now` を含む暦月を「今月」として集計する
    pub async fn try_fetch_customers_for_daily_call_at(
        &self,
        filter: &DailyCallFilterParams,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<DailyCallCustomerRow>> {
        let buckets = get_weekly_range_buckets(local_date(now, self.offset));
        let month_range = DateRange::month_of(now, self.offset).ok_or_else(|| {
            AppError::InternalServerError(format!("Month of {} is out of range", now))
        })?;

        let customers: Vec<contact_model::Model> = self
            .source
            .find_customers(filter.status.to_customer_status())
            .await?
            .into_iter()
            .filter(|contact| matches_search(contact, &filter.search))
            .collect();

        // 該当なしなら子テーブルは読まない
        if customers.is_empty() {
            debug!(status = %filter.status, "No customers matched daily call filter");
            return Ok(Vec::new());
        }

        let contact_ids: Vec<Uuid> = customers.iter().map(|contact| contact.id).collect();

        let (purchases, metrics, call_logs) = tokio::try_join!(
            self.source.find_purchases(&contact_ids),
            self.source.find_metrics(&contact_ids),
            self.source.find_call_logs(&contact_ids, &month_range),
        )?;

        debug!(
            customers = customers.len(),
            purchases = purchases.len(),
            metrics = metrics.len(),
            call_logs = call_logs.len(),
            "Fetched daily call source rows"
        );

        let mut purchases_by_contact = group_by_contact(purchases, |row| row.contact_id);
        let mut logs_by_contact = group_by_contact(call_logs, |row| row.contact_id);
        let metrics_by_contact: HashMap<Uuid, customer_metric_model::Model> = metrics
            .into_iter()
            .map(|row| (row.contact_id, row))
            .collect();

        let context = RowContext {
            buckets: &buckets,
            month_range: &month_range,
            offset: self.offset,
        };

        let mut rows: Vec<DailyCallCustomerRow> = customers
            .iter()
            .map(|contact| {
                let purchases = purchases_by_contact.remove(&contact.id).unwrap_or_default();
                let logs = logs_by_contact.remove(&contact.id).unwrap_or_default();
                context.build_row(
                    contact,
                    &purchases,
                    metrics_by_contact.get(&contact.id),
                    &logs,
                )
            })
            .collect();

        // 表示名の昇順（大文字小文字を区別しない、同名は取得順）
        rows.sort_by_cached_key(|row| row.shop_name.to_lowercase());

        info!(
            status = %filter.status,
            rows = rows.len(),
            buckets = buckets.len(),
            "Daily call customers aggregated"
        );

        Ok(rows)
    }

    // --- 顧客別の日次実績 ---

    pub async fn fetch_customer_daily_activity(
        &self,
        contact_id: Uuid,
        range: &DateRange,
    ) -> Vec<DailyActivityRecord> {
        match self.try_fetch_customer_daily_activity(contact_id, range).await {
            Ok(records) => records,
            Err(e) => {
                log_with_context!(
                    tracing::Level::ERROR,
                    "Error fetching customer daily activity",
                    "contact_id" => contact_id,
                    "error" => e.to_string(),
                );
                Vec::new()
            }
        }
    }

    pub async fn try_fetch_customer_daily_activity(
        &self,
        contact_id: Uuid,
        range: &DateRange,
    ) -> AppResult<Vec<DailyActivityRecord>> {
        let logs = self.source.find_call_logs(&[contact_id], range).await?;
        let records = build_activity_by_day(&logs, self.offset);

        debug!(
            contact_id = %contact_id,
            call_logs = logs.len(),
            days = records.len(),
            "Customer daily activity built"
        );

        Ok(records)
    }

    // --- LBC RTO ---

    /// RTO 専用テーブルが読めない場合は返品記録から組み立てる。
    /// どちらも失敗したら空リスト。
    pub async fn fetch_lbc_rto_data(&self, contact_id: Uuid) -> Vec<LbcRtoRecord> {
        match self.source.find_lbc_rto_records(contact_id).await {
            Ok(records) => return records.into_iter().map(LbcRtoRecord::from).collect(),
            Err(e) => {
                warn!(
                    contact_id = %contact_id,
                    error = %e,
                    "LBC RTO table unavailable, falling back to sales returns"
                );
            }
        }

        match self.source.find_sales_returns(contact_id).await {
            Ok(returns) => returns.into_iter().map(LbcRtoRecord::from).collect(),
            Err(e) => {
                log_with_context!(
                    tracing::Level::ERROR,
                    "Error fetching fallback LBC RTO data",
                    "contact_id" => contact_id,
                    "error" => e.to_string(),
                );
                Vec::new()
            }
        }
    }
}

/// 1行を組み立てるための当月の情報
struct RowContext<'a> {
    buckets: &'a [WeeklyRangeBucket],
    month_range: &'a DateRange,
    offset: FixedOffset,
}

impl RowContext<'_> {
    fn build_row(
        &self,
        contact: &contact_model::Model,
        purchases: &[purchase_history_model::Model],
        metric: Option<&customer_metric_model::Model>,
        logs: &[call_log_model::Model],
    ) -> DailyCallCustomerRow {
        let offset = self.offset;
        let text_or = |value: Option<&str>, fallback: &str| value.unwrap_or(fallback).to_string();

        let code_text = first_present(&[
            contact.code_text.as_deref(),
            contact.price_group.as_deref(),
            contact.dealership_terms.as_deref(),
        ]);
        let code_date = first_present(&[
            contact.code_date.as_deref(),
            contact.dealership_since.as_deref(),
            contact.ishinomoto_dealer_since.as_deref(),
        ]);
        let has_delivery_address = first_present(&[contact.delivery_address.as_deref()]).is_some();

        DailyCallCustomerRow {
            id: contact.id,
            source: text_or(first_present(&[contact.refer_by.as_deref()]), DEFAULT_SOURCE),
            assigned_to: text_or(
                first_present(&[
                    contact.salesman.as_deref(),
                    contact.assigned_agent.as_deref(),
                ]),
                UNASSIGNED,
            ),
            assigned_date: format_timestamp(contact.updated_at, offset),
            client_since: format_date(contact.customer_since.as_deref(), offset),
            city: text_or(first_present(&[contact.city.as_deref()]), PLACEHOLDER),
            shop_name: text_or(first_present(&[Some(contact.company.as_str())]), UNNAMED_SHOP),
            contact_number: text_or(
                first_present(&[contact.mobile.as_deref(), contact.phone.as_deref()]),
                PLACEHOLDER,
            ),
            code_date: format_code_date(code_text, code_date, offset),
            ishinomoto_dealer_since: format_date(
                first_present(&[
                    contact.ishinomoto_dealer_since.as_deref(),
                    contact.dealership_since.as_deref(),
                ]),
                offset,
            ),
            ishinomoto_signage_since: format_date(
                first_present(&[
                    contact.ishinomoto_signage_since.as_deref(),
                    contact.signage_since.as_deref(),
                ]),
                offset,
            ),
            quota: first_nonzero(&[contact.dealership_quota]),
            mode_of_payment: text_or(first_present(&[contact.terms.as_deref()]), PLACEHOLDER),
            courier: if has_delivery_address {
                COURIER_ASSIGNED.to_string()
            } else {
                PLACEHOLDER.to_string()
            },
            status: contact.status.clone(),
            outstanding_balance: first_nonzero(&[
                metric.and_then(|m| m.outstanding_balance),
                contact.balance,
            ]),
            average_monthly_order: first_nonzero(&[
                metric.and_then(|m| m.average_monthly_purchase)
            ]),
            monthly_order: compute_monthly_order_total(purchases, self.month_range),
            weekly_range_totals: compute_weekly_range_totals(purchases, self.buckets, offset),
            daily_activity: build_activity_by_day(logs, offset),
        }
    }
}

/// 検索語が空なら常に一致。
/// 会社名・氏名・市・州・電話・携帯・担当者・配送先を空白で連結した文字列に対する部分一致。
pub fn matches_search(contact: &contact_model::Model, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let searchable = [
        Some(contact.company.as_str()),
        contact.name.as_deref(),
        contact.city.as_deref(),
        contact.province.as_deref(),
        contact.phone.as_deref(),
        contact.mobile.as_deref(),
        contact.salesman.as_deref(),
        contact.delivery_address.as_deref(),
    ]
    .map(Option::unwrap_or_default)
    .join(" ")
    .to_lowercase();

    searchable.contains(&normalize_text(query))
}

/// 今月の購入合計（曜日は問わない）
pub fn compute_monthly_order_total(
    purchases: &[purchase_history_model::Model],
    month_range: &DateRange,
) -> f64 {
    purchases
        .iter()
        .filter(|row| {
            row.purchase_date
                .is_some_and(|date| month_range.contains(date.with_timezone(&Utc)))
        })
        .map(|row| row.total_amount.unwrap_or(0.0))
        .sum()
}

/// 週範囲ごとの購入合計。日曜日の購入はどの範囲にも入らない
pub fn compute_weekly_range_totals(
    purchases: &[purchase_history_model::Model],
    buckets: &[WeeklyRangeBucket],
    offset: FixedOffset,
) -> Vec<f64> {
    let mut totals = vec![0.0; buckets.len()];

    for row in purchases {
        let Some(purchased_at) = row.purchase_date else {
            continue;
        };
        let day = local_date(purchased_at.with_timezone(&Utc), offset);

        for (total, bucket) in totals.iter_mut().zip(buckets) {
            if bucket.contains(day) {
                *total += row.total_amount.unwrap_or(0.0);
            }
        }
    }

    totals
}

fn group_by_contact<T>(rows: Vec<T>, contact_id: impl Fn(&T) -> Uuid) -> HashMap<Uuid, Vec<T>> {
    let mut grouped: HashMap<Uuid, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(contact_id(&row)).or_default().push(row);
    }
    grouped
}
