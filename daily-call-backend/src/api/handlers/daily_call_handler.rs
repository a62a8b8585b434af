// src/api/handlers/daily_call_handler.rs
use crate::api::dto::daily_call_dto::{
    ChangeAcceptedDto, DailyActivityQuery, DailyCallCustomerQuery, DailyCallCustomerRow,
    DatabaseChangePayload, HealthDto, LbcRtoRecord, WeeklyRangeQuery,
};
use crate::api::AppState;
use crate::domain::calendar::{
    end_of_day, first_day_of_month, last_day_of_month, start_of_day, DateRange,
};
use crate::domain::daily_activity::DailyActivityRecord;
use crate::domain::weekly_range::WeeklyRangeBucket;
use crate::error::{AppError, AppResult};
use crate::extractors::ValidatedUuid;
use crate::logging::RequestContext;
use crate::service::change_notification_service::{ChangeKind, TableChange};
use crate::types::ApiResponse;
use crate::utils::error_helper::validation_error;
use axum::{
    extract::{rejection::QueryRejection, Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Router,
};
use tracing::info;

fn query_or_bad_request<T>(query: Result<Query<T>, QueryRejection>) -> AppResult<T> {
    query
        .map(|Query(value)| value)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

fn respond<T>(data: ApiResponse<T>, context: Option<Extension<RequestContext>>) -> ApiResponse<T> {
    match context {
        Some(Extension(context)) => data.with_request_id(context.request_id),
        None => data,
    }
}

pub async fn health_handler() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// 失敗しても空の一覧を返す（画面の挙動に合わせる）
pub async fn list_daily_call_customers_handler(
    State(app_state): State<AppState>,
    context: Option<Extension<RequestContext>>,
    query: Result<Query<DailyCallCustomerQuery>, QueryRejection>,
) -> AppResult<ApiResponse<Vec<DailyCallCustomerRow>>> {
    let filter = query_or_bad_request(query)?.into_filter()?;

    let rows = app_state
        .daily_call_service
        .fetch_customers_for_daily_call(&filter)
        .await;

    Ok(respond(ApiResponse::list(rows), context))
}

pub async fn weekly_ranges_handler(
    State(app_state): State<AppState>,
    context: Option<Extension<RequestContext>>,
    query: Result<Query<WeeklyRangeQuery>, QueryRejection>,
) -> AppResult<ApiResponse<Vec<WeeklyRangeBucket>>> {
    let query = query_or_bad_request(query)?;
    let buckets = app_state.daily_call_service.weekly_range_buckets(query.date);

    Ok(respond(ApiResponse::list(buckets), context))
}

pub async fn customer_daily_activity_handler(
    State(app_state): State<AppState>,
    ValidatedUuid(contact_id): ValidatedUuid,
    context: Option<Extension<RequestContext>>,
    query: Result<Query<DailyActivityQuery>, QueryRejection>,
) -> AppResult<ApiResponse<Vec<DailyActivityRecord>>> {
    let query = query_or_bad_request(query)?;
    let service = &app_state.daily_call_service;

    // 省略時は今月
    let today = service.today();
    let from = query.from.unwrap_or_else(|| first_day_of_month(today));
    let to = query.to.unwrap_or_else(|| last_day_of_month(today));
    if from > to {
        return Err(validation_error("from", "must not be after 'to'"));
    }

    let offset = service.offset();
    let range = DateRange::new(
        start_of_day(from, offset)
            .ok_or_else(|| validation_error("from", "is outside the supported date range"))?,
        end_of_day(to, offset)
            .ok_or_else(|| validation_error("to", "is outside the supported date range"))?,
    );
    let records = service
        .fetch_customer_daily_activity(contact_id, &range)
        .await;

    Ok(respond(ApiResponse::list(records), context))
}

pub async fn customer_rto_handler(
    State(app_state): State<AppState>,
    ValidatedUuid(contact_id): ValidatedUuid,
    context: Option<Extension<RequestContext>>,
) -> AppResult<ApiResponse<Vec<LbcRtoRecord>>> {
    let records = app_state
        .daily_call_service
        .fetch_lbc_rto_data(contact_id)
        .await;

    Ok(respond(ApiResponse::list(records), context))
}

/// データベース Webhook からの変更通知を受け取り、購読者へ流す
pub async fn publish_change_handler(
    State(app_state): State<AppState>,
    context: Option<Extension<RequestContext>>,
    Json(payload): Json<DatabaseChangePayload>,
) -> AppResult<impl IntoResponse> {
    let kind = payload
        .event_type
        .parse::<ChangeKind>()
        .map_err(AppError::BadRequest)?;

    let table = payload.table.trim().to_string();
    if table.is_empty() {
        return Err(validation_error("table", "must not be empty"));
    }

    let change = TableChange {
        table,
        kind,
        schema: payload.schema,
    };
    let watched = app_state.change_notification_service.watches(&change);
    let table = change.table.clone();
    let receivers = app_state.change_notification_service.publish(change);

    info!(
        table = %table,
        kind = %kind,
        watched,
        receivers,
        "Table change accepted"
    );

    let body = ChangeAcceptedDto {
        table,
        kind: kind.as_str().to_string(),
        watched,
        receivers,
    };

    Ok((
        StatusCode::ACCEPTED,
        respond(ApiResponse::success(body), context),
    ))
}

pub fn daily_call_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/daily-call/customers",
            get(list_daily_call_customers_handler),
        )
        .route("/daily-call/weekly-ranges", get(weekly_ranges_handler))
        .route(
            "/daily-call/customers/{id}/activity",
            get(customer_daily_activity_handler),
        )
        .route(
            "/daily-call/customers/{id}/rto",
            get(customer_rto_handler),
        )
        .route("/daily-call/changes", post(publish_change_handler))
        .with_state(app_state)
}
