use axum::{
	Json, Router,
	extract::{
		Query, State,
		rejection::{JsonRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use lcr_service::{
	CountRequest, Error as ServiceError, ListRequest, PredictedRating, PredictedRatingRequest,
	RealTimeRank, RealTimeRankRequest, RecordItem, UserRecordsRequest,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/contest-records", get(list))
		.route("/contest-records/", get(list))
		.route("/contest-records/count", get(count))
		.route("/contest-records/user", get(list_by_user))
		.route("/contest-records/predicted-rating", post(predicted_rating))
		.route("/contest-records/real-time-rank", post(real_time_rank))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn count(
	State(state): State<AppState>,
	query: Result<Query<CountRequest>, QueryRejection>,
) -> Result<Json<i64>, ApiError> {
	let Query(req) = query?;

	tracing::info!(contest_name = %req.contest_name, archived = req.archived, "Counting records.");

	let total = state.service.count(req).await?;

	Ok(Json(total))
}

async fn list(
	State(state): State<AppState>,
	query: Result<Query<ListRequest>, QueryRejection>,
) -> Result<Json<Vec<RecordItem>>, ApiError> {
	let Query(req) = query?;

	tracing::info!(
		contest_name = %req.contest_name,
		archived = req.archived,
		skip = req.skip,
		limit = req.limit,
		"Listing records."
	);

	let items = state.service.list(req).await?;

	Ok(Json(items))
}

async fn list_by_user(
	State(state): State<AppState>,
	query: Result<Query<UserRecordsRequest>, QueryRejection>,
) -> Result<Json<Vec<RecordItem>>, ApiError> {
	let Query(req) = query?;

	tracing::info!(
		contest_name = %req.contest_name,
		username = %req.username,
		archived = req.archived,
		"Listing user records."
	);

	let items = state.service.list_by_user(req).await?;

	Ok(Json(items))
}

async fn predicted_rating(
	State(state): State<AppState>,
	payload: Result<Json<PredictedRatingRequest>, JsonRejection>,
) -> Result<Json<Vec<Option<PredictedRating>>>, ApiError> {
	let Json(req) = payload?;

	tracing::info!(
		contest_name = %req.contest_name,
		users = req.users.len(),
		"Querying predicted ratings."
	);

	let ratings = state.service.predicted_rating(req).await?;

	Ok(Json(ratings))
}

async fn real_time_rank(
	State(state): State<AppState>,
	payload: Result<Json<RealTimeRankRequest>, JsonRejection>,
) -> Result<Json<Option<RealTimeRank>>, ApiError> {
	let Json(req) = payload?;

	tracing::info!(
		contest_name = %req.contest_name,
		username = %req.user.username,
		data_region = %req.user.data_region,
		"Querying real-time rank."
	);

	let rank = state.service.real_time_rank(req).await?;

	Ok(Json(rank))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
	fields: Option<Vec<String>>,
}
impl ApiError {
	fn new(
		status: StatusCode,
		error_code: impl Into<String>,
		message: impl Into<String>,
		fields: Option<Vec<String>>,
	) -> Self {
		Self { status, error_code: error_code.into(), message: message.into(), fields }
	}

	fn invalid_request(message: impl Into<String>, fields: Option<Vec<String>>) -> Self {
		Self::new(StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REQUEST", message, fields)
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { field, message } =>
				Self::invalid_request(message, Some(vec![field])),
			ServiceError::UnknownContest { contest_name } => Self::new(
				StatusCode::NOT_FOUND,
				"UNKNOWN_CONTEST",
				format!("Contest {contest_name} does not exist."),
				Some(vec!["contest_name".to_string()]),
			),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Record store request failed.");

				Self::new(
					StatusCode::INTERNAL_SERVER_ERROR,
					"STORAGE_ERROR",
					"Record store request failed.",
					None,
				)
			},
		}
	}
}

impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::invalid_request(rejection.body_text(), None)
	}
}

impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::invalid_request(rejection.body_text(), None)
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error_code: self.error_code, message: self.message, fields: self.fields };

		(self.status, Json(body)).into_response()
	}
}
