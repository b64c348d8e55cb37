use std::sync::Arc;

use axum::{
	Router,
	body::{self, Body},
	http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;

use lcr_api::{routes, state::AppState};
use lcr_config::{Config, Postgres, Security, Service, Storage};
use lcr_service::RecordService;
use lcr_testkit::{
	TestDatabase,
	memory::{MemoryCatalog, MemoryRecords},
	seed,
};

const CONTEST: &str = "weekly-contest-400";

fn memory_app() -> (Router, Arc<MemoryRecords>, Arc<MemoryRecords>) {
	let predicted = Arc::new(MemoryRecords::new(vec![
		seed::rated(seed::record(CONTEST, "alice", "US", 1, 18), 2_000.0, 2_050.0),
		seed::rated(seed::record(CONTEST, "bob", "CN", 2, 15), 1_700.0, 1_690.0),
		seed::rated(seed::record(CONTEST, "carol", "US", 3, 12), 1_500.0, 1_540.0),
		seed::record(CONTEST, "dave", "US", 4, 0),
	]));
	let archived = Arc::new(MemoryRecords::new(vec![
		seed::with_real_time_rank(seed::record(CONTEST, "alice", "US", 1, 18), vec![12, 3, 1]),
		seed::with_real_time_rank(
			seed::record(CONTEST, "carol", "US", 2, 15),
			[serde_json::json!(25), Value::Null, serde_json::json!(7.5)],
		),
		seed::record(CONTEST, "erin", "US", 3, 12),
		seed::record(CONTEST, "frank", "CN", 4, 9),
	]));
	let service = RecordService::with_stores(
		Arc::new(MemoryCatalog::new([CONTEST])),
		predicted.clone(),
		archived.clone(),
	);

	(routes::router(AppState::from_service(service)), predicted, archived)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
	let response = app.oneshot(request).await.expect("Failed to call router.");
	let status = response.status();
	let body = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");
	let json = if body.is_empty() {
		Value::Null
	} else {
		serde_json::from_slice(&body).expect("Failed to parse response.")
	};

	(status, json)
}

fn get(uri: &str) -> Request<Body> {
	Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request.")
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri(uri)
		.header("content-type", "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

#[tokio::test]
async fn health_ok() {
	let (app, _, _) = memory_app();
	let (status, _) = send(app, get("/health")).await;

	assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn count_returns_a_bare_integer() {
	let (app, _, _) = memory_app();
	let (status, json) =
		send(app.clone(), get(&format!("/contest-records/count?contest_name={CONTEST}"))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, Value::from(3));

	let (status, json) = send(
		app,
		get(&format!("/contest-records/count?contest_name={CONTEST}&archived=true")),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, Value::from(4));
}

#[tokio::test]
async fn archived_flag_accepts_common_boolean_spellings() {
	let (app, _, _) = memory_app();

	for (flag, expected) in
		[("True", 4), ("1", 4), ("yes", 4), ("ON", 4), ("False", 3), ("0", 3), ("off", 3)]
	{
		let (status, json) = send(
			app.clone(),
			get(&format!("/contest-records/count?contest_name={CONTEST}&archived={flag}")),
		)
		.await;

		assert_eq!(status, StatusCode::OK, "archived={flag}");
		assert_eq!(json, Value::from(expected), "archived={flag}");
	}

	let (status, json) = send(
		app.clone(),
		get(&format!("/contest-records/?contest_name={CONTEST}&archived=True")),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json[0]["real_time_rank"], serde_json::json!([12, 3, 1]));

	let (status, json) = send(
		app.clone(),
		get(&format!("/contest-records/user?contest_name={CONTEST}&username=erin&archived=1")),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json[0]["rank"], 3);

	let (status, json) = send(
		app,
		get(&format!("/contest-records/count?contest_name={CONTEST}&archived=maybe")),
	)
	.await;

	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn archived_listing_keeps_real_time_rank_gaps_and_nulls() {
	let (app, _, _) = memory_app();
	let (status, json) = send(
		app,
		get(&format!("/contest-records/?contest_name={CONTEST}&archived=true")),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json.as_array().map(Vec::len), Some(4));
	assert_eq!(json[1]["real_time_rank"], serde_json::json!([25, null, 7.5]));
	assert_eq!(json[2].get("real_time_rank"), Some(&Value::Null));
}

#[tokio::test]
async fn list_applies_defaults_and_pagination() {
	let (app, _, _) = memory_app();
	let (status, json) =
		send(app.clone(), get(&format!("/contest-records/?contest_name={CONTEST}"))).await;

	assert_eq!(status, StatusCode::OK);

	let ranks = json
		.as_array()
		.expect("Expected an array.")
		.iter()
		.map(|item| item["rank"].as_i64().expect("Expected rank."))
		.collect::<Vec<_>>();

	assert_eq!(ranks, vec![1, 2, 3]);

	let (status, json) = send(
		app,
		get(&format!("/contest-records?contest_name={CONTEST}&skip=1&limit=1")),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json.as_array().map(Vec::len), Some(1));
	assert_eq!(json[0]["username"], "bob");
	assert_eq!(json[0]["delta_rating"], -10.0);
	assert!(json[0].get("real_time_rank").is_none());
}

#[tokio::test]
async fn list_rejects_limit_out_of_range() {
	let (app, predicted, _) = memory_app();

	for limit in [0, 101] {
		let (status, json) = send(
			app.clone(),
			get(&format!("/contest-records/?contest_name={CONTEST}&limit={limit}")),
		)
		.await;

		assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(json["error_code"], "INVALID_REQUEST");
		assert_eq!(json["fields"][0], "limit");
	}

	assert_eq!(predicted.calls(), 0);
}

#[tokio::test]
async fn malformed_query_is_an_invalid_request() {
	let (app, _, _) = memory_app();
	let (status, json) =
		send(app.clone(), get(&format!("/contest-records/?contest_name={CONTEST}&skip=-x"))).await;

	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(json["error_code"], "INVALID_REQUEST");

	let (status, json) = send(app, get("/contest-records/count")).await;

	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn unknown_contest_is_not_found_on_every_endpoint() {
	let (app, predicted, archived) = memory_app();
	let unknown = "weekly-contest-1";
	let requests = [
		get(&format!("/contest-records/count?contest_name={unknown}")),
		get(&format!("/contest-records/?contest_name={unknown}&archived=true")),
		get(&format!("/contest-records/user?contest_name={unknown}&username=alice")),
		post_json(
			"/contest-records/predicted-rating",
			serde_json::json!({
				"contest_name": unknown,
				"users": [{ "username": "alice", "data_region": "US" }]
			}),
		),
		post_json(
			"/contest-records/real-time-rank",
			serde_json::json!({
				"contest_name": unknown,
				"user": { "username": "alice", "data_region": "US" }
			}),
		),
	];

	for request in requests {
		let (status, json) = send(app.clone(), request).await;

		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(json["error_code"], "UNKNOWN_CONTEST");
	}

	assert_eq!(predicted.calls(), 0);
	assert_eq!(archived.calls(), 0);
}

#[tokio::test]
async fn user_records_are_filtered_by_username() {
	let (app, _, _) = memory_app();
	let (status, json) = send(
		app,
		get(&format!("/contest-records/user?contest_name={CONTEST}&username=carol")),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json.as_array().map(Vec::len), Some(1));
	assert_eq!(json[0]["username"], "carol");
	assert_eq!(json[0]["data_region"], "US");
}

#[tokio::test]
async fn predicted_rating_keeps_positions_for_missing_users() {
	let (app, _, _) = memory_app();
	let payload = serde_json::json!({
		"contest_name": CONTEST,
		"users": [
			{ "username": "alice", "data_region": "US" },
			{ "username": "alice", "data_region": "CN" },
			{ "username": "carol", "data_region": "US" }
		]
	});
	let (status, json) = send(app, post_json("/contest-records/predicted-rating", payload)).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json.as_array().map(Vec::len), Some(3));
	assert_eq!(json[0]["delta_rating"], 50.0);
	assert!(json[1].is_null());
	assert_eq!(json[2]["new_rating"], 1_540.0);
}

#[tokio::test]
async fn predicted_rating_rejects_empty_and_oversized_batches() {
	let (app, predicted, _) = memory_app();
	let oversized = (0..27)
		.map(|ordinal| {
			serde_json::json!({ "username": format!("user{ordinal}"), "data_region": "US" })
		})
		.collect::<Vec<_>>();

	for users in [Vec::new(), oversized] {
		let payload = serde_json::json!({ "contest_name": CONTEST, "users": users });
		let (status, json) =
			send(app.clone(), post_json("/contest-records/predicted-rating", payload)).await;

		assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(json["fields"][0], "users");
	}

	assert_eq!(predicted.calls(), 0);
}

#[tokio::test]
async fn predicted_rating_rejects_malformed_json() {
	let (app, _, _) = memory_app();
	let payload =
		serde_json::json!({ "contest_name": CONTEST, "users": [{ "username": "alice" }] });
	let (status, json) = send(app, post_json("/contest-records/predicted-rating", payload)).await;

	assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(json["error_code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn real_time_rank_is_null_for_absent_users() {
	let (app, _, _) = memory_app();
	let (status, json) = send(
		app.clone(),
		post_json(
			"/contest-records/real-time-rank",
			serde_json::json!({
				"contest_name": CONTEST,
				"user": { "username": "alice", "data_region": "US" }
			}),
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, serde_json::json!({ "real_time_rank": [12, 3, 1] }));

	let (status, json) = send(
		app.clone(),
		post_json(
			"/contest-records/real-time-rank",
			serde_json::json!({
				"contest_name": CONTEST,
				"user": { "username": "erin", "data_region": "US" }
			}),
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, serde_json::json!({ "real_time_rank": null }));

	let (status, json) = send(
		app,
		post_json(
			"/contest-records/real-time-rank",
			serde_json::json!({
				"contest_name": CONTEST,
				"user": { "username": "bob", "data_region": "CN" }
			}),
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert!(json.is_null());
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set LCR_PG_DSN to run."]
async fn postgres_backed_router_serves_records() {
	let Some(base_dsn) = lcr_testkit::env_dsn() else {
		eprintln!("Skipping HTTP tests; set LCR_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let config = Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 2 },
		},
		security: Security { bind_localhost_only: true },
	};
	let state = AppState::new(&config).await.expect("Failed to initialize app state.");
	let db = test_db.connect().await.expect("Failed to connect to test database.");
	let pool = &db.pool;

	seed::insert_contest(pool, CONTEST).await.expect("Failed to insert contest.");
	seed::insert_predicted(pool, &seed::record(CONTEST, "alice", "US", 1, 18))
		.await
		.expect("Failed to insert record.");
	seed::insert_predicted(pool, &seed::record(CONTEST, "bob", "US", 2, 0))
		.await
		.expect("Failed to insert record.");

	let app = routes::router(state);
	let (status, json) =
		send(app.clone(), get(&format!("/contest-records/count?contest_name={CONTEST}"))).await;

	assert_eq!(status, StatusCode::OK);
	assert_eq!(json, Value::from(1));

	let (status, json) = send(
		app,
		post_json(
			"/contest-records/real-time-rank",
			serde_json::json!({
				"contest_name": CONTEST,
				"user": { "username": "alice", "data_region": "US" }
			}),
		),
	)
	.await;

	assert_eq!(status, StatusCode::OK);
	assert!(json.is_null());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

