//! HTTP 接口集成测试

use crate::helpers::{build_in_memory, build_services, alerting_config};
use crate::mocks::{FailingStore, RecordingNotifier};
use actix_web::{http::StatusCode, test, web, App};
use floodguard::handlers::SimulatorFlag;
use floodguard::middleware::RequestLogger;
use floodguard::routes;
use floodguard::services::{ThresholdService, WaterLevelService};
use serde_json::{json, Value};
use std::sync::Arc;

macro_rules! test_app {
    ($thresholds:expr, $water_level:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestLogger::new())
                .app_data(web::Data::new($thresholds))
                .app_data(web::Data::new($water_level))
                .app_data(web::Data::new(SimulatorFlag(false)))
                .configure(routes::configure),
        )
        .await
    };
}

fn services() -> (Arc<ThresholdService>, Arc<WaterLevelService>) {
    build_in_memory(Arc::new(RecordingNotifier::new()))
}

mod ingestion {
    use super::*;

    #[actix_web::test]
    async fn test_report_is_acknowledged() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level.clone());

        let req = test::TestRequest::post()
            .uri("/api/iot/water-level")
            .set_json(json!({
                "device_id": "tank-001",
                "water_level_percent": 85.0,
                "water_level_cm": 170.0,
                "latitude": 10.762622,
                "longitude": 106.660172
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("tank-001"));
        assert!(message.contains("HIGH"));

        let snapshot = water_level.get_latest("tank-001").await.unwrap();
        assert_eq!(snapshot.cm, 170.0);
        assert_eq!(snapshot.lat, Some(10.762622));
    }

    #[actix_web::test]
    async fn test_root_alias_accepts_reports() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::post()
            .uri("/water-level")
            .set_json(json!({ "water_level_percent": 5.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("unknown_device"));
    }

    #[actix_web::test]
    async fn test_empty_device_id_is_accepted() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level.clone());

        let req = test::TestRequest::post()
            .uri("/api/iot/water-level")
            .set_json(json!({ "device_id": "", "water_level_percent": 42.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(water_level.get_latest("unknown_device").await.is_ok());
    }

    #[actix_web::test]
    async fn test_out_of_range_latitude_is_rejected() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::post()
            .uri("/api/iot/water-level")
            .set_json(json!({ "device_id": "tank-001", "water_level_percent": 40.0, "latitude": 120.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_malformed_body_is_rejected() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::post()
            .uri("/api/iot/water-level")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"water_level_percent\": \"high\"}")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_store_failure_returns_500() {
        let (thresholds, water_level) = build_services(
            Arc::new(FailingStore),
            Arc::new(RecordingNotifier::new()),
            alerting_config(),
        );
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::post()
            .uri("/api/iot/water-level")
            .set_json(json!({ "device_id": "tank-001", "water_level_percent": 40.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_get_returns_banner() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::get().uri("/api/iot/water-level").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert!(String::from_utf8_lossy(&body).contains("IoT Server is Running"));
    }

    #[actix_web::test]
    async fn test_request_id_is_echoed() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header(("X-Request-ID", "req-42"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-42");

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.headers().contains_key("x-request-id"));
    }
}

mod config_api {
    use super::*;

    #[actix_web::test]
    async fn test_get_and_update_thresholds() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds.clone(), water_level);

        let req = test::TestRequest::get().uri("/api/v1/config").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["min_threshold"], 10.0);
        assert_eq!(body["data"]["max_threshold"], 80.0);

        let req = test::TestRequest::put()
            .uri("/api/v1/config")
            .set_json(json!({ "min_threshold": 20.0, "max_threshold": 60.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let current = thresholds.current().await;
        assert_eq!(current.min_threshold, 20.0);
        assert_eq!(current.max_threshold, 60.0);
    }

    #[actix_web::test]
    async fn test_inverted_thresholds_rejected() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds.clone(), water_level);

        let req = test::TestRequest::put()
            .uri("/api/v1/config")
            .set_json(json!({ "min_threshold": 70.0, "max_threshold": 30.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(thresholds.current().await.min_threshold, 10.0);
    }

    #[actix_web::test]
    async fn test_new_thresholds_apply_to_next_report() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level.clone());

        let req = test::TestRequest::put()
            .uri("/api/v1/config")
            .set_json(json!({ "max_threshold": 50.0 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/iot/water-level")
            .set_json(json!({ "device_id": "river-002", "water_level_percent": 55.0 }))
            .to_request();
        test::call_service(&app, req).await;

        let snapshot = water_level.get_latest("river-002").await.unwrap();
        assert_eq!(snapshot.status.to_string(), "HIGH");
    }
}

mod devices_api {
    use super::*;

    #[actix_web::test]
    async fn test_registry_is_listed() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::get().uri("/api/v1/devices").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["tank-001", "river-002", "sewer-003"]);
    }

    #[actix_web::test]
    async fn test_latest_and_history() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::get()
            .uri("/api/v1/devices/tank-001/latest")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        for percent in [30.0, 95.0] {
            let req = test::TestRequest::post()
                .uri("/api/iot/water-level")
                .set_json(json!({ "device_id": "tank-001", "water_level_percent": percent }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get()
            .uri("/api/v1/devices/tank-001/latest")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["percent"], 95.0);
        assert_eq!(body["data"]["status"], "CRITICAL");

        let req = test::TestRequest::get()
            .uri("/api/v1/devices/tank-001/history?limit=1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let history = body["data"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["deviceId"], "tank-001");
        assert_eq!(history[0]["level"], 95.0);

        let req = test::TestRequest::get().uri("/api/v1/devices/latest").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_history_for_unknown_device_is_not_found() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::get()
            .uri("/api/v1/devices/nowhere/history")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/v1/devices/sewer-003/history")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_distance_conversion() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::post()
            .uri("/api/v1/calibration/convert")
            .set_json(json!({ "distance_cm": 110.0 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["percent"], 50);
        assert_eq!(body["data"]["available"], true);

        let req = test::TestRequest::post()
            .uri("/api/v1/calibration/convert")
            .set_json(json!({ "distance_cm": 0.0 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["percent"], 0);
        assert_eq!(body["data"]["available"], false);
    }
}

mod health_api {
    use super::*;

    #[actix_web::test]
    async fn test_health_endpoints() {
        let (thresholds, water_level) = services();
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");

        let req = test::TestRequest::get().uri("/health/live").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["alive"], true);

        let req = test::TestRequest::get().uri("/health/detailed").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["store"]["status"], "healthy");
        assert_eq!(body["simulator_enabled"], false);
    }

    #[actix_web::test]
    async fn test_detailed_health_degrades_with_store() {
        let (thresholds, water_level) = build_services(
            Arc::new(FailingStore),
            Arc::new(RecordingNotifier::new()),
            alerting_config(),
        );
        let app = test_app!(thresholds, water_level);

        let req = test::TestRequest::get().uri("/health/detailed").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "degraded");
    }
}
