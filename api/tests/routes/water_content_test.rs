#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use db::models::water_content::{
        HistoryEntry, Model as WaterContent, NewWaterContent,
    };
    use db::repositories::{
        MeasurementRepository, WaterContentRepository, WaterContentStore,
    };
    use db::test_utils::{seed_measurement, setup_test_db};
    use sea_orm::DbErr;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::helpers::{body_json, get, make_test_app, test_settings};
    use api::{app, state::AppState};

    fn post_save(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/save-water-content")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Real store whose inserts always fail.
    struct FailingInserts(WaterContentRepository);

    #[async_trait]
    impl WaterContentStore for FailingInserts {
        async fn exists_for_measurement(&self, measurement_id: i64) -> Result<bool, DbErr> {
            self.0.exists_for_measurement(measurement_id).await
        }

        async fn insert(&self, _record: NewWaterContent) -> Result<WaterContent, DbErr> {
            Err(DbErr::Custom("disk full".into()))
        }

        async fn by_measurement(&self, measurement_id: i64) -> Result<Vec<WaterContent>, DbErr> {
            self.0.by_measurement(measurement_id).await
        }

        async fn history(&self, limit: u64) -> Result<Vec<HistoryEntry>, DbErr> {
            self.0.history(limit).await
        }

        async fn count(&self) -> Result<u64, DbErr> {
            self.0.count().await
        }
    }

    #[tokio::test]
    async fn calculate_404_when_no_measurements() {
        let (app, _db) = make_test_app().await;

        let response = app
            .oneshot(get("/api/calculate-water-content"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "No measurement data found");
    }

    #[tokio::test]
    async fn calculate_never_persists() {
        let (app, db) = make_test_app().await;
        let m = seed_measurement(&db, 2_400_000_000, -10.0).await;

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(get("/api/calculate-water-content"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let json = body_json(response).await;
            let data = &json["data"];
            assert_eq!(data["measurement_id"], m.id);
            assert_eq!(data["water_content_percent"], -11.3);
            assert_eq!(data["frequency_ghz"], "2.400");
            assert_eq!(data["is_new_calculation"], true);
            assert_eq!(data["should_save"], true);
        }

        let records = WaterContentRepository::new(db).count().await.unwrap();
        assert_eq!(records, 0);
    }

    #[tokio::test]
    async fn realtime_processes_a_measurement_once() {
        let (app, db) = make_test_app().await;
        seed_measurement(&db, 2_400_000_000, -15.0).await;

        let first = body_json(
            app.clone()
                .oneshot(get("/api/realtime-water-content"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(first["success"], true);
        assert_eq!(first["realtime"], true);
        assert_eq!(first["data"]["is_new_calculation"], true);
        assert_eq!(first["data"]["auto_saved"], true);
        assert!(first["data"]["water_content_id"].is_i64());
        assert_eq!(first["data"]["water_content_percent"], -10.51);
        assert!(
            first["data"]["calculation_details"]["formula"]
                .as_str()
                .unwrap()
                .contains("0.0054")
        );

        let second = body_json(
            app.oneshot(get("/api/realtime-water-content"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(second["data"]["is_new_calculation"], false);
        assert_eq!(second["data"]["already_processed"], true);
        assert_eq!(second["data"]["auto_saved"], false);
        assert_eq!(second["data"]["save_skipped"], true);
        assert_eq!(second["data"]["save_reason"], "Already processed");
        assert_eq!(second["data"]["water_content_percent"], -10.51);
        assert_eq!(second["message"], "Measurement already processed");

        let records = WaterContentRepository::new(db).count().await.unwrap();
        assert_eq!(records, 1);
    }

    #[tokio::test]
    async fn save_stores_notes_then_skips() {
        let (app, db) = make_test_app().await;
        let m = seed_measurement(&db, 2_400_000_000, -12.0).await;

        let response = app
            .clone()
            .oneshot(post_save(r#"{"notes":"bench run"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Water content saved successfully");
        assert_eq!(json["data"]["auto_saved"], true);

        let stored = WaterContentRepository::new(db.clone())
            .by_measurement(m.id)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].notes.as_deref(), Some("bench run"));

        let json = body_json(app.oneshot(post_save("")).await.unwrap()).await;
        assert_eq!(json["data"]["save_skipped"], true);
        assert_eq!(
            json["message"],
            "Water content already saved for this measurement"
        );
    }

    #[tokio::test]
    async fn save_without_body_uses_default_notes() {
        let (app, db) = make_test_app().await;
        let m = seed_measurement(&db, 2_400_000_000, -12.0).await;

        let req = Request::builder()
            .method("POST")
            .uri("/api/save-water-content")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stored = WaterContentRepository::new(db)
            .by_measurement(m.id)
            .await
            .unwrap();
        assert_eq!(
            stored[0].notes.as_deref(),
            Some("Calculated from measurement at 2.400 GHz")
        );
    }

    #[tokio::test]
    async fn save_rejects_oversized_notes() {
        let (app, db) = make_test_app().await;
        seed_measurement(&db, 2_400_000_000, -12.0).await;

        let body = format!(r#"{{"notes":"{}"}}"#, "n".repeat(501));
        let response = app.oneshot(post_save(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["message"],
            "notes must be at most 500 characters"
        );
    }

    #[tokio::test]
    async fn failed_insert_still_returns_the_value() {
        let db = setup_test_db().await;
        seed_measurement(&db, 2_400_000_000, -10.0).await;
        let state = AppState::from_stores(
            Arc::new(MeasurementRepository::new(db.clone())),
            Arc::new(FailingInserts(WaterContentRepository::new(db))),
            test_settings(),
        );

        let response = app(state).oneshot(post_save("{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Water content calculated (save failed)");
        assert_eq!(json["data"]["water_content_percent"], -11.3);
        assert_eq!(json["data"]["auto_saved"], false);
        assert_eq!(json["data"]["save_skipped"], false);
        assert!(json["data"]["save_error"].is_string());
    }

    #[tokio::test]
    async fn history_is_newest_first_and_joined() {
        let (app, db) = make_test_app().await;

        for rl in [-10.0, -12.0, -14.0] {
            seed_measurement(&db, 2_400_000_000, rl).await;
            let response = app
                .clone()
                .oneshot(get("/api/realtime-water-content"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(get("/api/water-content-history?limit=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 2);

        let data = json["data"].as_array().unwrap();
        assert_eq!(data[0]["return_loss_db"], -14.0);
        assert_eq!(data[1]["return_loss_db"], -12.0);
        assert_eq!(
            data[0]["nanovna_measurements"]["frequency"],
            2_400_000_000i64
        );
        assert_eq!(data[0]["nanovna_measurements"]["vswr"], 1.5);
    }

    #[tokio::test]
    async fn history_falls_back_or_caps_unusable_limits() {
        let (app, db) = make_test_app().await;

        for i in 0..12 {
            seed_measurement(&db, 2_400_000_000, -10.0 - i as f64).await;
            let response = app
                .clone()
                .oneshot(get("/api/realtime-water-content"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        for (uri, expected) in [
            ("/api/water-content-history", 10),
            ("/api/water-content-history?limit=0", 10),
            ("/api/water-content-history?limit=-4", 10),
            ("/api/water-content-history?limit=abc", 10),
            ("/api/water-content-history?limit=101", 12),
            ("/api/water-content-history?limit=3", 3),
        ] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");

            let json = body_json(response).await;
            assert_eq!(json["count"], expected, "{uri}");
            assert_eq!(json["data"].as_array().unwrap().len(), expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn history_defaults_to_empty_list() {
        let (app, _db) = make_test_app().await;

        let json = body_json(
            app.oneshot(get("/api/water-content-history"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(json["count"], 0);
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }
}
