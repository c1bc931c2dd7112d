#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::test_utils::seed_measurement;
    use tower::ServiceExt;

    use crate::helpers::{body_json, get, make_test_app};

    #[tokio::test]
    async fn statistics_on_empty_store() {
        let (app, _db) = make_test_app().await;

        let response = app.oneshot(get("/api/statistics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(json.get("data").is_none());
        let data = &json["statistics"];
        assert_eq!(data["total_measurements"], 0);
        assert_eq!(data["total_water_content_records"], 0);
        assert!(data["latest_measurement"].is_null());
        assert!(data["latest_water_content"].is_null());
        assert_eq!(data["backend_status"], "Running");
    }

    #[tokio::test]
    async fn statistics_after_realtime_poll() {
        let (app, db) = make_test_app().await;
        seed_measurement(&db, 2_400_000_000, -10.0).await;

        let response = app
            .clone()
            .oneshot(get("/api/realtime-water-content"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/api/statistics")).await.unwrap();
        let json = body_json(response).await;
        let data = &json["statistics"];
        assert_eq!(data["total_measurements"], 1);
        assert_eq!(data["total_water_content_records"], 1);
        assert_eq!(data["latest_water_content"], -11.3);
        assert_eq!(data["latest_measurement"]["return_loss_db"], -10.0);
    }
}
