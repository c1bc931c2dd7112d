#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use db::test_utils::seed_measurement;
    use tower::ServiceExt;

    use crate::helpers::{body_json, get, make_test_app};

    #[tokio::test]
    async fn latest_return_loss_404_when_empty() {
        let (app, _db) = make_test_app().await;

        let response = app.oneshot(get("/api/latest-return-loss")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["error"], "No measurement data found");
        assert_eq!(json["message"], "Database appears to be empty");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn latest_return_loss_projects_newest_row() {
        let (app, db) = make_test_app().await;
        seed_measurement(&db, 2_400_000_000, -12.0).await;
        let newest = seed_measurement(&db, 2_450_000_000, -18.5).await;

        let response = app.oneshot(get("/api/latest-return-loss")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], newest.id);
        assert_eq!(json["data"]["frequency"], 2_450_000_000i64);
        assert_eq!(json["data"]["return_loss_db"], -18.5);
        assert_eq!(json["data"]["session_id"], "test-session");
        assert!(json["data"]["timestamp"].is_string());
        assert!(json["data"].get("s11_magnitude").is_none());
    }

    #[tokio::test]
    async fn list_measurements_respects_limit() {
        let (app, db) = make_test_app().await;
        for i in 0..5 {
            seed_measurement(&db, 2_400_000_000 + i, -10.0 - i as f64).await;
        }

        let response = app
            .clone()
            .oneshot(get("/api/measurements?limit=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let ids: Vec<i64> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] > w[1]));

        let response = app.oneshot(get("/api/measurements?limit=0")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn list_measurements_defaults_and_caps() {
        let (app, db) = make_test_app().await;
        for i in 0..12 {
            seed_measurement(&db, 2_400_000_000, -10.0 - i as f64).await;
        }

        for (uri, expected) in [
            ("/api/measurements", 10),
            ("/api/measurements?limit=xyz", 10),
            ("/api/measurements?limit=500", 12),
        ] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let json = body_json(response).await;
            assert_eq!(json["data"].as_array().unwrap().len(), expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn measurement_by_id() {
        let (app, db) = make_test_app().await;
        let m = seed_measurement(&db, 2_400_000_000, -15.0).await;

        let response = app
            .clone()
            .oneshot(get(&format!("/api/measurements/{}", m.id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["data"]["return_loss_db"], -15.0);

        let response = app.oneshot(get("/api/measurements/9999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Measurement 9999 not found");
    }
}
