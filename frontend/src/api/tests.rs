#![cfg(not(coverage))]

use super::test_support::mock::*;
use super::*;
use chrono::NaiveDate;
use serde_json::json;

fn session() -> Session {
    Session {
        access_token: Some("token-123".into()),
        user: Some(UserResponse {
            id: 3,
            username: "ana".into(),
            full_name: "Ana Pérez".into(),
            role: "admin".into(),
            company: Some("acme".into()),
        }),
        selected_company: None,
    }
}

fn vacation_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": 3,
        "employee_name": "Ana Pérez",
        "start_date": "2024-03-01",
        "end_date": "2024-03-03",
        "reason": "family",
        "absence_type": "VACATION",
        "status": status,
        "requested_at": "2024-02-20T09:00:00",
        "reviewed_by": null,
        "reviewed_at": null,
        "admin_response": null
    })
}

fn api_client(server: &MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/api")).with_session(session())
}

#[tokio::test]
async fn list_vacations_sends_auth_and_tenant_headers() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/vacations/")
            .header("authorization", "Bearer token-123")
            .header("x-company", "acme");
        then.status(200)
            .json_body(json!([vacation_json(1, "PENDING"), vacation_json(2, "APPROVED")]));
    });

    let records = api_client(&server)
        .list_vacations(&VacationListQuery::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].status, "APPROVED");
}

#[tokio::test]
async fn list_vacations_forwards_filters() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/vacations/")
            .query_param("status", "REJECTED")
            .query_param("year", "2024");
        then.status(200).json_body(json!([vacation_json(5, "REJECTED")]));
    });

    let records = api_client(&server)
        .list_vacations(&VacationListQuery {
            status: Some("rejected".into()),
            user_id: None,
            year: Some(2024),
        })
        .await
        .unwrap();
    assert_eq!(records[0].id, 5);
}

#[tokio::test]
async fn create_vacation_posts_plain_dates() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/vacations/");
        then.status(201).json_body(vacation_json(9, "PENDING"));
    });

    let created = api_client(&server)
        .create_vacation(&CreateVacationRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 3).unwrap(),
            reason: "family".into(),
            absence_type: Some("vacation".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 9);

    let sent = server.received();
    let body = sent[0].body.clone().unwrap();
    assert_eq!(body["start_date"], "2024-03-01");
    assert_eq!(body["end_date"], "2024-03-03");
    assert_eq!(body["absence_type"], "vacation");
}

#[tokio::test]
async fn status_update_uses_uppercase_query() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(PUT)
            .path("/api/vacations/4/status")
            .query_param("status", "APPROVED")
            .query_param("admin_response", "enjoy");
        then.status(200).json_body(vacation_json(4, "APPROVED"));
    });

    api_client(&server)
        .update_vacation_status(4, "approved", Some("enjoy"))
        .await
        .unwrap();
    assert_eq!(server.hits(PUT, "/api/vacations/4/status"), 1);
}

#[tokio::test]
async fn update_and_delete_vacation_succeed() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(PUT).path("/api/vacations/4");
        then.status(200).json_body(vacation_json(4, "PENDING"));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/vacations/4");
        then.status(204).json_body(json!(null));
    });

    let client = api_client(&server);
    let updated = client
        .update_vacation(
            4,
            &UpdateVacationRequest {
                reason: Some("changed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, 4);
    client.delete_vacation(4).await.unwrap();
}

#[tokio::test]
async fn usage_and_stats_parse() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/vacations/usage")
            .query_param("user_id", "3")
            .query_param("year", "2024");
        then.status(200)
            .json_body(json!({ "approved_days_used": 4, "pending_days_requested": 2 }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/vacations/stats");
        then.status(200)
            .json_body(json!({ "total_requests": 10, "pending": 2, "approved": 7, "rejected": 1 }));
    });

    let client = api_client(&server);
    let usage = client
        .get_vacation_usage(Some(3), Some(2024), None)
        .await
        .unwrap();
    assert_eq!(usage.approved_days_used, 4);
    assert_eq!(usage.pending_days_requested, 2);

    let stats = client.get_vacation_stats(Some(2024)).await.unwrap();
    assert_eq!(stats.approved, 7);
    assert_eq!(stats.total_days_approved, 0);
}

#[tokio::test]
async fn search_users_sends_term() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/users/")
            .query_param("search", "ana");
        then.status(200)
            .json_body(json!([{ "id": 3, "username": "ana", "full_name": "Ana Pérez" }]));
    });

    let users = api_client(&server).search_users(" ana ").await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].display_name(), "Ana Pérez");
}

#[tokio::test]
async fn server_detail_is_surfaced_on_failure() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/vacations/");
        then.status(400)
            .json_body(json!({ "detail": "Ya existe una solicitud en esas fechas" }));
    });

    let err = api_client(&server)
        .create_vacation(&CreateVacationRequest {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            reason: "x".into(),
            absence_type: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.error, "Ya existe una solicitud en esas fechas");
    assert_eq!(err.code, "HTTP_400");
}

#[tokio::test]
async fn unauthorized_response_maps_to_session_error() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path("/api/vacations/stats");
        then.status(401).json_body(json!({ "detail": "expired" }));
    });

    let err = api_client(&server).get_vacation_stats(None).await.unwrap_err();
    assert_eq!(err.code, "UNAUTHORIZED");
}

#[tokio::test]
async fn missing_token_fails_before_network() {
    let server = MockServer::start_async().await;
    let client = ApiClient::new_with_base_url(server.url("/api")).with_session(Session::default());

    let err = client.get_vacation_stats(None).await.unwrap_err();
    assert_eq!(err.code, "UNAUTHORIZED");
    assert!(server.received().is_empty());
}
