#![cfg(feature = "http_api")]

use std::time::Duration;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::util::ServiceExt;
use vop_calendar::{Exporter, HolidayTable, SprintTable, http_api};

fn new_state() -> http_api::AppState {
    http_api::AppState::new(
        SprintTable::h1_2026().unwrap(),
        HolidayTable::default(),
        Exporter::default(),
        Duration::from_secs(3),
    )
}

async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = http_api::router(new_state());
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn sprints_lists_all_sections_in_order() {
    let app = http_api::router(new_state());
    let response = get(&app, "/sprints").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 14);
    assert_eq!(ids.first(), Some(&"PRE"));
    assert_eq!(ids.last(), Some(&"S13"));
}

#[tokio::test]
async fn single_sprint_marks_qingming_holiday() {
    let app = http_api::router(new_state());
    let response = get(&app, "/sprints/s7").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "S7");
    let day6 = body["weeks"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|w| w.as_array().unwrap().iter())
        .find(|d| d["day"] == 6)
        .unwrap()
        .clone();
    assert_eq!(day6["classification"], "holiday");
}

#[tokio::test]
async fn unknown_sprint_is_not_found() {
    let app = http_api::router(new_state());
    let response = get(&app, "/sprints/S99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
    assert_eq!(body["message"], "sprint S99 not found");
}

#[tokio::test]
async fn holiday_lookup_and_listing() {
    let app = http_api::router(new_state());

    let body = body_json(get(&app, "/holidays/2026-01-01").await).await;
    assert_eq!(body["holiday"], true);

    let body = body_json(get(&app, "/holidays/2026-01-02").await).await;
    assert_eq!(body["holiday"], false);

    let response = get(&app, "/holidays/2026-02-30").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(get(&app, "/holidays").await).await;
    assert_eq!(body.as_array().unwrap().len(), 19);
    assert_eq!(body[0], "2026-01-01");
}

#[tokio::test]
async fn calendar_page_renders_sections_and_host() {
    let app = http_api::router(new_state().with_fallback_host("fallback.local"));
    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("VOP 定制项目"));
    assert!(html.contains("sprint-S13"));
    assert!(html.contains("fallback.local"));
    assert!(html.contains("一键下载备份"));
}

#[tokio::test]
async fn json_export_is_an_attachment_with_request_host() {
    let state = new_state();
    let app = http_api::router(state.clone());
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/export?format=json")
                .header(header::HOST, "vop.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"VOP_H1_Config.json\""
    );
    let body = body_json(response).await;
    assert_eq!(body["host"], "vop.example.com");
    assert_eq!(body["version"], "2.0");

    let status = body_json(get(&app, "/export/status").await).await;
    assert_eq!(status["state"], "exporting");
    assert_eq!(status["reset_after_ms"], 3000);
}

#[tokio::test]
async fn text_export_uses_dated_file_name() {
    let app = http_api::router(new_state());
    let response = get(&app, "/export?format=text").await;
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("VOP_Calendar_Backup_"));
    assert!(disposition.ends_with(".txt\""));
    let text = body_text(response).await;
    assert!(text.starts_with("=== VOP 2026 H1 PROJECT BACKUP ==="));
}

#[tokio::test]
async fn unknown_export_format_is_rejected() {
    let state = new_state();
    let app = http_api::router(state.clone());
    let response = get(&app, "/export?format=pdf").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid_request");
    assert_eq!(state.export_state(), vop_calendar::ExportState::Idle);
}

#[tokio::test(start_paused = true)]
async fn export_indicator_resets_after_delay() {
    let state = new_state();
    let app = http_api::router(state.clone());

    let response = get(&app, "/export").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.export_state(), vop_calendar::ExportState::Exporting);

    let html = body_text(get(&app, "/").await).await;
    assert!(html.contains(r#"id="export-link" class="done""#));

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(state.export_state(), vop_calendar::ExportState::Idle);
}

#[tokio::test(start_paused = true)]
async fn second_export_rearms_the_reset() {
    let state = new_state();
    let app = http_api::router(state.clone());

    get(&app, "/export").await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    get(&app, "/export").await;

    // First timer fires at 3s but its ticket is stale.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(state.export_state(), vop_calendar::ExportState::Exporting);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(state.export_state(), vop_calendar::ExportState::Idle);
}

#[tokio::test]
async fn calendar_page_flips_export_caption_in_the_browser() {
    let app = http_api::router(new_state());
    let html = body_text(get(&app, "/").await).await;

    assert!(html.contains(r#"id="export-link" class="idle""#));
    assert!(html.contains(r#"data-reset-after="3000""#));
    assert!(html.contains(r#"data-idle-caption="一键下载备份""#));
    assert!(html.contains(r#"data-done-caption="已保存备份文件""#));
    assert!(html.contains("<script>"));
    assert!(html.contains("fetch(link.href)"));
    assert!(html.contains("setTimeout(function () { setExporting(false); }, delay)"));
}

#[tokio::test]
async fn calendar_page_uses_configured_reset_delay() {
    let state = http_api::AppState::new(
        SprintTable::h1_2026().unwrap(),
        HolidayTable::default(),
        Exporter::default(),
        Duration::from_secs(2),
    );
    let html = body_text(get(&http_api::router(state), "/").await).await;
    assert!(html.contains(r#"data-reset-after="2000""#));
}

#[tokio::test]
async fn calendar_page_carries_download_notice_and_footer_hint() {
    let app = http_api::router(new_state());
    let html = body_text(get(&app, "/").await).await;
    assert!(html.contains(r#"id="export-notice" role="status" hidden"#));
    assert!(html.contains("无法下载备份文件，日历本身不受影响。"));
    assert!(html.contains("防止丢失：点击右下角按钮下载备份文件"));
}

#[test]
fn unsendable_file_name_is_download_unavailable() {
    let file = vop_calendar::BackupFile {
        file_name: "bad\nname.json".to_string(),
        content_type: "application/json",
        contents: "{}".to_string(),
    };
    match http_api::content_disposition(&file) {
        Err(err @ vop_calendar::ExportError::DownloadUnavailable { .. }) => {
            assert!(err.notice().contains("could not be saved"));
        }
        other => panic!("expected DownloadUnavailable, got {other:?}"),
    }

    let ok = vop_calendar::BackupFile {
        file_name: "VOP_H1_Config.json".to_string(),
        ..file
    };
    assert_eq!(
        http_api::content_disposition(&ok).unwrap(),
        "attachment; filename=\"VOP_H1_Config.json\""
    );
}
