//! End-to-end tests of the API client, the collector and the downloader
//! against a local mock server.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

use weibo_pictures::config::Config;
use weibo_pictures::download::{collect_picture_urls, download_with_progress, StopReason};
use weibo_pictures::fs::write_url_list;
use weibo_pictures::{Error, WeiboApi};

const UID: &str = "1669879400";
const TOKEN: &str = "_2A25Ptesttoken";
const USER_AGENT: &str = "weibo-pictures-tests/1.0";

fn test_config() -> Config {
    let mut config = Config::default();
    config.account.user_id = UID.to_string();
    config.account.session_token = TOKEN.to_string();
    config.options.interval_ms = 0;
    config
}

fn api(server: &MockServer) -> WeiboApi {
    WeiboApi::with_base_url(&server.uri(), TOKEN.to_string(), USER_AGENT).unwrap()
}

fn feed_page(page: u32) -> MockBuilder {
    Mock::given(method("GET"))
        .and(path("/api/container/getIndex"))
        .and(query_param("type", "uid"))
        .and(query_param("containerid", format!("107603{}", UID).as_str()))
        .and(query_param("page", page.to_string().as_str()))
        .and(query_param("count", "20"))
}

#[tokio::test]
async fn two_page_walk_writes_single_url() {
    let server = MockServer::start().await;

    feed_page(1)
        .and(header("cookie", format!("SUB={}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": 1,
            "data": { "cards": [{
                "card_type": 9,
                "mblog": { "pics": [
                    { "pid": "a", "large": { "url": "https://wx1.sinaimg.cn/large/a.jpg" } },
                    { "pid": "b", "large": { "url": "https://video.example.com/thumb/b.jpg" } },
                ]}
            }]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    feed_page(2)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": 0,
            "msg": "这里还没有内容",
            "data": { "cards": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = collect_picture_urls(&api(&server), &test_config()).await;

    assert_eq!(outcome.pages_fetched, 2);
    assert!(matches!(outcome.stop_reason, StopReason::Rejected { ok: 0, .. }));
    assert_eq!(outcome.urls.len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let list = write_url_list(dir.path(), UID, &outcome.urls).unwrap();
    assert_eq!(list.file_name().unwrap(), "weibo-1669879400.txt");
    assert_eq!(
        std::fs::read_to_string(list).unwrap(),
        "https://wx1.sinaimg.cn/large/a.jpg\n"
    );
}

#[tokio::test]
async fn retweeted_keyed_pictures_are_collected() {
    let server = MockServer::start().await;

    feed_page(1)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": 1,
            "data": { "cards": [
                {
                    "card_type": 9,
                    "mblog": { "pics": { "0": { "large": { "url": "https://wx2.sinaimg.cn/large/own.jpg" } } } }
                },
                {
                    "card_type": 9,
                    "mblog": {
                        "text": "repost",
                        "retweeted_status": {
                            "pics": {
                                "0": { "large": { "url": "https://wx3.sinaimg.cn/large/shared0.jpg" } },
                                "1": { "large": { "url": "https://wx4.sinaimg.cn/large/shared1.jpg" } }
                            }
                        }
                    }
                }
            ]}
        })))
        .mount(&server)
        .await;

    let mut config = test_config();
    config.options.page_limit = Some(1);
    let outcome = collect_picture_urls(&api(&server), &config).await;

    assert_eq!(outcome.stop_reason, StopReason::PageLimit(1));
    assert_eq!(
        outcome.urls.into_vec(),
        vec![
            "https://wx2.sinaimg.cn/large/own.jpg",
            "https://wx3.sinaimg.cn/large/shared0.jpg",
            "https://wx4.sinaimg.cn/large/shared1.jpg",
        ]
    );
}

#[tokio::test]
async fn server_error_stops_the_walk() {
    let server = MockServer::start().await;

    feed_page(1)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": 1,
            "data": { "cards": [{
                "card_type": 9,
                "mblog": { "pics": [{ "large": { "url": "https://wx1.sinaimg.cn/large/a.jpg" } }] }
            }]}
        })))
        .mount(&server)
        .await;

    feed_page(2)
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = collect_picture_urls(&api(&server), &test_config()).await;

    assert_eq!(outcome.pages_fetched, 2);
    assert_eq!(outcome.urls.len(), 1);
    assert!(matches!(outcome.stop_reason, StopReason::FetchFailed(_)));
}

#[tokio::test]
async fn non_json_body_is_a_fetch_error() {
    let server = MockServer::start().await;

    feed_page(1)
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let result = api(&server).fetch_page(UID, 1, 20).await;
    assert!(matches!(result, Err(Error::Json(_))));
}

#[tokio::test]
async fn user_info_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/container/getIndex"))
        .and(query_param("type", "uid"))
        .and(query_param("value", UID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": 1,
            "data": { "userInfo": {
                "id": 1669879400u64,
                "screen_name": "someone",
                "verified_reason": "",
                "description": "hello",
                "statuses_count": 120,
                "follow_count": 5,
                "followers_count": "3万"
            }}
        })))
        .mount(&server)
        .await;

    let info = api(&server).get_user_info(UID).await.unwrap();
    assert_eq!(info.id, 1669879400);
    assert_eq!(info.screen_name, "someone");
    assert_eq!(info.followers_count.unwrap().to_string(), "3万");
}

#[tokio::test]
async fn user_info_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/container/getIndex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": 0 })))
        .mount(&server)
        .await;

    let result = api(&server).get_user_info("1").await;
    assert!(matches!(result, Err(Error::AccountNotFound(_))));
}

#[tokio::test]
async fn download_uses_resolved_url_for_filename() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/large/original.jpg"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", format!("{}/mirror/resolved.jpg", server.uri())),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/mirror/resolved.jpg"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/large/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let urls = vec![
        format!("{}/large/original.jpg", server.uri()),
        format!("{}/large/missing.jpg", server.uri()),
    ];

    let summary =
        download_with_progress(Arc::new(api(&server)), urls, dir.path(), 2, false).await;

    assert_eq!(summary.saved, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.bytes_written, 4);
    assert_eq!(
        std::fs::read(dir.path().join("resolved.jpg")).unwrap(),
        vec![0xFF, 0xD8, 0xFF, 0xE0]
    );
    assert!(!dir.path().join("original.jpg").exists());
    assert!(!dir.path().join("missing.jpg").exists());
}

#[tokio::test]
async fn user_info_unparsable_cjk_body_is_an_api_error() {
    let server = MockServer::start().await;

    let body = format!("x{}", "中".repeat(300));
    Mock::given(method("GET"))
        .and(path("/api/container/getIndex"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let result = api(&server).get_user_info("1").await;
    assert!(matches!(result, Err(Error::Api(_))));
}
