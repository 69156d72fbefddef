use std::time::Duration;

use pretty_assertions::assert_eq;
use roster_core::{PageMeta, PageRequest, PageResult, PAGE_SIZE};
use roster_engine::{FailureKind, HttpPageSource, HttpSettings, PageSource};
use serde::Deserialize;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Hero {
    id: u32,
    name: String,
}

fn settings_for(server: &MockServer) -> HttpSettings {
    HttpSettings {
        base_url: format!("{}/api/characters", server.uri()),
        ..HttpSettings::default()
    }
}

fn request(page: u32, query: &str) -> PageRequest {
    PageRequest {
        page,
        page_size: PAGE_SIZE,
        query: query.to_string(),
    }
}

fn hero(id: u32, name: &str) -> Hero {
    Hero {
        id,
        name: name.to_string(),
    }
}

#[tokio::test]
async fn paginated_response_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/characters"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("name"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"items":[{"id":11,"name":"Gohan"}],"meta":{"currentPage":2,"totalPages":6}}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpPageSource::<Hero>::new(settings_for(&server)).expect("client");
    let result = source.fetch_page(&request(2, "")).await.expect("fetch ok");

    assert_eq!(
        result,
        PageResult::Paginated {
            items: vec![hero(11, "Gohan")],
            meta: PageMeta {
                current_page: 2,
                total_pages: 6,
                total_items: None,
            },
        }
    );
}

#[tokio::test]
async fn search_sends_name_and_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/characters"))
        .and(query_param("name", "goku"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"id":1,"name":"Goku"}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let source = HttpPageSource::<Hero>::new(settings_for(&server)).expect("client");
    let result = source.fetch_page(&request(1, "goku")).await.expect("fetch ok");

    assert_eq!(result, PageResult::Unpaginated(vec![hero(1, "Goku")]));
}

#[tokio::test]
async fn empty_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let source = HttpPageSource::<Hero>::new(settings_for(&server)).expect("client");
    let result = source.fetch_page(&request(1, "")).await.expect("fetch ok");

    assert_eq!(result, PageResult::Malformed);
}

#[tokio::test]
async fn http_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpPageSource::<Hero>::new(settings_for(&server)).expect("client");
    let err = source.fetch_page(&request(1, "")).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn invalid_json_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{oops", "application/json"))
        .mount(&server)
        .await;

    let source = HttpPageSource::<Hero>::new(settings_for(&server)).expect("client");
    let err = source.fetch_page(&request(1, "")).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("[]"),
        )
        .mount(&server)
        .await;

    let settings = HttpSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let source = HttpPageSource::<Hero>::new(settings).expect("client");
    let err = source.fetch_page(&request(1, "")).await.unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string("[1,2,3,4,5]"),
        )
        .mount(&server)
        .await;

    let settings = HttpSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let source = HttpPageSource::<u32>::new(settings).expect("client");
    let err = source.fetch_page(&request(1, "")).await.unwrap_err();

    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[test]
fn unparsable_base_url_is_rejected() {
    let settings = HttpSettings {
        base_url: "not a url".to_string(),
        ..HttpSettings::default()
    };
    let source = HttpPageSource::<Hero>::new(settings).expect("client");
    let err = source.request_url(&request(1, "")).unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[test]
fn request_url_encodes_query() {
    let source = HttpPageSource::<Hero>::new(HttpSettings {
        base_url: "https://example.com/api/characters".to_string(),
        ..HttpSettings::default()
    })
    .expect("client");

    let url = source.request_url(&request(3, "Master Roshi")).unwrap();
    assert_eq!(
        url.as_str(),
        "https://example.com/api/characters?page=3&limit=10&name=Master+Roshi"
    );
}
