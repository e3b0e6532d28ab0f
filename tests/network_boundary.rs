// tests/network_boundary.rs
//! Catalog responses through the boundary adapter and the real HTTP client.

use bookpedia::{
    response_to_result, ApiResponse, BookId, BookWorkDto, ClientConfig, OpenLibraryClient,
    RemoteBookSource, RemoteError, SearchResponseDto, ValidatedUrl,
};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

fn ok(json: &str) -> ApiResponse<String> {
    ApiResponse {
        data: json.to_string(),
        status: StatusCode::OK,
        url: "https://openlibrary.org/test".to_string(),
    }
}

#[test]
fn search_fixture_maps_to_books() {
    let response: SearchResponseDto =
        response_to_result(ok(include_str!("fixtures/search_dune.json"))).unwrap();
    let books = response.into_books();

    assert_eq!(books.len(), 3);

    let dune = &books[0];
    assert_eq!(dune.id.as_str(), "OL893415W");
    assert_eq!(dune.title, "Dune");
    assert_eq!(
        dune.image_url,
        "https://covers.openlibrary.org/b/olid/OL26242482M-L.jpg"
    );
    assert_eq!(dune.authors, vec!["Frank Herbert"]);
    assert_eq!(dune.languages, vec!["eng", "spa", "fre"]);
    assert_eq!(dune.first_publish_year, Some(1965));
    assert_eq!(dune.average_rating, Some(4.25));
    assert_eq!(dune.rating_count, Some(512));
    assert_eq!(dune.num_pages, Some(896));
    assert_eq!(dune.num_editions, 120);
    assert_eq!(dune.description, None);

    // Falls back to the numeric cover id.
    assert_eq!(
        books[1].image_url,
        "https://covers.openlibrary.org/b/id/6976407-L.jpg"
    );

    let bare = &books[2];
    assert_eq!(bare.image_url, "");
    assert!(bare.authors.is_empty());
    assert!(bare.languages.is_empty());
    assert_eq!(bare.num_editions, 0);
}

#[test]
fn work_descriptions_in_both_shapes() {
    let plain: BookWorkDto =
        response_to_result(ok(include_str!("fixtures/work_plain_description.json"))).unwrap();
    assert_eq!(
        plain.description_text().as_deref(),
        Some("Dune Messiah continues the story of Paul Atreides.")
    );

    let typed: BookWorkDto =
        response_to_result(ok(include_str!("fixtures/work_typed_description.json"))).unwrap();
    assert_eq!(
        typed.description_text().as_deref(),
        Some("Set on the desert planet Arrakis.")
    );

    let none: BookWorkDto =
        response_to_result(ok(include_str!("fixtures/work_without_description.json"))).unwrap();
    assert_eq!(none.description_text(), None);
}

#[test]
fn malformed_success_body_is_serialization() {
    let result: Result<SearchResponseDto, _> = response_to_result(ok("<html>maintenance</html>"));
    assert_eq!(result.unwrap_err(), RemoteError::Serialization);
}

/// Serves one canned HTTP response and reports the request line it received.
async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let head = String::from_utf8_lossy(&head).to_string();
        let request_line = head.lines().next().unwrap_or_default().to_string();
        let _ = request_tx.send(request_line);

        let response = format!(
            "HTTP/1.1 {} Status\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    (format!("http://{}", address), request_rx)
}

fn client_for(base_url: &str) -> OpenLibraryClient {
    OpenLibraryClient::new(ClientConfig {
        base_url: ValidatedUrl::parse(base_url).unwrap(),
        request_timeout: Duration::from_secs(5),
        result_limit: Some(7),
        ..ClientConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn client_searches_with_projection_and_limit() {
    let (base_url, request) = serve_once(200, include_str!("fixtures/search_dune.json")).await;
    let client = client_for(&base_url);

    let response = client.search_books("dune messiah", None).await.unwrap();
    assert_eq!(response.results.len(), 3);

    let request_line = request.await.unwrap();
    assert!(request_line.starts_with("GET /search.json?"), "{}", request_line);
    assert!(request_line.contains("q=dune+messiah"), "{}", request_line);
    assert!(request_line.contains("limit=7"), "{}", request_line);
    assert!(request_line.contains("language=eng"), "{}", request_line);
    assert!(request_line.contains("fields=key%2Ctitle"), "{}", request_line);
}

#[tokio::test]
async fn client_fetches_work_details() {
    let (base_url, request) =
        serve_once(200, include_str!("fixtures/work_typed_description.json")).await;
    let client = client_for(&base_url);

    let work = client
        .book_details(&BookId::parse("OL893415W").unwrap())
        .await
        .unwrap();
    assert_eq!(
        work.description_text().as_deref(),
        Some("Set on the desert planet Arrakis.")
    );
    assert!(request
        .await
        .unwrap()
        .starts_with("GET /works/OL893415W.json "));
}

#[tokio::test]
async fn client_classifies_error_statuses() {
    for (status, expected) in [
        (408, RemoteError::RequestTimeout),
        (429, RemoteError::TooManyRequests),
        (503, RemoteError::Server),
        (404, RemoteError::Unknown),
    ] {
        let (base_url, _request) = serve_once(status, "{}").await;
        let result = client_for(&base_url).search_books("dune", None).await;
        assert_eq!(result.unwrap_err(), expected, "status {}", status);
    }
}

#[tokio::test]
async fn silent_server_is_a_request_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept and hold the connection without ever answering.
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(socket);
    });

    let client = OpenLibraryClient::new(ClientConfig {
        base_url: ValidatedUrl::parse(&format!("http://{}", address)).unwrap(),
        request_timeout: Duration::from_secs(1),
        ..ClientConfig::default()
    })
    .unwrap();

    let result = client.search_books("dune", None).await;
    assert_eq!(result.unwrap_err(), RemoteError::RequestTimeout);
}

#[tokio::test]
async fn refused_connection_is_no_internet() {
    // Bind then release a port so nothing is listening on it.
    let address = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();

    let client = OpenLibraryClient::new(ClientConfig {
        base_url: ValidatedUrl::parse(&format!("http://{}", address)).unwrap(),
        request_timeout: Duration::from_secs(1),
        ..ClientConfig::default()
    })
    .unwrap();

    let result = client.search_books("dune", None).await;
    assert_eq!(result.unwrap_err(), RemoteError::NoInternet);
}
