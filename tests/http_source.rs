//! `HttpProductSource` against a throwaway local HTTP listener

use prodview::{HttpProductSource, ProdViewError, ProductSource};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

/// Serve exactly one canned response and return the endpoint URL
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut line = String::new();
        // Drain request headers
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
        }
        let mut stream = stream;
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    format!("http://{addr}/products")
}

fn source(endpoint: &str) -> HttpProductSource {
    // Loopback traffic must not go through any proxy set in the environment
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    HttpProductSource::with_client(endpoint, client).unwrap()
}

#[test]
fn timeout_constructor_accepts_endpoint() {
    let src = HttpProductSource::new("http://127.0.0.1:9/products", None).unwrap();
    assert_eq!(src.endpoint().port(), Some(9));
}

#[test]
fn ok_response_is_decoded() {
    let endpoint = serve_once(
        "200 OK",
        r#"[{"id":1,"title":"Fjallraven Backpack","price":109.95,"description":"Your perfect pack","category":"bags"},
           {"id":2,"title":"Slim Fit T-Shirt","price":22.3,"description":"Slim-fitting style"}]"#,
    );
    let products = source(&endpoint).fetch().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].title, "Fjallraven Backpack");
    assert_eq!(products[1].price_text(), "22.3");
}

#[test]
fn non_200_status_is_an_error() {
    let endpoint = serve_once("503 Service Unavailable", r#"{"error":"down"}"#);
    let err = source(&endpoint).fetch().unwrap_err();
    assert!(matches!(err, ProdViewError::UnexpectedStatus { status: 503, .. }));
}

#[test]
fn other_success_codes_are_not_accepted() {
    let endpoint = serve_once("204 No Content", "");
    let err = source(&endpoint).fetch().unwrap_err();
    assert_eq!(err.status(), Some(204));
}

#[test]
fn malformed_body_is_a_decode_error() {
    let endpoint = serve_once("200 OK", "<html>not json</html>");
    let err = source(&endpoint).fetch().unwrap_err();
    assert!(matches!(err, ProdViewError::Decode(_)));
}

#[test]
fn refused_connection_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let err = source(&format!("http://127.0.0.1:{port}/products"))
        .fetch()
        .unwrap_err();
    assert!(matches!(err, ProdViewError::Http(_)));
    assert!(err.is_fetch_error());
}

#[test]
fn describe_names_the_endpoint() {
    let src = source("http://localhost:9/products");
    assert_eq!(src.describe(), "http://localhost:9/products");
    assert_eq!(src.endpoint().path(), "/products");
}
