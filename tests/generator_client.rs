//! Drives the generation client against a canned loopback endpoint.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use valuedeck::{DeckRequest, GeneratorClient, GeneratorConfig, GeneratorError};

/// Serves exactly one chat-completions response whose message content is
/// `content`, returning the base URL to point the client at.
fn serve_once(content: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    let body = serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string();

    thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        drain_request(&mut stream);
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
    });

    format!("http://127.0.0.1:{port}/")
}

/// Reads the full request (headers plus Content-Length body) so the client
/// never sees a reset before our response.
fn drain_request(stream: &mut std::net::TcpStream) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buffer.extend_from_slice(&chunk[..n]),
        }
        if let Some(end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") {
            break end;
        }
    };

    let headers = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let content_length = headers
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body_read = buffer.len() - (header_end + 4);
    while body_read < content_length {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => body_read += n,
        }
    }
}

fn deck_request() -> DeckRequest {
    DeckRequest {
        topic: "Quarterly results".to_string(),
        category: "Business".to_string(),
        slide_count: 5,
        tone: "Formal".to_string(),
        audience: "Corporate".to_string(),
        language: "English".to_string(),
        key_points: None,
    }
}

fn client(base_url: String) -> GeneratorClient {
    GeneratorClient::new(GeneratorConfig::new("test-key", "test-model").with_base_url(base_url))
        .expect("client builds")
}

#[tokio::test]
async fn recovers_slides_from_a_fenced_truncated_generation() {
    let content = "```json\n{\"slides\": [\
        {\"title\": \"Overview\", \"bullets\": []}, \
        {\"title\": \"Numbers\", \"bullets\": [\"revenue up\"]}, \
        {\"title\": \"Cut\", \"bullets\": [\"mid-str";
    let base_url = serve_once(content);

    let slides = client(base_url)
        .generate_deck(&deck_request())
        .await
        .expect("complete slides must be recovered");

    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].title, "Overview");
    assert_eq!(slides[1].bullets, vec!["revenue up"]);
    assert_eq!(slides[1].image_prompt, "Numbers");
}

#[tokio::test]
async fn prose_output_is_reported_as_no_content() {
    let base_url = serve_once("I cannot produce slides for that topic.");

    let result = client(base_url).generate_deck(&deck_request()).await;
    assert!(matches!(result, Err(GeneratorError::NoContent)));
}

#[test]
fn unparseable_base_url_is_rejected_at_construction() {
    let result =
        GeneratorClient::new(GeneratorConfig::new("key", "model").with_base_url("not a url"));
    assert!(matches!(result, Err(GeneratorError::InvalidUrl(_))));
}
