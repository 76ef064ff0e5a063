use educafoco::{AgentError, Category, Config, GeminiProvider, NewsProvider};
use mockito::{Matcher, Server};

const MODEL: &str = "gemini-test";
const KEY: &str = "test-key";
const PATH: &str = "/models/gemini-test:generateContent";

fn provider_for(base_url: &str) -> GeminiProvider {
    let mut config = Config::default();
    config.agent.base_url = base_url.to_string();
    config.agent.model = MODEL.to_string();
    config.agent.timeout_secs = 5;
    config.api.gemini_key = Some(KEY.to_string());
    GeminiProvider::new(&config).unwrap()
}

#[tokio::test]
async fn successful_reply_is_parsed_into_news() {
    let mut server = Server::new_async().await;
    let body = r#"{
      "candidates": [{
        "content": {"parts": [{"text": "[PISO]\nPiso de **R$ 4.867,77**\n[CONCURSOS]\nEdital SEEDUC"}]},
        "groundingMetadata": {"groundingChunks": [
          {"web": {"uri": "https://www.gov.br/mec", "title": "MEC"}},
          {"web": {"title": "sem link"}}
        ]}
      }]
    }"#;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", KEY)
        .match_body(Matcher::Regex("googleSearch".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let news = provider_for(&server.url()).fetch_news().await.unwrap();
    mock.assert_async().await;

    let sections = news.sections();
    assert_eq!(sections.get(Category::Piso), ["Piso de **R$ 4.867,77**"]);
    assert_eq!(sections.get(Category::Concursos), ["Edital SEEDUC"]);
    assert_eq!(news.sources.len(), 1);
    assert_eq!(news.sources[0].uri.as_deref(), Some("https://www.gov.br/mec"));
}

#[tokio::test]
async fn trailing_slash_in_base_url_hits_the_same_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let base = format!("{}/", server.url());
    let news = provider_for(&base).fetch_news().await.unwrap();
    mock.assert_async().await;
    assert_eq!(news.summary, educafoco::agent::NO_TEXT_FALLBACK);
}

#[tokio::test]
async fn unauthorized_reply_is_a_status_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(401)
        .with_body(r#"{"error": {"message": "API key not valid"}}"#)
        .create_async()
        .await;

    let err = provider_for(&server.url()).fetch_news().await.unwrap_err();
    mock.assert_async().await;
    match err {
        AgentError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("API key not valid"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = provider_for(&server.url()).fetch_news().await.unwrap_err();
    mock.assert_async().await;
    assert!(matches!(err, AgentError::ParseError(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = provider_for(&url).fetch_news().await.unwrap_err();
    assert!(matches!(err, AgentError::Transport(_)), "got {err:?}");
}
