use mockito::Matcher;
use serde_json::json;

use tasktester::client::TaskClient;
use tasktester::client::http::HttpTaskClient;
use tasktester::composer::{Composer, ComposerState};
use tasktester::request::TaskRequest;

fn request(task: &str, use_tools: bool) -> TaskRequest {
    TaskRequest {
        user_id: "user123".to_string(),
        task: task.to_string(),
        use_tools,
    }
}

#[tokio::test]
async fn posts_json_body_and_returns_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/mcp")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "user_id": "user123",
            "task": "calculate 3*7",
            "use_tools": true
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"tool_used": "calculator", "result": "21"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = HttpTaskClient::new(&format!("{}/mcp", server.url())).unwrap();
    let resp = client.submit(&request("calculate 3*7", true)).await.unwrap();

    assert_eq!(resp.tool_tag(), Some("calculator"));
    assert_eq!(resp.field("result"), Some(&json!("21")));
    mock.assert_async().await;
}

#[tokio::test]
async fn no_auth_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/mcp")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = HttpTaskClient::new(&format!("{}/mcp", server.url())).unwrap();
    client.submit(&request("hi", false)).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/mcp")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let client = HttpTaskClient::new(&format!("{}/mcp", server.url())).unwrap();
    let err = client.submit(&request("hi", true)).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("500"), "{message}");
    assert!(message.contains("Internal Server Error"), "{message}");
}

#[tokio::test]
async fn invalid_json_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/mcp")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = HttpTaskClient::new(&format!("{}/mcp", server.url())).unwrap();
    let err = client.submit(&request("hi", true)).await.unwrap_err();
    assert!(err.to_string().contains("invalid JSON"));
}

#[tokio::test]
async fn non_object_json_is_accepted() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/mcp")
        .with_status(200)
        .with_body("[1, 2, 3]")
        .create_async()
        .await;

    let client = HttpTaskClient::new(&format!("{}/mcp", server.url())).unwrap();
    let resp = client.submit(&request("hi", true)).await.unwrap();
    assert_eq!(resp.as_value(), &json!([1, 2, 3]));
}

#[tokio::test]
async fn connection_refused_becomes_composer_error() {
    // Grab a free port, then close it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let endpoint = format!("http://127.0.0.1:{port}/mcp");
    let client = HttpTaskClient::new(&endpoint).unwrap();

    let mut state = ComposerState::default();
    state.task = "calculate 1+1".to_string();
    let mut composer = Composer::new(Box::new(client), state);

    composer.submit().await.unwrap();
    let error = composer.state().error().unwrap();
    assert!(error.contains(&endpoint), "{error}");
    assert!(composer.state().response().is_none());
    assert!(composer.state().can_submit());
}
