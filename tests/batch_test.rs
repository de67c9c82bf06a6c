// Integration tests for batch commands

use rpcfleet::{DaemonConfig, RpcFleet};
use serde_json::{json, Value};

fn daemon_config(server: &mockito::Server) -> DaemonConfig {
    let host_with_port = server.host_with_port();
    let (host, port) = host_with_port.split_once(':').unwrap();
    DaemonConfig::new(port.parse().unwrap(), "user", "pass").with_host(host)
}

#[tokio::test]
async fn test_batch_cmd_hits_only_the_first_instance() {
    let mut first = mockito::Server::new_async().await;
    let first_mock = first
        .mock("POST", "/")
        // Body must be a JSON array of request objects
        .match_body(mockito::Matcher::Regex(r"^\[".to_string()))
        .with_status(200)
        .with_body(r#"[{"result": 1, "error": null, "id": 1}, {"result": 2, "error": null, "id": 2}]"#)
        .create_async()
        .await;

    let mut second = mockito::Server::new_async().await;
    let second_mock = second
        .mock("POST", "/")
        .expect(0)
        .create_async()
        .await;

    let fleet = RpcFleet::new(vec![daemon_config(&first), daemon_config(&second)]).unwrap();

    let commands = vec![
        ("getinfo".to_string(), Vec::new()),
        ("getbalance".to_string(), vec![json!("*")]),
    ];
    let outcome = fleet.batch_cmd(&commands).await;

    first_mock.assert_async().await;
    second_mock.assert_async().await;

    assert_eq!(outcome.instance.index, 0);
    assert!(outcome.error.is_none());

    // The decoded array passes through uncorrelated.
    let response = outcome.response.unwrap();
    let entries = response.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["result"], 1);
    assert_eq!(entries[1]["result"], 2);
}

#[tokio::test]
async fn test_batch_cmd_body_has_one_entry_per_command() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(mockito::Matcher::PartialJson(json!([
            {"method": "getinfo", "params": []},
            {"method": "getblockhash", "params": [5]},
            {"method": "getbalance", "params": ["*"]}
        ])))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let fleet = RpcFleet::new(vec![daemon_config(&server)]).unwrap();

    let commands: Vec<(String, Vec<Value>)> = vec![
        ("getinfo".to_string(), Vec::new()),
        ("getblockhash".to_string(), vec![json!(5)]),
        ("getbalance".to_string(), vec![json!("*")]),
    ];
    fleet.batch_cmd(&commands).await;

    mock.assert_async().await;
}
