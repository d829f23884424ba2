mod harness;

use std::io::Write;

use harness::app::app;
use harness::server::TestServer;
use verdict_config::Config;

#[tokio::test]
async fn server_from_config_file() {
    let mut catalog = tempfile::NamedTempFile::new().unwrap();
    writeln!(catalog, "[order]\nclosed = \"Order closed at the catalog level\"").unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[server]
listen_address = "127.0.0.1:0"

[errors]
enable_stacktrace = true

[messages]
catalog = "{}"

[messages.entries]
"access.denied.exception" = "Inline wins"
"#,
        catalog.path().display()
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    let server = TestServer::start(config, app()).await.unwrap();

    let (status, body) = server.get_json("/quiet").await.unwrap();
    assert_eq!(status, 500);
    assert_eq!(body["message"], "Order closed at the catalog level");

    let (status, body) = server.get_json("/admin").await.unwrap();
    assert_eq!(status, 403);
    assert_eq!(body["message"], "Inline wins");
}

#[tokio::test]
async fn missing_catalog_file_fails_startup() {
    let mut config = Config::default();
    config.messages.catalog = Some("/nonexistent/verdict/messages.toml".into());

    let result = TestServer::start(config, app()).await;

    assert!(result.is_err());
}
