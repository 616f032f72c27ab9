//! Conversion service client
//!
//! Issues the single outbound request of the application: a multipart POST
//! carrying the raw CSV bytes plus the three configuration values as query
//! parameters. The service's 2xx body is the generated DML as plain text;
//! non-2xx bodies may carry a JSON `detail` string with the rejection reason.

use crate::model::workflow::{SubmissionRequest, GENERIC_ERROR_MESSAGE};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service rejected the conversion ({status})")]
    Service {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl ConvertError {
    /// Message shown to the user.
    ///
    /// A structured service detail is surfaced verbatim; everything else
    /// collapses to the fixed fallback string.
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::Service {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Client for the remote CSV-to-DML conversion service
#[derive(Clone)]
pub struct ConversionClient {
    client: Client,
    endpoint: String,
}

impl ConversionClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one conversion request and return the DML body verbatim.
    ///
    /// Fire-once: no retries, no timeout beyond the transport's own.
    pub fn convert(&self, request: &SubmissionRequest) -> Result<String, ConvertError> {
        let bytes = read_file(&request.file.path)?;
        let part = Part::bytes(bytes)
            .file_name(request.file.name.clone())
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[
                ("table_name", request.table_name.as_str()),
                ("case_transform", request.case_transform.wire_name()),
                ("sql_dialect", request.sql_dialect.wire_name()),
            ])
            .multipart(form)
            .send()?;

        let status = response.status();
        if status.is_success() {
            Ok(response.text()?)
        } else {
            let detail = response.text().ok().as_deref().and_then(extract_detail);
            Err(ConvertError::Service { status, detail })
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ConvertError> {
    std::fs::read(path).map_err(|source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Pull the `detail` string out of a JSON error body, if there is one
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::workflow::{CaseTransform, SelectedFile, SqlDialect};
    use httpmock::prelude::*;
    use std::io::Write;

    fn csv_fixture(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("rows")
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn request_for(file: &tempfile::NamedTempFile) -> SubmissionRequest {
        SubmissionRequest {
            file: SelectedFile::new(file.path().to_path_buf()),
            table_name: "customers".to_string(),
            case_transform: CaseTransform::Uppercase,
            sql_dialect: SqlDialect::Mysql,
        }
    }

    #[test]
    fn test_convert_sends_params_and_returns_body_verbatim() {
        let server = MockServer::start();
        let dml = "INSERT INTO CUSTOMERS (id, name) VALUES ('1', 'ANA');\n";

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload/")
                .query_param("table_name", "customers")
                .query_param("case_transform", "uppercase")
                .query_param("sql_dialect", "mysql")
                .body_contains("id,name\n1,Ana\n");
            then.status(200)
                .header("Content-Type", "text/plain")
                .body(dml);
        });

        let file = csv_fixture("id,name\n1,Ana\n");
        let client = ConversionClient::new(server.url("/upload/"));
        let result = client.convert(&request_for(&file)).unwrap();

        mock.assert();
        assert_eq!(result, dml);
    }

    #[test]
    fn test_convert_forwards_filename_in_multipart_part() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload/")
                .body_contains("name=\"file\"")
                .body_contains("rows.csv");
            then.status(200).body("");
        });

        let file = csv_fixture("a,b\n");
        let mut request = request_for(&file);
        request.file.name = "rows.csv".to_string();

        let client = ConversionClient::new(server.url("/upload/"));
        client.convert(&request).unwrap();

        mock.assert();
    }

    #[test]
    fn test_service_error_with_detail() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/upload/");
            then.status(400)
                .header("Content-Type", "application/json")
                .body(r#"{"detail": "Coluna ausente"}"#);
        });

        let file = csv_fixture("a,b\n");
        let client = ConversionClient::new(server.url("/upload/"));
        let err = client.convert(&request_for(&file)).unwrap_err();

        match &err {
            ConvertError::Service { status, detail } => {
                assert_eq!(*status, StatusCode::BAD_REQUEST);
                assert_eq!(detail.as_deref(), Some("Coluna ausente"));
            }
            other => panic!("expected Service error, got {:?}", other),
        }
        assert_eq!(err.user_message(), "Coluna ausente");
    }

    #[test]
    fn test_service_error_without_detail_falls_back() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/upload/");
            then.status(500).body("Internal Server Error");
        });

        let file = csv_fixture("a,b\n");
        let client = ConversionClient::new(server.url("/upload/"));
        let err = client.convert(&request_for(&file)).unwrap_err();

        assert!(matches!(err, ConvertError::Service { detail: None, .. }));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_service_error_with_non_string_detail_falls_back() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(POST).path("/upload/");
            then.status(422)
                .header("Content-Type", "application/json")
                .body(r#"{"detail": [{"loc": ["file"], "msg": "field required"}]}"#);
        });

        let file = csv_fixture("a,b\n");
        let client = ConversionClient::new(server.url("/upload/"));
        let err = client.convert(&request_for(&file)).unwrap_err();

        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_connection_failure_is_transport_error() {
        // Nothing listens on this port
        let file = csv_fixture("a,b\n");
        let client = ConversionClient::new("http://127.0.0.1:1/upload/".to_string());
        let err = client.convert(&request_for(&file)).unwrap_err();

        assert!(matches!(err, ConvertError::Transport(_)));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let request = SubmissionRequest {
            file: SelectedFile::new("/nonexistent/rows.csv".into()),
            table_name: "customers".to_string(),
            case_transform: CaseTransform::None,
            sql_dialect: SqlDialect::Postgresql,
        };

        let client = ConversionClient::new("http://127.0.0.1:1/upload/".to_string());
        let err = client.convert(&request).unwrap_err();

        assert!(matches!(err, ConvertError::Io { .. }));
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "bad csv"}"#),
            Some("bad csv".to_string())
        );
        assert_eq!(extract_detail(r#"{"message": "bad csv"}"#), None);
        assert_eq!(extract_detail("not json"), None);
        assert_eq!(extract_detail(r#"{"detail": 42}"#), None);
    }
}
