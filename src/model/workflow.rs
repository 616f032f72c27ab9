//! Workflow state - the conversion session record
//!
//! A single owned record holding everything the user has configured plus the
//! outcome of the last submission. Every mutation goes through one of the
//! transition methods below, which keep three invariants:
//! - `result_text` and `error_text` are never both non-empty
//! - `submitting` is true only between submission start and resolution
//! - at most one submission is ever accepted while one is in flight

use std::path::PathBuf;

/// Validation message shown when submit is triggered with no file selected.
pub const NO_FILE_MESSAGE: &str = "Por favor, selecione um arquivo CSV.";

/// Fallback message for failures without a structured detail.
pub const GENERIC_ERROR_MESSAGE: &str = "Ocorreu um erro desconhecido.";

/// Placeholder table name used until the user types their own.
pub const DEFAULT_TABLE_NAME: &str = "sua_tabela";

/// Case transform applied by the conversion service to CSV values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
}

impl CaseTransform {
    pub fn all() -> [CaseTransform; 3] {
        [
            CaseTransform::None,
            CaseTransform::Uppercase,
            CaseTransform::Lowercase,
        ]
    }

    /// Value sent as the `case_transform` query parameter
    pub fn wire_name(&self) -> &'static str {
        match self {
            CaseTransform::None => "none",
            CaseTransform::Uppercase => "uppercase",
            CaseTransform::Lowercase => "lowercase",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            CaseTransform::None => "None",
            CaseTransform::Uppercase => "UPPERCASE",
            CaseTransform::Lowercase => "lowercase",
        }
    }

    pub fn next(&self) -> CaseTransform {
        match self {
            CaseTransform::None => CaseTransform::Uppercase,
            CaseTransform::Uppercase => CaseTransform::Lowercase,
            CaseTransform::Lowercase => CaseTransform::None,
        }
    }

    pub fn prev(&self) -> CaseTransform {
        match self {
            CaseTransform::None => CaseTransform::Lowercase,
            CaseTransform::Uppercase => CaseTransform::None,
            CaseTransform::Lowercase => CaseTransform::Uppercase,
        }
    }
}

/// Target SQL dialect for the generated DML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    #[default]
    Postgresql,
    Mysql,
    SqlServer,
    Oracle,
}

impl SqlDialect {
    pub fn all() -> [SqlDialect; 4] {
        [
            SqlDialect::Postgresql,
            SqlDialect::Mysql,
            SqlDialect::SqlServer,
            SqlDialect::Oracle,
        ]
    }

    /// Value sent as the `sql_dialect` query parameter
    pub fn wire_name(&self) -> &'static str {
        match self {
            SqlDialect::Postgresql => "postgresql",
            SqlDialect::Mysql => "mysql",
            SqlDialect::SqlServer => "sqlserver",
            SqlDialect::Oracle => "oracle",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            SqlDialect::Postgresql => "PostgreSQL",
            SqlDialect::Mysql => "MySQL",
            SqlDialect::SqlServer => "SQL Server",
            SqlDialect::Oracle => "Oracle",
        }
    }

    pub fn next(&self) -> SqlDialect {
        match self {
            SqlDialect::Postgresql => SqlDialect::Mysql,
            SqlDialect::Mysql => SqlDialect::SqlServer,
            SqlDialect::SqlServer => SqlDialect::Oracle,
            SqlDialect::Oracle => SqlDialect::Postgresql,
        }
    }

    pub fn prev(&self) -> SqlDialect {
        match self {
            SqlDialect::Postgresql => SqlDialect::Oracle,
            SqlDialect::Mysql => SqlDialect::Postgresql,
            SqlDialect::SqlServer => SqlDialect::Mysql,
            SqlDialect::Oracle => SqlDialect::SqlServer,
        }
    }
}

/// A file chosen through the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// Filename forwarded to the service with the multipart part
    pub name: String,
}

impl SelectedFile {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.csv".to_string());
        Self { path, name }
    }
}

/// Snapshot of everything one conversion request needs
///
/// Taken at submission start, so setter calls made while the request is in
/// flight cannot alter what was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub file: SelectedFile,
    pub table_name: String,
    pub case_transform: CaseTransform,
    pub sql_dialect: SqlDialect,
}

/// Session state for the upload-configure-submit-render workflow
#[derive(Debug)]
pub struct WorkflowState {
    pub selected_file: Option<SelectedFile>,
    pub table_name: String,
    pub case_transform: CaseTransform,
    pub sql_dialect: SqlDialect,
    pub result_text: Option<String>,
    pub error_text: Option<String>,
    submitting: bool,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowState {
    pub fn new() -> Self {
        Self {
            selected_file: None,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            case_transform: CaseTransform::default(),
            sql_dialect: SqlDialect::default(),
            result_text: None,
            error_text: None,
            submitting: false,
        }
    }

    /// Whether a conversion request is currently in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Replace the selected file. No other state changes.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
    }

    /// Replace the table name verbatim. Sanitization, if any, is the
    /// service's responsibility.
    pub fn set_table_name(&mut self, value: String) {
        self.table_name = value;
    }

    pub fn set_case_transform(&mut self, value: CaseTransform) {
        self.case_transform = value;
    }

    pub fn set_sql_dialect(&mut self, value: SqlDialect) {
        self.sql_dialect = value;
    }

    /// Start a submission.
    ///
    /// Returns the request snapshot to send, or `None` when nothing should be
    /// sent: while a submission is in flight this is a no-op (single-flight
    /// guard), and with no file selected it records the validation message
    /// instead. On a valid start, prior result and error are cleared and the
    /// submitting flag is raised before the caller spawns any work.
    pub fn begin_submission(&mut self) -> Option<SubmissionRequest> {
        if self.submitting {
            return None;
        }

        let Some(file) = self.selected_file.clone() else {
            self.result_text = None;
            self.error_text = Some(NO_FILE_MESSAGE.to_string());
            return None;
        };

        self.submitting = true;
        self.result_text = None;
        self.error_text = None;

        Some(SubmissionRequest {
            file,
            table_name: self.table_name.clone(),
            case_transform: self.case_transform,
            sql_dialect: self.sql_dialect,
        })
    }

    /// Resolve the in-flight submission.
    ///
    /// `Ok` stores the response body verbatim; `Err` stores the display
    /// message. The submitting flag drops on both paths.
    pub fn finish_submission(&mut self, outcome: Result<String, String>) {
        match outcome {
            Ok(dml) => {
                self.result_text = Some(dml);
                self.error_text = None;
            }
            Err(message) => {
                self.error_text = Some(message);
                self.result_text = None;
            }
        }
        self.submitting = false;
    }
}
