// File endpoints and the file listing table.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ApiError;

/// Body of POST /file/ingest.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct IngestRequest {
    pub filepath: String,
    pub user: String,
}

/// Body of POST /file/accession.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct AccessionRequest {
    pub accession_id: String,
    pub filepath: String,
    pub user: String,
}

/// One row of GET /users/{username}/files. Fields the server leaves out are
/// shown as empty.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FileInfo {
    #[serde(rename = "fileID")]
    pub file_id: String,
    #[serde(rename = "inboxPath")]
    pub inbox_path: String,
    #[serde(rename = "fileStatus")]
    pub file_status: String,
    #[serde(rename = "createAt")]
    pub create_at: String,
}

impl ApiClient<'_> {
    pub fn list_files(&self, username: &str) -> Result<Vec<FileInfo>, ApiError> {
        let url = self.endpoint(&["users", username, "files"]);
        self.get(&url)
    }

    /// Trigger ingestion of a file already uploaded to the user's inbox.
    pub fn ingest_file(&self, req: &IngestRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["file", "ingest"]);
        self.post(&url, Some(req))
    }

    pub fn set_accession(&self, req: &AccessionRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["file", "accession"]);
        self.post(&url, Some(req))
    }
}

const HEADERS: [&str; 4] = ["FILE ID", "INBOX PATH", "STATUS", "CREATED"];

/// Print files as a left-aligned table with a header row.
pub fn write_file_table(out: &mut dyn Write, username: &str, files: &[FileInfo]) -> io::Result<()> {
    if files.is_empty() {
        return writeln!(out, "No files found for user '{username}'.");
    }

    let rows: Vec<[&str; 4]> = files
        .iter()
        .map(|f| [&*f.file_id, &*f.inbox_path, &*f.file_status, &*f.create_at])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in std::iter::once(&HEADERS).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
