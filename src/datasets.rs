// Dataset endpoints.

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ApiError;

/// Body of POST /dataset/create.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct DatasetRequest {
    pub accession_ids: Vec<String>,
    pub dataset_id: String,
    pub user: String,
}

impl ApiClient<'_> {
    /// Create a dataset from a list of accession IDs and a dataset ID.
    pub fn create_dataset(&self, req: &DatasetRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["dataset", "create"]);
        self.post(&url, Some(req))
    }

    /// Release a dataset for downloading.
    pub fn release_dataset(&self, dataset_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["dataset", "release", dataset_id]);
        self.post::<()>(&url, None)
    }
}
