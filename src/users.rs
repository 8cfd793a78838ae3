// User endpoints.

use crate::api::ApiClient;
use crate::error::ApiError;

impl ApiClient<'_> {
    /// GET /users. Returns the usernames known to the archive.
    pub fn list_users(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["users"]);
        self.get(&url)
    }
}
