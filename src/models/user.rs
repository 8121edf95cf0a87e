//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// Identity itself lives with the external auth provider; this is the
/// display metadata we cache for leaderboards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Provider subject (also used as document ID)
    pub user_id: String,
    /// Name shown on the leaderboard
    pub display_name: String,
    /// When the user first submitted
    pub created_at: String,
    /// Last submission timestamp
    pub last_active: String,
}
