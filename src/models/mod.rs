use serde::Serialize;
use sqlx::FromRow;

/// Number of averaged audio features in a taste profile
pub const AUDIO_FEATURE_COUNT: usize = 7;

/// Public profile fields for a single user, as shown to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub profile_picture_path: Option<String>,
}

/// A degree-2 follow candidate together with how many of the querying
/// user's follows also follow them
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Candidate {
    pub followed_id: i64,
    pub num_mutual: i64,
}

/// Per-user audio features averaged over every song the user liked
///
/// Users with no liked songs have no profile row at all.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AudioProfile {
    pub user_id: i64,
    pub danceability: f64,
    pub energy: f64,
    pub loudness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
}

impl AudioProfile {
    /// The profile as a fixed-length feature vector
    pub fn features(&self) -> [f64; AUDIO_FEATURE_COUNT] {
        [
            self.danceability,
            self.energy,
            self.loudness,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.valence,
        ]
    }
}
