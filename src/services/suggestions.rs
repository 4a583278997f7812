use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    error::AppResult,
    models::{AudioProfile, Candidate, AUDIO_FEATURE_COUNT},
};

/// Score assigned when either side of a comparison has no taste profile.
/// Sits below the cosine minimum of -1 so unscorable users sort first.
const MISSING_PROFILE_SCORE: f64 = -2.0;

/// Suggests users to follow
///
/// Expands the social graph to degree-2 follow candidates, then orders the
/// candidates by taste similarity to the querying user. Returns an ordered
/// list of user ids, possibly empty.
pub async fn get_suggest_follow(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<i64>> {
    let candidates = degree_two_candidates(pool, user_id).await?;
    tracing::debug!(
        user_id,
        candidate_count = candidates.len(),
        "Ranking degree-2 follow candidates"
    );
    rank_by_taste(pool, user_id, candidates).await
}

/// Finds all degree-2 follows that are not already followed or ignored
///
/// A candidate is a user followed by someone the querying user follows,
/// excluding users the querying user already follows directly, users on the
/// ignore list, and the querying user themselves. Candidates are ordered by
/// descending mutual-follow count; equal counts break ties by ascending id
/// so the ordering is deterministic.
pub async fn degree_two_candidates(pool: &SqlitePool, user_id: i64) -> AppResult<Vec<i64>> {
    let candidates: Vec<Candidate> = sqlx::query_as(
        r#"
        SELECT followed_id, COUNT(*) AS num_mutual
        FROM (
            SELECT b.followed_id AS followed_id
            FROM follows a
            JOIN follows b ON a.followed_id = b.follower_id
            WHERE a.follower_id = ?1
              AND b.followed_id != ?1
              AND b.followed_id NOT IN
                  (SELECT followed_id FROM follows WHERE follower_id = ?1)
              AND b.followed_id NOT IN
                  (SELECT ignored_user_id FROM user_ignores WHERE user_id = ?1)
        ) mutuals
        GROUP BY followed_id
        ORDER BY num_mutual DESC, followed_id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(candidates.into_iter().map(|c| c.followed_id).collect())
}

/// Orders candidates by taste similarity to the querying user
///
/// Fetches averaged audio features for the querying user and all candidates
/// in one query, then sorts candidates by ascending cosine similarity to the
/// querying user's feature vector. Candidates without a taste profile (no
/// liked songs) score the missing-profile sentinel and sort toward the front;
/// if the querying user has no profile, every candidate scores the sentinel.
/// The sort is stable, so ties keep their graph-proximity order.
pub async fn rank_by_taste(
    pool: &SqlitePool,
    user_id: i64,
    candidates: Vec<i64>,
) -> AppResult<Vec<i64>> {
    if candidates.is_empty() {
        return Ok(candidates);
    }

    let profiles = fetch_audio_profiles(pool, user_id, &candidates).await?;
    let vectors: HashMap<i64, [f64; AUDIO_FEATURE_COUNT]> = profiles
        .into_iter()
        .map(|p| (p.user_id, p.features()))
        .collect();
    let own = vectors.get(&user_id);

    let mut ranked = candidates;
    ranked.sort_by(|a, b| {
        let score_a = taste_score(own, vectors.get(a));
        let score_b = taste_score(own, vectors.get(b));
        score_a.total_cmp(&score_b)
    });

    Ok(ranked)
}

/// Averaged audio features for the querying user and all candidates
///
/// Joins likes to posts to per-song analysis rows and averages the seven
/// features per user. Users with no liked songs produce no row.
async fn fetch_audio_profiles(
    pool: &SqlitePool,
    user_id: i64,
    candidates: &[i64],
) -> AppResult<Vec<AudioProfile>> {
    let mut query = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT l.user_id AS user_id,
               AVG(s.danceability) AS danceability,
               AVG(s.energy) AS energy,
               AVG(s.loudness) AS loudness,
               AVG(s.acousticness) AS acousticness,
               AVG(s.instrumentalness) AS instrumentalness,
               AVG(s.liveness) AS liveness,
               AVG(s.valence) AS valence
        FROM likes l
        JOIN posts p ON l.post_id = p.post_id
        JOIN song_analysis s ON p.song_id = s.song_id
        WHERE l.user_id IN ("#,
    );

    let mut ids = query.separated(", ");
    ids.push_bind(user_id);
    for candidate in candidates {
        ids.push_bind(*candidate);
    }
    query.push(") GROUP BY l.user_id");

    let profiles = query
        .build_query_as::<AudioProfile>()
        .fetch_all(pool)
        .await?;

    Ok(profiles)
}

fn taste_score(
    own: Option<&[f64; AUDIO_FEATURE_COUNT]>,
    other: Option<&[f64; AUDIO_FEATURE_COUNT]>,
) -> f64 {
    match (own, other) {
        (Some(a), Some(b)) => cosine_similarity(a, b),
        _ => MISSING_PROFILE_SCORE,
    }
}

/// Cosine similarity between two feature vectors, in [-1, 1]
///
/// A zero-norm vector leaves the quotient undefined; such pairs score the
/// missing-profile sentinel, the same as users with no profile at all.
fn cosine_similarity(a: &[f64; AUDIO_FEATURE_COUNT], b: &[f64; AUDIO_FEATURE_COUNT]) -> f64 {
    let (dot, norm_a_sq, norm_b_sq) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, norm_a, norm_b), (&x, &y)| (dot + x * y, norm_a + x * x, norm_b + y * y),
    );

    let denominator = norm_a_sq.sqrt() * norm_b_sq.sqrt();
    if denominator == 0.0 {
        return MISSING_PROFILE_SCORE;
    }

    dot / denominator
}
