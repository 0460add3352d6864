//! Trading-session segmentation for intraday series.
//!
//! A session is a maximal run of points whose consecutive gaps are at most
//! [`SESSION_GAP`]. Gap detection is used instead of calendar dates because
//! a session can straddle a UTC day boundary.

use crate::constants::SESSION_GAP;
use crate::types::history::PricePoint;

/// Split a chronologically ordered series into sessions.
pub fn split_sessions(points: &[PricePoint]) -> Vec<&[PricePoint]> {
    let mut sessions = Vec::new();
    let mut begin = 0;

    for (i, pair) in points.windows(2).enumerate() {
        if pair[1].date - pair[0].date > SESSION_GAP {
            sessions.push(&points[begin..=i]);
            begin = i + 1;
        }
    }
    if begin < points.len() {
        sessions.push(&points[begin..]);
    }

    sessions
}

/// Keep only the points of the `count` most recent sessions, in order.
pub fn last_sessions(points: &[PricePoint], count: usize) -> Vec<PricePoint> {
    let sessions = split_sessions(points);
    let skip = sessions.len().saturating_sub(count);
    sessions[skip..].concat()
}
