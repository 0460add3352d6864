//! Candle cleaning.

use crate::types::history::{PricePoint, RawCandle, chronological};

/// Map validated candles to price points and drop a provisional tail.
///
/// Candles are first put in chronological order with one per timestamp
/// (the last one reported wins). A missing close becomes `0.0`. While more than one point remains and the
/// last close is exactly zero, the last point is removed: the provider can
/// report an in-progress final candle before its close settles. Zeros
/// anywhere else are kept.
pub fn clean_candles(candles: &[RawCandle]) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = chronological(candles.iter().copied())
        .into_iter()
        .map(|c| PricePoint::new(c.timestamp, c.close.unwrap_or(0.0)))
        .collect();

    while points.len() > 1 && points.last().is_some_and(|p| p.close == 0.0) {
        points.pop();
    }

    points
}
