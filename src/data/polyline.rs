//! Decoder for the encoded-polyline format used by directions APIs: each
//! coordinate is a pair of zigzag-encoded deltas against the previous
//! point, chunked into 5-bit groups offset by 63.

use crate::core::geo::LatLng;
use crate::{MapError, Result};

/// Decimal digits of coordinate precision in the standard encoding.
pub const DEFAULT_PRECISION: u32 = 5;

/// Decodes an encoded polyline at the standard precision.
pub fn decode(encoded: &str) -> Result<Vec<LatLng>> {
    decode_with_precision(encoded, DEFAULT_PRECISION)
}

/// Decodes an encoded polyline with an explicit precision.
pub fn decode_with_precision(encoded: &str, precision: u32) -> Result<Vec<LatLng>> {
    let bytes = encoded.as_bytes();
    let factor = 10_f64.powi(precision as i32);

    let mut coordinates = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        let (delta_lat, next) = next_delta(bytes, index)?;
        let (delta_lng, next) = next_delta(bytes, next)?;
        index = next;

        lat += delta_lat;
        lng += delta_lng;
        coordinates.push(LatLng::new(lat as f64 / factor, lng as f64 / factor));
    }

    Ok(coordinates)
}

/// Reads one zigzag varint starting at `index`, returning the signed delta
/// and the index past it.
fn next_delta(bytes: &[u8], mut index: usize) -> Result<(i64, usize)> {
    let mut accumulated: u64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes
            .get(index)
            .ok_or_else(|| MapError::ParseError("truncated polyline".to_string()))?;
        if !(63..=126).contains(&byte) {
            return Err(
                MapError::ParseError(format!("invalid polyline byte 0x{byte:02x}")).into(),
            );
        }
        if shift >= 64 {
            return Err(MapError::ParseError("polyline delta overflow".to_string()).into());
        }

        let chunk = (byte - 63) as u64;
        accumulated |= (chunk & 0x1f) << shift;
        shift += 5;
        index += 1;

        if chunk < 0x20 {
            break;
        }
    }

    let magnitude = (accumulated >> 1) as i64;
    let delta = if accumulated & 1 != 0 {
        !magnitude
    } else {
        magnitude
    };
    Ok((delta, index))
}
