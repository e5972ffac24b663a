//! Encoded polyline codec.
//!
//! Route geometry travels as Google's encoded polyline format: each
//! coordinate is stored as the delta from the previous one, at 1e-5 degree
//! precision, zig-zag encoded and split into 5-bit groups offset into
//! printable ASCII (`?` to `~`). Latitude comes before longitude.
//!
//! # Examples
//!
//! ```
//! use itinerary_server::domain::Coordinate;
//! use itinerary_server::polyline;
//!
//! let path = polyline::decode("_p~iF~ps|U_ulLnnqC").unwrap();
//! assert_eq!(path, vec![
//!     Coordinate { lat: 38.5, lon: -120.2 },
//!     Coordinate { lat: 40.7, lon: -120.95 },
//! ]);
//! assert_eq!(polyline::encode(&path), "_p~iF~ps|U_ulLnnqC");
//! ```

use tracing::warn;

use crate::domain::Coordinate;

/// Fixed-point scale: 1e-5 degrees.
const PRECISION: f64 = 1e5;

/// Offset added to every 5-bit group to land in printable ASCII.
const ASCII_OFFSET: u8 = 63;

/// Continuation flag within a group.
const CONTINUATION: u8 = 0x20;

/// Payload bits within a group.
const GROUP_MASK: u8 = 0x1f;

/// Largest shift before another group would overflow a 64-bit accumulator.
const MAX_SHIFT: u32 = 60;

/// Error returned when a polyline cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The string ended in the middle of a value
    #[error("polyline truncated at byte {0}: value has no terminating group")]
    Truncated(usize),

    /// The string ended after a latitude with no longitude
    #[error("polyline ends after a latitude with no longitude")]
    MissingLongitude,

    /// A byte outside the encoded alphabet
    #[error("invalid polyline byte {byte:#04x} at position {position}")]
    InvalidByte { byte: u8, position: usize },

    /// A value ran on for more groups than fit in 64 bits
    #[error("polyline value at byte {0} overflows")]
    Overflow(usize),
}

/// Decode an encoded polyline into coordinates.
///
/// An empty string decodes to an empty path.
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut coords = Vec::with_capacity(bytes.len() / 4);
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while pos < bytes.len() {
        lat = lat.wrapping_add(read_value(bytes, &mut pos)?);
        if pos >= bytes.len() {
            return Err(DecodeError::MissingLongitude);
        }
        lon = lon.wrapping_add(read_value(bytes, &mut pos)?);

        coords.push(Coordinate {
            lat: lat as f64 / PRECISION,
            lon: lon as f64 / PRECISION,
        });
    }

    Ok(coords)
}

/// Decode, degrading to an empty path on malformed input.
///
/// Geometry is for display only; a bad polyline on one step should cost that
/// step its line on the map, not the whole response.
pub fn decode_or_empty(encoded: &str) -> Vec<Coordinate> {
    decode(encoded).unwrap_or_else(|e| {
        warn!(error = %e, len = encoded.len(), "discarding undecodable polyline");
        Vec::new()
    })
}

/// Encode coordinates as a polyline.
///
/// Coordinates are rounded to 1e-5 degrees.
pub fn encode(coords: &[Coordinate]) -> String {
    let mut out = String::with_capacity(coords.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for coord in coords {
        let lat = (coord.lat * PRECISION).round() as i64;
        let lon = (coord.lon * PRECISION).round() as i64;
        write_value(lat.wrapping_sub(prev_lat), &mut out);
        write_value(lon.wrapping_sub(prev_lon), &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

/// Read one zig-zag encoded delta starting at `*pos`, advancing past it.
fn read_value(bytes: &[u8], pos: &mut usize) -> Result<i64, DecodeError> {
    let start = *pos;
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let Some(&byte) = bytes.get(*pos) else {
            return Err(DecodeError::Truncated(start));
        };
        if !(ASCII_OFFSET..=b'~').contains(&byte) {
            return Err(DecodeError::InvalidByte {
                byte,
                position: *pos,
            });
        }
        if shift > MAX_SHIFT {
            return Err(DecodeError::Overflow(start));
        }

        let group = byte - ASCII_OFFSET;
        result |= i64::from(group & GROUP_MASK) << shift;
        shift += 5;
        *pos += 1;

        if group & CONTINUATION == 0 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

/// Append one delta, zig-zag encoded, as 5-bit groups.
fn write_value(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= u64::from(CONTINUATION) {
        let group = (CONTINUATION | (value as u8 & GROUP_MASK)) + ASCII_OFFSET;
        out.push(char::from(group));
        value >>= 5;
    }
    out.push(char::from(value as u8 + ASCII_OFFSET));
}
