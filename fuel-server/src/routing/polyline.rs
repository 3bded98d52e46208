//! Encoded polyline decoding.
//!
//! Route geometry comes back in the Google polyline format: each value is
//! a zigzag-encoded delta from the previous point, split into 5-bit chunks
//! offset by 63 so every byte is printable ASCII.

/// Decimal places used by OpenRouteService geometries.
pub const DEFAULT_PRECISION: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    #[error("invalid byte {byte:#04x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },

    #[error("polyline ends mid-value at offset {0}")]
    Truncated(usize),

    #[error("value at offset {0} overflows")]
    Overflow(usize),
}

/// Decode a polyline into `(latitude, longitude)` pairs.
///
/// # Examples
///
/// ```
/// use fuel_server::routing::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();
/// assert_eq!(points[0], (38.5, -120.2));
/// assert_eq!(points.len(), 3);
/// ```
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<(f64, f64)>, PolylineError> {
    let bytes = encoded.as_bytes();
    let factor = 10f64.powi(precision as i32);
    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut offset = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while offset < bytes.len() {
        let start = offset;
        lat = lat
            .checked_add(next_delta(bytes, &mut offset)?)
            .ok_or(PolylineError::Overflow(start))?;
        let start = offset;
        lon = lon
            .checked_add(next_delta(bytes, &mut offset)?)
            .ok_or(PolylineError::Overflow(start))?;
        points.push((lat as f64 / factor, lon as f64 / factor));
    }

    Ok(points)
}

fn next_delta(bytes: &[u8], offset: &mut usize) -> Result<i64, PolylineError> {
    let start = *offset;
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*offset).ok_or(PolylineError::Truncated(start))?;
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidByte {
                byte,
                offset: *offset,
            });
        }
        let chunk = i64::from(byte - 63);
        *offset += 1;

        if shift > 60 {
            return Err(PolylineError::Overflow(start));
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn reference_example() {
        let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", DEFAULT_PRECISION).unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

        assert_eq!(points.len(), expected.len());
        for (got, want) in points.iter().zip(expected) {
            assert!(close(*got, want), "{got:?} != {want:?}");
        }
    }

    #[test]
    fn empty_is_empty() {
        assert_eq!(decode("", DEFAULT_PRECISION).unwrap(), Vec::new());
    }

    #[test]
    fn single_origin_point() {
        // "??" is a zero delta for both axes.
        assert_eq!(decode("??", DEFAULT_PRECISION).unwrap(), vec![(0.0, 0.0)]);
    }

    #[test]
    fn truncated_input() {
        // Latitude present, longitude missing.
        assert_eq!(
            decode("_p~iF", DEFAULT_PRECISION),
            Err(PolylineError::Truncated(5))
        );
        // Continuation bit set on the final byte.
        assert!(matches!(
            decode("_p~iF~", DEFAULT_PRECISION),
            Err(PolylineError::Truncated(_))
        ));
    }

    #[test]
    fn rejects_non_polyline_bytes() {
        assert_eq!(
            decode("ab c", DEFAULT_PRECISION),
            Err(PolylineError::InvalidByte {
                byte: b' ',
                offset: 2
            })
        );
    }

    #[test]
    fn endless_continuation_overflows() {
        let encoded = "~".repeat(40);
        assert_eq!(
            decode(&encoded, DEFAULT_PRECISION),
            Err(PolylineError::Overflow(0))
        );
    }

    #[test]
    fn accumulated_latitude_overflows() {
        // A single latitude delta of 2^62 - 1 with a zero longitude delta.
        let point = ["}", &"~".repeat(11), "F?"].concat();
        assert_eq!(point.len(), 14);
        assert!(decode(&point.repeat(2), DEFAULT_PRECISION).is_ok());

        // The third step would exceed i64::MAX.
        assert_eq!(
            decode(&point.repeat(3), DEFAULT_PRECISION),
            Err(PolylineError::Overflow(28))
        );
    }

    #[test]
    fn precision_six() {
        // Same bytes, one more decimal place.
        let points = decode("_p~iF~ps|U", 6).unwrap();
        assert!(close(points[0], (3.85, -12.02)));
    }
}
