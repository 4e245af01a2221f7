//! Command payload parsing and application.
//!
//! # Responsibilities
//! - Decode `<index>=<op>` segments separated by `&` from a raw slice
//! - Enforce size, digit-width, range, and operation-value rules in order
//! - Apply each segment to the bank as soon as it validates
//!
//! # Design Decisions
//! - Forward-only cursor over the bytes; no string library, no allocation
//! - The first violated rule decides the signal code
//! - Segments already applied stay applied when a later one fails; the
//!   client sees the error code and can re-query status

use crate::http::error::RequestError;
use crate::relay::bank::RelayBank;
use crate::relay::driver::OutputDriver;

/// Shortest parsable payload: `0=1`.
const MIN_PAYLOAD: usize = 3;

/// Operation requested for one relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOp {
    Off,
    On,
    Invert,
}

impl RelayOp {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'0' => Some(RelayOp::Off),
            b'1' => Some(RelayOp::On),
            b'2' => Some(RelayOp::Invert),
            _ => None,
        }
    }
}

/// Widest accepted index, derived from the bank size.
fn max_index_width(count: usize) -> usize {
    if count <= 9 {
        1
    } else {
        2
    }
}

/// Parse `payload` and mutate `bank` segment by segment, left to right.
///
/// Mutations from segments before a failing one are not rolled back.
pub fn apply_commands<D: OutputDriver>(
    payload: &[u8],
    bank: &mut RelayBank<D>,
) -> Result<(), RequestError> {
    if payload.len() < MIN_PAYLOAD {
        return Err(RequestError::CommandTooShort);
    }

    let width = max_index_width(bank.len());
    let end = payload.len();
    let mut pos = 0;

    while pos < end {
        // The separator must exist somewhere ahead, and close enough that
        // the key before it fits the digit width.
        let eq = match find_byte(payload, pos, b'=') {
            Some(i) => i,
            None => return Err(RequestError::MalformedRequest),
        };
        let key = &payload[pos..eq];
        if key.is_empty() || key.len() > width {
            return Err(RequestError::BadRelayIndex);
        }
        let index = parse_index(key).ok_or(RequestError::BadRelayIndex)?;
        if index >= bank.len() {
            return Err(RequestError::BadRelayIndex);
        }

        // The value runs to the next `&` or the end of the payload and
        // must be exactly one byte.
        let value_end = find_byte(payload, eq + 1, b'&').unwrap_or(end);
        let value = &payload[eq + 1..value_end];
        if value.len() != 1 {
            return Err(RequestError::BadOperation);
        }
        let op = RelayOp::from_byte(value[0]).ok_or(RequestError::BadOperation)?;

        bank.apply(index, op);

        pos = if value_end == end { end } else { value_end + 1 };
    }

    Ok(())
}

fn find_byte(buf: &[u8], from: usize, needle: u8) -> Option<usize> {
    buf[from..].iter().position(|&b| b == needle).map(|i| from + i)
}

/// Parse a non-negative decimal index. Rejects any non-digit byte; the
/// digit-width cap keeps the value far from overflow.
fn parse_index(digits: &[u8]) -> Option<usize> {
    let mut value = 0usize;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value * 10 + usize::from(b - b'0');
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::driver::RecordingDriver;

    fn bank_of(count: u8) -> RelayBank<RecordingDriver> {
        RelayBank::new((0..count).collect(), RecordingDriver::default())
    }

    fn states(bank: &RelayBank<RecordingDriver>) -> &[bool] {
        bank.snapshot()
    }

    #[test]
    fn single_on_command() {
        let mut bank = bank_of(8);
        apply_commands(b"3=1", &mut bank).unwrap();
        assert!(states(&bank)[3]);
    }

    #[test]
    fn multi_segment_applies_left_to_right() {
        let mut bank = bank_of(8);
        apply_commands(b"0=1&1=0&2=2", &mut bank).unwrap();
        assert_eq!(
            states(&bank),
            &[true, false, true, false, false, false, false, false]
        );
    }

    #[test]
    fn invert_flips_regardless_of_state() {
        let mut bank = bank_of(8);
        apply_commands(b"5=2", &mut bank).unwrap();
        assert!(states(&bank)[5]);
        apply_commands(b"5=2", &mut bank).unwrap();
        assert!(!states(&bank)[5]);
    }

    #[test]
    fn too_short_payload() {
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"0=", &mut bank),
            Err(RequestError::CommandTooShort)
        );
        assert_eq!(
            apply_commands(b"", &mut bank),
            Err(RequestError::CommandTooShort)
        );
    }

    #[test]
    fn index_out_of_range() {
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"8=1", &mut bank),
            Err(RequestError::BadRelayIndex)
        );
    }

    #[test]
    fn index_wider_than_the_bank_allows() {
        // 8 relays means single-digit indexes only.
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"10=1", &mut bank),
            Err(RequestError::BadRelayIndex)
        );
    }

    #[test]
    fn two_digit_index_accepted_on_larger_banks() {
        let mut bank = bank_of(12);
        apply_commands(b"11=1", &mut bank).unwrap();
        assert!(states(&bank)[11]);
    }

    #[test]
    fn non_numeric_index() {
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"x=1", &mut bank),
            Err(RequestError::BadRelayIndex)
        );
    }

    #[test]
    fn missing_key_before_separator() {
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"=10", &mut bank),
            Err(RequestError::BadRelayIndex)
        );
    }

    #[test]
    fn operation_value_out_of_range() {
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"0=3", &mut bank),
            Err(RequestError::BadOperation)
        );
        assert_eq!(
            apply_commands(b"0=x", &mut bank),
            Err(RequestError::BadOperation)
        );
    }

    #[test]
    fn operation_value_too_wide() {
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"0=11", &mut bank),
            Err(RequestError::BadOperation)
        );
    }

    #[test]
    fn no_separator_anywhere() {
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"abc", &mut bank),
            Err(RequestError::MalformedRequest)
        );
    }

    #[test]
    fn earlier_segments_stay_applied_on_failure() {
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"0=1&9=1", &mut bank),
            Err(RequestError::BadRelayIndex)
        );
        assert!(states(&bank)[0]);
    }

    #[test]
    fn segment_missing_its_separator() {
        // The next `=` lies beyond the `&`, so the would-be key is too wide.
        let mut bank = bank_of(8);
        assert_eq!(
            apply_commands(b"abc&0=1", &mut bank),
            Err(RequestError::BadRelayIndex)
        );
        assert_eq!(states(&bank), &[false; 8]);
    }

    #[test]
    fn trailing_separator_is_harmless() {
        let mut bank = bank_of(8);
        apply_commands(b"0=1&", &mut bank).unwrap();
        assert!(states(&bank)[0]);
    }
}
