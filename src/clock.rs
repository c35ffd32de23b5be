//! Wall-clock helpers for line timestamps and backup file names.

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current UNIX time in whole seconds.
///
/// Clocks before the epoch read as `0`.
#[must_use]
pub fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Generates the timestamp that opens every formatted line.
///
/// Output format: `YYYY-MM-DD HH:MM:SS:ss.mmm`, where the seconds field is
/// repeated once before the millisecond fraction.
#[must_use]
pub fn now_timestamp() -> String {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();
    let millis = since_epoch.subsec_millis();

    unix_to_utc(secs).map_or_else(
        |_| format!("unix_{secs}"), // graceful fallback, never panics
        |tm| {
            format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}:{:02}.{:03}",
                tm.year, tm.mon, tm.day, tm.hour, tm.min, tm.sec, tm.sec, millis
            )
        },
    )
}

#[derive(Clone, Copy, Debug)]
struct SimpleUtc {
    year: i32,
    mon: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
}

#[derive(Debug)]
enum UtcConvError {
    Year,
    Month,
    Day,
}

/// Minimal UTC conversion (Civil Time) to avoid importing `chrono`.
///
/// Implements the algorithm to convert UNIX timestamp to a Gregorian date.
/// Note: not a `const fn` because it uses `Result/try_from`.
///
/// # Errors
///
/// Returns a [`UtcConvError`] if the calculated components generally overflow or
/// cannot be represented in standard integer types:
///
/// * [`UtcConvError::Year`] - If the calculated year does not fit in an `i32`.
/// * [`UtcConvError::Month`] - If the month cannot be converted to `u32` (unlikely by algorithm design).
/// * [`UtcConvError::Day`] - If the day cannot be converted to `u32` (unlikely by algorithm design).
#[allow(clippy::missing_const_for_fn, clippy::many_single_char_names)]
fn unix_to_utc(mut s: u64) -> Result<SimpleUtc, UtcConvError> {
    use std::convert::TryFrom;

    let sec = (s % 60) as u32;
    s /= 60;
    let min = (s % 60) as u32;
    s /= 60;
    let hour = (s % 24) as u32;
    s /= 24;

    // Use i128 to prevent overflow during intermediate calculations.
    let z: i128 = i128::from(s) + 719_468;

    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097; // [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = mp + if mp < 10 { 3 } else { -9 }; // [1, 12]

    let year_i = y + i128::from(m <= 2);

    let year = i32::try_from(year_i).map_err(|_| UtcConvError::Year)?;
    let mon = u32::try_from(m).map_err(|_| UtcConvError::Month)?;
    let day = u32::try_from(d).map_err(|_| UtcConvError::Day)?;

    Ok(SimpleUtc {
        year,
        mon,
        day,
        hour,
        min,
        sec,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn epoch_converts_to_1970() {
        let tm = unix_to_utc(0).expect("epoch must convert");
        assert_eq!(
            (tm.year, tm.mon, tm.day, tm.hour, tm.min, tm.sec),
            (1970, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn known_instant_converts() {
        // 2023-11-14 22:13:20 UTC
        let tm = unix_to_utc(1_700_000_000).expect("must convert");
        assert_eq!(
            (tm.year, tm.mon, tm.day, tm.hour, tm.min, tm.sec),
            (2023, 11, 14, 22, 13, 20)
        );
    }

    #[test]
    fn leap_day_converts() {
        // 2000-02-29 00:00:00 UTC
        let tm = unix_to_utc(951_782_400).expect("must convert");
        assert_eq!((tm.year, tm.mon, tm.day), (2000, 2, 29));
    }

    #[test]
    fn timestamp_has_doubled_seconds_shape() {
        let ts = now_timestamp();
        // YYYY-MM-DD HH:MM:SS:SS.mmm
        assert_eq!(ts.len(), 26, "unexpected timestamp: {ts}");
        assert_eq!(&ts[10..11], " ");
        assert_eq!(&ts[16..17], ":");
        assert_eq!(&ts[19..20], ":");
        assert_eq!(&ts[17..19], &ts[20..22], "seconds field must repeat");
        assert_eq!(&ts[22..23], ".");
    }
}
