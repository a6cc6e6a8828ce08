//! Display formatting for quota values
//!
//! Sizes are rendered with binary (1024) units and periods as whole days.
//! Both formatters are total: they accept every value in their domain.

/// Bytes in one kilobyte.
pub const ONE_KB: u64 = 1024;

/// Milliseconds in one day.
pub const ONE_DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Unit labels indexed by power of 1024.
pub const BYTE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Most fractional digits [`format_size_with`] renders.
pub const MAX_DECIMALS: i32 = 18;

// Every u64 must map to a unit label.
const _: () = assert!(BYTE_UNITS.len() > u64::MAX.ilog(ONE_KB) as usize);

/// Format a byte count with two decimals.
///
/// # Examples
///
/// ```
/// use platform_quota::format::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(10 * 1024 * 1024), "10 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    format_size_with(bytes, 2)
}

/// Format a byte count rounded to `decimals` fractional digits.
///
/// Negative `decimals` are treated as zero and values above [`MAX_DECIMALS`]
/// are capped. Halves round up. Trailing zeros left by rounding are dropped,
/// so `1 KB` is never rendered as `1.00 KB`.
pub fn format_size_with(bytes: u64, decimals: i32) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let dm = decimals.clamp(0, MAX_DECIMALS) as u32;
    let i = bytes.ilog(ONE_KB);
    let fixed = fixed_ratio(bytes, u128::from(ONE_KB).pow(i), dm);
    let value = fixed.parse::<f64>().map(|v| v.to_string()).unwrap_or(fixed);

    format!("{} {}", value, BYTE_UNITS[i as usize])
}

/// `numer / denom` in fixed-point notation with `dm` fractional digits.
///
/// Works on the exact ratio, so a remainder of exactly half a unit in the last
/// place always rounds up.
fn fixed_ratio(numer: u64, denom: u128, dm: u32) -> String {
    let scale = 10_u128.pow(dm);
    let shifted = u128::from(numer) * scale;
    let mut units = shifted / denom;
    if (shifted % denom) * 2 >= denom {
        units += 1;
    }

    if dm == 0 {
        return units.to_string();
    }
    format!(
        "{}.{:0width$}",
        units / scale,
        units % scale,
        width = dm as usize
    )
}

/// Format a period in milliseconds as a whole number of days.
///
/// Halves round away from zero. Negative periods are not rejected and render
/// as a negative day count.
///
/// # Examples
///
/// ```
/// use platform_quota::format::format_date;
///
/// assert_eq!(format_date(7 * 86_400_000), "7 days");
/// assert_eq!(format_date(0), "0 days");
/// ```
pub fn format_date(ms: i64) -> String {
    let days = (ms as f64 / ONE_DAY_MS as f64).round();
    format!("{:.0} days", days)
}

/// Format an unsigned period, as stored in quota configs.
pub(crate) fn format_period(ms: u64) -> String {
    format_date(i64::try_from(ms).unwrap_or(i64::MAX))
}
