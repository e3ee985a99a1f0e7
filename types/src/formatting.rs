//! Number formatting shared by the report views and the terminal renderer.
//!
//! Every displayed combat number goes through here so that the
//! European-style option (swapping `.` and `,`) is applied uniformly.

/// Swap `.` and `,` in an already formatted number.
fn europeanize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '.' => ',',
            ',' => '.',
            other => other,
        })
        .collect()
}

#[inline]
fn maybe_eu(s: String, european: bool) -> String {
    if european { europeanize(&s) } else { s }
}

/// Compact combat number with a lowercase `k`/`m` suffix.
///
/// Sign is kept; the magnitude decides the suffix.
///
/// # Examples
/// ```
/// use walogs_types::formatting::print_combat_number;
/// assert_eq!(print_combat_number(850.0, false), "850");
/// assert_eq!(print_combat_number(12_345.0, false), "12.3k");
/// assert_eq!(print_combat_number(-2_500_000.0, false), "-2.50m");
/// assert_eq!(print_combat_number(12_345.0, true), "12,3k");
/// ```
pub fn print_combat_number(n: f64, european: bool) -> String {
    let abs = n.abs();
    let s = if abs >= 1_000_000.0 {
        format!("{:.2}m", n / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", n / 1_000.0)
    } else {
        format!("{:.0}", n)
    };
    maybe_eu(s, european)
}

/// Whole-number rendering of an absolute amount (tooltips).
///
/// # Examples
/// ```
/// use walogs_types::formatting::format_abs_amount;
/// assert_eq!(format_abs_amount(-1234.6), "1235");
/// assert_eq!(format_abs_amount(0.0), "0");
/// ```
pub fn format_abs_amount(n: f64) -> String {
    format!("{:.0}", n.abs())
}

/// Percentage with one decimal place.
///
/// # Examples
/// ```
/// use walogs_types::formatting::format_pct;
/// assert_eq!(format_pct(60.0, false), "60.0%");
/// assert_eq!(format_pct(42.76, true), "42,8%");
/// ```
pub fn format_pct(n: f64, european: bool) -> String {
    maybe_eu(format!("{:.1}%", n), european)
}

/// Percentage without decimals, as used by the HP column.
pub fn format_pct_whole(n: f64) -> String {
    format!("{:.0}%", n)
}

/// Win rate of `win` out of `total` matches, `"0.0%"` when there are none.
///
/// # Examples
/// ```
/// use walogs_types::formatting::format_win_rate;
/// assert_eq!(format_win_rate(12, 20, false), "60.0%");
/// assert_eq!(format_win_rate(0, 0, false), "0.0%");
/// ```
pub fn format_win_rate(win: u64, total: u64, european: bool) -> String {
    if total == 0 {
        return format_pct(0.0, european);
    }
    format_pct(win as f64 * 100.0 / total as f64, european)
}

/// Relative timeline label counting back from the end of the window.
///
/// # Examples
/// ```
/// use walogs_types::formatting::format_time_mark;
/// assert_eq!(format_time_mark(0), "t-0s");
/// assert_eq!(format_time_mark(15), "t-15s");
/// ```
pub fn format_time_mark(secs_before_end: i64) -> String {
    format!("t-{}s", secs_before_end)
}

/// Format a duration as `M:SS`.
///
/// # Examples
/// ```
/// use walogs_types::formatting::format_duration;
/// assert_eq!(format_duration(125), "2:05");
/// assert_eq!(format_duration(0), "0:00");
/// ```
pub fn format_duration(secs: i64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_combat_number() {
        assert_eq!(print_combat_number(0.0, false), "0");
        assert_eq!(print_combat_number(999.0, false), "999");
        assert_eq!(print_combat_number(1_000.0, false), "1.0k");
        assert_eq!(print_combat_number(45_600.0, false), "45.6k");
        assert_eq!(print_combat_number(1_000_000.0, false), "1.00m");
        assert_eq!(print_combat_number(-1_500.0, false), "-1.5k");
    }

    #[test]
    fn test_print_combat_number_european() {
        assert_eq!(print_combat_number(500.0, true), "500");
        assert_eq!(print_combat_number(1_500.0, true), "1,5k");
        assert_eq!(print_combat_number(1_500_000.0, true), "1,50m");
    }

    #[test]
    fn test_format_win_rate() {
        assert_eq!(format_win_rate(1, 3, false), "33.3%");
        assert_eq!(format_win_rate(1, 3, true), "33,3%");
        assert_eq!(format_win_rate(5, 0, false), "0.0%");
    }

    #[test]
    fn test_format_pct_whole() {
        assert_eq!(format_pct_whole(42.4), "42%");
        assert_eq!(format_pct_whole(0.0), "0%");
    }

    #[test]
    fn test_europeanize() {
        assert_eq!(europeanize("1.5k"), "1,5k");
        assert_eq!(europeanize("1,500.25"), "1.500,25");
        assert_eq!(europeanize("500"), "500");
    }
}
