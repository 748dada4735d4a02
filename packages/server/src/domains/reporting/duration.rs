/// Render a span of seconds as `N days, H:MM:SS` (or `H:MM:SS` under a day).
pub fn humanize_seconds(total: f64) -> String {
    let total = total.max(0.0).round() as i64;
    let days = total / 86_400;
    let rem = total % 86_400;
    let clock = format!("{}:{:02}:{:02}", rem / 3600, (rem % 3600) / 60, rem % 60);
    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}
