//! Display formatting for counts, times and links.

use chrono::{DateTime, FixedOffset, Utc};

/// Short view count for cards: `847`, `1.5K`, `847K`, `2.1M`, `1B`.
#[must_use]
pub fn compact_views(views: i64) -> String {
    let views = views.max(0);

    match views {
        0..1_000 => views.to_string(),
        1_000..10_000 => with_tenths(views / 100, "K"),
        10_000..1_000_000 => format!("{}K", views / 1_000),
        1_000_000..1_000_000_000 => with_tenths(views / 100_000, "M"),
        _ => with_tenths(views / 100_000_000, "B"),
    }
}

fn with_tenths(tenths: i64, suffix: &str) -> String {
    if tenths % 10 == 0 {
        format!("{}{suffix}", tenths / 10)
    } else {
        format!("{}.{}{suffix}", tenths / 10, tenths % 10)
    }
}

/// Full view count with thousands separators: `1,234,567`.
#[must_use]
pub fn grouped_views(views: i64) -> String {
    let digits = views.max(0).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Relative time such as `3 minutes ago` or `2 days ago`.
#[must_use]
pub fn time_ago(then: &DateTime<FixedOffset>, now: DateTime<Utc>) -> String {
    let seconds = now
        .signed_duration_since(then.with_timezone(&Utc))
        .num_seconds();

    let (amount, unit) = match seconds {
        ..60 => return "just now".to_string(),
        60..3_600 => (seconds / 60, "minute"),
        3_600..86_400 => (seconds / 3_600, "hour"),
        86_400..604_800 => (seconds / 86_400, "day"),
        604_800..2_592_000 => (seconds / 604_800, "week"),
        2_592_000..31_536_000 => (seconds / 2_592_000, "month"),
        _ => (seconds / 31_536_000, "year"),
    };

    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// Player URL for an iframe: watch links become embed links.
#[must_use]
pub fn embed_url(video_url: &str) -> String {
    video_url.replace("watch?v=", "embed/")
}

/// Display name for a comment author.
#[must_use]
pub fn user_label(user_id: &str) -> String {
    if user_id.is_empty() {
        return "User Anonymous".to_string();
    }
    format!("User {}", user_id.chars().take(8).collect::<String>())
}

/// Upper-cased first character, for avatar placeholders.
#[must_use]
pub fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_compact_views() {
        assert_eq!(compact_views(0), "0");
        assert_eq!(compact_views(999), "999");
        assert_eq!(compact_views(1_000), "1K");
        assert_eq!(compact_views(1_540), "1.5K");
        assert_eq!(compact_views(847_312), "847K");
        assert_eq!(compact_views(2_134_000), "2.1M");
        assert_eq!(compact_views(3_000_000), "3M");
        assert_eq!(compact_views(1_200_000_000), "1.2B");
        assert_eq!(compact_views(-5), "0");
    }

    #[test]
    fn test_grouped_views() {
        assert_eq!(grouped_views(0), "0");
        assert_eq!(grouped_views(999), "999");
        assert_eq!(grouped_views(1_234), "1,234");
        assert_eq!(grouped_views(1_234_567), "1,234,567");
        assert_eq!(grouped_views(100_000), "100,000");
    }

    #[test]
    fn test_time_ago() {
        let now = Utc::now();
        let ago = |d: Duration| time_ago(&(now - d).fixed_offset(), now);

        assert_eq!(ago(Duration::seconds(5)), "just now");
        assert_eq!(ago(Duration::minutes(1)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(45)), "45 minutes ago");
        assert_eq!(ago(Duration::hours(3)), "3 hours ago");
        assert_eq!(ago(Duration::days(2)), "2 days ago");
        assert_eq!(ago(Duration::days(7)), "1 week ago");
        assert_eq!(ago(Duration::days(65)), "2 months ago");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
        assert_eq!(ago(Duration::minutes(-10)), "just now");
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=abc123"),
            "https://www.youtube.com/embed/abc123"
        );
        assert_eq!(embed_url("https://cdn.example/v.mp4"), "https://cdn.example/v.mp4");
    }

    #[test]
    fn test_user_label() {
        assert_eq!(user_label("01j0abcdefghijk"), "User 01j0abcd");
        assert_eq!(user_label("bob"), "User bob");
        assert_eq!(user_label(""), "User Anonymous");
    }

    #[test]
    fn test_initial() {
        assert_eq!(initial("nature explorer"), "N");
        assert_eq!(initial(""), "U");
    }
}
