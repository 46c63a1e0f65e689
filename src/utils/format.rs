use chrono::NaiveTime;
use unicode_width::UnicodeWidthStr;

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// "1 day", "3 days"
pub fn format_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Pad (or truncate with an ellipsis) to `width` terminal columns.
/// Measures display width so wide glyphs and emoji line up.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w <= width {
        return format!("{}{}", s, " ".repeat(width - w));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw + 1 > width {
            break;
        }
        out.push(ch);
        used += cw;
    }
    out.push('…');
    used += 1;
    format!("{}{}", out, " ".repeat(width.saturating_sub(used)))
}

/// First eight characters of an id, enough to reference a habit on the command line.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_fill_proportionally() {
        assert_eq!(progress_bar(0, 0, 4), "░░░░");
        assert_eq!(progress_bar(1, 2, 4), "██░░");
        assert_eq!(progress_bar(9, 3, 3), "███");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_display("Run", 5), "Run  ");
        // CJK glyphs take two columns each
        assert_eq!(UnicodeWidthStr::width(pad_display("読書", 6).as_str()), 6);
        let cut = pad_display("Drink more water", 8);
        assert_eq!(UnicodeWidthStr::width(cut.as_str()), 8);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn day_labels_and_ids() {
        assert_eq!(format_days(1), "1 day");
        assert_eq!(format_days(0), "0 days");
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
