/// Format a count with comma thousands separators (e.g. 1234567 -> "1,234,567").
pub fn format_count(n: u64) -> String {
    let mut out = String::with_capacity(16);
    write_count(&mut out, n);
    out
}

pub fn write_count(buf: &mut String, n: u64) {
    buf.clear();
    let digits = n.to_string();
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            buf.push(',');
        }
        buf.push(ch);
    }
}

/// Card metadata line: `ID: #<id> | Downloads: <count>`.
pub fn meta_line(id: &str, downloads: u64) -> String {
    format!("ID: #{id} | Downloads: {}", format_count(downloads))
}

/// Summary line for the visible set.
pub fn zone_summary(count: usize) -> String {
    if count == 1 {
        "1 zone".to_string()
    } else {
        format!("{} zones", format_count(count as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_small_numbers_plainly() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(7), "7");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(123_456), "123,456");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn meta_line_layout() {
        assert_eq!(meta_line("42", 1500), "ID: #42 | Downloads: 1,500");
    }

    #[test]
    fn summary_pluralizes() {
        assert_eq!(zone_summary(0), "0 zones");
        assert_eq!(zone_summary(1), "1 zone");
        assert_eq!(zone_summary(2_500), "2,500 zones");
    }
}
