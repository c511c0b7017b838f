/// Convert a server date format (`Y-m-d` style) into the date-picker's
/// notation (`yyyy-mm-dd`). An empty format falls back to `yyyy-mm-dd`.
pub fn javascript_date_format(server_format: &str) -> String {
    let format = server_format.replace('Y', "yyyy").replace('m', "mm").replace('d', "dd");
    if format.is_empty() { "yyyy-mm-dd".to_string() } else { format }
}

/// Convert a server date format (`Y-m-d` style) into a chrono format string.
pub fn chrono_date_format(server_format: &str) -> String {
    if server_format.is_empty() {
        return "%Y-%m-%d".to_string();
    }
    let mut out = String::with_capacity(server_format.len() * 2);
    for ch in server_format.chars() {
        match ch {
            'Y' | 'y' | 'm' | 'd' => {
                out.push('%');
                out.push(ch);
            }
            '%' => out.push_str("%%"),
            _ => out.push(ch),
        }
    }
    out
}
