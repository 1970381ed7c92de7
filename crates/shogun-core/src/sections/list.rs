use super::is_none_line;

const BULLET: &str = "- ";

/// Bullet items of `待機中` / `伺い事項`. A `なし` line anywhere means the
/// section is empty, whatever else it contains.
pub fn parse_simple_list(body: &str) -> Vec<String> {
    let mut items = Vec::new();
    for line in body.lines() {
        if is_none_line(line) {
            return Vec::new();
        }
        if let Some(item) = line.trim().strip_prefix(BULLET) {
            items.push(item.trim().to_string());
        }
    }
    items
}
