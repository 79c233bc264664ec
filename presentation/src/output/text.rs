//! Text layout helpers for terminal columns.
//!
//! Widths are counted in `char`s. Tabs are expanded to spaces before measuring;
//! double-width (CJK) characters still count as one column, so rows containing
//! them print wider than `width`.

/// Spaces a tab expands to
const TAB_WIDTH: usize = 4;

/// Word-wrap `text` to lines of at most `width` characters.
///
/// Paragraph breaks are kept as empty lines. Words longer than `width`
/// are split across lines. Runs of whitespace, tabs included, collapse to
/// one space.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Hard-split words that cannot fit on any line
            while word.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };

            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        if current_len > 0 {
            lines.push(current);
        }
    }

    lines
}

/// Pad or cut `text` to exactly `width` characters, left-aligned.
pub fn fit(text: &str, width: usize) -> String {
    let expanded;
    let text = if text.contains('\t') {
        expanded = text.replace('\t', &" ".repeat(TAB_WIDTH));
        expanded.as_str()
    } else {
        text
    };
    let len = text.chars().count();
    if len <= width {
        format!("{}{}", text, " ".repeat(width - len))
    } else if width <= 3 {
        text.chars().take(width).collect()
    } else {
        let mut cut: String = text.chars().take(width - 3).collect();
        cut.push_str("...");
        cut
    }
}

/// Center `text` in `width` characters, cutting it if needed.
pub fn center(text: &str, width: usize) -> String {
    let text = fit(text, width);
    let trimmed = text.trim_end();
    let len = trimmed.chars().count();
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), trimmed, " ".repeat(width - len - left))
}
