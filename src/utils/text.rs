use console::measure_text_width;

/// Wrap `text` into lines no wider than `max_width` terminal columns,
/// breaking at spaces where possible.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate_width = if current.is_empty() {
                measure_text_width(word)
            } else {
                measure_text_width(&current) + 1 + measure_text_width(word)
            };

            if candidate_width <= max_width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // A single word wider than the line is split by columns
            let mut rest = word;
            while measure_text_width(rest) > max_width {
                let cut = split_at_width(rest, max_width);
                lines.push(rest[..cut].to_string());
                rest = &rest[cut..];
            }
            current.push_str(rest);
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn split_at_width(s: &str, max_width: usize) -> usize {
    let mut end = 0;
    for (pos, ch) in s.char_indices() {
        let next = pos + ch.len_utf8();
        if measure_text_width(&s[..next]) > max_width {
            break;
        }
        end = next;
    }
    // Always make progress, even for a glyph wider than the line
    if end == 0 {
        s.chars().next().map(char::len_utf8).unwrap_or(s.len())
    } else {
        end
    }
}
