use crate::model::{LINE_HEIGHT, PLACEHOLDER, PT_PER_MM, TextStyle};

/// Text broken into lines that each fit the requested width.
#[derive(Clone, Debug, PartialEq)]
pub struct Wrapped {
    pub lines: Vec<String>,
    pub height: f32,
}

/// Width of `text` in layout units when set in `style`.
pub fn text_width(text: &str, style: &TextStyle) -> f32 {
    style.font.text_width(text, style.size) / PT_PER_MM
}

/// Wrap `text` to `max_width` layout units. Missing or blank text becomes
/// the `N/A` placeholder, so the result always has at least one line.
pub fn wrap(text: Option<&str>, max_width: f32, style: &TextStyle) -> Wrapped {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => PLACEHOLDER,
    };

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, max_width, style, &mut lines);
    }

    let height = lines.len() as f32 * LINE_HEIGHT;
    Wrapped { lines, height }
}

fn wrap_paragraph(paragraph: &str, max_width: f32, style: &TextStyle, lines: &mut Vec<String>) {
    let space_w = text_width(" ", style);
    let mut current = String::new();
    let mut current_w = 0.0f32;

    for word in paragraph.split_whitespace() {
        let word_w = text_width(word, style);

        if !current.is_empty() && current_w + space_w + word_w <= max_width {
            current.push(' ');
            current.push_str(word);
            current_w += space_w + word_w;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_w = 0.0;
        }

        if word_w <= max_width {
            current.push_str(word);
            current_w = word_w;
        } else {
            // Word longer than a whole line: break between characters
            for ch in word.chars() {
                let ch_w = text_width(ch.encode_utf8(&mut [0; 4]), style);
                if !current.is_empty() && current_w + ch_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_w = 0.0;
                }
                current.push(ch);
                current_w += ch_w;
            }
        }
    }

    // An empty paragraph still occupies a line
    lines.push(current);
}
