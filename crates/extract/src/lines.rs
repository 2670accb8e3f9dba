use zrapor_core::Token;

/// Default vertical band for line membership, in pixels at native resolution.
pub const DEFAULT_LINE_TOLERANCE: f32 = 15.0;

/// Tokens that print on the same physical line, ordered left to right.
#[derive(Debug, Clone)]
pub struct Line {
    pub tokens: Vec<Token>,
    pub vertical_center: f32,
}

impl Line {
    /// Token texts joined left to right with single spaces.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Cluster tokens into printed lines by vertical-center proximity.
///
/// Tokens without usable geometry are skipped. The open line is keyed on the
/// vertical center of its first member; a token joins while its own center is
/// within `tolerance` of that key, otherwise the line closes (members
/// re-sorted left to right) and a new one opens.
pub fn group_lines(tokens: &[Token], tolerance: f32) -> Vec<Line> {
    let mut placed: Vec<(&Token, f32, f32)> = tokens
        .iter()
        .filter_map(|t| t.bbox.map(|b| (t, b.top(), b.vertical_center())))
        .collect();
    placed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut lines = Vec::new();
    let mut open: Vec<&Token> = Vec::new();
    let mut open_center = 0.0f32;

    for (token, _, center) in placed {
        if open.is_empty() {
            open.push(token);
            open_center = center;
        } else if (center - open_center).abs() < tolerance {
            open.push(token);
        } else {
            lines.push(close_line(open, open_center));
            open = vec![token];
            open_center = center;
        }
    }
    if !open.is_empty() {
        lines.push(close_line(open, open_center));
    }
    lines
}

fn close_line(mut members: Vec<&Token>, center: f32) -> Line {
    members.sort_by(|a, b| {
        let ax = a.bbox.map(|b| b.left()).unwrap_or(0.0);
        let bx = b.bbox.map(|b| b.left()).unwrap_or(0.0);
        ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
    });
    Line {
        tokens: members.into_iter().cloned().collect(),
        vertical_center: center,
    }
}

/// Stream-order pseudo-lines for recognizers that return no geometry: each
/// token stands alone, in the order it was handed over.
pub fn stream_lines(tokens: &[Token]) -> Vec<Line> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, t)| Line {
            tokens: vec![t.clone()],
            vertical_center: i as f32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zrapor_core::BoundingBox;

    fn tok(text: &str, left: f32, top: f32, bottom: f32) -> Token {
        Token::new(
            text,
            Some(BoundingBox::from_ltrb(left, top, left + 40.0, bottom)),
            0.9,
        )
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(group_lines(&[], DEFAULT_LINE_TOLERANCE).is_empty());
    }

    #[test]
    fn single_token_forms_its_own_line() {
        let lines = group_lines(&[tok("NAKİT", 10.0, 95.0, 105.0)], DEFAULT_LINE_TOLERANCE);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "NAKİT");
    }

    #[test]
    fn centers_100_102_140_split_into_two_lines() {
        let tokens = vec![
            tok("a", 10.0, 95.0, 105.0),  // center 100
            tok("b", 60.0, 97.0, 107.0),  // center 102
            tok("c", 10.0, 135.0, 145.0), // center 140
        ];
        let lines = group_lines(&tokens, 15.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].tokens.len(), 2);
        assert_eq!(lines[1].tokens.len(), 1);
        assert_eq!(lines[1].tokens[0].text, "c");
    }

    #[test]
    fn line_members_sorted_left_to_right() {
        // Delivered right-token-first; the closed line reads left to right.
        let tokens = vec![
            tok("812,50", 200.0, 96.0, 106.0),
            tok("NAKİT", 10.0, 95.0, 105.0),
        ];
        let lines = group_lines(&tokens, 15.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "NAKİT 812,50");
    }

    #[test]
    fn layoutless_tokens_are_skipped() {
        let tokens = vec![Token::new("no box", None, 0.9), tok("x", 0.0, 0.0, 10.0)];
        let lines = group_lines(&tokens, 15.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "x");
    }

    #[test]
    fn stream_lines_preserve_order() {
        let tokens = vec![Token::new("first", None, 0.9), Token::new("second", None, 0.9)];
        let lines = stream_lines(&tokens);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "first");
        assert_eq!(lines[1].text(), "second");
    }
}
