/// Splits raw delimited text into rows of string cells.
///
/// Hand-rolled scanner rather than a full CSV dependency: user exports come
/// from several tools with inconsistent quoting and line endings, and the
/// import UI only needs cells, not typed records. Supports quoted fields,
/// embedded commas, `""` escapes inside quoted fields, and `\n`, `\r`, and
/// `\r\n` line endings (one row per line regardless of style). Rows whose
/// cells are all empty after trimming are dropped.
pub fn parse_rows(content: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                cell.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut cell));
            }
            '\r' if !in_quotes => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            '\n' if !in_quotes => {
                row.push(std::mem::take(&mut cell));
                rows.push(std::mem::take(&mut row));
            }
            _ => cell.push(c),
        }
    }

    // Input without a trailing newline still ends its last row.
    if !cell.is_empty() {
        row.push(cell);
    }
    if !row.is_empty() {
        rows.push(row);
    }

    rows.retain(|r| r.iter().any(|c| !c.trim().is_empty()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_simple_rows() {
        let rows = parse_rows("a,b,c\nd,e,f");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn quoted_field_keeps_embedded_comma() {
        let rows = parse_rows("a,\"b,c\",d\ne,f,g");
        assert_eq!(rows, vec![vec!["a", "b,c", "d"], vec!["e", "f", "g"]]);
    }

    #[test]
    fn escaped_quote_inside_quoted_field() {
        let rows = parse_rows("\"He said \"\"hi\"\"\"");
        assert_eq!(rows, vec![vec!["He said \"hi\""]]);
    }

    #[test]
    fn handles_all_line_ending_styles() {
        for content in ["a,b\nc,d", "a,b\rc,d", "a,b\r\nc,d"] {
            let rows = parse_rows(content);
            assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]], "{content:?}");
        }
    }

    #[test]
    fn newline_inside_quotes_stays_in_the_cell() {
        let rows = parse_rows("\"a\nb\",c");
        assert_eq!(rows, vec![vec!["a\nb", "c"]]);
    }

    #[test]
    fn blank_rows_are_dropped() {
        let rows = parse_rows("a,b\n\n , \nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn trailing_newline_adds_no_row() {
        assert_eq!(parse_rows("a,b\n").len(), 1);
        assert_eq!(parse_rows("").len(), 0);
    }
}
