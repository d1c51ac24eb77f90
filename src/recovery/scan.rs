// src/recovery/scan.rs

/// Finds the index of the `}` matching the `{` at `open`, skipping braces
/// that occur inside string literals. A `\` escapes exactly the next
/// character, regardless of context. Returns `None` when the region never
/// balances before the end of the text; callers treat that as "skip this
/// candidate".
pub fn find_matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &byte) in bytes.iter().enumerate().skip(open) {
        if escape_next {
            escape_next = false;
            continue;
        }
        match byte {
            b'\\' => escape_next = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
