//! Arithmetic expressions used by script arguments and assignments
//!
//! Evaluation never fails: anything unrecognised evaluates to 0.
//!
//! Operators are found by scanning, not by a precedence table. The text is
//! split at the first `+`, else the first `-` past the first character, else
//! `*`, else `/`, and both halves are evaluated again. So `2+3*4` is 14, but
//! `10-3-2` is `10 - (3-2)` = 9, and `2*-3` is `(2*) - 3` = -3. There is no
//! grouping besides `sin(..)` and `cos(..)`, which take degrees.
//!
//! Each split recurses, so expressions longer than [`MAX_EXPR_LEN`] evaluate
//! to 0 instead.

use super::VariableStore;

/// Longest expression, in bytes after removing whitespace
pub const MAX_EXPR_LEN: usize = 256;

pub fn evaluate(expr: &str, vars: &VariableStore) -> f32 {
    let clean: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    if clean.len() > MAX_EXPR_LEN {
        log::warn!("expression too long ({} bytes), using 0", clean.len());
        return 0.0;
    }
    eval_clean(&clean, vars)
}

fn eval_clean(s: &str, vars: &VariableStore) -> f32 {
    if s.is_empty() {
        return 0.0;
    }

    // Plain literal: 5, -2.5, .75, 1e-3
    if starts_numeric(s) {
        if let Ok(value) = s.parse::<f32>() {
            return value;
        }
    }

    if let Some(i) = s.find('+') {
        return eval_clean(&s[..i], vars) + eval_clean(&s[i + 1..], vars);
    }

    if let Some(i) = find_binary_minus(s) {
        return eval_clean(&s[..i], vars) - eval_clean(&s[i + 1..], vars);
    }

    if let Some(i) = s.find('*') {
        return eval_clean(&s[..i], vars) * eval_clean(&s[i + 1..], vars);
    }

    if let Some(i) = s.find('/') {
        let denominator = eval_clean(&s[i + 1..], vars);
        if denominator == 0.0 {
            return 0.0;
        }
        return eval_clean(&s[..i], vars) / denominator;
    }

    if let Some(value) = eval_trig(s, vars) {
        return value;
    }

    if s.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        return leading_number(s);
    }

    vars.get(s)
}

fn starts_numeric(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.')
}

/// Index of the first `-` after the first character; a leading one is a sign
fn find_binary_minus(s: &str) -> Option<usize> {
    s.char_indices().skip(1).find(|&(_, c)| c == '-').map(|(i, _)| i)
}

fn eval_trig(s: &str, vars: &VariableStore) -> Option<f32> {
    let functions: [(&str, fn(f32) -> f32); 2] = [("sin(", f32::sin), ("cos(", f32::cos)];
    for (prefix, func) in functions {
        if let Some(rest) = s.strip_prefix(prefix) {
            if let Some(end) = rest.find(')') {
                let degrees = eval_clean(&rest[..end], vars);
                return Some(func(degrees.to_radians()));
            }
        }
    }
    None
}

/// Best-effort conversion of a numeric prefix; trailing text is ignored
fn leading_number(s: &str) -> f32 {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    s[..end].parse().unwrap_or(0.0)
}
