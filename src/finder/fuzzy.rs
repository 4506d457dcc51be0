//! Subsequence matching for command bar suggestions

/// Score `candidate` against `pattern`, or `None` if the pattern's
/// characters don't all appear in order. Case-insensitive.
///
/// Consecutive runs and a match at the start of the candidate score higher;
/// gaps cost a point each.
pub fn score(pattern: &str, candidate: &str) -> Option<i64> {
    if pattern.is_empty() {
        return Some(0);
    }

    let mut pattern_chars = pattern.chars().flat_map(char::to_lowercase).peekable();
    let mut score = 0i64;
    let mut last_match: Option<usize> = None;

    for (idx, ch) in candidate.chars().flat_map(char::to_lowercase).enumerate() {
        let Some(&want) = pattern_chars.peek() else {
            break;
        };
        if ch != want {
            continue;
        }
        pattern_chars.next();

        score += 10;
        match last_match {
            Some(prev) if prev + 1 == idx => score += 15,
            Some(prev) => score -= (idx - prev - 1) as i64,
            None if idx == 0 => score += 20,
            None => score -= idx as i64,
        }
        last_match = Some(idx);
    }

    if pattern_chars.peek().is_some() {
        return None;
    }
    Some(score)
}

/// Candidates matching `pattern`, best first. Ties keep their input order.
pub fn rank<'a>(pattern: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut scored: Vec<(i64, usize, &str)> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(i, c)| score(pattern, c).map(|s| (s, i, c)))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subsequence_required() {
        assert!(score("mv", "move.script").is_some());
        assert!(score("vm", "move.script").is_none());
        assert!(score("xyz", "orbit.rhai").is_none());
    }

    #[test]
    fn matching_ignores_case() {
        assert!(score("runp", "RunPython").is_some());
    }

    #[test]
    fn empty_pattern_matches_everything() {
        assert_eq!(rank("", ["b", "a"]), vec!["b", "a"]);
    }

    #[test]
    fn prefix_and_contiguous_rank_first() {
        let ranked = rank("orb", ["color_orbit.rhai", "orbit.rhai", "o_r_b.txt"]);
        assert_eq!(ranked, vec!["orbit.rhai", "o_r_b.txt", "color_orbit.rhai"]);
    }
}
