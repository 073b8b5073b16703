pub fn truncate_with_ellipsis(input: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= max_chars {
        return input.to_string();
    }
    if max_chars == 1 {
        return ".".to_string();
    }

    let mut out = chars[..max_chars - 1].iter().collect::<String>();
    out.push('…');
    out
}

/// Case-insensitive substring test. `needle` must already be lowercased.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_with_ellipsis("Photoshop", 5), "Phot…");
        assert_eq!(truncate_with_ellipsis("Größe", 4), "Grö…");
        assert_eq!(truncate_with_ellipsis("abc", 3), "abc");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
        assert_eq!(truncate_with_ellipsis("abc", 1), ".");
    }

    #[test]
    fn folded_contains_ignores_case() {
        assert!(contains_folded("Google Chrome", "chrome"));
        assert!(contains_folded("ÜBER", "über"));
        assert!(!contains_folded("WinRAR", "zip"));
    }
}
