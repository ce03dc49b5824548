use unicode_normalization::UnicodeNormalization;

/// Cleans a raw search term before the emptiness check and any lookup.
pub fn normalize_term(raw: &str) -> String {
    let mut term = raw.trim().to_string();

    if term.is_empty() {
        return term;
    }

    // Unicode normalization (NFKC)
    term = term.nfkc().collect();

    // Queries are single words; drop stray newlines from pasted text
    term = term.replace(['\n', '\r'], "").trim().to_string();

    term
}

#[cfg(test)]
mod tests {
    use super::normalize_term;

    #[test]
    fn trims_and_strips_newlines() {
        assert_eq!(normalize_term("  谢谢\n"), "谢谢");
        assert_eq!(normalize_term("加\n班"), "加班");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(normalize_term("   "), "");
        assert_eq!(normalize_term("\n\r"), "");
    }

    #[test]
    fn fullwidth_forms_are_normalized() {
        // NFKC folds full-width Latin into ASCII
        assert_eq!(normalize_term("ｈｓｋ"), "hsk");
    }
}
