use std::collections::HashSet;

/// Longest worksheet name a workbook accepts, in characters.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Makes `name` acceptable as a worksheet name: forbidden characters become `_`,
/// surrounding apostrophes are dropped and the result is cut to 31 characters.
#[must_use]
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');
    let truncated: String = cleaned.chars().take(MAX_SHEET_NAME_LEN).collect();
    if truncated.trim().is_empty() {
        "Sheet".to_string()
    } else {
        truncated
    }
}

/// Hands out distinct worksheet names within one workbook.
///
/// Names compare case-insensitively; a taken name gets a ` (n)` suffix, shortening
/// the base so the whole stays within 31 characters.
#[derive(Debug, Default)]
pub struct SheetNames {
    taken: HashSet<String>,
}

impl SheetNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a sanitized name for `wanted` that no earlier call returned.
    pub fn claim(&mut self, wanted: &str) -> String {
        let base = sanitize_sheet_name(wanted);
        let mut candidate = base.clone();
        let mut n = 2;
        while self.taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(keep).collect();
            candidate = format!("{}{suffix}", stem.trim_end());
            n += 1;
        }
        let _ = self.taken.insert(candidate.to_lowercase());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_characters_are_replaced() {
        assert_eq!(sanitize_sheet_name("a/b:c[1]?*\\"), "a_b_c_1____");
    }

    #[test]
    fn test_long_names_are_cut() {
        let name = "x".repeat(40);
        assert_eq!(sanitize_sheet_name(&name).chars().count(), MAX_SHEET_NAME_LEN);
        let accented = "é".repeat(40);
        assert_eq!(sanitize_sheet_name(&accented).chars().count(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn test_blank_names_get_a_default() {
        assert_eq!(sanitize_sheet_name("  "), "Sheet");
        assert_eq!(sanitize_sheet_name("''"), "Sheet");
    }

    #[test]
    fn test_claim_deduplicates() {
        let mut names = SheetNames::new();
        assert_eq!(names.claim("Fusion"), "Fusion");
        assert_eq!(names.claim("fusion"), "fusion (2)");
        assert_eq!(names.claim("Fusion"), "Fusion (3)");
    }

    #[test]
    fn test_claim_keeps_suffix_within_limit() {
        let mut names = SheetNames::new();
        let long = "y".repeat(31);
        assert_eq!(names.claim(&long), long);
        let second = names.claim(&long);
        assert_eq!(second.chars().count(), MAX_SHEET_NAME_LEN);
        assert!(second.ends_with(" (2)"));
    }
}
