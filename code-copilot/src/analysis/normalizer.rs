//! Lenient parser turning free-form model output into [`AnalysisSections`].
//!
//! The generator is not schema-constrained, so parsing never fails: sections
//! whose marker is absent stay empty. Text before the first marker is dropped,
//! while unmarked lines inside a section are kept as that section's content.

use crate::types::AnalysisSections;

pub const DESCRIPTION_MARKER: &str = "**What it does:**";
pub const SECURITY_MARKER: &str = "**Security Issues:**";
pub const SUGGESTIONS_MARKERS: [&str; 2] = ["**Suggestions:**", "**Suggested Improvements:**"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    SecurityIssues,
    Suggestions,
}

impl Section {
    fn from_marker(line: &str) -> Option<Self> {
        if line.contains(DESCRIPTION_MARKER) {
            Some(Section::Description)
        } else if line.contains(SECURITY_MARKER) {
            Some(Section::SecurityIssues)
        } else if SUGGESTIONS_MARKERS.iter().any(|m| line.contains(*m)) {
            Some(Section::Suggestions)
        } else {
            None
        }
    }
}

/// Split raw analysis text into description, security issues and suggestions
pub fn normalize(raw_text: &str) -> AnalysisSections {
    let mut sections = AnalysisSections::default();
    let mut current: Option<Section> = None;

    for line in raw_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(section) = Section::from_marker(line) {
            current = Some(section);
            continue;
        }

        match current {
            None => {}
            Some(Section::Description) => {
                if !sections.description.is_empty() {
                    sections.description.push(' ');
                }
                sections.description.push_str(line);
            }
            Some(Section::SecurityIssues) => {
                push_item(&mut sections.security_issues, strip_bullet(line, false))
            }
            Some(Section::Suggestions) => {
                push_item(&mut sections.suggestions, strip_bullet(line, true))
            }
        }
    }

    sections.description.truncate(sections.description.trim_end().len());
    sections
}

/// A bare glyph carries no content and is not kept as an item
fn push_item(items: &mut Vec<String>, item: &str) {
    if !item.is_empty() {
        items.push(item.to_string());
    }
}

/// Remove one leading `*` or `-` bullet, or a `12.` style number when
/// `numbered` is set. Lines without a recognised prefix come back unchanged.
fn strip_bullet(line: &str, numbered: bool) -> &str {
    if let Some(rest) = line.strip_prefix(|c: char| c == '*' || c == '-') {
        return rest.trim_start();
    }

    if numbered {
        let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits > 0 {
            if let Some(rest) = line[digits..].strip_prefix('.') {
                return rest.trim_start();
            }
        }
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = "\
Sure! Here is my analysis of your code.

**What it does:**
The program reads a file name from stdin
and prints the file contents.

**Security Issues:**
* Path traversal through unchecked input
- No limit on file size (DoS risk)

**Suggestions:**
1. Validate the path against an allow list
2. Stream the file instead of reading it whole
10. Add error handling
";

    #[test]
    fn test_all_sections() {
        let sections = normalize(FULL_RESPONSE);

        assert_eq!(
            sections.description,
            "The program reads a file name from stdin and prints the file contents."
        );
        assert_eq!(
            sections.security_issues,
            vec![
                "Path traversal through unchecked input",
                "No limit on file size (DoS risk)",
            ]
        );
        assert_eq!(
            sections.suggestions,
            vec![
                "Validate the path against an allow list",
                "Stream the file instead of reading it whole",
                "Add error handling",
            ]
        );
    }

    #[test]
    fn test_no_markers_yields_empty_sections() {
        let sections = normalize("The model rambled\n* with bullets\n1. and numbers\n");
        assert!(sections.is_empty());
        assert_eq!(normalize(""), AnalysisSections::default());
    }

    #[test]
    fn test_reordered_and_missing_sections() {
        let text = "**Suggested Improvements:**\n- Use a buffered reader\n\n**What it does:**\nEchoes input.\n";
        let sections = normalize(text);

        assert_eq!(sections.description, "Echoes input.");
        assert!(sections.security_issues.is_empty());
        assert_eq!(sections.suggestions, vec!["Use a buffered reader"]);
    }

    #[test]
    fn test_unmarked_lines_are_kept_verbatim() {
        let text = "**Security Issues:**\nNone found.\n**Suggestions:**\n  Consider adding tests.  \n";
        let sections = normalize(text);

        assert_eq!(sections.security_issues, vec!["None found."]);
        assert_eq!(sections.suggestions, vec!["Consider adding tests."]);
    }

    #[test]
    fn test_numbering_only_stripped_for_suggestions() {
        let text = "**Security Issues:**\n1. Hardcoded password\n**Suggestions:**\n1. Read it from the environment\n";
        let sections = normalize(text);

        assert_eq!(sections.security_issues, vec!["1. Hardcoded password"]);
        assert_eq!(sections.suggestions, vec!["Read it from the environment"]);
    }

    #[test]
    fn test_only_one_bullet_glyph_is_removed() {
        assert_eq!(strip_bullet("** bold start", false), "* bold start");
        assert_eq!(strip_bullet("- - nested", false), "- nested");
        assert_eq!(strip_bullet("42 without dot", true), "42 without dot");
    }

    #[test]
    fn test_bare_glyph_lines_are_skipped() {
        let sections = normalize("**Security Issues:**\n-\n*\n**Suggestions:**\n1.\n- real\n");

        assert!(sections.security_issues.is_empty());
        assert_eq!(sections.suggestions, vec!["real"]);
    }

    #[test]
    fn test_marker_line_content_is_discarded() {
        let text = "**What it does:** inline text is dropped\nKept line\n";
        assert_eq!(normalize(text).description, "Kept line");
    }

    #[test]
    fn test_blank_lines_do_not_end_a_section() {
        let text = "**What it does:**\nFirst part.\n\n\nSecond part.\n";
        assert_eq!(normalize(text).description, "First part. Second part.");
    }
}
