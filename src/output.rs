// Plain-text listing output.
// Pads names to a common width and truncates descriptions to a fixed line budget.

use crate::github::Repo;

/// Maximum rendered line length, padding included.
const MAX_LINE_CHARACTERS: usize = 200;

/// Render one line per repo: the full name padded with trailing spaces to
/// the longest name in the list, a tab, then the description truncated so
/// the line never exceeds [`MAX_LINE_CHARACTERS`]. Truncation cuts at a
/// character boundary with no ellipsis.
pub fn render_listing(repos: &[Repo]) -> Vec<String> {
    let widest_name = repos
        .iter()
        .map(|repo| repo.full_name.chars().count())
        .max()
        .unwrap_or(0);

    repos
        .iter()
        .map(|repo| {
            let name_len = repo.full_name.chars().count();
            let padding = " ".repeat(widest_name - name_len);
            let description_limit = MAX_LINE_CHARACTERS.saturating_sub(name_len + padding.len());

            let description: String = repo
                .description
                .as_deref()
                .unwrap_or("")
                .chars()
                .take(description_limit)
                .collect();

            format!("{}{}\t{}", repo.full_name, padding, description)
        })
        .collect()
}

/// Print the listing to stdout. An empty list prints nothing.
pub fn print_listing(repos: &[Repo]) {
    for line in render_listing(repos) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, description: Option<&str>) -> Repo {
        Repo {
            id: 0,
            full_name: name.to_string(),
            description: description.map(String::from),
            html_url: String::new(),
            language: None,
        }
    }

    #[test]
    fn test_names_pad_to_the_widest() {
        let repos = vec![
            repo("a/b", Some("three")),
            repo("aa/bbbb", Some("seven")),
            repo("x", Some("one")),
        ];

        let lines = render_listing(&repos);
        assert_eq!(lines[0], "a/b    \tthree");
        assert_eq!(lines[1], "aa/bbbb\tseven");
        assert_eq!(lines[2], "x      \tone");

        // Every name column is exactly as wide as the longest name.
        for line in &lines {
            assert_eq!(line.find('\t'), Some(7));
        }
    }

    #[test]
    fn test_long_description_cut_to_line_budget() {
        let long = "d".repeat(500);
        let repos = vec![repo("abc", Some(&long))];

        let lines = render_listing(&repos);
        let description = lines[0].split('\t').nth(1).unwrap();
        assert_eq!(description.len(), MAX_LINE_CHARACTERS - 3);
        // No ellipsis marker; just a hard cut.
        assert!(description.chars().all(|c| c == 'd'));
    }

    #[test]
    fn test_short_description_printed_unmodified() {
        let repos = vec![repo("abc", Some("short"))];
        assert_eq!(render_listing(&repos), vec!["abc\tshort"]);
    }

    #[test]
    fn test_missing_description_is_empty() {
        let repos = vec![repo("abc", None)];
        assert_eq!(render_listing(&repos), vec!["abc\t"]);
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        assert!(render_listing(&[]).is_empty());
    }
}
