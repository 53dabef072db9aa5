//! Plain-text rendering of terms, lists and progress.

use jargon_core::{format_date, Progress, SearchLinks, Term, ViewState};

/// One line per visible term, or the view's empty-state message.
pub fn term_list(view: &ViewState, terms: &[Term]) -> String {
    let visible = view.visible(terms);
    if visible.is_empty() {
        return view.empty_message();
    }
    visible
        .iter()
        .map(|term| summary_line(term))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `[x] Label  (id)  added Jan 1, 2024`
pub fn summary_line(term: &Term) -> String {
    let mark = if term.understood { 'x' } else { ' ' };
    format!(
        "[{mark}] {}  ({})  added {}",
        term.term,
        term.id,
        format_date(&term.date_added)
    )
}

/// Full record with search links.
pub fn term_detail(term: &Term) -> String {
    let understood = match &term.date_understood {
        Some(date) if term.understood => format_date(date),
        _ => "no".to_string(),
    };
    let mut lines = vec![
        term.term.clone(),
        field_line("id", &term.id),
        field_line("added", &format_date(&term.date_added)),
        field_line("understood", &understood),
    ];
    for (label, value) in [
        ("definition", &term.definition),
        ("thoughts", &term.initial_thoughts),
        ("notes", &term.notes),
        ("eli5", &term.eli5),
    ] {
        if let Some(text) = value.as_deref().filter(|text| !text.is_empty()) {
            lines.push(field_line(label, text));
        }
    }
    let links = SearchLinks::for_label(&term.term);
    lines.push(field_line("google", &links.google));
    lines.push(field_line("wikipedia", &links.wikipedia));
    lines.join("\n")
}

fn field_line(label: &str, value: &str) -> String {
    format!("  {:<13}{value}", format!("{label}:"))
}

pub fn progress(progress: &Progress) -> String {
    format!(
        "{} of {} terms understood ({}%)",
        progress.understood, progress.total, progress.percent
    )
}

#[cfg(test)]
mod tests {
    use super::{progress, summary_line, term_detail, term_list};
    use jargon_core::{Progress, StatusFilter, Tab, Term, ViewState};

    fn term(id: &str, label: &str, understood: bool) -> Term {
        Term {
            id: id.to_string(),
            term: label.to_string(),
            definition: Some(String::new()),
            understood,
            date_added: "2024-01-01T00:00:00.000Z".to_string(),
            date_understood: understood.then(|| "2024-03-05T10:00:00.000Z".to_string()),
            initial_thoughts: None,
            notes: Some("see RFC 9110".to_string()),
            eli5: None,
        }
    }

    #[test]
    fn summary_line_marks_status() {
        assert_eq!(
            summary_line(&term("a", "Monad", false)),
            "[ ] Monad  (a)  added Jan 1, 2024"
        );
        assert!(summary_line(&term("b", "Functor", true)).starts_with("[x] Functor"));
    }

    #[test]
    fn list_shows_only_matching_status() {
        let terms = vec![term("a", "Monad", false), term("b", "Functor", true)];
        let output = term_list(&ViewState::new(StatusFilter::Understood), &terms);
        assert!(output.contains("Functor"));
        assert!(!output.contains("Monad"));
    }

    #[test]
    fn empty_list_uses_view_message() {
        let terms = vec![term("a", "Monad", false)];
        let mut view = ViewState::new(StatusFilter::NotUnderstood);
        view.select_tab(Tab::Search);
        view.set_query("zzz");
        assert_eq!(term_list(&view, &terms), "No terms found matching \"zzz\"");

        let view = ViewState::new(StatusFilter::NotUnderstood);
        assert_eq!(
            term_list(&view, &[]),
            "No terms added yet. Start by adding some terms you want to learn!"
        );
    }

    #[test]
    fn detail_skips_empty_fields_and_links_searches() {
        let output = term_detail(&term("a", "Monad", true));
        assert!(output.contains("understood:  Mar 5, 2024"));
        assert!(output.contains("notes:       see RFC 9110"));
        assert!(!output.contains("definition:"));
        assert!(!output.contains("thoughts:"));
        assert!(output.contains("https://www.google.com/search?q=Monad"));
    }

    #[test]
    fn detail_lines_are_aligned() {
        let output = term_detail(&term("a", "Monad", false));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Monad");
        assert_eq!(lines[1], "  id:          a");
        assert_eq!(lines[2], "  added:       Jan 1, 2024");
        assert_eq!(lines[3], "  understood:  no");
        assert_eq!(lines[4], "  notes:       see RFC 9110");
        assert!(lines[6].starts_with("  wikipedia:   https://en.wikipedia.org/"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn progress_line() {
        let terms = vec![term("a", "Monad", false), term("b", "Functor", true)];
        assert_eq!(
            progress(&Progress::of(&terms)),
            "1 of 2 terms understood (50%)"
        );
    }
}
