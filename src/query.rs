//! Query/filter engine: derived, read-only views over the question list.
//!
//! Nothing here mutates the store; the stored order is never altered.

use crate::model::{Category, Question};

/// View selector as the UI sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Full list in stored order (newest-posted first).
    All,
    /// Full list sorted by descending likes; ties keep stored order.
    Popular,
    /// Only questions filed under this category.
    Category(Category),
}

impl Filter {
    /// Parse a filter token: `"all"`, `"popular"`, or a category name.
    /// Matching is exact and case-sensitive, like the tokens on the filter
    /// buttons.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "popular" => Some(Self::Popular),
            _ => Category::parse(s).map(Self::Category),
        }
    }
}

pub(crate) fn list(questions: &[Question], filter: Filter) -> Vec<&Question> {
    match filter {
        Filter::All => questions.iter().collect(),
        Filter::Popular => {
            let mut view: Vec<&Question> = questions.iter().collect();
            // sort_by is stable, so equal like counts keep stored order.
            view.sort_by(|a, b| b.likes.cmp(&a.likes));
            view
        }
        Filter::Category(category) => questions.iter().filter(|q| q.category == category).collect(),
    }
}

pub(crate) fn search<'a>(questions: &'a [Question], term: &str) -> Vec<&'a Question> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return list(questions, Filter::All);
    }
    questions
        .iter()
        .filter(|q| {
            q.title.to_lowercase().contains(&term)
                || q.details.to_lowercase().contains(&term)
                || q.category.as_str().contains(&term)
                || q.author.to_lowercase().contains(&term)
        })
        .collect()
}
