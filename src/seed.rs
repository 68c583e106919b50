//! Seed questions shown on a fresh board, before anyone has posted.

use crate::model::{AuthorId, Category, Question};

fn sample(
    id: i64,
    title: &str,
    details: &str,
    category: Category,
    author: &str,
    author_id: &str,
    likes: u32,
    comments: u32,
    date: &str,
) -> Question {
    Question {
        id,
        title: title.to_string(),
        details: details.to_string(),
        category,
        author: author.to_string(),
        author_id: AuthorId::Sample(author_id.to_string()),
        likes,
        comments,
        date: date.to_string(),
        is_sample: true,
    }
}

/// The fixed sample set. Ids are offsets from `now_ms` so they never collide
/// with ids minted for real posts later in the same session.
pub(crate) fn sample_questions(now_ms: i64) -> Vec<Question> {
    vec![
        sample(
            now_ms - 500_000,
            "What if humans could photosynthesize like plants?",
            "How would society change if we could get our energy from sunlight? Would we still \
             need to eat? Would restaurants become obsolete?",
            Category::Science,
            "Alex Johnson",
            "sample1",
            42,
            18,
            "2023-10-15",
        ),
        sample(
            now_ms - 400_000,
            "What if the Roman Empire never fell?",
            "How would world history be different if Rome continued to dominate Europe and the \
             Mediterranean? Would we have advanced faster technologically?",
            Category::History,
            "Maria Rodriguez",
            "sample2",
            37,
            24,
            "2023-10-12",
        ),
        sample(
            now_ms - 300_000,
            "What if we could instantly transfer knowledge to our brains?",
            "Imagine downloading skills like in The Matrix. How would education and work change? \
             Would universities still exist?",
            Category::Technology,
            "Sam Chen",
            "sample3",
            55,
            31,
            "2023-10-10",
        ),
        sample(
            now_ms - 200_000,
            "What if animals could talk to humans?",
            "How would our relationship with animals change if we could communicate with them? \
             Would we still eat meat?",
            Category::General,
            "Jamie Wilson",
            "sample4",
            28,
            15,
            "2023-10-08",
        ),
        sample(
            now_ms - 100_000,
            "What if we discovered life on Mars?",
            "How would this discovery change religion, science, and our place in the universe? \
             Would we try to communicate?",
            Category::Science,
            "Dr. Evan Park",
            "sample5",
            63,
            42,
            "2023-10-05",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_unique_and_older_than_now() {
        let now_ms = 1_700_000_000_000;
        let questions = sample_questions(now_ms);
        assert_eq!(questions.len(), 5);

        let mut ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!(questions.iter().all(|q| q.id < now_ms));
        assert!(questions.iter().all(|q| q.is_sample));
    }
}
