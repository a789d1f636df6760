use std::collections::BTreeMap;

use crate::{AnswerRecord, QuestionId, RespondentId, Score};

/// Scores collected during one wizard run.
///
/// Keyed by question id, at most one score per question. Recording a score
/// for a question that already has one overwrites it. Iteration is in
/// ascending question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    scores: BTreeMap<QuestionId, Score>,
}

impl AnswerSheet {
    /// Create a new empty answer sheet.
    pub fn new() -> Self {
        Self {
            scores: BTreeMap::new(),
        }
    }

    /// Insert or overwrite the score for a question.
    pub fn record(&mut self, question: QuestionId, score: Score) -> Option<Score> {
        self.scores.insert(question, score)
    }

    /// Get the score recorded for a question.
    pub fn get(&self, question: QuestionId) -> Option<Score> {
        self.scores.get(&question).copied()
    }

    /// Check if a question has been answered.
    pub fn contains(&self, question: QuestionId) -> bool {
        self.scores.contains_key(&question)
    }

    /// Get an iterator over all question-score pairs.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, Score)> + '_ {
        self.scores.iter().map(|(id, score)| (*id, *score))
    }

    /// Get the number of answered questions.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check if nothing has been answered yet.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Build the answer rows owned by `respondent`, one per recorded score.
    pub fn to_records(&self, respondent: RespondentId) -> Vec<AnswerRecord> {
        self.iter()
            .map(|(question_id, score)| AnswerRecord {
                respondent_id: respondent,
                question_id,
                score,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a AnswerSheet {
    type Item = (&'a QuestionId, &'a Score);
    type IntoIter = std::collections::btree_map::Iter<'a, QuestionId, Score>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: u8) -> Score {
        Score::new(value).unwrap()
    }

    #[test]
    fn record_and_get() {
        let mut sheet = AnswerSheet::new();
        sheet.record(QuestionId(1), score(4));

        assert_eq!(sheet.get(QuestionId(1)), Some(score(4)));
        assert_eq!(sheet.get(QuestionId(2)), None);
        assert!(sheet.contains(QuestionId(1)));
    }

    #[test]
    fn last_recorded_score_wins() {
        let mut sheet = AnswerSheet::new();
        assert_eq!(sheet.record(QuestionId(7), score(2)), None);
        assert_eq!(sheet.record(QuestionId(7), score(5)), Some(score(2)));

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get(QuestionId(7)), Some(score(5)));
    }

    #[test]
    fn records_follow_question_order() {
        let mut sheet = AnswerSheet::new();
        sheet.record(QuestionId(9), score(1));
        sheet.record(QuestionId(2), score(3));

        let records = sheet.to_records(RespondentId(11));
        let questions: Vec<_> = records.iter().map(|r| r.question_id).collect();
        assert_eq!(questions, vec![QuestionId(2), QuestionId(9)]);
        assert!(records.iter().all(|r| r.respondent_id == RespondentId(11)));
    }
}
