use guidance_core::model::{AssessmentQuestion, AssessmentResult, Topic};

/// One quiz question with its choices flattened for rendering. Option keys
/// come out in key order (the `BTreeMap` keeps them sorted).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub index: usize,
    pub question: String,
    pub options: Vec<(String, String)>,
}

#[must_use]
pub fn map_questions(questions: &[AssessmentQuestion]) -> Vec<QuestionVm> {
    questions
        .iter()
        .enumerate()
        .map(|(index, q)| QuestionVm {
            index,
            question: q.question.clone(),
            options: q
                .options
                .iter()
                .map(|(key, text)| (key.clone(), text.clone()))
                .collect(),
        })
        .collect()
}

/// One row of the stored-result table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultRowVm {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub correct: bool,
}

/// A topic's last stored evaluation, ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultTableVm {
    pub score_label: String,
    pub rows: Vec<ResultRowVm>,
}

/// Decodes and maps the stored result of a topic, `None` when the topic has
/// no (parseable) result.
#[must_use]
pub fn map_result_table(topic: &Topic) -> Option<ResultTableVm> {
    let result = AssessmentResult::parse(topic)?;
    let score_label = result
        .score
        .map_or_else(|| "Score: n/a".to_string(), |s| format!("Score: {s:.0}%"));
    let rows = result
        .evaluation
        .iter()
        .map(|row| ResultRowVm {
            question: row.question.clone(),
            user_answer: row.user_answer.clone().unwrap_or_default(),
            correct_answer: row.correct_answer.clone().unwrap_or_default(),
            correct: row.is_correct,
        })
        .collect();
    Some(ResultTableVm { score_label, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn questions_keep_their_index_and_sorted_options() {
        let questions = vec![AssessmentQuestion {
            question: "Which keyword moves ownership?".into(),
            options: BTreeMap::from([
                ("b".to_string(), "let".to_string()),
                ("a".to_string(), "move".to_string()),
            ]),
            answer: "a".into(),
        }];
        let vms = map_questions(&questions);
        assert_eq!(vms[0].index, 0);
        assert_eq!(vms[0].options[0].0, "a");
        assert_eq!(vms[0].options[1].0, "b");
    }

    #[test]
    fn result_table_maps_score_and_rows() {
        let mut topic = Topic::draft("Ownership", 2);
        topic.assessment_result = Some(serde_json::json!({
            "score": 66.7,
            "evaluation": [
                {"question": "Q1", "userAnswer": "a", "correctAnswer": "a", "isCorrect": true},
                {"question": "Q2", "userAnswer": "b", "correctAnswer": "c", "isCorrect": false}
            ]
        }));
        let table = map_result_table(&topic).unwrap();
        assert_eq!(table.score_label, "Score: 67%");
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[0].correct);
        assert_eq!(table.rows[1].correct_answer, "c");
    }

    #[test]
    fn topic_without_result_maps_to_none() {
        assert!(map_result_table(&Topic::draft("x", 1)).is_none());
    }
}
