use crate::point::GeoPoint;
use crate::score::MAX_GEO_SCORE;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

const BUILTIN: &str = include_str!("../data/quiz.json");

/// Separates the short answer from its explanation, e.g.
/// `"Laos — bordered by Thailand, ..."`.
const EXPLANATION_SEPARATOR: &str = " — ";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    /// Where the pictured place is, for map guessing questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
}

impl Question {
    pub fn is_geo(&self) -> bool {
        self.coordinates.is_some()
    }

    /// Most points this question can earn.
    pub fn max_score(&self) -> u32 {
        if self.is_geo() {
            MAX_GEO_SCORE
        } else {
            1
        }
    }

    /// The answer without its explanation.
    pub fn short_answer(&self) -> &str {
        self.answer
            .split(EXPLANATION_SEPARATOR)
            .next()
            .unwrap_or(&self.answer)
    }

    /// Whether `given` matches the answer, ignoring case and surrounding
    /// whitespace. Both the full answer and the short answer are accepted.
    pub fn accepts(&self, given: &str) -> bool {
        let given = normalize(given);
        given == normalize(&self.answer) || given == normalize(self.short_answer())
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub name: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub is_interactive: bool,
}

impl Round {
    pub fn max_score(&self) -> u32 {
        self.questions.iter().map(Question::max_score).sum()
    }
}

/// A question together with its position in the quiz.
#[derive(Copy, Clone, Debug)]
pub struct Entry<'a> {
    pub index: usize,
    pub round_index: usize,
    pub question_index: usize,
    pub round_name: &'a str,
    pub question: &'a Question,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub rounds: Vec<Round>,
}

impl Quiz {
    /// The quiz shipped with the crate.
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN).context("Bundled quiz is malformed")
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let quiz: Quiz = serde_json::from_reader(reader).context("Could not parse quiz")?;
        Ok(quiz)
    }

    pub fn open(path: &Path) -> Result<Self> {
        let fh = std::fs::File::open(path)
            .with_context(|| format!("Could not open quiz {}", path.display()))?;
        let quiz = Self::from_reader(fh)
            .with_context(|| format!("Could not load quiz {}", path.display()))?;

        info!(
            "Loaded {} rounds, {} questions from {}",
            quiz.rounds.len(),
            quiz.question_count(),
            path.display()
        );

        Ok(quiz)
    }

    /// All questions, round after round.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        self.rounds
            .iter()
            .enumerate()
            .flat_map(|(round_index, round)| {
                round
                    .questions
                    .iter()
                    .enumerate()
                    .map(move |(question_index, question)| {
                        (round_index, round, question_index, question)
                    })
            })
            .enumerate()
            .map(|(index, (round_index, round, question_index, question))| Entry {
                index,
                round_index,
                question_index,
                round_name: &round.name,
                question,
            })
    }

    pub fn entry(&self, index: usize) -> Option<Entry<'_>> {
        self.entries().nth(index)
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.entry(index).map(|entry| entry.question)
    }

    pub fn question_count(&self) -> usize {
        self.rounds.iter().map(|round| round.questions.len()).sum()
    }

    /// Flat index of the first question of `round`.
    pub fn round_start(&self, round: usize) -> Option<usize> {
        if round >= self.rounds.len() {
            return None;
        }

        Some(self.rounds[..round].iter().map(|r| r.questions.len()).sum())
    }

    pub fn max_score(&self) -> u32 {
        self.rounds.iter().map(Round::max_score).sum()
    }
}
