use crate::point::GeoPoint;
use crate::quiz::{Question, Quiz};
use crate::score;
use anyhow::{anyhow, bail, Result};
use log::{debug, info};
use serde::Serialize;

#[derive(Clone, Debug, Default)]
struct Slot {
    answer: Option<String>,
    guess: Option<GeoPoint>,
    locked: bool,
    geo_score: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoundScore {
    pub name: String,
    pub correct: u32,
    pub total: u32,
}

/// One team's answers to a quiz.
///
/// Selections can change until a question is locked. Geo questions are
/// scored at the moment they are locked.
pub struct AnswerSheet<'a> {
    quiz: &'a Quiz,
    team: String,
    slots: Vec<Slot>,
}

impl<'a> AnswerSheet<'a> {
    pub fn new(quiz: &'a Quiz, team: &str) -> Self {
        AnswerSheet {
            quiz,
            team: team.to_string(),
            slots: vec![Slot::default(); quiz.question_count()],
        }
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Slot> {
        self.slots
            .get_mut(index)
            .ok_or_else(|| anyhow!("No question {}", index))
    }

    /// Record a text answer. Has no effect on a locked question.
    pub fn select_answer(&mut self, index: usize, answer: &str) -> Result<()> {
        let slot = self.slot_mut(index)?;

        if !slot.locked {
            slot.answer = Some(answer.to_string());
        }

        Ok(())
    }

    /// Record a map guess. Has no effect on a locked question.
    pub fn select_guess(&mut self, index: usize, guess: GeoPoint) -> Result<()> {
        let slot = self.slot_mut(index)?;

        if !slot.locked {
            slot.guess = Some(guess);
        }

        Ok(())
    }

    /// Commit the current selection for question `index`.
    ///
    /// Geo questions need a guess, all others a non-empty answer. A geo
    /// question is scored here and the points are returned; for other
    /// questions the result is `None`.
    pub fn lock(&mut self, index: usize) -> Result<Option<u32>> {
        let quiz = self.quiz;
        let question = quiz
            .question(index)
            .ok_or_else(|| anyhow!("No question {}", index))?;
        let slot = self.slot_mut(index)?;

        if slot.locked {
            return Ok(slot.geo_score);
        }

        match question.coordinates {
            Some(actual) => {
                let guess = match slot.guess {
                    Some(guess) => guess,
                    None => bail!("Question {} has no guess to lock", index),
                };

                let (distance, points) = score::score_guess(guess, actual);
                info!("Question {}: guess {:.0} km away, {} points", index, distance, points);
                slot.geo_score = Some(points);
            }
            None => {
                if slot.answer.as_deref().map_or(true, str::is_empty) {
                    bail!("Question {} has no answer to lock", index);
                }
            }
        }

        slot.locked = true;
        Ok(slot.geo_score)
    }

    pub fn is_locked(&self, index: usize) -> bool {
        self.slots.get(index).map_or(false, |slot| slot.locked)
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(|slot| slot.answer.as_deref())
    }

    pub fn guess(&self, index: usize) -> Option<GeoPoint> {
        self.slots.get(index).and_then(|slot| slot.guess)
    }

    pub fn geo_score(&self, index: usize) -> Option<u32> {
        self.slots.get(index).and_then(|slot| slot.geo_score)
    }

    /// Whether the text answer for question `index` is right.
    pub fn is_correct(&self, index: usize) -> bool {
        match (self.quiz.question(index), self.answer(index)) {
            (Some(question), Some(answer)) => question.accepts(answer),
            _ => false,
        }
    }

    fn points(&self, index: usize, question: &Question) -> u32 {
        if question.is_geo() {
            self.geo_score(index).unwrap_or(0)
        } else if self.is_correct(index) {
            1
        } else {
            0
        }
    }

    /// Points from locked questions only.
    pub fn running_score(&self) -> u32 {
        self.quiz
            .entries()
            .filter(|entry| self.is_locked(entry.index))
            .map(|entry| self.points(entry.index, entry.question))
            .sum()
    }

    /// Points from every question, locked or not.
    pub fn final_score(&self) -> u32 {
        let score: u32 = self
            .quiz
            .entries()
            .map(|entry| self.points(entry.index, entry.question))
            .sum();

        debug!("{} scored {} of {}", self.team, score, self.quiz.max_score());
        score
    }

    pub fn round_scores(&self) -> Vec<RoundScore> {
        let mut scores: Vec<RoundScore> = self
            .quiz
            .rounds
            .iter()
            .map(|round| RoundScore {
                name: round.name.clone(),
                correct: 0,
                total: round.max_score(),
            })
            .collect();

        for entry in self.quiz.entries() {
            scores[entry.round_index].correct += self.points(entry.index, entry.question);
        }

        scores
    }

    pub fn questions_answered(&self) -> usize {
        self.slots.iter().filter(|slot| slot.locked).count()
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    const NOISY_LE_GRAND: usize = 21;
    const NEWCASTLE: usize = 22;
    const DOWNING_STREET: usize = 24;

    #[test]
    fn lock_requires_a_selection() {
        let quiz = Quiz::builtin().unwrap();
        let mut sheet = AnswerSheet::new(&quiz, "Dad and Grandma");

        assert!(sheet.lock(0).is_err());
        assert!(sheet.lock(NEWCASTLE).is_err());
        assert!(sheet.lock(30).is_err());
        assert_eq!(sheet.questions_answered(), 0);

        sheet.select_answer(0, "USA").unwrap();
        assert_eq!(sheet.lock(0).unwrap(), None);
        assert!(sheet.is_locked(0));
        assert_eq!(sheet.questions_answered(), 1);
    }

    #[test]
    fn cleared_answer_cannot_be_locked() {
        let quiz = Quiz::builtin().unwrap();
        let mut sheet = AnswerSheet::new(&quiz, "Dad and Grandma");

        sheet.select_answer(0, "").unwrap();
        assert!(sheet.lock(0).is_err());
        assert!(!sheet.is_locked(0));

        sheet.select_answer(0, "USA").unwrap();
        sheet.select_answer(0, "").unwrap();
        assert!(sheet.lock(0).is_err());
        assert_eq!(sheet.questions_answered(), 0);
    }

    #[test]
    fn locked_selection_cannot_change() {
        let quiz = Quiz::builtin().unwrap();
        let mut sheet = AnswerSheet::new(&quiz, "Nya and Gramps");

        sheet.select_answer(3, "Sora").unwrap();
        sheet.lock(3).unwrap();
        sheet.select_answer(3, "Veo").unwrap();
        assert_eq!(sheet.answer(3), Some("Sora"));

        let paris = GeoPoint::new(48.8566, 2.3522);
        sheet.select_guess(DOWNING_STREET, paris).unwrap();
        assert_eq!(sheet.lock(DOWNING_STREET).unwrap(), Some(2));
        sheet
            .select_guess(DOWNING_STREET, GeoPoint::new(0.0, 0.0))
            .unwrap();
        assert_eq!(sheet.guess(DOWNING_STREET), Some(paris));
        assert_eq!(sheet.lock(DOWNING_STREET).unwrap(), Some(2));

        assert!(sheet.select_answer(99, "x").is_err());
    }

    #[test]
    fn running_and_final_scores() {
        let quiz = Quiz::builtin().unwrap();
        let mut sheet = AnswerSheet::new(&quiz, "Alicia, Luca and Mum");

        sheet.select_answer(8, "Laos").unwrap();
        sheet.select_answer(9, "peru and bolivia").unwrap();
        sheet.select_answer(13, "Tricolon").unwrap();
        sheet.lock(8).unwrap();

        // Madrid is in the same region as Noisy-le-Grand, not within 500 km.
        sheet
            .select_guess(NOISY_LE_GRAND, GeoPoint::new(40.4168, -3.7038))
            .unwrap();
        assert_eq!(sheet.lock(NOISY_LE_GRAND).unwrap(), Some(1));

        // A guess that is never locked earns nothing.
        sheet
            .select_guess(NEWCASTLE, GeoPoint::new(-32.9, 151.8))
            .unwrap();

        assert_eq!(sheet.running_score(), 2);
        assert_eq!(sheet.final_score(), 4);
        assert_eq!(sheet.questions_answered(), 2);
        assert!(!sheet.is_correct(0));
    }

    #[test]
    fn scores_per_round() {
        let quiz = Quiz::builtin().unwrap();
        let mut sheet = AnswerSheet::new(&quiz, "Dad and Grandma");

        sheet.select_answer(25, "Charles Darwin").unwrap();
        sheet.lock(25).unwrap();
        sheet
            .select_guess(DOWNING_STREET, GeoPoint::new(51.5, -0.12))
            .unwrap();
        sheet.lock(DOWNING_STREET).unwrap();

        let rounds = sheet.round_scores();
        assert_eq!(rounds.len(), 6);
        assert_eq!(
            rounds[4],
            RoundScore {
                name: "GeoGuessr".to_string(),
                correct: 2,
                total: 10,
            }
        );
        assert_eq!(rounds[5].correct, 1);
        assert_eq!(rounds[5].total, 5);
        assert_eq!(rounds.iter().map(|r| r.correct).sum::<u32>(), sheet.final_score());
    }
}
