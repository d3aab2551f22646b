use crate::quiz::{Question, Quiz};
use log::debug;

/// Quizmaster navigation through a quiz, one question on screen at a time.
pub struct Presenter<'a> {
    quiz: &'a Quiz,
    round: usize,
    question: usize,
    show_answer: bool,
}

impl<'a> Presenter<'a> {
    pub fn new(quiz: &'a Quiz) -> Self {
        Presenter {
            quiz,
            round: 0,
            question: 0,
            show_answer: false,
        }
    }

    pub fn position(&self) -> (usize, usize) {
        (self.round, self.question)
    }

    pub fn current(&self) -> Option<&'a Question> {
        self.quiz
            .rounds
            .get(self.round)
            .and_then(|round| round.questions.get(self.question))
    }

    pub fn answer_shown(&self) -> bool {
        self.show_answer
    }

    pub fn reveal(&mut self) {
        self.show_answer = true;
    }

    pub fn hide(&mut self) {
        self.show_answer = false;
    }

    fn round_len(&self, round: usize) -> usize {
        self.quiz
            .rounds
            .get(round)
            .map_or(0, |round| round.questions.len())
    }

    /// Move to the next question, continuing into the next round. Stays on
    /// the last question of the quiz.
    pub fn next(&mut self) {
        self.show_answer = false;

        if self.question + 1 < self.round_len(self.round) {
            self.question += 1;
        } else if self.round + 1 < self.quiz.rounds.len() {
            self.round += 1;
            self.question = 0;
        }

        debug!("Now at round {}, question {}", self.round, self.question);
    }

    /// Move to the previous question, continuing into the last question of
    /// the previous round. Stays on the first question of the quiz.
    pub fn prev(&mut self) {
        self.show_answer = false;

        if self.question > 0 {
            self.question -= 1;
        } else if self.round > 0 {
            self.round -= 1;
            self.question = self.round_len(self.round).saturating_sub(1);
        }

        debug!("Now at round {}, question {}", self.round, self.question);
    }

    /// Jump to the first question of `round`. Out of range rounds are
    /// ignored.
    pub fn go_to_round(&mut self, round: usize) {
        if round < self.quiz.rounds.len() {
            self.round = round;
            self.question = 0;
            self.show_answer = false;
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn walks_across_rounds() {
        let quiz = Quiz::builtin().unwrap();
        let mut presenter = Presenter::new(&quiz);

        for _ in 0..4 {
            presenter.next();
        }
        assert_eq!(presenter.position(), (0, 4));

        presenter.next();
        assert_eq!(presenter.position(), (1, 0));

        presenter.prev();
        assert_eq!(presenter.position(), (0, 4));
    }

    #[test]
    fn stays_inside_the_quiz() {
        let quiz = Quiz::builtin().unwrap();
        let mut presenter = Presenter::new(&quiz);

        presenter.prev();
        assert_eq!(presenter.position(), (0, 0));

        for _ in 0..100 {
            presenter.next();
        }
        assert_eq!(presenter.position(), (5, 4));
        assert!(presenter.current().is_some());
    }

    #[test]
    fn moving_hides_the_answer() {
        let quiz = Quiz::builtin().unwrap();
        let mut presenter = Presenter::new(&quiz);

        presenter.go_to_round(4);
        assert!(presenter.current().unwrap().is_geo());

        presenter.reveal();
        assert!(presenter.answer_shown());
        presenter.next();
        assert!(!presenter.answer_shown());

        presenter.reveal();
        presenter.go_to_round(17);
        assert!(presenter.answer_shown());
        assert_eq!(presenter.position(), (4, 1));

        presenter.hide();
        assert!(!presenter.answer_shown());
    }
}
