use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use geoquiz::point::GeoPoint;
use geoquiz::quiz::Quiz;
use geoquiz::render;
use geoquiz::score;
use geoquiz::sheet::{AnswerSheet, RoundScore};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Score answers for the family trivia quiz")]
struct Options {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct QuizOption {
    /// Quiz file, the bundled quiz when omitted
    #[arg(long, short)]
    quiz: Option<PathBuf>,
}

impl QuizOption {
    fn load(&self) -> Result<Quiz> {
        match &self.quiz {
            Some(path) => Quiz::open(path),
            None => Quiz::builtin(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Distance in kilometers between two `lat,lng` points and its score
    Distance {
        #[arg(allow_hyphen_values = true)]
        a: GeoPoint,

        #[arg(allow_hyphen_values = true)]
        b: GeoPoint,
    },

    /// List the rounds of a quiz
    Rounds {
        #[command(flatten)]
        quiz: QuizOption,
    },

    /// Lock every answer in an answer file and print the scores as JSON
    Mark {
        #[command(flatten)]
        quiz: QuizOption,

        #[arg(long, short)]
        answers: PathBuf,
    },

    /// Score a map guess and draw it next to the true location
    Map {
        #[command(flatten)]
        quiz: QuizOption,

        /// Question index counted across all rounds
        #[arg(long, short = 'n')]
        question: usize,

        #[arg(long, short, allow_hyphen_values = true)]
        guess: GeoPoint,

        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Deserialize)]
struct AnswerEntry {
    question: usize,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    guess: Option<GeoPoint>,
}

#[derive(Deserialize)]
struct AnswerFile {
    team: String,
    answers: Vec<AnswerEntry>,
}

#[derive(Serialize)]
struct Report {
    team: String,
    rounds: Vec<RoundScore>,
    total: u32,
    max: u32,
    answered: usize,
}

fn load_answers(path: &Path) -> Result<AnswerFile> {
    let fh = std::fs::File::open(path)
        .with_context(|| format!("Could not open answers {}", path.display()))?;
    let file = serde_json::from_reader(fh)
        .with_context(|| format!("Could not parse answers {}", path.display()))?;

    Ok(file)
}

/// Select and lock every entry of `file`. Entries that cannot be locked are
/// logged and skipped.
fn mark(quiz: &Quiz, file: &AnswerFile) -> Report {
    let mut sheet = AnswerSheet::new(quiz, &file.team);

    for entry in file.answers.iter() {
        if let Some(answer) = &entry.answer {
            if let Err(err) = sheet.select_answer(entry.question, answer) {
                warn!("Skipping: {}", err);
                continue;
            }
        }

        if let Some(guess) = entry.guess {
            if let Err(err) = sheet.select_guess(entry.question, guess) {
                warn!("Skipping: {}", err);
                continue;
            }
        }

        if let Err(err) = sheet.lock(entry.question) {
            warn!("Skipping: {}", err);
        }
    }

    Report {
        team: sheet.team().to_string(),
        rounds: sheet.round_scores(),
        total: sheet.final_score(),
        max: quiz.max_score(),
        answered: sheet.questions_answered(),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Options::parse();

    match opt.command {
        Command::Distance { a, b } => {
            let (distance, points) = score::score_guess(a, b);
            println!("{:.1} km, {} points", distance, points);
        }
        Command::Rounds { quiz } => {
            let quiz = quiz.load()?;

            for (index, round) in quiz.rounds.iter().enumerate() {
                println!(
                    "Round {}: {} ({} questions, {} points)",
                    index + 1,
                    round.name,
                    round.questions.len(),
                    round.max_score()
                );
            }

            println!("Maximum score: {}", quiz.max_score());
        }
        Command::Mark { quiz, answers } => {
            let quiz = quiz.load()?;
            let report = mark(&quiz, &load_answers(&answers)?);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Map {
            quiz,
            question,
            guess,
            output,
        } => {
            let quiz = quiz.load()?;
            let actual = quiz
                .question(question)
                .ok_or_else(|| anyhow!("No question {}", question))?
                .coordinates
                .ok_or_else(|| anyhow!("Question {} is not a map question", question))?;

            let (distance, points) = score::score_guess(guess, actual);
            info!("Drawing map to {}", output.display());
            render::write_map(&output, Some(guess), Some(actual))?;

            println!("{:.1} km, {} points", distance, points);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    fn answer_file(json: &str) -> AnswerFile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn mark_scores_every_entry() {
        let quiz = Quiz::builtin().unwrap();
        let file = answer_file(
            r#"{
                "team": "Nya and Gramps",
                "answers": [
                    { "question": 8, "answer": "Laos" },
                    { "question": 24, "guess": { "lat": 48.8566, "lng": 2.3522 } }
                ]
            }"#,
        );

        let report = mark(&quiz, &file);
        assert_eq!(report.team, "Nya and Gramps");
        assert_eq!(report.total, 3);
        assert_eq!(report.max, 35);
        assert_eq!(report.answered, 2);
        assert_eq!(report.rounds[1].correct, 1);
        assert_eq!(report.rounds[4].correct, 2);
    }

    #[test]
    fn mark_skips_unknown_questions() {
        let quiz = Quiz::builtin().unwrap();
        let file = answer_file(
            r#"{
                "team": "Dad and Grandma",
                "answers": [
                    { "question": 99, "answer": "x" },
                    { "question": 120, "guess": { "lat": 0.0, "lng": 0.0 } },
                    { "question": 7 },
                    { "question": 0, "answer": "USA" }
                ]
            }"#,
        );

        let report = mark(&quiz, &file);
        assert_eq!(report.answered, 1);
        assert_eq!(report.total, 1);
    }
}
