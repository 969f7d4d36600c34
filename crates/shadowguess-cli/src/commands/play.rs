//! Interactive play loop.
//!
//! Presents each subject as a scrambled-letter "silhouette", feeds answers
//! through the scheduler, and renders the streak as a badge bar. Guesses are
//! logged to the database on a best-effort basis: a failed save is reported
//! via the logger and the game keeps going.

use std::io::{self, BufRead, Write};

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use uuid::Uuid;

use shadowguess_core::{BadgeScale, Config, GuessDb, QuizState};

pub fn run(seed: Option<u64>, rounds: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = super::load_catalog(&config)?;

    let db = match GuessDb::open() {
        Ok(db) => Some(db),
        Err(e) => {
            log::warn!("guess log unavailable, playing without recording: {e}");
            None
        }
    };

    let mut rng = match seed {
        Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
        None => Mcg128Xsl64::from_entropy(),
    };

    let scale = BadgeScale::new(
        catalog.len() as f64,
        config.badges.count,
        config.badges.initial_step,
    );

    let mut state = QuizState::new(catalog.len());
    state = state.start(rng.gen(), rng.gen());

    let session = Uuid::new_v4();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut answered = 0usize;
    let mut num_correct = 0usize;

    println!("Name the creature behind the scrambled silhouette.");
    println!("Submit an empty line to stop.\n");

    loop {
        if rounds.is_some_and(|r| answered >= r) {
            break;
        }

        let Some(item) = state.current() else { break };
        let name = catalog
            .name(item)
            .expect("scheduler draws stay inside the catalog");

        println!("Silhouette: {}", scramble(name, &mut rng));
        print!("Your guess> ");
        io::stdout().flush()?;

        let guess = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if guess.trim().is_empty() {
            break;
        }

        let was_correct = catalog.matches(item, &guess);
        let guessed_item = catalog.find(&guess);
        log::debug!("asked {item}, guessed {guessed_item:?}, correct: {was_correct}");

        if let Some(db) = &db {
            // Best effort only -- scheduling state must survive a failed save.
            if let Err(e) = db.record_guess(session, item, guessed_item) {
                log::warn!("failed to save guess: {e}");
            }
        }

        if was_correct {
            num_correct += 1;
            println!("Correct! It was {name}.");
        } else {
            println!("Wrong -- it was {name}.");
            if guessed_item.is_none() {
                let near = catalog.suggestions(&guess, 3);
                if !near.is_empty() {
                    println!("(no such creature; close names: {})", near.join(", "));
                }
            }
        }

        state = state.advance(rng.gen(), was_correct);
        answered += 1;

        let streak = state.streak_count();
        println!("Streak {streak}  {}\n", badge_bar(&scale, streak));
    }

    println!("\nAnswered {num_correct}/{answered} correctly.");
    Ok(())
}

/// Shuffle the letters of `name` into an anagram, re-rolling when the
/// shuffle lands back on the original spelling.
fn scramble(name: &str, rng: &mut Mcg128Xsl64) -> String {
    let mut letters: Vec<char> = name.to_lowercase().chars().collect();
    if letters.len() < 2 {
        return letters.into_iter().collect();
    }

    for _ in 0..8 {
        letters.shuffle(rng);
        let scrambled: String = letters.iter().collect();
        if !scrambled.eq_ignore_ascii_case(name) {
            return scrambled;
        }
    }
    // Only reachable for names whose letters admit no distinct ordering.
    letters.into_iter().collect()
}

fn badge_bar(scale: &BadgeScale, streak: usize) -> String {
    let unlocked = scale.unlocked(streak);
    let mut bar = String::new();
    for i in 0..scale.step_count() {
        bar.push(if i < unlocked { '\u{25cf}' } else { '\u{25cb}' });
    }
    bar
}
