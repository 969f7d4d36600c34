//! Per-subject accuracy report over the guess log.

use serde::Serialize;

use shadowguess_core::{Config, GuessDb};

#[derive(Serialize)]
struct ResultRow {
    subject: String,
    correct: u64,
    total: u64,
    accuracy: f64,
}

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = super::load_catalog(&config)?;
    let db = GuessDb::open()?;

    let rows: Vec<ResultRow> = db
        .results()?
        .into_iter()
        .map(|r| ResultRow {
            subject: catalog
                .name(r.item)
                .unwrap_or("(unknown subject)")
                .to_string(),
            correct: r.correct,
            total: r.total,
            accuracy: r.accuracy(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No guesses recorded yet.");
        return Ok(());
    }

    for row in &rows {
        println!(
            "{:<20} {:>3} / {:<3} ({:.0}%)",
            row.subject,
            row.correct,
            row.total,
            row.accuracy * 100.0
        );
    }

    let totals = db.totals()?;
    println!(
        "\n{} guesses over {} sessions, {:.0}% correct",
        totals.guesses,
        totals.sessions,
        if totals.guesses > 0 {
            totals.correct as f64 / totals.guesses as f64 * 100.0
        } else {
            100.0
        }
    );

    Ok(())
}
