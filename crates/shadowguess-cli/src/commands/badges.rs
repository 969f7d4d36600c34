//! Badge scale inspection.

use shadowguess_core::{fit_step_increment, BadgeScale, Config};

pub fn run(max: Option<f64>, count: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = super::load_catalog(&config)?;

    let max = max.unwrap_or(catalog.len() as f64);
    let count = count.unwrap_or(config.badges.count);
    let initial_step = config.badges.initial_step;

    let increment = fit_step_increment(max, count, initial_step);
    let scale = BadgeScale::new(max, count, initial_step);

    println!("{count} tiers up to {max} (step increment {increment:.3})");
    for (tier, boundary) in scale.boundaries().iter().enumerate() {
        println!("badge {:>2} unlocks at streak {boundary}", tier + 1);
    }

    Ok(())
}
