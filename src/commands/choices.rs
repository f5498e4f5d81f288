use anyhow::Result;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config = super::load_config()?;

    println!("{}", "Assigned".bold());
    for name in config.choices.names() {
        println!("  {name}");
    }

    println!();
    println!("{}", "Events".bold());
    for event in config.choices.events() {
        println!("  {event}");
    }

    Ok(())
}
