use super::Parser;

/// Scripted walkthrough of the relationship engine.
#[derive(Parser, Debug)]
#[command(name = "socialnet", version)]
pub struct Cli {
    /// Path to a settings file; defaults to the profile's file under `settings/`.
    #[arg(long)]
    pub settings: Option<String>,
}
