use std::path::Path;

use bangcopy::config::DestinationManager;
use bangcopy::pipeline::Reporter;

use crate::cli::DestAction;

/// Destination management flags
pub struct Destinations;

impl Destinations {
    pub fn execute(
        action: &DestAction,
        config_path: &Path,
        reporter: Reporter,
    ) -> anyhow::Result<()> {
        let manager = DestinationManager::new(config_path);

        match action {
            DestAction::List => {
                print!("{}", reporter.destinations(&manager.list()?));
            }
            DestAction::Add(path) => {
                let (resolved, added) = manager.add(path)?;
                println!("{}", reporter.destination_added(&resolved, added));
            }
            DestAction::Remove(path) => {
                let (resolved, removed) = manager.remove(path)?;
                println!("{}", reporter.destination_removed(&resolved, removed));
            }
            DestAction::Clear => {
                manager.clear()?;
                println!("{}", reporter.destinations_cleared());
            }
        }

        Ok(())
    }
}
