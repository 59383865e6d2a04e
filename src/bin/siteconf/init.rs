use crate::error::*;

/// Create a site skeleton
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(default_value = "./")]
    pub(crate) directory: std::path::PathBuf,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        siteconf::create_new_project(&self.directory).with_context(|| {
            format!(
                "Could not create a new site at {}",
                self.directory.display()
            )
        })?;
        log::info!("Created new site at {}", self.directory.display());

        Ok(())
    }
}
