use siteconf::config::Taxonomy;

use crate::args;
use crate::error::*;

/// Print site debug information
#[derive(Clone, Debug, PartialEq, Eq, clap::Subcommand)]
pub(crate) enum DebugCommands {
    /// Prints resolved config
    Config {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print content files and how each is handled
    Files {
        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print the link for a tag, category, author or index page
    Url {
        /// One of tag, tags, category, categories, author, authors, archives
        taxonomy: String,
        /// Display name, e.g. a tag
        #[arg(default_value = "")]
        name: String,

        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },

    /// Print the link for one page of a paginated listing
    Page {
        /// Page number, starting at 1
        number: u32,
        /// Listing base name, e.g. `tag/python`
        base_name: String,
        /// Listing file name
        #[arg(long, default_value = "index")]
        name: String,
        /// Listing file extension
        #[arg(long, default_value = ".html")]
        extension: String,

        #[command(flatten, next_help_heading = "Config")]
        config: args::ConfigArgs,
    },
}

impl DebugCommands {
    pub(crate) fn run(&self) -> Result<()> {
        match self {
            Self::Config { config } => {
                let config = config.load_site()?;
                print!("{config}");
            }
            Self::Files { config } => {
                let config = config.load_site()?;
                for (path, kind) in config.content_source()?.files() {
                    println!("{:<6} {}", kind.as_str(), path.rel_path);
                }
            }
            Self::Url {
                taxonomy,
                name,
                config,
            } => {
                let taxonomy: Taxonomy = taxonomy.parse()?;
                if taxonomy.is_per_item() && name.is_empty() {
                    anyhow::bail!("`{taxonomy}` links need a name");
                }
                let config = config.load_site()?;
                let link = config.urls.render(taxonomy, name)?;
                println!("url: {}", config.public_url(&link.url));
                println!("save_as: {}", link.save_as);
            }
            Self::Page {
                number,
                base_name,
                name,
                extension,
                config,
            } => {
                if *number == 0 {
                    anyhow::bail!("Page numbers start at 1");
                }
                let config = config.load_site()?;
                let link = config
                    .pagination
                    .render(*number, base_name, name, extension)?
                    .with_context(|| format!("No pagination pattern covers page {number}"))?;
                println!("url: {}", config.public_url(&link.url));
                println!("save_as: {}", link.save_as);
            }
        }

        Ok(())
    }
}
