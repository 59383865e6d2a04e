use itertools::Itertools;
use siteconf_core::ContentKind;

use crate::args;
use crate::error::*;

/// Resolve the settings and report what the site is made of
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct CheckArgs {
    #[command(flatten, next_help_heading = "Config")]
    pub(crate) config: args::ConfigArgs,
}

impl CheckArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let config = self.config.load_site()?;

        let counts = config
            .content_source()?
            .files()
            .map(|(_, kind)| kind)
            .counts();
        let count = |kind: ContentKind| counts.get(&kind).copied().unwrap_or(0);

        let good = anstyle::AnsiColor::Green.on_default().bold();
        anstream::println!(
            "{}: {good}configuration is valid{good:#}",
            config.site_name
        );
        anstream::println!(
            "content: {} markup, {} static, {} other",
            count(ContentKind::Markup),
            count(ContentKind::Static),
            count(ContentKind::Other)
        );
        if !config.plugins.is_empty() {
            anstream::println!(
                "plugins: {}",
                config.plugins.iter().map(|p| p.name.as_str()).join(", ")
            );
        }
        let feeds = config.feeds.enabled().map(|(kind, _)| kind.as_str()).join(", ");
        if feeds.is_empty() {
            anstream::println!("feeds: disabled");
        } else {
            anstream::println!("feeds: {feeds}");
        }

        Ok(())
    }
}
