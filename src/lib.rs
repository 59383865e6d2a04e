#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod error;

mod new;
mod plugins;
mod site_config;

pub use siteconf_config as config;
pub use siteconf_config::Config;

pub use crate::error::{Error, Result};
pub use crate::new::create_new_project;
pub use crate::plugins::{Plugin, resolve_plugins};
pub use crate::site_config::SiteConfig;
