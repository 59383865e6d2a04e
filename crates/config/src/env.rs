use std::ffi::OsStr;
use std::ffi::OsString;

use crate::Config;
use crate::RelPath;
use crate::Result;
use crate::Status;

/// Environment variables starting with this prefix override settings from the file.
pub const ENV_PREFIX: &str = "SITECONF_";

impl Config {
    /// Overlay `SITECONF_*` variables from the process environment.
    pub fn with_process_env(self) -> Result<Self> {
        self.with_env_os(std::env::vars_os())
    }

    /// Overlay `SITECONF_*` entries from raw OS strings.
    ///
    /// Entries outside the prefix are skipped without decoding them.
    pub fn with_env_os<I, K, V>(self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<OsStr>,
        V: Into<OsString>,
    {
        let mut decoded = Vec::new();
        for (key, value) in vars {
            let Some(key) = key.as_ref().to_str() else {
                continue;
            };
            if !key.starts_with(ENV_PREFIX) {
                continue;
            }
            let value = value.into().into_string().map_err(|_| {
                Status::new("Invalid environment override").context_with(|c| {
                    c.insert("Variable", key.to_owned())
                        .insert("Reason", "value is not valid UTF-8".to_owned())
                })
            })?;
            decoded.push((key.to_owned(), value));
        }
        self.with_env(decoded)
    }

    /// Overlay `SITECONF_*` entries from `vars`; other entries are ignored.
    pub fn with_env<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.into();
            log::debug!("Overriding `{}` from the environment", name.to_lowercase());
            match name {
                "AUTHOR" => self.author = non_empty(value),
                "SITE_NAME" => self.site_name = value,
                "SITE_URL" => self.site_url = value,
                "DEFAULT_LANG" => self.default_lang = value,
                "TIMEZONE" => self.timezone = value,
                "PATH" => self.path = env_path(key.as_ref(), &value)?,
                "OUTPUT_PATH" => self.output_path = env_path(key.as_ref(), &value)?,
                "THEME" => self.theme.path = non_empty(value).map(Into::into),
                "RELATIVE_URLS" => self.relative_urls = env_bool(key.as_ref(), &value)?,
                _ => {
                    log::warn!("Ignoring unknown setting `{}`", key.as_ref());
                }
            }
        }
        Ok(self)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn env_path(key: &str, value: &str) -> Result<RelPath> {
    RelPath::try_from(value).map_err(|_| {
        Status::new("Invalid environment override").context_with(|c| {
            c.insert("Variable", key.to_owned())
                .insert("Value", value.to_owned())
        })
    })
}

fn env_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Status::new("Invalid environment override").context_with(|c| {
            c.insert("Variable", key.to_owned())
                .insert("Value", value.to_owned())
        })),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn overrides_scalars() {
        let config = Config::default()
            .with_env([
                ("SITECONF_SITE_URL", "https://vort.org"),
                ("SITECONF_AUTHOR", "Russell Neches"),
                ("SITECONF_RELATIVE_URLS", "yes"),
                ("SITECONF_OUTPUT_PATH", "public"),
                ("HOME", "/root"),
            ])
            .unwrap();
        assert_eq!(config.site_url, "https://vort.org");
        assert_eq!(config.author.as_deref(), Some("Russell Neches"));
        assert!(config.relative_urls);
        assert_eq!(config.output_path.as_str(), "public");
    }

    #[test]
    fn empty_theme_clears_path() {
        let mut config = Config::default();
        config.theme.path = Some("themes/bootstrap3".into());
        let config = config.with_env([("SITECONF_THEME", "")]).unwrap();
        assert_eq!(config.theme.path, None);
    }

    #[test]
    fn ignores_unknown() {
        let config = Config::default()
            .with_env([("SITECONF_PLUGINS", "render_math")])
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn rejects_bad_bool() {
        let result = Config::default().with_env([("SITECONF_RELATIVE_URLS", "maybe")]);
        assert!(result.is_err());
    }

    #[test]
    #[cfg(unix)]
    fn skips_undecodable_unrelated() {
        use std::os::unix::ffi::OsStringExt as _;

        let config = Config::default()
            .with_env_os([
                (OsString::from("LS_COLORS"), OsString::from_vec(vec![0xff, 0xfe])),
                (OsString::from("SITECONF_AUTHOR"), OsString::from("Russell Neches")),
            ])
            .unwrap();
        assert_eq!(config.author.as_deref(), Some("Russell Neches"));
    }

    #[test]
    #[cfg(unix)]
    fn rejects_undecodable_override() {
        use std::os::unix::ffi::OsStringExt as _;

        let result = Config::default().with_env_os([(
            OsString::from("SITECONF_SITE_NAME"),
            OsString::from_vec(vec![0xff, 0xfe]),
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_absolute_path() {
        let result = Config::default().with_env([("SITECONF_PATH", "/srv/content")]);
        assert!(result.is_err());
    }
}
