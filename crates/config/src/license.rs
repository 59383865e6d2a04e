use std::fmt;

/// Creative Commons 4.0 license variants the themes ship badges for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CcName {
    By,
    BySa,
    ByNd,
    ByNc,
    ByNcSa,
    ByNcNd,
    ByNdNc,
}

impl CcName {
    pub fn as_str(self) -> &'static str {
        match self {
            CcName::By => "by",
            CcName::BySa => "by-sa",
            CcName::ByNd => "by-nd",
            CcName::ByNc => "by-nc",
            CcName::ByNcSa => "by-nc-sa",
            CcName::ByNcNd => "by-nc-nd",
            CcName::ByNdNc => "by-nd-nc",
        }
    }

    /// Creative Commons only publishes deeds for `by-nc-nd`.
    fn canonical(self) -> Self {
        match self {
            CcName::ByNdNc => CcName::ByNcNd,
            other => other,
        }
    }
}

impl fmt::Display for CcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct License {
    pub cc_name: CcName,
    /// Link the badge from licensebuttons.net instead of the theme's copy.
    #[serde(default)]
    pub hosted: bool,
    /// 80x15 badge instead of 88x31.
    #[serde(default)]
    pub compact: bool,
    /// Short notice instead of the full sentence.
    #[serde(default)]
    pub brief: bool,
}

impl License {
    pub fn new(cc_name: CcName) -> Self {
        Self {
            cc_name,
            hosted: false,
            compact: false,
            brief: false,
        }
    }

    pub fn deed_url(&self) -> String {
        format!(
            "https://creativecommons.org/licenses/{}/4.0/",
            self.cc_name.canonical()
        )
    }

    pub fn badge_size(&self) -> &'static str {
        if self.compact { "80x15" } else { "88x31" }
    }

    pub fn hosted_badge_url(&self) -> Option<String> {
        self.hosted.then(|| {
            format!(
                "https://licensebuttons.net/l/{}/4.0/{}.png",
                self.cc_name.canonical(),
                self.badge_size()
            )
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_full() {
        let license: License = serde_yaml::from_str(
            "{cc_name: by-sa, hosted: false, compact: true, brief: false}",
        )
        .unwrap();
        assert_eq!(license.cc_name, CcName::BySa);
        assert!(license.compact);
        assert!(!license.hosted);
        assert!(!license.brief);
    }

    #[test]
    fn parse_flags_default_off() {
        let license: License = serde_yaml::from_str("cc_name: by-nc").unwrap();
        assert_eq!(license, License::new(CcName::ByNc));
    }

    #[test]
    fn parse_unknown_name() {
        let result: Result<License, _> = serde_yaml::from_str("cc_name: gpl");
        assert!(result.is_err());
    }

    #[test]
    fn hosted_badge() {
        let mut license = License::new(CcName::BySa);
        assert_eq!(license.hosted_badge_url(), None);
        license.hosted = true;
        license.compact = true;
        assert_eq!(
            license.hosted_badge_url().unwrap(),
            "https://licensebuttons.net/l/by-sa/4.0/80x15.png"
        );
    }

    #[test]
    fn deed_uses_canonical_order() {
        let license = License::new(CcName::ByNdNc);
        assert_eq!(
            license.deed_url(),
            "https://creativecommons.org/licenses/by-nc-nd/4.0/"
        );
    }
}
