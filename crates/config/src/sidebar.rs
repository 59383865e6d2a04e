use std::num::NonZeroU32;

/// How many entries a sidebar widget shows.
///
/// Written as an integer: `0` shows everything, a negative number hides the widget and a
/// positive `N` shows the first `N` entries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum SidebarLimit {
    #[default]
    All,
    None,
    Count(NonZeroU32),
}

impl From<i64> for SidebarLimit {
    fn from(value: i64) -> Self {
        match value {
            0 => SidebarLimit::All,
            v if v < 0 => SidebarLimit::None,
            v => {
                let count = u32::try_from(v).unwrap_or(u32::MAX);
                NonZeroU32::new(count).map_or(SidebarLimit::All, SidebarLimit::Count)
            }
        }
    }
}

impl From<SidebarLimit> for i64 {
    fn from(limit: SidebarLimit) -> i64 {
        match limit {
            SidebarLimit::All => 0,
            SidebarLimit::None => -1,
            SidebarLimit::Count(count) => i64::from(count.get()),
        }
    }
}

impl SidebarLimit {
    /// Maximum number of entries, `None` when unlimited.
    pub fn max_entries(self) -> Option<usize> {
        match self {
            SidebarLimit::All => None,
            SidebarLimit::None => Some(0),
            SidebarLimit::Count(count) => Some(count.get() as usize),
        }
    }

    pub fn is_hidden(self) -> bool {
        self == SidebarLimit::None
    }

    /// The entries a sidebar shows out of `items`.
    pub fn apply<T>(self, items: &[T]) -> &[T] {
        match self.max_entries() {
            Some(max) => &items[..max.min(items.len())],
            None => items,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Sidebar {
    pub tags_limit: SidebarLimit,
    pub links_limit: SidebarLimit,
}
