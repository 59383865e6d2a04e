mod config;
mod env;
mod feeds;
mod license;
mod menu;
mod pagination;
mod plugin;
mod sidebar;
mod template;
mod theme;
mod urls;

pub mod path;

pub use self::config::*;
pub use self::env::*;
pub use self::feeds::*;
pub use self::license::*;
pub use self::menu::*;
pub use self::pagination::*;
pub use self::path::RelPath;
pub use self::plugin::*;
pub use self::sidebar::*;
pub use self::template::*;
pub use self::theme::*;
pub use self::urls::*;

pub type Status = status::Status;
pub type Result<T, E = Status> = std::result::Result<T, E>;

/// Report a field whose value breaks one of the settings invariants.
pub(crate) fn invalid(field: &str, reason: impl std::fmt::Display) -> Status {
    let reason = reason.to_string();
    Status::new("Invalid config").context_with(|c| {
        c.insert("Field", field.to_owned())
            .insert("Reason", reason.clone())
    })
}
