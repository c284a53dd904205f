use serde::Serialize;


/// Which kind of install the configuration file was found in.
///
/// Stays [`InstallLocation::Unknown`] when the configuration path was given
/// explicitly, in which case there are no default log or journal paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallLocation {
    #[default]
    Unknown,
    UserHome,
    SystemWide,
}
