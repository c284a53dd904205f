use std::env;


/// The environment variables the configuration engine consumes, captured once.
///
/// Resolution never reads the process environment directly, it only sees this snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub home: Option<String>,
    pub mpd_host: Option<String>,
    pub mpd_port: Option<String>,
    pub http_proxy: Option<String>,
}

impl Environment {
    pub const HOME: &'static str = "HOME";
    pub const MPD_HOST: &'static str = "MPD_HOST";
    pub const MPD_PORT: &'static str = "MPD_PORT";
    pub const HTTP_PROXY: &'static str = "http_proxy";

    pub fn from_process() -> Self {
        Self {
            home: read_variable(Self::HOME),
            mpd_host: read_variable(Self::MPD_HOST),
            mpd_port: read_variable(Self::MPD_PORT),
            http_proxy: read_variable(Self::HTTP_PROXY),
        }
    }

    /// `MPD_PORT` as a port number. A value that does not parse counts as absent.
    pub fn mpd_port(&self) -> Option<u16> {
        self.mpd_port
            .as_deref()
            .and_then(|port| port.trim().parse::<u16>().ok())
    }
}

fn read_variable(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
