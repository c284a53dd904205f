use std::{fmt, path::PathBuf};

use serde::{Serialize, Serializer};


const MASKED_PASSWORD: &str = "********";


/// One submission target (a scrobbler endpoint and its credentials).
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct TargetConfig {
    pub endpoint_url: String,

    pub username: String,

    #[serde(serialize_with = "serialize_masked")]
    pub password: String,

    /// Where submissions pending for this target are journaled.
    pub journal_path: PathBuf,
}

impl fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetConfig")
            .field("endpoint_url", &self.endpoint_url)
            .field("username", &self.username)
            .field("password", &MASKED_PASSWORD)
            .field("journal_path", &self.journal_path)
            .finish()
    }
}

fn serialize_masked<S>(_password: &str, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(MASKED_PASSWORD)
}


/// Order of the final target list relative to the order of sections in the file.
///
/// Older releases built the list by prepending each target, so the last section in
/// the file came first. [`TargetOrdering::Legacy`] keeps that order for anything
/// that depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetOrdering {
    /// Reverse of file order.
    #[default]
    Legacy,

    /// Same order as the sections appear in the file.
    File,
}

impl TargetOrdering {
    /// Reorders targets that were collected in file order.
    pub fn apply(self, targets: &mut [TargetConfig]) {
        match self {
            TargetOrdering::Legacy => targets.reverse(),
            TargetOrdering::File => {}
        }
    }
}
