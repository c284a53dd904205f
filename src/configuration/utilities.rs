use std::path::PathBuf;


/// Used in place of the home directory when `HOME` is not set.
const HOME_FALLBACK: &str = ".";


/// Replaces a leading `~` with `home` (or the current directory when there is no home).
/// Paths without a leading tilde are returned unchanged.
#[must_use = "function returns the expanded path"]
pub fn expand_tilde<S>(path: S, home: Option<&str>) -> PathBuf
where
    S: AsRef<str>,
{
    let path = path.as_ref();

    match path.strip_prefix('~') {
        Some(rest) => {
            let mut expanded = home.unwrap_or(HOME_FALLBACK).to_string();
            expanded.push_str(rest);
            PathBuf::from(expanded)
        }
        None => PathBuf::from(path),
    }
}
