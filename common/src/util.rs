//! A module which contains some I/O utility functions shared by the binaries.
use serde::Serialize;
use std::{
    env,
    fs::{self, File},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use super::AlgoResult;

/// Write something which can be serialized to a json file at the specified path.
/// Returns an Error if the file can't be written or the directory can't be created.
pub fn write_serializable_to_json<P: AsRef<Path>>(
    output: &impl Serialize,
    path: P,
) -> AlgoResult<()> {
    let json_string = serde_json::to_string_pretty(output)?;

    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file_handle = File::create(path)?;
    file_handle.write_all(json_string.as_bytes())?;

    Ok(())
}

/// Reads the whole file at `path`, or all of stdin if no path is given.
pub fn read_file_or_stdin(path: Option<&Path>) -> AlgoResult<String> {
    let mut content = String::new();
    match path {
        Some(path) => {
            File::open(path)?.read_to_string(&mut content)?;
        }
        None => {
            io::stdin().read_to_string(&mut content)?;
        }
    }
    Ok(content)
}

/// Finds the project root, that is the root of the git repo.
/// In particular, this will return the path to the closest ancestor to the current working directory,
/// which contains a `.git` folder.
/// If no such ancestor is found, the current working directory is retuned.
pub fn find_project_root() -> AlgoResult<PathBuf> {
    let cwd = env::current_dir()?;

    Ok(cwd
        .ancestors()
        .find(|ancestor| has_git_directory(ancestor))
        .map(PathBuf::from)
        .unwrap_or(cwd))
}

fn has_git_directory<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    // This also checks if the path exists.
    path.as_ref().join(".git").is_dir()
}
