use std::path::PathBuf;

const DATA_DIR_NAME: &str = "toll-reports";
const DB_FILE_NAME: &str = "toll-reports.sqlite";

/// Default database location under the XDG data dir.
pub fn default_db_path() -> Result<PathBuf, String> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}

fn data_dir() -> Result<PathBuf, String> {
    if let Some(base) = std::env::var_os("XDG_DATA_HOME").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(base).join(DATA_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join(DATA_DIR_NAME))
}
