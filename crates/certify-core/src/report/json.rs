use super::Report;
use std::path::Path;

pub fn to_json_string(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn write_json(report: &Report, path: &Path) -> std::io::Result<()> {
    let s = to_json_string(report).map_err(std::io::Error::other)?;
    std::fs::write(path, s)
}
