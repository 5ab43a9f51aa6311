//! Shared output plumbing: stdout or `--outfile`.

use std::fs;
use std::path::Path;

use mvngraph::Result;

/// Print `content` to stdout, or write it to `outfile` when given.
///
/// Missing parent directories of `outfile` are created. A confirmation
/// line goes to stdout on file writes so the destination is visible.
pub fn emit(content: &str, outfile: Option<&Path>) -> Result<()> {
    match outfile {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, content)?;
            println!("Wrote output to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
