//! `edit` subcommand: verified dependency edits on a single POM.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use mvngraph::{Error, Result};
use mvnpom::Pom;

pub fn run(pom_path: &Path, delete: &[String], scope: &[String], write: bool) -> Result<()> {
    if delete.is_empty() && scope.is_empty() {
        return Err(Error::Config(
            "nothing to do; pass --delete and/or --scope".to_string(),
        ));
    }

    let mut pom = Pom::from_path(pom_path)?;

    if !delete.is_empty() {
        let requested: BTreeSet<String> = delete.iter().cloned().collect();
        let removed = pom.remove_dependencies(&requested)?;
        println!("Removed {removed} dependency declaration(s)");
    }
    if !scope.is_empty() {
        let modified = pom.change_dependency_scopes(scope)?;
        println!("Changed scope on {modified} dependency declaration(s)");
    }

    let xml = pom.to_xml_string()?;
    if write {
        let backup = backup_path(pom_path);
        fs::copy(pom_path, &backup)?;
        println!("Created backup: {}", backup.display());
        fs::write(pom_path, xml)?;
        println!("Wrote modified POM to {}", pom_path.display());
    } else {
        println!("{xml}");
    }
    Ok(())
}

fn backup_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    std::path::PathBuf::from(name)
}
