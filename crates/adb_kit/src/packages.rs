//! Package enumeration and intent-action extraction

use crate::command::CommandRunner;
use crate::error::Result;
use crate::repo::AdbRepo;

/// Filter options for `pm list packages`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFilter {
    /// Third-party packages only (`-3`)
    ThirdParty,
    /// System packages only (`-s`)
    System,
    /// Include the associated APK file path (`-f`)
    WithApkPath,
    /// Disabled packages only (`-d`)
    Disabled,
    /// Enabled packages only (`-e`)
    Enabled,
    /// Include uninstalled packages whose data is preserved (`-u`)
    IncludeUninstalled,
}

impl PackageFilter {
    pub fn flag(&self) -> &'static str {
        match self {
            Self::ThirdParty => "-3",
            Self::System => "-s",
            Self::WithApkPath => "-f",
            Self::Disabled => "-d",
            Self::Enabled => "-e",
            Self::IncludeUninstalled => "-u",
        }
    }
}

impl<R: CommandRunner> AdbRepo<R> {
    /// List installed package names, newline-joined.
    ///
    /// Lines without the `package:` prefix are ignored; output with no
    /// matching lines yields an empty string, not an error.
    pub async fn list_packages(&self, filter: Option<PackageFilter>) -> Result<String> {
        let command = match filter {
            Some(filter) => format!("pm list packages {}", filter.flag()),
            None => "pm list packages".to_string(),
        };
        let output = self.shell(&command).await?;
        Ok(parse_package_list(&output))
    }

    /// Non-data intent actions declared in a package's resolver table.
    ///
    /// Dump format varies by OS version; a missing `Resolver Table:` or
    /// `Non-Data Actions:` marker yields an empty list, not an error.
    pub async fn get_actions(&self, package_name: &str) -> Result<Vec<String>> {
        let output = self
            .shell(&format!("dumpsys package {}", package_name))
            .await?;
        Ok(parse_non_data_actions(&output))
    }
}

fn parse_package_list(output: &str) -> String {
    let mut result = String::new();
    for line in output.trim().lines() {
        if let Some(name) = line.strip_prefix("package:") {
            result.push_str(name);
            result.push('\n');
        }
    }
    result
}

fn parse_non_data_actions(dump: &str) -> Vec<String> {
    let resolver_start = match dump.find("Resolver Table:") {
        Some(idx) => idx,
        None => return Vec::new(),
    };
    let resolver = &dump[resolver_start..];

    let non_data_start = match resolver.find("\n  Non-Data Actions:") {
        Some(idx) => idx,
        None => return Vec::new(),
    };
    let mut section = &resolver[non_data_start..];

    // The section runs to the first blank-line pair.
    if let Some(end) = section.find("\n\n") {
        section = &section[..end];
    }

    section
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("android.") || line.starts_with("com."))
        .map(|line| line.strip_suffix(':').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_package_list() {
        let output = "package:com.a\npackage:com.b\n";
        assert_eq!(parse_package_list(output), "com.a\ncom.b\n");
    }

    #[test]
    fn test_parse_package_list_ignores_other_lines() {
        let output = "WARNING: linker: something\npackage:com.a\njunk\n";
        assert_eq!(parse_package_list(output), "com.a\n");
    }

    #[test]
    fn test_parse_package_list_empty_on_no_matches() {
        assert_eq!(parse_package_list("no packages here\n"), "");
    }

    #[test]
    fn test_actions_missing_resolver_table() {
        assert!(parse_non_data_actions("Packages:\n  nothing relevant\n").is_empty());
    }

    #[test]
    fn test_actions_missing_non_data_marker() {
        let dump = "Resolver Table:\n  Full MIME Types:\n      text/plain:\n";
        assert!(parse_non_data_actions(dump).is_empty());
    }

    #[test]
    fn test_actions_extracted_from_dump() {
        let dump = "\
Packages:
  Package [com.example.app] (1a2b3c)
Resolver Table:
  Full MIME Types:
      text/plain:
        4d5e6f com.example.app/.ShareActivity
  Non-Data Actions:
      android.intent.action.MAIN:
        7a8b9c com.example.app/.MainActivity filter 1f2e3d
      com.example.app.ACTION_SYNC:
        0a1b2c com.example.app/.SyncReceiver filter 4c5d6e

Receiver Resolver Table:
  Non-Data Actions:
      android.intent.action.BOOT_COMPLETED:
";
        let actions = parse_non_data_actions(dump);
        assert_eq!(
            actions,
            vec!["android.intent.action.MAIN", "com.example.app.ACTION_SYNC"]
        );
    }
}
