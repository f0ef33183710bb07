//! Package type tags understood by the registry tool

use std::fmt;
use std::str::FromStr;

/// Artifact ecosystem format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PackageType {
    Generic,
    Npm,
    Dart,
    Composer,
    Rpm,
    Python,
    Go,
    Cargo,
    NuGet,
    Maven,
    Conda,
}

impl PackageType {
    pub const ALL: [PackageType; 11] = [
        PackageType::Generic,
        PackageType::Npm,
        PackageType::Dart,
        PackageType::Composer,
        PackageType::Rpm,
        PackageType::Python,
        PackageType::Go,
        PackageType::Cargo,
        PackageType::NuGet,
        PackageType::Maven,
        PackageType::Conda,
    ];

    /// Canonical registry key (upper-case)
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Generic => "GENERIC",
            PackageType::Npm => "NPM",
            PackageType::Dart => "DART",
            PackageType::Composer => "COMPOSER",
            PackageType::Rpm => "RPM",
            PackageType::Python => "PYTHON",
            PackageType::Go => "GO",
            PackageType::Cargo => "CARGO",
            PackageType::NuGet => "NUGET",
            PackageType::Maven => "MAVEN",
            PackageType::Conda => "CONDA",
        }
    }

    /// Name used in log lines and error messages
    pub fn label(&self) -> &'static str {
        match self {
            PackageType::Generic => "Generic",
            PackageType::Npm => "NPM",
            PackageType::Dart => "Dart",
            PackageType::Composer => "Composer",
            PackageType::Rpm => "RPM",
            PackageType::Python => "Python",
            PackageType::Go => "Go",
            PackageType::Cargo => "Cargo",
            PackageType::NuGet => "NuGet",
            PackageType::Maven => "Maven",
            PackageType::Conda => "Conda",
        }
    }

    /// Positional argument the registry tool expects after `push`
    pub fn cli_name(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    /// Normalize user input to the key format. Empty input maps to `GENERIC`.
    pub fn normalize(input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            PackageType::Generic.as_str().to_string()
        } else {
            trimmed.to_ascii_uppercase()
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = PackageType::normalize(s);
        PackageType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| format!("unknown package type: {}", s))
    }
}
