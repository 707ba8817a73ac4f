use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{FinderError, Result};

pub const PROJECT_PLACEHOLDER: &str = "{project_name}";

/// Settings file contents (`settings.yaml`). Missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub s2s_path: String,
    pub httpx_ips: String,
    pub httpx_domains: String,
    pub dnsmx: String,
    /// DNS resolution feed; the mail feed is used when absent
    pub dns: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            s2s_path: "S://".to_string(),
            httpx_ips: "http_from.{project_name}.ips.output.json".to_string(),
            httpx_domains: "http_from.{project_name}.domains.output.json".to_string(),
            dnsmx: "dnsmx.{project_name}.output.json".to_string(),
            dns: None,
        }
    }
}

impl Settings {
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// `~/.config/simpleFinder/settings.yaml`
    pub fn default_location() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join("simpleFinder").join("settings.yaml"))
    }

    /// Load from `explicit`, falling back to the default location and then to
    /// built-in defaults. A file that exists but does not parse is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let candidates = [explicit.map(Path::to_path_buf), Self::default_location()];
        for path in candidates.into_iter().flatten() {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    let settings = Self::from_yaml(&text).map_err(|e| FinderError::Config {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                    info!(path = %path.display(), "Loaded settings");
                    return Ok(settings);
                }
                Err(e) => debug!(path = %path.display(), error = %e, "settings file not readable"),
            }
        }
        info!("No settings file found, using defaults");
        Ok(Self::default())
    }
}

/// Which HTTP-prober feed is scanned for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Source {
    #[default]
    Domains,
    Ips,
    /// Both feeds, domains first
    All,
}

/// Which outputs a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Views {
    pub findings: bool,
    pub mail: bool,
    pub dns: bool,
}

impl Views {
    /// Findings run unless a correlation view was asked for on its own.
    pub fn from_flags(email: bool, dns: bool, all: bool) -> Self {
        if all {
            return Self { findings: true, mail: true, dns: true };
        }
        Self { findings: !(email || dns), mail: email, dns }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::from_flags(false, false, false)
    }
}

/// Fully resolved, immutable configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub project: String,
    pub base_folder: PathBuf,
    pub recon_folder: PathBuf,
    pub findings_folder: PathBuf,
    pub source: Source,
    /// Set when the feed was given explicitly instead of via settings
    pub input_override: bool,
    pub web_inputs: Vec<PathBuf>,
    pub mail_input: PathBuf,
    pub dns_input: PathBuf,
    pub views: Views,
}

impl RunConfig {
    pub fn resolve(settings: &Settings, project: &str, source: Source, input: Option<PathBuf>, views: Views) -> Self {
        let base_folder = PathBuf::from(&settings.s2s_path).join(project);
        let recon_folder = base_folder.join("recon");
        let findings_folder = base_folder.join("findings");
        let recon_file = |name: &str| recon_folder.join(name.replace(PROJECT_PLACEHOLDER, project));

        let input_override = input.is_some();
        let web_inputs = match input {
            Some(path) => vec![path],
            None => match source {
                Source::Domains => vec![recon_file(&settings.httpx_domains)],
                Source::Ips => vec![recon_file(&settings.httpx_ips)],
                Source::All => vec![recon_file(&settings.httpx_domains), recon_file(&settings.httpx_ips)],
            },
        };
        let mail_input = recon_file(&settings.dnsmx);
        let dns_input = recon_file(settings.dns.as_deref().unwrap_or(&settings.dnsmx));

        Self {
            project: project.to_string(),
            base_folder,
            recon_folder,
            findings_folder,
            source,
            input_override,
            web_inputs,
            mail_input,
            dns_input,
            views,
        }
    }
}
