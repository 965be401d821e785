//! Release resolution against the GitHub releases API
//!
//! Resolves the symbolic `latest` tag to a concrete release tag and fetches
//! the asset list for a tag. When the API query for `latest` fails (rate
//! limit, proxy), a second lookup path asks the release page itself for its
//! redirect target and takes the tag from the `Location` header.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{InstallError, Result};

const API_BASE: &str = "https://api.github.com";
const HTML_BASE: &str = "https://github.com";
const USER_AGENT: &str = concat!("fleetglass-install/", env!("CARGO_PKG_VERSION"));

/// GitHub release metadata
#[derive(Deserialize, Debug, Clone)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// GitHub release asset
#[derive(Deserialize, Debug, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// Repository coordinates parsed from the base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl Repo {
    /// Parse `https://github.com/<owner>/<repo>` (trailing `/` and `.git`
    /// tolerated). Anything else is a usage error.
    pub fn parse(base_url: &str) -> Result<Repo> {
        let invalid = || InstallError::InvalidBaseUrl {
            url: base_url.to_string(),
        };

        let rest = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"))
            .ok_or_else(invalid)?;
        let (host, path) = rest.split_once('/').ok_or_else(invalid)?;
        if host != "github.com" {
            return Err(invalid());
        }

        let path = path.trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let mut segments = path.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(Repo {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(invalid()),
        }
    }

}

/// Release metadata client
pub struct Client {
    repo: Repo,
    agent: ureq::Agent,
    token: Option<String>,
    api_base: String,
    html_base: String,
}

impl Client {
    pub fn new(repo: Repo, token: Option<String>) -> Client {
        Self::with_endpoints(repo, token, API_BASE, HTML_BASE)
    }

    /// Client with explicit metadata endpoints, so the resolution paths
    /// can be exercised against a local server.
    fn with_endpoints(repo: Repo, token: Option<String>, api_base: &str, html_base: &str) -> Client {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(60))
            .user_agent(USER_AGENT)
            .build();
        Client {
            repo,
            agent,
            token,
            api_base: api_base.to_string(),
            html_base: html_base.to_string(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{path}",
            self.api_base, self.repo.owner, self.repo.name
        )
    }

    fn html_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}/{path}",
            self.html_base, self.repo.owner, self.repo.name
        )
    }

    /// Resolve the requested tag to a concrete one. A literal tag is
    /// returned verbatim; `latest` is resolved via the API, falling back
    /// to the release-page redirect when the API query fails.
    pub fn resolve_tag(&self, requested: &str) -> Result<String> {
        if requested != "latest" {
            return Ok(requested.to_string());
        }

        match self.latest_via_api() {
            Ok(tag) => Ok(tag),
            Err(api_reason) => {
                self.latest_via_redirect()
                    .map_err(|redirect_reason| InstallError::ReleaseResolveFailed {
                        reason: format!(
                            "API query failed ({api_reason}); redirect fallback failed \
                             ({redirect_reason})"
                        ),
                    })
            }
        }
    }

    /// Fetch the release metadata (including its asset list) for a tag.
    pub fn release_by_tag(&self, tag: &str) -> Result<Release> {
        let url = self.api_url(&format!("releases/tags/{tag}"));
        let response = self
            .api_get(&url)
            .map_err(|reason| InstallError::AssetListFailed {
                tag: tag.to_string(),
                reason,
            })?;
        response
            .into_json::<Release>()
            .map_err(|e| InstallError::AssetListFailed {
                tag: tag.to_string(),
                reason: format!("invalid release metadata: {e}"),
            })
    }

    /// GET an asset URL with this client's agent, following redirects.
    pub fn fetch_raw(&self, url: &str) -> std::result::Result<ureq::Response, String> {
        self.agent.get(url).call().map_err(|e| e.to_string())
    }

    fn api_get(&self, url: &str) -> std::result::Result<ureq::Response, String> {
        let mut request = self.agent.get(url).set("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        request.call().map_err(|e| e.to_string())
    }

    fn latest_via_api(&self) -> std::result::Result<String, String> {
        let url = self.api_url("releases/latest");
        let response = self.api_get(&url)?;
        let release: Release = response
            .into_json()
            .map_err(|e| format!("invalid release metadata: {e}"))?;
        Ok(release.tag_name)
    }

    fn latest_via_redirect(&self) -> std::result::Result<String, String> {
        // Separate agent: the redirect target is the answer, not a hop.
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(60))
            .user_agent(USER_AGENT)
            .redirects(0)
            .build();
        let url = self.html_url("releases/latest");
        let response = agent.get(&url).call().map_err(|e| e.to_string())?;

        let location = response
            .header("location")
            .ok_or_else(|| format!("HTTP {} without Location header", response.status()))?;
        tag_from_location(location)
            .ok_or_else(|| format!("no tag in redirect target: {location}"))
    }
}

/// Extract the tag from a release-page redirect target, e.g.
/// `https://github.com/o/r/releases/tag/v1.2.0` yields `v1.2.0`.
fn tag_from_location(location: &str) -> Option<String> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or(location)
        .trim_end_matches('/');
    let tag = path.rsplit('/').next()?;
    // A repo without releases redirects back to the releases index.
    if tag.is_empty() || tag == "releases" || tag == "latest" {
        return None;
    }
    Some(tag.to_string())
}
