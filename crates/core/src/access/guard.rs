//! Page guard decisions.
//!
//! Runs on every navigation with whatever session the client holds. Expiry
//! is checked here, at evaluation time; pages already on screen are not
//! revoked until the next navigation.

use serde::Serialize;
use temple_shared::{AccessConfig, Claims};

use super::engine::has_page_access;
use super::error::AccessError;
use super::matrix::Module;

/// What a URL path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    /// The login page. Always reachable.
    Login,
    /// A module page.
    Module(Module),
    /// Anything that is not a known page.
    Unknown,
}

/// Resolves a URL path by its first segment. The root path is the
/// dashboard.
#[must_use]
pub fn page_target(path: &str) -> PageTarget {
    let segment = path
        .trim_start_matches('/')
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();

    match segment {
        "" => PageTarget::Module(Module::Dashboard),
        "login" => PageTarget::Login,
        other => other
            .parse::<Module>()
            .map_or(PageTarget::Unknown, PageTarget::Module),
    }
}

/// Outcome of a page guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum PageDecision {
    /// Render the page.
    Allow,
    /// No session or session expired.
    RedirectToLogin,
    /// Page denied; send the user to the landing module.
    RedirectToLanding {
        /// Landing module.
        module: Module,
    },
    /// Page denied and the landing module is denied too. Render nothing.
    Deny,
}

/// Page guard configured with where to send turned-away users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGuard {
    landing: Module,
    login_path: String,
}

impl Default for PageGuard {
    fn default() -> Self {
        Self::new(Module::Dashboard, "/login")
    }
}

impl PageGuard {
    /// Creates a guard.
    #[must_use]
    pub fn new(landing: Module, login_path: &str) -> Self {
        Self {
            landing,
            login_path: login_path.to_string(),
        }
    }

    /// Builds a guard from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::UnknownModule` if the landing module name is
    /// not a module.
    pub fn from_config(config: &AccessConfig) -> Result<Self, AccessError> {
        Ok(Self::new(
            config.landing_module.parse()?,
            &config.login_path,
        ))
    }

    /// Landing module.
    #[must_use]
    pub const fn landing(&self) -> Module {
        self.landing
    }

    /// Decides whether the session may open `path` at time `now` (unix
    /// seconds).
    #[must_use]
    pub fn decide(&self, session: Option<&Claims>, path: &str, now: i64) -> PageDecision {
        let target = page_target(path);
        if target == PageTarget::Login {
            return PageDecision::Allow;
        }

        let Some(claims) = session.filter(|claims| !claims.is_expired_at(now)) else {
            return PageDecision::RedirectToLogin;
        };
        let role = Some(claims.role());

        if let PageTarget::Module(module) = target {
            if has_page_access(role, module) {
                return PageDecision::Allow;
            }
        }

        if has_page_access(role, self.landing) {
            PageDecision::RedirectToLanding {
                module: self.landing,
            }
        } else {
            PageDecision::Deny
        }
    }

    /// Browser location for a redirect decision.
    #[must_use]
    pub fn location(&self, decision: PageDecision) -> Option<String> {
        match decision {
            PageDecision::RedirectToLogin => Some(self.login_path.clone()),
            PageDecision::RedirectToLanding { module } => Some(format!("/{module}")),
            PageDecision::Allow | PageDecision::Deny => None,
        }
    }
}
