//! View routing and the authentication guard.
//!
//! Every console view has a path. Protected views require a session; asking
//! for one without a session yields a redirect to [`Route::Login`].

use std::fmt;

use crate::ids::GroupId;
use crate::session::Session;

/// A console view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/signup`
    Signup,
    /// `/`
    Home,
    /// `/wallet-groups`
    WalletGroups,
    /// `/wallet-group/new`
    CreateWalletGroup,
    /// `/wallet-group/view` (active group) or `/wallet-group/view/:id`
    ViewWalletGroup(Option<GroupId>),
    /// `/tokens`
    Tokens,
    /// `/distribute`
    Distribute,
    /// `/collect`
    Collect,
    /// `/burn`
    Burn,
    /// `/buy`
    Buy,
    /// `/sell`
    Sell,
    /// `/usage-report`
    UsageReport,
    /// `/help`
    Help,
}

/// Outcome of routing a request through the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Show the requested view
    Render(Route),
    /// Show a different view instead
    Redirect(Route),
}

impl Route {
    /// Parse a path. Trailing slashes and query strings are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/wallet-groups" => Route::WalletGroups,
            "/wallet-group/new" => Route::CreateWalletGroup,
            "/wallet-group/view" => Route::ViewWalletGroup(None),
            "/tokens" => Route::Tokens,
            "/distribute" => Route::Distribute,
            "/collect" => Route::Collect,
            "/burn" => Route::Burn,
            "/buy" => Route::Buy,
            "/sell" => Route::Sell,
            "/usage-report" => Route::UsageReport,
            "/help" => Route::Help,
            other => {
                let id = other.strip_prefix("/wallet-group/view/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::ViewWalletGroup(Some(GroupId::new(id)))
            }
        };
        Some(route)
    }

    /// Canonical path of this view.
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Home => "/".to_string(),
            Route::WalletGroups => "/wallet-groups".to_string(),
            Route::CreateWalletGroup => "/wallet-group/new".to_string(),
            Route::ViewWalletGroup(None) => "/wallet-group/view".to_string(),
            Route::ViewWalletGroup(Some(id)) => format!("/wallet-group/view/{id}"),
            Route::Tokens => "/tokens".to_string(),
            Route::Distribute => "/distribute".to_string(),
            Route::Collect => "/collect".to_string(),
            Route::Burn => "/burn".to_string(),
            Route::Buy => "/buy".to_string(),
            Route::Sell => "/sell".to_string(),
            Route::UsageReport => "/usage-report".to_string(),
            Route::Help => "/help".to_string(),
        }
    }

    /// Heading shown for the view.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Home => "Home",
            Route::WalletGroups => "Manage Wallet Groups",
            Route::CreateWalletGroup => "Create Wallet Group",
            Route::ViewWalletGroup(_) => "View Wallet Groups",
            Route::Tokens => "Manage Tokens",
            Route::Distribute => "Distribute AMB",
            Route::Collect => "Collect Funds",
            Route::Burn => "Burn Tokens",
            Route::Buy => "Start Buy Process",
            Route::Sell => "Start Sell Process",
            Route::UsageReport => "Get Usage Data",
            Route::Help => "Help",
        }
    }

    /// Whether the view needs a logged-in session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Signup | Route::Help)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Route a request through the authentication guard.
pub fn navigate(route: Route, session: Option<&Session>) -> Navigation {
    if route.is_protected() && session.is_none() {
        log::debug!("redirecting {route} to /login: no session");
        return Navigation::Redirect(Route::Login);
    }
    Navigation::Render(route)
}

/// Entries of the main menu, in display order.
pub fn main_menu() -> Vec<Route> {
    vec![
        Route::WalletGroups,
        Route::ViewWalletGroup(None),
        Route::Tokens,
        Route::Distribute,
        Route::Collect,
        Route::Burn,
        Route::Buy,
        Route::Sell,
        Route::UsageReport,
        Route::Help,
    ]
}

/// Topics listed on the help view.
pub const HELP_TOPICS: [&str; 5] = [
    "Create a wallet group to manage multiple wallets at once.",
    "Distribute AMB to all wallets from the first wallet in the group.",
    "Select a token to buy/sell/burn across all wallets.",
    "Collect funds from all wallets back to the first wallet.",
    "Generate usage reports for a date range (PDF).",
];
