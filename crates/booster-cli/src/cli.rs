//! Command-line definition.

use std::path::PathBuf;

use booster_core::validation::{DEFAULT_MAX_DELAY_MINUTES, DEFAULT_MIN_DELAY_MINUTES};
use clap::{ArgAction, Args, Parser, Subcommand};

/// Booster operator console
#[derive(Parser, Debug)]
#[command(name = "booster", version, about = "Operator console for the Booster backend")]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// View to run
    #[command(subcommand)]
    pub command: Command,
}

/// Console views.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with a chat id (and optional pin)
    Login {
        /// Chat ID
        chat_id: String,
        /// Pin, at least 4 characters
        #[arg(long, env = "BOOSTER_PIN", hide_env_values = true)]
        pin: Option<String>,
    },

    /// Create an account
    Signup {
        /// Chat ID
        #[arg(long)]
        chat_id: String,
        /// Username
        #[arg(long)]
        username: String,
        /// Password, at least 6 characters
        #[arg(long)]
        password: String,
        /// Password again
        #[arg(long)]
        confirm_password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// Active wallet group and token
    Home,

    /// Main menu
    Menu,

    /// Help topics
    Help,

    /// Open a view by path (e.g. /buy, /wallet-group/view/<id>)
    Go {
        /// View path
        path: String,
    },

    /// Wallet groups
    Groups {
        /// Operation
        #[command(subcommand)]
        action: GroupsAction,
    },

    /// Tokens
    Tokens {
        /// Operation
        #[command(subcommand)]
        action: TokensAction,
    },

    /// Distribute AMB from the first wallet to every wallet of the active group
    Distribute {
        /// Amount per wallet
        amount: String,
        /// Follow per-wallet results until the process completes
        #[arg(long)]
        watch: bool,
    },

    /// Collect funds from every wallet back into the first one
    Collect,

    /// Burn the active token from every wallet
    Burn {
        /// Amount to burn
        amount: String,
    },

    /// Start buying the active token
    Buy(TradeArgs),

    /// Start selling the active token
    Sell(TradeArgs),

    /// Resumable transaction state
    Tx {
        /// Operation
        #[command(subcommand)]
        action: TxAction,
    },

    /// Download the usage report
    Report {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Where to write the PDF
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration file
    Config {
        /// Operation
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `booster groups ...`
#[derive(Subcommand, Debug)]
pub enum GroupsAction {
    /// List all groups
    List,
    /// Create a group
    Create {
        /// Group name
        name: String,
    },
    /// Make a group active
    Activate {
        /// Group id
        id: String,
    },
    /// Show a group's wallets; the active group without an id
    View {
        /// Group id
        id: Option<String>,
    },
}

/// `booster tokens ...`
#[derive(Subcommand, Debug)]
pub enum TokensAction {
    /// List tokens
    List,
    /// Register a token
    Add {
        /// Contract address
        address: String,
    },
    /// Make a token active
    Activate {
        /// Token id
        id: String,
    },
}

/// `booster tx ...`
#[derive(Subcommand, Debug)]
pub enum TxAction {
    /// Show the latest transaction's progress
    State {
        /// Follow live progress
        #[arg(long)]
        watch: bool,
    },
    /// Resume a paused transaction
    Resume,
}

/// Amounts and timing for a buy or sell.
#[derive(Args, Debug, Clone)]
pub struct TradeArgs {
    /// Amount for every wallet without its own entry
    #[arg(long)]
    pub amount: Option<String>,

    /// Per-wallet amount as ADDRESS=AMOUNT (repeatable)
    #[arg(long = "wallet", value_parser = parse_wallet_amount)]
    pub wallets: Vec<(String, String)>,

    /// Shortest delay between trades, in minutes
    #[arg(long, default_value_t = DEFAULT_MIN_DELAY_MINUTES)]
    pub min_delay: f64,

    /// Longest delay between trades, in minutes
    #[arg(long, default_value_t = DEFAULT_MAX_DELAY_MINUTES)]
    pub max_delay: f64,

    /// Follow per-wallet results until the process completes
    #[arg(long)]
    pub watch: bool,
}

/// `booster config ...`
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print a value by dotted key (e.g. api.base_url)
    Get {
        /// Dotted key
        key: String,
    },
    /// Set a value by dotted key
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file (defaults to the standard location)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=value`
        #[arg(long)]
        docker_env: bool,
    },
}

fn parse_wallet_amount(s: &str) -> Result<(String, String), String> {
    let (address, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDRESS=AMOUNT, got '{s}'"))?;
    if address.trim().is_empty() {
        return Err(format!("missing wallet address in '{s}'"));
    }
    Ok((address.trim().to_string(), amount.trim().to_string()))
}
