use clap::{Parser, Subcommand, ValueEnum};
use stockpile::api::SortKey;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "stockpile", bin_name = "stockpile", version = get_version())]
#[command(about = "Keep track of products, stock and prices", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use the per-user data directory instead of ./.stockpile
    #[arg(short, long, global = true)]
    pub global: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Product(ProductCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Name,
    Quantity,
    Price,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Quantity => SortKey::Quantity,
            SortArg::Price => SortKey::Price,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// Add a new product
    #[command(alias = "a", display_order = 1)]
    Add {
        /// Product name (2-100 characters)
        #[arg(allow_hyphen_values = true)]
        name: String,

        /// Category (2-50 characters)
        #[arg(allow_hyphen_values = true)]
        category: String,

        /// Units in stock (0-1,000,000)
        #[arg(allow_hyphen_values = true)]
        quantity: String,

        /// Unit price (greater than 0, max 1,000,000)
        #[arg(allow_hyphen_values = true)]
        price: String,
    },

    /// List products
    #[command(alias = "ls", display_order = 2)]
    List {
        /// Only products whose category contains this text
        #[arg(short, long)]
        category: Option<String>,

        /// Sort ascending by this field (default: insertion order)
        #[arg(short, long, value_enum)]
        sort: Option<SortArg>,
    },

    /// Search by id, or by part of the name or category
    #[command(alias = "s", display_order = 3)]
    Search {
        /// A number looks up that exact id; anything else matches name or category
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Show inventory statistics
    #[command(display_order = 4)]
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Show one product
    #[command(alias = "v", display_order = 10)]
    Show {
        /// Product id
        id: u32,
    },

    /// Change some fields of a product
    #[command(alias = "e", display_order = 11)]
    Update {
        /// Product id
        id: u32,

        /// New name
        #[arg(long, allow_hyphen_values = true)]
        name: Option<String>,

        /// New category
        #[arg(long, allow_hyphen_values = true)]
        category: Option<String>,

        /// New quantity in stock
        #[arg(long, allow_hyphen_values = true)]
        quantity: Option<String>,

        /// New unit price
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,
    },

    /// Delete a product
    #[command(alias = "rm", display_order = 12)]
    Delete {
        /// Product id
        id: u32,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Get or set configuration
    #[command(display_order = 30)]
    Config {
        /// Configuration key (data-file, low-stock-threshold)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
