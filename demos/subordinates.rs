//! Print the subordinates of one user from JSON catalogs.
//!
//! ```text
//! cargo run --example subordinates -- --user-id 3
//! cargo run --example subordinates -- --user-id 1 --strategy lazy
//! ```
//!
//! Without `--strategy` the program asks which algorithm to use.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use user_hierarchy::{FileSource, RoleHierarchyResolver, Strategy, UserId};

#[derive(Parser)]
#[command(name = "subordinates")]
#[command(about = "List everyone who reports to a user", version)]
struct Cli {
    /// User whose subordinates are printed.
    #[arg(long, default_value = "3")]
    user_id: UserId,

    /// `eager` or `lazy`; prompts when omitted.
    #[arg(long)]
    strategy: Option<Strategy>,

    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/roles.json"))]
    roles: PathBuf,

    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/users.json"))]
    users: PathBuf,
}

fn prompt_for_strategy() -> io::Result<Strategy> {
    print!("Do you want to use the recursive algorithm? (y/N) ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let use_recursive = matches!(answer.trim(), "y" | "Y" | "yes" | "Yes");
    Ok(Strategy::from_recursive_flag(use_recursive))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let strategy = match cli.strategy {
        Some(strategy) => strategy,
        None => prompt_for_strategy()?,
    };

    let mut resolver = RoleHierarchyResolver::new(strategy == Strategy::Lazy);
    resolver.load_from(&FileSource::new(&cli.roles, &cli.users))?;

    let mut subordinates = resolver.get_subordinates(cli.user_id);
    subordinates.sort_by_key(|user| user.id());

    println!("Subordinates of user {} ({strategy}):", cli.user_id);
    for user in &subordinates {
        println!("  {user}");
    }
    if subordinates.is_empty() {
        println!("  (none)");
    }

    Ok(())
}
