//! Tax slab commands.

use clap::Subcommand;

use crate::error::{CliError, CliResult};
use crate::Ctx;

#[derive(Subcommand)]
pub enum TaxCmd {
    /// List tax slabs (active first)
    List,

    /// Activate a slab by name, e.g. GST_5
    Activate { name: String },

    /// Add a custom slab (inactive until activated)
    Add {
        name: String,

        /// Rate as a percentage, e.g. 28 or 0.25
        rate: f64,
    },
}

pub async fn run(ctx: &Ctx, cmd: TaxCmd) -> CliResult<()> {
    ctx.session.require_admin()?;

    match cmd {
        TaxCmd::List => {
            for s in ctx.db.settings().list_tax_settings().await? {
                let marker = if s.is_active { " (active)" } else { "" };
                println!("{:<10} {:>6.2}%{}", s.tax_name, s.rate().percentage(), marker);
            }
            Ok(())
        }

        TaxCmd::Activate { name } => {
            ctx.db.settings().activate(&name).await?;
            println!("Activated {}", name);
            Ok(())
        }

        TaxCmd::Add { name, rate } => {
            if !(0.0..=100.0).contains(&rate) {
                return Err(CliError::InvalidArgument(
                    "rate must be between 0 and 100 percent".to_string(),
                ));
            }
            let bps = (rate * 100.0).round() as u32;
            let created = ctx.db.settings().create(&name, bps).await?;
            println!(
                "Created {} at {:.2}% (run `kirana tax activate {}` to use it)",
                created.tax_name,
                created.rate().percentage(),
                created.tax_name
            );
            Ok(())
        }
    }
}
