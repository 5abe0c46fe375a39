//! Brand and product-type commands.

use clap::Subcommand;

use crate::error::CliResult;
use crate::Ctx;

#[derive(Subcommand)]
pub enum BrandCmd {
    /// Add a brand
    Add { name: String },

    /// List active brands
    List,

    /// Deactivate a brand by name
    Deactivate { name: String },
}

#[derive(Subcommand)]
pub enum TypeCmd {
    /// Add a product type
    Add { name: String },

    /// List product types in display order
    List,
}

pub async fn run_brand(ctx: &Ctx, cmd: BrandCmd) -> CliResult<()> {
    ctx.session.require_admin()?;

    match cmd {
        BrandCmd::Add { name } => {
            let brand = ctx.db.catalog().create_brand(&name).await?;
            println!("Created brand {}", brand.brand_name);
        }
        BrandCmd::List => {
            for brand in ctx.db.catalog().list_brands().await? {
                println!("{}", brand.brand_name);
            }
        }
        BrandCmd::Deactivate { name } => {
            ctx.db.catalog().deactivate_brand(&name).await?;
            println!("Deactivated brand {}", name);
        }
    }
    Ok(())
}

pub async fn run_type(ctx: &Ctx, cmd: TypeCmd) -> CliResult<()> {
    ctx.session.require_admin()?;

    match cmd {
        TypeCmd::Add { name } => {
            let ptype = ctx.db.catalog().create_product_type(&name).await?;
            println!(
                "Created product type {} (display order {})",
                ptype.type_name, ptype.display_order
            );
        }
        TypeCmd::List => {
            for ptype in ctx.db.catalog().list_product_types().await? {
                println!("{:>3}  {}", ptype.display_order, ptype.type_name);
            }
        }
    }
    Ok(())
}
