//! Categories command implementation.

use clap::Args;

use crate::category::Category;
use crate::error::Result;

/// List the decal categories accepted by --category
#[derive(Args, Debug)]
pub struct CategoriesArgs {}

pub fn run(_args: CategoriesArgs) -> Result<()> {
    for category in Category::ALL {
        println!("{}", category);
    }
    Ok(())
}
