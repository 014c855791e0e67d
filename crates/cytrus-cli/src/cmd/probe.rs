//! Print the latest published version.

use anyhow::Result;

use crate::ui::ConsoleReporter;
use crate::{GlobalArgs, VersionArgs};

pub async fn probe(global: &GlobalArgs, version: &VersionArgs) -> Result<()> {
    let client = super::client(global)?;
    let reporter = ConsoleReporter::new(true);
    let found = super::resolve_version(&client, global, version, &reporter).await?;
    println!("{found}");
    Ok(())
}
