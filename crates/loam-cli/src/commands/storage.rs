use std::path::Path;

use loam_core::location::validate;
use loam_core::LocationKind;

use crate::commands::common::Services;
use crate::error::CliError;

pub async fn run_storage_show(services: &Services) -> Result<(), CliError> {
    let location = services.resolver.current().await?;
    let kind = serde_json::to_string(&location.kind)?;
    println!("Path:    {}", location.path.display());
    println!("Type:    {}", kind.trim_matches('"'));
    println!("Default: {}", location.is_default);
    Ok(())
}

pub async fn run_storage_set(path: &Path, services: &Services) -> Result<(), CliError> {
    let location = services
        .resolver
        .set_location(path, LocationKind::Custom)
        .await?;
    tracing::info!(path = %location.path.display(), "storage location switched");
    println!("Storage location set to {}", location.path.display());
    Ok(())
}

pub async fn run_storage_reset(services: &Services) -> Result<(), CliError> {
    let location = services.resolver.reset_to_default().await?;
    tracing::info!(path = %location.path.display(), "storage location reset to default");
    println!("Storage location reset to {}", location.path.display());
    Ok(())
}

pub async fn run_storage_check(path: &Path) -> Result<(), CliError> {
    if validate(path).await {
        println!("{} is writable", path.display());
    } else {
        println!("{} is NOT writable", path.display());
    }
    Ok(())
}
