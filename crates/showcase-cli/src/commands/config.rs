use anyhow::Result;
use showcase_core::config::ShowcaseConfig;
use showcase_infrastructure::ConfigService;

pub fn show(service: &ConfigService, config: &ShowcaseConfig) -> Result<()> {
    println!("# {}", service.config_path()?.display());
    print!("{}", ConfigService::render(config)?);
    Ok(())
}
