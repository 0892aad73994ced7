use backend::{
    build_rocket,
    config::{StoreConfig, DEFAULT_ADDRESS, DEFAULT_PORT},
    store::VoterStore,
};
use rocket::figment::{Figment, Profile, providers::{Env, Format, Toml}};
use rocket::Config;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Rocket's usual provider chain, with this service's address and port as the lowest layer.
fn rocket_figment() -> Figment {
    Figment::from(Config::default())
        .merge(("address", DEFAULT_ADDRESS))
        .merge(("port", DEFAULT_PORT))
        .merge(Toml::file(Env::var_or("ROCKET_CONFIG", "Rocket.toml")).nested())
        .merge(Env::prefixed("ROCKET_").ignore(&["PROFILE"]).global())
        .select(Profile::from_env_or("ROCKET_PROFILE", Config::DEFAULT_PROFILE))
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    info!("🚀 Starting voter API server");

    let config = StoreConfig::from_env()?;
    let store = match VoterStore::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialise {:?} voter store: {}", config.backend, e);
            return Err(e.into());
        }
    };

    let _rocket = build_rocket(rocket::custom(rocket_figment()), store)
        .launch()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_defaults_apply_below_rocket_config() {
        if std::env::var_os("ROCKET_PORT").is_some() || std::env::var_os("ROCKET_CONFIG").is_some() {
            return;
        }
        let config: Config = rocket_figment().extract().unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.address.to_string(), DEFAULT_ADDRESS);

        // Rocket's stock chain already carries port 8000, so joining cannot lower it to ours.
        let joined: Config = Config::figment().join(("port", DEFAULT_PORT)).extract().unwrap();
        assert_eq!(joined.port, Config::default().port);
    }
}
