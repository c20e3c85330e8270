//! CLI application for driving the LIFX bridge by hand.
//!
//! Issues the same calls the smart-home host would make, which is handy for
//! checking a token or a light without running the host.
//!
//! Run with: cargo run --example lifx_cli -- --help

use clap::{Parser, Subcommand};
use lifx_cloud_bridge::{BridgeConfig, ConfigKV, HANDSHAKE, HostPlugin, LifxBridge};

#[derive(Parser)]
#[command(name = "lifx-cli")]
#[command(about = "Control LIFX lights through the cloud bridge", long_about = None)]
struct Cli {
    /// LIFX personal access token (from cloud.lifx.com)
    #[arg(short, long, global = true, env = "LIFX_TOKEN")]
    token: Option<String>,

    /// Override the API root, e.g. for a local proxy
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the plugin manifest, configuration schema and handshake
    Manifest,

    /// List all lights visible to the token
    List,

    /// Get the power state of a light
    Status {
        /// Light id as reported by `list`
        id: String,
    },

    /// Turn a light on
    On { id: String },

    /// Turn a light off
    Off { id: String },

    /// Toggle a light based on its cached state
    Toggle { id: String },

    /// Get detailed diagnostics
    Diagnostics,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = BridgeConfig::new();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let bridge = LifxBridge::new(config)?;
    bridge.on_load().await?;

    if let Some(token) = &cli.token {
        bridge
            .on_configuration_update(&[ConfigKV::new(LifxBridge::TOKEN_KEY, token)])
            .await;
    }

    match cli.command {
        Commands::Manifest => {
            let manifest = bridge.get_manifest();
            println!(
                "{} ({}) {} by {}",
                manifest.name, manifest.id, manifest.version, manifest.author
            );
            for entry in bridge.get_plugin_configuration() {
                println!(
                    "  setting {:?}: {} - {}",
                    entry.key, entry.title, entry.description
                );
            }
            println!(
                "  handshake: v{} {}={}",
                HANDSHAKE.protocol_version,
                HANDSHAKE.magic_cookie_key,
                HANDSHAKE.magic_cookie_value
            );
        }

        Commands::List => {
            let devices = bridge.get_available_devices().await;
            if devices.is_empty() {
                println!("No lights found (check the token).");
            } else {
                println!("Found {} light(s):", devices.len());
                for device in devices {
                    let power = if bridge.get_device_status(&device.unique_id).await {
                        "ON"
                    } else {
                        "OFF"
                    };
                    println!(
                        "  {:14}  {:3}  {} {}",
                        device.unique_id, power, device.manufacturer_name, device.model_name
                    );
                }
            }
        }

        Commands::Status { id } => {
            let on = bridge.get_device_status(&id).await;
            println!("Light {}: {}", id, if on { "ON" } else { "OFF" });
        }

        Commands::On { id } => match bridge.on_device_toggle(&id, true).await {
            Ok(()) => println!("Light turned ON"),
            Err(e) => eprintln!("Error: {}", e),
        },

        Commands::Off { id } => match bridge.on_device_toggle(&id, false).await {
            Ok(()) => println!("Light turned OFF"),
            Err(e) => eprintln!("Error: {}", e),
        },

        Commands::Toggle { id } => {
            let on = bridge.get_device_status(&id).await;
            match bridge.on_device_toggle(&id, !on).await {
                Ok(()) => println!("Light toggled {}", if on { "OFF" } else { "ON" }),
                Err(e) => eprintln!("Error: {}", e),
            }
        }

        Commands::Diagnostics => {
            bridge.get_available_devices().await;
            let diag = bridge.diagnostics().await;
            println!("\nDiagnostics:\n{}", serde_json::to_string_pretty(&diag)?);
        }
    }

    Ok(())
}
