use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

fn default_port() -> u16 {
    8883
}

fn default_interval() -> u32 {
    2000
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    ssid: String,
    password: String,
    endpoint: String,
    #[serde(default = "default_port")]
    port: u16,
    client_id: String,
    ca_cert: String,
    device_cert: String,
    private_key: String,
    #[serde(default = "default_interval")]
    publish_interval_ms: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed=cfg.toml");

    // Read and parse
    let toml_str = fs::read_to_string("cfg.toml")
        .map_err(|e| format!("cfg.toml: {e} (start from cfg.toml.example)"))?;
    let raw: RawConfig = toml::from_str(&toml_str)?;

    // Generate Rust code
    let code = format!(
        r#"
        pub const CONFIG: Config = Config {{
            ssid: {ssid:?},
            password: {password:?},
            endpoint: {endpoint:?},
            port: {port},
            client_id: {client_id:?},
            ca_cert: {ca:?},
            device_cert: {cert:?},
            private_key: {key:?},
            publish_interval_ms: {interval},
        }};
    "#,
        ssid = raw.ssid,
        password = raw.password,
        endpoint = raw.endpoint,
        port = raw.port,
        client_id = raw.client_id,
        ca = raw.ca_cert,
        cert = raw.device_cert,
        key = raw.private_key,
        interval = raw.publish_interval_ms,
    );

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, code)?;

    Ok(())
}
