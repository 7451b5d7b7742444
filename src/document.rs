//! Host configuration document codec
//!
//! Pure translation from a profile to the host's settings-import JSON
//! schema (`user_options.connections.socks_proxy`). serde_json handles the
//! escaping of quotes and control characters in string fields.

use serde::Serialize;

use crate::error::Result;
use crate::profile::SocksProfile;

#[derive(Serialize)]
struct ConfigDocument {
    user_options: UserOptions,
}

#[derive(Serialize)]
struct UserOptions {
    connections: Connections,
}

#[derive(Serialize)]
struct Connections {
    socks_proxy: SocksProxySettings,
}

#[derive(Serialize)]
struct SocksProxySettings {
    dns_over_socks: bool,
    host: String,
    password: String,
    port: u16,
    use_proxy: bool,
    username: String,
}

/// Render the full settings-import document for `profile`. The `use_proxy`
/// flag is carried through verbatim; all other fields come from the profile.
pub fn config_document(profile: &SocksProfile, use_proxy: bool) -> Result<String> {
    let document = ConfigDocument {
        user_options: UserOptions {
            connections: Connections {
                socks_proxy: SocksProxySettings {
                    dns_over_socks: profile.dns_over_socks(),
                    host: profile.host().to_string(),
                    password: profile.password().to_string(),
                    port: profile.port(),
                    use_proxy,
                    username: profile.username().to_string(),
                },
            },
        },
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Minimal document that only switches the proxy off. Needs no profile
/// context.
pub fn disable_document() -> String {
    serde_json::json!({
        "user_options": {
            "connections": {
                "socks_proxy": {
                    "use_proxy": false
                }
            }
        }
    })
    .to_string()
}
