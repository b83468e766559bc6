/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use humanize_rs::ParseError;
use humanize_rs::bytes::Bytes;
use yaml_rust::{Yaml, yaml};

use super::{FtpClientConfig, FtpControlConfig, FtpTransferConfig};

fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

fn normalize_key(k: &str) -> String {
    k.to_lowercase().replace('-', "_")
}

fn as_buffer_size(v: &Yaml) -> anyhow::Result<usize> {
    let size = match v {
        Yaml::String(value) => value.parse::<Bytes>()?.size(),
        Yaml::Integer(value) => usize::try_from(*value)?,
        _ => {
            return Err(anyhow!(
                "yaml value type for humanize usize should be 'string' or 'integer'"
            ));
        }
    };
    if size == 0 {
        return Err(anyhow!("size should not be zero"));
    }
    Ok(size)
}

fn as_duration(v: &Yaml) -> anyhow::Result<Duration> {
    match v {
        Yaml::String(value) => match humanize_rs::duration::parse(value) {
            Ok(v) => Ok(v),
            Err(ParseError::MissingUnit) => {
                if let Ok(u) = u64::from_str(value) {
                    Ok(Duration::from_secs(u))
                } else if let Ok(f) = f64::from_str(value) {
                    Duration::try_from_secs_f64(f).map_err(anyhow::Error::new)
                } else {
                    Err(anyhow!("invalid duration string"))
                }
            }
            Err(e) => Err(anyhow!("invalid humanize duration string: {e}")),
        },
        Yaml::Integer(value) => {
            let u = u64::try_from(*value).map_err(|_| anyhow!("negative duration"))?;
            Ok(Duration::from_secs(u))
        }
        Yaml::Real(s) => {
            let f = f64::from_str(s).map_err(|e| anyhow!("invalid f64 value: {e}"))?;
            Duration::try_from_secs_f64(f).map_err(anyhow::Error::new)
        }
        _ => Err(anyhow!(
            "yaml value type for humanize duration should be 'string' or 'integer' or 'real'"
        )),
    }
}

impl FtpControlConfig {
    pub fn parse_yaml(value: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = value {
            let mut config = FtpControlConfig::default();
            foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                "max_response_len" | "max_response_length" => {
                    config.max_response_len = as_buffer_size(v)
                        .context(format!("invalid humanize usize value for key {k}"))?;
                    Ok(())
                }
                "command_timeout" => {
                    config.command_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
            Ok(config)
        } else {
            Err(anyhow!("invalid yaml type"))
        }
    }
}

impl FtpTransferConfig {
    pub fn parse_yaml(value: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = value {
            let mut config = FtpTransferConfig::default();
            foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                "buffer_size" => {
                    config.buffer_size = as_buffer_size(v)
                        .context(format!("invalid humanize usize value for key {k}"))?;
                    Ok(())
                }
                "idle_timeout" => {
                    config.idle_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                "data_connect_timeout" => {
                    config.data_connect_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
            Ok(config)
        } else {
            Err(anyhow!("invalid yaml type"))
        }
    }
}

impl FtpClientConfig {
    pub fn parse_yaml(value: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = value {
            let mut config = FtpClientConfig::default();
            foreach_kv(map, |k, v| match normalize_key(k).as_str() {
                "control" => {
                    config.control = FtpControlConfig::parse_yaml(v)
                        .context(format!("invalid ftp control config value for key {k}"))?;
                    Ok(())
                }
                "transfer" => {
                    config.transfer = FtpTransferConfig::parse_yaml(v)
                        .context(format!("invalid ftp transfer config value for key {k}"))?;
                    Ok(())
                }
                "connect_timeout" => {
                    config.connect_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                "greeting_timeout" => {
                    config.greeting_timeout = as_duration(v)
                        .context(format!("invalid humanize duration value for key {k}"))?;
                    Ok(())
                }
                _ => Err(anyhow!("invalid key {k}")),
            })?;
            Ok(config)
        } else {
            Err(anyhow!("invalid yaml type"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    fn load(s: &str) -> Yaml {
        YamlLoader::load_from_str(s).unwrap().remove(0)
    }

    #[test]
    fn client_config() {
        let doc = load(
            r#"
            connect_timeout: 5s
            greeting-timeout: 3
            control:
              max_response_len: 4KiB
              command_timeout: 1m
            transfer:
              buffer_size: 8192
              idle_timeout: 500ms
            "#,
        );
        let config = FtpClientConfig::parse_yaml(&doc).unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.greeting_timeout, Duration::from_secs(3));
        assert_eq!(config.control.max_response_len, 4096);
        assert_eq!(config.control.command_timeout, Duration::from_secs(60));
        assert_eq!(config.transfer.buffer_size, 8192);
        assert_eq!(config.transfer.idle_timeout, Duration::from_millis(500));
        assert_eq!(
            config.transfer.data_connect_timeout,
            FtpTransferConfig::default().data_connect_timeout
        );
    }

    #[test]
    fn invalid_key() {
        let doc = load("idle_timeout: 1s");
        assert!(FtpClientConfig::parse_yaml(&doc).is_err());

        let doc = load("transfer:\n  buffer_size: 0");
        assert!(FtpClientConfig::parse_yaml(&doc).is_err());

        let doc = load("- 1");
        assert!(FtpClientConfig::parse_yaml(&doc).is_err());
    }
}
