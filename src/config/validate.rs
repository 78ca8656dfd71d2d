// src/config/validate.rs

use anyhow::Result;

use crate::config::model::ConfigFile;
use crate::errors::PipelineError;

/// Run semantic validation against a loaded configuration.
///
/// This checks:
/// - every directory role in `[paths]` resolves to a non-empty path
/// - tool command templates are non-empty
/// - `[[styles.extract]]` rules have all three fields
/// - `[watch].settle_ms >= 1` and `[serve].port != 0`
/// - `[engine].command` is non-empty
///
/// Every task consults at least one path role, so an empty role would
/// otherwise surface as a confusing I/O error mid-build; we fail fast here
/// instead.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_path_roles(cfg)?;
    validate_tools(cfg)?;
    validate_extract_rules(cfg)?;
    validate_watch_serve(cfg)?;
    validate_engine(cfg)?;
    Ok(())
}

fn config_err(msg: impl Into<String>) -> anyhow::Error {
    PipelineError::Config(msg.into()).into()
}

fn validate_path_roles(cfg: &ConfigFile) -> Result<()> {
    let source = &cfg.paths.source;
    let public = &cfg.paths.public;

    let roles: [(&str, &str); 18] = [
        ("paths.source.root", &source.root),
        ("paths.source.css", &source.css),
        ("paths.source.js", &source.js),
        ("paths.source.images", &source.images),
        ("paths.source.fonts", &source.fonts),
        ("paths.source.icons", &source.icons),
        ("paths.source.patterns", &source.patterns),
        ("paths.source.data", &source.data),
        ("paths.source.meta", &source.meta),
        ("paths.source.annotations", &source.annotations),
        ("paths.source.styleguide", &source.styleguide),
        ("paths.public.root", &public.root),
        ("paths.public.css", &public.css),
        ("paths.public.js", &public.js),
        ("paths.public.images", &public.images),
        ("paths.public.fonts", &public.fonts),
        ("paths.public.patterns", &public.patterns),
        ("paths.public.styleguide", &public.styleguide),
    ];

    for (role, value) in roles {
        if value.trim().is_empty() {
            return Err(config_err(format!("path role '{role}' must not be empty")));
        }
    }

    Ok(())
}

fn validate_tools(cfg: &ConfigFile) -> Result<()> {
    let tools: [(&str, &str); 5] = [
        ("tools.sass", &cfg.tools.sass),
        ("tools.autoprefixer", &cfg.tools.autoprefixer),
        ("tools.svg_sprite", &cfg.tools.svg_sprite),
        ("tools.bundle", &cfg.tools.bundle),
        ("tools.vendor_bundle", &cfg.tools.vendor_bundle),
    ];

    for (name, template) in tools {
        if template.trim().is_empty() {
            return Err(config_err(format!(
                "tool command '{name}' must not be empty"
            )));
        }
    }

    Ok(())
}

fn validate_extract_rules(cfg: &ConfigFile) -> Result<()> {
    for (i, rule) in cfg.styles.extract.iter().enumerate() {
        if rule.src.trim().is_empty() || rule.dest.trim().is_empty() {
            return Err(config_err(format!(
                "[[styles.extract]] rule {i} needs both 'src' and 'dest'"
            )));
        }
        if rule.prefix.trim().is_empty() {
            return Err(config_err(format!(
                "[[styles.extract]] rule {i} needs a non-empty 'prefix'"
            )));
        }
    }
    Ok(())
}

fn validate_watch_serve(cfg: &ConfigFile) -> Result<()> {
    if cfg.watch.settle_ms == 0 {
        return Err(config_err("[watch].settle_ms must be >= 1 (got 0)"));
    }
    if cfg.serve.port == 0 {
        return Err(config_err("[serve].port must not be 0"));
    }
    Ok(())
}

fn validate_engine(cfg: &ConfigFile) -> Result<()> {
    if cfg.engine.command.trim().is_empty() {
        return Err(config_err("[engine].command must not be empty"));
    }
    Ok(())
}
