use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::path::PathBuf;

/// Flags for the headless demo binary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliOverrides {
    config: Option<PathBuf>,
    seed: Option<u64>,
    objects: Option<usize>,
}

impl CliOverrides {
    pub fn parse_from_env() -> Result<Self> {
        Self::parse(env::args())
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = CliOverrides::default();
        let mut iter = args.into_iter();
        let _ = iter.next(); // skip program name if present
        while let Some(raw_flag) = iter.next() {
            let flag = raw_flag.as_ref();
            if !flag.starts_with("--") {
                bail!("Unexpected argument '{flag}'. Use --config/--seed/--objects with values.");
            }
            let key = &flag[2..];
            let value =
                iter.next().ok_or_else(|| anyhow!("Expected a value after '{flag}'"))?.as_ref().to_string();
            match key {
                "config" => {
                    overrides.config = Some(PathBuf::from(value));
                }
                "seed" => {
                    overrides.seed =
                        Some(value.parse::<u64>().with_context(|| format!("Invalid seed '{value}'"))?);
                }
                "objects" => {
                    overrides.objects = Some(
                        value.parse::<usize>().with_context(|| format!("Invalid object count '{value}'"))?,
                    );
                }
                _ => bail!("Unknown flag '{flag}'. Supported flags: --config, --seed, --objects."),
            }
        }
        Ok(overrides)
    }

    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn objects(&self) -> Option<usize> {
        self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let overrides =
            CliOverrides::parse(["demo", "--seed", "7", "--objects", "4", "--config", "cfg.json"])
                .expect("parse");
        assert_eq!(overrides.seed(), Some(7));
        assert_eq!(overrides.objects(), Some(4));
        assert_eq!(overrides.config_path(), Some(&PathBuf::from("cfg.json")));
    }

    #[test]
    fn rejects_unknown_flag() {
        let err = CliOverrides::parse(["demo", "--unknown", "1"]).unwrap_err();
        assert!(err.to_string().contains("Unknown flag"));
    }

    #[test]
    fn rejects_missing_value() {
        let err = CliOverrides::parse(["demo", "--seed"]).unwrap_err();
        assert!(err.to_string().contains("Expected a value"));
    }

    #[test]
    fn rejects_bare_argument() {
        let err = CliOverrides::parse(["demo", "oops"]).unwrap_err();
        assert!(err.to_string().contains("Unexpected argument"));
    }
}
