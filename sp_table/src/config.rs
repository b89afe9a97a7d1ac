//! Command line and environment configuration.
//!
//! Flags win over environment variables (a `.env` file is loaded first),
//! which win over an optional JSON settings file, which wins over the
//! library defaults.

use anyhow::{Context, Error, anyhow, bail};
use pico_args::Arguments;
use solo_poker::{GameSettings, constants::DEFAULT_TICK};
use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};

pub const HELP: &str = "\
Play No-Limit Texas Hold'em against computer players

USAGE:
  sp_table [OPTIONS]

OPTIONS:
  --bots        N        Computer players, 1 to 4        [default: env SP_BOTS or 1]
  --difficulty  LEVEL    easy, normal or hard            [default: env SP_DIFFICULTY or normal]
  --chips       N        Starting stack for every seat   [default: env SP_CHIPS or 1000]
  --big-blind   N        Big blind, small blind is half  [default: env SP_BIG_BLIND or 20]
  --config      FILE     JSON settings file
  --seed        N        Seed the deck and the bots for a reproducible session
  --tick-ms     N        Milliseconds between table steps [default: 250]

FLAGS:
  --json                 Print events as JSON lines
  -v, --verbose          Debug logging on stderr
  -h, --help             Print help information

COMMANDS (while playing):
  fold | check | call | raise N     Act when it's your turn (f, x, c, r N)
  table                             Show the table
  quit                              Leave
";

/// Everything the binary needs to start a session
#[derive(Debug, Clone)]
pub struct Args {
    pub settings: GameSettings,
    pub seed: Option<u64>,
    pub tick: Duration,
    pub json: bool,
    pub verbose: bool,
}

/// Read a flag, falling back to an environment variable.
fn flag_or_env<T>(pargs: &mut Arguments, flag: &'static str, var: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: Display,
{
    if let Some(value) = pargs.opt_value_from_str(flag)? {
        return Ok(Some(value));
    }
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|err| anyhow!("invalid {var}={value}: {err}")),
        Err(_) => Ok(None),
    }
}

impl Args {
    /// Parse the process arguments. Returns `None` when only help was
    /// asked for.
    pub fn from_env() -> Result<Option<Self>, Error> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            print!("{HELP}");
            return Ok(None);
        }

        let base = match pargs.opt_value_from_str::<_, PathBuf>("--config")? {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("can't read {}", path.display()))?;
                GameSettings::from_json(&json)?
            }
            None => GameSettings::default(),
        };

        let settings = GameSettings {
            num_bots: flag_or_env(&mut pargs, "--bots", "SP_BOTS")?.unwrap_or(base.num_bots),
            difficulty: flag_or_env(&mut pargs, "--difficulty", "SP_DIFFICULTY")?
                .unwrap_or(base.difficulty),
            starting_chips: flag_or_env(&mut pargs, "--chips", "SP_CHIPS")?
                .unwrap_or(base.starting_chips),
            big_blind: flag_or_env(&mut pargs, "--big-blind", "SP_BIG_BLIND")?
                .unwrap_or(base.big_blind),
        };
        settings.validate()?;

        let tick_ms: u64 = pargs
            .opt_value_from_str("--tick-ms")?
            .unwrap_or(DEFAULT_TICK.as_millis() as u64);
        if tick_ms == 0 {
            bail!("--tick-ms must be positive");
        }

        let args = Self {
            settings,
            seed: pargs.opt_value_from_str("--seed")?,
            tick: Duration::from_millis(tick_ms),
            json: pargs.contains("--json"),
            verbose: pargs.contains(["-v", "--verbose"]),
        };

        let rest = pargs.finish();
        if !rest.is_empty() {
            bail!("unexpected arguments: {rest:?}");
        }
        Ok(Some(args))
    }
}
