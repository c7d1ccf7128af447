//! Bench configuration files
//!
//! The test bench stores its run parameters in an INI-style file with a
//! `[CONFIG_ENSAIO]` section keyed by short codes:
//!
//! ```text
//! [CONFIG_ENSAIO]
//! NOS = 10       ; number of snubs
//! TBS = 60       ; seconds between cycles
//! USL = 100      ; upper speed limit (km/h)
//! UWT = 5        ; wait at upper limit (s)
//! LSL = 30       ; lower speed limit (km/h)
//! LWT = 5        ; wait at lower limit (s)
//! TMO = FALSE    ; inhibit motor shutdown
//! TAO = TRUE     ; enable AUX1 output
//! TAS = 250.0    ; AUX1 temperature (C)
//! TAT = 12.5     ; AUX1 time (s)
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::entities::configs;

pub const SECTION: &str = "CONFIG_ENSAIO";

/// Keys in the order the bench writes them.
pub const KEYS: [&str; 10] = [
    "NOS", "TBS", "USL", "UWT", "LSL", "LWT", "TMO", "TAO", "TAS", "TAT",
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("missing [CONFIG_ENSAIO] section")]
    MissingSection,

    #[error("missing key {0}")]
    MissingKey(&'static str),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("line {0} is not a key = value pair")]
    Malformed(usize),
}

/// The bench-facing part of a configuration: everything except identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSettings {
    pub number: i32,
    pub time_between_cycles: i32,
    pub upper_limit: i32,
    pub inferior_limit: i32,
    pub upper_time: i32,
    pub inferior_time: i32,
    pub disable_shutdown: bool,
    pub enable_output: bool,
    pub temperature: f64,
    pub time: f64,
}

impl From<&configs::Model> for BenchSettings {
    fn from(model: &configs::Model) -> Self {
        Self {
            number: model.number,
            time_between_cycles: model.time_between_cycles,
            upper_limit: model.upper_limit,
            inferior_limit: model.inferior_limit,
            upper_time: model.upper_time,
            inferior_time: model.inferior_time,
            disable_shutdown: model.disable_shutdown,
            enable_output: model.enable_output,
            temperature: model.temperature,
            time: model.time,
        }
    }
}

pub fn parse(text: &str) -> Result<BenchSettings, ParseError> {
    let values = section_values(text)?;

    let int = |key: &'static str| -> Result<i32, ParseError> {
        let raw = lookup(&values, key)?;
        raw.parse::<i32>().map_err(|_| ParseError::InvalidValue {
            key,
            value: raw.to_string(),
        })
    };
    let float = |key: &'static str| -> Result<f64, ParseError> {
        let raw = lookup(&values, key)?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ParseError::InvalidValue {
                key,
                value: raw.to_string(),
            })
    };
    let flag = |key: &'static str| -> Result<bool, ParseError> {
        lookup(&values, key).map(parse_flag)
    };

    Ok(BenchSettings {
        number: int("NOS")?,
        time_between_cycles: int("TBS")?,
        upper_limit: int("USL")?,
        upper_time: int("UWT")?,
        inferior_limit: int("LSL")?,
        inferior_time: int("LWT")?,
        disable_shutdown: flag("TMO")?,
        enable_output: flag("TAO")?,
        temperature: float("TAS")?,
        time: float("TAT")?,
    })
}

pub fn render(settings: &BenchSettings) -> String {
    format!(
        "[{SECTION}]\n\
         NOS = {}\n\
         TBS = {}\n\
         USL = {}\n\
         UWT = {}\n\
         LSL = {}\n\
         LWT = {}\n\
         TMO = {}\n\
         TAO = {}\n\
         TAS = {}\n\
         TAT = {}\n",
        settings.number,
        settings.time_between_cycles,
        settings.upper_limit,
        settings.upper_time,
        settings.inferior_limit,
        settings.inferior_time,
        render_flag(settings.disable_shutdown),
        render_flag(settings.enable_output),
        settings.temperature,
        settings.time,
    )
}

/// Collect the `[CONFIG_ENSAIO]` entries, keys upper-cased.
fn section_values(text: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut values = HashMap::new();
    let mut in_section = false;
    let mut seen_section = false;

    for (index, line) in text.lines().enumerate() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim().eq_ignore_ascii_case(SECTION);
            seen_section |= in_section;
            continue;
        }

        if !in_section {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::Malformed(index + 1))?;
        let value = value.trim().trim_matches('"');
        values.insert(key.trim().to_ascii_uppercase(), value.to_string());
    }

    if !seen_section {
        return Err(ParseError::MissingSection);
    }
    Ok(values)
}

fn strip_comment(line: &str) -> &str {
    match line.find([';', '#']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn lookup<'a>(
    values: &'a HashMap<String, String>,
    key: &'static str,
) -> Result<&'a str, ParseError> {
    values
        .get(key)
        .map(String::as_str)
        .ok_or(ParseError::MissingKey(key))
}

// The front-end only treats an explicit FALSE as off.
fn parse_flag(raw: &str) -> bool {
    !(raw.is_empty() || raw == "0" || raw.eq_ignore_ascii_case("false"))
}

fn render_flag(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}
