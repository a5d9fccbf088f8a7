use std::{ops::Deref, str::FromStr};

use serde::Deserialize;

/// Human readable duration like `30s`, `10m` or `1d 12h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDuration;

impl std::fmt::Display for InvalidDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Invalid duration")
    }
}

impl FromStr for Duration {
    type Err = InvalidDuration;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(std::time::Duration::ZERO, |total, part| {
                let unit_at = part
                    .find(|c: char| !c.is_ascii_digit())
                    .ok_or(InvalidDuration)?;
                let (value, unit) = part.split_at(unit_at);
                let value = value.parse::<u64>().map_err(|_| InvalidDuration)?;
                let factor = match unit {
                    "s" => 1,
                    "m" => 60,
                    "h" => 60 * 60,
                    "d" => 24 * 60 * 60,
                    _ => return Err(InvalidDuration),
                };
                let seconds = value.checked_mul(factor).ok_or(InvalidDuration)?;
                total
                    .checked_add(std::time::Duration::from_secs(seconds))
                    .ok_or(InvalidDuration)
            })
            .map(Self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("13s", Some(13)),
            ("42m", Some(42 * 60)),
            ("7h", Some(7 * 60 * 60)),
            ("1d", Some(24 * 60 * 60)),
            ("", Some(0)),
            ("1d 2h 3m 4s", Some(((24 + 2) * 60 + 3) * 60 + 4)),
            ("10", None),
            ("s", None),
            ("xyz", None),
            ("7dd", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input.clone())
                .ok()
                .map(|x| x.as_secs());
            assert_eq!(output, expected, "{input}");
        }
    }

    #[test]
    fn overflowing_duration_is_invalid() {
        let max = u64::MAX;

        assert_eq!(
            format!("{max}s").parse::<Duration>(),
            Ok(Duration(std::time::Duration::from_secs(max)))
        );
        assert_eq!(format!("{max}s 1s").parse::<Duration>(), Err(InvalidDuration));
        assert_eq!(format!("{max}m").parse::<Duration>(), Err(InvalidDuration));
    }
}
