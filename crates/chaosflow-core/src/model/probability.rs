//! 確率

use crate::error::FormatError;
use rand::Rng;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// `<数字>[.<数字>][単位文字]%` 形式（例: "5%", "23.4%", "2.01%"）
///
/// 数字と単位文字は ASCII のみ。
static PROBABILITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+\.?[0-9]*)[A-Za-z0-9_]*%$").expect("probability pattern is valid")
});

/// 0〜1 の確率
///
/// パーセント表記の文字列からパースする。100% を超える値も
/// そのまま保持する（1 を超える確率は `sample()` が常に true を返す）。
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Probability(f32);

impl Probability {
    pub fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// スレッドローカルの乱数源で重み付きコイントスを行う
    pub fn sample(self) -> bool {
        self.sample_with(&mut rand::thread_rng())
    }

    /// 指定した乱数源で重み付きコイントスを行う
    ///
    /// `[0, 1)` の一様乱数が確率より小さければ true。
    pub fn sample_with<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        rng.r#gen::<f32>() < self.0
    }
}

impl FromStr for Probability {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = PROBABILITY_PATTERN
            .captures(s)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| FormatError::InvalidProbability(s.to_string()))?;

        let percent: f32 = digits
            .as_str()
            .parse()
            .map_err(|_| FormatError::InvalidProbability(s.to_string()))?;

        Ok(Self(percent / 100.0))
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}
