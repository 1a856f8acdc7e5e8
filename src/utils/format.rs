use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 數字分位顯示所使用的地區設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    FrFr,
}

impl Locale {
    fn group_separator(&self) -> &'static str {
        match self {
            Locale::EnUs => ",",
            Locale::DeDe => ".",
            Locale::FrFr => "\u{202f}",
        }
    }

    fn decimal_separator(&self) -> &'static str {
        match self {
            Locale::EnUs => ".",
            Locale::DeDe | Locale::FrFr => ",",
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(Locale::EnUs),
            "de-de" | "de" => Ok(Locale::DeDe),
            "fr-fr" | "fr" => Ok(Locale::FrFr),
            other => Err(format!(
                "Unsupported locale '{}'. Supported locales: en-US, de-DE, fr-FR",
                other
            )),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
        };
        f.write_str(tag)
    }
}

const MAX_FRACTION_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct NumberFormat {
    locale: Locale,
}

impl NumberFormat {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// 千分位格式，最多三位小數並去除尾端的 0
    pub fn format(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let rounded = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
        let (int_part, frac_part) = rounded
            .split_once('.')
            .unwrap_or((rounded.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');

        let mut out = String::new();
        let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
        if value < 0.0 && !is_zero {
            out.push('-');
        }

        let digits = int_part.len();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                out.push_str(self.locale.group_separator());
            }
            out.push(c);
        }

        if !frac_part.is_empty() {
            out.push_str(self.locale.decimal_separator());
            out.push_str(frac_part);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_en_us_grouping() {
        let fmt = NumberFormat::new(Locale::EnUs);
        assert_eq!(fmt.format(0.0), "0");
        assert_eq!(fmt.format(999.0), "999");
        assert_eq!(fmt.format(1200.0), "1,200");
        assert_eq!(fmt.format(1234567.5), "1,234,567.5");
        assert_eq!(fmt.format(1234.5678), "1,234.568");
        assert_eq!(fmt.format(-98765.0), "-98,765");
    }

    #[test]
    fn test_other_locales() {
        assert_eq!(NumberFormat::new(Locale::DeDe).format(1234567.25), "1.234.567,25");
        assert_eq!(
            NumberFormat::new(Locale::FrFr).format(1234.5),
            "1\u{202f}234,5"
        );
    }

    #[test]
    fn test_non_finite_and_negative_zero_render_as_zero() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.format(f64::NAN), "0");
        assert_eq!(fmt.format(f64::INFINITY), "0");
        assert_eq!(fmt.format(-0.0001), "0");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("de_de".parse::<Locale>().unwrap(), Locale::DeDe);
        assert_eq!("fr".parse::<Locale>().unwrap(), Locale::FrFr);
        assert!("ja-JP".parse::<Locale>().is_err());
        assert_eq!(Locale::DeDe.to_string(), "de-DE");
    }
}
