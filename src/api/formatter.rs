/// Number formatting supplied by the host.
pub trait ValueFormatter {
    fn format_price(&self, price: f64) -> String;
    /// Compact rendering of large magnitudes such as market cap or volume.
    fn format_large_number(&self, value: f64) -> String;
}

/// Plain formatter used until the host installs its own.
///
/// Prices get more decimals as they shrink; large numbers use `K/M/B/T`
/// suffixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValueFormatter;

impl ValueFormatter for DefaultValueFormatter {
    fn format_price(&self, price: f64) -> String {
        if !price.is_finite() {
            return "-".to_owned();
        }
        let magnitude = price.abs();
        if magnitude >= 1.0 || magnitude == 0.0 {
            format!("{price:.2}")
        } else if magnitude >= 0.01 {
            format!("{price:.4}")
        } else {
            format!("{price:.8}")
        }
    }

    fn format_large_number(&self, value: f64) -> String {
        if !value.is_finite() {
            return "-".to_owned();
        }
        let magnitude = value.abs();
        let (scaled, suffix) = if magnitude >= 1e12 {
            (value / 1e12, "T")
        } else if magnitude >= 1e9 {
            (value / 1e9, "B")
        } else if magnitude >= 1e6 {
            (value / 1e6, "M")
        } else if magnitude >= 1e3 {
            (value / 1e3, "K")
        } else {
            (value, "")
        };
        format!("{scaled:.2}{suffix}")
    }
}
