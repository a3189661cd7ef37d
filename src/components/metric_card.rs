use crate::components::{chart, html_escape};
use crate::fmt::{ValueFormat, calc_delta};

/// One metric tile: label, formatted value, day-over-day delta, optional
/// sparkline.
pub struct MetricCard<'a> {
    pub label: &'a str,
    pub value: Option<f64>,
    pub previous: Option<f64>,
    pub format: ValueFormat,
    pub spark: Option<&'a [f64]>,
    pub large: bool,
}

impl<'a> MetricCard<'a> {
    pub fn new(label: &'a str, value: Option<f64>, previous: Option<f64>) -> Self {
        Self {
            label,
            value,
            previous,
            format: ValueFormat::Number,
            spark: None,
            large: false,
        }
    }

    pub fn format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    pub fn spark(mut self, values: &'a [f64]) -> Self {
        self.spark = Some(values);
        self
    }

    pub fn large(mut self) -> Self {
        self.large = true;
        self
    }

    pub fn render(&self) -> String {
        let delta = calc_delta(self.value, self.previous);
        let spark_html = self.spark.map(chart::sparkline).unwrap_or_default();
        let variant = if self.large { " metric-card--large" } else { "" };
        format!(
            r#"<div class="metric-card{variant}">
  <div class="metric-card__label">{}</div>
  <div class="metric-card__value">{}</div>
  <div class="metric-card__footer">
    <span class="metric-card__delta metric-card__delta--{}">{} {}</span>
    {spark_html}
  </div>
</div>"#,
            html_escape(self.label),
            self.format.apply(self.value),
            delta.direction.as_str(),
            delta.direction.arrow(),
            delta.formatted,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_carries_value_and_delta() {
        let html = MetricCard::new("Views", Some(1500.0), Some(1350.0))
            .format(ValueFormat::Compact)
            .render();
        assert!(html.contains("1.5K"));
        assert!(html.contains("metric-card__delta--positive"));
        assert!(html.contains("+11.1%"));
    }

    #[test]
    fn missing_value_renders_placeholder_with_neutral_delta() {
        let html = MetricCard::new("CTR", None, Some(10.0)).render();
        assert!(html.contains("—"));
        assert!(html.contains("metric-card__delta--neutral"));
    }

    #[test]
    fn spark_is_included_when_given() {
        let values = [1.0, 2.0, 3.0];
        let html = MetricCard::new("Subs", Some(3.0), Some(2.0)).spark(&values).render();
        assert!(html.contains("sparkline"));
    }
}
